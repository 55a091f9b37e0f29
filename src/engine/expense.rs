// ==========================================
// WEWORKS 수지분석 - 경비 계산 엔진
// ==========================================
// 1. 경비 구분별 합계 (일반경비/특별경비)
// 2. 자동 계산 행: 월별 투입 M/M × 기준경비 단가
// 3. 경비계획 편집 (수동 입력 시 자동 계산 해제)
// ==========================================

use crate::domain::expense::{ExpenseBasis, ProjectExpenseItem, StandardExpense};
use crate::domain::manpower::ManpowerPlanItem;
use crate::domain::period::AnalysisPeriod;
use crate::domain::types::{ExpenseCategory, StaffGroup};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

// ==========================================
// 경비 구분별 합계
// ==========================================

/// 일반경비/특별경비 합계
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ExpenseTotals {
    pub general: f64,
    pub special: f64,
}

/// 경비 행을 구분별로 합산 (그 외 구분은 제외)
pub fn sum_by_category(items: &[ProjectExpenseItem]) -> ExpenseTotals {
    items.iter().fold(ExpenseTotals::default(), |mut acc, item| {
        match item.category {
            ExpenseCategory::General => acc.general += item.total(),
            ExpenseCategory::Special => acc.special += item.total(),
            ExpenseCategory::Other(_) => {}
        }
        acc
    })
}

// ==========================================
// 월별 투입 인원
// ==========================================

/// 한 달의 당사/외주 M/M
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MonthlyHeadcount {
    pub internal: f64,
    pub external: f64,
}

impl MonthlyHeadcount {
    pub fn for_basis(&self, basis: ExpenseBasis) -> f64 {
        match basis {
            ExpenseBasis::InternalHeadcount => self.internal,
            ExpenseBasis::ExternalHeadcount => self.external,
            ExpenseBasis::TotalHeadcount => self.internal + self.external,
        }
    }
}

/// 인력계획 → 월별 당사/외주 M/M
pub fn monthly_headcount(items: &[ManpowerPlanItem]) -> BTreeMap<String, MonthlyHeadcount> {
    let mut summary: BTreeMap<String, MonthlyHeadcount> = BTreeMap::new();

    for item in items {
        let group = item.group();
        for (month, mm) in &item.monthly_allocation {
            let entry = summary.entry(month.clone()).or_default();
            match group {
                StaffGroup::Internal => entry.internal += mm,
                StaffGroup::External => entry.external += mm,
            }
        }
    }

    summary
}

// ==========================================
// ExpenseCalculator - 자동 계산
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ExpenseCalculator {
    rates: HashMap<i64, f64>, // 기준경비 id → 단가
}

impl ExpenseCalculator {
    pub fn new(standards: &[StandardExpense]) -> Self {
        let rates = standards.iter().map(|s| (s.id, s.unit_rate())).collect();
        Self { rates }
    }

    /// 기준경비 단가 (없으면 0)
    pub fn rate(&self, standard_id: i64) -> f64 {
        self.rates.get(&standard_id).copied().unwrap_or(0.0)
    }

    /// 자동 계산된 월별 금액
    ///
    /// 인력계획에 나타난 월만 다시 계산하고 나머지 월 값은 유지한다.
    /// 계산 결과가 음수면 해당 월을 제거한다.
    pub fn calculate_monthly_values(
        &self,
        item: &ProjectExpenseItem,
        headcount: &BTreeMap<String, MonthlyHeadcount>,
    ) -> BTreeMap<String, f64> {
        let mut values = item.monthly_values.clone();

        for (month, hc) in headcount {
            let calculated = match (item.basis, item.standard_id) {
                (Some(basis), Some(standard_id)) => hc.for_basis(basis) * self.rate(standard_id),
                _ => 0.0,
            };

            if calculated >= 0.0 {
                values.insert(month.clone(), calculated);
            } else {
                values.remove(month);
            }
        }

        values
    }
}

// ==========================================
// ExpensePlan - 경비계획 편집
// ==========================================
#[derive(Debug, Clone)]
pub struct ExpensePlan {
    items: Vec<ProjectExpenseItem>,
    calculator: ExpenseCalculator,
    headcount: BTreeMap<String, MonthlyHeadcount>,
}

impl ExpensePlan {
    pub fn new(
        items: Vec<ProjectExpenseItem>,
        manpower: &[ManpowerPlanItem],
        standards: &[StandardExpense],
    ) -> Self {
        Self {
            items,
            calculator: ExpenseCalculator::new(standards),
            headcount: monthly_headcount(manpower),
        }
    }

    pub fn items(&self) -> &[ProjectExpenseItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<ProjectExpenseItem> {
        self.items
    }

    pub fn headcount(&self) -> &BTreeMap<String, MonthlyHeadcount> {
        &self.headcount
    }

    /// 분석 기간의 모든 월을 재계산 대상에 넣는다 (투입 없는 월은 0)
    pub fn with_period(mut self, period: &AnalysisPeriod) -> Self {
        for month in period.month_keys() {
            self.headcount.entry(month).or_default();
        }
        self
    }

    /// 인력계획 변경 반영
    pub fn update_manpower(&mut self, manpower: &[ManpowerPlanItem]) {
        self.headcount = monthly_headcount(manpower);
    }

    /// 자동 계산 행 전체 재계산
    pub fn recalculate_all(&mut self) {
        for item in self.items.iter_mut().filter(|i| i.is_auto_calculated) {
            item.monthly_values = self.calculator.calculate_monthly_values(item, &self.headcount);
        }
    }

    /// 월 금액 수동 입력 (자동 계산 해제)
    ///
    /// # 반환
    /// - true: 해당 행을 찾아 반영
    /// - false: 행 없음
    pub fn set_monthly_value(&mut self, id: i64, month: &str, value: f64) -> bool {
        match self.items.iter_mut().find(|i| i.id == id) {
            Some(item) => {
                item.monthly_values.insert(month.to_string(), value);
                item.is_auto_calculated = false;
                true
            }
            None => false,
        }
    }

    /// 항목명 변경
    pub fn rename_item(&mut self, id: i64, name: &str) -> bool {
        match self.items.iter_mut().find(|i| i.id == id) {
            Some(item) => {
                item.item = name.to_string();
                true
            }
            None => false,
        }
    }

    /// 자동 계산 토글 (켜는 순간 재계산)
    pub fn toggle_auto_calculate(&mut self, id: i64) -> bool {
        let calculator = &self.calculator;
        let headcount = &self.headcount;
        match self.items.iter_mut().find(|i| i.id == id) {
            Some(item) => {
                item.is_auto_calculated = !item.is_auto_calculated;
                if item.is_auto_calculated {
                    item.monthly_values = calculator.calculate_monthly_values(item, headcount);
                }
                true
            }
            None => false,
        }
    }

    pub fn totals(&self) -> ExpenseTotals {
        sum_by_category(&self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::standard_expense::{default_expense_items, default_standard_expenses};

    fn manpower() -> Vec<ManpowerPlanItem> {
        vec![
            ManpowerPlanItem::new(1, "위엠비_개발")
                .with_allocation("2025-01", 2.0)
                .with_allocation("2025-02", 1.0),
            ManpowerPlanItem::new(2, "외주_개발").with_allocation("2025-01", 1.5),
        ]
    }

    fn standard(id: i64, input: Option<f64>, calculated: Option<f64>, final_amount: f64) -> StandardExpense {
        StandardExpense {
            id,
            item: format!("std{}", id),
            category: None,
            standard_type: None,
            standard_detail: String::new(),
            input_value: input,
            calculated_value: calculated,
            final_amount,
        }
    }

    #[test]
    fn test_monthly_headcount() {
        let hc = monthly_headcount(&manpower());
        assert_eq!(hc["2025-01"], MonthlyHeadcount { internal: 2.0, external: 1.5 });
        assert_eq!(hc["2025-02"], MonthlyHeadcount { internal: 1.0, external: 0.0 });
    }

    #[test]
    fn test_sum_by_category_ignores_other() {
        let items = vec![
            ProjectExpenseItem::new(1, "일반경비", "a").with_value("2025-01", 10.0),
            ProjectExpenseItem::new(2, "특별경비", "b").with_value("2025-01", 20.0),
            ProjectExpenseItem::new(3, "기타", "c").with_value("2025-01", 40.0),
        ];
        assert_eq!(sum_by_category(&items), ExpenseTotals { general: 10.0, special: 20.0 });
    }

    #[test]
    fn test_auto_calculation_by_basis() {
        let standards = vec![standard(2, None, Some(25.0), 25.0), standard(6, Some(50.0), Some(2.0), 0.0)];
        let items = vec![
            ProjectExpenseItem::new(2, "일반경비", "프로젝트부서비_내부")
                .auto(ExpenseBasis::InternalHeadcount, 2),
            ProjectExpenseItem::new(6, "특별경비", "임차비(지방)")
                .auto(ExpenseBasis::TotalHeadcount, 6),
        ];

        let mut plan = ExpensePlan::new(items, &manpower(), &standards);
        plan.recalculate_all();

        let internal = &plan.items()[0];
        assert_eq!(internal.monthly_values["2025-01"], 50.0);
        assert_eq!(internal.monthly_values["2025-02"], 25.0);

        let rent = &plan.items()[1];
        // (2 + 1.5) × 100
        assert_eq!(rent.monthly_values["2025-01"], 350.0);
        assert_eq!(plan.totals().special, 350.0 + 100.0);
    }

    #[test]
    fn test_negative_result_removes_month() {
        let standards = vec![standard(9, None, None, -10.0)];
        let item = ProjectExpenseItem::new(9, "특별경비", "기타")
            .auto(ExpenseBasis::InternalHeadcount, 9)
            .with_value("2025-01", 5.0)
            .with_value("2024-12", 7.0);

        let calc = ExpenseCalculator::new(&standards);
        let values = calc.calculate_monthly_values(&item, &monthly_headcount(&manpower()));
        assert!(!values.contains_key("2025-01"));
        // 인력계획에 없는 월은 유지
        assert_eq!(values["2024-12"], 7.0);
    }

    #[test]
    fn test_manual_entry_disables_auto() {
        let standards = vec![standard(2, None, Some(25.0), 25.0)];
        let items = vec![ProjectExpenseItem::new(2, "일반경비", "프로젝트부서비_내부")
            .auto(ExpenseBasis::InternalHeadcount, 2)];

        let mut plan = ExpensePlan::new(items, &manpower(), &standards);
        assert!(plan.set_monthly_value(2, "2025-01", 999.0));
        assert!(!plan.items()[0].is_auto_calculated);

        // 자동 계산 해제 행은 재계산 대상 아님
        plan.recalculate_all();
        assert_eq!(plan.items()[0].monthly_values["2025-01"], 999.0);

        // 다시 켜면 즉시 재계산
        assert!(plan.toggle_auto_calculate(2));
        assert_eq!(plan.items()[0].monthly_values["2025-01"], 50.0);

        assert!(!plan.set_monthly_value(404, "2025-01", 1.0));
    }

    #[test]
    fn test_period_months_filled_with_zero() {
        let standards = vec![standard(2, None, Some(25.0), 25.0)];
        let items = vec![ProjectExpenseItem::new(2, "일반경비", "프로젝트부서비_내부")
            .auto(ExpenseBasis::InternalHeadcount, 2)];
        let period = AnalysisPeriod::from_keys("2025-01", "2025-04").unwrap();

        let mut plan = ExpensePlan::new(items, &manpower(), &standards).with_period(&period);
        plan.recalculate_all();

        let values = &plan.items()[0].monthly_values;
        assert_eq!(values.len(), 4);
        assert_eq!(values["2025-02"], 25.0);
        assert_eq!(values["2025-04"], 0.0);
    }

    #[test]
    fn test_rename_item() {
        let mut plan = ExpensePlan::new(vec![ProjectExpenseItem::new(9, "특별경비", "기타(렌탈)")], &[], &[]);
        assert!(plan.rename_item(9, "노트북 렌탈"));
        assert_eq!(plan.items()[0].item, "노트북 렌탈");
    }

    #[test]
    fn test_default_templates_recalculate() {
        let mut plan = ExpensePlan::new(
            default_expense_items(),
            &manpower(),
            &default_standard_expenses(),
        );
        plan.recalculate_all();

        // 프로젝트부서비_외부: 외주 1.5 M/M × 25
        let external_dept = plan.items().iter().find(|i| i.id == 3).unwrap();
        assert_eq!(external_dept.monthly_values["2025-01"], 37.5);

        // 수동 항목(워크샵)은 비어 있음
        let workshop = plan.items().iter().find(|i| i.id == 4).unwrap();
        assert!(workshop.monthly_values.is_empty());
    }
}
