// ==========================================
// WEWORKS 수지분석 - 프로젝트 경비 도메인 모델
// ==========================================
// 경비 행은 월별 금액을 가진다. 자동 계산 행은 인력계획 M/M × 기준경비 단가로
// 월별 금액을 다시 만든다 (engine::expense).
// ==========================================

use crate::domain::numeric::{
    lenient_f64, lenient_label, lenient_month_map, lenient_opt_f64, sum_monthly,
};
use crate::domain::types::ExpenseCategory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// ExpenseBasis - 자동 계산 기준 인원
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseBasis {
    InternalHeadcount, // 당사 M/M
    ExternalHeadcount, // 외주 M/M
    TotalHeadcount,    // 당사 + 외주 M/M
}

impl ExpenseBasis {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ExpenseBasis::InternalHeadcount => "INTERNAL_HEADCOUNT",
            ExpenseBasis::ExternalHeadcount => "EXTERNAL_HEADCOUNT",
            ExpenseBasis::TotalHeadcount => "TOTAL_HEADCOUNT",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "INTERNAL_HEADCOUNT" => Some(ExpenseBasis::InternalHeadcount),
            "EXTERNAL_HEADCOUNT" => Some(ExpenseBasis::ExternalHeadcount),
            "TOTAL_HEADCOUNT" => Some(ExpenseBasis::TotalHeadcount),
            _ => None,
        }
    }
}

// ==========================================
// ProjectExpenseItem - 경비 행
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectExpenseItem {
    #[serde(default)]
    pub id: i64,
    #[serde(default = "unclassified", deserialize_with = "lenient_label")]
    pub category: ExpenseCategory,
    #[serde(default)]
    pub item: String, // 항목명
    #[serde(default, deserialize_with = "lenient_month_map")]
    pub monthly_values: BTreeMap<String, f64>,
    #[serde(default)]
    pub is_auto_calculated: bool,
    #[serde(default)]
    pub basis: Option<ExpenseBasis>,
    #[serde(default)]
    pub standard_id: Option<i64>, // 단가를 가져올 기준경비 행
}

fn unclassified() -> ExpenseCategory {
    ExpenseCategory::Other(String::new())
}

impl ProjectExpenseItem {
    pub fn new(id: i64, category: impl Into<ExpenseCategory>, item: impl Into<String>) -> Self {
        Self {
            id,
            category: category.into(),
            item: item.into(),
            monthly_values: BTreeMap::new(),
            is_auto_calculated: false,
            basis: None,
            standard_id: None,
        }
    }

    /// 자동 계산 행으로 지정
    pub fn auto(mut self, basis: ExpenseBasis, standard_id: i64) -> Self {
        self.is_auto_calculated = true;
        self.basis = Some(basis);
        self.standard_id = Some(standard_id);
        self
    }

    pub fn with_value(mut self, month: impl Into<String>, amount: f64) -> Self {
        self.monthly_values.insert(month.into(), amount);
        self
    }

    /// 월별 합계
    pub fn total(&self) -> f64 {
        sum_monthly(&self.monthly_values)
    }
}

// ==========================================
// StandardExpense - 기준경비
// ==========================================
// 단가 = 입력값 × 산출값 (둘 다 있을 때), 아니면 확정금액
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardExpense {
    pub id: i64,
    pub item: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub standard_type: Option<String>,
    #[serde(default)]
    pub standard_detail: String,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub input_value: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub calculated_value: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub final_amount: f64,
}

impl StandardExpense {
    /// 인당(월) 적용 단가
    pub fn unit_rate(&self) -> f64 {
        match (self.input_value, self.calculated_value) {
            (Some(input), Some(calculated)) => input * calculated,
            _ => self.final_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_rate() {
        let mut std = StandardExpense {
            id: 1,
            item: "야근식대".to_string(),
            category: Some("내부".to_string()),
            standard_type: Some("월*인".to_string()),
            standard_detail: String::new(),
            input_value: Some(10.0),
            calculated_value: Some(15.0),
            final_amount: 99.0,
        };
        assert_eq!(std.unit_rate(), 150.0);

        std.calculated_value = None;
        assert_eq!(std.unit_rate(), 99.0);
    }

    #[test]
    fn test_total() {
        let item = ProjectExpenseItem::new(4, "특별경비", "워크샵")
            .with_value("2025-01", 100.0)
            .with_value("2025-03", 50.0);
        assert_eq!(item.total(), 150.0);
        assert_eq!(item.category, ExpenseCategory::Special);
    }

    #[test]
    fn test_deserialize_payload() {
        let json = r#"{"id": 1, "category": "일반경비", "item": "야근식대_당사",
                       "monthlyValues": {"2025-01": "30"}, "isAutoCalculated": true}"#;
        let item: ProjectExpenseItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.total(), 30.0);
        assert!(item.is_auto_calculated);
        assert_eq!(item.basis, None);
    }

    #[test]
    fn test_missing_category_is_unclassified() {
        let items: Vec<ProjectExpenseItem> = serde_json::from_str(
            r#"[{"id": 1, "item": "a", "monthlyValues": {"2025-01": 10}},
                {"id": 2, "category": null, "item": "b"}]"#,
        )
        .unwrap();
        assert_eq!(items[0].category, ExpenseCategory::Other(String::new()));
        assert_eq!(items[1].category, ExpenseCategory::Other(String::new()));
        assert_eq!(items[0].total(), 10.0);
    }
}
