// ==========================================
// WEWORKS 수지분석 - 인력계획 도메인 모델
// ==========================================
// 금액 단위: 천원 / 투입 단위: M/M
// ==========================================

use crate::domain::numeric::{lenient_month_map, lenient_opt_f64, round_half_up, sum_monthly};
use crate::domain::types::StaffGroup;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// ManpowerPlanItem - 인력계획 행
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ManpowerPlanItem {
    pub id: i64,
    pub project_name: String,      // 업무영역
    pub role: String,              // 역할
    pub detailed_task: String,     // 세부업무
    pub company_name: String,      // 회사명
    pub affiliation_group: String, // 소속 및 직군 (예: 위엠비_개발, 외주_개발)
    pub staff_group: Option<StaffGroup>, // 당사/외주 태그 (없으면 라벨로 추론)
    pub wmb_rank: String,          // 직급
    pub grade: String,             // 등급
    pub name: String,              // 성명
    pub user_id: Option<i64>,

    #[serde(deserialize_with = "lenient_month_map")]
    pub monthly_allocation: BTreeMap<String, f64>, // "YYYY-MM" → M/M

    #[serde(deserialize_with = "lenient_opt_f64")]
    pub proposed_unit_price: Option<f64>, // 제안 단가
    #[serde(deserialize_with = "lenient_opt_f64")]
    pub proposed_amount: Option<f64>, // 제안 금액 (수동 입력 시 우선)
    #[serde(deserialize_with = "lenient_opt_f64")]
    pub internal_unit_price: Option<f64>, // 내부 단가
    #[serde(deserialize_with = "lenient_opt_f64")]
    pub internal_amount: Option<f64>, // 내부 금액 (외주만 수동 입력 인정)
}

impl ManpowerPlanItem {
    /// 새 인력계획 행 생성
    ///
    /// 입력 시점에 소속 라벨로 당사/외주 태그를 붙인다.
    pub fn new(id: i64, affiliation_group: impl Into<String>) -> Self {
        let affiliation_group = affiliation_group.into();
        let staff_group = Some(StaffGroup::from_affiliation(&affiliation_group));
        Self {
            id,
            affiliation_group,
            staff_group,
            ..Default::default()
        }
    }

    pub fn with_allocation(mut self, month: impl Into<String>, mm: f64) -> Self {
        self.monthly_allocation.insert(month.into(), mm);
        self
    }

    pub fn with_proposed_unit_price(mut self, unit_price: f64) -> Self {
        self.proposed_unit_price = Some(unit_price);
        self
    }

    pub fn with_internal_unit_price(mut self, unit_price: f64) -> Self {
        self.internal_unit_price = Some(unit_price);
        self
    }

    pub fn with_proposed_amount(mut self, amount: f64) -> Self {
        self.proposed_amount = Some(amount);
        self
    }

    pub fn with_internal_amount(mut self, amount: f64) -> Self {
        self.internal_amount = Some(amount);
        self
    }

    /// 당사/외주 구분
    pub fn group(&self) -> StaffGroup {
        self.staff_group
            .unwrap_or_else(|| StaffGroup::from_affiliation(&self.affiliation_group))
    }

    /// 태그가 없으면 라벨로 추론해 붙인다 (저장 직전 호출)
    pub fn attach_staff_group(&mut self) {
        if self.staff_group.is_none() {
            self.staff_group = Some(StaffGroup::from_affiliation(&self.affiliation_group));
        }
    }

    /// 총 투입 M/M
    pub fn total_mm(&self) -> f64 {
        sum_monthly(&self.monthly_allocation)
    }

    /// 제안 금액: 수동 입력값 우선, 없으면 round(M/M × 제안 단가)
    pub fn proposal_amount(&self) -> f64 {
        match self.proposed_amount {
            Some(amount) => amount,
            None => round_half_up(self.total_mm() * self.proposed_unit_price.unwrap_or(0.0)),
        }
    }

    /// 원가 금액
    ///
    /// `honor_cost_override`가 true일 때만 저장된 internal_amount를 사용한다.
    pub fn cost_amount(&self, honor_cost_override: bool) -> f64 {
        match self.internal_amount {
            Some(amount) if honor_cost_override => amount,
            _ => round_half_up(self.total_mm() * self.internal_unit_price.unwrap_or(0.0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_attaches_staff_group() {
        assert_eq!(ManpowerPlanItem::new(1, "외주_개발").group(), StaffGroup::External);
        assert_eq!(ManpowerPlanItem::new(2, "위엠비_개발").group(), StaffGroup::Internal);
    }

    #[test]
    fn test_explicit_tag_wins_over_label() {
        let mut item = ManpowerPlanItem::new(1, "외주_개발");
        item.staff_group = Some(StaffGroup::Internal);
        assert_eq!(item.group(), StaffGroup::Internal);
    }

    #[test]
    fn test_cost_override_only_when_honored() {
        let item = ManpowerPlanItem::new(1, "외주_개발")
            .with_allocation("2025-01", 4.0)
            .with_internal_unit_price(1000.0)
            .with_internal_amount(7777.0);

        assert_eq!(item.cost_amount(true), 7777.0);
        assert_eq!(item.cost_amount(false), 4000.0);
    }

    #[test]
    fn test_proposal_rounding() {
        let item = ManpowerPlanItem::new(1, "위엠비_개발")
            .with_allocation("2025-01", 0.5)
            .with_proposed_unit_price(1001.0);
        // 500.5 → 501
        assert_eq!(item.proposal_amount(), 501.0);
    }

    #[test]
    fn test_deserialize_camel_case_with_loose_numbers() {
        let json = r#"{
            "id": 3,
            "affiliationGroup": "외주_컨설팅",
            "monthlyAllocation": {"2025-01": 1, "2025-02": "0.5", "2025-03": null},
            "proposedUnitPrice": "1200",
            "proposedAmount": null,
            "internalUnitPrice": 900
        }"#;
        let item: ManpowerPlanItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.total_mm(), 1.5);
        assert_eq!(item.proposed_unit_price, Some(1200.0));
        assert_eq!(item.proposed_amount, None);
        assert_eq!(item.internal_amount, None);
        assert_eq!(item.group(), StaffGroup::External);
    }
}
