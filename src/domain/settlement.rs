// ==========================================
// WEWORKS 수지분석 - 수지정산서 도메인 모델
// ==========================================
// 계획(수지분석서 요약) 대비 실적을 비교한다.
// ==========================================

use crate::domain::numeric::lenient_f64;
use serde::{Deserialize, Serialize};

/// 계획 수치 (수지분석서 요약에서 파생)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedFigures {
    pub revenue: f64,
    pub cost: f64,
    pub labor_cost: f64, // 인건비 (당사 + 외주 용역 원가)
    pub other_cost: f64, // 기타 비용 (일반 + 특별 경비)
    pub profit: f64,
    pub profit_rate: f64,
    pub svc_mm_own: f64,
    pub svc_mm_ext: f64,
}

/// 실적 입력 (세부 항목)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActualFigures {
    #[serde(deserialize_with = "lenient_f64")]
    pub prod_rev_own: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub prod_rev_ext: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub svc_rev_own: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub svc_rev_ext: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub prod_cost_own: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub prod_cost_ext: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub svc_cost_own: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub svc_cost_ext: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub svc_mm_own: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub svc_mm_ext: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub expense_general: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub expense_special: f64,
}

/// 실적 합계 (세부 항목에서 파생)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActualTotals {
    pub revenue: f64,
    pub cost: f64,
    pub labor_cost: f64,
    pub other_cost: f64,
    pub profit: f64,
    pub profit_rate: f64,
}

/// 실적 - 계획
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementVariance {
    pub revenue: f64,
    pub cost: f64,
    pub profit: f64,
    pub profit_rate: f64, // %p
    pub svc_mm_own: f64,
    pub svc_mm_ext: f64,
}

/// 수지정산서
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementStatement {
    pub planned: PlannedFigures,
    pub actual: ActualFigures,
    pub actual_totals: ActualTotals,
    pub variance: SettlementVariance,
}
