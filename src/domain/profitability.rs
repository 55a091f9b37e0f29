// ==========================================
// WEWORKS 수지분석 - 수지분석서 도메인 모델
// ==========================================
// ProfitabilitySummary는 저장 엔티티가 아니라 계산 결과다.
// 헤더(ProfitabilityHeader)에는 요약 중 4개 값만 남는다.
// ==========================================

use crate::domain::types::ProfitabilityStatus;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// 인력(용역) 집계
// ==========================================

/// 당사 또는 외주 한쪽의 용역 집계
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSegment {
    pub mm: f64,
    pub proposal: f64,
    pub cost: f64,
    pub delay: f64, // 지연 비용 (delay_rate 적용분)
}

/// Manpower Aggregator 결과
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManpowerTotals {
    pub internal: ServiceSegment,
    pub external: ServiceSegment,
}

/// 제안/원가/이익 합계
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentTotal {
    pub proposal: f64,
    pub cost: f64,
    pub profit: f64,
}

impl SegmentTotal {
    pub fn new(proposal: f64, cost: f64) -> Self {
        Self {
            proposal,
            cost,
            profit: proposal - cost,
        }
    }
}

/// 용역 부문 요약
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSummary {
    pub internal: ServiceSegment,
    pub external: ServiceSegment,
    pub general_expense: f64, // 일반경비
    pub special_expense: f64, // 특별경비
    pub total: SegmentTotal,
}

// ==========================================
// 제품 집계
// ==========================================

/// Product Aggregator 결과 (자사/타사 소계 또는 합계)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSubtotal {
    pub quantity: f64,
    pub unit_price: f64,
    pub base: f64,
    pub proposal: f64,
    pub cost: f64,
    pub contract_cost: f64,
    pub margin: f64,
    pub contract_margin: f64,
    pub discount_rate: f64,
    pub margin_rate: f64,
}

/// 제품 부문 한쪽의 제안/원가
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSegment {
    pub proposal: f64,
    pub cost: f64,
}

/// 제품 부문 요약
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub internal: ProductSegment, // 자사
    pub external: ProductSegment, // 타사
    pub total: SegmentTotal,
}

// ==========================================
// ProfitabilitySummary - 수지 요약
// ==========================================
// 불변식: net_profit == total_revenue - total_cost
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitabilitySummary {
    pub service: ServiceSummary,
    pub product: ProductSummary,
    pub total_revenue: f64,
    pub total_cost: f64,
    pub net_profit: f64,
    pub profit_rate: f64,
    pub core_profit: f64,
    pub extra_revenue: f64,
    pub extra_expense: f64,
    pub our_mm: f64,
    pub others_mm: f64,
}

// ==========================================
// ExtraAdjustment - 수지차 부가 수익/비용
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtraAdjustment {
    pub extra_revenue: f64,
    pub extra_revenue_desc: String,
    pub extra_expense: f64,
    pub extra_expense_desc: String,
}

// ==========================================
// ProfitabilityHeader - 수지분석서 헤더 (버전)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitabilityHeader {
    pub id: i64,
    pub project_id: i64,
    pub version: i32,
    pub status: ProfitabilityStatus,
    pub total_revenue: f64,
    pub total_cost: f64,
    pub net_profit: f64,
    pub profit_rate: f64,
    pub updated_at: NaiveDateTime,
}

impl ProfitabilityHeader {
    /// 요약 값 반영
    pub fn apply_summary(&mut self, summary: &ProfitabilitySummary) {
        self.total_revenue = summary.total_revenue;
        self.total_cost = summary.total_cost;
        self.net_profit = summary.net_profit;
        self.profit_rate = summary.profit_rate;
    }
}
