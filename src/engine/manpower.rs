// ==========================================
// WEWORKS 수지분석 - 인력 집계 엔진
// ==========================================
// 입력: 인력계획 행 목록
// 출력: 당사/외주별 M/M, 제안 금액, 원가
// 원칙: 상태 없음, 입력을 변경하지 않음
// ==========================================

use crate::domain::manpower::ManpowerPlanItem;
use crate::domain::profitability::{ManpowerTotals, ServiceSegment};
use crate::domain::types::StaffGroup;

// ==========================================
// ManpowerAggregator - 인력 집계
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct ManpowerAggregator;

impl ManpowerAggregator {
    pub fn new() -> Self {
        Self
    }

    /// 당사/외주 집계
    ///
    /// 원가 수동 입력값 인정 여부는 구분별 정책(`StaffGroup::honors_cost_override`)을 따른다.
    pub fn aggregate(&self, items: &[ManpowerPlanItem]) -> ManpowerTotals {
        let internal = self.aggregate_group(
            items,
            StaffGroup::Internal,
            StaffGroup::Internal.honors_cost_override(),
        );
        let external = self.aggregate_group(
            items,
            StaffGroup::External,
            StaffGroup::External.honors_cost_override(),
        );

        tracing::debug!(
            internal_mm = internal.mm,
            external_mm = external.mm,
            internal_cost = internal.cost,
            external_cost = external.cost,
            "인력 집계 완료"
        );

        ManpowerTotals { internal, external }
    }

    /// 한 구분의 집계
    ///
    /// # 인자
    /// - `group`: 집계 대상 구분
    /// - `honor_cost_override`: true이면 internal_amount 수동값을 원가로 사용
    pub fn aggregate_group(
        &self,
        items: &[ManpowerPlanItem],
        group: StaffGroup,
        honor_cost_override: bool,
    ) -> ServiceSegment {
        items
            .iter()
            .filter(|item| item.group() == group)
            .fold(ServiceSegment::default(), |mut acc, item| {
                acc.mm += item.total_mm();
                acc.proposal += item.proposal_amount();
                acc.cost += item.cost_amount(honor_cost_override);
                acc
            })
    }
}

/// 인력 집계 (기본 정책)
pub fn aggregate_manpower(items: &[ManpowerPlanItem]) -> ManpowerTotals {
    ManpowerAggregator::new().aggregate(items)
}
