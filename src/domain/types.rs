// ==========================================
// WEWORKS 수지분석 - 도메인 타입 정의
// ==========================================
// 구분 태그와 상태 enum은 이 모듈이 단일 소유한다.
// 문자열 비교로 흩어져 있던 판정은 여기의 변환 함수로만 수행한다.
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 외주 인력 소속 라벨 접두어
pub const EXTERNAL_AFFILIATION_PREFIX: &str = "외주";

// ==========================================
// 인력 구분 (Staff Group)
// ==========================================
// 당사(Internal) / 외주(External)
// 입력 시점에 태그로 붙인다. 라벨 접두어 판정은 태그 없는 과거 데이터 전용.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StaffGroup {
    Internal, // 당사
    External, // 외주
}

impl StaffGroup {
    /// 소속 라벨로부터 구분 추론 ("외주"로 시작하면 외주)
    pub fn from_affiliation(affiliation_group: &str) -> Self {
        if affiliation_group.starts_with(EXTERNAL_AFFILIATION_PREFIX) {
            StaffGroup::External
        } else {
            StaffGroup::Internal
        }
    }

    /// 원가 수동 입력값(internal_amount)을 인정하는지 여부
    ///
    /// 당사 인력 원가는 항상 M/M × 단가로 재계산하고,
    /// 외주 인력만 저장된 금액을 우선한다.
    pub fn honors_cost_override(&self) -> bool {
        matches!(self, StaffGroup::External)
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            StaffGroup::Internal => "INTERNAL",
            StaffGroup::External => "EXTERNAL",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "INTERNAL" => Some(StaffGroup::Internal),
            "EXTERNAL" => Some(StaffGroup::External),
            _ => None,
        }
    }
}

impl fmt::Display for StaffGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaffGroup::Internal => write!(f, "당사"),
            StaffGroup::External => write!(f, "외주"),
        }
    }
}

// ==========================================
// 제품 구분 (Product Type)
// ==========================================
// 자사/타사 외의 라벨(빈 값 포함)은 보존하되 어느 소계에도 들어가지 않는다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProductType {
    SelfSupplied,  // 자사
    ThirdParty,    // 타사
    Other(String), // 미분류
}

impl Default for ProductType {
    fn default() -> Self {
        ProductType::Other(String::new())
    }
}

impl ProductType {
    pub fn label(&self) -> &str {
        match self {
            ProductType::SelfSupplied => "자사",
            ProductType::ThirdParty => "타사",
            ProductType::Other(label) => label.as_str(),
        }
    }

    pub fn from_label(s: &str) -> Self {
        match s.trim() {
            "자사" => ProductType::SelfSupplied,
            "타사" => ProductType::ThirdParty,
            other => ProductType::Other(other.to_string()),
        }
    }
}

impl From<String> for ProductType {
    fn from(s: String) -> Self {
        ProductType::from_label(&s)
    }
}

impl From<ProductType> for String {
    fn from(t: ProductType) -> Self {
        t.label().to_string()
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 경비 구분 (Expense Category)
// ==========================================
// 일반경비/특별경비 외의 라벨은 그대로 보존하되 합계에는 들어가지 않는다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExpenseCategory {
    General,       // 일반경비
    Special,       // 특별경비
    Other(String), // 기타 라벨
}

impl ExpenseCategory {
    pub fn label(&self) -> &str {
        match self {
            ExpenseCategory::General => "일반경비",
            ExpenseCategory::Special => "특별경비",
            ExpenseCategory::Other(label) => label.as_str(),
        }
    }
}

impl From<String> for ExpenseCategory {
    fn from(s: String) -> Self {
        match s.as_str() {
            "일반경비" => ExpenseCategory::General,
            "특별경비" => ExpenseCategory::Special,
            _ => ExpenseCategory::Other(s),
        }
    }
}

impl From<&str> for ExpenseCategory {
    fn from(s: &str) -> Self {
        ExpenseCategory::from(s.to_string())
    }
}

impl From<ExpenseCategory> for String {
    fn from(c: ExpenseCategory) -> Self {
        c.label().to_string()
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 요청 구분 (Request Type) - 제품 구매 요청
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RequestType {
    #[default]
    #[serde(rename = "")]
    None,
    #[serde(rename = "예정")]
    Planned,
    #[serde(rename = "계약(정상)")]
    ContractNormal,
    #[serde(rename = "계약(변경)")]
    ContractChanged,
    #[serde(rename = "취소")]
    Cancelled,
}

impl RequestType {
    pub fn label(&self) -> &'static str {
        match self {
            RequestType::None => "",
            RequestType::Planned => "예정",
            RequestType::ContractNormal => "계약(정상)",
            RequestType::ContractChanged => "계약(변경)",
            RequestType::Cancelled => "취소",
        }
    }

    pub fn from_label(s: &str) -> Self {
        match s.trim() {
            "예정" => RequestType::Planned,
            "계약(정상)" => RequestType::ContractNormal,
            "계약(변경)" => RequestType::ContractChanged,
            "취소" => RequestType::Cancelled,
            _ => RequestType::None,
        }
    }
}

// ==========================================
// 수지분석서 상태 (Profitability Status)
// ==========================================
// 상태 전이는 can_transition_to 한 곳에서만 판정한다.
//
//   STANDBY ──▶ IN_PROGRESS ──▶ COMPLETED ──▶ APPROVED
//      │  ◀──────────┘              │
//      └──────────────────────▶     └──────▶ REJECTED ──▶ IN_PROGRESS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProfitabilityStatus {
    Standby,    // 대기
    InProgress, // 작성중
    Completed,  // 작성완료
    Approved,   // 승인
    Rejected,   // 반려
}

impl ProfitabilityStatus {
    pub const ALL: [ProfitabilityStatus; 5] = [
        ProfitabilityStatus::Standby,
        ProfitabilityStatus::InProgress,
        ProfitabilityStatus::Completed,
        ProfitabilityStatus::Approved,
        ProfitabilityStatus::Rejected,
    ];

    /// 문자열 파싱
    ///
    /// 과거 소문자 상태값(draft/review/in_progress ...)도 받아들인다.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "STANDBY" | "DRAFT" => Some(ProfitabilityStatus::Standby),
            "IN_PROGRESS" | "REVIEW" => Some(ProfitabilityStatus::InProgress),
            "COMPLETED" => Some(ProfitabilityStatus::Completed),
            "APPROVED" => Some(ProfitabilityStatus::Approved),
            "REJECTED" => Some(ProfitabilityStatus::Rejected),
            _ => None,
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            ProfitabilityStatus::Standby => "STANDBY",
            ProfitabilityStatus::InProgress => "IN_PROGRESS",
            ProfitabilityStatus::Completed => "COMPLETED",
            ProfitabilityStatus::Approved => "APPROVED",
            ProfitabilityStatus::Rejected => "REJECTED",
        }
    }

    /// i18n 카탈로그 키
    pub fn label_key(&self) -> &'static str {
        match self {
            ProfitabilityStatus::Standby => "status.standby",
            ProfitabilityStatus::InProgress => "status.in_progress",
            ProfitabilityStatus::Completed => "status.completed",
            ProfitabilityStatus::Approved => "status.approved",
            ProfitabilityStatus::Rejected => "status.rejected",
        }
    }

    /// 아직 편집 가능한(요약 갱신 대상) 상태인지
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            ProfitabilityStatus::Standby
                | ProfitabilityStatus::InProgress
                | ProfitabilityStatus::Rejected
        )
    }

    /// 상태 전이 허용 여부 (같은 상태로의 전이는 허용)
    pub fn can_transition_to(&self, target: ProfitabilityStatus) -> bool {
        use ProfitabilityStatus::*;

        if *self == target {
            return true;
        }

        matches!(
            (*self, target),
            (Standby, InProgress)
                | (Standby, Completed)
                | (InProgress, Standby)
                | (InProgress, Completed)
                | (Completed, Approved)
                | (Completed, Rejected)
                | (Rejected, InProgress)
        )
    }

    /// 상태 전이 수행
    ///
    /// # 반환
    /// - Ok(target): 전이 가능
    /// - Err((from, to)): 허용되지 않는 전이
    pub fn transition_to(
        self,
        target: ProfitabilityStatus,
    ) -> Result<ProfitabilityStatus, (ProfitabilityStatus, ProfitabilityStatus)> {
        if self.can_transition_to(target) {
            Ok(target)
        } else {
            Err((self, target))
        }
    }
}

impl fmt::Display for ProfitabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staff_group_from_affiliation() {
        assert_eq!(StaffGroup::from_affiliation("외주_개발"), StaffGroup::External);
        assert_eq!(StaffGroup::from_affiliation("외주"), StaffGroup::External);
        assert_eq!(StaffGroup::from_affiliation("위엠비_컨설팅"), StaffGroup::Internal);
        assert_eq!(StaffGroup::from_affiliation(""), StaffGroup::Internal);
        // 접두어가 아닌 위치의 "외주"는 당사로 판정
        assert_eq!(StaffGroup::from_affiliation("개발_외주"), StaffGroup::Internal);
    }

    #[test]
    fn test_override_policy() {
        assert!(!StaffGroup::Internal.honors_cost_override());
        assert!(StaffGroup::External.honors_cost_override());
    }

    #[test]
    fn test_expense_category_serde() {
        let c: ExpenseCategory = serde_json::from_str("\"일반경비\"").unwrap();
        assert_eq!(c, ExpenseCategory::General);
        let c: ExpenseCategory = serde_json::from_str("\"기타경비\"").unwrap();
        assert_eq!(c, ExpenseCategory::Other("기타경비".to_string()));
        assert_eq!(serde_json::to_string(&ExpenseCategory::Special).unwrap(), "\"특별경비\"");
    }

    #[test]
    fn test_product_type_serde() {
        let t: ProductType = serde_json::from_str("\"타사\"").unwrap();
        assert_eq!(t, ProductType::ThirdParty);
        assert_eq!(ProductType::from_label("자사"), ProductType::SelfSupplied);
        assert_eq!(ProductType::from_label("기타"), ProductType::Other("기타".to_string()));
        let t: ProductType = serde_json::from_str("\"\"").unwrap();
        assert_eq!(t, ProductType::default());
        assert_eq!(serde_json::to_string(&ProductType::SelfSupplied).unwrap(), "\"자사\"");
    }

    #[test]
    fn test_status_parse_legacy_values() {
        assert_eq!(ProfitabilityStatus::from_str("draft"), Some(ProfitabilityStatus::Standby));
        assert_eq!(
            ProfitabilityStatus::from_str("in_progress"),
            Some(ProfitabilityStatus::InProgress)
        );
        assert_eq!(ProfitabilityStatus::from_str("COMPLETED"), Some(ProfitabilityStatus::Completed));
        assert_eq!(ProfitabilityStatus::from_str("unknown"), None);
    }

    #[test]
    fn test_status_transitions() {
        use ProfitabilityStatus::*;

        assert!(Standby.can_transition_to(InProgress));
        assert!(InProgress.can_transition_to(Completed));
        assert!(Completed.can_transition_to(Approved));
        assert!(Completed.can_transition_to(Rejected));
        assert!(Rejected.can_transition_to(InProgress));
        assert!(Approved.can_transition_to(Approved));

        assert!(!Approved.can_transition_to(InProgress));
        assert!(!Standby.can_transition_to(Approved));
        assert!(!InProgress.can_transition_to(Rejected));

        assert_eq!(Completed.transition_to(Approved), Ok(Approved));
        assert_eq!(Approved.transition_to(Standby), Err((Approved, Standby)));
    }

    #[test]
    fn test_status_round_trip_db_str() {
        for status in ProfitabilityStatus::ALL {
            assert_eq!(ProfitabilityStatus::from_str(status.to_db_str()), Some(status));
        }
    }
}
