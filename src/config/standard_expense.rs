// ==========================================
// WEWORKS 수지분석 - 기준경비/경비 기본값
// ==========================================
// 기준경비: 자동 계산 경비의 인당(월) 단가 마스터
// 경비 행: 신규 수지분석서의 경비계획 초기 행
// ==========================================

use crate::domain::expense::{ExpenseBasis, ProjectExpenseItem, StandardExpense};

fn standard(
    id: i64,
    item: &str,
    category: Option<&str>,
    standard_type: Option<&str>,
    standard_detail: &str,
    input_value: Option<f64>,
    calculated_value: Option<f64>,
    final_amount: f64,
) -> StandardExpense {
    StandardExpense {
        id,
        item: item.to_string(),
        category: category.map(str::to_string),
        standard_type: standard_type.map(str::to_string),
        standard_detail: standard_detail.to_string(),
        input_value,
        calculated_value,
        final_amount,
    }
}

/// 기본 기준경비 (9행)
pub fn default_standard_expenses() -> Vec<StandardExpense> {
    let per_person = Some("월*인");
    let per_event = Some("횟수*인");
    vec![
        standard(1, "야근식대", Some("내부"), per_person, "인당 10,000원/일", Some(10.0), Some(0.0), 0.0),
        standard(2, "프로젝트부서비", Some("내부"), per_person, "인당 25,000원", None, Some(25.0), 25.0),
        standard(3, "프로젝트부서비", Some("외주"), per_person, "인당 25,000원", None, Some(25.0), 25.0),
        standard(4, "워크샵", Some(""), per_event, "1인당 50,000원, 분기당 1회 이내", None, None, 0.0),
        standard(5, "Kick-Off 비용", Some(""), per_event, "1인당 150,000원, 시작월 및 종료월", None, None, 0.0),
        standard(6, "지방 임차비", None, None, "인당 50,000원/일", Some(50.0), Some(0.0), 0.0),
        standard(
            7,
            "지방 출장비(월 22일 기준 일 20,000원 반영)",
            None,
            None,
            "인당 20,000원/일",
            Some(20.0),
            Some(0.0),
            0.0,
        ),
        standard(
            8,
            "출장교통비 - 항공권,KTX,렌터카,주유비 등",
            None,
            None,
            "인당 100,000원/일",
            Some(100.0),
            Some(0.0),
            0.0,
        ),
        standard(9, "기타", None, None, "사무실 임대 또는 PM의 의사결정에 의한 경비", None, None, 0.0),
    ]
}

/// 기본 경비계획 행 (9행)
pub fn default_expense_items() -> Vec<ProjectExpenseItem> {
    vec![
        ProjectExpenseItem::new(1, "일반경비", "야근식대_당사").auto(ExpenseBasis::InternalHeadcount, 1),
        ProjectExpenseItem::new(2, "일반경비", "프로젝트부서비_내부").auto(ExpenseBasis::InternalHeadcount, 2),
        ProjectExpenseItem::new(3, "일반경비", "프로젝트부서비_외부").auto(ExpenseBasis::ExternalHeadcount, 3),
        ProjectExpenseItem::new(4, "특별경비", "워크샵"),
        ProjectExpenseItem::new(5, "특별경비", "Kic-Off비용"),
        ProjectExpenseItem::new(6, "특별경비", "임차비(지방)").auto(ExpenseBasis::TotalHeadcount, 6),
        ProjectExpenseItem::new(7, "특별경비", "출장비(지방)").auto(ExpenseBasis::TotalHeadcount, 7),
        ProjectExpenseItem::new(8, "특별경비", "교통비(지방)").auto(ExpenseBasis::TotalHeadcount, 8),
        ProjectExpenseItem::new(9, "특별경비", "기타(렌탈)"),
    ]
}
