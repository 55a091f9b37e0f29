// ==========================================
// 명령행 도구 테스트
// ==========================================
// 빌드된 바이너리 실행: 표준 출력에는 결과 문서만 있어야 한다.
// ==========================================

use std::io::Write;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

const INPUT: &str = r#"{
    "manpower": [
        {"id": 1, "affiliationGroup": "위엠비_개발",
         "monthlyAllocation": {"2025-01": 2, "2025-02": 3}, "proposedUnitPrice": 1000}
    ],
    "products": [
        {"type": "자사", "quantity": 10, "unitPrice": 100, "proposalPrice": 900},
        {"quantity": 1, "unitPrice": 50}
    ],
    "expenses": [
        {"category": "일반경비", "monthlyValues": {"2025-01": 100}},
        {"item": "분류 없음", "monthlyValues": {"2025-01": 999}}
    ],
    "extraRevenue": "200"
}"#;

fn write_input() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("임시 파일 생성 실패");
    file.write_all(INPUT.as_bytes()).expect("입력 기록 실패");
    file
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_weworks-profitability"))
        .args(args)
        .env("RUST_LOG", "info")
        .env_remove("WEWORKS_LOCALE")
        .output()
        .expect("바이너리 실행 실패")
}

#[test]
fn test_summarize_prints_only_json() {
    let input = write_input();
    let output = run(&["summarize", input.path().to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let summary: serde_json::Value = serde_json::from_str(&stdout).expect("stdout이 JSON이 아님");

    let number = |v: &serde_json::Value| v.as_f64().expect("숫자 필드");
    assert_eq!(number(&summary["service"]["internal"]["mm"]), 5.0);
    // 구분 없는 제품/경비 행은 합계에서 빠진다
    assert_eq!(number(&summary["product"]["total"]["proposal"]), 900.0);
    assert_eq!(number(&summary["service"]["generalExpense"]), 100.0);
    assert_eq!(number(&summary["totalRevenue"]), 5900.0);
    assert_eq!(number(&summary["netProfit"]), 6000.0);
}

#[test]
fn test_export_prints_korean_csv() {
    let input = write_input();
    let output = run(&["export", input.path().to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let first = stdout.lines().next().unwrap_or_default();
    assert!(first.starts_with("구분,M/M,제안금액,원가,이익"), "헤더: {}", first);
    assert_eq!(stdout.lines().count(), 13);
}

#[test]
fn test_usage_error_in_korean() {
    let output = run(&[]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("사용법"));
}
