// ==========================================
// WEWORKS 수지분석 - 명령행 도구
// ==========================================
// 사용법:
//   weworks-profitability summarize <input.json>    요약 JSON 출력
//   weworks-profitability export <input.json>       요약 CSV 출력
//   weworks-profitability show [db_path] <project_id>  최신 버전 헤더/요약 출력
// ==========================================

use anyhow::{anyhow, bail, Context};
use serde::{Deserialize, Serialize};
use std::fs;

use weworks_profitability::api::{PlanSnapshot, ProfitabilityApi};
use weworks_profitability::db::default_db_path;
use weworks_profitability::domain::numeric::lenient_f64;
use weworks_profitability::domain::{ProfitabilityHeader, ProfitabilitySummary};
use weworks_profitability::engine::{ProfitabilitySummarizer, DEFAULT_DELAY_RATE};
use weworks_profitability::exporter::write_summary_csv;
use weworks_profitability::i18n::{self, t, t_with_args};
use weworks_profitability::logging;

/// summarize/export 입력 파일
#[derive(Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SummaryInput {
    #[serde(flatten)]
    plan: PlanSnapshot,
    #[serde(deserialize_with = "lenient_f64")]
    extra_revenue: f64,
    #[serde(deserialize_with = "lenient_f64")]
    extra_expense: f64,
    #[serde(deserialize_with = "lenient_f64")]
    delay_rate: f64,
}

impl Default for SummaryInput {
    fn default() -> Self {
        Self {
            plan: PlanSnapshot::default(),
            extra_revenue: 0.0,
            extra_expense: 0.0,
            delay_rate: DEFAULT_DELAY_RATE,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ShowOutput {
    header: ProfitabilityHeader,
    status_label: String,
    summary: ProfitabilitySummary,
}

fn summarize_file(path: &str) -> anyhow::Result<ProfitabilitySummary> {
    let raw = fs::read_to_string(path).with_context(|| format!("입력 파일 읽기 실패: {}", path))?;
    let input: SummaryInput =
        serde_json::from_str(&raw).with_context(|| format!("입력 JSON 해석 실패: {}", path))?;

    tracing::info!(
        manpower = input.plan.manpower.len(),
        products = input.plan.products.len(),
        expenses = input.plan.expenses.len(),
        "입력 로드"
    );

    Ok(ProfitabilitySummarizer::with_delay_rate(input.delay_rate).summarize(
        &input.plan.manpower,
        &input.plan.products,
        &input.plan.expenses,
        input.extra_revenue,
        input.extra_expense,
    ))
}

fn show(db_path: &str, project_id: &str) -> anyhow::Result<()> {
    let project_id: i64 = project_id
        .trim()
        .parse()
        .with_context(|| format!("project_id가 숫자가 아님: {}", project_id))?;

    let api = ProfitabilityApi::open(db_path)?;
    let header = api.get_latest_header(project_id)?.ok_or_else(|| {
        anyhow!(t_with_args(
            "cli.no_profitability",
            &[("project_id", &project_id.to_string())]
        ))
    })?;
    let summary = api.calculate_summary(header.id, project_id)?;

    let output = ShowOutput {
        status_label: i18n::status_label(header.status),
        header,
        summary,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    logging::init();
    i18n::init_locale();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["summarize", path] => {
            let summary = summarize_file(path)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        ["export", path] => {
            let summary = summarize_file(path)?;
            write_summary_csv(&summary, std::io::stdout().lock())?;
        }
        ["show", project_id] => {
            let db_path = default_db_path();
            if let Some(dir) = db_path.parent() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("데이터 디렉터리 생성 실패: {}", dir.display()))?;
            }
            show(&db_path.to_string_lossy(), project_id)?;
        }
        ["show", db_path, project_id] => show(db_path, project_id)?,
        _ => bail!(t("cli.usage")),
    }

    Ok(())
}
