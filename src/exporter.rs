// ==========================================
// WEWORKS 수지분석 - 요약 CSV 내보내기
// ==========================================
// 열: 구분, M/M, 제안금액, 원가, 이익
// 라벨은 현재 locale의 i18n 카탈로그에서 가져온다.
// ==========================================

use crate::domain::profitability::ProfitabilitySummary;
use crate::i18n::t;
use std::io::Write;

fn amount(value: f64) -> String {
    format!("{:.0}", value)
}

// -0 출력 방지
fn loss(value: f64) -> String {
    amount(0.0 - value)
}

fn mm(value: f64) -> String {
    format!("{:.2}", value)
}

/// 요약 표를 CSV로 기록
pub fn write_summary_csv<W: Write>(summary: &ProfitabilitySummary, writer: W) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    let service = &summary.service;
    let product = &summary.product;

    wtr.write_record([
        t("export.segment"),
        t("export.mm"),
        t("export.proposal"),
        t("export.cost"),
        t("export.profit"),
    ])?;

    for (label, segment) in [
        ("export.internal_service", &service.internal),
        ("export.external_service", &service.external),
    ] {
        let cost = segment.cost + segment.delay;
        wtr.write_record([
            t(label),
            mm(segment.mm),
            amount(segment.proposal),
            amount(cost),
            amount(segment.proposal - cost),
        ])?;
    }

    for (label, cost) in [
        ("export.general_expense", service.general_expense),
        ("export.special_expense", service.special_expense),
    ] {
        wtr.write_record([t(label), String::new(), String::new(), amount(cost), loss(cost)])?;
    }

    wtr.write_record([
        t("export.service_total"),
        mm(summary.our_mm + summary.others_mm),
        amount(service.total.proposal),
        amount(service.total.cost),
        amount(service.total.profit),
    ])?;

    for (label, segment) in [
        ("export.product_internal", &product.internal),
        ("export.product_external", &product.external),
    ] {
        wtr.write_record([
            t(label),
            String::new(),
            amount(segment.proposal),
            amount(segment.cost),
            amount(segment.proposal - segment.cost),
        ])?;
    }

    wtr.write_record([
        t("export.product_total"),
        String::new(),
        amount(product.total.proposal),
        amount(product.total.cost),
        amount(product.total.profit),
    ])?;

    wtr.write_record([
        t("export.extra_revenue"),
        String::new(),
        amount(summary.extra_revenue),
        String::new(),
        amount(summary.extra_revenue),
    ])?;
    wtr.write_record([
        t("export.extra_expense"),
        String::new(),
        String::new(),
        amount(summary.extra_expense),
        loss(summary.extra_expense),
    ])?;

    wtr.write_record([
        t("export.grand_total"),
        mm(summary.our_mm + summary.others_mm),
        amount(summary.total_revenue),
        amount(summary.total_cost),
        amount(summary.net_profit),
    ])?;
    wtr.write_record([
        t("export.profit_rate"),
        String::new(),
        String::new(),
        String::new(),
        format!("{:.1}", summary.profit_rate),
    ])?;

    wtr.flush()?;
    Ok(())
}
