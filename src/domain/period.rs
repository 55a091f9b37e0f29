// ==========================================
// WEWORKS 수지분석 - 분석 기간
// ==========================================
// 월 키 형식: "YYYY-MM"
// 계약 종료일이 없으면 시작월 + 11개월 (12개월 구간)
// ==========================================

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// 기본 분석 구간 길이 (개월)
pub const DEFAULT_PERIOD_MONTHS: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32, // 1..=12
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// "YYYY-MM" 파싱
    pub fn parse(key: &str) -> Option<Self> {
        let (y, m) = key.trim().split_once('-')?;
        let year = y.parse::<i32>().ok()?;
        let month = m.parse::<u32>().ok()?;
        Self::new(year, month)
    }

    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// n개월 뒤
    pub fn add_months(&self, n: u32) -> Self {
        let zero_based = self.year * 12 + (self.month as i32 - 1) + n as i32;
        Self {
            year: zero_based.div_euclid(12),
            month: zero_based.rem_euclid(12) as u32 + 1,
        }
    }

    fn ordinal(&self) -> i32 {
        self.year * 12 + self.month as i32 - 1
    }
}

// ==========================================
// AnalysisPeriod - 분석 기간
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisPeriod {
    pub start: YearMonth,
    pub end: YearMonth,
}

impl AnalysisPeriod {
    /// 계약 시작/종료일로부터 분석 기간 결정
    pub fn from_contract(start: NaiveDate, end: Option<NaiveDate>) -> Self {
        let start = YearMonth::from_date(start);
        let end = match end {
            Some(date) => YearMonth::from_date(date),
            None => start.add_months(DEFAULT_PERIOD_MONTHS - 1),
        };
        Self { start, end }
    }

    /// 저장된 "YYYY-MM" 시작/종료월로부터
    pub fn from_keys(start: &str, end: &str) -> Option<Self> {
        Some(Self {
            start: YearMonth::parse(start)?,
            end: YearMonth::parse(end)?,
        })
    }

    /// 구간 내 월 키 목록 (종료가 시작보다 앞이면 빈 목록)
    pub fn month_keys(&self) -> Vec<String> {
        let count = self.end.ordinal() - self.start.ordinal() + 1;
        if count <= 0 {
            return Vec::new();
        }
        (0..count as u32).map(|i| self.start.add_months(i).key()).collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        match YearMonth::parse(key) {
            Some(ym) => ym.ordinal() >= self.start.ordinal() && ym.ordinal() <= self.end.ordinal(),
            None => false,
        }
    }
}
