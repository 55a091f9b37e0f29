// ==========================================
// 다국어 (i18n)
// ==========================================
// rust-i18n 사용, 한국어(기본)/영어
// rust_i18n::i18n! 매크로는 lib.rs에서 초기화
// ==========================================

use crate::domain::types::ProfitabilityStatus;

/// 기본 언어
pub const DEFAULT_LOCALE: &str = "ko";

/// 지원 언어
pub const SUPPORTED_LOCALES: [&str; 2] = ["ko", "en"];

/// 언어 지정 환경 변수
pub const LOCALE_ENV: &str = "WEWORKS_LOCALE";

/// 시작 언어 설정
///
/// i18n! 매크로의 fallback은 누락 키에만 적용되므로 시작 시 명시적으로 지정한다.
/// WEWORKS_LOCALE이 지원 언어가 아니면 기본 언어(ko).
pub fn init_locale() {
    let requested = std::env::var(LOCALE_ENV).ok();
    set_locale(resolve_locale(requested.as_deref()));
}

fn resolve_locale(requested: Option<&str>) -> &'static str {
    requested
        .map(str::trim)
        .and_then(|r| SUPPORTED_LOCALES.iter().copied().find(|l| l.eq_ignore_ascii_case(r)))
        .unwrap_or(DEFAULT_LOCALE)
}

pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 언어 설정 ("ko" 또는 "en")
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 메시지 번역
///
/// # 예시
/// ```no_run
/// use weworks_profitability::i18n::t;
/// let label = t("status.standby");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 메시지 번역 (인자 치환, `%{name}` 형식)
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

/// 상태 표시명
pub fn status_label(status: ProfitabilityStatus) -> String {
    t(status.label_key())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // locale은 전역 상태이고 테스트는 병렬 실행되므로 직렬화한다.
    static LOCALE_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_set_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        assert_eq!(current_locale(), "en");

        set_locale(DEFAULT_LOCALE);
        assert_eq!(current_locale(), DEFAULT_LOCALE);
    }

    #[test]
    fn test_resolve_locale() {
        assert_eq!(resolve_locale(None), "ko");
        assert_eq!(resolve_locale(Some("EN ")), "en");
        assert_eq!(resolve_locale(Some("zh-CN")), DEFAULT_LOCALE);
    }

    #[test]
    fn test_init_locale_applies_korean() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        if std::env::var(LOCALE_ENV).is_err() {
            init_locale();
            assert_eq!(current_locale(), DEFAULT_LOCALE);
            assert_eq!(t("export.segment"), "구분");
        }
        set_locale(DEFAULT_LOCALE);
    }

    #[test]
    fn test_status_labels() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale(DEFAULT_LOCALE);
        assert_eq!(status_label(ProfitabilityStatus::InProgress), "작성중");
        assert_eq!(status_label(ProfitabilityStatus::Rejected), "반려");

        set_locale("en");
        assert_eq!(status_label(ProfitabilityStatus::Approved), "Approved");

        set_locale(DEFAULT_LOCALE);
    }

    #[test]
    fn test_every_status_has_label() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale(DEFAULT_LOCALE);
        for status in ProfitabilityStatus::ALL {
            assert_ne!(status_label(status), status.label_key());
        }
    }

    #[test]
    fn test_translate_with_args() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        let msg = t_with_args("cli.no_profitability", &[("project_id", "42")]);
        assert!(msg.contains("42"));
        assert!(msg.contains("No profitability"));

        set_locale(DEFAULT_LOCALE);
    }
}
