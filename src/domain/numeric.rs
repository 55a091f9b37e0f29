// ==========================================
// WEWORKS 수지분석 - 수치 처리 유틸
// ==========================================
// 원천 데이터의 숫자 필드는 느슨하다: null, 누락, 문자열 숫자가 섞여 온다.
// 규칙: 해석할 수 없는 값은 0(또는 None)으로 본다. 오류로 올리지 않는다.
// ==========================================

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// 반올림 (x.5는 +∞ 방향)
///
/// 화면/DB에 저장된 금액과 맞추기 위해 `f64::round`(0에서 먼 쪽)가 아닌
/// 절반 올림을 사용한다. 음수 -2.5 → -2.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// JSON 값 → 수치 (해석 불가 시 None)
pub fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// 월별 맵 합계
pub fn sum_monthly(values: &BTreeMap<String, f64>) -> f64 {
    values.values().copied().filter(|v| v.is_finite()).sum()
}

/// Option<f64> 느슨한 역직렬화
pub fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_f64(&value))
}

/// f64 느슨한 역직렬화 (해석 불가 시 0)
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_f64(&value).unwrap_or(0.0))
}

/// 구분 라벨 느슨한 역직렬화 (문자열이 아니면 빈 라벨)
pub fn lenient_label<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => T::from(s),
        _ => T::from(String::new()),
    })
}

/// 월별 맵 느슨한 역직렬화
///
/// 객체가 아니면 빈 맵, 값이 숫자가 아니면 0.
pub fn lenient_month_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(month_map_from_value(&value))
}

/// JSON 값 → 월별 맵
pub fn month_map_from_value(value: &Value) -> BTreeMap<String, f64> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(month, v)| (month.clone(), value_to_f64(v).unwrap_or(0.0)))
            .collect(),
        _ => BTreeMap::new(),
    }
}
