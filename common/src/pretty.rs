//! JSONの寛容な整形表示
//!
//! バックエンドのLLM出力はオブジェクトの場合もJSON文字列の場合もある。
//! 表示は決して失敗させない（ベストエフォート表示）:
//! - 文字列ならまずJSONとしてパースし、成功すれば2スペースで整形
//! - パースできない文字列はそのまま返す
//! - それ以外の値は2スペースで整形
//!
//! 小数部が0の浮動小数点数（`100.0`）はブラウザの `JSON.stringify` と同じく
//! `100` と表示する。

use serde_json::{Number, Value};

/// ブラウザが指数表記に切り替える境界
const EXPONENT_THRESHOLD: f64 = 1e21;

/// LLM出力を表示用に整形（失敗しない）
///
/// # Examples
/// ```
/// use doc_extract_common::pretty_print_json;
/// use serde_json::json;
///
/// assert_eq!(pretty_print_json(&json!("{\"a\":1}")), "{\n  \"a\": 1\n}");
/// assert_eq!(pretty_print_json(&json!("not json")), "not json");
/// ```
pub fn pretty_print_json(raw: &Value) -> String {
    match raw {
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(parsed) => to_pretty(parsed).unwrap_or_else(|| text.clone()),
            Err(_) => text.clone(),
        },
        other => to_pretty(other.clone()).unwrap_or_else(|| other.to_string()),
    }
}

fn to_pretty(value: Value) -> Option<String> {
    serde_json::to_string_pretty(&normalize_numbers(value)).ok()
}

/// 小数部が0の浮動小数点数なら値を返す
fn integral_float(n: &Number) -> Option<f64> {
    if !n.is_f64() {
        return None;
    }
    n.as_f64()
        .filter(|f| f.fract() == 0.0 && f.abs() < EXPONENT_THRESHOLD)
}

/// 数値をブラウザと同じ表記で文字列化（`2.0` → `2`）
pub(crate) fn number_text(n: &Number) -> String {
    match integral_float(n) {
        // -0 も "0"
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) => format!("{}", f),
        None => n.to_string(),
    }
}

/// 整数値の浮動小数点数を整数に置き換える
///
/// u64/i64に収まらない値は元の表記のまま残る。
fn normalize_numbers(value: Value) -> Value {
    match value {
        Value::Number(n) => match integral_float(&n) {
            Some(f) if f >= 0.0 && f < u64::MAX as f64 => Value::Number(Number::from(f as u64)),
            Some(f) if f >= i64::MIN as f64 => Value::Number(Number::from(f as i64)),
            _ => Value::Number(n),
        },
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_numbers).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, item)| (key, normalize_numbers(item)))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_uses_two_space_indent() {
        let out = pretty_print_json(&json!({"name": "x"}));
        assert_eq!(out, "{\n  \"name\": \"x\"\n}");
    }

    #[test]
    fn test_json_string_is_parsed_first() {
        let out = pretty_print_json(&json!("{\"a\":1}"));
        assert_eq!(out, "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_invalid_json_string_unchanged() {
        let raw = "Sorry, I could not find any fields {";
        assert_eq!(pretty_print_json(&json!(raw)), raw);
    }

    #[test]
    fn test_idempotent_on_pretty_text() {
        let once = pretty_print_json(&json!({"invoice": {"number": "A-1", "total": 12.5}, "items": [1, 2]}));
        let twice = pretty_print_json(&Value::String(once.clone()));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_key_order_is_preserved() {
        let out = pretty_print_json(&json!("{\"zeta\":1,\"alpha\":2}"));
        let zeta = out.find("zeta").unwrap();
        let alpha = out.find("alpha").unwrap();
        assert!(zeta < alpha, "キー順が保持されていない: {}", out);
    }

    #[test]
    fn test_scalars_and_empty_containers() {
        assert_eq!(pretty_print_json(&json!(null)), "null");
        assert_eq!(pretty_print_json(&json!(42)), "42");
        assert_eq!(pretty_print_json(&json!({})), "{}");
        assert_eq!(pretty_print_json(&json!([])), "[]");
    }

    #[test]
    fn test_quoted_json_string_round() {
        // "\"abc\"" は文字列 "abc" にパースされ、再び引用符付きで出力される
        assert_eq!(pretty_print_json(&json!("\"abc\"")), "\"abc\"");
    }

    #[test]
    fn test_integral_float_drops_fraction() {
        let out = pretty_print_json(&json!("{\"total\": 100.0}"));
        assert_eq!(out, "{\n  \"total\": 100\n}");
    }

    #[test]
    fn test_nested_integral_floats() {
        let out = pretty_print_json(&json!({"items": [{"qty": 2.0, "price": 12.5}], "count": -3.0}));
        assert_eq!(
            out,
            "{\n  \"items\": [\n    {\n      \"qty\": 2,\n      \"price\": 12.5\n    }\n  ],\n  \"count\": -3\n}"
        );
    }

    #[test]
    fn test_number_text_matches_browser() {
        let text = |v: Value| match v {
            Value::Number(n) => number_text(&n),
            other => panic!("not a number: {}", other),
        };
        assert_eq!(text(json!(2.0)), "2");
        assert_eq!(text(json!(1.25)), "1.25");
        assert_eq!(text(json!(7)), "7");
        assert_eq!(text(json!(-0.0)), "0");
        assert_eq!(text(json!(1e16)), "10000000000000000");
    }
}
