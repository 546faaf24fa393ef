// src/common/coerce.rs

// Conversões "tolerantes" dos campos numéricos e de data que chegam da API do armazém.
// O backend serializa DecimalField como string, às vezes com vírgula, às vezes null.
// Nada aqui retorna erro: valor ruim vira 0 ou NaN, conforme a regra de cada conversão.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Conversão no estilo `Number(x)`: null vira 0, string vazia vira 0,
/// texto que não é um literal decimal completo vira NaN.
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => string_to_number(s),
        Value::Array(_) | Value::Object(_) => f64::NAN,
    }
}

fn string_to_number(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    // O parser do Rust aceita "inf" e "nan", que não são literais válidos aqui.
    let lower = s.to_ascii_lowercase();
    if lower.contains("inf") || lower.contains("nan") {
        return f64::NAN;
    }

    s.parse::<f64>().unwrap_or(f64::NAN)
}

/// Conversão no estilo `parseFloat(x)`: lê o maior prefixo numérico válido.
/// Sem prefixo numérico, NaN.
pub fn parse_float(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }

    if s[end..].starts_with("Infinity") {
        return if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        let frac_digits = frac_end - frac_start;
        if digits > 0 || frac_digits > 0 {
            end = frac_end;
            digits += frac_digits;
        }
    }

    if digits == 0 {
        return f64::NAN;
    }

    // Expoente só entra se tiver pelo menos um dígito
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().unwrap_or(f64::NAN)
}

/// Parse tolerante a vírgula decimal ("12,50" -> 12.5).
/// Número passa direto; string troca a PRIMEIRA vírgula por ponto antes do `parse_float`;
/// qualquer outra coisa vira 0.
pub fn parse_float_with_comma(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => parse_float(&s.replacen(',', ".", 1)),
        _ => 0.0,
    }
}

/// Equivalente a `parseInt(x, 10)`, usado no nível de estoque. Sem dígitos, 0.
pub fn parse_int(value: &Value) -> i64 {
    let text = match value {
        Value::Number(n) => {
            return n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
                .unwrap_or(0);
        }
        Value::String(s) => s.trim_start(),
        _ => return 0,
    };

    let (sign, digits) = match text.as_bytes().first() {
        Some(b'-') => (-1, &text[1..]),
        Some(b'+') => (1, &text[1..]),
        _ => (1, text),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());

    digits[..end].parse::<i64>().map(|n| sign * n).unwrap_or(0)
}

/// Representação textual de um total, para a busca de pedidos.
/// `None` quando o campo não existe (null).
pub fn to_display_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Number(n) => Some(match n.as_i64() {
            Some(i) => i.to_string(),
            None => n.as_f64().map(|f| f.to_string()).unwrap_or_default(),
        }),
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Converte o texto de data do backend para UTC.
/// Aceita RFC 3339, data-hora sem fuso (tratada como UTC) e data pura (meia-noite UTC).
/// Texto vazio ou inválido retorna `None`, e o registro fica fora de qualquer janela.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Campo de data vindo do backend. String passa direto; número é lido como
/// milissegundos desde a época (como `new Date(n)`); qualquer outra coisa vira `None`.
pub fn deserialize_loose_date<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|ms| ms.trunc() as i64))
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|ts| ts.to_rfc3339()),
        _ => None,
    })
}

/// Chave estrangeira vinda do backend: inteiro, número inteiro em ponto flutuante
/// ou string numérica. Fora disso vira `None`, e o registro não casa com ninguém.
pub fn deserialize_loose_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[test]
    fn comma_decimal_is_parsed() {
        assert_eq!(parse_float_with_comma(&json!("12,50")), 12.5);
        assert_eq!(parse_float_with_comma(&json!("12.50")), 12.5);
    }

    #[test]
    fn numbers_pass_through_unchanged() {
        assert_eq!(parse_float_with_comma(&json!(7)), 7.0);
        assert_eq!(parse_float_with_comma(&json!(2.25)), 2.25);
    }

    #[test]
    fn non_string_non_number_is_zero() {
        assert_eq!(parse_float_with_comma(&Value::Null), 0.0);
        assert_eq!(parse_float_with_comma(&json!(true)), 0.0);
        assert_eq!(parse_float_with_comma(&json!({"v": 1})), 0.0);
    }

    #[test]
    fn only_the_first_comma_is_replaced() {
        // "1,234,5" -> "1.234,5" -> prefixo "1.234"
        assert_eq!(parse_float_with_comma(&json!("1,234,5")), 1.234);
    }

    #[test]
    fn unparseable_string_is_nan() {
        assert!(parse_float_with_comma(&json!("abc")).is_nan());
        assert!(parse_float_with_comma(&json!("")).is_nan());
    }

    #[test]
    fn parse_float_reads_the_longest_prefix() {
        assert_eq!(parse_float("  3.5kg"), 3.5);
        assert_eq!(parse_float("-2e3x"), -2000.0);
        assert_eq!(parse_float("1e"), 1.0);
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("5."), 5.0);
        assert_eq!(parse_float("Infinity and beyond"), f64::INFINITY);
        assert!(parse_float(".").is_nan());
        assert!(parse_float("x1").is_nan());
    }

    #[test]
    fn to_number_follows_strict_rules() {
        assert_eq!(to_number(&Value::Null), 0.0);
        assert_eq!(to_number(&json!("")), 0.0);
        assert_eq!(to_number(&json!("  42.10 ")), 42.1);
        assert_eq!(to_number(&json!(true)), 1.0);
        assert!(to_number(&json!("12,50")).is_nan());
        assert!(to_number(&json!("3.5kg")).is_nan());
        assert!(to_number(&json!("nan")).is_nan());
        assert!(to_number(&json!("inf")).is_nan());
        assert_eq!(to_number(&json!("-Infinity")), f64::NEG_INFINITY);
    }

    #[test]
    fn parse_int_truncates() {
        assert_eq!(parse_int(&json!("120.75")), 120);
        assert_eq!(parse_int(&json!(" -8")), -8);
        assert_eq!(parse_int(&json!(33.9)), 33);
        assert_eq!(parse_int(&json!("abc")), 0);
        assert_eq!(parse_int(&Value::Null), 0);
    }

    #[test]
    fn display_string_of_totals() {
        assert_eq!(to_display_string(&json!(100)), Some("100".to_string()));
        assert_eq!(to_display_string(&json!(12.5)), Some("12.5".to_string()));
        assert_eq!(to_display_string(&json!("99.90")), Some("99.90".to_string()));
        assert_eq!(to_display_string(&Value::Null), None);
    }

    #[test]
    fn timestamps_in_the_backend_formats() {
        let dt = parse_timestamp("2024-03-10T14:30:00.123456Z").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day(), dt.hour()), (2024, 3, 10, 14));

        let shifted = parse_timestamp("2024-03-10T01:00:00+02:00").unwrap();
        assert_eq!((shifted.day(), shifted.hour()), (9, 23));

        let naive = parse_timestamp("2024-03-10 08:15:00").unwrap();
        assert_eq!(naive.hour(), 8);

        let date_only = parse_timestamp("2024-03-10").unwrap();
        assert_eq!((date_only.day(), date_only.hour()), (10, 0));

        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("ontem").is_none());
    }

    #[derive(Debug, serde::Deserialize)]
    struct Loose {
        #[serde(default, deserialize_with = "deserialize_loose_date")]
        date: Option<String>,
        #[serde(default, deserialize_with = "deserialize_loose_id")]
        id: Option<i64>,
    }

    #[test]
    fn loose_date_reads_epoch_millis_and_drops_garbage() {
        let parsed: Loose = serde_json::from_value(json!({"date": 1718445600000_i64})).unwrap();
        let ts = parse_timestamp(parsed.date.as_deref().unwrap()).unwrap();
        assert_eq!(ts.timestamp_millis(), 1718445600000);

        for bad in [json!(true), json!({"x": 1}), json!([1]), json!(null)] {
            let parsed: Loose = serde_json::from_value(json!({ "date": bad })).unwrap();
            assert_eq!(parsed.date, None);
        }

        let parsed: Loose = serde_json::from_value(json!({"date": "2024-06-15"})).unwrap();
        assert_eq!(parsed.date.as_deref(), Some("2024-06-15"));
    }

    #[test]
    fn loose_id_accepts_numeric_text() {
        let cases = [
            (json!(7), Some(7)),
            (json!(7.0), Some(7)),
            (json!(" 12 "), Some(12)),
            (json!(7.5), None),
            (json!("abc"), None),
            (json!(null), None),
        ];
        for (raw, expected) in cases {
            let parsed: Loose = serde_json::from_value(json!({ "id": raw })).unwrap();
            assert_eq!(parsed.id, expected, "entrada {:?}", raw);
        }

        let parsed: Loose = serde_json::from_value(json!({})).unwrap();
        assert_eq!(parsed.id, None);
    }
}
