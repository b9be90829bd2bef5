//! Fail-closed numeric and text coercion.
//!
//! Every boundary of the pipeline (raw rows coming in, output records going
//! out, scraped HTML cells) goes through these helpers. None of them return
//! an error: anything missing, null, unparseable or non-finite becomes the
//! zero value of the target type.

use serde_json::Value;

/// Convert an already numeric value to a finite float (NaN/inf become 0.0)
pub fn safe_float(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Convert an already numeric value to an integer, rounding to nearest
pub fn safe_int(value: f64) -> i64 {
    safe_float(value).round() as i64
}

/// Parse a text cell as a float
pub fn text_to_f64(text: &str) -> f64 {
    let cleaned = text.trim().replace(',', "");
    if cleaned.is_empty() {
        return 0.0;
    }

    cleaned.parse::<f64>().map(safe_float).unwrap_or(0.0)
}

/// Parse a text cell as an integer (rounded to nearest)
pub fn text_to_i64(text: &str) -> i64 {
    safe_int(text_to_f64(text))
}

/// Coerce a raw field value to a float
pub fn value_to_f64(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().map(safe_float).unwrap_or(0.0),
        Some(Value::String(s)) => text_to_f64(s),
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        _ => 0.0,
    }
}

/// Coerce a raw field value to an integer (rounded to nearest)
pub fn value_to_i64(value: Option<&Value>) -> i64 {
    safe_int(value_to_f64(value))
}

/// Coerce a raw field value to a week index. Truncates, negatives clamp to 0.
pub fn value_to_week(value: Option<&Value>) -> u32 {
    let week = value_to_f64(value).trunc();
    if week <= 0.0 {
        0
    } else if week >= u32::MAX as f64 {
        u32::MAX
    } else {
        week as u32
    }
}

/// Coerce a raw field value to text.
///
/// Integral floats render without a fraction, so `2560955.0` and `2560955`
/// yield the same key.
pub fn value_to_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (safe_float(value) * 100.0).round() / 100.0
}

/// `round(total / games, 2)`, or exactly 0.0 when there are no games
pub fn per_game(total: f64, games: u32) -> f64 {
    if games == 0 {
        return 0.0;
    }
    round2(total / games as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_and_null_default_to_zero() {
        assert_eq!(value_to_f64(None), 0.0);
        assert_eq!(value_to_f64(Some(&Value::Null)), 0.0);
        assert_eq!(value_to_i64(None), 0);
        assert_eq!(value_to_string(None), "");
        assert_eq!(value_to_string(Some(&Value::Null)), "");
    }

    #[test]
    fn test_text_parsing() {
        assert_eq!(value_to_f64(Some(&json!("312"))), 312.0);
        assert_eq!(value_to_f64(Some(&json!(" 1,204 "))), 1204.0);
        assert_eq!(value_to_f64(Some(&json!(".647"))), 0.647);
        assert_eq!(value_to_f64(Some(&json!("n/a"))), 0.0);
        assert_eq!(value_to_f64(Some(&json!("NaN"))), 0.0);
        assert_eq!(value_to_f64(Some(&json!("inf"))), 0.0);
        assert_eq!(value_to_i64(Some(&json!("2.6"))), 3);
    }

    #[test]
    fn test_week_truncates() {
        assert_eq!(value_to_week(Some(&json!(7.9))), 7);
        assert_eq!(value_to_week(Some(&json!("12"))), 12);
        assert_eq!(value_to_week(Some(&json!(-2))), 0);
        assert_eq!(value_to_week(Some(&json!("bye"))), 0);
    }

    #[test]
    fn test_numeric_ids_render_as_text() {
        assert_eq!(value_to_string(Some(&json!(2560955))), "2560955");
        assert_eq!(value_to_string(Some(&json!(2560955.0))), "2560955");
        assert_eq!(value_to_string(Some(&json!(-3.0))), "-3");
        assert_eq!(value_to_string(Some(&json!(12.5))), "12.5");
        assert_eq!(value_to_string(Some(&json!("  00-0033873 "))), "00-0033873");
    }

    #[test]
    fn test_safe_conversions() {
        assert_eq!(safe_float(f64::NAN), 0.0);
        assert_eq!(safe_float(f64::NEG_INFINITY), 0.0);
        assert_eq!(safe_int(f64::NAN), 0);
        assert_eq!(safe_int(249.5), 250);
        assert_eq!(text_to_i64(""), 0);
    }

    #[test]
    fn test_per_game_both_branches() {
        assert_eq!(per_game(750.0, 3), 250.0);
        assert_eq!(per_game(100.0, 3), 33.33);
        assert_eq!(per_game(100.0, 0), 0.0);
        assert_eq!(per_game(0.0, 0), 0.0);
    }
}
