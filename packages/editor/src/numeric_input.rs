//! Numeric field binding for the property panel.
//!
//! A style value bound to a numeric field comes in one of three shapes:
//!
//! - a bare number (`16`), shown as-is and written back with the field's unit
//! - a unit-suffixed string (`"16px"`), shown without the suffix and written
//!   back with the same suffix
//! - a compound CSS value (`"14px 28px"`, `"auto"`), edited as free text and
//!   never stepped or given a unit

use serde_json::Value;

/// A bound value, classified.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericValue {
    Empty,
    Number { value: f64, unit: String },
    Free(String),
}

impl NumericValue {
    /// Classify a stored prop. `unit` is used for bare numbers.
    pub fn from_value(value: Option<&Value>, unit: &str) -> Self {
        match value {
            None | Some(Value::Null) => NumericValue::Empty,
            Some(Value::Number(n)) => match n.as_f64() {
                Some(value) => NumericValue::Number {
                    value,
                    unit: unit.to_string(),
                },
                None => NumericValue::Free(n.to_string()),
            },
            Some(Value::String(s)) => Self::parse(s, unit),
            Some(other) => NumericValue::Free(other.to_string()),
        }
    }

    /// Classify text typed into the field.
    pub fn parse(input: &str, unit: &str) -> Self {
        let input = input.trim();
        if input.is_empty() {
            return NumericValue::Empty;
        }
        match split_number(input) {
            Some((value, "")) => NumericValue::Number {
                value,
                unit: unit.to_string(),
            },
            Some((value, suffix)) if is_unit(suffix) => NumericValue::Number {
                value,
                unit: suffix.to_string(),
            },
            _ => NumericValue::Free(input.to_string()),
        }
    }

    /// Text shown in the field.
    pub fn display(&self) -> String {
        match self {
            NumericValue::Empty => String::new(),
            NumericValue::Number { value, .. } => format_number(*value),
            NumericValue::Free(text) => text.clone(),
        }
    }

    /// Value written back to props. Empty removes the prop.
    pub fn to_value(&self) -> Value {
        match self {
            NumericValue::Empty => Value::Null,
            NumericValue::Number { value, unit } => {
                Value::String(format!("{}{}", format_number(*value), unit))
            }
            NumericValue::Free(text) => Value::String(text.clone()),
        }
    }

    /// Increment or decrement. Free text and empty fields do not step.
    pub fn step(&self, delta: f64) -> Option<Self> {
        match self {
            NumericValue::Number { value, unit } => Some(NumericValue::Number {
                value: value + delta,
                unit: unit.clone(),
            }),
            _ => None,
        }
    }

    pub fn is_steppable(&self) -> bool {
        matches!(self, NumericValue::Number { .. })
    }
}

/// Convert typed text to the prop value to store, e.g. `"16"` with unit
/// `px` becomes `"16px"`.
pub fn commit(input: &str, unit: &str) -> Value {
    NumericValue::parse(input, unit).to_value()
}

fn split_number(input: &str) -> Option<(f64, &str)> {
    let end = input
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(input.len());
    let value = input[..end].parse::<f64>().ok()?;
    value.is_finite().then_some((value, &input[end..]))
}

fn is_unit(suffix: &str) -> bool {
    suffix == "%" || (!suffix.is_empty() && suffix.chars().all(|c| c.is_ascii_alphabetic()))
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_number_gets_unit() {
        let value = NumericValue::from_value(Some(&json!(16)), "px");
        assert_eq!(value.display(), "16");
        assert_eq!(value.to_value(), json!("16px"));
        assert_eq!(commit("16", "px"), json!("16px"));
    }

    #[test]
    fn test_suffix_stripped_for_display_and_kept() {
        let value = NumericValue::from_value(Some(&json!("1.5em")), "px");
        assert_eq!(value.display(), "1.5");
        assert_eq!(value.step(0.5).unwrap().to_value(), json!("2em"));
        assert_eq!(commit("50%", "px"), json!("50%"));
    }

    #[test]
    fn test_compound_values_are_free_text() {
        let value = NumericValue::from_value(Some(&json!("14px 28px")), "px");
        assert_eq!(value, NumericValue::Free("14px 28px".into()));
        assert_eq!(value.display(), "14px 28px");
        assert!(value.step(1.0).is_none());
        assert!(!value.is_steppable());
        assert_eq!(commit("auto", "px"), json!("auto"));
    }

    #[test]
    fn test_empty_clears() {
        assert_eq!(NumericValue::from_value(None, "px"), NumericValue::Empty);
        assert_eq!(commit("  ", "px"), Value::Null);
    }

    #[test]
    fn test_negative_and_unitless() {
        assert_eq!(commit("-4", "px"), json!("-4px"));
        assert_eq!(commit("700", ""), json!("700"));
    }
}
