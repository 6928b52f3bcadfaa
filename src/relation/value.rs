use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A single attribute value
///
/// Values carry no NULL representation. Numbers are stored as `f64`; equality
/// and hashing treat `0.0` and `-0.0` as the same number so that content
/// comparisons between tuples stay consistent with their hashes.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    /// Build a value from user-entered text.
    ///
    /// Text that parses as a finite number becomes a number, anything else
    /// (including the empty string) stays text.
    pub fn parse_input(input: &str) -> Self {
        match parse_number(input) {
            Some(n) => Value::Number(n),
            None => Value::Text(input.to_string()),
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Value::Text(value.into())
    }

    /// Numeric reading of the value, if it has one.
    ///
    /// Text that looks like a number counts as numeric, which is what lets a
    /// condition such as `Age > 21` work on values loaded as text.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(s) => parse_number(s),
        }
    }

    /// Compare two values the way conditions do: numerically when both sides
    /// are numeric, otherwise by their display text.
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            _ => self.to_string().cmp(&other.to_string()),
        }
    }

    fn canonical_bits(n: f64) -> u64 {
        if n == 0.0 {
            0.0f64.to_bits()
        } else if n.is_nan() {
            f64::NAN.to_bits()
        } else {
            n.to_bits()
        }
    }
}

fn parse_number(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => {
                Value::canonical_bits(*a) == Value::canonical_bits(*b)
            }
            (Value::Text(a), Value::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Number(n) => {
                0u8.hash(state);
                Value::canonical_bits(*n).hash(state);
            }
            Value::Text(s) => {
                1u8.hash(state);
                s.hash(state);
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // integral numbers go out as integers so `22` does not become `22.0`
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => {
                serializer.serialize_i64(*n as i64)
            }
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_parse_input() {
        assert_eq!(Value::parse_input("22"), Value::Number(22.0));
        assert_eq!(Value::parse_input("3.5"), Value::Number(3.5));
        assert_eq!(Value::parse_input("Fès"), Value::text("Fès"));
        assert_eq!(Value::parse_input(""), Value::text(""));
        assert_eq!(Value::parse_input("inf"), Value::text("inf"));
        assert_eq!(Value::parse_input("NaN"), Value::text("NaN"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from(22).to_string(), "22");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
        assert_eq!(Value::from("E001").to_string(), "E001");
    }

    #[test]
    fn test_number_and_text_are_distinct() {
        assert_ne!(Value::from(1), Value::from("1"));
        assert_eq!(Value::from(0.0), Value::from(-0.0));
    }

    #[test]
    fn test_hash_matches_equality() {
        let mut set = HashSet::new();
        set.insert(Value::from(0.0));
        set.insert(Value::from(-0.0));
        set.insert(Value::from("0"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_compare() {
        assert_eq!(Value::from(9).compare(&Value::from(10)), Ordering::Less);
        // numeric text compares numerically
        assert_eq!(Value::from("9").compare(&Value::from(10)), Ordering::Less);
        // mixed falls back to text
        assert_eq!(
            Value::from("abc").compare(&Value::from(10)),
            Ordering::Greater
        );
        assert_eq!(
            Value::from("Casablanca").compare(&Value::from("Fès")),
            Ordering::Less
        );
    }

    #[test]
    fn test_serde_untagged() -> anyhow::Result<()> {
        let values: Vec<Value> = serde_json::from_str(r#"[22, "Fès", 2.5]"#)?;
        assert_eq!(
            values,
            vec![Value::from(22), Value::from("Fès"), Value::from(2.5)]
        );
        assert_eq!(serde_json::to_string(&values)?, r#"[22,"Fès",2.5]"#);
        Ok(())
    }
}
