use chrono::NaiveDateTime;

/// Render/parse format for timestamp cells in CSV files.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A typed cell value inside a [`crate::Table`].
///
/// CSV files carry nulls as empty fields; everything else round-trips
/// through [`Value::to_csv`] and [`Value::infer`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
    Timestamp(NaiveDateTime),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(value) => Some(*value as f64),
            Value::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Coarse type name of the cell, for column dtype sampling.
    pub fn dtype(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Timestamp(_) => "timestamp",
        }
    }

    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Timestamp(value) => Some(*value),
            _ => None,
        }
    }

    /// Render the value as a CSV field.
    pub fn to_csv(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Int(value) => value.to_string(),
            Value::Float(value) => value.to_string(),
            Value::Text(value) => value.clone(),
            Value::Timestamp(value) => value.format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// Infer a typed value from a raw CSV field.
    ///
    /// Empty fields are nulls. Integer, float, and timestamp parses are
    /// tried in that order; anything else stays text.
    pub fn infer(raw: &str) -> Value {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Value::Null;
        }
        if let Ok(value) = trimmed.parse::<i64>() {
            return Value::Int(value);
        }
        if let Ok(value) = trimmed.parse::<f64>() {
            return Value::Float(value);
        }
        if let Ok(value) = NaiveDateTime::parse_from_str(trimmed, TIMESTAMP_FORMAT) {
            return Value::Timestamp(value);
        }
        Value::Text(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn infers_null_from_empty_field() {
        assert_eq!(Value::infer(""), Value::Null);
        assert_eq!(Value::infer("   "), Value::Null);
    }

    #[test]
    fn infers_numeric_and_timestamp_fields() {
        assert_eq!(Value::infer("42"), Value::Int(42));
        assert_eq!(Value::infer("43.75"), Value::Float(43.75));

        let expected = NaiveDate::from_ymd_opt(2023, 5, 1)
            .and_then(|date| date.and_hms_opt(12, 30, 0))
            .expect("valid timestamp");
        assert_eq!(
            Value::infer("2023-05-01 12:30:00"),
            Value::Timestamp(expected)
        );
    }

    #[test]
    fn csv_rendering_round_trips() {
        for value in [
            Value::Int(7),
            Value::Float(99.5),
            Value::Text("CUST_000001".to_string()),
            Value::Null,
        ] {
            assert_eq!(Value::infer(&value.to_csv()), value);
        }
    }
}
