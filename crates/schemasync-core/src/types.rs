//! Canonical, dialect-neutral column types and default values.

use serde::{Deserialize, Serialize};

/// Semantic column types understood by every dialect adapter.
///
/// Type parameters (length, precision, scale) are carried in the variants, so
/// they are present exactly when the type requires them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
    /// Small integer (16-bit).
    SmallInt,
    /// Integer (32-bit).
    Integer,
    /// Big integer (64-bit).
    BigInt,
    /// Variable-length character string with a maximum length.
    String(u32),
    /// Unbounded character data.
    Text,
    /// Fixed-point numeric with precision and scale.
    Decimal {
        /// Total number of significant digits.
        precision: u8,
        /// Digits to the right of the decimal point.
        scale: u8,
    },
    /// Single-precision floating point.
    Float,
    /// Double-precision floating point.
    Double,
    /// Boolean.
    Boolean,
    /// Date only.
    Date,
    /// Time only.
    Time,
    /// Date and time.
    DateTime,
    /// Binary large object.
    Blob,
    /// JSON document.
    Json,
    /// UUID.
    Uuid,
}

impl SemanticType {
    /// Returns the canonical name used in error messages.
    #[must_use]
    pub fn canonical_name(&self) -> &'static str {
        match self {
            Self::SmallInt => "smallint",
            Self::Integer => "integer",
            Self::BigInt => "bigint",
            Self::String(_) => "string",
            Self::Text => "text",
            Self::Decimal { .. } => "decimal",
            Self::Float => "float",
            Self::Double => "double",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "datetime",
            Self::Blob => "blob",
            Self::Json => "json",
            Self::Uuid => "uuid",
        }
    }

    /// Returns whether this is an integer family type.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::SmallInt | Self::Integer | Self::BigInt)
    }
}

/// Default value for a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultValue {
    /// Boolean default.
    Bool(bool),
    /// Integer default.
    Integer(i64),
    /// Float default.
    Float(f64),
    /// String default.
    String(String),
    /// Raw SQL expression (e.g. "CURRENT_TIMESTAMP").
    Expression(String),
}

impl DefaultValue {
    /// Renders this default as a SQL literal, quoting strings.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::Bool(b) => if *b { "1" } else { "0" }.to_string(),
            Self::Integer(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::String(s) => format!("'{}'", s.replace('\'', "''")),
            Self::Expression(expr) => expr.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_value_renders_literals() {
        assert_eq!(DefaultValue::Bool(true).to_sql(), "1");
        assert_eq!(DefaultValue::Integer(-3).to_sql(), "-3");
        assert_eq!(DefaultValue::String("it's".into()).to_sql(), "'it''s'");
        assert_eq!(
            DefaultValue::Expression("CURRENT_TIMESTAMP".into()).to_sql(),
            "CURRENT_TIMESTAMP"
        );
    }

    #[test]
    fn canonical_names_are_stable() {
        assert_eq!(SemanticType::Boolean.canonical_name(), "boolean");
        assert_eq!(
            SemanticType::Decimal {
                precision: 5,
                scale: 2
            }
            .canonical_name(),
            "decimal"
        );
    }
}
