use std::{cmp::Ordering, fmt::Display};

use serde::{Deserialize, Serialize};

mod date;
mod decimal;

pub use date::Date;
pub use decimal::Decimal;

/// Supported SQL data types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    Boolean,
    Text,
    Decimal,
    Date,
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Type::Boolean => "boolean",
            Type::Text => "text",
            Type::Decimal => "decimal",
            Type::Date => "date",
        })
    }
}

/// Result of comparing two values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compared {
    Lt,
    Eq,
    Gt,
    /// Either side was null
    Null,
    /// The values have different types
    Invalid,
}

impl From<Ordering> for Compared {
    fn from(value: Ordering) -> Self {
        match value {
            Ordering::Less => Compared::Lt,
            Ordering::Equal => Compared::Eq,
            Ordering::Greater => Compared::Gt,
        }
    }
}

impl Display for Compared {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Compared::Lt => "lt",
            Compared::Eq => "eq",
            Compared::Gt => "gt",
            Compared::Null => "null",
            Compared::Invalid => "invalid",
        })
    }
}

/// A non-null value of one of the basic types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    Boolean(bool),
    Text(String),
    Decimal(Decimal),
    Date(Date),
}

impl Scalar {
    pub fn datatype(&self) -> Type {
        match self {
            Scalar::Boolean(_) => Type::Boolean,
            Scalar::Text(_) => Type::Text,
            Scalar::Decimal(_) => Type::Decimal,
            Scalar::Date(_) => Type::Date,
        }
    }

    pub fn compare(&self, other: &Scalar) -> Compared {
        match (self, other) {
            (Scalar::Boolean(a), Scalar::Boolean(b)) => a.cmp(b).into(),
            (Scalar::Text(a), Scalar::Text(b)) => a.cmp(b).into(),
            (Scalar::Decimal(a), Scalar::Decimal(b)) => a.cmp(b).into(),
            (Scalar::Date(a), Scalar::Date(b)) => a.cmp(b).into(),
            (_, _) => Compared::Invalid,
        }
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Boolean(b) => write!(f, "{}", b),
            Scalar::Text(s) => f.write_str(s),
            Scalar::Decimal(d) => write!(f, "{}", d),
            Scalar::Date(d) => write!(f, "{}", d),
        }
    }
}

/// A value in the database, which may be null.
///
/// Nulls are typed: a null value still carries the type of the column it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Value {
    datatype: Type,
    scalar: Option<Scalar>,
}

impl Value {
    pub fn null(datatype: Type) -> Self {
        Self {
            datatype,
            scalar: None,
        }
    }

    pub fn boolean(b: bool) -> Self {
        Scalar::Boolean(b).into()
    }

    pub fn text(s: impl Into<String>) -> Self {
        Scalar::Text(s.into()).into()
    }

    pub fn decimal(d: Decimal) -> Self {
        Scalar::Decimal(d).into()
    }

    pub fn date(d: Date) -> Self {
        Scalar::Date(d).into()
    }

    pub fn datatype(&self) -> Type {
        self.datatype
    }

    pub fn is_null(&self) -> bool {
        self.scalar.is_none()
    }

    /// Returns the underlying basic value, or None if the value is null
    pub fn scalar(&self) -> Option<&Scalar> {
        self.scalar.as_ref()
    }

    /// True only for a non-null boolean true
    pub fn is_true(&self) -> bool {
        matches!(self.scalar, Some(Scalar::Boolean(true)))
    }

    pub fn compare(&self, other: &Value) -> Compared {
        if self.datatype != other.datatype {
            return Compared::Invalid;
        }
        match (&self.scalar, &other.scalar) {
            (Some(a), Some(b)) => a.compare(b),
            _ => Compared::Null,
        }
    }
}

impl From<Scalar> for Value {
    fn from(value: Scalar) -> Self {
        Self {
            datatype: value.datatype(),
            scalar: Some(value),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.scalar {
            Some(s) => write!(f, "{}", s),
            None => f.write_str("null"),
        }
    }
}

/// A row is a vector of values
pub type Row = Vec<Value>;

#[cfg(test)]
mod tests {
    use super::{Compared, Date, Decimal, Type, Value};
    use crate::error::Result;

    fn dec(s: &str) -> Result<Value> {
        Ok(Value::decimal(s.parse::<Decimal>()?))
    }

    #[test]
    fn test_compare_same_type() -> Result<()> {
        let cases = vec![
            (Value::boolean(false), Value::boolean(false), Compared::Eq),
            (Value::boolean(false), Value::boolean(true), Compared::Lt),
            (Value::boolean(true), Value::boolean(false), Compared::Gt),
            (Value::text(""), Value::text(""), Compared::Eq),
            (Value::text("a"), Value::text("b"), Compared::Lt),
            (Value::text("a"), Value::text("aa"), Compared::Lt),
            (Value::text("aa"), Value::text("a"), Compared::Gt),
            (dec("4")?, dec("5")?, Compared::Lt),
            (dec("5.0")?, dec("5")?, Compared::Eq),
            (
                Value::date(Date::new(2000, 1, 1)?),
                Value::date(Date::new(1999, 12, 31)?),
                Compared::Gt,
            ),
        ];
        for (a, b, want) in cases {
            assert_eq!(a.compare(&b), want, "comparing {} and {}", a, b);
        }
        Ok(())
    }

    #[test]
    fn test_compare_null() -> Result<()> {
        assert_eq!(Value::null(Type::Decimal).compare(&dec("5")?), Compared::Null);
        assert_eq!(dec("5")?.compare(&Value::null(Type::Decimal)), Compared::Null);
        assert_eq!(
            Value::null(Type::Decimal).compare(&Value::null(Type::Decimal)),
            Compared::Null
        );
        assert_eq!(dec("4")?.compare(&Value::null(Type::Text)), Compared::Invalid);
        assert_eq!(Value::null(Type::Decimal).compare(&Value::text("hello")), Compared::Invalid);
        assert_eq!(
            Value::null(Type::Decimal).compare(&Value::null(Type::Text)),
            Compared::Invalid
        );
        Ok(())
    }

    #[test]
    fn test_compare_different_types() -> Result<()> {
        let values = vec![
            Value::boolean(false),
            Value::text("hello"),
            dec("123")?,
            Value::date(Date::new(1999, 12, 31)?),
        ];
        for (i, a) in values.iter().enumerate() {
            for (j, b) in values.iter().enumerate() {
                let got = a.compare(b);
                assert_eq!(got == Compared::Invalid, i != j, "comparing {} and {}", a, b);
            }
        }
        Ok(())
    }

    #[test]
    fn test_value_accessors() -> Result<()> {
        let null = Value::null(Type::Date);
        assert!(null.is_null());
        assert_eq!(null.datatype(), Type::Date);
        assert_eq!(null.scalar(), None);
        assert_eq!(null.to_string(), "null");

        assert!(Value::boolean(true).is_true());
        assert!(!Value::boolean(false).is_true());
        assert!(!Value::null(Type::Boolean).is_true());
        assert!(!Value::text("true").is_true());

        assert_eq!(dec("-1.50")?.to_string(), "-1.5");
        assert_eq!(Value::date(Date::new(1926, 12, 31)?).to_string(), "1926-12-31");
        assert_ne!(Value::null(Type::Text), Value::text(""));
        Ok(())
    }
}
