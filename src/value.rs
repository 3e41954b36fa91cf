use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rust_decimal::{Decimal, RoundingStrategy};

/// Fixed-point amount with two fractional digits, as stored in `DECIMAL(10,2)`.
///
/// SQLite gives such columns NUMERIC affinity, so `5200.00` comes back as the
/// integer `5200` and averages come back as reals. Decoding through `Money`
/// restores the scale.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const SCALE: u32 = 2;

    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, Self::SCALE))
    }

    /// Round half away from zero to two places, then pin the scale.
    pub fn from_decimal(amount: Decimal) -> Self {
        let mut amount =
            amount.round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero);
        amount.rescale(Self::SCALE);
        Self(amount)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s).map(Self::from_decimal)
    }
}

impl ToSql for Money {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        // Text keeps the exact digits; NUMERIC affinity converts on insert.
        Ok(ToSqlOutput::from(self.0.to_string()))
    }
}

impl FromSql for Money {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let amount = match value {
            ValueRef::Integer(i) => Decimal::from(i),
            ValueRef::Real(f) => Decimal::from_f64_retain(f).ok_or(FromSqlError::InvalidType)?,
            ValueRef::Text(text) => std::str::from_utf8(text)
                .map_err(|e| FromSqlError::Other(Box::new(e)))?
                .trim()
                .parse::<Decimal>()
                .map_err(|e| FromSqlError::Other(Box::new(e)))?,
            ValueRef::Null | ValueRef::Blob(_) => return Err(FromSqlError::InvalidType),
        };
        Ok(Self::from_decimal(amount))
    }
}

/// One cell of a materialized result row
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
    Decimal(Money),
    Date(NaiveDate),
}

impl Value {
    /// Decode a cell, using the column's declared type to recover values
    /// SQLite stores under a generic storage class.
    pub fn from_column(value: ValueRef<'_>, decl_type: Option<&str>) -> FromSqlResult<Self> {
        if let ValueRef::Null = value {
            return Ok(Value::Null);
        }
        let decl_type = decl_type.map(str::to_ascii_uppercase);
        match decl_type.as_deref() {
            Some(t) if t.starts_with("DECIMAL") || t.starts_with("NUMERIC") => {
                Money::column_result(value).map(Value::Decimal)
            }
            Some("DATE") => NaiveDate::column_result(value).map(Value::Date),
            _ => Ok(match value {
                ValueRef::Null => Value::Null,
                ValueRef::Integer(i) => Value::Integer(i),
                ValueRef::Real(f) => Value::Real(f),
                ValueRef::Text(text) => Value::Text(String::from_utf8_lossy(text).into_owned()),
                ValueRef::Blob(blob) => Value::Blob(blob.to_vec()),
            }),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric cells as money: decimals directly, integers and reals rounded.
    pub fn as_money(&self) -> Option<Money> {
        match self {
            Value::Decimal(money) => Some(*money),
            Value::Integer(i) => Some(Money::from_decimal(Decimal::from(*i))),
            Value::Real(f) => Decimal::from_f64_retain(*f).map(Money::from_decimal),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Real(r) => write!(f, "{r:?}"),
            Value::Text(text) => write_quoted(f, text),
            Value::Blob(blob) => {
                write!(f, "x'")?;
                for byte in blob {
                    write!(f, "{byte:02x}")?;
                }
                write!(f, "'")
            }
            Value::Decimal(money) => write!(f, "{money}"),
            Value::Date(date) => write!(f, "'{}'", date.format("%Y-%m-%d")),
        }
    }
}

/// Quote text the way a Python tuple repr does: single quotes unless the
/// text holds a single quote and no double quote.
fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    if text.contains('\'') && !text.contains('"') {
        return write!(f, "\"{}\"", text.replace('\\', "\\\\"));
    }
    write!(f, "'{}'", text.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// All rows of one labelled statement, in the engine's order
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    pub label: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Re-read the named numeric columns as `Money`.
    pub fn with_money_columns(mut self, names: &[&str]) -> Self {
        let indexes: Vec<usize> = names
            .iter()
            .filter_map(|name| self.column_index(name))
            .collect();
        for row in &mut self.rows {
            for &index in &indexes {
                if let Some(money) = row.get(index).and_then(Value::as_money) {
                    row[index] = Value::Decimal(money);
                }
            }
        }
        self
    }
}

impl fmt::Display for ResultSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.label)?;
        write!(f, "[")?;
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "(")?;
            for (j, value) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{value}")?;
            }
            // single-element tuples keep their trailing comma
            if row.len() == 1 {
                write!(f, ",")?;
            }
            write!(f, ")")?;
        }
        write!(f, "]")
    }
}
