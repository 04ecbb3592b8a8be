//! Field variants of a composite identifier
//!
//! Each field owns a name and a bit width and knows how to produce a raw
//! value, encode it into an integer that fits its mask, and decode it back.
//! - `number` - Bounded random integer
//! - `datetime` - Calendar date and time at a fixed precision
//! - `time` - Time of day at a fixed precision
//! - `sequence` - Persistent counter advanced by a random step

mod datetime;
mod number;
mod sequence;
mod time;

pub use datetime::{default_base, DateTimeField, DateTimePrecision};
pub use number::NumberField;
pub use sequence::{SequenceField, Span};
pub use time::{TimeField, TimePrecision};

use crate::error::{IdGenError, Result};
use crate::layout::mask_for;
use crate::value::{FieldValue, Info};

/// Name and bit width shared by every field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    name: String,
    bits: u8,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, bits: u8) -> Self {
        Self {
            name: name.into(),
            bits,
        }
    }

    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    pub const fn bits(&self) -> u8 {
        self.bits
    }

    #[inline(always)]
    pub const fn mask(&self) -> u64 {
        mask_for(self.bits)
    }

    pub(crate) fn encode_error(&self, value: &FieldValue, reason: impl Into<String>) -> IdGenError {
        IdGenError::Encode {
            field: self.name.clone(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn range_error(&self, number: u64, reason: impl Into<String>) -> IdGenError {
        IdGenError::Range {
            field: self.name.clone(),
            number,
            reason: reason.into(),
        }
    }

    /// Integer interpretation shared by number and sequence fields
    pub(crate) fn encode_int(&self, value: &FieldValue) -> Result<u64> {
        match value {
            FieldValue::Int(n) => Ok(*n),
            FieldValue::Text(s) => s
                .trim()
                .parse::<u64>()
                .map_err(|e| self.encode_error(value, e.to_string())),
        }
    }

    pub(crate) fn expect_text<'a>(&self, value: &'a FieldValue) -> Result<&'a str> {
        value
            .as_text()
            .ok_or_else(|| self.encode_error(value, "expected a formatted string"))
    }
}

/// A field of an identifier layout.
///
/// Declaration order matters twice: it is the bit order (first field is most
/// significant) and the generation order (a field only sees the values of the
/// fields declared before it).
#[derive(Debug, Clone)]
pub enum Field {
    Number(NumberField),
    DateTime(DateTimeField),
    Time(TimeField),
    Sequence(SequenceField),
}

impl Field {
    pub fn def(&self) -> &FieldDef {
        match self {
            Field::Number(f) => f.def(),
            Field::DateTime(f) => f.def(),
            Field::Time(f) => f.def(),
            Field::Sequence(f) => f.def(),
        }
    }

    pub fn name(&self) -> &str {
        self.def().name()
    }

    pub fn bits(&self) -> u8 {
        self.def().bits()
    }

    pub fn mask(&self) -> u64 {
        self.def().mask()
    }

    /// Sequences are the only fields that read the context or touch a store
    pub fn is_sequence(&self) -> bool {
        matches!(self, Field::Sequence(_))
    }

    /// Produce a raw value; `context` holds the values of earlier fields
    pub fn generate(&self, context: &Info) -> Result<FieldValue> {
        match self {
            Field::Number(f) => Ok(f.generate()),
            Field::DateTime(f) => Ok(f.generate()),
            Field::Time(f) => Ok(f.generate()),
            Field::Sequence(f) => f.generate(context),
        }
    }

    pub fn encode(&self, value: &FieldValue) -> Result<u64> {
        match self {
            Field::Number(f) => f.encode(value),
            Field::DateTime(f) => f.encode(value),
            Field::Time(f) => f.encode(value),
            Field::Sequence(f) => f.encode(value),
        }
    }

    pub fn decode(&self, number: u64) -> Result<FieldValue> {
        match self {
            Field::Number(f) => f.decode(number),
            Field::DateTime(f) => f.decode(number),
            Field::Time(f) => f.decode(number),
            Field::Sequence(f) => Ok(f.decode(number)),
        }
    }
}

impl From<NumberField> for Field {
    fn from(field: NumberField) -> Self {
        Field::Number(field)
    }
}

impl From<DateTimeField> for Field {
    fn from(field: DateTimeField) -> Self {
        Field::DateTime(field)
    }
}

impl From<TimeField> for Field {
    fn from(field: TimeField) -> Self {
        Field::Time(field)
    }
}

impl From<SequenceField> for Field {
    fn from(field: SequenceField) -> Self {
        Field::Sequence(field)
    }
}
