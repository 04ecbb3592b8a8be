//! Generator configuration: layout validation and built-in categories

mod builder;
mod category;

use std::error::Error;
use std::fmt;

pub use builder::IdGeneratorBuilder;
pub use category::Category;

/// Errors raised while validating a generator's field list
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The generator declares no fields
    NoFields,
    /// Two fields share a name
    DuplicateField { field: String },
    /// A field width is outside [1, 64]
    InvalidBits { field: String, bits: u8 },
    /// The fields need more bits than an identifier holds
    TooManyBits { total: u32 },
    /// A field's value range is empty or exceeds its mask
    InvalidRange { field: String, min: u64, max: u64 },
    /// A sequence key does not name an earlier field
    UnknownKey { field: String, key: String },
    /// A layout holds more than one sequence field
    MultipleSequences { first: String, second: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoFields => write!(f, "Generator must declare at least one field"),
            ConfigError::DuplicateField { field } => {
                write!(f, "Field {} is declared more than once", field)
            }
            ConfigError::InvalidBits { field, bits } => {
                write!(f, "Field {} bits {} must be between 1 and 64", field, bits)
            }
            ConfigError::TooManyBits { total } => {
                write!(f, "Fields need {} bits, at most 64 are available", total)
            }
            ConfigError::InvalidRange { field, min, max } => {
                write!(f, "Field {} range {} ~ {} is invalid", field, min, max)
            }
            ConfigError::UnknownKey { field, key } => {
                write!(f, "Field {} keys on {}, which is not declared before it", field, key)
            }
            ConfigError::MultipleSequences { first, second } => {
                write!(f, "Field {} is a second sequence after {}", second, first)
            }
        }
    }
}

impl Error for ConfigError {}
