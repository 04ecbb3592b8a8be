//! # idgen
//!
//! Compact numeric identifiers assembled from an ordered list of typed fields.
//!
//! Each field has a name and a bit width. Generation produces a raw value per
//! field (random number, formatted date-time, per-key counter), encodes it to
//! an integer that fits the field's mask and concatenates the integers, first
//! field in the most significant bits. Parsing reverses every step.
//!
//! ```no_run
//! use std::sync::Arc;
//! use idgen::{Category, MemoryStore};
//!
//! let generator = Category::Order.generator(Arc::new(MemoryStore::new())).unwrap();
//! let id = generator.generate().unwrap();
//! let info = generator.parse_id(id).unwrap();
//! println!("{id} {}", serde_json::to_string(&info).unwrap());
//! ```

#![forbid(unsafe_code)]

mod clock;
mod config;
mod error;
pub mod field;
mod generator;
mod layout;
mod random;
pub mod store;
mod value;

#[cfg(test)]
pub mod tests;

// Re-export main types
pub use clock::{Clock, SystemClock};
pub use config::{Category, ConfigError, IdGeneratorBuilder};
pub use error::{IdGenError, Result};
pub use field::{
    DateTimeField, DateTimePrecision, Field, FieldDef, NumberField, SequenceField, Span, TimeField,
    TimePrecision,
};
pub use generator::IdGenerator;
pub use layout::{mask_for, BitLayout, Slot, MAX_TOTAL_BITS};
pub use random::RandomSource;
pub use store::{CounterStore, FileStore, MemoryStore};
pub use value::{CustomData, FieldValue, Info};
