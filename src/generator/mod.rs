//! Identifier generator
//!
//! Split into modules:
//! - `generate` - Field generation, encoding and assembly
//! - `parse` - Disassembly and decoding

mod generate;
mod parse;

use crate::config::IdGeneratorBuilder;
use crate::field::Field;
use crate::layout::BitLayout;

/// Generates and parses identifiers built from an ordered list of fields.
///
/// The generator holds no state between calls; sequence counters live in
/// the fields' counter stores.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    name: String,
    fields: Vec<Field>,
    layout: BitLayout,
}

impl IdGenerator {
    /// Start building a generator called `name`
    pub fn builder(name: impl Into<String>) -> IdGeneratorBuilder {
        IdGeneratorBuilder::new(name)
    }

    /// Assemble a generator from an already validated field list
    pub(crate) fn from_parts(name: String, fields: Vec<Field>, layout: BitLayout) -> Self {
        Self {
            name,
            fields,
            layout,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name() == name)
    }

    pub fn layout(&self) -> &BitLayout {
        &self.layout
    }

    #[inline(always)]
    pub const fn total_bits(&self) -> u32 {
        self.layout.total_bits()
    }
}
