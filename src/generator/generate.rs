//! ID generation logic
//!
//! Every fallible step runs before a counter is advanced: custom values are
//! encoded and checked first, then the fields that ignore the context, and the
//! sequence field (at most one per layout) goes last. A failed generation
//! leaves the counter store untouched.

use tracing::{debug, trace, warn};

use super::IdGenerator;
use crate::error::{IdGenError, Result};
use crate::value::{CustomData, FieldValue, Info};

impl IdGenerator {
    /// Generate a new identifier
    #[inline]
    pub fn generate(&self) -> Result<u64> {
        self.generate_with(&CustomData::new())
    }

    /// Generate a new identifier, pinning the fields named in `custom`
    pub fn generate_with(&self, custom: &CustomData) -> Result<u64> {
        self.generate_info_with(custom).map(|(id, _)| id)
    }

    /// Generate a new identifier rendered as its decimal string
    pub fn generate_string(&self) -> Result<String> {
        self.generate().map(|id| id.to_string())
    }

    pub fn generate_string_with(&self, custom: &CustomData) -> Result<String> {
        self.generate_with(custom).map(|id| id.to_string())
    }

    /// Generate a new identifier along with the raw values that built it
    pub fn generate_info(&self) -> Result<(u64, Info)> {
        self.generate_info_with(&CustomData::new())
    }

    pub fn generate_info_with(&self, custom: &CustomData) -> Result<(u64, Info)> {
        let mut slots = self.encode_custom(custom)?;

        for (index, field) in self.fields.iter().enumerate() {
            if slots[index].is_none() && !field.is_sequence() {
                slots[index] = Some(self.generate_field(index, &Info::new())?);
            }
        }
        while let Some(index) = slots.iter().position(Option::is_none) {
            let context = self.context(&slots[..index]);
            slots[index] = Some(self.generate_field(index, &context)?);
        }

        let mut info = Info::with_capacity(self.fields.len());
        let mut parts = Vec::with_capacity(self.fields.len());
        for (field, (value, number)) in self.fields.iter().zip(slots.into_iter().flatten()) {
            trace!(field = field.name(), %value, number, "field encoded");
            info.insert(field.name(), value);
            parts.push(number);
        }

        let id = self.layout.assemble(&parts)?;
        debug!(generator = %self.name, id, "generated id");
        Ok((id, info))
    }

    fn generate_field(&self, index: usize, context: &Info) -> Result<(FieldValue, u64)> {
        let field = &self.fields[index];
        let value = field.generate(context)?;
        let number = field.encode(&value)?;
        self.layout.check(index, number)?;
        Ok((value, number))
    }

    /// Generation context: the values already produced for the leading fields
    fn context(&self, done: &[Option<(FieldValue, u64)>]) -> Info {
        self.fields
            .iter()
            .zip(done)
            .filter_map(|(field, slot)| {
                slot.as_ref()
                    .map(|(value, _)| (field.name(), value.clone()))
            })
            .collect()
    }

    /// Encode every custom value up front, one slot per field
    fn encode_custom(&self, custom: &CustomData) -> Result<Vec<Option<(FieldValue, u64)>>> {
        for name in custom.keys() {
            if self.field(name).is_none() {
                warn!(generator = %self.name, field = %name, "ignoring custom value for unknown field");
            }
        }

        self.fields
            .iter()
            .enumerate()
            .map(|(index, field)| {
                custom
                    .get(field.name())
                    .map(|value| {
                        let number = field.encode(value)?;
                        self.layout.check(index, number)?;
                        Ok::<_, IdGenError>((value.clone(), number))
                    })
                    .transpose()
            })
            .collect()
    }
}
