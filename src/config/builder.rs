//! IdGeneratorBuilder for assembling and validating a field list

use std::collections::HashSet;

use super::ConfigError;
use crate::field::Field;
use crate::generator::IdGenerator;
use crate::layout::BitLayout;

/// Builder for IdGenerator
#[derive(Debug)]
pub struct IdGeneratorBuilder {
    name: String,
    fields: Vec<Field>,
}

impl IdGeneratorBuilder {
    /// Create a new builder for a generator called `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field. The first field ends up in the most significant bits
    pub fn field(mut self, field: impl Into<Field>) -> Self {
        self.fields.push(field.into());
        self
    }

    /// Validate the field list and build the generator
    pub fn build(self) -> Result<IdGenerator, ConfigError> {
        if self.fields.is_empty() {
            return Err(ConfigError::NoFields);
        }

        let mut seen = HashSet::with_capacity(self.fields.len());
        let mut sequence: Option<&str> = None;
        for field in &self.fields {
            Self::validate_field(field, &seen)?;
            if !seen.insert(field.name()) {
                return Err(ConfigError::DuplicateField {
                    field: field.name().to_owned(),
                });
            }

            // at most one counter per layout
            if field.is_sequence() {
                if let Some(first) = sequence {
                    return Err(ConfigError::MultipleSequences {
                        first: first.to_owned(),
                        second: field.name().to_owned(),
                    });
                }
                sequence = Some(field.name());
            }
        }

        let layout = BitLayout::new(self.fields.iter().map(|f| (f.name(), f.bits())))?;
        Ok(IdGenerator::from_parts(self.name, self.fields, layout))
    }

    /// `earlier` holds the names declared before `field`
    fn validate_field(field: &Field, earlier: &HashSet<&str>) -> Result<(), ConfigError> {
        let invalid_range = |min, max| ConfigError::InvalidRange {
            field: field.name().to_owned(),
            min,
            max,
        };

        match field {
            Field::Number(number) => {
                let (start, end) = number.range();
                if start > end || end > field.mask() {
                    return Err(invalid_range(start, end));
                }
            }
            Field::Sequence(sequence) => {
                for span in [sequence.start_span(), sequence.step_span()] {
                    if !span.is_valid() {
                        return Err(invalid_range(span.min, span.max));
                    }
                }
                let start = sequence.start_span();
                if start.max > field.mask() {
                    return Err(invalid_range(start.min, start.max));
                }
                if let Some(key) = sequence
                    .key_fields()
                    .iter()
                    .find(|key| !earlier.contains(key.as_str()))
                {
                    return Err(ConfigError::UnknownKey {
                        field: field.name().to_owned(),
                        key: key.clone(),
                    });
                }
            }
            Field::DateTime(_) | Field::Time(_) => {}
        }
        Ok(())
    }
}
