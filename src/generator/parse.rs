use tracing::debug;

use super::IdGenerator;
use crate::error::{IdGenError, Result};
use crate::value::Info;

impl IdGenerator {
    /// Parse an identifier in decimal string form
    pub fn parse(&self, id: &str) -> Result<Info> {
        let number = id
            .trim()
            .parse::<u64>()
            .map_err(|source| IdGenError::Parse {
                input: id.to_owned(),
                source,
            })?;
        self.parse_id(number)
    }

    /// Decompose an identifier into its fields' human-readable values
    pub fn parse_id(&self, id: u64) -> Result<Info> {
        let parts = self.layout.disassemble(id)?;
        let info = self
            .fields
            .iter()
            .zip(parts)
            .map(|(field, number)| field.decode(number).map(|value| (field.name(), value)))
            .collect::<Result<Info>>()?;
        debug!(generator = %self.name, id, "parsed id");
        Ok(info)
    }
}
