use crate::error::Result;
use crate::random::RandomSource;
use crate::value::FieldValue;

use super::FieldDef;

/// Uniform random integer within `[start, end]`
#[derive(Debug, Clone)]
pub struct NumberField {
    def: FieldDef,
    start: u64,
    end: u64,
    rng: RandomSource,
}

impl NumberField {
    /// Create a number field spanning the whole bit range
    pub fn new(name: impl Into<String>, bits: u8) -> Self {
        let def = FieldDef::new(name, bits);
        let end = def.mask();
        Self {
            def,
            start: 0,
            end,
            rng: RandomSource::default(),
        }
    }

    pub fn start(mut self, start: u64) -> Self {
        self.start = start;
        self
    }

    pub fn end(mut self, end: u64) -> Self {
        self.end = end;
        self
    }

    pub fn with_rng(mut self, rng: RandomSource) -> Self {
        self.rng = rng;
        self
    }

    pub fn def(&self) -> &FieldDef {
        &self.def
    }

    pub const fn range(&self) -> (u64, u64) {
        (self.start, self.end)
    }

    pub fn generate(&self) -> FieldValue {
        FieldValue::Int(self.rng.between(self.start, self.end))
    }

    pub fn encode(&self, value: &FieldValue) -> Result<u64> {
        self.def.encode_int(value)
    }

    pub fn decode(&self, number: u64) -> Result<FieldValue> {
        if !(self.start..=self.end).contains(&number) {
            return Err(self
                .def
                .range_error(number, format!("expected {} ~ {}", self.start, self.end)));
        }
        Ok(FieldValue::Int(number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IdGenError;

    #[test]
    fn test_end_defaults_to_mask() {
        let field = NumberField::new("n", 5);
        assert_eq!(field.range(), (0, 31));
    }

    #[test]
    fn test_generate_within_range() {
        let field = NumberField::new("n", 8)
            .start(10)
            .end(20)
            .with_rng(RandomSource::seeded(3));
        for _ in 0..500 {
            let n = field.generate().as_int().unwrap();
            assert!((10..=20).contains(&n));
        }
    }

    #[test]
    fn test_decode_checks_range() {
        let field = NumberField::new("placeholder", 1).start(1);
        assert_eq!(field.decode(1).unwrap(), FieldValue::Int(1));

        let err = field.decode(0).unwrap_err();
        assert_eq!(
            err,
            IdGenError::Range {
                field: "placeholder".to_string(),
                number: 0,
                reason: "expected 1 ~ 1".to_string(),
            }
        );
    }

    #[test]
    fn test_encode_is_identity() {
        let field = NumberField::new("n", 16);
        assert_eq!(field.encode(&FieldValue::Int(65535)).unwrap(), 65535);
        assert_eq!(field.encode(&FieldValue::from("17")).unwrap(), 17);
    }
}
