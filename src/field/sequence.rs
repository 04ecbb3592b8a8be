use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::{IdGenError, Result};
use crate::random::RandomSource;
use crate::store::{CounterStore, MemoryStore, KEY_DELIMITER};
use crate::value::{FieldValue, Info};

use super::FieldDef;

/// Inclusive integer range, a single value when `min == max`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub min: u64,
    pub max: u64,
}

impl Span {
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    pub const fn is_valid(&self) -> bool {
        self.min <= self.max
    }
}

impl From<u64> for Span {
    fn from(value: u64) -> Self {
        Self::new(value, value)
    }
}

impl From<(u64, u64)> for Span {
    fn from((min, max): (u64, u64)) -> Self {
        Self::new(min, max)
    }
}

/// Counter that starts at a random value and advances by a random step.
///
/// Counters are kept per key in a [`CounterStore`]. The key is the field name,
/// or the values of `keys` (earlier fields) joined with `-`, so a counter
/// keyed on a timestamp restarts for every new timestamp.
#[derive(Clone)]
pub struct SequenceField {
    def: FieldDef,
    start: Span,
    step: Span,
    keys: Vec<String>,
    store: Arc<dyn CounterStore>,
    rng: RandomSource,
}

impl SequenceField {
    /// Create a sequence starting at 0 and stepping by 1, kept in memory
    pub fn new(name: impl Into<String>, bits: u8) -> Self {
        Self {
            def: FieldDef::new(name, bits),
            start: Span::from(0),
            step: Span::from(1),
            keys: Vec::new(),
            store: Arc::new(MemoryStore::new()),
            rng: RandomSource::default(),
        }
    }

    pub fn start(mut self, start: impl Into<Span>) -> Self {
        self.start = start.into();
        self
    }

    pub fn step(mut self, step: impl Into<Span>) -> Self {
        self.step = step.into();
        self
    }

    pub fn keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_store(mut self, store: Arc<dyn CounterStore>) -> Self {
        self.store = store;
        self
    }

    pub fn with_rng(mut self, rng: RandomSource) -> Self {
        self.rng = rng;
        self
    }

    pub fn def(&self) -> &FieldDef {
        &self.def
    }

    pub const fn start_span(&self) -> Span {
        self.start
    }

    pub const fn step_span(&self) -> Span {
        self.step
    }

    pub fn key_fields(&self) -> &[String] {
        &self.keys
    }

    pub fn store(&self) -> &Arc<dyn CounterStore> {
        &self.store
    }

    /// Counter key for the given context
    pub fn key(&self, context: &Info) -> Result<String> {
        if self.keys.is_empty() {
            return Ok(self.def.name().to_owned());
        }

        let values = self
            .keys
            .iter()
            .map(|key| {
                context
                    .get(key)
                    .map(ToString::to_string)
                    .ok_or_else(|| IdGenError::MissingContext {
                        field: self.def.name().to_owned(),
                        key: key.clone(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(values.join(KEY_DELIMITER))
    }

    pub fn generate(&self, context: &Info) -> Result<FieldValue> {
        let key = self.key(context)?;
        let next = self.store.update(&key, &mut |prev| self.advance(prev))?;
        debug!(field = self.def.name(), key = %key, next, "sequence advanced");
        Ok(FieldValue::Int(next))
    }

    /// Next counter value, refusing values the field cannot hold
    fn advance(&self, prev: Option<u64>) -> Result<u64> {
        let next = match prev {
            Some(prev) => prev.checked_add(self.rng.between(self.step.min, self.step.max)),
            None => Some(self.rng.between(self.start.min, self.start.max)),
        };

        let mask = self.def.mask();
        match next {
            Some(next) if next <= mask => Ok(next),
            overflow => Err(IdGenError::Assemble {
                field: self.def.name().to_owned(),
                number: overflow.unwrap_or(u64::MAX),
                bits: self.def.bits(),
                mask,
            }),
        }
    }

    pub fn encode(&self, value: &FieldValue) -> Result<u64> {
        self.def.encode_int(value)
    }

    pub fn decode(&self, number: u64) -> FieldValue {
        FieldValue::Int(number)
    }
}

impl fmt::Debug for SequenceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequenceField")
            .field("def", &self.def)
            .field("start", &self.start)
            .field("step", &self.step)
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence(bits: u8) -> (SequenceField, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let field = SequenceField::new("sequence", bits)
            .start((0, 10000))
            .step((1, 10))
            .keys(["time"])
            .with_store(store.clone())
            .with_rng(RandomSource::seeded(11));
        (field, store)
    }

    fn context(time: &str) -> Info {
        [("time", FieldValue::from(time))].into_iter().collect()
    }

    #[test]
    fn test_first_value_within_start() {
        let (field, store) = sequence(16);
        let first = field.generate(&context("2018-01-01 00:00:05")).unwrap();
        let first = first.as_int().unwrap();
        assert!(first <= 10000);
        assert_eq!(store.get("2018-01-01 00:00:05").unwrap(), Some(first));
    }

    #[test]
    fn test_step_between_generations() {
        let (field, _) = sequence(16);
        let ctx = context("2018-01-01 00:00:05");
        let mut prev = field.generate(&ctx).unwrap().as_int().unwrap();
        for _ in 0..100 {
            let next = field.generate(&ctx).unwrap().as_int().unwrap();
            assert!(next >= prev + 1 && next <= prev + 10);
            prev = next;
        }
    }

    #[test]
    fn test_separate_keys_have_separate_counters() {
        let (field, store) = sequence(16);
        field.generate(&context("a")).unwrap();
        field.generate(&context("b")).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_key_joins_values() {
        let field = SequenceField::new("seq", 8).keys(["day", "shard"]);
        let ctx: Info = [
            ("day", FieldValue::from("2018-01-01")),
            ("shard", FieldValue::Int(3)),
        ]
        .into_iter()
        .collect();
        assert_eq!(field.key(&ctx).unwrap(), "2018-01-01-3");

        let unkeyed = SequenceField::new("seq", 8);
        assert_eq!(unkeyed.key(&Info::new()).unwrap(), "seq");
    }

    #[test]
    fn test_missing_context() {
        let field = SequenceField::new("seq", 8).keys(["time"]);
        assert_eq!(
            field.key(&Info::new()).unwrap_err(),
            IdGenError::MissingContext {
                field: "seq".to_string(),
                key: "time".to_string()
            }
        );
    }

    #[test]
    fn test_overflow_is_refused_and_not_stored() {
        let store = Arc::new(MemoryStore::new());
        store.set("seq", 250).unwrap();
        let field = SequenceField::new("seq", 8)
            .step(10)
            .with_store(store.clone());

        let err = field.generate(&Info::new()).unwrap_err();
        assert_eq!(
            err,
            IdGenError::Assemble {
                field: "seq".to_string(),
                number: 260,
                bits: 8,
                mask: 255
            }
        );
        assert_eq!(store.get("seq").unwrap(), Some(250));
    }

    #[test]
    fn test_encode_decode_identity() {
        let field = SequenceField::new("seq", 16);
        assert_eq!(field.encode(&FieldValue::Int(42)).unwrap(), 42);
        assert_eq!(field.decode(42), FieldValue::Int(42));
    }
}
