//! Built-in identifier categories

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::ConfigError;
use crate::field::{DateTimeField, DateTimePrecision, NumberField, SequenceField};
use crate::generator::IdGenerator;
use crate::store::CounterStore;

/// Predefined field layouts.
///
/// Both start with a fixed `1` bit so the decimal form always has the same
/// number of digits, followed by the creation time and a per-time counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// 1 + 29 bits of seconds + 16 bits of sequence
    Order,
    /// 1 + 24 bits of minutes + 20 bits of sequence
    OrderMinute,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Order, Category::OrderMinute];

    pub const fn name(self) -> &'static str {
        match self {
            Category::Order => "order",
            Category::OrderMinute => "order-m",
        }
    }

    /// Cache name for the category's counters, distinct per category
    pub const fn cache_name(self) -> &'static str {
        self.name()
    }

    /// Build the category's generator, keeping sequence counters in `store`
    pub fn generator(self, store: Arc<dyn CounterStore>) -> Result<IdGenerator, ConfigError> {
        let (precision, time_bits, sequence_bits) = match self {
            Category::Order => (DateTimePrecision::Second, 29, 16),
            Category::OrderMinute => (DateTimePrecision::Minute, 24, 20),
        };

        IdGenerator::builder(self.name())
            .field(NumberField::new("placeholder", 1).start(1))
            .field(DateTimeField::new(
                "time",
                time_bits,
                precision,
                crate::field::default_base(),
            ))
            .field(
                SequenceField::new("sequence", sequence_bits)
                    .start((0, 10000))
                    .step((1, 10))
                    .keys(["time"])
                    .with_store(store),
            )
            .build()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.name() == s)
            .ok_or_else(|| format!("unknown category {s:?}"))
    }
}
