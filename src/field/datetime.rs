use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, ParseResult, TimeDelta};

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::value::FieldValue;

use super::FieldDef;

/// Granularity of a date-time field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateTimePrecision {
    Day,
    Hour,
    Minute,
    Second,
}

impl DateTimePrecision {
    /// Seconds covered by one unit
    #[inline(always)]
    pub const fn unit_seconds(self) -> u64 {
        match self {
            DateTimePrecision::Day => 24 * 3600,
            DateTimePrecision::Hour => 3600,
            DateTimePrecision::Minute => 60,
            DateTimePrecision::Second => 1,
        }
    }

    pub const fn format(self) -> &'static str {
        match self {
            DateTimePrecision::Day => "%Y-%m-%d",
            DateTimePrecision::Hour => "%Y-%m-%d %H",
            DateTimePrecision::Minute => "%Y-%m-%d %H:%M",
            DateTimePrecision::Second => "%Y-%m-%d %H:%M:%S",
        }
    }

    /// Parse text written in this precision's format
    pub fn parse(self, text: &str) -> ParseResult<NaiveDateTime> {
        // chrono needs at least hour and minute to build a date-time
        match self {
            DateTimePrecision::Day => {
                NaiveDateTime::parse_from_str(&format!("{text} 00:00"), "%Y-%m-%d %H:%M")
            }
            DateTimePrecision::Hour => {
                NaiveDateTime::parse_from_str(&format!("{text}:00"), "%Y-%m-%d %H:%M")
            }
            DateTimePrecision::Minute | DateTimePrecision::Second => {
                NaiveDateTime::parse_from_str(text, self.format())
            }
        }
    }
}

/// Default reference instant, 2018-01-01 00:00:00
pub fn default_base() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2018, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("2018-01-01 is a valid date")
}

/// Calendar date-time stored as whole units elapsed since `base`
#[derive(Clone)]
pub struct DateTimeField {
    def: FieldDef,
    precision: DateTimePrecision,
    base: NaiveDateTime,
    clock: Arc<dyn Clock>,
}

impl DateTimeField {
    pub fn new(
        name: impl Into<String>,
        bits: u8,
        precision: DateTimePrecision,
        base: NaiveDateTime,
    ) -> Self {
        Self {
            def: FieldDef::new(name, bits),
            precision,
            base,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn def(&self) -> &FieldDef {
        &self.def
    }

    pub const fn precision(&self) -> DateTimePrecision {
        self.precision
    }

    pub const fn base(&self) -> NaiveDateTime {
        self.base
    }

    pub fn generate(&self) -> FieldValue {
        let now = self.clock.now();
        FieldValue::Text(now.format(self.precision.format()).to_string())
    }

    pub fn encode(&self, value: &FieldValue) -> Result<u64> {
        let text = self.def.expect_text(value)?;
        let instant = self
            .precision
            .parse(text)
            .map_err(|e| self.def.encode_error(value, e.to_string()))?;

        let seconds = (instant - self.base).num_seconds();
        if seconds < 0 {
            return Err(self
                .def
                .encode_error(value, format!("earlier than base {}", self.base)));
        }
        Ok(seconds as u64 / self.precision.unit_seconds())
    }

    pub fn decode(&self, number: u64) -> Result<FieldValue> {
        let instant = number
            .checked_mul(self.precision.unit_seconds())
            .and_then(|seconds| i64::try_from(seconds).ok())
            .and_then(TimeDelta::try_seconds)
            .and_then(|delta| self.base.checked_add_signed(delta))
            .ok_or_else(|| self.def.range_error(number, "not a representable date-time"))?;
        Ok(FieldValue::Text(
            instant.format(self.precision.format()).to_string(),
        ))
    }
}

impl fmt::Debug for DateTimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateTimeField")
            .field("def", &self.def)
            .field("precision", &self.precision)
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}
