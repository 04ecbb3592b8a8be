use std::fmt;
use std::sync::Arc;

use chrono::{NaiveTime, ParseResult, Timelike};

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::value::FieldValue;

use super::FieldDef;

const SECONDS_PER_DAY: u64 = 24 * 3600;

/// Granularity of a time-of-day field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimePrecision {
    Hour,
    Minute,
    Second,
}

impl TimePrecision {
    #[inline(always)]
    pub const fn unit_seconds(self) -> u64 {
        match self {
            TimePrecision::Hour => 3600,
            TimePrecision::Minute => 60,
            TimePrecision::Second => 1,
        }
    }

    pub const fn format(self) -> &'static str {
        match self {
            TimePrecision::Hour => "%H",
            TimePrecision::Minute => "%H:%M",
            TimePrecision::Second => "%H:%M:%S",
        }
    }

    pub fn parse(self, text: &str) -> ParseResult<NaiveTime> {
        match self {
            TimePrecision::Hour => NaiveTime::parse_from_str(&format!("{text}:00"), "%H:%M"),
            TimePrecision::Minute | TimePrecision::Second => {
                NaiveTime::parse_from_str(text, self.format())
            }
        }
    }
}

/// Time of day stored as whole units elapsed since midnight
#[derive(Clone)]
pub struct TimeField {
    def: FieldDef,
    precision: TimePrecision,
    clock: Arc<dyn Clock>,
}

impl TimeField {
    pub fn new(name: impl Into<String>, bits: u8, precision: TimePrecision) -> Self {
        Self {
            def: FieldDef::new(name, bits),
            precision,
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

    pub const fn precision(&self) -> TimePrecision {
        self.precision
    }

    pub fn generate(&self) -> FieldValue {
        let now = self.clock.now().time();
        FieldValue::Text(now.format(self.precision.format()).to_string())
    }

    pub fn encode(&self, value: &FieldValue) -> Result<u64> {
        let text = self.def.expect_text(value)?;
        let time = self
            .precision
            .parse(text)
            .map_err(|e| self.def.encode_error(value, e.to_string()))?;
        let seconds = time.hour() as u64 * 3600 + time.minute() as u64 * 60 + time.second() as u64;
        Ok(seconds / self.precision.unit_seconds())
    }

    pub fn decode(&self, number: u64) -> Result<FieldValue> {
        let seconds = number
            .checked_mul(self.precision.unit_seconds())
            .filter(|&seconds| seconds < SECONDS_PER_DAY)
            .ok_or_else(|| self.def.range_error(number, "past the end of the day"))?;

        let (hour, rest) = (seconds / 3600, seconds % 3600);
        let (minute, second) = (rest / 60, rest % 60);
        let time = NaiveTime::from_hms_opt(hour as u32, minute as u32, second as u32)
            .ok_or_else(|| self.def.range_error(number, "past the end of the day"))?;
        Ok(FieldValue::Text(
            time.format(self.precision.format()).to_string(),
        ))
    }
}

impl fmt::Debug for TimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeField")
            .field("def", &self.def)
            .field("precision", &self.precision)
            .finish_non_exhaustive()
    }
}
