use std::fmt::{Debug, Write};

use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::{TrackError, TrackResult};

/// Domain plug-in describing how an ordered point type moves along the axis.
///
/// Comparison comes from `Ord`; everything else the axis needs is expressed in
/// whole steps so layout and intersection code never does arithmetic on points.
pub trait AxisDomain {
    type Point: Clone + Ord + Debug;

    /// Moves `point` by `steps` axis steps (negative moves backwards).
    fn add_step(&self, point: &Self::Point, steps: i64) -> Self::Point;

    /// Signed distance from `from` to `to` measured in (possibly fractional) steps.
    fn steps_between(&self, from: &Self::Point, to: &Self::Point) -> f64;

    fn format_label(&self, point: &Self::Point) -> String;
}

/// Integer index axis with a fixed positive step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDomain {
    step: i64,
}

impl IndexDomain {
    pub fn new(step: i64) -> TrackResult<Self> {
        if step <= 0 {
            return Err(TrackError::InvalidStep(format!(
                "index step must be > 0, got {step}"
            )));
        }
        Ok(Self { step })
    }

    #[must_use]
    pub fn step(self) -> i64 {
        self.step
    }
}

impl AxisDomain for IndexDomain {
    type Point = i64;

    fn add_step(&self, point: &i64, steps: i64) -> i64 {
        point.saturating_add(steps.saturating_mul(self.step))
    }

    fn steps_between(&self, from: &i64, to: &i64) -> f64 {
        (*to as f64 - *from as f64) / self.step as f64
    }

    fn format_label(&self, point: &i64) -> String {
        point.to_string()
    }
}

/// Calendar axis stepping by a whole number of days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateDomain {
    step_days: i64,
    label_format: String,
}

impl DateDomain {
    pub fn new(step_days: i64) -> TrackResult<Self> {
        if step_days <= 0 {
            return Err(TrackError::InvalidStep(format!(
                "date step must be at least one day, got {step_days}"
            )));
        }
        Ok(Self {
            step_days,
            label_format: "%Y-%m-%d".to_owned(),
        })
    }

    /// Overrides the `chrono` format string used for labels.
    ///
    /// Formats that cannot render a date (unknown specifiers, time or zone
    /// fields) are rejected.
    pub fn with_label_format(mut self, format: impl Into<String>) -> TrackResult<Self> {
        let format = format.into();
        let mut sample = String::new();
        if write!(sample, "{}", NaiveDate::MIN.format(&format)).is_err() {
            return Err(TrackError::InvalidData(format!(
                "label format {format:?} cannot format a date"
            )));
        }
        self.label_format = format;
        Ok(self)
    }

    #[must_use]
    pub fn step_days(&self) -> i64 {
        self.step_days
    }
}

impl AxisDomain for DateDomain {
    type Point = NaiveDate;

    fn add_step(&self, point: &NaiveDate, steps: i64) -> NaiveDate {
        let days = steps.saturating_mul(self.step_days);
        let shifted = TimeDelta::try_days(days).and_then(|delta| point.checked_add_signed(delta));
        match shifted {
            Some(date) => date,
            None if days < 0 => NaiveDate::MIN,
            None => NaiveDate::MAX,
        }
    }

    fn steps_between(&self, from: &NaiveDate, to: &NaiveDate) -> f64 {
        to.signed_duration_since(*from).num_days() as f64 / self.step_days as f64
    }

    fn format_label(&self, point: &NaiveDate) -> String {
        let mut label = String::new();
        match write!(label, "{}", point.format(&self.label_format)) {
            Ok(()) => label,
            // Deserialized domains skip format validation.
            Err(_) => point.to_string(),
        }
    }
}

/// Elapsed-time axis stepping by a fixed positive duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationDomain {
    step_ms: i64,
}

impl DurationDomain {
    pub fn new(step: TimeDelta) -> TrackResult<Self> {
        let step_ms = step.num_milliseconds();
        if step_ms <= 0 {
            return Err(TrackError::InvalidStep(format!(
                "duration step must be at least 1ms, got {step_ms}ms"
            )));
        }
        Ok(Self { step_ms })
    }

    #[must_use]
    pub fn step(self) -> TimeDelta {
        TimeDelta::milliseconds(self.step_ms)
    }
}

impl AxisDomain for DurationDomain {
    type Point = TimeDelta;

    fn add_step(&self, point: &TimeDelta, steps: i64) -> TimeDelta {
        let shift_ms = steps.saturating_mul(self.step_ms);
        let shifted =
            TimeDelta::try_milliseconds(shift_ms).and_then(|shift| point.checked_add(&shift));
        match shifted {
            Some(value) => value,
            None if shift_ms < 0 => TimeDelta::MIN,
            None => TimeDelta::MAX,
        }
    }

    fn steps_between(&self, from: &TimeDelta, to: &TimeDelta) -> f64 {
        match to.checked_sub(from) {
            Some(delta) => delta.num_milliseconds() as f64 / self.step_ms as f64,
            None => (to.num_milliseconds() as f64 - from.num_milliseconds() as f64)
                / self.step_ms as f64,
        }
    }

    fn format_label(&self, point: &TimeDelta) -> String {
        let total = point.num_seconds();
        let sign = if total < 0 { "-" } else { "" };
        let total = total.unsigned_abs();
        format!(
            "{sign}{:02}:{:02}:{:02}",
            total / 3600,
            (total / 60) % 60,
            total % 60
        )
    }
}
