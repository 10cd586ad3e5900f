use std::fmt;
use std::ops::{Range, RangeFrom, RangeInclusive, RangeTo, RangeToInclusive};

use ordered_float::OrderedFloat;

use crate::value::Value;

/// Numeric interval. A missing bound is unbounded on that side; the lower
/// bound is always inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    pub start: Option<OrderedFloat<f64>>,
    pub end: Option<OrderedFloat<f64>>,
    pub end_inclusive: bool,
}

impl Interval {
    pub fn new(start: Option<f64>, end: Option<f64>, end_inclusive: bool) -> Self {
        Self {
            start: start.map(OrderedFloat),
            end: end.map(OrderedFloat),
            end_inclusive,
        }
    }

    pub fn closed(start: f64, end: f64) -> Self {
        Self::new(Some(start), Some(end), true)
    }

    pub fn half_open(start: f64, end: f64) -> Self {
        Self::new(Some(start), Some(end), false)
    }

    pub fn at_least(start: f64) -> Self {
        Self::new(Some(start), None, true)
    }

    pub fn at_most(end: f64) -> Self {
        Self::new(None, Some(end), true)
    }

    /// Only numbers are members; NaN never is.
    pub fn contains(&self, value: &Value) -> bool {
        let Some(x) = value.as_f64() else { return false };
        if x.is_nan() {
            return false;
        }
        let above_start = self.start.is_none_or(|s| x >= s.0);
        let below_end = match self.end {
            None => true,
            Some(e) if self.end_inclusive => x <= e.0,
            Some(e) => x < e.0,
        };
        above_start && below_end
    }
}

impl From<RangeInclusive<i64>> for Interval {
    fn from(r: RangeInclusive<i64>) -> Self {
        Interval::closed(*r.start() as f64, *r.end() as f64)
    }
}

impl From<Range<i64>> for Interval {
    fn from(r: Range<i64>) -> Self {
        Interval::half_open(r.start as f64, r.end as f64)
    }
}

impl From<RangeFrom<i64>> for Interval {
    fn from(r: RangeFrom<i64>) -> Self {
        Interval::at_least(r.start as f64)
    }
}

impl From<RangeTo<i64>> for Interval {
    fn from(r: RangeTo<i64>) -> Self {
        Interval::new(None, Some(r.end as f64), false)
    }
}

impl From<RangeToInclusive<i64>> for Interval {
    fn from(r: RangeToInclusive<i64>) -> Self {
        Interval::at_most(r.end as f64)
    }
}

impl From<RangeInclusive<f64>> for Interval {
    fn from(r: RangeInclusive<f64>) -> Self {
        Interval::closed(*r.start(), *r.end())
    }
}

impl From<Range<f64>> for Interval {
    fn from(r: Range<f64>) -> Self {
        Interval::half_open(r.start, r.end)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(s) = self.start {
            write!(f, "{}", s.0)?;
        }
        f.write_str(if self.end_inclusive && self.end.is_some() { "..=" } else { ".." })?;
        if let Some(e) = self.end {
            write!(f, "{}", e.0)?;
        }
        Ok(())
    }
}
