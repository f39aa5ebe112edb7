//! Schedule estimates with a typed "unavailable" state.
//!
//! A missing parameter value is data, not an error. It flows through the
//! aggregator as [`Estimate::Unavailable`] and makes the whole total
//! unavailable rather than producing a partial sum.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codes::TestCategory;
use crate::resolve::CategoryEstimate;

const UNAVAILABLE: &str = "unavailable";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Estimate {
    Value(f64),
    Unavailable,
}

impl Estimate {
    pub fn from_option(value: Option<f64>) -> Self {
        value.map_or(Estimate::Unavailable, Estimate::Value)
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Estimate::Value(v) => Some(*v),
            Estimate::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Estimate::Value(_))
    }

    /// Sum of all values, or `Unavailable` if any one of them is.
    pub fn sum_all<I: IntoIterator<Item = Estimate>>(estimates: I) -> Estimate {
        estimates
            .into_iter()
            .try_fold(0.0, |acc, e| e.value().map(|v| acc + v))
            .map_or(Estimate::Unavailable, Estimate::Value)
    }
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Estimate::Value(v) => write!(f, "{}", v),
            Estimate::Unavailable => f.write_str(UNAVAILABLE),
        }
    }
}

impl Serialize for Estimate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Estimate::Value(v) => serializer.serialize_f64(*v),
            Estimate::Unavailable => serializer.serialize_str(UNAVAILABLE),
        }
    }
}

impl<'de> Deserialize<'de> for Estimate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f64),
            Text(String),
            Null(()),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(v) => Ok(Estimate::Value(v)),
            Repr::Text(s) if s == UNAVAILABLE => Ok(Estimate::Unavailable),
            Repr::Null(()) => Ok(Estimate::Unavailable),
            Repr::Text(s) => Err(serde::de::Error::custom(format!(
                "expected a number or \"{}\", found \"{}\"",
                UNAVAILABLE, s
            ))),
        }
    }
}

/// Cycle time and labor hours for one test category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEstimate {
    pub cycle_time: Estimate,
    pub labor_hours: Estimate,
}

impl ScheduleEstimate {
    pub fn unavailable() -> Self {
        Self {
            cycle_time: Estimate::Unavailable,
            labor_hours: Estimate::Unavailable,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.cycle_time.is_available() && self.labor_hours.is_available()
    }
}

/// Grand total across the three test categories.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TotalEstimate {
    Complete { cycle_time: f64, labor_hours: f64 },
    Unavailable,
}

impl TotalEstimate {
    pub fn is_complete(&self) -> bool {
        matches!(self, TotalEstimate::Complete { .. })
    }
}

impl fmt::Display for TotalEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TotalEstimate::Complete {
                cycle_time,
                labor_hours,
            } => write!(f, "cycle time {}, labor hours {}", cycle_time, labor_hours),
            TotalEstimate::Unavailable => f.write_str(UNAVAILABLE),
        }
    }
}

/// Sum the per-category estimates.
///
/// The total is complete only when every one of the three categories is
/// present and both of its metrics are available.
pub fn aggregate(categories: &[CategoryEstimate]) -> TotalEstimate {
    let all_present = TestCategory::ALL
        .iter()
        .all(|wanted| categories.iter().filter(|c| c.category == *wanted).count() == 1);
    if !all_present || categories.len() != TestCategory::ALL.len() {
        return TotalEstimate::Unavailable;
    }

    let cycle_time = Estimate::sum_all(categories.iter().map(|c| c.schedule.cycle_time));
    let labor_hours = Estimate::sum_all(categories.iter().map(|c| c.schedule.labor_hours));
    match (cycle_time, labor_hours) {
        (Estimate::Value(cycle_time), Estimate::Value(labor_hours)) => TotalEstimate::Complete {
            cycle_time,
            labor_hours,
        },
        _ => TotalEstimate::Unavailable,
    }
}
