//! Unit newtypes for the two ratings the classifier reads.
//!
//! Keeps MVA ratings and insulation levels from being swapped at call
//! sites. Both are `#[repr(transparent)]` over `f64`.
//!
//! ```
//! use tts_core::units::{Kilovolts, MegavoltAmperes};
//!
//! let rating = MegavoltAmperes(40.0) + MegavoltAmperes(5.0);
//! assert_eq!(rating.value(), 45.0);
//! assert!(Kilovolts(750.0).is_standard_bil());
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Standard Basic Insulation Levels (kV) seen on power transformer nameplates.
pub const STANDARD_BIL_LEVELS: [f64; 9] = [
    350.0, 450.0, 550.0, 650.0, 750.0, 900.0, 1050.0, 1150.0, 1300.0,
];

macro_rules! impl_unit_ops {
    ($type:ty, $unit_name:literal) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{} {}", self.0, $unit_name)
            }
        }

        impl $type {
            #[inline]
            pub const fn new(value: f64) -> Self {
                Self(value)
            }

            /// Get the raw numeric value
            #[inline]
            pub const fn value(self) -> f64 {
                self.0
            }

            /// Finite and not below zero: the only values a rating may take.
            #[inline]
            pub fn is_valid_rating(self) -> bool {
                self.0.is_finite() && self.0 >= 0.0
            }
        }
    };
}

/// Apparent power rating in megavolt-amperes (MVA)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct MegavoltAmperes(pub f64);

impl_unit_ops!(MegavoltAmperes, "MVA");

/// Insulation level in kilovolts (kV); used for BIL ratings.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Kilovolts(pub f64);

impl_unit_ops!(Kilovolts, "kV");

impl Kilovolts {
    /// True when the value is one of [`STANDARD_BIL_LEVELS`].
    pub fn is_standard_bil(self) -> bool {
        STANDARD_BIL_LEVELS.iter().any(|level| *level == self.0)
    }
}
