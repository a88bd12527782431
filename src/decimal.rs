//! Tolerant comparison of arbitrary-precision decimals
//!
//! Two decimals are equal when, after normalization, both their value and
//! their scale match. Normalization optionally strips trailing fractional
//! zeros and then optionally rounds half-up to a maximum scale.

use crate::error::ConfigError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Largest scale a `rust_decimal::Decimal` can carry
pub const MAX_DECIMAL_SCALE: u32 = 28;

/// Normalization applied to both operands before a decimal comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecimalPolicy {
    /// Strip trailing fractional zeros, so `0.50` equals `0.5`
    pub ignore_trailing_zeros: bool,
    /// Round both operands half-up to this scale
    pub max_scale: Option<u32>,
}

impl DecimalPolicy {
    /// Policy with trailing-zero normalization and no scale cap
    pub fn new() -> Self {
        Self {
            ignore_trailing_zeros: true,
            max_scale: None,
        }
    }

    /// Policy comparing value and scale exactly as given
    pub fn exact() -> Self {
        Self {
            ignore_trailing_zeros: false,
            max_scale: None,
        }
    }

    pub fn with_trailing_zeros_ignored(mut self, ignore: bool) -> Self {
        self.ignore_trailing_zeros = ignore;
        self
    }

    pub fn with_max_scale(mut self, scale: Option<u32>) -> Result<Self, ConfigError> {
        Self::check_scale(scale)?;
        self.max_scale = scale;
        Ok(self)
    }

    /// Reject scales a decimal cannot represent
    pub fn check_scale(scale: Option<u32>) -> Result<(), ConfigError> {
        match scale {
            Some(scale) if scale > MAX_DECIMAL_SCALE => Err(ConfigError::InvalidConfiguration {
                reason: format!(
                    "maximum decimal scale {} exceeds the supported {}",
                    scale, MAX_DECIMAL_SCALE
                ),
            }),
            _ => Ok(()),
        }
    }

    /// Apply this policy to a single operand
    pub fn normalize(&self, value: Decimal) -> Decimal {
        let mut value = if self.ignore_trailing_zeros {
            value.normalize()
        } else {
            value
        };

        if let Some(scale) = self.max_scale {
            value = value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
            value.rescale(scale);
        }

        value
    }

    /// Whether two decimals are equal under this policy
    pub fn equal(&self, a: Decimal, b: Decimal) -> bool {
        let a = self.normalize(a);
        let b = self.normalize(b);
        a == b && a.scale() == b.scale()
    }
}

impl Default for DecimalPolicy {
    fn default() -> Self {
        Self::new()
    }
}
