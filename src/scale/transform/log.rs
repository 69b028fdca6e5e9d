//! Log transform implementation (parameterized by base)
//!
//! A single logarithm transform covers both supported bases. The base
//! determines which `TransformKind` is reported: base 10 maps to
//! `TransformKind::Log10` and base 2 to `TransformKind::Log2`.

use super::{TransformKind, TransformTrait};

/// Log transform - logarithm with base 10 or 2
///
/// Domain: (0, +∞) - positive values only
#[derive(Debug, Clone, Copy)]
pub struct Log {
    base: f64,
}

impl Log {
    /// Create a base-10 logarithm transform
    pub fn base10() -> Self {
        Self { base: 10.0 }
    }

    /// Create a base-2 logarithm transform
    pub fn base2() -> Self {
        Self { base: 2.0 }
    }

    /// Get the base of this logarithm
    pub fn base(&self) -> f64 {
        self.base
    }

    /// Check if this is a base-10 log (within floating point tolerance)
    fn is_base10(&self) -> bool {
        (self.base - 10.0).abs() < 1e-10
    }
}

impl TransformTrait for Log {
    fn transform_kind(&self) -> TransformKind {
        if self.is_base10() {
            TransformKind::Log10
        } else {
            TransformKind::Log2
        }
    }

    fn name(&self) -> &'static str {
        if self.is_base10() {
            "log10"
        } else {
            "log2"
        }
    }

    fn allowed_domain(&self) -> (f64, f64) {
        (f64::MIN_POSITIVE, f64::INFINITY)
    }

    fn is_value_in_domain(&self, value: f64) -> bool {
        value > 0.0 && value.is_finite()
    }

    fn transform(&self, value: f64) -> f64 {
        value.log(self.base)
    }

    fn inverse(&self, value: f64) -> f64 {
        self.base.powf(value)
    }
}

impl std::fmt::Display for Log {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
