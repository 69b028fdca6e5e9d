//! Transform trait and implementations
//!
//! Trait-based design for axis scale transforms. Each transform type is
//! implemented as its own struct, with a thin wrapper hiding the trait
//! object.
//!
//! # Architecture
//!
//! - `TransformKind`: Enum for pattern matching and serialization
//! - `TransformTrait`: Trait defining transform behavior
//! - `Transform`: Wrapper struct holding an Arc<dyn TransformTrait>
//!
//! # Supported Transforms
//!
//! | Transform | Domain    | Description           |
//! |-----------|-----------|-----------------------|
//! | `linear`  | (-∞, +∞)  | No transformation     |
//! | `log10`   | (0, +∞)   | Base-10 logarithm     |
//! | `log2`    | (0, +∞)   | Base-2 logarithm      |
//!
//! Transforms appear in two independent roles: as the axis's own
//! coordinate transform (`scale`) and as the transform deciding the
//! increment between consecutive tick labels (`spacing`).

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

use crate::{PlotkitError, Result};

mod linear;
mod log;

pub use self::linear::Linear;
pub use self::log::Log;

/// Enum of all transform types for pattern matching and serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformKind {
    /// No transformation
    Linear,
    /// Base-10 logarithm
    Log10,
    /// Base-2 logarithm
    Log2,
}

impl TransformKind {
    /// Returns the canonical name for this transform kind
    pub fn name(&self) -> &'static str {
        match self {
            TransformKind::Linear => "linear",
            TransformKind::Log10 => "log10",
            TransformKind::Log2 => "log2",
        }
    }
}

impl std::fmt::Display for TransformKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for TransformKind {
    type Err = PlotkitError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "linear" => Ok(TransformKind::Linear),
            "log10" => Ok(TransformKind::Log10),
            "log2" => Ok(TransformKind::Log2),
            other => Err(PlotkitError::DomainError(format!(
                "Unknown transform name: '{}'",
                other
            ))),
        }
    }
}

/// Core trait for transform behavior
///
/// Each transform type implements this trait. Forward maps go from label
/// space into scaled (axis-position) space, inverse maps go back.
pub trait TransformTrait: std::fmt::Debug + std::fmt::Display + Send + Sync {
    /// Returns which transform type this is (for pattern matching)
    fn transform_kind(&self) -> TransformKind;

    /// Canonical name for parsing and display
    fn name(&self) -> &'static str;

    /// Returns valid forward-input domain as (min, max)
    ///
    /// - `linear`: (-∞, +∞)
    /// - `log10`, `log2`: (0, +∞) - excludes 0 and negative
    fn allowed_domain(&self) -> (f64, f64);

    /// Check if value is in the transform's forward domain
    ///
    /// Returns true if the value can be transformed without producing
    /// NaN or infinity.
    fn is_value_in_domain(&self, value: f64) -> bool;

    /// Forward transformation: label space -> scaled space
    fn transform(&self, value: f64) -> f64;

    /// Inverse transformation: scaled space -> label space
    fn inverse(&self, value: f64) -> f64;
}

/// Wrapper struct for transform trait objects
///
/// This provides a convenient interface for working with transforms while
/// hiding the complexity of trait objects.
#[derive(Clone)]
pub struct Transform(Arc<dyn TransformTrait>);

impl Transform {
    /// Create a Linear transform (no transformation)
    pub fn linear() -> Self {
        Self(Arc::new(Linear))
    }

    /// Create a Log10 transform (base-10 logarithm)
    pub fn log10() -> Self {
        Self(Arc::new(Log::base10()))
    }

    /// Create a Log2 transform (base-2 logarithm)
    pub fn log2() -> Self {
        Self(Arc::new(Log::base2()))
    }

    /// Create a transform from its kind
    pub fn from_kind(kind: TransformKind) -> Self {
        match kind {
            TransformKind::Linear => Self::linear(),
            TransformKind::Log10 => Self::log10(),
            TransformKind::Log2 => Self::log2(),
        }
    }
}

impl std::ops::Deref for Transform {
    type Target = dyn TransformTrait;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl std::fmt::Debug for Transform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Transform({})", self.0.name())
    }
}

/// Map values from label space into scaled space, elementwise.
///
/// Always returns a new vector; the input slice is never mutated. Values
/// outside the transform's domain (non-positive under log10/log2,
/// non-finite anywhere) are an explicit [`PlotkitError::DomainError`]
/// rather than silent NaN/Inf propagation.
pub fn scale_values(values: &[f64], kind: TransformKind) -> Result<Vec<f64>> {
    let transform = Transform::from_kind(kind);
    values
        .iter()
        .map(|&v| {
            if transform.is_value_in_domain(v) {
                Ok(transform.transform(v))
            } else {
                Err(PlotkitError::DomainError(format!(
                    "Value {} is outside the domain of the '{}' transform",
                    v,
                    transform.name()
                )))
            }
        })
        .collect()
}

/// Map values from scaled space back into label space, elementwise.
///
/// The inverse of [`scale_values`]. The inverse maps accept any finite
/// input, so only non-finite values are rejected.
pub fn descale_values(values: &[f64], kind: TransformKind) -> Result<Vec<f64>> {
    let transform = Transform::from_kind(kind);
    values
        .iter()
        .map(|&v| {
            if v.is_finite() {
                Ok(transform.inverse(v))
            } else {
                Err(PlotkitError::DomainError(format!(
                    "Cannot invert non-finite value {} under '{}'",
                    v,
                    transform.name()
                )))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(TransformKind::Linear.name(), "linear");
        assert_eq!(TransformKind::Log10.name(), "log10");
        assert_eq!(TransformKind::Log2.name(), "log2");
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!(
            "log10".parse::<TransformKind>().unwrap(),
            TransformKind::Log10
        );
        assert_eq!(
            "linear".parse::<TransformKind>().unwrap(),
            TransformKind::Linear
        );
        assert!("sqrt".parse::<TransformKind>().is_err());
    }

    #[test]
    fn test_kind_serde_roundtrip() {
        let json = serde_json::to_string(&TransformKind::Log2).unwrap();
        assert_eq!(json, "\"log2\"");
        let back: TransformKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TransformKind::Log2);
    }

    #[test]
    fn test_from_kind_dispatch() {
        for kind in [TransformKind::Linear, TransformKind::Log10, TransformKind::Log2] {
            let t = Transform::from_kind(kind);
            assert_eq!(t.transform_kind(), kind);
        }
    }

    #[test]
    fn test_scale_values_linear() {
        let vals = vec![1.0, 2.0, 3.0];
        let scaled = scale_values(&vals, TransformKind::Linear).unwrap();
        assert_eq!(scaled, vals);
        // Input untouched
        assert_eq!(vals, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_scale_values_log10() {
        let scaled = scale_values(&[1.0, 10.0, 100.0], TransformKind::Log10).unwrap();
        for (got, want) in scaled.iter().zip([0.0, 1.0, 2.0]) {
            assert!((got - want).abs() < 1e-10);
        }
    }

    #[test]
    fn test_scale_values_domain_error() {
        assert!(matches!(
            scale_values(&[1.0, -1.0], TransformKind::Log10),
            Err(PlotkitError::DomainError(_))
        ));
        assert!(matches!(
            scale_values(&[0.0], TransformKind::Log2),
            Err(PlotkitError::DomainError(_))
        ));
        assert!(matches!(
            scale_values(&[f64::NAN], TransformKind::Linear),
            Err(PlotkitError::DomainError(_))
        ));
    }

    #[test]
    fn test_descale_values() {
        let labels = descale_values(&[0.0, 1.0, 2.0, 3.0], TransformKind::Log10).unwrap();
        for (got, want) in labels.iter().zip([1.0, 10.0, 100.0, 1000.0]) {
            assert!((got - want).abs() < 1e-9);
        }
        assert!(descale_values(&[f64::INFINITY], TransformKind::Linear).is_err());
    }

    #[test]
    fn test_roundtrip_law() {
        // scale(descale(v)) == v within 1e-9 for all modes
        for kind in [TransformKind::Linear, TransformKind::Log10, TransformKind::Log2] {
            for &v in &[-2.0, -0.5, 0.0, 0.5, 1.0, 3.0, 7.25] {
                let label = descale_values(&[v], kind).unwrap();
                let back = scale_values(&label, kind).unwrap();
                assert!(
                    (back[0] - v).abs() < 1e-9,
                    "Roundtrip failed for {} under {}",
                    v,
                    kind
                );
            }
        }
    }
}
