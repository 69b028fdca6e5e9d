//! Linear transform implementation (no transformation)

use super::{TransformKind, TransformTrait};

/// Linear transform - the identity map
#[derive(Debug, Clone, Copy)]
pub struct Linear;

impl TransformTrait for Linear {
    fn transform_kind(&self) -> TransformKind {
        TransformKind::Linear
    }

    fn name(&self) -> &'static str {
        "linear"
    }

    fn allowed_domain(&self) -> (f64, f64) {
        (f64::NEG_INFINITY, f64::INFINITY)
    }

    fn is_value_in_domain(&self, value: f64) -> bool {
        value.is_finite()
    }

    fn transform(&self, value: f64) -> f64 {
        value
    }

    fn inverse(&self, value: f64) -> f64 {
        value
    }
}

impl std::fmt::Display for Linear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
