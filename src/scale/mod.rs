//! Scale transforms and tick planning
//!
//! This module contains the numeric core of plotkit: coordinate transforms
//! between label space and axis-position space, and the tick planner that
//! derives nice tick spacings from an axis range and a tick-count target.

pub mod ticks;
pub mod transform;

pub use ticks::{compute_ticks, float_range, force_insert_ticks, tick_labels, TickSet};
pub use transform::{descale_values, scale_values, Transform, TransformKind, TransformTrait};
