/*!
# plotkit - Plotting Axis Utilities

Utilities for exploratory data-analysis plotting workflows: computing
aesthetically "nice" axis tick positions and labels, and bridging nested
statistical-language data structures to and from a serialized form.

## Example

```rust,ignore
use plotkit::{compute_ticks, TransformKind};

// Plan between 2 and 6 ticks for an axis spanning 1..100.
let ticks = compute_ticks(
    1.0,
    100.0,
    2,
    6,
    TransformKind::Linear,
    TransformKind::Linear,
)?;
assert_eq!(ticks.labels, vec![10.0, 30.0, 50.0, 70.0, 90.0]);
```

## Architecture

plotkit contains two independent subsystems:

- **Tick planning** ([`scale`]) - transforms between label space and
  axis-position space (linear, log10, log2) and a tick planner that
  searches for a human-friendly tick spacing within a desired tick-count
  range. Axis scale and label spacing are independent: an axis holding
  log-transformed data can be labeled 1, 10, 100, ... while a linear axis
  can carry log-spaced labels.
- **Data bridging** ([`bridge`]) - a tagged-variant representation of
  nested statistical data (scalars, vectors, mappings, tables) with
  recursive conversion to and from JSON files.

Tick output is handed to an external renderer through the [`Axis`] trait;
plotkit never draws anything itself.

## Core Components

- [`scale::transform`] - value-to-scale and scale-to-value transforms
- [`scale::ticks`] - tick spacing search and tick set generation
- [`axis`] - axis collaborator trait and tick/limit application helpers
- [`bridge`] - nested data marshalling and file load/save
*/

pub mod axis;
pub mod bridge;
pub mod scale;

// Re-export key types for convenience
pub use axis::{apply_x_ticks, apply_y_ticks, Axis, TickOptions};
pub use bridge::{load, save, DataValue};
pub use scale::ticks::{compute_ticks, force_insert_ticks, TickSet};
pub use scale::transform::{descale_values, scale_values, Transform, TransformKind};

/// Main library error type
#[derive(thiserror::Error, Debug)]
pub enum PlotkitError {
    #[error("Domain error: {0}")]
    DomainError(String),

    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Serialization error: {0}")]
    SerdeError(String),

    #[error("Data error: {0}")]
    DataError(String),
}

pub type Result<T> = std::result::Result<T, PlotkitError>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::axis::set_soft_ylim;

    /// Minimal recording axis used to exercise the full plan-and-apply path.
    #[derive(Debug, Default)]
    struct RecordingAxis {
        xlim: (f64, f64),
        ylim: (f64, f64),
        yticks: Vec<f64>,
        ylabels: Vec<String>,
    }

    impl Axis for RecordingAxis {
        fn x_limits(&self) -> (f64, f64) {
            self.xlim
        }
        fn y_limits(&self) -> (f64, f64) {
            self.ylim
        }
        fn set_x_limits(&mut self, min: f64, max: f64) {
            self.xlim = (min, max);
        }
        fn set_y_limits(&mut self, min: f64, max: f64) {
            self.ylim = (min, max);
        }
        fn set_x_ticks(&mut self, _positions: Vec<f64>) {}
        fn set_y_ticks(&mut self, positions: Vec<f64>) {
            self.yticks = positions;
        }
        fn set_x_tick_labels(&mut self, _labels: Vec<String>, _rotation: f64) {}
        fn set_y_tick_labels(&mut self, labels: Vec<String>, _rotation: f64) {
            self.ylabels = labels;
        }
    }

    #[test]
    fn test_plan_and_apply_pipeline() {
        let mut ax = RecordingAxis {
            ylim: (1.0, 100.0),
            ..Default::default()
        };

        set_soft_ylim(&mut ax, 0.0, 100.0, TransformKind::Linear).unwrap();
        assert_eq!(ax.y_limits(), (0.0, 100.0));

        apply_y_ticks(&mut ax, &TickOptions::default()).unwrap();
        assert!(!ax.yticks.is_empty());
        assert_eq!(ax.yticks.len(), ax.ylabels.len());
        assert!(ax.yticks.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_error_display() {
        let err = PlotkitError::DomainError("log10 of -1".to_string());
        assert_eq!(err.to_string(), "Domain error: log10 of -1");
    }
}
