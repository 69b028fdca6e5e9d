//! Axis collaborator boundary
//!
//! The tick planner never draws anything; its output is handed to an
//! external chart axis through the [`Axis`] trait. The helpers in this
//! module mirror the usual decorate-an-axis workflow: plan ticks from the
//! axis's current limits (or from explicit marks), merge any caller-forced
//! marks, format the labels, and push everything to the axis. Soft-limit
//! helpers widen or clamp the visible range without ever shrinking it
//! past existing data.

use crate::scale::ticks::{compute_ticks, force_insert_ticks};
use crate::scale::transform::{scale_values, TransformKind};
use crate::Result;

/// External chart-axis collaborator.
///
/// The library only ever queries current limits and pushes tick positions,
/// tick labels, and adjusted limits; it never reads any other axis state.
pub trait Axis {
    /// Current visible x extent in axis-scaled space
    fn x_limits(&self) -> (f64, f64);
    /// Current visible y extent in axis-scaled space
    fn y_limits(&self) -> (f64, f64);
    fn set_x_limits(&mut self, min: f64, max: f64);
    fn set_y_limits(&mut self, min: f64, max: f64);
    fn set_x_ticks(&mut self, positions: Vec<f64>);
    fn set_y_ticks(&mut self, positions: Vec<f64>);
    fn set_x_tick_labels(&mut self, labels: Vec<String>, rotation: f64);
    fn set_y_tick_labels(&mut self, labels: Vec<String>, rotation: f64);
}

/// Options controlling tick planning and label application
#[derive(Debug, Clone)]
pub struct TickOptions {
    /// Minimum desired number of ticks
    pub kmin: usize,
    /// Maximum desired number of ticks
    pub kmax: usize,
    /// The axis's own coordinate transform
    pub scale: TransformKind,
    /// Transform deciding the increment between consecutive tick labels
    pub spacing: TransformKind,
    /// Explicit tick label values; when set, planning is skipped entirely
    pub tick_marks: Option<Vec<f64>>,
    /// Label values the caller insists on including in the planned set
    pub force_marks: Option<Vec<f64>>,
    /// Label rotation in degrees
    pub rotation: f64,
    /// Custom label formatter; defaults to trailing-zero trimming
    pub formatter: Option<fn(f64) -> String>,
}

impl Default for TickOptions {
    fn default() -> Self {
        Self {
            kmin: 2,
            kmax: 6,
            scale: TransformKind::Linear,
            spacing: TransformKind::Linear,
            tick_marks: None,
            force_marks: None,
            rotation: 0.0,
            formatter: None,
        }
    }
}

impl TickOptions {
    fn format(&self, label: f64) -> String {
        match self.formatter {
            Some(f) => f(label),
            None => format_label(label),
        }
    }

    /// Resolve (positions, labels) from the options and an axis extent.
    fn resolve(&self, limits: (f64, f64)) -> Result<(Vec<f64>, Vec<f64>)> {
        match &self.tick_marks {
            None => {
                let (x0, x1) = limits;
                let mut ticks =
                    compute_ticks(x0, x1, self.kmin, self.kmax, self.scale, self.spacing)?;
                if let Some(force) = &self.force_marks {
                    ticks = force_insert_ticks(&ticks, force, self.scale)?;
                }
                Ok((ticks.positions, ticks.labels))
            }
            Some(marks) => {
                let positions = scale_values(marks, self.scale)?;
                Ok((positions, marks.clone()))
            }
        }
    }
}

/// Plan and apply x-axis ticks.
///
/// When `options.tick_marks` is unset, the current x limits are read from
/// the axis and ticks are planned from them; otherwise the explicit marks
/// are used as labels and scaled for positions.
pub fn apply_x_ticks<A: Axis + ?Sized>(ax: &mut A, options: &TickOptions) -> Result<()> {
    let (positions, labels) = options.resolve(ax.x_limits())?;
    ax.set_x_ticks(positions);
    let formatted = labels.iter().map(|&l| options.format(l)).collect();
    ax.set_x_tick_labels(formatted, options.rotation);
    Ok(())
}

/// Plan and apply y-axis ticks. See [`apply_x_ticks`].
pub fn apply_y_ticks<A: Axis + ?Sized>(ax: &mut A, options: &TickOptions) -> Result<()> {
    let (positions, labels) = options.resolve(ax.y_limits())?;
    ax.set_y_ticks(positions);
    let formatted = labels.iter().map(|&l| options.format(l)).collect();
    ax.set_y_tick_labels(formatted, options.rotation);
    Ok(())
}

/// Widen the x limits to include `[xmin, xmax]`, never shrinking them.
pub fn set_soft_xlim<A: Axis + ?Sized>(
    ax: &mut A,
    xmin: f64,
    xmax: f64,
    scale: TransformKind,
) -> Result<()> {
    let (x0, x1) = ax.x_limits();
    let scaled = scale_values(&[xmin, xmax], scale)?;
    ax.set_x_limits(x0.min(scaled[0]), x1.max(scaled[1]));
    Ok(())
}

/// Widen the y limits to include `[ymin, ymax]`, never shrinking them.
pub fn set_soft_ylim<A: Axis + ?Sized>(
    ax: &mut A,
    ymin: f64,
    ymax: f64,
    scale: TransformKind,
) -> Result<()> {
    let (y0, y1) = ax.y_limits();
    let scaled = scale_values(&[ymin, ymax], scale)?;
    ax.set_y_limits(y0.min(scaled[0]), y1.max(scaled[1]));
    Ok(())
}

/// Replace the upper x limit, keeping the lower one.
pub fn set_xmax<A: Axis + ?Sized>(ax: &mut A, xmax: f64, scale: TransformKind) -> Result<()> {
    let (x0, _) = ax.x_limits();
    let scaled = scale_values(&[xmax], scale)?;
    ax.set_x_limits(x0, scaled[0]);
    Ok(())
}

/// Replace the lower x limit, keeping the upper one.
pub fn set_xmin<A: Axis + ?Sized>(ax: &mut A, xmin: f64, scale: TransformKind) -> Result<()> {
    let (_, x1) = ax.x_limits();
    let scaled = scale_values(&[xmin], scale)?;
    ax.set_x_limits(scaled[0], x1);
    Ok(())
}

/// Replace the upper y limit, keeping the lower one.
pub fn set_ymax<A: Axis + ?Sized>(ax: &mut A, ymax: f64, scale: TransformKind) -> Result<()> {
    let (y0, _) = ax.y_limits();
    let scaled = scale_values(&[ymax], scale)?;
    ax.set_y_limits(y0, scaled[0]);
    Ok(())
}

/// Replace the lower y limit, keeping the upper one.
pub fn set_ymin<A: Axis + ?Sized>(ax: &mut A, ymin: f64, scale: TransformKind) -> Result<()> {
    let (_, y1) = ax.y_limits();
    let scaled = scale_values(&[ymin], scale)?;
    ax.set_y_limits(scaled[0], y1);
    Ok(())
}

/// Format a tick label for display (remove trailing zeros for integers)
fn format_label(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}
