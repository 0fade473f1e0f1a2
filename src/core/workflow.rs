//! Absolute and reference-relative fitting of a data set
//!
//! Absolute mode fits the data directly. Reference-relative mode first fits
//! the reference set, replaces each data point's z by its signed distance from
//! the reference plane and fits those residuals, so only the tilt not already
//! explained by the reference surface remains.
//!
//! In both modes the data plane's own residuals are computed and fitted again
//! (the "diff" plane) to expose curvature or twist left after the first fit.

use serde::Serialize;
use tracing::{debug, info};

use crate::core::deviation::{deviations, DeviationReport};
use crate::core::error::FitError;
use crate::core::fit::{FitResult, PlaneFitter};
use crate::core::points::PointSet;

/// Inputs that steer one computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitOptions {
    /// Zero each fitted set at its own first point
    pub remove_z_offset: bool,

    /// Fit the data relative to the reference plane
    pub use_reference_plane: bool,

    /// Plot the diff plane instead of the data plane
    pub show_diff_plane: bool,

    /// Also plot the reference plane
    pub show_ref_plane: bool,

    /// Per-axis scale applied to both input sets before fitting
    pub scale: [f64; 3],
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            remove_z_offset: false,
            use_reference_plane: false,
            show_diff_plane: false,
            show_ref_plane: false,
            scale: [1.0, 1.0, 1.0],
        }
    }
}

/// Which results the plot sink should draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlotSelection {
    Data,
    DataWithReference,
    Diff,
    DiffWithReference,
}

impl From<&FitOptions> for PlotSelection {
    fn from(options: &FitOptions) -> Self {
        match (options.show_diff_plane, options.show_ref_plane) {
            (false, false) => PlotSelection::Data,
            (false, true) => PlotSelection::DataWithReference,
            (true, false) => PlotSelection::Diff,
            (true, true) => PlotSelection::DiffWithReference,
        }
    }
}

impl std::fmt::Display for PlotSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlotSelection::Data => write!(f, "data"),
            PlotSelection::DataWithReference => write!(f, "data+ref"),
            PlotSelection::Diff => write!(f, "diff"),
            PlotSelection::DiffWithReference => write!(f, "diff+ref"),
        }
    }
}

/// Everything one computation produces
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowResult {
    pub options: FitOptions,

    /// Plane fitted to the reference set
    pub reference: FitResult,

    /// Data deviations from the reference plane (reference-relative mode only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative: Option<DeviationReport>,

    /// Plane fitted to the data (or to its deviations from the reference)
    pub data: FitResult,

    /// Deviations of the fitted data points from the data plane
    pub residuals: DeviationReport,

    /// Plane fitted to the residuals
    pub diff: FitResult,

    pub plot: PlotSelection,
}

impl WorkflowResult {
    /// Primary result to plot and, optionally, the reference overlaid on it
    pub fn plot_targets(&self) -> (&FitResult, Option<&FitResult>) {
        match self.plot {
            PlotSelection::Data => (&self.data, None),
            PlotSelection::DataWithReference => (&self.data, Some(&self.reference)),
            PlotSelection::Diff => (&self.diff, None),
            PlotSelection::DiffWithReference => (&self.diff, Some(&self.reference)),
        }
    }
}

/// Run one computation over the reference and data sets
pub fn compute(
    reference: &PointSet,
    data: &PointSet,
    options: &FitOptions,
) -> Result<WorkflowResult, FitError> {
    let scaler = PlaneFitter::default().with_scale(options.scale)?;
    let reference = scaler.prepare(reference);
    let data = scaler.prepare(data);

    let fitter = PlaneFitter::new(options.remove_z_offset);

    let reference_fit = fitter.fit(&reference)?;
    debug!(tilt = reference_fit.orientation.tilt, "Reference plane fitted");

    let (relative, data_fit) = if options.use_reference_plane {
        let relative = deviations(&data, &reference_fit.plane);
        let fit = fitter.fit(&relative.to_point_set())?;
        (Some(relative), fit)
    } else {
        (None, fitter.fit(&data)?)
    };

    let residuals = deviations(&data_fit.points, &data_fit.plane);
    let diff = fitter.fit(&residuals.to_point_set())?;

    info!(
        points = data_fit.points.len(),
        relative = options.use_reference_plane,
        tilt = data_fit.orientation.tilt,
        direction = data_fit.orientation.direction,
        rms = residuals.stats.rms,
        "Computed data plane"
    );

    Ok(WorkflowResult {
        options: *options,
        reference: reference_fit,
        relative,
        data: data_fit,
        residuals,
        diff,
        plot: PlotSelection::from(options),
    })
}
