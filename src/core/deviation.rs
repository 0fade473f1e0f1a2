//! Signed deviations of points from a plane

use serde::Serialize;
use tracing::trace;

use crate::core::fit::Plane;
use crate::core::points::{Point3D, PointSet};

/// One point's deviation: `(x, y)` passed through, `dz` the signed distance
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Deviation {
    pub x: f64,
    pub y: f64,
    pub dz: f64,
}

/// Summary statistics of signed distances (mm)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DeviationStats {
    pub max: f64,
    pub min: f64,
    /// Population standard deviation about the mean distance
    pub rms: f64,
    /// Mean of absolute distances
    pub mad: f64,
}

impl DeviationStats {
    /// Statistics of `values`; all zero for an empty slice
    pub fn of(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let n = values.len() as f64;
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let mad = values.iter().map(|v| v.abs()).sum::<f64>() / n;

        Self {
            max,
            min,
            rms: variance.sqrt(),
            mad,
        }
    }
}

/// Per-point deviations from a plane, in input order, with statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviationReport {
    pub deviations: Vec<Deviation>,
    pub stats: DeviationStats,
}

impl DeviationReport {
    /// The deviations as points `(x, y, dz)`, ready to be fitted again
    pub fn to_point_set(&self) -> PointSet {
        self.deviations
            .iter()
            .map(|d| Point3D::new(d.x, d.y, d.dz))
            .collect()
    }

    pub fn distances(&self) -> Vec<f64> {
        self.deviations.iter().map(|d| d.dz).collect()
    }

    pub fn len(&self) -> usize {
        self.deviations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deviations.is_empty()
    }
}

/// Signed distance of every point in `points` from `plane`
pub fn deviations(points: &PointSet, plane: &Plane) -> DeviationReport {
    let deviations: Vec<Deviation> = points
        .iter()
        .map(|p| {
            let dz = plane.signed_distance(p);
            trace!(x = p.x, y = p.y, z = p.z, dz, "Point deviation");
            Deviation { x: p.x, y: p.y, dz }
        })
        .collect();

    let distances: Vec<f64> = deviations.iter().map(|d| d.dz).collect();
    DeviationReport {
        stats: DeviationStats::of(&distances),
        deviations,
    }
}
