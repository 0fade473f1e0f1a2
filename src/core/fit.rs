//! Orthogonal (total least squares) plane fitting
//!
//! The fitted normal is the eigenvector of the smallest eigenvalue of the
//! scatter matrix of the centred points. This minimises the sum of squared
//! perpendicular distances, not the vertical (z) residuals.
//!
//! Normal sign convention: the returned normal always points to +Z
//! (`normal.z > 0`). For a vertical plane (`normal.z == 0`) the first
//! non-zero of `x`, `y` is made positive. The same input therefore always
//! yields the same normal.
//!
//! Collinear or coincident points leave the smallest eigenvalue repeated.
//! The normal is then taken as the most level direction in that eigenspace.

use nalgebra::{Matrix3, SymmetricEigen, Vector3};
use serde::Serialize;
use tracing::{debug, warn};

use crate::core::error::FitError;
use crate::core::orientation::{self, Orientation};
use crate::core::points::{Point3D, PointSet};

/// Minimum number of points for a well-defined plane
pub const MIN_POINTS: usize = 3;

/// Relative gap below which two eigenvalues count as equal
const TIE_TOLERANCE: f64 = 1e-12;

/// A plane given by a unit normal and any point on it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Plane {
    pub normal: Vector3<f64>,
    pub point: Point3D,
}

impl Plane {
    /// Build a plane, normalising `normal`
    pub fn new(normal: Vector3<f64>, point: Point3D) -> Self {
        Self {
            normal: normal.normalize(),
            point,
        }
    }

    /// The XY plane through the origin
    pub fn horizontal() -> Self {
        Self::new(Vector3::z(), Point3D::new(0.0, 0.0, 0.0))
    }

    /// Perpendicular distance from `p`, positive on the side the normal points to
    pub fn signed_distance(&self, p: &Point3D) -> f64 {
        self.normal.dot(&(p.coords() - self.point.coords()))
    }

    /// Height of the plane at (x, y), or `None` for a vertical plane
    pub fn z_at(&self, x: f64, y: f64) -> Option<f64> {
        let n = &self.normal;
        if n.z.abs() < f64::EPSILON {
            return None;
        }
        let p = &self.point;
        Some(p.z - (n.x * (x - p.x) + n.y * (y - p.y)) / n.z)
    }
}

/// Bounding box of the X and Y coordinates of a point set
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Span {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Span {
    fn of(points: &PointSet) -> Self {
        let mut span = Span {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        };
        for p in points {
            span.min_x = span.min_x.min(p.x);
            span.min_y = span.min_y.min(p.y);
            span.max_x = span.max_x.max(p.x);
            span.max_y = span.max_y.max(p.y);
        }
        span
    }

    /// Midpoint of the box
    pub fn centre(&self) -> (f64, f64) {
        (
            (self.max_x + self.min_x) / 2.0,
            (self.max_y + self.min_y) / 2.0,
        )
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }
}

/// Result of one plane fit. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitResult {
    /// Fitted plane through the centroid
    pub plane: Plane,

    /// Points the fit was computed from (after offset removal and scaling)
    pub points: PointSet,

    /// Tilt, direction and axis angles of the normal
    pub orientation: Orientation,

    /// Midpoint of the XY bounding box
    pub centre: (f64, f64),

    /// XY bounding box
    pub span: Span,
}

/// Configurable plane fitter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneFitter {
    remove_offset: bool,
    scale: [f64; 3],
}

impl Default for PlaneFitter {
    fn default() -> Self {
        Self {
            remove_offset: false,
            scale: [1.0, 1.0, 1.0],
        }
    }
}

impl PlaneFitter {
    pub fn new(remove_offset: bool) -> Self {
        Self {
            remove_offset,
            ..Self::default()
        }
    }

    /// Set per-axis scale factors, applied after offset removal
    pub fn with_scale(mut self, scale: [f64; 3]) -> Result<Self, FitError> {
        for (axis, value) in ['X', 'Y', 'Z'].into_iter().zip(scale) {
            if !value.is_finite() || value == 0.0 {
                return Err(FitError::InvalidScale { axis, value });
            }
        }
        self.scale = scale;
        Ok(self)
    }

    /// Points as they enter the fit: z relative to the first point when
    /// offset removal is on, then scaled per axis
    pub fn prepare(&self, points: &PointSet) -> PointSet {
        let z_offset = match (self.remove_offset, points.first()) {
            (true, Some(first)) => first.z,
            _ => 0.0,
        };
        let [sx, sy, sz] = self.scale;
        points
            .iter()
            .map(|p| Point3D::new(p.x * sx, p.y * sy, (p.z - z_offset) * sz))
            .collect()
    }

    /// Fit a plane to `points`
    pub fn fit(&self, points: &PointSet) -> Result<FitResult, FitError> {
        if points.len() < MIN_POINTS {
            return Err(FitError::InsufficientData {
                count: points.len(),
            });
        }

        let fit_points = self.prepare(points);
        let centroid = fit_points
            .centroid()
            .ok_or(FitError::InsufficientData { count: 0 })?;

        let scatter = fit_points.iter().fold(Matrix3::zeros(), |acc, p| {
            let d = p.coords() - centroid;
            acc + d * d.transpose()
        });

        let eigen = SymmetricEigen::new(scatter);
        let eigenvalues = eigen.eigenvalues;
        let smallest = eigenvalues.min();
        let largest = eigenvalues.max();
        let tolerance = TIE_TOLERANCE * largest.abs().max(f64::MIN_POSITIVE);
        let tied: Vec<usize> = (0..3)
            .filter(|&i| eigenvalues[i] - smallest <= tolerance)
            .collect();

        let lowest = eigen.eigenvectors.column(eigenvalues.imin()).into_owned();
        let normal = if tied.len() > 1 {
            warn!(
                points = fit_points.len(),
                "Plane fit is ill-conditioned (points may be collinear or coincident)"
            );
            most_level(&eigen.eigenvectors, &tied).unwrap_or(lowest)
        } else {
            lowest
        };
        let normal = canonical_sign(normal);
        let plane = Plane::new(normal, Point3D::from(centroid));

        debug!(
            points = fit_points.len(),
            remove_offset = self.remove_offset,
            centroid = ?[centroid.x, centroid.y, centroid.z],
            eigenvalues = ?[eigenvalues[0], eigenvalues[1], eigenvalues[2]],
            normal = ?[plane.normal.x, plane.normal.y, plane.normal.z],
            "Fitted plane"
        );

        let span = Span::of(&fit_points);
        Ok(FitResult {
            orientation: orientation::decompose(&plane.normal),
            plane,
            centre: span.centre(),
            span,
            points: fit_points,
        })
    }
}

/// Fit a plane with unit scale
pub fn fit_plane(points: &PointSet, remove_offset: bool) -> Result<FitResult, FitError> {
    PlaneFitter::new(remove_offset).fit(points)
}

/// Flip `n` so that it points to +Z (see module docs)
fn canonical_sign(n: Vector3<f64>) -> Vector3<f64> {
    let flip = if n.z != 0.0 {
        n.z < 0.0
    } else if n.x != 0.0 {
        n.x < 0.0
    } else {
        n.y < 0.0
    };
    if flip {
        -n
    } else {
        n
    }
}

/// Unit direction closest to +Z inside the span of the tied eigenvectors
///
/// When the smallest eigenvalue is repeated every normal in that subspace
/// fits equally well; this picks the most level plane through the points.
/// `None` when the subspace is horizontal (the points lie on a vertical line).
fn most_level(eigenvectors: &Matrix3<f64>, tied: &[usize]) -> Option<Vector3<f64>> {
    let projected = tied.iter().fold(Vector3::zeros(), |acc, &i| {
        let v = eigenvectors.column(i).into_owned();
        acc + v * v.z
    });
    projected.try_normalize(f64::EPSILON)
}
