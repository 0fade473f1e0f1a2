//! Measured points and the plain-text point format
//!
//! One point per line as `x y z` (millimetres), whitespace separated.
//! Blank lines and lines starting with `#` are ignored.

use miette::NamedSource;
use nalgebra::Vector3;
use serde::Serialize;

use crate::core::error::ParseError;

/// Reference text used when no reference source is given
pub const DEFAULT_REFERENCE: &str = "# Default reference plane\n0 0 0\n1 0 0\n1 1 0\n";

/// A single measured point in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Position as a column vector
    pub fn coords(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl From<Vector3<f64>> for Point3D {
    fn from(v: Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<[f64; 3]> for Point3D {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

/// Ordered collection of points, in input order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PointSet {
    points: Vec<Point3D>,
}

impl PointSet {
    pub fn new(points: Vec<Point3D>) -> Self {
        Self { points }
    }

    /// Parse point text, using `name` to label errors
    pub fn parse_named(text: &str, name: &str) -> Result<Self, ParseError> {
        let mut points = Vec::new();
        let mut offset = 0;

        for (idx, raw_line) in text.split_inclusive('\n').enumerate() {
            let line_start = offset;
            offset += raw_line.len();

            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fail = |message: String| {
                let lead = raw_line.len() - raw_line.trim_start().len();
                ParseError {
                    line: idx + 1,
                    message,
                    src: NamedSource::new(name, text.to_string()),
                    span: (line_start + lead, line.len()).into(),
                }
            };

            let mut coords = [0.0f64; 3];
            let mut count = 0;
            for token in line.split_whitespace() {
                let value: f64 = token
                    .parse()
                    .map_err(|_| fail(format!("'{}' is not a number", token)))?;
                if count < 3 {
                    coords[count] = value;
                }
                count += 1;
            }

            if count != 3 {
                return Err(fail(format!("expected 3 values (x y z), found {}", count)));
            }

            points.push(Point3D::from(coords));
        }

        Ok(Self { points })
    }

    /// Parse point text from an unnamed source
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        Self::parse_named(text, "<input>")
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Point3D> {
        self.points.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point3D> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[Point3D] {
        &self.points
    }

    /// Mean position of all points, or `None` for an empty set
    pub fn centroid(&self) -> Option<Vector3<f64>> {
        if self.points.is_empty() {
            return None;
        }
        let sum = self
            .points
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p.coords());
        Some(sum / self.points.len() as f64)
    }
}

impl FromIterator<Point3D> for PointSet {
    fn from_iter<I: IntoIterator<Item = Point3D>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point3D;
    type IntoIter = std::slice::Iter<'a, Point3D>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
