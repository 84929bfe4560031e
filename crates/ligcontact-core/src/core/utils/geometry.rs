use nalgebra::{Point3, Vector3};

/// Cross products with a norm below this are treated as collinear.
pub const DEGENERATE_NORMAL_EPSILON: f64 = 1e-6;

pub fn distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    (a - b).norm()
}

/// Arithmetic mean of a set of points, or `None` for an empty set.
pub fn centroid(points: &[Point3<f64>]) -> Option<Point3<f64>> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Some(Point3::from(sum / points.len() as f64))
}

/// Unit normal of the plane spanned by the first three points.
///
/// Falls back to +Z when fewer than three points are given or the points are
/// (nearly) collinear.
pub fn plane_normal(points: &[Point3<f64>]) -> Vector3<f64> {
    if points.len() < 3 {
        return Vector3::z();
    }
    let v1 = points[1] - points[0];
    let v2 = points[2] - points[0];
    let normal = v1.cross(&v2);
    let norm = normal.norm();
    if norm < DEGENERATE_NORMAL_EPSILON {
        Vector3::z()
    } else {
        normal / norm
    }
}

/// Angle between two plane normals in degrees, folded into [0, 90].
///
/// Normals have no preferred orientation, so `acos(|n1 . n2|)` is used.
pub fn normal_angle_degrees(n1: &Vector3<f64>, n2: &Vector3<f64>) -> f64 {
    n1.dot(n2).abs().clamp(0.0, 1.0).acos().to_degrees()
}
