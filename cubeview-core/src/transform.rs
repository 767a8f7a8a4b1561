/// 4x4 matrix algebra and the incremental transforms built from it
use nalgebra::{Matrix4, Point2, Point3, Vector3, Vector4};

use crate::error::{Result, ViewerError};

/// Row-major 4x4 matrix, indexed `m[(row, col)]`
pub type Mat4 = Matrix4<f64>;
/// Point in object, world or camera space (implicit w = 1)
pub type Pt3 = Point3<f64>;
/// Direction in object, world or camera space (implicit w = 0)
pub type Vec3 = Vector3<f64>;
/// Screen-space coordinate in pixels
pub type Pt2 = Point2<f64>;

/// Shortest vector length accepted by [`Transform::normalize`]
const MIN_NORM: f64 = 1e-12;

/// Plane an incremental rotation turns in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationPlane {
    /// Rotation about the X axis
    YZ,
    /// Rotation about the Z axis
    XY,
    /// Rotation about the Y axis
    XZ,
}

/// Transform builder and homogeneous helpers
pub struct Transform;

impl Transform {
    pub fn identity() -> Mat4 {
        Mat4::identity()
    }

    /// Apply `m` to a point with w = 1.
    ///
    /// Only the first three rows take part. The fourth row is never read, so there is
    /// no homogeneous divide here; callers divide explicitly where they need one.
    pub fn apply_point(m: &Mat4, p: &Pt3) -> Pt3 {
        let h = m * Vector4::new(p.x, p.y, p.z, 1.0);
        Pt3::new(h.x, h.y, h.z)
    }

    /// Apply `m` to a direction with w = 0 (translation column ignored)
    pub fn apply_vector(m: &Mat4, v: &Vec3) -> Vec3 {
        let h = m * Vector4::new(v.x, v.y, v.z, 0.0);
        Vec3::new(h.x, h.y, h.z)
    }

    /// True multiplicative inverse
    pub fn invert(m: &Mat4) -> Result<Mat4> {
        m.try_inverse().ok_or(ViewerError::SingularMatrix)
    }

    pub fn transpose(m: &Mat4) -> Mat4 {
        m.transpose()
    }

    /// Divide `v` by its Euclidean length. Zero-length input is an error.
    pub fn normalize(v: &Vec3) -> Result<Vec3> {
        v.try_normalize(MIN_NORM).ok_or(ViewerError::ZeroLengthVector)
    }

    pub fn dot(a: &Vec3, b: &Vec3) -> f64 {
        a.dot(b)
    }

    pub fn cross(a: &Vec3, b: &Vec3) -> Vec3 {
        a.cross(b)
    }

    /// Rotation by `angle` radians within `plane`
    #[rustfmt::skip]
    pub fn rotation(plane: RotationPlane, angle: f64) -> Mat4 {
        let (s, c) = angle.sin_cos();
        match plane {
            RotationPlane::YZ => Mat4::new(
                1.0, 0.0, 0.0, 0.0,
                0.0, c, -s, 0.0,
                0.0, s, c, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ),
            RotationPlane::XY => Mat4::new(
                c, -s, 0.0, 0.0,
                s, c, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ),
            RotationPlane::XZ => Mat4::new(
                c, 0.0, s, 0.0,
                0.0, 1.0, 0.0, 0.0,
                -s, 0.0, c, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ),
        }
    }

    /// Create a translation matrix
    pub fn translation(x: f64, y: f64, z: f64) -> Mat4 {
        Mat4::new_translation(&Vec3::new(x, y, z))
    }

    /// Map the [-1, 1] square onto a `width` x `height` pixel viewport.
    ///
    /// Scales by the half extents and moves the origin to the viewport centre.
    #[rustfmt::skip]
    pub fn screen_scale(width: f64, height: f64) -> Mat4 {
        let (hw, hh) = (width / 2.0, height / 2.0);
        Mat4::new(
            hw, 0.0, 0.0, hw,
            0.0, hh, 0.0, hh,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }
}
