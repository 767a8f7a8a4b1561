/// Camera basis and perspective projection
use crate::error::{Result, ViewerError};
use crate::transform::{Mat4, Pt3, Transform, Vec3};

/// Camera placement in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub look_from: Pt3,
    pub look_at: Pt3,
    pub up: Vec3,
}

impl Camera {
    pub fn new(look_from: Pt3, look_at: Pt3, up: Vec3) -> Self {
        Self {
            look_from,
            look_at,
            up,
        }
    }

    /// Build the view matrix from the camera basis.
    ///
    /// Columns 0-2 of the first three rows hold the right, up and forward axes and
    /// column 3 holds `look_from`. The fourth row is all zeros. This is the camera
    /// frame itself, not the world-to-camera inverse a textbook look-at produces;
    /// the projection and depth clipping downstream are tuned to this layout.
    pub fn view_matrix(&self) -> Result<Mat4> {
        let forward = Transform::normalize(&(self.look_at - self.look_from)).map_err(|_| {
            ViewerError::CoincidentEyeAndTarget {
                x: self.look_from.x,
                y: self.look_from.y,
                z: self.look_from.z,
            }
        })?;
        let right = Transform::normalize(&Transform::cross(&self.up, &forward)).map_err(|_| {
            ViewerError::DegenerateCameraBasis {
                x: self.up.x,
                y: self.up.y,
                z: self.up.z,
            }
        })?;
        let up = Transform::normalize(&Transform::cross(&forward, &right))?;

        let mut view = Mat4::zeros();
        for row in 0..3 {
            view[(row, 0)] = right[row];
            view[(row, 1)] = up[row];
            view[(row, 2)] = forward[row];
            view[(row, 3)] = self.look_from[row];
        }
        Ok(view)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Pt3::new(0.0, 0.0, 17.0),
            Pt3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 1.0, 0.0),
        )
    }
}

/// Field of view and depth planes.
///
/// `fov` goes straight into `tan(fov / 2)` with no unit conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lens {
    pub fov: f64,
    pub near: f64,
    pub far: f64,
}

impl Lens {
    pub const MIN_FOV: f64 = 5.0;
    pub const MAX_FOV: f64 = 160.0;

    pub fn new(fov: f64, near: f64, far: f64) -> Self {
        Self { fov, near, far }
    }

    pub fn projection_matrix(&self, aspect: f64) -> Result<Mat4> {
        perspective(self.fov, aspect, self.near, self.far)
    }
}

impl Default for Lens {
    fn default() -> Self {
        Self::new(31.6, 6.0, 16.0)
    }
}

/// Perspective matrix in the manner of `gluPerspective`, with a +1 in row 3.
///
/// An inverted or empty depth range is rejected rather than producing a
/// negative-span matrix.
pub fn perspective(fov: f64, aspect: f64, near: f64, far: f64) -> Result<Mat4> {
    if near >= far {
        return Err(ViewerError::InvalidDepthRange { near, far });
    }
    let half_tan = (fov / 2.0).tan();
    if half_tan == 0.0 || !half_tan.is_finite() {
        return Err(ViewerError::DegenerateFieldOfView(fov));
    }
    let cot = 1.0 / half_tan;

    let mut proj = Mat4::zeros();
    proj[(0, 0)] = cot / aspect;
    proj[(1, 1)] = cot;
    proj[(2, 2)] = (far + near) / (far - near);
    proj[(2, 3)] = -2.0 * far * near / (far - near);
    proj[(3, 2)] = 1.0;
    Ok(proj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_camera_basis_axes() {
        let camera = Camera::new(
            Pt3::origin(),
            Pt3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 1.0, 0.0),
        );
        let view = camera.view_matrix().unwrap();
        for row in 0..3 {
            assert_eq!(view[(row, 0)], [1.0, 0.0, 0.0][row]);
            assert_eq!(view[(row, 1)], [0.0, 1.0, 0.0][row]);
            assert_eq!(view[(row, 2)], [0.0, 0.0, 1.0][row]);
            assert_eq!(view[(row, 3)], 0.0);
        }
        assert_eq!(view.row(3).sum(), 0.0);
    }

    #[test]
    fn test_default_camera_view_matrix() {
        let view = Camera::default().view_matrix().unwrap();
        // Looking down -z flips the right axis
        assert_eq!(view[(0, 0)], -1.0);
        assert_eq!(view[(1, 1)], 1.0);
        assert_eq!(view[(2, 2)], -1.0);
        assert_eq!(view[(2, 3)], 17.0);
        for col in 0..4 {
            assert_eq!(view[(3, col)], 0.0);
        }
    }

    #[test]
    fn test_degenerate_camera() {
        let parallel = Camera::new(
            Pt3::origin(),
            Pt3::new(0.0, 3.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        );
        assert!(matches!(
            parallel.view_matrix(),
            Err(ViewerError::DegenerateCameraBasis { .. })
        ));

        let coincident = Camera::new(Pt3::origin(), Pt3::origin(), Vec3::y());
        assert!(matches!(
            coincident.view_matrix(),
            Err(ViewerError::CoincidentEyeAndTarget { .. })
        ));
    }

    #[test]
    fn test_perspective_entries() {
        let proj = perspective(FRAC_PI_2, 1.0, 1.0, 10.0).unwrap();
        assert!((proj[(0, 0)] - 1.0).abs() < 1e-12);
        assert!((proj[(1, 1)] - 1.0).abs() < 1e-12);
        assert!((proj[(2, 2)] - 11.0 / 9.0).abs() < 1e-12);
        assert!((proj[(2, 3)] + 20.0 / 9.0).abs() < 1e-12);
        assert_eq!(proj[(3, 2)], 1.0);
        assert_eq!(proj[(3, 3)], 0.0);
        assert_eq!(proj[(0, 1)], 0.0);
        assert_eq!(proj[(3, 0)], 0.0);
    }

    #[test]
    fn test_perspective_aspect() {
        let proj = perspective(FRAC_PI_2, 2.0, 1.0, 10.0).unwrap();
        assert!((proj[(0, 0)] - 0.5).abs() < 1e-12);
        assert!((proj[(1, 1)] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_perspective_rejects_inverted_range() {
        assert_eq!(
            perspective(1.0, 1.0, 10.0, 1.0),
            Err(ViewerError::InvalidDepthRange {
                near: 10.0,
                far: 1.0
            })
        );
        assert!(perspective(1.0, 1.0, 4.0, 4.0).is_err());
        assert_eq!(
            perspective(0.0, 1.0, 1.0, 2.0),
            Err(ViewerError::DegenerateFieldOfView(0.0))
        );
    }

    #[test]
    fn test_lens_defaults() {
        let lens = Lens::default();
        assert_eq!(lens.near, 6.0);
        assert_eq!(lens.far, 16.0);
        assert!(lens.projection_matrix(1.0).is_ok());
    }
}
