/// Error types for the viewer core
use thiserror::Error;

/// Result type for viewer operations
pub type Result<T> = std::result::Result<T, ViewerError>;

/// Errors raised by the transform and clip pipeline
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewerError {
    /// A vector with no length cannot be normalized
    #[error("cannot normalize a zero-length vector")]
    ZeroLengthVector,

    /// Matrix has no multiplicative inverse
    #[error("matrix is singular and has no inverse")]
    SingularMatrix,

    /// Camera eye and target coincide, so there is no view direction
    #[error("camera look-from and look-at are the same point ({x}, {y}, {z})")]
    CoincidentEyeAndTarget { x: f64, y: f64, z: f64 },

    /// Up vector is parallel to the view direction
    #[error("camera up vector ({x}, {y}, {z}) is parallel to the view direction")]
    DegenerateCameraBasis { x: f64, y: f64, z: f64 },

    /// Near plane is not in front of the far plane
    #[error("near plane {near} must be closer than far plane {far}")]
    InvalidDepthRange { near: f64, far: f64 },

    /// tan(fov / 2) vanishes, so the projection scale is infinite
    #[error("field of view {0} has no finite projection scale")]
    DegenerateFieldOfView(f64),

    /// Viewport has zero width or height
    #[error("viewport {width}x{height} has no area")]
    EmptyViewport { width: u32, height: u32 },

    /// A cube vertex sits on the camera plane and cannot be projected
    #[error("vertex {index} lies on the camera plane (camera-space z = {z})")]
    PerspectiveDivideByZero { index: usize, z: f64 },

    /// A cube vertex projected to NaN or infinity
    #[error("vertex {index} has no finite screen position")]
    NonFiniteVertex { index: usize },

    /// Drag distance or viewport width cannot produce a finite update
    #[error("drag of {dx} across a viewport {viewport_width} wide is not usable")]
    InvalidDrag { dx: f64, viewport_width: f64 },

    /// Event script could not be parsed
    #[error("script line {line}: {message}")]
    Script { line: usize, message: String },
}
