/// Cubeview Core Library - transform, projection and clipping pipeline
///
/// This library holds the state and math behind an interactive wireframe cube
/// viewer: camera and projection matrices, the mouse-drag transform controller,
/// the per-frame vertex pipeline and the segment clipper. Drawing and labels are
/// delegated to whatever host embeds it.

pub mod clip;
pub mod controller;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod pipeline;
pub mod projection;
pub mod script;
pub mod transform;
pub mod viewer;

// Re-export commonly used types
pub use controller::{apply_drag, Button, Drag, Mode, MouseState, SceneState};
pub use draw::{Colour, DrawnLine, FrameRecorder, LineCanvas};
pub use error::{Result, ViewerError};
pub use geometry::{CubeModel, FaceGroup, Segment, ViewportWalls};
pub use pipeline::{emit_frame, render_frame, Frame};
pub use projection::{perspective, Camera, Lens};
pub use script::{parse_script, run_script, ScriptCommand};
pub use transform::{Mat4, Pt2, Pt3, RotationPlane, Transform, Vec3};
pub use viewer::{Labels, ViewDefaults, Viewer};
