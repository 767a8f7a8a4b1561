/// Per-frame vertex pipeline: model, view, projection, divide, screen mapping,
/// edge assembly and clipping
use crate::clip::clip_segments;
use crate::controller::SceneState;
use crate::draw::{Colour, LineCanvas};
use crate::error::{Result, ViewerError};
use crate::geometry::{CubeModel, Segment, ViewportWalls};
use crate::transform::{Pt2, Pt3, Transform};

/// Camera-space depths closer to zero than this cannot be divided by
const MIN_DIVIDE_DEPTH: f64 = 1e-9;

/// Output of one render pass
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Screen position of each cube vertex before clipping
    pub vertices: [Pt2; CubeModel::VERTEX_COUNT],
    /// Camera-space depth of each vertex, recorded before projection
    pub depths: [f64; CubeModel::VERTEX_COUNT],
    /// Cube edges after clipping, drawable or not
    pub segments: [Segment; CubeModel::EDGE_COUNT],
    /// Viewport border rectangle
    pub border: [(Pt2, Pt2); 4],
}

impl Frame {
    pub fn visible_segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| s.draw)
    }
}

/// Run the vertex pipeline for a `width` x `height` viewport.
///
/// X and Y are divided by the camera-space Z recorded before projection, not by
/// the projected W, and the depth planes are compared against that same Z.
pub fn render_frame(
    scene: &SceneState,
    walls: &ViewportWalls,
    width: u32,
    height: u32,
) -> Result<Frame> {
    if width == 0 || height == 0 {
        return Err(ViewerError::EmptyViewport { width, height });
    }
    let (w, h) = (width as f64, height as f64);
    let projection = scene.lens.projection_matrix(w / h)?;
    let screen = Transform::screen_scale(w, h);

    let mut vertices = [Pt2::origin(); CubeModel::VERTEX_COUNT];
    let mut depths = [0.0; CubeModel::VERTEX_COUNT];
    for (index, vertex) in CubeModel::vertices().iter().enumerate() {
        let world = Transform::apply_point(&scene.model, vertex);
        let camera = Transform::apply_point(&scene.view, &world);
        let z = camera.z;
        if z.abs() < MIN_DIVIDE_DEPTH {
            return Err(ViewerError::PerspectiveDivideByZero { index, z });
        }
        let projected = Transform::apply_point(&projection, &camera);
        let divided = Pt3::new(projected.x / z, projected.y / z, projected.z);
        let pixel = Transform::apply_point(&screen, &divided);
        if !(z.is_finite() && pixel.x.is_finite() && pixel.y.is_finite()) {
            return Err(ViewerError::NonFiniteVertex { index });
        }

        vertices[index] = Pt2::new(pixel.x, pixel.y);
        depths[index] = z;
    }

    let mut segments = CubeModel::EDGES.map(|(a, b, group)| {
        Segment::new(vertices[a], vertices[b], depths[a], depths[b], group)
    });
    clip_segments(&mut segments, walls, scene.lens.near, scene.lens.far);

    log::trace!(
        "frame {}x{}: {} of {} edges visible",
        width,
        height,
        segments.iter().filter(|s| s.draw).count(),
        segments.len()
    );

    Ok(Frame {
        vertices,
        depths,
        segments,
        border: walls.border(),
    })
}

/// Send a frame to the canvas as one draw session
pub fn emit_frame<C: LineCanvas + ?Sized>(frame: &Frame, canvas: &mut C, width: u32, height: u32) {
    canvas.begin(width, height);
    for segment in frame.visible_segments() {
        canvas.set_colour(Colour::for_group(segment.group));
        canvas.draw_line(segment.a, segment.b);
    }
    canvas.set_colour(Colour::BORDER);
    for (p, q) in frame.border {
        canvas.draw_line(p, q);
    }
    canvas.complete();
    canvas.swap_buffers();
}
