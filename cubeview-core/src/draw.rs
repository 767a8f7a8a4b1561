/// Line drawing surface consumed by the frame pipeline
use crate::geometry::FaceGroup;
use crate::transform::Pt2;

/// RGB colour with components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Colour {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Colour {
    pub const BACK: Colour = Colour::new(0.9, 0.2, 0.2);
    pub const FRONT: Colour = Colour::new(0.2, 0.8, 0.3);
    pub const SIDE: Colour = Colour::new(0.3, 0.4, 0.95);
    pub const BORDER: Colour = Colour::new(0.1, 0.1, 0.1);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn for_group(group: FaceGroup) -> Self {
        match group {
            FaceGroup::Back => Self::BACK,
            FaceGroup::Front => Self::FRONT,
            FaceGroup::Side => Self::SIDE,
        }
    }

    /// Components scaled to 0..=255
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        let byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (byte(self.r), byte(self.g), byte(self.b))
    }
}

/// A 2D line drawing session.
///
/// One frame is `begin`, any number of `set_colour`/`draw_line` calls,
/// `complete`, then `swap_buffers`.
pub trait LineCanvas {
    fn begin(&mut self, width: u32, height: u32);
    fn set_colour(&mut self, colour: Colour);
    fn draw_line(&mut self, p: Pt2, q: Pt2);
    fn complete(&mut self);
    fn swap_buffers(&mut self);
}

/// One line as it reached the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawnLine {
    pub colour: Colour,
    pub p: Pt2,
    pub q: Pt2,
}

/// Canvas that keeps the emitted lines instead of drawing them
#[derive(Debug, Default)]
pub struct FrameRecorder {
    colour: Option<Colour>,
    pending: Vec<DrawnLine>,
    frames: Vec<Vec<DrawnLine>>,
    open: bool,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames that went through `swap_buffers`, oldest first
    pub fn frames(&self) -> &[Vec<DrawnLine>] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&[DrawnLine]> {
        self.frames.last().map(Vec::as_slice)
    }
}

impl LineCanvas for FrameRecorder {
    fn begin(&mut self, _width: u32, _height: u32) {
        self.pending.clear();
        self.open = true;
    }

    fn set_colour(&mut self, colour: Colour) {
        self.colour = Some(colour);
    }

    fn draw_line(&mut self, p: Pt2, q: Pt2) {
        if !self.open {
            log::warn!("line drawn outside a draw session was dropped");
            return;
        }
        self.pending.push(DrawnLine {
            colour: self.colour.unwrap_or(Colour::BORDER),
            p,
            q,
        });
    }

    fn complete(&mut self) {
        self.open = false;
    }

    fn swap_buffers(&mut self) {
        self.frames.push(std::mem::take(&mut self.pending));
    }
}
