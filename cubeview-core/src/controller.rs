/// Mouse-drag transform controller.
///
/// Every motion event becomes one incremental update of the scene by a pure
/// handler selected from the active `Mode`. Handlers take the previous
/// `SceneState` and return the next one, so nothing here touches the viewer.
use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ViewerError};
use crate::projection::{Camera, Lens};
use crate::transform::{Mat4, Pt2, RotationPlane, Transform};

/// Pixels of horizontal drag per unit of translation, scale or fov change
pub const DRAG_DIVISOR: f64 = 10.0;

/// Interaction mode selecting which handler a drag runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    ViewRotate,
    ViewTranslate,
    ViewPerspective,
    ModelRotate,
    ModelTranslate,
    ModelScale,
    Viewport,
}

impl Mode {
    pub const ALL: [Mode; 7] = [
        Mode::ViewRotate,
        Mode::ViewTranslate,
        Mode::ViewPerspective,
        Mode::ModelRotate,
        Mode::ModelTranslate,
        Mode::ModelScale,
        Mode::Viewport,
    ];

    /// Human-readable name shown in the mode label
    pub fn name(&self) -> &'static str {
        match self {
            Mode::ViewRotate => "View Rotate",
            Mode::ViewTranslate => "View Translate",
            Mode::ViewPerspective => "View Perspective",
            Mode::ModelRotate => "Model Rotate",
            Mode::ModelTranslate => "Model Translate",
            Mode::ModelScale => "Model Scale",
            Mode::Viewport => "Viewport",
        }
    }

    /// Identifier used in event scripts
    pub fn ident(&self) -> &'static str {
        match self {
            Mode::ViewRotate => "view_rotate",
            Mode::ViewTranslate => "view_translate",
            Mode::ViewPerspective => "view_perspective",
            Mode::ModelRotate => "model_rotate",
            Mode::ModelTranslate => "model_translate",
            Mode::ModelScale => "model_scale",
            Mode::Viewport => "viewport",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.ident() == s)
            .ok_or_else(|| format!("unknown mode '{}'", s))
    }
}

/// Mouse buttons 1, 2 and 3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    One,
    Two,
    Three,
}

impl Button {
    pub const ALL: [Button; 3] = [Button::One, Button::Two, Button::Three];

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Button::One),
            2 => Some(Button::Two),
            3 => Some(Button::Three),
            _ => None,
        }
    }

    pub fn id(&self) -> u8 {
        self.index() as u8 + 1
    }

    fn index(&self) -> usize {
        match self {
            Button::One => 0,
            Button::Two => 1,
            Button::Three => 2,
        }
    }

    /// World axis this button drives for translation and scaling: x, y, z
    pub fn axis(&self) -> usize {
        self.index()
    }

    /// Plane this button rotates in
    pub fn rotation_plane(&self) -> RotationPlane {
        match self {
            Button::One => RotationPlane::YZ,
            Button::Two => RotationPlane::XY,
            Button::Three => RotationPlane::XZ,
        }
    }
}

/// Held buttons and the last cursor sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseState {
    held: [bool; 3],
    pub last: Pt2,
}

impl Default for MouseState {
    fn default() -> Self {
        Self {
            held: [false; 3],
            last: Pt2::origin(),
        }
    }
}

impl MouseState {
    pub fn press(&mut self, button: Button, at: Pt2) {
        self.held[button.index()] = true;
        self.last = at;
    }

    pub fn release(&mut self, button: Button) {
        self.held[button.index()] = false;
    }

    pub fn is_held(&self, button: Button) -> bool {
        self.held[button.index()]
    }

    /// Held buttons in order 1, 2, 3
    pub fn held(&self) -> impl Iterator<Item = Button> + '_ {
        Button::ALL.into_iter().filter(|b| self.is_held(*b))
    }
}

/// Everything a drag can change
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneState {
    pub model: Mat4,
    pub view: Mat4,
    pub camera: Camera,
    pub lens: Lens,
}

impl SceneState {
    pub fn new(camera: Camera, lens: Lens) -> Result<Self> {
        Ok(Self {
            model: Mat4::identity(),
            view: camera.view_matrix()?,
            camera,
            lens,
        })
    }
}

/// Parameters of one motion event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    /// Horizontal cursor movement since the previous sample
    pub dx: f64,
    /// Viewport width in pixels, used to scale rotation angles
    pub viewport_width: f64,
}

impl Drag {
    fn step(&self) -> f64 {
        self.dx / DRAG_DIVISOR
    }

    /// One full turn per viewport width of drag, after the divisor
    fn angle(&self) -> f64 {
        self.step() / (self.viewport_width / TAU)
    }
}

/// Apply one drag to `state` under `mode`, once per held button.
///
/// Fails with [`ViewerError::InvalidDrag`] unless `dx` is finite and the viewport
/// has a positive width.
pub fn apply_drag(
    state: &SceneState,
    mode: Mode,
    buttons: impl IntoIterator<Item = Button>,
    drag: Drag,
) -> Result<SceneState> {
    if !drag.dx.is_finite() || !(drag.viewport_width.is_finite() && drag.viewport_width > 0.0) {
        return Err(ViewerError::InvalidDrag {
            dx: drag.dx,
            viewport_width: drag.viewport_width,
        });
    }
    let mut next = *state;
    for button in buttons {
        next = match mode {
            Mode::ModelTranslate => model_translate(&next, button, drag),
            Mode::ModelScale => model_scale(&next, button, drag),
            Mode::ModelRotate => model_rotate(&next, button, drag),
            Mode::ViewTranslate => view_translate(&next, button, drag)?,
            Mode::ViewRotate => view_rotate(&next, button, drag)?,
            Mode::ViewPerspective => view_perspective(&next, button, drag),
            Mode::Viewport => next,
        };
    }
    Ok(next)
}

fn model_translate(state: &SceneState, button: Button, drag: Drag) -> SceneState {
    let mut next = *state;
    next.model[(button.axis(), 3)] -= drag.step();
    next
}

/// Scale factor for a drag of `s` whole pixels (`dx / 10 * 10`).
///
/// Drags of one pixel or more to the right have no effect. A motion with a held
/// button but no horizontal movement has `s = 0` and grows the axis by 1.1.
pub fn scale_factor(s: f64) -> Option<f64> {
    if (0.0..1.0).contains(&s) {
        Some(1.1)
    } else if s > -1.0 && s <= 0.0 {
        Some(0.5)
    } else if s < 0.0 {
        Some(-1.0 / s)
    } else {
        None
    }
}

fn model_scale(state: &SceneState, button: Button, drag: Drag) -> SceneState {
    let mut next = *state;
    if let Some(factor) = scale_factor(drag.step() * DRAG_DIVISOR) {
        let axis = button.axis();
        next.model[(axis, axis)] *= factor;
    }
    next
}

fn model_rotate(state: &SceneState, button: Button, drag: Drag) -> SceneState {
    let rotation = Transform::rotation(button.rotation_plane(), drag.angle());
    SceneState {
        model: state.model * rotation,
        ..*state
    }
}

fn view_translate(state: &SceneState, button: Button, drag: Drag) -> Result<SceneState> {
    let mut next = *state;
    next.camera.look_from[button.axis()] -= drag.step();
    next.view = next.camera.view_matrix()?;
    Ok(next)
}

/// Rotates the camera about the world origin rather than the object
fn view_rotate(state: &SceneState, button: Button, drag: Drag) -> Result<SceneState> {
    let rotation = Transform::rotation(button.rotation_plane(), drag.angle());
    Ok(SceneState {
        view: Transform::invert(&rotation)? * state.view,
        ..*state
    })
}

fn view_perspective(state: &SceneState, button: Button, drag: Drag) -> SceneState {
    let mut next = *state;
    let lens = &mut next.lens;
    match button {
        Button::One => lens.fov = (lens.fov + drag.step()).clamp(Lens::MIN_FOV, Lens::MAX_FOV),
        Button::Two => lens.near += drag.step(),
        Button::Three => lens.far += drag.step(),
    }
    next
}
