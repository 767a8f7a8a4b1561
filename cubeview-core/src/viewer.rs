/// Viewer state block and the event surface the host UI drives
use crate::controller::{apply_drag, Button, Drag, Mode, MouseState, SceneState};
use crate::draw::LineCanvas;
use crate::error::{Result, ViewerError};
use crate::geometry::ViewportWalls;
use crate::pipeline::{emit_frame, render_frame, Frame};
use crate::projection::{Camera, Lens};
use crate::transform::Pt2;

/// Construction-time defaults, restored by [`Viewer::reset_view`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewDefaults {
    pub camera: Camera,
    pub lens: Lens,
    pub mode: Mode,
}

/// Text shown by the label collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub mode: String,
    pub near_far: String,
}

impl Labels {
    fn new(mode: Mode, lens: &Lens) -> Self {
        Self {
            mode: format!("Current Mode:\t{}", mode.name()),
            near_far: format!("Near Plane:\t{}\tFar Plane:\t{}", lens.near, lens.far),
        }
    }
}

/// Interactive cube viewer.
///
/// All state lives here and is only touched from the thread delivering input and
/// redraw events. Redraws are requested, not performed; the host polls
/// [`Viewer::take_redraw_request`] and calls [`Viewer::render`] when it suits it.
pub struct Viewer {
    defaults: ViewDefaults,
    scene: SceneState,
    mode: Mode,
    mouse: MouseState,
    width: u32,
    height: u32,
    walls: ViewportWalls,
    labels: Labels,
    redraw: bool,
}

impl Viewer {
    pub fn new(defaults: ViewDefaults, width: u32, height: u32) -> Result<Self> {
        let scene = SceneState::new(defaults.camera, defaults.lens)?;
        Ok(Self {
            defaults,
            scene,
            mode: defaults.mode,
            mouse: MouseState::default(),
            width,
            height,
            walls: ViewportWalls::new(width, height),
            labels: Labels::new(defaults.mode, &defaults.lens),
            redraw: true,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn walls(&self) -> &ViewportWalls {
        &self.walls
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Replace the scene outright, e.g. to set a lens outside the drag clamp
    pub fn set_scene(&mut self, scene: SceneState) {
        self.scene = scene;
        self.update_labels();
        self.invalidate();
    }

    pub fn set_mode(&mut self, mode: Mode) {
        log::debug!("mode {} -> {}", self.mode, mode);
        self.mode = mode;
        self.update_labels();
        self.invalidate();
    }

    /// Restore lens, model, camera and mode-independent state to the defaults
    pub fn reset_view(&mut self) -> Result<()> {
        self.scene = SceneState::new(self.defaults.camera, self.defaults.lens)?;
        self.walls = ViewportWalls::new(self.width, self.height);
        log::debug!("view reset at {}x{}", self.width, self.height);
        self.update_labels();
        self.invalidate();
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.walls = ViewportWalls::new(width, height);
        self.invalidate();
    }

    pub fn on_button_press(&mut self, button: Button, x: f64, y: f64) {
        log::trace!("button {} pressed at ({}, {})", button.id(), x, y);
        self.mouse.press(button, Pt2::new(x, y));
    }

    pub fn on_button_release(&mut self, button: Button, x: f64, y: f64) {
        log::trace!("button {} released at ({}, {})", button.id(), x, y);
        self.mouse.release(button);
    }

    /// Apply the active mode's handler to the drag since the last sample.
    ///
    /// On error the scene is left as it was; the cursor sample still advances.
    pub fn on_motion(&mut self, x: f64, y: f64) -> Result<()> {
        let drag = Drag {
            dx: x - self.mouse.last.x,
            viewport_width: self.width as f64,
        };
        self.mouse.last = Pt2::new(x, y);

        if self.mouse.held().next().is_none() {
            return Ok(());
        }
        if self.width == 0 || self.height == 0 {
            let err = ViewerError::EmptyViewport {
                width: self.width,
                height: self.height,
            };
            log::warn!("{} drag rejected: {}", self.mode, err);
            return Err(err);
        }
        match apply_drag(&self.scene, self.mode, self.mouse.held(), drag) {
            Ok(next) => {
                self.scene = next;
                if self.mode == Mode::ViewPerspective {
                    self.update_labels();
                }
                self.invalidate();
                Ok(())
            }
            Err(err) => {
                log::warn!("{} drag rejected: {}", self.mode, err);
                Err(err)
            }
        }
    }

    /// Render the current state and emit it to `canvas`
    pub fn render<C: LineCanvas + ?Sized>(&mut self, canvas: &mut C) -> Result<Frame> {
        self.redraw = false;
        let frame = render_frame(&self.scene, &self.walls, self.width, self.height).map_err(|err| {
            log::warn!("render failed: {}", err);
            err
        })?;
        emit_frame(&frame, canvas, self.width, self.height);
        Ok(frame)
    }

    /// Ask the host for a new frame. Repeated requests coalesce.
    pub fn invalidate(&mut self) {
        self.redraw = true;
    }

    /// Whether a redraw was requested since the last call, clearing the request
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    fn update_labels(&mut self) {
        self.labels = Labels::new(self.mode, &self.scene.lens);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::FrameRecorder;
    use crate::transform::Pt3;

    fn viewer() -> Viewer {
        Viewer::new(ViewDefaults::default(), 400, 300).unwrap()
    }

    fn drag(viewer: &mut Viewer, button: Button, from: f64, to: f64) -> Result<()> {
        viewer.on_button_press(button, from, 10.0);
        let result = viewer.on_motion(to, 10.0);
        viewer.on_button_release(button, to, 10.0);
        result
    }

    #[test]
    fn test_initial_state() {
        let v = viewer();
        assert_eq!(v.mode(), Mode::ViewRotate);
        assert_eq!(v.scene().lens, Lens::default());
        assert_eq!(v.labels().mode, "Current Mode:\tView Rotate");
        assert_eq!(v.labels().near_far, "Near Plane:\t6\tFar Plane:\t16");
        assert_eq!(v.walls(), &ViewportWalls::new(400, 300));
    }

    #[test]
    fn test_redraw_requests_coalesce() {
        let mut v = viewer();
        assert!(v.take_redraw_request());
        assert!(!v.take_redraw_request());
        v.set_mode(Mode::ModelScale);
        v.invalidate();
        assert!(v.take_redraw_request());
        assert!(!v.take_redraw_request());
    }

    #[test]
    fn test_motion_without_buttons_only_tracks_cursor() {
        let mut v = viewer();
        v.set_mode(Mode::ModelTranslate);
        let before = *v.scene();
        v.on_motion(50.0, 0.0).unwrap();
        v.on_motion(90.0, 0.0).unwrap();
        assert_eq!(*v.scene(), before);
    }

    #[test]
    fn test_motion_uses_previous_sample() {
        let mut v = viewer();
        v.set_mode(Mode::ModelTranslate);
        v.on_button_press(Button::One, 100.0, 0.0);
        v.on_motion(110.0, 0.0).unwrap();
        v.on_motion(130.0, 0.0).unwrap();
        assert!((v.scene().model[(0, 3)] + 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_perspective_drag_refreshes_labels() {
        let mut v = viewer();
        v.set_mode(Mode::ViewPerspective);
        assert_eq!(v.labels().mode, "Current Mode:\tView Perspective");
        drag(&mut v, Button::Two, 0.0, 20.0).unwrap();
        assert_eq!(v.labels().near_far, "Near Plane:\t8\tFar Plane:\t16");
        drag(&mut v, Button::Three, 0.0, -20.0).unwrap();
        assert_eq!(v.labels().near_far, "Near Plane:\t8\tFar Plane:\t14");
    }

    #[test]
    fn test_rejected_drag_keeps_scene() {
        let mut v = viewer();
        v.set_mode(Mode::ViewTranslate);
        // Move the eye onto the target at z = 1: 16 units, 160 pixels
        let before = *v.scene();
        let err = drag(&mut v, Button::Three, 0.0, 160.0).unwrap_err();
        assert!(matches!(err, ViewerError::CoincidentEyeAndTarget { .. }));
        assert_eq!(*v.scene(), before);
    }

    #[test]
    fn test_rejected_drag_still_advances_cursor() {
        let mut v = viewer();
        v.set_mode(Mode::ViewTranslate);
        v.on_button_press(Button::Three, 0.0, 10.0);
        assert!(v.on_motion(160.0, 10.0).is_err());
        assert_eq!(v.mouse.last.x, 160.0);

        // The next drag is measured from the rejected sample: 10 pixels, one unit
        v.on_motion(170.0, 10.0).unwrap();
        assert_eq!(v.scene().camera.look_from, Pt3::new(0.0, 0.0, 16.0));
    }

    #[test]
    fn test_drag_on_empty_viewport_rejected() {
        let mut v = viewer();
        let before = *v.scene();
        v.resize(0, 300);
        v.set_mode(Mode::ModelRotate);
        v.on_button_press(Button::One, 0.0, 10.0);
        assert_eq!(
            v.on_motion(20.0, 10.0),
            Err(ViewerError::EmptyViewport {
                width: 0,
                height: 300
            })
        );
        assert_eq!(*v.scene(), before);

        v.resize(400, 300);
        let frame = v.render(&mut FrameRecorder::new()).unwrap();
        assert!(frame.vertices.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn test_zero_motion_scale_drag_grows_axis() {
        let mut v = viewer();
        v.set_mode(Mode::ModelScale);
        v.on_button_press(Button::One, 50.0, 10.0);
        v.on_motion(50.0, 40.0).unwrap();
        assert!((v.scene().model[(0, 0)] - 1.1).abs() < 1e-12);
        v.on_motion(50.0, 80.0).unwrap();
        assert!((v.scene().model[(0, 0)] - 1.21).abs() < 1e-12);
        assert_eq!(v.scene().model[(1, 1)], 1.0);
    }

    #[test]
    fn test_set_scene_keeps_unclamped_fov() {
        let mut v = viewer();
        let mut scene = *v.scene();
        scene.lens.fov = 200.0;
        scene.lens.near = 7.0;
        v.set_scene(scene);
        assert_eq!(v.labels().near_far, "Near Plane:\t7\tFar Plane:\t16");

        v.render(&mut FrameRecorder::new()).unwrap();
        assert_eq!(v.scene().lens.fov, 200.0);

        v.set_mode(Mode::ViewPerspective);
        drag(&mut v, Button::One, 0.0, 10.0).unwrap();
        assert_eq!(v.scene().lens.fov, Lens::MAX_FOV);
    }

    #[test]
    fn test_inverted_depth_range_surfaces_on_render() {
        let mut v = viewer();
        v.set_mode(Mode::ViewPerspective);
        drag(&mut v, Button::Two, 0.0, 150.0).unwrap();
        assert_eq!(v.scene().lens.near, 21.0);
        let mut canvas = FrameRecorder::new();
        assert!(matches!(
            v.render(&mut canvas),
            Err(ViewerError::InvalidDepthRange { .. })
        ));
        assert!(canvas.frames().is_empty());
    }

    #[test]
    fn test_reset_reproduces_first_frame() {
        let mut fresh = viewer();
        let mut canvas = FrameRecorder::new();
        let first = fresh.render(&mut canvas).unwrap();

        let mut v = viewer();
        v.set_mode(Mode::ModelRotate);
        drag(&mut v, Button::One, 0.0, 37.0).unwrap();
        v.set_mode(Mode::ViewTranslate);
        drag(&mut v, Button::Two, 0.0, -12.0).unwrap();
        v.set_mode(Mode::ViewPerspective);
        drag(&mut v, Button::One, 0.0, 25.0).unwrap();
        v.resize(640, 480);
        v.resize(400, 300);
        v.reset_view().unwrap();

        let again = v.render(&mut canvas).unwrap();
        assert_eq!(again.vertices, first.vertices);
        assert_eq!(again, first);
        assert_eq!(canvas.frames()[0], canvas.frames()[1]);
        assert_eq!(v.scene().camera.look_from, Pt3::new(0.0, 0.0, 17.0));
        assert_eq!(v.labels().near_far, "Near Plane:\t6\tFar Plane:\t16");
    }

    #[test]
    fn test_resize_recomputes_walls() {
        let mut v = viewer();
        v.resize(1000, 500);
        assert!((v.walls().right - 950.0).abs() < 1e-9);
        assert!((v.walls().bottom - 25.0).abs() < 1e-9);
        assert_eq!(v.size(), (1000, 500));
    }
}
