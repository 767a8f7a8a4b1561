/// Fixed cube model and the line segments assembled from it
use crate::transform::{Pt2, Pt3};

/// Edge sets of the cube, each drawn in its own colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceGroup {
    /// Edges among vertices 0-3 (z = +1)
    Back,
    /// Edges among vertices 4-7 (z = -1)
    Front,
    /// Edges joining vertex i to vertex i + 4
    Side,
}

/// Unit cube spanning (-1, -1, -1) to (1, 1, 1)
pub struct CubeModel;

impl CubeModel {
    pub const VERTEX_COUNT: usize = 8;
    pub const EDGE_COUNT: usize = 12;

    /// Vertex `i` has x = -1 when `i` is odd, y = -1 for `i` in {2, 3, 6, 7}
    /// and z = -1 for `i` > 3.
    pub const VERTICES: [[f64; 3]; 8] = [
        [1.0, 1.0, 1.0],
        [-1.0, 1.0, 1.0],
        [1.0, -1.0, 1.0],
        [-1.0, -1.0, 1.0],
        [1.0, 1.0, -1.0],
        [-1.0, 1.0, -1.0],
        [1.0, -1.0, -1.0],
        [-1.0, -1.0, -1.0],
    ];

    pub const EDGES: [(usize, usize, FaceGroup); 12] = [
        (0, 1, FaceGroup::Back),
        (0, 2, FaceGroup::Back),
        (1, 3, FaceGroup::Back),
        (2, 3, FaceGroup::Back),
        (4, 5, FaceGroup::Front),
        (4, 6, FaceGroup::Front),
        (5, 7, FaceGroup::Front),
        (6, 7, FaceGroup::Front),
        (0, 4, FaceGroup::Side),
        (1, 5, FaceGroup::Side),
        (2, 6, FaceGroup::Side),
        (3, 7, FaceGroup::Side),
    ];

    pub fn vertices() -> [Pt3; 8] {
        Self::VERTICES.map(|[x, y, z]| Pt3::new(x, y, z))
    }
}

/// Screen-space line segment with the camera-space depth of each endpoint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Pt2,
    pub b: Pt2,
    pub z_a: f64,
    pub z_b: f64,
    pub draw: bool,
    pub group: FaceGroup,
}

impl Segment {
    pub fn new(a: Pt2, b: Pt2, z_a: f64, z_b: f64, group: FaceGroup) -> Self {
        Self {
            a,
            b,
            z_a,
            z_b,
            draw: true,
            group,
        }
    }
}

/// Boundaries of the drawable region in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportWalls {
    pub right: f64,
    pub left: f64,
    pub top: f64,
    pub bottom: f64,
}

impl ViewportWalls {
    pub const NEAR_FRACTION: f64 = 0.05;
    pub const FAR_FRACTION: f64 = 0.95;

    pub fn new(width: u32, height: u32) -> Self {
        let (w, h) = (width as f64, height as f64);
        Self {
            right: Self::FAR_FRACTION * w,
            left: Self::NEAR_FRACTION * w,
            top: Self::FAR_FRACTION * h,
            bottom: Self::NEAR_FRACTION * h,
        }
    }

    /// Walls in clipping order: right, left, top, bottom
    pub fn as_array(&self) -> [f64; 4] {
        [self.right, self.left, self.top, self.bottom]
    }

    /// The four sides of the border rectangle
    pub fn border(&self) -> [(Pt2, Pt2); 4] {
        let bl = Pt2::new(self.left, self.bottom);
        let br = Pt2::new(self.right, self.bottom);
        let tr = Pt2::new(self.right, self.top);
        let tl = Pt2::new(self.left, self.top);
        [(bl, br), (br, tr), (tr, tl), (tl, bl)]
    }
}
