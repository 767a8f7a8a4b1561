/// Plane-sequential segment clipper.
///
/// Each segment is tested against the four viewport walls (right, left, top,
/// bottom) and then, in a separate pass, against the near and far depth planes.
/// Planes are applied one after another to the already shortened segment, so
/// the result depends on plane order. That order is fixed here.
use crate::geometry::{Segment, ViewportWalls};
use crate::transform::Pt2;

/// Signed offset of `value` from a boundary.
///
/// Even-indexed planes keep the side below the boundary, odd-indexed planes the
/// side above it. Inside is `>= 0`.
fn wec(index: usize, boundary: f64, value: f64) -> f64 {
    if index % 2 == 0 {
        boundary - value
    } else {
        value - boundary
    }
}

fn lerp(a: &Pt2, b: &Pt2, t: f64) -> Pt2 {
    Pt2::new(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y))
}

/// What a single plane does to a segment
#[derive(Debug, Clone, Copy, PartialEq)]
enum PlaneTest {
    Outside,
    Inside,
    Crossing(f64),
}

fn classify(wec_a: f64, wec_b: f64) -> PlaneTest {
    if wec_a < 0.0 && wec_b < 0.0 {
        PlaneTest::Outside
    } else if wec_a >= 0.0 && wec_b >= 0.0 {
        PlaneTest::Inside
    } else {
        PlaneTest::Crossing(wec_a / (wec_a - wec_b))
    }
}

/// Move whichever endpoint lies outside onto the crossing point and return it
fn shorten(segment: &mut Segment, wec_a: f64, t: f64) -> &mut Pt2 {
    let hit = lerp(&segment.a, &segment.b, t);
    let end = if wec_a < 0.0 {
        &mut segment.a
    } else {
        &mut segment.b
    };
    *end = hit;
    end
}

/// Clip against the four viewport walls. Stops at the first wall that rejects.
pub fn clip_walls(segment: &mut Segment, walls: &ViewportWalls) {
    for (index, boundary) in walls.as_array().into_iter().enumerate() {
        let (a, b) = if index < 2 {
            (segment.a.x, segment.b.x)
        } else {
            (segment.a.y, segment.b.y)
        };
        let (wec_a, wec_b) = (wec(index, boundary, a), wec(index, boundary, b));
        match classify(wec_a, wec_b) {
            PlaneTest::Outside => {
                segment.draw = false;
                break;
            }
            PlaneTest::Inside => {}
            PlaneTest::Crossing(t) => {
                // The clipped coordinate lands on the wall exactly
                let end = shorten(segment, wec_a, t);
                if index < 2 {
                    end.x = boundary;
                } else {
                    end.y = boundary;
                }
            }
        }
    }
}

/// Clip against `z = near` and `z = far` using the recorded camera-space depths.
///
/// Only the screen coordinates move; the stored depths are left as they were.
/// Runs on every segment, including ones the wall pass already rejected.
pub fn clip_depth(segment: &mut Segment, near: f64, far: f64) {
    // near keeps z >= near, far keeps z <= far
    for (index, boundary) in [(1, near), (2, far)] {
        let wec_a = wec(index, boundary, segment.z_a);
        let wec_b = wec(index, boundary, segment.z_b);
        match classify(wec_a, wec_b) {
            PlaneTest::Outside => segment.draw = false,
            PlaneTest::Inside => {}
            PlaneTest::Crossing(t) => {
                shorten(segment, wec_a, t);
            }
        }
    }
}

/// Run both passes over every segment
pub fn clip_segments(segments: &mut [Segment], walls: &ViewportWalls, near: f64, far: f64) {
    for segment in segments.iter_mut() {
        clip_walls(segment, walls);
        clip_depth(segment, near, far);
    }
}
