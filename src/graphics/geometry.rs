use nalgebra::{Matrix4, Point3, Vector3};

use crate::model::Lane;

/// Trimmed segments at or below this length are not drawn.
pub const TRIM_EPSILON: f32 = 0.001;

pub const DASH_LENGTH: f32 = 3.0;
pub const GAP_LENGTH: f32 = 7.0;
pub const DASH_SPACING: f32 = DASH_LENGTH + GAP_LENGTH;

// Stroke widths track the visible ortho width so markings neither vanish
// zoomed out nor balloon zoomed in. 240 is the ortho width at which the
// geometric and adaptive widths coincide.
const STROKE_REFERENCE_WIDTH: f32 = 240.0;

/// A road segment's centerline after trimming the junction radius off both
/// ends, plus everything needed to place quads along it.
#[derive(Debug, Clone, Copy)]
pub struct RoadSpan {
    pub center: Point3<f32>,
    pub direction: Vector3<f32>,
    pub length: f32,
    /// Signed ground-plane angle of `direction`, applied about +Y.
    pub angle: f32,
}

/// Shortens the centerline between two junction centers by `radius` at each
/// end so the road quad never penetrates the junction discs. Returns `None`
/// for degenerate spans: coincident junctions, or discs that meet or overlap.
pub fn trim_between(start: Point3<f32>, end: Point3<f32>, radius: f32) -> Option<RoadSpan> {
    let span = end - start;
    let full_length = span.norm();
    if full_length <= f32::EPSILON {
        return None;
    }
    let direction = span / full_length;

    // Signed length: overlapping discs go negative instead of flipping the
    // trimmed direction and coming back positive.
    let length = full_length - 2.0 * radius;
    if length <= TRIM_EPSILON {
        return None;
    }

    let trimmed_start = start + direction * radius;
    let center = trimmed_start + direction * (length / 2.0);

    Some(RoadSpan {
        center,
        direction,
        length,
        angle: direction.z.atan2(direction.x),
    })
}

/// How a lane divider is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryStyle {
    /// Solid stripe along the full span; separates lanes of different kinds.
    Solid,
    /// Regular dashed lane line.
    Dashed,
}

#[derive(Debug, Clone, Copy)]
pub struct LaneBoundary {
    /// Across-road offset from the centerline, in the road frame.
    pub offset: f32,
    pub style: BoundaryStyle,
}

/// Splits the road width into equal lanes and classifies every internal
/// boundary: solid where the lane kind changes, dashed otherwise. Road edges
/// are not boundaries.
pub fn lane_boundaries(lanes: &[Lane], road_width: f32) -> Vec<LaneBoundary> {
    let lane_count = lanes.len();
    if lane_count < 2 {
        return Vec::new();
    }
    let lane_width = road_width / lane_count as f32;

    (1..lane_count)
        .map(|i| LaneBoundary {
            offset: -road_width / 2.0 + i as f32 * lane_width,
            style: if lanes[i - 1].kind != lanes[i].kind {
                BoundaryStyle::Solid
            } else {
                BoundaryStyle::Dashed
            },
        })
        .collect()
}

pub fn dash_count(span_length: f32) -> usize {
    (span_length / DASH_SPACING) as usize + 1
}

/// Along-road offset of dash `index` from the span center.
pub fn dash_offset(index: usize, span_length: f32) -> f32 {
    -span_length / 2.0 + index as f32 * DASH_SPACING + DASH_LENGTH / 2.0
}

/// Thickness (vertical) and width (across-road) of a marking stripe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeSize {
    pub thickness: f32,
    pub width: f32,
}

pub fn solid_stroke(ortho_width: f32) -> StrokeSize {
    let f = ortho_width / STROKE_REFERENCE_WIDTH;
    StrokeSize {
        thickness: (0.2 * f).max(0.2),
        width: (0.5 * f).max(0.2),
    }
}

pub fn dashed_stroke(ortho_width: f32) -> StrokeSize {
    let f = ortho_width / STROKE_REFERENCE_WIDTH;
    StrokeSize {
        thickness: (0.2 * f).max(0.1),
        width: (0.5 * f).max(0.5),
    }
}

/// Places the unit ground-plane quad: translate, rotate about +Y, then
/// non-uniform scale.
pub fn quad_transform(position: Point3<f32>, angle: f32, scale: Vector3<f32>) -> Matrix4<f32> {
    Matrix4::new_translation(&position.coords)
        * Matrix4::from_euler_angles(0.0, angle, 0.0)
        * Matrix4::new_nonuniform_scaling(&scale)
}

/// Places a quad in a road span's frame: `local` is (along-road, lift,
/// across-road) relative to the span center before the span's rotation.
pub fn road_frame_transform(
    span: &RoadSpan,
    elevation: f32,
    local: Vector3<f32>,
    scale: Vector3<f32>,
) -> Matrix4<f32> {
    let center = Point3::new(span.center.x, elevation, span.center.z);
    Matrix4::new_translation(&center.coords)
        * Matrix4::from_euler_angles(0.0, span.angle, 0.0)
        * Matrix4::new_translation(&local)
        * Matrix4::new_nonuniform_scaling(&scale)
}
