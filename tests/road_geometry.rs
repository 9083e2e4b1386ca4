use nalgebra::{Point3, Vector3};

use traffic_viz::graphics::geometry::{
    self, BoundaryStyle, DASH_SPACING,
};
use traffic_viz::model::Lane;

const TOLERANCE: f32 = 1e-4;

#[test]
fn test_trimmed_length_is_distance_minus_two_radii() {
    let span = geometry::trim_between(
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(100.0, 0.0, 0.0),
        5.0,
    )
    .expect("well-separated junctions must produce a span");

    assert!((span.length - 90.0).abs() < TOLERANCE);
    assert!((span.center.x - 50.0).abs() < TOLERANCE);
    assert!(span.center.z.abs() < TOLERANCE);
    assert!(span.angle.abs() < TOLERANCE);
    assert!((span.direction - Vector3::new(1.0, 0.0, 0.0)).norm() < TOLERANCE);
}

#[test]
fn test_diagonal_span_direction_and_angle() {
    let span = geometry::trim_between(
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(60.0, 0.0, 60.0),
        5.0,
    )
    .expect("span");

    let expected_length = (60.0_f32 * 60.0 * 2.0).sqrt() - 10.0;
    assert!((span.length - expected_length).abs() < 1e-3);
    assert!((span.angle - std::f32::consts::FRAC_PI_4).abs() < TOLERANCE);
}

#[test]
fn test_coincident_junctions_are_degenerate() {
    assert!(geometry::trim_between(
        Point3::new(5.0, 0.0, 5.0),
        Point3::new(5.0, 0.0, 5.0),
        3.0
    )
    .is_none());
}

#[test]
fn test_touching_and_overlapping_junctions_are_degenerate() {
    // Discs exactly touching: trimmed length 0.
    assert!(geometry::trim_between(
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(10.0, 0.0, 0.0),
        5.0
    )
    .is_none());

    // Discs overlapping: signed trimmed length is negative, not a flipped
    // positive span.
    assert!(geometry::trim_between(
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(6.0, 0.0, 0.0),
        5.0
    )
    .is_none());
}

#[test]
fn test_three_lane_shoulder_classification() {
    // Lanes 0 and 1 share a kind, lane 2 differs: boundary 0/1 dashes,
    // boundary 1/2 is the one solid shoulder line.
    let lanes = [Lane::regular(), Lane::regular(), Lane::shoulder()];
    let boundaries = geometry::lane_boundaries(&lanes, 12.0);

    assert_eq!(boundaries.len(), 2);
    assert_eq!(boundaries[0].style, BoundaryStyle::Dashed);
    assert_eq!(boundaries[1].style, BoundaryStyle::Solid);

    assert!((boundaries[0].offset - (-2.0)).abs() < TOLERANCE);
    assert!((boundaries[1].offset - 2.0).abs() < TOLERANCE);

    let solid_count = boundaries
        .iter()
        .filter(|b| b.style == BoundaryStyle::Solid)
        .count();
    assert_eq!(solid_count, 1);
}

#[test]
fn test_uniform_lanes_have_only_dashed_boundaries() {
    let lanes = [Lane::regular(), Lane::regular()];
    let boundaries = geometry::lane_boundaries(&lanes, 8.0);

    assert_eq!(boundaries.len(), 1);
    assert_eq!(boundaries[0].style, BoundaryStyle::Dashed);
    assert!(boundaries[0].offset.abs() < TOLERANCE);
}

#[test]
fn test_single_lane_has_no_boundaries() {
    assert!(geometry::lane_boundaries(&[Lane::regular()], 4.0).is_empty());
}

#[test]
fn test_dash_count_formula() {
    assert_eq!(geometry::dash_count(90.0), 10);
    assert_eq!(geometry::dash_count(9.9), 1);
    assert_eq!(geometry::dash_count(10.0), 2);
    assert_eq!(geometry::dash_count(95.0), 10);
    assert_eq!(geometry::dash_count(100.0), 11);
}

#[test]
fn test_dash_offsets_follow_the_layout_formula() {
    let length = 90.0;
    let count = geometry::dash_count(length);
    assert_eq!(count, 10);

    for index in 0..count {
        let expected = -length / 2.0 + index as f32 * DASH_SPACING + 1.5;
        assert!((geometry::dash_offset(index, length) - expected).abs() < TOLERANCE);
    }
    assert!((geometry::dash_offset(0, length) - (-43.5)).abs() < TOLERANCE);

    // The run of dashes is approximately centered: its mean offset sits
    // within half a spacing of the span midpoint.
    let mean: f32 =
        (0..count).map(|i| geometry::dash_offset(i, length)).sum::<f32>() / count as f32;
    assert!(mean.abs() < DASH_SPACING / 2.0);
}

#[test]
fn test_stroke_sizes_match_geometry_at_reference_zoom() {
    // At ortho width 240 the adaptive factor is 1.
    let solid = geometry::solid_stroke(240.0);
    assert!((solid.thickness - 0.2).abs() < TOLERANCE);
    assert!((solid.width - 0.5).abs() < TOLERANCE);

    let dashed = geometry::dashed_stroke(240.0);
    assert!((dashed.thickness - 0.2).abs() < TOLERANCE);
    assert!((dashed.width - 0.5).abs() < TOLERANCE);
}

#[test]
fn test_stroke_floors_hold_when_zoomed_in() {
    // Tiny ortho width: the geometric sizes would shrink toward zero, so the
    // per-style floors take over.
    let solid = geometry::solid_stroke(24.0);
    assert!((solid.thickness - 0.2).abs() < TOLERANCE);
    assert!((solid.width - 0.2).abs() < TOLERANCE);

    let dashed = geometry::dashed_stroke(24.0);
    assert!((dashed.thickness - 0.1).abs() < TOLERANCE);
    assert!((dashed.width - 0.5).abs() < TOLERANCE);
}

#[test]
fn test_strokes_grow_when_zoomed_out() {
    let solid = geometry::solid_stroke(2400.0);
    assert!((solid.thickness - 2.0).abs() < TOLERANCE);
    assert!((solid.width - 5.0).abs() < TOLERANCE);

    let dashed = geometry::dashed_stroke(2400.0);
    assert!((dashed.thickness - 2.0).abs() < TOLERANCE);
    assert!((dashed.width - 5.0).abs() < TOLERANCE);
}

#[test]
fn test_quad_transform_places_the_unit_quad() {
    let transform = geometry::quad_transform(
        Point3::new(10.0, 0.5, -4.0),
        0.0,
        Vector3::new(6.0, 1.0, 2.0),
    );

    // Center of the unit quad lands on the translation.
    let center = transform.transform_point(&Point3::new(0.0, 0.0, 0.0));
    assert!((center - Point3::new(10.0, 0.5, -4.0)).norm() < TOLERANCE);

    // A corner at +0.5 along x lands half the x-scale away.
    let corner = transform.transform_point(&Point3::new(0.5, 0.0, 0.0));
    assert!((corner.x - 13.0).abs() < TOLERANCE);
    assert!((corner.z - (-4.0)).abs() < TOLERANCE);
}

#[test]
fn test_road_frame_transform_applies_lift_and_lane_offset() {
    let span = geometry::trim_between(
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(100.0, 0.0, 0.0),
        5.0,
    )
    .expect("span");

    let transform = geometry::road_frame_transform(
        &span,
        0.01,
        Vector3::new(-43.5, 0.05, -2.0),
        Vector3::new(3.0, 0.2, 0.5),
    );

    let center = transform.transform_point(&Point3::new(0.0, 0.0, 0.0));
    assert!((center.x - (50.0 - 43.5)).abs() < TOLERANCE);
    assert!((center.y - 0.06).abs() < TOLERANCE);
    assert!((center.z - (-2.0)).abs() < TOLERANCE);
}
