use traffic_viz::graphics::camera::{
    Camera, WORLD_LIMIT_HORIZONTAL, WORLD_LIMIT_VERTICAL,
};

fn assert_bounds_valid(camera: &Camera) {
    assert!(
        camera.left < camera.right,
        "bounds inverted horizontally: left={}, right={}",
        camera.left,
        camera.right
    );
    assert!(
        camera.bottom < camera.top,
        "bounds inverted vertically: bottom={}, top={}",
        camera.bottom,
        camera.top
    );
    assert!(camera.left >= -WORLD_LIMIT_HORIZONTAL);
    assert!(camera.right <= WORLD_LIMIT_HORIZONTAL);
    assert!(camera.bottom >= -WORLD_LIMIT_VERTICAL);
    assert!(camera.top <= WORLD_LIMIT_VERTICAL);
}

#[test]
fn test_bounds_stay_clamped_and_ordered_for_any_scroll_sequence() {
    let mut camera = Camera::new();

    // Mixed zoom-in/zoom-out sequence, including repeated extremes in both
    // directions, must never break ordering or escape the world limits.
    let scrolls = [
        1.0, 3.0, -2.0, -8.0, 5.0, -9.9, -9.9, -9.9, -9.9, 2.5, 0.0, -1.0, 9.0, 9.0, -4.0, 7.5,
        -6.0, 1.5,
    ];
    for delta in scrolls {
        camera.apply_zoom(delta);
        assert_bounds_valid(&camera);
    }
}

#[test]
fn test_heavy_zoom_out_hits_world_limits() {
    let mut camera = Camera::new();
    for _ in 0..100 {
        camera.apply_zoom(-9.0);
    }
    assert_bounds_valid(&camera);
    assert_eq!(camera.left, -WORLD_LIMIT_HORIZONTAL);
    assert_eq!(camera.right, WORLD_LIMIT_HORIZONTAL);
    assert_eq!(camera.bottom, -WORLD_LIMIT_VERTICAL);
    assert_eq!(camera.top, WORLD_LIMIT_VERTICAL);

    // Idempotent at the boundary.
    camera.apply_zoom(-9.0);
    assert_eq!(camera.left, -WORLD_LIMIT_HORIZONTAL);
    assert_eq!(camera.right, WORLD_LIMIT_HORIZONTAL);
}

#[test]
fn test_inverse_zoom_restores_bounds_away_from_clamps() {
    let mut camera = Camera::new();
    let original = (camera.left, camera.right, camera.bottom, camera.top);

    // apply_zoom(d) scales by f = 1 - d/10; the delta that scales by 1/f is
    // d' = (1 - 1/f) * 10.
    let delta = 3.0;
    let factor = 1.0 - delta / 10.0;
    let inverse_delta = (1.0 - 1.0 / factor) * 10.0;

    camera.apply_zoom(delta);
    camera.apply_zoom(inverse_delta);

    let tolerance = 1e-4;
    assert!((camera.left - original.0).abs() < tolerance);
    assert!((camera.right - original.1).abs() < tolerance);
    assert!((camera.bottom - original.2).abs() < tolerance);
    assert!((camera.top - original.3).abs() < tolerance);
}

#[test]
fn test_zero_scroll_is_a_no_op() {
    let mut camera = Camera::new();
    let before = (camera.left, camera.right, camera.bottom, camera.top);
    camera.apply_zoom(0.0);
    assert_eq!(before, (camera.left, camera.right, camera.bottom, camera.top));
}

#[test]
fn test_bound_inverting_scroll_is_rejected() {
    let mut camera = Camera::new();
    let before = (camera.left, camera.right, camera.bottom, camera.top);
    // |delta| >= 10 would produce a non-positive scale factor.
    camera.apply_zoom(10.0);
    assert_eq!(before, (camera.left, camera.right, camera.bottom, camera.top));
    camera.apply_zoom(25.0);
    assert_eq!(before, (camera.left, camera.right, camera.bottom, camera.top));
}

#[test]
fn test_zoom_level_positive_and_monotone_in_width() {
    let narrow = Camera::with_bounds(-50.0, 50.0, -30.0, 30.0);
    let medium = Camera::with_bounds(-200.0, 200.0, -100.0, 100.0);
    let wide = Camera::with_bounds(-1000.0, 1000.0, -500.0, 500.0);

    assert!(narrow.zoom_level() > 0.0);
    assert!(narrow.zoom_level() < medium.zoom_level());
    assert!(medium.zoom_level() < wide.zoom_level());

    assert_eq!(medium.zoom_level(), 2.0);
    assert_eq!(medium.ortho_width(), 400.0);
}

#[test]
fn test_zoom_level_survives_arbitrary_scrolling() {
    let mut camera = Camera::new();
    for delta in [-5.0, 8.0, -3.0, 9.5, -9.9, 4.0] {
        camera.apply_zoom(delta);
        assert!(camera.zoom_level() > 0.0);
    }
}

#[test]
fn test_pan_scales_with_zoom_level() {
    // Bounds give (right - left) / 200 = 2.
    let mut camera = Camera::with_bounds(-200.0, 200.0, -112.5, 112.5);
    assert_eq!(camera.zoom_level(), 2.0);

    let start = camera.position;
    camera.pan(3.0, -4.0);

    assert_eq!(camera.position.x, start.x + 6.0);
    assert_eq!(camera.position.z, start.z - 8.0);
    assert_eq!(camera.position.y, start.y);
}

#[test]
fn test_target_mirrors_position_and_stays_grounded() {
    let mut camera = Camera::new();
    camera.pan(10.0, -7.0);
    camera.apply_zoom(2.0);
    camera.pan(-3.0, 4.0);

    assert_eq!(camera.target.x, camera.position.x);
    assert_eq!(camera.target.z, camera.position.z);
    assert_eq!(camera.target.y, 0.0);
}

#[test]
fn test_asymmetric_clamping_is_preserved() {
    // An off-center view: zooming out far enough clamps the right side at
    // the world limit while the left side still has room. The result is
    // intentionally left asymmetric.
    let mut camera = Camera::with_bounds(-100.0, 2000.0, -50.0, 50.0);
    camera.apply_zoom(-9.0); // scale factor 1.9

    assert_eq!(camera.right, WORLD_LIMIT_HORIZONTAL);
    assert!((camera.left - (-190.0)).abs() < 1e-3);
    assert_bounds_valid(&camera);
}

#[test]
fn test_view_projection_is_finite() {
    let camera = Camera::new();
    let vp = camera.view_projection();
    assert!(vp.iter().all(|v| v.is_finite()));
}
