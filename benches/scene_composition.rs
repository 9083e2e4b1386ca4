use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nalgebra::Point3;

use traffic_viz::graphics::camera::Camera;
use traffic_viz::graphics::scene::Scene;
use traffic_viz::model::{Lane, RoadNetwork, Vehicle};

/// Grid of junctions with signalized interior crossings, roads between
/// neighbors, and a few vehicles per road.
fn build_grid_network(size: usize) -> RoadNetwork {
    let mut network = RoadNetwork::new();
    let spacing = 80.0;

    let mut junctions = Vec::with_capacity(size * size);
    for row in 0..size {
        for col in 0..size {
            let position = Point3::new(col as f32 * spacing, 0.0, row as f32 * spacing);
            let id = if row % 2 == 1 && col % 2 == 1 {
                network.add_signal_junction(position, 6.0)
            } else {
                network.add_junction(position, 5.0)
            };
            junctions.push(id);
        }
    }

    let lanes = vec![Lane::regular(), Lane::regular(), Lane::shoulder()];
    for row in 0..size {
        for col in 0..size {
            let here = junctions[row * size + col];
            if col + 1 < size {
                network.add_road(here, junctions[row * size + col + 1], 12.0, lanes.clone());
            }
            if row + 1 < size {
                network.add_road(here, junctions[(row + 1) * size + col], 12.0, lanes.clone());
            }
        }
    }

    let road_count = network.roads.len();
    for index in 0..road_count {
        let road_id = traffic_viz::model::RoadId(index);
        for slot in 0..4 {
            network.add_vehicle(
                road_id,
                Vehicle {
                    lane: slot % 2,
                    distance: 10.0 + slot as f32 * 15.0,
                    length: 4.5,
                    width: 2.0,
                    color: [200, 100, 50],
                },
            );
        }
    }

    network
}

fn benchmark_scene_compose(c: &mut Criterion) {
    let network = build_grid_network(8);
    let mut scene = Scene::new();

    c.bench_function("scene_compose_grid_8x8", |b| {
        b.iter(|| {
            let instances = scene.compose(black_box(&network), black_box(240.0));
            black_box(instances.len());
        })
    });
}

fn benchmark_scene_compose_zoom_sweep(c: &mut Criterion) {
    let network = build_grid_network(8);
    let mut scene = Scene::new();

    // Zoomed out, dash counts stay the same but stroke math still runs per
    // boundary; sweep the widths a camera would actually produce.
    c.bench_function("scene_compose_zoom_sweep", |b| {
        b.iter(|| {
            for ortho_width in [60.0, 240.0, 960.0, 3840.0, 6400.0] {
                let instances = scene.compose(black_box(&network), black_box(ortho_width));
                black_box(instances.len());
            }
        })
    });
}

fn benchmark_camera_zoom_sequence(c: &mut Criterion) {
    c.bench_function("camera_zoom_and_pan_sequence", |b| {
        b.iter(|| {
            let mut camera = Camera::new();
            for _ in 0..100 {
                camera.apply_zoom(black_box(2.0));
                camera.pan(black_box(1.0), black_box(-1.0));
                camera.apply_zoom(black_box(-2.5));
            }
            black_box(camera.view_projection());
        })
    });
}

criterion_group!(
    benches,
    benchmark_scene_compose,
    benchmark_scene_compose_zoom_sweep,
    benchmark_camera_zoom_sequence
);
criterion_main!(benches);
