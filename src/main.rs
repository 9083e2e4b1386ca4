use anyhow::Result;
use clap::Parser;
use log::info;
use nalgebra::Point3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;
use winit::{event::*, event_loop::EventLoop};

use traffic_viz::{
    config::{DemoConfig, Validate, ViewerConfig},
    graphics::GraphicsSystem,
    model::{
        Junction, JunctionId, Lane, LaneKind, LightState, RoadId, RoadNetwork, RoadSegment,
        SimulationModel, Vehicle,
    },
};

#[derive(Parser)]
#[command(name = "traffic-viz")]
#[command(about = "Top-down traffic network viewer with interactive pan/zoom")]
struct Args {
    /// Viewer configuration file
    #[arg(short, long, default_value = "viewer.toml")]
    config: String,

    /// Random seed for reproducible demo traffic
    #[arg(short, long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Demo world: a signalized crossroads with plain junctions around it.
/// Vehicle motion and light cycling are host-side animation, not traffic
/// simulation; the renderer only ever reads the model queries.
struct DemoWorld {
    network: RoadNetwork,
    signal: JunctionId,
    road_lengths: Vec<f32>,
    vehicle_speed: f32,
    cycle_secs: f32,
    cycle_elapsed: f32,
    active_phase: usize,
}

impl DemoWorld {
    fn build(config: &DemoConfig, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut network = RoadNetwork::new();

        let center = network.add_signal_junction(Point3::new(0.0, 0.0, 0.0), 6.0);
        let east = network.add_junction(Point3::new(120.0, 0.0, 0.0), 5.0);
        let west = network.add_junction(Point3::new(-120.0, 0.0, 0.0), 5.0);
        let north = network.add_junction(Point3::new(0.0, 0.0, -120.0), 5.0);
        let south = network.add_junction(Point3::new(0.0, 0.0, 100.0), 5.0);

        let two_lanes = vec![Lane::regular(), Lane::regular()];
        // Northbound spoke carries a shoulder, so one boundary renders solid.
        let with_shoulder = vec![Lane::regular(), Lane::regular(), Lane::shoulder()];

        network.add_road(center, east, 8.0, two_lanes.clone());
        network.add_road(center, west, 8.0, two_lanes.clone());
        network.add_road(center, north, 12.0, with_shoulder);
        network.add_road(center, south, 8.0, two_lanes.clone());
        network.add_road(east, north, 8.0, two_lanes);

        let road_lengths: Vec<f32> = network
            .roads
            .iter()
            .map(|road| road_center_distance(&network, road))
            .collect();

        for (index, road) in network.roads.iter_mut().enumerate() {
            let regular_lanes: Vec<usize> = road
                .lanes
                .iter()
                .enumerate()
                .filter(|(_, lane)| lane.kind == LaneKind::Regular)
                .map(|(i, _)| i)
                .collect();

            for _ in 0..config.vehicles_per_road {
                road.vehicles.push(Vehicle {
                    lane: regular_lanes[rng.gen_range(0..regular_lanes.len())],
                    distance: rng.gen_range(10.0..road_lengths[index] - 10.0),
                    length: rng.gen_range(3.5..5.5),
                    width: 2.0,
                    color: [
                        rng.gen_range(60..=255),
                        rng.gen_range(60..=255),
                        rng.gen_range(60..=255),
                    ],
                });
            }
        }

        Self {
            network,
            signal: center,
            road_lengths,
            vehicle_speed: config.vehicle_speed,
            cycle_secs: config.signal_cycle_secs,
            cycle_elapsed: 0.0,
            active_phase: 0,
        }
    }

    fn step(&mut self, dt: f32) {
        for (index, road) in self.network.roads.iter_mut().enumerate() {
            let length = self.road_lengths[index];
            for (slot, vehicle) in road.vehicles.iter_mut().enumerate() {
                let speed = self.vehicle_speed * (0.75 + 0.1 * slot as f32);
                vehicle.distance += speed * dt;
                if vehicle.distance > length {
                    vehicle.distance -= length;
                }
            }
        }

        let phase_roads: Vec<RoadId> = self
            .network
            .approaches(self.signal)
            .iter()
            .map(|approach| approach.road)
            .collect();
        if phase_roads.is_empty() {
            return;
        }

        self.cycle_elapsed += dt;
        if self.cycle_elapsed >= self.cycle_secs {
            self.cycle_elapsed = 0.0;
            self.active_phase = (self.active_phase + 1) % phase_roads.len();
        }

        // One approach at a time gets green, turning yellow for the tail of
        // its phase; everyone else waits on red.
        let yellow_from = self.cycle_secs * 0.8;
        for (index, road) in phase_roads.into_iter().enumerate() {
            let state = if index != self.active_phase {
                LightState::Red
            } else if self.cycle_elapsed < yellow_from {
                LightState::Green
            } else {
                LightState::Yellow
            };
            self.network.set_light(self.signal, road, state);
        }
    }
}

fn road_center_distance(network: &RoadNetwork, road: &RoadSegment) -> f32 {
    network.road_length(road).unwrap_or(0.0)
}

impl SimulationModel for DemoWorld {
    fn road_segments(&self) -> &[RoadSegment] {
        self.network.road_segments()
    }

    fn junctions(&self) -> &[Junction] {
        self.network.junctions()
    }

    fn advance(&mut self, dt: f32) {
        self.step(dt);
    }
}

struct Application {
    graphics: GraphicsSystem,
    last_frame_time: Instant,
    target_fps: f32,
}

impl Application {
    async fn new(args: &Args, event_loop: &EventLoop<()>) -> Result<Self> {
        env_logger::Builder::from_default_env()
            .filter_level(if args.verbose {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Info
            })
            .init();
        info!("Starting Traffic Viewer");

        let config = ViewerConfig::load_or_default(&args.config)?;
        config.validate()?;

        let seed = args.seed.or(config.demo.seed);

        let mut graphics =
            GraphicsSystem::new(event_loop, config.window.width, config.window.height).await?;
        info!("Graphics system initialized");

        let world = DemoWorld::build(&config.demo, seed);
        info!(
            "Demo network: {} junctions, {} roads, {} vehicles",
            world.network.junctions.len(),
            world.network.roads.len(),
            world
                .network
                .roads
                .iter()
                .map(|r| r.vehicles.len())
                .sum::<usize>()
        );
        if let Some(seed) = seed {
            info!("Random Seed: {}", seed);
        }

        graphics.attach_model(Box::new(world));

        Ok(Self {
            graphics,
            last_frame_time: Instant::now(),
            target_fps: 60.0,
        })
    }

    fn update(&mut self) {
        self.graphics.advance_model(1.0 / self.target_fps);
    }

    fn update_frame_timing(&mut self) {
        let now = Instant::now();
        let _delta_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;

        let target_frame_time = std::time::Duration::from_secs_f32(1.0 / self.target_fps);
        let elapsed = now.elapsed();
        if elapsed < target_frame_time {
            std::thread::sleep(target_frame_time - elapsed);
        }
    }
}

async fn run_viewer(args: Args) -> Result<()> {
    let event_loop = EventLoop::new()?;
    let mut app = Application::new(&args, &event_loop).await?;

    info!("Starting interactive mode...");

    event_loop.run(move |event, control_flow| {
        match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } => {
                if window_id == app.graphics.window.id() {
                    app.graphics.handle_input(event);

                    match event {
                        WindowEvent::CloseRequested => {
                            info!("Close requested");
                            control_flow.exit();
                        }
                        WindowEvent::RedrawRequested => {
                            if !app.graphics.poll_input_and_advance_camera() {
                                info!("Exit requested");
                                control_flow.exit();
                                return;
                            }

                            app.update();

                            if let Err(e) = app.graphics.render_frame() {
                                log::error!("Render error: {}", e);
                            }
                        }
                        _ => {}
                    }
                }
            }
            Event::AboutToWait => {
                app.graphics.window.request_redraw();
                app.update_frame_timing();
            }
            _ => {}
        }
    })?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    pollster::block_on(async { run_viewer(args).await })
}
