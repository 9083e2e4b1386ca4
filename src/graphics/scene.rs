use nalgebra::{Matrix4, Point3, Vector3};

use crate::model::{Junction, LightState, RoadSegment, SimulationModel, Vehicle};

use super::geometry::{
    self, BoundaryStyle, RoadSpan,
};

// Per-category elevations. Purely depth-buffer layering so coplanar quads do
// not z-fight; junction base < markings < vehicles < signals.
pub const ROAD_ELEVATION: f32 = 0.01;
pub const JUNCTION_ELEVATION: f32 = 0.01;
pub const MARKING_ELEVATION: f32 = 0.06;
pub const VEHICLE_ELEVATION: f32 = 0.1;
pub const SIGNAL_ELEVATION: f32 = 0.5;

const ROAD_COLOR: [f32; 3] = [0.3, 0.3, 0.3];
const MARKING_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
const JUNCTION_COLOR: [f32; 3] = [0.4, 0.4, 0.4];
const SIGNAL_JUNCTION_COLOR: [f32; 3] = [0.5, 0.5, 0.6];

/// One drawn quad: the shared unit mesh under this transform and color.
/// Matches the instance-buffer layout in the renderer.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadInstance {
    pub transform: [[f32; 4]; 4],
    pub color: [f32; 3],
    pub _padding: f32,
}

impl QuadInstance {
    pub fn new(transform: Matrix4<f32>, color: [f32; 3]) -> Self {
        Self {
            transform: transform.into(),
            color,
            _padding: 0.0,
        }
    }
}

/// Per-frame scene composition: walks the simulation model and turns every
/// road, lane marking, vehicle, junction, and signal into a `QuadInstance`.
/// The instance buffer is reused across frames.
pub struct Scene {
    instances: Vec<QuadInstance>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            instances: Vec::new(),
        }
    }

    /// Composes one frame. `ortho_width` is the camera's current visible
    /// width, which drives the zoom-adaptive marking strokes.
    pub fn compose(&mut self, model: &dyn SimulationModel, ortho_width: f32) -> &[QuadInstance] {
        self.instances.clear();

        for road in model.road_segments() {
            self.compose_road(model, road, ortho_width);
        }

        for junction in model.junctions() {
            self.compose_junction(junction);
        }

        &self.instances
    }

    fn compose_road(&mut self, model: &dyn SimulationModel, road: &RoadSegment, ortho_width: f32) {
        // Roads with a missing or dangling endpoint are unrenderable.
        let Some((start, end)) = model.road_endpoints(road) else {
            return;
        };

        let Some(span) = geometry::trim_between(start.position(), end.position(), start.radius())
        else {
            return;
        };

        let road_center = Point3::new(span.center.x, ROAD_ELEVATION, span.center.z);
        self.instances.push(QuadInstance::new(
            geometry::quad_transform(
                road_center,
                span.angle,
                Vector3::new(span.length, 1.0, road.width),
            ),
            ROAD_COLOR,
        ));

        self.compose_markings(road, &span, ortho_width);

        for vehicle in &road.vehicles {
            self.compose_vehicle(model, road, &span, vehicle);
        }
    }

    fn compose_markings(&mut self, road: &RoadSegment, span: &RoadSpan, ortho_width: f32) {
        let lift = MARKING_ELEVATION - ROAD_ELEVATION;

        for boundary in geometry::lane_boundaries(&road.lanes, road.width) {
            match boundary.style {
                BoundaryStyle::Solid => {
                    let stroke = geometry::solid_stroke(ortho_width);
                    self.instances.push(QuadInstance::new(
                        geometry::road_frame_transform(
                            span,
                            ROAD_ELEVATION,
                            Vector3::new(0.0, lift, boundary.offset),
                            Vector3::new(span.length, stroke.thickness, stroke.width),
                        ),
                        MARKING_COLOR,
                    ));
                }
                BoundaryStyle::Dashed => {
                    let stroke = geometry::dashed_stroke(ortho_width);
                    for dash in 0..geometry::dash_count(span.length) {
                        self.instances.push(QuadInstance::new(
                            geometry::road_frame_transform(
                                span,
                                ROAD_ELEVATION,
                                Vector3::new(
                                    geometry::dash_offset(dash, span.length),
                                    lift,
                                    boundary.offset,
                                ),
                                Vector3::new(
                                    geometry::DASH_LENGTH,
                                    stroke.thickness,
                                    stroke.width,
                                ),
                            ),
                            MARKING_COLOR,
                        ));
                    }
                }
            }
        }
    }

    fn compose_vehicle(
        &mut self,
        model: &dyn SimulationModel,
        road: &RoadSegment,
        span: &RoadSpan,
        vehicle: &Vehicle,
    ) {
        let Some(position) = model.lane_position_along_road(road, vehicle.lane, vehicle.distance)
        else {
            return;
        };

        let color = [
            vehicle.color[0] as f32 / 255.0,
            vehicle.color[1] as f32 / 255.0,
            vehicle.color[2] as f32 / 255.0,
        ];

        // Vehicles ride the road's direction, not a heading of their own.
        self.instances.push(QuadInstance::new(
            geometry::quad_transform(
                Point3::new(position.x, VEHICLE_ELEVATION, position.z),
                span.angle,
                Vector3::new(vehicle.length, 1.0, vehicle.width),
            ),
            color,
        ));
    }

    fn compose_junction(&mut self, junction: &Junction) {
        let position = junction.position();
        let radius = junction.radius();

        // The tint tells signal-controlled junctions apart; the variant is
        // the sole source of that distinction.
        let color = match junction {
            Junction::Plain { .. } => JUNCTION_COLOR,
            Junction::Signal { .. } => SIGNAL_JUNCTION_COLOR,
        };

        self.instances.push(QuadInstance::new(
            geometry::quad_transform(
                Point3::new(position.x, JUNCTION_ELEVATION, position.z),
                0.0,
                Vector3::new(radius * 2.0, 0.5, radius * 2.0),
            ),
            color,
        ));

        if let Junction::Signal { approaches, .. } = junction {
            for approach in approaches {
                let light_color = match approach.light {
                    LightState::Green => [0.0, 1.0, 0.0],
                    LightState::Yellow => [1.0, 1.0, 0.0],
                    LightState::Red => [1.0, 0.0, 0.0],
                };

                self.instances.push(QuadInstance::new(
                    geometry::quad_transform(
                        Point3::new(approach.entry_point.x, SIGNAL_ELEVATION, approach.entry_point.z),
                        0.0,
                        Vector3::new(2.0, 2.0, 2.0),
                    ),
                    light_color,
                ));
            }
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
