use nalgebra::{Point3, Vector3};

pub mod network;

pub use network::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JunctionId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoadId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneKind {
    Regular,
    Shoulder,
}

#[derive(Debug, Clone, Copy)]
pub struct Lane {
    pub kind: LaneKind,
}

impl Lane {
    pub fn regular() -> Self {
        Lane { kind: LaneKind::Regular }
    }

    pub fn shoulder() -> Self {
        Lane { kind: LaneKind::Shoulder }
    }
}

// Closed set: adding a state must break every match over it at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightState {
    Green,
    Yellow,
    Red,
}

#[derive(Debug, Clone)]
pub struct Vehicle {
    pub lane: usize,
    pub distance: f32,
    pub length: f32,
    pub width: f32,
    pub color: [u8; 3],
}

#[derive(Debug, Clone)]
pub struct Approach {
    pub road: RoadId,
    pub entry_point: Point3<f32>,
    pub light: LightState,
}

// Junction capability is a closed set of variants; signal data exists only
// in the signal-controlled case.
#[derive(Debug, Clone)]
pub enum Junction {
    Plain {
        position: Point3<f32>,
        radius: f32,
    },
    Signal {
        position: Point3<f32>,
        radius: f32,
        approaches: Vec<Approach>,
    },
}

impl Junction {
    pub fn position(&self) -> Point3<f32> {
        match self {
            Junction::Plain { position, .. } => *position,
            Junction::Signal { position, .. } => *position,
        }
    }

    pub fn radius(&self) -> f32 {
        match self {
            Junction::Plain { radius, .. } => *radius,
            Junction::Signal { radius, .. } => *radius,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RoadSegment {
    pub start_junction: Option<JunctionId>,
    pub end_junction: Option<JunctionId>,
    pub width: f32,
    pub lanes: Vec<Lane>,
    pub vehicles: Vec<Vehicle>,
}

impl RoadSegment {
    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    pub fn lane_width(&self) -> f32 {
        self.width / self.lanes.len() as f32
    }
}

// Read-only view of the traffic world for one frame. The renderer never
// mutates it; the host owns its update cadence. The centerline queries have
// default implementations for straight roads, which hosts with richer road
// geometry can override.
pub trait SimulationModel {
    fn road_segments(&self) -> &[RoadSegment];

    fn junctions(&self) -> &[Junction];

    /// Host-driven update tick. The renderer never calls this; models that
    /// animate between frames override it, static networks leave the no-op.
    fn advance(&mut self, _dt: f32) {}

    fn junction(&self, id: JunctionId) -> Option<&Junction> {
        self.junctions().get(id.0)
    }

    // A road with a missing or dangling endpoint is unrenderable.
    fn road_endpoints(&self, road: &RoadSegment) -> Option<(&Junction, &Junction)> {
        let start = self.junction(road.start_junction?)?;
        let end = self.junction(road.end_junction?)?;
        Some((start, end))
    }

    fn road_direction(&self, road: &RoadSegment) -> Option<Vector3<f32>> {
        let (start, end) = self.road_endpoints(road)?;
        let span = end.position() - start.position();
        let length = span.norm();
        if length <= f32::EPSILON {
            return None;
        }
        Some(span / length)
    }

    // Center-to-center distance between the endpoint junctions.
    fn road_length(&self, road: &RoadSegment) -> Option<f32> {
        let (start, end) = self.road_endpoints(road)?;
        Some((end.position() - start.position()).norm())
    }

    // World position of lane `lane`'s centerline at `distance` from the
    // start junction, offset perpendicular to the travel direction.
    fn lane_position_along_road(
        &self,
        road: &RoadSegment,
        lane: usize,
        distance: f32,
    ) -> Option<Point3<f32>> {
        if road.lanes.is_empty() {
            return None;
        }
        let (start, _) = self.road_endpoints(road)?;
        let dir = self.road_direction(road)?;
        let offset = -road.width / 2.0 + road.lane_width() * (lane as f32 + 0.5);
        let perp = Vector3::new(-dir.z, 0.0, dir.x);
        Some(start.position() + dir * distance + perp * offset)
    }
}
