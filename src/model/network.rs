use nalgebra::Point3;

use super::{
    Approach, Junction, JunctionId, Lane, LightState, RoadId, RoadSegment, SimulationModel,
    Vehicle,
};

// In-memory road network implementing the model queries. Holds no traffic
// logic of its own; the host mutates it between frames.
#[derive(Debug, Clone, Default)]
pub struct RoadNetwork {
    pub junctions: Vec<Junction>,
    pub roads: Vec<RoadSegment>,
}

impl RoadNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_junction(&mut self, position: Point3<f32>, radius: f32) -> JunctionId {
        self.junctions.push(Junction::Plain { position, radius });
        JunctionId(self.junctions.len() - 1)
    }

    pub fn add_signal_junction(&mut self, position: Point3<f32>, radius: f32) -> JunctionId {
        self.junctions.push(Junction::Signal {
            position,
            radius,
            approaches: Vec::new(),
        });
        JunctionId(self.junctions.len() - 1)
    }

    // Connects two junctions. Signal-controlled endpoints get an approach
    // for this road: a light (initially red) at the point where the road
    // meets the junction disc.
    pub fn add_road(
        &mut self,
        start: JunctionId,
        end: JunctionId,
        width: f32,
        lanes: Vec<Lane>,
    ) -> RoadId {
        self.roads.push(RoadSegment {
            start_junction: Some(start),
            end_junction: Some(end),
            width,
            lanes,
            vehicles: Vec::new(),
        });
        let road = RoadId(self.roads.len() - 1);

        self.register_approach(start, end, road);
        self.register_approach(end, start, road);
        road
    }

    fn register_approach(&mut self, at: JunctionId, toward: JunctionId, road: RoadId) {
        let Some(toward_pos) = self.junctions.get(toward.0).map(|j| j.position()) else {
            return;
        };
        let Some(Junction::Signal { position, radius, approaches }) = self.junctions.get_mut(at.0)
        else {
            return;
        };
        let span = toward_pos - *position;
        let length = span.norm();
        if length <= f32::EPSILON {
            return;
        }
        approaches.push(Approach {
            road,
            entry_point: *position + span / length * *radius,
            light: LightState::Red,
        });
    }

    pub fn add_vehicle(&mut self, road: RoadId, vehicle: Vehicle) {
        if let Some(segment) = self.roads.get_mut(road.0) {
            segment.vehicles.push(vehicle);
        }
    }

    pub fn approaches(&self, junction: JunctionId) -> &[Approach] {
        match self.junctions.get(junction.0) {
            Some(Junction::Signal { approaches, .. }) => approaches,
            _ => &[],
        }
    }

    // Returns false when the junction has no approach for this road.
    pub fn set_light(&mut self, junction: JunctionId, road: RoadId, state: LightState) -> bool {
        if let Some(Junction::Signal { approaches, .. }) = self.junctions.get_mut(junction.0) {
            for approach in approaches.iter_mut() {
                if approach.road == road {
                    approach.light = state;
                    return true;
                }
            }
        }
        false
    }
}

impl SimulationModel for RoadNetwork {
    fn road_segments(&self) -> &[RoadSegment] {
        &self.roads
    }

    fn junctions(&self) -> &[Junction] {
        &self.junctions
    }
}
