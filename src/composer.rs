use crate::asset_path::AssetResolver;
use crate::scene::{NodeId, SceneGraph, Transform};
use crate::scroll::ScrollProgress;
use crate::stations::{build_station, BuildContext, Label, Station};
use crate::textures::TextureRegistry;
use crate::travel::{CameraTravel, StationId, StationLayout, TravelSmoothing};

/// Owns the scene arena, places every station at its fixed offset under one
/// travel group and moves that group toward the scroll target each frame.
pub struct SceneComposer {
    graph: SceneGraph,
    layout: StationLayout,
    travel: CameraTravel,
    travel_group: NodeId,
    station_groups: Vec<(StationId, NodeId)>,
    stations: Vec<Box<dyn Station>>,
}

impl SceneComposer {
    pub fn new(
        layout: StationLayout,
        smoothing: TravelSmoothing,
        textures: &mut TextureRegistry,
        assets: &AssetResolver,
    ) -> Self {
        let mut graph = SceneGraph::new();
        let travel_group = graph.add_root_group("travel", Transform::default());
        let mut station_groups = Vec::with_capacity(layout.entries().len());
        let mut stations = Vec::with_capacity(layout.entries().len());
        {
            let mut ctx = BuildContext {
                graph: &mut graph,
                textures,
                assets,
            };
            for &(id, z) in layout.entries() {
                let group = ctx
                    .graph
                    .add_group(travel_group, id.name(), Transform::at(0.0, 0.0, z));
                stations.push(build_station(id, &mut ctx, group));
                station_groups.push((id, group));
            }
        }
        log::info!(
            "[scene] built {} stations, {} nodes, travel distance {}",
            stations.len(),
            graph.len(),
            layout.total_distance()
        );
        let travel = CameraTravel::new(layout.total_distance(), smoothing);
        Self {
            graph,
            layout,
            travel,
            travel_group,
            station_groups,
            stations,
        }
    }

    /// One frame: step the travel position, apply it to the travel group and
    /// advance every station.
    pub fn tick(&mut self, dt_sec: f32, progress: ScrollProgress) {
        let z = self.travel.step(progress, dt_sec);
        self.graph.transform_mut(self.travel_group).translation.z = z;
        for station in &mut self.stations {
            station.advance(&mut self.graph, dt_sec, progress);
        }
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn layout(&self) -> &StationLayout {
        &self.layout
    }

    pub fn travel(&self) -> &CameraTravel {
        &self.travel
    }

    pub fn travel_group(&self) -> NodeId {
        self.travel_group
    }

    pub fn station_group(&self, id: StationId) -> Option<NodeId> {
        self.station_groups
            .iter()
            .find(|(sid, _)| *sid == id)
            .map(|(_, g)| *g)
    }

    pub fn stations(&self) -> &[Box<dyn Station>] {
        &self.stations
    }

    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.stations.iter().flat_map(|s| s.labels().iter())
    }
}
