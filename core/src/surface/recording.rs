use crate::legend::Legend;
use crate::marker::mapper::CircleMarker;
use crate::surface::{MapSurface, TileLayer, Viewport};

/// Surface that keeps every draw call, in order, for inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub viewport: Option<Viewport>,
    pub tile_layers: Vec<TileLayer>,
    pub markers: Vec<CircleMarker>,
    pub legend: Option<Legend>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MapSurface for RecordingSurface {
    fn set_view(&mut self, viewport: &Viewport) {
        self.viewport = Some(*viewport);
    }

    fn add_tile_layer(&mut self, layer: &TileLayer) {
        self.tile_layers.push(layer.clone());
    }

    fn add_marker(&mut self, marker: &CircleMarker) {
        self.markers.push(marker.clone());
    }

    fn add_legend(&mut self, legend: &Legend) {
        self.legend = Some(legend.clone());
    }
}
