//! Rendering surfaces. The session owns exactly one surface and is its only writer.

pub mod html;
pub mod projection;
pub mod recording;

pub use html::HtmlSurface;
pub use recording::RecordingSurface;

use crate::config::{DEFAULT_CENTER, DEFAULT_ZOOM, TILE_ATTRIBUTION, TILE_URL_TEMPLATE};
use crate::legend::Legend;
use crate::marker::mapper::CircleMarker;
use crate::prelude::LatLng;

/// Drawing primitives a map renderer has to provide.
pub trait MapSurface {
    fn set_view(&mut self, viewport: &Viewport);
    fn add_tile_layer(&mut self, layer: &TileLayer);
    fn add_marker(&mut self, marker: &CircleMarker);
    fn add_legend(&mut self, legend: &Legend);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: u8,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// Raster base layer.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
}

impl TileLayer {
    pub fn openstreetmap() -> Self {
        Self {
            url_template: TILE_URL_TEMPLATE.into(),
            attribution: TILE_ATTRIBUTION.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ControlPosition {
    /// Name of the position in Leaflet's control options.
    pub fn as_leaflet(&self) -> &'static str {
        match self {
            ControlPosition::TopLeft => "topleft",
            ControlPosition::TopRight => "topright",
            ControlPosition::BottomLeft => "bottomleft",
            ControlPosition::BottomRight => "bottomright",
        }
    }
}
