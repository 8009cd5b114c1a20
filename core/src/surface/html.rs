use crate::legend::Legend;
use crate::marker::mapper::{CircleMarker, MarkerStyle};
use crate::prelude::LatLng;
use crate::surface::{MapSurface, TileLayer, Viewport};
use serde::Serialize;

const LEAFLET_VERSION: &str = "1.9.4";

#[derive(Serialize)]
struct MarkerEntry<'a> {
    position: [f64; 2],
    style: &'a MarkerStyle,
    popup: String,
}

/// Surface that writes a standalone Leaflet page.
#[derive(Debug, Clone, Default)]
pub struct HtmlSurface {
    viewport: Viewport,
    tile_layers: Vec<TileLayer>,
    markers: Vec<CircleMarker>,
    legend: Option<Legend>,
}

impl HtmlSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markers(&self) -> &[CircleMarker] {
        &self.markers
    }

    pub fn has_legend(&self) -> bool {
        self.legend.is_some()
    }

    pub fn render(&self) -> String {
        let mut script = String::new();
        let LatLng { lat, lng } = self.viewport.center;
        script.push_str(&format!(
            "const map = L.map('map').setView([{lat}, {lng}], {});\n",
            self.viewport.zoom
        ));

        for layer in &self.tile_layers {
            script.push_str(&format!(
                "L.tileLayer({}, {{ attribution: {} }}).addTo(map);\n",
                js_string(&layer.url_template),
                js_string(&layer.attribution)
            ));
        }

        if !self.markers.is_empty() {
            let entries: Vec<MarkerEntry<'_>> = self
                .markers
                .iter()
                .map(|marker| MarkerEntry {
                    position: [marker.position.lat, marker.position.lng],
                    style: &marker.style,
                    popup: marker.popup.html(),
                })
                .collect();
            script.push_str(&format!("const markers = {};\n", js_value(&entries)));
            script.push_str(
                "markers.forEach(m => L.circleMarker(m.position, m.style).addTo(map).bindPopup(m.popup));\n",
            );
        }

        if let Some(legend) = &self.legend {
            script.push_str(&format!(
                "const legend = L.control({{ position: '{}' }});\n",
                legend.position.as_leaflet()
            ));
            script.push_str(&format!(
                "legend.onAdd = function () {{\n  const div = L.DomUtil.create('div', 'info legend');\n  div.innerHTML = {};\n  return div;\n}};\nlegend.addTo(map);\n",
                js_string(&legend.html())
            ));
        }

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Earthquakes, past week</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@{LEAFLET_VERSION}/dist/leaflet.css">
<style>
html, body, #map {{ height: 100%; margin: 0; }}
.legend {{ background: white; padding: 6px 8px; line-height: 18px; color: #555; }}
.legend i {{ width: 18px; height: 18px; float: left; margin-right: 8px; opacity: 0.8; }}
</style>
</head>
<body>
<div id="map"></div>
<script src="https://unpkg.com/leaflet@{LEAFLET_VERSION}/dist/leaflet.js"></script>
<script>
{script}</script>
</body>
</html>
"#
        )
    }
}

impl MapSurface for HtmlSurface {
    fn set_view(&mut self, viewport: &Viewport) {
        self.viewport = *viewport;
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

/// JSON literal safe to inline in a `<script>` element.
fn js_value<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".into())
        .replace("</", "<\\/")
}

fn js_string(value: &str) -> String {
    js_value(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::mapper::MarkerMapper;
    use crate::feed::model::Feature;

    #[test]
    fn base_page_has_view_and_tiles_only() {
        let mut surface = HtmlSurface::new();
        surface.set_view(&Viewport::default());
        surface.add_tile_layer(&TileLayer::openstreetmap());
        let page = surface.render();
        assert!(page.contains("setView([0, 0], 2)"));
        assert!(page.contains("tile.openstreetmap.org"));
        assert!(page.contains("© OpenStreetMap contributors"));
        assert!(!page.contains("circleMarker"));
        assert!(!page.contains("L.control"));
    }

    #[test]
    fn markers_and_legend_are_emitted() {
        let mut surface = HtmlSurface::new();
        let marker = MarkerMapper::default()
            .map_feature(0, &Feature::point(10.0, 20.0, Some(150.0), Some(2.0)))
            .unwrap();
        surface.add_marker(&marker);
        surface.add_legend(&Legend::default());
        let page = surface.render();
        assert!(page.contains("\"position\":[20.0,10.0]"));
        assert!(page.contains("\"fillColor\":\"#ff4500\""));
        assert!(page.contains("bindPopup(m.popup)"));
        assert!(page.contains("position: 'bottomright'"));
        assert_eq!(surface.markers().len(), 1);
        assert!(surface.has_legend());
    }

    #[test]
    fn script_close_tags_are_escaped() {
        assert_eq!(js_string("</script>"), "\"<\\/script>\"");
    }
}
