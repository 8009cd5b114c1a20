use crate::feed::model::Feature;
use crate::marker::color::Color;
use crate::marker::scale::DepthScale;
use crate::prelude::{FeatureError, LatLng};
use serde::Serialize;
use std::fmt;

/// Marker radius per unit of magnitude.
pub const RADIUS_PER_MAGNITUDE: f64 = 5.0;

/// Marker radius for a magnitude. No clamping: zero and negative
/// magnitudes produce zero and negative radii.
pub fn size(magnitude: f64) -> f64 {
    magnitude * RADIUS_PER_MAGNITUDE
}

/// Popup content for a marker.
pub fn label(magnitude: f64, depth: Option<f64>) -> Popup {
    Popup { magnitude, depth }
}

/// Circle style in the shape Leaflet's `circleMarker` options expect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerStyle {
    pub radius: f64,
    pub fill_color: Color,
    #[serde(rename = "color")]
    pub stroke_color: Color,
    pub weight: f64,
    pub opacity: f64,
    pub fill_opacity: f64,
}

impl MarkerStyle {
    pub fn new(radius: f64, fill_color: Color) -> Self {
        Self {
            radius,
            fill_color,
            stroke_color: Color::BLACK,
            weight: 1.0,
            opacity: 1.0,
            fill_opacity: 0.8,
        }
    }
}

/// Magnitude and depth shown when a marker is opened. Values are rendered
/// verbatim; a missing depth reads `undefined`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Popup {
    pub magnitude: f64,
    pub depth: Option<f64>,
}

impl Popup {
    fn depth_text(&self) -> String {
        self.depth
            .map_or_else(|| "undefined".to_string(), |depth| depth.to_string())
    }

    pub fn lines(&self) -> [String; 2] {
        [
            format!("Magnitude: {}", self.magnitude),
            format!("Depth: {} km", self.depth_text()),
        ]
    }

    pub fn html(&self) -> String {
        format!(
            "<b>Magnitude:</b> {}<br><b>Depth:</b> {} km",
            self.magnitude,
            self.depth_text()
        )
    }
}

impl fmt::Display for Popup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [magnitude, depth] = self.lines();
        write!(f, "{magnitude}\n{depth}")
    }
}

/// Everything a surface needs to draw one event.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleMarker {
    pub position: LatLng,
    pub style: MarkerStyle,
    pub popup: Popup,
}

/// Pure feature-to-marker transform.
#[derive(Debug, Clone, Default)]
pub struct MarkerMapper {
    scale: DepthScale,
}

impl MarkerMapper {
    pub fn new(scale: DepthScale) -> Self {
        Self { scale }
    }

    pub fn scale(&self) -> &DepthScale {
        &self.scale
    }

    pub fn color(&self, depth: Option<f64>) -> Color {
        self.scale.color_for(depth)
    }

    /// Maps the feature at `index` of its collection. Features without a
    /// magnitude or without both longitude and latitude are rejected.
    pub fn map_feature(&self, index: usize, feature: &Feature) -> Result<CircleMarker, FeatureError> {
        let coordinates = feature.coordinates();
        let (lng, lat) = match coordinates {
            [Some(lng), Some(lat), ..] => (*lng, *lat),
            _ => {
                return Err(FeatureError::MissingCoordinates {
                    index,
                    found: coordinates.iter().take(2).flatten().count(),
                })
            }
        };
        let magnitude = feature
            .magnitude()
            .ok_or(FeatureError::MissingMagnitude { index })?;
        let depth = feature.depth();

        Ok(CircleMarker {
            position: LatLng::new(lat, lng),
            style: MarkerStyle::new(size(magnitude), self.color(depth)),
            popup: label(magnitude, depth),
        })
    }
}
