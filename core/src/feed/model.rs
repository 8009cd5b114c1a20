use serde::{Deserialize, Serialize};

fn collection_kind() -> String {
    "FeatureCollection".into()
}

fn feature_kind() -> String {
    "Feature".into()
}

fn point_kind() -> String {
    "Point".into()
}

/// geoJSON feature collection as served by the USGS summary feeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default = "collection_kind")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<FeedMetadata>,
    pub features: Vec<Feature>,
}

impl Default for FeatureCollection {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            kind: collection_kind(),
            metadata: None,
            features,
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Header block the USGS feed attaches to every collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedMetadata {
    pub generated: Option<i64>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub status: Option<u16>,
    pub count: Option<usize>,
}

/// One earthquake event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type", default = "feature_kind")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

impl Feature {
    /// Builds a point feature; `depth` becomes the third coordinate when present.
    pub fn point(lng: f64, lat: f64, depth: Option<f64>, magnitude: Option<f64>) -> Self {
        let mut coordinates = vec![Some(lng), Some(lat)];
        if depth.is_some() {
            coordinates.push(depth);
        }
        Self {
            kind: feature_kind(),
            id: None,
            properties: Properties {
                mag: magnitude,
                ..Default::default()
            },
            geometry: Some(Geometry {
                kind: point_kind(),
                coordinates,
            }),
        }
    }

    pub fn magnitude(&self) -> Option<f64> {
        self.properties.mag
    }

    /// Raw coordinates; the feed may publish `null` in any slot.
    pub fn coordinates(&self) -> &[Option<f64>] {
        self.geometry
            .as_ref()
            .map(|geometry| geometry.coordinates.as_slice())
            .unwrap_or_default()
    }

    /// Kilometers below the surface, taken from the third coordinate.
    pub fn depth(&self) -> Option<f64> {
        self.coordinates().get(2).copied().flatten()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Properties {
    pub mag: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Point geometry: `[longitude, latitude, depth?]`, each slot nullable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type", default = "point_kind")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Vec<Option<f64>>,
}
