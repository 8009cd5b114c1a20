//! Fixed endpoints and viewport defaults.

use crate::prelude::LatLng;

/// USGS summary feed covering all events of the past week.
pub const FEED_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson";

pub const TILE_URL_TEMPLATE: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str = "© OpenStreetMap contributors";

/// Square tile edge in pixels, as used by the OSM tile scheme.
pub const TILE_SIZE: u32 = 256;

pub const DEFAULT_CENTER: LatLng = LatLng::new(0.0, 0.0);
pub const DEFAULT_ZOOM: u8 = 2;
