//! Spherical Web Mercator, the projection behind the OSM tile scheme.

use crate::config::TILE_SIZE;
use crate::prelude::LatLng;
use std::f64::consts::PI;

/// Latitude at which the Mercator world becomes square.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Edge length of the whole world in pixels at `zoom`.
pub fn world_size(zoom: u8) -> f64 {
    f64::from(TILE_SIZE) * 2f64.powi(i32::from(zoom))
}

/// Pixel coordinates of `position` at `zoom`, origin at the north-west corner.
pub fn project(position: LatLng, zoom: u8) -> (f64, f64) {
    let size = world_size(zoom);
    let lat = position.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    let sin = lat.to_radians().sin();
    let x = (position.lng + 180.0) / 360.0 * size;
    let y = (0.5 - ((1.0 + sin) / (1.0 - sin)).ln() / (4.0 * PI)) * size;
    (x, y)
}
