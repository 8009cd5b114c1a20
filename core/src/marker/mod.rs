pub mod color;
pub mod mapper;
pub mod scale;

pub use color::Color;
pub use mapper::{label, size, CircleMarker, MarkerMapper, MarkerStyle, Popup};
pub use scale::{DepthBand, DepthScale, DEEP_COLOR, SHALLOW_COLOR};
