//! Core feed loading, marker mapping and rendering surfaces for the Rust earthquake map.
//!
//! A load is a single pass: the feed is fetched once, every feature is mapped
//! to a circle marker in input order, and the legend is drawn after the marker
//! pass. Rendering goes through the [`surface::MapSurface`] trait so the
//! mapping logic stays testable without a live viewport.

pub mod config;
pub mod feed;
pub mod legend;
pub mod marker;
pub mod prelude;
pub mod session;
pub mod surface;
pub mod telemetry;

pub use prelude::{FeatureError, FeedError, FeedResult, LatLng, SessionError, SessionResult};
pub use session::{MapSession, RenderSummary};
