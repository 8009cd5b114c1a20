pub mod loader;
pub mod model;

pub use loader::{decode_collection, FeedLoader, FeedSource, StaticFeed};
pub use model::{Feature, FeatureCollection, FeedMetadata, Geometry, Properties};
