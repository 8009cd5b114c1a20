use serde::{Deserialize, Serialize};

/// Geographic position in map order (latitude first).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Failure while loading the feed. Any of these aborts the whole load.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FeedError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("failed to fetch data, status code: {0}")]
    Status(u16),
    #[error("malformed feed body: {0}")]
    Decode(String),
}

pub type FeedResult<T> = Result<T, FeedError>;

/// A single feature that cannot be turned into a marker.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FeatureError {
    #[error("feature #{index} has no magnitude")]
    MissingMagnitude { index: usize },
    #[error("feature #{index} has {found} of 2 position coordinates")]
    MissingCoordinates { index: usize, found: usize },
}

/// Errors raised by a map session.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error(transparent)]
    Feed(#[from] FeedError),
    #[error("feed already rendered for this session")]
    AlreadyLoaded,
}

pub type SessionResult<T> = Result<T, SessionError>;
