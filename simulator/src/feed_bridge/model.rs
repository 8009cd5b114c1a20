use quakecore::feed::FeatureCollection;
use serde::{Deserialize, Serialize};

/// What the simulated feed endpoint currently serves.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedState {
    pub collection: FeatureCollection,
    /// When set, `/feed` answers with this status instead of the catalog.
    pub failure_status: Option<u16>,
    pub requests_served: usize,
}

impl FeedState {
    pub fn new(collection: FeatureCollection, failure_status: Option<u16>) -> Self {
        Self {
            collection,
            failure_status,
            requests_served: 0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FailureRequest {
    pub status: Option<u16>,
}
