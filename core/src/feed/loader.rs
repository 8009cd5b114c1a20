use crate::config::FEED_URL;
use crate::feed::model::FeatureCollection;
use crate::prelude::{FeedError, FeedResult};
use std::future::Future;

/// Anything that can deliver one feature collection per load.
pub trait FeedSource {
    fn fetch(&self) -> impl Future<Output = FeedResult<FeatureCollection>> + Send;
}

/// HTTP loader for the geoJSON feed. Issues a single GET per call, no retry.
#[derive(Debug, Clone)]
pub struct FeedLoader {
    client: reqwest::Client,
    endpoint: String,
}

impl FeedLoader {
    /// Loader bound to the fixed USGS endpoint.
    pub fn new() -> Self {
        Self::with_endpoint(FEED_URL)
    }

    /// Loader bound to another endpoint, such as the local feed simulator.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn load(&self) -> FeedResult<FeatureCollection> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| FeedError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FeedError::Transport(e.to_string()))?;
        decode_collection(&body)
    }
}

impl Default for FeedLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedSource for FeedLoader {
    fn fetch(&self) -> impl Future<Output = FeedResult<FeatureCollection>> + Send {
        self.load()
    }
}

/// In-memory source that hands out a prepared collection.
#[derive(Debug, Clone)]
pub struct StaticFeed {
    collection: FeatureCollection,
}

impl StaticFeed {
    pub fn new(collection: FeatureCollection) -> Self {
        Self { collection }
    }
}

impl FeedSource for StaticFeed {
    fn fetch(&self) -> impl Future<Output = FeedResult<FeatureCollection>> + Send {
        std::future::ready(Ok(self.collection.clone()))
    }
}

pub fn decode_collection(body: &str) -> FeedResult<FeatureCollection> {
    serde_json::from_str(body).map_err(|e| FeedError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const USGS_SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "metadata": {
            "generated": 1700000000000,
            "url": "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson",
            "title": "USGS All Earthquakes, Past Week",
            "status": 200,
            "api": "1.10.3",
            "count": 3
        },
        "features": [
            {
                "type": "Feature",
                "properties": {"mag": 4.7, "place": "south of the Fiji Islands", "time": 1699999000000, "tsunami": 0},
                "geometry": {"type": "Point", "coordinates": [-178.3, -24.1, 541.2]},
                "id": "us7000abcd"
            },
            {
                "type": "Feature",
                "properties": {"mag": 1.12, "place": "8 km NW of The Geysers, CA"},
                "geometry": {"type": "Point", "coordinates": [-122.8, 38.8, 2.1]},
                "id": "nc73900000"
            },
            {
                "type": "Feature",
                "properties": {"mag": null},
                "geometry": {"type": "Point", "coordinates": [-150.1, 61.2]},
                "id": "ak023000"
            }
        ],
        "bbox": [-178.3, -24.1, 2.1, -122.8, 61.2, 541.2]
    }"#;

    #[test]
    fn decodes_usgs_summary_feed() {
        let collection = decode_collection(USGS_SAMPLE).unwrap();
        assert_eq!(collection.len(), 3);
        assert_eq!(collection.metadata.as_ref().unwrap().count, Some(3));
        let first = &collection.features[0];
        assert_eq!(first.magnitude(), Some(4.7));
        assert_eq!(first.depth(), Some(541.2));
        assert_eq!(first.id.as_deref(), Some("us7000abcd"));
    }

    #[test]
    fn null_magnitude_and_missing_depth_decode_as_absent() {
        let collection = decode_collection(USGS_SAMPLE).unwrap();
        let last = &collection.features[2];
        assert_eq!(last.magnitude(), None);
        assert_eq!(last.depth(), None);
    }

    #[test]
    fn non_json_body_is_a_decode_error() {
        let err = decode_collection("<html>maintenance</html>").unwrap_err();
        assert!(matches!(err, FeedError::Decode(_)));
    }

    #[test]
    fn error_object_without_features_is_a_decode_error() {
        let err = decode_collection(r#"{"error":"simulated failure"}"#).unwrap_err();
        assert!(matches!(err, FeedError::Decode(_)));
    }

    #[test]
    fn null_depth_does_not_fail_the_load() {
        let body = r#"{"features":[
            {"properties":{"mag":1.9},"geometry":{"type":"Point","coordinates":[-117.5,35.7,null]}},
            {"properties":{"mag":3.0},"geometry":{"type":"Point","coordinates":[-70.2,-20.1,110.0]}}
        ]}"#;
        let collection = decode_collection(body).unwrap();
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.features[0].depth(), None);
        assert_eq!(collection.features[1].depth(), Some(110.0));
    }

    #[test]
    fn default_loader_targets_usgs_feed() {
        assert_eq!(FeedLoader::default().endpoint(), FEED_URL);
    }

    #[tokio::test]
    async fn static_feed_returns_collection() {
        let feed = StaticFeed::new(decode_collection(USGS_SAMPLE).unwrap());
        let collection = feed.fetch().await.unwrap();
        assert_eq!(collection.len(), 3);
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_error() {
        let loader = FeedLoader::with_endpoint("http://127.0.0.1:1/feed");
        let err = loader.load().await.unwrap_err();
        assert!(matches!(err, FeedError::Transport(_)));
    }
}
