use crate::feed_bridge::model::{FailureRequest, FeedState};
use crate::generator::catalog::{build_catalog_from_config, GeneratorConfig};
use anyhow::anyhow;
use log::{error, info};
use quakecore::feed::FeatureCollection;
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::{
    http::StatusCode,
    reply::{self, Json, WithStatus},
    Filter,
};

pub type SharedFeedState = Arc<RwLock<FeedState>>;

pub fn feed_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

/// Only client and server error codes reproduce a failed load.
pub fn is_failure_status(code: u16) -> bool {
    (400..600).contains(&code)
}

fn error_reply(status: StatusCode, message: impl Into<String>) -> WithStatus<Json> {
    reply::with_status(reply::json(&json!({ "error": message.into() })), status)
}

fn poisoned() -> WithStatus<Json> {
    error_reply(StatusCode::INTERNAL_SERVER_ERROR, "feed state lock poisoned")
}

fn serve_feed(state: SharedFeedState) -> WithStatus<Json> {
    let Ok(mut guard) = state.write() else {
        return poisoned();
    };
    guard.requests_served += 1;
    if let Some(code) = guard.failure_status {
        let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return error_reply(status, format!("simulated failure {code}"));
    }
    reply::with_status(reply::json(&guard.collection), StatusCode::OK)
}

fn ingest_config(config: GeneratorConfig, state: SharedFeedState) -> WithStatus<Json> {
    let collection = match build_catalog_from_config(&config) {
        Ok(collection) => collection,
        Err(err) => {
            error!("ingest-config error: {err}");
            return error_reply(StatusCode::BAD_REQUEST, err.to_string());
        }
    };
    let events = collection.len();
    let Ok(mut guard) = state.write() else {
        return poisoned();
    };
    guard.collection = collection;
    if let Some(name) = config.scenario.as_ref() {
        info!("scenario {name} -> {events} events");
    }
    reply::with_status(
        reply::json(&json!({
            "status": "ok",
            "events": events,
            "description": config.description.clone().unwrap_or_default()
        })),
        StatusCode::OK,
    )
}

fn set_failure(request: FailureRequest, state: SharedFeedState) -> WithStatus<Json> {
    if let Some(code) = request.status {
        if !is_failure_status(code) {
            return error_reply(
                StatusCode::BAD_REQUEST,
                format!("failure status must be 4xx or 5xx, got {code}"),
            );
        }
    }
    let Ok(mut guard) = state.write() else {
        return poisoned();
    };
    guard.failure_status = request.status;
    reply::with_status(
        reply::json(&json!({ "status": "ok", "failure_status": request.status })),
        StatusCode::OK,
    )
}

/// `GET /feed`, `POST /ingest-config` and `POST /failure`.
pub fn routes(
    state: SharedFeedState,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let state_filter = warp::any().map(move || state.clone());

    let feed_route = warp::path("feed")
        .and(warp::path::end())
        .and(warp::get())
        .and(state_filter.clone())
        .map(serve_feed);

    let config_route = warp::path("ingest-config")
        .and(warp::post())
        .and(warp::body::json())
        .and(state_filter.clone())
        .map(ingest_config);

    let failure_route = warp::path("failure")
        .and(warp::post())
        .and(warp::body::json())
        .and(state_filter)
        .map(set_failure);

    feed_route.or(config_route).or(failure_route)
}

/// Bridge that hosts the simulated feed endpoint.
pub struct FeedBridge {
    state: SharedFeedState,
}

impl FeedBridge {
    /// Serves `state` on `addr` from a background thread.
    pub fn spawn(state: FeedState, addr: SocketAddr) -> Self {
        let state = Arc::new(RwLock::new(state));
        let filter = routes(state.clone());

        thread::spawn(move || match Builder::new_current_thread().enable_all().build() {
            Ok(runtime) => runtime.block_on(warp::serve(filter).run(addr)),
            Err(err) => error!("failed to build feed runtime: {err}"),
        });

        Self { state }
    }

    pub fn publish(&self, collection: FeatureCollection) -> anyhow::Result<()> {
        let mut guard = self
            .state
            .write()
            .map_err(|_| anyhow!("feed state lock poisoned"))?;
        guard.collection = collection;
        info!("serving {} events", guard.collection.len());
        Ok(())
    }

    pub fn publish_status(&self, message: &str) {
        info!("{}", message);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> FeedState {
        self.state.read().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::catalog::build_catalog;
    use crate::generator::scenarios::reference_catalog;
    use quakecore::feed::FeedLoader;
    use quakecore::prelude::{FeedError, SessionError};
    use quakecore::surface::{RecordingSurface, TileLayer};
    use quakecore::MapSession;

    fn serve(state: FeedState) -> (SharedFeedState, String) {
        let shared = Arc::new(RwLock::new(state));
        let (addr, server) =
            warp::serve(routes(shared.clone())).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);
        (shared, format!("http://{addr}/feed"))
    }

    #[tokio::test]
    async fn session_renders_served_catalog() {
        let (shared, endpoint) = serve(FeedState::new(reference_catalog(), None));
        let mut session = MapSession::new(RecordingSurface::new());
        let summary = session
            .run(&FeedLoader::with_endpoint(endpoint))
            .await
            .unwrap();

        assert_eq!(summary.markers, 4);
        assert_eq!(summary.skipped, 1);
        assert!(session.surface().legend.is_some());
        assert_eq!(shared.read().unwrap().requests_served, 1);
    }

    #[tokio::test]
    async fn server_error_leaves_base_layer_only() {
        let (_, endpoint) = serve(FeedState::new(reference_catalog(), Some(500)));
        let mut session = MapSession::new(RecordingSurface::new());
        let err = session
            .run(&FeedLoader::with_endpoint(endpoint))
            .await
            .unwrap_err();

        assert_eq!(err, SessionError::Feed(FeedError::Status(500)));
        assert_eq!(session.metrics().snapshot().load_errors, 1);
        let surface = session.into_surface();
        assert!(surface.markers.is_empty());
        assert!(surface.legend.is_none());
        assert_eq!(surface.tile_layers, vec![TileLayer::openstreetmap()]);
    }

    #[test]
    fn failure_route_rejects_success_codes() {
        let shared = Arc::new(RwLock::new(FeedState::default()));
        let response = set_failure(FailureRequest { status: Some(200) }, shared.clone());
        assert_eq!(
            warp::Reply::into_response(response).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(shared.read().unwrap().failure_status, None);
    }

    #[test]
    fn failure_status_accepts_only_error_codes() {
        assert!(is_failure_status(400));
        assert!(is_failure_status(500));
        assert!(is_failure_status(599));
        assert!(!is_failure_status(200));
        assert!(!is_failure_status(302));
        assert!(!is_failure_status(600));
    }

    #[tokio::test]
    async fn ingest_config_regenerates_catalog() {
        let shared = Arc::new(RwLock::new(FeedState::default()));
        let response = warp::test::request()
            .method("POST")
            .path("/ingest-config")
            .json(&json!({ "events": 12, "seed": 5 }))
            .reply(&routes(shared.clone()))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(shared.read().unwrap().collection.len(), 12);
    }

    #[test]
    fn bridge_publish_replaces_catalog() {
        let bridge = FeedBridge::spawn(FeedState::default(), ([127, 0, 0, 1], 0).into());
        bridge.publish(build_catalog(9, 1).unwrap()).unwrap();
        assert_eq!(bridge.snapshot().collection.len(), 9);
    }
}
