use crate::feed::loader::FeedSource;
use crate::feed::model::FeatureCollection;
use crate::legend::Legend;
use crate::marker::mapper::MarkerMapper;
use crate::prelude::{FeedError, SessionError, SessionResult};
use crate::surface::{MapSurface, TileLayer, Viewport};
use crate::telemetry::{LogManager, MetricsRecorder};

/// Outcome of one marker pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub markers: usize,
    pub skipped: usize,
}

/// Owns the rendering surface and drives a single load through it:
/// fetch, map every feature in order, then draw the legend.
pub struct MapSession<S: MapSurface> {
    surface: S,
    mapper: MarkerMapper,
    loaded: bool,
    logger: LogManager,
    metrics: MetricsRecorder,
}

impl<S: MapSurface> MapSession<S> {
    /// Sets the default view and base tile layer on `surface`. The base
    /// layer stays regardless of what happens to the load.
    pub fn new(surface: S) -> Self {
        Self::with_mapper(surface, MarkerMapper::default())
    }

    pub fn with_mapper(mut surface: S, mapper: MarkerMapper) -> Self {
        surface.set_view(&Viewport::default());
        surface.add_tile_layer(&TileLayer::openstreetmap());
        Self {
            surface,
            mapper,
            loaded: false,
            logger: LogManager::new(),
            metrics: MetricsRecorder::new(),
        }
    }

    /// Fetches once from `source` and renders the result. A failed fetch is
    /// logged here and leaves the surface with its base layer only.
    pub async fn run<F: FeedSource>(&mut self, source: &F) -> SessionResult<RenderSummary> {
        if self.loaded {
            return Err(SessionError::AlreadyLoaded);
        }
        match source.fetch().await {
            Ok(collection) => self.render_collection(&collection),
            Err(err) => {
                self.record_failure(&err);
                Err(err.into())
            }
        }
    }

    /// Logs a failed load. Markers and legend are never drawn afterwards.
    pub fn record_failure(&mut self, err: &FeedError) {
        self.loaded = true;
        self.metrics.record_error();
        self.logger.error(&err.to_string());
    }

    /// Draws one marker per usable feature in collection order, then the legend.
    /// Features without a magnitude or position are skipped with a warning.
    pub fn render_collection(
        &mut self,
        collection: &FeatureCollection,
    ) -> SessionResult<RenderSummary> {
        if self.loaded {
            return Err(SessionError::AlreadyLoaded);
        }
        self.loaded = true;

        let mut summary = RenderSummary::default();
        for (index, feature) in collection.features.iter().enumerate() {
            match self.mapper.map_feature(index, feature) {
                Ok(marker) => {
                    self.surface.add_marker(&marker);
                    self.metrics.record_marker();
                    summary.markers += 1;
                }
                Err(err) => {
                    self.logger.warn(&format!("skipping feature: {err}"));
                    self.metrics.record_skipped();
                    summary.skipped += 1;
                }
            }
        }

        self.surface.add_legend(&Legend::from_scale(self.mapper.scale()));
        self.logger.record(&format!(
            "rendered {} markers ({} skipped)",
            summary.markers, summary.skipped
        ));
        Ok(summary)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}
