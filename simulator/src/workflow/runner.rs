use crate::generator::catalog::build_catalog_from_config;
use crate::generator::scenarios::reference_catalog;
use crate::workflow::config::WorkflowConfig;
use quakecore::feed::{FeatureCollection, FeedSource};
use quakecore::marker::DEEP_COLOR;
use quakecore::surface::HtmlSurface;
use quakecore::telemetry::Metrics;
use quakecore::{MapSession, RenderSummary};

pub struct WorkflowResult {
    pub summary: Option<RenderSummary>,
    pub feed_error: Option<String>,
    pub deep_markers: usize,
    pub metrics: Metrics,
    pub page: String,
}

impl WorkflowResult {
    pub fn report_line(&self) -> String {
        match (&self.summary, &self.feed_error) {
            (Some(summary), _) => format!(
                "markers={} deep={} skipped={}\n",
                summary.markers, self.deep_markers, summary.skipped
            ),
            (None, Some(err)) => format!("load failed: {err}\n"),
            (None, None) => "load produced no outcome\n".into(),
        }
    }
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    /// Catalog the config asks for when not running against the live feed.
    pub fn catalog(&self) -> anyhow::Result<FeatureCollection> {
        if self.config.reference {
            Ok(reference_catalog())
        } else {
            build_catalog_from_config(&self.config.generator)
        }
    }

    /// Runs one map session against `source` and renders it as a Leaflet page.
    /// A failed load is reported in the result, not as an error.
    pub async fn execute<F: FeedSource>(&self, source: &F) -> WorkflowResult {
        let mut session = MapSession::new(HtmlSurface::new());
        let outcome = session.run(source).await;
        let metrics = session.metrics().snapshot();
        let surface = session.into_surface();
        let deep_markers = surface
            .markers()
            .iter()
            .filter(|marker| marker.style.fill_color == DEEP_COLOR)
            .count();

        let (summary, feed_error) = match outcome {
            Ok(summary) => (Some(summary), None),
            Err(err) => (None, Some(err.to_string())),
        };

        WorkflowResult {
            summary,
            feed_error,
            deep_markers,
            metrics,
            page: surface.render(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quakecore::feed::StaticFeed;

    #[tokio::test]
    async fn runner_renders_reference_catalog() {
        let cfg = WorkflowConfig {
            reference: true,
            ..Default::default()
        };
        let runner = Runner::new(cfg);
        let feed = StaticFeed::new(runner.catalog().unwrap());
        let result = runner.execute(&feed).await;

        let summary = result.summary.unwrap();
        assert_eq!(summary.markers, 4);
        assert_eq!(summary.skipped, 1);
        assert_eq!(result.deep_markers, 1);
        assert_eq!(result.metrics.features_skipped, 1);
        assert!(result.page.contains("L.circleMarker"));
        assert!(result.page.contains("bottomright"));
    }

    #[tokio::test]
    async fn runner_renders_generated_catalog() {
        let cfg = WorkflowConfig::from_args(16, 2);
        let runner = Runner::new(cfg);
        let feed = StaticFeed::new(runner.catalog().unwrap());
        let result = runner.execute(&feed).await;
        assert_eq!(result.summary.unwrap().markers, 16);
        assert!(result.report_line().starts_with("markers=16"));
    }
}
