use anyhow::{ensure, Context};
use quakecore::feed::{Feature, FeatureCollection, FeedMetadata};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// First synthetic origin time, 2024-01-01T00:00:00Z in milliseconds.
const EPOCH_START_MS: i64 = 1_704_067_200_000;
const EVENT_SPACING_MS: i64 = 60_000;

/// Configuration for generating a synthetic earthquake catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub events: usize,
    pub seed: u64,
    pub min_magnitude: f64,
    pub max_magnitude: f64,
    pub max_depth: f64,
    /// Share of events published without a depth coordinate.
    pub missing_depth_ratio: f64,
    pub description: Option<String>,
    pub scenario: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            events: 250,
            seed: 0,
            min_magnitude: -0.5,
            max_magnitude: 7.5,
            max_depth: 700.0,
            missing_depth_ratio: 0.02,
            description: None,
            scenario: None,
        }
    }
}

impl GeneratorConfig {
    fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.min_magnitude < self.max_magnitude,
            "magnitude range {}..{} is empty",
            self.min_magnitude,
            self.max_magnitude
        );
        ensure!(self.max_depth > 0.0, "max depth must be positive");
        ensure!(
            (0.0..=1.0).contains(&self.missing_depth_ratio),
            "missing depth ratio must be within 0..=1"
        );
        Ok(())
    }
}

/// Rounds to the two decimals the USGS feed publishes.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn build_feature(rng: &mut StdRng, config: &GeneratorConfig, index: usize) -> anyhow::Result<Feature> {
    let lng = round2(rng.gen_range(-180.0..180.0));
    let lat = round2(rng.gen_range(-80.0..80.0));
    let magnitude = round2(rng.gen_range(config.min_magnitude..config.max_magnitude));
    // Cubing a uniform sample keeps most events shallow, as in real catalogs.
    let depth = if rng.gen_bool(config.missing_depth_ratio) {
        None
    } else {
        Some(round2(config.max_depth * rng.gen::<f64>().powi(3)))
    };

    let offset = i64::try_from(index).context("event index overflows timestamp")?;
    let mut feature = Feature::point(lng, lat, depth, Some(magnitude));
    feature.id = Some(format!("sim{}-{:05}", config.seed, index));
    feature.properties.place = Some(format!("synthetic event {index}"));
    feature.properties.time = Some(EPOCH_START_MS + offset * EVENT_SPACING_MS);
    feature.properties.title = Some(format!("M {magnitude} - synthetic event {index}"));
    Ok(feature)
}

pub fn build_catalog_from_config(config: &GeneratorConfig) -> anyhow::Result<FeatureCollection> {
    config.validate()?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let features = (0..config.events)
        .map(|index| build_feature(&mut rng, config, index))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut collection = FeatureCollection::new(features);
    collection.metadata = Some(FeedMetadata {
        generated: Some(EPOCH_START_MS),
        url: None,
        title: Some(
            config
                .scenario
                .clone()
                .unwrap_or_else(|| "Synthetic Earthquakes".into()),
        ),
        status: Some(200),
        count: Some(config.events),
    });
    Ok(collection)
}

#[allow(dead_code)]
pub fn build_catalog(events: usize, seed: u64) -> anyhow::Result<FeatureCollection> {
    let config = GeneratorConfig {
        events,
        seed,
        ..Default::default()
    };
    build_catalog_from_config(&config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_builds_requested_event_count() {
        let catalog = build_catalog(64, 7).unwrap();
        assert_eq!(catalog.len(), 64);
        assert_eq!(catalog.metadata.unwrap().count, Some(64));
    }

    #[test]
    fn same_seed_reproduces_catalog() {
        assert_eq!(build_catalog(32, 312).unwrap(), build_catalog(32, 312).unwrap());
        assert_ne!(build_catalog(32, 312).unwrap(), build_catalog(32, 313).unwrap());
    }

    #[test]
    fn generated_events_stay_within_configured_ranges() {
        let config = GeneratorConfig {
            events: 200,
            seed: 3,
            min_magnitude: 1.0,
            max_magnitude: 2.0,
            max_depth: 50.0,
            missing_depth_ratio: 0.0,
            ..Default::default()
        };
        let catalog = build_catalog_from_config(&config).unwrap();
        for feature in &catalog.features {
            let magnitude = feature.magnitude().unwrap();
            assert!((1.0..=2.0).contains(&magnitude));
            let depth = feature.depth().unwrap();
            assert!((0.0..=50.0).contains(&depth));
        }
    }

    #[test]
    fn full_missing_depth_ratio_drops_every_depth() {
        let config = GeneratorConfig {
            events: 20,
            missing_depth_ratio: 1.0,
            ..Default::default()
        };
        let catalog = build_catalog_from_config(&config).unwrap();
        assert!(catalog.features.iter().all(|f| f.depth().is_none()));
    }

    #[test]
    fn empty_magnitude_range_is_rejected() {
        let config = GeneratorConfig {
            min_magnitude: 3.0,
            max_magnitude: 3.0,
            ..Default::default()
        };
        assert!(build_catalog_from_config(&config).is_err());
    }
}
