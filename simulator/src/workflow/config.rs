use crate::generator::catalog::GeneratorConfig;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub generator: GeneratorConfig,
    /// Render the fixed reference events instead of a random catalog.
    pub reference: bool,
    /// Load from the public USGS feed instead of a synthetic catalog.
    pub live: bool,
    /// Where to write the rendered Leaflet page.
    pub export: Option<PathBuf>,
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(events: usize, seed: u64) -> Self {
        Self {
            generator: GeneratorConfig {
                events,
                seed,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}
