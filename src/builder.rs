use crate::config::HarnessConfig;
use crate::error::Result;
use crate::harness::Harness;

pub struct HarnessBuilder {
    config: HarnessConfig,
}

impl Default for HarnessBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HarnessBuilder {
    pub fn new() -> Self {
        Self {
            config: HarnessConfig::default(),
        }
    }
    pub fn with_config(config: HarnessConfig) -> Self {
        Self { config }
    }
    pub fn full_runs(mut self, runs: usize) -> Self {
        self.config.full_runs = runs;
        self
    }
    pub fn scale_runs(mut self, runs: usize) -> Self {
        self.config.scale_runs = runs;
        self
    }
    pub fn checkpoints(mut self, checkpoints: usize) -> Self {
        self.config.checkpoints = checkpoints;
        self
    }
    pub fn build(self) -> Result<Harness> {
        Harness::new(self.config)
    }
}
