use std::fs;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::models::{KnownMatch, reference_matches};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    /// Empty string = stdout only, no file layer
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    /// When false, the crate's own spans are capped at warn so the timed
    /// loop runs without log formatting in it
    pub enable_tracing: bool,
    pub bench: BenchSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: String::new(),
            log_file: "rulebench.log".to_string(),
            use_json: false,
            rotation: "daily".to_string(),
            enable_tracing: true,
            bench: BenchSettings::default(),
        }
    }
}

/// Benchmark settings as they appear under `bench:` in the config file
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct BenchSettings {
    /// "eval", "indexed" or "both"
    pub scenario: String,
    pub population: usize,
    pub warmup_iterations: u32,
    pub measured_iterations: u32,
    /// Noise-label seed; omit (`~`) for fresh labels every run
    pub seed: Option<u64>,
    pub known_matches: Vec<KnownMatch>,
}

impl Default for BenchSettings {
    fn default() -> Self {
        Self {
            scenario: "both".to_string(),
            population: 1000,
            warmup_iterations: 10,
            measured_iterations: 10,
            seed: Some(1),
            known_matches: reference_matches(),
        }
    }
}

impl AppConfig {
    /// Load `config/{env}.yaml`. Missing keys fall back to defaults;
    /// a missing or malformed file is a startup fault.
    pub fn load(env: &str) -> anyhow::Result<Self> {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config yaml: {}", config_path))
    }
}
