//! Configuration for the palette engine.
//!
//! All tunable parameters are grouped by the component that consumes them.
//! Fixed thresholds (WCAG levels, color-distance limits) live in
//! [`crate::constants`].
//!
//! # Configuration Loading
//!
//! ```no_run
//! use vibecolor::EngineConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = EngineConfig::from_json_file(Path::new("vibecolor.json"))?;
//!
//! // Or use defaults with provider keys taken from the environment
//! let config = EngineConfig::from_env();
//! # Ok::<(), vibecolor::PaletteError>(())
//! ```
//!
//! # Configuration Sections
//!
//! - [`ExtractionConfig`]: sampling seed, grid, working-set and clustering budgets
//! - [`AnalyzerConfig`]: semantic analysis provider selection and request limits
//! - [`DefaultsConfig`]: values substituted for missing analysis fields

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::color::conversion::normalize_hex;
use crate::constants::defaults;
use crate::{PaletteError, Result};

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Dominant-color extraction
    pub extraction: ExtractionConfig,

    /// Semantic analysis provider
    pub analyzer: AnalyzerConfig,

    /// Fallback values
    pub defaults: DefaultsConfig,
}

/// Dominant-color extraction parameters.
///
/// The seed drives every random choice in the pipeline (region sampling,
/// working-set cap, k-means initialization); a fixed seed gives reproducible results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Random seed for sampling and clustering
    pub seed: u64,

    /// Longest image edge after downscaling
    pub max_dimension: u32,

    /// Sampling grid rows
    pub grid_rows: u32,

    /// Sampling grid columns
    pub grid_cols: u32,

    /// Pixels drawn from each grid cell
    pub pixels_per_region: usize,

    /// Working-set size limit before clustering
    pub max_working_pixels: usize,

    /// Independent k-means initializations
    pub n_init: usize,

    /// Iteration limit per k-means run
    pub max_iterations: usize,

    /// Centroid movement below which a run is converged
    pub convergence: f32,
}

impl ExtractionConfig {
    /// Check that every budget is positive and the convergence threshold is usable
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::InvalidParameter`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("extraction.max_dimension", self.max_dimension as usize),
            ("extraction.grid_rows", self.grid_rows as usize),
            ("extraction.grid_cols", self.grid_cols as usize),
            ("extraction.pixels_per_region", self.pixels_per_region),
            ("extraction.max_working_pixels", self.max_working_pixels),
            ("extraction.n_init", self.n_init),
            ("extraction.max_iterations", self.max_iterations),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(PaletteError::invalid_parameter(name, value));
            }
        }
        if !(self.convergence.is_finite() && self.convergence >= 0.0) {
            return Err(PaletteError::invalid_parameter("extraction.convergence", self.convergence));
        }
        Ok(())
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_dimension: 600,
            grid_rows: 4,
            grid_cols: 4,
            pixels_per_region: 3000,
            max_working_pixels: 25_000,
            n_init: 20,
            max_iterations: 500,
            convergence: 1e-5,
        }
    }
}

/// Semantic analysis provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Local keyword table, no network access
    #[default]
    Keyword,
    /// Groq OpenAI-compatible endpoint
    Groq,
    /// OpenAI chat completions
    OpenAi,
}

impl ProviderKind {
    pub fn default_endpoint(self) -> Option<&'static str> {
        match self {
            ProviderKind::Keyword => None,
            ProviderKind::Groq => Some("https://api.groq.com/openai/v1/chat/completions"),
            ProviderKind::OpenAi => Some("https://api.openai.com/v1/chat/completions"),
        }
    }

    pub fn default_model(self) -> Option<&'static str> {
        match self {
            ProviderKind::Keyword => None,
            ProviderKind::Groq => Some("llama-3.3-70b-versatile"),
            ProviderKind::OpenAi => Some("gpt-3.5-turbo"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKind::Keyword => "keyword",
            ProviderKind::Groq => "groq",
            ProviderKind::OpenAi => "openai",
        }
    }
}

/// Semantic analysis provider settings.
///
/// The API key is read from the environment or set programmatically and is
/// never written back to configuration files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub provider: ProviderKind,

    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Model name override
    pub model: Option<String>,

    /// Endpoint URL override
    pub endpoint: Option<String>,

    /// Request timeout; the keyword fallback is used once it elapses
    pub timeout_secs: u64,

    pub temperature: f32,

    pub max_tokens: u32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Keyword,
            api_key: None,
            model: None,
            endpoint: None,
            timeout_secs: defaults::MAX_TIMEOUT_SECS,
            temperature: 0.7,
            max_tokens: 300,
        }
    }
}

impl AnalyzerConfig {
    /// Provider timeout, clamped to 1..=10 seconds
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.clamp(1, defaults::MAX_TIMEOUT_SECS))
    }

    pub fn resolved_model(&self) -> Option<String> {
        self.model
            .clone()
            .or_else(|| self.provider.default_model().map(str::to_string))
    }

    pub fn resolved_endpoint(&self) -> Option<String> {
        self.endpoint
            .clone()
            .or_else(|| self.provider.default_endpoint().map(str::to_string))
    }
}

/// Values used when the semantic analysis leaves a field empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub base_color: String,
    pub prompt_mood: String,
    pub image_mood: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            base_color: defaults::BASE_COLOR.to_string(),
            prompt_mood: defaults::PROMPT_MOOD.to_string(),
            image_mood: defaults::IMAGE_MOOD.to_string(),
        }
    }
}

impl EngineConfig {
    /// Defaults with provider selection and overrides taken from the environment
    ///
    /// - `GROQ_API_KEY` selects Groq, else `OPENAI_API_KEY` selects OpenAI, else keyword mode
    /// - `VIBECOLOR_SEED` overrides the extraction seed
    /// - `VIBECOLOR_AI_TIMEOUT_SECS` overrides the provider timeout
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Apply environment-style overrides from an arbitrary lookup
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty("GROQ_API_KEY") {
            self.analyzer.provider = ProviderKind::Groq;
            self.analyzer.api_key = Some(key);
        } else if let Some(key) = non_empty("OPENAI_API_KEY") {
            self.analyzer.provider = ProviderKind::OpenAi;
            self.analyzer.api_key = Some(key);
        }

        if let Some(seed) = non_empty("VIBECOLOR_SEED").and_then(|v| v.trim().parse().ok()) {
            self.extraction.seed = seed;
        }
        if let Some(secs) = non_empty("VIBECOLOR_AI_TIMEOUT_SECS").and_then(|v| v.trim().parse().ok()) {
            self.analyzer.timeout_secs = secs;
        }
    }

    /// Check value ranges
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::InvalidParameter`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        self.extraction.validate()?;

        let timeout = self.analyzer.timeout_secs;
        if timeout == 0 || timeout > defaults::MAX_TIMEOUT_SECS {
            return Err(PaletteError::invalid_parameter("analyzer.timeout_secs", timeout));
        }
        if self.analyzer.provider != ProviderKind::Keyword && self.analyzer.api_key.is_none() {
            return Err(PaletteError::invalid_parameter(
                "analyzer.api_key",
                format!("missing for provider {}", self.analyzer.provider.as_str()),
            ));
        }

        if normalize_hex(&self.defaults.base_color).is_err() {
            return Err(PaletteError::invalid_parameter(
                "defaults.base_color",
                &self.defaults.base_color,
            ));
        }
        Ok(())
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| PaletteError::config(format!("Failed to read {}", path.display()), e))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| PaletteError::config(format!("Failed to parse {}", path.display()), e))?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PaletteError::config("Failed to serialize configuration", e))?;
        std::fs::write(path, json)
            .map_err(|e| PaletteError::config(format!("Failed to write {}", path.display()), e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.extraction.seed, 42);
        assert_eq!(config.analyzer.provider, ProviderKind::Keyword);
        assert_eq!(config.defaults.base_color, "#6366F1");
    }

    #[test]
    fn test_env_prefers_groq() {
        let mut config = EngineConfig::default();
        config.apply_env(lookup(&[("GROQ_API_KEY", "gk"), ("OPENAI_API_KEY", "ok")]));
        assert_eq!(config.analyzer.provider, ProviderKind::Groq);
        assert_eq!(config.analyzer.api_key.as_deref(), Some("gk"));
        assert_eq!(config.analyzer.resolved_model().as_deref(), Some("llama-3.3-70b-versatile"));
    }

    #[test]
    fn test_env_openai_and_overrides() {
        let mut config = EngineConfig::default();
        config.apply_env(lookup(&[
            ("GROQ_API_KEY", "  "),
            ("OPENAI_API_KEY", "ok"),
            ("VIBECOLOR_SEED", "7"),
            ("VIBECOLOR_AI_TIMEOUT_SECS", "3"),
        ]));
        assert_eq!(config.analyzer.provider, ProviderKind::OpenAi);
        assert_eq!(config.extraction.seed, 7);
        assert_eq!(config.analyzer.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_env_without_keys_stays_keyword() {
        let mut config = EngineConfig::default();
        config.apply_env(lookup(&[("VIBECOLOR_SEED", "not-a-number")]));
        assert_eq!(config.analyzer.provider, ProviderKind::Keyword);
        assert_eq!(config.extraction.seed, 42);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = EngineConfig::default();
        config.extraction.grid_rows = 0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.analyzer.timeout_secs = 30;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.defaults.base_color = "#XYZ".into();
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.analyzer.provider = ProviderKind::Groq;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_timeout_is_bounded_even_unvalidated() {
        let mut config = EngineConfig::default();
        config.apply_env(lookup(&[("VIBECOLOR_AI_TIMEOUT_SECS", "3600")]));
        assert_eq!(config.analyzer.timeout_secs, 3600);
        assert!(config.validate().is_err());
        assert_eq!(config.analyzer.timeout(), Duration::from_secs(10));

        config.analyzer.timeout_secs = 0;
        assert_eq!(config.analyzer.timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_extraction_validate_names_field() {
        let config = ExtractionConfig {
            max_working_pixels: 0,
            ..ExtractionConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, PaletteError::InvalidParameter { ref parameter, .. } if parameter == "extraction.max_working_pixels"));
    }

    #[test]
    fn test_json_file_round_trip_omits_api_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = EngineConfig::default();
        config.extraction.seed = 1234;
        config.analyzer.api_key = Some("secret".into());
        config.to_json_file(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(!text.contains("secret"));

        let loaded = EngineConfig::from_json_file(&path).unwrap();
        assert_eq!(loaded.extraction.seed, 1234);
        assert_eq!(loaded.analyzer.api_key, None);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"extraction": {"seed": 9}, "analyzer": {"provider": "openai"}}"#).unwrap();
        assert_eq!(config.extraction.seed, 9);
        assert_eq!(config.extraction.n_init, 20);
        assert_eq!(config.analyzer.provider, ProviderKind::OpenAi);
        assert_eq!(config.defaults.prompt_mood, "harmonious");
    }

    #[test]
    fn test_missing_file() {
        let result = EngineConfig::from_json_file(Path::new("/nonexistent/vibecolor.json"));
        assert!(matches!(result, Err(PaletteError::ConfigError { .. })));
    }
}
