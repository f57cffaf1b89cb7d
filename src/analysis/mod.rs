//! Semantic analysis of prompts
//!
//! An analyzer turns a free-text prompt into an advisory [`SeedAnalysis`]:
//! a mood, a base color and a list of color names. Analyzer output is never
//! trusted; [`SeedAnalysis::resolve`] is the single place where missing or
//! malformed fields are replaced with defaults.

pub mod keyword;
pub mod remote;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::color::conversion::normalize_hex;
use crate::config::{AnalyzerConfig, DefaultsConfig, ProviderKind};
use crate::Result;

pub use keyword::KeywordAnalyzer;
pub use remote::ChatCompletionAnalyzer;

/// Source of prompt analyses
pub trait SemanticAnalyzer: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &'static str;

    /// Analyze a prompt
    ///
    /// # Errors
    ///
    /// Returns [`crate::PaletteError::AdapterUnavailable`] when the provider
    /// cannot be reached or does not produce a usable response.
    fn analyze(&self, prompt: &str) -> Result<SeedAnalysis>;
}

/// Raw analyzer output; every field may be absent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedAnalysis {
    pub mood: Option<String>,
    pub base_color: Option<String>,
    #[serde(default)]
    pub color_names: Vec<String>,
}

/// Analysis with all defaults applied
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAnalysis {
    pub mood: String,
    /// Canonical `#RRGGBB`
    pub base_color: String,
    /// Exactly the requested number of names
    pub color_names: Vec<String>,
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl SeedAnalysis {
    /// Read fields independently from loosely-shaped JSON
    ///
    /// Wrong-typed fields are dropped one at a time; a non-object yields an empty analysis.
    pub fn from_json_value(value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).and_then(non_blank);
        let color_names = value
            .get("color_names")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).map(str::to_string).collect())
            .unwrap_or_default();

        Self {
            mood: text("mood"),
            base_color: text("base_color"),
            color_names,
        }
    }

    /// Whether at least one field carries usable information
    pub fn has_content(&self) -> bool {
        self.mood.is_some()
            || self
                .base_color
                .as_deref()
                .is_some_and(|hex| normalize_hex(hex).is_ok())
            || self.color_names.iter().any(|name| !name.trim().is_empty())
    }

    /// Apply defaults for `count` colors
    pub fn resolve(&self, count: usize, defaults: &DefaultsConfig, default_mood: &str) -> ResolvedAnalysis {
        let base_color = self
            .base_color
            .as_deref()
            .and_then(|hex| normalize_hex(hex).ok())
            .or_else(|| normalize_hex(&defaults.base_color).ok())
            .unwrap_or_else(|| crate::constants::defaults::BASE_COLOR.to_string());

        let mood = self
            .mood
            .as_deref()
            .and_then(non_blank)
            .unwrap_or_else(|| default_mood.to_string());

        ResolvedAnalysis {
            mood,
            base_color,
            color_names: resolve_names(&self.color_names, count),
        }
    }
}

/// Names for `count` colors, using `"Color {i+1}"` for missing or blank entries
pub fn resolve_names(names: &[String], count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            names
                .get(i)
                .and_then(|name| non_blank(name))
                .unwrap_or_else(|| format!("Color {}", i + 1))
        })
        .collect()
}

/// Build the analyzer described by the configuration
///
/// A remote provider without an API key degrades to the keyword table.
pub fn analyzer_from_config(config: &AnalyzerConfig) -> Box<dyn SemanticAnalyzer> {
    match config.provider {
        ProviderKind::Keyword => Box::new(KeywordAnalyzer::new()),
        ProviderKind::Groq | ProviderKind::OpenAi => match ChatCompletionAnalyzer::from_config(config) {
            Ok(analyzer) => Box::new(analyzer),
            Err(err) => {
                tracing::warn!(error = %err, "remote analyzer unavailable, using keyword analysis");
                Box::new(KeywordAnalyzer::new())
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_value_complete() {
        let value = json!({
            "mood": "calm",
            "base_color": "#4ecdc4",
            "color_names": ["Teal", "Deep Sea"]
        });
        let analysis = SeedAnalysis::from_json_value(&value);
        assert_eq!(analysis.mood.as_deref(), Some("calm"));
        assert_eq!(analysis.base_color.as_deref(), Some("#4ecdc4"));
        assert_eq!(analysis.color_names, vec!["Teal", "Deep Sea"]);
    }

    #[test]
    fn test_from_json_value_drops_bad_fields_independently() {
        let value = json!({
            "mood": 12,
            "base_color": "#112233",
            "color_names": ["Ink", 5, null, "Paper"]
        });
        let analysis = SeedAnalysis::from_json_value(&value);
        assert_eq!(analysis.mood, None);
        assert_eq!(analysis.base_color.as_deref(), Some("#112233"));
        assert_eq!(analysis.color_names, vec!["Ink", "Paper"]);

        let empty = SeedAnalysis::from_json_value(&json!(["not", "an", "object"]));
        assert_eq!(empty, SeedAnalysis::default());
        assert!(!empty.has_content());
    }

    #[test]
    fn test_resolve_applies_defaults() {
        let defaults = DefaultsConfig::default();
        let analysis = SeedAnalysis {
            mood: None,
            base_color: Some("not-a-color".into()),
            color_names: vec!["Only".into(), "  ".into()],
        };
        let resolved = analysis.resolve(4, &defaults, "harmonious");
        assert_eq!(resolved.mood, "harmonious");
        assert_eq!(resolved.base_color, "#6366F1");
        assert_eq!(resolved.color_names, vec!["Only", "Color 2", "Color 3", "Color 4"]);
    }

    #[test]
    fn test_resolve_canonicalizes_and_truncates() {
        let analysis = SeedAnalysis {
            mood: Some("bold".into()),
            base_color: Some("ff006e".into()),
            color_names: (1..=8).map(|i| format!("N{}", i)).collect(),
        };
        let resolved = analysis.resolve(3, &DefaultsConfig::default(), "x");
        assert_eq!(resolved.base_color, "#FF006E");
        assert_eq!(resolved.color_names, vec!["N1", "N2", "N3"]);
    }

    #[test]
    fn test_has_content() {
        let only_bad_color = SeedAnalysis {
            base_color: Some("#12".into()),
            ..SeedAnalysis::default()
        };
        assert!(!only_bad_color.has_content());

        let with_names = SeedAnalysis {
            color_names: vec!["Moss".into()],
            ..SeedAnalysis::default()
        };
        assert!(with_names.has_content());
    }

    #[test]
    fn test_keyword_provider_from_config() {
        let analyzer = analyzer_from_config(&AnalyzerConfig::default());
        assert_eq!(analyzer.name(), "keyword");
    }

    #[test]
    fn test_remote_without_key_degrades() {
        let config = AnalyzerConfig {
            provider: ProviderKind::Groq,
            ..AnalyzerConfig::default()
        };
        assert_eq!(analyzer_from_config(&config).name(), "keyword");
    }
}
