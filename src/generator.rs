//! Palette orchestration
//!
//! [`PaletteGenerator`] ties the semantic analyzer, the harmony generator and
//! the image extractor together and assembles the final [`Palette`]. Analyzer
//! failures never escape: they are logged and replaced by the keyword table.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::{analyzer_from_config, KeywordAnalyzer, ResolvedAnalysis, SeedAnalysis, SemanticAnalyzer};
use crate::color::contrast::{check_contrast, contrast_ratio_rgb, wcag_compliance, ContrastCheck};
use crate::color::conversion::{hex_to_rgb, Color, Rgb};
use crate::color::harmony::HarmonyGenerator;
use crate::config::EngineConfig;
use crate::extraction::ImageColorExtractor;
use crate::{PaletteError, Result};

/// A generated palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub colors: Vec<Color>,
    /// Prompt or image description the palette was generated from
    pub theme: String,
    pub mood: Option<String>,
    /// `contrast_info[i]` compares `colors[i]` with `colors[i + 1]`
    pub contrast_info: Vec<ContrastCheck>,
}

impl Palette {
    /// Assemble a palette, computing the adjacent-pair contrast checks
    pub fn new(colors: Vec<Color>, theme: impl Into<String>, mood: Option<String>) -> Self {
        let contrast_info = adjacent_contrast(&colors);
        Self {
            colors,
            theme: theme.into(),
            mood,
            contrast_info,
        }
    }

    pub fn hex_values(&self) -> Vec<&str> {
        self.colors.iter().map(Color::hex).collect()
    }
}

fn adjacent_contrast(colors: &[Color]) -> Vec<ContrastCheck> {
    colors
        .windows(2)
        .map(|pair| wcag_compliance(contrast_ratio_rgb(pair[0].rgb(), pair[1].rgb())))
        .collect()
}

fn named_colors(rgbs: Vec<Rgb>, names: Vec<String>) -> Vec<Color> {
    rgbs.into_iter()
        .zip(names)
        .map(|(rgb, name)| Color::from_rgb(rgb, Some(name)))
        .collect()
}

/// Palette orchestrator
pub struct PaletteGenerator {
    config: EngineConfig,
    analyzer: Box<dyn SemanticAnalyzer>,
    fallback: KeywordAnalyzer,
    harmony: HarmonyGenerator,
    extractor: ImageColorExtractor,
}

impl PaletteGenerator {
    /// Build from a validated configuration with the analyzer selected by `config.analyzer`
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::InvalidParameter`] naming the first invalid config field.
    pub fn try_new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Validating counterpart of [`PaletteGenerator::with_analyzer`]
    pub fn try_with_analyzer(config: EngineConfig, analyzer: Box<dyn SemanticAnalyzer>) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_analyzer(config, analyzer))
    }

    /// Build with the analyzer selected by `config.analyzer`, without validating `config`
    ///
    /// A remote provider without a key degrades to the keyword table.
    pub fn new(config: EngineConfig) -> Self {
        let analyzer = analyzer_from_config(&config.analyzer);
        Self::with_analyzer(config, analyzer)
    }

    /// Build with an explicit analyzer, without validating `config`
    pub fn with_analyzer(config: EngineConfig, analyzer: Box<dyn SemanticAnalyzer>) -> Self {
        let extractor = ImageColorExtractor::new(config.extraction.clone());
        Self {
            config,
            analyzer,
            fallback: KeywordAnalyzer::new(),
            harmony: HarmonyGenerator::new(),
            extractor,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Name of the active analysis provider
    pub fn provider_name(&self) -> &'static str {
        self.analyzer.name()
    }

    /// Generate a harmony palette from a text prompt
    ///
    /// # Errors
    ///
    /// Only internal faults are reported; analyzer problems fall back to the keyword table.
    pub fn from_prompt(&self, prompt: &str, count: usize) -> Result<Palette> {
        let analysis = self
            .analyze_or_fallback(prompt)
            .resolve(count, &self.config.defaults, &self.config.defaults.prompt_mood);

        let base = hex_to_rgb(&analysis.base_color)?;
        let rgbs = self.harmony.generate_rgb(base, count);
        let palette = self.assemble(rgbs, prompt, analysis)?;

        info!(
            provider = self.provider_name(),
            count,
            base = %palette.colors.first().map(Color::hex).unwrap_or_default(),
            "palette generated from prompt"
        );
        Ok(palette)
    }

    /// Regenerate with an additional hint appended to the original prompt
    pub fn refine(&self, original_prompt: &str, refinement_hint: &str, count: usize) -> Result<Palette> {
        let combined = format!("{}, {}", original_prompt, refinement_hint);
        self.from_prompt(&combined, count)
    }

    /// Extract a palette from encoded image bytes
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::ImageDecodeError`] for unreadable image data.
    pub fn from_image(&self, image_bytes: &[u8], count: usize) -> Result<Palette> {
        self.from_image_named(image_bytes, count, "image")
    }

    /// Extract a palette, naming the source in the theme
    pub fn from_image_named(&self, image_bytes: &[u8], count: usize, source_name: &str) -> Result<Palette> {
        let image = crate::extraction::image_loader::decode_image(image_bytes)?;
        let rgbs = self.extractor.extract_from_image(image, count)?;

        let hex_list = rgbs.iter().map(|rgb| rgb.to_hex()).collect::<Vec<_>>().join(", ");
        let description = format!("colors extracted from an image: {}", hex_list);
        // The analyzer only names the colors here; its base color is ignored
        let analysis = self
            .analyze_or_fallback(&description)
            .resolve(count, &self.config.defaults, &self.config.defaults.image_mood);

        let palette = self.assemble(rgbs, &format!("Extracted from {}", source_name), analysis)?;
        info!(provider = self.provider_name(), count, source = source_name, "palette extracted from image");
        Ok(palette)
    }

    /// WCAG contrast between two hex colors
    pub fn analyze_contrast(&self, foreground: &str, background: &str) -> Result<ContrastCheck> {
        check_contrast(foreground, background)
    }

    fn analyze_or_fallback(&self, prompt: &str) -> SeedAnalysis {
        match self.analyzer.analyze(prompt) {
            Ok(analysis) if analysis.has_content() => analysis,
            Ok(_) => {
                warn!(provider = self.analyzer.name(), "analysis had no usable fields, using keyword analysis");
                self.fallback.lookup(prompt)
            }
            Err(err) => {
                warn!(provider = self.analyzer.name(), error = %err, "analysis failed, using keyword analysis");
                self.fallback.lookup(prompt)
            }
        }
    }

    fn assemble(&self, rgbs: Vec<Rgb>, theme: &str, analysis: ResolvedAnalysis) -> Result<Palette> {
        let expected = analysis.color_names.len();
        if rgbs.len() != expected {
            return Err(PaletteError::GenerationError {
                message: format!("expected {} colors, produced {}", expected, rgbs.len()),
            });
        }
        Ok(Palette::new(named_colors(rgbs, analysis.color_names), theme, Some(analysis.mood)))
    }
}

impl Default for PaletteGenerator {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
