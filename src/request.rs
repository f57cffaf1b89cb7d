//! Boundary request types
//!
//! These mirror the inbound request shapes of a palette service. Each request
//! validates its own ranges before anything reaches the generator.

use serde::{Deserialize, Serialize};

use crate::color::contrast::ContrastCheck;
use crate::constants::limits;
use crate::generator::{Palette, PaletteGenerator};
use crate::{PaletteError, Result};

fn default_num_colors() -> usize {
    limits::DEFAULT_COLORS
}

fn validate_prompt(parameter: &str, prompt: &str) -> Result<()> {
    let chars = prompt.chars().count();
    if !(limits::MIN_PROMPT_CHARS..=limits::MAX_PROMPT_CHARS).contains(&chars) {
        return Err(PaletteError::invalid_parameter(
            parameter,
            format!("{} characters", chars),
        ));
    }
    Ok(())
}

fn validate_count(num_colors: usize) -> Result<()> {
    if !(limits::MIN_COLORS..=limits::MAX_COLORS).contains(&num_colors) {
        return Err(PaletteError::invalid_parameter("num_colors", num_colors));
    }
    Ok(())
}

/// Generate a palette from a text prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratePaletteRequest {
    pub prompt: String,
    #[serde(default = "default_num_colors")]
    pub num_colors: usize,
}

impl GeneratePaletteRequest {
    pub fn new(prompt: impl Into<String>, num_colors: usize) -> Self {
        Self {
            prompt: prompt.into(),
            num_colors,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_prompt("prompt", &self.prompt)?;
        validate_count(self.num_colors)
    }
}

/// Refine a palette by appending a hint to its original prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefinePaletteRequest {
    pub original_prompt: String,
    pub refinement_hint: String,
    #[serde(default = "default_num_colors")]
    pub num_colors: usize,
}

impl RefinePaletteRequest {
    pub fn validate(&self) -> Result<()> {
        validate_prompt("original_prompt", &self.original_prompt)?;
        validate_prompt("refinement_hint", &self.refinement_hint)?;
        validate_count(self.num_colors)
    }
}

/// Check contrast between two colors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeColorRequest {
    pub foreground: String,
    pub background: String,
}

/// Extract a palette from an uploaded image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractColorsRequest {
    #[serde(default = "default_num_colors")]
    pub num_colors: usize,
    /// Upload file name, used in the palette theme
    #[serde(default)]
    pub file_name: Option<String>,
}

impl Default for ExtractColorsRequest {
    fn default() -> Self {
        Self {
            num_colors: default_num_colors(),
            file_name: None,
        }
    }
}

impl ExtractColorsRequest {
    pub fn validate(&self) -> Result<()> {
        validate_count(self.num_colors)
    }
}

impl PaletteGenerator {
    pub fn handle_generate(&self, request: &GeneratePaletteRequest) -> Result<Palette> {
        request.validate()?;
        self.from_prompt(&request.prompt, request.num_colors)
    }

    pub fn handle_refine(&self, request: &RefinePaletteRequest) -> Result<Palette> {
        request.validate()?;
        self.refine(&request.original_prompt, &request.refinement_hint, request.num_colors)
    }

    /// Malformed colors fail with [`PaletteError::InvalidColorFormat`]
    pub fn handle_analyze(&self, request: &AnalyzeColorRequest) -> Result<ContrastCheck> {
        self.analyze_contrast(&request.foreground, &request.background)
    }

    pub fn handle_extract(&self, request: &ExtractColorsRequest, image_bytes: &[u8]) -> Result<Palette> {
        request.validate()?;
        match request.file_name.as_deref() {
            Some(name) => self.from_image_named(image_bytes, request.num_colors, name),
            None => self.from_image(image_bytes, request.num_colors),
        }
    }
}
