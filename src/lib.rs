//! # VibeColor
//!
//! A Rust crate for generating color palettes from text prompts and images.
//!
//! This library provides:
//! - Deterministic color-harmony generation from a single seed color
//! - Dominant-color extraction from images with an exact requested count
//! - WCAG contrast evaluation between adjacent palette colors
//! - Prompt analysis through a remote chat-completion provider or a local keyword table
//!
//! ## Example
//!
//! ```rust,no_run
//! use vibecolor::{EngineConfig, PaletteGenerator};
//!
//! let generator = PaletteGenerator::try_new(EngineConfig::from_env())?;
//! let palette = generator.from_prompt("sunset over the ocean", 5)?;
//! for color in &palette.colors {
//!     println!("{} {}", color.hex(), color.name().unwrap_or_default());
//! }
//! # Ok::<(), vibecolor::PaletteError>(())
//! ```

pub mod error;
pub mod constants;
pub mod config;
pub mod color;
pub mod extraction;
pub mod analysis;
pub mod generator;
pub mod request;
pub mod export;

pub use error::{PaletteError, Result};
pub use config::EngineConfig;
pub use color::{Color, ContrastCheck, HarmonyGenerator, Rgb};
pub use extraction::ImageColorExtractor;
pub use analysis::{KeywordAnalyzer, SeedAnalysis, SemanticAnalyzer};
pub use generator::{Palette, PaletteGenerator};
pub use request::{AnalyzeColorRequest, ExtractColorsRequest, GeneratePaletteRequest, RefinePaletteRequest};
