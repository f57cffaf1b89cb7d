//! Color math and harmony module
//!
//! This module handles hex/RGB/HLS conversions, WCAG contrast evaluation
//! and color-wheel harmony generation.

pub mod conversion;
pub mod contrast;
pub mod harmony;

pub use conversion::{Color, Rgb};
pub use contrast::ContrastCheck;
pub use harmony::HarmonyGenerator;
