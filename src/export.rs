//! Palette export formats

use crate::color::conversion::Color;
use crate::generator::Palette;
use crate::{PaletteError, Result};

/// Lowercase with whitespace runs collapsed to `-`
fn kebab_case(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Render the palette as CSS custom properties on `:root`
///
/// Unnamed (or blank-named) colors use `--color-{n}` with a 1-based index.
pub fn to_css_variables(palette: &Palette) -> String {
    let mut css = String::from(":root {\n");
    for (i, color) in palette.colors.iter().enumerate() {
        let name = color
            .name()
            .map(kebab_case)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| format!("color-{}", i + 1));
        css.push_str(&format!("  --{}: {};\n", name, color.hex()));
    }
    css.push('}');
    css
}

/// Pretty-printed JSON of the whole palette
pub fn to_json(palette: &Palette) -> Result<String> {
    serde_json::to_string_pretty(palette).map_err(|e| PaletteError::GenerationError {
        message: format!("Failed to serialize palette: {}", e),
    })
}

/// Pretty-printed JSON of a color list
pub fn colors_to_json(colors: &[Color]) -> Result<String> {
    serde_json::to_string_pretty(colors).map_err(|e| PaletteError::GenerationError {
        message: format!("Failed to serialize colors: {}", e),
    })
}
