//! Offline keyword-table analysis
//!
//! Used when no remote provider is configured and as the recovery path
//! whenever the remote provider fails.

use super::{SeedAnalysis, SemanticAnalyzer};
use crate::Result;

struct Theme {
    keyword: &'static str,
    mood: &'static str,
    base_color: &'static str,
    color_names: [&'static str; 5],
}

/// Checked in order; the first keyword contained in the prompt wins
const THEMES: &[Theme] = &[
    Theme {
        keyword: "sunset",
        mood: "warm and romantic",
        base_color: "#FF6B6B",
        color_names: ["Sunset Coral", "Golden Hour", "Dusk Rose", "Amber Glow", "Twilight Purple"],
    },
    Theme {
        keyword: "ocean",
        mood: "calm and serene",
        base_color: "#4ECDC4",
        color_names: ["Ocean Teal", "Deep Sea", "Wave Blue", "Seafoam", "Coral Reef"],
    },
    Theme {
        keyword: "forest",
        mood: "natural and grounding",
        base_color: "#2D6A4F",
        color_names: ["Forest Green", "Moss", "Pine", "Fern", "Sage"],
    },
    Theme {
        keyword: "corporate",
        mood: "professional and trustworthy",
        base_color: "#2C3E50",
        color_names: ["Navy Blue", "Slate Grey", "Steel", "Charcoal", "Silver"],
    },
    Theme {
        keyword: "vintage",
        mood: "nostalgic and warm",
        base_color: "#D4A574",
        color_names: ["Vintage Gold", "Sepia", "Antique Brass", "Faded Rose", "Parchment"],
    },
    Theme {
        keyword: "neon",
        mood: "energetic and bold",
        base_color: "#FF006E",
        color_names: ["Electric Pink", "Neon Green", "Cyber Blue", "Volt Yellow", "Hot Magenta"],
    },
    Theme {
        keyword: "pastel",
        mood: "soft and gentle",
        base_color: "#B4A7D6",
        color_names: ["Lavender", "Mint", "Peach", "Baby Blue", "Soft Pink"],
    },
    Theme {
        keyword: "cyberpunk",
        mood: "futuristic and electric",
        base_color: "#FF00FF",
        color_names: ["Neon Magenta", "Cyber Blue", "Electric Green", "Hot Pink", "Digital Purple"],
    },
    Theme {
        keyword: "spring",
        mood: "fresh and vibrant",
        base_color: "#90EE90",
        color_names: ["Spring Green", "Blossom Pink", "Sky Blue", "Sunshine Yellow", "Fresh Mint"],
    },
    Theme {
        keyword: "autumn",
        mood: "cozy and warm",
        base_color: "#D2691E",
        color_names: ["Autumn Orange", "Maple Red", "Golden Brown", "Rust", "Harvest Gold"],
    },
];

const DEFAULT_THEME: Theme = Theme {
    keyword: "",
    mood: "balanced and harmonious",
    base_color: crate::constants::defaults::BASE_COLOR,
    color_names: ["Primary", "Secondary", "Accent", "Highlight", "Shadow"],
};

impl Theme {
    fn to_analysis(&self) -> SeedAnalysis {
        SeedAnalysis {
            mood: Some(self.mood.to_string()),
            base_color: Some(self.base_color.to_string()),
            color_names: self.color_names.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Keyword-driven analyzer; never fails
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordAnalyzer;

impl KeywordAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Analysis for a prompt, falling back to the neutral default theme
    pub fn lookup(&self, prompt: &str) -> SeedAnalysis {
        let prompt = prompt.to_lowercase();
        THEMES
            .iter()
            .find(|theme| prompt.contains(theme.keyword))
            .unwrap_or(&DEFAULT_THEME)
            .to_analysis()
    }
}

impl SemanticAnalyzer for KeywordAnalyzer {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn analyze(&self, prompt: &str) -> Result<SeedAnalysis> {
        Ok(self.lookup(prompt))
    }
}
