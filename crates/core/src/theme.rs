//! Site-wide visual tokens shared by every block render.

use serde::{Deserialize, Serialize};

/// Text direction for the whole site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Left-to-right scripts.
    #[default]
    Ltr,
    /// Right-to-left scripts (Arabic, Hebrew, ...).
    Rtl,
}

impl Direction {
    /// The value used for the HTML `dir` attribute.
    pub fn as_attr(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

/// The cascade of visual tokens passed by reference into every block render.
///
/// A theme is immutable for the duration of a render pass. Changing a token
/// is always a top-level replacement of the whole value followed by a
/// re-render; no block may mutate tokens or read them from anywhere else.
/// Blocks that need a localized deviation carry an explicit prop (e.g.
/// `bgColor`) which takes precedence over the cascade for that attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteTheme {
    /// Primary brand color (buttons, links, highlights).
    pub primary_color: String,
    /// Secondary brand color.
    pub secondary_color: String,
    /// Accent color for decorative details.
    pub accent_color: String,
    /// Default body text color.
    pub text_color: String,
    /// Page background color.
    pub background_color: String,
    /// Font family for headings.
    pub heading_font: String,
    /// Font family for body text.
    pub body_font: String,
    /// Corner radius applied to buttons, cards, and images (CSS length).
    pub border_radius: String,
    /// Text direction for the whole site.
    #[serde(default)]
    pub direction: Direction,
}

impl Default for SiteTheme {
    fn default() -> Self {
        Self {
            primary_color: "#2563eb".to_string(),
            secondary_color: "#1e293b".to_string(),
            accent_color: "#f59e0b".to_string(),
            text_color: "#0f172a".to_string(),
            background_color: "#ffffff".to_string(),
            heading_font: "Inter, sans-serif".to_string(),
            body_font: "Inter, sans-serif".to_string(),
            border_radius: "8px".to_string(),
            direction: Direction::Ltr,
        }
    }
}
