//! Serializable action descriptors attached to interactive blocks.

use serde::{Deserialize, Serialize};

/// Discriminator for what an interaction should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// No interaction is attached.
    #[default]
    None,
    /// Navigate to another page of the site.
    Page,
    /// Open an external URL.
    Url,
    /// Scroll to an in-page anchor section.
    Section,
    /// Compose an email (mailto).
    Email,
    /// Place a phone call (tel).
    Phone,
    /// Fetch or open a file.
    Download,
    /// Invoke a handler registered by the hosting environment.
    Custom,
}

/// The canonical cross-boundary description of "what happens on interaction".
///
/// Only the fields matching the current [`kind`](Self::kind) are meaningful.
/// When an author switches an action from one kind to another in the editor,
/// the previous kind's fields are retained in the serialized form (and must
/// survive a round-trip) but are ignored by the resolver.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentAction {
    /// Which kind of effect this action produces.
    #[serde(rename = "type", default)]
    pub kind: ActionKind,
    /// Target page id, for `page` actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
    /// Target URL, for `url` actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Whether `url` actions open in an auxiliary browsing context.
    #[serde(default)]
    pub open_in_new_tab: bool,
    /// Target anchor id, for `section` actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
    /// Recipient address, for `email` actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Phone number, for `phone` actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// File URL, for `download` actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    /// Name of the host-registered handler, for `custom` actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_handler: Option<String>,
}

impl ComponentAction {
    /// An inert action.
    pub fn none() -> Self {
        Self::default()
    }

    /// A page-navigation action.
    pub fn page(page_id: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::Page,
            page_id: Some(page_id.into()),
            ..Self::default()
        }
    }

    /// A URL action.
    pub fn url(url: impl Into<String>, open_in_new_tab: bool) -> Self {
        Self {
            kind: ActionKind::Url,
            url: Some(url.into()),
            open_in_new_tab,
            ..Self::default()
        }
    }

    /// An anchor-scroll action.
    pub fn section(section_id: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::Section,
            section_id: Some(section_id.into()),
            ..Self::default()
        }
    }
}
