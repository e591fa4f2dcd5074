#![deny(missing_docs)]
//! pagebloc core: the serialized page model, action descriptors, theme
//! tokens, the HTML sanitizer, and route slugs.

/// Serializable action descriptors for interactive blocks.
pub mod action;
/// Core error and diagnostic types.
pub mod error;
/// Blocks, pages, and the site collection.
pub mod page;
/// Allow-list HTML sanitizer for formatted content props.
pub mod sanitize;
/// Route slug generation utilities.
pub mod slug;
/// Site-wide visual tokens.
pub mod theme;

pub use action::{ActionKind, ComponentAction};
pub use error::{EngineError, RenderDiagnostics, RenderWarning};
pub use page::{ACTION_PROP, Block, Site, SitePage};
pub use sanitize::{sanitize_html, sanitize_html_report};
pub use slug::{Slugger, slugify};
pub use theme::{Direction, SiteTheme};
