//! Rendering, action resolution, and edit sessions for pagebloc sites.
//!
//! `pagebloc-engine` turns the data model from [`pagebloc_core`] into render
//! trees and published HTML. The pieces compose in one direction:
//!
//! - [`registry::Palette`] completes partial prop bags against per-type
//!   defaults,
//! - [`registry::BlockRegistry`] dispatches completed blocks to renderers,
//! - [`resolver::NavContext`] resolves declarative actions into effects,
//! - [`edit::EditBinder`] tracks in-place edits and emits prop patches,
//! - [`renderer::html`] serializes published pages to static markup.
//!
//! ```
//! use pagebloc_core::{Block, SitePage, SiteTheme};
//! use pagebloc_engine::{publish_page, BlockRegistry, NavContext};
//!
//! let registry = BlockRegistry::with_builtins();
//! let mut page = SitePage::new("home", "Home");
//! page.blocks.push(Block::new("b1", "heading"));
//!
//! let published = publish_page(&registry, &page, &SiteTheme::default(), &NavContext::new());
//! assert!(published.html.contains("block-heading"));
//! ```

#![deny(missing_docs)]

pub mod edit;
pub mod registry;
pub mod renderer;
pub mod resolver;

pub use edit::{EditBinder, EditSession, PropPatch, apply_patch};
pub use registry::palette::Palette;
pub use registry::{BlockRegistry, BlockRenderer};
pub use renderer::{
    EditBinding, ElementNode, PublishedPage, RenderContext, RenderMode, RenderNode, RenderedPage,
    publish_page, publish_site, render_nodes_html, render_page_html,
};
pub use resolver::{Effect, HandlerFn, HostHandlers, NavContext};
