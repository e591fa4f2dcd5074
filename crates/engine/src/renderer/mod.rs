//! Render pipeline: block props plus theme plus mode in, render trees out.
//!
//! The pipeline has two halves. The renderers in [`blocks`] build mode-aware
//! render trees, and [`html`] serializes those trees for publishing. The
//! canvas consumes the trees directly and never goes through the serializer.

pub mod blocks;
pub mod context;
pub mod html;
pub mod types;

pub use context::RenderContext;
pub use html::{PublishedPage, publish_page, publish_site, render_nodes_html, render_page_html};
pub use types::{EditBinding, ElementNode, RenderMode, RenderNode, RenderedPage};
