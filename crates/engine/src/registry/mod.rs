//! Block registry & dispatcher: the central polymorphic dispatch point.
//!
//! A registry is a lookup table from block-type identifier to a render
//! function. Adding a block type is a table insertion. Dispatch never
//! fails: an unregistered type renders a deterministic fallback placeholder
//! and sibling blocks keep rendering.

/// Default property sets for the block catalogue.
pub mod palette;

use crate::renderer::blocks;
use crate::renderer::context::RenderContext;
use crate::renderer::types::{RenderMode, RenderNode, RenderedPage};
use crate::resolver::NavContext;
use pagebloc_core::{Block, RenderWarning, SitePage, SiteTheme};
use palette::Palette;
use std::collections::HashMap;

/// A pure block render function: `(props, theme, edit session) -> node`,
/// with theme and edit wiring carried by the context.
pub type BlockRenderer = fn(&Block, &mut RenderContext<'_>) -> RenderNode;

/// Lookup table from block type to renderer, paired with the palette that
/// completes property bags before dispatch.
pub struct BlockRegistry {
    renderers: HashMap<String, BlockRenderer>,
    palette: Palette,
}

impl BlockRegistry {
    /// Creates a registry with no renderers over the given palette.
    pub fn empty(palette: Palette) -> Self {
        Self {
            renderers: HashMap::new(),
            palette,
        }
    }

    /// Creates a registry with the built-in catalogue registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty(Palette::with_builtins());
        blocks::register_builtins(&mut registry);
        registry
    }

    /// Registers (or replaces) the renderer for a block type.
    pub fn register(&mut self, block_type: impl Into<String>, renderer: BlockRenderer) {
        self.renderers.insert(block_type.into(), renderer);
    }

    /// Registers a renderer together with the type's palette defaults.
    pub fn register_with_defaults(
        &mut self,
        block_type: impl Into<String>,
        defaults: serde_json::Map<String, serde_json::Value>,
        renderer: BlockRenderer,
    ) {
        let block_type = block_type.into();
        self.palette.insert(block_type.clone(), defaults);
        self.renderers.insert(block_type, renderer);
    }

    /// Returns true if a renderer exists for the type.
    pub fn is_registered(&self, block_type: &str) -> bool {
        self.renderers.contains_key(block_type)
    }

    /// The palette backing this registry.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Iterates over the registered block types.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.renderers.keys().map(String::as_str)
    }

    /// Renders one block.
    ///
    /// The property bag is completed from the palette before the renderer
    /// runs. An unregistered type yields a fallback placeholder node plus a
    /// diagnostic — never an error, so one bad block cannot abort its
    /// siblings.
    pub fn render_block(&self, block: &Block, ctx: &mut RenderContext<'_>) -> RenderNode {
        match self.renderers.get(&block.block_type) {
            Some(renderer) => {
                let completed = self.palette.complete(block);
                renderer(&completed, ctx)
            }
            None => {
                log::warn!(
                    "no renderer registered for block type '{}' (block {}), emitting placeholder",
                    block.block_type,
                    block.id
                );
                ctx.warn(RenderWarning::UnknownBlockType {
                    block_id: block.id.clone(),
                    block_type: block.block_type.clone(),
                });
                RenderNode::Fallback {
                    block_type: block.block_type.clone(),
                }
            }
        }
    }

    /// Renders a whole page: one node per block, in page order, strictly
    /// sequentially. Returns the nodes with the diagnostics gathered along
    /// the way.
    pub fn render_page(
        &self,
        page: &SitePage,
        theme: &SiteTheme,
        nav: &NavContext,
        mode: RenderMode,
    ) -> RenderedPage {
        let mut ctx = RenderContext::new(theme, nav, mode);
        let nodes = page
            .blocks_in_order()
            .into_iter()
            .map(|block| self.render_block(block, &mut ctx))
            .collect();
        RenderedPage {
            nodes,
            diagnostics: ctx.into_diagnostics(),
        }
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
