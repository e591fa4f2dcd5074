//! Rendering context threaded through every block render call.

use crate::renderer::types::{EditBinding, RenderMode};
use crate::resolver::{Effect, NavContext};
use pagebloc_core::{Block, RenderDiagnostics, RenderWarning, SiteTheme, sanitize_html_report};

/// Per-pass state handed to each block renderer.
///
/// Carries the theme cascade (read-only, by reference), the navigation
/// context for action resolution, the render mode, and the diagnostics
/// sink. The context never persists across render calls — every render is
/// a pure function of `(block, theme, mode)`.
pub struct RenderContext<'a> {
    theme: &'a SiteTheme,
    nav: &'a NavContext,
    mode: RenderMode,
    diagnostics: RenderDiagnostics,
}

impl<'a> RenderContext<'a> {
    /// Creates a fresh context for one render pass.
    pub fn new(theme: &'a SiteTheme, nav: &'a NavContext, mode: RenderMode) -> Self {
        Self {
            theme,
            nav,
            mode,
            diagnostics: RenderDiagnostics::new(),
        }
    }

    /// The theme cascade. Blocks read every visual token from here; there
    /// is no other token source.
    pub fn theme(&self) -> &SiteTheme {
        self.theme
    }

    /// The current render mode.
    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Returns true in canvas (editing) mode.
    pub fn is_editing(&self) -> bool {
        self.mode.is_editing()
    }

    /// Records a recovered warning.
    pub fn warn(&mut self, warning: RenderWarning) {
        self.diagnostics.add_warning(warning);
    }

    /// Consumes the context, yielding the gathered diagnostics.
    pub fn into_diagnostics(self) -> RenderDiagnostics {
        self.diagnostics
    }

    /// Resolves the block's `action` prop into an effect.
    ///
    /// A malformed descriptor degrades to inert with a diagnostic; a block
    /// without an action prop is simply inert.
    pub fn resolve_block_action(&mut self, block: &Block) -> Effect {
        match block.action() {
            Ok(Some(action)) => self.nav.resolve(&action),
            Ok(None) => Effect::Inert,
            Err(err) => {
                log::warn!("block {} has a malformed action prop: {}", block.id, err);
                self.warn(RenderWarning::MalformedAction {
                    block_id: block.id.clone(),
                    message: err.to_string(),
                });
                Effect::Inert
            }
        }
    }

    /// Resolves a color for a block: an explicit block prop (e.g. `bgColor`)
    /// takes precedence over the cascade token, which is the fallback.
    pub fn color_or<'b>(&'b self, block: &'b Block, prop: &str, token: &'b str) -> &'b str {
        match block.str_prop(prop) {
            Some(value) if !value.trim().is_empty() => value,
            _ => token,
        }
    }

    /// Produces the edit wiring for a block prop: `Some` in editing mode,
    /// `None` in published mode (the binder is absent there).
    pub fn binding(&self, block: &Block, prop_key: &str) -> Option<EditBinding> {
        if self.is_editing() {
            Some(EditBinding {
                block_id: block.id.clone(),
                prop_key: prop_key.to_string(),
            })
        } else {
            None
        }
    }

    /// Sanitizes a formatted-content prop for rendering, recording a
    /// diagnostic when the sanitizer had to escape the fragment wholesale.
    pub fn sanitized_prop(&mut self, block: &Block, prop_key: &str) -> String {
        let raw = block.str_prop(prop_key).unwrap_or_default();
        let (clean, fell_back) = sanitize_html_report(raw);
        if fell_back {
            self.warn(RenderWarning::SanitizerFallback {
                block_id: Some(block.id.clone()),
            });
        }
        clean
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagebloc_core::{ACTION_PROP, RenderWarning};
    use serde_json::json;

    fn theme() -> SiteTheme {
        SiteTheme::default()
    }

    #[test]
    fn explicit_prop_overrides_cascade() {
        let theme = theme();
        let nav = NavContext::new();
        let ctx = RenderContext::new(&theme, &nav, RenderMode::Published);

        let mut block = Block::new("b1", "hero");
        block.set_prop("bgColor", json!("#ff0000"));
        assert_eq!(ctx.color_or(&block, "bgColor", &theme.primary_color), "#ff0000");

        let plain = Block::new("b2", "hero");
        assert_eq!(
            ctx.color_or(&plain, "bgColor", &theme.primary_color),
            theme.primary_color
        );

        // Blank overrides fall back to the cascade too.
        let mut blank = Block::new("b3", "hero");
        blank.set_prop("bgColor", json!("  "));
        assert_eq!(
            ctx.color_or(&blank, "bgColor", &theme.primary_color),
            theme.primary_color
        );
    }

    #[test]
    fn binding_only_in_editing_mode() {
        let theme = theme();
        let nav = NavContext::new();
        let block = Block::new("b1", "text");

        let editing = RenderContext::new(&theme, &nav, RenderMode::Editing);
        let binding = editing.binding(&block, "text").unwrap();
        assert_eq!(binding.block_id, "b1");
        assert_eq!(binding.prop_key, "text");

        let published = RenderContext::new(&theme, &nav, RenderMode::Published);
        assert!(published.binding(&block, "text").is_none());
    }

    #[test]
    fn malformed_action_degrades_to_inert_with_diagnostic() {
        let theme = theme();
        let nav = NavContext::new();
        let mut ctx = RenderContext::new(&theme, &nav, RenderMode::Published);

        let mut block = Block::new("b1", "button");
        block.set_prop(ACTION_PROP, json!("not an object"));

        assert!(ctx.resolve_block_action(&block).is_inert());
        let diag = ctx.into_diagnostics();
        assert_eq!(diag.count(), 1);
        assert!(matches!(
            diag.warnings[0],
            RenderWarning::MalformedAction { .. }
        ));
    }

    #[test]
    fn sanitized_prop_strips_markup() {
        let theme = theme();
        let nav = NavContext::new();
        let mut ctx = RenderContext::new(&theme, &nav, RenderMode::Published);

        let mut block = Block::new("b1", "richText");
        block.set_prop("html", json!("<script>alert(1)</script><p>Hello</p>"));
        assert_eq!(ctx.sanitized_prop(&block, "html"), "<p>Hello</p>");
        assert!(!ctx.into_diagnostics().has_warnings());
    }
}
