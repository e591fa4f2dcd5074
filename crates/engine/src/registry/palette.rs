//! The palette: default property sets for every known block type.
//!
//! The palette is the catalogue the editor offers when inserting a block,
//! and the completion source the dispatcher uses at render time: blocks
//! authored against an older property schema get missing keys filled from
//! here before their renderer runs, so renderers never see a partial bag.

use once_cell::sync::Lazy;
use pagebloc_core::{Block, EngineError};
use serde_json::{Map, Value, json};
use std::collections::HashMap;

/// Default property bags for the built-in block catalogue.
static BUILTIN_DEFAULTS: Lazy<HashMap<&'static str, Map<String, Value>>> = Lazy::new(|| {
    let mut defaults = HashMap::new();
    let mut put = |block_type: &'static str, bag: Value| {
        let map = bag
            .as_object()
            .cloned()
            .unwrap_or_default();
        defaults.insert(block_type, map);
    };

    put("heading", json!({ "text": "Heading", "level": 2, "align": "left" }));
    put("text", json!({ "text": "Start writing...", "align": "left" }));
    put("richText", json!({ "html": "<p>Start writing...</p>" }));
    put("quote", json!({ "text": "Quote", "author": "" }));
    put(
        "button",
        json!({ "text": "Click me", "variant": "primary", "action": { "type": "none" } }),
    );
    put(
        "image",
        json!({ "src": "", "alt": "", "caption": "", "action": { "type": "none" } }),
    );
    put("gallery", json!({ "images": [] }));
    put("video", json!({ "url": "", "autoplay": false, "loop": false }));
    put(
        "hero",
        json!({
            "title": "Welcome",
            "subtitle": "",
            "buttonText": "",
            "action": { "type": "none" }
        }),
    );
    put(
        "card",
        json!({ "title": "Card title", "body": "", "action": { "type": "none" } }),
    );
    put("divider", json!({ "style": "solid" }));
    put("spacer", json!({ "height": 32 }));
    put("section", json!({ "anchorId": "", "title": "" }));
    put(
        "timeline",
        json!({ "items": [{ "year": "2024", "title": "Milestone", "description": "" }] }),
    );
    put(
        "faq",
        json!({ "items": [{ "question": "Question?", "answer": "Answer." }] }),
    );
    put("socialLinks", json!({ "links": [] }));
    put("embed", json!({ "html": "" }));

    defaults
});

/// Catalogue mapping block types to their default property sets.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    defaults: HashMap<String, Map<String, Value>>,
}

impl Palette {
    /// Creates an empty palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a palette preloaded with the built-in block catalogue.
    pub fn with_builtins() -> Self {
        let defaults = BUILTIN_DEFAULTS
            .iter()
            .map(|(ty, bag)| (ty.to_string(), bag.clone()))
            .collect();
        Self { defaults }
    }

    /// Registers (or replaces) the default property set for a block type.
    pub fn insert(&mut self, block_type: impl Into<String>, defaults: Map<String, Value>) {
        self.defaults.insert(block_type.into(), defaults);
    }

    /// Returns the default property set for a type, if known.
    pub fn defaults_for(&self, block_type: &str) -> Option<&Map<String, Value>> {
        self.defaults.get(block_type)
    }

    /// Returns true if the type is in the catalogue.
    pub fn contains(&self, block_type: &str) -> bool {
        self.defaults.contains_key(block_type)
    }

    /// Iterates over the known block types.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.defaults.keys().map(String::as_str)
    }

    /// Completes a block's property bag: missing keys are shallow-merged
    /// from the type's defaults, authored values win, and extra keys the
    /// palette does not know about are preserved. Unknown types pass
    /// through untouched.
    pub fn complete(&self, block: &Block) -> Block {
        let Some(defaults) = self.defaults.get(&block.block_type) else {
            return block.clone();
        };
        let mut completed = block.clone();
        for (key, value) in defaults {
            if !completed.props.contains_key(key) {
                completed.props.insert(key.clone(), value.clone());
            }
        }
        completed
    }

    /// Mints a new block of a known type from its defaults (the editor's
    /// "insert block" path).
    pub fn instantiate(
        &self,
        block_type: &str,
        id: impl Into<String>,
    ) -> Result<Block, EngineError> {
        let defaults = self
            .defaults
            .get(block_type)
            .ok_or_else(|| EngineError::UnknownBlockType(block_type.to_string()))?;
        let mut block = Block::new(id, block_type);
        block.props = defaults.clone();
        Ok(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builtins_cover_the_catalogue() {
        let palette = Palette::with_builtins();
        for ty in [
            "heading", "text", "richText", "quote", "button", "image", "gallery", "video",
            "hero", "card", "divider", "spacer", "section", "timeline", "faq", "socialLinks",
            "embed",
        ] {
            assert!(palette.contains(ty), "missing defaults for {}", ty);
        }
    }

    #[test]
    fn complete_fills_missing_keys_only() {
        let palette = Palette::with_builtins();
        let mut block = Block::new("b1", "button");
        block.set_prop("text", json!("Buy now"));

        let completed = palette.complete(&block);
        // Authored value wins.
        assert_eq!(completed.str_prop("text"), Some("Buy now"));
        // Missing keys come from the defaults.
        assert_eq!(completed.str_prop("variant"), Some("primary"));
        assert_eq!(completed.props["action"]["type"], "none");
    }

    #[test]
    fn complete_preserves_unknown_keys() {
        let palette = Palette::with_builtins();
        let mut block = Block::new("b1", "button");
        block.set_prop("futureFlag", json!(true));

        let completed = palette.complete(&block);
        assert_eq!(completed.props["futureFlag"], json!(true));
    }

    #[test]
    fn complete_passes_unknown_types_through() {
        let palette = Palette::with_builtins();
        let mut block = Block::new("b1", "holo-widget");
        block.set_prop("x", json!(1));
        assert_eq!(palette.complete(&block), block);
    }

    #[test]
    fn instantiate_mints_from_defaults() {
        let palette = Palette::with_builtins();
        let block = palette.instantiate("heading", "h1").unwrap();
        assert_eq!(block.id, "h1");
        assert_eq!(block.block_type, "heading");
        assert_eq!(block.str_prop("text"), Some("Heading"));
        assert_eq!(block.props["level"], json!(2));
    }

    #[test]
    fn instantiate_unknown_type_is_an_error() {
        let palette = Palette::with_builtins();
        let err = palette.instantiate("holo-widget", "x").unwrap_err();
        assert!(matches!(err, EngineError::UnknownBlockType(_)));
    }

    #[test]
    fn custom_entries_extend_the_catalogue() {
        let mut palette = Palette::with_builtins();
        let bag = json!({ "stars": 5 }).as_object().cloned().unwrap();
        palette.insert("rating", bag);
        assert!(palette.contains("rating"));
        assert_eq!(
            palette.instantiate("rating", "r1").unwrap().props["stars"],
            json!(5)
        );
    }
}
