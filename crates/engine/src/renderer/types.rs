//! Type definitions for the block renderer.

use crate::resolver::Effect;
use pagebloc_core::RenderDiagnostics;
use serde::Serialize;
use std::collections::BTreeMap;

/// Which of the two behavioral renderings is being produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// The live, directly-editable canvas used inside the authoring tool.
    Editing,
    /// The static artifact used for the final site.
    Published,
}

impl RenderMode {
    /// Returns true for the editable canvas rendering.
    pub fn is_editing(&self) -> bool {
        matches!(self, RenderMode::Editing)
    }
}

/// Wiring between an editable region and the edit-session binder: the
/// commit target for in-place edits of this element's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditBinding {
    /// Id of the block owning the edited prop.
    pub block_id: String,
    /// The prop key a commit patches (whole collection for row edits).
    pub prop_key: String,
}

/// One node of the render tree.
///
/// The editing canvas consumes the tree directly (bindings and effects as
/// structured data); the publish pipeline serializes it to static HTML.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RenderNode {
    /// A regular element.
    Element(ElementNode),
    /// Escaped text content.
    Text {
        /// The text, escaped at serialization time.
        content: String,
    },
    /// A sanitized markup fragment emitted verbatim. Only ever constructed
    /// from [`pagebloc_core::sanitize_html`] output.
    Raw {
        /// The sanitized fragment.
        html: String,
    },
    /// Deterministic placeholder for an unregistered block type.
    Fallback {
        /// The type discriminator that failed to resolve.
        block_type: String,
    },
}

/// An element with attributes, children, and the optional interaction
/// effect / edit binding resolved for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementNode {
    /// Lowercase tag name.
    pub tag: String,
    /// Attributes in stable (sorted) order.
    pub attrs: BTreeMap<String, String>,
    /// Child nodes.
    pub children: Vec<RenderNode>,
    /// Resolved interaction, when the block carries a non-inert action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<Effect>,
    /// Edit wiring; attached in editing mode only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binding: Option<EditBinding>,
}

impl ElementNode {
    /// Creates an empty element.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: BTreeMap::new(),
            children: Vec::new(),
            effect: None,
            binding: None,
        }
    }

    /// Sets an attribute (builder style).
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Appends a child node (builder style).
    pub fn child(mut self, node: RenderNode) -> Self {
        self.children.push(node);
        self
    }

    /// Appends an escaped text child (builder style).
    pub fn text(mut self, content: impl Into<String>) -> Self {
        self.children.push(RenderNode::Text {
            content: content.into(),
        });
        self
    }

    /// Attaches a resolved effect. Inert effects are not attached: an
    /// inert action renders with no handler at all.
    pub fn effect(mut self, effect: Effect) -> Self {
        if !effect.is_inert() {
            self.effect = Some(effect);
        }
        self
    }

    /// Attaches an edit binding, if one was produced for this mode.
    pub fn binding(mut self, binding: Option<EditBinding>) -> Self {
        self.binding = binding;
        self
    }

    /// Wraps the element into a [`RenderNode`].
    pub fn into_node(self) -> RenderNode {
        RenderNode::Element(self)
    }
}

/// The output of rendering one page: the node per block, in page order,
/// plus the warnings recovered along the way.
#[derive(Debug)]
pub struct RenderedPage {
    /// One node per block, in page order.
    pub nodes: Vec<RenderNode>,
    /// Warnings recovered during the pass (never fatal).
    pub diagnostics: RenderDiagnostics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_assembles_element() {
        let node = ElementNode::new("a")
            .attr("class", "block-button")
            .text("Go")
            .effect(Effect::Open {
                url: "https://example.com".to_string(),
                new_tab: true,
            })
            .into_node();

        match node {
            RenderNode::Element(el) => {
                assert_eq!(el.tag, "a");
                assert_eq!(el.attrs.get("class").unwrap(), "block-button");
                assert_eq!(el.children.len(), 1);
                assert!(el.effect.is_some());
                assert!(el.binding.is_none());
            }
            other => panic!("expected element, got {:?}", other),
        }
    }

    #[test]
    fn inert_effects_are_not_attached() {
        let el = ElementNode::new("a").effect(Effect::Inert);
        assert!(el.effect.is_none());
    }

    #[test]
    fn nodes_serialize_with_kind_tag() {
        let node = ElementNode::new("p").text("hi").into_node();
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["kind"], "element");
        assert_eq!(json["tag"], "p");
        assert_eq!(json["children"][0]["kind"], "text");
        assert_eq!(json["children"][0]["content"], "hi");
    }
}
