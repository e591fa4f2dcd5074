//! HTML serialization of render trees.
//!
//! The serializer is the only place render trees become markup. Text nodes
//! and attribute values are escaped here; [`RenderNode::Raw`] content is
//! trusted because it only ever carries sanitizer output.

use crate::registry::BlockRegistry;
use crate::renderer::types::{ElementNode, RenderMode, RenderNode};
use crate::resolver::{Effect, NavContext};
use pagebloc_core::{RenderDiagnostics, Site, SitePage, SiteTheme};
use serde::Serialize;
use std::collections::BTreeMap;

/// Tags that never take a closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "meta", "source", "track", "wbr"];

/// A published page: the route it is served under plus its markup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedPage {
    /// Identifier of the source page.
    pub page_id: String,
    /// Route the page is served under, e.g. `/` or `/about`.
    pub route: String,
    /// Serialized markup for the page body.
    pub html: String,
    /// Warnings collected while rendering the page.
    #[serde(skip)]
    pub diagnostics: RenderDiagnostics,
}

/// Serializes a list of render nodes to an HTML string.
pub fn render_nodes_html(nodes: &[RenderNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(&mut out, node);
    }
    out
}

/// Serializes a rendered page's nodes to an HTML string. Diagnostics are
/// left on the [`RenderedPage`]; serialization itself cannot fail.
pub fn render_page_html(page: &crate::renderer::types::RenderedPage) -> String {
    render_nodes_html(&page.nodes)
}

/// Renders and serializes one page in published mode, wrapping the block
/// markup in a `<main>` carrying the site-wide direction and base colors.
pub fn publish_page(
    registry: &BlockRegistry,
    page: &SitePage,
    theme: &SiteTheme,
    nav: &NavContext,
) -> PublishedPage {
    let rendered = registry.render_page(page, theme, nav, RenderMode::Published);
    let body = render_nodes_html(&rendered.nodes);
    let html = format!(
        "<main dir=\"{}\" style=\"background-color:{};color:{};font-family:{}\">{}</main>",
        theme.direction.as_attr(),
        escape_attr(&theme.background_color),
        escape_attr(&theme.text_color),
        escape_attr(&theme.body_font),
        body
    );
    PublishedPage {
        page_id: page.id.clone(),
        route: nav.route(&page.id).unwrap_or("/").to_string(),
        html,
        diagnostics: rendered.diagnostics,
    }
}

/// Publishes every page of a site under the routes derived from its titles.
pub fn publish_site(registry: &BlockRegistry, site: &Site, theme: &SiteTheme) -> Vec<PublishedPage> {
    let nav = NavContext::from_site(site);
    site.pages
        .iter()
        .map(|page| publish_page(registry, page, theme, &nav))
        .collect()
}

fn write_node(out: &mut String, node: &RenderNode) {
    match node {
        RenderNode::Element(el) => write_element(out, el),
        RenderNode::Text { content } => {
            out.push_str(&html_escape::encode_text(content));
        }
        RenderNode::Raw { html } => out.push_str(html),
        RenderNode::Fallback { block_type } => {
            out.push_str("<div class=\"block-fallback\" data-block-type=\"");
            out.push_str(&escape_attr(block_type));
            out.push_str("\">Unsupported block</div>");
        }
    }
}

fn write_element(out: &mut String, el: &ElementNode) {
    let mut attrs = el.attrs.clone();
    if let Some(effect) = &el.effect {
        apply_effect_attrs(&mut attrs, effect);
    }
    if let Some(binding) = &el.binding {
        attrs.insert("contenteditable".to_string(), "true".to_string());
        attrs.insert("data-block-id".to_string(), binding.block_id.clone());
        attrs.insert("data-prop-key".to_string(), binding.prop_key.clone());
    }

    out.push('<');
    out.push_str(&el.tag);
    for (name, value) in &attrs {
        out.push(' ');
        out.push_str(name);
        if !value.is_empty() {
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }
    }
    out.push('>');

    if VOID_TAGS.contains(&el.tag.as_str()) {
        return;
    }
    for child in &el.children {
        write_node(out, child);
    }
    out.push_str("</");
    out.push_str(&el.tag);
    out.push('>');
}

/// Maps a resolved effect onto serialized attributes. Navigation-like
/// effects become plain hrefs; custom effects become data attributes the
/// host script can pick up.
fn apply_effect_attrs(attrs: &mut BTreeMap<String, String>, effect: &Effect) {
    match effect {
        Effect::Inert => {}
        Effect::Navigate { route, .. } => {
            attrs.insert("href".to_string(), route.clone());
        }
        Effect::Open { url, new_tab } => {
            attrs.insert("href".to_string(), url.clone());
            if *new_tab {
                attrs.insert("target".to_string(), "_blank".to_string());
                attrs.insert("rel".to_string(), "noopener noreferrer".to_string());
            }
        }
        Effect::ScrollTo { section_id } => {
            attrs.insert("href".to_string(), format!("#{}", section_id));
        }
        Effect::Download { url } => {
            attrs.insert("href".to_string(), url.clone());
            attrs.insert("download".to_string(), String::new());
        }
        Effect::Invoke { handler } => {
            attrs.insert("data-action".to_string(), "custom".to_string());
            attrs.insert("data-handler".to_string(), handler.clone());
        }
    }
}

fn escape_attr(value: &str) -> String {
    html_escape::encode_double_quoted_attribute(value).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::types::EditBinding;
    use pagebloc_core::Block;
    use serde_json::json;

    #[test]
    fn text_content_is_escaped() {
        let node = ElementNode::new("p").text("a < b & c").into_node();
        let html = render_nodes_html(&[node]);
        assert_eq!(html, "<p>a &lt; b &amp; c</p>");
    }

    #[test]
    fn attribute_values_are_escaped() {
        let node = ElementNode::new("img")
            .attr("alt", "say \"hi\"")
            .into_node();
        let html = render_nodes_html(&[node]);
        assert_eq!(html, "<img alt=\"say &quot;hi&quot;\">");
    }

    #[test]
    fn navigate_effect_becomes_href() {
        let node = ElementNode::new("a")
            .effect(Effect::Navigate {
                page_id: "about".to_string(),
                route: "/about".to_string(),
            })
            .text("About")
            .into_node();
        assert_eq!(render_nodes_html(&[node]), "<a href=\"/about\">About</a>");
    }

    #[test]
    fn open_in_new_tab_gets_target_and_rel() {
        let node = ElementNode::new("a")
            .effect(Effect::Open {
                url: "https://example.com".to_string(),
                new_tab: true,
            })
            .text("Go")
            .into_node();
        let html = render_nodes_html(&[node]);
        assert!(html.contains("href=\"https://example.com\""));
        assert!(html.contains("target=\"_blank\""));
        assert!(html.contains("rel=\"noopener noreferrer\""));
    }

    #[test]
    fn scroll_effect_becomes_fragment_href() {
        let node = ElementNode::new("a")
            .effect(Effect::ScrollTo {
                section_id: "contact".to_string(),
            })
            .into_node();
        assert!(render_nodes_html(&[node]).contains("href=\"#contact\""));
    }

    #[test]
    fn download_effect_gets_download_attr() {
        let node = ElementNode::new("a")
            .effect(Effect::Download {
                url: "/files/menu.pdf".to_string(),
            })
            .into_node();
        let html = render_nodes_html(&[node]);
        assert!(html.contains("href=\"/files/menu.pdf\""));
        assert!(html.contains(" download "));
    }

    #[test]
    fn invoke_effect_becomes_data_attributes() {
        let node = ElementNode::new("a")
            .effect(Effect::Invoke {
                handler: "openChat".to_string(),
            })
            .into_node();
        let html = render_nodes_html(&[node]);
        assert!(html.contains("data-action=\"custom\""));
        assert!(html.contains("data-handler=\"openChat\""));
        assert!(!html.contains("href"));
    }

    #[test]
    fn binding_serializes_to_editable_attributes() {
        let node = ElementNode::new("p")
            .binding(Some(EditBinding {
                block_id: "b1".to_string(),
                prop_key: "text".to_string(),
            }))
            .text("hi")
            .into_node();
        let html = render_nodes_html(&[node]);
        assert!(html.contains("contenteditable=\"true\""));
        assert!(html.contains("data-block-id=\"b1\""));
        assert!(html.contains("data-prop-key=\"text\""));
    }

    #[test]
    fn fallback_serializes_to_labeled_placeholder() {
        let html = render_nodes_html(&[RenderNode::Fallback {
            block_type: "unknown-x".to_string(),
        }]);
        assert_eq!(
            html,
            "<div class=\"block-fallback\" data-block-type=\"unknown-x\">Unsupported block</div>"
        );
    }

    #[test]
    fn void_tags_do_not_close() {
        let node = ElementNode::new("hr").into_node();
        assert_eq!(render_nodes_html(&[node]), "<hr>");
    }

    #[test]
    fn published_site_routes_follow_page_titles() {
        let registry = BlockRegistry::with_builtins();
        let theme = SiteTheme::default();

        let mut home = SitePage::new("p1", "Home");
        home.is_home_page = true;
        let mut about = SitePage::new("p2", "About Us");
        about.blocks.push(Block::new("b1", "text"));
        let site = Site {
            pages: vec![home, about],
        };

        let published = publish_site(&registry, &site, &theme);
        assert_eq!(published.len(), 2);
        assert_eq!(published[0].route, "/");
        assert_eq!(published[1].route, "/about-us");
        assert!(published[1].html.starts_with("<main dir=\"ltr\""));
        assert!(published[1].html.contains("block-text"));
    }

    #[test]
    fn published_page_carries_render_diagnostics() {
        let registry = BlockRegistry::with_builtins();
        let theme = SiteTheme::default();
        let nav = NavContext::new();

        let mut page = SitePage::new("p1", "Home");
        page.blocks.push(Block::new("b1", "mystery"));
        let mut button = Block::new("b2", "button");
        button.set_prop("text", json!("Hi"));
        page.blocks.push(button);

        let published = publish_page(&registry, &page, &theme, &nav);
        assert!(published.diagnostics.has_warnings());
        assert!(published.html.contains("block-fallback"));
        assert!(published.html.contains("block-button"));
    }
}
