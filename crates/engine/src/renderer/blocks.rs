//! Built-in block renderers.
//!
//! Each renderer is a pure function of the completed property bag, the
//! theme cascade, and the render mode (all carried by the context). Every
//! visual token is read from the cascade; a block-local deviation exists
//! only where a renderer consults an explicit prop (e.g. the hero's
//! `bgColor`) with the cascade value as fallback.

use crate::registry::BlockRegistry;
use crate::renderer::context::RenderContext;
use crate::renderer::types::{ElementNode, RenderNode};
use pagebloc_core::Block;
use serde_json::Value;

/// Registers the built-in catalogue on a registry. The palette side of the
/// catalogue lives in [`crate::registry::palette`].
pub(crate) fn register_builtins(registry: &mut BlockRegistry) {
    registry.register("heading", render_heading);
    registry.register("text", render_text);
    registry.register("richText", render_rich_text);
    registry.register("quote", render_quote);
    registry.register("button", render_button);
    registry.register("image", render_image);
    registry.register("gallery", render_gallery);
    registry.register("video", render_video);
    registry.register("hero", render_hero);
    registry.register("card", render_card);
    registry.register("divider", render_divider);
    registry.register("spacer", render_spacer);
    registry.register("section", render_section);
    registry.register("timeline", render_timeline);
    registry.register("faq", render_faq);
    registry.register("socialLinks", render_social_links);
    registry.register("embed", render_embed);
}

fn u64_prop(block: &Block, key: &str, default: u64) -> u64 {
    block.prop(key).and_then(Value::as_u64).unwrap_or(default)
}

fn items_prop<'a>(block: &'a Block, key: &str) -> &'a [Value] {
    block
        .prop(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn body_style(ctx: &RenderContext<'_>) -> String {
    format!(
        "color:{};font-family:{}",
        ctx.theme().text_color,
        ctx.theme().body_font
    )
}

fn heading_style(ctx: &RenderContext<'_>) -> String {
    format!(
        "color:{};font-family:{}",
        ctx.theme().text_color,
        ctx.theme().heading_font
    )
}

/// Wraps a node in an anchor when the block resolved to a non-inert effect.
/// Used by visual blocks (image, card) whose own tag cannot carry an href.
fn wrap_in_effect(effect: crate::resolver::Effect, node: RenderNode) -> RenderNode {
    if effect.is_inert() {
        node
    } else {
        ElementNode::new("a").effect(effect).child(node).into_node()
    }
}

fn render_heading(block: &Block, ctx: &mut RenderContext<'_>) -> RenderNode {
    let level = u64_prop(block, "level", 2).clamp(1, 6);
    let align = block.str_prop("align").unwrap_or("left");
    ElementNode::new(format!("h{}", level))
        .attr("class", "block-heading")
        .attr("style", format!("{};text-align:{}", heading_style(ctx), align))
        .binding(ctx.binding(block, "text"))
        .text(block.str_prop("text").unwrap_or_default())
        .into_node()
}

fn render_text(block: &Block, ctx: &mut RenderContext<'_>) -> RenderNode {
    let align = block.str_prop("align").unwrap_or("left");
    ElementNode::new("p")
        .attr("class", "block-text")
        .attr("style", format!("{};text-align:{}", body_style(ctx), align))
        .binding(ctx.binding(block, "text"))
        .text(block.str_prop("text").unwrap_or_default())
        .into_node()
}

fn render_rich_text(block: &Block, ctx: &mut RenderContext<'_>) -> RenderNode {
    let html = ctx.sanitized_prop(block, "html");
    ElementNode::new("div")
        .attr("class", "block-richtext")
        .attr("style", body_style(ctx))
        .binding(ctx.binding(block, "html"))
        .child(RenderNode::Raw { html })
        .into_node()
}

fn render_quote(block: &Block, ctx: &mut RenderContext<'_>) -> RenderNode {
    let mut quote = ElementNode::new("blockquote")
        .attr("class", "block-quote")
        .attr(
            "style",
            format!(
                "{};border-inline-start:4px solid {}",
                body_style(ctx),
                ctx.theme().accent_color
            ),
        )
        .child(
            ElementNode::new("p")
                .binding(ctx.binding(block, "text"))
                .text(block.str_prop("text").unwrap_or_default())
                .into_node(),
        );

    let author = block.str_prop("author").unwrap_or_default();
    if !author.is_empty() {
        quote = quote.child(
            ElementNode::new("cite")
                .binding(ctx.binding(block, "author"))
                .text(author)
                .into_node(),
        );
    }
    quote.into_node()
}

fn render_button(block: &Block, ctx: &mut RenderContext<'_>) -> RenderNode {
    let variant = block.str_prop("variant").unwrap_or("primary");
    let background = match variant {
        "secondary" => &ctx.theme().secondary_color,
        _ => &ctx.theme().primary_color,
    };
    let style = format!(
        "background-color:{};color:{};border-radius:{};font-family:{}",
        background,
        ctx.theme().background_color,
        ctx.theme().border_radius,
        ctx.theme().body_font
    );
    let effect = ctx.resolve_block_action(block);
    ElementNode::new("a")
        .attr("class", format!("block-button block-button--{}", variant))
        .attr("style", style)
        .effect(effect)
        .binding(ctx.binding(block, "text"))
        .text(block.str_prop("text").unwrap_or_default())
        .into_node()
}

fn render_image(block: &Block, ctx: &mut RenderContext<'_>) -> RenderNode {
    let img = ElementNode::new("img")
        .attr("src", block.str_prop("src").unwrap_or_default())
        .attr("alt", block.str_prop("alt").unwrap_or_default())
        .attr("style", format!("border-radius:{}", ctx.theme().border_radius))
        .into_node();

    let effect = ctx.resolve_block_action(block);
    let mut figure = ElementNode::new("figure")
        .attr("class", "block-image")
        .child(wrap_in_effect(effect, img));

    let caption = block.str_prop("caption").unwrap_or_default();
    if !caption.is_empty() {
        figure = figure.child(
            ElementNode::new("figcaption")
                .attr("style", body_style(ctx))
                .binding(ctx.binding(block, "caption"))
                .text(caption)
                .into_node(),
        );
    }
    figure.into_node()
}

fn render_gallery(block: &Block, ctx: &mut RenderContext<'_>) -> RenderNode {
    let mut gallery = ElementNode::new("div")
        .attr("class", "block-gallery")
        .binding(ctx.binding(block, "images"));
    for image in items_prop(block, "images") {
        let src = image.get("src").and_then(Value::as_str).unwrap_or_default();
        let alt = image.get("alt").and_then(Value::as_str).unwrap_or_default();
        gallery = gallery.child(
            ElementNode::new("img")
                .attr("src", src)
                .attr("alt", alt)
                .attr("style", format!("border-radius:{}", ctx.theme().border_radius))
                .into_node(),
        );
    }
    gallery.into_node()
}

fn render_video(block: &Block, _ctx: &mut RenderContext<'_>) -> RenderNode {
    let mut video = ElementNode::new("video")
        .attr("class", "block-video")
        .attr("controls", "");
    let url = block.str_prop("url").unwrap_or_default();
    if !url.is_empty() {
        video = video.attr("src", url);
    }
    if block.bool_prop("autoplay") {
        video = video.attr("autoplay", "").attr("muted", "");
    }
    if block.bool_prop("loop") {
        video = video.attr("loop", "");
    }
    video.into_node()
}

fn render_hero(block: &Block, ctx: &mut RenderContext<'_>) -> RenderNode {
    // Explicit bgColor prop beats the cascade; primary is the fallback.
    let background = ctx
        .color_or(block, "bgColor", &ctx.theme().primary_color)
        .to_string();
    let foreground = ctx.theme().background_color.clone();

    let mut hero = ElementNode::new("section")
        .attr("class", "block-hero")
        .attr("style", format!("background-color:{}", background))
        .child(
            ElementNode::new("h1")
                .attr(
                    "style",
                    format!("color:{};font-family:{}", foreground, ctx.theme().heading_font),
                )
                .binding(ctx.binding(block, "title"))
                .text(block.str_prop("title").unwrap_or_default())
                .into_node(),
        );

    let subtitle = block.str_prop("subtitle").unwrap_or_default();
    if !subtitle.is_empty() {
        hero = hero.child(
            ElementNode::new("p")
                .attr(
                    "style",
                    format!("color:{};font-family:{}", foreground, ctx.theme().body_font),
                )
                .binding(ctx.binding(block, "subtitle"))
                .text(subtitle)
                .into_node(),
        );
    }

    let button_text = block.str_prop("buttonText").unwrap_or_default().to_string();
    if !button_text.is_empty() {
        let effect = ctx.resolve_block_action(block);
        hero = hero.child(
            ElementNode::new("a")
                .attr("class", "block-button block-button--hero")
                .attr(
                    "style",
                    format!(
                        "background-color:{};color:{};border-radius:{}",
                        ctx.theme().accent_color,
                        ctx.theme().text_color,
                        ctx.theme().border_radius
                    ),
                )
                .effect(effect)
                .binding(ctx.binding(block, "buttonText"))
                .text(button_text)
                .into_node(),
        );
    }
    hero.into_node()
}

fn render_card(block: &Block, ctx: &mut RenderContext<'_>) -> RenderNode {
    let card = ElementNode::new("div")
        .attr("class", "block-card")
        .attr(
            "style",
            format!(
                "border:1px solid {};border-radius:{}",
                ctx.theme().secondary_color,
                ctx.theme().border_radius
            ),
        )
        .child(
            ElementNode::new("h3")
                .attr("style", heading_style(ctx))
                .binding(ctx.binding(block, "title"))
                .text(block.str_prop("title").unwrap_or_default())
                .into_node(),
        )
        .child(
            ElementNode::new("p")
                .attr("style", body_style(ctx))
                .binding(ctx.binding(block, "body"))
                .text(block.str_prop("body").unwrap_or_default())
                .into_node(),
        )
        .into_node();

    let effect = ctx.resolve_block_action(block);
    wrap_in_effect(effect, card)
}

fn render_divider(block: &Block, ctx: &mut RenderContext<'_>) -> RenderNode {
    let line_style = match block.str_prop("style") {
        Some("dashed") => "dashed",
        Some("dotted") => "dotted",
        _ => "solid",
    };
    ElementNode::new("hr")
        .attr("class", "block-divider")
        .attr(
            "style",
            format!("border-top:1px {} {}", line_style, ctx.theme().secondary_color),
        )
        .into_node()
}

fn render_spacer(block: &Block, _ctx: &mut RenderContext<'_>) -> RenderNode {
    let height = u64_prop(block, "height", 32);
    ElementNode::new("div")
        .attr("class", "block-spacer")
        .attr("style", format!("height:{}px", height))
        .attr("aria-hidden", "true")
        .into_node()
}

fn render_section(block: &Block, ctx: &mut RenderContext<'_>) -> RenderNode {
    let mut section = ElementNode::new("div").attr("class", "block-section");
    let anchor = block.str_prop("anchorId").unwrap_or_default().trim();
    if !anchor.is_empty() {
        section = section.attr("id", anchor);
    }
    let title = block.str_prop("title").unwrap_or_default();
    if !title.is_empty() {
        section = section.child(
            ElementNode::new("h2")
                .attr("style", heading_style(ctx))
                .binding(ctx.binding(block, "title"))
                .text(title)
                .into_node(),
        );
    }
    section.into_node()
}

fn render_timeline(block: &Block, ctx: &mut RenderContext<'_>) -> RenderNode {
    // Row edits replace the whole `items` collection on commit, so the
    // binding sits on the container, not on individual rows.
    let mut timeline = ElementNode::new("ol")
        .attr("class", "block-timeline")
        .attr("style", body_style(ctx))
        .binding(ctx.binding(block, "items"));

    for item in items_prop(block, "items") {
        let year = item.get("year").and_then(Value::as_str).unwrap_or_default();
        let title = item.get("title").and_then(Value::as_str).unwrap_or_default();
        let description = item
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default();

        let mut entry = ElementNode::new("li")
            .child(
                ElementNode::new("span")
                    .attr("class", "block-timeline__year")
                    .attr("style", format!("color:{}", ctx.theme().accent_color))
                    .text(year)
                    .into_node(),
            )
            .child(ElementNode::new("strong").text(title).into_node());
        if !description.is_empty() {
            entry = entry.child(ElementNode::new("p").text(description).into_node());
        }
        timeline = timeline.child(entry.into_node());
    }
    timeline.into_node()
}

fn render_faq(block: &Block, ctx: &mut RenderContext<'_>) -> RenderNode {
    let mut faq = ElementNode::new("div")
        .attr("class", "block-faq")
        .attr("style", body_style(ctx))
        .binding(ctx.binding(block, "items"));

    for item in items_prop(block, "items") {
        let question = item
            .get("question")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let answer = item.get("answer").and_then(Value::as_str).unwrap_or_default();
        faq = faq.child(
            ElementNode::new("details")
                .child(ElementNode::new("summary").text(question).into_node())
                .child(ElementNode::new("p").text(answer).into_node())
                .into_node(),
        );
    }
    faq.into_node()
}

fn render_social_links(block: &Block, ctx: &mut RenderContext<'_>) -> RenderNode {
    let mut list = ElementNode::new("ul")
        .attr("class", "block-social")
        .binding(ctx.binding(block, "links"));

    for link in items_prop(block, "links") {
        let network = link
            .get("network")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let url = link.get("url").and_then(Value::as_str).unwrap_or_default();
        if url.is_empty() {
            continue;
        }
        list = list.child(
            ElementNode::new("li")
                .child(
                    ElementNode::new("a")
                        .attr("href", url)
                        .attr("rel", "noopener noreferrer")
                        .attr("style", format!("color:{}", ctx.theme().primary_color))
                        .text(network)
                        .into_node(),
                )
                .into_node(),
        );
    }
    list.into_node()
}

fn render_embed(block: &Block, ctx: &mut RenderContext<'_>) -> RenderNode {
    let html = ctx.sanitized_prop(block, "html");
    ElementNode::new("div")
        .attr("class", "block-embed")
        .binding(ctx.binding(block, "html"))
        .child(RenderNode::Raw { html })
        .into_node()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::types::RenderMode;
    use crate::resolver::{Effect, NavContext};
    use pagebloc_core::{ACTION_PROP, SiteTheme};
    use serde_json::json;

    fn render(block: &Block, theme: &SiteTheme, mode: RenderMode) -> RenderNode {
        let registry = BlockRegistry::with_builtins();
        let nav = NavContext::new().with_page("about", "/about");
        let mut ctx = RenderContext::new(theme, &nav, mode);
        registry.render_block(block, &mut ctx)
    }

    fn element(node: RenderNode) -> ElementNode {
        match node {
            RenderNode::Element(el) => el,
            other => panic!("expected element, got {:?}", other),
        }
    }

    #[test]
    fn heading_level_is_clamped() {
        let theme = SiteTheme::default();
        let mut block = Block::new("h1", "heading");
        block.set_prop("level", json!(9));
        assert_eq!(element(render(&block, &theme, RenderMode::Published)).tag, "h6");

        block.set_prop("level", json!(0));
        assert_eq!(element(render(&block, &theme, RenderMode::Published)).tag, "h1");
    }

    #[test]
    fn button_reads_primary_from_cascade() {
        let mut theme = SiteTheme::default();
        let block = Block::new("b1", "button");

        let el = element(render(&block, &theme, RenderMode::Published));
        assert!(el.attrs["style"].contains(&theme.primary_color));

        // Replacing the theme changes the rendered usage on re-render.
        theme.primary_color = "#00ff00".to_string();
        let el = element(render(&block, &theme, RenderMode::Published));
        assert!(el.attrs["style"].contains("#00ff00"));
    }

    #[test]
    fn hero_explicit_bg_color_overrides_cascade() {
        let mut theme = SiteTheme::default();
        let mut block = Block::new("h1", "hero");
        block.set_prop("bgColor", json!("#123456"));

        let before = element(render(&block, &theme, RenderMode::Published));
        assert!(before.attrs["style"].contains("#123456"));

        theme.primary_color = "#abcdef".to_string();
        let after = element(render(&block, &theme, RenderMode::Published));
        // The override block is unaffected by the cascade change.
        assert_eq!(before.attrs["style"], after.attrs["style"]);
    }

    #[test]
    fn button_resolves_its_action() {
        let theme = SiteTheme::default();
        let mut block = Block::new("b1", "button");
        block.set_prop(ACTION_PROP, json!({"type": "page", "pageId": "about"}));

        let el = element(render(&block, &theme, RenderMode::Published));
        assert_eq!(
            el.effect,
            Some(Effect::Navigate {
                page_id: "about".to_string(),
                route: "/about".to_string()
            })
        );
    }

    #[test]
    fn image_with_action_is_wrapped_in_anchor() {
        let theme = SiteTheme::default();
        let mut block = Block::new("i1", "image");
        block.set_prop("src", json!("/pic.jpg"));
        block.set_prop(
            ACTION_PROP,
            json!({"type": "url", "url": "https://example.com"}),
        );

        let figure = element(render(&block, &theme, RenderMode::Published));
        let wrapper = match &figure.children[0] {
            RenderNode::Element(el) => el,
            other => panic!("expected anchor wrapper, got {:?}", other),
        };
        assert_eq!(wrapper.tag, "a");
        assert!(wrapper.effect.is_some());
    }

    #[test]
    fn image_without_action_has_no_anchor() {
        let theme = SiteTheme::default();
        let mut block = Block::new("i1", "image");
        block.set_prop("src", json!("/pic.jpg"));

        let figure = element(render(&block, &theme, RenderMode::Published));
        let inner = match &figure.children[0] {
            RenderNode::Element(el) => el,
            other => panic!("expected img, got {:?}", other),
        };
        assert_eq!(inner.tag, "img");
    }

    #[test]
    fn rich_text_is_sanitized_in_both_modes() {
        let theme = SiteTheme::default();
        let mut block = Block::new("r1", "richText");
        block.set_prop("html", json!("<script>alert(1)</script><p>Hello</p>"));

        for mode in [RenderMode::Editing, RenderMode::Published] {
            let el = element(render(&block, &theme, mode));
            match &el.children[0] {
                RenderNode::Raw { html } => {
                    assert_eq!(html, "<p>Hello</p>");
                }
                other => panic!("expected raw child, got {:?}", other),
            }
        }
    }

    #[test]
    fn bindings_attach_only_in_editing_mode() {
        let theme = SiteTheme::default();
        let block = Block::new("t1", "text");

        let editing = element(render(&block, &theme, RenderMode::Editing));
        let binding = editing.binding.unwrap();
        assert_eq!(binding.block_id, "t1");
        assert_eq!(binding.prop_key, "text");

        let published = element(render(&block, &theme, RenderMode::Published));
        assert!(published.binding.is_none());
    }

    #[test]
    fn timeline_binding_targets_the_whole_collection() {
        let theme = SiteTheme::default();
        let mut block = Block::new("tl", "timeline");
        block.set_prop(
            "items",
            json!([
                {"year": "2020", "title": "Founded", "description": "Garage days"},
                {"year": "2024", "title": "Grown", "description": ""}
            ]),
        );

        let el = element(render(&block, &theme, RenderMode::Editing));
        assert_eq!(el.binding.as_ref().unwrap().prop_key, "items");
        assert_eq!(el.children.len(), 2);
    }

    #[test]
    fn social_links_skip_entries_without_url() {
        let theme = SiteTheme::default();
        let mut block = Block::new("s1", "socialLinks");
        block.set_prop(
            "links",
            json!([
                {"network": "mastodon", "url": "https://example.social/@us"},
                {"network": "ghost", "url": ""}
            ]),
        );

        let el = element(render(&block, &theme, RenderMode::Published));
        assert_eq!(el.children.len(), 1);
    }

    #[test]
    fn section_gets_anchor_id() {
        let theme = SiteTheme::default();
        let mut block = Block::new("s1", "section");
        block.set_prop("anchorId", json!("contact"));

        let el = element(render(&block, &theme, RenderMode::Published));
        assert_eq!(el.attrs.get("id").map(String::as_str), Some("contact"));
    }
}
