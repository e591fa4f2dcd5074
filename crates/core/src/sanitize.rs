//! Allow-list sanitizer for free-form formatted block content.
//!
//! Any block prop holding user-authored markup (rich text, embeds) must pass
//! through [`sanitize_html`] before it is rendered in either mode. The
//! sanitizer is a strict allow-list transformer: disallowed constructs are
//! stripped while the safe remainder keeps rendering, and sanitizing
//! already-sanitized output is a no-op.

use lol_html::{RewriteStrSettings, doc_comments, element, rewrite_str};

/// Tags whose entire subtree is removed. Everything here either executes,
/// loads foreign content, or alters document semantics.
const DROP_WITH_CONTENT: &[&str] = &[
    "script", "style", "iframe", "frame", "object", "embed", "applet", "link", "meta", "base",
    "form", "template", "noscript",
];

/// Tags allowed through unchanged (after attribute filtering).
const ALLOWED_TAGS: &[&str] = &[
    "a", "p", "br", "hr", "strong", "b", "em", "i", "u", "s", "sub", "sup", "span", "div", "h1",
    "h2", "h3", "h4", "h5", "h6", "ul", "ol", "li", "blockquote", "pre", "code", "img", "figure",
    "figcaption", "table", "thead", "tbody", "tfoot", "tr", "td", "th", "caption",
];

/// Attributes allowed on any allowed tag.
const ALLOWED_ATTRS: &[&str] = &[
    "href", "src", "alt", "title", "target", "rel", "class", "id", "colspan", "rowspan", "width",
    "height",
];

/// URL schemes allowed in `href`/`src` attributes.
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

/// Returns true if a URL value is safe to keep in an attribute.
///
/// Scheme-less values (relative paths, fragments, query strings) are safe;
/// anything with an explicit scheme must match the allow-list. This rejects
/// `javascript:` and `data:` URLs regardless of casing or leading whitespace.
fn is_safe_url(value: &str) -> bool {
    let trimmed = value.trim_start();
    let mut scheme = String::new();
    for c in trimmed.chars() {
        match c {
            ':' => {
                return ALLOWED_SCHEMES.contains(&scheme.to_ascii_lowercase().as_str());
            }
            // A path/query/fragment delimiter before any ':' means no scheme.
            '/' | '?' | '#' => return true,
            _ => scheme.push(c),
        }
    }
    // No scheme at all.
    true
}

/// Sanitizes an HTML fragment against the allow-list.
///
/// - Elements in [`DROP_WITH_CONTENT`] are removed along with their content.
/// - Elements not in [`ALLOWED_TAGS`] are unwrapped: the tag is dropped but
///   its (sanitized) children remain.
/// - Attributes outside [`ALLOWED_ATTRS`] are stripped, as are `href`/`src`
///   values with unsafe schemes and all comments.
///
/// The function does not fail: if the rewriter itself errors the whole
/// fragment degrades to escaped plain text so nothing unsafe gets through.
pub fn sanitize_html(input: &str) -> String {
    sanitize_html_report(input).0
}

/// Like [`sanitize_html`], additionally reporting whether the rewriter
/// failed and the fragment was escaped wholesale. Render contexts use the
/// flag to attach a diagnostic to the offending block.
pub fn sanitize_html_report(input: &str) -> (String, bool) {
    let result = rewrite_str(
        input,
        RewriteStrSettings {
            element_content_handlers: vec![element!("*", |el| {
                let tag = el.tag_name().to_ascii_lowercase();

                if DROP_WITH_CONTENT.contains(&tag.as_str()) {
                    el.remove();
                    return Ok(());
                }
                if !ALLOWED_TAGS.contains(&tag.as_str()) {
                    el.remove_and_keep_content();
                    return Ok(());
                }

                let names: Vec<String> =
                    el.attributes().iter().map(|a| a.name()).collect();
                for name in names {
                    if !ALLOWED_ATTRS.contains(&name.as_str()) {
                        el.remove_attribute(&name);
                    }
                }
                for url_attr in ["href", "src"] {
                    if let Some(value) = el.get_attribute(url_attr)
                        && !is_safe_url(&value)
                    {
                        el.remove_attribute(url_attr);
                    }
                }
                Ok(())
            })],
            document_content_handlers: vec![doc_comments!(|c| {
                c.remove();
                Ok(())
            })],
            ..RewriteStrSettings::default()
        },
    );

    match result {
        Ok(clean) => (clean, false),
        Err(err) => {
            log::warn!("HTML sanitizer failed, escaping fragment instead: {}", err);
            (html_escape::encode_text(input).into_owned(), true)
        }
    }
}
