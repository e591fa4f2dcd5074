//! Route slug generation for site pages.

use std::collections::HashMap;

/// Converts a page title into a URL-safe route segment.
///
/// Lowercases, keeps alphanumerics, converts whitespace runs to single
/// hyphens, and drops everything else. An empty result yields `"page"` so
/// every page gets a usable route.
///
/// # Examples
///
/// ```
/// use pagebloc_core::slug::slugify;
///
/// assert_eq!(slugify("About Us"), "about-us");
/// assert_eq!(slugify("Pricing & Plans"), "pricing-plans");
/// assert_eq!(slugify("!!!"), "page");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;
    for c in text.trim().chars() {
        if c.is_whitespace() || c == '-' || c == '_' {
            pending_hyphen = !slug.is_empty();
        } else if c.is_alphanumeric() {
            if pending_hyphen {
                slug.push('-');
                pending_hyphen = false;
            }
            for lower in c.to_lowercase() {
                slug.push(lower);
            }
        }
        // Punctuation and symbols are dropped.
    }
    if slug.is_empty() {
        "page".to_string()
    } else {
        slug
    }
}

/// Deduplicating slug generator: repeated titles get `-2`, `-3`, ... suffixes.
#[derive(Debug, Default)]
pub struct Slugger {
    counts: HashMap<String, usize>,
}

impl Slugger {
    /// Creates a new slugger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates the next unique slug for the given title.
    pub fn next_slug(&mut self, text: &str) -> String {
        let base = slugify(text);
        let count = self.counts.entry(base.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            base
        } else {
            format!("{}-{}", base, count)
        }
    }

    /// Reserves a slug so future generated slugs won't collide with it.
    pub fn reserve(&mut self, slug: &str) {
        *self.counts.entry(slug.to_string()).or_insert(0) += 1;
    }
}
