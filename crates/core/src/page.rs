//! The page composition model: blocks, pages, and the site collection.

use crate::action::ComponentAction;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The prop key under which interactive blocks carry their action descriptor.
pub const ACTION_PROP: &str = "action";

/// One typed, property-bearing unit of page content.
///
/// `props` is an open bag: its shape depends on `block_type`, and consumers
/// must preserve keys they do not understand so a page authored against a
/// newer property schema round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Unique block id within the site.
    pub id: String,
    /// Type discriminator, resolved against the block registry.
    #[serde(rename = "type")]
    pub block_type: String,
    /// Open property bag; shape depends on `block_type`.
    #[serde(default)]
    pub props: Map<String, Value>,
    /// Position within the owning page.
    #[serde(default)]
    pub order: u32,
}

impl Block {
    /// Creates a block with an empty property bag.
    pub fn new(id: impl Into<String>, block_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            block_type: block_type.into(),
            props: Map::new(),
            order: 0,
        }
    }

    /// Returns a prop value, if present.
    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }

    /// Returns a prop as a string slice, if present and a string.
    pub fn str_prop(&self, key: &str) -> Option<&str> {
        self.props.get(key).and_then(Value::as_str)
    }

    /// Returns a prop as a boolean, defaulting to `false`.
    pub fn bool_prop(&self, key: &str) -> bool {
        self.props
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Sets a prop value, replacing any previous value wholesale.
    pub fn set_prop(&mut self, key: impl Into<String>, value: Value) {
        self.props.insert(key.into(), value);
    }

    /// Decodes the block's `action` prop, if it carries one.
    ///
    /// `Ok(None)` means no action prop is present; `Err` means the prop
    /// exists but is not a valid descriptor (the renderer degrades this to
    /// inert and records a diagnostic rather than failing the block).
    pub fn action(&self) -> Result<Option<ComponentAction>, serde_json::Error> {
        match self.props.get(ACTION_PROP) {
            Some(value) => serde_json::from_value(value.clone()).map(Some),
            None => Ok(None),
        }
    }
}

/// One page of the site: an ordered sequence of blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitePage {
    /// Unique page id within the site.
    pub id: String,
    /// Human-readable page title.
    pub title: String,
    /// Whether this page is flagged as the site's home page.
    #[serde(default)]
    pub is_home_page: bool,
    /// The page content, ordered by [`Block::order`].
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl SitePage {
    /// Creates an empty page.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            is_home_page: false,
            blocks: Vec::new(),
        }
    }

    /// Returns the page's blocks sorted by `order` (stable on ties).
    pub fn blocks_in_order(&self) -> Vec<&Block> {
        let mut blocks: Vec<&Block> = self.blocks.iter().collect();
        blocks.sort_by_key(|b| b.order);
        blocks
    }

    /// Looks up a block by id.
    pub fn block(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// Looks up a block by id, mutably.
    pub fn block_mut(&mut self, id: &str) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| b.id == id)
    }
}

/// A named collection of pages forming one site.
///
/// Pages are kept in a stable collection order so the home-page tie-break
/// is deterministic without an ordered-map dependency; lookup is by id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    /// The site's pages in collection order.
    #[serde(default)]
    pub pages: Vec<SitePage>,
}

impl Site {
    /// Creates an empty site.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a page by id.
    pub fn page(&self, id: &str) -> Option<&SitePage> {
        self.pages.iter().find(|p| p.id == id)
    }

    /// Looks up a page by id, mutably.
    pub fn page_mut(&mut self, id: &str) -> Option<&mut SitePage> {
        self.pages.iter_mut().find(|p| p.id == id)
    }

    /// Resolves the home page deterministically.
    ///
    /// The data structure does not enforce a single `isHomePage` flag, so
    /// the tie-break is: first flagged page in collection order, else the
    /// first page, else `None` for an empty site.
    pub fn home_page(&self) -> Option<&SitePage> {
        self.pages
            .iter()
            .find(|p| p.is_home_page)
            .or_else(|| self.pages.first())
    }
}
