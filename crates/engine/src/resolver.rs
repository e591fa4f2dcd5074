//! Action resolution: from serialized descriptors to concrete effects.
//!
//! The resolver is a pure function of `(action, navigation context)`. It
//! reads only the fields matching the action's current `type`; stale fields
//! left behind by earlier edits are ignored. Every missing or unresolvable
//! target degrades to [`Effect::Inert`] — never an error, never a broken
//! link in the output.

use pagebloc_core::{ActionKind, ComponentAction, Site, Slugger};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// The concrete runtime effect an interaction produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Effect {
    /// No interaction; nothing is attached to the rendered element.
    Inert,
    /// Navigate to another page of the site.
    Navigate {
        /// Target page id.
        page_id: String,
        /// The page's resolved route.
        route: String,
    },
    /// Open a URL, optionally in an auxiliary browsing context.
    Open {
        /// The URL to open.
        url: String,
        /// Whether to open in a new tab/window.
        new_tab: bool,
    },
    /// Scroll to an in-page anchor.
    ScrollTo {
        /// The anchor's section id.
        section_id: String,
    },
    /// Fetch or open a file.
    Download {
        /// The file URL.
        url: String,
    },
    /// Invoke a handler registered by the hosting environment. The engine
    /// only emits the intent; dispatch is the host's responsibility.
    Invoke {
        /// Name of the host-registered handler.
        handler: String,
    },
}

impl Effect {
    /// Returns true if the effect carries no interaction.
    pub fn is_inert(&self) -> bool {
        matches!(self, Effect::Inert)
    }
}

/// Returns the trimmed value of an optional field, or `None` when it is
/// absent or blank. Blank targets degrade the action to inert.
fn non_empty(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// The site-navigation context an action is resolved against: the set of
/// known pages (with their routes) and in-page anchors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavContext {
    pages: BTreeMap<String, String>,
    anchors: BTreeSet<String>,
}

impl NavContext {
    /// Creates an empty context (every targeted action resolves to inert).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a page route (builder style).
    pub fn with_page(mut self, page_id: impl Into<String>, route: impl Into<String>) -> Self {
        self.pages.insert(page_id.into(), route.into());
        self
    }

    /// Adds a known anchor (builder style).
    pub fn with_anchor(mut self, section_id: impl Into<String>) -> Self {
        self.anchors.insert(section_id.into());
        self
    }

    /// Builds the context from a site the way the editor shell does:
    /// the home page (deterministic tie-break) routes to `/`, every other
    /// page to `/{slug(title)}` with slug de-duplication, and anchors are
    /// harvested from blocks carrying an `anchorId` prop.
    pub fn from_site(site: &Site) -> Self {
        let mut ctx = Self::new();
        let home_id = site.home_page().map(|p| p.id.clone());
        let mut slugger = Slugger::new();

        for page in &site.pages {
            let route = if Some(&page.id) == home_id.as_ref() {
                "/".to_string()
            } else {
                format!("/{}", slugger.next_slug(&page.title))
            };
            ctx.pages.insert(page.id.clone(), route);

            for block in &page.blocks {
                if let Some(anchor) = block.str_prop("anchorId")
                    && !anchor.trim().is_empty()
                {
                    ctx.anchors.insert(anchor.trim().to_string());
                }
            }
        }
        ctx
    }

    /// Returns the route of a page, if the page is known.
    pub fn route(&self, page_id: &str) -> Option<&str> {
        self.pages.get(page_id).map(String::as_str)
    }

    /// Returns true if the anchor is known.
    pub fn has_anchor(&self, section_id: &str) -> bool {
        self.anchors.contains(section_id)
    }

    /// Resolves an action descriptor into its concrete effect.
    ///
    /// Pure: the same action and context always yield the same effect.
    pub fn resolve(&self, action: &ComponentAction) -> Effect {
        match action.kind {
            ActionKind::None => Effect::Inert,
            ActionKind::Page => match non_empty(&action.page_id) {
                Some(page_id) => match self.route(page_id) {
                    Some(route) => Effect::Navigate {
                        page_id: page_id.to_string(),
                        route: route.to_string(),
                    },
                    None => Effect::Inert,
                },
                None => Effect::Inert,
            },
            ActionKind::Url => match non_empty(&action.url) {
                Some(url) => Effect::Open {
                    url: url.to_string(),
                    new_tab: action.open_in_new_tab,
                },
                None => Effect::Inert,
            },
            ActionKind::Section => match non_empty(&action.section_id) {
                Some(id) if self.has_anchor(id) => Effect::ScrollTo {
                    section_id: id.to_string(),
                },
                _ => Effect::Inert,
            },
            ActionKind::Email => match non_empty(&action.email) {
                Some(email) => Effect::Open {
                    url: format!("mailto:{}", email),
                    new_tab: false,
                },
                None => Effect::Inert,
            },
            ActionKind::Phone => match non_empty(&action.phone) {
                Some(phone) => Effect::Open {
                    url: format!("tel:{}", phone),
                    new_tab: false,
                },
                None => Effect::Inert,
            },
            ActionKind::Download => match non_empty(&action.file_url) {
                Some(url) => Effect::Download {
                    url: url.to_string(),
                },
                None => Effect::Inert,
            },
            ActionKind::Custom => match non_empty(&action.custom_handler) {
                Some(handler) => Effect::Invoke {
                    handler: handler.to_string(),
                },
                None => Effect::Inert,
            },
        }
    }
}

/// Callable registered by the hosting environment for `custom` actions.
pub type HandlerFn = Box<dyn Fn() + Send + Sync>;

/// The host's custom-handler registry.
///
/// External collaborator: the resolver never touches this. The host looks
/// up the handler named by an [`Effect::Invoke`]; an unregistered name
/// degrades to no-op, matching the inert contract.
#[derive(Default)]
pub struct HostHandlers {
    handlers: HashMap<String, HandlerFn>,
}

impl HostHandlers {
    /// Creates an empty handler registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler under a name, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, handler: HandlerFn) {
        self.handlers.insert(name.into(), handler);
    }

    /// Dispatches an `Invoke` effect. Returns true if a handler ran;
    /// any other effect, or an unregistered name, is a no-op.
    pub fn dispatch(&self, effect: &Effect) -> bool {
        if let Effect::Invoke { handler } = effect
            && let Some(f) = self.handlers.get(handler)
        {
            f();
            return true;
        }
        false
    }
}
