//! Edit sessions and the patch contract between the canvas and the caller.
//!
//! During editing, in-place field commits are intercepted here and turned
//! into [`PropPatch`] events; the caller owns the page model and merges
//! patches in commit order (last commit wins on the same field). There is
//! no autosave on keystrokes: a session holds exactly one pending value,
//! and abandoning it (navigating away without a commit) discards that value
//! without touching the model. During publish this whole layer is absent.
//!
//! Lifecycle per field: `idle → focused → (committed | abandoned) → idle`.
//! A live [`EditSession`] *is* the focused state; [`EditSession::commit`]
//! and [`EditSession::abandon`] consume it, so no other states exist.

use pagebloc_core::SitePage;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One emitted property change: "set `propKey` on `blockId` to `newValue`".
///
/// Multi-part props (timeline rows, FAQ items) patch the whole collection
/// value on every row-level commit, keeping this contract uniform across
/// simple and composite fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropPatch {
    /// Id of the block being edited.
    pub block_id: String,
    /// The prop key whose value is replaced wholesale.
    pub prop_key: String,
    /// The committed value.
    pub new_value: Value,
}

/// An in-progress, uncommitted edit of one block field.
#[derive(Debug, Clone)]
pub struct EditSession {
    block_id: String,
    prop_key: String,
    original: Value,
    pending: Value,
}

impl EditSession {
    /// Starts a session on focus-in of an editable region.
    pub fn begin(
        block_id: impl Into<String>,
        prop_key: impl Into<String>,
        current: Value,
    ) -> Self {
        Self {
            block_id: block_id.into(),
            prop_key: prop_key.into(),
            pending: current.clone(),
            original: current,
        }
    }

    /// Id of the block under edit.
    pub fn block_id(&self) -> &str {
        &self.block_id
    }

    /// Key of the prop under edit.
    pub fn prop_key(&self) -> &str {
        &self.prop_key
    }

    /// Replaces the pending value. No event is emitted; intermediate states
    /// never reach the caller.
    pub fn update(&mut self, value: Value) {
        self.pending = value;
    }

    /// The current pending value.
    pub fn pending(&self) -> &Value {
        &self.pending
    }

    /// Commits on focus-out or explicit save.
    ///
    /// Emits exactly one patch when the pending value differs from the
    /// original, and nothing when it is unchanged.
    pub fn commit(self) -> Option<PropPatch> {
        if self.pending == self.original {
            return None;
        }
        Some(PropPatch {
            block_id: self.block_id,
            prop_key: self.prop_key,
            new_value: self.pending,
        })
    }

    /// Discards the pending value; the underlying block is left unmodified.
    pub fn abandon(self) {
        log::debug!(
            "abandoned edit of {}.{} (pending value dropped)",
            self.block_id,
            self.prop_key
        );
    }
}

/// Per-canvas patch sink wiring editable fields to the caller.
///
/// Sessions on different fields are independent; each commit appends its
/// patch in commit order. The binder never mutates the page model itself —
/// it only emits intents, preserving the caller as the single writer.
#[derive(Debug, Default)]
pub struct EditBinder {
    active: Vec<EditSession>,
    patches: Vec<PropPatch>,
}

impl EditBinder {
    /// Creates a binder with no active sessions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Focus-in: opens a session for the field, replacing any stale session
    /// on the same field.
    pub fn focus(&mut self, block_id: &str, prop_key: &str, current: Value) {
        self.active
            .retain(|s| !(s.block_id == block_id && s.prop_key == prop_key));
        self.active.push(EditSession::begin(block_id, prop_key, current));
    }

    /// Updates the pending value of the field's session, if one is open.
    pub fn input(&mut self, block_id: &str, prop_key: &str, value: Value) {
        if let Some(session) = self
            .active
            .iter_mut()
            .find(|s| s.block_id == block_id && s.prop_key == prop_key)
        {
            session.update(value);
        }
    }

    /// Focus-out: commits the field's session. Returns the patch when the
    /// value changed; the patch is also queued for [`Self::drain_patches`].
    pub fn blur(&mut self, block_id: &str, prop_key: &str) -> Option<PropPatch> {
        let idx = self
            .active
            .iter()
            .position(|s| s.block_id == block_id && s.prop_key == prop_key)?;
        let patch = self.active.remove(idx).commit()?;
        self.patches.push(patch.clone());
        Some(patch)
    }

    /// Navigation away without commit: every pending value is lost.
    pub fn discard_all(&mut self) {
        for session in self.active.drain(..) {
            session.abandon();
        }
    }

    /// Returns true if any field is currently focused.
    pub fn has_active(&self) -> bool {
        !self.active.is_empty()
    }

    /// Takes the queued patches in commit order.
    pub fn drain_patches(&mut self) -> Vec<PropPatch> {
        std::mem::take(&mut self.patches)
    }
}

/// Caller-side merge of one patch into a page: the prop value is replaced
/// wholesale. Returns false when the target block no longer exists (e.g.
/// deleted between commit and merge); the patch is then dropped.
pub fn apply_patch(page: &mut SitePage, patch: &PropPatch) -> bool {
    match page.block_mut(&patch.block_id) {
        Some(block) => {
            block.set_prop(patch.prop_key.clone(), patch.new_value.clone());
            true
        }
        None => {
            log::warn!(
                "patch for missing block {} dropped ({})",
                patch.block_id,
                patch.prop_key
            );
            false
        }
    }
}
