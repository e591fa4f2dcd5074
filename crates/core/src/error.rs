use thiserror::Error;

/// Errors that can occur while working with the page model.
///
/// Rendering itself never returns these: per-block failures are recovered
/// locally and reported through [`RenderDiagnostics`]. `EngineError` covers
/// the strict entry points (deserialization, palette instantiation).
#[derive(Debug, Error)]
pub enum EngineError {
    /// Serialization or deserialization of a page, block, or action failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// A block type was requested that the palette does not know about.
    #[error("unknown block type: {0}")]
    UnknownBlockType(String),
    /// Internal logic error (unexpected state).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Non-fatal conditions recovered during a render pass.
///
/// The worst-case outcome for any single block is a visible fallback
/// placeholder; a warning is recorded so the editor shell can surface it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderWarning {
    /// A block's `type` did not resolve in the registry.
    UnknownBlockType {
        /// Id of the offending block.
        block_id: String,
        /// The unresolved type discriminator.
        block_type: String,
    },
    /// A block carried an `action` prop that could not be decoded.
    MalformedAction {
        /// Id of the offending block.
        block_id: String,
        /// Decoder message.
        message: String,
    },
    /// The sanitizer could not rewrite a rich-text fragment and fell back
    /// to fully escaped text.
    SanitizerFallback {
        /// Id of the offending block, when known.
        block_id: Option<String>,
    },
}

impl std::fmt::Display for RenderWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderWarning::UnknownBlockType {
                block_id,
                block_type,
            } => {
                write!(f, "unknown block type '{}' (block {})", block_type, block_id)
            }
            RenderWarning::MalformedAction { block_id, message } => {
                write!(f, "malformed action on block {}: {}", block_id, message)
            }
            RenderWarning::SanitizerFallback { block_id } => match block_id {
                Some(id) => write!(f, "sanitizer fell back to escaped text (block {})", id),
                None => write!(f, "sanitizer fell back to escaped text"),
            },
        }
    }
}

/// Collection of warnings gathered across one render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderDiagnostics {
    /// Recovered, non-fatal warnings in emission order.
    pub warnings: Vec<RenderWarning>,
}

impl RenderDiagnostics {
    /// Creates an empty diagnostics collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a warning.
    pub fn add_warning(&mut self, warning: RenderWarning) {
        self.warnings.push(warning);
    }

    /// Returns true if any warnings were recorded.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Total number of recorded warnings.
    pub fn count(&self) -> usize {
        self.warnings.len()
    }
}
