//! Error types for the showcase component

use crate::ids::{ElementId, GroupId, ListenerId, NodeId};

/// Failure reported by a host adapter.
///
/// The component never propagates these past its own boundary: a failed group
/// manipulation, descendant walk or listener removal degrades to a no-op.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum HostError {
    /// Node handle no longer resolves
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Animation group handle no longer resolves
    #[error("Animation group not found: {0:?}")]
    GroupNotFound(GroupId),

    /// UI element handle no longer resolves
    #[error("UI element not found: {0:?}")]
    ElementNotFound(ElementId),

    /// Listener was never registered or was already removed
    #[error("Listener not found: {0:?}")]
    ListenerNotFound(ListenerId),

    /// The host does not implement this capability for the element
    #[error("Unsupported host operation: {op}")]
    Unsupported { op: &'static str },

    /// The host rejected the operation
    #[error("Host rejected {op}: {reason}")]
    Rejected { op: &'static str, reason: String },
}

/// Errors surfaced to whoever builds the component (configuration loading).
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum ShowcaseError {
    /// Configuration JSON failed to parse
    #[error("Invalid showcase config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type HostResult<T> = Result<T, HostError>;
