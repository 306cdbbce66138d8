/// Errors raised while configuring a traversal or building a bundled structure.
///
/// Every variant is an invalid-argument condition reported up front. A running
/// traversal never fails; it either yields the next node or is exhausted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecurError {
    #[error("invalid order '{value}': use 'pre' or 'post'")]
    InvalidOrder { value: String },

    #[error("invalid direction '{value}': use 'forward' or 'reverse'")]
    InvalidDirection { value: String },

    #[error("node {index} already belongs to another tree")]
    AlreadyAttached { index: usize },

    #[error("adding node {child} under node {parent} would create a cycle")]
    WouldCycle { parent: usize, child: usize },

    #[error("node {index} does not exist (structure has {len} nodes)")]
    UnknownNode { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, RecurError>;

/// Bounds-check an arena index.
pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(RecurError::UnknownNode { index, len })
    }
}
