use thiserror::Error as ThisError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Which layer of the tree a capacity applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Inner,
    Leaf,
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Layer::Inner => f.write_str("inner"),
            Layer::Leaf => f.write_str("leaf"),
        }
    }
}

#[derive(Debug, ThisError, PartialEq, Eq, Clone)]
pub enum Error {
    #[error("{layer} capacity must be at least 2, got {capacity}")]
    InvalidCapacity { layer: Layer, capacity: usize },

    #[error("key not found")]
    KeyNotFound,

    #[error("bulk input is not strictly ascending at position {position}")]
    UnsortedInput { position: usize },

    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}
