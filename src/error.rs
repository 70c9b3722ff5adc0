use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure taxonomy of the padding kernel.
///
/// `Shape`, `Config` and `Bounds` are detected while deriving the layout,
/// before any task is dispatched. `Runtime` is the aggregate of the first
/// task failure during a dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("shape error: {0}")]
    Shape(String),

    #[error("invalid padding configuration: {0}")]
    Config(String),

    #[error("padding {pad} on axis {axis} exceeds limit {limit} for dimension of size {dim}")]
    Bounds {
        axis: usize,
        pad: usize,
        dim: usize,
        limit: usize,
    },

    #[error("padding run failed: {0}")]
    Runtime(String),
}
