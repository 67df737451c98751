use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RingError {
    #[error("ring buffer is full: requested {requested} bytes, available {available} bytes")]
    Full { requested: usize, available: usize },

    #[error("ring buffer is empty")]
    Empty,

    #[error("not enough data in ring buffer: requested {requested} bytes, available {available} bytes")]
    InsufficientData { requested: usize, available: usize },
}
