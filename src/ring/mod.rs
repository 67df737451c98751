pub mod buffer;
pub mod ops;
pub mod ring_error;
mod trait_impls;

pub use buffer::RingBuffer;
pub use ring_error::*;
