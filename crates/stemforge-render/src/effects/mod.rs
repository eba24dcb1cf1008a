//! Mastering signal-chain stages.
//!
//! - [`eq`] - three-band equalizer (low shelf, mid peak, high shelf)
//! - [`dynamics`] - compressor and brick-wall limiter
//! - [`chain`] - style and reference chains assembled end to end

pub mod chain;
pub mod dynamics;
pub mod eq;

pub use chain::SignalChain;
