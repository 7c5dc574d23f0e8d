//! Facade over the `toolsift-core` crate.
//!
//! Chat-completion layers depend on this crate and get the full extraction
//! API without caring about the workspace layout underneath.

pub use toolsift_core::*;
