//! Lifecycle management for native shaping-engine resources and the typed
//! result surface built on top of them.
//!
//! The engine allocates a result buffer, hands back its address together
//! with the addresses of its sub-buffers, and expects exactly one matching
//! disposal call. [`NativeHandle`] owns that obligation; [`ShapingResult`]
//! wraps a handle and exposes the engine's output through the typed views of
//! `kashida-collections`.

pub mod handle;
pub mod result;

pub use handle::{NativeHandle, ReleaseFn};
pub use result::{RawShapingOutput, ReleasePolicy, ShapingResult};
