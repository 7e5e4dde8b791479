//! Keep-alive relationship between views and the object that owns their
//! backing native buffer.

use std::sync::Arc;

/// Owner of a native backing buffer.
///
/// Views and struct tables hold an [`OwnerRef`] for two reasons: the `Arc`
/// keeps the owner (and through it the native buffer) alive for as long as
/// the view exists, and [`is_released`](BufferOwner::is_released) lets reads
/// fail with `UseAfterRelease` once the buffer is gone instead of
/// dereferencing freed memory.
///
/// The owner participates in no equality, hashing, or access logic; holding
/// an `OwnerRef` grants no release authority over the buffer.
pub trait BufferOwner: Send + Sync {
    /// Returns `true` once the owner's native buffer has been released.
    fn is_released(&self) -> bool;
}

/// Shared reference to a [`BufferOwner`].
pub type OwnerRef = Arc<dyn BufferOwner>;
