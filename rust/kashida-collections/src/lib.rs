//! Typed, bounds-checked, zero-copy views over buffers owned by the native
//! shaping engine.
//!
//! Each view is an immutable window `(owner, base, count, stride)` over a
//! sub-range of an engine-owned buffer. Views never free their buffer; they
//! hold an [`OwnerRef`](kashida_common::owner::OwnerRef) that keeps the
//! buffer's owner alive and lets every access fail with `UseAfterRelease`
//! once the owner reports the buffer released.
//!
//! All views share one contract: `len`/`is_empty`, bounds-checked `get`,
//! bulk `copy_to`, zero-copy `sub_view` derivation, and a `to_vec`
//! convenience. Construction is `unsafe`: the caller vouches that the base
//! address and element count describe memory that stays valid for the
//! owner's lifetime.

mod window;

pub mod byte_view;
pub mod point_view;
pub mod scaled_float_view;
pub mod size_view;
pub mod uint16_view;

pub use byte_view::ByteView;
pub use point_view::PointView;
pub use scaled_float_view::ScaledFloatView;
pub use size_view::SizeView;
pub use uint16_view::UInt16View;
