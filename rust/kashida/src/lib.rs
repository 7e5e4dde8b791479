//! # Kashida: native text-shaping engine interop
//!
//! Kashida is the managed side of a text-shaping pipeline whose actual
//! shaping work happens inside an opaque native engine. The engine allocates
//! result buffers and hands back raw addresses; this workspace provides the
//! zero-copy, bounds-checked, typed access over those addresses and the
//! lifecycle discipline that releases each buffer exactly once.
//!
//! ## Module Organization
//!
//! * [`collections`] - Typed, immutable views over engine-owned buffers
//! * [`common`] - Error taxonomy, result type, and the owner keep-alive trait
//! * [`raw`] - The single audited module of unchecked native reads
//! * [`sfnt`] - Fixed-width struct readers over decoded font tables
//! * [`shaping`] - Native handle lifecycle and the shaping-result surface
//!
//! This crate re-exports the member crates; depend on it for the full
//! surface or on individual `kashida-*` crates for a narrower one.

pub use kashida_collections as collections;
pub use kashida_common as common;
pub use kashida_raw as raw;
pub use kashida_sfnt as sfnt;
pub use kashida_shaping as shaping;
