//! Typed surface over one engine-produced shaping buffer.

use std::sync::Arc;

use kashida_collections::{PointView, ScaledFloatView, SizeView, UInt16View};
use kashida_common::Result;
use kashida_common::error::Error;

use crate::handle::NativeHandle;

/// Everything the engine reports about one shaping buffer: scalar metadata
/// plus the raw addresses of its sub-buffers.
///
/// Each address is valid from the creation call until the matching disposal
/// of the buffer's handle, and points at engine-owned memory that is written
/// once and read-only afterwards.
#[derive(Clone, Copy, Debug)]
pub struct RawShapingOutput {
    /// Whether the shaped text flows backward (right-to-left).
    pub is_backward: bool,
    /// Multiplier converting stored font-unit metrics to display units.
    pub size_by_em: f32,
    /// Index of the first shaped character in the source text.
    pub char_start: usize,
    /// Index past the last shaped character in the source text.
    pub char_end: usize,
    /// Number of glyphs the engine produced.
    pub glyph_count: usize,
    /// Unsigned 16-bit glyph identifiers, `glyph_count` elements.
    pub glyph_ids: *const u8,
    /// Paired 32-bit glyph offsets, `glyph_count` pairs.
    pub glyph_offsets: *const u8,
    /// 32-bit glyph advances, `glyph_count` elements.
    pub glyph_advances: *const u8,
    /// Pointer-width character-to-glyph entries, one per source character.
    pub char_to_glyph_map: *const u8,
}

/// How a [`ShapingResult`] gives its buffer back to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleasePolicy {
    /// The caller releases deterministically through
    /// [`ShapingResult::dispose`].
    Manual,
    /// Release happens when the last reference to the underlying handle is
    /// dropped; manual disposal is forbidden.
    AutoReleased,
}

/// Container for the results of shaping one piece of text.
///
/// Safe to read from multiple threads concurrently; only one thread may
/// manipulate (dispose) it at a time, and never concurrently with readers.
pub struct ShapingResult {
    handle: Arc<NativeHandle>,
    output: RawShapingOutput,
    policy: ReleasePolicy,
}

impl ShapingResult {
    /// Wraps an engine-created shaping buffer.
    ///
    /// # Safety
    ///
    /// `output` must describe the buffer owned by `handle`: every address in
    /// it must stay valid, with the declared element counts, until the
    /// handle releases the buffer.
    pub unsafe fn from_engine(handle: NativeHandle, output: RawShapingOutput) -> ShapingResult {
        ShapingResult {
            handle: Arc::new(handle),
            output,
            policy: ReleasePolicy::Manual,
        }
    }

    /// Returns `true` if the shaped text flows backward.
    pub fn is_backward(&self) -> bool {
        self.output.is_backward
    }

    /// Returns the multiplier converting font units to display units.
    pub fn size_by_em(&self) -> f32 {
        self.output.size_by_em
    }

    /// Returns the index of the first shaped character in the source text.
    pub fn char_start(&self) -> usize {
        self.output.char_start
    }

    /// Returns the index past the last shaped character in the source text.
    pub fn char_end(&self) -> usize {
        self.output.char_end
    }

    /// Returns the number of shaped source characters.
    pub fn char_count(&self) -> usize {
        self.output.char_end - self.output.char_start
    }

    /// Returns the number of glyphs in this result.
    pub fn glyph_count(&self) -> usize {
        self.output.glyph_count
    }

    /// Returns a view of the glyph identifiers.
    ///
    /// The view stays bounds-checked and fails with `UseAfterRelease` once
    /// the result's buffer has been disposed.
    pub fn glyph_ids(&self) -> UInt16View {
        unsafe {
            UInt16View::from_raw_parts(
                self.handle.clone(),
                self.output.glyph_ids,
                self.output.glyph_count,
            )
        }
    }

    /// Returns a view of the glyph offsets, scaled to display units.
    pub fn glyph_offsets(&self) -> PointView {
        unsafe {
            PointView::from_raw_parts(
                self.handle.clone(),
                self.output.glyph_offsets,
                self.output.glyph_count,
                self.output.size_by_em,
            )
        }
    }

    /// Returns a view of the glyph advances, scaled to display units.
    pub fn glyph_advances(&self) -> ScaledFloatView {
        unsafe {
            ScaledFloatView::from_raw_parts(
                self.handle.clone(),
                self.output.glyph_advances,
                self.output.glyph_count,
                self.output.size_by_em,
            )
        }
    }

    /// Returns a view of the character-to-glyph mapping, one entry per
    /// shaped source character.
    pub fn char_to_glyph_map(&self) -> SizeView {
        unsafe {
            SizeView::from_raw_parts(
                self.handle.clone(),
                self.output.char_to_glyph_map,
                self.char_count(),
            )
        }
    }

    /// Releases the underlying buffer now.
    ///
    /// Fails with `UnsupportedOperation` on an auto-released result and with
    /// `UseAfterRelease` if the buffer is already gone.
    pub fn dispose(&self) -> Result<()> {
        if self.policy == ReleasePolicy::AutoReleased {
            return Err(Error::unsupported_operation(
                "dispose of an auto-released ShapingResult",
            ));
        }
        self.handle.release_now()
    }

    /// Converts this result to the auto-released policy.
    ///
    /// The buffer is then released when the last reference to its handle
    /// (the result itself plus any outstanding views) goes away. Idempotent:
    /// an already auto-released result is returned unchanged. Consuming
    /// `self` retires the manually disposable alias, so release still
    /// happens exactly once.
    pub fn into_auto_releasing(self) -> ShapingResult {
        match self.policy {
            ReleasePolicy::AutoReleased => self,
            ReleasePolicy::Manual => ShapingResult {
                policy: ReleasePolicy::AutoReleased,
                ..self
            },
        }
    }

    /// Reports whether this result is auto-released.
    pub fn is_auto_releasing(&self) -> bool {
        self.policy == ReleasePolicy::AutoReleased
    }
}

impl std::fmt::Debug for ShapingResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapingResult")
            .field("is_backward", &self.is_backward())
            .field("char_start", &self.char_start())
            .field("char_end", &self.char_end())
            .field("glyph_count", &self.glyph_count())
            .field("policy", &self.policy)
            .field("handle", &self.handle)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use kashida_common::error::ErrorKind;
    use kashida_common::owner::BufferOwner;
    use kashida_testkit::NativeBlock;

    use super::*;

    const GLYPHS: usize = 4;
    const CHARS: usize = 3;

    const IDS: [u16; GLYPHS] = [7, 11, 13, 17];
    const OFFSETS: [i32; GLYPHS * 2] = [0, 0, 2, -2, 4, -4, 6, -6];
    const ADVANCES: [i32; GLYPHS] = [1, 2, 3, 4];
    const CHAR_MAP: [usize; CHARS] = [0, 1, 3];

    /// Lays out ids, offsets, advances, and the char map in one block, the
    /// way the engine hands back sub-buffer addresses into one allocation.
    fn shape() -> ShapingResult {
        let ids_at = 0;
        let offsets_at = ids_at + size_of_val(&IDS);
        let advances_at = offsets_at + size_of_val(&OFFSETS);
        let map_at = advances_at + size_of_val(&ADVANCES);

        let mut block = NativeBlock::allocate(map_at + size_of_val(&CHAR_MAP)).unwrap();
        block.write_values(ids_at, &IDS);
        block.write_values(offsets_at, &OFFSETS);
        block.write_values(advances_at, &ADVANCES);
        block.write_values(map_at, &CHAR_MAP);

        let base = block.addr();
        let handle = unsafe {
            NativeHandle::from_engine(block.into_raw(), kashida_testkit::free_native)
        };
        let output = RawShapingOutput {
            is_backward: true,
            size_by_em: 0.5,
            char_start: 4,
            char_end: 4 + CHARS,
            glyph_count: GLYPHS,
            glyph_ids: unsafe { base.add(ids_at) },
            glyph_offsets: unsafe { base.add(offsets_at) },
            glyph_advances: unsafe { base.add(advances_at) },
            char_to_glyph_map: unsafe { base.add(map_at) },
        };

        unsafe { ShapingResult::from_engine(handle, output) }
    }

    #[test]
    fn test_scalar_accessors() {
        let result = shape();
        assert!(result.is_backward());
        assert_eq!(result.size_by_em(), 0.5);
        assert_eq!(result.char_start(), 4);
        assert_eq!(result.char_end(), 7);
        assert_eq!(result.char_count(), 3);
        assert_eq!(result.glyph_count(), 4);
    }

    #[test]
    fn test_views_decode_engine_buffers() {
        let result = shape();

        assert_eq!(result.glyph_ids().to_vec().unwrap(), IDS.to_vec());
        assert_eq!(
            result.glyph_offsets().to_vec().unwrap(),
            vec![(0.0, 0.0), (1.0, -1.0), (2.0, -2.0), (3.0, -3.0)]
        );
        assert_eq!(
            result.glyph_advances().to_vec().unwrap(),
            vec![0.5, 1.0, 1.5, 2.0]
        );
        assert_eq!(result.char_to_glyph_map().to_vec().unwrap(), CHAR_MAP.to_vec());
    }

    #[test]
    fn test_views_survive_result_drop() {
        let ids = {
            let result = shape();
            result.glyph_ids()
        };
        // The view's keep-alive reference holds the handle open.
        assert_eq!(ids.to_vec().unwrap(), IDS.to_vec());
    }

    #[test]
    fn test_dispose_invalidates_views() {
        let result = shape();
        let ids = result.glyph_ids();
        let advances = result.glyph_advances();

        result.dispose().unwrap();

        assert!(matches!(
            ids.get(0).unwrap_err().kind(),
            ErrorKind::UseAfterRelease { .. }
        ));
        assert!(advances.to_vec().is_err());

        let err = result.dispose().unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UseAfterRelease { .. }));
    }

    #[test]
    fn test_auto_release_forbids_dispose() {
        let result = shape().into_auto_releasing();
        assert!(result.is_auto_releasing());

        let err = result.dispose().unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UnsupportedOperation { .. }));

        // Still readable: nothing has been released yet.
        assert_eq!(result.glyph_ids().get(0).unwrap(), IDS[0]);
    }

    #[test]
    fn test_into_auto_releasing_idempotent() {
        let result = shape().into_auto_releasing().into_auto_releasing();
        assert!(result.is_auto_releasing());
        assert!(result.dispose().is_err());
    }

    #[test]
    fn test_auto_release_waits_for_views() {
        let result = shape().into_auto_releasing();
        let ids = result.glyph_ids();
        let probe = result.handle.clone();

        drop(result);
        // The outstanding view still keeps the buffer alive.
        assert!(!probe.is_released());
        assert_eq!(ids.get(1).unwrap(), IDS[1]);

        drop(ids);
        assert!(!probe.is_released(), "probe itself still holds the handle");
    }

    #[test]
    fn test_manual_result_drop_releases() {
        let result = shape();
        let probe = result.handle.clone();
        drop(result);
        drop(probe);
        // No assertion beyond not crashing: the drop chain must free the
        // block exactly once (double frees abort under the C allocator).
    }
}
