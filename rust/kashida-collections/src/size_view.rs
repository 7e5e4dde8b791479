//! Sequential view of pointer-width elements (character-to-glyph mapping).

use kashida_common::Result;
use kashida_common::owner::OwnerRef;

use crate::window::RawWindow;

/// Immutable view of consecutive pointer-width unsigned words in an
/// engine-owned buffer.
///
/// The engine stores its character-to-glyph mapping as `size_t` entries, so
/// the element width follows the host pointer width.
#[derive(Clone, Debug)]
pub struct SizeView {
    window: RawWindow,
}

impl SizeView {
    /// Wraps `count` pointer-width words starting at `base`.
    ///
    /// # Safety
    ///
    /// `base .. base + count * size_of::<usize>()` must lie within an
    /// allocation that stays valid until `owner` reports itself released.
    pub unsafe fn from_raw_parts(owner: OwnerRef, base: *const u8, count: usize) -> SizeView {
        SizeView {
            window: unsafe { RawWindow::new(owner, base, count, kashida_raw::SIZE_SIZE) },
        }
    }

    /// Returns the number of elements in the view.
    #[inline]
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// Returns `true` if the view spans no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the word at `index`.
    pub fn get(&self, index: usize) -> Result<usize> {
        let offset = self.window.element_offset(index, "SizeView")?;
        Ok(unsafe { kashida_raw::read_usize(self.window.base(), offset) })
    }

    /// Copies all `len()` words into `dst`, starting at `at`.
    pub fn copy_to(&self, dst: &mut [usize], at: usize) -> Result<()> {
        self.window.check_copy(dst.len(), at, "SizeView")?;
        for (i, slot) in dst[at..at + self.len()].iter_mut().enumerate() {
            *slot = unsafe { kashida_raw::read_usize(self.window.base(), i * kashida_raw::SIZE_SIZE) };
        }
        Ok(())
    }

    /// Derives the view of elements `from..to`, sharing this view's owner.
    pub fn sub_view(&self, from: usize, to: usize) -> Result<SizeView> {
        Ok(SizeView {
            window: self.window.sub(from, to)?,
        })
    }

    /// Copies the viewed words into a freshly allocated vector.
    pub fn to_vec(&self) -> Result<Vec<usize>> {
        let mut vec = vec![0usize; self.len()];
        self.copy_to(&mut vec, 0)?;
        Ok(vec)
    }
}
