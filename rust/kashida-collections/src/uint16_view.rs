//! Sequential view of unsigned 16-bit elements (glyph identifiers).

use kashida_common::Result;
use kashida_common::owner::OwnerRef;

use crate::window::RawWindow;

/// Immutable view of consecutive unsigned 16-bit words in an engine-owned
/// buffer.
#[derive(Clone, Debug)]
pub struct UInt16View {
    window: RawWindow,
}

impl UInt16View {
    /// Wraps `count` 16-bit words starting at `base`.
    ///
    /// # Safety
    ///
    /// `base .. base + count * 2` must lie within an allocation that stays
    /// valid until `owner` reports itself released.
    pub unsafe fn from_raw_parts(owner: OwnerRef, base: *const u8, count: usize) -> UInt16View {
        UInt16View {
            window: unsafe { RawWindow::new(owner, base, count, kashida_raw::INT16_SIZE) },
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
    pub fn get(&self, index: usize) -> Result<u16> {
        let offset = self.window.element_offset(index, "UInt16View")?;
        Ok(unsafe { kashida_raw::read_u16(self.window.base(), offset) })
    }

    /// Copies all `len()` words into `dst`, starting at `at`.
    pub fn copy_to(&self, dst: &mut [u16], at: usize) -> Result<()> {
        self.window.check_copy(dst.len(), at, "UInt16View")?;
        for (i, slot) in dst[at..at + self.len()].iter_mut().enumerate() {
            *slot = unsafe { kashida_raw::read_u16(self.window.base(), i * kashida_raw::INT16_SIZE) };
        }
        Ok(())
    }

    /// Derives the view of elements `from..to`, sharing this view's owner.
    pub fn sub_view(&self, from: usize, to: usize) -> Result<UInt16View> {
        Ok(UInt16View {
            window: self.window.sub(from, to)?,
        })
    }

    /// Copies the viewed words into a freshly allocated vector.
    pub fn to_vec(&self) -> Result<Vec<u16>> {
        let mut vec = vec![0u16; self.len()];
        self.copy_to(&mut vec, 0)?;
        Ok(vec)
    }
}
