//! Sequential view of 8-bit elements.

use kashida_common::Result;
use kashida_common::owner::OwnerRef;

use crate::window::RawWindow;

/// Immutable view of consecutive bytes in an engine-owned buffer.
#[derive(Clone, Debug)]
pub struct ByteView {
    window: RawWindow,
}

impl ByteView {
    /// Wraps `count` bytes starting at `base`.
    ///
    /// # Safety
    ///
    /// `base .. base + count` must lie within an allocation that stays valid
    /// until `owner` reports itself released.
    pub unsafe fn from_raw_parts(owner: OwnerRef, base: *const u8, count: usize) -> ByteView {
        ByteView {
            window: unsafe { RawWindow::new(owner, base, count, kashida_raw::INT8_SIZE) },
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

    /// Returns the byte at `index`.
    pub fn get(&self, index: usize) -> Result<u8> {
        let offset = self.window.element_offset(index, "ByteView")?;
        Ok(unsafe { kashida_raw::read_u8(self.window.base(), offset) })
    }

    /// Copies all `len()` bytes into `dst`, starting at `at`.
    pub fn copy_to(&self, dst: &mut [u8], at: usize) -> Result<()> {
        self.window.check_copy(dst.len(), at, "ByteView")?;
        unsafe {
            kashida_raw::copy_bytes(self.window.base(), 0, &mut dst[at..at + self.len()]);
        }
        Ok(())
    }

    /// Derives the view of elements `from..to`, sharing this view's owner.
    pub fn sub_view(&self, from: usize, to: usize) -> Result<ByteView> {
        Ok(ByteView {
            window: self.window.sub(from, to)?,
        })
    }

    /// Copies the viewed bytes into a freshly allocated vector.
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        let mut vec = vec![0u8; self.len()];
        self.copy_to(&mut vec, 0)?;
        Ok(vec)
    }
}
