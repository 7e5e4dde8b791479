//! Sequential view decoding 32-bit scaled integers to floats (glyph
//! advances).

use kashida_common::Result;
use kashida_common::owner::OwnerRef;

use crate::window::RawWindow;

/// Immutable view of consecutive 32-bit integers in an engine-owned buffer,
/// decoded as `raw * scale`.
///
/// The engine stores metrics in font units; `scale` converts them to display
/// units for the requested em size.
#[derive(Clone, Debug)]
pub struct ScaledFloatView {
    window: RawWindow,
    scale: f32,
}

impl ScaledFloatView {
    /// Wraps `count` 32-bit words starting at `base`.
    ///
    /// # Safety
    ///
    /// `base .. base + count * 4` must lie within an allocation that stays
    /// valid until `owner` reports itself released.
    pub unsafe fn from_raw_parts(
        owner: OwnerRef,
        base: *const u8,
        count: usize,
        scale: f32,
    ) -> ScaledFloatView {
        ScaledFloatView {
            window: unsafe { RawWindow::new(owner, base, count, kashida_raw::INT32_SIZE) },
            scale,
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

    /// Returns the multiplier applied to each stored integer.
    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Returns the decoded element at `index`.
    pub fn get(&self, index: usize) -> Result<f32> {
        let offset = self.window.element_offset(index, "ScaledFloatView")?;
        let raw = unsafe { kashida_raw::read_i32(self.window.base(), offset) };
        Ok(raw as f32 * self.scale)
    }

    /// Decodes all `len()` elements into `dst`, starting at `at`.
    pub fn copy_to(&self, dst: &mut [f32], at: usize) -> Result<()> {
        self.window.check_copy(dst.len(), at, "ScaledFloatView")?;
        let len = self.len();
        unsafe {
            kashida_raw::copy_i32_scaled(self.window.base(), 0, &mut dst[at..at + len], self.scale);
        }
        Ok(())
    }

    /// Derives the view of elements `from..to`, sharing this view's owner
    /// and scale.
    pub fn sub_view(&self, from: usize, to: usize) -> Result<ScaledFloatView> {
        Ok(ScaledFloatView {
            window: self.window.sub(from, to)?,
            scale: self.scale,
        })
    }

    /// Decodes the viewed elements into a freshly allocated vector.
    pub fn to_vec(&self) -> Result<Vec<f32>> {
        let mut vec = vec![0.0f32; self.len()];
        self.copy_to(&mut vec, 0)?;
        Ok(vec)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use kashida_common::error::ErrorKind;
    use kashida_testkit::NativeBlock;

    use super::*;

    fn view_of(words: &[i32], scale: f32) -> ScaledFloatView {
        let block = Arc::new(NativeBlock::from_values(words).unwrap());
        let base = block.addr();
        unsafe { ScaledFloatView::from_raw_parts(block, base, words.len(), scale) }
    }

    #[test]
    fn test_scaled_decode() {
        let view = view_of(&[1, 2, 3, 4], 0.5);

        assert_eq!(view.get(0).unwrap(), 0.5);
        assert_eq!(view.get(3).unwrap(), 2.0);
        assert_eq!(view.to_vec().unwrap(), vec![0.5, 1.0, 1.5, 2.0]);
    }

    #[test]
    fn test_negative_values() {
        let view = view_of(&[-64, 64], 0.25);
        assert_eq!(view.get(0).unwrap(), -16.0);
        assert_eq!(view.get(1).unwrap(), 16.0);
    }

    #[test]
    fn test_copy_to_offset() {
        let view = view_of(&[1, 2, 3, 4], 0.5);
        let mut dst = [0.0f32; 6];
        view.copy_to(&mut dst, 2).unwrap();
        assert_eq!(dst, [0.0, 0.0, 0.5, 1.0, 1.5, 2.0]);
    }

    #[test]
    fn test_bounds() {
        let view = view_of(&[1, 2], 1.0);
        assert!(matches!(
            view.get(2).unwrap_err().kind(),
            ErrorKind::IndexOutOfRange { .. }
        ));
        assert!(view.sub_view(1, 3).is_err());

        let sub = view.sub_view(1, 2).unwrap();
        assert_eq!(sub.get(0).unwrap(), view.get(1).unwrap());
        assert_eq!(sub.scale(), view.scale());
    }
}
