//! Sequential view decoding paired 32-bit scaled coordinates (glyph
//! offsets).

use kashida_common::Result;
use kashida_common::owner::OwnerRef;

use crate::window::RawWindow;

/// Element stride: two consecutive 32-bit words per point.
const POINT_STRIDE: usize = 2 * kashida_raw::INT32_SIZE;

/// Immutable view of consecutive `(x, y)` coordinate pairs in an
/// engine-owned buffer, each component decoded as `raw * scale`.
#[derive(Clone, Debug)]
pub struct PointView {
    window: RawWindow,
    scale: f32,
}

impl PointView {
    /// Wraps `count` coordinate pairs starting at `base`.
    ///
    /// # Safety
    ///
    /// `base .. base + count * 8` must lie within an allocation that stays
    /// valid until `owner` reports itself released.
    pub unsafe fn from_raw_parts(
        owner: OwnerRef,
        base: *const u8,
        count: usize,
        scale: f32,
    ) -> PointView {
        PointView {
            window: unsafe { RawWindow::new(owner, base, count, POINT_STRIDE) },
            scale,
        }
    }

    /// Returns the number of points in the view.
    #[inline]
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// Returns `true` if the view spans no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the multiplier applied to each stored coordinate.
    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Returns the decoded point at `index`.
    pub fn get(&self, index: usize) -> Result<(f32, f32)> {
        let offset = self.window.element_offset(index, "PointView")?;
        let x = unsafe { kashida_raw::read_i32(self.window.base(), offset) };
        let y = unsafe { kashida_raw::read_i32(self.window.base(), offset + kashida_raw::INT32_SIZE) };
        Ok((x as f32 * self.scale, y as f32 * self.scale))
    }

    /// Decodes all `len()` points into `dst`, starting at `at`.
    pub fn copy_to(&self, dst: &mut [(f32, f32)], at: usize) -> Result<()> {
        self.window.check_copy(dst.len(), at, "PointView")?;
        for (i, slot) in dst[at..at + self.len()].iter_mut().enumerate() {
            let offset = i * POINT_STRIDE;
            let x = unsafe { kashida_raw::read_i32(self.window.base(), offset) };
            let y =
                unsafe { kashida_raw::read_i32(self.window.base(), offset + kashida_raw::INT32_SIZE) };
            *slot = (x as f32 * self.scale, y as f32 * self.scale);
        }
        Ok(())
    }

    /// Derives the view of points `from..to`, sharing this view's owner and
    /// scale.
    pub fn sub_view(&self, from: usize, to: usize) -> Result<PointView> {
        Ok(PointView {
            window: self.window.sub(from, to)?,
            scale: self.scale,
        })
    }

    /// Decodes the viewed points into a freshly allocated vector.
    pub fn to_vec(&self) -> Result<Vec<(f32, f32)>> {
        let mut vec = vec![(0.0f32, 0.0f32); self.len()];
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

    fn view_of(words: &[i32], scale: f32) -> PointView {
        assert!(words.len().is_multiple_of(2));
        let block = Arc::new(NativeBlock::from_values(words).unwrap());
        let base = block.addr();
        unsafe { PointView::from_raw_parts(block, base, words.len() / 2, scale) }
    }

    #[test]
    fn test_paired_decode() {
        let view = view_of(&[2, 4, -6, 8], 0.5);

        assert_eq!(view.len(), 2);
        assert_eq!(view.get(0).unwrap(), (1.0, 2.0));
        assert_eq!(view.get(1).unwrap(), (-3.0, 4.0));
    }

    #[test]
    fn test_copy_to() {
        let view = view_of(&[1, 2, 3, 4, 5, 6], 1.0);
        let mut dst = vec![(0.0, 0.0); 4];
        view.copy_to(&mut dst, 1).unwrap();
        assert_eq!(dst, vec![(0.0, 0.0), (1.0, 2.0), (3.0, 4.0), (5.0, 6.0)]);
    }

    #[test]
    fn test_sub_view_stride() {
        let view = view_of(&[1, 2, 3, 4, 5, 6], 1.0);
        let sub = view.sub_view(1, 3).unwrap();

        assert_eq!(sub.len(), 2);
        assert_eq!(sub.get(0).unwrap(), view.get(1).unwrap());
        assert_eq!(sub.get(1).unwrap(), view.get(2).unwrap());
    }

    #[test]
    fn test_bounds() {
        let view = view_of(&[1, 2], 1.0);
        assert!(matches!(
            view.get(1).unwrap_err().kind(),
            ErrorKind::IndexOutOfRange { index: 1, size: 1 }
        ));
    }
}
