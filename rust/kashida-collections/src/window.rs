use kashida_common::error::Error;
use kashida_common::owner::OwnerRef;
use kashida_common::{Result, result};

/// Shared core of every typed view: an owner keep-alive reference plus the
/// validated `(base, count, stride)` triple of the window it spans.
///
/// The raw base address never leaves this type; view implementations read
/// through [`element_offset`](RawWindow::element_offset) and the
/// `kashida_raw` primitives.
#[derive(Clone)]
pub(crate) struct RawWindow {
    owner: OwnerRef,
    base: *const u8,
    count: usize,
    stride: usize,
}

impl RawWindow {
    /// # Safety
    ///
    /// `base .. base + count * stride` must lie within an allocation that
    /// stays valid until `owner` reports itself released.
    pub(crate) unsafe fn new(owner: OwnerRef, base: *const u8, count: usize, stride: usize) -> Self {
        RawWindow {
            owner,
            base,
            count,
            stride,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub(crate) fn base(&self) -> *const u8 {
        self.base
    }

    /// Fails with `UseAfterRelease` once the owner's buffer is gone.
    #[inline]
    pub(crate) fn check_live(&self, name: &str) -> Result<()> {
        if self.owner.is_released() {
            return Err(Error::use_after_release(name));
        }
        Ok(())
    }

    /// Validates liveness and `index`, returning the element's byte offset.
    #[inline]
    pub(crate) fn element_offset(&self, index: usize, name: &str) -> Result<usize> {
        self.check_live(name)?;
        result::check_index(index, self.count)?;
        Ok(index * self.stride)
    }

    /// Validates liveness and the destination range of a bulk copy.
    pub(crate) fn check_copy(&self, dst_len: usize, at: usize, name: &str) -> Result<()> {
        self.check_live(name)?;
        if at > dst_len || dst_len - at < self.count {
            return Err(Error::invalid_arg(
                "dst",
                format!(
                    "destination of length {dst_len} cannot hold {} {name} elements at {at}",
                    self.count
                ),
            ));
        }
        Ok(())
    }

    /// Derives the window of `sub_view(from, to)`, sharing the owner.
    pub(crate) fn sub(&self, from: usize, to: usize) -> Result<RawWindow> {
        result::check_sub_range(from, to, self.count)?;
        Ok(RawWindow {
            owner: self.owner.clone(),
            base: unsafe { self.base.add(from * self.stride) },
            count: to - from,
            stride: self.stride,
        })
    }

}

impl std::fmt::Debug for RawWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawWindow")
            .field("base", &self.base)
            .field("count", &self.count)
            .field("stride", &self.stride)
            .finish()
    }
}

// Views are immutable and the owner keeps the buffer alive; concurrent reads
// need no synchronization (release must be serialized against readers by the
// caller).
unsafe impl Send for RawWindow {}
unsafe impl Sync for RawWindow {}
