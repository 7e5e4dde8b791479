//! The single owning reference to a native engine allocation.

use std::ffi::c_void;
use std::sync::atomic::{AtomicBool, Ordering};

use kashida_common::Result;
use kashida_common::error::Error;
use kashida_common::owner::BufferOwner;

/// The engine's paired disposal entry point for one kind of resource.
pub type ReleaseFn = unsafe fn(*mut c_void);

/// Owning wrapper around one native resource address.
///
/// The handle is the only party allowed to release the resource, and it does
/// so exactly once: either through [`release_now`](NativeHandle::release_now)
/// or, as a leak safety net, when the handle is dropped while still active.
/// The released state is observable, so a second release attempt and any
/// read through a view of the released buffer fail with `UseAfterRelease`
/// instead of corrupting memory.
pub struct NativeHandle {
    addr: *mut c_void,
    release: ReleaseFn,
    released: AtomicBool,
}

impl NativeHandle {
    /// Wraps a resource the engine just created.
    ///
    /// # Safety
    ///
    /// `addr` must be a live resource address returned by the engine, and
    /// `release` must be the disposal entry point paired with whatever
    /// created it. No other party may release `addr` afterwards.
    pub unsafe fn from_engine(addr: *mut c_void, release: ReleaseFn) -> NativeHandle {
        NativeHandle {
            addr,
            release,
            released: AtomicBool::new(false),
        }
    }

    /// Returns the native address, failing with `UseAfterRelease` once the
    /// resource is gone.
    pub fn addr(&self) -> Result<*mut c_void> {
        if self.is_released() {
            return Err(Error::use_after_release("NativeHandle"));
        }
        Ok(self.addr)
    }

    /// Releases the native resource now.
    ///
    /// The Active → Disposed transition is terminal and one-way; a second
    /// call fails with `UseAfterRelease`. Callers must serialize this
    /// against outstanding reads themselves.
    pub fn release_now(&self) -> Result<()> {
        if self.released.swap(true, Ordering::AcqRel) {
            return Err(Error::use_after_release("NativeHandle"));
        }
        log::debug!("releasing native shaping resource at {:p}", self.addr);
        unsafe { (self.release)(self.addr) };
        Ok(())
    }
}

impl BufferOwner for NativeHandle {
    fn is_released(&self) -> bool {
        self.released.load(Ordering::Acquire)
    }
}

impl Drop for NativeHandle {
    fn drop(&mut self) {
        if !self.released.swap(true, Ordering::AcqRel) {
            log::debug!(
                "releasing native shaping resource at {:p} on drop",
                self.addr
            );
            unsafe { (self.release)(self.addr) };
        }
    }
}

impl std::fmt::Debug for NativeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeHandle")
            .field("addr", &self.addr)
            .field("released", &self.is_released())
            .finish()
    }
}

// The resource is only ever written by the engine before the handle exists;
// afterwards all access through the handle is reads plus the atomic release
// transition.
unsafe impl Send for NativeHandle {}
unsafe impl Sync for NativeHandle {}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use kashida_common::error::ErrorKind;

    use super::*;

    #[test]
    fn test_release_exactly_once() {
        static RELEASES: AtomicUsize = AtomicUsize::new(0);
        unsafe fn count_release(_addr: *mut c_void) {
            RELEASES.fetch_add(1, Ordering::SeqCst);
        }

        let handle = unsafe { NativeHandle::from_engine(0x1000 as *mut c_void, count_release) };

        assert!(!handle.is_released());
        assert_eq!(handle.addr().unwrap(), 0x1000 as *mut c_void);

        handle.release_now().unwrap();
        assert_eq!(RELEASES.load(Ordering::SeqCst), 1);
        assert!(handle.is_released());

        let err = handle.release_now().unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UseAfterRelease { .. }));
        assert!(handle.addr().is_err());

        drop(handle);
        assert_eq!(
            RELEASES.load(Ordering::SeqCst),
            1,
            "drop must not release twice"
        );
    }

    #[test]
    fn test_drop_safety_net() {
        static RELEASES: AtomicUsize = AtomicUsize::new(0);
        unsafe fn count_release(_addr: *mut c_void) {
            RELEASES.fetch_add(1, Ordering::SeqCst);
        }

        let handle = unsafe { NativeHandle::from_engine(0x2000 as *mut c_void, count_release) };
        drop(handle);
        assert_eq!(RELEASES.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_release_real_allocation() {
        let block = kashida_testkit::NativeBlock::allocate(32).unwrap();
        let handle = unsafe {
            NativeHandle::from_engine(block.into_raw(), kashida_testkit::free_native)
        };
        handle.release_now().unwrap();
    }
}
