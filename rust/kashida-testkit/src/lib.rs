//! Controlled C-heap allocations standing in for the native shaping engine.
//!
//! The real engine allocates its buffers on the C heap and hands back raw
//! addresses. [`NativeBlock`] reproduces that arrangement with
//! `malloc`/`free` so the accessor and view primitives can be validated
//! against a population the test controls.

use std::ffi::c_void;
use std::sync::atomic::{AtomicBool, Ordering};

use kashida_common::Result;
use kashida_common::error::Error;
use kashida_common::owner::BufferOwner;

/// Returns the pointer width of the host, in bytes.
pub fn pointer_size() -> usize {
    size_of::<usize>()
}

/// Frees a pointer previously surrendered by [`NativeBlock::into_raw`].
///
/// Usable as a release entry point when wrapping a surrendered block in a
/// native handle.
///
/// # Safety
///
/// `ptr` must have come from [`NativeBlock::into_raw`] and must not be freed
/// twice or dereferenced afterwards.
pub unsafe fn free_native(ptr: *mut c_void) {
    unsafe { libc::free(ptr) };
}

/// A zero-filled C-heap allocation with a stable address.
#[derive(Debug)]
pub struct NativeBlock {
    ptr: *mut u8,
    capacity: usize,
    released: AtomicBool,
}

impl NativeBlock {
    /// Allocates `capacity` zero-filled bytes on the C heap.
    pub fn allocate(capacity: usize) -> Result<NativeBlock> {
        kashida_common::verify_arg!(capacity, capacity > 0);

        let ptr = unsafe { libc::calloc(capacity, 1) } as *mut u8;
        assert!(!ptr.is_null(), "calloc({capacity}) failed");

        Ok(NativeBlock {
            ptr,
            capacity,
            released: AtomicBool::new(false),
        })
    }

    /// Allocates a block holding a copy of `data`.
    pub fn from_bytes(data: &[u8]) -> Result<NativeBlock> {
        let mut block = NativeBlock::allocate(data.len())?;
        block.as_mut_slice().copy_from_slice(data);
        Ok(block)
    }

    /// Allocates a block holding the native-endian bytes of `values`.
    pub fn from_values<T: bytemuck::NoUninit>(values: &[T]) -> Result<NativeBlock> {
        NativeBlock::from_bytes(bytemuck::cast_slice(values))
    }

    /// Returns the base address of the allocation.
    #[inline]
    pub fn addr(&self) -> *const u8 {
        self.ptr
    }

    /// Returns the capacity of the allocation in bytes.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the allocation's contents as a byte slice.
    pub fn as_slice(&self) -> &[u8] {
        assert!(!self.is_released());
        unsafe { std::slice::from_raw_parts(self.ptr, self.capacity) }
    }

    /// Returns the allocation's contents as a mutable byte slice.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        assert!(!self.is_released());
        unsafe { std::slice::from_raw_parts_mut(self.ptr, self.capacity) }
    }

    /// Writes the native-endian bytes of `values` at `offset` bytes.
    pub fn write_values<T: bytemuck::NoUninit>(&mut self, offset: usize, values: &[T]) {
        let bytes: &[u8] = bytemuck::cast_slice(values);
        self.as_mut_slice()[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    /// Releases the allocation, making the address invalid.
    ///
    /// A second release attempt fails with `UseAfterRelease`.
    pub fn release(&self) -> Result<()> {
        if self.released.swap(true, Ordering::AcqRel) {
            return Err(Error::use_after_release("NativeBlock"));
        }
        unsafe { libc::free(self.ptr as *mut c_void) };
        Ok(())
    }

    /// Surrenders ownership of the allocation, returning its raw address.
    ///
    /// The caller becomes responsible for passing the address to
    /// [`free_native`] exactly once.
    pub fn into_raw(self) -> *mut c_void {
        let ptr = self.ptr as *mut c_void;
        std::mem::forget(self);
        ptr
    }
}

impl BufferOwner for NativeBlock {
    fn is_released(&self) -> bool {
        self.released.load(Ordering::Acquire)
    }
}

impl Drop for NativeBlock {
    fn drop(&mut self) {
        if !self.released.swap(true, Ordering::AcqRel) {
            unsafe { libc::free(self.ptr as *mut c_void) };
        }
    }
}

// The block is written only through `&mut self`; the raw pointer itself is
// freely sendable between threads.
unsafe impl Send for NativeBlock {}
unsafe impl Sync for NativeBlock {}
