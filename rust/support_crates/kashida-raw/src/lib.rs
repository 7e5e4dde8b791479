//! Unchecked typed reads over raw native addresses.
//!
//! This is the single place in the workspace that dereferences memory owned
//! by the native shaping engine. Everything above it (views, struct tables)
//! is implemented purely in terms of these primitives and is responsible for
//! validating `(base, length)` pairs before calling down here. Raw addresses
//! must not escape above this boundary except as private fields of the
//! wrapping types.
//!
//! All reads are unaligned-tolerant and host-endian: the buffers are
//! in-memory structures populated by the engine on this machine, not wire
//! data.

/// Size in bytes of an 8-bit element.
pub const INT8_SIZE: usize = size_of::<u8>();

/// Size in bytes of a 16-bit element.
pub const INT16_SIZE: usize = size_of::<u16>();

/// Size in bytes of a 32-bit element.
pub const INT32_SIZE: usize = size_of::<u32>();

/// Size in bytes of a pointer-width element.
pub const SIZE_SIZE: usize = size_of::<usize>();

/// Reads one signed byte at `base + offset`.
///
/// # Safety
///
/// `base + offset` must lie within a live allocation.
#[inline]
pub unsafe fn read_i8(base: *const u8, offset: usize) -> i8 {
    unsafe { base.add(offset).cast::<i8>().read() }
}

/// Reads one unsigned byte at `base + offset`.
///
/// # Safety
///
/// `base + offset` must lie within a live allocation.
#[inline]
pub unsafe fn read_u8(base: *const u8, offset: usize) -> u8 {
    unsafe { base.add(offset).read() }
}

/// Reads one signed 16-bit word at `base + offset`.
///
/// # Safety
///
/// `base + offset + 2` must not exceed the end of a live allocation.
#[inline]
pub unsafe fn read_i16(base: *const u8, offset: usize) -> i16 {
    unsafe { base.add(offset).cast::<i16>().read_unaligned() }
}

/// Reads one unsigned 16-bit word at `base + offset`.
///
/// # Safety
///
/// `base + offset + 2` must not exceed the end of a live allocation.
#[inline]
pub unsafe fn read_u16(base: *const u8, offset: usize) -> u16 {
    unsafe { base.add(offset).cast::<u16>().read_unaligned() }
}

/// Reads one signed 32-bit word at `base + offset`.
///
/// # Safety
///
/// `base + offset + 4` must not exceed the end of a live allocation.
#[inline]
pub unsafe fn read_i32(base: *const u8, offset: usize) -> i32 {
    unsafe { base.add(offset).cast::<i32>().read_unaligned() }
}

/// Reads one pointer-width unsigned word at `base + offset`.
///
/// The engine stores character-to-glyph entries as `size_t`; this is the
/// matching read.
///
/// # Safety
///
/// `base + offset + size_of::<usize>()` must not exceed the end of a live
/// allocation.
#[inline]
pub unsafe fn read_usize(base: *const u8, offset: usize) -> usize {
    unsafe { base.add(offset).cast::<usize>().read_unaligned() }
}

/// Copies `dst.len()` bytes starting at `base + offset` into `dst`.
///
/// # Safety
///
/// `base + offset + dst.len()` must not exceed the end of a live allocation,
/// and the source range must not overlap `dst`.
#[inline]
pub unsafe fn copy_bytes(base: *const u8, offset: usize, dst: &mut [u8]) {
    unsafe {
        std::ptr::copy_nonoverlapping(base.add(offset), dst.as_mut_ptr(), dst.len());
    }
}

/// Reads `dst.len()` consecutive 32-bit words starting at `base + offset`,
/// multiplying each by `scale` into `dst`.
///
/// # Safety
///
/// `base + offset + dst.len() * 4` must not exceed the end of a live
/// allocation.
#[inline]
pub unsafe fn copy_i32_scaled(base: *const u8, offset: usize, dst: &mut [f32], scale: f32) {
    for (i, slot) in dst.iter_mut().enumerate() {
        *slot = unsafe { read_i32(base, offset + i * INT32_SIZE) } as f32 * scale;
    }
}
