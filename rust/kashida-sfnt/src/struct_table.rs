//! [`SfntTable`] implementation over a raw engine-owned byte range.

use kashida_common::Result;
use kashida_common::error::Error;
use kashida_common::owner::OwnerRef;

use crate::table::SfntTable;

/// Stateless reader over a native-owned byte range holding a decoded font
/// table.
///
/// Owns nothing beyond the keep-alive reference to `source`; every read goes
/// straight to native memory.
pub struct StructTable {
    source: OwnerRef,
    base: *const u8,
}

impl StructTable {
    /// Wraps the table starting at `base`.
    ///
    /// # Safety
    ///
    /// `base` must point at a table allocation that stays valid and spans
    /// every offset later read, until `source` reports itself released.
    pub unsafe fn from_raw_parts(source: OwnerRef, base: *const u8) -> StructTable {
        StructTable { source, base }
    }

    #[inline]
    fn check_live(&self) -> Result<()> {
        if self.source.is_released() {
            return Err(Error::use_after_release("StructTable"));
        }
        Ok(())
    }
}

impl SfntTable for StructTable {
    fn read_bytes(&self, offset: usize, count: usize) -> Result<Vec<u8>> {
        self.check_live()?;
        let mut bytes = vec![0u8; count];
        unsafe { kashida_raw::copy_bytes(self.base, offset, &mut bytes) };
        Ok(bytes)
    }

    fn read_int16(&self, offset: usize) -> Result<i16> {
        self.check_live()?;
        Ok(unsafe { kashida_raw::read_i16(self.base, offset) })
    }

    fn read_uint16(&self, offset: usize) -> Result<u16> {
        self.check_live()?;
        Ok(unsafe { kashida_raw::read_u16(self.base, offset) })
    }

    fn read_int32(&self, offset: usize) -> Result<i32> {
        self.check_live()?;
        Ok(unsafe { kashida_raw::read_i32(self.base, offset) })
    }

    fn read_uint32(&self, offset: usize) -> Result<u32> {
        self.check_live()?;
        Ok(unsafe { kashida_raw::read_i32(self.base, offset) } as u32)
    }

    fn read_int64(&self, offset: usize) -> Result<i64> {
        let high = self.read_uint32(offset)? as u64;
        let low = self.read_uint32(offset + kashida_raw::INT32_SIZE)? as u64;
        Ok(((high << 32) | low) as i64)
    }
}

impl std::fmt::Debug for StructTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StructTable")
            .field("base", &self.base)
            .field("released", &self.source.is_released())
            .finish()
    }
}

// Reads are immutable and the source keeps the table alive; release must be
// serialized against readers by the caller.
unsafe impl Send for StructTable {}
unsafe impl Sync for StructTable {}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use kashida_common::error::ErrorKind;
    use kashida_testkit::NativeBlock;

    use super::*;

    fn table_of(words: &[u32]) -> StructTable {
        let block = Arc::new(NativeBlock::from_values(words).unwrap());
        let base = block.addr();
        unsafe { StructTable::from_raw_parts(block, base) }
    }

    #[test]
    fn test_word_reads() {
        let table = table_of(&[0x0001_0000, 0xFFFF_FFF6]);

        assert_eq!(table.read_int32(0).unwrap(), 0x0001_0000);
        assert_eq!(table.read_uint32(4).unwrap(), 0xFFFF_FFF6);
        assert_eq!(table.read_int32(4).unwrap(), -10);
    }

    #[test]
    fn test_halfword_reads() {
        let mut block = NativeBlock::allocate(8).unwrap();
        block.write_values(0, &[1u16, 0x8000, 0xFFFF, 42]);
        let base = block.addr();
        let table = unsafe { StructTable::from_raw_parts(Arc::new(block), base) };

        assert_eq!(table.read_uint16(0).unwrap(), 1);
        assert_eq!(table.read_uint16(2).unwrap(), 0x8000);
        assert_eq!(table.read_int16(2).unwrap(), i16::MIN);
        assert_eq!(table.read_int16(4).unwrap(), -1);
        assert_eq!(table.read_uint16(6).unwrap(), 42);
    }

    #[test]
    fn test_int64_composition() {
        let table = table_of(&[0x1234_5678, 0x9ABC_DEF0, 7]);

        let composed = table.read_int64(0).unwrap();
        let high = table.read_int32(0).unwrap() as i64;
        let low = table.read_int32(4).unwrap() as i64;
        assert_eq!(composed, (high << 32) | (low & 0xFFFF_FFFF));
        assert_eq!(composed, 0x1234_5678_9ABC_DEF0);

        assert_eq!(table.read_int64(4).unwrap(), 0x9ABC_DEF0_0000_0007u64 as i64);
    }

    #[test]
    fn test_read_bytes_is_a_copy() {
        let table = table_of(&[u32::from_ne_bytes([1, 2, 3, 4])]);
        let bytes = table.read_bytes(1, 2).unwrap();
        assert_eq!(bytes, vec![2, 3]);
    }

    #[test]
    fn test_read_after_release() {
        let block = Arc::new(NativeBlock::from_values(&[1u32]).unwrap());
        let base = block.addr();
        let table = unsafe { StructTable::from_raw_parts(block.clone(), base) };

        block.release().unwrap();
        let err = table.read_int32(0).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UseAfterRelease { .. }));
        assert!(table.read_bytes(0, 1).is_err());
    }
}
