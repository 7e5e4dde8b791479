use kashida_common::Result;

/// Fixed-width integer reads at arbitrary byte offsets of a font table.
///
/// The semantic layout of any particular table is the caller's knowledge;
/// this trait only supplies the generic decode primitives.
///
/// Values are read in **host** byte order: the backing memory is an
/// in-memory structure already decoded by the engine, not the big-endian
/// wire form of an sfnt file.
///
/// Offsets are **not** validated against the backing buffer's capacity; the
/// engine guarantees the table spans every offset its layout implies.
/// Reading through a released buffer fails with `UseAfterRelease`.
pub trait SfntTable {
    /// Returns a fresh copy of `count` bytes starting at `offset`.
    fn read_bytes(&self, offset: usize, count: usize) -> Result<Vec<u8>>;

    /// Decodes one signed 16-bit word at `offset`.
    fn read_int16(&self, offset: usize) -> Result<i16>;

    /// Decodes one unsigned 16-bit word at `offset`.
    fn read_uint16(&self, offset: usize) -> Result<u16>;

    /// Decodes one signed 32-bit word at `offset`.
    fn read_int32(&self, offset: usize) -> Result<i32>;

    /// Decodes one unsigned 32-bit word at `offset`.
    fn read_uint32(&self, offset: usize) -> Result<u32>;

    /// Decodes one 64-bit value at `offset`.
    ///
    /// The engine ABI exposes at most 32-bit reads, so the value is
    /// synthesized from the two words at `offset` and `offset + 4` as
    /// `(high << 32) | low`, first word high.
    fn read_int64(&self, offset: usize) -> Result<i64>;
}
