//! Random-access readers over decoded font-table structures held in
//! engine-owned memory.

pub mod struct_table;
pub mod table;

pub use struct_table::StructTable;
pub use table::SfntTable;
