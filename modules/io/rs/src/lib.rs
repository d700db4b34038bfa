pub mod compression;
pub mod table;

pub use table::{ReadTable, Reader, WriteTable, Writer};
