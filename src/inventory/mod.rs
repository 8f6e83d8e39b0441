//! Sphinx `objects.inv` decoding and parsing.
//!
//! The pipeline is: [`InventoryReader`] reads the plain header lines and then
//! inflates the zlib body line by line, [`InventoryRecord`] tokenizes each line,
//! [`normalize`](normalize::normalize) turns a record into a search key and
//! absolute URL, and [`parse_inventory`] drives the whole thing into an
//! [`InventoryTable`].

pub mod normalize;
pub(crate) mod parse;
pub(crate) mod reader;
pub(crate) mod record;
pub(crate) mod table;

pub use normalize::{as_directory, join_location};
pub use parse::{VERSION_HEADER, parse_inventory};
pub use reader::{CHUNK_SIZE, CompressedLines, InventoryReader};
pub use record::InventoryRecord;
pub use table::{Entry, InventoryMeta, InventoryTable};
