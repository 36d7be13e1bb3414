pub mod table;

pub use table::TableFormatter;
