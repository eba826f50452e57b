pub mod core;
pub mod macros;
pub mod pagination;
pub mod records;
