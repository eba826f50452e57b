pub mod error;
pub mod keyset;
pub mod paginator;
pub mod query;
pub mod settings;
pub mod source;
