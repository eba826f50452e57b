pub mod codec;
pub mod cursor;
pub mod error;
pub mod kind;
pub mod order;
pub mod page;
pub mod token;
