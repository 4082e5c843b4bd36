pub mod destination;
pub mod error;
pub mod source;
pub mod statement;
