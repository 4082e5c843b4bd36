pub mod env;
pub mod error;
pub mod mapping;
pub mod settings;
