pub mod error;
pub mod loader;
pub mod observer;
pub mod transform;
