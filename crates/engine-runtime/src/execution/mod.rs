pub mod executor;
pub mod factory;
pub mod pipeline;
pub mod summary;
