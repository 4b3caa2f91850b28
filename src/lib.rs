pub mod assembler;
pub mod configuration;
pub mod decoder;
pub mod error;
pub mod helpers;
pub mod model;
pub mod types;
