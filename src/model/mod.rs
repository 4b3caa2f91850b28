//! Domain records module
//!
//! Records shared by several response families are consolidated in
//! models.rs; family-specific responses live beside their decoders in
//! `assembler`.

mod models;

pub use models::*;
