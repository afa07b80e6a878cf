//! Helper functions/macros and ISA-level enums shared by the encoders

#[macro_use]
pub mod misc;
pub mod opcode;
