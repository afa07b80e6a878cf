//! Runtime RISC-V machine-code emitter.
//!
//! `mortar` turns typed mnemonic calls into little-endian RISC-V
//! instruction words, written straight into an in-memory code buffer
//! for JIT execution or inspection. It covers RV32I/RV64I plus the M,
//! A, F, D, Q, Zicsr and C extensions, with forward-reference labels
//! whose branch displacements are patched in place at bind time.
//!
//! # Quick start
//!
//! ```
//! use mortar::{Assembler, Label};
//! use mortar::reg::Gpr::*;
//!
//! let mut asm = Assembler::new(64);
//! let mut loop_top = Label::new();
//!
//! // a0 = a0 + a1, counting a1 down to zero
//! asm.bind(&mut loop_top);
//! asm.emit_add(A0, A0, A1);
//! asm.emit_addi(A1, A1, -1);
//! asm.emit_bnez(A1, &mut loop_top);
//! asm.emit_ret();
//!
//! let buf = asm.finish().unwrap();
//! assert_eq!(buf.cursor(), 16);
//! ```
//!
//! Emission into caller-owned memory uses [`Assembler::with_buffer`];
//! the assembler then writes the caller's bytes in place and frees
//! nothing on drop.

#[macro_use]
pub mod util;

pub mod asm;
pub mod enc;
pub mod reg;

pub use asm::{Assembler, CodeBuffer, FinishError, Label};
pub use reg::{Csr, Fpr, Gpr};
pub use util::opcode::{AqRl, FenceOrder, RMode};
