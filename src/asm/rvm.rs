//! M extension: integer multiply and divide

use crate::asm::Assembler;
use crate::util::opcode::Opcode;

impl Assembler<'_> {
    r_type_ops! {
        Opcode::Op.as_u32();

        /// MUL: low 64 bits of rs1 * rs2.
        mul    => (0x0, 0x01),
        /// MULH: high bits of signed * signed.
        mulh   => (0x1, 0x01),
        /// MULHSU: high bits of signed * unsigned.
        mulhsu => (0x2, 0x01),
        /// MULHU: high bits of unsigned * unsigned.
        mulhu  => (0x3, 0x01),
        /// DIV: signed division.
        div    => (0x4, 0x01),
        /// DIVU: unsigned division.
        divu   => (0x5, 0x01),
        /// REM: signed remainder.
        rem    => (0x6, 0x01),
        /// REMU: unsigned remainder.
        remu   => (0x7, 0x01),
    }

    r_type_ops! {
        Opcode::Op32.as_u32();

        /// MULW: 32-bit multiplication, result sign-extended (RV64M).
        mulw  => (0x0, 0x01),
        /// DIVW: 32-bit signed division, result sign-extended (RV64M).
        divw  => (0x4, 0x01),
        /// DIVUW: 32-bit unsigned division, result sign-extended (RV64M).
        divuw => (0x5, 0x01),
        /// REMW: 32-bit signed remainder, result sign-extended (RV64M).
        remw  => (0x6, 0x01),
        /// REMUW: 32-bit unsigned remainder, result sign-extended (RV64M).
        remuw => (0x7, 0x01),
    }
}
