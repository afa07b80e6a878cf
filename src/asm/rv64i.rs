//! RV64I base instructions: word-width arithmetic and 64-bit memory ops

use crate::asm::Assembler;
use crate::enc::base;
use crate::reg::Gpr;
use crate::util::misc::{expect_simm, expect_uimm};
use crate::util::opcode::Opcode;

impl Assembler<'_> {
    r_type_ops! {
        Opcode::Op32.as_u32();

        /// ADDW: 32-bit addition, result sign-extended to 64 bits.
        addw => (0x0, 0x00),
        /// SUBW: 32-bit subtraction, result sign-extended to 64 bits.
        subw => (0x0, 0x20),
        /// SLLW: 32-bit logical left shift, result sign-extended.
        sllw => (0x1, 0x00),
        /// SRLW: 32-bit logical right shift, result sign-extended.
        srlw => (0x5, 0x00),
        /// SRAW: 32-bit arithmetic right shift, result sign-extended.
        sraw => (0x5, 0x20),
    }

    /// ADDIW: 32-bit addition with an immediate, result sign-extended.
    #[track_caller]
    #[inline(always)]
    pub fn emit_addiw(&mut self, rd: Gpr, rs1: Gpr, imm: i32) {
        self.emit32(base::i(
            Opcode::OpImm32.as_u32(),
            rd.as_u32(),
            0x0,
            rs1.as_u32(),
            expect_simm(imm, 12),
        ));
    }

    /// SLLIW: 32-bit logical left shift by a 5-bit immediate.
    #[track_caller]
    #[inline(always)]
    pub fn emit_slliw(&mut self, rd: Gpr, rs1: Gpr, shamt: u32) {
        self.emit_shift_imm_w(rd, 0x1, rs1, expect_uimm(shamt, 5), 0x00);
    }

    /// SRLIW: 32-bit logical right shift by a 5-bit immediate.
    #[track_caller]
    #[inline(always)]
    pub fn emit_srliw(&mut self, rd: Gpr, rs1: Gpr, shamt: u32) {
        self.emit_shift_imm_w(rd, 0x5, rs1, expect_uimm(shamt, 5), 0x00);
    }

    /// SRAIW: 32-bit arithmetic right shift by a 5-bit immediate.
    #[track_caller]
    #[inline(always)]
    pub fn emit_sraiw(&mut self, rd: Gpr, rs1: Gpr, shamt: u32) {
        self.emit_shift_imm_w(rd, 0x5, rs1, expect_uimm(shamt, 5), 0x20);
    }

    #[inline(always)]
    fn emit_shift_imm_w(&mut self, rd: Gpr, funct3: u32, rs1: Gpr, shamt: u32, top: u32) {
        self.emit32(base::i(
            Opcode::OpImm32.as_u32(),
            rd.as_u32(),
            funct3,
            rs1.as_u32(),
            ((top << 5) | shamt) as i32,
        ));
    }

    /// SLLI with the 6-bit RV64 shift amount. Kept separate from the
    /// 32-bit [`Self::emit_slli`] so each form range-checks its own
    /// shamt width.
    #[track_caller]
    #[inline(always)]
    pub fn emit_slli64(&mut self, rd: Gpr, rs1: Gpr, shamt: u32) {
        self.emit_shift_imm(rd, 0x1, rs1, expect_uimm(shamt, 6), 0x00);
    }

    /// SRLI with the 6-bit RV64 shift amount.
    #[track_caller]
    #[inline(always)]
    pub fn emit_srli64(&mut self, rd: Gpr, rs1: Gpr, shamt: u32) {
        self.emit_shift_imm(rd, 0x5, rs1, expect_uimm(shamt, 6), 0x00);
    }

    /// SRAI with the 6-bit RV64 shift amount.
    #[track_caller]
    #[inline(always)]
    pub fn emit_srai64(&mut self, rd: Gpr, rs1: Gpr, shamt: u32) {
        // funct6 = 010000, one bit narrower than the 32-bit form's funct7
        self.emit_shift_imm(rd, 0x5, rs1, expect_uimm(shamt, 6) | (0x10 << 6), 0x00);
    }

    /// LD: load a doubleword from `offset(rs1)`.
    #[track_caller]
    #[inline(always)]
    pub fn emit_ld(&mut self, rd: Gpr, rs1: Gpr, offset: i32) {
        self.emit_load(rd, 0x3, rs1, offset);
    }

    /// LWU: load a zero-extended word from `offset(rs1)`.
    #[track_caller]
    #[inline(always)]
    pub fn emit_lwu(&mut self, rd: Gpr, rs1: Gpr, offset: i32) {
        self.emit_load(rd, 0x6, rs1, offset);
    }

    /// SD: store rs2 as a doubleword to `offset(rs1)`.
    #[track_caller]
    #[inline(always)]
    pub fn emit_sd(&mut self, rs2: Gpr, rs1: Gpr, offset: i32) {
        self.emit_store(0x3, rs1, rs2, offset);
    }
}

#[cfg(test)]
mod tests {
    use crate::asm::Assembler;
    use crate::reg::Gpr::*;

    fn word_of(f: impl FnOnce(&mut Assembler<'static>)) -> u32 {
        let mut asm = Assembler::new(4);
        f(&mut asm);
        asm.word32_at(0)
    }

    #[test]
    fn word_width_register_ops() {
        assert_eq!(word_of(|a| a.emit_addw(A0, A1, A2)), 0x00C5853B);
        assert_eq!(word_of(|a| a.emit_subw(A0, A1, A2)), 0x40C5853B);
        assert_eq!(word_of(|a| a.emit_sllw(A0, A1, A2)), 0x00C5953B);
        assert_eq!(word_of(|a| a.emit_srlw(A0, A1, A2)), 0x00C5D53B);
        assert_eq!(word_of(|a| a.emit_sraw(A0, A1, A2)), 0x40C5D53B);
    }

    #[test]
    fn word_width_immediate_ops() {
        assert_eq!(word_of(|a| a.emit_addiw(A0, A1, 42)), 0x02A5851B);
        assert_eq!(word_of(|a| a.emit_slliw(A0, A1, 4)), 0x0045951B);
        assert_eq!(word_of(|a| a.emit_srliw(A0, A1, 4)), 0x0045D51B);
        assert_eq!(word_of(|a| a.emit_sraiw(A0, A1, 4)), 0x4045D51B);
    }

    #[test]
    fn wide_shift_amounts() {
        assert_eq!(word_of(|a| a.emit_slli64(A0, A1, 63)), 0x03F59513);
        assert_eq!(word_of(|a| a.emit_srli64(A0, A1, 63)), 0x03F5D513);
        assert_eq!(word_of(|a| a.emit_srai64(A0, A1, 63)), 0x43F5D513);
    }

    #[test]
    fn loads_and_stores() {
        assert_eq!(word_of(|a| a.emit_ld(S1, S2, 0)), 0x00093483);
        assert_eq!(word_of(|a| a.emit_lwu(A0, Sp, 0)), 0x00016503);
        assert_eq!(word_of(|a| a.emit_sd(A0, Sp, 0)), 0x00A13023);
    }

    #[test]
    #[should_panic(expected = "unsigned 6-bit")]
    fn wide_shift_rejects_64() {
        let mut asm = Assembler::new(4);
        asm.emit_slli64(A0, A0, 64);
    }
}
