//! C extension: 16-bit compressed instructions
//!
//! Memory-form immediates are unsigned byte offsets that must be
//! multiples of the access width; the ISA leaves no encoding for other
//! values, so misaligned offsets are rejected rather than truncated.
//! Operand restrictions the ISA bakes into the encodings (compact
//! register ranges, nonzero immediates, forbidden rd values) are
//! enforced here as preconditions.

use crate::asm::asm::checked_disp;
use crate::asm::label::FixupKind;
use crate::asm::{Assembler, Label};
use crate::enc::rvc;
use crate::reg::{Fpr, Gpr};
use crate::util::misc::{expect_simm, expect_uimm};

const Q0: u32 = 0b00;
const Q1: u32 = 0b01;
const Q2: u32 = 0b10;

#[track_caller]
#[inline(always)]
fn expect_multiple(imm: u32, of: u32) -> u32 {
    assert!(imm % of == 0, "immediate {imm} must be a multiple of {of}");
    imm
}

impl Assembler<'_> {
    // ----- QUADRANT 0 -----

    /// C.ADDI4SPN: rd' = sp + nzuimm, `imm` a nonzero multiple of 4 up
    /// to 1020.
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_addi4spn(&mut self, rd: Gpr, imm: u32) {
        assert!(imm != 0, "C.ADDI4SPN immediate must be non-zero");
        let u = expect_multiple(expect_uimm(imm, 10), 4);
        // nzuimm[5:4|9:6|2|3] packed into [12:5]
        let imm8 = ((u >> 4 & 0x3) << 6) | ((u >> 6 & 0xf) << 2) | ((u >> 2 & 0x1) << 1) | (u >> 3 & 0x1);
        self.emit16(rvc::ciw(0b000, imm8, rd.compact(), Q0));
    }

    /// C.FLD: load a double into fd' from `imm(rs1')`, `imm` a multiple
    /// of 8 up to 248.
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_fld(&mut self, fd: Fpr, rs1: Gpr, imm: u32) {
        let u = expect_multiple(expect_uimm(imm, 8), 8);
        self.emit16(rvc::cl(0b001, u >> 3 & 0x7, rs1.compact(), u >> 6 & 0x3, fd.compact(), Q0));
    }

    /// C.LQ: load a quadword into rd' from `imm(rs1')`, `imm` a multiple
    /// of 16 up to 496 (RV128).
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_lq(&mut self, rd: Gpr, rs1: Gpr, imm: u32) {
        let u = expect_multiple(expect_uimm(imm, 9), 16);
        // offset[5:4|8] at [12:10]
        let imm3 = ((u >> 4 & 0x3) << 1) | (u >> 8 & 0x1);
        self.emit16(rvc::cl(0b001, imm3, rs1.compact(), u >> 6 & 0x3, rd.compact(), Q0));
    }

    /// C.LW: load a word into rd' from `imm(rs1')`, `imm` a multiple of
    /// 4 up to 124.
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_lw(&mut self, rd: Gpr, rs1: Gpr, imm: u32) {
        let u = expect_multiple(expect_uimm(imm, 7), 4);
        // offset[2] at [6], offset[6] at [5]
        let imm2 = ((u >> 2 & 0x1) << 1) | (u >> 6 & 0x1);
        self.emit16(rvc::cl(0b010, u >> 3 & 0x7, rs1.compact(), imm2, rd.compact(), Q0));
    }

    /// C.FLW: load a single into fd' from `imm(rs1')` (RV32).
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_flw(&mut self, fd: Fpr, rs1: Gpr, imm: u32) {
        let u = expect_multiple(expect_uimm(imm, 7), 4);
        let imm2 = ((u >> 2 & 0x1) << 1) | (u >> 6 & 0x1);
        self.emit16(rvc::cl(0b011, u >> 3 & 0x7, rs1.compact(), imm2, fd.compact(), Q0));
    }

    /// C.LD: load a doubleword into rd' from `imm(rs1')` (RV64), `imm` a
    /// multiple of 8 up to 248.
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_ld(&mut self, rd: Gpr, rs1: Gpr, imm: u32) {
        let u = expect_multiple(expect_uimm(imm, 8), 8);
        self.emit16(rvc::cl(0b011, u >> 3 & 0x7, rs1.compact(), u >> 6 & 0x3, rd.compact(), Q0));
    }

    /// C.FSD: store fs2' as a double to `imm(rs1')`.
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_fsd(&mut self, fs2: Fpr, rs1: Gpr, imm: u32) {
        let u = expect_multiple(expect_uimm(imm, 8), 8);
        self.emit16(rvc::cs(0b101, u >> 3 & 0x7, rs1.compact(), u >> 6 & 0x3, fs2.compact(), Q0));
    }

    /// C.SQ: store rs2' as a quadword to `imm(rs1')` (RV128).
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_sq(&mut self, rs2: Gpr, rs1: Gpr, imm: u32) {
        let u = expect_multiple(expect_uimm(imm, 9), 16);
        let imm3 = ((u >> 4 & 0x3) << 1) | (u >> 8 & 0x1);
        self.emit16(rvc::cs(0b101, imm3, rs1.compact(), u >> 6 & 0x3, rs2.compact(), Q0));
    }

    /// C.SW: store rs2' as a word to `imm(rs1')`.
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_sw(&mut self, rs2: Gpr, rs1: Gpr, imm: u32) {
        let u = expect_multiple(expect_uimm(imm, 7), 4);
        let imm2 = ((u >> 2 & 0x1) << 1) | (u >> 6 & 0x1);
        self.emit16(rvc::cs(0b110, u >> 3 & 0x7, rs1.compact(), imm2, rs2.compact(), Q0));
    }

    /// C.FSW: store fs2' as a single to `imm(rs1')` (RV32).
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_fsw(&mut self, fs2: Fpr, rs1: Gpr, imm: u32) {
        let u = expect_multiple(expect_uimm(imm, 7), 4);
        let imm2 = ((u >> 2 & 0x1) << 1) | (u >> 6 & 0x1);
        self.emit16(rvc::cs(0b111, u >> 3 & 0x7, rs1.compact(), imm2, fs2.compact(), Q0));
    }

    /// C.SD: store rs2' as a doubleword to `imm(rs1')` (RV64).
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_sd(&mut self, rs2: Gpr, rs1: Gpr, imm: u32) {
        let u = expect_multiple(expect_uimm(imm, 8), 8);
        self.emit16(rvc::cs(0b111, u >> 3 & 0x7, rs1.compact(), u >> 6 & 0x3, rs2.compact(), Q0));
    }

    // ----- QUADRANT 1 -----

    /// C.NOP.
    #[inline(always)]
    pub fn emit_c_nop(&mut self) {
        self.emit16(rvc::ci(0b000, 0, 0, 0, Q1));
    }

    /// C.ADDI: rd += 6-bit signed immediate.
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_addi(&mut self, rd: Gpr, imm: i32) {
        let i = expect_simm(imm, 6) as u32;
        self.emit16(rvc::ci(0b000, i >> 5, rd.as_u32(), i, Q1));
    }

    /// C.JAL: jump and link to `label` (RV32).
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_jal(&mut self, label: &mut Label) {
        let disp = self.link(label, FixupKind::CompressedJump);
        self.emit16(rvc::cj(0b001, disp));
    }

    /// Displacement form of [`Self::emit_c_jal`].
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_jal_imm(&mut self, imm: i32) {
        let disp = checked_disp(FixupKind::CompressedJump, imm as i64);
        self.emit16(rvc::cj(0b001, disp));
    }

    /// C.ADDIW: 32-bit rd += imm, sign-extended (RV64); rd must not be
    /// x0.
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_addiw(&mut self, rd: Gpr, imm: i32) {
        assert!(rd != Gpr::Zero, "C.ADDIW rd must not be x0");
        let i = expect_simm(imm, 6) as u32;
        self.emit16(rvc::ci(0b001, i >> 5, rd.as_u32(), i, Q1));
    }

    /// C.LI: rd = 6-bit signed immediate.
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_li(&mut self, rd: Gpr, imm: i32) {
        let i = expect_simm(imm, 6) as u32;
        self.emit16(rvc::ci(0b010, i >> 5, rd.as_u32(), i, Q1));
    }

    /// C.ADDI16SP: sp += `imm`, a nonzero multiple of 16 in
    /// [-512, 496].
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_addi16sp(&mut self, imm: i32) {
        assert!(imm != 0, "C.ADDI16SP immediate must be non-zero");
        assert!(imm % 16 == 0, "C.ADDI16SP immediate must be a multiple of 16");
        let i = expect_simm(imm, 10) as u32;
        // nzimm[9] at [12], nzimm[4|6|8:7|5] at [6:2]
        let imm5 = ((i >> 4 & 0x1) << 4) | ((i >> 6 & 0x1) << 3) | ((i >> 7 & 0x3) << 1) | (i >> 5 & 0x1);
        self.emit16(rvc::ci(0b011, i >> 9 & 0x1, Gpr::Sp.as_u32(), imm5, Q1));
    }

    /// C.LUI: rd = sign-extended `imm` placed at bits [17:12]; `imm` is
    /// the nonzero 6-bit upper-immediate value, and rd must not be x0 or
    /// x2.
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_lui(&mut self, rd: Gpr, imm: i32) {
        assert!(imm != 0, "C.LUI immediate must be non-zero");
        assert!(
            rd != Gpr::Zero && rd != Gpr::Sp,
            "C.LUI rd must not be x0 or x2"
        );
        let i = expect_simm(imm, 6) as u32;
        self.emit16(rvc::ci(0b011, i >> 5, rd.as_u32(), i, Q1));
    }

    /// C.SRLI: logical right shift of rd' by a 6-bit amount.
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_srli(&mut self, rd: Gpr, shamt: u32) {
        self.emit16(rvc::cb_alu(0b00, rd.compact(), expect_uimm(shamt, 6) as i32));
    }

    /// C.SRAI: arithmetic right shift of rd' by a 6-bit amount.
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_srai(&mut self, rd: Gpr, shamt: u32) {
        self.emit16(rvc::cb_alu(0b01, rd.compact(), expect_uimm(shamt, 6) as i32));
    }

    /// C.ANDI: rd' &= 6-bit signed immediate.
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_andi(&mut self, rd: Gpr, imm: i32) {
        self.emit16(rvc::cb_alu(0b10, rd.compact(), expect_simm(imm, 6)));
    }

    /// C.SUB: rd' -= rs2'.
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_sub(&mut self, rd: Gpr, rs2: Gpr) {
        self.emit16(rvc::ca(0b100011, rd.compact(), 0b00, rs2.compact()));
    }

    /// C.XOR: rd' ^= rs2'.
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_xor(&mut self, rd: Gpr, rs2: Gpr) {
        self.emit16(rvc::ca(0b100011, rd.compact(), 0b01, rs2.compact()));
    }

    /// C.OR: rd' |= rs2'.
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_or(&mut self, rd: Gpr, rs2: Gpr) {
        self.emit16(rvc::ca(0b100011, rd.compact(), 0b10, rs2.compact()));
    }

    /// C.AND: rd' &= rs2'.
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_and(&mut self, rd: Gpr, rs2: Gpr) {
        self.emit16(rvc::ca(0b100011, rd.compact(), 0b11, rs2.compact()));
    }

    /// C.SUBW: 32-bit rd' -= rs2', sign-extended (RV64).
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_subw(&mut self, rd: Gpr, rs2: Gpr) {
        self.emit16(rvc::ca(0b100111, rd.compact(), 0b00, rs2.compact()));
    }

    /// C.ADDW: 32-bit rd' += rs2', sign-extended (RV64).
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_addw(&mut self, rd: Gpr, rs2: Gpr) {
        self.emit16(rvc::ca(0b100111, rd.compact(), 0b01, rs2.compact()));
    }

    /// C.J: jump to `label` without linking.
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_j(&mut self, label: &mut Label) {
        let disp = self.link(label, FixupKind::CompressedJump);
        self.emit16(rvc::cj(0b101, disp));
    }

    /// Displacement form of [`Self::emit_c_j`].
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_j_imm(&mut self, imm: i32) {
        let disp = checked_disp(FixupKind::CompressedJump, imm as i64);
        self.emit16(rvc::cj(0b101, disp));
    }

    /// C.BEQZ: branch to `label` if rs' == 0.
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_beqz(&mut self, rs: Gpr, label: &mut Label) {
        let rs1_c = rs.compact();
        let disp = self.link(label, FixupKind::CompressedBranch);
        self.emit16(rvc::cb(0b110, rs1_c, disp));
    }

    /// Displacement form of [`Self::emit_c_beqz`].
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_beqz_imm(&mut self, rs: Gpr, imm: i32) {
        let disp = checked_disp(FixupKind::CompressedBranch, imm as i64);
        self.emit16(rvc::cb(0b110, rs.compact(), disp));
    }

    /// C.BNEZ: branch to `label` if rs' != 0.
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_bnez(&mut self, rs: Gpr, label: &mut Label) {
        let rs1_c = rs.compact();
        let disp = self.link(label, FixupKind::CompressedBranch);
        self.emit16(rvc::cb(0b111, rs1_c, disp));
    }

    /// Displacement form of [`Self::emit_c_bnez`].
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_bnez_imm(&mut self, rs: Gpr, imm: i32) {
        let disp = checked_disp(FixupKind::CompressedBranch, imm as i64);
        self.emit16(rvc::cb(0b111, rs.compact(), disp));
    }

    // ----- QUADRANT 2 -----

    /// C.SLLI: logical left shift of rd by a 6-bit amount.
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_slli(&mut self, rd: Gpr, shamt: u32) {
        let s = expect_uimm(shamt, 6);
        self.emit16(rvc::ci(0b000, s >> 5, rd.as_u32(), s, Q2));
    }

    /// C.FLDSP: load a double into fd from `imm(sp)`, `imm` a multiple
    /// of 8 up to 504.
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_fldsp(&mut self, fd: Fpr, imm: u32) {
        let u = expect_multiple(expect_uimm(imm, 9), 8);
        // offset[4:3] at [6:5], offset[8:6] at [4:2]
        let imm5 = ((u >> 3 & 0x3) << 3) | (u >> 6 & 0x7);
        self.emit16(rvc::ci(0b001, u >> 5 & 0x1, fd.as_u32(), imm5, Q2));
    }

    /// C.LWSP: load a word into rd from `imm(sp)`, `imm` a multiple of 4
    /// up to 252; rd must not be x0.
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_lwsp(&mut self, rd: Gpr, imm: u32) {
        assert!(rd != Gpr::Zero, "C.LWSP rd must not be x0");
        let u = expect_multiple(expect_uimm(imm, 8), 4);
        // offset[4:2] at [6:4], offset[7:6] at [3:2]
        let imm5 = ((u >> 2 & 0x7) << 2) | (u >> 6 & 0x3);
        self.emit16(rvc::ci(0b010, u >> 5 & 0x1, rd.as_u32(), imm5, Q2));
    }

    /// C.FLWSP: load a single into fd from `imm(sp)` (RV32).
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_flwsp(&mut self, fd: Fpr, imm: u32) {
        let u = expect_multiple(expect_uimm(imm, 8), 4);
        let imm5 = ((u >> 2 & 0x7) << 2) | (u >> 6 & 0x3);
        self.emit16(rvc::ci(0b011, u >> 5 & 0x1, fd.as_u32(), imm5, Q2));
    }

    /// C.LDSP: load a doubleword into rd from `imm(sp)` (RV64), `imm` a
    /// multiple of 8 up to 504; rd must not be x0.
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_ldsp(&mut self, rd: Gpr, imm: u32) {
        assert!(rd != Gpr::Zero, "C.LDSP rd must not be x0");
        let u = expect_multiple(expect_uimm(imm, 9), 8);
        let imm5 = ((u >> 3 & 0x3) << 3) | (u >> 6 & 0x7);
        self.emit16(rvc::ci(0b011, u >> 5 & 0x1, rd.as_u32(), imm5, Q2));
    }

    /// C.JR: jump to the address in rs; rs must not be x0.
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_jr(&mut self, rs: Gpr) {
        assert!(rs != Gpr::Zero, "C.JR rs must not be x0");
        self.emit16(rvc::cr(0b1000, rs.as_u32(), 0, Q2));
    }

    /// C.MV: rd = rs2; rs2 must not be x0.
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_mv(&mut self, rd: Gpr, rs2: Gpr) {
        assert!(rs2 != Gpr::Zero, "C.MV rs2 must not be x0");
        self.emit16(rvc::cr(0b1000, rd.as_u32(), rs2.as_u32(), Q2));
    }

    /// C.EBREAK.
    #[inline(always)]
    pub fn emit_c_ebreak(&mut self) {
        self.emit16(rvc::cr(0b1001, 0, 0, Q2));
    }

    /// C.JALR: jump to the address in rs, linking through x1; rs must
    /// not be x0.
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_jalr(&mut self, rs: Gpr) {
        assert!(rs != Gpr::Zero, "C.JALR rs must not be x0");
        self.emit16(rvc::cr(0b1001, rs.as_u32(), 0, Q2));
    }

    /// C.ADD: rd += rs2; rs2 must not be x0.
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_add(&mut self, rd: Gpr, rs2: Gpr) {
        assert!(rs2 != Gpr::Zero, "C.ADD rs2 must not be x0");
        self.emit16(rvc::cr(0b1001, rd.as_u32(), rs2.as_u32(), Q2));
    }

    /// C.FSDSP: store fs2 as a double to `imm(sp)`, `imm` a multiple of
    /// 8 up to 504.
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_fsdsp(&mut self, fs2: Fpr, imm: u32) {
        let u = expect_multiple(expect_uimm(imm, 9), 8);
        // offset[5:3] at [12:10], offset[8:6] at [9:7]
        let imm6 = ((u >> 3 & 0x7) << 3) | (u >> 6 & 0x7);
        self.emit16(rvc::css(0b101, imm6, fs2.as_u32(), Q2));
    }

    /// C.SWSP: store rs2 as a word to `imm(sp)`, `imm` a multiple of 4
    /// up to 252.
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_swsp(&mut self, rs2: Gpr, imm: u32) {
        let u = expect_multiple(expect_uimm(imm, 8), 4);
        // offset[5:2] at [12:9], offset[7:6] at [8:7]
        let imm6 = ((u >> 2 & 0xf) << 2) | (u >> 6 & 0x3);
        self.emit16(rvc::css(0b110, imm6, rs2.as_u32(), Q2));
    }

    /// C.FSWSP: store fs2 as a single to `imm(sp)` (RV32).
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_fswsp(&mut self, fs2: Fpr, imm: u32) {
        let u = expect_multiple(expect_uimm(imm, 8), 4);
        let imm6 = ((u >> 2 & 0xf) << 2) | (u >> 6 & 0x3);
        self.emit16(rvc::css(0b111, imm6, fs2.as_u32(), Q2));
    }

    /// C.SDSP: store rs2 as a doubleword to `imm(sp)` (RV64).
    #[track_caller]
    #[inline(always)]
    pub fn emit_c_sdsp(&mut self, rs2: Gpr, imm: u32) {
        let u = expect_multiple(expect_uimm(imm, 9), 8);
        let imm6 = ((u >> 3 & 0x7) << 3) | (u >> 6 & 0x7);
        self.emit16(rvc::css(0b111, imm6, rs2.as_u32(), Q2));
    }

    /// C.UNDEF: the all-zero halfword, defined by the ISA to be
    /// permanently illegal.
    #[inline(always)]
    pub fn emit_c_undef(&mut self) {
        self.emit16(0x0000);
    }
}

#[cfg(test)]
mod tests {
    use crate::asm::Assembler;
    use crate::reg::{Fpr::*, Gpr::*};

    fn half_of(f: impl FnOnce(&mut Assembler<'static>)) -> u16 {
        let mut asm = Assembler::new(2);
        f(&mut asm);
        assert_eq!(asm.cursor(), 2, "compressed instructions advance by 2");
        asm.word16_at(0)
    }

    #[test]
    fn quadrant0_memory() {
        assert_eq!(half_of(|a| a.emit_c_addi4spn(A0, 4)), 0x0048);
        assert_eq!(half_of(|a| a.emit_c_lw(A0, A1, 0)), 0x4188);
        assert_eq!(half_of(|a| a.emit_c_sw(A0, A1, 0)), 0xC188);
        assert_eq!(half_of(|a| a.emit_c_ld(A0, A1, 0)), 0x6188);
        assert_eq!(half_of(|a| a.emit_c_sd(A0, A1, 0)), 0xE188);
        assert_eq!(half_of(|a| a.emit_c_fld(Fa0, A1, 0)), 0x2188);
        assert_eq!(half_of(|a| a.emit_c_fsd(Fa0, A1, 0)), 0xA188);
        assert_eq!(half_of(|a| a.emit_c_flw(Fa0, A1, 0)), 0x6188);
        assert_eq!(half_of(|a| a.emit_c_fsw(Fa0, A1, 0)), 0xE188);
    }

    #[test]
    fn quadrant0_scrambled_offsets_round_trip() {
        // c.lw offset 0x44 = 0b100_0100: offset[5:3]=0, offset[2]=1, offset[6]=1
        let h = half_of(|a| a.emit_c_lw(A0, A1, 0x44));
        let off = ((h as u32 >> 10 & 0x7) << 3) | ((h as u32 >> 6 & 0x1) << 2) | ((h as u32 >> 5 & 0x1) << 6);
        assert_eq!(off, 0x44);

        // c.ld offset 0xF8 uses offset[7:6] at [6:5]
        let h = half_of(|a| a.emit_c_ld(A0, A1, 0xF8));
        let off = ((h as u32 >> 10 & 0x7) << 3) | ((h as u32 >> 5 & 0x3) << 6);
        assert_eq!(off, 0xF8);
    }

    #[test]
    fn quadrant1_immediates() {
        assert_eq!(half_of(|a| a.emit_c_nop()), 0x0001);
        assert_eq!(half_of(|a| a.emit_c_addi(A0, 1)), 0x0505);
        assert_eq!(half_of(|a| a.emit_c_li(A0, 0)), 0x4501);
        assert_eq!(half_of(|a| a.emit_c_addi16sp(16)), 0x6141);
        assert_eq!(half_of(|a| a.emit_c_lui(A0, 1)), 0x6505);
        assert_eq!(half_of(|a| a.emit_c_srli(A0, 4)), 0x8111);
        assert_eq!(half_of(|a| a.emit_c_srai(A0, 4)), 0x8511);
        assert_eq!(half_of(|a| a.emit_c_andi(A0, 15)), 0x893D);
    }

    #[test]
    fn quadrant1_register_arithmetic() {
        assert_eq!(half_of(|a| a.emit_c_sub(A0, A1)), 0x8D0D);
        assert_eq!(half_of(|a| a.emit_c_xor(A0, A1)), 0x8D2D);
        assert_eq!(half_of(|a| a.emit_c_or(A0, A1)), 0x8D4D);
        assert_eq!(half_of(|a| a.emit_c_and(A0, A1)), 0x8D6D);
        assert_eq!(half_of(|a| a.emit_c_subw(A0, A1)), 0x9D0D);
        assert_eq!(half_of(|a| a.emit_c_addw(A0, A1)), 0x9D2D);
    }

    #[test]
    fn quadrant1_jumps_and_branches() {
        assert_eq!(half_of(|a| a.emit_c_j_imm(0)), 0xA001);
        assert_eq!(half_of(|a| a.emit_c_jal_imm(0)), 0x2001);
        assert_eq!(half_of(|a| a.emit_c_beqz_imm(A0, 0)), 0xC101);
        assert_eq!(half_of(|a| a.emit_c_bnez_imm(A0, 0)), 0xE101);
    }

    #[test]
    fn quadrant2() {
        assert_eq!(half_of(|a| a.emit_c_slli(A0, 4)), 0x0512);
        assert_eq!(half_of(|a| a.emit_c_lwsp(A0, 0)), 0x4502);
        assert_eq!(half_of(|a| a.emit_c_ldsp(A0, 0)), 0x6502);
        assert_eq!(half_of(|a| a.emit_c_fldsp(Fa0, 0)), 0x2502);
        assert_eq!(half_of(|a| a.emit_c_swsp(A0, 0)), 0xC02A);
        assert_eq!(half_of(|a| a.emit_c_sdsp(A0, 0)), 0xE02A);
        assert_eq!(half_of(|a| a.emit_c_fsdsp(Fa0, 0)), 0xA02A);
        assert_eq!(half_of(|a| a.emit_c_jr(Ra)), 0x8082);
        assert_eq!(half_of(|a| a.emit_c_jalr(A0)), 0x9502);
        assert_eq!(half_of(|a| a.emit_c_mv(A0, A1)), 0x852E);
        assert_eq!(half_of(|a| a.emit_c_add(A0, A1)), 0x952E);
        assert_eq!(half_of(|a| a.emit_c_ebreak()), 0x9002);
        assert_eq!(half_of(|a| a.emit_c_undef()), 0x0000);
    }

    #[test]
    fn sp_relative_offsets_round_trip() {
        // c.lwsp offset 0xFC exercises offset[7:6] at [3:2]
        let h = half_of(|a| a.emit_c_lwsp(A0, 0xFC)) as u32;
        let off = ((h >> 12 & 0x1) << 5) | ((h >> 4 & 0x7) << 2) | ((h >> 2 & 0x3) << 6);
        assert_eq!(off, 0xFC);

        // c.sdsp offset 0x1F8 exercises offset[8:6] at [9:7]
        let h = half_of(|a| a.emit_c_sdsp(A0, 0x1F8)) as u32;
        let off = ((h >> 10 & 0x7) << 3) | ((h >> 7 & 0x7) << 6);
        assert_eq!(off, 0x1F8);
    }

    #[test]
    #[should_panic(expected = "non-zero")]
    fn addi4spn_rejects_zero() {
        let mut asm = Assembler::new(2);
        asm.emit_c_addi4spn(A0, 0);
    }

    #[test]
    #[should_panic(expected = "x0 or x2")]
    fn lui_rejects_stack_pointer() {
        let mut asm = Assembler::new(2);
        asm.emit_c_lui(Sp, 1);
    }

    #[test]
    #[should_panic(expected = "multiple of 8")]
    fn ld_rejects_misaligned_offset() {
        let mut asm = Assembler::new(2);
        asm.emit_c_ld(A0, A1, 4);
    }

    #[test]
    #[should_panic(expected = "x8..x15")]
    fn compact_register_required() {
        let mut asm = Assembler::new(2);
        asm.emit_c_lw(T6, A1, 0);
    }

    #[test]
    #[should_panic(expected = "must not be x0")]
    fn mv_rejects_zero_source() {
        let mut asm = Assembler::new(2);
        asm.emit_c_mv(A0, Zero);
    }
}
