//! Q extension: quad-precision floating point

use crate::asm::rvf::FMT_Q;
use crate::asm::Assembler;
use crate::enc::base;
use crate::reg::{Fpr, Gpr};
use crate::util::misc::expect_simm;
use crate::util::opcode::{Opcode, RMode};

impl Assembler<'_> {
    /// FADD.Q: rd = rs1 + rs2.
    #[inline(always)]
    pub fn emit_fadd_q(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr, rm: RMode) {
        self.emit_fp_op(0x03, rd.as_u32(), rm.as_u32(), rs1.as_u32(), rs2.as_u32());
    }

    /// FSUB.Q: rd = rs1 - rs2.
    #[inline(always)]
    pub fn emit_fsub_q(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr, rm: RMode) {
        self.emit_fp_op(0x07, rd.as_u32(), rm.as_u32(), rs1.as_u32(), rs2.as_u32());
    }

    /// FMUL.Q: rd = rs1 * rs2.
    #[inline(always)]
    pub fn emit_fmul_q(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr, rm: RMode) {
        self.emit_fp_op(0x0B, rd.as_u32(), rm.as_u32(), rs1.as_u32(), rs2.as_u32());
    }

    /// FDIV.Q: rd = rs1 / rs2.
    #[inline(always)]
    pub fn emit_fdiv_q(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr, rm: RMode) {
        self.emit_fp_op(0x0F, rd.as_u32(), rm.as_u32(), rs1.as_u32(), rs2.as_u32());
    }

    /// FSQRT.Q: rd = sqrt(rs1).
    #[inline(always)]
    pub fn emit_fsqrt_q(&mut self, rd: Fpr, rs1: Fpr, rm: RMode) {
        self.emit_fp_op(0x2F, rd.as_u32(), rm.as_u32(), rs1.as_u32(), 0);
    }

    /// FMIN.Q: rd = min(rs1, rs2).
    #[inline(always)]
    pub fn emit_fmin_q(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr) {
        self.emit_fp_op(0x17, rd.as_u32(), 0x0, rs1.as_u32(), rs2.as_u32());
    }

    /// FMAX.Q: rd = max(rs1, rs2).
    #[inline(always)]
    pub fn emit_fmax_q(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr) {
        self.emit_fp_op(0x17, rd.as_u32(), 0x1, rs1.as_u32(), rs2.as_u32());
    }

    /// FSGNJ.Q: rd = rs1 with the sign of rs2.
    #[inline(always)]
    pub fn emit_fsgnj_q(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr) {
        self.emit_fp_op(0x13, rd.as_u32(), 0x0, rs1.as_u32(), rs2.as_u32());
    }

    /// FSGNJN.Q: rd = rs1 with the negated sign of rs2.
    #[inline(always)]
    pub fn emit_fsgnjn_q(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr) {
        self.emit_fp_op(0x13, rd.as_u32(), 0x1, rs1.as_u32(), rs2.as_u32());
    }

    /// FSGNJX.Q: rd = rs1 with its sign xored with rs2's.
    #[inline(always)]
    pub fn emit_fsgnjx_q(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr) {
        self.emit_fp_op(0x13, rd.as_u32(), 0x2, rs1.as_u32(), rs2.as_u32());
    }

    /// FLE.Q: rd = (rs1 <= rs2).
    #[inline(always)]
    pub fn emit_fle_q(&mut self, rd: Gpr, rs1: Fpr, rs2: Fpr) {
        self.emit_fp_op(0x53, rd.as_u32(), 0x0, rs1.as_u32(), rs2.as_u32());
    }

    /// FLT.Q: rd = (rs1 < rs2).
    #[inline(always)]
    pub fn emit_flt_q(&mut self, rd: Gpr, rs1: Fpr, rs2: Fpr) {
        self.emit_fp_op(0x53, rd.as_u32(), 0x1, rs1.as_u32(), rs2.as_u32());
    }

    /// FEQ.Q: rd = (rs1 == rs2).
    #[inline(always)]
    pub fn emit_feq_q(&mut self, rd: Gpr, rs1: Fpr, rs2: Fpr) {
        self.emit_fp_op(0x53, rd.as_u32(), 0x2, rs1.as_u32(), rs2.as_u32());
    }

    /// FCLASS.Q: classify rs1 into a ten-bit mask in rd.
    #[inline(always)]
    pub fn emit_fclass_q(&mut self, rd: Gpr, rs1: Fpr) {
        self.emit_fp_op(0x73, rd.as_u32(), 0x1, rs1.as_u32(), 0);
    }

    /// FCVT.W.Q: convert to a signed 32-bit integer.
    #[inline(always)]
    pub fn emit_fcvt_w_q(&mut self, rd: Gpr, rs1: Fpr, rm: RMode) {
        self.emit_fp_op(0x63, rd.as_u32(), rm.as_u32(), rs1.as_u32(), 0);
    }

    /// FCVT.WU.Q: convert to an unsigned 32-bit integer.
    #[inline(always)]
    pub fn emit_fcvt_wu_q(&mut self, rd: Gpr, rs1: Fpr, rm: RMode) {
        self.emit_fp_op(0x63, rd.as_u32(), rm.as_u32(), rs1.as_u32(), 1);
    }

    /// FCVT.L.Q: convert to a signed 64-bit integer (RV64Q).
    #[inline(always)]
    pub fn emit_fcvt_l_q(&mut self, rd: Gpr, rs1: Fpr, rm: RMode) {
        self.emit_fp_op(0x63, rd.as_u32(), rm.as_u32(), rs1.as_u32(), 2);
    }

    /// FCVT.LU.Q: convert to an unsigned 64-bit integer (RV64Q).
    #[inline(always)]
    pub fn emit_fcvt_lu_q(&mut self, rd: Gpr, rs1: Fpr, rm: RMode) {
        self.emit_fp_op(0x63, rd.as_u32(), rm.as_u32(), rs1.as_u32(), 3);
    }

    /// FCVT.Q.W: convert from a signed 32-bit integer.
    #[inline(always)]
    pub fn emit_fcvt_q_w(&mut self, rd: Fpr, rs1: Gpr, rm: RMode) {
        self.emit_fp_op(0x6B, rd.as_u32(), rm.as_u32(), rs1.as_u32(), 0);
    }

    /// FCVT.Q.WU: convert from an unsigned 32-bit integer.
    #[inline(always)]
    pub fn emit_fcvt_q_wu(&mut self, rd: Fpr, rs1: Gpr, rm: RMode) {
        self.emit_fp_op(0x6B, rd.as_u32(), rm.as_u32(), rs1.as_u32(), 1);
    }

    /// FCVT.Q.L: convert from a signed 64-bit integer (RV64Q).
    #[inline(always)]
    pub fn emit_fcvt_q_l(&mut self, rd: Fpr, rs1: Gpr, rm: RMode) {
        self.emit_fp_op(0x6B, rd.as_u32(), rm.as_u32(), rs1.as_u32(), 2);
    }

    /// FCVT.Q.LU: convert from an unsigned 64-bit integer (RV64Q).
    #[inline(always)]
    pub fn emit_fcvt_q_lu(&mut self, rd: Fpr, rs1: Gpr, rm: RMode) {
        self.emit_fp_op(0x6B, rd.as_u32(), rm.as_u32(), rs1.as_u32(), 3);
    }

    /// FCVT.Q.S: widen a single to a quad.
    #[inline(always)]
    pub fn emit_fcvt_q_s(&mut self, rd: Fpr, rs1: Fpr, rm: RMode) {
        self.emit_fp_op(0x23, rd.as_u32(), rm.as_u32(), rs1.as_u32(), 0);
    }

    /// FCVT.S.Q: narrow a quad to a single.
    #[inline(always)]
    pub fn emit_fcvt_s_q(&mut self, rd: Fpr, rs1: Fpr, rm: RMode) {
        self.emit_fp_op(0x20, rd.as_u32(), rm.as_u32(), rs1.as_u32(), 3);
    }

    /// FCVT.Q.D: widen a double to a quad.
    #[inline(always)]
    pub fn emit_fcvt_q_d(&mut self, rd: Fpr, rs1: Fpr, rm: RMode) {
        self.emit_fp_op(0x23, rd.as_u32(), rm.as_u32(), rs1.as_u32(), 1);
    }

    /// FCVT.D.Q: narrow a quad to a double.
    #[inline(always)]
    pub fn emit_fcvt_d_q(&mut self, rd: Fpr, rs1: Fpr, rm: RMode) {
        self.emit_fp_op(0x21, rd.as_u32(), rm.as_u32(), rs1.as_u32(), 3);
    }

    /// FLQ: load a quad from `offset(rs1)`.
    #[track_caller]
    #[inline(always)]
    pub fn emit_flq(&mut self, rd: Fpr, rs1: Gpr, offset: i32) {
        self.emit32(base::i(
            Opcode::LoadFp.as_u32(),
            rd.as_u32(),
            0x4,
            rs1.as_u32(),
            expect_simm(offset, 12),
        ));
    }

    /// FSQ: store rs2 as a quad to `offset(rs1)`.
    #[track_caller]
    #[inline(always)]
    pub fn emit_fsq(&mut self, rs2: Fpr, rs1: Gpr, offset: i32) {
        self.emit32(base::s(
            Opcode::StoreFp.as_u32(),
            0x4,
            rs1.as_u32(),
            rs2.as_u32(),
            expect_simm(offset, 12),
        ));
    }

    /// FMADD.Q: rd = rs1 * rs2 + rs3.
    #[inline(always)]
    pub fn emit_fmadd_q(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr, rs3: Fpr, rm: RMode) {
        self.emit_fp_r4(Opcode::Madd, FMT_Q, rd, rs1, rs2, rs3, rm);
    }

    /// FMSUB.Q: rd = rs1 * rs2 - rs3.
    #[inline(always)]
    pub fn emit_fmsub_q(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr, rs3: Fpr, rm: RMode) {
        self.emit_fp_r4(Opcode::Msub, FMT_Q, rd, rs1, rs2, rs3, rm);
    }

    /// FNMSUB.Q: rd = -(rs1 * rs2) + rs3.
    #[inline(always)]
    pub fn emit_fnmsub_q(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr, rs3: Fpr, rm: RMode) {
        self.emit_fp_r4(Opcode::Nmsub, FMT_Q, rd, rs1, rs2, rs3, rm);
    }

    /// FNMADD.Q: rd = -(rs1 * rs2) - rs3.
    #[inline(always)]
    pub fn emit_fnmadd_q(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr, rs3: Fpr, rm: RMode) {
        self.emit_fp_r4(Opcode::Nmadd, FMT_Q, rd, rs1, rs2, rs3, rm);
    }

    /// FMV.Q: copy rs into rd (FSGNJ.Q rd, rs, rs).
    #[inline(always)]
    pub fn emit_fmv_q(&mut self, rd: Fpr, rs: Fpr) {
        self.emit_fsgnj_q(rd, rs, rs);
    }

    /// FABS.Q: rd = |rs| (FSGNJX.Q rd, rs, rs).
    #[inline(always)]
    pub fn emit_fabs_q(&mut self, rd: Fpr, rs: Fpr) {
        self.emit_fsgnjx_q(rd, rs, rs);
    }

    /// FNEG.Q: rd = -rs (FSGNJN.Q rd, rs, rs).
    #[inline(always)]
    pub fn emit_fneg_q(&mut self, rd: Fpr, rs: Fpr) {
        self.emit_fsgnjn_q(rd, rs, rs);
    }
}

#[cfg(test)]
mod tests {
    use crate::asm::Assembler;
    use crate::reg::{Fpr::*, Gpr};
    use crate::util::opcode::RMode;

    fn word_of(f: impl FnOnce(&mut Assembler<'static>)) -> u32 {
        let mut asm = Assembler::new(4);
        f(&mut asm);
        asm.word32_at(0)
    }

    #[test]
    fn arithmetic_carries_the_quad_format_bits() {
        assert_eq!(word_of(|a| a.emit_fadd_q(Fa0, Fa1, Fa2, RMode::Dyn)), 0x06C5F553);
        assert_eq!(word_of(|a| a.emit_fsub_q(Fa0, Fa1, Fa2, RMode::Dyn)), 0x0EC5F553);
        assert_eq!(word_of(|a| a.emit_fmul_q(Fa0, Fa1, Fa2, RMode::Dyn)), 0x16C5F553);
        assert_eq!(word_of(|a| a.emit_fdiv_q(Fa0, Fa1, Fa2, RMode::Dyn)), 0x1EC5F553);
        assert_eq!(word_of(|a| a.emit_fsqrt_q(Fa0, Fa1, RMode::Dyn)), 0x5E05F553);
    }

    #[test]
    fn comparisons_and_classify() {
        assert_eq!(word_of(|a| a.emit_feq_q(Gpr::A0, Fa0, Fa1)), 0xA6B52553);
        assert_eq!(word_of(|a| a.emit_flt_q(Gpr::A0, Fa0, Fa1)), 0xA6B51553);
        assert_eq!(word_of(|a| a.emit_fle_q(Gpr::A0, Fa0, Fa1)), 0xA6B50553);
        assert_eq!(word_of(|a| a.emit_fclass_q(Gpr::A0, Fa0)), 0xE6051553);
    }

    #[test]
    fn precision_conversions() {
        assert_eq!(word_of(|a| a.emit_fcvt_q_s(Fa0, Fa1, RMode::Rne)), 0x46058553);
        assert_eq!(word_of(|a| a.emit_fcvt_s_q(Fa0, Fa1, RMode::Dyn)), 0x4035F553);
        assert_eq!(word_of(|a| a.emit_fcvt_q_d(Fa0, Fa1, RMode::Rne)), 0x46158553);
        assert_eq!(word_of(|a| a.emit_fcvt_d_q(Fa0, Fa1, RMode::Dyn)), 0x4235F553);
    }

    #[test]
    fn integer_conversions() {
        let w = word_of(|a| a.emit_fcvt_w_q(Gpr::A0, Fa0, RMode::Dyn));
        assert_eq!(w, 0xC6057553);
        assert_eq!(word_of(|a| a.emit_fcvt_lu_q(Gpr::A0, Fa0, RMode::Dyn)), w | 3 << 20);
        assert_eq!(word_of(|a| a.emit_fcvt_q_w(Fa0, Gpr::A0, RMode::Rne)), 0xD6050553);
    }

    #[test]
    fn memory() {
        assert_eq!(word_of(|a| a.emit_flq(Fa0, Gpr::A0, 0)), 0x00054507);
        assert_eq!(word_of(|a| a.emit_fsq(Fa0, Gpr::A0, 0)), 0x00A54027);
    }

    #[test]
    fn fused_multiply_add() {
        assert_eq!(
            word_of(|a| a.emit_fmadd_q(Fa0, Fa1, Fa2, Fa3, RMode::Dyn)),
            0x6EC5F543
        );
    }

    #[test]
    fn sign_injection_pseudos() {
        assert_eq!(word_of(|a| a.emit_fmv_q(Fa0, Fa1)), 0x26B58553);
        assert_eq!(
            word_of(|a| a.emit_fabs_q(Fa0, Fa1)),
            word_of(|a| a.emit_fsgnjx_q(Fa0, Fa1, Fa1))
        );
        assert_eq!(
            word_of(|a| a.emit_fneg_q(Fa0, Fa1)),
            word_of(|a| a.emit_fsgnjn_q(Fa0, Fa1, Fa1))
        );
    }
}
