//! D extension: double-precision floating point

use crate::asm::rvf::FMT_D;
use crate::asm::Assembler;
use crate::enc::base;
use crate::reg::{Fpr, Gpr};
use crate::util::misc::expect_simm;
use crate::util::opcode::{Opcode, RMode};

impl Assembler<'_> {
    /// FADD.D: rd = rs1 + rs2.
    #[inline(always)]
    pub fn emit_fadd_d(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr, rm: RMode) {
        self.emit_fp_op(0x01, rd.as_u32(), rm.as_u32(), rs1.as_u32(), rs2.as_u32());
    }

    /// FSUB.D: rd = rs1 - rs2.
    #[inline(always)]
    pub fn emit_fsub_d(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr, rm: RMode) {
        self.emit_fp_op(0x05, rd.as_u32(), rm.as_u32(), rs1.as_u32(), rs2.as_u32());
    }

    /// FMUL.D: rd = rs1 * rs2.
    #[inline(always)]
    pub fn emit_fmul_d(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr, rm: RMode) {
        self.emit_fp_op(0x09, rd.as_u32(), rm.as_u32(), rs1.as_u32(), rs2.as_u32());
    }

    /// FDIV.D: rd = rs1 / rs2.
    #[inline(always)]
    pub fn emit_fdiv_d(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr, rm: RMode) {
        self.emit_fp_op(0x0D, rd.as_u32(), rm.as_u32(), rs1.as_u32(), rs2.as_u32());
    }

    /// FSQRT.D: rd = sqrt(rs1).
    #[inline(always)]
    pub fn emit_fsqrt_d(&mut self, rd: Fpr, rs1: Fpr, rm: RMode) {
        self.emit_fp_op(0x2D, rd.as_u32(), rm.as_u32(), rs1.as_u32(), 0);
    }

    /// FMIN.D: rd = min(rs1, rs2).
    #[inline(always)]
    pub fn emit_fmin_d(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr) {
        self.emit_fp_op(0x15, rd.as_u32(), 0x0, rs1.as_u32(), rs2.as_u32());
    }

    /// FMAX.D: rd = max(rs1, rs2).
    #[inline(always)]
    pub fn emit_fmax_d(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr) {
        self.emit_fp_op(0x15, rd.as_u32(), 0x1, rs1.as_u32(), rs2.as_u32());
    }

    /// FSGNJ.D: rd = rs1 with the sign of rs2.
    #[inline(always)]
    pub fn emit_fsgnj_d(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr) {
        self.emit_fp_op(0x11, rd.as_u32(), 0x0, rs1.as_u32(), rs2.as_u32());
    }

    /// FSGNJN.D: rd = rs1 with the negated sign of rs2.
    #[inline(always)]
    pub fn emit_fsgnjn_d(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr) {
        self.emit_fp_op(0x11, rd.as_u32(), 0x1, rs1.as_u32(), rs2.as_u32());
    }

    /// FSGNJX.D: rd = rs1 with its sign xored with rs2's.
    #[inline(always)]
    pub fn emit_fsgnjx_d(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr) {
        self.emit_fp_op(0x11, rd.as_u32(), 0x2, rs1.as_u32(), rs2.as_u32());
    }

    /// FLE.D: rd = (rs1 <= rs2).
    #[inline(always)]
    pub fn emit_fle_d(&mut self, rd: Gpr, rs1: Fpr, rs2: Fpr) {
        self.emit_fp_op(0x51, rd.as_u32(), 0x0, rs1.as_u32(), rs2.as_u32());
    }

    /// FLT.D: rd = (rs1 < rs2).
    #[inline(always)]
    pub fn emit_flt_d(&mut self, rd: Gpr, rs1: Fpr, rs2: Fpr) {
        self.emit_fp_op(0x51, rd.as_u32(), 0x1, rs1.as_u32(), rs2.as_u32());
    }

    /// FEQ.D: rd = (rs1 == rs2).
    #[inline(always)]
    pub fn emit_feq_d(&mut self, rd: Gpr, rs1: Fpr, rs2: Fpr) {
        self.emit_fp_op(0x51, rd.as_u32(), 0x2, rs1.as_u32(), rs2.as_u32());
    }

    /// FCLASS.D: classify rs1 into a ten-bit mask in rd.
    #[inline(always)]
    pub fn emit_fclass_d(&mut self, rd: Gpr, rs1: Fpr) {
        self.emit_fp_op(0x71, rd.as_u32(), 0x1, rs1.as_u32(), 0);
    }

    /// FCVT.W.D: convert to a signed 32-bit integer.
    #[inline(always)]
    pub fn emit_fcvt_w_d(&mut self, rd: Gpr, rs1: Fpr, rm: RMode) {
        self.emit_fp_op(0x61, rd.as_u32(), rm.as_u32(), rs1.as_u32(), 0);
    }

    /// FCVT.WU.D: convert to an unsigned 32-bit integer.
    #[inline(always)]
    pub fn emit_fcvt_wu_d(&mut self, rd: Gpr, rs1: Fpr, rm: RMode) {
        self.emit_fp_op(0x61, rd.as_u32(), rm.as_u32(), rs1.as_u32(), 1);
    }

    /// FCVT.L.D: convert to a signed 64-bit integer (RV64D).
    #[inline(always)]
    pub fn emit_fcvt_l_d(&mut self, rd: Gpr, rs1: Fpr, rm: RMode) {
        self.emit_fp_op(0x61, rd.as_u32(), rm.as_u32(), rs1.as_u32(), 2);
    }

    /// FCVT.LU.D: convert to an unsigned 64-bit integer (RV64D).
    #[inline(always)]
    pub fn emit_fcvt_lu_d(&mut self, rd: Gpr, rs1: Fpr, rm: RMode) {
        self.emit_fp_op(0x61, rd.as_u32(), rm.as_u32(), rs1.as_u32(), 3);
    }

    /// FCVT.D.W: convert from a signed 32-bit integer.
    #[inline(always)]
    pub fn emit_fcvt_d_w(&mut self, rd: Fpr, rs1: Gpr, rm: RMode) {
        self.emit_fp_op(0x69, rd.as_u32(), rm.as_u32(), rs1.as_u32(), 0);
    }

    /// FCVT.D.WU: convert from an unsigned 32-bit integer.
    #[inline(always)]
    pub fn emit_fcvt_d_wu(&mut self, rd: Fpr, rs1: Gpr, rm: RMode) {
        self.emit_fp_op(0x69, rd.as_u32(), rm.as_u32(), rs1.as_u32(), 1);
    }

    /// FCVT.D.L: convert from a signed 64-bit integer (RV64D).
    #[inline(always)]
    pub fn emit_fcvt_d_l(&mut self, rd: Fpr, rs1: Gpr, rm: RMode) {
        self.emit_fp_op(0x69, rd.as_u32(), rm.as_u32(), rs1.as_u32(), 2);
    }

    /// FCVT.D.LU: convert from an unsigned 64-bit integer (RV64D).
    #[inline(always)]
    pub fn emit_fcvt_d_lu(&mut self, rd: Fpr, rs1: Gpr, rm: RMode) {
        self.emit_fp_op(0x69, rd.as_u32(), rm.as_u32(), rs1.as_u32(), 3);
    }

    /// FCVT.D.S: widen a single to a double.
    #[inline(always)]
    pub fn emit_fcvt_d_s(&mut self, rd: Fpr, rs1: Fpr, rm: RMode) {
        self.emit_fp_op(0x21, rd.as_u32(), rm.as_u32(), rs1.as_u32(), 0);
    }

    /// FCVT.S.D: narrow a double to a single.
    #[inline(always)]
    pub fn emit_fcvt_s_d(&mut self, rd: Fpr, rs1: Fpr, rm: RMode) {
        self.emit_fp_op(0x20, rd.as_u32(), rm.as_u32(), rs1.as_u32(), 1);
    }

    /// FMV.X.D: move the raw bits of rs1 into an integer register
    /// (RV64D).
    #[inline(always)]
    pub fn emit_fmv_x_d(&mut self, rd: Gpr, rs1: Fpr) {
        self.emit_fp_op(0x71, rd.as_u32(), 0x0, rs1.as_u32(), 0);
    }

    /// FMV.D.X: move the raw bits of an integer register into rd
    /// (RV64D).
    #[inline(always)]
    pub fn emit_fmv_d_x(&mut self, rd: Fpr, rs1: Gpr) {
        self.emit_fp_op(0x79, rd.as_u32(), 0x0, rs1.as_u32(), 0);
    }

    /// FLD: load a double from `offset(rs1)`.
    #[track_caller]
    #[inline(always)]
    pub fn emit_fld(&mut self, rd: Fpr, rs1: Gpr, offset: i32) {
        self.emit32(base::i(
            Opcode::LoadFp.as_u32(),
            rd.as_u32(),
            0x3,
            rs1.as_u32(),
            expect_simm(offset, 12),
        ));
    }

    /// FSD: store rs2 as a double to `offset(rs1)`.
    #[track_caller]
    #[inline(always)]
    pub fn emit_fsd(&mut self, rs2: Fpr, rs1: Gpr, offset: i32) {
        self.emit32(base::s(
            Opcode::StoreFp.as_u32(),
            0x3,
            rs1.as_u32(),
            rs2.as_u32(),
            expect_simm(offset, 12),
        ));
    }

    /// FMADD.D: rd = rs1 * rs2 + rs3.
    #[inline(always)]
    pub fn emit_fmadd_d(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr, rs3: Fpr, rm: RMode) {
        self.emit_fp_r4(Opcode::Madd, FMT_D, rd, rs1, rs2, rs3, rm);
    }

    /// FMSUB.D: rd = rs1 * rs2 - rs3.
    #[inline(always)]
    pub fn emit_fmsub_d(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr, rs3: Fpr, rm: RMode) {
        self.emit_fp_r4(Opcode::Msub, FMT_D, rd, rs1, rs2, rs3, rm);
    }

    /// FNMSUB.D: rd = -(rs1 * rs2) + rs3.
    #[inline(always)]
    pub fn emit_fnmsub_d(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr, rs3: Fpr, rm: RMode) {
        self.emit_fp_r4(Opcode::Nmsub, FMT_D, rd, rs1, rs2, rs3, rm);
    }

    /// FNMADD.D: rd = -(rs1 * rs2) - rs3.
    #[inline(always)]
    pub fn emit_fnmadd_d(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr, rs3: Fpr, rm: RMode) {
        self.emit_fp_r4(Opcode::Nmadd, FMT_D, rd, rs1, rs2, rs3, rm);
    }

    /// FMV.D: copy rs into rd (FSGNJ.D rd, rs, rs).
    #[inline(always)]
    pub fn emit_fmv_d(&mut self, rd: Fpr, rs: Fpr) {
        self.emit_fsgnj_d(rd, rs, rs);
    }

    /// FABS.D: rd = |rs| (FSGNJX.D rd, rs, rs).
    #[inline(always)]
    pub fn emit_fabs_d(&mut self, rd: Fpr, rs: Fpr) {
        self.emit_fsgnjx_d(rd, rs, rs);
    }

    /// FNEG.D: rd = -rs (FSGNJN.D rd, rs, rs).
    #[inline(always)]
    pub fn emit_fneg_d(&mut self, rd: Fpr, rs: Fpr) {
        self.emit_fsgnjn_d(rd, rs, rs);
    }
}
