//! F extension: single-precision floating point
//!
//! The OP-FP funct7 encodes the operation in its upper five bits and the
//! precision in its low two (S = 00, D = 01, Q = 11); the D and Q
//! modules reuse the helpers here with their own format bits.

use crate::asm::Assembler;
use crate::enc::base;
use crate::reg::{Fpr, Gpr};
use crate::util::misc::expect_simm;
use crate::util::opcode::{Opcode, RMode};

/// Precision field of the OP-FP funct7 and the R4 funct2.
pub(crate) const FMT_S: u32 = 0b00;
pub(crate) const FMT_D: u32 = 0b01;
pub(crate) const FMT_Q: u32 = 0b11;

impl Assembler<'_> {
    /// OP-FP R-type with an arbitrary funct3 slot (rounding mode or
    /// sub-operation selector). Register indices arrive raw because the
    /// slot meaning (GPR or FPR) varies per mnemonic.
    #[inline(always)]
    pub(crate) fn emit_fp_op(&mut self, funct7: u32, rd: u32, funct3: u32, rs1: u32, rs2: u32) {
        self.emit32(base::r(Opcode::OpFp.as_u32(), rd, funct3, rs1, rs2, funct7));
    }

    #[inline(always)]
    pub(crate) fn emit_fp_r4(
        &mut self,
        opcode: Opcode,
        fmt: u32,
        rd: Fpr,
        rs1: Fpr,
        rs2: Fpr,
        rs3: Fpr,
        rm: RMode,
    ) {
        self.emit32(base::r4(
            opcode.as_u32(),
            rd.as_u32(),
            rm.as_u32(),
            rs1.as_u32(),
            rs2.as_u32(),
            fmt,
            rs3.as_u32(),
        ));
    }

    // ----- ARITHMETIC -----

    /// FADD.S: rd = rs1 + rs2.
    ///
    /// # Example
    ///
    /// ```
    /// use mortar::Assembler;
    /// use mortar::reg::Fpr::*;
    /// use mortar::util::opcode::RMode;
    ///
    /// let mut asm = Assembler::new(4);
    /// asm.emit_fadd_s(Fa0, Fa1, Fa2, RMode::Dyn);
    /// assert_eq!(asm.word32_at(0), 0x00C5F553);
    /// ```
    #[inline(always)]
    pub fn emit_fadd_s(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr, rm: RMode) {
        self.emit_fp_op(0x00, rd.as_u32(), rm.as_u32(), rs1.as_u32(), rs2.as_u32());
    }

    /// FSUB.S: rd = rs1 - rs2.
    #[inline(always)]
    pub fn emit_fsub_s(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr, rm: RMode) {
        self.emit_fp_op(0x04, rd.as_u32(), rm.as_u32(), rs1.as_u32(), rs2.as_u32());
    }

    /// FMUL.S: rd = rs1 * rs2.
    #[inline(always)]
    pub fn emit_fmul_s(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr, rm: RMode) {
        self.emit_fp_op(0x08, rd.as_u32(), rm.as_u32(), rs1.as_u32(), rs2.as_u32());
    }

    /// FDIV.S: rd = rs1 / rs2.
    #[inline(always)]
    pub fn emit_fdiv_s(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr, rm: RMode) {
        self.emit_fp_op(0x0C, rd.as_u32(), rm.as_u32(), rs1.as_u32(), rs2.as_u32());
    }

    /// FSQRT.S: rd = sqrt(rs1).
    #[inline(always)]
    pub fn emit_fsqrt_s(&mut self, rd: Fpr, rs1: Fpr, rm: RMode) {
        self.emit_fp_op(0x2C, rd.as_u32(), rm.as_u32(), rs1.as_u32(), 0);
    }

    /// FMIN.S: rd = min(rs1, rs2).
    #[inline(always)]
    pub fn emit_fmin_s(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr) {
        self.emit_fp_op(0x14, rd.as_u32(), 0x0, rs1.as_u32(), rs2.as_u32());
    }

    /// FMAX.S: rd = max(rs1, rs2).
    #[inline(always)]
    pub fn emit_fmax_s(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr) {
        self.emit_fp_op(0x14, rd.as_u32(), 0x1, rs1.as_u32(), rs2.as_u32());
    }

    // ----- SIGN INJECTION -----

    /// FSGNJ.S: rd = rs1 with the sign of rs2.
    #[inline(always)]
    pub fn emit_fsgnj_s(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr) {
        self.emit_fp_op(0x10, rd.as_u32(), 0x0, rs1.as_u32(), rs2.as_u32());
    }

    /// FSGNJN.S: rd = rs1 with the negated sign of rs2.
    #[inline(always)]
    pub fn emit_fsgnjn_s(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr) {
        self.emit_fp_op(0x10, rd.as_u32(), 0x1, rs1.as_u32(), rs2.as_u32());
    }

    /// FSGNJX.S: rd = rs1 with its sign xored with rs2's.
    #[inline(always)]
    pub fn emit_fsgnjx_s(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr) {
        self.emit_fp_op(0x10, rd.as_u32(), 0x2, rs1.as_u32(), rs2.as_u32());
    }

    // ----- COMPARISONS / CLASSIFICATION -----

    /// FLE.S: rd = (rs1 <= rs2).
    #[inline(always)]
    pub fn emit_fle_s(&mut self, rd: Gpr, rs1: Fpr, rs2: Fpr) {
        self.emit_fp_op(0x50, rd.as_u32(), 0x0, rs1.as_u32(), rs2.as_u32());
    }

    /// FLT.S: rd = (rs1 < rs2).
    #[inline(always)]
    pub fn emit_flt_s(&mut self, rd: Gpr, rs1: Fpr, rs2: Fpr) {
        self.emit_fp_op(0x50, rd.as_u32(), 0x1, rs1.as_u32(), rs2.as_u32());
    }

    /// FEQ.S: rd = (rs1 == rs2).
    #[inline(always)]
    pub fn emit_feq_s(&mut self, rd: Gpr, rs1: Fpr, rs2: Fpr) {
        self.emit_fp_op(0x50, rd.as_u32(), 0x2, rs1.as_u32(), rs2.as_u32());
    }

    /// FCLASS.S: classify rs1 into a ten-bit mask in rd.
    #[inline(always)]
    pub fn emit_fclass_s(&mut self, rd: Gpr, rs1: Fpr) {
        self.emit_fp_op(0x70, rd.as_u32(), 0x1, rs1.as_u32(), 0);
    }

    // ----- CONVERSIONS -----

    /// FCVT.W.S: convert to a signed 32-bit integer.
    #[inline(always)]
    pub fn emit_fcvt_w_s(&mut self, rd: Gpr, rs1: Fpr, rm: RMode) {
        self.emit_fp_op(0x60, rd.as_u32(), rm.as_u32(), rs1.as_u32(), 0);
    }

    /// FCVT.WU.S: convert to an unsigned 32-bit integer.
    #[inline(always)]
    pub fn emit_fcvt_wu_s(&mut self, rd: Gpr, rs1: Fpr, rm: RMode) {
        self.emit_fp_op(0x60, rd.as_u32(), rm.as_u32(), rs1.as_u32(), 1);
    }

    /// FCVT.L.S: convert to a signed 64-bit integer (RV64F).
    #[inline(always)]
    pub fn emit_fcvt_l_s(&mut self, rd: Gpr, rs1: Fpr, rm: RMode) {
        self.emit_fp_op(0x60, rd.as_u32(), rm.as_u32(), rs1.as_u32(), 2);
    }

    /// FCVT.LU.S: convert to an unsigned 64-bit integer (RV64F).
    #[inline(always)]
    pub fn emit_fcvt_lu_s(&mut self, rd: Gpr, rs1: Fpr, rm: RMode) {
        self.emit_fp_op(0x60, rd.as_u32(), rm.as_u32(), rs1.as_u32(), 3);
    }

    /// FCVT.S.W: convert from a signed 32-bit integer.
    #[inline(always)]
    pub fn emit_fcvt_s_w(&mut self, rd: Fpr, rs1: Gpr, rm: RMode) {
        self.emit_fp_op(0x68, rd.as_u32(), rm.as_u32(), rs1.as_u32(), 0);
    }

    /// FCVT.S.WU: convert from an unsigned 32-bit integer.
    #[inline(always)]
    pub fn emit_fcvt_s_wu(&mut self, rd: Fpr, rs1: Gpr, rm: RMode) {
        self.emit_fp_op(0x68, rd.as_u32(), rm.as_u32(), rs1.as_u32(), 1);
    }

    /// FCVT.S.L: convert from a signed 64-bit integer (RV64F).
    #[inline(always)]
    pub fn emit_fcvt_s_l(&mut self, rd: Fpr, rs1: Gpr, rm: RMode) {
        self.emit_fp_op(0x68, rd.as_u32(), rm.as_u32(), rs1.as_u32(), 2);
    }

    /// FCVT.S.LU: convert from an unsigned 64-bit integer (RV64F).
    #[inline(always)]
    pub fn emit_fcvt_s_lu(&mut self, rd: Fpr, rs1: Gpr, rm: RMode) {
        self.emit_fp_op(0x68, rd.as_u32(), rm.as_u32(), rs1.as_u32(), 3);
    }

    // ----- BIT MOVES -----

    /// FMV.X.W: move the raw bits of rs1 into an integer register.
    #[inline(always)]
    pub fn emit_fmv_x_w(&mut self, rd: Gpr, rs1: Fpr) {
        self.emit_fp_op(0x70, rd.as_u32(), 0x0, rs1.as_u32(), 0);
    }

    /// FMV.W.X: move the raw bits of an integer register into rd.
    #[inline(always)]
    pub fn emit_fmv_w_x(&mut self, rd: Fpr, rs1: Gpr) {
        self.emit_fp_op(0x78, rd.as_u32(), 0x0, rs1.as_u32(), 0);
    }

    // ----- MEMORY -----

    /// FLW: load a single from `offset(rs1)`.
    #[track_caller]
    #[inline(always)]
    pub fn emit_flw(&mut self, rd: Fpr, rs1: Gpr, offset: i32) {
        self.emit32(base::i(
            Opcode::LoadFp.as_u32(),
            rd.as_u32(),
            0x2,
            rs1.as_u32(),
            expect_simm(offset, 12),
        ));
    }

    /// FSW: store rs2 as a single to `offset(rs1)`.
    #[track_caller]
    #[inline(always)]
    pub fn emit_fsw(&mut self, rs2: Fpr, rs1: Gpr, offset: i32) {
        self.emit32(base::s(
            Opcode::StoreFp.as_u32(),
            0x2,
            rs1.as_u32(),
            rs2.as_u32(),
            expect_simm(offset, 12),
        ));
    }

    // ----- FUSED MULTIPLY-ADD -----

    /// FMADD.S: rd = rs1 * rs2 + rs3.
    #[inline(always)]
    pub fn emit_fmadd_s(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr, rs3: Fpr, rm: RMode) {
        self.emit_fp_r4(Opcode::Madd, FMT_S, rd, rs1, rs2, rs3, rm);
    }

    /// FMSUB.S: rd = rs1 * rs2 - rs3.
    #[inline(always)]
    pub fn emit_fmsub_s(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr, rs3: Fpr, rm: RMode) {
        self.emit_fp_r4(Opcode::Msub, FMT_S, rd, rs1, rs2, rs3, rm);
    }

    /// FNMSUB.S: rd = -(rs1 * rs2) + rs3.
    #[inline(always)]
    pub fn emit_fnmsub_s(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr, rs3: Fpr, rm: RMode) {
        self.emit_fp_r4(Opcode::Nmsub, FMT_S, rd, rs1, rs2, rs3, rm);
    }

    /// FNMADD.S: rd = -(rs1 * rs2) - rs3.
    #[inline(always)]
    pub fn emit_fnmadd_s(&mut self, rd: Fpr, rs1: Fpr, rs2: Fpr, rs3: Fpr, rm: RMode) {
        self.emit_fp_r4(Opcode::Nmadd, FMT_S, rd, rs1, rs2, rs3, rm);
    }

    // ----- PSEUDOS -----

    /// FMV.S: copy rs into rd (FSGNJ.S rd, rs, rs).
    #[inline(always)]
    pub fn emit_fmv_s(&mut self, rd: Fpr, rs: Fpr) {
        self.emit_fsgnj_s(rd, rs, rs);
    }

    /// FABS.S: rd = |rs| (FSGNJX.S rd, rs, rs).
    #[inline(always)]
    pub fn emit_fabs_s(&mut self, rd: Fpr, rs: Fpr) {
        self.emit_fsgnjx_s(rd, rs, rs);
    }

    /// FNEG.S: rd = -rs (FSGNJN.S rd, rs, rs).
    #[inline(always)]
    pub fn emit_fneg_s(&mut self, rd: Fpr, rs: Fpr) {
        self.emit_fsgnjn_s(rd, rs, rs);
    }
}
