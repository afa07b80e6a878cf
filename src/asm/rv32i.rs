//! RV32I base integer instructions and their ISA-defined pseudos

use crate::asm::asm::checked_disp;
use crate::asm::label::FixupKind;
use crate::asm::{Assembler, Label};
use crate::enc::base;
use crate::reg::Gpr;
use crate::util::misc::{expect_simm, expect_uimm};
use crate::util::opcode::{FenceOrder, Opcode};

impl Assembler<'_> {
    r_type_ops! {
        Opcode::Op.as_u32();

        /// ADD: rd = rs1 + rs2.
        add  => (0x0, 0x00),
        /// SUB: rd = rs1 - rs2.
        sub  => (0x0, 0x20),
        /// SLL: logical left shift by the low five bits of rs2.
        sll  => (0x1, 0x00),
        /// SLT: signed set-less-than.
        slt  => (0x2, 0x00),
        /// SLTU: unsigned set-less-than.
        sltu => (0x3, 0x00),
        /// XOR: bitwise exclusive or.
        xor  => (0x4, 0x00),
        /// SRL: logical right shift by the low five bits of rs2.
        srl  => (0x5, 0x00),
        /// SRA: arithmetic right shift by the low five bits of rs2.
        sra  => (0x5, 0x20),
        /// OR: bitwise or.
        or   => (0x6, 0x00),
        /// AND: bitwise and.
        and  => (0x7, 0x00),
    }

    /// ADDI: rd = rs1 + sign-extended 12-bit immediate.
    ///
    /// # Example
    ///
    /// ```
    /// use mortar::Assembler;
    /// use mortar::reg::Gpr::*;
    ///
    /// let mut asm = Assembler::new(4);
    /// asm.emit_addi(A0, Zero, 42);
    /// assert_eq!(asm.word32_at(0), 0x02A00513);
    /// ```
    #[track_caller]
    #[inline(always)]
    pub fn emit_addi(&mut self, rd: Gpr, rs1: Gpr, imm: i32) {
        self.emit_op_imm(rd, 0x0, rs1, imm);
    }

    /// SLTI: signed set-less-than against an immediate.
    #[track_caller]
    #[inline(always)]
    pub fn emit_slti(&mut self, rd: Gpr, rs1: Gpr, imm: i32) {
        self.emit_op_imm(rd, 0x2, rs1, imm);
    }

    /// SLTIU: unsigned set-less-than against a sign-extended immediate.
    #[track_caller]
    #[inline(always)]
    pub fn emit_sltiu(&mut self, rd: Gpr, rs1: Gpr, imm: i32) {
        self.emit_op_imm(rd, 0x3, rs1, imm);
    }

    /// XORI: bitwise exclusive or with a sign-extended immediate.
    #[track_caller]
    #[inline(always)]
    pub fn emit_xori(&mut self, rd: Gpr, rs1: Gpr, imm: i32) {
        self.emit_op_imm(rd, 0x4, rs1, imm);
    }

    /// ORI: bitwise or with a sign-extended immediate.
    #[track_caller]
    #[inline(always)]
    pub fn emit_ori(&mut self, rd: Gpr, rs1: Gpr, imm: i32) {
        self.emit_op_imm(rd, 0x6, rs1, imm);
    }

    /// ANDI: bitwise and with a sign-extended immediate.
    #[track_caller]
    #[inline(always)]
    pub fn emit_andi(&mut self, rd: Gpr, rs1: Gpr, imm: i32) {
        self.emit_op_imm(rd, 0x7, rs1, imm);
    }

    #[track_caller]
    #[inline(always)]
    fn emit_op_imm(&mut self, rd: Gpr, funct3: u32, rs1: Gpr, imm: i32) {
        self.emit32(base::i(
            Opcode::OpImm.as_u32(),
            rd.as_u32(),
            funct3,
            rs1.as_u32(),
            expect_simm(imm, 12),
        ));
    }

    /// SLLI: logical left shift by a 5-bit immediate (RV32 form; see
    /// [`Self::emit_slli64`] for the 6-bit RV64 shift amount).
    #[track_caller]
    #[inline(always)]
    pub fn emit_slli(&mut self, rd: Gpr, rs1: Gpr, shamt: u32) {
        self.emit_shift_imm(rd, 0x1, rs1, expect_uimm(shamt, 5), 0x00);
    }

    /// SRLI: logical right shift by a 5-bit immediate.
    #[track_caller]
    #[inline(always)]
    pub fn emit_srli(&mut self, rd: Gpr, rs1: Gpr, shamt: u32) {
        self.emit_shift_imm(rd, 0x5, rs1, expect_uimm(shamt, 5), 0x00);
    }

    /// SRAI: arithmetic right shift by a 5-bit immediate.
    #[track_caller]
    #[inline(always)]
    pub fn emit_srai(&mut self, rd: Gpr, rs1: Gpr, shamt: u32) {
        self.emit_shift_imm(rd, 0x5, rs1, expect_uimm(shamt, 5), 0x20);
    }

    #[inline(always)]
    pub(crate) fn emit_shift_imm(&mut self, rd: Gpr, funct3: u32, rs1: Gpr, shamt: u32, top: u32) {
        // shamt occupies the low immediate bits, top the remainder up to imm[11]
        self.emit32(base::i(
            Opcode::OpImm.as_u32(),
            rd.as_u32(),
            funct3,
            rs1.as_u32(),
            ((top << 5) | shamt) as i32,
        ));
    }

    /// LUI: load the 20-bit immediate into bits [31:12] of rd.
    #[track_caller]
    #[inline(always)]
    pub fn emit_lui(&mut self, rd: Gpr, imm: u32) {
        self.emit32(base::u(
            Opcode::Lui.as_u32(),
            rd.as_u32(),
            expect_uimm(imm, 20),
        ));
    }

    /// AUIPC: rd = pc + (20-bit immediate << 12).
    #[track_caller]
    #[inline(always)]
    pub fn emit_auipc(&mut self, rd: Gpr, imm: u32) {
        self.emit32(base::u(
            Opcode::Auipc.as_u32(),
            rd.as_u32(),
            expect_uimm(imm, 20),
        ));
    }

    // ----- LOADS / STORES -----

    /// LB: load a sign-extended byte from `offset(rs1)`.
    #[track_caller]
    #[inline(always)]
    pub fn emit_lb(&mut self, rd: Gpr, rs1: Gpr, offset: i32) {
        self.emit_load(rd, 0x0, rs1, offset);
    }

    /// LH: load a sign-extended halfword from `offset(rs1)`.
    #[track_caller]
    #[inline(always)]
    pub fn emit_lh(&mut self, rd: Gpr, rs1: Gpr, offset: i32) {
        self.emit_load(rd, 0x1, rs1, offset);
    }

    /// LW: load a word from `offset(rs1)`.
    #[track_caller]
    #[inline(always)]
    pub fn emit_lw(&mut self, rd: Gpr, rs1: Gpr, offset: i32) {
        self.emit_load(rd, 0x2, rs1, offset);
    }

    /// LBU: load a zero-extended byte from `offset(rs1)`.
    #[track_caller]
    #[inline(always)]
    pub fn emit_lbu(&mut self, rd: Gpr, rs1: Gpr, offset: i32) {
        self.emit_load(rd, 0x4, rs1, offset);
    }

    /// LHU: load a zero-extended halfword from `offset(rs1)`.
    #[track_caller]
    #[inline(always)]
    pub fn emit_lhu(&mut self, rd: Gpr, rs1: Gpr, offset: i32) {
        self.emit_load(rd, 0x5, rs1, offset);
    }

    #[track_caller]
    #[inline(always)]
    pub(crate) fn emit_load(&mut self, rd: Gpr, funct3: u32, rs1: Gpr, offset: i32) {
        self.emit32(base::i(
            Opcode::Load.as_u32(),
            rd.as_u32(),
            funct3,
            rs1.as_u32(),
            expect_simm(offset, 12),
        ));
    }

    /// SB: store the low byte of rs2 to `offset(rs1)`.
    #[track_caller]
    #[inline(always)]
    pub fn emit_sb(&mut self, rs2: Gpr, rs1: Gpr, offset: i32) {
        self.emit_store(0x0, rs1, rs2, offset);
    }

    /// SH: store the low halfword of rs2 to `offset(rs1)`.
    #[track_caller]
    #[inline(always)]
    pub fn emit_sh(&mut self, rs2: Gpr, rs1: Gpr, offset: i32) {
        self.emit_store(0x1, rs1, rs2, offset);
    }

    /// SW: store the low word of rs2 to `offset(rs1)`.
    #[track_caller]
    #[inline(always)]
    pub fn emit_sw(&mut self, rs2: Gpr, rs1: Gpr, offset: i32) {
        self.emit_store(0x2, rs1, rs2, offset);
    }

    #[track_caller]
    #[inline(always)]
    pub(crate) fn emit_store(&mut self, funct3: u32, rs1: Gpr, rs2: Gpr, offset: i32) {
        self.emit32(base::s(
            Opcode::Store.as_u32(),
            funct3,
            rs1.as_u32(),
            rs2.as_u32(),
            expect_simm(offset, 12),
        ));
    }

    // ----- BRANCHES -----

    b_type_ops! {
        /// BEQ: branch to `label` if rs1 == rs2.
        beq  => 0x0,
        /// BNE: branch to `label` if rs1 != rs2.
        bne  => 0x1,
        /// BLT: branch to `label` if rs1 < rs2 (signed).
        blt  => 0x4,
        /// BGE: branch to `label` if rs1 >= rs2 (signed).
        bge  => 0x5,
        /// BLTU: branch to `label` if rs1 < rs2 (unsigned).
        bltu => 0x6,
        /// BGEU: branch to `label` if rs1 >= rs2 (unsigned).
        bgeu => 0x7,
    }

    /// BEQZ: branch if rs == 0 (BEQ rs, x0).
    #[track_caller]
    #[inline(always)]
    pub fn emit_beqz(&mut self, rs: Gpr, label: &mut Label) {
        self.emit_beq(rs, Gpr::Zero, label);
    }

    /// Displacement form of [`Self::emit_beqz`].
    #[track_caller]
    #[inline(always)]
    pub fn emit_beqz_imm(&mut self, rs: Gpr, imm: i32) {
        self.emit_beq_imm(rs, Gpr::Zero, imm);
    }

    /// BNEZ: branch if rs != 0 (BNE rs, x0).
    #[track_caller]
    #[inline(always)]
    pub fn emit_bnez(&mut self, rs: Gpr, label: &mut Label) {
        self.emit_bne(rs, Gpr::Zero, label);
    }

    /// Displacement form of [`Self::emit_bnez`].
    #[track_caller]
    #[inline(always)]
    pub fn emit_bnez_imm(&mut self, rs: Gpr, imm: i32) {
        self.emit_bne_imm(rs, Gpr::Zero, imm);
    }

    /// BLEZ: branch if rs <= 0 (BGE x0, rs).
    #[track_caller]
    #[inline(always)]
    pub fn emit_blez(&mut self, rs: Gpr, label: &mut Label) {
        self.emit_bge(Gpr::Zero, rs, label);
    }

    /// Displacement form of [`Self::emit_blez`].
    #[track_caller]
    #[inline(always)]
    pub fn emit_blez_imm(&mut self, rs: Gpr, imm: i32) {
        self.emit_bge_imm(Gpr::Zero, rs, imm);
    }

    /// BGEZ: branch if rs >= 0 (BGE rs, x0).
    #[track_caller]
    #[inline(always)]
    pub fn emit_bgez(&mut self, rs: Gpr, label: &mut Label) {
        self.emit_bge(rs, Gpr::Zero, label);
    }

    /// Displacement form of [`Self::emit_bgez`].
    #[track_caller]
    #[inline(always)]
    pub fn emit_bgez_imm(&mut self, rs: Gpr, imm: i32) {
        self.emit_bge_imm(rs, Gpr::Zero, imm);
    }

    /// BLTZ: branch if rs < 0 (BLT rs, x0).
    #[track_caller]
    #[inline(always)]
    pub fn emit_bltz(&mut self, rs: Gpr, label: &mut Label) {
        self.emit_blt(rs, Gpr::Zero, label);
    }

    /// Displacement form of [`Self::emit_bltz`].
    #[track_caller]
    #[inline(always)]
    pub fn emit_bltz_imm(&mut self, rs: Gpr, imm: i32) {
        self.emit_blt_imm(rs, Gpr::Zero, imm);
    }

    /// BGTZ: branch if rs > 0 (BLT x0, rs).
    #[track_caller]
    #[inline(always)]
    pub fn emit_bgtz(&mut self, rs: Gpr, label: &mut Label) {
        self.emit_blt(Gpr::Zero, rs, label);
    }

    /// Displacement form of [`Self::emit_bgtz`].
    #[track_caller]
    #[inline(always)]
    pub fn emit_bgtz_imm(&mut self, rs: Gpr, imm: i32) {
        self.emit_blt_imm(Gpr::Zero, rs, imm);
    }

    /// BGT: branch if rs > rt, signed (BLT with swapped operands).
    #[track_caller]
    #[inline(always)]
    pub fn emit_bgt(&mut self, rs: Gpr, rt: Gpr, label: &mut Label) {
        self.emit_blt(rt, rs, label);
    }

    /// Displacement form of [`Self::emit_bgt`].
    #[track_caller]
    #[inline(always)]
    pub fn emit_bgt_imm(&mut self, rs: Gpr, rt: Gpr, imm: i32) {
        self.emit_blt_imm(rt, rs, imm);
    }

    /// BLE: branch if rs <= rt, signed (BGE with swapped operands).
    #[track_caller]
    #[inline(always)]
    pub fn emit_ble(&mut self, rs: Gpr, rt: Gpr, label: &mut Label) {
        self.emit_bge(rt, rs, label);
    }

    /// Displacement form of [`Self::emit_ble`].
    #[track_caller]
    #[inline(always)]
    pub fn emit_ble_imm(&mut self, rs: Gpr, rt: Gpr, imm: i32) {
        self.emit_bge_imm(rt, rs, imm);
    }

    /// BGTU: branch if rs > rt, unsigned (BLTU with swapped operands).
    #[track_caller]
    #[inline(always)]
    pub fn emit_bgtu(&mut self, rs: Gpr, rt: Gpr, label: &mut Label) {
        self.emit_bltu(rt, rs, label);
    }

    /// Displacement form of [`Self::emit_bgtu`].
    #[track_caller]
    #[inline(always)]
    pub fn emit_bgtu_imm(&mut self, rs: Gpr, rt: Gpr, imm: i32) {
        self.emit_bltu_imm(rt, rs, imm);
    }

    /// BLEU: branch if rs <= rt, unsigned (BGEU with swapped operands).
    #[track_caller]
    #[inline(always)]
    pub fn emit_bleu(&mut self, rs: Gpr, rt: Gpr, label: &mut Label) {
        self.emit_bgeu(rt, rs, label);
    }

    /// Displacement form of [`Self::emit_bleu`].
    #[track_caller]
    #[inline(always)]
    pub fn emit_bleu_imm(&mut self, rs: Gpr, rt: Gpr, imm: i32) {
        self.emit_bgeu_imm(rt, rs, imm);
    }

    // ----- JUMPS -----

    /// JAL: jump to `label`, writing the return address into rd.
    #[track_caller]
    #[inline(always)]
    pub fn emit_jal(&mut self, rd: Gpr, label: &mut Label) {
        let disp = self.link(label, FixupKind::Jump);
        self.emit32(base::j(Opcode::Jal.as_u32(), rd.as_u32(), disp));
    }

    /// Displacement form of [`Self::emit_jal`].
    #[track_caller]
    #[inline(always)]
    pub fn emit_jal_imm(&mut self, rd: Gpr, imm: i32) {
        let disp = checked_disp(FixupKind::Jump, imm as i64);
        self.emit32(base::j(Opcode::Jal.as_u32(), rd.as_u32(), disp));
    }

    /// J: jump to `label` without linking (JAL x0).
    #[track_caller]
    #[inline(always)]
    pub fn emit_j(&mut self, label: &mut Label) {
        self.emit_jal(Gpr::Zero, label);
    }

    /// Displacement form of [`Self::emit_j`].
    #[track_caller]
    #[inline(always)]
    pub fn emit_j_imm(&mut self, imm: i32) {
        self.emit_jal_imm(Gpr::Zero, imm);
    }

    /// JAL to `label` linking through the return-address register
    /// (JAL x1).
    #[track_caller]
    #[inline(always)]
    pub fn emit_jal_ra(&mut self, label: &mut Label) {
        self.emit_jal(Gpr::Ra, label);
    }

    /// Displacement form of [`Self::emit_jal_ra`].
    #[track_caller]
    #[inline(always)]
    pub fn emit_jal_ra_imm(&mut self, imm: i32) {
        self.emit_jal_imm(Gpr::Ra, imm);
    }

    /// JALR: indirect jump to `rs1 + offset`, writing the return address
    /// into rd.
    #[track_caller]
    #[inline(always)]
    pub fn emit_jalr(&mut self, rd: Gpr, rs1: Gpr, offset: i32) {
        self.emit32(base::i(
            Opcode::Jalr.as_u32(),
            rd.as_u32(),
            0x0,
            rs1.as_u32(),
            expect_simm(offset, 12),
        ));
    }

    /// JR: indirect jump without linking (JALR x0, 0, rs).
    #[track_caller]
    #[inline(always)]
    pub fn emit_jr(&mut self, rs: Gpr) {
        self.emit_jalr(Gpr::Zero, rs, 0);
    }

    /// Indirect jump linking through the return-address register
    /// (JALR x1, 0, rs).
    #[track_caller]
    #[inline(always)]
    pub fn emit_jalr_ra(&mut self, rs: Gpr) {
        self.emit_jalr(Gpr::Ra, rs, 0);
    }

    /// RET: return from a function (JALR x0, 0, x1).
    #[track_caller]
    #[inline(always)]
    pub fn emit_ret(&mut self) {
        self.emit_jalr(Gpr::Zero, Gpr::Ra, 0);
    }

    // ----- SYSTEM -----

    /// ECALL: environment call.
    #[inline(always)]
    pub fn emit_ecall(&mut self) {
        self.emit32(base::i(Opcode::System.as_u32(), 0, 0x0, 0, 0));
    }

    /// EBREAK: environment breakpoint.
    #[inline(always)]
    pub fn emit_ebreak(&mut self) {
        self.emit32(base::i(Opcode::System.as_u32(), 0, 0x0, 0, 1));
    }

    // ----- FENCES -----

    /// FENCE: order the predecessor set against the successor set.
    /// Pass `FenceOrder::IORW` on both sides for a full fence.
    ///
    /// # Example
    ///
    /// ```
    /// use mortar::Assembler;
    /// use mortar::util::opcode::FenceOrder;
    ///
    /// let mut asm = Assembler::new(4);
    /// asm.emit_fence(FenceOrder::IORW, FenceOrder::IORW);
    /// assert_eq!(asm.word32_at(0), 0x0FF0000F);
    /// ```
    #[inline(always)]
    pub fn emit_fence(&mut self, pred: FenceOrder, succ: FenceOrder) {
        self.emit32(base::fence(0b0000, pred, succ, 0, 0));
    }

    /// FENCE.TSO: fm=1000 with an RW→RW ordering.
    #[inline(always)]
    pub fn emit_fence_tso(&mut self) {
        self.emit32(base::fence(0b1000, FenceOrder::RW, FenceOrder::RW, 0, 0));
    }

    /// FENCE.I: synchronize the instruction stream with prior stores
    /// (Zifencei).
    #[inline(always)]
    pub fn emit_fence_i(&mut self) {
        self.emit32(base::i(Opcode::MiscMem.as_u32(), 0, 0x1, 0, 0));
    }

    /// PAUSE: spin-wait hint (Zihintpause); a FENCE with pred=W and an
    /// empty successor set.
    #[inline(always)]
    pub fn emit_pause(&mut self) {
        self.emit32(base::fence(0b0000, FenceOrder::W, FenceOrder::NONE, 0, 0));
    }

    // ----- INTEGER PSEUDOS -----

    /// NOP: no operation (ADDI x0, x0, 0).
    #[inline(always)]
    pub fn emit_nop(&mut self) {
        self.emit_addi(Gpr::Zero, Gpr::Zero, 0);
    }

    /// MV: copy rs into rd (ADDI rd, rs, 0).
    #[inline(always)]
    pub fn emit_mv(&mut self, rd: Gpr, rs: Gpr) {
        self.emit_addi(rd, rs, 0);
    }

    /// NEG: rd = -rs (SUB rd, x0, rs).
    #[inline(always)]
    pub fn emit_neg(&mut self, rd: Gpr, rs: Gpr) {
        self.emit_sub(rd, Gpr::Zero, rs);
    }

    /// NOT: rd = !rs (XORI rd, rs, -1).
    #[inline(always)]
    pub fn emit_not(&mut self, rd: Gpr, rs: Gpr) {
        self.emit_xori(rd, rs, -1);
    }

    /// SEQZ: rd = (rs == 0) (SLTIU rd, rs, 1).
    #[inline(always)]
    pub fn emit_seqz(&mut self, rd: Gpr, rs: Gpr) {
        self.emit_sltiu(rd, rs, 1);
    }

    /// SNEZ: rd = (rs != 0) (SLTU rd, x0, rs).
    #[inline(always)]
    pub fn emit_snez(&mut self, rd: Gpr, rs: Gpr) {
        self.emit_sltu(rd, Gpr::Zero, rs);
    }

    /// SLTZ: rd = (rs < 0) (SLT rd, rs, x0).
    #[inline(always)]
    pub fn emit_sltz(&mut self, rd: Gpr, rs: Gpr) {
        self.emit_slt(rd, rs, Gpr::Zero);
    }

    /// SGTZ: rd = (rs > 0) (SLT rd, x0, rs).
    #[inline(always)]
    pub fn emit_sgtz(&mut self, rd: Gpr, rs: Gpr) {
        self.emit_slt(rd, Gpr::Zero, rs);
    }
}

#[cfg(test)]
mod tests {
    use crate::asm::Assembler;
    use crate::reg::Gpr::*;

    fn word_of(f: impl FnOnce(&mut Assembler<'static>)) -> u32 {
        let mut asm = Assembler::new(4);
        f(&mut asm);
        assert_eq!(asm.cursor(), 4, "base instructions advance by 4");
        asm.word32_at(0)
    }

    #[test]
    fn register_register_ops() {
        assert_eq!(word_of(|a| a.emit_add(A0, A1, A2)), 0x00C58533);
        assert_eq!(word_of(|a| a.emit_sub(A0, A1, A2)), 0x40C58533);
        assert_eq!(word_of(|a| a.emit_xor(A0, A1, A2)), 0x00C5C533);
        assert_eq!(word_of(|a| a.emit_or(A0, A1, A2)), 0x00C5E533);
        assert_eq!(word_of(|a| a.emit_and(A0, A1, A2)), 0x00C5F533);
        assert_eq!(word_of(|a| a.emit_sll(A0, A1, A2)), 0x00C59533);
        assert_eq!(word_of(|a| a.emit_srl(A0, A1, A2)), 0x00C5D533);
        assert_eq!(word_of(|a| a.emit_sra(A0, A1, A2)), 0x40C5D533);
        assert_eq!(word_of(|a| a.emit_slt(A0, A1, A2)), 0x00C5A533);
        assert_eq!(word_of(|a| a.emit_sltu(A0, A1, A2)), 0x00C5B533);
    }

    #[test]
    fn immediate_ops() {
        assert_eq!(word_of(|a| a.emit_addi(A0, Zero, 42)), 0x02A00513);
        assert_eq!(word_of(|a| a.emit_addi(A0, A0, -1)), 0xFFF50513);
        assert_eq!(word_of(|a| a.emit_andi(A0, A1, 0xFF)), 0x0FF5F513);
        assert_eq!(word_of(|a| a.emit_xori(A0, A1, -1)), 0xFFF5C513);
        assert_eq!(word_of(|a| a.emit_slli(A0, A1, 4)), 0x00459513);
        assert_eq!(word_of(|a| a.emit_srli(A0, A1, 4)), 0x0045D513);
        assert_eq!(word_of(|a| a.emit_srai(A0, A1, 4)), 0x4045D513);
    }

    #[test]
    fn upper_immediates() {
        assert_eq!(word_of(|a| a.emit_lui(A1, 0x12)), 0x000125B7);
        assert_eq!(word_of(|a| a.emit_auipc(A0, 0)), 0x00000517);
    }

    #[test]
    fn loads_and_stores() {
        assert_eq!(word_of(|a| a.emit_lw(A0, Sp, 0)), 0x00012503);
        assert_eq!(word_of(|a| a.emit_lb(A0, A1, -1)), 0xFFF58503);
        assert_eq!(word_of(|a| a.emit_lbu(A0, A1, 1)), 0x0015C503);
        assert_eq!(word_of(|a| a.emit_lh(A0, A1, 2)), 0x00259503);
        assert_eq!(word_of(|a| a.emit_lhu(A0, A1, 2)), 0x0025D503);
        assert_eq!(word_of(|a| a.emit_sw(A0, Sp, 0)), 0x00A12023);
        assert_eq!(word_of(|a| a.emit_sb(A0, A1, 3)), 0x00A581A3);
        assert_eq!(word_of(|a| a.emit_sh(A0, A1, -2)), 0xFEA59F23);
    }

    #[test]
    fn branches_with_literal_displacement() {
        assert_eq!(word_of(|a| a.emit_beq_imm(Ra, Sp, 12)), 0x00208663);
        assert_eq!(word_of(|a| a.emit_beq_imm(Ra, Sp, -4)), 0xFE208EE3);
        assert_eq!(word_of(|a| a.emit_bne_imm(Ra, Sp, 12)), 0x00209663);
        assert_eq!(word_of(|a| a.emit_blt_imm(Ra, Sp, 12)), 0x0020C663);
        assert_eq!(word_of(|a| a.emit_bge_imm(Ra, Sp, 12)), 0x0020D663);
        assert_eq!(word_of(|a| a.emit_bltu_imm(Ra, Sp, 12)), 0x0020E663);
        assert_eq!(word_of(|a| a.emit_bgeu_imm(Ra, Sp, 12)), 0x0020F663);
    }

    #[test]
    fn branch_pseudos_swap_or_zero_operands() {
        assert_eq!(
            word_of(|a| a.emit_beqz_imm(A0, 8)),
            word_of(|a| a.emit_beq_imm(A0, Zero, 8))
        );
        assert_eq!(
            word_of(|a| a.emit_blez_imm(A0, 8)),
            word_of(|a| a.emit_bge_imm(Zero, A0, 8))
        );
        assert_eq!(
            word_of(|a| a.emit_bgt_imm(A0, A1, 8)),
            word_of(|a| a.emit_blt_imm(A1, A0, 8))
        );
        assert_eq!(
            word_of(|a| a.emit_bleu_imm(A0, A1, 8)),
            word_of(|a| a.emit_bgeu_imm(A1, A0, 8))
        );
    }

    #[test]
    fn jumps() {
        assert_eq!(word_of(|a| a.emit_jal_imm(Zero, 8)), 0x0080006F);
        assert_eq!(word_of(|a| a.emit_j_imm(8)), 0x0080006F);
        assert_eq!(word_of(|a| a.emit_jal_ra_imm(8)), 0x008000EF);
        assert_eq!(word_of(|a| a.emit_jalr(Zero, Ra, 0)), 0x00008067);
        assert_eq!(word_of(|a| a.emit_ret()), 0x00008067);
        assert_eq!(word_of(|a| a.emit_jr(A0)), 0x00050067);
        assert_eq!(word_of(|a| a.emit_jalr_ra(A0)), 0x000500E7);
    }

    #[test]
    fn system_and_fences() {
        assert_eq!(word_of(|a| a.emit_ecall()), 0x00000073);
        assert_eq!(word_of(|a| a.emit_ebreak()), 0x00100073);
        assert_eq!(word_of(|a| a.emit_fence_tso()), 0x8330000F);
        assert_eq!(word_of(|a| a.emit_fence_i()), 0x0000100F);
        assert_eq!(word_of(|a| a.emit_pause()), 0x0100000F);
    }

    #[test]
    fn integer_pseudos_match_canonical_expansions() {
        assert_eq!(word_of(|a| a.emit_nop()), 0x00000013);
        assert_eq!(
            word_of(|a| a.emit_mv(A0, A1)),
            word_of(|a| a.emit_addi(A0, A1, 0))
        );
        assert_eq!(
            word_of(|a| a.emit_neg(A0, A1)),
            word_of(|a| a.emit_sub(A0, Zero, A1))
        );
        assert_eq!(
            word_of(|a| a.emit_not(A0, A1)),
            word_of(|a| a.emit_xori(A0, A1, -1))
        );
        assert_eq!(
            word_of(|a| a.emit_seqz(A0, A1)),
            word_of(|a| a.emit_sltiu(A0, A1, 1))
        );
        assert_eq!(
            word_of(|a| a.emit_snez(A0, A1)),
            word_of(|a| a.emit_sltu(A0, Zero, A1))
        );
        assert_eq!(
            word_of(|a| a.emit_sltz(A0, A1)),
            word_of(|a| a.emit_slt(A0, A1, Zero))
        );
        assert_eq!(
            word_of(|a| a.emit_sgtz(A0, A1)),
            word_of(|a| a.emit_slt(A0, Zero, A1))
        );
    }

    #[test]
    #[should_panic(expected = "signed 12-bit")]
    fn addi_immediate_out_of_range() {
        let mut asm = Assembler::new(4);
        asm.emit_addi(A0, A0, 2048);
    }

    #[test]
    #[should_panic(expected = "unsigned 5-bit")]
    fn slli_shamt_out_of_range() {
        let mut asm = Assembler::new(4);
        asm.emit_slli(A0, A0, 32);
    }
}
