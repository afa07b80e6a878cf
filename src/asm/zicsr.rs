//! Zicsr extension: CSR access instructions and their pseudos
//!
//! The 12-bit CSR address rides in the I-type immediate slot; the `*i`
//! variants carry a 5-bit zero-extended immediate in place of rs1.

use crate::asm::Assembler;
use crate::enc::base;
use crate::reg::{Csr, Gpr};
use crate::util::misc::expect_uimm;
use crate::util::opcode::Opcode;

impl Assembler<'_> {
    /// CSRRW: atomically swap `csr` with rs, old value into rd.
    ///
    /// # Example
    ///
    /// ```
    /// use mortar::Assembler;
    /// use mortar::reg::{Csr, Gpr::*};
    ///
    /// let mut asm = Assembler::new(4);
    /// asm.emit_csrrw(T6, Csr::FCSR, A5);
    /// assert_eq!(asm.word32_at(0), 0x00379FF3);
    /// ```
    #[inline(always)]
    pub fn emit_csrrw(&mut self, rd: Gpr, csr: Csr, rs: Gpr) {
        self.emit_csr_reg(rd, 0x1, csr, rs);
    }

    /// CSRRS: atomically set the bits of `csr` that are set in rs, old
    /// value into rd. With rs = x0 this reads without writing.
    #[inline(always)]
    pub fn emit_csrrs(&mut self, rd: Gpr, csr: Csr, rs: Gpr) {
        self.emit_csr_reg(rd, 0x2, csr, rs);
    }

    /// CSRRC: atomically clear the bits of `csr` that are set in rs, old
    /// value into rd.
    #[inline(always)]
    pub fn emit_csrrc(&mut self, rd: Gpr, csr: Csr, rs: Gpr) {
        self.emit_csr_reg(rd, 0x3, csr, rs);
    }

    /// CSRRWI: CSRRW with a 5-bit zero-extended immediate source.
    #[track_caller]
    #[inline(always)]
    pub fn emit_csrrwi(&mut self, rd: Gpr, csr: Csr, imm: u32) {
        self.emit_csr_imm(rd, 0x5, csr, imm);
    }

    /// CSRRSI: CSRRS with a 5-bit zero-extended immediate source.
    #[track_caller]
    #[inline(always)]
    pub fn emit_csrrsi(&mut self, rd: Gpr, csr: Csr, imm: u32) {
        self.emit_csr_imm(rd, 0x6, csr, imm);
    }

    /// CSRRCI: CSRRC with a 5-bit zero-extended immediate source.
    #[track_caller]
    #[inline(always)]
    pub fn emit_csrrci(&mut self, rd: Gpr, csr: Csr, imm: u32) {
        self.emit_csr_imm(rd, 0x7, csr, imm);
    }

    #[inline(always)]
    fn emit_csr_reg(&mut self, rd: Gpr, funct3: u32, csr: Csr, rs: Gpr) {
        self.emit32(base::i(
            Opcode::System.as_u32(),
            rd.as_u32(),
            funct3,
            rs.as_u32(),
            csr.as_u32() as i32,
        ));
    }

    #[track_caller]
    #[inline(always)]
    fn emit_csr_imm(&mut self, rd: Gpr, funct3: u32, csr: Csr, imm: u32) {
        self.emit32(base::i(
            Opcode::System.as_u32(),
            rd.as_u32(),
            funct3,
            expect_uimm(imm, 5),
            csr.as_u32() as i32,
        ));
    }

    // ----- CSR PSEUDOS -----

    /// CSRR: read `csr` into rd (CSRRS rd, csr, x0).
    #[inline(always)]
    pub fn emit_csrr(&mut self, rd: Gpr, csr: Csr) {
        self.emit_csrrs(rd, csr, Gpr::Zero);
    }

    /// CSRW: write rs into `csr` (CSRRW x0, csr, rs).
    #[inline(always)]
    pub fn emit_csrw(&mut self, csr: Csr, rs: Gpr) {
        self.emit_csrrw(Gpr::Zero, csr, rs);
    }

    /// CSRS: set bits in `csr` (CSRRS x0, csr, rs).
    #[inline(always)]
    pub fn emit_csrs(&mut self, csr: Csr, rs: Gpr) {
        self.emit_csrrs(Gpr::Zero, csr, rs);
    }

    /// CSRC: clear bits in `csr` (CSRRC x0, csr, rs).
    #[inline(always)]
    pub fn emit_csrc(&mut self, csr: Csr, rs: Gpr) {
        self.emit_csrrc(Gpr::Zero, csr, rs);
    }

    /// CSRWI: write a 5-bit immediate into `csr` (CSRRWI x0, csr, imm).
    #[track_caller]
    #[inline(always)]
    pub fn emit_csrwi(&mut self, csr: Csr, imm: u32) {
        self.emit_csrrwi(Gpr::Zero, csr, imm);
    }

    /// CSRSI: set immediate bits in `csr` (CSRRSI x0, csr, imm).
    #[track_caller]
    #[inline(always)]
    pub fn emit_csrsi(&mut self, csr: Csr, imm: u32) {
        self.emit_csrrsi(Gpr::Zero, csr, imm);
    }

    /// CSRCI: clear immediate bits in `csr` (CSRRCI x0, csr, imm).
    #[track_caller]
    #[inline(always)]
    pub fn emit_csrci(&mut self, csr: Csr, imm: u32) {
        self.emit_csrrci(Gpr::Zero, csr, imm);
    }

    // ----- FLOATING-POINT CSR PSEUDOS -----
    //
    // The swap forms take an explicit rd; pass Gpr::Zero to discard the
    // previous value.

    /// FRCSR: read the fcsr register (CSRRS rd, fcsr, x0).
    #[inline(always)]
    pub fn emit_frcsr(&mut self, rd: Gpr) {
        self.emit_csrrs(rd, Csr::FCSR, Gpr::Zero);
    }

    /// FSCSR: swap fcsr with rs (CSRRW rd, fcsr, rs).
    #[inline(always)]
    pub fn emit_fscsr(&mut self, rd: Gpr, rs: Gpr) {
        self.emit_csrrw(rd, Csr::FCSR, rs);
    }

    /// FRRM: read the rounding-mode field (CSRRS rd, frm, x0).
    #[inline(always)]
    pub fn emit_frrm(&mut self, rd: Gpr) {
        self.emit_csrrs(rd, Csr::FRM, Gpr::Zero);
    }

    /// FSRM: swap the rounding-mode field with rs (CSRRW rd, frm, rs).
    #[inline(always)]
    pub fn emit_fsrm(&mut self, rd: Gpr, rs: Gpr) {
        self.emit_csrrw(rd, Csr::FRM, rs);
    }

    /// FSRMI: swap the rounding-mode field with an immediate
    /// (CSRRWI rd, frm, imm).
    #[track_caller]
    #[inline(always)]
    pub fn emit_fsrmi(&mut self, rd: Gpr, imm: u32) {
        self.emit_csrrwi(rd, Csr::FRM, imm);
    }

    /// FRFLAGS: read the accrued-exceptions field (CSRRS rd, fflags, x0).
    #[inline(always)]
    pub fn emit_frflags(&mut self, rd: Gpr) {
        self.emit_csrrs(rd, Csr::FFLAGS, Gpr::Zero);
    }

    /// FSFLAGS: swap the accrued-exceptions field with rs
    /// (CSRRW rd, fflags, rs).
    #[inline(always)]
    pub fn emit_fsflags(&mut self, rd: Gpr, rs: Gpr) {
        self.emit_csrrw(rd, Csr::FFLAGS, rs);
    }

    /// FSFLAGSI: swap the accrued-exceptions field with an immediate
    /// (CSRRWI rd, fflags, imm).
    #[track_caller]
    #[inline(always)]
    pub fn emit_fsflagsi(&mut self, rd: Gpr, imm: u32) {
        self.emit_csrrwi(rd, Csr::FFLAGS, imm);
    }

    // ----- COUNTER PSEUDOS -----

    /// RDCYCLE: read the cycle counter.
    #[inline(always)]
    pub fn emit_rdcycle(&mut self, rd: Gpr) {
        self.emit_csrr(rd, Csr::CYCLE);
    }

    /// RDCYCLEH: read the upper half of the cycle counter (RV32 only).
    #[inline(always)]
    pub fn emit_rdcycleh(&mut self, rd: Gpr) {
        self.emit_csrr(rd, Csr::CYCLEH);
    }

    /// RDTIME: read the timer.
    #[inline(always)]
    pub fn emit_rdtime(&mut self, rd: Gpr) {
        self.emit_csrr(rd, Csr::TIME);
    }

    /// RDTIMEH: read the upper half of the timer (RV32 only).
    #[inline(always)]
    pub fn emit_rdtimeh(&mut self, rd: Gpr) {
        self.emit_csrr(rd, Csr::TIMEH);
    }

    /// RDINSTRET: read the instructions-retired counter.
    #[inline(always)]
    pub fn emit_rdinstret(&mut self, rd: Gpr) {
        self.emit_csrr(rd, Csr::INSTRET);
    }

    /// RDINSTRETH: read the upper half of the instructions-retired
    /// counter (RV32 only).
    #[inline(always)]
    pub fn emit_rdinstreth(&mut self, rd: Gpr) {
        self.emit_csrr(rd, Csr::INSTRETH);
    }
}

#[cfg(test)]
mod tests {
    use crate::asm::Assembler;
    use crate::reg::{Csr, Gpr::*};

    fn word_of(f: impl FnOnce(&mut Assembler<'static>)) -> u32 {
        let mut asm = Assembler::new(4);
        f(&mut asm);
        asm.word32_at(0)
    }

    #[test]
    fn csrrc() {
        assert_eq!(word_of(|a| a.emit_csrrc(T6, Csr::CYCLE, A5)), 0xC007BFF3);
        assert_eq!(word_of(|a| a.emit_csrrc(T6, Csr::FFLAGS, A5)), 0x0017BFF3);
        assert_eq!(word_of(|a| a.emit_csrrc(T6, Csr::FRM, A5)), 0x0027BFF3);
        assert_eq!(word_of(|a| a.emit_csrrc(T6, Csr::FCSR, A5)), 0x0037BFF3);
    }

    #[test]
    fn csrrci() {
        assert_eq!(word_of(|a| a.emit_csrrci(T6, Csr::CYCLE, 0)), 0xC0007FF3);
        assert_eq!(word_of(|a| a.emit_csrrci(T6, Csr::FFLAGS, 0x1F)), 0x001FFFF3);
        assert_eq!(word_of(|a| a.emit_csrrci(T6, Csr::FRM, 0x7)), 0x0023FFF3);
    }

    #[test]
    fn csrrs() {
        assert_eq!(word_of(|a| a.emit_csrrs(T6, Csr::CYCLE, A5)), 0xC007AFF3);
        assert_eq!(word_of(|a| a.emit_csrrs(T6, Csr::FFLAGS, A5)), 0x0017AFF3);
        assert_eq!(word_of(|a| a.emit_csrrs(T6, Csr::FRM, A5)), 0x0027AFF3);
        assert_eq!(word_of(|a| a.emit_csrrs(T6, Csr::FCSR, A5)), 0x0037AFF3);
    }

    #[test]
    fn csrrsi() {
        assert_eq!(word_of(|a| a.emit_csrrsi(T6, Csr::CYCLE, 0)), 0xC0006FF3);
        assert_eq!(word_of(|a| a.emit_csrrsi(T6, Csr::FFLAGS, 0x1F)), 0x001FEFF3);
        assert_eq!(word_of(|a| a.emit_csrrsi(T6, Csr::FRM, 0x7)), 0x0023EFF3);
    }

    #[test]
    fn csrrw() {
        assert_eq!(word_of(|a| a.emit_csrrw(T6, Csr::CYCLE, A5)), 0xC0079FF3);
        assert_eq!(word_of(|a| a.emit_csrrw(T6, Csr::FFLAGS, A5)), 0x00179FF3);
        assert_eq!(word_of(|a| a.emit_csrrw(T6, Csr::FRM, A5)), 0x00279FF3);
        assert_eq!(word_of(|a| a.emit_csrrw(T6, Csr::FCSR, A5)), 0x00379FF3);
    }

    #[test]
    fn csrrwi() {
        assert_eq!(word_of(|a| a.emit_csrrwi(T6, Csr::CYCLE, 0)), 0xC0005FF3);
        assert_eq!(word_of(|a| a.emit_csrrwi(T6, Csr::FFLAGS, 0x1F)), 0x001FDFF3);
        assert_eq!(word_of(|a| a.emit_csrrwi(T6, Csr::FRM, 0x7)), 0x0023DFF3);
    }

    #[test]
    fn pseudos_expand_to_canonical_forms() {
        assert_eq!(
            word_of(|a| a.emit_csrr(A0, Csr::FCSR)),
            word_of(|a| a.emit_csrrs(A0, Csr::FCSR, Zero))
        );
        assert_eq!(
            word_of(|a| a.emit_csrw(Csr::FCSR, A0)),
            word_of(|a| a.emit_csrrw(Zero, Csr::FCSR, A0))
        );
        assert_eq!(
            word_of(|a| a.emit_csrs(Csr::FFLAGS, A0)),
            word_of(|a| a.emit_csrrs(Zero, Csr::FFLAGS, A0))
        );
        assert_eq!(
            word_of(|a| a.emit_csrci(Csr::FFLAGS, 1)),
            word_of(|a| a.emit_csrrci(Zero, Csr::FFLAGS, 1))
        );
        assert_eq!(
            word_of(|a| a.emit_frcsr(A0)),
            word_of(|a| a.emit_csrrs(A0, Csr::FCSR, Zero))
        );
        assert_eq!(
            word_of(|a| a.emit_fscsr(Zero, A0)),
            word_of(|a| a.emit_csrrw(Zero, Csr::FCSR, A0))
        );
        assert_eq!(
            word_of(|a| a.emit_rdcycle(A0)),
            word_of(|a| a.emit_csrr(A0, Csr::CYCLE))
        );
        assert_eq!(
            word_of(|a| a.emit_rdtimeh(A0)),
            word_of(|a| a.emit_csrr(A0, Csr::TIMEH))
        );
        assert_eq!(
            word_of(|a| a.emit_rdinstret(A0)),
            word_of(|a| a.emit_csrr(A0, Csr::INSTRET))
        );
    }

    #[test]
    fn arbitrary_csr_addresses_are_accepted() {
        // csrr a0, mtvec
        assert_eq!(word_of(|a| a.emit_csrr(A0, Csr::new(0x305))), 0x30502573);
    }

    #[test]
    #[should_panic(expected = "unsigned 5-bit")]
    fn csr_immediate_wider_than_five_bits() {
        let mut asm = Assembler::new(4);
        asm.emit_csrrwi(A0, Csr::FRM, 32);
    }
}
