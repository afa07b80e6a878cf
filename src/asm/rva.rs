//! A extension: load-reserved/store-conditional and atomic memory ops

use crate::asm::Assembler;
use crate::enc::base;
use crate::reg::Gpr;
use crate::util::opcode::AqRl;

impl Assembler<'_> {
    /// LR.W: load-reserve a word from the address in rs1.
    ///
    /// # Example
    ///
    /// ```
    /// use mortar::Assembler;
    /// use mortar::reg::Gpr::*;
    /// use mortar::util::opcode::AqRl;
    ///
    /// let mut asm = Assembler::new(4);
    /// asm.emit_lr_w(AqRl::None, T6, A5);
    /// assert_eq!(asm.word32_at(0), 0x1007AFAF);
    /// ```
    #[inline(always)]
    pub fn emit_lr_w(&mut self, ord: AqRl, rd: Gpr, rs1: Gpr) {
        // rs2 = 0 for LR
        self.emit32(base::amo(0x02, ord, 0, rs1.as_u32(), 0x2, rd.as_u32()));
    }

    /// SC.W: store-conditional a word; rd receives 0 on success.
    #[inline(always)]
    pub fn emit_sc_w(&mut self, ord: AqRl, rd: Gpr, rs2: Gpr, rs1: Gpr) {
        self.emit32(base::amo(0x03, ord, rs2.as_u32(), rs1.as_u32(), 0x2, rd.as_u32()));
    }

    /// LR.D: load-reserve a doubleword from the address in rs1.
    #[inline(always)]
    pub fn emit_lr_d(&mut self, ord: AqRl, rd: Gpr, rs1: Gpr) {
        self.emit32(base::amo(0x02, ord, 0, rs1.as_u32(), 0x3, rd.as_u32()));
    }

    /// SC.D: store-conditional a doubleword; rd receives 0 on success.
    #[inline(always)]
    pub fn emit_sc_d(&mut self, ord: AqRl, rd: Gpr, rs2: Gpr, rs1: Gpr) {
        self.emit32(base::amo(0x03, ord, rs2.as_u32(), rs1.as_u32(), 0x3, rd.as_u32()));
    }

    amo_ops! {
        /// AMOSWAP.W: atomically swap rs2 with the word at (rs1).
        amoswap_w  => (0x01, 0x2),
        /// AMOADD.W: atomically add rs2 to the word at (rs1).
        amoadd_w   => (0x00, 0x2),
        /// AMOXOR.W: atomically XOR rs2 into the word at (rs1).
        amoxor_w   => (0x04, 0x2),
        /// AMOAND.W: atomically AND rs2 into the word at (rs1).
        amoand_w   => (0x0C, 0x2),
        /// AMOOR.W: atomically OR rs2 into the word at (rs1).
        amoor_w    => (0x08, 0x2),
        /// AMOMIN.W: atomic signed minimum with the word at (rs1).
        amomin_w   => (0x10, 0x2),
        /// AMOMAX.W: atomic signed maximum with the word at (rs1).
        amomax_w   => (0x14, 0x2),
        /// AMOMINU.W: atomic unsigned minimum with the word at (rs1).
        amominu_w  => (0x18, 0x2),
        /// AMOMAXU.W: atomic unsigned maximum with the word at (rs1).
        amomaxu_w  => (0x1C, 0x2),

        /// AMOSWAP.D: atomically swap rs2 with the doubleword at (rs1).
        amoswap_d  => (0x01, 0x3),
        /// AMOADD.D: atomically add rs2 to the doubleword at (rs1).
        amoadd_d   => (0x00, 0x3),
        /// AMOXOR.D: atomically XOR rs2 into the doubleword at (rs1).
        amoxor_d   => (0x04, 0x3),
        /// AMOAND.D: atomically AND rs2 into the doubleword at (rs1).
        amoand_d   => (0x0C, 0x3),
        /// AMOOR.D: atomically OR rs2 into the doubleword at (rs1).
        amoor_d    => (0x08, 0x3),
        /// AMOMIN.D: atomic signed minimum with the doubleword at (rs1).
        amomin_d   => (0x10, 0x3),
        /// AMOMAX.D: atomic signed maximum with the doubleword at (rs1).
        amomax_d   => (0x14, 0x3),
        /// AMOMINU.D: atomic unsigned minimum with the doubleword at (rs1).
        amominu_d  => (0x18, 0x3),
        /// AMOMAXU.D: atomic unsigned maximum with the doubleword at (rs1).
        amomaxu_d  => (0x1C, 0x3),
    }
}
