//! Emission determinism: the same mnemonic with the same operands
//! produces the same bytes regardless of emit history, and rewinding
//! then re-emitting reproduces the buffer exactly.

use mortar::reg::{Csr, Fpr::*, Gpr::*};
use mortar::{AqRl, Assembler, FenceOrder, RMode};

type Emit = fn(&mut Assembler<'static>);

/// One representative per instruction format: R, I, S, B, U, J, R4,
/// atomic, fence, CSR, and the compressed CR/CI/CSS/CIW/CL/CS/CA/CB/CJ
/// forms.
fn corpus() -> Vec<(&'static str, Emit, usize)> {
    vec![
        ("add", |a: &mut Assembler<'static>| a.emit_add(A0, A1, A2), 4),
        ("addi", |a| a.emit_addi(A0, A1, -42), 4),
        ("slli64", |a| a.emit_slli64(A0, A1, 13), 4),
        ("lui", |a| a.emit_lui(A0, 0xFEDCB), 4),
        ("auipc", |a| a.emit_auipc(A0, 0x12345), 4),
        ("lw", |a| a.emit_lw(A0, Sp, 16), 4),
        ("ld", |a| a.emit_ld(A0, Sp, -16), 4),
        ("sw", |a| a.emit_sw(A0, Sp, 8), 4),
        ("sd", |a| a.emit_sd(A0, Sp, -8), 4),
        ("beq", |a| a.emit_beq_imm(A0, A1, -64), 4),
        ("bgeu", |a| a.emit_bgeu_imm(A0, A1, 2048), 4),
        ("jal", |a| a.emit_jal_imm(Ra, 0x1000), 4),
        ("jalr", |a| a.emit_jalr(Ra, A0, 4), 4),
        ("mulhsu", |a| a.emit_mulhsu(A0, A1, A2), 4),
        ("remuw", |a| a.emit_remuw(A0, A1, A2), 4),
        ("fence", |a| a.emit_fence(FenceOrder::R | FenceOrder::W, FenceOrder::IORW), 4),
        ("ecall", |a| a.emit_ecall(), 4),
        ("csrrw", |a| a.emit_csrrw(T0, Csr::FCSR, A0), 4),
        ("csrrci", |a| a.emit_csrrci(T0, Csr::FFLAGS, 0x15), 4),
        ("lr_d", |a| a.emit_lr_d(AqRl::Acquire, A0, A1), 4),
        ("sc_w", |a| a.emit_sc_w(AqRl::Release, A0, A2, A1), 4),
        ("amomaxu_d", |a| a.emit_amomaxu_d(AqRl::AcquireRelease, A0, A2, A1), 4),
        ("fadd_s", |a| a.emit_fadd_s(Fa0, Fa1, Fa2, RMode::Rtz), 4),
        ("fsgnjn_d", |a| a.emit_fsgnjn_d(Fa0, Fa1, Fa2), 4),
        ("fcvt_q_l", |a| a.emit_fcvt_q_l(Fa0, A0, RMode::Dyn), 4),
        ("fmv_x_w", |a| a.emit_fmv_x_w(A0, Fa0), 4),
        ("fld", |a| a.emit_fld(Fa0, Sp, 24), 4),
        ("fsq", |a| a.emit_fsq(Fa0, Sp, 32), 4),
        ("fnmadd_d", |a| a.emit_fnmadd_d(Fa0, Fa1, Fa2, Fa3, RMode::Rup), 4),
        ("c_nop", |a| a.emit_c_nop(), 2),
        ("c_addi", |a| a.emit_c_addi(A0, -3), 2),
        ("c_addi4spn", |a| a.emit_c_addi4spn(A2, 64), 2),
        ("c_li", |a| a.emit_c_li(T0, 31), 2),
        ("c_lui", |a| a.emit_c_lui(A3, -1), 2),
        ("c_lw", |a| a.emit_c_lw(A0, A1, 0x44), 2),
        ("c_sd", |a| a.emit_c_sd(A0, A1, 0x18), 2),
        ("c_fld", |a| a.emit_c_fld(Fa0, A1, 0x10), 2),
        ("c_lwsp", |a| a.emit_c_lwsp(A0, 0xFC), 2),
        ("c_sdsp", |a| a.emit_c_sdsp(A0, 0x1F8), 2),
        ("c_srai", |a| a.emit_c_srai(A0, 33), 2),
        ("c_andi", |a| a.emit_c_andi(A0, -17), 2),
        ("c_sub", |a| a.emit_c_sub(A0, A1), 2),
        ("c_addw", |a| a.emit_c_addw(A0, A1), 2),
        ("c_mv", |a| a.emit_c_mv(T3, T4), 2),
        ("c_add", |a| a.emit_c_add(T3, T4), 2),
        ("c_j", |a| a.emit_c_j_imm(-128), 2),
        ("c_beqz", |a| a.emit_c_beqz_imm(A5, 254), 2),
        ("c_jr", |a| a.emit_c_jr(Ra), 2),
        ("c_ebreak", |a| a.emit_c_ebreak(), 2),
    ]
}

#[test]
fn cursor_advances_by_the_instruction_width() {
    for (name, emit, width) in corpus() {
        let mut asm = Assembler::new(16);
        emit(&mut asm);
        assert_eq!(asm.cursor(), width, "{name} width");
    }
}

#[test]
fn emission_is_independent_of_history() {
    for (name, emit, width) in corpus() {
        let mut fresh = Assembler::new(16);
        emit(&mut fresh);
        let expected = fresh.code()[..width].to_vec();

        // same emit after unrelated instructions at a different cursor
        let mut offset = Assembler::new(64);
        offset.emit_nop();
        offset.emit_c_nop();
        offset.emit_nop();
        let site = offset.cursor();
        emit(&mut offset);
        assert_eq!(&offset.code()[site..site + width], expected, "{name} after prefix");
    }
}

#[test]
fn rewind_and_reemit_reproduces_the_word() {
    for (name, emit, width) in corpus() {
        let mut asm = Assembler::new(16);
        emit(&mut asm);
        let first = asm.code().to_vec();

        asm.rewind();
        emit(&mut asm);
        assert_eq!(asm.cursor(), width, "{name} cursor after rewind");
        assert_eq!(asm.code(), first, "{name} bytes after rewind");
    }
}

#[test]
fn thousand_instruction_round_trip() {
    let corpus = corpus();

    let mut asm = Assembler::new(8192);
    let mut emitted = 0usize;
    while emitted < 1000 {
        for (_, emit, _) in &corpus {
            emit(&mut asm);
            emitted += 1;
        }
    }
    let first_pass = asm.code().to_vec();
    let end = asm.cursor();

    asm.rewind();
    let mut emitted = 0usize;
    while emitted < 1000 {
        for (_, emit, _) in &corpus {
            emit(&mut asm);
            emitted += 1;
        }
    }

    assert_eq!(asm.cursor(), end);
    assert_eq!(asm.code(), first_pass);
}

#[test]
fn rewind_to_an_interior_offset_reproduces_the_tail() {
    let mut asm = Assembler::new(64);
    asm.emit_add(A0, A1, A2);
    asm.emit_sub(A3, A4, A5);
    asm.emit_xor(T0, T1, T2);
    let all = asm.code().to_vec();

    asm.rewind_to(4);
    asm.emit_sub(A3, A4, A5);
    asm.emit_xor(T0, T1, T2);

    assert_eq!(asm.code(), all);
}
