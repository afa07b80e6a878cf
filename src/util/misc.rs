//! Helper functions and macros

use num_traits::{PrimInt, Signed, Unsigned};

/// Check whether `v` fits a signed two's-complement field of `bits` bits.
///
/// # Examples
///
/// ```
/// use mortar::util::misc::fits_simm;
///
/// assert!(fits_simm(2047i32, 12));
/// assert!(fits_simm(-2048i32, 12));
/// assert!(!fits_simm(2048i32, 12));
/// assert!(!fits_simm(-2049i64, 12));
/// ```
#[inline(always)]
pub fn fits_simm<T: PrimInt + Signed>(v: T, bits: u32) -> bool {
    let bound = T::one() << (bits - 1) as usize;
    v >= -bound && v < bound
}

/// Check whether `v` fits an unsigned field of `bits` bits.
///
/// # Examples
///
/// ```
/// use mortar::util::misc::fits_uimm;
///
/// assert!(fits_uimm(31u32, 5));
/// assert!(!fits_uimm(32u32, 5));
/// ```
#[inline(always)]
pub fn fits_uimm<T: PrimInt + Unsigned>(v: T, bits: u32) -> bool {
    v < (T::one() << bits as usize)
}

/// Range-check a signed immediate and pass it through.
///
/// # Panics
///
/// Panics if `v` does not fit a signed `bits`-bit field.
#[track_caller]
#[inline(always)]
pub fn expect_simm(v: i32, bits: u32) -> i32 {
    assert!(
        fits_simm(v, bits),
        "immediate {v} does not fit a signed {bits}-bit field"
    );
    v
}

/// Range-check an unsigned immediate and pass it through.
///
/// # Panics
///
/// Panics if `v` does not fit an unsigned `bits`-bit field.
#[track_caller]
#[inline(always)]
pub fn expect_uimm(v: u32, bits: u32) -> u32 {
    assert!(
        fits_uimm(v, bits),
        "immediate {v} does not fit an unsigned {bits}-bit field"
    );
    v
}

// Read a u32 back from four little-endian bytes
#[inline(always)]
pub fn le_bytes_into_u32(bytes: &[u8]) -> u32 {
    u32::from_le_bytes(bytes[..4].try_into().unwrap())
}

// Read a u16 back from two little-endian bytes
#[inline(always)]
pub fn le_bytes_into_u16(bytes: &[u8]) -> u16 {
    u16::from_le_bytes(bytes[..2].try_into().unwrap())
}

#[doc(hidden)]
macro_rules! debug_from_display {
    ($type: ty, newline) => {
        const _: fn() = || {
            fn assert_impl_display<T: std::fmt::Display>() {}
            assert_impl_display::<$type>();
        };

        impl std::fmt::Debug for $type {
            #[inline(always)]
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                writeln!(f)?;
                std::fmt::Display::fmt(self, f)
            }
        }
    };

    ($type: ty) => {
        const _: fn() = || {
            fn assert_impl_display<T: std::fmt::Display>() {}
            assert_impl_display::<$type>();
        };

        impl std::fmt::Debug for $type {
            #[inline(always)]
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(self, f)
            }
        }
    };
}

/// Define `emit_*` methods for a family of R-type register-register
/// instructions sharing an opcode.
macro_rules! r_type_ops {
    (
        $opcode:expr;
        $($(#[$meta:meta])* $name:ident => ($funct3:expr, $funct7:expr)),+ $(,)?
    ) => {
        paste::paste! {
            $(
                $(#[$meta])*
                #[inline(always)]
                pub fn [<emit_ $name>](
                    &mut self,
                    rd: $crate::reg::Gpr,
                    rs1: $crate::reg::Gpr,
                    rs2: $crate::reg::Gpr
                ) {
                    self.emit32($crate::enc::base::r(
                        $opcode, rd.as_u32(), $funct3, rs1.as_u32(), rs2.as_u32(), $funct7
                    ));
                }
            )+
        }
    };
}

/// Define label-taking and `_imm` displacement-taking `emit_*` method
/// pairs for a family of B-type branches.
macro_rules! b_type_ops {
    ($($(#[$meta:meta])* $name:ident => $funct3:expr),+ $(,)?) => {
        paste::paste! {
            $(
                $(#[$meta])*
                #[track_caller]
                #[inline(always)]
                pub fn [<emit_ $name>](
                    &mut self,
                    rs1: $crate::reg::Gpr,
                    rs2: $crate::reg::Gpr,
                    label: &mut $crate::asm::Label
                ) {
                    let disp = self.link(label, $crate::asm::label::FixupKind::Branch);
                    self.emit32($crate::enc::base::b(
                        $crate::util::opcode::Opcode::Branch.as_u32(),
                        $funct3, rs1.as_u32(), rs2.as_u32(), disp
                    ));
                }

                #[doc = concat!("Displacement form of [`Self::emit_", stringify!($name), "`].")]
                #[track_caller]
                #[inline(always)]
                pub fn [<emit_ $name _imm>](
                    &mut self,
                    rs1: $crate::reg::Gpr,
                    rs2: $crate::reg::Gpr,
                    imm: i32
                ) {
                    let disp = $crate::asm::asm::checked_disp(
                        $crate::asm::label::FixupKind::Branch, imm as i64
                    );
                    self.emit32($crate::enc::base::b(
                        $crate::util::opcode::Opcode::Branch.as_u32(),
                        $funct3, rs1.as_u32(), rs2.as_u32(), disp
                    ));
                }
            )+
        }
    };
}

/// Define `emit_*` methods for the AMO family; each entry names its
/// funct5 and width funct3.
macro_rules! amo_ops {
    ($($(#[$meta:meta])* $name:ident => ($funct5:expr, $funct3:expr)),+ $(,)?) => {
        paste::paste! {
            $(
                $(#[$meta])*
                #[inline(always)]
                pub fn [<emit_ $name>](
                    &mut self,
                    ord: $crate::util::opcode::AqRl,
                    rd: $crate::reg::Gpr,
                    rs2: $crate::reg::Gpr,
                    rs1: $crate::reg::Gpr
                ) {
                    self.emit32($crate::enc::base::amo(
                        $funct5, ord, rs2.as_u32(), rs1.as_u32(), $funct3, rd.as_u32()
                    ));
                }
            )+
        }
    };
}
