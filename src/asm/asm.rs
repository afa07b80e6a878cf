//! Assembler core: buffer ownership, the label fixup engine, teardown

use crate::asm::buffer::{CodeBuffer, DEFAULT_CAPACITY};
use crate::asm::errors::{FinishError, PendingLabelInfo, UnboundLabel};
use crate::asm::label::{Fixup, FixupKind, Label, LabelId};
use crate::enc::{base, rvc};

use core::ops::{Deref, DerefMut};
use core::panic;

use rustc_hash::FxHashMap;

/// Generates RISC-V machine code into a [`CodeBuffer`].
///
/// One `emit_*` method exists per supported mnemonic, spread over the
/// per-extension modules of this crate. Branch and jump methods take a
/// [`Label`], which may be bound later; [`Assembler::bind`] patches
/// every pending reference in place.
///
/// The assembler owns its buffer exclusively: it cannot be cloned, only
/// moved. `Deref`/`DerefMut` expose the buffer's cursor, rewind and
/// read-back operations directly on the assembler.
///
/// # Examples
///
/// ```
/// use mortar::{Assembler, Label};
/// use mortar::reg::Gpr::*;
///
/// let mut asm = Assembler::new(64);
/// let mut done = Label::new();
///
/// asm.emit_beqz(A0, &mut done); // forward reference
/// asm.emit_addi(A0, A0, -1);
/// asm.bind(&mut done);
/// asm.emit_ret();
///
/// let buf = asm.finish().unwrap();
/// assert_eq!(buf.cursor(), 12);
/// ```
pub struct Assembler<'a> {
    buf: CodeBuffer<'a>,

    lbl_id_counter: u32,

    /// Labels referenced while unbound, keyed by the id stamped into the
    /// label at first reference. Entries leave at bind time; whatever
    /// remains at `finish` is reported as an error.
    pending_labels: FxHashMap<LabelId, PendingLabelInfo>,
}

impl<'a> Deref for Assembler<'a> {
    type Target = CodeBuffer<'a>;

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        &self.buf
    }
}

impl DerefMut for Assembler<'_> {
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.buf
    }
}

impl Default for Assembler<'static> {
    /// An assembler over an owned buffer of
    /// [`DEFAULT_CAPACITY`] bytes.
    #[inline(always)]
    fn default() -> Self {
        Assembler::new(DEFAULT_CAPACITY)
    }
}

impl Assembler<'static> {
    /// Create an assembler over an owned buffer of `capacity` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    #[track_caller]
    pub fn new(capacity: usize) -> Assembler<'static> {
        Assembler::over(CodeBuffer::new(capacity))
    }
}

impl<'a> Assembler<'a> {
    /// Create an assembler over a caller-owned region. The region is
    /// written in place and not freed on drop.
    ///
    /// # Panics
    ///
    /// Panics if `buf` is empty.
    #[must_use]
    #[track_caller]
    pub fn with_buffer(buf: &'a mut [u8]) -> Assembler<'a> {
        Assembler::over(CodeBuffer::from_slice(buf))
    }

    #[inline]
    fn over(buf: CodeBuffer<'a>) -> Assembler<'a> {
        Assembler {
            buf,
            lbl_id_counter: 0,
            pending_labels: FxHashMap::default(),
        }
    }

    /// Bind `label` to the current cursor offset and patch every
    /// instruction that referenced it while it was unbound.
    ///
    /// After this returns the buffer holds fully patched bytes for every
    /// referencing site, and the label answers `offset()` with the bind
    /// position.
    ///
    /// # Panics
    ///
    /// Panics if the label is already bound, or if a pending reference
    /// ends up farther away than its instruction format can encode.
    #[track_caller]
    pub fn bind(&mut self, label: &mut Label) {
        assert!(!label.is_bound(), "label is already bound");

        let here = self.buf.cursor();

        for Fixup { offset, kind } in label.take_fixups() {
            let disp = checked_disp(kind, here as i64 - offset as i64);
            match kind {
                FixupKind::Branch => {
                    let word = self.buf.word32_at(offset);
                    self.buf.overwrite32(offset, base::patch_b(word, disp));
                }
                FixupKind::Jump => {
                    let word = self.buf.word32_at(offset);
                    self.buf.overwrite32(offset, base::patch_j(word, disp));
                }
                FixupKind::CompressedBranch => {
                    let half = self.buf.word16_at(offset);
                    self.buf.overwrite16(offset, rvc::patch_cb(half, disp));
                }
                FixupKind::CompressedJump => {
                    let half = self.buf.word16_at(offset);
                    self.buf.overwrite16(offset, rvc::patch_cj(half, disp));
                }
            }
        }

        if let Some(id) = label.id {
            self.pending_labels.remove(&id);
        }

        label.bind_to(here);
    }

    /// Finish emission and hand the buffer back.
    ///
    /// Fails if any label referenced by an emitted instruction was never
    /// bound: the placeholder displacements of such references still
    /// read zero, so the produced code must not be executed. The error
    /// lists the source location of the first reference to each
    /// offending label.
    pub fn finish(self) -> Result<CodeBuffer<'a>, FinishError> {
        if self.pending_labels.is_empty() {
            return Ok(self.buf);
        }

        let mut unbound = self
            .pending_labels
            .into_values()
            .map(|info| UnboundLabel { caller_loc: info.caller_loc })
            .collect::<Vec<_>>();

        // stable report order regardless of hash iteration
        unbound.sort_by_key(|l| (l.caller_loc.file(), l.caller_loc.line(), l.caller_loc.column()));

        Err(FinishError { unbound })
    }

    /// Resolve a label reference at the current cursor: the known
    /// displacement if the label is bound, otherwise zero after queueing
    /// the emit site on the label's fixup chain.
    #[track_caller]
    pub(crate) fn link(&mut self, label: &mut Label, kind: FixupKind) -> i32 {
        let site = self.buf.cursor();

        if let Some(target) = label.offset() {
            return checked_disp(kind, target as i64 - site as i64);
        }

        let id = *label.id.get_or_insert_with(|| {
            let id = LabelId(self.lbl_id_counter);
            self.lbl_id_counter += 1;
            id
        });

        self.pending_labels
            .entry(id)
            .or_insert_with(|| PendingLabelInfo { caller_loc: panic::Location::caller() });

        label.fixups.push(Fixup { offset: site, kind });

        0
    }
}

/// Validate a PC-relative displacement against the range and alignment
/// of the instruction format that will carry it.
///
/// # Panics
///
/// Panics if `disp` is odd or outside the format's signed range.
#[track_caller]
pub(crate) fn checked_disp(kind: FixupKind, disp: i64) -> i32 {
    let (range, what) = match kind {
        FixupKind::Branch => (-4096..=4094, "branch"),
        FixupKind::Jump => (-1_048_576..=1_048_574, "jump"),
        FixupKind::CompressedBranch => (-256..=254, "compressed branch"),
        FixupKind::CompressedJump => (-2048..=2046, "compressed jump"),
    };

    assert!(
        range.contains(&disp) && disp % 2 == 0,
        "{what} displacement out of range: {disp}"
    );

    disp as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displacement_ranges() {
        assert_eq!(checked_disp(FixupKind::Branch, 4094), 4094);
        assert_eq!(checked_disp(FixupKind::Jump, -1_048_576), -1_048_576);
        assert_eq!(checked_disp(FixupKind::CompressedBranch, -256), -256);
        assert_eq!(checked_disp(FixupKind::CompressedJump, 2046), 2046);
    }

    #[test]
    #[should_panic(expected = "branch displacement out of range")]
    fn branch_displacement_too_far() {
        let _ = checked_disp(FixupKind::Branch, 4096);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn odd_displacement_rejected() {
        let _ = checked_disp(FixupKind::Jump, 3);
    }

    #[test]
    #[should_panic(expected = "already bound")]
    fn double_bind_rejected() {
        let mut asm = Assembler::new(16);
        let mut label = Label::new();
        asm.bind(&mut label);
        asm.bind(&mut label);
    }

    #[test]
    fn finish_reports_unbound_labels() {
        let mut asm = Assembler::new(16);
        let mut label = Label::new();
        asm.link(&mut label, FixupKind::Branch);
        asm.emit32(0);

        let err = asm.finish().unwrap_err();
        assert_eq!(err.unbound_labels().len(), 1);
    }

    #[test]
    fn finish_succeeds_once_everything_is_bound() {
        let mut asm = Assembler::new(16);
        let mut label = Label::new();
        asm.link(&mut label, FixupKind::Branch);
        asm.emit32(0);
        asm.bind(&mut label);
        assert!(asm.finish().is_ok());
    }
}
