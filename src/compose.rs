//! The composition engine: capability bits, the [`Skill`] trait, and the
//! ordered-tuple dispatch that builds one concrete handle type from a list
//! of skills.
//!
//! # How composition works
//! A skill list is an ordinary tuple: `(TraceMeta, TraceReader, NoTruncate)`.
//! Tuples of skills are themselves skills, so lists nest — a type alias can
//! take a "base" tuple and append extras.  During construction the handle
//! drives a fixed dispatch sequence (path → mode → open → post-open →
//! post-open + config), and each step walks the tuple **left to right**.
//! A skill that needs state computed by another skill must therefore be
//! listed after it; the engine enforces no implicit ordering.
//!
//! Every hook has a default no-op body, so a skill only implements the steps
//! it cares about and the rest compile away.
//!
//! # Capability queries
//! Each skill declares an identity tag plus the behavior bits it `GRANTS`
//! and the bits it `CONFLICTS` with.  A list aggregates all three by
//! constant union, so "does this handle type bounds-check?" is a `const`
//! question, and an incompatible composition (a read-only skill next to a
//! write-granting one) fails inside a `const` block — at build time, before
//! a single byte of the file is touched.
//!
//! Custom skills allocate their own identity bits with [`Caps::user`] and
//! declare conflicts the same way the built-in catalogue does; the engine
//! checks `GRANTS ∩ CONFLICTS = ∅` generically, with no knowledge of which
//! skill contributed which bit.

use std::ops::{BitOr, BitOrAssign};
use std::path::Path;

use crate::error::Result;
use crate::handle::HandleCore;
use crate::types::{Config, Mode};

// ── Caps ─────────────────────────────────────────────────────────────────────

/// A set of capability bits, usable in `const` context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caps(u32);

impl Caps {
    pub const NONE: Caps = Caps(0);

    // Behavior bits.  A skill that grants `TRUNCATES` always also grants
    // `WRITABLE`; truncation without write access is meaningless.
    pub const WRITABLE:  Caps = Caps(1);
    pub const TRUNCATES: Caps = Caps(1 << 1);

    // Identity bits, one per catalogue skill.
    pub const UNIQUE:         Caps = Caps(1 << 8);
    pub const CLOSABLE:       Caps = Caps(1 << 9);
    pub const OPEN_STATUS:    Caps = Caps(1 << 10);
    pub const DEFERRED_OPEN:  Caps = Caps(1 << 11);
    pub const READ_ONLY:      Caps = Caps(1 << 12);
    pub const WRITE_ALWAYS:   Caps = Caps(1 << 13);
    pub const TRUNCATE_ALWAYS: Caps = Caps(1 << 14);
    pub const NO_TRUNCATE:    Caps = Caps(1 << 15);
    pub const TRACE_META:     Caps = Caps(1 << 16);
    pub const BOUNDS_CHECK:   Caps = Caps(1 << 17);
    pub const TRACE_READER:   Caps = Caps(1 << 18);
    pub const HEADER_READER:  Caps = Caps(1 << 19);
    pub const TRACE_WRITER:   Caps = Caps(1 << 20);
    pub const CUBE_STATS:     Caps = Caps(1 << 21);

    /// Identity bit `n` (0..=7) of the range reserved for skills defined
    /// outside this crate.
    pub const fn user(n: u32) -> Caps {
        assert!(n < 8, "user capability bits are limited to 0..=7");
        Caps(1 << (24 + n))
    }

    pub const fn union(self, other: Caps) -> Caps {
        Caps(self.0 | other.0)
    }

    /// True when every bit of `other` is present in `self`.
    pub const fn contains(self, other: Caps) -> bool {
        self.0 & other.0 == other.0
    }

    /// True when `self` and `other` share at least one bit.
    pub const fn intersects(self, other: Caps) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for Caps {
    type Output = Caps;

    fn bitor(self, rhs: Caps) -> Caps {
        self.union(rhs)
    }
}

impl BitOrAssign for Caps {
    fn bitor_assign(&mut self, rhs: Caps) {
        *self = self.union(rhs);
    }
}

// ── Skill ────────────────────────────────────────────────────────────────────

/// One behavioral unit of a composed handle, or an ordered list of them.
///
/// Concrete skills set `TAGS` to their identity bit and override the hooks
/// they participate in.  The construction hooks run in the declared tuple
/// order; `check_index` runs on every record access.
pub trait Skill: Default {
    /// Identity bits — for a concrete skill, exactly one bit.
    const TAGS: Caps;
    /// Behavior bits this skill grants to the composition.
    const GRANTS: Caps = Caps::NONE;
    /// Behavior bits this skill refuses to be composed with.
    const CONFLICTS: Caps = Caps::NONE;

    /// Pre-open: observe the path about to be opened.
    fn inspect_path(&mut self, path: &Path) -> Result<()> {
        let _ = path;
        Ok(())
    }

    /// Pre-open: observe or replace the in-progress open mode.
    fn coerce_mode(&mut self, mode: Mode) -> Result<Mode> {
        Ok(mode)
    }

    /// Post-open: validate and populate shared handle state.
    fn post_open(&mut self, core: &mut HandleCore) -> Result<()> {
        let _ = core;
        Ok(())
    }

    /// Post-open, with the caller's configuration.
    fn configure(&mut self, core: &mut HandleCore, cfg: &Config) -> Result<()> {
        let _ = (core, cfg);
        Ok(())
    }

    /// Record-access: judge an index before the codec sees it.
    fn check_index(&self, i: i32, core: &HandleCore) -> Result<()> {
        let _ = (i, core);
        Ok(())
    }
}

/// The empty skill list: the minimal handle, no extra behavior.
impl Skill for () {
    const TAGS: Caps = Caps::NONE;
}

macro_rules! impl_skill_for_tuple {
    ($(($T:ident, $t:ident)),+) => {
        impl<$($T: Skill),+> Skill for ($($T,)+) {
            const TAGS:      Caps = Caps::NONE $(.union($T::TAGS))+;
            const GRANTS:    Caps = Caps::NONE $(.union($T::GRANTS))+;
            const CONFLICTS: Caps = Caps::NONE $(.union($T::CONFLICTS))+;

            fn inspect_path(&mut self, path: &Path) -> Result<()> {
                let ($($t,)+) = self;
                $($t.inspect_path(path)?;)+
                Ok(())
            }

            fn coerce_mode(&mut self, mode: Mode) -> Result<Mode> {
                let ($($t,)+) = self;
                $(let mode = $t.coerce_mode(mode)?;)+
                Ok(mode)
            }

            fn post_open(&mut self, core: &mut HandleCore) -> Result<()> {
                let ($($t,)+) = self;
                $($t.post_open(core)?;)+
                Ok(())
            }

            fn configure(&mut self, core: &mut HandleCore, cfg: &Config) -> Result<()> {
                let ($($t,)+) = self;
                $($t.configure(core, cfg)?;)+
                Ok(())
            }

            fn check_index(&self, i: i32, core: &HandleCore) -> Result<()> {
                let ($($t,)+) = self;
                $($t.check_index(i, core)?;)+
                Ok(())
            }
        }
    };
}

impl_skill_for_tuple!((A, a));
impl_skill_for_tuple!((A, a), (B, b));
impl_skill_for_tuple!((A, a), (B, b), (C, c));
impl_skill_for_tuple!((A, a), (B, b), (C, c), (D, d));
impl_skill_for_tuple!((A, a), (B, b), (C, c), (D, d), (E, e));
impl_skill_for_tuple!((A, a), (B, b), (C, c), (D, d), (E, e), (F, f));
impl_skill_for_tuple!((A, a), (B, b), (C, c), (D, d), (E, e), (F, f), (G, g));
impl_skill_for_tuple!((A, a), (B, b), (C, c), (D, d), (E, e), (F, f), (G, g), (H, h));
