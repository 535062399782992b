//! Effect analysis for IR expressions.
//!
//! This module computes a conservative summary of the observable effects a
//! subtree may have (control transfer, calls, memory access, local access)
//! and exposes the pairwise [`EffectAnalyzer::invalidates`] relation that
//! optimization passes use to decide whether two fragments can be reordered,
//! duplicated, or eliminated without changing program behavior.
//!
//! The summary is a monotonic accumulator: a flag, once set, is never
//! cleared, and a local id, once recorded, is never removed. Analyzing a
//! larger subtree therefore always yields a superset of the summary of any
//! of its parts.
//!
//! ## Usage
//!
//! ```rust
//! use arbor_ir::effects::EffectAnalyzer;
//! use arbor_ir::expression::IrBuilder;
//! use arbor_core::Literal;
//! use arbor_support::Arena;
//!
//! let arena = Arena::new();
//! let builder = IrBuilder::new(&arena);
//! let expr = builder.local_set(0, builder.const_(Literal::I32(1)));
//!
//! let effects = EffectAnalyzer::analyze(expr);
//! assert!(effects.has_side_effects());
//! assert!(!effects.branches());
//! ```

use crate::expression::{ExprRef, ExpressionKind, LocalId};
use crate::traversal::{Descend, Walker};
use arbor_support::FastHashSet;
use bitflags::bitflags;
use log::trace;

bitflags! {
    /// The boolean effect flags accumulated over a subtree.
    ///
    /// Local accesses are tracked per-id in [`EffectAnalyzer`], not here.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Effect: u8 {
        /// May transfer control non-locally (branch, return, trap, or the
        /// implicit back-edge of a loop).
        const BRANCHES = 1 << 0;

        /// Invokes a function, imported function, indirect call, or host
        /// intrinsic. The callee's effects are opaque.
        const CALLS = 1 << 1;

        /// May read from linear memory.
        const MEMORY_READ = 1 << 2;

        /// May write to linear memory.
        const MEMORY_WRITE = 1 << 3;
    }
}

/// Accumulates the effects of one subtree over a single read-only walk.
///
/// An analyzer is created for one query, driven across one subtree, then
/// read and discarded. The walk never mutates the tree.
#[derive(Debug, Default)]
pub struct EffectAnalyzer {
    effects: Effect,
    locals_read: FastHashSet<LocalId>,
    locals_written: FastHashSet<LocalId>,
}

impl<'a> Walker<'a> for EffectAnalyzer {
    fn pre_visit(&mut self, expr: ExprRef<'a>) -> Descend {
        // A loop's back-edge is a control transfer that exists before (and
        // regardless of) anything in its body, so it must be recorded in
        // the pre-descent hook: an empty or early-exiting body would
        // otherwise leave the loop looking effect-free.
        if let ExpressionKind::Loop { .. } = expr.kind {
            self.effects |= Effect::BRANCHES;
        }
        Descend::Children
    }

    fn post_visit(&mut self, expr: ExprRef<'a>) {
        match &expr.kind {
            ExpressionKind::Block { .. }
            | ExpressionKind::If { .. }
            | ExpressionKind::Loop { .. }
            | ExpressionKind::Break { .. }
            | ExpressionKind::Switch { .. }
            | ExpressionKind::Return { .. }
            | ExpressionKind::Unreachable => {
                self.effects |= Effect::BRANCHES;
            }
            ExpressionKind::Call { .. }
            | ExpressionKind::CallImport { .. }
            | ExpressionKind::CallIndirect { .. }
            | ExpressionKind::Host { .. } => {
                self.effects |= Effect::CALLS;
            }
            ExpressionKind::LocalGet { index } => {
                self.locals_read.insert(*index);
            }
            ExpressionKind::LocalSet { index, .. } | ExpressionKind::LocalTee { index, .. } => {
                self.locals_written.insert(*index);
            }
            ExpressionKind::Load { .. } => {
                self.effects |= Effect::MEMORY_READ;
            }
            ExpressionKind::Store { .. } => {
                self.effects |= Effect::MEMORY_WRITE;
            }
            ExpressionKind::Const(_)
            | ExpressionKind::Unary { .. }
            | ExpressionKind::Binary { .. }
            | ExpressionKind::Select { .. }
            | ExpressionKind::Drop { .. }
            | ExpressionKind::Nop => {}
        }
    }
}

impl EffectAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyzes a subtree and returns its aggregate effects.
    pub fn analyze(expr: ExprRef<'_>) -> Self {
        let mut analyzer = Self::new();
        analyzer.walk(expr);
        trace!(
            "analyzed subtree: effects={:?} locals_read={} locals_written={}",
            analyzer.effects,
            analyzer.locals_read.len(),
            analyzer.locals_written.len()
        );
        analyzer
    }

    /// Analyzes a sibling sequence and returns the union of its effects.
    pub fn analyze_list(exprs: &[ExprRef<'_>]) -> Self {
        let mut analyzer = Self::new();
        for expr in exprs {
            analyzer.walk(*expr);
        }
        analyzer
    }

    /// The accumulated boolean flags.
    #[inline]
    pub fn effects(&self) -> Effect {
        self.effects
    }

    /// True if the subtree may transfer control non-locally.
    #[inline]
    pub fn branches(&self) -> bool {
        self.effects.contains(Effect::BRANCHES)
    }

    /// True if the subtree performs any kind of call.
    #[inline]
    pub fn calls(&self) -> bool {
        self.effects.contains(Effect::CALLS)
    }

    /// True if the subtree reads linear memory directly.
    #[inline]
    pub fn reads_memory(&self) -> bool {
        self.effects.contains(Effect::MEMORY_READ)
    }

    /// True if the subtree writes linear memory directly.
    #[inline]
    pub fn writes_memory(&self) -> bool {
        self.effects.contains(Effect::MEMORY_WRITE)
    }

    /// Locals directly read by the subtree.
    #[inline]
    pub fn locals_read(&self) -> &FastHashSet<LocalId> {
        &self.locals_read
    }

    /// Locals directly written by the subtree.
    #[inline]
    pub fn locals_written(&self) -> &FastHashSet<LocalId> {
        &self.locals_written
    }

    /// True if any local is read or written.
    #[inline]
    pub fn accesses_local(&self) -> bool {
        !self.locals_read.is_empty() || !self.locals_written.is_empty()
    }

    /// True if the subtree may touch memory. A call conservatively counts:
    /// the callee's effects are opaque.
    #[inline]
    pub fn accesses_memory(&self) -> bool {
        self.effects
            .intersects(Effect::CALLS | Effect::MEMORY_READ | Effect::MEMORY_WRITE)
    }

    /// True if removing the subtree could change program state.
    #[inline]
    pub fn has_side_effects(&self) -> bool {
        self.effects.intersects(Effect::CALLS | Effect::MEMORY_WRITE)
            || !self.locals_written.is_empty()
    }

    /// True if any effect at all was observed. Once this holds, no further
    /// traversal changes the answer for "is this subtree effect-free".
    #[inline]
    pub fn has_anything(&self) -> bool {
        !self.effects.is_empty() || self.accesses_local()
    }

    /// Checks whether these effects would invalidate `other`: whether it is
    /// unsafe to reorder, duplicate, or eliminate one of the two fragments
    /// relative to the other, given their original order.
    ///
    /// The relation is symmetric: `a.invalidates(b) == b.invalidates(a)`.
    /// A read-read overlap on the same local is never a hazard.
    pub fn invalidates(&self, other: &EffectAnalyzer) -> bool {
        // Non-local control transfer anywhere forbids reordering outright.
        if self.branches() || other.branches() {
            return true;
        }
        // A write or opaque call on either side conflicts with any memory
        // access on the other.
        if (self.writes_memory() || self.calls()) && other.accesses_memory() {
            return true;
        }
        if self.accesses_memory() && (other.writes_memory() || other.calls()) {
            return true;
        }
        // Write-write and write-read hazards on individual locals.
        for local in self.locals_written.iter() {
            if other.locals_written.contains(local) || other.locals_read.contains(local) {
                return true;
            }
        }
        // Read-write hazards; the mirror case is covered above.
        self.locals_read
            .iter()
            .any(|local| other.locals_written.contains(local))
    }
}
