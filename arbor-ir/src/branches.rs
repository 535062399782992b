//! Finding branches that target a specific label.

use crate::expression::{ExprRef, ExpressionKind};
use crate::traversal::Walker;
use arbor_support::Name;
use log::trace;

/// Counts `Break` nodes targeting one label over a single scan.
///
/// Lexical scoping is not tracked: a matching `Break` counts regardless of
/// nested constructs that reintroduce the same label. Callers must keep
/// labels unique within the queried region (or rename beforehand); this is
/// a documented obligation, not something the seeker compensates for.
pub struct BranchSeeker {
    target: Name,
    found: usize,
}

impl<'a> Walker<'a> for BranchSeeker {
    fn post_visit(&mut self, expr: ExprRef<'a>) {
        if let ExpressionKind::Break { name, .. } = &expr.kind {
            if *name == self.target {
                self.found += 1;
            }
        }
    }
}

impl BranchSeeker {
    pub fn new(target: Name) -> Self {
        Self { target, found: 0 }
    }

    /// The number of `Break`s in `expr` targeting `target`.
    pub fn count(expr: ExprRef<'_>, target: Name) -> usize {
        let mut seeker = BranchSeeker::new(target);
        seeker.walk(expr);
        trace!("sought {}: {} break(s)", target, seeker.found);
        seeker.found
    }

    /// True iff `expr` contains at least one `Break` targeting `target`.
    pub fn has(expr: ExprRef<'_>, target: Name) -> bool {
        Self::count(expr, target) > 0
    }
}
