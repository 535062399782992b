//! arbor-ir: the tree IR and its effect/dependency analyses.
//!
//! The IR is a tree of arena-allocated nodes ([`expression`]). Analyses are
//! visitors over the [`traversal::Walker`] engine: [`effects`] computes a
//! conservative effect summary used to gate code motion, [`branches`] finds
//! branches targeting a label, and [`manipulation`] provides the in-place
//! node eraser used when a transformation removes a node.

pub mod branches;
pub mod effects;
pub mod expression;
pub mod manipulation;
pub mod ops;
pub mod traversal;

pub use branches::BranchSeeker;
pub use effects::{Effect, EffectAnalyzer};
pub use expression::{ExprRef, Expression, ExpressionKind, IrBuilder, LocalId};
pub use ops::{BinaryOp, HostOp, UnaryOp};
pub use traversal::{Descend, Walker};
