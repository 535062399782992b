//! In-place rewrites of individual nodes.

use crate::expression::{ExprRef, ExpressionKind};
use arbor_core::Type;

/// Overwrites a node in place with `Nop`, detaching its children.
///
/// Every node is one fixed-size enum slot in the arena, so the overwrite
/// can never touch neighboring storage. The children remain allocated until
/// the arena drops but are no longer reachable from the tree.
pub fn nop(expr: &mut ExprRef<'_>) {
    expr.kind = ExpressionKind::Nop;
    expr.type_ = Type::NONE;
}
