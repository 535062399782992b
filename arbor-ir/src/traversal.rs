//! The traversal engine: a recursive walk over an expression tree with a
//! pre-descent and a post-descent hook per node.
//!
//! Children are visited in their natural left-to-right evaluation order, so
//! a `post_visit` always runs after every effect of the node's children has
//! been observed. The pre-descent hook may short-circuit the descent into a
//! node's children; the node's own `post_visit` still fires in that case.

use crate::expression::{ExprRef, ExpressionKind};

/// Whether to descend into a node's children after its pre-descent hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Descend {
    Children,
    Skip,
}

pub trait Walker<'a> {
    /// Pre-descent hook, invoked before any child is visited.
    fn pre_visit(&mut self, _expr: ExprRef<'a>) -> Descend {
        Descend::Children
    }

    /// Post-descent hook, invoked after all children have been visited.
    fn post_visit(&mut self, _expr: ExprRef<'a>) {}

    fn walk(&mut self, expr: ExprRef<'a>) {
        if self.pre_visit(expr) == Descend::Children {
            self.walk_children(expr);
        }
        self.post_visit(expr);
    }

    fn walk_children(&mut self, expr: ExprRef<'a>) {
        match &expr.kind {
            ExpressionKind::Block { list, .. } => {
                for child in list.iter() {
                    self.walk(*child);
                }
            }
            ExpressionKind::If {
                condition,
                if_true,
                if_false,
            } => {
                self.walk(*condition);
                self.walk(*if_true);
                if let Some(false_branch) = if_false {
                    self.walk(*false_branch);
                }
            }
            ExpressionKind::Loop { body, .. } => {
                self.walk(*body);
            }
            ExpressionKind::Break {
                condition, value, ..
            } => {
                if let Some(cond) = condition {
                    self.walk(*cond);
                }
                if let Some(val) = value {
                    self.walk(*val);
                }
            }
            ExpressionKind::Switch {
                condition, value, ..
            } => {
                self.walk(*condition);
                if let Some(val) = value {
                    self.walk(*val);
                }
            }
            ExpressionKind::Call { operands, .. }
            | ExpressionKind::CallImport { operands, .. }
            | ExpressionKind::Host { operands, .. } => {
                for operand in operands.iter() {
                    self.walk(*operand);
                }
            }
            ExpressionKind::CallIndirect {
                target, operands, ..
            } => {
                self.walk(*target);
                for operand in operands.iter() {
                    self.walk(*operand);
                }
            }
            ExpressionKind::LocalSet { value, .. } | ExpressionKind::LocalTee { value, .. } => {
                self.walk(*value);
            }
            ExpressionKind::Load { ptr, .. } => {
                self.walk(*ptr);
            }
            ExpressionKind::Store { ptr, value, .. } => {
                self.walk(*ptr);
                self.walk(*value);
            }
            ExpressionKind::Unary { value, .. } => {
                self.walk(*value);
            }
            ExpressionKind::Binary { left, right, .. } => {
                self.walk(*left);
                self.walk(*right);
            }
            ExpressionKind::Select {
                condition,
                if_true,
                if_false,
            } => {
                self.walk(*condition);
                self.walk(*if_true);
                self.walk(*if_false);
            }
            ExpressionKind::Drop { value } => {
                self.walk(*value);
            }
            ExpressionKind::Return { value } => {
                if let Some(val) = value {
                    self.walk(*val);
                }
            }
            ExpressionKind::Const(_)
            | ExpressionKind::LocalGet { .. }
            | ExpressionKind::Nop
            | ExpressionKind::Unreachable => {}
        }
    }
}
