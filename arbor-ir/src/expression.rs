use crate::ops::{BinaryOp, HostOp, UnaryOp};
use arbor_core::{Literal, Signature, Type};
use arbor_support::{Arena, Name};
use bumpalo::collections::Vec as BumpVec;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

/// A local variable slot, identified by index within the enclosing scope.
pub type LocalId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct ExprRef<'a>(NonNull<Expression<'a>>);

impl<'a> ExprRef<'a> {
    pub fn new(ptr: &'a mut Expression<'a>) -> Self {
        Self(NonNull::from(ptr))
    }

    pub fn as_ptr(&self) -> *mut Expression<'a> {
        self.0.as_ptr()
    }
}

unsafe impl<'a> Send for ExprRef<'a> {}
unsafe impl<'a> Sync for ExprRef<'a> {}

impl<'a> Deref for ExprRef<'a> {
    type Target = Expression<'a>;
    fn deref(&self) -> &Self::Target {
        unsafe { self.0.as_ref() }
    }
}

impl<'a> DerefMut for ExprRef<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        unsafe { self.0.as_mut() }
    }
}

/// One IR node. Nodes own their children exclusively: the IR is a tree,
/// never a DAG, so a walk visits every node exactly once.
#[derive(Debug)]
pub struct Expression<'a> {
    pub type_: Type,
    pub kind: ExpressionKind<'a>,
}

#[derive(Debug)]
pub enum ExpressionKind<'a> {
    Block {
        name: Option<Name>,
        list: BumpVec<'a, ExprRef<'a>>,
    },
    If {
        condition: ExprRef<'a>,
        if_true: ExprRef<'a>,
        if_false: Option<ExprRef<'a>>,
    },
    Loop {
        name: Option<Name>,
        body: ExprRef<'a>,
    },
    Break {
        name: Name,
        condition: Option<ExprRef<'a>>,
        value: Option<ExprRef<'a>>,
    },
    Switch {
        names: BumpVec<'a, Name>,
        default: Name,
        condition: ExprRef<'a>,
        value: Option<ExprRef<'a>>,
    },
    Call {
        target: Name,
        operands: BumpVec<'a, ExprRef<'a>>,
    },
    CallImport {
        target: Name,
        operands: BumpVec<'a, ExprRef<'a>>,
    },
    CallIndirect {
        signature: Signature,
        target: ExprRef<'a>,
        operands: BumpVec<'a, ExprRef<'a>>,
    },
    Host {
        op: HostOp,
        operands: BumpVec<'a, ExprRef<'a>>,
    },
    LocalGet {
        index: LocalId,
    },
    LocalSet {
        index: LocalId,
        value: ExprRef<'a>,
    },
    LocalTee {
        index: LocalId,
        value: ExprRef<'a>,
    },
    Load {
        bytes: u32,       // 1, 2, 4, or 8
        signed: bool,     // For sub-word loads
        offset: u32,      // Memory offset
        align: u32,       // Alignment (power of 2)
        ptr: ExprRef<'a>, // Address to load from
    },
    Store {
        bytes: u32,
        offset: u32,
        align: u32,
        ptr: ExprRef<'a>,
        value: ExprRef<'a>,
    },
    Const(Literal),
    Unary {
        op: UnaryOp,
        value: ExprRef<'a>,
    },
    Binary {
        op: BinaryOp,
        left: ExprRef<'a>,
        right: ExprRef<'a>,
    },
    Select {
        condition: ExprRef<'a>,
        if_true: ExprRef<'a>,
        if_false: ExprRef<'a>,
    },
    Drop {
        value: ExprRef<'a>,
    },
    Return {
        value: Option<ExprRef<'a>>,
    },
    Nop,
    Unreachable,
}

impl<'a> Expression<'a> {
    pub fn new(arena: &'a Arena, kind: ExpressionKind<'a>, type_: Type) -> ExprRef<'a> {
        ExprRef::new(arena.alloc(Expression { kind, type_ }))
    }
}

// Helpers for construction
pub struct IrBuilder<'a> {
    pub arena: &'a Arena,
}

impl<'a> IrBuilder<'a> {
    pub fn new(arena: &'a Arena) -> Self {
        Self { arena }
    }

    pub fn nop(&self) -> ExprRef<'a> {
        Expression::new(self.arena, ExpressionKind::Nop, Type::NONE)
    }

    pub fn unreachable(&self) -> ExprRef<'a> {
        Expression::new(self.arena, ExpressionKind::Unreachable, Type::UNREACHABLE)
    }

    pub fn const_(&self, value: Literal) -> ExprRef<'a> {
        let type_ = value.get_type();
        Expression::new(self.arena, ExpressionKind::Const(value), type_)
    }

    pub fn block(
        &self,
        name: Option<Name>,
        list: BumpVec<'a, ExprRef<'a>>,
        type_: Type,
    ) -> ExprRef<'a> {
        Expression::new(self.arena, ExpressionKind::Block { name, list }, type_)
    }

    pub fn if_(
        &self,
        condition: ExprRef<'a>,
        if_true: ExprRef<'a>,
        if_false: Option<ExprRef<'a>>,
        type_: Type,
    ) -> ExprRef<'a> {
        Expression::new(
            self.arena,
            ExpressionKind::If {
                condition,
                if_true,
                if_false,
            },
            type_,
        )
    }

    pub fn loop_(&self, name: Option<Name>, body: ExprRef<'a>, type_: Type) -> ExprRef<'a> {
        Expression::new(self.arena, ExpressionKind::Loop { name, body }, type_)
    }

    pub fn break_(
        &self,
        name: Name,
        condition: Option<ExprRef<'a>>,
        value: Option<ExprRef<'a>>,
        type_: Type,
    ) -> ExprRef<'a> {
        Expression::new(
            self.arena,
            ExpressionKind::Break {
                name,
                condition,
                value,
            },
            type_,
        )
    }

    pub fn switch(
        &self,
        names: BumpVec<'a, Name>,
        default: Name,
        condition: ExprRef<'a>,
        value: Option<ExprRef<'a>>,
    ) -> ExprRef<'a> {
        Expression::new(
            self.arena,
            ExpressionKind::Switch {
                names,
                default,
                condition,
                value,
            },
            Type::UNREACHABLE,
        )
    }

    pub fn call(
        &self,
        target: Name,
        operands: BumpVec<'a, ExprRef<'a>>,
        type_: Type,
    ) -> ExprRef<'a> {
        Expression::new(self.arena, ExpressionKind::Call { target, operands }, type_)
    }

    pub fn call_import(
        &self,
        target: Name,
        operands: BumpVec<'a, ExprRef<'a>>,
        type_: Type,
    ) -> ExprRef<'a> {
        Expression::new(
            self.arena,
            ExpressionKind::CallImport { target, operands },
            type_,
        )
    }

    pub fn call_indirect(
        &self,
        signature: Signature,
        target: ExprRef<'a>,
        operands: BumpVec<'a, ExprRef<'a>>,
    ) -> ExprRef<'a> {
        let type_ = signature.results;
        Expression::new(
            self.arena,
            ExpressionKind::CallIndirect {
                signature,
                target,
                operands,
            },
            type_,
        )
    }

    pub fn host(
        &self,
        op: HostOp,
        operands: BumpVec<'a, ExprRef<'a>>,
        type_: Type,
    ) -> ExprRef<'a> {
        Expression::new(self.arena, ExpressionKind::Host { op, operands }, type_)
    }

    pub fn local_get(&self, index: LocalId, type_: Type) -> ExprRef<'a> {
        Expression::new(self.arena, ExpressionKind::LocalGet { index }, type_)
    }

    pub fn local_set(&self, index: LocalId, value: ExprRef<'a>) -> ExprRef<'a> {
        Expression::new(
            self.arena,
            ExpressionKind::LocalSet { index, value },
            Type::NONE,
        )
    }

    pub fn local_tee(&self, index: LocalId, value: ExprRef<'a>, type_: Type) -> ExprRef<'a> {
        Expression::new(self.arena, ExpressionKind::LocalTee { index, value }, type_)
    }

    pub fn load(
        &self,
        bytes: u32,
        signed: bool,
        offset: u32,
        align: u32,
        ptr: ExprRef<'a>,
        type_: Type,
    ) -> ExprRef<'a> {
        Expression::new(
            self.arena,
            ExpressionKind::Load {
                bytes,
                signed,
                offset,
                align,
                ptr,
            },
            type_,
        )
    }

    pub fn store(
        &self,
        bytes: u32,
        offset: u32,
        align: u32,
        ptr: ExprRef<'a>,
        value: ExprRef<'a>,
    ) -> ExprRef<'a> {
        Expression::new(
            self.arena,
            ExpressionKind::Store {
                bytes,
                offset,
                align,
                ptr,
                value,
            },
            Type::NONE,
        )
    }

    pub fn unary(&self, op: UnaryOp, value: ExprRef<'a>, type_: Type) -> ExprRef<'a> {
        Expression::new(self.arena, ExpressionKind::Unary { op, value }, type_)
    }

    pub fn binary(
        &self,
        op: BinaryOp,
        left: ExprRef<'a>,
        right: ExprRef<'a>,
        type_: Type,
    ) -> ExprRef<'a> {
        Expression::new(self.arena, ExpressionKind::Binary { op, left, right }, type_)
    }

    pub fn select(
        &self,
        condition: ExprRef<'a>,
        if_true: ExprRef<'a>,
        if_false: ExprRef<'a>,
        type_: Type,
    ) -> ExprRef<'a> {
        Expression::new(
            self.arena,
            ExpressionKind::Select {
                condition,
                if_true,
                if_false,
            },
            type_,
        )
    }

    pub fn drop(&self, value: ExprRef<'a>) -> ExprRef<'a> {
        Expression::new(self.arena, ExpressionKind::Drop { value }, Type::NONE)
    }

    pub fn return_(&self, value: Option<ExprRef<'a>>) -> ExprRef<'a> {
        Expression::new(self.arena, ExpressionKind::Return { value }, Type::UNREACHABLE)
    }
}
