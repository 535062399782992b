#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum UnaryOp {
    ClzInt32,
    CtzInt32,
    PopcntInt32,
    EqZInt32,
    ClzInt64,
    CtzInt64,
    PopcntInt64,
    EqZInt64,
    NegFloat32,
    AbsFloat32,
    SqrtFloat32,
    NegFloat64,
    AbsFloat64,
    SqrtFloat64,
    WrapInt64,
    ExtendSInt32,
    ExtendUInt32,
    PromoteFloat32,
    DemoteFloat64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum BinaryOp {
    AddInt32,
    SubInt32,
    MulInt32,
    DivSInt32,
    DivUInt32,
    RemSInt32,
    RemUInt32,
    AndInt32,
    OrInt32,
    XorInt32,
    ShlInt32,
    EqInt32,
    NeInt32,
    LtSInt32,
    AddInt64,
    SubInt64,
    MulInt64,
    AddFloat32,
    SubFloat32,
    MulFloat32,
    DivFloat32,
    AddFloat64,
    SubFloat64,
    MulFloat64,
    DivFloat64,
}

/// Host environment intrinsics: queries and requests directed at the
/// embedder rather than at the program's own state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum HostOp {
    PageSize,
    CurrentMemory,
    GrowMemory,
    HasFeature,
}
