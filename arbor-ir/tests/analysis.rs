use arbor_core::{Literal, Type};
use arbor_ir::branches::BranchSeeker;
use arbor_ir::effects::EffectAnalyzer;
use arbor_ir::expression::{ExprRef, IrBuilder};
use arbor_ir::manipulation;
use arbor_ir::traversal::Walker;
use arbor_support::{Arena, Name};
use proptest::prelude::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ---------------------------------------------------------------------------
// End-to-end consumer scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_local_read_summary() {
    init_logging();
    let arena = Arena::new();
    let builder = IrBuilder::new(&arena);

    let effects = EffectAnalyzer::analyze(builder.local_get(0, Type::I32));
    assert!(effects.accesses_local());
    assert!(effects.locals_read().contains(&0));
    assert!(effects.locals_written().is_empty());
    assert!(!effects.branches());
    assert!(!effects.calls());
    assert!(!effects.reads_memory());
    assert!(!effects.writes_memory());
    assert!(!effects.has_side_effects());
}

#[test]
fn test_set_of_load_summary() {
    init_logging();
    let arena = Arena::new();
    let builder = IrBuilder::new(&arena);

    let addr = builder.const_(Literal::I32(64));
    let set = builder.local_set(0, builder.load(4, false, 0, 4, addr, Type::I32));

    let effects = EffectAnalyzer::analyze(set);
    assert!(effects.locals_written().contains(&0));
    assert!(effects.reads_memory());
    assert!(effects.has_side_effects());
}

#[test]
fn test_call_touches_memory_conservatively() {
    init_logging();
    let arena = Arena::new();
    let builder = IrBuilder::new(&arena);

    let call = builder.call(Name::new("f"), bumpalo::vec![in arena.bump();], Type::NONE);
    let effects = EffectAnalyzer::analyze(call);
    assert!(effects.calls());
    assert!(!effects.reads_memory());
    assert!(!effects.writes_memory());
    assert!(effects.accesses_memory());
}

#[test]
fn test_block_with_break_branches() {
    init_logging();
    let arena = Arena::new();
    let builder = IrBuilder::new(&arena);

    let br = builder.break_(Name::new("l1"), None, None, Type::NONE);
    let block = builder.block(
        Some(Name::new("l1")),
        bumpalo::vec![in arena.bump(); br],
        Type::NONE,
    );
    assert!(EffectAnalyzer::analyze(block).branches());
}

#[test]
fn test_reorder_gating_on_locals() {
    init_logging();
    let arena = Arena::new();
    let builder = IrBuilder::new(&arena);

    let write_x = EffectAnalyzer::analyze(builder.local_set(0, builder.const_(Literal::I32(1))));
    let read_x = EffectAnalyzer::analyze(builder.local_get(0, Type::I32));
    let read_x2 = EffectAnalyzer::analyze(builder.local_get(0, Type::I32));

    assert!(write_x.invalidates(&read_x));
    assert!(!read_x.invalidates(&read_x2));
}

#[test]
fn test_branch_seeker_scenarios() {
    init_logging();
    let arena = Arena::new();
    let builder = IrBuilder::new(&arena);

    let b1 = builder.break_(Name::new("l1"), None, None, Type::NONE);
    let b2 = builder.break_(Name::new("l2"), None, None, Type::NONE);
    let both = builder.block(None, bumpalo::vec![in arena.bump(); b1, b2], Type::NONE);
    assert!(BranchSeeker::has(both, Name::new("l1")));

    let b3 = builder.break_(Name::new("l2"), None, None, Type::NONE);
    let only_l2 = builder.block(None, bumpalo::vec![in arena.bump(); b3], Type::NONE);
    assert!(!BranchSeeker::has(only_l2, Name::new("l1")));
}

#[test]
fn test_dead_code_elimination_flow() {
    init_logging();
    let arena = Arena::new();
    let builder = IrBuilder::new(&arena);

    // block { drop(local.get 0); store ... }: the drop is removable, the
    // store is not. This is the decision sequence an optimization pass
    // runs: summarize each statement, erase the effect-free ones.
    let dead = builder.drop(builder.local_get(0, Type::I32));
    let store = builder.store(
        4,
        0,
        4,
        builder.const_(Literal::I32(0)),
        builder.const_(Literal::I32(1)),
    );
    let list = bumpalo::vec![in arena.bump(); dead, store];
    let mut block = builder.block(None, list, Type::NONE);

    if let arbor_ir::ExpressionKind::Block { list, .. } = &mut block.kind {
        for child in list.iter_mut() {
            let effects = EffectAnalyzer::analyze(*child);
            if !effects.has_side_effects() && !effects.branches() {
                manipulation::nop(child);
            }
        }
    }

    let after = EffectAnalyzer::analyze(block);
    assert!(!after.accesses_local());
    assert!(after.writes_memory());
}

// ---------------------------------------------------------------------------
// Property tests over generated trees
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum TreeShape {
    Nop,
    ConstI32(i32),
    LocalGet(u32),
    LocalSet(u32, Box<TreeShape>),
    Load(Box<TreeShape>),
    Store(Box<TreeShape>, Box<TreeShape>),
    Call(Vec<TreeShape>),
    Block(u8, Vec<TreeShape>),
    Loop(u8, Box<TreeShape>),
    Break(u8),
    If(Box<TreeShape>, Box<TreeShape>),
    Return,
}

impl TreeShape {
    fn break_count(&self, label: u8) -> usize {
        match self {
            TreeShape::Break(l) => usize::from(*l == label),
            TreeShape::LocalSet(_, v) | TreeShape::Load(v) | TreeShape::Loop(_, v) => {
                v.break_count(label)
            }
            TreeShape::Store(a, b) | TreeShape::If(a, b) => {
                a.break_count(label) + b.break_count(label)
            }
            TreeShape::Call(children) | TreeShape::Block(_, children) => {
                children.iter().map(|c| c.break_count(label)).sum()
            }
            _ => 0,
        }
    }

    fn contains_call(&self) -> bool {
        match self {
            TreeShape::Call(_) => true,
            TreeShape::LocalSet(_, v) | TreeShape::Load(v) | TreeShape::Loop(_, v) => {
                v.contains_call()
            }
            TreeShape::Store(a, b) | TreeShape::If(a, b) => a.contains_call() || b.contains_call(),
            TreeShape::Block(_, children) => children.iter().any(|c| c.contains_call()),
            _ => false,
        }
    }

    fn contains_local(&self) -> bool {
        match self {
            TreeShape::LocalGet(_) | TreeShape::LocalSet(..) => true,
            TreeShape::Load(v) | TreeShape::Loop(_, v) => v.contains_local(),
            TreeShape::Store(a, b) | TreeShape::If(a, b) => a.contains_local() || b.contains_local(),
            TreeShape::Call(children) | TreeShape::Block(_, children) => {
                children.iter().any(|c| c.contains_local())
            }
            _ => false,
        }
    }
}

fn label(n: u8) -> Name {
    Name::new(&format!("l{}", n))
}

fn build<'a>(builder: &IrBuilder<'a>, shape: &TreeShape) -> ExprRef<'a> {
    match shape {
        TreeShape::Nop => builder.nop(),
        TreeShape::ConstI32(v) => builder.const_(Literal::I32(*v)),
        TreeShape::LocalGet(i) => builder.local_get(*i, Type::I32),
        TreeShape::LocalSet(i, v) => builder.local_set(*i, build(builder, v)),
        TreeShape::Load(ptr) => builder.load(4, false, 0, 4, build(builder, ptr), Type::I32),
        TreeShape::Store(ptr, v) => {
            builder.store(4, 0, 4, build(builder, ptr), build(builder, v))
        }
        TreeShape::Call(operands) => {
            let mut list = bumpalo::vec![in builder.arena.bump();];
            for op in operands {
                list.push(build(builder, op));
            }
            builder.call(Name::new("callee"), list, Type::NONE)
        }
        TreeShape::Block(l, children) => {
            let mut list = bumpalo::vec![in builder.arena.bump();];
            for child in children {
                list.push(build(builder, child));
            }
            builder.block(Some(label(*l)), list, Type::NONE)
        }
        TreeShape::Loop(l, body) => builder.loop_(Some(label(*l)), build(builder, body), Type::NONE),
        TreeShape::Break(l) => builder.break_(label(*l), None, None, Type::NONE),
        TreeShape::If(cond, then) => {
            builder.if_(build(builder, cond), build(builder, then), None, Type::NONE)
        }
        TreeShape::Return => builder.return_(None),
    }
}

fn tree_strategy() -> impl Strategy<Value = TreeShape> {
    let leaf = prop_oneof![
        Just(TreeShape::Nop),
        any::<i32>().prop_map(TreeShape::ConstI32),
        (0u32..8).prop_map(TreeShape::LocalGet),
        (0u8..4).prop_map(TreeShape::Break),
        Just(TreeShape::Return),
    ];
    leaf.prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            ((0u32..8), inner.clone())
                .prop_map(|(i, v)| TreeShape::LocalSet(i, Box::new(v))),
            inner.clone().prop_map(|p| TreeShape::Load(Box::new(p))),
            (inner.clone(), inner.clone())
                .prop_map(|(p, v)| TreeShape::Store(Box::new(p), Box::new(v))),
            prop::collection::vec(inner.clone(), 0..4).prop_map(TreeShape::Call),
            ((0u8..4), prop::collection::vec(inner.clone(), 0..4))
                .prop_map(|(l, children)| TreeShape::Block(l, children)),
            ((0u8..4), inner.clone()).prop_map(|(l, b)| TreeShape::Loop(l, Box::new(b))),
            (inner.clone(), inner.clone())
                .prop_map(|(c, t)| TreeShape::If(Box::new(c), Box::new(t))),
        ]
    })
}

struct Collector<'a> {
    nodes: Vec<ExprRef<'a>>,
}

impl<'a> Walker<'a> for Collector<'a> {
    fn post_visit(&mut self, expr: ExprRef<'a>) {
        self.nodes.push(expr);
    }
}

proptest! {
    #[test]
    fn prop_monotonic_over_subtrees(shape in tree_strategy()) {
        let arena = Arena::new();
        let builder = IrBuilder::new(&arena);
        let root = build(&builder, &shape);

        let root_effects = EffectAnalyzer::analyze(root);
        let mut collector = Collector { nodes: vec![] };
        collector.walk(root);

        for node in collector.nodes {
            let sub = EffectAnalyzer::analyze(node);
            prop_assert!(root_effects.effects().contains(sub.effects()));
            prop_assert!(sub.locals_read().is_subset(root_effects.locals_read()));
            prop_assert!(sub.locals_written().is_subset(root_effects.locals_written()));
        }
    }

    #[test]
    fn prop_calls_imply_memory_access(shape in tree_strategy()) {
        let arena = Arena::new();
        let builder = IrBuilder::new(&arena);
        let root = build(&builder, &shape);

        let effects = EffectAnalyzer::analyze(root);
        if shape.contains_call() {
            prop_assert!(effects.calls());
            prop_assert!(effects.accesses_memory());
        }
        if !shape.contains_local() {
            prop_assert!(!effects.accesses_local());
        }
    }

    #[test]
    fn prop_invalidates_is_symmetric(a in tree_strategy(), b in tree_strategy()) {
        let arena = Arena::new();
        let builder = IrBuilder::new(&arena);

        let ea = EffectAnalyzer::analyze(build(&builder, &a));
        let eb = EffectAnalyzer::analyze(build(&builder, &b));
        prop_assert_eq!(ea.invalidates(&eb), eb.invalidates(&ea));
    }

    #[test]
    fn prop_branch_seeker_matches_ground_truth(shape in tree_strategy(), l in 0u8..4) {
        let arena = Arena::new();
        let builder = IrBuilder::new(&arena);
        let root = build(&builder, &shape);

        let expected = shape.break_count(l);
        prop_assert_eq!(BranchSeeker::count(root, label(l)), expected);
        prop_assert_eq!(BranchSeeker::has(root, label(l)), expected > 0);
    }

    #[test]
    fn prop_erased_node_is_inert(shape in tree_strategy()) {
        let arena = Arena::new();
        let builder = IrBuilder::new(&arena);
        let mut root = build(&builder, &shape);

        manipulation::nop(&mut root);
        prop_assert!(!EffectAnalyzer::analyze(root).has_anything());
    }
}
