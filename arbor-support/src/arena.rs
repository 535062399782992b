use bumpalo::Bump;

/// Allocation region for IR nodes.
///
/// Every node is a fixed-size tagged variant allocated in the arena, so a
/// node's slot can be overwritten in place with any other variant without
/// touching neighboring storage. Nothing is freed until the arena drops.
pub struct Arena {
    bump: Bump,
}

impl Arena {
    pub fn new() -> Self {
        Arena { bump: Bump::new() }
    }

    /// Allocate a value in the arena, returning a slot valid for the arena
    /// lifetime.
    pub fn alloc<T>(&self, value: T) -> &mut T {
        self.bump.alloc(value)
    }

    /// The underlying bump allocator, for building `bumpalo` collections
    /// (child lists) in the same region as the nodes that own them.
    pub fn bump(&self) -> &Bump {
        &self.bump
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}
