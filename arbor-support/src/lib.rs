//! Shared infrastructure for the arbor IR toolchain: node arenas, string
//! interning, and fast hashing.

pub mod arena;
pub use arena::Arena;
pub mod strings;
pub use strings::{Name, StringInterner};
pub mod hash;
pub use hash::{FastHashMap, FastHashSet};
