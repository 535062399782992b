use crate::hash::FastHashMap;
use once_cell::sync::Lazy;
use std::fmt;
use std::sync::RwLock;

/// A canonicalizing string interner. Interned strings live for the rest of
/// the process, so handles are plain `&'static str`.
pub struct StringInterner {
    strings: RwLock<FastHashMap<String, &'static str>>,
}

impl StringInterner {
    pub fn new() -> Self {
        Self {
            strings: RwLock::new(FastHashMap::default()),
        }
    }

    pub fn intern(&self, s: &str) -> &'static str {
        // Fast path: read-lock
        {
            let strings = self.strings.read().unwrap();
            if let Some(&interned) = strings.get(s) {
                return interned;
            }
        }

        // Slow path: write-lock, re-check before inserting
        let mut strings = self.strings.write().unwrap();
        if let Some(&interned) = strings.get(s) {
            return interned;
        }

        let leaked: &'static str = Box::leak(s.to_string().into_boxed_str());
        strings.insert(s.to_string(), leaked);
        leaked
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_INTERNER: Lazy<StringInterner> = Lazy::new(StringInterner::new);

/// An interned identifier: a label, call target, or similar name in the IR.
///
/// Two `Name`s built from equal strings are equal; copies are cheap handles.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(&'static str);

impl Name {
    pub fn new(s: &str) -> Self {
        Name(GLOBAL_INTERNER.intern(s))
    }

    pub fn as_str(self) -> &'static str {
        self.0
    }
}

impl From<&str> for Name {
    fn from(s: &str) -> Self {
        Name::new(s)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
