//! String interner for identifier storage.
//!
//! Code generation is a single synchronous traversal, so the interner is a
//! plain single-threaded table: one `FxHashMap` for lookup plus one `Vec`
//! for index-to-string resolution.

use rustc_hash::FxHashMap;

use crate::Name;

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternError {
    /// Interner exceeded capacity (over 4 billion strings).
    Overflow { count: usize },
}

impl std::fmt::Display for InternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InternError::Overflow { count } => {
                write!(
                    f,
                    "interner exceeded capacity: {count} strings, max is {}",
                    u32::MAX
                )
            }
        }
    }
}

impl std::error::Error for InternError {}

/// String interner providing O(1) lookup and equality for identifiers.
///
/// Interned strings live for the whole compilation; the backing storage is
/// leaked so lookups can hand out `&'static str` without lifetime plumbing.
pub struct StringInterner {
    /// Map from string content to index.
    map: FxHashMap<&'static str, u32>,
    /// Storage for string contents (indexed by `Name`).
    strings: Vec<&'static str>,
}

impl StringInterner {
    /// Create a new interner with the empty string pre-interned at index 0.
    pub fn new() -> Self {
        let empty: &'static str = "";
        let mut map = FxHashMap::default();
        map.insert(empty, 0);
        Self {
            map,
            strings: vec![empty],
        }
    }

    /// Try to intern a string, returning its [`Name`] or an error on overflow.
    pub fn try_intern(&mut self, s: &str) -> Result<Name, InternError> {
        if let Some(&index) = self.map.get(s) {
            return Ok(Name::from_raw(index));
        }
        let index = u32::try_from(self.strings.len()).map_err(|_| InternError::Overflow {
            count: self.strings.len(),
        })?;
        // Leak to get 'static lifetime; the interner lives for the whole
        // compilation anyway.
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        self.strings.push(leaked);
        self.map.insert(leaked, index);
        Ok(Name::from_raw(index))
    }

    /// Intern a string.
    ///
    /// # Panics
    /// Panics if the interner holds more than `u32::MAX` strings.
    pub fn intern(&mut self, s: &str) -> Name {
        match self.try_intern(s) {
            Ok(name) => name,
            Err(e) => panic!("{e}"),
        }
    }

    /// Resolve a [`Name`] back to its string content.
    ///
    /// # Panics
    /// Panics if `name` was not produced by this interner.
    #[inline]
    pub fn lookup(&self, name: Name) -> &str {
        self.strings[name.index()]
    }

    /// Number of interned strings (including the pre-interned empty string).
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Whether the interner only holds the pre-interned empty string.
    pub fn is_empty(&self) -> bool {
        self.strings.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_intern_dedup() {
        let mut interner = StringInterner::new();
        let a = interner.intern("foo");
        let b = interner.intern("foo");
        let c = interner.intern("bar");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_lookup_roundtrip() {
        let mut interner = StringInterner::new();
        let name = interner.intern("point");
        assert_eq!(interner.lookup(name), "point");
    }

    #[test]
    fn test_empty_preinterned() {
        let mut interner = StringInterner::new();
        assert_eq!(interner.intern(""), Name::EMPTY);
        assert_eq!(interner.lookup(Name::EMPTY), "");
    }
}
