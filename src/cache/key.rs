//! Composite cache keys.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Key addressing one entry: the stored type plus a qualifier.
///
/// A missing qualifier is the empty string, so `None` and `Some("")` address
/// the same entry. The type name is carried for diagnostics and is not part
/// of equality or hashing.
#[derive(Clone)]
pub struct CacheKey {
    type_id: TypeId,
    type_name: &'static str,
    qualifier: Box<str>,
}

impl CacheKey {
    /// Build the key for values of type `T` under `qualifier`.
    pub fn of<T: Any>(qualifier: Option<&str>) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            qualifier: qualifier.unwrap_or_default().into(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn qualifier(&self) -> &str {
        &self.qualifier
    }
}

impl PartialEq for CacheKey {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id && self.qualifier == other.qualifier
    }
}

impl Eq for CacheKey {}

impl Hash for CacheKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
        self.qualifier.hash(state);
    }
}

impl fmt::Debug for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheKey")
            .field("type_name", &self.type_name)
            .field("qualifier", &self.qualifier)
            .finish()
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.qualifier.is_empty() {
            write!(f, "{}", self.type_name)
        } else {
            write!(f, "{}[{}]", self.type_name, self.qualifier)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Alpha;
    struct Beta;

    #[test]
    fn missing_qualifier_is_empty_qualifier() {
        assert_eq!(CacheKey::of::<Alpha>(None), CacheKey::of::<Alpha>(Some("")));
    }

    #[test]
    fn empty_qualifier_differs_from_named() {
        assert_ne!(CacheKey::of::<Alpha>(None), CacheKey::of::<Alpha>(Some("a")));
    }

    #[test]
    fn same_qualifier_different_types_differ() {
        assert_ne!(
            CacheKey::of::<Alpha>(Some("shared")),
            CacheKey::of::<Beta>(Some("shared"))
        );
    }

    #[test]
    fn hashing_agrees_with_equality() {
        let mut set = HashSet::new();
        set.insert(CacheKey::of::<Alpha>(None));
        set.insert(CacheKey::of::<Alpha>(Some("")));
        set.insert(CacheKey::of::<Alpha>(Some("x")));
        set.insert(CacheKey::of::<Beta>(Some("x")));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn display_includes_qualifier_when_present() {
        let plain = CacheKey::of::<u32>(None).to_string();
        let named = CacheKey::of::<u32>(Some("port")).to_string();
        assert_eq!(plain, "u32");
        assert_eq!(named, "u32[port]");
    }
}
