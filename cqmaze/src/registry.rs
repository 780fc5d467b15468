use std::{hash::Hash, sync::Arc};

use hashbrown::{Equivalent, HashMap};

/// Named implementations of one trait, with an optional default.
pub struct Registry<T: ?Sized, K = String> {
    items: HashMap<K, Arc<T>>,
    default: Option<Arc<T>>,
}

impl<T: ?Sized, K> Registry<T, K> {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            default: None,
        }
    }

    pub fn with_default(default: Arc<T>) -> Self {
        Self {
            items: HashMap::new(),
            default: Some(default),
        }
    }

    pub fn get_default(&self) -> Option<Arc<T>> {
        self.default.clone()
    }
}

impl<T: ?Sized, K> Default for Registry<T, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized, K> Registry<T, K>
where
    K: Hash + Eq,
{
    pub fn register(&mut self, key: K, item: Arc<T>) {
        self.items.insert(key, item);
    }

    pub fn get<Q>(&self, k: &Q) -> Option<Arc<T>>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.items.get(k).cloned()
    }

    pub fn is_registered<Q>(&self, k: &Q) -> bool
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.items.contains_key(k)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.items.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_and_default() {
        let mut registry: Registry<str> = Registry::with_default(Arc::from("fallback"));
        registry.register("a".to_string(), Arc::from("first"));

        assert_eq!(registry.get("a").as_deref(), Some("first"));
        assert!(registry.get("b").is_none());
        assert!(registry.is_registered("a"));
        assert!(!registry.is_registered("b"));
        assert_eq!(registry.get_default().as_deref(), Some("fallback"));
        assert_eq!(registry.keys().count(), 1);
    }
}
