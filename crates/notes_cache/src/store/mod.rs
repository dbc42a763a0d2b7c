use std::fmt;

pub mod memory;

/// Separates the keys of the different pipeline stages so a video id can
/// never collide with a piece of transcript text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Transcript,
    Translation,
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Namespace::Transcript => write!(f, "transcript"),
            Namespace::Translation => write!(f, "translation"),
        }
    }
}

pub trait CacheStore {
    fn get(&self, namespace: Namespace, key: &str) -> Option<String>;

    fn insert(&self, namespace: Namespace, key: String, value: String);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&self);
}

impl<T: CacheStore> CacheStore for &T {
    fn get(&self, namespace: Namespace, key: &str) -> Option<String> {
        (**self).get(namespace, key)
    }

    fn insert(&self, namespace: Namespace, key: String, value: String) {
        (**self).insert(namespace, key, value)
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn clear(&self) {
        (**self).clear()
    }
}
