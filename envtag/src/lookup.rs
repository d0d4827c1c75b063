//! Environment lookup abstraction

use std::collections::{BTreeMap, HashMap};
use std::env;

/// Key to string lookup the binder reads values through.
///
/// Implementations must be side-effect free for the duration of one binding call.
pub trait Lookup {
    fn lookup(&self, key: &str) -> Option<String>;
}

/// The process environment. Values that are not valid UTF-8 count as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Lookup for ProcessEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

impl<S: std::hash::BuildHasher> Lookup for HashMap<String, String, S> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl Lookup for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<L: Lookup + ?Sized> Lookup for &L {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

/// Lookup backed by a closure, see [`lookup_fn`].
#[derive(Debug, Clone, Copy)]
pub struct FnLookup<F>(F);

impl<F> Lookup for FnLookup<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn lookup(&self, key: &str) -> Option<String> {
        (self.0)(key)
    }
}

/// Wrap a closure as a [`Lookup`].
///
/// ```rust
/// use envtag::{lookup_fn, Lookup};
///
/// let env = lookup_fn(|key| (key == "PORT").then(|| "8080".to_string()));
/// assert_eq!(env.lookup("PORT").as_deref(), Some("8080"));
/// assert_eq!(env.lookup("HOST"), None);
/// ```
pub fn lookup_fn<F>(f: F) -> FnLookup<F>
where
    F: Fn(&str) -> Option<String>,
{
    FnLookup(f)
}
