use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::ffi::{OsStr, OsString};
use std::hash::{BuildHasher, Hash};

/// Where the binder reads variables from.
pub trait EnvSource {
    /// Returns the value of `key`, or `None` when it is unset.
    fn lookup(&self, key: &str) -> Option<OsString>;
}

/// The current process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn lookup(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }
}

impl<K, V, S> EnvSource for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<OsStr>,
    S: BuildHasher,
{
    fn lookup(&self, key: &str) -> Option<OsString> {
        self.get(key).map(|value| value.as_ref().to_os_string())
    }
}

impl<K, V> EnvSource for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsRef<OsStr>,
{
    fn lookup(&self, key: &str) -> Option<OsString> {
        self.get(key).map(|value| value.as_ref().to_os_string())
    }
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn lookup(&self, key: &str) -> Option<OsString> {
        (**self).lookup(key)
    }
}
