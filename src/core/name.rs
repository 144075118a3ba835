//! Interned names for packages and targets.
//!
//! Names are compared on every graph walk the generator does, so they are
//! interned: equality is a pointer comparison and copies are free.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::{LazyLock, PoisonError, RwLock};

use serde::{Serialize, Serializer};

/// Suffix appended to a package name to name its unit-test target.
pub const TEST_SUFFIX: &str = "_test";

static NAMES: LazyLock<RwLock<HashSet<&'static str>>> =
    LazyLock::new(|| RwLock::new(HashSet::new()));

/// An interned package or target name.
#[derive(Clone, Copy)]
pub struct Name {
    inner: &'static str,
}

impl Name {
    /// Intern a name.
    pub fn new(s: impl AsRef<str>) -> Self {
        let s = s.as_ref();

        if let Some(&interned) = NAMES.read().unwrap_or_else(PoisonError::into_inner).get(s) {
            return Name { inner: interned };
        }

        let mut names = NAMES.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(&interned) = names.get(s) {
            return Name { inner: interned };
        }

        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        names.insert(leaked);
        Name { inner: leaked }
    }

    /// The name of the unit-test target belonging to a package with this name.
    pub fn test_name(&self) -> Name {
        Name::new(format!("{}{}", self.inner, TEST_SUFFIX))
    }

    #[inline]
    pub fn as_str(&self) -> &'static str {
        self.inner
    }
}

impl Deref for Name {
    type Target = str;

    #[inline]
    fn deref(&self) -> &str {
        self.inner
    }
}

impl AsRef<str> for Name {
    #[inline]
    fn as_ref(&self) -> &str {
        self.inner
    }
}

impl Borrow<str> for Name {
    #[inline]
    fn borrow(&self) -> &str {
        self.inner
    }
}

impl PartialEq for Name {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.inner, other.inner)
    }
}

impl Eq for Name {}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        self.inner == other
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        self.inner == *other
    }
}

impl PartialOrd for Name {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Name {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(other.inner)
    }
}

impl Hash for Name {
    // Must agree with `Borrow<str>`, so hash the contents rather than the pointer.
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.hash(state)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.inner, f)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.inner, f)
    }
}

impl From<&str> for Name {
    fn from(s: &str) -> Self {
        Name::new(s)
    }
}

impl From<String> for Name {
    fn from(s: String) -> Self {
        Name::new(s)
    }
}

impl From<&String> for Name {
    fn from(s: &String) -> Self {
        Name::new(s)
    }
}

impl Serialize for Name {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.inner.serialize(serializer)
    }
}
