//! Identifier management using string interning for efficient storage and comparison
//!
//! This module provides two types:
//!
//! - [`Id`]: an interned string symbol, cheap to copy, compare and hash.
//! - [`Identifier`]: a dot-separated qualified name together with its simple
//!   (last-segment) name. Identifiers are the sole identity of documented types.

use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for efficient identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock");
    f(&mut interner)
}

/// Efficient identifier type using string interning
///
/// Two `Id`s are equal exactly when their strings are equal. Ordering is the
/// lexicographic order of the underlying strings, so it agrees with equality.
///
/// # Examples
///
/// ```
/// use documl_core::identifier::Id;
///
/// let package = Id::new("com.acme");
/// let widget = package.create_nested(Id::new("Widget"));
/// assert_eq!(widget, "com.acme.Widget");
/// assert!(package < widget);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    ///
    /// # Arguments
    ///
    /// * `name` - The string representation of the identifier
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }

    /// Creates a nested ID by combining parent ID and child ID with a '.' separator.
    ///
    /// An empty parent yields the child unchanged, which is how names in the
    /// unnamed (default) namespace are formed.
    ///
    /// # Examples
    ///
    /// ```
    /// use documl_core::identifier::Id;
    ///
    /// let nested = Id::new("com").create_nested(Id::new("acme"));
    /// assert_eq!(nested, "com.acme");
    ///
    /// let top_level = Id::new("").create_nested(Id::new("Widget"));
    /// assert_eq!(top_level, "Widget");
    /// ```
    pub fn create_nested(&self, child_id: Id) -> Self {
        with_interner(|interner| {
            let parent_str = interner
                .resolve(self.0)
                .expect("Parent ID should exist in interner");
            let child_str = interner
                .resolve(child_id.0)
                .expect("Child ID should exist in interner");
            let nested_name = if parent_str.is_empty() {
                child_str.to_string()
            } else {
                format!("{parent_str}.{child_str}")
            };
            Self(interner.get_or_intern(&nested_name))
        })
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let str_value = with_interner(|interner| {
            interner
                .resolve(self.0)
                .expect("Symbol should exist in interner")
                .to_string()
        });
        f.write_str(&str_value)
    }
}

impl PartialOrd for Id {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Id {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.0 == other.0 {
            return Ordering::Equal;
        }
        with_interner(|interner| {
            let lhs = interner.resolve(self.0).expect("Symbol should exist in interner");
            let rhs = interner.resolve(other.0).expect("Symbol should exist in interner");
            lhs.cmp(rhs)
        })
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        with_interner(|interner| {
            interner
                .resolve(self.0)
                .expect("Symbol should exist in interner")
                == other
        })
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

/// A qualified, dot-separated name with its simple (last-segment) name.
///
/// Equality, hashing and ordering consider the qualified name only. The simple
/// name is display information: a nested type `com.acme.Outer.Inner` keeps
/// `Inner` as its simple name.
///
/// # Examples
///
/// ```
/// use documl_core::identifier::Identifier;
///
/// let widget = Identifier::new("com.acme.Widget");
/// assert_eq!(widget.simple(), "Widget");
/// assert_eq!(widget.name_in("com.acme").as_deref(), Some("Widget"));
/// assert_eq!(widget.name_in("com.other"), None);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Identifier {
    qualified: Id,
    simple: Id,
}

impl Identifier {
    /// Creates an identifier whose simple name is the last segment of `qualified`.
    pub fn new(qualified: &str) -> Self {
        let simple = qualified.rsplit('.').next().unwrap_or(qualified);
        Self::with_simple_name(qualified, simple)
    }

    /// Creates an identifier with an explicit simple name.
    pub fn with_simple_name(qualified: &str, simple: &str) -> Self {
        Self {
            qualified: Id::new(qualified),
            simple: Id::new(simple),
        }
    }

    /// The interned qualified name.
    pub fn id(&self) -> Id {
        self.qualified
    }

    /// The qualified name, e.g. `com.acme.Widget`.
    pub fn qualified(&self) -> String {
        self.qualified.to_string()
    }

    /// The simple name, e.g. `Widget`.
    pub fn simple(&self) -> String {
        self.simple.to_string()
    }

    /// Returns the part of the qualified name following `namespace.`, if the
    /// qualified name starts with that prefix.
    pub fn name_in(&self, namespace: &str) -> Option<String> {
        let qualified = self.qualified();
        qualified
            .strip_prefix(namespace)
            .and_then(|rest| rest.strip_prefix('.'))
            .map(str::to_string)
    }

    /// Renders the canonical diagram name for this identifier.
    ///
    /// Inside a namespace block (`context`), names that do not belong to that
    /// namespace get a leading `.` so they stay absolute.
    pub fn to_uml(&self, context: Option<&str>) -> String {
        let qualified = self.qualified();
        match context {
            Some(namespace) if !namespace.is_empty() && self.name_in(namespace).is_none() => {
                format!(".{qualified}")
            }
            _ => qualified,
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.qualified, f)
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.qualified == other.qualified
    }
}

impl Eq for Identifier {}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.qualified.hash(state);
    }
}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.qualified.cmp(&other.qualified)
    }
}

impl From<&str> for Identifier {
    fn from(qualified: &str) -> Self {
        Self::new(qualified)
    }
}
