//! Identifier management using string interning.
//!
//! Every container, element and relation in a diagram is addressed by an
//! [`Id`]. Relations refer to the shapes they connect by `Id` only, so the
//! diagram arena never holds a second owner of any shape.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner backing every [`Id`].
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

/// Runs `f` with exclusive access to the global interner.
fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock");
    f(&mut interner)
}

/// Copyable, cheaply comparable identifier.
///
/// # Examples
///
/// ```
/// use tikzlet_core::identifier::Id;
///
/// let class_id = Id::sequenced("UMLClass", 2);
/// assert_eq!(class_id, "UMLClass2");
///
/// let anchor = class_id.with_suffix("node1");
/// assert_eq!(anchor, "UMLClass2node1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }

    /// Creates the identity `<kind><index>` assigned to the `index`-th
    /// record of type `kind` in document order.
    pub fn sequenced(kind: &str, index: usize) -> Self {
        Self::new(&format!("{kind}{index}"))
    }

    /// Creates a derived identifier by appending `suffix` to this one.
    pub fn with_suffix(&self, suffix: &str) -> Self {
        let name = format!("{self}{suffix}");
        Self::new(&name)
    }

    /// Creates a derived identifier by prepending `prefix` to this one.
    pub fn with_prefix(&self, prefix: &str) -> Self {
        let name = format!("{prefix}{self}");
        Self::new(&name)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = with_interner(|interner| {
            interner
                .resolve(self.0)
                .expect("Symbol should exist in interner")
                .to_string()
        });
        f.write_str(&name)
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
