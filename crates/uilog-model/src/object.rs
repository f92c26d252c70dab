//! UI object types, hierarchy levels, instance identifiers and dedup keys.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Containment tier of a UI object type, from coarse to fine.
///
/// `Highest < Second < Third < Fourth`, so sorting ascending visits
/// containers before their contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HierarchyLevel {
    Highest,
    Second,
    Third,
    Fourth,
}

impl HierarchyLevel {
    pub const ALL: [HierarchyLevel; 4] = [
        HierarchyLevel::Highest,
        HierarchyLevel::Second,
        HierarchyLevel::Third,
        HierarchyLevel::Fourth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HierarchyLevel::Highest => "highest",
            HierarchyLevel::Second => "second",
            HierarchyLevel::Third => "third",
            HierarchyLevel::Fourth => "fourth",
        }
    }
}

impl fmt::Display for HierarchyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical UI object type name (`website`, `file`, `field`, ...).
///
/// Unrecognized raw values are carried through verbatim, lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectType(String);

impl ObjectType {
    pub const WEBSITE: &'static str = "website";
    pub const APPLICATION: &'static str = "application";
    pub const FILE: &'static str = "file";
    pub const SHEET: &'static str = "sheet";
    pub const FIELD: &'static str = "field";
    pub const BUTTON: &'static str = "button";
    pub const IMAGE: &'static str = "image";
    pub const CHECKBOX: &'static str = "checkbox";
    /// Sentinel used when a row names no main object at all.
    pub const UNKNOWN: &'static str = "unknown";

    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_lowercase())
    }

    pub fn unknown() -> Self {
        Self(Self::UNKNOWN.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is(&self, name: &str) -> bool {
        self.0 == name
    }

    pub fn is_website(&self) -> bool {
        self.is(Self::WEBSITE)
    }

    pub fn is_unknown(&self) -> bool {
        self.is(Self::UNKNOWN)
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectType {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Identifier of a minted object instance, e.g. `application_1`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(String);

impl InstanceId {
    /// Builds `<type>_<n>` with spaces in the type replaced by underscores.
    pub fn mint(type_name: &str, n: usize) -> Self {
        Self(format!("{}_{n}", type_name.trim().replace(' ', "_")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric suffix after the last underscore, if any.
    pub fn ordinal(&self) -> Option<usize> {
        self.0.rsplit_once('_').and_then(|(_, n)| n.parse().ok())
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<InstanceId> for String {
    fn from(value: InstanceId) -> Self {
        value.0
    }
}

/// One element of a dedup key, tagged with where it came from.
///
/// Tagging keeps a value-attribute column name from colliding with an
/// identical context-attribute cell value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyPart {
    /// Raw product name (`chrome`, `excel`) taken from the object-type cell.
    Name(String),
    /// Context-attribute cell value.
    Context(String),
    /// Name of a value-attribute column that carried a value.
    ValueColumn(String),
    /// Injected parent instance.
    Instance(InstanceId),
}

impl KeyPart {
    pub fn text(&self) -> &str {
        match self {
            KeyPart::Name(v) | KeyPart::Context(v) | KeyPart::ValueColumn(v) => v,
            KeyPart::Instance(id) => id.as_str(),
        }
    }
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPart::Name(v) => write!(f, "name:{v}"),
            KeyPart::Context(v) => write!(f, "ctx:{v}"),
            KeyPart::ValueColumn(v) => write!(f, "col:{v}"),
            KeyPart::Instance(id) => write!(f, "inst:{id}"),
        }
    }
}

/// The value or ordered tuple that identifies an object instance.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DedupKey {
    Single(KeyPart),
    Tuple(Vec<KeyPart>),
}

impl DedupKey {
    /// Returns `None` for an empty attribute list; no instance is created then.
    pub fn from_parts(mut parts: Vec<KeyPart>) -> Option<Self> {
        match parts.len() {
            0 => None,
            1 => parts.pop().map(DedupKey::Single),
            _ => Some(DedupKey::Tuple(parts)),
        }
    }

    pub fn parts(&self) -> &[KeyPart] {
        match self {
            DedupKey::Single(part) => std::slice::from_ref(part),
            DedupKey::Tuple(parts) => parts,
        }
    }
}

impl fmt::Display for DedupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DedupKey::Single(part) => write!(f, "{part}"),
            DedupKey::Tuple(parts) => {
                f.write_str("(")?;
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{part}")?;
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mint_replaces_spaces() {
        let id = InstanceId::mint("purchase order", 3);
        assert_eq!(id.as_str(), "purchase_order_3");
        assert_eq!(id.ordinal(), Some(3));
    }

    #[test]
    fn levels_order_from_coarse_to_fine() {
        assert!(HierarchyLevel::Highest < HierarchyLevel::Second);
        assert!(HierarchyLevel::Third < HierarchyLevel::Fourth);
    }

    #[test]
    fn dedup_key_shapes() {
        assert_eq!(DedupKey::from_parts(Vec::new()), None);
        assert_eq!(
            DedupKey::from_parts(vec![KeyPart::Context("a".into())]),
            Some(DedupKey::Single(KeyPart::Context("a".into())))
        );
        let tuple = DedupKey::from_parts(vec![
            KeyPart::Context("a".into()),
            KeyPart::ValueColumn("b".into()),
        ])
        .unwrap();
        assert_eq!(tuple.parts().len(), 2);
        assert_eq!(tuple.to_string(), "(ctx:a, col:b)");
    }

    #[test]
    fn tagged_parts_do_not_collide() {
        let context = DedupKey::from_parts(vec![KeyPart::Context("amount".into())]);
        let column = DedupKey::from_parts(vec![KeyPart::ValueColumn("amount".into())]);
        assert_ne!(context, column);
    }

    #[test]
    fn object_type_normalizes_case() {
        assert_eq!(ObjectType::new(" Website ").as_str(), "website");
        assert!(ObjectType::new("Website").is_website());
        assert!(ObjectType::unknown().is_unknown());
    }
}
