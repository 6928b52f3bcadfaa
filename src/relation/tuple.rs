use super::value::Value;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Represents one record: an ordered mapping from attribute name to value
///
/// Attribute order is kept for display, but it plays no part in equality:
/// two tuples are equal when they carry the same attribute names with the
/// same values.
#[derive(Debug, Clone, Default)]
pub struct Tuple {
    attributes: Vec<(String, Value)>,
}

/// Order-independent view of a tuple's content, usable as a hash key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TupleKey(Vec<(String, Value)>);

impl Tuple {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tuple from `(name, value)` pairs, in order.
    ///
    /// A repeated name overwrites the earlier value in place.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut tuple = Tuple::new();
        for (name, value) in pairs {
            tuple.set(name, value);
        }
        tuple
    }

    /// Set an attribute. An existing attribute keeps its position; a new one
    /// is appended.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Attribute names in this tuple's order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attributes.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Keep only the listed attributes, in listed order. Names the tuple does
    /// not carry are skipped.
    pub fn project(&self, names: &[String]) -> Tuple {
        let mut projected = Tuple::new();
        for name in names {
            if let Some(value) = self.get(name) {
                projected.set(name.clone(), value.clone());
            }
        }
        projected
    }

    /// Merge `other` into a copy of this tuple. Values from `other` are
    /// written last, so they win on shared names.
    pub fn merge(&self, other: &Tuple) -> Tuple {
        let mut merged = self.clone();
        for (name, value) in other.iter() {
            merged.set(name, value.clone());
        }
        merged
    }

    /// True when both tuples hold equal values for every listed attribute.
    /// A missing attribute on either side never matches.
    pub fn agrees_on(&self, other: &Tuple, names: &[String]) -> bool {
        names.iter().all(|name| match (self.get(name), other.get(name)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        })
    }

    /// Content key: attributes sorted by name.
    pub fn key(&self) -> TupleKey {
        let mut pairs = self.attributes.clone();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        TupleKey(pairs)
    }
}

impl PartialEq for Tuple {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(name, value)| other.get(name) == Some(value))
    }
}

impl Eq for Tuple {}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", name, value)?;
        }
        write!(f, "}}")
    }
}

impl Serialize for Tuple {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

struct TupleVisitor;

impl<'de> Visitor<'de> for TupleVisitor {
    type Value = Tuple;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object mapping attribute names to numbers or strings")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Tuple, A::Error> {
        // Entries are pushed in document order; serde_json's own Map would sort them.
        let mut tuple = Tuple::new();
        while let Some((name, value)) = access.next_entry::<String, Value>()? {
            tuple.set(name, value);
        }
        Ok(tuple)
    }
}

impl<'de> Deserialize<'de> for Tuple {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Tuple, D::Error> {
        deserializer.deserialize_map(TupleVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> Tuple {
        Tuple::from_pairs([
            ("NumEtudiant", Value::from("E001")),
            ("Nom", Value::from("Alami")),
            ("Age", Value::from(22)),
        ])
    }

    #[test]
    fn test_tuple_creation() {
        let tuple = student();
        assert_eq!(tuple.len(), 3);
        assert_eq!(tuple.get("Nom"), Some(&Value::from("Alami")));
        assert_eq!(tuple.get("Ville"), None);
        assert_eq!(
            tuple.names().collect::<Vec<_>>(),
            vec!["NumEtudiant", "Nom", "Age"]
        );
    }

    #[test]
    fn test_set_keeps_position() {
        let mut tuple = student();
        tuple.set("NumEtudiant", "E009");
        tuple.set("Ville", "Fès");
        assert_eq!(
            tuple.names().collect::<Vec<_>>(),
            vec!["NumEtudiant", "Nom", "Age", "Ville"]
        );
        assert_eq!(tuple.get("NumEtudiant"), Some(&Value::from("E009")));
    }

    #[test]
    fn test_equality_ignores_order() {
        let reordered = Tuple::from_pairs([
            ("Age", Value::from(22)),
            ("NumEtudiant", Value::from("E001")),
            ("Nom", Value::from("Alami")),
        ]);
        assert_eq!(student(), reordered);
        assert_eq!(student().key(), reordered.key());

        let mut older = student();
        older.set("Age", 23);
        assert_ne!(student(), older);

        let fewer = Tuple::from_pairs([("NumEtudiant", "E001"), ("Nom", "Alami")]);
        assert_ne!(student(), fewer);
        assert_ne!(fewer, student());
    }

    #[test]
    fn test_project() {
        let projected = student().project(&["Age".to_string(), "Nom".to_string()]);
        assert_eq!(projected.names().collect::<Vec<_>>(), vec!["Age", "Nom"]);
    }

    #[test]
    fn test_merge_and_agreement() {
        let course = Tuple::from_pairs([("CodeCours", "C101"), ("NumEtudiant", "E001")]);
        let merged = student().merge(&course);
        assert_eq!(
            merged.names().collect::<Vec<_>>(),
            vec!["NumEtudiant", "Nom", "Age", "CodeCours"]
        );
        assert!(student().agrees_on(&course, &["NumEtudiant".to_string()]));
        assert!(!student().agrees_on(&course, &["Nom".to_string()]));
    }

    #[test]
    fn test_serde_preserves_attribute_order() -> anyhow::Result<()> {
        let tuple: Tuple = serde_json::from_str(r#"{"Ville": "Rabat", "Age": 20, "Nom": "Darif"}"#)?;
        assert_eq!(tuple.names().collect::<Vec<_>>(), vec!["Ville", "Age", "Nom"]);
        assert_eq!(
            serde_json::to_string(&tuple)?,
            r#"{"Ville":"Rabat","Age":20,"Nom":"Darif"}"#
        );
        Ok(())
    }

    #[test]
    fn test_display() {
        assert_eq!(
            student().to_string(),
            "{NumEtudiant: E001, Nom: Alami, Age: 22}"
        );
    }
}
