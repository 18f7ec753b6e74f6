//! Resolved output sets and their wire form.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::catalog::{NormalDnaOutput, OutputKind, TumorDnaOutput, TumorRnaOutput};

/// Result kind to URI, in insertion order. Serialized as a JSON object keyed
/// by [`OutputKind::key`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSet<K> {
    entries: Vec<(K, String)>,
}

impl<K> Default for OutputSet<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: OutputKind> OutputSet<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the location for `kind`, replacing any earlier value.
    pub fn insert(&mut self, kind: K, uri: impl Into<String>) {
        let uri = uri.into();
        match self.entries.iter_mut().find(|(k, _)| *k == kind) {
            Some(entry) => entry.1 = uri,
            None => self.entries.push((kind, uri)),
        }
    }

    pub fn get(&self, kind: K) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, uri)| uri.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &str)> {
        self.entries.iter().map(|(k, uri)| (*k, uri.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(k, _)| k.key())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when every variant of `K` has a location.
    pub fn is_complete(&self) -> bool {
        K::ALL.iter().all(|kind| self.get(*kind).is_some())
    }
}

impl<K: OutputKind> FromIterator<(K, String)> for OutputSet<K> {
    fn from_iter<I: IntoIterator<Item = (K, String)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (kind, uri) in iter {
            set.insert(kind, uri);
        }
        set
    }
}

impl<K: OutputKind> Serialize for OutputSet<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (kind, uri) in &self.entries {
            map.serialize_entry(kind.key(), uri)?;
        }
        map.end()
    }
}

struct OutputSetVisitor<K>(PhantomData<K>);

impl<'de, K: OutputKind> Visitor<'de> for OutputSetVisitor<K> {
    type Value = OutputSet<K>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a map of {} locations", K::GROUP)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut set = OutputSet::new();
        while let Some((key, uri)) = access.next_entry::<String, String>()? {
            let kind = K::from_key(&key).ok_or_else(|| {
                de::Error::custom(format!("unknown {} input: {key}", K::GROUP))
            })?;
            if set.get(kind).is_some() {
                return Err(de::Error::custom(format!(
                    "duplicate {} input: {key}",
                    K::GROUP
                )));
            }
            set.insert(kind, uri);
        }
        Ok(set)
    }
}

impl<'de, K: OutputKind> Deserialize<'de> for OutputSet<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OutputSetVisitor(PhantomData))
    }
}

/// The resolver's answer: exactly one result set under its group key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolvedInputs {
    #[serde(rename = "tumorDnaInputs")]
    TumorDna(OutputSet<TumorDnaOutput>),
    #[serde(rename = "normalDnaInputs")]
    NormalDna(OutputSet<NormalDnaOutput>),
    #[serde(rename = "tumorRnaInputs")]
    TumorRna(OutputSet<TumorRnaOutput>),
}

impl ResolvedInputs {
    pub fn group(&self) -> &'static str {
        match self {
            ResolvedInputs::TumorDna(_) => TumorDnaOutput::GROUP,
            ResolvedInputs::NormalDna(_) => NormalDnaOutput::GROUP,
            ResolvedInputs::TumorRna(_) => TumorRnaOutput::GROUP,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ResolvedInputs::TumorDna(set) => set.len(),
            ResolvedInputs::NormalDna(set) => set.len(),
            ResolvedInputs::TumorRna(set) => set.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
