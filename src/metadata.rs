use std::fmt;

/// A single metadata value. Nested values render the way they are read back
/// by a human: arrays as `[a, b]`, dictionaries as `[k: v]`.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    String(String),
    Array(Vec<MetadataValue>),
    Dictionary(Metadata),
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::String(s) => f.write_str(s),
            MetadataValue::Array(values) => {
                f.write_str("[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                f.write_str("]")
            }
            MetadataValue::Dictionary(metadata) => {
                f.write_str("[")?;
                for (i, (key, value)) in metadata.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::String(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        MetadataValue::String(value)
    }
}

impl From<Vec<MetadataValue>> for MetadataValue {
    fn from(values: Vec<MetadataValue>) -> Self {
        MetadataValue::Array(values)
    }
}

impl From<Metadata> for MetadataValue {
    fn from(metadata: Metadata) -> Self {
        MetadataValue::Dictionary(metadata)
    }
}

macro_rules! impl_from_display {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for MetadataValue {
                fn from(value: $ty) -> Self {
                    MetadataValue::String(value.to_string())
                }
            }
        )*
    };
}

impl_from_display!(bool, i32, i64, u32, u64, usize, f64);

/// Insertion-ordered string keyed mapping. Keys are unique; overwriting a key
/// keeps its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    entries: Vec<(String, MetadataValue)>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<MetadataValue>,
    ) -> Option<MetadataValue> {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<MetadataValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Stores `value` under `key`, or removes the key when `value` is `None`.
    pub fn set(&mut self, key: impl Into<String>, value: Option<MetadataValue>) {
        let key = key.into();
        match value {
            Some(value) => {
                self.insert(key, value);
            }
            None => {
                self.remove(&key);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetadataValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copy of `self` with every entry of `other` applied on top of it.
    pub fn merged(&self, other: &Metadata) -> Metadata {
        let mut merged = self.clone();
        for (key, value) in other.iter() {
            merged.insert(key, value.clone());
        }
        merged
    }

    /// `key=value` pairs joined by a single space.
    pub fn prettify(&self) -> String {
        self.iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<K, V> FromIterator<(K, V)> for Metadata
where
    K: Into<String>,
    V: Into<MetadataValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut metadata = Metadata::new();
        for (key, value) in iter {
            metadata.insert(key, value);
        }
        metadata
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Metadata
where
    K: Into<String>,
    V: Into<MetadataValue>,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_write_wins_and_keeps_position() {
        let mut metadata = Metadata::from([("a", "1"), ("b", "2")]);
        let previous = metadata.insert("a", "3");

        assert_eq!(previous, Some(MetadataValue::from("1")));
        assert_eq!(metadata.prettify(), "a=3 b=2");
    }

    #[test]
    fn set_none_removes_key() {
        let mut metadata = Metadata::from([("request", "42")]);
        metadata.set("request", None);

        assert!(metadata.is_empty());
        assert_eq!(metadata.get("request"), None);
    }

    #[test]
    fn merged_overrides_and_appends() {
        let stored = Metadata::from([("user", "alice"), ("region", "eu")]);
        let per_call = Metadata::from([("region", "us"), ("attempt", "2")]);

        let merged = stored.merged(&per_call);

        assert_eq!(merged.prettify(), "user=alice region=us attempt=2");
        assert_eq!(stored.prettify(), "user=alice region=eu");
    }

    #[test]
    fn nested_values_render_inline() {
        let mut metadata = Metadata::new();
        metadata.insert("ids", vec![MetadataValue::from(1), MetadataValue::from(2)]);
        metadata.insert("ctx", Metadata::from([("k", "v")]));

        assert_eq!(metadata.prettify(), "ids=[1, 2] ctx=[k: v]");
    }

    #[test]
    fn empty_metadata_prettifies_to_empty_string() {
        assert_eq!(Metadata::new().prettify(), "");
    }
}
