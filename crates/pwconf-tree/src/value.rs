//! Configuration value model.

use indexmap::IndexMap;

use crate::path::KeyPath;

/// Priority of every value that is not wrapped in an [`Entry`].
pub const DEFAULT_PRIORITY: i64 = 1000;

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

/// A value wrapped with an explicit render priority.
///
/// Lower priorities render earlier among siblings.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub priority: i64,
    pub content: Box<ConfigValue>,
}

impl Entry {
    pub fn new(priority: i64, content: impl Into<ConfigValue>) -> Self {
        Self {
            priority,
            content: Box::new(content.into()),
        }
    }
}

/// Any value that can appear in a configuration tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Scalar(Scalar),
    List(Vec<ConfigValue>),
    Tree(ConfigTree),
    Entry(Entry),
}

impl ConfigValue {
    /// Render priority of this value among its siblings.
    pub fn priority(&self) -> i64 {
        match self {
            ConfigValue::Entry(entry) => entry.priority,
            _ => DEFAULT_PRIORITY,
        }
    }

    /// The value with any entry wrappers removed.
    pub fn content(&self) -> &ConfigValue {
        match self {
            ConfigValue::Entry(entry) => entry.content.content(),
            other => other,
        }
    }

    /// The tree behind this value, looking through entry wrappers.
    pub fn as_tree(&self) -> Option<&ConfigTree> {
        match self.content() {
            ConfigValue::Tree(tree) => Some(tree),
            _ => None,
        }
    }

    /// Mutable access to the tree behind this value. Entry priorities are
    /// left untouched.
    pub fn as_tree_mut(&mut self) -> Option<&mut ConfigTree> {
        match self {
            ConfigValue::Tree(tree) => Some(tree),
            ConfigValue::Entry(entry) => entry.content.as_tree_mut(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self.content() {
            ConfigValue::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self.content() {
            ConfigValue::Scalar(Scalar::Null) => "null",
            ConfigValue::Scalar(Scalar::Bool(_)) => "bool",
            ConfigValue::Scalar(Scalar::Integer(_)) | ConfigValue::Scalar(Scalar::Float(_)) => {
                "number"
            }
            ConfigValue::Scalar(Scalar::String(_)) => "string",
            ConfigValue::List(_) => "list",
            ConfigValue::Tree(_) | ConfigValue::Entry(_) => "section",
        }
    }
}

impl From<Scalar> for ConfigValue {
    fn from(value: Scalar) -> Self {
        ConfigValue::Scalar(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Scalar(Scalar::String(value.to_string()))
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::Scalar(Scalar::String(value))
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Scalar(Scalar::Bool(value))
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Scalar(Scalar::Integer(value))
    }
}

impl From<i32> for ConfigValue {
    fn from(value: i32) -> Self {
        ConfigValue::Scalar(Scalar::Integer(i64::from(value)))
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Scalar(Scalar::Float(value))
    }
}

impl From<Vec<ConfigValue>> for ConfigValue {
    fn from(value: Vec<ConfigValue>) -> Self {
        ConfigValue::List(value)
    }
}

impl From<ConfigTree> for ConfigValue {
    fn from(value: ConfigTree) -> Self {
        ConfigValue::Tree(value)
    }
}

impl From<Entry> for ConfigValue {
    fn from(value: Entry) -> Self {
        ConfigValue::Entry(value)
    }
}

/// An ordered mapping from keys to values.
///
/// Declaration order is kept: it breaks ties between equal priorities when
/// the tree is rendered. Equality is order-sensitive for the same reason.
#[derive(Debug, Clone, Default)]
pub struct ConfigTree {
    pub(crate) entries: IndexMap<String, ConfigValue>,
}

impl ConfigTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut ConfigValue> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert a value. An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Option<ConfigValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Remove a key, keeping the order of the remaining keys.
    pub fn remove(&mut self, key: &str) -> Option<ConfigValue> {
        self.entries.shift_remove(key)
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ConfigValue)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// Look up a nested value, looking through entry wrappers on the way.
    pub fn get_path(&self, path: &KeyPath) -> Option<&ConfigValue> {
        let (last, parents) = path.segments().split_last()?;
        let mut current = self;
        for segment in parents {
            current = current.get(segment)?.as_tree()?;
        }
        current.get(last)
    }
}

impl PartialEq for ConfigTree {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl FromIterator<(String, ConfigValue)> for ConfigTree {
    fn from_iter<I: IntoIterator<Item = (String, ConfigValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ConfigTree {
    type Item = (String, ConfigValue);
    type IntoIter = indexmap::map::IntoIter<String, ConfigValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
