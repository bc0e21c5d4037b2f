//! Runtime value representation
//!
//! The values a declaration is checked against: the scalar kinds, ordered
//! arrays with integer or string keys, and object instances. Instances are
//! shared through [`ObjectRef`] so identity (`$this`) is pointer identity.

use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Shared handle to an object instance
pub type ObjectRef = Arc<Instance>;

/// An object instance: the class it was created from and its properties
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    class: String,
    properties: IndexMap<String, Value>,
}

impl Instance {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            properties: IndexMap::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.properties.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Move the instance behind a shared handle
    pub fn into_ref(self) -> ObjectRef {
        Arc::new(self)
    }
}

/// Array keys: integers for lists, strings for associative arrays
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArrayKey {
    Int(i64),
    String(String),
}

impl fmt::Display for ArrayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayKey::Int(index) => write!(f, "{index}"),
            ArrayKey::String(key) => write!(f, "{key:?}"),
        }
    }
}

/// The runtime kind of a value, as a declaration sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    String,
    Array,
    Object,
    Null,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
            ValueKind::Null => "null",
        };
        f.write_str(name)
    }
}

/// Runtime values
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Ordered array; lists use keys `0..n`
    Array(IndexMap<ArrayKey, Value>),
    Object(ObjectRef),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// A list with keys `0..n`
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Value::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(index, item)| (ArrayKey::Int(index as i64), item.into()))
                .collect(),
        )
    }

    pub fn object(instance: Instance) -> Self {
        Value::Object(instance.into_ref())
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(instance) => Some(instance),
            _ => None,
        }
    }

    /// Elements of an array value
    pub fn items(&self) -> Option<impl Iterator<Item = &Value>> {
        match self {
            Value::Array(items) => Some(items.values()),
            _ => None,
        }
    }
}

/// Identity comparison; equal but distinct instances are not the same
pub fn same_instance(a: &ObjectRef, b: &ObjectRef) -> bool {
    Arc::ptr_eq(a, b)
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}

impl From<Instance> for Value {
    fn from(instance: Instance) -> Self {
        Value::object(instance)
    }
}

impl From<ObjectRef> for Value {
    fn from(instance: ObjectRef) -> Self {
        Value::Object(instance)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// Key that marks a JSON object as an object instance of the named class
pub const CLASS_KEY: &str = "@class";

/// JSON scalars and arrays map onto the matching kinds. An object with a
/// string [`CLASS_KEY`] becomes a fresh instance of that class, any other
/// object an associative array.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(value) => Value::Bool(value),
            serde_json::Value::Number(number) => match number.as_i64() {
                Some(value) => Value::Int(value),
                None => Value::Float(number.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(value) => Value::String(value),
            serde_json::Value::Array(items) => Value::list(items),
            serde_json::Value::Object(fields) => {
                let class = match fields.get(CLASS_KEY) {
                    Some(serde_json::Value::String(class)) => Some(class.clone()),
                    _ => None,
                };

                match class {
                    Some(class) => fields
                        .into_iter()
                        .filter(|(name, _)| name != CLASS_KEY)
                        .fold(Instance::new(class), |instance, (name, value)| {
                            instance.with_property(name, Value::from(value))
                        })
                        .into(),
                    None => Value::Array(
                        fields
                            .into_iter()
                            .map(|(key, value)| (ArrayKey::String(key), Value::from(value)))
                            .collect(),
                    ),
                }
            }
        }
    }
}
