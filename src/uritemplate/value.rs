//! Variable values and variable lookup
//!
//! A template variable is either undefined (absent from the bindings), or one of
//! the [Value] variants. Scalars of any type are stored in their string form,
//! since that's all expansion ever needs.

use super::error::BindingsError;
use serde::de::{Deserialize, Deserializer, Error as _};
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// A value bound to a template variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Explicitly bound to nothing; expands like an absent variable
    Null,
    /// A single string-coercible value
    Scalar(String),
    /// An ordered list of scalars
    List(Vec<String>),
    /// An associative array of (key, value) pairs, in insertion order
    Map(Vec<(String, String)>),
}

impl Value {
    /// Build a list value from anything that yields string-like items
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a map value, keeping the order pairs are yielded in
    pub fn map<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Value::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The scalar string, if this is a scalar
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Scalar(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Scalar(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Scalar(value.clone())
    }
}

macro_rules! scalar_from_display {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Scalar(value.to_string())
                }
            }
        )*
    };
}

scalar_from_display!(bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl<T: Into<String>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::list(items)
    }
}

impl<T: Into<String>, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Self {
        Value::list(items)
    }
}

impl<K: Into<String>, V: Into<String>> From<BTreeMap<K, V>> for Value {
    fn from(pairs: BTreeMap<K, V>) -> Self {
        Value::map(pairs)
    }
}

impl<K: Into<String>, V: Into<String>, S> From<HashMap<K, V, S>> for Value {
    fn from(pairs: HashMap<K, V, S>) -> Self {
        Value::map(pairs)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// Render a JSON scalar the way it should appear in a URI.
fn json_scalar(value: serde_json::Value, context: &str) -> Result<String, BindingsError> {
    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            Err(BindingsError::NestedValue(context.to_string()))
        }
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = BindingsError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(|item| json_scalar(item, "list member"))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            serde_json::Value::Object(entries) => entries
                .into_iter()
                .map(|(k, v)| {
                    let context = format!("map entry '{k}'");
                    json_scalar(v, &context).map(|v| (k, v))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Map),
            scalar => json_scalar(scalar, "scalar").map(Value::Scalar),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = serde_json::Value::deserialize(deserializer)?;
        Value::try_from(json).map_err(D::Error::custom)
    }
}

/// Parse a JSON object into variable bindings.
pub fn variables_from_json(source: &str) -> Result<HashMap<String, Value>, BindingsError> {
    let json: serde_json::Value =
        serde_json::from_str(source).map_err(|e| BindingsError::Malformed(e.to_string()))?;

    match json {
        serde_json::Value::Object(entries) => entries
            .into_iter()
            .map(|(name, value)| Value::try_from(value).map(|value| (name, value)))
            .collect(),
        other => Err(BindingsError::NotAnObject(json_kind(&other).to_string())),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Variable lookup used during expansion
///
/// Implemented for the common map types so callers can keep bindings in
/// whatever shape they already have.
pub trait Variables {
    /// The value bound to `name`, or `None` if the variable is undefined
    fn lookup(&self, name: &str) -> Option<&Value>;
}

impl<K, S> Variables for HashMap<K, Value, S>
where
    K: Borrow<str> + Eq + Hash,
    S: BuildHasher,
{
    fn lookup(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl<K> Variables for BTreeMap<K, Value>
where
    K: Borrow<str> + Ord,
{
    fn lookup(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl<K: AsRef<str>> Variables for [(K, Value)] {
    fn lookup(&self, name: &str) -> Option<&Value> {
        self.iter()
            .find(|(key, _)| key.as_ref() == name)
            .map(|(_, value)| value)
    }
}

impl<K: AsRef<str>> Variables for Vec<(K, Value)> {
    fn lookup(&self, name: &str) -> Option<&Value> {
        self.as_slice().lookup(name)
    }
}

impl<K: AsRef<str>, const N: usize> Variables for [(K, Value); N] {
    fn lookup(&self, name: &str) -> Option<&Value> {
        self.as_slice().lookup(name)
    }
}

impl<T: Variables + ?Sized> Variables for &T {
    fn lookup(&self, name: &str) -> Option<&Value> {
        (**self).lookup(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_conversions() {
        assert_eq!(Value::from("a"), Value::Scalar("a".into()));
        assert_eq!(Value::from(1024), Value::Scalar("1024".into()));
        assert_eq!(Value::from(true), Value::Scalar("true".into()));
        assert_eq!(Value::from(37.76), Value::Scalar("37.76".into()));
        assert_eq!(Value::from(None::<&str>), Value::Null);
    }

    #[test]
    fn test_composite_conversions() {
        assert_eq!(
            Value::from(vec!["red", "green"]),
            Value::List(vec!["red".into(), "green".into()])
        );
        assert_eq!(
            Value::from(BTreeMap::from([("dot", "."), ("semi", ";")])),
            Value::Map(vec![("dot".into(), ".".into()), ("semi".into(), ";".into())])
        );
    }

    #[test]
    fn test_from_json() {
        assert_eq!(Value::try_from(json!(null)), Ok(Value::Null));
        assert_eq!(Value::try_from(json!(6)), Ok(Value::from("6")));
        assert_eq!(
            Value::try_from(json!(["a", 1])),
            Ok(Value::list(["a", "1"]))
        );
        assert_eq!(
            Value::try_from(json!({"semi": ";", "dot": "."})),
            Ok(Value::map([("semi", ";"), ("dot", ".")]))
        );
    }

    #[test]
    fn test_from_json_rejects_nesting() {
        assert!(matches!(
            Value::try_from(json!([["a"]])),
            Err(BindingsError::NestedValue(_))
        ));
        assert!(matches!(
            Value::try_from(json!({"k": {"x": 1}})),
            Err(BindingsError::NestedValue(_))
        ));
    }

    #[test]
    fn test_variables_from_json() {
        let vars = variables_from_json(r#"{"who": "fred", "list": ["a", "b"]}"#).unwrap();
        assert_eq!(vars.lookup("who"), Some(&Value::from("fred")));
        assert_eq!(vars.lookup("list"), Some(&Value::list(["a", "b"])));
        assert_eq!(vars.lookup("missing"), None);

        assert!(matches!(
            variables_from_json("[1, 2]"),
            Err(BindingsError::NotAnObject(_))
        ));
        assert!(matches!(
            variables_from_json("{"),
            Err(BindingsError::Malformed(_))
        ));
    }

    #[test]
    fn test_lookup_on_pairs() {
        let vars = [("a", Value::from("1")), ("b", Value::Null)];
        assert_eq!(vars.lookup("a"), Some(&Value::from("1")));
        assert_eq!(vars.lookup("b"), Some(&Value::Null));
        assert_eq!(vars.lookup("c"), None);
    }
}
