//! Structural methods: lengths and object fields.

use serde_json::{Map, Value};

use crate::plugin::PluginTable;
use crate::schema::{Outcome, Schema};

use super::Args;

/// Adds every member of `entries` to `target`, which becomes an object if it
/// was not one.
///
/// A `null` entry for a member `target` lacks is left out: an absent member
/// that validated to nothing stays absent.
fn merge(target: &Value, entries: &Value) -> Value {
    let mut merged = match target {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    };
    if let Value::Object(entries) = entries {
        for (key, value) in entries {
            if value.is_null() && !merged.contains_key(key) {
                continue;
            }
            merged.insert(key.clone(), value.clone());
        }
    }
    Value::Object(merged)
}

impl Schema {
    /// Requires a `length` (of a string or array) of at least `limit`.
    ///
    /// The value itself is kept; a failure is reported at `<path>.length`.
    pub fn min_length(self, limit: usize) -> Self {
        let length = self.empty().key("length", self.empty().min(limit as f64));
        self.check(length)
    }

    /// Requires a `length` (of a string or array) of at most `limit`.
    pub fn max_length(self, limit: usize) -> Self {
        let length = self.empty().key("length", self.empty().max(limit as f64));
        self.check(length)
    }

    /// Replaces an object with `{name: value[name]}`, the member validated by
    /// `schema`.
    pub fn key_value(self, name: impl Into<String>, schema: Schema) -> Self {
        let name = name.into();
        let member = name.clone();
        self.key(name, schema).then(move |v| {
            let mut entry = Map::new();
            entry.insert(member.clone(), v.clone());
            Outcome::Value(Value::Object(entry))
        })
    }

    /// Validates member `name` with `schema` and writes the result back into
    /// the object.
    ///
    /// Fields run in declaration order and each sees the object as left by
    /// the previous ones, so defaults filled in by one field are visible to
    /// the next. A missing member whose schema yields `null` is not added.
    ///
    /// ```rust
    /// use chainval::Schema;
    /// use serde_json::json;
    ///
    /// let schema = Schema::new()
    ///     .object()
    ///     .field("a", Schema::new().number().then(|v| json!(v.as_f64().unwrap_or(0.0) * 2.0).into()))
    ///     .field("b", Schema::new().string().min_length(1));
    ///
    /// assert_eq!(
    ///     schema.validate(&json!({"a": 1, "b": "x"})).unwrap(),
    ///     json!({"a": 2.0, "b": "x"})
    /// );
    /// ```
    pub fn field(self, name: impl Into<String>, schema: Schema) -> Self {
        let key_value = self.empty().key_value(name, schema);
        self.then(move |object| Outcome::Continue(merge_into(object, &key_value)))
    }

    /// Like [`field`](Self::field), but only when `checker` accepts the
    /// object as built so far; otherwise the object passes unchanged.
    pub fn field_when(self, name: impl Into<String>, schema: Schema, checker: Schema) -> Self {
        let key_value = self.empty().key_value(name, schema);
        let merge_field = self
            .empty()
            .then(move |object| Outcome::Continue(merge_into(object, &key_value)));
        self.when(checker, merge_field)
    }
}

/// A schema that runs `key_value` and merges its single-member result into
/// `object`.
fn merge_into(object: &Value, key_value: &Schema) -> Schema {
    let object = object.clone();
    key_value
        .clone()
        .then(move |entry| Outcome::Value(merge(&object, entry)))
}

pub(crate) fn plugins() -> PluginTable {
    PluginTable::new()
        .method("min_length", |s, args| {
            Ok(s.clone().min_length(Args::new("min_length", args).arity(1)?.count(0)?))
        })
        .method("max_length", |s, args| {
            Ok(s.clone().max_length(Args::new("max_length", args).arity(1)?.count(0)?))
        })
        .method("key_value", |s, args| {
            let args = Args::new("key_value", args);
            let name = args.arity(2)?.string(0)?;
            Ok(s.clone().key_value(name, args.schema(1)?))
        })
        .method("field", |s, args| {
            let args = Args::new("field", args);
            let name = args.arity(2)?.string(0)?;
            Ok(s.clone().field(name, args.schema(1)?))
        })
        .method("field_when", |s, args| {
            let args = Args::new("field_when", args);
            let name = args.arity(3)?.string(0)?;
            Ok(s.clone().field_when(name, args.schema(1)?, args.schema(2)?))
        })
}
