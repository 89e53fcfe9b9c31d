//! Type predicates.

use serde_json::Value;

use crate::plugin::PluginTable;
use crate::schema::Schema;

use super::Args;

/// Name of the JSON type of `value`, as accepted by [`Schema::type_of`].
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn with_article(noun: &str) -> String {
    let article = match noun.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    };
    format!("{} {}", article, noun)
}

fn is_integer(value: &Value) -> bool {
    match value {
        Value::Number(n) => {
            n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
        }
        _ => false,
    }
}

impl Schema {
    /// Requires the JSON type named `name` (`null`, `boolean`, `number`,
    /// `string`, `array` or `object`).
    pub fn type_of(self, name: &str) -> Self {
        let expected = name.to_string();
        self.is(with_article(name), move |v| type_name(v) == expected)
    }

    /// Requires `true` or `false`.
    pub fn boolean(self) -> Self {
        self.type_of("boolean")
    }

    /// Requires a number, integer or not.
    ///
    /// ```rust
    /// use chainval::Schema;
    /// use serde_json::json;
    ///
    /// let error = Schema::new().number().validate(&json!("1")).unwrap_err();
    /// assert_eq!(error.to_string(), r#"value should be a number, but got "1""#);
    /// ```
    pub fn number(self) -> Self {
        self.type_of("number")
    }

    /// Requires a string.
    pub fn string(self) -> Self {
        self.type_of("string")
    }

    /// Requires a JSON object. Arrays and `null` are not objects.
    pub fn object(self) -> Self {
        self.type_of("object")
    }

    /// Requires a number without a fractional part.
    pub fn integer(self) -> Self {
        self.is("an integer", is_integer)
    }

    /// Requires an array. Use [`items`](Self::items) to validate its
    /// elements.
    pub fn array(self) -> Self {
        self.type_of("array")
    }

    /// Requires something with a `length`: a string or an array.
    pub fn array_like(self) -> Self {
        self.is("an array-like object", |v| v.is_string() || v.is_array())
    }

    /// Requires a present (non-`null`) value.
    pub fn defined(self) -> Self {
        self.is("defined", |v| !v.is_null())
    }
}

pub(crate) fn plugins() -> PluginTable {
    PluginTable::new()
        .method("type_of", |s, args| {
            Ok(s.clone().type_of(Args::new("type_of", args).arity(1)?.string(0)?))
        })
        .method("boolean", |s, args| {
            Args::new("boolean", args).arity(0)?;
            Ok(s.clone().boolean())
        })
        .method("number", |s, args| {
            Args::new("number", args).arity(0)?;
            Ok(s.clone().number())
        })
        .method("string", |s, args| {
            Args::new("string", args).arity(0)?;
            Ok(s.clone().string())
        })
        .method("object", |s, args| {
            Args::new("object", args).arity(0)?;
            Ok(s.clone().object())
        })
        .method("integer", |s, args| {
            Args::new("integer", args).arity(0)?;
            Ok(s.clone().integer())
        })
        .method("array", |s, args| {
            Args::new("array", args).arity(0)?;
            Ok(s.clone().array())
        })
        .method("array_like", |s, args| {
            Args::new("array_like", args).arity(0)?;
            Ok(s.clone().array_like())
        })
        .method("defined", |s, args| {
            Args::new("defined", args).arity(0)?;
            Ok(s.clone().defined())
        })
}
