//! Schema types and the plugin mechanism.
//!
//! A [`SchemaType`] is the constructor schemas are built from: it owns an
//! ordered table of named plugin methods and the evaluator settings. The core
//! algebra never changes; new validators are added by extending a type with a
//! [`PluginTable`], which yields a *new* type and leaves the old one intact.
//!
//! Name collisions are refused when the type is extended, before any schema is
//! built from it, so a user plugin can never silently shadow a built-in.
//!
//! # Example
//!
//! ```rust
//! use chainval::{PluginError, PluginTable, SchemaType};
//! use serde_json::json;
//!
//! let sv = SchemaType::standard()
//!     .extend(PluginTable::new().method("is_hello", |schema, _args| {
//!         Ok(schema.clone().is("hello", |v| v == "hello"))
//!     }))
//!     .unwrap();
//!
//! let hello = sv.schema().invoke("is_hello", &[]).unwrap();
//! assert_eq!(hello.validate(&json!("hello")).unwrap(), json!("hello"));
//! assert!(hello.validate(&json!("bye")).is_err());
//!
//! // Registering the same name again fails at extension time.
//! let again = sv.extend(PluginTable::new().method("is_hello", |s, _| Ok(s.clone())));
//! assert_eq!(again.unwrap_err(), PluginError::AlreadyDefined("is_hello".to_string()));
//! ```

use std::fmt;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::error::PluginError;
use crate::eval::EvalConfig;
use crate::plugins;
use crate::schema::{Node, Schema};

/// A named validator factory.
///
/// It receives the schema it is invoked on and its arguments, and must return
/// a new schema built from the core combinators. It must not hold on to the
/// receiver beyond building the result.
pub type PluginFn = Arc<dyn Fn(&Schema, &[PluginArg]) -> Result<Schema, PluginError> + Send + Sync>;

/// Names of the core combinators and built-in methods that take closures.
/// They can never be registered as plugins.
const RESERVED: &[&str] = &[
    "new",
    "empty",
    "node",
    "schema_type",
    "next",
    "then",
    "first",
    "value",
    "reject",
    "satisfy",
    "check",
    "when",
    "when_else",
    "try_",
    "try_catch",
    "key",
    "items",
    "invoke",
    "validate",
    "validate_named",
    "validate_all",
    "par_validate_all",
    "is",
    "isnt",
];

/// Names of the built-in methods of every layer. Each is an inherent method
/// on [`Schema`], so no type may register a plugin under one of them, not even
/// a type that does not carry the layer.
static BUILTIN: Lazy<IndexSet<String>> = Lazy::new(|| {
    [
        plugins::comparison::plugins(),
        plugins::types::plugins(),
        plugins::structures::plugins(),
    ]
    .iter()
    .flat_map(|table| table.names().map(String::from).collect::<Vec<_>>())
    .collect()
});

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid"));

/// An argument passed to a plugin through [`Schema::invoke`].
#[derive(Debug, Clone)]
pub enum PluginArg {
    /// A plain JSON value (limits, defaults, key names, patterns).
    Value(Value),
    /// A sub-schema (field schemas, checkers).
    Schema(Schema),
}

impl From<Value> for PluginArg {
    fn from(value: Value) -> Self {
        PluginArg::Value(value)
    }
}

impl From<Schema> for PluginArg {
    fn from(schema: Schema) -> Self {
        PluginArg::Schema(schema)
    }
}

impl From<&str> for PluginArg {
    fn from(value: &str) -> Self {
        PluginArg::Value(Value::from(value))
    }
}

impl From<i64> for PluginArg {
    fn from(value: i64) -> Self {
        PluginArg::Value(Value::from(value))
    }
}

impl From<f64> for PluginArg {
    fn from(value: f64) -> Self {
        PluginArg::Value(Value::from(value))
    }
}

impl From<bool> for PluginArg {
    fn from(value: bool) -> Self {
        PluginArg::Value(Value::from(value))
    }
}

/// An ordered set of plugin methods waiting to be registered.
#[derive(Clone, Default)]
pub struct PluginTable {
    entries: Vec<(String, PluginFn)>,
}

impl PluginTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a method. Collisions are only detected by [`SchemaType::extend`].
    pub fn method<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Schema, &[PluginArg]) -> Result<Schema, PluginError> + Send + Sync + 'static,
    {
        self.entries.push((name.into(), Arc::new(f)));
        self
    }

    /// Returns the number of methods in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no methods.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the method names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

/// The constructor schemas are built from.
///
/// Cloning is cheap; the method table is shared.
#[derive(Clone)]
pub struct SchemaType {
    methods: Arc<IndexMap<String, PluginFn>>,
    config: EvalConfig,
}

static STANDARD: Lazy<SchemaType> = Lazy::new(|| {
    SchemaType::core()
        .register(plugins::comparison::plugins(), Origin::Builtin)
        .and_then(|sv| sv.register(plugins::types::plugins(), Origin::Builtin))
        .and_then(|sv| sv.register(plugins::structures::plugins(), Origin::Builtin))
        .expect("built-in plugin layers have distinct names")
});

/// Who is registering a table: built-in layers may use built-in names.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Origin {
    Builtin,
    User,
}

impl SchemaType {
    /// A type with only the core combinators.
    pub fn core() -> Self {
        Self {
            methods: Arc::new(IndexMap::new()),
            config: EvalConfig::new(),
        }
    }

    /// The core plus the built-in layers, stacked in order: comparison,
    /// types, structures.
    pub fn standard() -> Self {
        STANDARD.clone()
    }

    /// Returns a copy of this type with a different evaluation depth limit.
    ///
    /// ```rust
    /// use chainval::SchemaType;
    ///
    /// let sv = SchemaType::standard().with_max_depth(16);
    /// assert_eq!(sv.config().max_depth(), 16);
    /// ```
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.config = self.config.with_max_depth(depth);
        self
    }

    /// Returns the evaluation settings.
    pub fn config(&self) -> EvalConfig {
        self.config
    }

    /// Returns the identity schema of this type.
    pub fn schema(&self) -> Schema {
        Schema::from_node(Arc::new(Node::Identity), self.clone())
    }

    /// Returns a new type with the methods of `table` added.
    ///
    /// # Errors
    ///
    /// - [`PluginError::AlreadyDefined`] if a name is reserved, names a
    ///   built-in method (even on [`SchemaType::core`]), is already
    ///   registered, or is repeated within `table`
    /// - [`PluginError::Malformed`] if a name is not an identifier
    pub fn extend(&self, table: PluginTable) -> Result<Self, PluginError> {
        self.register(table, Origin::User)
    }

    fn register(&self, table: PluginTable, origin: Origin) -> Result<Self, PluginError> {
        let mut methods = (*self.methods).clone();

        for (name, f) in table.entries {
            if !IDENTIFIER.is_match(&name) {
                return Err(PluginError::Malformed {
                    name,
                    reason: "method names must be identifiers".to_string(),
                });
            }
            let builtin = origin == Origin::User && BUILTIN.contains(&name);
            if builtin || RESERVED.contains(&name.as_str()) || methods.contains_key(&name) {
                return Err(PluginError::AlreadyDefined(name));
            }
            methods.insert(name, f);
        }

        debug!(
            added = methods.len() - self.methods.len(),
            total = methods.len(),
            "extended schema type"
        );

        Ok(Self {
            methods: Arc::new(methods),
            config: self.config,
        })
    }

    /// Returns true if `name` is a registered plugin method.
    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Returns the registered method names in registration order.
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    pub(crate) fn method(&self, name: &str) -> Option<&PluginFn> {
        self.methods.get(name)
    }
}

impl Default for SchemaType {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaType")
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .field("config", &self.config)
            .finish()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<SchemaType>();
    assert_sync::<SchemaType>();
};
