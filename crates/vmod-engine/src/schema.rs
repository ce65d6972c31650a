//! # Schema Types
//!
//! A schema is an ordered tree. Interior positions are named field groups
//! ([`Fields`]) or repeat branches ([`SchemaTree::Repeat`], "this branch may
//! occur N times"); leaves are [`SchemaNode`] validation descriptors.
//!
//! Schemas are declared once per domain model and shared read-only across
//! calls and threads: every callback is `Send + Sync` and reference-counted,
//! so cloning a schema (or embedding one schema inside another) is cheap.
//!
//! ```
//! use vmod_engine::{Fields, Schema, SchemaNode, SchemaTree};
//!
//! let schema = Schema::object(
//!     Fields::new()
//!         .field("id", SchemaNode::string().required())
//!         .field(
//!             "items",
//!             SchemaTree::repeat(Fields::new().field("name", SchemaNode::string().required())),
//!         ),
//! );
//! assert!(schema.node("items/{n}/name").is_some());
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use vmod_core::ValueType;

/// Path token standing for "any index" of a repeat branch.
pub const PLACEHOLDER: &str = "{n}";

/// Prefix reserved for pass-through extension properties on schema nodes.
/// Matched ASCII case-insensitively.
pub const EXTENSION_PREFIX: &str = "custom";

/// The declared type of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SchemaType {
    String,
    Number,
    Boolean,
    SimpleObject,
    Function,
    AnySupportedType,
}

impl SchemaType {
    /// Every declarable type, in documentation order.
    pub const ALL: [SchemaType; 6] = [
        Self::String,
        Self::Number,
        Self::Boolean,
        Self::SimpleObject,
        Self::Function,
        Self::AnySupportedType,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::SimpleObject => "simpleObject",
            Self::Function => "function",
            Self::AnySupportedType => "anySupportedType",
        }
    }

    /// Parse a type name as written in schema documents.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    /// True if a present value of type `found` satisfies this declaration.
    ///
    /// `anySupportedType` accepts strings, numbers, booleans, simple objects
    /// and arrays, but not `null`. `function` is never satisfied by data.
    pub fn accepts(&self, found: ValueType) -> bool {
        match self {
            Self::String => found == ValueType::String,
            Self::Number => found == ValueType::Number,
            Self::Boolean => found == ValueType::Boolean,
            Self::SimpleObject => found == ValueType::SimpleObject,
            Self::Function => false,
            Self::AnySupportedType => matches!(
                found,
                ValueType::String
                    | ValueType::Number
                    | ValueType::Boolean
                    | ValueType::SimpleObject
                    | ValueType::Array
            ),
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a default function produced.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultOutcome {
    /// Write this value. Must be `null`, a boolean, a string or a number.
    Value(Value),
    /// Leave the position absent.
    Unset,
    /// The callback could not compute a default. Reported as a schema defect.
    Failed(String),
}

/// What a validation function decided.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    Valid,
    /// The value is rejected; the message is shown to the end user.
    Invalid(String),
    /// The callback itself broke. Reported as a schema defect.
    Failed(String),
}

type DefaultCallback = dyn Fn(Option<&Value>, &SchemaNode, &Value) -> DefaultOutcome + Send + Sync;
type ValidationCallback =
    dyn Fn(Option<&Value>, &SchemaNode, &Value) -> ValidationOutcome + Send + Sync;

/// A named default callback.
///
/// Invoked with the current value (always absent when called by the
/// engine), the schema node, and the caller's original base object.
#[derive(Clone)]
pub struct DefaultFn {
    name: String,
    callback: Arc<DefaultCallback>,
}

impl DefaultFn {
    pub fn new<F>(name: impl Into<String>, callback: F) -> Self
    where
        F: Fn(Option<&Value>, &SchemaNode, &Value) -> DefaultOutcome + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            callback: Arc::new(callback),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, current: Option<&Value>, node: &SchemaNode, base: &Value) -> DefaultOutcome {
        (self.callback)(current, node, base)
    }
}

impl fmt::Debug for DefaultFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DefaultFn").field(&self.name).finish()
    }
}

/// A named validation callback.
///
/// Invoked with the current value (possibly absent), the schema node, and
/// the caller's original base object.
#[derive(Clone)]
pub struct ValidationFn {
    name: String,
    callback: Arc<ValidationCallback>,
}

impl ValidationFn {
    pub fn new<F>(name: impl Into<String>, callback: F) -> Self
    where
        F: Fn(Option<&Value>, &SchemaNode, &Value) -> ValidationOutcome + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            callback: Arc::new(callback),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(
        &self,
        value: Option<&Value>,
        node: &SchemaNode,
        base: &Value,
    ) -> ValidationOutcome {
        (self.callback)(value, node, base)
    }
}

impl fmt::Debug for ValidationFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ValidationFn").field(&self.name).finish()
    }
}

/// A leaf validation descriptor.
///
/// `default_value`/`default_function` and `allowed_values`/`validation_function`
/// are mutually exclusive pairs. Both members stay independently settable;
/// declaring both is reported when the schema is meta-validated.
#[derive(Debug, Clone)]
pub struct SchemaNode {
    pub node_type: SchemaType,
    pub required: bool,
    pub default_value: Option<Value>,
    pub default_function: Option<DefaultFn>,
    /// Comma-separated list of permitted string values.
    pub allowed_values: Option<String>,
    pub validation_function: Option<ValidationFn>,
    /// Name used in user-facing messages instead of the field path.
    pub friendly_name: Option<String>,
    /// `custom*` pass-through properties. Values are never inspected.
    pub extensions: BTreeMap<String, Value>,
}

impl SchemaNode {
    pub fn new(node_type: SchemaType) -> Self {
        Self {
            node_type,
            required: false,
            default_value: None,
            default_function: None,
            allowed_values: None,
            validation_function: None,
            friendly_name: None,
            extensions: BTreeMap::new(),
        }
    }

    pub fn string() -> Self {
        Self::new(SchemaType::String)
    }

    pub fn number() -> Self {
        Self::new(SchemaType::Number)
    }

    pub fn boolean() -> Self {
        Self::new(SchemaType::Boolean)
    }

    pub fn simple_object() -> Self {
        Self::new(SchemaType::SimpleObject)
    }

    pub fn any() -> Self {
        Self::new(SchemaType::AnySupportedType)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn default_function(mut self, function: DefaultFn) -> Self {
        self.default_function = Some(function);
        self
    }

    pub fn allowed_values(mut self, values: impl Into<String>) -> Self {
        self.allowed_values = Some(values.into());
        self
    }

    pub fn validation_function(mut self, function: ValidationFn) -> Self {
        self.validation_function = Some(function);
        self
    }

    pub fn friendly_name(mut self, name: impl Into<String>) -> Self {
        self.friendly_name = Some(name.into());
        self
    }

    pub fn extension(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extensions.insert(name.into(), value.into());
        self
    }

    /// True if a default is declared by either mechanism.
    pub fn has_default(&self) -> bool {
        self.default_value.is_some() || self.default_function.is_some()
    }

    /// The allowed-values list, split on commas and trimmed. Empty when no
    /// list is declared or the declaration is an empty string.
    pub fn allowed_list(&self) -> Vec<&str> {
        match self.allowed_values.as_deref() {
            Some(list) if !list.is_empty() => list.split(',').map(str::trim).collect(),
            _ => Vec::new(),
        }
    }

    /// JSON description of this node for error payloads. Callbacks are
    /// represented by their names.
    pub fn summary(&self) -> Value {
        let mut out = Map::new();
        out.insert("type".into(), Value::from(self.node_type.as_str()));
        if self.required {
            out.insert("required".into(), Value::Bool(true));
        }
        if let Some(v) = &self.default_value {
            out.insert("defaultValue".into(), v.clone());
        }
        if let Some(f) = &self.default_function {
            out.insert("defaultFunction".into(), Value::from(f.name()));
        }
        if let Some(v) = &self.allowed_values {
            out.insert("allowedValues".into(), Value::from(v.as_str()));
        }
        if let Some(f) = &self.validation_function {
            out.insert("validationFunction".into(), Value::from(f.name()));
        }
        if let Some(v) = &self.friendly_name {
            out.insert("friendlyName".into(), Value::from(v.as_str()));
        }
        for (k, v) in &self.extensions {
            out.insert(k.clone(), v.clone());
        }
        Value::Object(out)
    }
}

/// One position of a schema tree.
#[derive(Debug, Clone)]
pub enum SchemaTree {
    /// A leaf descriptor.
    Node(SchemaNode),
    /// Named children, in declaration order.
    Fields(Fields),
    /// A branch that may repeat any number of times in the data.
    Repeat(Box<SchemaTree>),
}

impl SchemaTree {
    pub fn repeat(item: impl Into<SchemaTree>) -> Self {
        Self::Repeat(Box::new(item.into()))
    }

    pub fn as_node(&self) -> Option<&SchemaNode> {
        match self {
            Self::Node(node) => Some(node),
            _ => None,
        }
    }
}

impl From<SchemaNode> for SchemaTree {
    fn from(node: SchemaNode) -> Self {
        Self::Node(node)
    }
}

impl From<Fields> for SchemaTree {
    fn from(fields: Fields) -> Self {
        Self::Fields(fields)
    }
}

impl From<Schema> for SchemaTree {
    fn from(schema: Schema) -> Self {
        schema.root
    }
}

/// Ordered named children of a schema group.
#[derive(Debug, Clone, Default)]
pub struct Fields(Vec<(String, SchemaTree)>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field. Re-declaring a name replaces it in its original position.
    pub fn field(mut self, name: impl Into<String>, tree: impl Into<SchemaTree>) -> Self {
        self.insert(name, tree);
        self
    }

    /// In-place form of [`field`](Self::field).
    pub fn insert(&mut self, name: impl Into<String>, tree: impl Into<SchemaTree>) {
        let name = name.into();
        let tree = tree.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = tree,
            None => self.0.push((name, tree)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&SchemaTree> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, t)| t)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut SchemaTree> {
        self.0.iter_mut().find(|(n, _)| n == name).map(|(_, t)| t)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&str, &SchemaTree)> {
        self.0.iter().map(|(n, t)| (n.as_str(), t))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A complete schema: the root of a schema tree.
///
/// The root is expected to be a field group or a repeat branch; anything
/// else is reported when the schema is meta-validated.
#[derive(Debug, Clone)]
pub struct Schema {
    root: SchemaTree,
}

impl Schema {
    pub fn new(root: impl Into<SchemaTree>) -> Self {
        Self { root: root.into() }
    }

    /// A schema rooted at an object.
    pub fn object(fields: Fields) -> Self {
        Self::new(fields)
    }

    /// A schema rooted at an array of repeating items.
    pub fn repeat(item: impl Into<SchemaTree>) -> Self {
        Self::new(SchemaTree::repeat(item))
    }

    pub fn root(&self) -> &SchemaTree {
        &self.root
    }

    pub fn into_root(self) -> SchemaTree {
        self.root
    }

    /// The schema node at a `/`-separated path, with `{n}` stepping into
    /// repeat branches (`email/{n}/label`).
    pub fn node(&self, path: &str) -> Option<&SchemaNode> {
        let mut tree = &self.root;
        for segment in path.split('/') {
            tree = match tree {
                SchemaTree::Fields(fields) => fields.get(segment)?,
                SchemaTree::Repeat(item) if segment == PLACEHOLDER => &**item,
                _ => return None,
            };
        }
        tree.as_node()
    }

    /// Mutable form of [`node`](Self::node). Used to attach callbacks to
    /// schemas loaded from documents.
    pub fn node_mut(&mut self, path: &str) -> Option<&mut SchemaNode> {
        let mut tree = &mut self.root;
        for segment in path.split('/') {
            tree = match tree {
                SchemaTree::Fields(fields) => fields.get_mut(segment)?,
                SchemaTree::Repeat(item) if segment == PLACEHOLDER => &mut **item,
                _ => return None,
            };
        }
        match tree {
            SchemaTree::Node(node) => Some(node),
            _ => None,
        }
    }
}
