//! Serialized expression graphs.
//!
//! An [`Expr`] describes a server-side computation as a tree of function
//! invocations over constants. The wire format mirrors the service's
//! expression JSON: every node is tagged with its kind, invocations carry
//! a function name and named arguments, and mapped functions (e.g. a
//! per-image cloud mask applied across a collection) serialize as a
//! function definition with named placeholder arguments.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// One node in a server-side expression graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Expr {
    /// A literal value (number, string, GeoJSON object, ...).
    #[serde(rename_all = "camelCase")]
    Constant { value: Value },

    /// Reference to a named argument of an enclosing function definition.
    #[serde(rename_all = "camelCase")]
    Argument { name: String },

    /// A named server-side function applied to named arguments.
    #[serde(rename_all = "camelCase")]
    Invocation {
        function: String,
        args: BTreeMap<String, Expr>,
    },

    /// A function definition, used where the service expects a callable
    /// (e.g. the per-element function of `Collection.map`).
    #[serde(rename_all = "camelCase")]
    Function {
        argument_names: Vec<String>,
        body: Box<Expr>,
    },
}

impl Expr {
    pub fn constant(value: impl Into<Value>) -> Self {
        Self::Constant { value: value.into() }
    }

    pub fn argument(name: impl Into<String>) -> Self {
        Self::Argument { name: name.into() }
    }

    pub fn invoke<I>(function: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, Expr)>,
    {
        Self::Invocation {
            function: function.into(),
            args: args
                .into_iter()
                .map(|(name, expr)| (name.to_string(), expr))
                .collect(),
        }
    }

    /// Wrap `body` as a single-argument function definition.
    pub fn mapping(argument: &str, body: Expr) -> Self {
        Self::Function {
            argument_names: vec![argument.to_string()],
            body: Box::new(body),
        }
    }

    /// Function name if this node is an invocation.
    pub fn function(&self) -> Option<&str> {
        match self {
            Self::Invocation { function, .. } => Some(function),
            _ => None,
        }
    }

    /// Named argument of an invocation node.
    pub fn arg(&self, name: &str) -> Option<&Expr> {
        match self {
            Self::Invocation { args, .. } => args.get(name),
            _ => None,
        }
    }

    /// Constant payload if this node is a constant.
    pub fn as_constant(&self) -> Option<&Value> {
        match self {
            Self::Constant { value } => Some(value),
            _ => None,
        }
    }
}
