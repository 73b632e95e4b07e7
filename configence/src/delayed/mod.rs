//! Delayed values: templates and functions evaluated after plain entries.
//!
//! A delayed value reads other attributes of the holder it belongs to. It
//! is evaluated once per load, in declaration order, against whatever has
//! been resolved by then. References to attributes that are not resolved
//! yet are soft failures: templates keep the placeholder text, functions
//! fall back to the parameter default or receive no argument at all.

mod template;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::value::Value;

pub use template::{is_identifier, placeholders, render};

/// Signature of a delayed function body.
pub type DelayFn = dyn Fn(&DelayArgs) -> Result<Value> + Send + Sync;

/// Arguments bound for a delayed function call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DelayArgs {
    values: BTreeMap<String, Value>,
}

impl DelayArgs {
    /// Returns true if `name` was bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// The bound value for `name`, if any.
    #[must_use]
    pub fn optional(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// The bound value for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownEntry`] if the parameter was not bound.
    pub fn value(&self, name: &str) -> Result<&Value> {
        self.values.get(name).ok_or_else(|| Error::UnknownEntry {
            name: name.to_string(),
        })
    }

    /// The bound value for `name`, deserialized as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownEntry`] if the parameter was not bound, or
    /// [`Error::TypeMismatch`] if it does not fit `T`.
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        self.value(name)?.deserialize_into(name)
    }

    /// Number of bound arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing was bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A delayed function: named parameters plus a body.
///
/// # Examples
///
/// ```
/// use configence::delayed::DelayedFn;
/// use configence::Value;
///
/// let shout = DelayedFn::new(|args| {
///     let hero: String = args.get("MY_HERO")?;
///     Ok(Value::from(format!("{hero}!!!")))
/// })
/// .param("MY_HERO");
/// assert_eq!(shout.params().collect::<Vec<_>>(), vec!["MY_HERO"]);
/// ```
#[derive(Clone)]
pub struct DelayedFn {
    params: Vec<(String, Option<Value>)>,
    func: Arc<DelayFn>,
}

impl DelayedFn {
    /// Wrap a function body with no parameters.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&DelayArgs) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            params: Vec::new(),
            func: Arc::new(func),
        }
    }

    /// Add a parameter bound from the attribute of the same name.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.params.push((name.into(), None));
        self
    }

    /// Add a parameter with a fallback used while the attribute is unresolved.
    #[must_use]
    pub fn param_or(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.params.push((name.into(), Some(default.into())));
        self
    }

    /// Parameter names, in declaration order.
    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|(name, _)| name.as_str())
    }

    fn bind<F>(&self, lookup: F) -> DelayArgs
    where
        F: Fn(&str) -> Option<Value>,
    {
        let values = self
            .params
            .iter()
            .filter_map(|(name, default)| {
                lookup(name)
                    .or_else(|| default.clone())
                    .map(|value| (name.clone(), value))
            })
            .collect();
        DelayArgs { values }
    }

    fn call<F>(&self, lookup: F) -> Result<Value>
    where
        F: Fn(&str) -> Option<Value>,
    {
        (self.func)(&self.bind(lookup))
    }
}

impl fmt::Debug for DelayedFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelayedFn")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// A value computed from other attributes once they are resolved.
///
/// # Examples
///
/// ```
/// use configence::delayed::Delayed;
/// use configence::Value;
///
/// let message = Delayed::template("{MY_HERO} is over {POWER_LEVEL}");
/// let value = message
///     .evaluate(|name| match name {
///         "MY_HERO" => Some(Value::from("Son Goku")),
///         "POWER_LEVEL" => Some(Value::from(9001)),
///         _ => None,
///     })
///     .unwrap();
/// assert_eq!(value, Value::from("Son Goku is over 9001"));
/// ```
#[derive(Debug, Clone)]
pub enum Delayed {
    /// A string with `{name}` placeholders.
    Template(String),
    /// A function over other attributes.
    Function(DelayedFn),
}

impl Delayed {
    /// A delayed string template.
    pub fn template(template: impl Into<String>) -> Self {
        Self::Template(template.into())
    }

    /// A delayed function.
    #[must_use]
    pub fn function(func: DelayedFn) -> Self {
        Self::Function(func)
    }

    /// Evaluate against resolved attributes.
    ///
    /// `lookup` returns `None` for names that are not resolved.
    ///
    /// # Errors
    ///
    /// Templates never fail. Function errors are returned as-is.
    pub fn evaluate<F>(&self, lookup: F) -> Result<Value>
    where
        F: Fn(&str) -> Option<Value>,
    {
        match self {
            Self::Template(template) => Ok(Value::Str(render(template, lookup))),
            Self::Function(func) => func.call(lookup),
        }
    }

    /// Attribute names this value reads.
    #[must_use]
    pub fn references(&self) -> Vec<&str> {
        match self {
            Self::Template(template) => placeholders(template),
            Self::Function(func) => func.params().collect(),
        }
    }
}

impl From<DelayedFn> for Delayed {
    fn from(func: DelayedFn) -> Self {
        Self::Function(func)
    }
}

impl fmt::Display for Delayed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template(template) => write!(f, "delay({template:?})"),
            Self::Function(func) => {
                let params: Vec<&str> = func.params().collect();
                write!(f, "delay(fn({}))", params.join(", "))
            }
        }
    }
}
