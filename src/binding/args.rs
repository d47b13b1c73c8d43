//! Bound argument values handed to handlers

use hyper::Method;
use serde_json::Value as Json;

use super::record::Record;
use crate::error::MvcError;

/// Headers and body of the request, bound together
///
/// `record` holds the decoded body when the entity is declared with a
/// record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestEntity {
    pub headers: Vec<(String, String)>,
    pub body: String,
    pub record: Option<Json>,
}

impl RequestEntity {
    /// Materialize the decoded body, or the zero record for an empty body
    pub fn record<R: Record>(&self) -> Result<R, MvcError> {
        self.record.as_ref().map_or_else(
            || Ok(R::default()),
            |json| R::deserialize(json).map_err(|e| MvcError::MessageNotReadable(e.to_string())),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Optional argument with nothing to bind
    Null,
    Text(String),
    Int(i32),
    Long(i64),
    Bool(bool),
    TextList(Vec<String>),
    /// Name to first value, in first-seen order
    ParamMap(Vec<(String, String)>),
    /// Name to every value
    HeaderMap(Vec<(String, Vec<String>)>),
    /// Record already validated against its shape
    Record(Json),
    Method(Method),
    Locale(String),
    Entity(RequestEntity),
}

impl Value {
    /// JSON form of scalar values
    pub fn to_json(&self) -> Option<Json> {
        match self {
            Self::Text(s) | Self::Locale(s) => Some(Json::from(s.as_str())),
            Self::Int(i) => Some(Json::from(*i)),
            Self::Long(l) => Some(Json::from(*l)),
            Self::Bool(b) => Some(Json::from(*b)),
            Self::Record(json) => Some(json.clone()),
            _ => None,
        }
    }
}

/// Arguments of one handler invocation, keyed by argument name
#[derive(Debug, Clone, Default)]
pub struct Arguments {
    values: Vec<(String, Value)>,
}

impl Arguments {
    pub(crate) fn push(&mut self, name: &str, value: Value) {
        self.values.push((name.to_string(), value));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn lookup(&self, name: &str, expected: &'static str) -> Result<&Value, MvcError> {
        self.get(name).ok_or_else(|| unbound(name, expected))
    }

    pub fn text(&self, name: &str) -> Result<&str, MvcError> {
        self.opt_text(name)?.ok_or_else(|| unbound(name, "text"))
    }

    pub fn opt_text(&self, name: &str) -> Result<Option<&str>, MvcError> {
        match self.lookup(name, "text")? {
            Value::Text(s) => Ok(Some(s)),
            Value::Null => Ok(None),
            _ => Err(unbound(name, "text")),
        }
    }

    pub fn int(&self, name: &str) -> Result<i32, MvcError> {
        self.opt_int(name)?.ok_or_else(|| unbound(name, "int"))
    }

    pub fn opt_int(&self, name: &str) -> Result<Option<i32>, MvcError> {
        match self.lookup(name, "int")? {
            Value::Int(i) => Ok(Some(*i)),
            Value::Null => Ok(None),
            _ => Err(unbound(name, "int")),
        }
    }

    pub fn long(&self, name: &str) -> Result<i64, MvcError> {
        match self.lookup(name, "long")? {
            Value::Long(l) => Ok(*l),
            Value::Int(i) => Ok(i64::from(*i)),
            _ => Err(unbound(name, "long")),
        }
    }

    pub fn text_list(&self, name: &str) -> Result<&[String], MvcError> {
        match self.lookup(name, "text list")? {
            Value::TextList(values) => Ok(values),
            _ => Err(unbound(name, "text list")),
        }
    }

    pub fn param_map(&self, name: &str) -> Result<&[(String, String)], MvcError> {
        match self.lookup(name, "parameter map")? {
            Value::ParamMap(map) => Ok(map),
            _ => Err(unbound(name, "parameter map")),
        }
    }

    pub fn header_map(&self, name: &str) -> Result<&[(String, Vec<String>)], MvcError> {
        match self.lookup(name, "header map")? {
            Value::HeaderMap(map) => Ok(map),
            _ => Err(unbound(name, "header map")),
        }
    }

    pub fn method(&self, name: &str) -> Result<&Method, MvcError> {
        match self.lookup(name, "method")? {
            Value::Method(m) => Ok(m),
            _ => Err(unbound(name, "method")),
        }
    }

    pub fn locale(&self, name: &str) -> Result<&str, MvcError> {
        match self.lookup(name, "locale")? {
            Value::Locale(l) => Ok(l),
            _ => Err(unbound(name, "locale")),
        }
    }

    pub fn entity(&self, name: &str) -> Result<&RequestEntity, MvcError> {
        match self.lookup(name, "entity")? {
            Value::Entity(e) => Ok(e),
            _ => Err(unbound(name, "entity")),
        }
    }

    /// Materialize a bound record
    pub fn record<R: Record>(&self, name: &str) -> Result<R, MvcError> {
        match self.lookup(name, R::NAME)? {
            Value::Record(json) => {
                R::deserialize(json).map_err(|e| MvcError::MessageNotReadable(e.to_string()))
            }
            Value::Null => Ok(R::default()),
            _ => Err(unbound(name, R::NAME)),
        }
    }
}

fn unbound(name: &str, expected: &'static str) -> MvcError {
    MvcError::UnboundArgument {
        name: name.to_string(),
        expected,
    }
}
