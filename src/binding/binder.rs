//! Request binder
//!
//! Executes a route's [`Descriptor`] against one [`RequestParts`]. Any
//! failure aborts the request before the handler runs.

use serde_json::{Map, Value as Json};
use tracing::debug;

use super::args::{Arguments, RequestEntity, Value};
use super::convert::{convert_field, convert_scalar};
use super::descriptor::{Descriptor, Kind, ParamSpec, Source};
use super::record::RecordShape;
use crate::error::{Mismatch, MvcError};
use crate::http::media::OCTET_STREAM;
use crate::http::RequestParts;

#[derive(Debug, Clone)]
pub struct Binder {
    default_locale: String,
}

impl Binder {
    pub fn new(default_locale: impl Into<String>) -> Self {
        Self {
            default_locale: default_locale.into(),
        }
    }

    /// Bind every argument of `descriptor`
    ///
    /// `path_vars` are the placeholders captured by the route template.
    pub fn bind(
        &self,
        descriptor: &Descriptor,
        req: &RequestParts,
        path_vars: &[(String, String)],
    ) -> Result<Arguments, MvcError> {
        let mut args = Arguments::default();
        for spec in descriptor.params() {
            if let Some(value) = self.bind_one(spec, req, path_vars)? {
                debug!(argument = %spec.name, source = %spec.source, value = ?value, "Argument bound");
                args.push(&spec.name, value);
            }
        }
        Ok(args)
    }

    fn bind_one(
        &self,
        spec: &ParamSpec,
        req: &RequestParts,
        path_vars: &[(String, String)],
    ) -> Result<Option<Value>, MvcError> {
        let value = match spec.source {
            Source::Query | Source::Implicit => match spec.kind {
                Kind::Record(shape) => bind_model(spec, shape, req)?,
                Kind::TextList => {
                    let values: Vec<String> =
                        req.param_values(&spec.key).map(ToString::to_string).collect();
                    list_or_missing(spec, values)?
                }
                _ => bind_scalar(spec, req.param(&spec.key))?,
            },
            Source::Path => {
                let raw = path_vars
                    .iter()
                    .find(|(name, _)| *name == spec.key)
                    .map(|(_, v)| v.as_str());
                bind_scalar(spec, raw)?
            }
            Source::Header => match spec.kind {
                Kind::TextList => list_or_missing(spec, req.header_values(&spec.key))?,
                _ => bind_scalar(spec, req.header(&spec.key))?,
            },
            Source::Cookie => bind_scalar(spec, req.cookie(&spec.key))?,
            Source::Body => bind_body(spec, req)?,
            Source::Model => match spec.kind {
                Kind::Record(shape) => bind_model(spec, shape, req)?,
                _ => bind_scalar(spec, req.param(&spec.key))?,
            },
            Source::ParamMap => Value::ParamMap(first_values(&req.params)),
            Source::HeaderMap => Value::HeaderMap(
                req.headers
                    .keys()
                    .map(|name| (name.as_str().to_string(), req.header_values(name.as_str())))
                    .collect(),
            ),
            Source::Method => Value::Method(req.method.clone()),
            Source::Locale => Value::Locale(self.resolve_locale(req)),
            Source::Entity => Value::Entity(bind_entity(spec, req)?),
            Source::Request | Source::Writer => return Ok(None),
        };
        Ok(Some(value))
    }

    /// First language range of `Accept-Language`, or the configured default
    fn resolve_locale(&self, req: &RequestParts) -> String {
        req.header("accept-language")
            .and_then(|value| value.split(',').next())
            .and_then(|range| range.split(';').next())
            .map(str::trim)
            .filter(|tag| !tag.is_empty() && *tag != "*")
            .map_or_else(|| self.default_locale.clone(), ToString::to_string)
    }
}

/// Bind a single scalar from an optional raw value
///
/// Present values convert directly. An absent value, or an empty one for
/// non-text kinds, falls back to the default, then to the required check,
/// then to the null-primitive check, and finally binds `Null`.
fn bind_scalar(spec: &ParamSpec, raw: Option<&str>) -> Result<Value, MvcError> {
    let raw = raw.filter(|r| !(r.is_empty() && spec.default_on_empty && spec.default.is_some()));

    if let Some(raw) = raw {
        if let Some(value) = convert(spec, raw)? {
            return Ok(value);
        }
    }

    if let Some(default) = &spec.default {
        if let Some(value) = convert(spec, default)? {
            return Ok(value);
        }
    }

    if spec.required {
        return Err(MvcError::MissingParameter {
            name: spec.key.clone(),
            location: spec.source,
        });
    }

    if spec.is_null_primitive_trap() {
        return Err(MvcError::NullPrimitive {
            name: spec.key.clone(),
        });
    }

    Ok(Value::Null)
}

fn convert(spec: &ParamSpec, raw: &str) -> Result<Option<Value>, MvcError> {
    convert_scalar(raw, spec.kind).map_err(|e| MvcError::Binding {
        name: spec.key.clone(),
        location: spec.source,
        value: raw.to_string(),
        expected: e.expected,
    })
}

fn list_or_missing(spec: &ParamSpec, values: Vec<String>) -> Result<Value, MvcError> {
    if values.is_empty() && spec.required {
        return Err(MvcError::MissingParameter {
            name: spec.key.clone(),
            location: spec.source,
        });
    }
    Ok(Value::TextList(values))
}

/// Bind a record field by field from request parameters
///
/// Fields without a parameter, or with an empty one for non-text fields,
/// keep their zero value.
fn bind_model(spec: &ParamSpec, shape: RecordShape, req: &RequestParts) -> Result<Value, MvcError> {
    let mut object = Map::new();
    for field in shape.fields {
        let Some(raw) = req.param(field.name) else {
            continue;
        };
        let value = convert_field(raw, field.kind).map_err(|e| MvcError::Binding {
            name: field.name.to_string(),
            location: Source::Model,
            value: raw.to_string(),
            expected: e.expected,
        })?;
        if let Some(value) = value {
            object.insert(field.name.to_string(), value);
        }
    }

    let record = Json::Object(object);
    shape
        .check(&record)
        .map_err(|e| MvcError::MessageNotReadable(format!("{} '{}': {e}", shape.name, spec.name)))?;
    Ok(Value::Record(record))
}

fn bind_body(spec: &ParamSpec, req: &RequestParts) -> Result<Value, MvcError> {
    if matches!(spec.kind, Kind::Record(_)) {
        require_json(req)?;
    }

    if req.body.is_empty() {
        if spec.required {
            return Err(MvcError::MessageNotReadable(
                "Required request body is missing".to_string(),
            ));
        }
        return Ok(Value::Null);
    }

    match spec.kind {
        Kind::Record(shape) => Ok(Value::Record(decode_record(shape, req)?)),
        _ => Ok(Value::Text(req.body_text().into_owned())),
    }
}

/// Headers and raw body, plus the decoded body for a record entity
///
/// A record entity follows the record body rules, except that an empty body
/// leaves `record` unset.
fn bind_entity(spec: &ParamSpec, req: &RequestParts) -> Result<RequestEntity, MvcError> {
    let record = match spec.kind {
        Kind::Record(shape) => {
            require_json(req)?;
            if req.body.is_empty() {
                None
            } else {
                Some(decode_record(shape, req)?)
            }
        }
        _ => None,
    };
    Ok(RequestEntity {
        headers: req
            .headers
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect(),
        body: req.body_text().into_owned(),
        record,
    })
}

/// Records are only read from JSON, and a missing type counts as octet-stream
fn require_json(req: &RequestParts) -> Result<(), MvcError> {
    let content_type = req.content_type();
    if content_type.as_ref().is_some_and(crate::http::MediaType::is_json) {
        return Ok(());
    }
    Err(Mismatch::UnsupportedMediaType {
        content_type: content_type.map_or_else(|| OCTET_STREAM.to_string(), |mt| mt.to_string()),
    }
    .into())
}

fn decode_record(shape: RecordShape, req: &RequestParts) -> Result<Json, MvcError> {
    let json: Json = serde_json::from_slice(&req.body)
        .map_err(|e| MvcError::MessageNotReadable(format!("JSON parse error: {e}")))?;
    shape
        .check(&json)
        .map_err(|e| MvcError::MessageNotReadable(format!("Cannot bind {}: {e}", shape.name)))?;
    Ok(json)
}

fn first_values(params: &[(String, String)]) -> Vec<(String, String)> {
    let mut map: Vec<(String, String)> = Vec::new();
    for (name, value) in params {
        if !map.iter().any(|(n, _)| n == name) {
            map.push((name.clone(), value.clone()));
        }
    }
    map
}
