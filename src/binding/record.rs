//! Structured records
//!
//! A record is a flat bundle of scalar fields. Instead of reflecting over the
//! type at request time, each record publishes a static field table and is
//! materialized through serde.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as Json;

/// Scalar type of a record field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Int,
    Long,
    Bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl Field {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// A record type that can be bound from request parameters or a JSON body
///
/// Implementors must deserialize with `#[serde(default)]` so that absent
/// fields keep their zero values, and route each field through
/// [`null_as_default`] so that explicit nulls do too.
pub trait Record: Serialize + DeserializeOwned + Default {
    const NAME: &'static str;
    const FIELDS: &'static [Field];
}

/// Type-erased view of a [`Record`], stored in binding descriptors
#[derive(Debug, Clone, Copy)]
pub struct RecordShape {
    pub name: &'static str,
    pub fields: &'static [Field],
    check: fn(&Json) -> Result<(), serde_json::Error>,
}

impl RecordShape {
    pub fn of<R: Record>() -> Self {
        Self {
            name: R::NAME,
            fields: R::FIELDS,
            check: check_record::<R>,
        }
    }

    /// Verify that a JSON value deserializes into the record
    pub fn check(&self, value: &Json) -> Result<(), serde_json::Error> {
        (self.check)(value)
    }
}

fn check_record<R: Record>(value: &Json) -> Result<(), serde_json::Error> {
    R::deserialize(value).map(drop)
}

/// Field deserializer that reads `null` as the zero value
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
