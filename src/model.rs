//! Records exchanged by the demo controllers

use serde::{Deserialize, Serialize};

use crate::binding::record::null_as_default;
use crate::binding::{Field, FieldKind, Record};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelloData {
    #[serde(deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(deserialize_with = "null_as_default")]
    pub age: i32,
}

impl Record for HelloData {
    const NAME: &'static str = "HelloData";
    const FIELDS: &'static [Field] = &[
        Field::new("username", FieldKind::Text),
        Field::new("age", FieldKind::Int),
    ];
}

impl HelloData {
    pub fn new(username: impl Into<String>, age: i32) -> Self {
        Self {
            username: username.into(),
            age,
        }
    }
}
