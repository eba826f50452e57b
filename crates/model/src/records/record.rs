use crate::core::{
    data_type::DataType,
    value::{FieldValue, Value, ValueTypeError},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Declared shape of a single record field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub data_type: DataType,
    pub nullable: bool,
}

impl FieldSpec {
    pub fn required(name: &str, data_type: DataType) -> Self {
        FieldSpec {
            name: name.to_string(),
            data_type,
            nullable: false,
        }
    }

    pub fn nullable(name: &str, data_type: DataType) -> Self {
        FieldSpec {
            name: name.to_string(),
            data_type,
            nullable: true,
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Looks up a declared field by name, ignoring ASCII case.
pub fn find_spec<'a>(specs: &'a [FieldSpec], name: &str) -> Option<&'a FieldSpec> {
    specs.iter().find(|spec| spec.matches(name))
}

#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    /// The record declares no field with this name.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// The field holds a value with no textual representation.
    #[error("Field '{field}' cannot be converted: {reason}")]
    Unconvertible { field: String, reason: String },

    /// A value of the wrong kind was written into a field.
    #[error("Field '{field}' rejected value: {source}")]
    Value {
        field: String,
        #[source]
        source: ValueTypeError,
    },

    /// `None` was written into a field that is not nullable.
    #[error("Field '{0}' is not nullable")]
    NotNullable(String),
}

/// A record whose fields can be read and written by name.
///
/// Names are matched ignoring ASCII case, so a composite key of `"ID"`
/// resolves against a column called `id`.
pub trait Record {
    /// Name of the entity (table) the record belongs to.
    fn entity(&self) -> &str;

    /// Declared fields in declaration order.
    fn field_specs(&self) -> Vec<FieldSpec>;

    /// Reads a named field. A `None` value marks an absent optional field.
    fn field(&self, name: &str) -> Result<FieldValue, RecordError>;

    /// Writes a value into a named field; `None` clears an optional field.
    fn set_field(&mut self, name: &str, value: Option<Value>) -> Result<(), RecordError>;
}
