use crate::{
    core::value::{FieldValue, Value},
    records::record::{FieldSpec, Record, RecordError},
};
use serde::{Deserialize, Serialize};

/// A dynamically shaped record, as materialized from a SQL result set.
///
/// Every column is treated as nullable; `None` and `Value::Null` both mark
/// an absent value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RowData {
    pub entity: String,
    pub field_values: Vec<FieldValue>,
}

impl RowData {
    pub fn new(entity: &str, field_values: Vec<FieldValue>) -> Self {
        RowData {
            entity: entity.to_string(),
            field_values,
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.field_values
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(field))
    }

    pub fn get_value(&self, field: &str) -> Value {
        self.get(field)
            .and_then(|f| f.value.clone())
            .unwrap_or(Value::Null)
    }
}

impl Record for RowData {
    fn entity(&self) -> &str {
        &self.entity
    }

    fn field_specs(&self) -> Vec<FieldSpec> {
        self.field_values
            .iter()
            .map(|f| FieldSpec::nullable(&f.name, f.data_type))
            .collect()
    }

    fn field(&self, name: &str) -> Result<FieldValue, RecordError> {
        let field = self
            .get(name)
            .ok_or_else(|| RecordError::UnknownField(name.to_string()))?;

        Ok(FieldValue {
            name: field.name.clone(),
            value: field.present().cloned(),
            data_type: field.data_type,
        })
    }

    fn set_field(&mut self, name: &str, value: Option<Value>) -> Result<(), RecordError> {
        if let Some(field) = self
            .field_values
            .iter_mut()
            .find(|f| f.name.eq_ignore_ascii_case(name))
        {
            field.value = value;
            return Ok(());
        }

        // Unknown columns are appended when the value carries its own type.
        let data_type = value
            .as_ref()
            .and_then(|v| v.data_type())
            .ok_or_else(|| RecordError::UnknownField(name.to_string()))?;
        self.field_values
            .push(FieldValue::new(name, value, data_type));
        Ok(())
    }
}
