//! Field accessor tables for statically typed records.
//!
//! A `FieldTable` maps declared field names to getter/setter function
//! pointers. Build one per record type, keep it in a `lazy_static`, and
//! implement [`Record`](crate::records::record::Record) on top of it with
//! [`impl_record!`](crate::impl_record).

use crate::{
    core::{
        data_type::DataType,
        value::{FieldValue, Value},
    },
    records::record::{FieldSpec, RecordError},
};

pub type Getter<R> = fn(&R) -> Result<Option<Value>, RecordError>;
pub type Setter<R> = fn(&mut R, Option<Value>) -> Result<(), RecordError>;

pub struct FieldAccessor<R> {
    pub spec: FieldSpec,
    get: Getter<R>,
    set: Setter<R>,
}

pub struct FieldTable<R> {
    entity: &'static str,
    fields: Vec<FieldAccessor<R>>,
}

impl<R> FieldTable<R> {
    pub fn new(entity: &'static str) -> Self {
        FieldTable {
            entity,
            fields: Vec::new(),
        }
    }

    /// Registers a field that always holds a value.
    pub fn field(self, name: &str, data_type: DataType, get: Getter<R>, set: Setter<R>) -> Self {
        self.push(FieldSpec::required(name, data_type), get, set)
    }

    /// Registers an optional field; the getter returns `Ok(None)` when absent.
    pub fn nullable(
        self,
        name: &str,
        data_type: DataType,
        get: Getter<R>,
        set: Setter<R>,
    ) -> Self {
        self.push(FieldSpec::nullable(name, data_type), get, set)
    }

    fn push(mut self, spec: FieldSpec, get: Getter<R>, set: Setter<R>) -> Self {
        self.fields.push(FieldAccessor { spec, get, set });
        self
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }

    pub fn specs(&self) -> Vec<FieldSpec> {
        self.fields.iter().map(|f| f.spec.clone()).collect()
    }

    pub fn accessor(&self, name: &str) -> Option<&FieldAccessor<R>> {
        self.fields.iter().find(|f| f.spec.matches(name))
    }

    pub fn read(&self, record: &R, name: &str) -> Result<FieldValue, RecordError> {
        let accessor = self
            .accessor(name)
            .ok_or_else(|| RecordError::UnknownField(name.to_string()))?;
        let value = (accessor.get)(record)?;

        Ok(FieldValue::new(
            &accessor.spec.name,
            value,
            accessor.spec.data_type,
        ))
    }

    pub fn write(&self, record: &mut R, name: &str, value: Option<Value>) -> Result<(), RecordError> {
        let accessor = self
            .accessor(name)
            .ok_or_else(|| RecordError::UnknownField(name.to_string()))?;

        if value.is_none() && !accessor.spec.nullable {
            return Err(RecordError::NotNullable(accessor.spec.name.clone()));
        }

        (accessor.set)(record, value)
    }
}

/// Converts a decoded value into a field's Rust type inside a setter.
pub fn expect_value<T>(field: &str, value: Option<Value>) -> Result<T, RecordError>
where
    T: TryFrom<Value, Error = crate::core::value::ValueTypeError>,
{
    let value = value.ok_or_else(|| RecordError::NotNullable(field.to_string()))?;
    T::try_from(value).map_err(|source| RecordError::Value {
        field: field.to_string(),
        source,
    })
}

/// Like [`expect_value`] for optional fields.
pub fn optional_value<T>(field: &str, value: Option<Value>) -> Result<Option<T>, RecordError>
where
    T: TryFrom<Value, Error = crate::core::value::ValueTypeError>,
{
    value.map(|v| expect_value(field, Some(v))).transpose()
}

#[cfg(test)]
mod tests {
    use super::{FieldTable, expect_value, optional_value};
    use crate::{
        core::{data_type::DataType, value::Value},
        records::record::{Record, RecordError},
    };
    use lazy_static::lazy_static;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Account {
        id: u64,
        nickname: Option<String>,
    }

    lazy_static! {
        static ref ACCOUNT_FIELDS: FieldTable<Account> = FieldTable::new("accounts")
            .field(
                "ID",
                DataType::IntUnsigned,
                |a: &Account| Ok(Some(Value::Uint(a.id))),
                |a: &mut Account, v| {
                    a.id = expect_value("ID", v)?;
                    Ok(())
                },
            )
            .nullable(
                "Nickname",
                DataType::String,
                |a: &Account| Ok(a.nickname.clone().map(Value::String)),
                |a: &mut Account, v| {
                    a.nickname = optional_value("Nickname", v)?;
                    Ok(())
                },
            );
    }

    crate::impl_record!(Account, ACCOUNT_FIELDS);

    #[test]
    fn test_table_reads_fields_by_name() {
        let account = Account {
            id: 3,
            nickname: None,
        };

        assert_eq!(account.entity(), "accounts");
        assert_eq!(account.field("id").unwrap().value, Some(Value::Uint(3)));
        assert_eq!(account.field("nickname").unwrap().value, None);
        assert_eq!(
            account.field("missing"),
            Err(RecordError::UnknownField("missing".to_string()))
        );
    }

    #[test]
    fn test_table_writes_fields_by_name() {
        let mut account = Account::default();
        account.set_field("ID", Some(Value::Uint(11))).unwrap();
        account
            .set_field("Nickname", Some(Value::String("neo".into())))
            .unwrap();

        assert_eq!(
            account,
            Account {
                id: 11,
                nickname: Some("neo".into()),
            }
        );
    }

    #[test]
    fn test_table_rejects_none_for_required_field() {
        let mut account = Account::default();
        assert_eq!(
            account.set_field("ID", None),
            Err(RecordError::NotNullable("ID".to_string()))
        );
    }

    #[test]
    fn test_table_rejects_wrong_kind() {
        let mut account = Account::default();
        let err = account
            .set_field("ID", Some(Value::String("x".into())))
            .unwrap_err();
        assert!(matches!(err, RecordError::Value { .. }));
    }
}
