/// Implements `Record` for a type by delegating to a static `FieldTable`.
///
/// ```ignore
/// lazy_static! {
///     static ref POST_FIELDS: FieldTable<Post> = FieldTable::new("posts").field(...);
/// }
/// impl_record!(Post, POST_FIELDS);
/// ```
#[macro_export]
macro_rules! impl_record {
    ($ty:ty, $table:expr) => {
        impl $crate::records::record::Record for $ty {
            fn entity(&self) -> &str {
                $table.entity()
            }

            fn field_specs(&self) -> Vec<$crate::records::record::FieldSpec> {
                $table.specs()
            }

            fn field(
                &self,
                name: &str,
            ) -> Result<$crate::core::value::FieldValue, $crate::records::record::RecordError>
            {
                $table.read(self, name)
            }

            fn set_field(
                &mut self,
                name: &str,
                value: Option<$crate::core::value::Value>,
            ) -> Result<(), $crate::records::record::RecordError> {
                $table.write(self, name, value)
            }
        }
    };
}
