use crate::{error::SqlSourceError, sql::executor::SqlExecutor};
use async_trait::async_trait;
use model::records::{
    record::{FieldSpec, Record, RecordError},
    row::RowData,
};
use planner::source::{RowSource, SeekQuery};
use tracing::debug;

pub type RowMapper<R> = fn(RowData) -> Result<R, RecordError>;

/// Row source that renders seek queries to SQL and runs them through a
/// [`SqlExecutor`].
pub struct SqlSource<E, R = RowData> {
    executor: E,
    map_row: RowMapper<R>,
}

impl<E: SqlExecutor> SqlSource<E, RowData> {
    /// Returns rows as they come back from the executor.
    pub fn new(executor: E) -> Self {
        SqlSource {
            executor,
            map_row: Ok,
        }
    }
}

impl<E: SqlExecutor, R: Record + Default> SqlSource<E, R> {
    /// Hydrates each row into `R` through its declared fields.
    pub fn typed(executor: E) -> Self {
        SqlSource {
            executor,
            map_row: hydrate::<R>,
        }
    }
}

impl<E, R> SqlSource<E, R> {
    pub fn executor(&self) -> &E {
        &self.executor
    }
}

/// Builds a record from a result row by its declared fields.
///
/// SQL `NULL` and missing columns are written as `None`.
pub fn hydrate<R: Record + Default>(row: RowData) -> Result<R, RecordError> {
    let mut record = R::default();
    for spec in record.field_specs() {
        let value = row.get(&spec.name).and_then(|f| f.present().cloned());
        record.set_field(&spec.name, value)?;
    }
    Ok(record)
}

#[async_trait]
impl<E, R> RowSource for SqlSource<E, R>
where
    E: SqlExecutor,
    R: Record + Send + 'static,
{
    type Record = R;
    type Error = SqlSourceError<E::Error>;

    async fn fields(&self, entity: &str) -> Result<Vec<FieldSpec>, Self::Error> {
        self.executor
            .describe(entity)
            .await
            .map_err(SqlSourceError::Executor)
    }

    async fn fetch(&self, query: SeekQuery) -> Result<Vec<R>, Self::Error> {
        let (sql, params) = query.render(self.executor.dialect());
        debug!(
            dialect = %self.executor.dialect().name(),
            %sql,
            params = params.len(),
            "Running seek query"
        );

        let rows = self
            .executor
            .query(&sql, params)
            .await
            .map_err(SqlSourceError::Executor)?;

        rows.into_iter()
            .map(|row| (self.map_row)(row).map_err(SqlSourceError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{SqlSource, hydrate};
    use crate::{error::SqlSourceError, sql::executor::SqlExecutor};
    use async_trait::async_trait;
    use lazy_static::lazy_static;
    use model::{
        core::{
            data_type::DataType,
            value::{FieldValue, Value},
        },
        impl_record,
        pagination::codec::FieldCodec,
        records::{
            record::{FieldSpec, RecordError},
            row::RowData,
            table::{FieldTable, expect_value, optional_value},
        },
    };
    use planner::{
        error::PaginationError,
        paginator::{PageRequest, Paginator},
        query::dialect::{Dialect, MySql, Postgres},
    };
    use std::sync::Mutex;
    use thiserror::Error;
    use tracing_test::traced_test;

    #[derive(Debug, Error)]
    #[error("server closed the connection")]
    struct Disconnected;

    struct RecordingExecutor<D> {
        dialect: D,
        rows: Vec<RowData>,
        fail: bool,
        calls: Mutex<Vec<(String, Vec<Value>)>>,
    }

    impl<D: Dialect> RecordingExecutor<D> {
        fn new(dialect: D, rows: Vec<RowData>) -> Self {
            RecordingExecutor {
                dialect,
                rows,
                fail: false,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl<D: Dialect> SqlExecutor for RecordingExecutor<D> {
        type Error = Disconnected;

        fn dialect(&self) -> &dyn Dialect {
            &self.dialect
        }

        async fn describe(&self, _table: &str) -> Result<Vec<FieldSpec>, Disconnected> {
            Ok(vec![
                FieldSpec::required("id", DataType::Int),
                FieldSpec::nullable("email", DataType::String),
            ])
        }

        async fn query(&self, sql: &str, params: Vec<Value>) -> Result<Vec<RowData>, Disconnected> {
            self.calls.lock().unwrap().push((sql.to_string(), params));
            if self.fail {
                return Err(Disconnected);
            }
            Ok(self.rows.clone())
        }
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    struct User {
        id: i64,
        email: Option<String>,
    }

    lazy_static! {
        static ref USER_FIELDS: FieldTable<User> = FieldTable::new("users")
            .field(
                "id",
                DataType::Int,
                |u: &User| Ok(Some(Value::Int(u.id))),
                |u: &mut User, v| {
                    u.id = expect_value("id", v)?;
                    Ok(())
                },
            )
            .nullable(
                "email",
                DataType::String,
                |u: &User| Ok(u.email.clone().map(Value::String)),
                |u: &mut User, v| {
                    u.email = optional_value("email", v)?;
                    Ok(())
                },
            );
    }

    impl_record!(User, USER_FIELDS);

    fn row(id: i64, email: Option<&str>) -> RowData {
        RowData::new(
            "users",
            vec![
                FieldValue::new("id", Some(Value::Int(id)), DataType::Int),
                FieldValue::new(
                    "email",
                    Some(email.map(|e| Value::String(e.into())).unwrap_or(Value::Null)),
                    DataType::String,
                ),
            ],
        )
    }

    #[traced_test]
    #[tokio::test]
    async fn test_renders_postgres_and_hydrates() {
        let executor = RecordingExecutor::new(Postgres, vec![row(9, Some("a@x")), row(8, None)]);
        let source: SqlSource<_, User> = SqlSource::typed(executor);

        let after = FieldCodec::default().encode_values(&[Value::Int(10)]).unwrap();
        let page = Paginator::default()
            .paginate(&source, &PageRequest::new("users").keys(["ID"]).limit(5).after(after))
            .await
            .unwrap();

        assert_eq!(
            page.rows,
            vec![
                User {
                    id: 9,
                    email: Some("a@x".into())
                },
                User { id: 8, email: None },
            ]
        );
        assert!(!page.has_more);

        let calls = source.executor().calls.lock().unwrap();
        assert_eq!(
            calls[0],
            (
                r#"SELECT * FROM "users" WHERE ("id" < $1) ORDER BY "id" DESC LIMIT $2"#.to_string(),
                vec![Value::Int(10), Value::Uint(6)]
            )
        );
        assert!(logs_contain("Running seek query"));
    }

    #[tokio::test]
    async fn test_mysql_raw_rows() {
        let executor = RecordingExecutor::new(MySql, vec![row(1, None)]);
        let source = SqlSource::new(executor);

        let page = Paginator::default()
            .paginate(&source, &PageRequest::new("users").limit(1))
            .await
            .unwrap();

        assert_eq!(page.rows, vec![row(1, None)]);
        let calls = source.executor().calls.lock().unwrap();
        assert_eq!(calls[0].0, "SELECT * FROM `users` ORDER BY `id` DESC LIMIT ?");
    }

    #[tokio::test]
    async fn test_executor_error_surfaces_once() {
        let mut executor = RecordingExecutor::new(Postgres, vec![]);
        executor.fail = true;
        let source = SqlSource::new(executor);

        let err = Paginator::default()
            .paginate(&source, &PageRequest::new("users"))
            .await
            .unwrap_err();

        let PaginationError::Source(inner) = err else {
            panic!("expected a storage error");
        };
        assert!(matches!(
            inner.downcast_ref::<SqlSourceError<Disconnected>>(),
            Some(SqlSourceError::Executor(Disconnected))
        ));
        assert_eq!(source.executor().calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_hydrate_rejects_null_required_field() {
        let row = RowData::new(
            "users",
            vec![FieldValue::new("id", Some(Value::Null), DataType::Int)],
        );
        assert_eq!(
            hydrate::<User>(row),
            Err(RecordError::NotNullable("id".to_string()))
        );
    }
}
