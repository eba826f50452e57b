use crate::{
    error::PaginationError,
    keyset::{Keyset, SeekDirection},
    query::ident,
    settings::PaginatorSettings,
    source::{RowSource, SeekQuery},
    table_ref,
};
use model::{
    core::value::Value,
    pagination::{
        codec::FieldCodec,
        cursor::Cursor,
        error::CodecError,
        order::SortOrder,
        page::{Page, PageCursors},
        token::Token,
    },
    records::record::{FieldSpec, Record, find_spec},
};
use std::collections::HashSet;
use tracing::debug;

/// A request for one page of an entity.
///
/// Unset keys, limit and order are filled from [`PaginatorSettings`] when the
/// request is planned.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub entity: String,
    pub keys: Vec<String>,
    pub limit: usize,
    pub order: Option<SortOrder>,
    pub cursor: Cursor,
}

impl PageRequest {
    pub fn new(entity: &str) -> Self {
        PageRequest {
            entity: entity.to_string(),
            keys: Vec::new(),
            limit: 0,
            order: None,
            cursor: Cursor::None,
        }
    }

    pub fn keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    pub fn after(mut self, token: Token) -> Self {
        self.cursor = Cursor::After(token);
        self
    }

    /// Sets a `before` cursor unless an `after` cursor is already set.
    pub fn before(mut self, token: Token) -> Self {
        if !self.cursor.is_after() {
            self.cursor = Cursor::Before(token);
        }
        self
    }

    pub fn cursor(mut self, cursor: Cursor) -> Self {
        self.cursor = cursor;
        self
    }
}

/// A validated request: the query to run and what is needed to turn its
/// rows into a page.
#[derive(Debug, Clone)]
pub struct PagePlan {
    pub keys: Vec<String>,
    pub limit: usize,
    pub order: SortOrder,
    pub direction: Option<SeekDirection>,
    pub query: SeekQuery,
    codec: FieldCodec,
}

impl PagePlan {
    /// Trims the over-fetched row, restores the requested order and
    /// computes the outgoing cursors.
    pub fn finish<R: Record>(&self, mut rows: Vec<R>) -> Result<Page<R>, PaginationError> {
        let has_more = rows.len() > self.limit;
        rows.truncate(self.limit);

        let after_active = self.direction == Some(SeekDirection::After);
        let before_active = self.direction == Some(SeekDirection::Before);

        if before_active {
            rows.reverse();
        }

        let (first, last) = match (rows.first(), rows.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Ok(Page::empty()),
        };

        let mut cursors = PageCursors::default();
        if before_active || has_more {
            cursors.after = Some(self.codec.encode(last, &self.keys)?);
        }
        if after_active || (has_more && before_active) {
            cursors.before = Some(self.codec.encode(first, &self.keys)?);
        }

        Ok(Page {
            rows,
            cursors,
            has_more,
        })
    }
}

/// Plans keyset queries and assembles pages from their results.
#[derive(Debug, Clone, Default)]
pub struct Paginator {
    settings: PaginatorSettings,
    codec: FieldCodec,
}

impl Paginator {
    pub fn new(settings: PaginatorSettings) -> Self {
        let codec = FieldCodec::new(settings.decode_mode);
        Paginator { settings, codec }
    }

    pub fn settings(&self) -> &PaginatorSettings {
        &self.settings
    }

    pub fn codec(&self) -> FieldCodec {
        self.codec
    }

    /// Resolves defaults, validates the keys against `fields` and decodes
    /// the cursor into a bounded query.
    pub fn plan(
        &self,
        request: &PageRequest,
        fields: &[FieldSpec],
    ) -> Result<PagePlan, PaginationError> {
        let requested = if request.keys.is_empty() {
            vec![self.settings.default_key.clone()]
        } else {
            request.keys.clone()
        };

        let mut seen = HashSet::new();
        let specs = requested
            .iter()
            .map(|key| {
                if !seen.insert(key.to_ascii_lowercase()) {
                    return Err(PaginationError::DuplicateKey(key.clone()));
                }
                find_spec(fields, key).ok_or_else(|| PaginationError::UnknownKey {
                    entity: request.entity.clone(),
                    key: key.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let limit = self.settings.effective_limit(request.limit);
        let order = request.order.unwrap_or(self.settings.default_order);
        let direction = SeekDirection::of(&request.cursor);

        let boundary = match request.cursor.token() {
            Some(token) => self.boundary(token, &specs)?,
            None => Vec::new(),
        };

        let keyset = Keyset {
            columns: specs.iter().map(|spec| ident(&spec.name)).collect(),
            order,
            direction,
            boundary,
        };

        // One extra row tells whether another page follows.
        let query = keyset.seek_query(table_ref!(request.entity), limit.saturating_add(1));

        debug!(
            entity = %request.entity,
            keys = ?specs.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            limit,
            %order,
            ?direction,
            "Planned keyset query"
        );

        Ok(PagePlan {
            keys: specs.iter().map(|spec| spec.name.clone()).collect(),
            limit,
            order,
            direction,
            query,
            codec: self.codec,
        })
    }

    /// Fetches one page from `source`.
    ///
    /// Storage errors are returned unmodified inside
    /// [`PaginationError::Source`] and are not retried.
    pub async fn paginate<S: RowSource>(
        &self,
        source: &S,
        request: &PageRequest,
    ) -> Result<Page<S::Record>, PaginationError> {
        let fields = source
            .fields(&request.entity)
            .await
            .map_err(PaginationError::source_error)?;

        let plan = self.plan(request, &fields)?;
        let rows = source
            .fetch(plan.query.clone())
            .await
            .map_err(PaginationError::source_error)?;

        debug!(entity = %request.entity, fetched = rows.len(), "Fetched keyset rows");
        plan.finish(rows)
    }

    fn boundary(&self, token: &Token, specs: &[&FieldSpec]) -> Result<Vec<Value>, PaginationError> {
        let values = self.codec.decode(token)?;
        if values.len() != specs.len() {
            return Err(PaginationError::TokenArity {
                expected: specs.len(),
                found: values.len(),
            });
        }

        specs
            .iter()
            .zip(values)
            .map(|(spec, value)| {
                value.coerce(spec.data_type).ok_or_else(|| {
                    PaginationError::Codec(CodecError::InvalidToken(format!(
                        "value for '{}' is not a valid {}",
                        spec.name, spec.data_type
                    )))
                })
            })
            .collect()
    }
}
