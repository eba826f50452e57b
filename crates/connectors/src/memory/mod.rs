//! In-memory row source.
//!
//! Evaluates seek queries directly against records held in a `Vec`. Useful
//! for tests and for paging over data that is already loaded.

use crate::error::MemorySourceError;
use async_trait::async_trait;
use eval::{RecordEvaluator, compare_keys};
use model::{
    core::value::Value,
    pagination::order::SortOrder,
    records::record::{FieldSpec, Record},
};
use planner::{
    query::ast::select::OrderByExpr,
    source::{RowSource, SeekQuery},
};
use std::cmp::Ordering;
use tracing::debug;

mod eval;

#[derive(Debug, Clone)]
pub struct MemorySource<R> {
    entity: String,
    fields: Vec<FieldSpec>,
    records: Vec<R>,
}

impl<R: Record> MemorySource<R> {
    pub fn new(entity: &str, fields: Vec<FieldSpec>) -> Self {
        MemorySource {
            entity: entity.to_string(),
            fields,
            records: Vec::new(),
        }
    }

    pub fn with_records(mut self, records: Vec<R>) -> Self {
        self.records = records;
        self
    }

    pub fn push(&mut self, record: R) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn check_entity(&self, entity: &str) -> Result<(), MemorySourceError> {
        if self.entity.eq_ignore_ascii_case(entity) {
            Ok(())
        } else {
            Err(MemorySourceError::UnknownEntity(entity.to_string()))
        }
    }

    fn sort_keys(&self, record: &R, order_by: &[OrderByExpr]) -> Result<Vec<Value>, MemorySourceError> {
        let eval = RecordEvaluator::new(record);
        order_by.iter().map(|o| eval.evaluate(&o.expr)).collect()
    }
}

fn compare_rows(left: &[Value], right: &[Value], order_by: &[OrderByExpr]) -> Ordering {
    left.iter()
        .zip(right)
        .zip(order_by)
        .map(|((l, r), o)| match o.direction {
            Some(SortOrder::Desc) => compare_keys(l, r).reverse(),
            _ => compare_keys(l, r),
        })
        .find(|ordering| *ordering != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

#[async_trait]
impl<R> RowSource for MemorySource<R>
where
    R: Record + Clone + Send + Sync,
{
    type Record = R;
    type Error = MemorySourceError;

    async fn fields(&self, entity: &str) -> Result<Vec<FieldSpec>, MemorySourceError> {
        self.check_entity(entity)?;
        Ok(self.fields.clone())
    }

    async fn fetch(&self, query: SeekQuery) -> Result<Vec<R>, MemorySourceError> {
        self.check_entity(&query.table.name)?;

        let mut matched = Vec::new();
        for record in &self.records {
            let keep = match &query.predicate {
                Some(predicate) => RecordEvaluator::new(record).matches(predicate)?,
                None => true,
            };
            if keep {
                matched.push((self.sort_keys(record, &query.order_by)?, record));
            }
        }

        matched.sort_by(|(l, _), (r, _)| compare_rows(l, r, &query.order_by));

        debug!(
            entity = %self.entity,
            matched = matched.len(),
            limit = query.limit,
            "Evaluated seek query in memory"
        );

        Ok(matched
            .into_iter()
            .take(query.limit)
            .map(|(_, record)| record.clone())
            .collect())
    }
}
