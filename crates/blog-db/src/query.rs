//! SQL translation of the `ListQuery` spec
//!
//! API field names are mapped to columns through a per-table whitelist, and
//! every value is bound, never interpolated.

use blog_core::error::DomainError;
use blog_core::query::{Filter, FilterOp, FilterValue, ListQuery, Page, Sort, SortDirection};
use blog_core::traits::RepoResult;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::{FromRow, Postgres, QueryBuilder};

use crate::repositories::map_db_error;

/// Field name -> column whitelist for one table
#[derive(Debug, Clone, Copy)]
pub struct Columns(&'static [(&'static str, &'static str)]);

impl Columns {
    pub const fn new(map: &'static [(&'static str, &'static str)]) -> Self {
        Self(map)
    }

    /// Column for an API field name
    pub fn resolve(&self, field: &str) -> RepoResult<&'static str> {
        self.0
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, column)| *column)
            .ok_or_else(|| DomainError::InvalidQueryField(field.to_string()))
    }
}

/// Escape `LIKE` wildcards so a search term matches literally
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn push_value(qb: &mut QueryBuilder<'_, Postgres>, value: &FilterValue) {
    match value {
        FilterValue::Text(v) => qb.push_bind(v.clone()),
        FilterValue::Id(v) => qb.push_bind(*v),
        FilterValue::Bool(v) => qb.push_bind(*v),
        FilterValue::Time(v) => qb.push_bind(*v),
    };
}

/// Append a boolean SQL expression for `filter`
pub fn push_filter(
    qb: &mut QueryBuilder<'_, Postgres>,
    filter: &Filter,
    columns: &Columns,
) -> RepoResult<()> {
    match filter {
        Filter::Condition { field, op, value } => {
            let column = columns.resolve(field)?;
            match op {
                FilterOp::Eq => {
                    qb.push(column).push(" = ");
                    push_value(qb, value);
                }
                FilterOp::ContainsInsensitive => {
                    let FilterValue::Text(term) = value else {
                        return Err(DomainError::ValidationError(format!(
                            "substring match on {field} needs a text value"
                        )));
                    };
                    qb.push(column)
                        .push(" ILIKE ")
                        .push_bind(format!("%{}%", escape_like(term)));
                }
            }
        }
        Filter::And(filters) | Filter::Or(filters) => {
            let (separator, empty) = match filter {
                Filter::And(_) => (" AND ", "TRUE"),
                _ => (" OR ", "FALSE"),
            };
            if filters.is_empty() {
                qb.push(empty);
                return Ok(());
            }
            qb.push("(");
            for (i, inner) in filters.iter().enumerate() {
                if i > 0 {
                    qb.push(separator);
                }
                push_filter(qb, inner, columns)?;
            }
            qb.push(")");
        }
    }
    Ok(())
}

fn push_where(
    qb: &mut QueryBuilder<'_, Postgres>,
    filter: Option<&Filter>,
    columns: &Columns,
) -> RepoResult<()> {
    if let Some(filter) = filter {
        qb.push(" WHERE ");
        push_filter(qb, filter, columns)?;
    }
    Ok(())
}

fn push_order(qb: &mut QueryBuilder<'_, Postgres>, sort: &Sort, columns: &Columns) -> RepoResult<()> {
    let column = columns.resolve(sort.field)?;
    let direction = match sort.direction {
        SortDirection::Asc => "ASC",
        SortDirection::Desc => "DESC",
    };
    qb.push(format_args!(" ORDER BY {column} {direction}, id {direction}"));
    Ok(())
}

/// Run a count and a page query for `query` against `table`
pub async fn fetch_page<M, E>(
    pool: &PgPool,
    table: &str,
    select: &str,
    query: &ListQuery,
    columns: &Columns,
) -> RepoResult<Page<E>>
where
    M: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    E: From<M>,
{
    let mut count = QueryBuilder::<Postgres>::new(format!("SELECT COUNT(*) FROM {table}"));
    push_where(&mut count, query.filter.as_ref(), columns)?;
    let total: i64 = count
        .build_query_scalar::<i64>()
        .fetch_one(pool)
        .await
        .map_err(map_db_error)?;

    let mut rows = QueryBuilder::<Postgres>::new(format!("SELECT {select} FROM {table}"));
    push_where(&mut rows, query.filter.as_ref(), columns)?;
    push_order(&mut rows, &query.sort, columns)?;
    rows.push(" LIMIT ")
        .push_bind(i64::from(query.page.page_size()))
        .push(" OFFSET ")
        .push_bind(query.page.offset() as i64);

    let items: Vec<M> = rows
        .build_query_as::<M>()
        .fetch_all(pool)
        .await
        .map_err(map_db_error)?;

    Ok(Page::new(
        items.into_iter().map(E::from).collect(),
        total.max(0) as u64,
        query.page,
    ))
}
