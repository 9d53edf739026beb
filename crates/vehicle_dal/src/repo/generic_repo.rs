//! Generic SQLite repository engine shared by every entity.
//!
//! # Responsibility
//! - Run the paged pipeline: filter, count, sort, page, materialize, map.
//! - Resolve `find_first` / `exists` predicates through the cheapest tier.
//! - Translate domain models to rows on write and join the pending
//!   transaction of the owning unit of work.
//!
//! # Invariants
//! - Writes validate the model before any SQL runs.
//! - Every page is ordered deterministically (identity is the last key).
//! - `total_count` is taken over the filtered scope before paging.

use super::scope::QueryScope;
use super::{RepoError, RepoResult};
use crate::db::DbSession;
use crate::model::{DomainModel, ModelValidationError};
use crate::query::{
    normalize_field_name, resolve, FieldShortcut, FilterOptions, PagedResult, PagingError,
    Predicate, QueryOptions, Resolution, ResolutionTier, SortOptions,
};
use log::{debug, info};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, OptionalExtension, Row};
use std::marker::PhantomData;
use std::rc::Rc;
use std::time::Instant;

/// Uniform CRUD and query contract offered for every entity.
pub trait Repository {
    type Model;

    /// Every row matching the filter, as one unbounded page.
    fn get_all(&self, options: &QueryOptions) -> RepoResult<Vec<Self::Model>>;
    fn get_paged(&self, options: &QueryOptions) -> RepoResult<PagedResult<Self::Model>>;
    fn get_by_id(&self, id: i64) -> RepoResult<Option<Self::Model>>;
    /// Lowest-identity row satisfying `predicate`.
    fn find_first(&self, predicate: &Predicate<Self::Model>) -> RepoResult<Option<Self::Model>>;
    fn exists(&self, predicate: &Predicate<Self::Model>) -> RepoResult<bool>;
    /// Inserts and returns the stored row with its assigned identity.
    fn add(&self, model: &Self::Model) -> RepoResult<Self::Model>;
    /// Replaces every writable column of an existing row.
    fn update(&self, model: &Self::Model) -> RepoResult<Self::Model>;
    /// Returns `false` when no row had this identity.
    fn delete(&self, id: i64) -> RepoResult<bool>;
}

/// Storage description of one entity.
///
/// Implementors are zero-sized markers; all knowledge lives in associated
/// items so [`SqliteRepository`] can stay generic.
pub trait EntitySchema {
    /// Storage-row shape.
    type Entity: for<'m> From<&'m Self::Model>;
    /// Caller-facing shape.
    type Model: DomainModel + From<Self::Entity>;

    /// Entity name used in errors and log events.
    const LABEL: &'static str;
    const TABLE: &'static str;
    /// Full `SELECT ... FROM <table>` without `WHERE`/`ORDER BY`.
    const SELECT_SQL: &'static str;
    /// Columns written on insert/update, in [`EntitySchema::write_values`] order.
    const WRITE_COLUMNS: &'static [&'static str];
    /// `(normalized field, column)` pairs covered by text search.
    const SEARCH_COLUMNS: &'static [(&'static str, &'static str)];
    /// `(normalized sort key, SQL expression)` pairs.
    const SORT_COLUMNS: &'static [(&'static str, &'static str)];
    /// Fields `find_first` / `exists` can answer with a native filter.
    const FIELD_SHORTCUTS: &'static [FieldShortcut];

    fn parse_row(row: &Row<'_>) -> RepoResult<Self::Entity>;
    fn write_values(entity: &Self::Entity) -> Vec<Value>;

    /// Entity-specific filtering; defaults to text search only.
    fn apply_filtering(filtering: &FilterOptions, scope: &mut QueryScope) -> RepoResult<()> {
        scope.search_filtering(filtering, Self::SEARCH_COLUMNS);
        Ok(())
    }
}

/// SQLite repository for one entity schema, sharing the unit-of-work session.
pub struct SqliteRepository<S: EntitySchema> {
    session: Rc<DbSession>,
    schema: PhantomData<S>,
}

impl<S: EntitySchema> SqliteRepository<S> {
    pub fn new(session: Rc<DbSession>) -> Self {
        Self {
            session,
            schema: PhantomData,
        }
    }

    /// Tier `find_first` / `exists` would use for `predicate`.
    pub fn explain(&self, predicate: &Predicate<S::Model>) -> ResolutionTier {
        resolve(predicate, S::FIELD_SHORTCUTS).tier()
    }

    /// `find_first` forced through the in-memory scan tier.
    pub fn find_first_scanning(
        &self,
        predicate: &Predicate<S::Model>,
    ) -> RepoResult<Option<S::Model>> {
        Ok(self
            .scan_all()?
            .into_iter()
            .find(|model| predicate.matches(model)))
    }

    /// `exists` forced through the in-memory scan tier.
    pub fn exists_scanning(&self, predicate: &Predicate<S::Model>) -> RepoResult<bool> {
        Ok(self.scan_all()?.iter().any(|model| predicate.matches(model)))
    }

    /// Paged pipeline over `scope` narrowed further by the caller's options.
    pub(crate) fn query_page(
        &self,
        mut scope: QueryScope,
        options: &QueryOptions,
    ) -> RepoResult<PagedResult<S::Model>> {
        let started_at = Instant::now();
        let paging = options.effective_paging();
        if paging.page_size < 1 {
            return Err(PagingError::PageSize(paging.page_size).into());
        }
        if paging.page_number < 1 {
            return Err(PagingError::PageNumber(paging.page_number).into());
        }

        if let Some(filtering) = &options.filtering {
            S::apply_filtering(filtering, &mut scope)?;
        }
        let where_sql = scope.where_sql();
        let order_sql = order_clause::<S>(options.sorting.as_ref());

        let page = self.session.read(|conn| -> RepoResult<PagedResult<S::Model>> {
            let total_count: i64 = conn.query_row(
                &format!("SELECT COUNT(*) FROM {}{where_sql};", S::TABLE),
                params_from_iter(scope.binds().iter()),
                |row| row.get(0),
            )?;

            let mut binds = scope.binds().to_vec();
            binds.push(Value::Integer(paging.page_size));
            binds.push(Value::Integer(paging.offset()));
            let sql = format!(
                "{}{where_sql} ORDER BY {order_sql} LIMIT ? OFFSET ?;",
                S::SELECT_SQL
            );
            let data = load_models::<S>(conn, &sql, &binds)?;
            Ok(PagedResult::new(
                data,
                total_count,
                paging.page_number,
                paging.page_size,
            )?)
        })?;

        debug!(
            "event=repo_query module=repo status=ok entity={} total={} returned={} page={} duration_ms={}",
            S::LABEL,
            page.total_count(),
            page.data().len(),
            page.current_page(),
            started_at.elapsed().as_millis()
        );
        Ok(page)
    }

    fn scan_all(&self) -> RepoResult<Vec<S::Model>> {
        let sql = format!("{} ORDER BY {}.id ASC;", S::SELECT_SQL, S::TABLE);
        self.session.read(|conn| load_models::<S>(conn, &sql, &[]))
    }

    fn first_in_scope(&self, scope: &QueryScope) -> RepoResult<Option<S::Model>> {
        let sql = format!(
            "{}{} ORDER BY {}.id ASC LIMIT 1;",
            S::SELECT_SQL,
            scope.where_sql(),
            S::TABLE
        );
        let models = self
            .session
            .read(|conn| load_models::<S>(conn, &sql, scope.binds()))?;
        Ok(models.into_iter().next())
    }

    fn any_in_scope(&self, scope: &QueryScope) -> RepoResult<bool> {
        let sql = format!(
            "SELECT EXISTS (SELECT 1 FROM {}{});",
            S::TABLE,
            scope.where_sql()
        );
        self.session.read(|conn| -> RepoResult<bool> {
            let found: i64 =
                conn.query_row(&sql, params_from_iter(scope.binds().iter()), |row| row.get(0))?;
            Ok(found != 0)
        })
    }

    fn id_scope(id: i64) -> QueryScope {
        let mut scope = QueryScope::new();
        scope.eq_int(&format!("{}.id", S::TABLE), id);
        scope
    }

    fn log_resolution(&self, operation: &str, resolution: &Resolution<'_>) {
        let tier = resolution.tier();
        if tier == ResolutionTier::FullScan {
            info!(
                "event=predicate_resolve module=repo entity={} op={operation} tier={}",
                S::LABEL,
                tier.as_str()
            );
        } else {
            debug!(
                "event=predicate_resolve module=repo entity={} op={operation} tier={}",
                S::LABEL,
                tier.as_str()
            );
        }
    }

    fn not_found(id: i64) -> RepoError {
        RepoError::NotFound {
            entity: S::LABEL,
            id,
        }
    }
}

impl<S: EntitySchema> Repository for SqliteRepository<S> {
    type Model = S::Model;

    fn get_all(&self, options: &QueryOptions) -> RepoResult<Vec<S::Model>> {
        let options = options.clone().normalized_for_all();
        Ok(self.query_page(QueryScope::new(), &options)?.into_data())
    }

    fn get_paged(&self, options: &QueryOptions) -> RepoResult<PagedResult<S::Model>> {
        self.query_page(QueryScope::new(), options)
    }

    fn get_by_id(&self, id: i64) -> RepoResult<Option<S::Model>> {
        let sql = format!("{} WHERE {}.id = ?1;", S::SELECT_SQL, S::TABLE);
        self.session.read(|conn| -> RepoResult<Option<S::Model>> {
            let entity = conn
                .query_row(&sql, [id], |row| Ok(S::parse_row(row)))
                .optional()?
                .transpose()?;
            Ok(entity.map(S::Model::from))
        })
    }

    fn find_first(&self, predicate: &Predicate<S::Model>) -> RepoResult<Option<S::Model>> {
        let resolution = resolve(predicate, S::FIELD_SHORTCUTS);
        self.log_resolution("find_first", &resolution);
        match resolution {
            Resolution::Identity(id) => self.get_by_id(id),
            Resolution::Native(conditions) => {
                self.first_in_scope(&QueryScope::from_conditions(&conditions))
            }
            Resolution::Scan => self.find_first_scanning(predicate),
        }
    }

    fn exists(&self, predicate: &Predicate<S::Model>) -> RepoResult<bool> {
        let resolution = resolve(predicate, S::FIELD_SHORTCUTS);
        self.log_resolution("exists", &resolution);
        match resolution {
            Resolution::Identity(id) => self.any_in_scope(&Self::id_scope(id)),
            Resolution::Native(conditions) => {
                self.any_in_scope(&QueryScope::from_conditions(&conditions))
            }
            Resolution::Scan => self.exists_scanning(predicate),
        }
    }

    fn add(&self, model: &S::Model) -> RepoResult<S::Model> {
        model.validate()?;
        let entity = S::Entity::from(model);
        let values = S::write_values(&entity);
        let placeholders = vec!["?"; S::WRITE_COLUMNS.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({placeholders});",
            S::TABLE,
            S::WRITE_COLUMNS.join(", ")
        );

        let mut inserted_id = 0;
        self.session.write(|conn| -> RepoResult<usize> {
            let changed = conn.execute(&sql, params_from_iter(values.iter()))?;
            inserted_id = conn.last_insert_rowid();
            Ok(changed)
        })?;

        self.get_by_id(inserted_id)?.ok_or_else(|| {
            RepoError::InvalidData(format!(
                "{} {inserted_id} missing right after insert",
                S::LABEL
            ))
        })
    }

    fn update(&self, model: &S::Model) -> RepoResult<S::Model> {
        let id = model.id();
        if id <= 0 {
            return Err(ModelValidationError::NonPositive("id").into());
        }
        model.validate()?;

        let entity = S::Entity::from(model);
        let mut values = S::write_values(&entity);
        values.push(Value::Integer(id));
        let assignments = S::WRITE_COLUMNS
            .iter()
            .map(|column| format!("{column} = ?"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {table} SET {assignments} WHERE {table}.id = ?;",
            table = S::TABLE
        );

        let changed = self.session.write(|conn| -> RepoResult<usize> {
            Ok(conn.execute(&sql, params_from_iter(values.iter()))?)
        })?;
        if changed == 0 {
            return Err(Self::not_found(id));
        }

        self.get_by_id(id)?.ok_or_else(|| Self::not_found(id))
    }

    fn delete(&self, id: i64) -> RepoResult<bool> {
        let sql = format!("DELETE FROM {table} WHERE {table}.id = ?1;", table = S::TABLE);
        let changed = self.session.write(|conn| -> RepoResult<usize> {
            Ok(conn.execute(&sql, [id])?)
        })?;
        Ok(changed > 0)
    }
}

/// `ORDER BY` body: the schema column for a known key, identity otherwise,
/// with identity ascending as the final tie-break.
fn order_clause<S: EntitySchema>(sorting: Option<&SortOptions>) -> String {
    let id_column = format!("{}.id", S::TABLE);
    let Some(sorting) = sorting.filter(|sorting| !sorting.sort_by.trim().is_empty()) else {
        return format!("{id_column} ASC");
    };

    let direction = if sorting.sort_ascending { "ASC" } else { "DESC" };
    let key = normalize_field_name(&sorting.sort_by);
    match S::SORT_COLUMNS.iter().find(|(name, _)| *name == key) {
        Some((_, expression)) => format!("{expression} {direction}, {id_column} ASC"),
        None => format!("{id_column} {direction}"),
    }
}

fn load_models<S: EntitySchema>(
    conn: &Connection,
    sql: &str,
    binds: &[Value],
) -> RepoResult<Vec<S::Model>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params_from_iter(binds.iter()))?;
    let mut models = Vec::new();
    while let Some(row) = rows.next()? {
        models.push(S::Model::from(S::parse_row(row)?));
    }
    Ok(models)
}
