//! Accumulated `WHERE` clauses plus their positional bind values.

use super::RepoError;
use super::RepoResult;
use crate::query::{normalize_field_name, FieldKind, FieldValue, FilterOptions, NativeCondition};
use rusqlite::types::Value;

/// Filter scope of one query. Clauses are joined with `AND`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryScope {
    clauses: Vec<String>,
    binds: Vec<Value>,
}

impl QueryScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope restricted by native predicate conditions.
    pub fn from_conditions(conditions: &[NativeCondition<'_>]) -> Self {
        let mut scope = Self::new();
        for condition in conditions {
            match (condition.kind, condition.value) {
                (FieldKind::Int, FieldValue::Int(value)) => scope.eq_int(condition.column, *value),
                (FieldKind::Text, FieldValue::Text(value)) => {
                    scope.eq_text_ignore_case(condition.column, value)
                }
                // resolve() only emits conditions whose value kind fits the column.
                _ => scope.push("0", Vec::new()),
            }
        }
        scope
    }

    /// Adds a raw clause; `?` placeholders are bound in order.
    pub fn push(&mut self, clause: impl Into<String>, binds: impl IntoIterator<Item = Value>) {
        self.clauses.push(clause.into());
        self.binds.extend(binds);
    }

    pub fn eq_int(&mut self, column: &str, value: i64) {
        self.push(format!("{column} = ?"), [Value::Integer(value)]);
    }

    /// ASCII case-insensitive equality, consistent with in-memory matching.
    pub fn eq_text_ignore_case(&mut self, column: &str, value: &str) {
        self.push(
            format!("lower({column}) = lower(?)"),
            [Value::Text(value.to_string())],
        );
    }

    /// Case-insensitive substring search.
    ///
    /// `columns` pairs a normalized field name with its SQL column. A
    /// `field` naming one of them restricts the search to that column; any
    /// other value searches all of them. Blank text adds nothing.
    pub fn search(&mut self, text: Option<&str>, field: Option<&str>, columns: &[(&str, &str)]) {
        let Some(text) = text.map(str::trim).filter(|text| !text.is_empty()) else {
            return;
        };
        if columns.is_empty() {
            return;
        }

        let wanted = field.map(normalize_field_name);
        let selected: Vec<&str> = match wanted
            .as_deref()
            .and_then(|wanted| columns.iter().find(|(name, _)| *name == wanted))
        {
            Some((_, column)) => vec![*column],
            None => columns.iter().map(|(_, column)| *column).collect(),
        };

        let clause = selected
            .iter()
            .map(|column| format!("instr(lower({column}), lower(?)) > 0"))
            .collect::<Vec<_>>()
            .join(" OR ");
        let binds = selected.iter().map(|_| Value::Text(text.to_string()));
        self.push(format!("({clause})"), binds.collect::<Vec<_>>());
    }

    /// Applies the standard text search of `filtering`.
    pub fn search_filtering(&mut self, filtering: &FilterOptions, columns: &[(&str, &str)]) {
        self.search(
            filtering.search_text.as_deref(),
            filtering.search_field.as_deref(),
            columns,
        );
    }

    /// Equality on an integer column from a named `filters` entry.
    ///
    /// Keys are matched after normalization (`ownerId` and `owner_id` are the
    /// same key). A value that is not an integer is an invalid query.
    pub fn named_int_filter(
        &mut self,
        filtering: &FilterOptions,
        key: &str,
        column: &str,
    ) -> RepoResult<()> {
        let Some(raw) = named_filter(filtering, key) else {
            return Ok(());
        };
        let value = raw.trim().parse::<i64>().map_err(|_| {
            RepoError::InvalidQuery(format!("filter `{key}` expects an integer, got `{raw}`"))
        })?;
        self.eq_int(column, value);
        Ok(())
    }

    /// Case-insensitive equality on a text column from a named `filters`
    /// entry. Blank values are ignored.
    pub fn named_text_filter(&mut self, filtering: &FilterOptions, key: &str, column: &str) {
        if let Some(raw) = named_filter(filtering, key).filter(|raw| !raw.trim().is_empty()) {
            self.eq_text_ignore_case(column, raw.trim());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn binds(&self) -> &[Value] {
        &self.binds
    }

    /// ` WHERE a AND b`, or an empty string for an unrestricted scope.
    pub fn where_sql(&self) -> String {
        if self.clauses.is_empty() {
            return String::new();
        }
        format!(" WHERE {}", self.clauses.join(" AND "))
    }
}

fn named_filter<'f>(filtering: &'f FilterOptions, key: &str) -> Option<&'f str> {
    filtering
        .filters
        .iter()
        .find(|(name, _)| normalize_field_name(name) == key)
        .map(|(_, value)| value.as_str())
}

#[cfg(test)]
mod tests {
    use super::QueryScope;
    use crate::query::FilterOptions;
    use crate::repo::RepoError;
    use rusqlite::types::Value;

    const COLUMNS: &[(&str, &str)] = &[("name", "makes.name"), ("abrv", "makes.abrv")];

    #[test]
    fn empty_scope_has_no_where_clause() {
        assert_eq!(QueryScope::new().where_sql(), "");
    }

    #[test]
    fn search_covers_all_columns_by_default() {
        let mut scope = QueryScope::new();
        scope.search(Some(" bm "), None, COLUMNS);
        assert_eq!(
            scope.where_sql(),
            " WHERE (instr(lower(makes.name), lower(?)) > 0 OR instr(lower(makes.abrv), lower(?)) > 0)"
        );
        assert_eq!(
            scope.binds(),
            &[Value::Text("bm".to_string()), Value::Text("bm".to_string())]
        );
    }

    #[test]
    fn known_search_field_restricts_columns() {
        let mut scope = QueryScope::new();
        scope.search(Some("bm"), Some("Abrv"), COLUMNS);
        assert_eq!(
            scope.where_sql(),
            " WHERE (instr(lower(makes.abrv), lower(?)) > 0)"
        );
    }

    #[test]
    fn unknown_search_field_searches_everything() {
        let mut scope = QueryScope::new();
        scope.search(Some("bm"), Some("colour"), COLUMNS);
        assert_eq!(scope.binds().len(), 2);
    }

    #[test]
    fn blank_search_adds_nothing() {
        let mut scope = QueryScope::new();
        scope.search(Some("   "), None, COLUMNS);
        scope.search(None, None, COLUMNS);
        assert!(scope.is_empty());
    }

    #[test]
    fn named_int_filter_matches_normalized_key() {
        let mut filtering = FilterOptions::default();
        filtering.filters.insert("Owner_Id".to_string(), "12".to_string());

        let mut scope = QueryScope::new();
        scope
            .named_int_filter(&filtering, "ownerid", "registrations.owner_id")
            .unwrap();
        assert_eq!(scope.where_sql(), " WHERE registrations.owner_id = ?");
        assert_eq!(scope.binds(), &[Value::Integer(12)]);
    }

    #[test]
    fn unparsable_named_int_filter_is_rejected() {
        let mut filtering = FilterOptions::default();
        filtering.filters.insert("ownerId".to_string(), "abc".to_string());

        let err = QueryScope::new()
            .named_int_filter(&filtering, "ownerid", "registrations.owner_id")
            .unwrap_err();
        assert!(matches!(err, RepoError::InvalidQuery(_)));
    }
}
