//! Listing query description
//!
//! A `ListingQuery` is a lazy description of one listing request: which
//! table, which columns, which predicates and which ordering. It renders
//! itself either as bound SQL (through `sqlx::QueryBuilder`) or as a
//! deterministic text signature used to key cached counts.

use std::fmt::{self, Write as _};

use serde::Serialize;
use sqlx::{Postgres, QueryBuilder};

/// Literal compared against a column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SqlValue {
    Int(i64),
    Text(String),
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Int(value) => write!(f, "{}", value),
            SqlValue::Text(value) => write!(f, "'{}'", value.replace('\'', "''")),
        }
    }
}

/// Filtering predicate over a single table
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Eq { column: String, value: SqlValue },
    In { column: String, values: Vec<i64> },
    Contains {
        column: String,
        term: String,
        case_sensitive: bool,
    },
    /// Satisfied when any inner predicate is. Empty matches nothing.
    Any(Vec<Predicate>),
}

impl Predicate {
    pub fn eq(column: impl Into<String>, value: SqlValue) -> Self {
        Predicate::Eq {
            column: column.into(),
            value,
        }
    }

    pub fn any_of(column: impl Into<String>, values: Vec<i64>) -> Self {
        Predicate::In {
            column: column.into(),
            values,
        }
    }

    pub fn icontains(column: impl Into<String>, term: impl Into<String>) -> Self {
        Predicate::Contains {
            column: column.into(),
            term: term.into(),
            case_sensitive: false,
        }
    }

    pub fn contains(column: impl Into<String>, term: impl Into<String>) -> Self {
        Predicate::Contains {
            column: column.into(),
            term: term.into(),
            case_sensitive: true,
        }
    }

    fn push_sql(&self, qb: &mut QueryBuilder<'static, Postgres>) {
        match self {
            Predicate::Eq { column, value } => {
                qb.push(quote_ident(column)).push(" = ");
                match value {
                    SqlValue::Int(v) => qb.push_bind(*v),
                    SqlValue::Text(v) => qb.push_bind(v.clone()),
                };
            }
            Predicate::In { column, values } => {
                qb.push(quote_ident(column))
                    .push(" = ANY(")
                    .push_bind(values.clone())
                    .push(")");
            }
            Predicate::Contains {
                column,
                term,
                case_sensitive,
            } => {
                qb.push(quote_ident(column))
                    .push("::text ")
                    .push(like_operator(*case_sensitive))
                    .push(" ")
                    .push_bind(like_pattern(term));
            }
            Predicate::Any(inner) => {
                if inner.is_empty() {
                    qb.push("FALSE");
                    return;
                }
                qb.push("(");
                for (i, predicate) in inner.iter().enumerate() {
                    if i > 0 {
                        qb.push(" OR ");
                    }
                    predicate.push_sql(qb);
                }
                qb.push(")");
            }
        }
    }

    fn render(&self, out: &mut String) {
        match self {
            Predicate::Eq { column, value } => {
                let _ = write!(out, "{} = {}", quote_ident(column), value);
            }
            Predicate::In { column, values } => {
                let list: Vec<String> = values.iter().map(i64::to_string).collect();
                let _ = write!(out, "{} = ANY('{{{}}}')", quote_ident(column), list.join(","));
            }
            Predicate::Contains {
                column,
                term,
                case_sensitive,
            } => {
                let _ = write!(
                    out,
                    "{}::text {} {}",
                    quote_ident(column),
                    like_operator(*case_sensitive),
                    SqlValue::Text(like_pattern(term))
                );
            }
            Predicate::Any(inner) => {
                if inner.is_empty() {
                    out.push_str("FALSE");
                    return;
                }
                out.push('(');
                for (i, predicate) in inner.iter().enumerate() {
                    if i > 0 {
                        out.push_str(" OR ");
                    }
                    predicate.render(out);
                }
                out.push(')');
            }
        }
    }
}

/// One ORDER BY term
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderBy {
    pub column: String,
    pub descending: bool,
}

impl OrderBy {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: false,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: true,
        }
    }

    /// Parse `field` or `-field`
    pub fn parse(spec: &str) -> Self {
        match spec.strip_prefix('-') {
            Some(column) => Self::desc(column),
            None => Self::asc(spec),
        }
    }

    fn sql(&self) -> String {
        format!(
            "{} {}",
            quote_ident(&self.column),
            if self.descending { "DESC" } else { "ASC" }
        )
    }
}

/// Description of a listing request against a single table
#[derive(Debug, Clone, PartialEq)]
pub struct ListingQuery {
    table: String,
    columns: Vec<String>,
    predicates: Vec<Predicate>,
    ordering: Vec<OrderBy>,
}

impl ListingQuery {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            predicates: Vec::new(),
            ordering: Vec::new(),
        }
    }

    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// AND another predicate onto the query
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn order_by(mut self, ordering: Vec<OrderBy>) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn ordering(&self) -> &[OrderBy] {
        &self.ordering
    }

    pub fn has_predicate(&self) -> bool {
        !self.predicates.is_empty()
    }

    /// Deterministic text form of the query, parameters inlined
    pub fn signature(&self) -> String {
        let mut out = format!("SELECT {} FROM {}", self.select_list(), quote_ident(&self.table));
        if self.has_predicate() {
            out.push_str(" WHERE ");
            for (i, predicate) in self.predicates.iter().enumerate() {
                if i > 0 {
                    out.push_str(" AND ");
                }
                predicate.render(&mut out);
            }
        }
        if !self.ordering.is_empty() {
            out.push_str(" ORDER BY ");
            out.push_str(&self.order_clause());
        }
        out
    }

    /// `SELECT COUNT(*)` over the same rows
    pub fn count_sql(&self) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", quote_ident(&self.table)));
        self.push_where(&mut qb);
        qb
    }

    /// One page of rows, each row as a JSON object
    pub fn page_sql(&self, offset: u64, limit: u64) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(format!(
            "SELECT row_to_json(t) FROM (SELECT {} FROM {}",
            self.select_list(),
            quote_ident(&self.table)
        ));
        self.push_where(&mut qb);
        if !self.ordering.is_empty() {
            qb.push(" ORDER BY ").push(self.order_clause());
        }
        qb.push(" LIMIT ")
            .push_bind(to_i64(limit))
            .push(" OFFSET ")
            .push_bind(to_i64(offset))
            .push(") t");
        qb
    }

    fn push_where(&self, qb: &mut QueryBuilder<'static, Postgres>) {
        if !self.has_predicate() {
            return;
        }
        qb.push(" WHERE ");
        for (i, predicate) in self.predicates.iter().enumerate() {
            if i > 0 {
                qb.push(" AND ");
            }
            predicate.push_sql(qb);
        }
    }

    fn select_list(&self) -> String {
        if self.columns.is_empty() {
            return "*".to_string();
        }
        self.columns
            .iter()
            .map(|c| quote_ident(c))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn order_clause(&self) -> String {
        self.ordering
            .iter()
            .map(OrderBy::sql)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ListingQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.signature())
    }
}

/// Quote an identifier for Postgres
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// `%term%` with LIKE wildcards in the term escaped
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn like_operator(case_sensitive: bool) -> &'static str {
    if case_sensitive { "LIKE" } else { "ILIKE" }
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
