//! Statement builders for the descriptor-driven CRUD and the fixed reports.

use sea_orm::{
    DatabaseBackend, Statement, Value,
    sea_query::{Alias, Expr, ExprTrait, Query},
};

use super::catalog::{CatalogError, EntityDescriptor, InsertStrategy};

pub const MCGRAW_HILL: &str = "McGraw Hill";

pub fn select_all(
    backend: DatabaseBackend,
    entity: &EntityDescriptor,
) -> Result<Statement, CatalogError> {
    entity.check_identifiers()?;
    let mut query = Query::select();
    for column in entity.columns {
        query.column(Alias::new(column.name));
    }
    query.from(Alias::new(entity.table));
    Ok(backend.build(&query))
}

/// Insert of raw form text, either directly or through the entity's procedure.
/// `values` line up with [`EntityDescriptor::input_columns`].
pub fn insert(
    backend: DatabaseBackend,
    entity: &EntityDescriptor,
    values: Vec<String>,
) -> Result<Statement, CatalogError> {
    entity.check_identifiers()?;
    let expected = entity.input_columns().count();
    let got = values.len();
    let field_count = CatalogError::FieldCount {
        entity: entity.kind,
        expected,
        got,
    };
    if got != expected {
        return Err(field_count);
    }
    let values: Vec<Value> = values.into_iter().map(Value::from).collect();

    match entity.insert {
        InsertStrategy::Direct => {
            let mut query = Query::insert();
            query
                .into_table(Alias::new(entity.table))
                .columns(entity.input_columns().map(|column| Alias::new(column.name)));
            query
                .values(values.into_iter().map(Expr::val))
                .map_err(|_| field_count)?;
            Ok(backend.build(&query))
        }
        InsertStrategy::Procedure(procedure) => Ok(call(backend, procedure, values)),
    }
}

pub fn delete_by_key(
    backend: DatabaseBackend,
    entity: &EntityDescriptor,
    key: Value,
) -> Result<Statement, CatalogError> {
    let (table, key_column) = entity.delete_target()?;
    entity.check_identifiers()?;
    let mut query = Query::delete();
    query
        .from_table(Alias::new(table))
        .and_where(Expr::col(Alias::new(key_column)).eq(key));
    Ok(backend.build(&query))
}

fn call(backend: DatabaseBackend, procedure: &str, values: Vec<Value>) -> Statement {
    let sql = format!(
        "CALL {procedure}({})",
        placeholders(backend, values.len()).join(", ")
    );
    Statement::from_sql_and_values(backend, sql, values)
}

fn placeholders(backend: DatabaseBackend, count: usize) -> Vec<String> {
    (1..=count)
        .map(|index| match backend {
            DatabaseBackend::Postgres => format!("${index}"),
            _ => "?".to_string(),
        })
        .collect()
}

pub fn library_metrics(backend: DatabaseBackend) -> Statement {
    Statement::from_string(
        backend,
        "SELECT GetAvailableBooks() AS available_books, GetMemberCount() AS member_count",
    )
}

pub fn books_per_publisher(backend: DatabaseBackend) -> Statement {
    Statement::from_string(
        backend,
        "SELECT p.name AS publisher, COUNT(b.book_id) AS book_count \
         FROM Publishers p LEFT JOIN Books b ON p.publisher_id = b.publisher_id \
         GROUP BY p.name",
    )
}

pub fn issued_books(backend: DatabaseBackend) -> Statement {
    Statement::from_string(
        backend,
        "SELECT m.name AS member, b.title AS title, i.issue_date AS issue_date \
         FROM Members m JOIN Issue i ON m.member_id = i.member_id \
         JOIN Books b ON i.book_id = b.book_id",
    )
}

pub fn titles_by_publisher(backend: DatabaseBackend, publisher: &str) -> Statement {
    let placeholder = placeholders(backend, 1).remove(0);
    let sql = format!(
        "SELECT title FROM Books WHERE publisher_id IN \
         (SELECT publisher_id FROM Publishers WHERE name = {placeholder})"
    );
    Statement::from_sql_and_values(backend, sql, [Value::from(publisher.to_string())])
}
