use std::collections::HashMap;

use crate::{
    auth::{Action, Session},
    db::{
        catalog::{CatalogError, EntityKind},
        dao::RecordDao,
        grid::{Cell, Grid, GridRow},
    },
    error::AppError,
};

const NO_SELECTION: &str = "Select a row to delete.";
const NO_KEY: &str = "The selected row has no key value and cannot be deleted.";

/// List, add and delete for every catalog entity, gated by the session's role.
#[derive(Clone)]
pub struct DashboardService {
    records: RecordDao,
}

impl DashboardService {
    pub fn new(records: RecordDao) -> Self {
        Self { records }
    }

    pub async fn list(&self, session: &Session, kind: EntityKind) -> Result<Grid, AppError> {
        session.require(Action::View)?;
        let grid = self.records.list(kind).await?;
        tracing::debug!(entity = %kind, rows = grid.len(), "listed records");
        Ok(grid)
    }

    /// Inserts one record from form text keyed by column name or label, then relists.
    pub async fn add(
        &self,
        session: &Session,
        kind: EntityKind,
        form: &HashMap<String, String>,
    ) -> Result<Grid, AppError> {
        session.require(Action::Add)?;
        let values = form_values(kind, form).map_err(|err| AppError::bad_request(err.to_string()))?;

        let affected = self.records.insert(kind, values).await?;
        tracing::info!(
            username = %session.username,
            entity = %kind,
            affected,
            "record added"
        );
        self.list(session, kind).await
    }

    /// Deletes the record whose key is the first cell of `selected`, then relists.
    pub async fn delete(
        &self,
        session: &Session,
        kind: EntityKind,
        selected: Option<&GridRow>,
    ) -> Result<Grid, AppError> {
        session.require(Action::Delete)?;
        kind.descriptor().delete_target().map_err(|err| match err {
            CatalogError::NotDeletable(_) => {
                AppError::bad_request(format!("{kind} records cannot be deleted."))
            }
            other => {
                tracing::error!(entity = %kind, error = %other, "delete target rejected");
                AppError::internal(other.to_string())
            }
        })?;
        let key = selected
            .and_then(GridRow::first)
            .ok_or_else(|| AppError::bad_request(NO_SELECTION))?;
        if *key == Cell::Null {
            return Err(AppError::bad_request(NO_KEY));
        }

        let affected = self.records.delete(kind, key).await?;
        if affected == 0 {
            tracing::warn!(entity = %kind, key = %key, "delete matched no rows");
        } else {
            tracing::info!(
                username = %session.username,
                entity = %kind,
                key = %key,
                "record deleted"
            );
        }
        self.list(session, kind).await
    }
}

/// Lines the form up with the entity's input columns. Missing fields become empty text.
pub fn form_values(
    kind: EntityKind,
    form: &HashMap<String, String>,
) -> Result<Vec<String>, CatalogError> {
    let entity = kind.descriptor();
    let mut values: Vec<Option<String>> = entity.input_columns().map(|_| None).collect();

    for (field, value) in form {
        let field_name = field.trim();
        let position = entity
            .input_columns()
            .position(|column| {
                column.name.eq_ignore_ascii_case(field_name)
                    || column.label.eq_ignore_ascii_case(field_name)
            })
            .ok_or_else(|| CatalogError::UnknownField {
                entity: kind,
                field: field.clone(),
            })?;
        values[position] = Some(value.clone());
    }

    Ok(values.into_iter().map(Option::unwrap_or_default).collect())
}
