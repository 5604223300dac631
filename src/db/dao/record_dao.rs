use std::time::Duration;

use sea_orm::DatabaseConnection;

use super::{DaoBase, DaoResult};
use crate::db::{
    catalog::EntityKind,
    grid::{Cell, Grid, GridRow},
    statements,
};

/// Descriptor-driven list/insert/delete shared by every dashboard tab.
#[derive(Clone)]
pub struct RecordDao {
    db: DatabaseConnection,
    timeout: Duration,
}

impl DaoBase for RecordDao {
    fn from_parts(db: DatabaseConnection, timeout: Duration) -> Self {
        Self { db, timeout }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl RecordDao {
    pub async fn list(&self, kind: EntityKind) -> DaoResult<Grid> {
        let entity = kind.descriptor();
        let stmt = statements::select_all(self.backend(), entity)?;
        let rows = self.fetch_all(&format!("list {kind}"), stmt).await?;

        let mut grid = Grid::new(entity.labels());
        for row in &rows {
            grid.push(GridRow::decode(row, entity.columns)?);
        }
        Ok(grid)
    }

    /// Returns the number of affected rows as reported by the store.
    pub async fn insert(&self, kind: EntityKind, values: Vec<String>) -> DaoResult<u64> {
        let stmt = statements::insert(self.backend(), kind.descriptor(), values)?;
        let result = self.exec(&format!("add {kind}"), stmt).await?;
        Ok(result.rows_affected())
    }

    pub async fn delete(&self, kind: EntityKind, key: &Cell) -> DaoResult<u64> {
        let stmt = statements::delete_by_key(self.backend(), kind.descriptor(), key.to_value())?;
        let result = self.exec(&format!("delete {kind}"), stmt).await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeMap, time::Duration};

    use sea_orm::{
        DatabaseBackend, DbErr, MockDatabase, MockExecResult, RuntimeErr, Transaction, Value,
        prelude::Decimal,
    };

    use super::RecordDao;
    use crate::db::{
        catalog::{CatalogError, EntityKind},
        dao::{DaoBase, DaoLayerError},
        grid::Cell,
    };

    fn fine_row(id: i64, amount: Decimal) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([
            ("fine_id", Value::from(id)),
            ("issue_id", Value::from(3i64)),
            ("amount", Value::from(amount)),
            ("status", Value::from("Unpaid".to_string())),
        ])
    }

    #[tokio::test]
    async fn list_decodes_rows_in_column_order() {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_results([[fine_row(1, Decimal::new(1250, 2))]])
            .into_connection();
        let dao = RecordDao::new(&db, Duration::from_secs(1));

        let grid = dao.list(EntityKind::Fine).await.expect("list should succeed");

        assert_eq!(grid.columns, ["Fine ID", "Issue ID", "Amount", "Status"]);
        assert_eq!(grid.len(), 1);
        assert_eq!(
            grid.rows[0].cells(),
            [
                Cell::Int(1),
                Cell::Int(3),
                Cell::Decimal(Decimal::new(1250, 2)),
                Cell::text("Unpaid"),
            ]
        );
    }

    #[tokio::test]
    async fn list_keeps_nulls_as_empty_cells() {
        let row = BTreeMap::from([
            ("publisher_id", Value::from(4i64)),
            ("name", Value::from("Orbit".to_string())),
            ("address", Value::String(None)),
        ]);
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_results([[row]])
            .into_connection();
        let dao = RecordDao::new(&db, Duration::from_secs(1));

        let grid = dao
            .list(EntityKind::Publisher)
            .await
            .expect("list should succeed");
        assert_eq!(grid.rows[0].cells()[2], Cell::Null);
    }

    #[tokio::test]
    async fn list_widens_narrow_integer_keys() {
        let row = BTreeMap::from([
            ("publisher_id", Value::Int(Some(7))),
            ("name", Value::from("Orbit".to_string())),
            ("address", Value::from("London".to_string())),
        ]);
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_results([[row]])
            .into_connection();
        let dao = RecordDao::new(&db, Duration::from_secs(1));

        let grid = dao
            .list(EntityKind::Publisher)
            .await
            .expect("list should succeed");
        assert_eq!(grid.rows[0].first(), Some(&Cell::Int(7)));
    }

    #[tokio::test]
    async fn list_shows_free_text_dates_as_entered() {
        let row = BTreeMap::from([
            ("issue_id", Value::from(11i64)),
            ("book_id", Value::from(2i64)),
            ("member_id", Value::from(5i64)),
            ("librarian_id", Value::from(1i64)),
            ("issue_date", Value::from("12/03/2025".to_string())),
            ("return_date", Value::String(None)),
        ]);
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_results([[row]])
            .into_connection();
        let dao = RecordDao::new(&db, Duration::from_secs(1));

        let grid = dao.list(EntityKind::Issue).await.expect("list should succeed");
        assert_eq!(
            grid.rows[0].cells(),
            [
                Cell::Int(11),
                Cell::Int(2),
                Cell::Int(5),
                Cell::Int(1),
                Cell::text("12/03/2025"),
                Cell::Null,
            ]
        );
    }

    #[tokio::test]
    async fn insert_reports_affected_rows() {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_exec_results([MockExecResult {
                last_insert_id: 7,
                rows_affected: 1,
            }])
            .into_connection();
        let dao = RecordDao::new(&db, Duration::from_secs(1));

        let affected = dao
            .insert(
                EntityKind::Librarian,
                vec!["Rosa".into(), "rosa@example.com".into(), "555-0100".into()],
            )
            .await
            .expect("insert should succeed");
        assert_eq!(affected, 1);

        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DatabaseBackend::MySql,
                "INSERT INTO `Librarian` (`name`, `email`, `phone`) VALUES (?, ?, ?)",
                [
                    Value::from("Rosa".to_string()),
                    Value::from("rosa@example.com".to_string()),
                    Value::from("555-0100".to_string()),
                ],
            )]
        );
    }

    #[tokio::test]
    async fn insert_surfaces_store_rejections() {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_exec_errors([DbErr::Exec(RuntimeErr::Internal(
                "Incorrect integer value: 'abc' for column 'publisher_id'".to_string(),
            ))])
            .into_connection();
        let dao = RecordDao::new(&db, Duration::from_secs(1));

        let err = dao
            .insert(
                EntityKind::Book,
                vec![
                    "Dune".into(),
                    "Herbert".into(),
                    "abc".into(),
                    "1965".into(),
                    "2".into(),
                ],
            )
            .await
            .expect_err("store should reject the value");
        assert!(matches!(err, DaoLayerError::Db(DbErr::Exec(_))));
    }

    #[tokio::test]
    async fn delete_refuses_entities_without_a_delete_path() {
        let db = MockDatabase::new(DatabaseBackend::MySql).into_connection();
        let dao = RecordDao::new(&db, Duration::from_secs(1));

        let err = dao
            .delete(EntityKind::Fine, &Cell::Int(1))
            .await
            .expect_err("fine rows cannot be deleted");
        assert!(matches!(
            err,
            DaoLayerError::Catalog(CatalogError::NotDeletable(EntityKind::Fine))
        ));
        assert!(db.into_transaction_log().is_empty());
    }
}
