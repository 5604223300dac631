use std::time::Duration;

use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, FromQueryResult};

use super::{DaoBase, DaoResult};
use crate::db::{grid::Cell, statements};

#[derive(Debug, Clone, PartialEq)]
pub struct LibraryMetrics {
    pub available_books: Cell,
    pub member_count: Cell,
}

#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct PublisherBookCount {
    pub publisher: String,
    pub book_count: i64,
}

#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct IssuedBook {
    pub member: String,
    pub title: String,
    pub issue_date: Option<NaiveDate>,
}

#[derive(Debug, FromQueryResult)]
struct BookTitle {
    title: String,
}

/// Read-only queries behind the two report views.
#[derive(Clone)]
pub struct ReportDao {
    db: DatabaseConnection,
    timeout: Duration,
}

impl DaoBase for ReportDao {
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

impl ReportDao {
    /// Calls the store's `GetAvailableBooks` and `GetMemberCount` functions.
    pub async fn library_metrics(&self) -> DaoResult<LibraryMetrics> {
        let stmt = statements::library_metrics(self.backend());
        let Some(row) = self.fetch_one("library metrics", stmt).await? else {
            return Ok(LibraryMetrics {
                available_books: Cell::Null,
                member_count: Cell::Null,
            });
        };
        Ok(LibraryMetrics {
            available_books: Cell::decode_any(&row, "available_books")?,
            member_count: Cell::decode_any(&row, "member_count")?,
        })
    }

    pub async fn books_per_publisher(&self) -> DaoResult<Vec<PublisherBookCount>> {
        let stmt = statements::books_per_publisher(self.backend());
        self.bounded(
            "books per publisher",
            PublisherBookCount::find_by_statement(stmt).all(self.db()),
        )
        .await
    }

    pub async fn issued_books(&self) -> DaoResult<Vec<IssuedBook>> {
        let stmt = statements::issued_books(self.backend());
        self.bounded(
            "issued books",
            IssuedBook::find_by_statement(stmt).all(self.db()),
        )
        .await
    }

    pub async fn titles_by_publisher(&self, publisher: &str) -> DaoResult<Vec<String>> {
        let stmt = statements::titles_by_publisher(self.backend(), publisher);
        let titles = self
            .bounded(
                "titles by publisher",
                BookTitle::find_by_statement(stmt).all(self.db()),
            )
            .await?;
        Ok(titles.into_iter().map(|book| book.title).collect())
    }
}
