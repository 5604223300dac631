use crate::{
    auth::{Action, Session},
    db::{
        dao::{IssuedBook, PublisherBookCount, ReportDao},
        grid::{Cell, Grid},
        statements::MCGRAW_HILL,
    },
    error::AppError,
};

pub const AGGREGATE_HEADER: &str = "---- Aggregate: Books per Publisher ----";
pub const JOIN_HEADER: &str = "---- Join: Member & Book Issued ----";
pub const NESTED_HEADER: &str = "---- Nested: Books by McGraw Hill ----";

#[derive(Clone)]
pub struct ReportService {
    reports: ReportDao,
}

impl ReportService {
    pub fn new(reports: ReportDao) -> Self {
        Self { reports }
    }

    pub async fn functions(&self, session: &Session) -> Result<Grid, AppError> {
        session.require(Action::View)?;
        let metrics = self.reports.library_metrics().await?;
        tracing::info!(username = %session.username, "ran functions report");

        let mut grid = Grid::new(["Metric", "Value"]);
        grid.push([Cell::text("Total Available Books"), metrics.available_books]);
        grid.push([Cell::text("Total Members"), metrics.member_count]);
        Ok(grid)
    }

    pub async fn queries(&self, session: &Session) -> Result<Grid, AppError> {
        session.require(Action::View)?;
        let counts = self.reports.books_per_publisher().await?;
        let issued = self.reports.issued_books().await?;
        let titles = self.reports.titles_by_publisher(MCGRAW_HILL).await?;
        tracing::info!(username = %session.username, "ran queries report");

        Ok(compose_queries(&counts, &issued, &titles))
    }
}

/// Stacks the three query results into one three-column grid, separated by blank rows.
pub fn compose_queries(
    counts: &[PublisherBookCount],
    issued: &[IssuedBook],
    titles: &[String],
) -> Grid {
    let mut grid = Grid::new(["Col1", "Col2", "Col3"]);

    grid.push([Cell::text(AGGREGATE_HEADER), Cell::empty(), Cell::empty()]);
    for count in counts {
        grid.push([
            Cell::text(count.publisher.as_str()),
            Cell::text(format!("{} Books", count.book_count)),
            Cell::empty(),
        ]);
    }

    grid.push([Cell::empty(), Cell::empty(), Cell::empty()]);
    grid.push([Cell::text(JOIN_HEADER), Cell::empty(), Cell::empty()]);
    for book in issued {
        grid.push([
            Cell::text(book.member.as_str()),
            Cell::text(book.title.as_str()),
            book.issue_date.map_or(Cell::Null, Cell::Date),
        ]);
    }

    grid.push([Cell::empty(), Cell::empty(), Cell::empty()]);
    grid.push([Cell::text(NESTED_HEADER), Cell::empty(), Cell::empty()]);
    for title in titles {
        grid.push([Cell::text(title.as_str()), Cell::empty(), Cell::empty()]);
    }

    grid
}
