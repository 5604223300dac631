use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::{DbErr, QueryResult, TryGetable, Value, prelude::Decimal};
use serde::{Serialize, Serializer};

use super::catalog::{ColumnKind, ColumnSpec};
use super::dao::{DaoLayerError, DaoResult};

/// A single displayed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Int(i64),
    Text(String),
    Date(NaiveDate),
    Decimal(Decimal),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn empty() -> Self {
        Cell::Text(String::new())
    }

    /// The bound parameter used when this cell identifies a row.
    pub fn to_value(&self) -> Value {
        match self {
            Cell::Null => Value::String(None),
            Cell::Int(value) => Value::from(*value),
            Cell::Text(value) => Value::from(value.clone()),
            Cell::Date(value) => Value::from(*value),
            Cell::Decimal(value) => Value::from(*value),
        }
    }

    /// Decodes `column` as `kind`, falling back to the other shapes a store
    /// may hand back for it (narrower integers, decimals, free text).
    pub fn decode(row: &QueryResult, column: &str, kind: ColumnKind) -> DaoResult<Self> {
        let readers = match kind {
            ColumnKind::Integer => INTEGER_READERS,
            ColumnKind::Text => TEXT_READERS,
            ColumnKind::Date => DATE_READERS,
            ColumnKind::Decimal => DECIMAL_READERS,
        };
        Cell::decode_with(row, column, readers)
    }

    /// Decodes a value whose type the store decides, such as a function result.
    pub fn decode_any(row: &QueryResult, column: &str) -> DaoResult<Self> {
        Cell::decode_with(row, column, ANY_READERS)
    }

    /// First reader that yields a value wins. A null from any reader means the
    /// cell is empty; only when every reader fails is the row undecodable.
    fn decode_with(row: &QueryResult, column: &str, readers: &[Reader]) -> DaoResult<Self> {
        let mut saw_null = false;
        let mut last_err = None;
        for read in readers {
            match read(row, column) {
                Ok(Some(cell)) => return Ok(cell),
                Ok(None) => saw_null = true,
                Err(err) => last_err = Some(err),
            }
        }

        match last_err {
            Some(source) if !saw_null => Err(DaoLayerError::Decode {
                column: column.to_string(),
                source,
            }),
            _ => Ok(Cell::Null),
        }
    }
}

type Reader = fn(&QueryResult, &str) -> Result<Option<Cell>, DbErr>;

const INTEGER_READERS: &[Reader] = &[
    read_i64, read_i32, read_i16, read_u64, read_u32, read_decimal, read_text,
];
const TEXT_READERS: &[Reader] = &[read_text, read_i64, read_i32, read_decimal, read_date];
const DATE_READERS: &[Reader] = &[read_date, read_datetime, read_text];
const DECIMAL_READERS: &[Reader] = &[read_decimal, read_f64, read_i64, read_i32, read_text];
const ANY_READERS: &[Reader] = &[
    read_i64,
    read_i32,
    read_i16,
    read_u64,
    read_u32,
    read_decimal,
    read_f64,
    read_date,
    read_datetime,
    read_text,
];

fn read<T: TryGetable>(
    row: &QueryResult,
    column: &str,
    wrap: impl FnOnce(T) -> Cell,
) -> Result<Option<Cell>, DbErr> {
    row.try_get::<Option<T>>("", column)
        .map(|value| value.map(wrap))
}

fn read_i64(row: &QueryResult, column: &str) -> Result<Option<Cell>, DbErr> {
    read(row, column, Cell::Int)
}

fn read_i32(row: &QueryResult, column: &str) -> Result<Option<Cell>, DbErr> {
    read(row, column, |value: i32| Cell::Int(value.into()))
}

fn read_i16(row: &QueryResult, column: &str) -> Result<Option<Cell>, DbErr> {
    read(row, column, |value: i16| Cell::Int(value.into()))
}

fn read_u32(row: &QueryResult, column: &str) -> Result<Option<Cell>, DbErr> {
    read(row, column, |value: u32| Cell::Int(value.into()))
}

fn read_u64(row: &QueryResult, column: &str) -> Result<Option<Cell>, DbErr> {
    read(row, column, |value: u64| {
        i64::try_from(value)
            .map(Cell::Int)
            .unwrap_or_else(|_| Cell::Text(value.to_string()))
    })
}

fn read_decimal(row: &QueryResult, column: &str) -> Result<Option<Cell>, DbErr> {
    read(row, column, Cell::Decimal)
}

fn read_f64(row: &QueryResult, column: &str) -> Result<Option<Cell>, DbErr> {
    read(row, column, |value: f64| {
        Decimal::try_from(value)
            .map(Cell::Decimal)
            .unwrap_or_else(|_| Cell::Text(value.to_string()))
    })
}

fn read_date(row: &QueryResult, column: &str) -> Result<Option<Cell>, DbErr> {
    read(row, column, Cell::Date)
}

fn read_datetime(row: &QueryResult, column: &str) -> Result<Option<Cell>, DbErr> {
    read(row, column, |value: NaiveDateTime| Cell::Date(value.date()))
}

fn read_text(row: &QueryResult, column: &str) -> Result<Option<Cell>, DbErr> {
    read(row, column, Cell::Text)
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Int(value) => write!(f, "{value}"),
            Cell::Text(value) => f.write_str(value),
            Cell::Date(value) => write!(f, "{}", value.format("%Y-%m-%d")),
            Cell::Decimal(value) => write!(f, "{value}"),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Null => serializer.serialize_none(),
            Cell::Int(value) => serializer.serialize_i64(*value),
            other => serializer.collect_str(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GridRow(pub Vec<Cell>);

impl GridRow {
    pub fn cells(&self) -> &[Cell] {
        &self.0
    }

    /// The value the grid shows in its first column, which is the row's key.
    pub fn first(&self) -> Option<&Cell> {
        self.0.first()
    }

    pub fn decode(row: &QueryResult, columns: &[ColumnSpec]) -> DaoResult<Self> {
        columns
            .iter()
            .map(|column| Cell::decode(row, column.name, column.kind))
            .collect::<DaoResult<Vec<_>>>()
            .map(GridRow)
    }
}

impl<const N: usize> From<[Cell; N]> for GridRow {
    fn from(cells: [Cell; N]) -> Self {
        GridRow(cells.into())
    }
}

/// Headers plus rows, replacing whatever was shown before.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Grid {
    pub columns: Vec<String>,
    pub rows: Vec<GridRow>,
}

impl Grid {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: impl Into<GridRow>) {
        self.rows.push(row.into());
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Row by 1-based position, as the front end numbers them.
    pub fn row(&self, position: usize) -> Option<&GridRow> {
        position.checked_sub(1).and_then(|index| self.rows.get(index))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use sea_orm::{Value, prelude::Decimal};

    use super::{Cell, Grid, GridRow};

    #[test]
    fn cells_display_like_the_store_shows_them() {
        assert_eq!(Cell::Int(7).to_string(), "7");
        assert_eq!(Cell::Null.to_string(), "");
        assert_eq!(
            Cell::Date(NaiveDate::from_ymd_opt(2025, 3, 9).expect("valid date")).to_string(),
            "2025-03-09"
        );
        assert_eq!(Cell::Decimal(Decimal::new(1250, 2)).to_string(), "12.50");
    }

    #[test]
    fn key_cells_bind_as_typed_values() {
        assert_eq!(Cell::Int(42).to_value(), Value::from(42i64));
        assert_eq!(Cell::text("x").to_value(), Value::from("x".to_string()));
    }

    #[test]
    fn rows_are_numbered_from_one() {
        let mut grid = Grid::new(["ID", "Name"]);
        grid.push([Cell::Int(1), Cell::text("a")]);
        grid.push([Cell::Int(2), Cell::text("b")]);

        assert_eq!(grid.row(0), None);
        assert_eq!(grid.row(2).and_then(GridRow::first), Some(&Cell::Int(2)));
        assert_eq!(grid.row(3), None);
    }

    #[test]
    fn serializes_as_plain_json() {
        let mut grid = Grid::new(["ID", "Name"]);
        grid.push([Cell::Int(1), Cell::Null]);
        let json = serde_json::to_value(&grid).expect("grid should serialize");
        assert_eq!(
            json,
            serde_json::json!({ "columns": ["ID", "Name"], "rows": [[1, null]] })
        );
    }
}
