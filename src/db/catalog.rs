//! Declarative description of every table the dashboard can touch.
//!
//! One [`EntityDescriptor`] per tab drives list, add and delete; nothing else in
//! the crate names a table or column directly.

use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntityKind {
    Publisher,
    Book,
    Member,
    Librarian,
    Issue,
    Fine,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Publisher,
        EntityKind::Book,
        EntityKind::Member,
        EntityKind::Librarian,
        EntityKind::Issue,
        EntityKind::Fine,
    ];

    pub fn descriptor(self) -> &'static EntityDescriptor {
        match self {
            EntityKind::Publisher => &PUBLISHERS,
            EntityKind::Book => &BOOKS,
            EntityKind::Member => &MEMBERS,
            EntityKind::Librarian => &LIBRARIANS,
            EntityKind::Issue => &ISSUES,
            EntityKind::Fine => &FINES,
        }
    }

    pub fn tab_label(self) -> &'static str {
        match self {
            EntityKind::Publisher => "Publishers",
            EntityKind::Book => "Books",
            EntityKind::Member => "Members",
            EntityKind::Librarian => "Librarians",
            EntityKind::Issue => "Issue",
            EntityKind::Fine => "Fine",
        }
    }
}

impl FromStr for EntityKind {
    type Err = CatalogError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "publisher" | "publishers" => Ok(EntityKind::Publisher),
            "book" | "books" => Ok(EntityKind::Book),
            "member" | "members" => Ok(EntityKind::Member),
            "librarian" | "librarians" => Ok(EntityKind::Librarian),
            "issue" | "issues" => Ok(EntityKind::Issue),
            "fine" | "fines" => Ok(EntityKind::Fine),
            other => Err(CatalogError::UnknownEntity(other.to_string())),
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tab_label())
    }
}

/// How a column's values are decoded for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Text,
    Date,
    Decimal,
}

#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: ColumnKind,
    /// Collected from the add form and bound into the insert.
    pub input: bool,
}

const fn key(name: &'static str, label: &'static str) -> ColumnSpec {
    ColumnSpec {
        name,
        label,
        kind: ColumnKind::Integer,
        input: false,
    }
}

const fn field(name: &'static str, label: &'static str, kind: ColumnKind) -> ColumnSpec {
    ColumnSpec {
        name,
        label,
        kind,
        input: true,
    }
}

const fn generated(name: &'static str, label: &'static str, kind: ColumnKind) -> ColumnSpec {
    ColumnSpec {
        name,
        label,
        kind,
        input: false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertStrategy {
    Direct,
    /// Stored procedure taking the input columns in declaration order.
    Procedure(&'static str),
}

#[derive(Debug)]
pub struct EntityDescriptor {
    pub kind: EntityKind,
    pub table: &'static str,
    pub key: &'static str,
    /// Display order; the key column comes first.
    pub columns: &'static [ColumnSpec],
    pub insert: InsertStrategy,
    pub deletable: bool,
}

impl EntityDescriptor {
    pub fn input_columns(&self) -> impl Iterator<Item = &'static ColumnSpec> + '_ {
        self.columns.iter().filter(|column| column.input)
    }

    pub fn labels(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| column.label.to_string())
            .collect()
    }

    /// Checks every identifier this descriptor would put into a statement.
    pub fn check_identifiers(&self) -> Result<(), CatalogError> {
        check_identifier(self.table)?;
        check_identifier(self.key)?;
        for column in self.columns {
            check_identifier(column.name)?;
        }
        if let InsertStrategy::Procedure(name) = self.insert {
            check_identifier(name)?;
        }
        Ok(())
    }

    /// Resolves the (table, key) pair for a delete against [`DELETE_ALLOWLIST`].
    pub fn delete_target(&self) -> Result<(&'static str, &'static str), CatalogError> {
        if !self.deletable {
            return Err(CatalogError::NotDeletable(self.kind));
        }
        DELETE_ALLOWLIST
            .iter()
            .copied()
            .find(|(table, key)| *table == self.table && *key == self.key)
            .ok_or(CatalogError::DeleteNotAllowed {
                table: self.table,
                key: self.key,
            })
    }
}

/// The only (table, key column) pairs a delete statement may be built for.
pub const DELETE_ALLOWLIST: &[(&str, &str)] = &[
    ("Publishers", "publisher_id"),
    ("Books", "book_id"),
    ("Members", "member_id"),
    ("Librarian", "librarian_id"),
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown entity '{0}'")]
    UnknownEntity(String),
    #[error("{0} records cannot be deleted")]
    NotDeletable(EntityKind),
    #[error("delete on {table}.{key} is not on the allow-list")]
    DeleteNotAllowed {
        table: &'static str,
        key: &'static str,
    },
    #[error("'{0}' is not a plain SQL identifier")]
    InvalidIdentifier(String),
    #[error("{entity} has no field '{field}'")]
    UnknownField { entity: EntityKind, field: String },
    #[error("{entity} expects {expected} values, got {got}")]
    FieldCount {
        entity: EntityKind,
        expected: usize,
        got: usize,
    },
}

pub fn check_identifier(ident: &str) -> Result<(), CatalogError> {
    let mut chars = ident.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(CatalogError::InvalidIdentifier(ident.to_string()))
    }
}

pub static PUBLISHERS: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Publisher,
    table: "Publishers",
    key: "publisher_id",
    columns: &[
        key("publisher_id", "Publisher ID"),
        field("name", "Name", ColumnKind::Text),
        field("address", "Address", ColumnKind::Text),
    ],
    insert: InsertStrategy::Direct,
    deletable: true,
};

pub static BOOKS: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Book,
    table: "Books",
    key: "book_id",
    columns: &[
        key("book_id", "Book ID"),
        field("title", "Title", ColumnKind::Text),
        field("author", "Author", ColumnKind::Text),
        field("publisher_id", "Publisher ID", ColumnKind::Integer),
        field("year_published", "Year Published", ColumnKind::Integer),
        field("available_copies", "Available Copies", ColumnKind::Integer),
    ],
    insert: InsertStrategy::Procedure("AddNewBook"),
    deletable: true,
};

pub static MEMBERS: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Member,
    table: "Members",
    key: "member_id",
    columns: &[
        key("member_id", "Member ID"),
        field("name", "Name", ColumnKind::Text),
        field("email", "Email", ColumnKind::Text),
        field("phone", "Phone", ColumnKind::Text),
        generated("join_date", "Join Date", ColumnKind::Date),
    ],
    insert: InsertStrategy::Procedure("AddNewMember"),
    deletable: true,
};

pub static LIBRARIANS: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Librarian,
    table: "Librarian",
    key: "librarian_id",
    columns: &[
        key("librarian_id", "Librarian ID"),
        field("name", "Name", ColumnKind::Text),
        field("email", "Email", ColumnKind::Text),
        field("phone", "Phone", ColumnKind::Text),
    ],
    insert: InsertStrategy::Direct,
    deletable: true,
};

pub static ISSUES: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Issue,
    table: "Issue",
    key: "issue_id",
    columns: &[
        key("issue_id", "Issue ID"),
        field("book_id", "Book ID", ColumnKind::Integer),
        field("member_id", "Member ID", ColumnKind::Integer),
        field("librarian_id", "Librarian ID", ColumnKind::Integer),
        field("issue_date", "Issue Date", ColumnKind::Date),
        field("return_date", "Return Date", ColumnKind::Date),
    ],
    insert: InsertStrategy::Direct,
    deletable: false,
};

pub static FINES: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Fine,
    table: "Fine",
    key: "fine_id",
    columns: &[
        key("fine_id", "Fine ID"),
        field("issue_id", "Issue ID", ColumnKind::Integer),
        field("amount", "Amount", ColumnKind::Decimal),
        field("status", "Status", ColumnKind::Text),
    ],
    insert: InsertStrategy::Direct,
    deletable: false,
};

#[cfg(test)]
mod tests {
    use super::{
        CatalogError, DELETE_ALLOWLIST, EntityDescriptor, EntityKind, InsertStrategy,
        check_identifier,
    };

    #[test]
    fn every_descriptor_is_well_formed() {
        for kind in EntityKind::ALL {
            let descriptor = kind.descriptor();
            assert_eq!(descriptor.kind, kind);
            descriptor
                .check_identifiers()
                .expect("catalog identifiers should be plain");
            assert_eq!(descriptor.columns[0].name, descriptor.key);
            assert!(!descriptor.columns[0].input);
            assert!(descriptor.input_columns().count() > 0);
        }
    }

    #[test]
    fn procedures_match_their_input_arity() {
        let books = EntityKind::Book.descriptor();
        assert_eq!(books.insert, InsertStrategy::Procedure("AddNewBook"));
        assert_eq!(books.input_columns().count(), 5);

        let members = EntityKind::Member.descriptor();
        assert_eq!(members.insert, InsertStrategy::Procedure("AddNewMember"));
        let inputs: Vec<_> = members.input_columns().map(|c| c.name).collect();
        assert_eq!(inputs, ["name", "email", "phone"]);
    }

    #[test]
    fn delete_targets_follow_the_allowlist() {
        for kind in [
            EntityKind::Publisher,
            EntityKind::Book,
            EntityKind::Member,
            EntityKind::Librarian,
        ] {
            let target = kind
                .descriptor()
                .delete_target()
                .expect("deletable entity should resolve");
            assert!(DELETE_ALLOWLIST.contains(&target));
        }

        assert_eq!(
            EntityKind::Issue.descriptor().delete_target(),
            Err(CatalogError::NotDeletable(EntityKind::Issue))
        );
        assert_eq!(
            EntityKind::Fine.descriptor().delete_target(),
            Err(CatalogError::NotDeletable(EntityKind::Fine))
        );
    }

    #[test]
    fn misconfigured_descriptor_cannot_delete() {
        let rogue = EntityDescriptor {
            kind: EntityKind::Publisher,
            table: "Users",
            key: "username",
            columns: &[],
            insert: InsertStrategy::Direct,
            deletable: true,
        };
        assert_eq!(
            rogue.delete_target(),
            Err(CatalogError::DeleteNotAllowed {
                table: "Users",
                key: "username"
            })
        );
    }

    #[test]
    fn identifiers_reject_sql() {
        assert!(check_identifier("publisher_id").is_ok());
        assert!(check_identifier("_tmp1").is_ok());
        assert!(check_identifier("").is_err());
        assert!(check_identifier("1abc").is_err());
        assert!(check_identifier("Books; DROP TABLE Users").is_err());
        assert!(check_identifier("a-b").is_err());
    }

    #[test]
    fn parses_singular_and_plural_names() {
        assert_eq!("publishers".parse(), Ok(EntityKind::Publisher));
        assert_eq!("Book".parse(), Ok(EntityKind::Book));
        assert_eq!("fines".parse(), Ok(EntityKind::Fine));
        assert_eq!(
            "loans".parse::<EntityKind>(),
            Err(CatalogError::UnknownEntity("loans".to_string()))
        );
    }
}
