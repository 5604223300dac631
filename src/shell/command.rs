use crate::{db::catalog::EntityKind, error::AppError};

pub const HELP: &str = "\
Commands:
  tabs                      list the dashboard tabs
  list <entity>             show every record of an entity
  add <entity>              add a record (prompts for each field)
  delete <entity> <row>     delete a row from the last list of that entity
  report functions          stored function results
  report queries            aggregate, join and nested query results
  whoami                    show the logged-in user and role
  help                      show this text
  exit                      leave the shell";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Functions,
    Queries,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Tabs,
    List(EntityKind),
    Add(EntityKind),
    /// Row number is 1-based, as printed in the `#` column.
    Delete(EntityKind, usize),
    Report(ReportKind),
    WhoAmI,
    Help,
    Exit,
}

impl Command {
    /// `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Command>, AppError> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&verb, args)) = words.split_first() else {
            return Ok(None);
        };

        let command = match (verb.to_ascii_lowercase().as_str(), args) {
            ("tabs", []) => Command::Tabs,
            ("list", [entity]) => Command::List(entity_arg(entity)?),
            ("add", [entity]) => Command::Add(entity_arg(entity)?),
            ("delete", [entity, row]) => Command::Delete(entity_arg(entity)?, row_arg(row)?),
            ("delete", [_]) => return Err(AppError::bad_request("Select a row to delete.")),
            ("report", [kind]) => match kind.to_ascii_lowercase().as_str() {
                "functions" => Command::Report(ReportKind::Functions),
                "queries" => Command::Report(ReportKind::Queries),
                other => return Err(AppError::bad_request(format!("Unknown report '{other}'."))),
            },
            ("whoami", []) => Command::WhoAmI,
            ("help" | "?", []) => Command::Help,
            ("exit" | "quit", []) => Command::Exit,
            _ => {
                return Err(AppError::bad_request(format!(
                    "Unrecognised command '{}'. Type `help` for commands.",
                    line.trim()
                )));
            }
        };
        Ok(Some(command))
    }
}

fn entity_arg(raw: &str) -> Result<EntityKind, AppError> {
    raw.parse()
        .map_err(|_| AppError::bad_request(format!("Unknown entity '{raw}'.")))
}

fn row_arg(raw: &str) -> Result<usize, AppError> {
    match raw.parse::<usize>() {
        Ok(row) if row > 0 => Ok(row),
        _ => Err(AppError::bad_request(format!(
            "'{raw}' is not a row number."
        ))),
    }
}
