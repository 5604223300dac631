//! Interactive terminal front end: login prompt, then one command per line.

mod command;
mod input;
mod render;

use std::{
    collections::HashMap,
    io::{self, Write},
};

use anyhow::{Result, bail};

pub use command::{Command, ReportKind};
pub use input::{LineSource, ScriptedLines, TerminalLines};

use self::command::HELP;
pub use render::{OutputFormat, render_error, render_grid};

use crate::{
    auth::{Action, Session},
    db::{catalog::EntityKind, grid::Grid},
    error::AppError,
    services::{ServiceContext, session_service::SessionService},
};

/// Line-oriented input and output. Secrets are read without echo when `hide_secrets` is set.
pub struct Console<L, W> {
    input: L,
    output: W,
    hide_secrets: bool,
}

impl Console<TerminalLines, io::Stdout> {
    /// Line editing and history on stdin, hidden password entry.
    pub fn terminal() -> io::Result<Self> {
        Ok(Self::new(TerminalLines::new()?, io::stdout(), true))
    }
}

impl<L: LineSource, W: Write> Console<L, W> {
    pub fn new(input: L, output: W, hide_secrets: bool) -> Self {
        Self {
            input,
            output,
            hide_secrets,
        }
    }

    /// `None` once input is exhausted.
    pub fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        self.input.read_line(label, &mut self.output)
    }

    pub fn remember(&mut self, line: &str) {
        self.input.remember(line);
    }

    pub fn prompt_secret(&mut self, label: &str) -> io::Result<Option<String>> {
        if self.hide_secrets {
            self.output.flush()?;
            return rpassword::prompt_password(label).map(Some);
        }
        self.prompt(label)
    }

    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn into_parts(self) -> (L, W) {
        (self.input, self.output)
    }
}

/// Asks for credentials until a login succeeds. Credentials passed in up front
/// get exactly one attempt.
pub async fn login<L: LineSource, W: Write>(
    console: &mut Console<L, W>,
    sessions: &SessionService,
    username: Option<String>,
    password: Option<String>,
) -> Result<Session> {
    let preset = username.is_some() && password.is_some();
    let mut username = username;
    let mut password = password;

    loop {
        let user = match username.take() {
            Some(user) => user,
            None => match console.prompt("Username: ")? {
                Some(user) => user,
                None => bail!("login aborted"),
            },
        };
        let pass = match password.take() {
            Some(pass) => pass,
            None => match console.prompt_secret("Password: ")? {
                Some(pass) => pass,
                None => bail!("login aborted"),
            },
        };

        match sessions.login(&user, &pass).await {
            Ok(session) => {
                console.say(&format!(
                    "Logged in as {} ({})",
                    session.username, session.role
                ))?;
                return Ok(session);
            }
            Err(err) => {
                console.say(&render_error(&err))?;
                if preset {
                    bail!("{err}");
                }
            }
        }
    }
}

pub struct Shell<L, W> {
    console: Console<L, W>,
    services: ServiceContext,
    session: Session,
    format: OutputFormat,
    shown: HashMap<EntityKind, Grid>,
}

impl<L: LineSource, W: Write> Shell<L, W> {
    pub fn new(
        console: Console<L, W>,
        services: ServiceContext,
        session: Session,
        format: OutputFormat,
    ) -> Self {
        Self {
            console,
            services,
            session,
            format,
            shown: HashMap::new(),
        }
    }

    /// Reads commands until `exit` or end of input. Operation failures are
    /// printed and the loop continues; only terminal I/O errors end it early.
    pub async fn run(&mut self) -> Result<()> {
        self.console.say("Type `help` for commands.")?;
        loop {
            let prompt = format!("{}> ", self.session.username);
            let line = match self.console.prompt(&prompt) {
                Ok(Some(line)) => line,
                Ok(None) => return Ok(()),
                Err(err) if input::is_cancelled(&err) => continue,
                Err(err) => return Err(err.into()),
            };
            if !line.trim().is_empty() {
                self.console.remember(line.trim());
            }

            let command = match Command::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(err) => {
                    self.console.say(&render_error(&err))?;
                    continue;
                }
            };
            if command == Command::Exit {
                return Ok(());
            }

            if let Err(err) = self.execute(command).await {
                self.console.say(&render_error(&err))?;
            }
        }
    }

    pub fn into_console(self) -> Console<L, W> {
        self.console
    }

    async fn execute(&mut self, command: Command) -> Result<(), AppError> {
        match command {
            Command::Tabs => {
                let tabs: Vec<&str> = EntityKind::ALL.iter().map(|kind| kind.tab_label()).collect();
                self.write(&tabs.join("  "))
            }
            Command::List(kind) => {
                let grid = self.services.dashboard().list(&self.session, kind).await?;
                self.show(kind, grid)
            }
            Command::Add(kind) => {
                self.session.require(Action::Add)?;
                let Some(form) = self.read_form(kind)? else {
                    return self.write("add cancelled");
                };
                let grid = self
                    .services
                    .dashboard()
                    .add(&self.session, kind, &form)
                    .await?;
                self.show(kind, grid)
            }
            Command::Delete(kind, position) => {
                let selected = self
                    .shown
                    .get(&kind)
                    .and_then(|grid| grid.row(position))
                    .cloned();
                let grid = self
                    .services
                    .dashboard()
                    .delete(&self.session, kind, selected.as_ref())
                    .await?;
                self.show(kind, grid)
            }
            Command::Report(ReportKind::Functions) => {
                let grid = self.services.report().functions(&self.session).await?;
                self.print(&grid)
            }
            Command::Report(ReportKind::Queries) => {
                let grid = self.services.report().queries(&self.session).await?;
                self.print(&grid)
            }
            Command::WhoAmI => {
                let line = format!("{} ({})", self.session.username, self.session.role);
                self.write(&line)
            }
            Command::Help => self.write(HELP),
            Command::Exit => Ok(()),
        }
    }

    /// Prompts once per input column, by label. `None` if input ends or is cancelled midway.
    fn read_form(&mut self, kind: EntityKind) -> Result<Option<HashMap<String, String>>, AppError> {
        let mut form = HashMap::new();
        for column in kind.descriptor().input_columns() {
            let value = match self.console.prompt(&format!("{}: ", column.label)) {
                Ok(Some(value)) => value,
                Ok(None) => return Ok(None),
                Err(err) if input::is_cancelled(&err) => return Ok(None),
                Err(err) => return Err(terminal_error(err)),
            };
            form.insert(column.name.to_string(), value);
        }
        Ok(Some(form))
    }

    fn show(&mut self, kind: EntityKind, grid: Grid) -> Result<(), AppError> {
        self.print(&grid)?;
        self.shown.insert(kind, grid);
        Ok(())
    }

    fn print(&mut self, grid: &Grid) -> Result<(), AppError> {
        let rendered = render_grid(grid, self.format)?;
        self.write(&rendered)
    }

    fn write(&mut self, text: &str) -> Result<(), AppError> {
        self.console.say(text).map_err(terminal_error)
    }
}

fn terminal_error(err: io::Error) -> AppError {
    AppError::internal(format!("Terminal error: {err}"))
}
