use std::{
    collections::VecDeque,
    io::{self, Cursor, Write},
};

use sea_orm::{DatabaseBackend, Transaction, Value};

use library_desk::{
    auth::{Role, password::hash_password},
    shell::{self, Console, LineSource, OutputFormat, ScriptedLines, Shell},
    test_helpers::{exec_ok, mock_db, publisher_row, services_with, session, user_row},
};

fn console(script: &str) -> Console<ScriptedLines<Cursor<Vec<u8>>>, Vec<u8>> {
    Console::new(
        ScriptedLines::new(Cursor::new(script.as_bytes().to_vec())),
        Vec::new(),
        false,
    )
}

fn output_of<L>(console: Console<L, Vec<u8>>) -> String
where
    L: LineSource,
{
    String::from_utf8(console.into_output()).expect("output is utf-8")
}

/// Replays canned replies, where `Err` stands for a Ctrl-C at that prompt.
struct EditedLines {
    replies: VecDeque<Result<&'static str, ()>>,
    history: Vec<String>,
}

impl EditedLines {
    fn new(replies: impl IntoIterator<Item = Result<&'static str, ()>>) -> Self {
        Self {
            replies: replies.into_iter().collect(),
            history: Vec::new(),
        }
    }
}

impl LineSource for EditedLines {
    fn read_line(&mut self, prompt: &str, output: &mut dyn Write) -> io::Result<Option<String>> {
        write!(output, "{prompt}")?;
        match self.replies.pop_front() {
            Some(Ok(line)) => Ok(Some(line.to_string())),
            Some(Err(())) => Err(io::Error::new(io::ErrorKind::Interrupted, "cancelled")),
            None => Ok(None),
        }
    }

    fn remember(&mut self, line: &str) {
        self.history.push(line.to_string());
    }
}

#[tokio::test]
async fn login_reprompts_until_credentials_match() {
    let hash = hash_password("correct-horse").expect("hash should succeed");
    let db = mock_db()
        .append_query_results([[user_row("lee", &hash, "Librarian")]])
        .append_query_results([[user_row("lee", &hash, "Librarian")]])
        .into_connection();
    let services = services_with(db.clone());
    let mut console = console("\n\nlee\nwrong-pass\nlee\ncorrect-horse\n");

    let session = shell::login(&mut console, &services.session(), None, None)
        .await
        .expect("third attempt should log in");
    assert_eq!(session.role, Role::Librarian);

    let out = output_of(console);
    assert!(out.contains("[Missing Info] Please enter both username and password."));
    assert!(out.contains("[Login Failed] Invalid username or password."));
    assert!(out.contains("Logged in as lee (Librarian)"));
    assert_eq!(db.into_transaction_log().len(), 2);
}

#[tokio::test]
async fn preset_credentials_get_one_attempt() {
    let db = mock_db()
        .append_query_results([Vec::<library_desk::test_helpers::MockRow>::new()])
        .into_connection();
    let services = services_with(db);
    let mut console = console("");

    let err = shell::login(
        &mut console,
        &services.session(),
        Some("ghost".to_string()),
        Some("whatever1".to_string()),
    )
    .await
    .expect_err("bad preset credentials end the login");
    assert_eq!(err.to_string(), "Invalid username or password.");
}

#[tokio::test]
async fn list_then_delete_by_row_number() {
    let db = mock_db()
        .append_query_results([[
            publisher_row(3, "Orbit", "1 Main St"),
            publisher_row(4, "City Press", "12 Oak St"),
        ]])
        .append_exec_results([exec_ok(1)])
        .append_query_results([[publisher_row(3, "Orbit", "1 Main St")]])
        .into_connection();
    let services = services_with(db.clone());

    let mut shell = Shell::new(
        console("list publishers\ndelete publishers 2\nexit\n"),
        services,
        session(Role::Admin),
        OutputFormat::Table,
    );
    shell.run().await.expect("shell should finish");

    let out = output_of(shell.into_console());
    assert!(out.contains("City Press"));
    assert!(out.contains("(1 row)"));

    let log = db.into_transaction_log();
    assert_eq!(log.len(), 3);
    assert_eq!(
        log[1],
        Transaction::from_sql_and_values(
            DatabaseBackend::MySql,
            "DELETE FROM `Publishers` WHERE `publisher_id` = ?",
            [Value::from(4i64)],
        )
    );
}

#[tokio::test]
async fn delete_before_listing_asks_for_a_selection() {
    let db = mock_db().into_connection();
    let mut shell = Shell::new(
        console("delete books 1\n"),
        services_with(db.clone()),
        session(Role::Admin),
        OutputFormat::Table,
    );
    shell.run().await.expect("shell should finish at end of input");

    let out = output_of(shell.into_console());
    assert!(out.contains("warning: [Missing Info] Select a row to delete."));
    assert!(db.into_transaction_log().is_empty());
}

#[tokio::test]
async fn add_prompts_each_field_by_label() {
    let db = mock_db()
        .append_exec_results([exec_ok(1)])
        .append_query_results([[publisher_row(9, "City Press", "12 Oak St")]])
        .into_connection();
    let mut shell = Shell::new(
        console("add publisher\nCity Press\n12 Oak St\nexit\n"),
        services_with(db.clone()),
        session(Role::Librarian),
        OutputFormat::Json,
    );
    shell.run().await.expect("shell should finish");

    let out = output_of(shell.into_console());
    assert!(out.contains("Name: "));
    assert!(out.contains("Address: "));
    assert!(out.contains("\"City Press\""));
    assert_eq!(db.into_transaction_log().len(), 2);
}

#[tokio::test]
async fn viewer_is_refused_before_any_prompt() {
    let db = mock_db().into_connection();
    let mut shell = Shell::new(
        console("add book\nwhoami\nexit\n"),
        services_with(db.clone()),
        session(Role::Viewer),
        OutputFormat::Table,
    );
    shell.run().await.expect("shell should finish");

    let out = output_of(shell.into_console());
    assert!(out.contains("warning: [Access Denied] Viewers cannot add data."));
    assert!(!out.contains("Title: "));
    assert!(out.contains("guest (Viewer)"));
    assert!(db.into_transaction_log().is_empty());
}

#[tokio::test]
async fn commands_enter_history_and_cancelled_forms_touch_nothing() {
    let db = mock_db().into_connection();
    let lines = EditedLines::new([
        Ok("  whoami "),
        Ok(""),
        Err(()),
        Ok("add publisher"),
        Ok("City Press"),
        Err(()),
        Ok("exit"),
    ]);
    let mut shell = Shell::new(
        Console::new(lines, Vec::new(), false),
        services_with(db.clone()),
        session(Role::Librarian),
        OutputFormat::Table,
    );
    shell.run().await.expect("a cancelled line keeps the shell running");

    let (lines, output) = shell.into_console().into_parts();
    assert_eq!(lines.history, ["whoami", "add publisher", "exit"]);

    let out = String::from_utf8(output).expect("output is utf-8");
    assert!(out.contains("lib (Librarian)"));
    assert!(out.contains("Address: "));
    assert!(out.contains("add cancelled"));
    assert!(db.into_transaction_log().is_empty());
}
