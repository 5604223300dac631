use clap::{Parser, Subcommand};

use crate::shell::OutputFormat;

#[derive(Parser)]
#[command(author, version, about = "Terminal front end for the library database")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// The shell is the default when no subcommand is given.
    pub fn command(self) -> Commands {
        self.command
            .unwrap_or_else(|| Commands::Shell(ShellArgs::default()))
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and open the dashboard shell
    Shell(ShellArgs),
    /// Print an argon2 hash for a password, for storing in `Users.password`
    HashPassword(HashPasswordArgs),
}

#[derive(Parser, Clone, Default)]
pub struct ShellArgs {
    /// Username (prompts if omitted)
    #[arg(long, env = "LIBRARY_DESK_USERNAME")]
    pub username: Option<String>,
    /// Password (prompts without echo if omitted)
    #[arg(long, env = "LIBRARY_DESK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
    /// How grids are printed
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Parser, Clone)]
pub struct HashPasswordArgs {
    /// Password to hash (prompts without echo if omitted)
    #[arg(long)]
    pub password: Option<String>,
}
