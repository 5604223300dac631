use anyhow::Context;
use clap::Parser;

use library_desk::{
    auth::password::hash_password,
    cli::{Cli, Commands, HashPasswordArgs, ShellArgs},
    config::{AppConfig, defaults::DEFAULT_RUST_LOG},
    db::connection,
    logging::init_tracing,
    services::ServiceContext,
    shell::{self, Console, Shell},
    state::AppState,
};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        tracing::error!("library-desk failed: {err:?}");
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    match Cli::parse().command() {
        Commands::HashPassword(args) => {
            init_tracing(DEFAULT_RUST_LOG);
            print_hash(args)
        }
        Commands::Shell(args) => run_shell(args).await,
    }
}

async fn run_shell(args: ShellArgs) -> anyhow::Result<()> {
    let cfg = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            init_tracing(DEFAULT_RUST_LOG);
            return Err(err.context("failed to load config"));
        }
    };
    init_tracing(&cfg.logging.rust_log);

    let db = connection::connect(&cfg.database).await?;
    let state = AppState::new(cfg, db);
    let services = ServiceContext::from_state(&state);
    services.session().seed_admin(&state.config.auth).await?;

    let mut console = Console::terminal().context("failed to open the terminal")?;
    let session = shell::login(
        &mut console,
        &services.session(),
        args.username,
        args.password,
    )
    .await?;

    let mut shell = Shell::new(console, services, session, args.format);
    shell.run().await?;
    tracing::info!("shell closed");
    Ok(())
}

fn print_hash(args: HashPasswordArgs) -> anyhow::Result<()> {
    let password = match args.password {
        Some(password) => password,
        None => rpassword::prompt_password("Password: ").context("failed to read password")?,
    };
    let hash = hash_password(&password)?;
    println!("{hash}");
    Ok(())
}
