use clap::Parser;
use colored::Colorize;
use inquire::Password;
use tracing_subscriber::EnvFilter;

use crate::{
    app::App,
    cli::{Cli, Commands},
    config::SupabaseConfig,
    error::AppError,
    menu::{print_profile, run_menu},
    storage::FileSessionStore,
};

mod app;
mod backend;
mod cli;
mod config;
mod error;
mod menu;
mod navigation;
mod notify;
mod profile;
mod screen;
mod session;
mod storage;
mod supabase;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("{}", err.to_string().red());
        std::process::exit(1);
    }
}

/// Logs go to stderr so they never mix with the interactive prompts
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = SupabaseConfig::new(
        cli.url.as_deref().unwrap_or_default(),
        cli.anon_key.as_deref().unwrap_or_default(),
    )?;
    let session_file = match cli.session_file {
        Some(path) => FileSessionStore::new(path),
        None => FileSessionStore::global()?,
    };
    let app = App::new(config, session_file)?;

    match cli.command {
        Some(Commands::Login { email }) => {
            let password: String = Password::new("password:").without_confirmation().prompt()?;
            app.sign_in(&email, &password).await;
        }
        Some(Commands::Show) => {
            app.screen.load_profile().await;
            print_profile(&app);
        }
        Some(Commands::SetUsername { username }) => {
            app.screen.set_username(username);
            app.screen.update_profile().await;
        }
        Some(Commands::Logout) => app.screen.sign_out().await,
        None => run_menu(&app).await?,
    }

    Ok(())
}
