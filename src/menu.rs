use std::future::Future;

use colored::Colorize;
use inquire::{Password, Select, Text};

use crate::{app::App, backend::Navigator, error::AppError, navigation::Route};

/// Runs the interactive app until the user quits
pub async fn run_menu(app: &App) -> Result<(), AppError> {
    loop {
        match app.routes.current() {
            Route::Login => login_view(app).await?,
            Route::Profile => profile_view(app).await?,
            Route::Quit => {
                println!("{}", "quitting".yellow());
                break Ok(());
            }
        }
    }
}

/// Login view: asks for credentials until sign in succeeds or the user quits
async fn login_view(app: &App) -> Result<(), AppError> {
    let actions: Vec<&'static str> = vec!["sign in", "quit"];
    let action_selected: &'static str = Select::new(&format!("{}", "login".blue()), actions)
        .prompt()?;

    match action_selected {
        "sign in" => {
            let email: String = Text::new(&format!("{}", "email:".blue())).prompt()?;
            let password: String = Password::new(&format!("{}", "password:".blue()))
                .without_confirmation()
                .prompt()?;
            app.sign_in(email.trim(), &password).await;
        }
        "quit" => app.routes.navigate(Route::Quit),
        _ => unreachable!("unexpected input"),
    }

    Ok(())
}

/// Profile view: shows the profile and runs the selected screen action
async fn profile_view(app: &App) -> Result<(), AppError> {
    if app.screen.needs_reload() {
        with_progress(app, "loading profile...", app.screen.load_profile()).await;
    }

    print_profile(app);

    let actions: Vec<&'static str> = vec![
        "edit username",
        "update profile",
        "refresh",
        "sign out",
        "quit",
    ];
    let action_selected: &'static str = Select::new(&format!("{}", "select action".blue()), actions)
        .prompt()?;

    match action_selected {
        "edit username" => {
            let current: String = app.screen.username();
            let username: String = Text::new(&format!("{}", "username:".blue()))
                .with_initial_value(&current)
                .prompt()?;
            app.screen.set_username(username);
        }
        "update profile" => {
            with_progress(app, "saving profile...", app.screen.update_profile()).await
        }
        "refresh" => with_progress(app, "loading profile...", app.screen.load_profile()).await,
        "sign out" => with_progress(app, "signing out...", app.screen.sign_out()).await,
        "quit" => app.routes.navigate(Route::Quit),
        _ => unreachable!("unexpected input"),
    }

    Ok(())
}

/// Prints the profile card
pub fn print_profile(app: &App) {
    println!("{}", "profile".bold());
    println!("{} {}", "email:".blue(), app.screen.email());
    println!("{} {}", "username:".blue(), app.screen.username());
}

/// Runs a screen action and prints `label` once if it is still loading after its first poll
async fn with_progress(app: &App, label: &str, action: impl Future<Output = ()>) {
    let indicator = async {
        tokio::task::yield_now().await;
        if app.screen.is_loading() {
            println!("{}", label.yellow());
        }
    };
    tokio::join!(action, indicator);
}
