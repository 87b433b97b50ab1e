use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// CLI arguments parser using `clap`
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Supabase project URL
    #[arg(long, env = "SUPABASE_URL", global = true)]
    pub url: Option<String>,
    /// Supabase anon API key
    #[arg(long, env = "SUPABASE_ANON_KEY", hide_env_values = true, global = true)]
    pub anon_key: Option<String>,
    /// Path of the session file, defaults to one in the home directory
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,
    /// Subcommand chosen to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// Subcommands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Signs in with email and password (password is prompted)
    Login {
        /// Account email
        email: String,
    },
    /// Displays the signed in user's profile
    Show,
    /// Sets and saves the username
    SetUsername {
        /// New username
        username: String,
    },
    /// Signs out and removes the stored session
    Logout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_set_username() {
        let cli = Cli::try_parse_from([
            "supaprofile",
            "set-username",
            "bob",
            "--url",
            "https://demo.supabase.co",
            "--anon-key",
            "key",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::SetUsername {
                username: "bob".to_string()
            })
        );
        assert_eq!(cli.url.as_deref(), Some("https://demo.supabase.co"));
        assert_eq!(cli.anon_key.as_deref(), Some("key"));
    }

    #[test]
    fn test_no_subcommand_runs_menu() {
        let cli = Cli::try_parse_from(["supaprofile", "--session-file", "/tmp/s.json"]).unwrap();
        assert_eq!(cli.command, None);
        assert_eq!(cli.session_file, Some(PathBuf::from("/tmp/s.json")));
    }
}
