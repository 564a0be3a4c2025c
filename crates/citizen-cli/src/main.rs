use std::time::{SystemTime, UNIX_EPOCH};

use citizen::prelude::*;
use clap::{Parser, Subcommand};

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

/// Citizen: post and browse local civic complaints.
#[derive(Parser)]
#[command(name = "citizen", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show who is logged in and which screen the app would open on.
    Status,
    /// Mark the intro slides as seen.
    Onboard,
    /// Log in with email and password.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "CITIZEN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and log in.
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "CITIZEN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log out and erase the stored session.
    Logout,
    /// Ask the server whether a username is free.
    CheckUsername { username: String },
    /// Fetch and print the rant feed.
    Feed {
        #[arg(long, default_value_t = SortBy::Recent)]
        sort: SortBy,
        /// Only show rants whose text or city contains this.
        #[arg(long)]
        search: Option<String>,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    let config = CitizenConfig::from_env()?;
    let client = CitizenClient::from_config(&config)?;
    let route = client.bootstrap().await;

    match cli.command {
        Command::Status => {
            let snap = client.session().snapshot();
            match &snap.user {
                Some(user) => println!(
                    "logged in as {} <{}> (level {}, {} points)",
                    user.username, user.email, user.level, user.points
                ),
                None => println!("not logged in"),
            }
            println!("opens on: {route}");
        }
        Command::Onboard => {
            client.complete_onboarding().await?;
            println!("onboarding complete");
        }
        Command::Login { email, password } => {
            let result = client.sign_in(Credentials { email, password }).await;
            report_sign_in(result)?;
        }
        Command::Register {
            username,
            email,
            password,
        } => {
            let registration = Registration {
                username,
                email,
                password,
            };
            let result = client.register(registration).await;
            report_sign_in(result)?;
        }
        Command::Logout => {
            match client.sign_out().await {
                Ok(()) => {}
                // Logged out in memory; only the file is stale.
                Err(e) if e.is_persistence() => {
                    tracing::warn!(error = %e, "stored session could not be erased");
                }
                Err(e) => return Err(e.into()),
            }
            println!("logged out");
        }
        Command::CheckUsername { username } => {
            let available = client.authenticator().username_available(&username).await?;
            if available {
                println!("'{username}' is available");
            } else {
                println!("'{username}' is taken");
            }
        }
        Command::Feed { sort, search } => {
            let token = client.session().token();
            let rants = client.authenticator().fetch_rants(token.as_deref()).await?;

            let mut feed = Feed::new(FeedConfig::default());
            feed.load(rants);

            let shown = match search.as_deref() {
                Some(query) => feed.search_sorted(query, sort),
                None => feed.sorted(sort),
            };

            if shown.is_empty() {
                println!("no rants");
            }
            let now = unix_now();
            for rant in shown {
                let petition = if rant.upvotes >= PETITION_THRESHOLD { "  [petition]" } else { "" };
                println!(
                    "{:>5} ▲  {} ({}, {}){petition}",
                    rant.upvotes,
                    rant.text,
                    rant.city,
                    time_ago(now, rant.created_at)
                );
            }
        }
    }

    Ok(())
}

/// A persistence failure still means the user is logged in for this run.
fn report_sign_in(result: Result<UserProfile, CitizenError>) -> Result<(), CitizenError> {
    let user = match result {
        Ok(user) => user,
        Err(e) if e.is_persistence() => {
            tracing::warn!(error = %e, "logged in, but the session was not saved");
            return Ok(());
        }
        Err(e) => return Err(e),
    };
    println!("logged in as {} (level {}, {} points)", user.username, user.level, user.points);
    Ok(())
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

/// "2h ago"-style label.
fn time_ago(now: u64, then: u64) -> String {
    if then == 0 {
        return "unknown".to_string();
    }
    let secs = now.saturating_sub(then);
    match secs {
        0..60 => "just now".to_string(),
        60..3600 => format!("{}m ago", secs / 60),
        3600..86_400 => format!("{}h ago", secs / 3600),
        _ => format!("{}d ago", secs / 86_400),
    }
}
