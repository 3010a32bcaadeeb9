//! Stride CLI - Log activities and check progress
//!
//! Simple CLI for interacting with the Stride API.

mod api;
mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::Password;
use uuid::Uuid;

use api::{ProgressResponse, StrideClient};
use config::Config;

const NO_PROFILE: &str =
    "No profile specified and no default profile set. Use -p <profile> or set a default.";

#[derive(Parser)]
#[command(name = "stride")]
#[command(about = "Stride CLI - Habit progression tracker", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Login and store API key
    Login {
        /// API key (will prompt if not provided)
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Manage profiles (user shortcuts)
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Register a new user and save it as a profile
    Register {
        username: String,
        /// Profile name to save (defaults to the username)
        #[arg(short, long)]
        profile: Option<String>,
    },

    /// Show level, XP and day streak
    Status {
        #[arg(short, long)]
        profile: Option<String>,
    },

    /// Complete an activity
    Complete {
        activity_id: i32,
        /// Idempotency key; repeat it to retry without double counting
        #[arg(short, long)]
        key: Option<Uuid>,
        #[arg(short, long)]
        profile: Option<String>,
    },

    /// Start a session (breaks the streak after a missed day)
    Session {
        #[arg(short, long)]
        profile: Option<String>,
    },

    /// List catalog activities
    Activities {
        /// Lifestyle category filter (comma-separated, e.g., "1,2")
        #[arg(short, long, value_delimiter = ',')]
        lifestyle: Vec<i32>,
    },

    /// Show the dashboard
    Dashboard {
        #[arg(short, long)]
        profile: Option<String>,
    },

    /// Show current configuration
    Config,
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Add a new profile
    Add {
        /// Profile name
        name: String,
        /// User ID
        #[arg(long)]
        user_id: Uuid,
    },
    /// List all profiles
    List,
    /// Set default profile
    Set { name: String },
    /// Remove a profile
    Remove { name: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Login { key } => cmd_login(key).await,
        Commands::Profile { action } => cmd_profile(action).await,
        Commands::Register { username, profile } => cmd_register(username, profile).await,
        Commands::Status { profile } => cmd_status(profile).await,
        Commands::Complete {
            activity_id,
            key,
            profile,
        } => cmd_complete(activity_id, key, profile).await,
        Commands::Session { profile } => cmd_session(profile).await,
        Commands::Activities { lifestyle } => cmd_activities(lifestyle).await,
        Commands::Dashboard { profile } => cmd_dashboard(profile).await,
        Commands::Config => cmd_config(),
    }
}

fn client(config: &Config) -> StrideClient {
    StrideClient::new(&config.base_url, config.api_key.as_deref())
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_login(key: Option<String>) -> Result<()> {
    let mut config = Config::load()?;

    let api_key = match key {
        Some(k) => k,
        None => Password::new()
            .with_prompt("API Key")
            .interact()
            .context("Failed to read API key")?,
    };

    let client = StrideClient::new(&config.base_url, Some(&api_key));
    print!("Testing connection... ");

    match client.health().await {
        Ok(true) => println!("{}", "OK".green()),
        _ => {
            println!("{}", "Failed".red());
            bail!("Could not reach the Stride API at {}", config.base_url);
        }
    }

    config.set_api_key(api_key);
    config.save()?;

    println!("{} API key saved to {:?}", "✓".green(), Config::config_path()?);

    if config.profiles.is_empty() {
        println!("\n{}", "Tip: register a user to create a profile:".yellow());
        println!("  stride register <username>");
    }

    Ok(())
}

async fn cmd_profile(action: ProfileAction) -> Result<()> {
    let mut config = Config::load()?;

    match action {
        ProfileAction::Add { name, user_id } => {
            // Verify the user exists before saving
            let user = client(&config)
                .get_progress(user_id)
                .await
                .context("Could not verify user")?;
            config.add_profile(name.clone(), user_id, Some(user.username.clone()));
            config.save()?;
            println!("{} Profile '{}' added ({})", "✓".green(), name, user.username);
        }

        ProfileAction::List => {
            if config.profiles.is_empty() {
                println!("No profiles configured.");
                println!("\n{}", "Add one with:".dimmed());
                println!("  stride profile add <name> --user-id <USER_ID>");
                return Ok(());
            }

            println!("{}", "Profiles:".bold());
            for (name, profile) in &config.profiles {
                let is_default = config.default_profile.as_ref() == Some(name);
                let default_marker = if is_default {
                    " (default)".green().to_string()
                } else {
                    String::new()
                };

                println!(
                    "  {} {} ({}){}",
                    name.cyan(),
                    profile.username.as_deref().unwrap_or("-").dimmed(),
                    profile.user_id,
                    default_marker
                );
            }
        }

        ProfileAction::Set { name } => {
            if !config.set_default_profile(name.clone()) {
                bail!("Profile '{}' not found", name);
            }
            config.save()?;
            println!("{} Default profile set to '{}'", "✓".green(), name);
        }

        ProfileAction::Remove { name } => {
            if !config.remove_profile(&name) {
                bail!("Profile '{}' not found", name);
            }
            config.save()?;
            println!("{} Profile '{}' removed", "✓".green(), name);
        }
    }

    Ok(())
}

async fn cmd_register(username: String, profile: Option<String>) -> Result<()> {
    let mut config = Config::load()?;

    let user = client(&config).register(&username).await?;
    let profile_name = profile.unwrap_or_else(|| user.username.clone());

    config.add_profile(profile_name.clone(), user.id, Some(user.username.clone()));
    config.save()?;

    println!(
        "{} Registered {} as profile '{}'",
        "✓".green(),
        user.username.cyan().bold(),
        profile_name
    );
    println!("  {}", user.id.to_string().dimmed());

    Ok(())
}

async fn cmd_status(profile: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let user_id = config.get_user_id(profile.as_deref()).context(NO_PROFILE)?;

    let user = client(&config).get_progress(user_id).await?;

    println!("{}", user.username.cyan().bold());
    print_progress(&user.progress);

    Ok(())
}

async fn cmd_complete(activity_id: i32, key: Option<Uuid>, profile: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let user_id = config.get_user_id(profile.as_deref()).context(NO_PROFILE)?;

    let done = client(&config).complete(user_id, activity_id, key).await?;

    if done.replayed {
        println!("{} Already recorded with this key", "↺".yellow());
    } else {
        println!("{} +{} XP", "✓".green(), done.xp_gained.to_string().green().bold());
    }

    if done.levels_gained > 0 {
        println!("  {} Level up! Now level {}", "▲".green(), done.level);
    }
    if done.streak_changed {
        println!("  {} Day streak: {}", "🔥", done.day_streak);
    }
    if done.stress_decremented > 0 {
        println!("  Stress eased by {}", done.stress_decremented);
    }
    println!(
        "  {} {}/{}",
        xp_bar(done.xp, done.xp_for_next_level, 20),
        done.xp,
        done.xp_for_next_level
    );

    Ok(())
}

async fn cmd_session(profile: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let user_id = config.get_user_id(profile.as_deref()).context(NO_PROFILE)?;

    let progress = client(&config).start_session(user_id).await?;
    print_progress(&progress);

    if progress.day_streak == 0 && progress.last_success_at.is_some() {
        println!("\n{}", "Streak lost - complete an activity today to start a new one.".yellow());
    }

    Ok(())
}

async fn cmd_activities(lifestyle: Vec<i32>) -> Result<()> {
    let config = Config::load()?;

    let activities = client(&config).list_activities(&lifestyle).await?;

    if activities.is_empty() {
        println!("No activities found.");
        return Ok(());
    }

    println!("{}", "Activities:".bold());
    for activity in activities {
        let minutes = activity
            .base_time
            .map(|m| format!("{}min", m))
            .unwrap_or_else(|| "-".to_string());

        println!(
            "  {:>4} {} {} XP, {} {}",
            activity.id.to_string().dimmed(),
            activity.name.cyan(),
            activity.base_xp.unwrap_or(0),
            minutes,
            activity.activity_type.as_deref().unwrap_or("").dimmed()
        );
    }

    println!("\n{}", "Complete one with:".dimmed());
    println!("  stride complete <ID>");

    Ok(())
}

async fn cmd_dashboard(profile: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let user_id = config.get_user_id(profile.as_deref()).context(NO_PROFILE)?;

    let dashboard = client(&config).dashboard(user_id).await?;

    println!("{}", dashboard.user.username.cyan().bold());
    print_progress(&dashboard.progress);

    println!("\n{}", "Chosen activities:".bold());
    if dashboard.chosen_activities.is_empty() {
        println!("  {}", "None".dimmed());
    }
    for planned in &dashboard.chosen_activities {
        println!(
            "  {:>4} {} (done {}x)",
            planned.activity.id.to_string().dimmed(),
            planned.activity.name,
            planned.success_count
        );
    }

    Ok(())
}

fn cmd_config() -> Result<()> {
    let config = Config::load()?;

    println!("{}", "Configuration:".bold());
    println!("  Path: {:?}", Config::config_path()?);
    println!("  Base URL: {}", config.base_url);
    println!(
        "  API Key: {}",
        if config.api_key.is_some() {
            "Set".green()
        } else {
            "Not set".red()
        }
    );
    println!(
        "  Default Profile: {}",
        config.default_profile.as_deref().unwrap_or("None").cyan()
    );
    println!("  Profiles: {}", config.profiles.len());

    Ok(())
}

fn print_progress(progress: &ProgressResponse) {
    println!(
        "  Level {}  {} {}/{}",
        progress.level.to_string().bold(),
        xp_bar(progress.xp, progress.xp_for_next_level, 20),
        progress.xp,
        progress.xp_for_next_level
    );

    let today = if progress.has_succeeded_today {
        "done today".green()
    } else {
        "not yet today".yellow()
    };
    println!("  Day streak: {} ({})", progress.day_streak, today);

    if let Some(stress) = progress.stress_level {
        println!("  Stress: {}", stress);
    }
    if let Some(last) = progress.last_success_at {
        println!("  Last success: {}", last.format("%Y-%m-%d %H:%M UTC").to_string().dimmed());
    }
}

/// Text bar of `xp` out of `per_level`, `width` cells wide
fn xp_bar(xp: i64, per_level: i64, width: usize) -> String {
    let filled = if per_level <= 0 {
        0
    } else {
        let ratio = xp.clamp(0, per_level) as f64 / per_level as f64;
        (ratio * width as f64).round() as usize
    };

    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xp_bar() {
        assert_eq!(xp_bar(0, 100, 10), "[----------]");
        assert_eq!(xp_bar(30, 100, 10), "[###-------]");
        assert_eq!(xp_bar(99, 100, 10), "[##########]");
        assert_eq!(xp_bar(250, 100, 4), "[####]");
        assert_eq!(xp_bar(10, 0, 4), "[----]");
    }

    #[test]
    fn test_cli_parses_complete() {
        let cli = Cli::try_parse_from([
            "stride",
            "complete",
            "7",
            "--key",
            "6f1c2e9a-3b7d-4c5e-8f10-2a3b4c5d6e7f",
            "-p",
            "mali",
        ])
        .unwrap();

        match cli.command {
            Commands::Complete {
                activity_id,
                key,
                profile,
            } => {
                assert_eq!(activity_id, 7);
                assert!(key.is_some());
                assert_eq!(profile.as_deref(), Some("mali"));
            }
            _ => panic!("expected complete command"),
        }
    }

    #[test]
    fn test_cli_parses_lifestyle_filter() {
        let cli = Cli::try_parse_from(["stride", "activities", "--lifestyle", "1,2"]).unwrap();
        match cli.command {
            Commands::Activities { lifestyle } => assert_eq!(lifestyle, vec![1, 2]),
            _ => panic!("expected activities command"),
        }
    }
}
