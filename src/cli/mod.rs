//! CLI module
//!
//! Command-line interface for the launcher.

mod args;

pub use args::{Args, CollectionAction, Commands};

use anyhow::{Context, Result};
use browser_profile_launcher::Config;
use browser_profile_launcher::core::collection::CollectionManager;
use browser_profile_launcher::core::history::HistoryManager;
use browser_profile_launcher::core::launch;
use browser_profile_launcher::core::profile::{Profile, ProfileKey};
use browser_profile_launcher::core::registry::ProfileRegistry;
use browser_profile_launcher::server;

/// Run a subcommand
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::List { json } => list_profiles(json),
        Commands::Run { browser, directory } => run_profile(config, &browser, &directory),
        Commands::Serve { bind, port } => serve(config, bind, port).await,
        Commands::History { clear } => show_history(config, clear),
        Commands::Collection { action } => handle_collection(action),
    }
}

/// List all discovered profiles
pub fn list_profiles(json: bool) -> Result<()> {
    let registry = ProfileRegistry::discover();
    let profiles = registry.list();

    if json {
        println!("{}", serde_json::to_string_pretty(&profiles)?);
        return Ok(());
    }

    if profiles.is_empty() {
        println!("🔍 No browser profiles found.");
        return Ok(());
    }

    println!("🌐 Profiles ({}):", profiles.len());
    println!();
    for profile in &profiles {
        print_profile(profile);
    }

    Ok(())
}

fn print_profile(profile: &Profile) {
    let icon = if profile.ico_path.is_some() { "🖼" } else { "  " };
    println!(
        "   {} {:<24} {} ({})",
        icon,
        profile.name,
        profile.key(),
        profile.browser.display_name()
    );
}

/// Launch a profile directly
pub fn run_profile(config: &Config, browser: &str, directory: &str) -> Result<()> {
    let registry = ProfileRegistry::discover();
    let pid = launch::run(&registry, browser, directory, &config.browsers)?;
    println!("🚀 Launched {}/{} (PID: {})", browser, directory, pid);

    if let Some(profile) = registry.find(browser, directory) {
        let mut history = HistoryManager::new(config.general.history_limit)?;
        history.record(profile.key())?;
    }

    Ok(())
}

/// Run the icon server in the foreground
pub async fn serve(config: &Config, bind: Option<String>, port: Option<u16>) -> Result<()> {
    let mut server_config = config.server.clone();
    if let Some(bind) = bind {
        server_config.bind = bind;
    }
    if let Some(port) = port {
        server_config.port = port;
    }

    let registry = ProfileRegistry::discover();
    let listener = server::bind(&server_config).await?;
    println!(
        "🖼  Serving {} profile icon(s) on http://{}",
        registry.len(),
        listener.local_addr()?
    );
    server::serve(listener, registry).await
}

/// Show (or clear) the launch history
pub fn show_history(config: &Config, clear: bool) -> Result<()> {
    let mut history = HistoryManager::new(config.general.history_limit)?;

    if clear {
        history.clear()?;
        println!("✅ History cleared.");
        return Ok(());
    }

    if history.entries().is_empty() {
        println!("🕘 No launches yet.");
        return Ok(());
    }

    println!("🕘 Recent launches:");
    for entry in history.entries() {
        println!(
            "   {}  {}",
            entry.launched_at.format("%Y-%m-%d %H:%M"),
            entry.key
        );
    }
    Ok(())
}

/// Handle collection subcommands
pub fn handle_collection(action: CollectionAction) -> Result<()> {
    let mut manager = CollectionManager::new()?;

    match action {
        CollectionAction::List => {
            if manager.names().is_empty() {
                println!("📁 No collections.");
                return Ok(());
            }
            for name in manager.names() {
                let keys = manager.data().keys(name);
                println!("📁 {} ({})", name, keys.len());
                for key in keys {
                    println!("   {}", key);
                }
            }
        }
        CollectionAction::Add { name } => {
            let name = manager.add(&name)?;
            println!("✅ Created collection '{}'", name);
        }
        CollectionAction::Remove { name } => {
            manager.remove(&name)?;
            println!("✅ Removed collection '{}'", name);
        }
        CollectionAction::Assign { name, profile } => {
            let key = parse_key(&profile)?;
            manager.assign(&key, &name)?;
            println!("✅ Added {} to '{}'", key, name);
        }
        CollectionAction::Unassign { name, profile } => {
            let key = parse_key(&profile)?;
            manager.unassign(&key, &name)?;
            println!("✅ Removed {} from '{}'", key, name);
        }
    }

    Ok(())
}

fn parse_key(s: &str) -> Result<ProfileKey> {
    s.parse::<ProfileKey>()
        .with_context(|| format!("Invalid profile '{}'", s))
}
