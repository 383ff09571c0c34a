//! CLI argument definitions
//!
//! Uses clap derive macros for argument parsing.

use clap::{Parser, Subcommand};

/// Browser Profile Launcher - launch a browser with a chosen profile
#[derive(Parser, Debug)]
#[command(name = "browser-profile-launcher")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommands (none starts the GUI)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List discovered browser profiles
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Launch a browser with the given profile directory
    Run {
        /// Browser id (chrome, chrome-beta, chrome-canary, chromium, edge, brave, vivaldi)
        browser: String,
        /// Profile directory, e.g. "Profile 1"
        directory: String,
    },

    /// Run only the icon server
    Serve {
        /// Address to bind (defaults to the config value)
        #[arg(long)]
        bind: Option<String>,
        /// Port to listen on (defaults to the config value)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show launch history
    History {
        /// Forget all launches
        #[arg(long)]
        clear: bool,
    },

    /// Manage collections
    Collection {
        #[command(subcommand)]
        action: CollectionAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum CollectionAction {
    /// List collections and their profiles
    List,
    /// Create a collection
    Add { name: String },
    /// Delete a collection
    Remove { name: String },
    /// Add a profile (<browser>/<directory>) to a collection
    Assign { name: String, profile: String },
    /// Remove a profile (<browser>/<directory>) from a collection
    Unassign { name: String, profile: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_gui() {
        let args = Args::try_parse_from(["browser-profile-launcher"]).unwrap();
        assert!(args.command.is_none());
        assert!(!args.verbose);
    }

    #[test]
    fn test_run_arguments() {
        let args =
            Args::try_parse_from(["browser-profile-launcher", "-v", "run", "edge", "Profile 1"])
                .unwrap();
        assert!(args.verbose);
        match args.command {
            Some(Commands::Run { browser, directory }) => {
                assert_eq!(browser, "edge");
                assert_eq!(directory, "Profile 1");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_collection_assign() {
        let args = Args::try_parse_from([
            "browser-profile-launcher",
            "collection",
            "assign",
            "Work",
            "chrome/Default",
        ])
        .unwrap();
        assert!(matches!(
            args.command,
            Some(Commands::Collection {
                action: CollectionAction::Assign { .. }
            })
        ));
    }
}
