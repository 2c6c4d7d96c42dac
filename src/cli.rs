use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "nbplugins")]
#[command(about = "Validate plugins and inspect the extensions they register", long_about = None)]
pub struct Cli {
    /// Configuration file (default: ~/.netbox-plugins/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding manifest-declared plugins
    #[arg(long, global = true)]
    pub plugins_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate and initialize every enabled plugin
    Check,
    /// List available plugins and whether they are enabled
    List,
    /// Load the enabled plugins and print the resulting registry
    Registry {
        /// Print the registry as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a plugin's settings with defaults applied
    Settings {
        /// Plugin name
        name: String,
    },
    /// Print a settings template for a plugin
    Init {
        /// Plugin name
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_registry_json() {
        let cli = Cli::try_parse_from(["nbplugins", "registry", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Registry { json: true }));
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_global_config_flag_after_subcommand() {
        let cli =
            Cli::try_parse_from(["nbplugins", "settings", "acme", "--config", "/tmp/c.toml"])
                .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
        assert!(matches!(cli.command, Commands::Settings { ref name } if name == "acme"));
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Cli::try_parse_from(["nbplugins"]).is_err());
    }
}
