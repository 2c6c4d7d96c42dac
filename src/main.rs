mod cli;

use netbox_plugins::config;
use netbox_plugins::logging;
use netbox_plugins::plugin;

use anyhow::{anyhow, Result};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use netbox_plugins::netbox_plugin_interface::INTERFACE_VERSION;
use plugin::config::generate_settings_template;
use plugin::{validate_plugin, LoadedPlugins, PluginLoader, PluginManager, Registry};
use std::path::PathBuf;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;

    // Guard must be kept alive until exit
    let _log_guard = logging::init_logging(config.log_dir.as_deref(), "info")?;
    tracing::debug!(
        "nbplugins starting, host version {}, plugin interface {}",
        config.host_version,
        INTERFACE_VERSION
    );

    let loader = build_loader(&config, cli.plugins_dir)?;

    match cli.command {
        Commands::Check => handle_check(&mut config, &loader),
        Commands::List => handle_list(&config, &loader),
        Commands::Registry { json } => handle_registry(&mut config, &loader, json),
        Commands::Settings { name } => handle_settings(&config, &loader, &name),
        Commands::Init { name } => handle_init(&loader, &name),
    }
}

/// Discover manifest-declared plugins and make them available for loading.
fn build_loader(config: &Config, plugins_dir: Option<PathBuf>) -> Result<PluginLoader> {
    let plugins_dir = match plugins_dir {
        Some(dir) => dir,
        None => config.plugins_dir()?,
    };

    let mut loader = PluginLoader::new(config.host_version.clone());
    PluginManager::discover(&plugins_dir)?.register_all(&mut loader)?;
    tracing::debug!(
        "{} plugin(s) available in {:?}",
        loader.available().len(),
        plugins_dir
    );
    Ok(loader)
}

fn load_enabled(config: &mut Config, loader: &PluginLoader) -> Result<LoadedPlugins> {
    let loaded = loader.load(&config.plugins, &mut config.plugins_config)?;
    tracing::info!("Loaded {} plugin(s)", loaded.plugins.len());
    Ok(loaded)
}

fn handle_check(config: &mut Config, loader: &PluginLoader) -> Result<()> {
    let loaded = load_enabled(config, loader)?;

    if loaded.plugins.is_empty() {
        println!("No plugins enabled.");
        return Ok(());
    }

    for plugin in &loaded.plugins {
        println!(
            "\x1b[32m[OK]\x1b[0m {} ({}) v{} at /plugins/{}/",
            plugin.name, plugin.display_name, plugin.version, plugin.base_url
        );
    }
    println!();
    println!("Installed apps: {}", loaded.installed_apps.join(", "));
    if !loaded.middleware.is_empty() {
        println!("Middleware:     {}", loaded.middleware.join(", "));
    }
    if !loaded.queues.is_empty() {
        println!("Queues:         {}", loaded.queues.join(", "));
    }
    Ok(())
}

fn handle_list(config: &Config, loader: &PluginLoader) -> Result<()> {
    let available = loader.available();
    if available.is_empty() {
        println!("No plugins installed.");
        return Ok(());
    }

    println!("{:<30} {:<12} {:<10} VERBOSE NAME", "NAME", "VERSION", "STATUS");
    println!("{}", "-".repeat(70));

    for name in available {
        let Some(plugin) = loader.get(name) else {
            continue;
        };
        let plugin_config = plugin.config();
        let status = if config.plugins.iter().any(|enabled| enabled == name) {
            "enabled"
        } else {
            "disabled"
        };
        println!(
            "{:<30} {:<12} {:<10} {}",
            name,
            plugin_config.version,
            status,
            plugin_config.display_name()
        );
    }

    for name in &config.plugins {
        if loader.get(name).is_none() {
            println!("{:<30} {:<12} {:<10}", name, "-", "missing");
        }
    }
    Ok(())
}

fn handle_registry(config: &mut Config, loader: &PluginLoader, json: bool) -> Result<()> {
    let loaded = load_enabled(config, loader)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&loaded.registry.summary())?);
    } else {
        print_registry(&loaded.registry);
    }
    Ok(())
}

fn print_registry(registry: &Registry) {
    if registry.is_empty() {
        println!("Registry is empty.");
        return;
    }

    if !registry.menus().is_empty() {
        println!("Menus:");
        for menu in registry.menus() {
            println!("  {} [{}]", menu.label, menu.icon_class);
            for group in &menu.groups {
                println!("    {}", group.label);
                for item in &group.items {
                    println!("      {} -> {}", item.link_text, item.link);
                }
            }
        }
    }

    if !registry.menu_items().is_empty() {
        println!("Menu items:");
        for (section, items) in registry.menu_items() {
            println!("  {}", section);
            for item in items {
                println!("    {} -> {}", item.link_text, item.link);
            }
        }
    }

    if !registry.template_extensions().is_empty() {
        println!("Template extensions:");
        for (model, classes) in registry.template_extensions() {
            let names: Vec<&str> = classes.iter().map(|class| class.name()).collect();
            println!("  {}: {}", model, names.join(", "));
        }
    }

    if !registry.graphql_schemas().is_empty() {
        println!("GraphQL schemas:");
        for schema in registry.graphql_schemas() {
            println!("  {}", schema.name);
        }
    }

    if !registry.preferences().is_empty() {
        println!("User preferences:");
        for (plugin, preferences) in registry.preferences() {
            let keys: Vec<&str> = preferences.keys().map(String::as_str).collect();
            println!("  {}: {}", plugin, keys.join(", "));
        }
    }

    if !registry.search_indexes().is_empty() {
        println!("Search indexes:");
        for model in registry.search_indexes().keys() {
            println!("  {}", model);
        }
    }
}

fn handle_settings(config: &Config, loader: &PluginLoader, name: &str) -> Result<()> {
    let plugin = loader.get(name).ok_or_else(|| {
        anyhow!(
            "Plugin '{}' not found. Run 'nbplugins list' to see installed plugins.",
            name
        )
    })?;

    let mut settings = config.plugins_config.get(name).cloned().unwrap_or_default();
    validate_plugin(plugin.config(), &mut settings, &config.host_version)?;

    print!("{}", toml::to_string_pretty(&settings)?);
    Ok(())
}

fn handle_init(loader: &PluginLoader, name: &str) -> Result<()> {
    let plugin = loader.get(name).ok_or_else(|| {
        anyhow!(
            "Plugin '{}' not found. Run 'nbplugins list' to see installed plugins.",
            name
        )
    })?;

    print!("{}", generate_settings_template(plugin.config()));
    Ok(())
}
