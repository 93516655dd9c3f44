//! Config subcommand: inspect and edit the persisted configuration

use crate::args::ConfigSubcommand;
use cineclass::config::Config;
use std::io::{self, Write};

/// Dispatch a config subcommand; bare `config` prints every value
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) {
    match subcommand {
        None | Some(ConfigSubcommand::Get { key: None }) => print_all(config),
        Some(ConfigSubcommand::Get { key: Some(key) }) => print_one(config, &key),
        Some(ConfigSubcommand::Set { key, value }) => set_value(config, &key, &value),
        Some(ConfigSubcommand::Unset { key }) => restore_default(config, defaults, &key),
        Some(ConfigSubcommand::Reset) => reset_everything(),
    }
}

fn print_all(config: &Config) {
    println!("\n=== Configuration ===\n");
    print!("{config}");
}

fn print_one(config: &Config, key: &str) {
    match config.get(key) {
        Some(value) => println!("{value}"),
        None => eprintln!("✗ Unknown config key: '{key}'"),
    }
}

fn set_value(config: &mut Config, key: &str, value: &str) {
    if let Err(err) = config.set(key, value) {
        eprintln!("{err}");
        std::process::exit(1);
    }
    persist(config);
    println!("✓ {key} = {value}");
}

fn restore_default(config: &mut Config, defaults: &Config, key: &str) {
    if let Err(err) = config.unset(key, defaults) {
        eprintln!("{err}");
        std::process::exit(1);
    }
    persist(config);
    println!("✓ {key} restored to its default");
}

/// Delete the config file after a y/n prompt so the next run starts fresh
fn reset_everything() {
    if !Config::get_config_file_path().exists() {
        println!("✓ Configuration is already at defaults");
        return;
    }

    print!("Reset all configuration to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer).ok();

    if confirmed(&answer) {
        if let Err(err) = Config::reset() {
            eprintln!("Failed to remove config file: {err}");
            std::process::exit(1);
        }
        println!("✓ Configuration reset to defaults");
    } else {
        println!("✗ Reset aborted");
    }
}

/// Whether a prompt answer counts as a yes
fn confirmed(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// Write the config file, exiting with an error when the save fails
fn persist(config: &Config) {
    if let Err(err) = config.save() {
        eprintln!("Failed to save config: {err}");
        std::process::exit(1);
    }
}
