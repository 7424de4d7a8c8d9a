use crate::cmd::bio_tui::keybindings::{HELP_SECTIONS, PREFIX_ROUTES};
use crate::cmd::bio_tui::palette::PaletteState;
use crate::cmd::bio_tui::state::Route;
use crate::config::Config;
use clap::{Parser, Subcommand};
use colored::Colorize;
use eyre::{Context as _, Result};
use itertools::Itertools;
use log::debug;
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "bio", author, version, about, styles = crate::cli::get_styles())]
pub struct Bio {
    /// TOML config file with timing and seed content
    #[arg(long, env = "BIO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Route to open on start (/, /links, /blogs, /analytics)
    #[arg(long, env = "BIO_ROUTE")]
    pub route: Option<String>,

    /// How long a pending `g` waits for its second key
    #[arg(long, env = "BIO_PREFIX_TIMEOUT_MS")]
    pub prefix_timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub subcommand: Option<BioCmd>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum BioCmd {
    /// Print every keyboard shortcut
    #[command(visible_alias = "k")]
    Keys,

    /// Print the commands the palette shows for a query
    #[command(visible_alias = "p")]
    Palette {
        /// Case-insensitive substring to filter by
        query: Option<String>,
    },
}

pub fn run(args: &[OsString]) -> Result<()> {
    debug!("bio args: {args:?}");
    let flags = Bio::parse_from(args);
    run_with_flags(flags)
}

pub fn run_with_flags(flags: Bio) -> Result<()> {
    match flags.subcommand {
        None => {
            let config = Config::load(flags.config.as_deref())?;
            let route = start_route(&config, flags.route.as_deref())?;
            let timeout = flags
                .prefix_timeout_ms
                .map(Duration::from_millis)
                .unwrap_or_else(|| config.prefix_timeout());
            debug!("start route {route}, prefix timeout {timeout:?}");

            crate::cmd::bio_tui::run(&config, route, timeout)
        }
        Some(BioCmd::Keys) => {
            print!("{}", keys_text());
            Ok(())
        }
        Some(BioCmd::Palette { query }) => {
            print!("{}", palette_text(query.as_deref().unwrap_or("")));
            Ok(())
        }
    }
}

/// `--route` wins over the config file
fn start_route(config: &Config, flag: Option<&str>) -> Result<Route> {
    match flag {
        Some(path) => path.parse().wrap_err("invalid --route"),
        None => config.start_route(),
    }
}

fn keys_text() -> String {
    let mut out = String::new();

    for section in HELP_SECTIONS {
        match section.prefix {
            Some(prefix) => {
                out.push_str(&format!("{} {}\n", section.title.bold(), prefix.dimmed()));
            }
            None => out.push_str(&format!("{}\n", section.title.bold())),
        }
        for binding in section.bindings {
            let keys = binding.keys.iter().join("/");
            out.push_str(&format!("  {} {}\n", format!("{keys:<10}").cyan(), binding.label));
        }
        out.push('\n');
    }

    let chords = PREFIX_ROUTES
        .iter()
        .map(|(key, route)| format!("g {key} → {}", route.path()))
        .join(", ");
    out.push_str(&format!("{}\n", chords.dimmed()));
    out
}

fn palette_text(query: &str) -> String {
    let mut palette = PaletteState::new();
    palette.set_query(query);
    let matches = palette.filtered();
    if matches.is_empty() {
        return format!("{}\n", "No commands found".dimmed());
    }

    let width = matches.iter().map(|c| c.label.len()).max().unwrap_or(0);
    matches
        .iter()
        .map(|command| {
            let shortcut = command.shortcut.unwrap_or("");
            format!("{:<width$}  {}\n", command.label, shortcut.green())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Bio {
        Bio::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_flags_and_aliases() {
        let flags = parse(&["bio", "--route", "/blogs", "--prefix-timeout-ms", "800", "k"]);
        assert_eq!(flags.route.as_deref(), Some("/blogs"));
        assert_eq!(flags.prefix_timeout_ms, Some(800));
        assert!(matches!(flags.subcommand, Some(BioCmd::Keys)));

        let flags = parse(&["bio", "p", "blog"]);
        assert!(matches!(
            flags.subcommand,
            Some(BioCmd::Palette { query: Some(ref q) }) if q == "blog"
        ));
    }

    #[test]
    fn test_route_flag_overrides_config() {
        let config = Config::parse(r#"start_route = "/links""#).unwrap();
        assert_eq!(start_route(&config, None).unwrap(), Route::Links);
        assert_eq!(start_route(&config, Some("analytics")).unwrap(), Route::Analytics);
        assert!(start_route(&config, Some("/nope")).is_err());
    }

    #[test]
    fn test_palette_text() {
        colored::control::set_override(false);
        let out = palette_text("BLOG");
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains("g b"));

        assert!(palette_text("zzz").contains("No commands found"));
        assert_eq!(palette_text("").lines().count(), 5);
    }

    #[test]
    fn test_keys_text_lists_every_binding() {
        colored::control::set_override(false);
        let out = keys_text();
        for section in HELP_SECTIONS {
            assert!(out.contains(section.title));
            for binding in section.bindings {
                assert!(out.contains(binding.label));
            }
        }
        assert!(out.contains("g l → /links"));
    }
}
