use std::{
    env, fs,
    path::{Path, PathBuf},
    process::Command,
};

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{bail, eyre, Result};

const BIN_NAME: &str = "bio";

#[derive(Parser)]
#[command(name = "xtask")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build and install bio
    Release {
        /// Where to install the binary
        #[arg(value_enum)]
        place: Place,
    },
}

#[derive(Clone, ValueEnum)]
enum Place {
    /// Install to ~/.local/bin/bio
    Local,
    /// Install through `cargo install --path .`
    Cargo,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Release { place } => {
            let root = workspace_root()?;
            match place {
                Place::Local => release_local(&root),
                Place::Cargo => release_cargo(&root),
            }
        }
    }
}

fn release_local(root: &Path) -> Result<()> {
    run_cargo(root, &["build", "--release", "--bin", BIN_NAME])?;

    let home = env::var("HOME")?;
    let bin_dir = PathBuf::from(home).join(".local/bin");
    fs::create_dir_all(&bin_dir)?;

    let src = root.join("target/release").join(BIN_NAME);
    let dest = bin_dir.join(BIN_NAME);

    // unlink first so a running binary can be replaced (ETXTBSY)
    let _ = fs::remove_file(&dest);
    fs::copy(&src, &dest)?;

    println!("Installed {BIN_NAME} to {}", dest.display());
    Ok(())
}

fn release_cargo(root: &Path) -> Result<()> {
    run_cargo(root, &["install", "--path", ".", "--bin", BIN_NAME, "--force"])?;
    println!("Installed {BIN_NAME} with cargo install");
    Ok(())
}

fn run_cargo(root: &Path, args: &[&str]) -> Result<()> {
    let status = Command::new("cargo").args(args).current_dir(root).status()?;
    if !status.success() {
        bail!("cargo {} failed", args.join(" "));
    }
    Ok(())
}

fn workspace_root() -> Result<PathBuf> {
    let output = Command::new("cargo")
        .args(["locate-project", "--workspace", "--message-format=plain"])
        .output()?;

    if !output.status.success() {
        bail!("Failed to locate workspace root");
    }

    let path = String::from_utf8(output.stdout)?;
    let cargo_toml = PathBuf::from(path.trim());

    cargo_toml
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| eyre!("{} has no parent directory", cargo_toml.display()))
}
