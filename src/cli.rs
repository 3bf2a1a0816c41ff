use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "font-registry")]
#[command(version)]
#[command(about = "Register font files and print the resulting @font-face rules", long_about = None)]
#[command(after_help = "\
CONFIGURATION:
    Settings are read from <config dir>/font-registry/config.toml unless
    --config is given:

        [registry]
        duplicates = \"stack\"   # or \"replace\"
        handles = \"release\"    # or \"retain\"
        max_rules = 128")]
pub struct Cli {
    /// Font files to register, in order
    pub files: Vec<PathBuf>,

    /// Remove a font by name after registering the files (repeatable)
    #[arg(long = "remove", value_name = "NAME")]
    pub remove: Vec<String>,

    /// Read settings from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print only the active font names
    #[arg(long)]
    pub list_only: bool,
}
