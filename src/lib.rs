pub mod cli;
pub mod config;
pub mod registry;
pub mod resource;
pub mod scope;
pub mod stylesheet;

pub use registry::{FontFile, FontName, FontRegistry, RegistryError};
pub use scope::{try_use_fonts, use_fonts, FontProvider, FontsHandle, ScopeError};

use std::io::{self, Write};

use log::info;

use crate::cli::Cli;
use crate::config::Config;

pub fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = io::stdout();
    let stderr = io::stderr();
    run_with_output(cli, &mut stdout.lock(), &mut stderr.lock())
}

/// Runs the CLI, writing fonts and rules to `out` and per-file problems to
/// `err`. A file that fails to register does not stop the run.
pub fn run_with_output(
    cli: Cli,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    info!(
        "Registry settings: duplicates={:?}, handles={:?}",
        config.registry.duplicates, config.registry.handles
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let provider = FontProvider::new(FontRegistry::in_memory(config.registry));
    let _scope = provider.enter();
    let fonts = use_fonts();

    let failures = runtime.block_on(async {
        let mut failures = Vec::new();
        for path in &cli.files {
            if let Err(e) = fonts.add_font_path(path).await {
                failures.push(format!("Skipping {}: {}", path.display(), e));
            }
        }
        failures
    });
    for failure in &failures {
        writeln!(err, "{}", failure)?;
    }

    for name in &cli.remove {
        if fonts.remove_custom_font(name) == 0 {
            writeln!(err, "No active font named '{}'", name)?;
        }
    }

    for name in fonts.custom_fonts().iter() {
        writeln!(out, "{}", name)?;
    }

    if !cli.list_only {
        let rules: Vec<String> =
            fonts.with_registry(|r| r.style_sheet().rules().into_iter().map(String::from).collect());
        for rule in rules {
            writeln!(out)?;
            writeln!(out, "{}", rule)?;
        }
    }

    Ok(())
}
