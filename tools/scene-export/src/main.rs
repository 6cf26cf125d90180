//! scene-export - converts a 3D scene into a mesh blob and Lua descriptor
//!
//! Writes `meshdata.bin` and `scene.lua` into the working directory.

use clap::{CommandFactory, Parser};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use scene_export::{ExportConfig, Exporter};

#[derive(Parser)]
#[command(name = "scene-export")]
#[command(about = "Export a 3D scene to a mesh blob and Lua descriptor")]
#[command(disable_help_flag = true)]
struct Cli {
    /// Input scene file (OBJ/glTF/GLB)
    #[arg(allow_hyphen_values = true)]
    input: Option<PathBuf>,

    /// Anything after the input is ignored
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    extra: Vec<OsString>,
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if !cli.extra.is_empty() {
        tracing::debug!("Ignoring extra arguments {:?}", cli.extra);
    }

    let Some(input) = cli.input else {
        // Not an error: print usage and leave
        let _ = Cli::command().print_help();
        println!();
        return ExitCode::SUCCESS;
    };

    match run(&input) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::from(1)
        }
    }
}

fn run(input: &std::path::Path) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let config = ExportConfig::load_from_dir(&cwd)?;

    tracing::info!("Exporting {:?} -> {:?}", input, cwd);
    let summary = Exporter::new(config, &cwd).run(input)?;
    tracing::info!(
        "Done! {} meshes, {} materials",
        summary.meshes.len(),
        summary.materials.len()
    );
    Ok(())
}
