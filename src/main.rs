//! depcheck CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use depcheck::cli::{Cli, CommandDispatcher, CommandOutput};
use depcheck::config::find_project_root;
use depcheck::ui::DepcheckTheme;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("depcheck=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("depcheck=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("depcheck starting with args: {:?}", cli);

    // Handle --no-color
    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }
    let theme = DepcheckTheme::detect();

    // Determine project root; command-line paths stay relative to the
    // current directory unless --project was given
    let cwd = std::env::current_dir().unwrap_or_default();
    let working_dir = cli.project.clone().unwrap_or_else(|| cwd.clone());
    let project_root = cli
        .project
        .clone()
        .or_else(|| find_project_root(&cwd))
        .unwrap_or(cwd);

    let dispatcher =
        CommandDispatcher::new(project_root, cli.config.clone()).with_working_dir(working_dir);

    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let mut output = CommandOutput {
        out: &mut stdout,
        err: &mut stderr,
        theme: theme.clone(),
    };

    match dispatcher.dispatch(&cli, &mut output) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            eprintln!("{}", theme.format_error(&format!("Error: {}", e)));
            ExitCode::from(1)
        }
    }
}
