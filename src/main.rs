//! selui - terminal host for the selection controller
//!
//! # Usage
//!
//! ```bash
//! # Browse records interactively (s: select, space: toggle, c/d/e: actions)
//! selui browse items.json
//!
//! # Delete without the confirmation dialog, saving the result
//! selui browse items.json --no-confirm -o items.json
//!
//! # Copy two records without a TUI; new ids are printed
//! selui run items.json -s a1,a2 copy -o items.json
//!
//! # Show the effective configuration
//! selui config show
//! ```
//!
//! # Configuration
//!
//! Configuration is read from the user's config directory
//! (`~/.config/selection-ui/config.toml` on Linux) or from `--config`.
//! Log records go to a file (`[log] file`), never to the terminal.

use selection_ui::{
    Result,
    cli::{Cli, Commands},
    commands, logging,
};

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    let config = cli.load_config()?;

    if !matches!(cli.command, Commands::Config { .. }) {
        logging::init(&config.log)?;
    }

    match &cli.command {
        Commands::Browse {
            items,
            no_confirm,
            output,
        } => commands::browse(&config, items, *no_confirm, output.as_deref()),
        Commands::Run {
            items,
            select,
            action,
            yes,
            output,
        } => commands::run(
            &config,
            items,
            select,
            (*action).into(),
            *yes,
            output.as_deref(),
            cli.quiet,
        ),
        Commands::Config { command } => {
            commands::config(command, &cli.config_path()?, &config, cli.quiet)
        }
    }
}
