//! Command implementations for dsl-exec.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod locate;
mod run;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::error::Result;
use crate::executor::Dispatcher;

/// Dispatch a command to its implementation.
///
/// Config only affects `run`, so `locate` still works when the config file is
/// broken.
pub fn dispatch(cli: Cli) -> Result<()> {
    let dispatcher = Dispatcher::from_current_dir()?;

    match cli.command {
        Command::Run(args) => {
            let config = Config::load_or_default(cli.config.as_deref(), dispatcher.base_dir())?;
            run::cmd_run(args, &config, dispatcher)
        }
        Command::Locate(args) => locate::cmd_locate(args, &dispatcher),
    }
}
