//! Implementation of the `dsl-exec locate` command.
//!
//! Prints every executor candidate in search order, whether it exists, and
//! which binary `run` would launch.

use crate::cli::LocateArgs;
use crate::error::{DslExecError, Result};
use crate::executor::{Dispatcher, LocateReport};
use std::io::{self, Write};

/// Execute the `dsl-exec locate` command.
pub fn cmd_locate(args: LocateArgs, dispatcher: &Dispatcher) -> Result<()> {
    let report = dispatcher.report();
    let stdout = io::stdout();
    write_report(&report, args.json, &mut stdout.lock())
}

fn write_report<W: Write>(report: &LocateReport, json: bool, out: &mut W) -> Result<()> {
    let rendered = if json {
        serde_json::to_string_pretty(report)
            .map_err(|e| DslExecError::IoError(format!("failed to serialize report: {}", e)))?
    } else {
        render_text(report)
    };

    writeln!(out, "{}", rendered)
        .map_err(|e| DslExecError::IoError(format!("failed to write report: {}", e)))
}

fn render_text(report: &LocateReport) -> String {
    let mut lines = vec![format!(
        "Executor search (relative to {}):",
        report.base_dir.display()
    )];

    for probe in &report.candidates {
        let status = if probe.exists { "found" } else { "missing" };
        lines.push(format!(
            "  [{:<7}] {} ({})",
            status,
            probe.candidate,
            probe.path.display()
        ));
    }

    lines.push(String::new());
    if report.fallback {
        lines.push(format!(
            "Resolved: {} (no candidate exists; looked up on PATH at launch)",
            report.resolved
        ));
    } else {
        lines.push(format!("Resolved: {}", report.resolved));
    }

    lines.join("\n")
}
