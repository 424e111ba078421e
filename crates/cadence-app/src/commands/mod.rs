//! Subcommand implementations. Output goes to the writer handed in, logs go
//! to stderr.

use std::io::{Read, Write};
use std::path::Path;

use anyhow::Context;
use cadence_core::config::Settings;
use cadence_engine::{ExpandOptions, Occurrence, PatternKind, StopKind, WireDecoder, expand_with};
use chrono::NaiveDateTime;
use serde_json::json;

use crate::cli::Command;


/// Occurrence filter applied to `expand` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

impl Window {
    /// Builds a window when at least one bound is given; open ends are unbounded.
    #[must_use]
    pub fn from_bounds(from: Option<NaiveDateTime>, to: Option<NaiveDateTime>) -> Option<Self> {
        if from.is_none() && to.is_none() {
            return None;
        }
        Some(Self {
            from: from.unwrap_or(NaiveDateTime::MIN),
            to: to.unwrap_or(NaiveDateTime::MAX),
        })
    }
}

/// ## Summary
/// Runs a parsed subcommand against the loaded settings.
///
/// ## Errors
/// Returns an error if the input cannot be read, decoded or expanded, or the
/// output cannot be written.
pub fn run(command: Command, settings: &Settings, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Command::Expand {
            input,
            pretty,
            from,
            to,
        } => {
            let payload = read_input(&input)?;
            let window = Window::from_bounds(from, to);
            expand_payload(&payload, settings, window, pretty, out)
        }
        Command::Kinds => list_kinds(out),
    }
}

/// ## Summary
/// Decodes a serie payload, expands it and writes the occurrences as a JSON array.
///
/// ## Errors
/// Returns an error if decoding, expansion or writing fails.
pub fn expand_payload(
    payload: &str,
    settings: &Settings,
    window: Option<Window>,
    pretty: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let decoder = WireDecoder::from(&settings.engine);
    let options = ExpandOptions::try_from(&settings.engine)?;

    let serie = decoder.decode(payload).context("Failed to decode serie payload")?;
    let expansion = expand_with(&serie, &options).context("Failed to expand serie")?;

    tracing::info!(
        occurrences = expansion.len(),
        cycles = expansion.cycles(),
        state = %expansion.state(),
        "Serie expanded"
    );

    let selected: Vec<&Occurrence> = match window {
        Some(window) => expansion.between(window.from, window.to).collect(),
        None => expansion.occurrences().iter().collect(),
    };
    if let Some(window) = window {
        tracing::debug!(
            from = %window.from,
            to = %window.to,
            selected = selected.len(),
            "Applied output window"
        );
    }

    if pretty {
        serde_json::to_writer_pretty(&mut *out, &selected)?;
    } else {
        serde_json::to_writer(&mut *out, &selected)?;
    }
    writeln!(out)?;
    Ok(())
}

/// ## Summary
/// Writes the supported pattern and stop condition tags as JSON.
///
/// ## Errors
/// Returns an error if writing fails.
pub fn list_kinds(out: &mut impl Write) -> anyhow::Result<()> {
    let kinds = json!({
        "patterns": PatternKind::ALL.map(PatternKind::as_str),
        "stops": StopKind::ALL.map(StopKind::as_str),
    });
    serde_json::to_writer_pretty(&mut *out, &kinds)?;
    writeln!(out)?;
    Ok(())
}

fn read_input(input: &Path) -> anyhow::Result<String> {
    if input == Path::new("-") {
        let mut payload = String::new();
        std::io::stdin()
            .read_to_string(&mut payload)
            .context("Failed to read payload from stdin")?;
        return Ok(payload);
    }
    std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read payload from {}", input.display()))
}
