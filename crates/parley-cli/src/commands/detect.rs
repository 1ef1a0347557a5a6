use parley_core::enums::{FormatHint, SourceFormat};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::DetectArgs;
use crate::commands::shared::input::read_text;
use crate::commands::shared::parse::parse_hint;
use crate::output::output;

#[derive(Debug, Serialize)]
struct DetectResponse {
    source: String,
    detected: SourceFormat,
    hint: Option<FormatHint>,
    resolved: SourceFormat,
}

/// Handle `parley detect`.
pub fn handle(args: &DetectArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let hint = parse_hint(args.hint.as_deref())?;
    let text = read_text(&args.file)?;
    output(&describe(&args.file, &text, hint), flags.format)
}

fn describe(source: &str, text: &str, hint: Option<FormatHint>) -> DetectResponse {
    DetectResponse {
        source: source.to_string(),
        detected: parley_ingest::detect(text),
        hint,
        resolved: parley_ingest::resolve_format(text, hint),
    }
}
