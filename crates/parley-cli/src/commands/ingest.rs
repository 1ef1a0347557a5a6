use anyhow::Context;
use parley_config::IngestConfig;
use parley_core::entities::{ConversationCapsule, DeclaredParticipant};
use parley_core::enums::FormatHint;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::IngestArgs;
use crate::commands::shared::input::read_text;
use crate::commands::shared::parse::{parse_hint, parse_participant};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct IngestedFile {
    file: String,
    capsule: ConversationCapsule,
}

/// Handle `parley ingest`. Files are processed concurrently on the blocking pool.
pub async fn handle(
    args: &IngestArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let hint = parse_hint(args.hint.as_deref())?;
    let declared = args
        .participants
        .iter()
        .map(|raw| parse_participant(raw))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut results = ingest_files(&args.files, hint, &declared, &ctx.config.ingest).await?;
    if results.len() == 1 {
        let single = results.remove(0);
        return output(&single.capsule, flags.format);
    }
    output(&results, flags.format)
}

async fn ingest_files(
    files: &[String],
    hint: Option<FormatHint>,
    declared: &[DeclaredParticipant],
    config: &IngestConfig,
) -> anyhow::Result<Vec<IngestedFile>> {
    let mut set = tokio::task::JoinSet::new();
    for (idx, file) in files.iter().enumerate() {
        let file = file.clone();
        let declared = declared.to_vec();
        let config = config.clone();
        set.spawn_blocking(move || {
            let result = read_text(&file).map(|text| {
                let capsule = parley_ingest::ingest(&text, hint, &declared, &config);
                tracing::debug!(
                    file = %file,
                    format = %capsule.source_format,
                    messages = capsule.metadata.message_count,
                    "ingested"
                );
                IngestedFile { file, capsule }
            });
            (idx, result)
        });
    }

    let mut slots: Vec<Option<IngestedFile>> = files.iter().map(|_| None).collect();
    while let Some(joined) = set.join_next().await {
        let (idx, result) = joined.context("ingest task failed")?;
        slots[idx] = Some(result?);
    }
    Ok(slots.into_iter().flatten().collect())
}
