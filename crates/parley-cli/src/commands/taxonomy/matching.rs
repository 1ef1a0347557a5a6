use parley_taxonomy::{KeywordEntry, match_roles, match_topics};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::input::read_text;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct KeywordHit {
    key: String,
    display_name: String,
    custom: bool,
}

#[derive(Debug, Serialize)]
struct MatchResponse {
    industry: String,
    topics: Vec<KeywordHit>,
    roles: Vec<KeywordHit>,
}

pub fn run(file: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let text = read_text(file)?;
    let definition = ctx.taxonomy()?.definition()?;
    let response = MatchResponse {
        industry: definition.industry.clone(),
        topics: hits(match_topics(&definition, &text)),
        roles: hits(match_roles(&definition, &text)),
    };
    output(&response, flags.format)
}

fn hits(entries: Vec<&KeywordEntry>) -> Vec<KeywordHit> {
    entries
        .into_iter()
        .map(|entry| KeywordHit {
            key: entry.key.clone(),
            display_name: entry.display_name.clone(),
            custom: entry.custom,
        })
        .collect()
}
