use parley_taxonomy::TaxonomyEngine;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct IndustryList {
    industries: Vec<&'static str>,
}

pub fn industries(flags: &GlobalFlags) -> anyhow::Result<()> {
    output(
        &IndustryList {
            industries: TaxonomyEngine::available_industries(),
        },
        flags.format,
    )
}

/// Bare template for `industry`, or the org's merged definition when unset.
pub fn run(industry: Option<&str>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let definition = match industry {
        Some(industry) => TaxonomyEngine::template(industry)?,
        None => ctx.taxonomy()?.definition()?,
    };
    output(&definition, flags.format)
}
