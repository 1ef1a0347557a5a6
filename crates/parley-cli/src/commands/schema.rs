use anyhow::Context;
use parley_schema::SchemaRegistry;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SchemaList {
    schemas: Vec<&'static str>,
}

/// Handle `parley schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let registry = SchemaRegistry::new();
    if args.list {
        return output(
            &SchemaList {
                schemas: registry.list(),
            },
            flags.format,
        );
    }

    let name = args
        .type_name
        .as_deref()
        .context("a schema name is required unless --list is given")?;
    let schema = registry.get(name).with_context(|| {
        format!(
            "unknown schema '{name}'. Available: {}",
            registry.list().join(", ")
        )
    })?;
    output(schema, flags.format)
}
