use press_core::entities::{Draft, Idea, PublishedArticle};
use schemars::schema_for;

use crate::cli::{GlobalFlags, OutputFormat, SchemaArgs, SchemaType};

/// Handle `press schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = match args.type_name {
        SchemaType::Idea => schema_for!(Idea),
        SchemaType::Draft => schema_for!(Draft),
        SchemaType::Article => schema_for!(PublishedArticle),
    };
    let rendered = match flags.format {
        OutputFormat::Raw => serde_json::to_string(&schema)?,
        OutputFormat::Json | OutputFormat::Text => serde_json::to_string_pretty(&schema)?,
    };
    println!("{rendered}");
    Ok(())
}
