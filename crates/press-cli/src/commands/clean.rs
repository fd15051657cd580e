use std::io::Read;

use anyhow::Context;
use press_clean::CleanContext;
use press_config::PressConfig;

use crate::bootstrap;
use crate::cli::{CleanArgs, GlobalFlags};
use crate::output::output;

/// Handle `press clean`.
pub fn handle(args: &CleanArgs, config: &PressConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let raw = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let cleaner = bootstrap::build_cleaner(&config.cleaner)?;
    let ctx = args
        .title
        .as_deref()
        .map_or_else(CleanContext::default, CleanContext::with_title);
    let cleaned = cleaner.clean(&raw, &ctx);
    tracing::debug!(before = raw.len(), after = cleaned.len(), "cleaned text");

    output(cleaned.as_str(), flags.format, ToString::to_string)
}
