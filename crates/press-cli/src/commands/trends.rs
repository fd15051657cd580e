use anyhow::Context;
use press_client::RelayClient;
use press_config::PressConfig;

use crate::cli::GlobalFlags;
use crate::output::{output, trend_lines};

/// Handle `press trends`.
pub async fn handle(config: &PressConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let client = RelayClient::new(&config.relay).context("failed to build relay client")?;
    let mut trends = client
        .trends(&config.community.name)
        .await
        .with_context(|| format!("failed to fetch trends for r/{}", config.community.name))?;
    trends.truncate(config.community.trend_limit);
    output(&trends[..], flags.format, trend_lines)
}
