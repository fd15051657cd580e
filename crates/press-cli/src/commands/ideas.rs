use press_config::PressConfig;
use press_core::entities::Idea;

use crate::bootstrap;
use crate::cli::{GlobalFlags, ListCommands};
use crate::output::{idea_lines, output};

/// Handle `press ideas`.
pub async fn handle(
    action: &ListCommands,
    config: &PressConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ListCommands::List => {
            super::warn_if_ephemeral(config);
            let store = bootstrap::open_store(&config.store)?;
            let path = config.session.identity().ideas_path();
            let ideas = store
                .list(&path)
                .await?
                .iter()
                .map(|doc| doc.decode::<Idea>())
                .collect::<Result<Vec<_>, _>>()?;
            output(&ideas[..], flags.format, idea_lines)
        }
    }
}
