use press_config::PressConfig;
use press_core::entities::PublishedArticle;

use crate::bootstrap;
use crate::cli::{GlobalFlags, ListCommands};
use crate::output::{article_lines, output};

/// Handle `press articles`.
pub async fn handle(
    action: &ListCommands,
    config: &PressConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ListCommands::List => {
            super::warn_if_ephemeral(config);
            let store = bootstrap::open_store(&config.store)?;
            let path = config.session.identity().articles_path();
            let mut articles = store
                .list(&path)
                .await?
                .iter()
                .map(|doc| doc.decode::<PublishedArticle>())
                .collect::<Result<Vec<_>, _>>()?;
            articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
            output(&articles[..], flags.format, article_lines)
        }
    }
}
