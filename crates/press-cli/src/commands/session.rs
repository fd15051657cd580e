//! `press session`: a line-oriented loop around one workflow controller.

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use press_config::PressConfig;
use press_workflow::{IdeaRequest, WorkflowController};
use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::session_line::{SessionCommand, SessionLine};
use crate::output::{article_lines, draft_text, idea_lines, output, trend_lines};

enum Flow {
    Continue,
    Quit,
}

/// Handle `press session`.
pub async fn handle(config: &PressConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let controller = Arc::new(bootstrap::build_controller(config)?);
    let follower = controller
        .follow_store()
        .await
        .context("failed to subscribe to the document store")?;

    if !flags.quiet {
        println!(
            "press session for r/{} (type 'help' for commands)",
            controller.settings().community
        );
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        if !flags.quiet {
            print!("press> ");
            std::io::stdout().flush().context("failed to flush stdout")?;
        }
        let Some(line) = lines.next_line().await.context("failed to read input")? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let parsed = match SessionLine::parse_line(&line) {
            Ok(parsed) => parsed,
            Err(error) => {
                let _ = error.print();
                continue;
            }
        };

        match run_command(&controller, parsed.command, flags).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(error) => eprintln!("error: {error:#}"),
        }
    }

    if let Some(follower) = follower {
        follower.abort();
    }
    Ok(())
}

async fn run_command(
    controller: &WorkflowController,
    command: SessionCommand,
    flags: &GlobalFlags,
) -> anyhow::Result<Flow> {
    let format = flags.format;
    match command {
        SessionCommand::Generate { trends } => {
            let request = if trends {
                let items = controller.fetch_trends().await?;
                if !flags.quiet {
                    println!("{}", trend_lines(&items));
                }
                IdeaRequest::with_trends(&items)
            } else {
                IdeaRequest::default()
            };
            let ideas = controller.generate_ideas(&request).await?;
            output(&ideas[..], format, idea_lines)?;
        }
        SessionCommand::Ideas { all } => {
            let ideas = if all {
                controller.ideas()
            } else {
                controller.pending_ideas()
            };
            output(&ideas[..], format, idea_lines)?;
        }
        SessionCommand::Approve { id } => {
            let draft = controller.approve_idea(&id).await?;
            let body = controller.cleaned_draft().unwrap_or_default();
            output(&draft, format, |draft| draft_text(draft, &body))?;
        }
        SessionCommand::Reject { id } => {
            let idea = controller.reject_idea(&id).await?;
            output(&idea, format, |idea| format!("rejected {}", idea.id))?;
        }
        SessionCommand::Draft { raw } => match controller.current_draft() {
            Some(draft) => {
                let body = if raw {
                    draft.content.clone()
                } else {
                    controller.cleaned_draft().unwrap_or_default()
                };
                output(&draft, format, |draft| draft_text(draft, &body))?;
            }
            None => println!("(no draft)"),
        },
        SessionCommand::Copy => {
            controller.copy_clean_content().await?;
        }
        SessionCommand::Export => {
            controller.export_draft().await?;
        }
        SessionCommand::Discard => {
            let draft = controller.discard_draft()?;
            output(&draft, format, |draft| format!("discarded draft for {}", draft.idea_id))?;
        }
        SessionCommand::Publish => {
            let article = controller.publish_draft().await?;
            output(&article, format, |article| format!("published {}", article.id))?;
        }
        SessionCommand::PublishRemote => {
            let publication = controller.publish_to_external_target().await?;
            let summary = json!({
                "status": publication.receipt.status,
                "article": publication.article,
            });
            output(&summary, format, |_| {
                format!(
                    "relay: {}\npublished {}",
                    publication.receipt.status, publication.article.id
                )
            })?;
        }
        SessionCommand::Articles => {
            output(&controller.articles()[..], format, article_lines)?;
        }
        SessionCommand::Sync => {
            controller.sync().await?;
            if !flags.quiet {
                println!(
                    "{} ideas, {} articles",
                    controller.ideas().len(),
                    controller.articles().len()
                );
            }
        }
        SessionCommand::Status => {
            let status = json!({
                "phase": controller.phase().as_str(),
                "running": controller.running().map(|kind| kind.as_str()),
                "last_error": controller.last_error(),
            });
            output(&status, format, |_| {
                let phase = format!("phase: {}", controller.phase());
                match controller.last_error() {
                    Some(error) => format!("{phase}\nlast error: {error}"),
                    None => phase,
                }
            })?;
        }
        SessionCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}
