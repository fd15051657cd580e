//! At most one state-mutating operation runs at a time.

mod support;

use std::sync::Arc;

use press_workflow::{
    IdeaRequest, OperationKind, WorkflowController, WorkflowError, WorkflowPhase,
    WorkflowSettings,
};
use support::{BlockingGenerator, RecordingClipboard, RecordingRelay, ScriptedGenerator, two_ideas};

fn blocking_controller() -> (Arc<ScriptedGenerator>, Arc<BlockingGenerator>, Arc<WorkflowController>) {
    let scripted = ScriptedGenerator::new();
    let blocking = BlockingGenerator::wrap(scripted.clone());
    let controller = WorkflowController::builder(
        WorkflowSettings::default(),
        blocking.clone(),
        RecordingClipboard::new(),
        RecordingRelay::new(),
    )
    .build();
    (scripted, blocking, Arc::new(controller))
}

#[tokio::test]
async fn mutations_are_rejected_while_generating() {
    let (scripted, blocking, controller) = blocking_controller();
    scripted.push_ideas(Ok(two_ideas()));

    let task = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.generate_ideas(&IdeaRequest::default()).await })
    };
    blocking.entered.notified().await;

    assert!(controller.is_loading());
    assert_eq!(controller.running(), Some(OperationKind::GenerateIdeas));

    let err = controller
        .generate_ideas(&IdeaRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::Busy {
            running: OperationKind::GenerateIdeas
        }
    ));
    assert!(matches!(
        controller.approve_idea("ide-any").await,
        Err(WorkflowError::Busy { .. })
    ));
    assert!(matches!(
        controller.publish_draft().await,
        Err(WorkflowError::Busy { .. })
    ));
    assert!(matches!(
        controller.discard_draft(),
        Err(WorkflowError::Busy { .. })
    ));
    assert!(matches!(
        controller.fetch_trends().await,
        Err(WorkflowError::Busy { .. })
    ));
    assert!(matches!(
        controller.sync().await,
        Err(WorkflowError::Busy { .. })
    ));
    // A rejected call does not touch the in-flight operation's error slot.
    assert!(controller.last_error().is_none());

    blocking.release.notify_one();
    let ideas = task.await.unwrap().unwrap();

    assert_eq!(ideas.len(), 2);
    assert!(!controller.is_loading());
    assert_eq!(scripted.prompts().len(), 1);
}

#[tokio::test]
async fn approval_in_flight_reports_draft_pending() {
    let (scripted, blocking, controller) = blocking_controller();
    scripted
        .push_ideas(Ok(two_ideas()))
        .push_draft(Ok("body".to_string()));

    blocking.release.notify_one();
    let ideas = controller
        .generate_ideas(&IdeaRequest::default())
        .await
        .unwrap();

    let task = {
        let controller = Arc::clone(&controller);
        let id = ideas[0].id.clone();
        tokio::spawn(async move { controller.approve_idea(&id).await })
    };
    blocking.entered.notified().await;
    assert_eq!(controller.phase(), WorkflowPhase::DraftPending);

    blocking.release.notify_one();
    task.await.unwrap().unwrap();
    assert_eq!(controller.phase(), WorkflowPhase::DraftReady);
}

#[tokio::test]
async fn cancelled_operation_releases_the_gate() {
    let (scripted, blocking, controller) = blocking_controller();
    scripted.push_ideas(Ok(two_ideas()));

    let task = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.generate_ideas(&IdeaRequest::default()).await })
    };
    blocking.entered.notified().await;
    assert!(controller.is_loading());

    task.abort();
    assert!(task.await.unwrap_err().is_cancelled());

    assert!(!controller.is_loading());
    assert!(controller.ideas().is_empty());
}
