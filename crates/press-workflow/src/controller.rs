//! The workflow controller: ideas in, one draft at a time, articles out.
//!
//! All state lives behind a mutex that is never held across an `.await`.
//! Every operation additionally passes through the [`FlightGate`], so
//! collaborator calls for two operations never interleave. Every operation
//! performs its collaborator calls first and commits local state last; a
//! failure anywhere before the commit leaves state exactly as it was.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use press_clean::{CleanContext, Cleaner};
use press_core::collaborators::{
    Clipboard, Document, DocumentStore, PublishRelay, RelayArticle, RelayReceipt, TextGenerator,
    TrendSource,
};
use press_core::entities::{Draft, GeneratedIdea, Idea, PublishedArticle, TrendItem};
use press_core::enums::{Flair, IdeaStatus};
use press_core::errors::CollaboratorError;
use press_core::export::csv_row;
use press_core::ids::{self, PREFIX_ARTICLE, PREFIX_IDEA};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tokio::task::JoinHandle;

use crate::error::WorkflowError;
use crate::flight::{FlightGate, FlightGuard, FlightState, OperationKind};
use crate::phase::WorkflowPhase;
use crate::prompts::{self, IdeaRequest};
use crate::settings::WorkflowSettings;

const GENERATOR: &str = "generator";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DraftOutcome {
    Published,
    Discarded,
}

#[derive(Debug, Default)]
struct WorkflowState {
    ideas: Vec<Idea>,
    articles: Vec<PublishedArticle>,
    draft: Option<Draft>,
    exported: bool,
    outcome: Option<DraftOutcome>,
    last_error: Option<String>,
    observed: WorkflowPhase,
}

impl WorkflowState {
    fn set_draft(&mut self, draft: Option<Draft>) {
        self.draft = draft;
        self.exported = false;
    }

    fn derive_phase(&self, approving: bool) -> WorkflowPhase {
        if approving {
            return WorkflowPhase::DraftPending;
        }
        if self.draft.is_some() {
            return if self.exported {
                WorkflowPhase::Exported
            } else {
                WorkflowPhase::DraftReady
            };
        }
        match self.outcome {
            Some(DraftOutcome::Published) => WorkflowPhase::Published,
            Some(DraftOutcome::Discarded) => WorkflowPhase::Discarded,
            None if self.ideas.is_empty() => WorkflowPhase::Idle,
            None => WorkflowPhase::IdeasLoaded,
        }
    }
}

/// A draft accepted by the relay and saved to the published history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalPublication {
    pub receipt: RelayReceipt,
    pub article: PublishedArticle,
}

pub struct WorkflowController {
    settings: WorkflowSettings,
    cleaner: Cleaner,
    generator: Arc<dyn TextGenerator>,
    clipboard: Arc<dyn Clipboard>,
    relay: Arc<dyn PublishRelay>,
    store: Option<Arc<dyn DocumentStore>>,
    trends: Option<Arc<dyn TrendSource>>,
    gate: FlightGate,
    state: Mutex<WorkflowState>,
}

/// Collects the controller's collaborators. The generator, clipboard, and
/// relay are required; without a store ideas and articles live in memory only.
pub struct WorkflowControllerBuilder {
    settings: WorkflowSettings,
    cleaner: Cleaner,
    generator: Arc<dyn TextGenerator>,
    clipboard: Arc<dyn Clipboard>,
    relay: Arc<dyn PublishRelay>,
    store: Option<Arc<dyn DocumentStore>>,
    trends: Option<Arc<dyn TrendSource>>,
}

impl WorkflowControllerBuilder {
    #[must_use]
    pub fn store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    #[must_use]
    pub fn trends(mut self, trends: Arc<dyn TrendSource>) -> Self {
        self.trends = Some(trends);
        self
    }

    #[must_use]
    pub fn cleaner(mut self, cleaner: Cleaner) -> Self {
        self.cleaner = cleaner;
        self
    }

    #[must_use]
    pub fn build(self) -> WorkflowController {
        WorkflowController {
            settings: self.settings,
            cleaner: self.cleaner,
            generator: self.generator,
            clipboard: self.clipboard,
            relay: self.relay,
            store: self.store,
            trends: self.trends,
            gate: FlightGate::default(),
            state: Mutex::new(WorkflowState::default()),
        }
    }
}

impl WorkflowController {
    pub fn builder(
        settings: WorkflowSettings,
        generator: Arc<dyn TextGenerator>,
        clipboard: Arc<dyn Clipboard>,
        relay: Arc<dyn PublishRelay>,
    ) -> WorkflowControllerBuilder {
        WorkflowControllerBuilder {
            settings,
            cleaner: Cleaner::default(),
            generator,
            clipboard,
            relay,
            store: None,
            trends: None,
        }
    }

    // ── Operations ──────────────────────────────────────────────────

    /// Ask the generator for a batch of ideas and append them as `pending`.
    ///
    /// The whole batch is validated before anything is stored: one empty
    /// title or unknown flair rejects it.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::Busy`] if another operation is running, or the
    /// generator/store failure. The idea list is unchanged on error.
    pub async fn generate_ideas(&self, request: &IdeaRequest) -> Result<Vec<Idea>, WorkflowError> {
        let guard = self.begin(OperationKind::GenerateIdeas)?;
        let result = self.generate_ideas_in_flight(request).await;
        self.finish(guard, result)
    }

    async fn generate_ideas_in_flight(
        &self,
        request: &IdeaRequest,
    ) -> Result<Vec<Idea>, WorkflowError> {
        let prompt = prompts::idea_prompt(&self.settings, request);
        let response = self
            .generator
            .generate_structured(&prompt, &prompts::idea_schema())
            .await?;
        let batch = parse_generated_ideas(response)?;

        let now = Utc::now();
        let mut ideas: Vec<Idea> = batch
            .into_iter()
            .map(|(title, flair)| Idea::pending(String::new(), title, flair, now))
            .collect();

        if let Some(store) = &self.store {
            let records = ideas.iter().map(record).collect::<Result<Vec<_>, _>>()?;
            let assigned = store
                .add_batch(&self.settings.identity.ideas_path(), records)
                .await?;
            if assigned.len() != ideas.len() {
                return Err(CollaboratorError::Persistence(format!(
                    "store returned {} ids for {} ideas",
                    assigned.len(),
                    ideas.len()
                ))
                .into());
            }
            for (idea, id) in ideas.iter_mut().zip(assigned) {
                idea.id = id;
            }
        } else {
            for idea in &mut ideas {
                idea.id = ids::generate(PREFIX_IDEA)?;
            }
        }

        let mut state = self.lock();
        for idea in &ideas {
            if !state.ideas.iter().any(|known| known.id == idea.id) {
                state.ideas.push(idea.clone());
            }
        }
        drop(state);

        tracing::info!(count = ideas.len(), "ideas generated");
        Ok(ideas)
    }

    /// Expand a pending idea into the current draft and mark the idea approved.
    ///
    /// Any existing draft is replaced.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::IdeaNotFound`], an invalid status transition, or the
    /// generator/store failure. On error the idea stays `pending` and the
    /// draft slot is untouched.
    pub async fn approve_idea(&self, idea_id: &str) -> Result<Draft, WorkflowError> {
        let guard = self.begin(OperationKind::ApproveIdea)?;
        let result = self.approve_in_flight(idea_id).await;
        self.finish(guard, result)
    }

    async fn approve_in_flight(&self, idea_id: &str) -> Result<Draft, WorkflowError> {
        let idea = self.find_idea(idea_id)?;
        idea.check_transition(IdeaStatus::Approved)?;

        let prompt = prompts::draft_prompt(&self.settings, &idea);
        let content = self.generator.generate_text(&prompt).await?;
        if content.trim().is_empty() {
            return Err(CollaboratorError::malformed(GENERATOR, "draft text is empty").into());
        }

        self.persist_status(&idea, IdeaStatus::Approved).await?;

        let draft = Draft::from_idea(&idea, content, Utc::now());
        let mut state = self.lock();
        mark(&mut state.ideas, &idea.id, IdeaStatus::Approved);
        if state.draft.is_some() {
            tracing::debug!(idea_id = %idea.id, "replacing current draft");
        }
        state.set_draft(Some(draft.clone()));
        drop(state);

        tracing::info!(idea_id = %idea.id, title = %draft.title, "draft ready");
        Ok(draft)
    }

    /// Mark a pending idea as rejected.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::IdeaNotFound`], an invalid status transition, or the
    /// store failure.
    pub async fn reject_idea(&self, idea_id: &str) -> Result<Idea, WorkflowError> {
        let guard = self.begin(OperationKind::RejectIdea)?;
        let result = self.reject_in_flight(idea_id).await;
        self.finish(guard, result)
    }

    async fn reject_in_flight(&self, idea_id: &str) -> Result<Idea, WorkflowError> {
        let mut idea = self.find_idea(idea_id)?;
        idea.check_transition(IdeaStatus::Rejected)?;
        self.persist_status(&idea, IdeaStatus::Rejected).await?;

        mark(&mut self.lock().ideas, &idea.id, IdeaStatus::Rejected);
        idea.status = IdeaStatus::Rejected;
        tracing::info!(idea_id = %idea.id, "idea rejected");
        Ok(idea)
    }

    /// Drop the current draft without publishing it.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::NoDraft`] if there is nothing to discard.
    pub fn discard_draft(&self) -> Result<Draft, WorkflowError> {
        let guard = self.begin(OperationKind::DiscardDraft)?;
        let result = {
            let mut state = self.lock();
            match state.draft.take() {
                Some(draft) => {
                    state.set_draft(None);
                    state.outcome = Some(DraftOutcome::Discarded);
                    tracing::info!(idea_id = %draft.idea_id, "draft discarded");
                    Ok(draft)
                }
                None => Err(WorkflowError::NoDraft),
            }
        };
        self.finish(guard, result)
    }

    /// Write `title,flair,cleaned content` as one CSV row to the clipboard.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::NoDraft`] or the clipboard failure.
    pub async fn export_draft(&self) -> Result<String, WorkflowError> {
        let guard = self.begin(OperationKind::ExportDraft)?;
        let result = self.export_in_flight().await;
        self.finish(guard, result)
    }

    async fn export_in_flight(&self) -> Result<String, WorkflowError> {
        let draft = self.current_draft().ok_or(WorkflowError::NoDraft)?;
        let cleaned = self.clean(&draft);
        let row = csv_row(&[&draft.title, draft.flair.label(), &cleaned]);
        self.clipboard.write(&row).await?;

        let mut state = self.lock();
        state.exported = state.draft.is_some();
        drop(state);

        tracing::info!(bytes = row.len(), "draft exported as csv");
        Ok(row)
    }

    /// Write the cleaned draft body to the clipboard.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::NoDraft`] or the clipboard failure.
    pub async fn copy_clean_content(&self) -> Result<String, WorkflowError> {
        let guard = self.begin(OperationKind::CopyContent)?;
        let result = async {
            let draft = self.current_draft().ok_or(WorkflowError::NoDraft)?;
            let cleaned = self.clean(&draft);
            self.clipboard.write(&cleaned).await?;
            Ok::<_, WorkflowError>(cleaned)
        }
        .await;
        self.finish(guard, result)
    }

    /// Save the current draft to the published history and clear it.
    ///
    /// The stored content is the raw draft, not the cleaned text.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::NoDraft`] or the store failure, which leaves the draft
    /// in place.
    pub async fn publish_draft(&self) -> Result<PublishedArticle, WorkflowError> {
        let guard = self.begin(OperationKind::PublishDraft)?;
        let result = self.publish_in_flight().await;
        self.finish(guard, result)
    }

    async fn publish_in_flight(&self) -> Result<PublishedArticle, WorkflowError> {
        let draft = self.current_draft().ok_or(WorkflowError::NoDraft)?;
        let author = &self.settings.identity.user_id;
        let now = Utc::now();

        let article = match &self.store {
            Some(store) => {
                let unsaved = draft.to_published(String::new(), author.as_str(), now);
                let id = store
                    .add(&self.settings.identity.articles_path(), record(&unsaved)?)
                    .await?;
                PublishedArticle { id, ..unsaved }
            }
            None => draft.to_published(ids::generate(PREFIX_ARTICLE)?, author.as_str(), now),
        };

        let mut state = self.lock();
        state.set_draft(None);
        state.outcome = Some(DraftOutcome::Published);
        if !state.articles.iter().any(|known| known.id == article.id) {
            state.articles.push(article.clone());
        }
        drop(state);

        tracing::info!(article_id = %article.id, title = %article.title, "article published");
        Ok(article)
    }

    /// Send the cleaned draft to the relay, then publish it locally.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::NoDraft`], the relay failure, or the store failure.
    /// The draft survives every failure. If the relay accepted the article but
    /// saving it failed, a retry will post it to the relay again.
    pub async fn publish_to_external_target(&self) -> Result<ExternalPublication, WorkflowError> {
        let guard = self.begin(OperationKind::PublishExternal)?;
        let result = self.publish_external_in_flight().await;
        self.finish(guard, result)
    }

    async fn publish_external_in_flight(&self) -> Result<ExternalPublication, WorkflowError> {
        let draft = self.current_draft().ok_or(WorkflowError::NoDraft)?;
        let payload = RelayArticle {
            title: draft.title.clone(),
            flair: draft.flair.label().to_string(),
            content: self.clean(&draft),
            subreddit: self.settings.community.clone(),
        };
        let receipt = self.relay.publish(&payload).await?;
        tracing::info!(status = %receipt.status, subreddit = %payload.subreddit, "relay accepted article");

        let article = self.publish_in_flight().await.inspect_err(|err| {
            tracing::warn!(error = %err, "relay accepted the article but saving it failed");
        })?;
        Ok(ExternalPublication { receipt, article })
    }

    /// Recent discussions in the configured community, at most `trend_limit`.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::Busy`], [`WorkflowError::NoTrendSource`], or the relay
    /// failure.
    pub async fn fetch_trends(&self) -> Result<Vec<TrendItem>, WorkflowError> {
        let guard = self.begin(OperationKind::FetchTrends)?;
        let result = async {
            let source = self.trends.as_ref().ok_or(WorkflowError::NoTrendSource)?;
            let mut items = source.fetch_trends(&self.settings.community).await?;
            items.truncate(self.settings.trend_limit);
            Ok::<_, WorkflowError>(items)
        }
        .await;
        self.finish(guard, result)
    }

    /// Replace the local idea and article views with the store's contents.
    /// A no-op without a store.
    ///
    /// Holds the gate for the whole listing, so no local commit can land
    /// between the read and the replacement.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::Busy`] or the store failure; local views are unchanged
    /// on error.
    pub async fn sync(&self) -> Result<(), WorkflowError> {
        let guard = self.begin(OperationKind::Sync)?;
        let result = async {
            let Some(store) = &self.store else {
                return Ok(());
            };
            let ideas = store.list(&self.settings.identity.ideas_path()).await?;
            let articles = store.list(&self.settings.identity.articles_path()).await?;
            self.apply_idea_snapshot(&ideas);
            self.apply_article_snapshot(&articles);
            Ok::<_, WorkflowError>(())
        }
        .await;
        self.finish(guard, result)
    }

    /// Replace the idea view with a store snapshot. Records that fail to
    /// decode are skipped.
    pub fn apply_idea_snapshot(&self, documents: &[Document]) {
        let ideas = decode_all(documents);
        tracing::debug!(count = ideas.len(), "applying idea snapshot");
        self.lock().ideas = ideas;
        self.observe_phase();
    }

    /// Replace the article view with a store snapshot.
    pub fn apply_article_snapshot(&self, documents: &[Document]) {
        let articles = decode_all(documents);
        tracing::debug!(count = articles.len(), "applying article snapshot");
        self.lock().articles = articles;
        self.observe_phase();
    }

    /// Subscribe to both collections and apply every snapshot as it arrives.
    ///
    /// Returns `None` without a store. The task ends when either feed closes.
    ///
    /// # Errors
    ///
    /// The store's subscribe failure.
    pub async fn follow_store(self: &Arc<Self>) -> Result<Option<JoinHandle<()>>, WorkflowError> {
        let Some(store) = self.store.clone() else {
            return Ok(None);
        };
        let mut ideas = store.subscribe(&self.settings.identity.ideas_path()).await?;
        let mut articles = store
            .subscribe(&self.settings.identity.articles_path())
            .await?;

        let initial_ideas = ideas.borrow_and_update().clone();
        self.apply_idea_snapshot(&initial_ideas);
        let initial_articles = articles.borrow_and_update().clone();
        self.apply_article_snapshot(&initial_articles);

        let controller = Arc::clone(self);
        Ok(Some(tokio::spawn(async move {
            loop {
                tokio::select! {
                    changed = ideas.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let snapshot = ideas.borrow_and_update().clone();
                        controller.apply_idea_snapshot(&snapshot);
                    }
                    changed = articles.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let snapshot = articles.borrow_and_update().clone();
                        controller.apply_article_snapshot(&snapshot);
                    }
                }
            }
            tracing::debug!("store feed closed");
        })))
    }

    // ── Accessors ───────────────────────────────────────────────────

    #[must_use]
    pub const fn settings(&self) -> &WorkflowSettings {
        &self.settings
    }

    #[must_use]
    pub fn ideas(&self) -> Vec<Idea> {
        self.lock().ideas.clone()
    }

    #[must_use]
    pub fn pending_ideas(&self) -> Vec<Idea> {
        self.lock()
            .ideas
            .iter()
            .filter(|idea| idea.is_pending())
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn articles(&self) -> Vec<PublishedArticle> {
        self.lock().articles.clone()
    }

    #[must_use]
    pub fn article(&self, id: &str) -> Option<PublishedArticle> {
        self.lock().articles.iter().find(|a| a.id == id).cloned()
    }

    #[must_use]
    pub fn current_draft(&self) -> Option<Draft> {
        self.lock().draft.clone()
    }

    /// The current draft's content as it would be exported.
    #[must_use]
    pub fn cleaned_draft(&self) -> Option<String> {
        self.current_draft().map(|draft| self.clean(&draft))
    }

    #[must_use]
    pub fn phase(&self) -> WorkflowPhase {
        let approving = self.running() == Some(OperationKind::ApproveIdea);
        self.lock().derive_phase(approving)
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.gate.state() != FlightState::Idle
    }

    #[must_use]
    pub fn running(&self) -> Option<OperationKind> {
        match self.gate.state() {
            FlightState::Idle => None,
            FlightState::Running(kind) => Some(kind),
        }
    }

    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.lock().last_error.clone()
    }

    // ── Internals ───────────────────────────────────────────────────

    fn lock(&self) -> MutexGuard<'_, WorkflowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Claim the gate, clear the error slot, and settle any finished draft
    /// outcome back to the idea list.
    fn begin(&self, kind: OperationKind) -> Result<FlightGuard<'_>, WorkflowError> {
        let guard = self.gate.try_acquire(kind)?;
        let mut state = self.lock();
        state.last_error = None;
        state.outcome = None;
        drop(state);
        tracing::debug!(operation = %kind, "operation started");
        self.observe_phase();
        Ok(guard)
    }

    /// Record a failure in the error slot, release the gate, and observe the
    /// resulting phase.
    fn finish<T>(
        &self,
        guard: FlightGuard<'_>,
        result: Result<T, WorkflowError>,
    ) -> Result<T, WorkflowError> {
        let operation = guard.kind();
        if let Err(err) = &result {
            tracing::warn!(%operation, error = %err, "operation failed");
            self.lock().last_error = Some(err.to_string());
        }
        drop(guard);
        self.observe_phase();
        result
    }

    /// Compare the derived phase with the last one observed and check the
    /// change against [`WorkflowPhase::allowed_next_states`].
    fn observe_phase(&self) {
        let approving = self.running() == Some(OperationKind::ApproveIdea);
        let mut state = self.lock();
        let from = state.observed;
        let to = state.derive_phase(approving);
        if from != to {
            if from.can_transition_to(to) {
                tracing::debug!(%from, %to, "phase changed");
            } else {
                tracing::warn!(%from, %to, "phase change outside the workflow table");
            }
            state.observed = to;
        }
    }

    fn find_idea(&self, idea_id: &str) -> Result<Idea, WorkflowError> {
        self.lock()
            .ideas
            .iter()
            .find(|idea| idea.id == idea_id)
            .cloned()
            .ok_or_else(|| WorkflowError::IdeaNotFound(idea_id.to_string()))
    }

    async fn persist_status(&self, idea: &Idea, status: IdeaStatus) -> Result<(), WorkflowError> {
        if let Some(store) = &self.store {
            store
                .update(
                    &self.settings.identity.ideas_path(),
                    &idea.id,
                    json!({ "status": status.as_str() }),
                )
                .await?;
        }
        Ok(())
    }

    fn clean(&self, draft: &Draft) -> String {
        self.cleaner
            .clean(&draft.content, &CleanContext::with_title(&draft.title))
    }
}

/// Validate a structured idea response as a whole.
fn parse_generated_ideas(response: Value) -> Result<Vec<(String, Flair)>, CollaboratorError> {
    let generated: Vec<GeneratedIdea> = serde_json::from_value(response)
        .map_err(|e| CollaboratorError::malformed(GENERATOR, format!("idea list: {e}")))?;
    generated
        .iter()
        .enumerate()
        .map(|(index, idea)| {
            idea.validate().map_err(|e| {
                CollaboratorError::malformed(GENERATOR, format!("idea {index}: {e}"))
            })
        })
        .collect()
}

/// Store body for an entity: its JSON form without the `id` key, which the
/// store owns.
fn record<T: Serialize>(entity: &T) -> Result<Value, CollaboratorError> {
    let mut value = serde_json::to_value(entity)
        .map_err(|e| CollaboratorError::Persistence(format!("failed to encode record: {e}")))?;
    if let Value::Object(map) = &mut value {
        map.remove("id");
    }
    Ok(value)
}

fn decode_all<T: DeserializeOwned>(documents: &[Document]) -> Vec<T> {
    documents
        .iter()
        .filter_map(|doc| {
            doc.decode()
                .inspect_err(|err| tracing::warn!(id = %doc.id, error = %err, "skipping record"))
                .ok()
        })
        .collect()
}

// A snapshot may already carry the decision; the local copy then stays as is.
fn mark(ideas: &mut [Idea], idea_id: &str, status: IdeaStatus) {
    if let Some(idea) = ideas.iter_mut().find(|idea| idea.id == idea_id) {
        if let Err(err) = idea.transition(status) {
            tracing::debug!(error = %err, "idea already decided locally");
        }
    }
}
