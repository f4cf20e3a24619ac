//! The session engine.
//!
//! `SessionEngine` owns one player's [`SessionState`] and [`Ledger`] and
//! reads an immutable, shared [`ContentStore`]. Every call runs to
//! completion, including its random draws, before returning.

use std::sync::Arc;

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;

use sb_content::{BranchId, ContentStore, Event, EventRef, FixedOrder};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::ledger::{Grant, Ledger};
use crate::outcome::{Resolution, resolve};
use crate::progress::{Progress, ProgressStore, SavedProgress};
use crate::random::RandomSource;
use crate::state::{SessionState, Stage};
use crate::transition::TransitionResult;

/// A single-player game session over shared content.
#[derive(Debug)]
pub struct SessionEngine<R: RandomSource = StdRng> {
    content: Option<Arc<ContentStore>>,
    config: EngineConfig,
    state: SessionState,
    ledger: Ledger,
    rng: R,
}

impl SessionEngine<StdRng> {
    /// Create an engine over loaded content, seeded from the config.
    pub fn new(content: Arc<ContentStore>, config: EngineConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self::with_rng(Some(content), config, rng)
    }

    /// Create an engine with no content. Every `start` fails until
    /// [`SessionEngine::load_content`] is called.
    pub fn uninitialized(config: EngineConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self::with_rng(None, config, rng)
    }
}

impl<R: RandomSource> SessionEngine<R> {
    /// Create an engine with an explicit randomness source.
    pub fn with_rng(content: Option<Arc<ContentStore>>, config: EngineConfig, rng: R) -> Self {
        Self {
            content,
            config,
            state: SessionState::awaiting(),
            ledger: Ledger::new(),
            rng,
        }
    }

    /// Replace the content. The running session is discarded.
    pub fn load_content(&mut self, content: Arc<ContentStore>) {
        self.content = Some(content);
        self.state = SessionState::awaiting();
    }

    /// Drop the content, leaving the engine uninitialized.
    pub fn unload_content(&mut self) {
        self.content = None;
        self.state = SessionState::awaiting();
    }

    /// The loaded content.
    pub fn content(&self) -> Option<&ContentStore> {
        self.content.as_deref()
    }

    /// Get the configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get the session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Get the ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Start a new playthrough on the branch addressed by `key`
    /// (1-based start option), or quit if `key` is the quit key.
    ///
    /// An unknown or empty branch terminates the session and returns
    /// [`EngineError::UnknownBranch`].
    pub fn start(&mut self, key: &str) -> EngineResult<TransitionResult> {
        let key = key.trim();
        self.ledger.reset();
        if key == self.config.quit_key {
            log::info!("player quit");
            self.state = SessionState::terminated();
            return Ok(TransitionResult::terminal(
                "",
                &self.config.messages.farewell,
                Vec::new(),
            ));
        }

        self.state = SessionState::awaiting();

        let Some(content) = self.content.clone() else {
            return Err(self.unknown_branch(key, "no content loaded"));
        };
        let Some(branch) = BranchId::parse(key).and_then(|id| content.branch(id)) else {
            return Err(self.unknown_branch(key, "no such start option"));
        };
        if branch.is_empty() {
            return Err(self.unknown_branch(key, "branch has no fixed events"));
        }

        let mut order: Vec<usize> = (0..branch.len()).collect();
        if branch.order == FixedOrder::Shuffled {
            self.rng.shuffle(&mut order);
        }
        self.state = SessionState::for_branch(branch.id, order, content.random_pool().len());
        self.ledger.begin_playthrough();

        let playthrough = self
            .state
            .playthrough()
            .map(|p| p.to_string())
            .unwrap_or_default();
        log::info!(
            "[{playthrough}] started branch {} \"{}\" ({} order)",
            branch.id,
            branch.label,
            branch.order
        );

        let first = self.current_fixed_event(&content)?;
        Ok(TransitionResult::prompt(
            &format!("{}.", branch.label),
            &first.display_prompt(),
            first.choices.clone(),
            Vec::new(),
        ))
    }

    /// Answer the current event with `choice`.
    ///
    /// In the random phase a missing choice, or no pending event, draws the
    /// next event without resolving anything.
    pub fn advance(&mut self, choice: Option<&str>) -> EngineResult<TransitionResult> {
        match self.state.stage {
            Stage::Fixed => self.advance_fixed(choice.map(str::trim).unwrap_or_default()),
            Stage::Random => self.advance_random(choice.map(str::trim)),
            stage => Err(EngineError::InvalidState {
                stage,
                operation: "advance",
            }),
        }
    }

    fn advance_fixed(&mut self, key: &str) -> EngineResult<TransitionResult> {
        let content = self.loaded()?;
        let (at, event) = self.current_fixed_entry(&content)?;
        let resolution = self.resolve_choice(at, event, key)?;
        let grants = self.grant_for(event, key);

        if resolution.terminal || event.forces_terminal(key) {
            self.finish(&format!("failed at {at}"));
            return Ok(TransitionResult::terminal(
                &resolution.text,
                &self.config.messages.failure_suffix,
                grants,
            ));
        }

        self.ledger.increment_score();
        self.state.fixed_cursor += 1;
        log::debug!(
            "{at}: \"{key}\" -> score {}, cursor {}/{}",
            self.ledger.score(),
            self.state.fixed_cursor,
            self.state.fixed_len()
        );

        if self.state.fixed_cursor < self.state.fixed_len() {
            let next = self.current_fixed_event(&content)?;
            return Ok(TransitionResult::prompt(
                &resolution.text,
                &next.display_prompt(),
                next.choices.clone(),
                grants,
            ));
        }

        self.state.stage = Stage::Random;
        self.state.pool.clear_pending();
        self.draw_next(&content, &resolution.text, grants)
    }

    fn advance_random(&mut self, key: Option<&str>) -> EngineResult<TransitionResult> {
        let content = self.loaded()?;
        let (Some(key), Some(index)) = (key, self.state.pool.pending()) else {
            return self.draw_next(&content, "", Vec::new());
        };

        let at = EventRef::Random { index };
        let event = content
            .random_event(index)
            .ok_or_else(|| EngineError::InvalidContent(format!("{at} does not exist")))?;
        let resolution = self.resolve_choice(at, event, key)?;
        let grants = self.grant_for(event, key);
        self.state.pool.consume_pending();

        if resolution.terminal || event.forces_terminal(key) {
            self.finish(&format!("game over at {at}"));
            return Ok(TransitionResult::terminal(
                &resolution.text,
                &self.config.messages.game_over_suffix,
                grants,
            ));
        }

        self.ledger.increment_score();
        log::debug!("{at}: \"{key}\" -> score {}", self.ledger.score());
        self.draw_next(&content, &resolution.text, grants)
    }

    fn draw_next(
        &mut self,
        content: &ContentStore,
        prefix: &str,
        grants: Vec<Grant>,
    ) -> EngineResult<TransitionResult> {
        let Some(index) = self.state.pool.draw(&mut self.rng) else {
            self.finish("random pool exhausted");
            return Ok(TransitionResult::terminal(
                prefix,
                &self.config.messages.all_complete_suffix,
                grants,
            ));
        };

        let at = EventRef::Random { index };
        let event = content
            .random_event(index)
            .ok_or_else(|| EngineError::InvalidContent(format!("{at} does not exist")))?;
        log::debug!(
            "drew {at}, {} of {} left",
            self.state.pool.remaining().len(),
            self.state.pool.size()
        );
        Ok(TransitionResult::prompt(
            prefix,
            &event.display_prompt(),
            event.choices.clone(),
            grants,
        ))
    }

    /// Check the key, then resolve its outcome. Nothing is mutated on error.
    fn resolve_choice(
        &mut self,
        at: EventRef,
        event: &Event,
        key: &str,
    ) -> EngineResult<Resolution> {
        if !event.has_choice(key) {
            return Err(EngineError::InvalidChoice {
                key: key.to_string(),
                event: at,
            });
        }
        let spec = event.outcome(key).ok_or_else(|| {
            EngineError::InvalidContent(format!("{at}: choice \"{key}\" has no result"))
        })?;
        resolve(spec, &mut self.rng).map_err(|e| match e {
            EngineError::InvalidContent(msg) => {
                log::warn!("{at}: choice \"{key}\": {msg}");
                EngineError::InvalidContent(format!("{at}: choice \"{key}\": {msg}"))
            }
            other => other,
        })
    }

    fn grant_for(&mut self, event: &Event, key: &str) -> Vec<Grant> {
        event
            .achievement_for(key)
            .map(|id| self.ledger.grant(id))
            .into_iter()
            .collect()
    }

    fn current_fixed_entry<'c>(
        &self,
        content: &'c ContentStore,
    ) -> EngineResult<(EventRef, &'c Event)> {
        let branch = self
            .state
            .branch
            .and_then(|id| content.branch(id))
            .ok_or_else(|| EngineError::InvalidContent("session branch is missing".to_string()))?;
        let index = self.state.current_fixed().ok_or_else(|| {
            EngineError::InvalidContent(format!("branch {} has no event at the cursor", branch.id))
        })?;
        let at = EventRef::Fixed {
            branch: branch.id,
            index,
        };
        let event = branch
            .event(index)
            .ok_or_else(|| EngineError::InvalidContent(format!("{at} does not exist")))?;
        Ok((at, event))
    }

    fn current_fixed_event<'c>(&self, content: &'c ContentStore) -> EngineResult<&'c Event> {
        self.current_fixed_entry(content).map(|(_, event)| event)
    }

    fn loaded(&self) -> EngineResult<Arc<ContentStore>> {
        self.content
            .clone()
            .ok_or_else(|| EngineError::InvalidContent("no content loaded".to_string()))
    }

    fn unknown_branch(&mut self, key: &str, reason: &str) -> EngineError {
        log::warn!("cannot start branch \"{key}\": {reason}");
        self.state = SessionState::terminated();
        EngineError::UnknownBranch {
            key: key.to_string(),
            apology: self.config.messages.unknown_branch.clone(),
        }
    }

    fn finish(&mut self, reason: &str) {
        self.state.stage = Stage::Terminated;
        let playthrough = self
            .state
            .playthrough()
            .map(|p| p.to_string())
            .unwrap_or_default();
        log::info!(
            "[{playthrough}] ended: {reason}, score {}",
            self.ledger.score()
        );
    }

    /// Current score and achievements.
    pub fn progress(&self) -> Progress {
        Progress {
            score: self.ledger.score(),
            best_score: self.ledger.best_score(),
            session_achievements: self.ledger.session_achievements().to_vec(),
            achievements: self.ledger.cumulative_achievements().to_vec(),
        }
    }

    /// Clear the session score and achievements. The stage is untouched.
    pub fn reset_progress(&mut self) {
        self.ledger.reset();
    }

    /// Wipe cumulative achievements and best score.
    pub fn clear_persisted_data(&mut self) {
        log::info!("clearing cumulative progress");
        self.ledger.clear_cumulative();
    }

    /// Merge previously saved history into the ledger.
    pub fn restore(&mut self, saved: &SavedProgress) {
        self.ledger.restore(
            saved.achievements.iter().cloned(),
            saved.best_score,
            saved.playthroughs,
        );
    }

    /// The cumulative history as a record to persist.
    pub fn snapshot(&self) -> SavedProgress {
        SavedProgress {
            achievements: self.ledger.cumulative_achievements().to_vec(),
            best_score: self.ledger.best_score(),
            playthroughs: self.ledger.playthroughs(),
            updated_at: Some(Utc::now()),
        }
    }

    /// Restore from a store.
    pub fn load_progress(&mut self, store: &dyn ProgressStore) -> EngineResult<()> {
        let saved = store.load()?;
        self.restore(&saved);
        Ok(())
    }

    /// Save a snapshot to a store.
    pub fn save_progress(&self, store: &mut dyn ProgressStore) -> EngineResult<()> {
        store.save(&self.snapshot())
    }
}
