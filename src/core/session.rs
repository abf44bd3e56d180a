use crate::config::Config;
use crate::core::command::compose_command;
use derive_more::Display;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[display("download")]
    Download,
    #[display("tutorial")]
    Tutorial,
}

/// What the presentation layer should show. Derived from the session, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    #[display("idle")]
    Idle,
    #[display("analyzing")]
    Analyzing,
    #[display("{_0}")]
    ModeChosen(Mode),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    pub url: String,
    /// `None` until the first analysis completes.
    pub mode: Option<Mode>,
    pub analyzing: bool,
}

impl Session {
    pub fn view_state(&self) -> ViewState {
        if self.analyzing {
            return ViewState::Analyzing;
        }

        match self.mode {
            None => ViewState::Idle,
            Some(mode) => ViewState::ModeChosen(mode),
        }
    }

    pub fn command(&self) -> String {
        compose_command(&self.url)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzeOutcome {
    Started,
    IgnoredEmpty,
    AlreadyAnalyzing,
    /// A mode is already chosen; `reset` returns the session to idle first.
    AlreadyAnalyzed,
}

impl AnalyzeOutcome {
    pub fn is_started(self) -> bool {
        self == AnalyzeOutcome::Started
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub url: String,
    pub mode: Option<Mode>,
    pub analyzing: bool,
    pub state: ViewState,
    pub command: String,
}

#[derive(Debug)]
enum SessionEvent {
    AnalysisCompleted { ticket: u64 },
}

struct PendingAnalysis {
    ticket: u64,
    handle: JoinHandle<()>,
}

/// Owns the single session record and the deferred analysis task.
///
/// Completions are delivered over a channel and applied by [`poll`](Self::poll)
/// or [`wait_for_analysis`](Self::wait_for_analysis), so every mutation happens
/// on the owner's side.
pub struct SessionController {
    session: Session,
    config: Config,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    events_rx: mpsc::UnboundedReceiver<SessionEvent>,
    pending: Option<PendingAnalysis>,
    next_ticket: u64,
}

impl SessionController {
    pub fn new(config: Config) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Self {
            session: Session::default(),
            config,
            events_tx,
            events_rx,
            pending: None,
            next_ticket: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn view_state(&self) -> ViewState {
        self.session.view_state()
    }

    pub fn compose_command(&self) -> String {
        self.session.command()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            url: self.session.url.clone(),
            mode: self.session.mode,
            analyzing: self.session.analyzing,
            state: self.view_state(),
            command: self.compose_command(),
        }
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.session.url = url.into();
    }

    /// Start the simulated analysis of `current_url`.
    ///
    /// `analyzing` is set before this returns; the switch to download mode is
    /// applied once the configured delay has elapsed. Must be called from
    /// within a Tokio runtime.
    pub fn request_analysis(&mut self, current_url: &str) -> AnalyzeOutcome {
        if current_url.is_empty() {
            debug!("ignoring analysis request for empty url");
            return AnalyzeOutcome::IgnoredEmpty;
        }
        if self.session.analyzing {
            debug!("analysis already in flight, rejecting request");
            return AnalyzeOutcome::AlreadyAnalyzing;
        }
        if self.session.mode.is_some() {
            debug!("session already analyzed, rejecting request");
            return AnalyzeOutcome::AlreadyAnalyzed;
        }

        self.session.url = current_url.to_string();
        self.session.analyzing = true;

        let ticket = self.next_ticket;
        self.next_ticket += 1;

        let deadline = Instant::now() + self.config.analyze_delay;
        let tx = self.events_tx.clone();
        let handle = tokio::spawn(async move {
            sleep_until(deadline).await;
            let _ = tx.send(SessionEvent::AnalysisCompleted { ticket });
        });
        self.pending = Some(PendingAnalysis { ticket, handle });

        info!(
            url = current_url,
            ticket,
            delay_ms = self.config.analyze_delay.as_millis() as u64,
            "analysis started"
        );
        AnalyzeOutcome::Started
    }

    pub fn select_mode(&mut self, target: Mode) {
        if self.session.mode != Some(target) {
            info!(mode = %target, "mode selected");
        }
        self.session.mode = Some(target);
    }

    /// Abort the in-flight analysis, if any. The mode is left untouched.
    pub fn cancel_analysis(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };

        pending.handle.abort();
        self.session.analyzing = false;
        info!(ticket = pending.ticket, "analysis cancelled");
        true
    }

    /// Back to idle, keeping the entered url.
    pub fn reset(&mut self) {
        self.cancel_analysis();
        self.session.mode = None;
        debug!("session reset");
    }

    /// Apply any completions that have arrived. Returns whether the session changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.events_rx.try_recv() {
            changed |= self.apply(event);
        }
        changed
    }

    /// Wait for the pending analysis to complete and apply it.
    ///
    /// Returns `None` straight away when nothing is pending.
    pub async fn wait_for_analysis(&mut self) -> Option<ViewState> {
        self.pending.as_ref()?;

        while self.pending.is_some() {
            let event = self.events_rx.recv().await?;
            self.apply(event);
        }

        Some(self.view_state())
    }

    fn apply(&mut self, event: SessionEvent) -> bool {
        match event {
            SessionEvent::AnalysisCompleted { ticket } => {
                match &self.pending {
                    Some(pending) if pending.ticket == ticket => {}
                    _ => {
                        debug!(ticket, "discarding stale analysis completion");
                        return false;
                    }
                }

                self.pending = None;
                self.session.analyzing = false;
                self.session.mode = Some(Mode::Download);
                info!(ticket, "analysis completed");
                true
            }
        }
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AnalyzeOutcome, Mode, SessionController, ViewState};
    use crate::config::Config;
    use std::time::Duration;
    use tokio::time::{Instant, advance, timeout};

    const DELAY: Duration = Duration::from_millis(1500);

    fn controller() -> SessionController {
        SessionController::new(Config::default().with_analyze_delay(DELAY))
    }

    #[tokio::test(start_paused = true)]
    async fn empty_request_is_a_noop_from_every_state() {
        let mut ctl = controller();

        assert_eq!(ctl.request_analysis(""), AnalyzeOutcome::IgnoredEmpty);
        assert_eq!(ctl.view_state(), ViewState::Idle);

        assert!(ctl.request_analysis("BV1xx411c7mD").is_started());
        let before = ctl.session().clone();
        assert_eq!(ctl.request_analysis(""), AnalyzeOutcome::IgnoredEmpty);
        assert_eq!(ctl.session(), &before);

        ctl.wait_for_analysis().await;
        ctl.select_mode(Mode::Tutorial);
        let before = ctl.session().clone();
        assert_eq!(ctl.request_analysis(""), AnalyzeOutcome::IgnoredEmpty);
        assert_eq!(ctl.session(), &before);
    }

    #[tokio::test(start_paused = true)]
    async fn analysis_flips_flag_then_lands_in_download() {
        let mut ctl = controller();

        assert!(ctl.request_analysis("BV1xx411c7mD").is_started());
        assert!(ctl.session().analyzing);
        assert_eq!(ctl.session().mode, None);
        assert_eq!(ctl.view_state(), ViewState::Analyzing);

        let state = ctl.wait_for_analysis().await;
        assert_eq!(state, Some(ViewState::ModeChosen(Mode::Download)));
        assert!(!ctl.session().analyzing);
        assert_eq!(ctl.session().mode, Some(Mode::Download));
    }

    #[tokio::test(start_paused = true)]
    async fn completion_is_not_visible_before_the_delay() {
        let mut ctl = controller();
        let start = Instant::now();
        ctl.request_analysis("BV1xx411c7mD");

        let early = timeout(DELAY - Duration::from_millis(1), ctl.wait_for_analysis()).await;
        assert!(early.is_err());
        assert!(!ctl.poll());
        assert!(ctl.session().analyzing);

        ctl.wait_for_analysis().await;
        assert!(start.elapsed() >= DELAY);
        assert_eq!(ctl.session().mode, Some(Mode::Download));
    }

    #[tokio::test(start_paused = true)]
    async fn poll_applies_completion_after_delay() {
        let mut ctl = controller();
        ctl.request_analysis("BV1xx411c7mD");

        advance(DELAY + Duration::from_millis(10)).await;
        for _ in 0..10 {
            if ctl.poll() {
                break;
            }
            tokio::task::yield_now().await;
        }

        assert_eq!(ctl.view_state(), ViewState::ModeChosen(Mode::Download));
    }

    #[test]
    fn select_mode_is_idempotent() {
        let mut once = controller();
        once.select_mode(Mode::Tutorial);

        let mut twice = controller();
        twice.select_mode(Mode::Tutorial);
        twice.select_mode(Mode::Tutorial);

        assert_eq!(once.session(), twice.session());
    }

    #[test]
    fn last_selected_mode_wins() {
        let mut ctl = controller();
        ctl.select_mode(Mode::Download);
        ctl.select_mode(Mode::Tutorial);
        assert_eq!(ctl.view_state(), ViewState::ModeChosen(Mode::Tutorial));
    }

    #[tokio::test(start_paused = true)]
    async fn end_to_end_keeps_url() {
        let mut ctl = controller();
        assert_eq!(ctl.view_state(), ViewState::Idle);

        ctl.request_analysis("av123");
        assert_eq!(ctl.session().url, "av123");

        ctl.wait_for_analysis().await;
        assert_eq!(ctl.session().url, "av123");

        ctl.select_mode(Mode::Tutorial);
        assert_eq!(ctl.view_state(), ViewState::ModeChosen(Mode::Tutorial));
        assert_eq!(ctl.session().url, "av123");
    }

    #[tokio::test(start_paused = true)]
    async fn second_request_while_analyzing_is_rejected() {
        let mut ctl = controller();

        assert!(ctl.request_analysis("BV1").is_started());
        assert_eq!(
            ctl.request_analysis("BV2"),
            AnalyzeOutcome::AlreadyAnalyzing
        );
        assert_eq!(ctl.session().url, "BV1");

        ctl.wait_for_analysis().await;
        ctl.select_mode(Mode::Tutorial);

        advance(DELAY * 2).await;
        assert!(!ctl.poll());
        assert_eq!(ctl.session().mode, Some(Mode::Tutorial));
    }

    #[tokio::test(start_paused = true)]
    async fn mode_picked_mid_analysis_is_overwritten_by_completion() {
        let mut ctl = controller();
        ctl.request_analysis("av123");

        ctl.select_mode(Mode::Tutorial);
        assert_eq!(ctl.view_state(), ViewState::Analyzing);

        assert_eq!(
            ctl.wait_for_analysis().await,
            Some(ViewState::ModeChosen(Mode::Download))
        );
        assert_eq!(ctl.session().mode, Some(Mode::Download));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_discards_pending_completion() {
        let mut ctl = controller();
        ctl.request_analysis("BV1xx411c7mD");

        assert!(ctl.cancel_analysis());
        assert!(!ctl.session().analyzing);
        assert_eq!(ctl.view_state(), ViewState::Idle);
        assert_eq!(ctl.wait_for_analysis().await, None);

        advance(DELAY * 2).await;
        assert!(!ctl.poll());
        assert_eq!(ctl.session().mode, None);
        assert!(!ctl.cancel_analysis());
    }

    #[tokio::test(start_paused = true)]
    async fn reset_allows_a_fresh_analysis() {
        let mut ctl = controller();
        ctl.request_analysis("BV1");
        ctl.wait_for_analysis().await;

        assert_eq!(ctl.request_analysis("BV1"), AnalyzeOutcome::AlreadyAnalyzed);

        ctl.reset();
        assert_eq!(ctl.view_state(), ViewState::Idle);
        assert_eq!(ctl.session().url, "BV1");

        assert!(ctl.request_analysis("BV2").is_started());
        assert_eq!(
            ctl.wait_for_analysis().await,
            Some(ViewState::ModeChosen(Mode::Download))
        );
        assert_eq!(ctl.session().url, "BV2");
    }

    #[tokio::test(start_paused = true)]
    async fn snapshot_serializes_state_and_command() {
        let mut ctl = controller();
        ctl.request_analysis("https://b23.tv/xyz");
        ctl.wait_for_analysis().await;

        let json = serde_json::to_value(ctl.snapshot()).expect("serializable");
        assert_eq!(json["url"], "https://b23.tv/xyz");
        assert_eq!(json["mode"], "download");
        assert_eq!(json["analyzing"], false);
        assert_eq!(
            json["command"],
            "BBDown https://b23.tv/xyz --video-only --audio-only"
        );
    }
}
