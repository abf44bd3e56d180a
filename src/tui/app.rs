use crate::config::Config;
use crate::core::{AnalyzeOutcome, Mode, SessionController, ViewState};
use crate::error::Result;
#[cfg(feature = "clipboard")]
use crate::tui::clipboard::ClipboardWorker;
use crate::tui::components::{ActivityLog, InputField, ModeCards, ProgressBar};
use crate::tui::events::AppEvent;
use crossterm::event::{KeyCode, KeyEvent};
use std::time::Instant;
use tracing::debug;

const TUTORIAL_STATUS: &str = "Parsing subtitles and key frames...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Cards,
}

pub struct App {
    pub should_quit: bool,
    pub focus: Focus,

    pub url_input: InputField,
    pub cards: ModeCards,
    pub tutorial_progress: ProgressBar,
    pub activity: ActivityLog,

    pub controller: SessionController,

    /// Spawned on first copy.
    #[cfg(feature = "clipboard")]
    pub clipboard: Option<ClipboardWorker>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let mut tutorial_progress = ProgressBar::new(config.tutorial_preview);
        tutorial_progress.set_message(TUTORIAL_STATUS);

        let mut app = Self {
            should_quit: false,
            focus: Focus::Input,

            url_input: InputField::new("Video link", "Paste a bilibili link (BV/av/ep)..."),
            cards: ModeCards::new(),
            tutorial_progress,
            activity: ActivityLog::new(50),

            controller: SessionController::new(config),

            #[cfg(feature = "clipboard")]
            clipboard: None,
        };
        app.sync_focus();
        app
    }

    pub fn view_state(&self) -> ViewState {
        self.controller.view_state()
    }

    pub fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Quit => {
                self.should_quit = true;
            }
            AppEvent::Key(key) => {
                self.handle_key(key)?;
            }
            AppEvent::Tick => {}
        }

        self.on_tick(Instant::now());
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.focus {
            Focus::Input => self.handle_input_key(key),
            Focus::Cards => self.handle_cards_key(key),
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Enter => self.analyze(),
            KeyCode::Esc => {
                if self.controller.cancel_analysis() {
                    self.activity.push("Analysis cancelled");
                } else if self.controller.session().mode.is_some() {
                    self.set_focus(Focus::Cards);
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::Tab => {
                if self.controller.session().mode.is_some() {
                    self.set_focus(Focus::Cards);
                }
            }
            _ => {
                if self.url_input.handle_key(key) {
                    self.controller.set_url(self.url_input.value.as_str());
                }
            }
        }
        Ok(())
    }

    fn handle_cards_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(current) = self.controller.session().mode else {
            self.set_focus(Focus::Input);
            return Ok(());
        };

        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.select_mode(ModeCards::neighbour(current, -1));
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.select_mode(ModeCards::neighbour(current, 1));
            }
            KeyCode::Char(c @ '1'..='9') => {
                if let Some(mode) = c.to_digit(10).and_then(|n| ModeCards::by_index(n as usize)) {
                    self.select_mode(mode);
                }
            }
            #[cfg(feature = "clipboard")]
            KeyCode::Char('c') if current == Mode::Download => self.copy_command(),
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab | KeyCode::Esc => self.set_focus(Focus::Input),
            KeyCode::Enter => self.analyze(),
            _ => {}
        }
        Ok(())
    }

    /// Drain finished analyses and clipboard copies, and advance the tutorial gauge.
    pub fn on_tick(&mut self, now: Instant) {
        #[cfg(feature = "clipboard")]
        self.drain_clipboard();

        if self.controller.poll() && self.view_state() == ViewState::ModeChosen(Mode::Download) {
            self.activity.push("Link recognised, download mode ready");
            self.set_focus(Focus::Cards);
        }

        if self.controller.session().mode == Some(Mode::Tutorial) {
            self.tutorial_progress.start(now);
        }
        self.tutorial_progress.tick(now);
    }

    fn analyze(&mut self) {
        let url = self.url_input.value.clone();

        if !url.is_empty() && self.controller.session().mode.is_some() {
            self.controller.reset();
            self.tutorial_progress.reset();
        }

        match self.controller.request_analysis(&url) {
            AnalyzeOutcome::Started => {
                self.activity.push(format!("Analyzing {url}"));
                self.set_focus(Focus::Input);
            }
            AnalyzeOutcome::IgnoredEmpty => {
                self.activity.push("Paste a link first");
            }
            outcome => debug!(?outcome, "analysis request not started"),
        }
    }

    fn select_mode(&mut self, mode: Mode) {
        if self.controller.session().mode == Some(mode) {
            return;
        }

        self.controller.select_mode(mode);
        self.tutorial_progress.reset();
        self.activity.push(format!("Switched to {mode} mode"));
    }

    #[cfg(feature = "clipboard")]
    fn copy_command(&mut self) {
        let command = self.controller.compose_command();
        let worker = self.clipboard.get_or_insert_with(ClipboardWorker::spawn);
        if let Err(e) = worker.copy(&command) {
            self.activity.push(format!("Clipboard copy failed: {e}"));
        }
    }

    #[cfg(feature = "clipboard")]
    fn drain_clipboard(&mut self) {
        let Some(worker) = &self.clipboard else {
            return;
        };

        for result in worker.drain() {
            match result {
                Ok(()) => self.activity.push("Command copied to clipboard"),
                Err(e) => self.activity.push(format!("Clipboard copy failed: {e}")),
            }
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.sync_focus();
    }

    fn sync_focus(&mut self) {
        self.url_input.focused = self.focus == Focus::Input;
        self.cards.focused = self.focus == Focus::Cards;
    }
}
