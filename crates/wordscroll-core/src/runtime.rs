use crate::command::{Action, Command, CommandInner};
use crate::logging;
use crate::model::Model;
use crate::subscription::SubscriptionManager;
use crossterm::cursor;
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout, Write};
use std::path::PathBuf;
use std::sync::Once;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::time::{Interval, MissedTickBehavior};

/// Upper bound on messages handled back to back before yielding to a frame.
const BURST_LIMIT: usize = 100;
/// How long a burst may keep the loop from drawing.
const BURST_WINDOW: Duration = Duration::from_micros(100);

/// Failure to start, run or tear down a [`Program`].
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    /// Terminal setup, rendering, teardown, or opening the log file failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// The `tracing` subscriber could not be installed.
    #[error("failed to install log subscriber: {0}")]
    Logging(String),
}

/// Configuration for a [`Program`].
///
/// ```rust,ignore
/// let opts = ProgramOptions {
///     title: Some("wordscroll".into()),
///     log_file: Some(std::env::temp_dir().join("wordscroll.log")),
///     ..ProgramOptions::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ProgramOptions {
    /// Redraws per second at most (default 60, clamped to 1..=120).
    pub fps: u32,
    pub alt_screen: bool,
    /// Needed for wheel scrolling (default on).
    pub mouse_capture: bool,
    /// Deliver pastes as a single event (default on).
    pub bracketed_paste: bool,
    pub title: Option<String>,
    /// Restore the terminal before the previous panic hook runs.
    pub catch_panics: bool,
    /// Stop on a SIGINT that bypasses raw mode.
    pub handle_signals: bool,
    /// Send `tracing` output to this file.
    pub log_file: Option<PathBuf>,
    /// `EnvFilter` directive for the log file.
    pub log_directive: String,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            fps: 60,
            alt_screen: true,
            mouse_capture: true,
            bracketed_paste: true,
            title: None,
            catch_panics: true,
            handle_signals: true,
            log_file: None,
            log_directive: logging::DEFAULT_DIRECTIVE.to_string(),
        }
    }
}

impl ProgramOptions {
    fn frame_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps.clamp(1, 120)))
    }
}

/// Terminal modes switched on for the lifetime of a program.
#[derive(Debug, Clone, Copy)]
struct TerminalSession {
    alt_screen: bool,
    mouse_capture: bool,
    bracketed_paste: bool,
}

impl TerminalSession {
    fn from_options(options: &ProgramOptions) -> Self {
        Self {
            alt_screen: options.alt_screen,
            mouse_capture: options.mouse_capture,
            bracketed_paste: options.bracketed_paste,
        }
    }

    /// Switch the terminal over. A failure part way leaves the session again
    /// so raw mode is not left behind.
    fn enter(self, title: Option<&str>) -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut out = io::stdout();
        let terminal = self
            .write_modes(&mut out, title)
            .and_then(|()| Terminal::new(CrosstermBackend::new(out)));
        undo_on_err(terminal, || self.leave())
    }

    fn write_modes<W: Write>(self, out: &mut W, title: Option<&str>) -> io::Result<()> {
        if self.alt_screen {
            execute!(out, EnterAlternateScreen)?;
        }
        if self.bracketed_paste {
            execute!(out, EnableBracketedPaste)?;
        }
        if self.mouse_capture {
            execute!(out, EnableMouseCapture)?;
        }
        if let Some(title) = title {
            execute!(out, SetTitle(title))?;
        }
        execute!(out, cursor::Hide)
    }

    /// Undo every mode. All steps run even if one fails; only the raw-mode
    /// result is reported.
    fn leave(self) -> io::Result<()> {
        let raw = disable_raw_mode();
        let mut out = io::stdout();
        if self.bracketed_paste {
            execute!(out, DisableBracketedPaste).ok();
        }
        if self.mouse_capture {
            execute!(out, DisableMouseCapture).ok();
        }
        execute!(out, cursor::Show).ok();
        if self.alt_screen {
            execute!(out, LeaveAlternateScreen).ok();
        }
        raw
    }

    /// Chain a panic hook that leaves the session first. Installed once per
    /// process.
    fn restore_on_panic(self) {
        static HOOK: Once = Once::new();
        HOOK.call_once(move || {
            let previous = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                let _ = self.leave();
                previous(info);
            }));
        });
    }
}

/// Drives a [`Model`] against the real terminal.
///
/// Subscriptions and finished commands all feed one unbounded channel
/// drained by the task that owns the model, so updates never overlap.
/// Drawing happens on a frame tick and only when something changed.
///
/// ```rust,ignore
/// let app = Program::<DictionaryApp>::new(flags)?.run().await?;
/// ```
pub struct Program<M: Model> {
    model: M,
    terminal: Terminal<CrosstermBackend<Stdout>>,
    session: TerminalSession,
    tx: mpsc::UnboundedSender<M::Message>,
    rx: mpsc::UnboundedReceiver<M::Message>,
    subscriptions: SubscriptionManager<M::Message>,
    options: ProgramOptions,
    dirty: bool,
    quitting: bool,
}

impl<M: Model> Program<M> {
    pub fn new(flags: M::Flags) -> Result<Self, ProgramError> {
        Self::with_options(flags, ProgramOptions::default())
    }

    /// Logging is installed before the model is initialised so `init` is
    /// traced too.
    pub fn with_options(flags: M::Flags, options: ProgramOptions) -> Result<Self, ProgramError> {
        if let Some(ref path) = options.log_file {
            logging::init_file_logging(path, &options.log_directive)?;
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let (model, init_cmd) = M::init(flags);

        let session = TerminalSession::from_options(&options);
        if options.catch_panics {
            session.restore_on_panic();
        }
        let terminal = session.enter(options.title.as_deref())?;

        let mut program = Self {
            model,
            terminal,
            session,
            subscriptions: SubscriptionManager::new(tx.clone()),
            tx,
            rx,
            options,
            dirty: true,
            quitting: false,
        };
        tracing::info!(fps = program.options.fps, "program initialized");

        program.execute(init_cmd);
        program.sync_subscriptions();
        Ok(program)
    }

    /// Inject messages from outside the loop.
    pub fn sender(&self) -> mpsc::UnboundedSender<M::Message> {
        self.tx.clone()
    }

    /// Run until the model quits, then hand it back.
    pub async fn run(mut self) -> Result<M, ProgramError> {
        let outcome = self.event_loop().await;

        tracing::info!("shutting down");
        self.subscriptions.shutdown();
        self.session.leave()?;

        outcome.map(|()| self.model)
    }

    async fn event_loop(&mut self) -> Result<(), ProgramError> {
        self.draw()?;
        let mut frames = frame_ticker(self.options.frame_period());
        let handle_signals = self.options.handle_signals;

        loop {
            tokio::select! {
                biased;

                _ = tokio::signal::ctrl_c(), if handle_signals => {
                    tracing::info!("received ctrl+c signal");
                    return Ok(());
                }

                Some(msg) = self.rx.recv() => {
                    self.handle(msg);
                    self.drain_burst();
                    if self.quitting {
                        return Ok(());
                    }
                }

                _ = frames.tick() => {
                    if self.dirty {
                        self.draw()?;
                        self.dirty = false;
                    }
                }
            }
        }
    }

    /// Handle messages that are already queued (fast wheel scrolling, a
    /// paste) before giving the frame tick a chance.
    fn drain_burst(&mut self) {
        let deadline = Instant::now() + BURST_WINDOW;
        for _ in 0..BURST_LIMIT {
            if self.quitting || Instant::now() >= deadline {
                break;
            }
            let Ok(msg) = self.rx.try_recv() else {
                break;
            };
            self.handle(msg);
        }
    }

    fn handle(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.execute(cmd);
        self.sync_subscriptions();
        self.dirty = true;
    }

    fn sync_subscriptions(&mut self) {
        let declared = self.model.subscriptions();
        self.subscriptions.reconcile(declared);
    }

    fn execute(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Action(Action::Message(msg)) => {
                let _ = self.tx.send(msg);
            }
            CommandInner::Action(Action::Quit) => {
                tracing::debug!("quit requested");
                self.quitting = true;
            }
            CommandInner::Future(fut) => {
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let _ = tx.send(fut.await);
                });
            }
            CommandInner::Batch(cmds) => cmds.into_iter().for_each(|cmd| self.execute(cmd)),
        }
    }

    fn draw(&mut self) -> Result<(), ProgramError> {
        let model = &self.model;
        self.terminal.draw(|frame| model.view(frame))?;
        Ok(())
    }
}

/// Run `undo` when `result` is an error, keeping the original error.
fn undo_on_err<T>(result: io::Result<T>, undo: impl FnOnce() -> io::Result<()>) -> io::Result<T> {
    if let Err(ref err) = result {
        if let Err(undo_err) = undo() {
            tracing::warn!(error = %undo_err, %err, "terminal restore failed");
        }
    }
    result
}

fn frame_ticker(period: Duration) -> Interval {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_capture_the_mouse() {
        let opts = ProgramOptions::default();
        assert!(opts.mouse_capture);
        assert!(opts.alt_screen);
        assert_eq!(opts.fps, 60);
        assert_eq!(opts.log_directive, "info");
        assert!(opts.log_file.is_none());
    }

    #[test]
    fn frame_period_is_clamped() {
        let fast = ProgramOptions {
            fps: 10_000,
            ..ProgramOptions::default()
        };
        assert_eq!(fast.frame_period(), Duration::from_secs_f64(1.0 / 120.0));
        let stopped = ProgramOptions {
            fps: 0,
            ..ProgramOptions::default()
        };
        assert_eq!(stopped.frame_period(), Duration::from_secs(1));
    }

    /// Accepts `budget` writes, then fails.
    struct FlakyWriter {
        budget: usize,
    }

    impl Write for FlakyWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.budget == 0 {
                return Err(io::Error::other("terminal went away"));
            }
            self.budget -= 1;
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn session() -> TerminalSession {
        TerminalSession::from_options(&ProgramOptions::default())
    }

    #[test]
    fn write_modes_reports_a_failed_step() {
        let mut out = FlakyWriter { budget: 1 };
        let err = session().write_modes(&mut out, Some("wordscroll")).unwrap_err();
        assert_eq!(err.to_string(), "terminal went away");
    }

    #[test]
    fn write_modes_succeeds_on_a_working_writer() {
        let mut out: Vec<u8> = Vec::new();
        session().write_modes(&mut out, None).unwrap();
        assert!(!out.is_empty());
    }

    #[test]
    fn failed_setup_is_undone() {
        let mut undone = 0;
        let mut out = FlakyWriter { budget: 0 };
        let result = undo_on_err(session().write_modes(&mut out, None), || {
            undone += 1;
            Ok(())
        });
        assert!(result.is_err());
        assert_eq!(undone, 1);
    }

    #[test]
    fn successful_setup_is_kept() {
        let mut undone = 0;
        let result = undo_on_err(Ok(7), || {
            undone += 1;
            Ok(())
        });
        assert_eq!(result.unwrap(), 7);
        assert_eq!(undone, 0);
    }

    #[test]
    fn undo_failure_keeps_the_setup_error() {
        let result: io::Result<()> = undo_on_err(Err(io::Error::other("no alt screen")), || {
            Err(io::Error::other("still raw"))
        });
        assert_eq!(result.unwrap_err().to_string(), "no alt screen");
    }

    #[test]
    fn io_error_display() {
        let err = ProgramError::from(io::Error::other("no tty"));
        assert_eq!(err.to_string(), "IO error: no tty");
    }
}
