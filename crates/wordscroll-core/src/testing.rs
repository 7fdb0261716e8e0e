use crate::command::{Action, Command, CommandInner};
use crate::model::Model;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;

/// A headless harness that drives a [`Model`] without a terminal.
///
/// Immediate messages from [`Command::message`] are queued and flushed with
/// [`drain_messages`](TestProgram::drain_messages); futures are dropped and
/// quit requests are recorded in [`quit_requested`](TestProgram::quit_requested).
///
/// ```rust,ignore
/// let mut prog = TestProgram::<DictionaryApp>::new(flags);
/// prog.send(Msg::Key(key(KeyCode::Char('a'))));
/// prog.drain_messages();
/// assert!(prog.render_string(40, 10).contains("banana"));
/// ```
pub struct TestProgram<M: Model> {
    model: M,
    pending_messages: Vec<M::Message>,
    quit_requested: bool,
}

impl<M: Model> TestProgram<M> {
    /// Call [`Model::init`] and queue any immediate messages it returns.
    pub fn new(flags: M::Flags) -> Self {
        let (model, init_cmd) = M::init(flags);
        let mut program = Self {
            model,
            pending_messages: Vec::new(),
            quit_requested: false,
        };
        program.collect_sync_messages(init_cmd);
        program
    }

    /// Run one update cycle.
    pub fn send(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.collect_sync_messages(cmd);
    }

    /// Process queued messages until no new ones are produced.
    pub fn drain_messages(&mut self) {
        while !self.pending_messages.is_empty() {
            let messages: Vec<_> = self.pending_messages.drain(..).collect();
            for msg in messages {
                let cmd = self.model.update(msg);
                self.collect_sync_messages(cmd);
            }
        }
    }

    /// Send a message and flush everything it triggers.
    pub fn send_and_drain(&mut self, msg: M::Message) {
        self.send(msg);
        self.drain_messages();
    }

    /// Whether any processed command asked the program to quit.
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Shared access to the model for assertions.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Mutable access for arranging state outside the message flow.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Render into a `width` x `height` buffer.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        let mut terminal = match Terminal::new(TestBackend::new(width, height)) {
            Ok(terminal) => terminal,
            Err(err) => panic!("test backend cannot fail: {err}"),
        };
        if let Err(err) = terminal.draw(|frame| self.model.view(frame)) {
            panic!("test backend cannot fail: {err}");
        }
        terminal.backend().buffer().clone()
    }

    /// Render and return the buffer as text, one line per row.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        buffer_lines(&self.render(width, height)).join("\n")
    }

    fn collect_sync_messages(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Action(Action::Message(msg)) => self.pending_messages.push(msg),
            CommandInner::Action(Action::Quit) => self.quit_requested = true,
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.collect_sync_messages(cmd);
                }
            }
            // Futures need a runtime; tests feed their results in by hand.
            CommandInner::Future(_) => {}
        }
    }
}

/// Rows of a buffer as strings with trailing spaces trimmed.
pub fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            let row: String = (area.left()..area.right())
                .map(|x| buf[(x, y)].symbol())
                .collect();
            row.trim_end().to_string()
        })
        .collect()
}
