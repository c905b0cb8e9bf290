use std::time::Duration;

use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind,
};
use futures::{FutureExt, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Terminal events
#[derive(Clone, Debug)]
pub enum Event {
    /// Periodic redraw (keeps "Processing..." fresh)
    Tick,
    /// Key press
    Key(KeyEvent),
    /// Mouse click or wheel
    Mouse(MouseEvent),
    /// Bracketed paste
    Paste(String),
    /// Terminal resize
    Resize(u16, u16),
    /// Error reading the terminal
    Error(String),
}

impl Event {
    /// Map a raw terminal event; key releases, mouse motion and focus changes
    /// carry nothing the app acts on
    fn from_terminal(event: CrosstermEvent) -> Option<Self> {
        match event {
            // Windows reports releases too
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Self::Key(key)),
            CrosstermEvent::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(_) | MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                    Some(Self::Mouse(mouse))
                }
                _ => None,
            },
            CrosstermEvent::Paste(text) => Some(Self::Paste(text)),
            CrosstermEvent::Resize(w, h) => Some(Self::Resize(w, h)),
            _ => None,
        }
    }
}

/// Reads terminal input on its own task and forwards it as [`Event`]s
pub struct EventHandler {
    receiver: mpsc::UnboundedReceiver<Event>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl EventHandler {
    /// Start reading input, emitting a tick every `tick_rate`
    pub fn new(tick_rate: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let task = tokio::spawn(Self::run(sender, cancel.clone(), tick_rate));

        Self {
            receiver,
            cancel,
            task,
        }
    }

    async fn run(
        sender: mpsc::UnboundedSender<Event>,
        cancel: CancellationToken,
        tick_rate: Duration,
    ) {
        let mut reader = EventStream::new();
        let mut ticks = tokio::time::interval(tick_rate);

        loop {
            let next = reader.next().fuse();

            let event = tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticks.tick() => Some(Event::Tick),
                maybe_event = next => match maybe_event {
                    Some(Ok(raw)) => Event::from_terminal(raw),
                    Some(Err(e)) => Some(Event::Error(e.to_string())),
                    None => break,
                },
            };

            if let Some(event) = event
                && sender.send(event).is_err()
            {
                break;
            }
        }
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.receiver.recv().await
    }

    /// Stop the reader task
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.cancel.cancel();
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers, MouseButton};

    fn key(kind: KeyEventKind) -> CrosstermEvent {
        CrosstermEvent::Key(KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    fn mouse(kind: MouseEventKind) -> CrosstermEvent {
        CrosstermEvent::Mouse(MouseEvent {
            kind,
            column: 1,
            row: 2,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_only_key_presses_pass() {
        assert!(matches!(
            Event::from_terminal(key(KeyEventKind::Press)),
            Some(Event::Key(_))
        ));
        assert!(Event::from_terminal(key(KeyEventKind::Release)).is_none());
    }

    #[test]
    fn test_mouse_motion_dropped() {
        assert!(matches!(
            Event::from_terminal(mouse(MouseEventKind::Down(MouseButton::Right))),
            Some(Event::Mouse(_))
        ));
        assert!(Event::from_terminal(mouse(MouseEventKind::Moved)).is_none());
        assert!(Event::from_terminal(mouse(MouseEventKind::Up(MouseButton::Left))).is_none());
    }

    #[test]
    fn test_paste_and_resize() {
        assert!(matches!(
            Event::from_terminal(CrosstermEvent::Paste("x".into())),
            Some(Event::Paste(text)) if text == "x"
        ));
        assert!(matches!(
            Event::from_terminal(CrosstermEvent::Resize(80, 24)),
            Some(Event::Resize(80, 24))
        ));
        assert!(Event::from_terminal(CrosstermEvent::FocusGained).is_none());
    }
}
