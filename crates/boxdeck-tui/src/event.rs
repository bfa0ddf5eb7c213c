//! Terminal event handling

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex, OwnedMutexGuard};

/// Terminal events
#[derive(Debug, Clone)]
pub enum Event {
    /// No input within the tick rate; only triggers a redraw
    Tick,
    /// Key press
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
}

/// Reads terminal input on a blocking task
///
/// The reader only polls stdin while it holds the input lock. [`pause`]
/// takes that lock, so while the returned guard lives no keystroke is
/// consumed here and a foreground child gets all of them.
///
/// [`pause`]: EventHandler::pause
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    input_lock: Arc<Mutex<()>>,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let input_lock = Arc::new(Mutex::new(()));
        let lock = input_lock.clone();

        tokio::task::spawn_blocking(move || loop {
            let guard = lock.blocking_lock();
            let event = match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                        Some(Event::Key(key))
                    }
                    Ok(CrosstermEvent::Resize(w, h)) => Some(Event::Resize(w, h)),
                    _ => None,
                },
                Ok(false) | Err(_) => Some(Event::Tick),
            };
            drop(guard);

            if let Some(event) = event {
                if tx.send(event).is_err() {
                    break;
                }
            }
        });

        Self { rx, input_lock }
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Stop reading input until the guard is dropped, then discard anything
    /// queued before the pause
    pub async fn pause(&mut self) -> OwnedMutexGuard<()> {
        let guard = self.input_lock.clone().lock_owned().await;
        while self.rx.try_recv().is_ok() {}
        guard
    }
}
