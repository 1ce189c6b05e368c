//! Typed input and output events
//!
//! The session never broadcasts; callers hand it an [`EventSink`] on every
//! call that can produce events.

use std::sync::mpsc::Sender;

use serde::{Deserialize, Serialize};

use super::grid::{Cell, Direction};

/// Identifies which entity an event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityId {
    Snake,
    Food,
    Enemy(u32),
}

/// Commands from the host's input collector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Direction(Direction),
    TogglePause,
    Restart,
    Exit,
}

/// Notifications for the rendering/audio layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Entity stepped; `head` is its new head cell
    Moved { entity: EntityId, head: Cell },
    /// Entity kept its tail on the last step
    Grew { entity: EntityId },
    /// Entity was relocated to `cell` with a fresh single-segment body
    Respawned { entity: EntityId, cell: Cell },
    EnemySpawned { id: u32 },
    ScoreChanged { score: u32 },
    GameOver { score: u32 },
    Paused(bool),
    Restarted,
}

/// Destination for emitted events
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

impl EventSink for Sender<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        // A dropped receiver just means nobody is listening anymore
        let _ = self.send(event);
    }
}

/// Sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: GameEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_channel_sink_delivers_in_order() {
        let (mut tx, rx) = mpsc::channel();
        tx.emit(GameEvent::ScoreChanged { score: 1 });
        tx.emit(GameEvent::Paused(true));
        let received: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            received,
            vec![GameEvent::ScoreChanged { score: 1 }, GameEvent::Paused(true)]
        );
    }

    #[test]
    fn test_channel_sink_ignores_closed_receiver() {
        let (mut tx, rx) = mpsc::channel();
        drop(rx);
        tx.emit(GameEvent::Restarted);
    }
}
