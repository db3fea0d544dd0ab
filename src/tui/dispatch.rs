//! Actions and the views that dispatch them.
//!
//! A view knows which action it stands for and holds a [`Dispatcher`]; it
//! never touches the game state. The [`super::App`] drains the queue and
//! applies each action as one transition.

use std::sync::mpsc::{Receiver, Sender, channel};
use tictactoe_timeline_core::Position;
use tracing::{instrument, warn};

/// A user intent, applied to the game state by the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Place the active player's mark.
    PlaceMark(Position),
    /// Display the snapshot at a storage index.
    JumpTo(usize),
    /// Reverse the history order.
    ToggleOrder,
    /// Leave the UI.
    Quit,
}

/// Cloneable handle for queueing actions.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    tx: Sender<Action>,
}

impl Dispatcher {
    /// Creates a dispatcher and the receiver that drains it.
    pub fn channel() -> (Self, Receiver<Action>) {
        let (tx, rx) = channel();
        (Self { tx }, rx)
    }

    /// Queues an action.
    #[instrument(skip(self))]
    pub fn dispatch(&self, action: Action) {
        if self.tx.send(action).is_err() {
            warn!(?action, "Action dropped, receiver is gone");
        }
    }
}

/// A board cell.
#[derive(Debug, Clone)]
pub struct CellView {
    position: Position,
    dispatcher: Dispatcher,
}

impl CellView {
    /// Creates the view for `position`.
    pub fn new(position: Position, dispatcher: Dispatcher) -> Self {
        Self {
            position,
            dispatcher,
        }
    }

    /// The cell this view stands for.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Requests a mark on this cell.
    pub fn click(&self) {
        self.dispatcher.dispatch(Action::PlaceMark(self.position));
    }
}

/// An entry of the move list.
#[derive(Debug, Clone)]
pub struct MoveView {
    index: usize,
    dispatcher: Dispatcher,
}

impl MoveView {
    /// Creates the view for the snapshot at storage `index`.
    pub fn new(index: usize, dispatcher: Dispatcher) -> Self {
        Self { index, dispatcher }
    }

    /// Requests a jump to this entry's snapshot.
    pub fn click(&self) {
        self.dispatcher.dispatch(Action::JumpTo(self.index));
    }
}

/// The ordering toggle.
#[derive(Debug, Clone)]
pub struct ToggleView {
    dispatcher: Dispatcher,
}

impl ToggleView {
    /// Creates the toggle view.
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Requests an order toggle.
    pub fn click(&self) {
        self.dispatcher.dispatch(Action::ToggleOrder);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_views_share_one_queue() {
        let (dispatcher, rx) = Dispatcher::channel();
        CellView::new(Position::Center, dispatcher.clone()).click();
        MoveView::new(0, dispatcher.clone()).click();
        ToggleView::new(dispatcher).click();

        let actions: Vec<Action> = rx.try_iter().collect();
        assert_eq!(
            actions,
            [
                Action::PlaceMark(Position::Center),
                Action::JumpTo(0),
                Action::ToggleOrder
            ]
        );
    }

    #[test]
    fn test_dispatch_without_receiver_is_harmless() {
        let (dispatcher, rx) = Dispatcher::channel();
        drop(rx);
        dispatcher.dispatch(Action::Quit);
    }
}
