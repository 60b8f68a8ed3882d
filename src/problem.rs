//! The face a puzzle shows to generic search engines.

use std::hash::Hash;

use crate::{Action, Game, State};

/// A finite state-transition system. Search engines hold the states; the
/// problem itself stays immutable and may be shared between searches.
pub trait Problem {
    type State: Clone + Eq + Hash;
    type Action: Copy;

    fn initial(&self) -> Self::State;

    fn is_goal(&self, state: &Self::State) -> bool;

    /// Actions applicable to `state`, in a fixed order.
    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// The state `action` leads to. Actions not applicable to `state` leave
    /// it unchanged.
    fn result(&self, state: &Self::State, action: &Self::Action) -> Self::State;

    /// Constant unless a heuristic is plugged in.
    fn value(&self, _state: &Self::State) -> i64 {
        1
    }
}

impl Problem for Game {
    type State = State;
    type Action = Action;

    fn initial(&self) -> State {
        Game::initial(self)
    }

    fn is_goal(&self, state: &State) -> bool {
        Game::is_goal(self, state)
    }

    fn actions(&self, state: &State) -> Vec<Action> {
        Game::actions(self, *state).to_vec()
    }

    fn result(&self, state: &State, action: &Action) -> State {
        self.apply(*state, *action).unwrap_or(*state)
    }
}
