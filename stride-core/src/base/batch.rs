//! Experience batch.
use super::Env;

/// One recorded step: `(o_t, a_t, r_t, terminal_t)`.
///
/// Immutable once recorded; fields are read through accessors.
pub struct Transition<E: Env> {
    obs: E::Obs,
    act: E::Act,
    reward: f32,
    is_terminal: bool,
}

impl<E: Env> Transition<E> {
    /// Constructs a [`Transition`] object.
    pub fn new(obs: E::Obs, act: E::Act, reward: f32, is_terminal: bool) -> Self {
        Self {
            obs,
            act,
            reward,
            is_terminal,
        }
    }

    /// Observation at the start of the step.
    pub fn obs(&self) -> &E::Obs {
        &self.obs
    }

    /// Action taken.
    pub fn act(&self) -> &E::Act {
        &self.act
    }

    /// Reward received.
    pub fn reward(&self) -> f32 {
        self.reward
    }

    /// Flag denoting if the episode terminated during the step.
    pub fn is_terminal(&self) -> bool {
        self.is_terminal
    }
}

/// An ordered, append-only group of [`Transition`]s handed as one unit
/// between the execution and update stages.
///
/// The batch carries a single `terminal` flag, true iff the episode ended
/// during this batch. A batch pushed into the experience channel is a frozen
/// snapshot: the accumulator it came from starts a fresh batch instead of
/// mutating the pushed one (see [`Agent::take_batch`](super::Agent::take_batch)).
pub struct ExperienceBatch<E: Env> {
    transitions: Vec<Transition<E>>,
    terminal: bool,
}

impl<E: Env> Default for ExperienceBatch<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Env> ExperienceBatch<E> {
    /// Creates an empty, non-terminal batch.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
            terminal: false,
        }
    }

    /// Appends a transition; the batch's terminal flag follows the transition's.
    pub fn push(&mut self, transition: Transition<E>) {
        self.terminal = transition.is_terminal();
        self.transitions.push(transition);
    }

    /// Appends all transitions of `other` and adopts its terminal flag.
    pub fn merge(&mut self, other: ExperienceBatch<E>) {
        self.transitions.extend(other.transitions);
        self.terminal = other.terminal;
    }

    /// True iff the episode ended during this batch.
    pub fn terminal(&self) -> bool {
        self.terminal
    }

    /// The number of transitions in the batch.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// True iff the batch holds no transitions.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// The transitions, in the order they were recorded.
    pub fn transitions(&self) -> &[Transition<E>] {
        &self.transitions
    }
}
