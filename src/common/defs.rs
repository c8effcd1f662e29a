use ndarray::{Array1, Array2};

pub type State = usize;
pub type Action = usize;
pub type Reward = f64;

/// One scalar per state: the expected discounted return from that state.
pub type ValueFunction = Array1<Reward>;

/// `n_s x n_a` matrix, each row a distribution over actions.
pub type Policy = Array2<f64>;

/// Outcome of looking one step ahead from a state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub next_state: State,
    pub reward: Reward,
    pub done: bool,
}

/// Fully known, deterministic, tabular model of an MDP - Sutton & Barto 2018.
///
/// The solvers only ever see an environment through this trait. `step` must be total over
/// `0..n_s() x 0..n_a()` and must never return a state outside `0..n_s()`.
pub trait TransitionModel {
    fn n_s(&self) -> usize;

    fn n_a(&self) -> usize;

    fn step(&self, s: State, a: Action) -> Step;

    /// Immediate reward associated with being in `s`, independent of the action taken.
    fn reward(&self, s: State) -> Reward;
}
