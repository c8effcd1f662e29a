use crate::common::{config::GridWorldConfig, defs::*, error::*};
use ndarray::Array1;

pub const UP: Action = 0;
pub const RIGHT: Action = 1;
pub const DOWN: Action = 2;
pub const LEFT: Action = 3;

/// Deterministic grid world - Sutton & Barto 2018, Example 4.1.
///
/// Cells are flattened as `s = x * ny + y` with the origin on the lower left corner and `y`
/// growing upwards. Moves that would leave the grid keep the agent in place. Terminal states
/// absorb every action with zero reward.
#[derive(Debug, Clone)]
pub struct GridWorld {
    nx: usize,
    ny: usize,
    terminal: Vec<bool>,
    reward_matrix: Array1<Reward>,
    step_reward: Reward,
}

impl GridWorld {
    pub fn new(shape: (usize, usize), terminal_states: &[State]) -> Result<Self> {
        Self::with_step_reward(shape, terminal_states, -1.0)
    }

    pub fn with_step_reward(
        (nx, ny): (usize, usize),
        terminal_states: &[State],
        step_reward: Reward,
    ) -> Result<Self> {
        if nx == 0 || ny == 0 {
            return Err(Error::InvalidShape { nx, ny });
        }

        let n_s = nx * ny;
        let mut terminal = vec![false; n_s];
        for &s in terminal_states {
            if s >= n_s {
                return Err(Error::TerminalOutOfRange { state: s, n_s });
            }
            terminal[s] = true;
        }

        let reward_matrix = terminal
            .iter()
            .map(|&t| if t { 0. } else { step_reward })
            .collect();

        Ok(Self {
            nx,
            ny,
            terminal,
            reward_matrix,
            step_reward,
        })
    }

    pub fn from_config(config: &GridWorldConfig) -> Result<Self> {
        Self::with_step_reward(config.shape, &config.terminal_states, config.step_reward)
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    pub fn is_terminal(&self, s: State) -> bool {
        self.terminal[s]
    }

    pub fn reward_matrix(&self) -> &Array1<Reward> {
        &self.reward_matrix
    }

    pub fn coordinates(&self, s: State) -> (usize, usize) {
        (s / self.ny, s % self.ny)
    }

    pub fn state_at(&self, x: usize, y: usize) -> State {
        x * self.ny + y
    }

    /// Manhattan distance to the closest terminal state, `None` if there is no terminal state.
    pub fn shortest_distance(&self, s: State) -> Option<usize> {
        let (x, y) = self.coordinates(s);
        self.terminal
            .iter()
            .enumerate()
            .filter(|(_, t)| **t)
            .map(|(t, _)| {
                let (tx, ty) = self.coordinates(t);
                x.abs_diff(tx) + y.abs_diff(ty)
            })
            .min()
    }
}

impl TransitionModel for GridWorld {
    fn n_s(&self) -> usize {
        self.nx * self.ny
    }

    fn n_a(&self) -> usize {
        4
    }

    fn step(&self, s: State, a: Action) -> Step {
        if self.terminal[s] {
            return Step {
                next_state: s,
                reward: 0.,
                done: true,
            };
        }

        let (x, y) = self.coordinates(s);
        let (x, y) = match a {
            UP => (x, (y + 1).min(self.ny - 1)),
            RIGHT => ((x + 1).min(self.nx - 1), y),
            DOWN => (x, y.saturating_sub(1)),
            LEFT => (x.saturating_sub(1), y),
            _ => panic!("Action {a} is not one of up, right, down, left."),
        };

        let next_state = self.state_at(x, y);
        Step {
            next_state,
            reward: self.step_reward,
            done: self.terminal[next_state],
        }
    }

    fn reward(&self, s: State) -> Reward {
        self.reward_matrix[s]
    }
}
