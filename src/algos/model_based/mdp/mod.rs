pub mod common;
pub mod pi;
pub mod vi;

use crate::common::defs::*;
use serde::{Deserialize, Serialize};

/// How value iteration decides that two successive greedy policies are the same.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyStability {
    /// Collapses each policy to "has no zero entry" and compares those two booleans. Any two
    /// policies that both contain a zero compare equal. Value iteration compares the improved
    /// policy with itself under this mode.
    #[default]
    Aggregate,

    /// Every action probability of every state must match.
    ElementWise,
}

impl PolicyStability {
    pub fn is_stable(&self, previous: &Policy, next: &Policy) -> bool {
        match self {
            Self::Aggregate => all_nonzero(previous) == all_nonzero(next),
            Self::ElementWise => previous == next,
        }
    }
}

fn all_nonzero(policy: &Policy) -> bool {
    policy.iter().all(|&p| p != 0.)
}

/// What the controllers hand back. `converged == false` means the step budget ran out and
/// `value`/`policy` are the latest estimates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub value: ValueFunction,
    pub policy: Policy,
    /// Evaluation sweeps performed, never more than the configured `max_steps`.
    pub steps: usize,
    pub converged: bool,
}

impl Solution {
    pub fn v_star(&self, s: State) -> Reward {
        self.value[s]
    }

    /// First action with the highest probability in `s`.
    pub fn greedy_action(&self, s: State) -> Action {
        common::argmax(self.policy.row(s))
    }
}
