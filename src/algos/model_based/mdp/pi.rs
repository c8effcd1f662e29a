use super::{common::*, Solution};
use crate::common::{config::SolverConfig, defs::*};
use tracing::{debug, info, warn};

/// Policy iteration: evaluate the current policy with a single sweep, then replace it with the
/// policy that is greedy with respect to the new values.
///
/// Stops as soon as the signed delta `max(value - new_value)` drops below `config.threshold`, or
/// with a warning once `config.max_steps` sweeps have been done. A sweep that only raises values
/// gives a negative delta and therefore counts as converged.
pub fn policy_iteration<M: TransitionModel + ?Sized>(
    policy: Policy,
    mdp: &M,
    value: Option<ValueFunction>,
    config: &SolverConfig,
) -> Solution {
    let mut value = value.unwrap_or_else(|| ValueFunction::zeros(mdp.n_s()));
    let mut policy = policy;
    if config.max_steps == 0 {
        warn!("Policy iteration was given no steps to run.");
        return Solution {
            value,
            policy,
            steps: 0,
            converged: false,
        };
    }

    let mut step_number = 0;
    loop {
        let policy_value = single_step_policy_evaluation(&policy, mdp, config.discount, Some(&value));
        let delta = signed_delta(&value, &policy_value);
        policy = greedy_policy_from_value_function(&policy, mdp, &policy_value, config.discount);
        value = policy_value;
        step_number += 1;
        debug!(step_number, delta, "Policy iteration step.");

        if delta < config.threshold {
            info!(step_number, "Policy iteration converged.");
            return Solution {
                value,
                policy,
                steps: step_number,
                converged: true,
            };
        }

        if step_number >= config.max_steps {
            warn!(
                "Policy iteration did not reach the selected threshold. Finished after reaching the maximum {} steps",
                config.max_steps
            );
            return Solution {
                value,
                policy,
                steps: step_number,
                converged: false,
            };
        }
    }
}
