use super::{common::*, PolicyStability, Solution};
use crate::common::{config::SolverConfig, defs::*};
use tracing::{debug, info, warn};

/// Value iteration: evaluate the current greedy policy one sweep at a time. Whenever the signed
/// delta drops below `config.threshold` a new greedy policy is computed; if
/// `config.policy_stability` judges it equal to the current one the search stops, otherwise it
/// becomes the policy that is evaluated next.
///
/// The input `policy` is the initial greedy policy. On convergence the improved policy is returned.
///
/// With `PolicyStability::Aggregate` the improved policy replaces the current one before the
/// comparison, so the check always passes and the search stops at the first sweep below the
/// threshold.
pub fn value_iteration<M: TransitionModel + ?Sized>(
    policy: Policy,
    mdp: &M,
    value: Option<ValueFunction>,
    config: &SolverConfig,
) -> Solution {
    let mut value = value.unwrap_or_else(|| ValueFunction::zeros(mdp.n_s()));
    let mut greedy_policy = policy;
    if config.max_steps == 0 {
        warn!("Value iteration was given no steps to run.");
        return Solution {
            value,
            policy: greedy_policy,
            steps: 0,
            converged: false,
        };
    }

    let mut step_number = 0;
    loop {
        let policy_value =
            single_step_policy_evaluation(&greedy_policy, mdp, config.discount, Some(&value));
        let delta = signed_delta(&value, &policy_value);
        value = policy_value;
        step_number += 1;
        debug!(step_number, delta, "Value iteration step.");

        if delta < config.threshold {
            let new_policy =
                greedy_policy_from_value_function(&greedy_policy, mdp, &value, config.discount);
            let previous = std::mem::replace(&mut greedy_policy, new_policy);
            let compared = match config.policy_stability {
                PolicyStability::Aggregate => &greedy_policy,
                PolicyStability::ElementWise => &previous,
            };
            if config.policy_stability.is_stable(compared, &greedy_policy) {
                info!(step_number, "Value iteration converged.");
                return Solution {
                    value,
                    policy: greedy_policy,
                    steps: step_number,
                    converged: true,
                };
            }

            debug!(step_number, "Greedy policy changed.");
        }

        if step_number >= config.max_steps {
            warn!(
                "Value iteration did not reach the selected threshold. Finished after reaching the maximum {} steps",
                config.max_steps
            );
            return Solution {
                value,
                policy: greedy_policy,
                steps: step_number,
                converged: false,
            };
        }
    }
}
