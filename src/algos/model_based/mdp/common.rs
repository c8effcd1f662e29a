use crate::common::defs::*;
use itertools::Itertools;
use ndarray::ArrayView1;
use rand::Rng;
use tracing::{debug, warn};

/// One synchronous Bellman expectation backup of `value` under `policy`.
///
/// `new[s] = reward(s) + sum_a policy[s][a] * discount * value[next(s, a)]`. The reward comes from
/// the model's per-state table; the reward returned by `step` does not take part. Every state
/// reads the same input `value` and a missing `value` means all zeros.
pub fn single_step_policy_evaluation<M: TransitionModel + ?Sized>(
    policy: &Policy,
    mdp: &M,
    discount: f64,
    value: Option<&ValueFunction>,
) -> ValueFunction {
    let zeros;
    let value = match value {
        Some(value) => value,
        None => {
            zeros = ValueFunction::zeros(mdp.n_s());
            &zeros
        }
    };

    (0..mdp.n_s())
        .map(|s| {
            policy
                .row(s)
                .iter()
                .enumerate()
                .fold(mdp.reward(s), |v_s, (a, &p)| {
                    let next = mdp.step(s, a);
                    v_s + p * (discount * value[next.next_state])
                })
        })
        .collect()
}

/// Sweeps until the largest absolute change drops below `threshold` or `max_sweeps` is reached.
/// Returns the value function and the number of sweeps done.
pub fn evaluate_policy<M: TransitionModel + ?Sized>(
    policy: &Policy,
    mdp: &M,
    discount: f64,
    value: Option<ValueFunction>,
    threshold: f64,
    max_sweeps: usize,
) -> (ValueFunction, usize) {
    let mut value = value.unwrap_or_else(|| ValueFunction::zeros(mdp.n_s()));
    for sweep in 1..=max_sweeps {
        let next = single_step_policy_evaluation(policy, mdp, discount, Some(&value));
        let delta = max_abs_difference(&value, &next);
        value = next;
        if delta < threshold {
            debug!(sweep, delta, "Policy evaluation converged.");
            return (value, sweep);
        }
    }

    warn!(
        "Policy evaluation did not reach the selected threshold. Finished after reaching the maximum {} sweeps",
        max_sweeps
    );
    (value, max_sweeps)
}

/// Spreads each state's probability uniformly over the actions with the highest
/// `policy[s][a] * (reward + discount * value[next])`.
///
/// The current action probability scales the return, so an action the current policy never takes
/// scores exactly zero. The maximum is found with exact float equality. A NaN action value makes
/// the maximum NaN, which leaves that state's row all zeros.
pub fn greedy_policy_from_value_function<M: TransitionModel + ?Sized>(
    policy: &Policy,
    mdp: &M,
    value: &ValueFunction,
    discount: f64,
) -> Policy {
    let (n_s, n_a) = (mdp.n_s(), mdp.n_a());
    let mut greedy = Policy::zeros((n_s, n_a));
    for s in 0..n_s {
        let action_values = (0..n_a)
            .map(|a| {
                let step = mdp.step(s, a);
                policy[[s, a]] * (step.reward + discount * value[step.next_state])
            })
            .collect::<Vec<_>>();

        let max = nan_max(action_values.iter().copied());
        let max_value_actions = action_values.iter().positions(|&q| q == max).collect_vec();
        let p = 1. / max_value_actions.len() as f64;
        for a in max_value_actions {
            greedy[[s, a]] = p;
        }
    }

    greedy
}

pub fn uniform_policy(n_s: usize, n_a: usize) -> Policy {
    Policy::from_elem((n_s, n_a), 1. / n_a as f64)
}

/// Rows drawn uniformly at random and normalised. Every entry is strictly positive.
pub fn random_policy<R: Rng + ?Sized>(n_s: usize, n_a: usize, rng: &mut R) -> Policy {
    let mut policy = Policy::from_shape_simple_fn((n_s, n_a), || rng.gen_range(f64::EPSILON..1.));
    for mut row in policy.rows_mut() {
        let total = row.sum();
        row /= total;
    }

    policy
}

/// Every row non-negative and summing to 1 within `tolerance`.
pub fn is_valid_policy(policy: &Policy, tolerance: f64) -> bool {
    policy
        .rows()
        .into_iter()
        .all(|row| row.iter().all(|&p| p >= 0.) && (row.sum() - 1.).abs() <= tolerance)
}

/// Index of the first maximal entry.
pub fn argmax(row: ArrayView1<f64>) -> Action {
    row.iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(best_a, best_p), (a, &p)| {
            if p > best_p {
                (a, p)
            } else {
                (best_a, best_p)
            }
        })
        .0
}

/// `max(value - next)`. Positive only if some state lost value. NaN anywhere yields NaN.
pub(crate) fn signed_delta(value: &ValueFunction, next: &ValueFunction) -> f64 {
    nan_max(value.iter().zip(next.iter()).map(|(v, n)| v - n))
}

/// Largest item, NaN if any item is NaN, negative infinity when empty.
fn nan_max(items: impl Iterator<Item = f64>) -> f64 {
    items.fold(f64::NEG_INFINITY, |m, x| {
        if m.is_nan() || x.is_nan() {
            f64::NAN
        } else {
            m.max(x)
        }
    })
}

fn max_abs_difference(value: &ValueFunction, next: &ValueFunction) -> f64 {
    value
        .iter()
        .zip(next.iter())
        .map(|(v, n)| (v - n).abs())
        .fold(0., f64::max)
}
