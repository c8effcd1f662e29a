extern crate float_eq;
extern crate gridworld_dp;
mod common;

use common::*;
use float_eq::*;
use gridworld_dp::{ui::*, *};
use ndarray::array;
use rand::prelude::*;
use rstest::*;

#[test]
fn uniform_policy_converges_to_textbook_values() {
    let gw = gridworld();

    let v = uniform_value(&gw, 500);

    let grid = reshape_as_gridworld(&v, SHAPE).unwrap();
    let expected = array![
        [0., -14., -20., -22.],
        [-14., -18., -20., -20.],
        [-20., -20., -18., -14.],
        [-22., -20., -14., 0.],
    ];
    assert_float_eq!(
        grid.iter().copied().collect::<Vec<_>>(),
        expected.iter().copied().collect::<Vec<_>>(),
        abs_all <= 1e-9
    );
}

#[test]
fn evaluation_is_idempotent_at_fixed_point() {
    let gw = gridworld();
    let policy = uniform_policy(gw.n_s(), gw.n_a());
    let v = uniform_value(&gw, 500);

    let again = single_step_policy_evaluation(&policy, &gw, 1., Some(&v));

    assert_float_eq!(again.to_vec(), v.to_vec(), abs_all <= 1e-9);
}

#[test]
fn greedy_policy_follows_shortest_paths() {
    let gw = gridworld();
    let policy = uniform_policy(gw.n_s(), gw.n_a());
    let v = uniform_value(&gw, 500);

    let greedy = greedy_policy_from_value_function(&policy, &gw, &v, 1.);

    assert_shortest_path_policy(&gw, &greedy);
    // Both neighbours of the corner cells are equally close to a terminal.
    assert_eq!(greedy.row(0).to_vec(), vec![0.5, 0.5, 0., 0.]);
    assert_eq!(greedy.row(15).to_vec(), vec![0., 0., 0.5, 0.5]);
    assert_eq!(greedy.row(1).to_vec(), vec![1., 0., 0., 0.]);
}

#[test]
fn greedy_policy_map_snapshot() {
    let gw = gridworld();
    let policy = uniform_policy(gw.n_s(), gw.n_a());
    let v = uniform_value(&gw, 500);

    let greedy = greedy_policy_from_value_function(&policy, &gw, &v, 1.);

    insta::assert_snapshot!(render_action_map(&policy_map(&greedy, SHAPE).unwrap()), @r"
    ↑ ← ← ↓
    ↑ ← ↓ ↓
    ↑ ↑ ↓ ↓
    ↑ → → ↑
    ");
}

#[test]
fn sweeps_under_improved_policy_never_lower_values() {
    let gw = gridworld();
    let uniform = uniform_policy(gw.n_s(), gw.n_a());
    let v = uniform_value(&gw, 500);
    let greedy = greedy_policy_from_value_function(&uniform, &gw, &v, 1.);

    let mut prev = v;
    for _ in 0..50 {
        let next = single_step_policy_evaluation(&greedy, &gw, 1., Some(&prev));
        for (s, (p, n)) in prev.iter().zip(next.iter()).enumerate() {
            assert!(n >= p, "State {s} dropped from {p} to {n}.");
        }
        prev = next;
    }

    let optimal = (0..gw.n_s())
        .map(|s| -(gw.shortest_distance(s).unwrap() as f64))
        .collect::<Vec<_>>();
    assert_float_eq!(prev.to_vec(), optimal, abs_all <= 1e-12);
}

#[test]
fn value_iteration_sweeps_after_improvement_never_lower_values() {
    let gw = gridworld();
    let uniform = uniform_policy(gw.n_s(), gw.n_a());
    let v = uniform_value(&gw, 500);
    let greedy = greedy_policy_from_value_function(&uniform, &gw, &v, 1.);

    // A threshold nothing can fall below keeps the controller sweeping the greedy policy, so
    // each budget replays one more of its sweeps.
    let mut prev = v.clone();
    for max_steps in 1..=20 {
        let config = SolverConfig {
            threshold: f64::NEG_INFINITY,
            max_steps,
            ..Default::default()
        };

        let solution = value_iteration(greedy.clone(), &gw, Some(v.clone()), &config);

        assert!(!solution.converged);
        assert_eq!(solution.steps, max_steps);
        assert_eq!(solution.policy, greedy);
        for (s, (p, n)) in prev.iter().zip(solution.value.iter()).enumerate() {
            assert!(n >= p, "Sweep {max_steps} dropped state {s} from {p} to {n}.");
        }
        prev = solution.value;
    }

    let optimal = (0..gw.n_s())
        .map(|s| -(gw.shortest_distance(s).unwrap() as f64))
        .collect::<Vec<_>>();
    assert_float_eq!(prev.to_vec(), optimal, abs_all <= 1e-12);
}

#[test]
fn value_iteration_finds_shortest_paths() {
    let gw = gridworld();
    let config = SolverConfig {
        threshold: 1e-3,
        max_steps: 1000,
        ..Default::default()
    };

    let solution = value_iteration(uniform_policy(gw.n_s(), gw.n_a()), &gw, None, &config);

    assert!(solution.converged);
    assert!(is_valid_policy(&solution.policy, 1e-12));
    assert_shortest_path_policy(&gw, &solution.policy);
    assert_eq!(solution.greedy_action(2), 0);
    assert_eq!(solution.greedy_action(4), 1);
}

#[rstest]
#[case(1, 1)]
#[case(2718, 25)]
#[case(31415, 250)]
fn controllers_respect_step_budget(#[case] seed: u64, #[case] max_steps: usize) {
    let gw = gridworld();
    let rng = &mut StdRng::seed_from_u64(seed);
    let policy = random_policy(gw.n_s(), gw.n_a(), rng);
    let value = (0..gw.n_s())
        .map(|_| rng.gen_range(-30.0..0.0))
        .collect::<ValueFunction>();

    for stability in [PolicyStability::Aggregate, PolicyStability::ElementWise] {
        let config = SolverConfig {
            threshold: 1e-6,
            max_steps,
            policy_stability: stability,
            ..Default::default()
        };

        let pi = policy_iteration(policy.clone(), &gw, Some(value.clone()), &config);
        let vi = value_iteration(policy.clone(), &gw, Some(value.clone()), &config);

        for solution in [pi, vi] {
            assert!(solution.steps >= 1 && solution.steps <= max_steps);
            assert!(solution.converged || solution.steps == max_steps);
            assert_eq!(solution.value.len(), gw.n_s());
            assert_eq!(solution.policy.dim(), (gw.n_s(), gw.n_a()));
            assert!(is_valid_policy(&solution.policy, 1e-12));
        }
    }
}

#[test]
fn solution_serializes_to_json() {
    let gw = gridworld();
    let config = SolverConfig {
        max_steps: 3,
        ..Default::default()
    };

    let solution = policy_iteration(uniform_policy(gw.n_s(), gw.n_a()), &gw, None, &config);
    let json = serde_json::to_value(&solution).unwrap();

    assert_eq!(json["steps"], 3);
    assert_eq!(json["converged"], false);
    let back = serde_json::from_value::<Solution>(json).unwrap();
    assert_eq!(back.policy.dim(), solution.policy.dim());
    assert_float_eq!(back.value.to_vec(), solution.value.to_vec(), abs_all <= 1e-12);
    assert_float_eq!(
        back.policy.iter().copied().collect::<Vec<_>>(),
        solution.policy.iter().copied().collect::<Vec<_>>(),
        abs_all <= 1e-12
    );
}
