use gridworld_dp::*;

pub const SHAPE: (usize, usize) = (4, 4);

pub fn gridworld() -> GridWorld {
    GridWorld::new(SHAPE, &[3, 12]).unwrap()
}

/// Value of the uniform random policy after `sweeps` synchronous backups from zero.
#[allow(dead_code)]
pub fn uniform_value(gw: &GridWorld, sweeps: usize) -> ValueFunction {
    let policy = uniform_policy(gw.n_s(), gw.n_a());
    (0..sweeps).fold(ValueFunction::zeros(gw.n_s()), |v, _| {
        single_step_policy_evaluation(&policy, gw, 1., Some(&v))
    })
}

/// Panics unless every action with non-zero probability moves one cell closer to a terminal.
#[allow(dead_code)]
pub fn assert_shortest_path_policy(gw: &GridWorld, policy: &Policy) {
    for s in (0..gw.n_s()).filter(|&s| !gw.is_terminal(s)) {
        let d = gw.shortest_distance(s).unwrap();
        for a in (0..gw.n_a()).filter(|&a| policy[[s, a]] > 0.) {
            let next = gw.step(s, a).next_state;
            assert_eq!(
                gw.shortest_distance(next),
                Some(d - 1),
                "Action {a} from state {s} does not shorten the path."
            );
        }
    }
}
