use gridworld_dp::{ui::*, *};
use itertools::Itertools;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };
    let gw = GridWorld::from_config(&config.grid)?;
    let shape = gw.shape();
    let discount = config.solver.discount;
    tracing::info!(?shape, terminal_states = ?config.grid.terminal_states, "Solving grid world.");

    let policy0 = uniform_policy(gw.n_s(), gw.n_a());
    let val_fun = (0..500).fold(ValueFunction::zeros(gw.n_s()), |v, _| {
        single_step_policy_evaluation(&policy0, &gw, discount, Some(&v))
    });
    println!("Value of the uniform policy after 500 sweeps:");
    println!("{}\n", render_values(&reshape_as_gridworld(&val_fun, shape)?, 3));

    let policy1 = greedy_policy_from_value_function(&policy0, &gw, &val_fun, discount);
    println!("Greedy policy:");
    println!("{}\n", render_action_map(&policy_map(&policy1, shape)?));

    let solutions = [
        (
            "Policy iteration",
            policy_iteration(policy0.clone(), &gw, None, &config.solver),
        ),
        (
            "Value iteration",
            value_iteration(policy0, &gw, None, &config.solver),
        ),
    ];
    for (name, solution) in solutions {
        println!(
            "{name}: converged: {}, steps: {}",
            solution.converged, solution.steps
        );
        println!(
            "Value:\n{}",
            render_values(&reshape_as_gridworld(&solution.value, shape)?, 3)
        );
        println!(
            "Policy:\n{}",
            render_action_map(&policy_map(&solution.policy, shape)?)
        );
        println!("Policy (up, right, down, left):");
        let table = policy_table(&solution.policy, shape)?;
        for row in table.outer_iter() {
            let cells = row
                .outer_iter()
                .map(|p| format!("({})", p.iter().map(|x| format!("{x:.2}")).join(", ")))
                .join(" ");
            println!("{cells}");
        }
        println!();
    }

    Ok(())
}
