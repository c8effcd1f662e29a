//! Turns flat per-state arrays into grids for printing. Nothing here feeds back into the solvers.

use crate::algos::model_based::mdp::common::argmax;
use crate::common::{defs::*, error::*};
use itertools::Itertools;
use ndarray::{s, Array1, Array2, Array3};

/// Arrows for `0=up, 1=right, 2=down, 3=left`.
pub const ARROWS: [char; 4] = ['↑', '→', '↓', '←'];

/// Lays a flat per-state array out as a grid of `shape = (nx, ny)` cells with the origin on the
/// lower left corner: row 0 is the top row (`y = ny - 1`) and column `c` is `x = c`.
pub fn reshape_as_gridworld<T: Clone>(
    values: &Array1<T>,
    (nx, ny): (usize, usize),
) -> Result<Array2<T>> {
    let grid = Array2::from_shape_vec((nx, ny), values.to_vec()).map_err(|source| {
        Error::Reshape {
            len: values.len(),
            nx,
            ny,
            source,
        }
    })?;

    Ok(grid.slice(s![.., ..;-1]).t().to_owned())
}

/// Most likely action per cell; the first one on ties.
pub fn policy_map(policy: &Policy, shape: (usize, usize)) -> Result<Array2<Action>> {
    let actions = policy.rows().into_iter().map(argmax).collect::<Array1<_>>();

    reshape_as_gridworld(&actions, shape)
}

/// Full action distribution per cell, indexed `[row, column, action]`.
pub fn policy_table(policy: &Policy, shape: (usize, usize)) -> Result<Array3<f64>> {
    let states = reshape_as_gridworld(&Array1::from_iter(0..policy.nrows()), shape)?;
    let (rows, cols) = states.dim();

    Ok(Array3::from_shape_fn(
        (rows, cols, policy.ncols()),
        |(r, c, a)| policy[[states[[r, c]], a]],
    ))
}

pub fn render_action_map(map: &Array2<Action>) -> String {
    map.rows()
        .into_iter()
        .map(|row| {
            row.iter()
                .map(|&a| ARROWS.get(a).copied().unwrap_or('?'))
                .join(" ")
        })
        .join("\n")
}

pub fn render_values(grid: &Array2<f64>, precision: usize) -> String {
    let width = precision + 5;
    grid.rows()
        .into_iter()
        .map(|row| {
            row.iter()
                .map(|v| format!("{v:>width$.precision$}"))
                .join(" ")
        })
        .join("\n")
}
