extern crate ndarray;
extern crate rand;
extern crate serde;
extern crate serde_json;

pub mod algos;
pub mod common;
pub mod envs;
pub mod ui;

pub use algos::model_based::mdp::{
    common::*, pi::policy_iteration, vi::value_iteration, PolicyStability, Solution,
};
pub use common::{config::*, defs::*, error::*};
pub use envs::gridworld::GridWorld;
