//! Greedy cores.

mod activity_selection;
mod coin_change;
mod fractional_knapsack;

pub use activity_selection::{activity_selection, Activity, ActivitySnapshot};
pub use coin_change::{coin_change_greedy, GreedyCoinSnapshot};
pub use fractional_knapsack::{fractional_knapsack, FractionalSnapshot};
