//! Mathematical utilities for the annealing energy and schedule

/// Tile usage imbalance term of the grid energy
pub mod balance;
/// Temperature schedule and Metropolis acceptance
pub mod schedule;
