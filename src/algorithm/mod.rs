/// Generic simulated annealing driver
pub mod annealer;
/// Efficient bitset implementation for tile compatibility sets
pub mod bitset;
/// Min-conflict repair of violated cells
pub mod repair;
