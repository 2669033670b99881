/// Root of the summed squared deviation of tile usage from an even split
///
/// The mean is `total_cells / counts.len()`, so tiles that appear nowhere
/// still pull the term up. Returns 0 for an empty count table.
pub fn usage_imbalance(counts: &[usize], total_cells: usize) -> f64 {
    if counts.is_empty() {
        return 0.0;
    }
    let mean = total_cells as f64 / counts.len() as f64;
    counts
        .iter()
        .map(|&count| {
            let deviation = count as f64 - mean;
            deviation * deviation
        })
        .sum::<f64>()
        .sqrt()
}
