//! Min-conflict repair sweeps over a grid
//!
//! Each violated cell is reassigned to a tile that the largest number of its
//! neighbors would accept. Cheap and greedy, useful for polishing an annealed
//! grid that still has a handful of violations.

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use crate::io::error::Result;
use crate::spatial::{Direction, GridState};

/// Tiles accepted by the most existing neighbors of `(x, y)`
///
/// Neighbor `n` in direction `d` accepts tile `t` when `t` is in
/// `compatible(n, opposite(d))`. A cell without neighbors accepts every tile.
pub fn best_candidates(state: &GridState<'_>, x: usize, y: usize) -> Vec<usize> {
    let adjacency = state.adjacency();
    let mut tally = vec![0_usize; adjacency.tile_count()];

    for direction in Direction::ALL {
        let Some(neighbor) = state
            .neighbor(x, y, direction)
            .and_then(|(nx, ny)| state.tile(nx, ny))
        else {
            continue;
        };
        if let Some(accepted) = adjacency.compatible(neighbor, direction.opposite()) {
            for tile in accepted.members() {
                if let Some(votes) = tally.get_mut(tile) {
                    *votes += 1;
                }
            }
        }
    }

    let highest = tally.iter().copied().max().unwrap_or(0);
    tally
        .iter()
        .enumerate()
        .filter(|&(_, &votes)| votes >= highest)
        .map(|(tile, _)| tile)
        .collect()
}

/// Visit every cell in random order and reassign the violated ones
///
/// Returns the number of cells reassigned.
///
/// # Errors
///
/// Propagates tile replacement failures (not expected for a consistent grid)
pub fn repair_pass<R: Rng + ?Sized>(state: &mut GridState<'_>, rng: &mut R) -> Result<usize> {
    let mut positions: Vec<(usize, usize)> = (0..state.height())
        .flat_map(|y| (0..state.width()).map(move |x| (x, y)))
        .collect();
    positions.shuffle(rng);

    let mut reassigned = 0;
    for (x, y) in positions {
        if state.scores().get([y, x]).is_none_or(|&score| score == 0) {
            continue;
        }
        let candidates = best_candidates(state, x, y);
        if let Some(&tile) = candidates.choose(rng) {
            state.replace_tile(x, y, tile)?;
            reassigned += 1;
        }
    }
    Ok(reassigned)
}

/// Run up to `max_passes` repair passes, stopping once no violations remain
///
/// Returns the number of passes run.
///
/// # Errors
///
/// Propagates tile replacement failures
pub fn repair<R: Rng + ?Sized>(
    state: &mut GridState<'_>,
    rng: &mut R,
    max_passes: usize,
) -> Result<usize> {
    let mut passes = 0;
    while passes < max_passes && state.total_violations() > 0 {
        repair_pass(state, rng)?;
        passes += 1;
    }
    Ok(passes)
}
