use rand::Rng;

/// worst possible normalized error. a contender must beat it strictly to win.
pub const SENTINEL_FITNESS: f64 = 1.0;

/// Tournament selection over a precomputed fitness array (lower is better).
/// Draws `tournament_size` uniform indices and returns the one with the lowest fitness.
/// If no draw scores strictly below the sentinel, falls back to one more uniform draw,
/// so the result is always a valid index.
///
/// panics if `fitness` is empty.
pub fn tournament_winner<R: Rng>(fitness: &[f64], tournament_size: usize, rng: &mut R) -> usize {
    profiling::scope!("tournament_winner");
    let n = fitness.len();

    let mut winner = None;
    let mut best = SENTINEL_FITNESS;
    for _ in 0..tournament_size {
        let index = rng.random_range(0..n);
        let f = fitness[index];
        if f < best {
            best = f;
            winner = Some(index);
        }
    }

    winner.unwrap_or_else(|| {
        log::debug!("degenerate tournament: no contender beat {SENTINEL_FITNESS}, picking at random");
        rng.random_range(0..n)
    })
}

/// two independent tournaments, one per parent
#[inline]
pub fn parent_pair<R: Rng>(fitness: &[f64], tournament_size: usize, rng: &mut R) -> (usize, usize) {
    let a = tournament_winner(fitness, tournament_size, rng);
    let b = tournament_winner(fitness, tournament_size, rng);
    (a, b)
}
