//─────────────────────────────────────────────────────────────────────────────
// population-level fitness summary (best / worst / mean)
//─────────────────────────────────────────────────────────────────────────────

/// cached snapshot of an evaluated population's fitness.
/// fitness is a normalized error: lower is better, 0.0 = pixel-identical.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FitnessStats {
    pub best_index: usize,
    pub best: f64,
    pub worst: f64,
    pub mean: f64,
}

impl FitnessStats {
    /// None for an empty fitness array. ties on best keep the lowest index.
    pub fn from_fitness(fitness: &[f64]) -> Option<Self> {
        profiling::scope!("FitnessStats::from_fitness");
        let (&first, rest) = fitness.split_first()?;

        let mut stats = Self { best_index: 0, best: first, worst: first, mean: 0.0 };
        for (i, &f) in rest.iter().enumerate() {
            if f < stats.best {
                stats.best = f;
                stats.best_index = i + 1;
            }
            if f > stats.worst {
                stats.worst = f;
            }
        }
        stats.mean = fitness.iter().sum::<f64>() / fitness.len() as f64;
        Some(stats)
    }

    /// match quality of the best individual, 1.0 = perfect
    #[inline]
    pub fn best_match(&self) -> f64 {
        1.0 - self.best
    }

    #[inline]
    pub fn best_match_percent(&self) -> f64 {
        self.best_match() * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_has_no_stats() {
        assert!(FitnessStats::from_fitness(&[]).is_none());
    }

    #[test]
    fn test_best_worst_mean() {
        let s = FitnessStats::from_fitness(&[0.5, 0.25, 0.75, 0.25]).unwrap();
        assert_eq!(s.best_index, 1);
        assert_eq!(s.best, 0.25);
        assert_eq!(s.worst, 0.75);
        assert_eq!(s.mean, 0.4375);
        assert_eq!(s.best_match(), 0.75);
    }
}
