use rand::Rng;
use std::cmp::Ordering;
use std::sync::Arc;

use crate::dna::{Disk, DiskBounds, Genome};
use crate::evolve_config::{ElitismMode, EvolveConfig};
use super::selection::parent_pair;

/// Single-point crossover: genes [0, p) from `a`, [p, len) from `b`, with p uniform in [1, len - 1].
/// Genes are shared with the parents (Arc clones), never copied or edited.
///
/// With fewer than two genes there is no interior split point; the child is a copy of `a`
/// and the random source is left untouched.
pub fn crossover<R: Rng>(a: &Genome, b: &Genome, rng: &mut R) -> Genome {
    profiling::scope!("crossover");
    debug_assert_eq!(a.len(), b.len(), "parents must have the same gene count");

    let len = a.len();
    if len < 2 {
        return a.clone();
    }

    let point = rng.random_range(1..len);
    let mut disks = Vec::with_capacity(len);
    disks.extend_from_slice(&a.disks[..point]);
    disks.extend_from_slice(&b.disks[point..]);
    Genome { disks }
}

/// With probability `rate`, replace one uniformly chosen gene of a freshly built child
/// with a brand new random disk. Returns true if a gene was replaced.
pub fn mutate<R: Rng>(child: &mut Genome, rate: f64, bounds: &DiskBounds, rng: &mut R) -> bool {
    profiling::scope!("mutate");
    if child.is_empty() || rng.random::<f64>() >= rate {
        return false;
    }
    let slot = rng.random_range(0..child.len());
    child.disks[slot] = Arc::new(Disk::random(rng, bounds));
    true
}

/// crossover of two population members, then the per-individual mutation roll
fn breed<R: Rng>(
    population: &[Genome],
    (a, b): (usize, usize),
    cfg: &EvolveConfig,
    bounds: &DiskBounds,
    rng: &mut R,
) -> Genome {
    let mut child = crossover(&population[a], &population[b], rng);
    mutate(&mut child, cfg.mutation_rate, bounds, rng);
    child
}

/// Build a complete next generation of `cfg.population_size` new individuals.
/// `fitness` must be positionally aligned with `population`.
pub fn next_population<R: Rng>(
    population: &[Genome],
    fitness: &[f64],
    cfg: &EvolveConfig,
    bounds: &DiskBounds,
    rng: &mut R,
) -> Vec<Genome> {
    profiling::scope!("next_population");
    assert_eq!(population.len(), fitness.len(), "fitness is not aligned with the population");

    let size = cfg.population_size;
    let mut next = Vec::with_capacity(size);

    match cfg.elitism {
        ElitismMode::SlotReuse => {
            // slot 0 and every elite_size-th slot after it reuse the previous pair
            let mut parents = parent_pair(fitness, cfg.tournament_size, rng);
            for i in 0..size {
                if i % cfg.elite_size != 0 {
                    parents = parent_pair(fitness, cfg.tournament_size, rng);
                }
                next.push(breed(population, parents, cfg, bounds, rng));
            }
        }
        ElitismMode::CarryOver => {
            for index in elite_indices(fitness, cfg.elite_size.min(size)) {
                next.push(population[index].clone());
            }
            while next.len() < size {
                let parents = parent_pair(fitness, cfg.tournament_size, rng);
                next.push(breed(population, parents, cfg, bounds, rng));
            }
        }
    }

    next
}

/// indices of the `count` lowest-fitness individuals, best first (stable on ties)
pub fn elite_indices(fitness: &[f64], count: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..fitness.len()).collect();
    order.sort_by(|&a, &b| fitness[a].partial_cmp(&fitness[b]).unwrap_or(Ordering::Equal));
    order.truncate(count);
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const BOUNDS: DiskBounds = DiskBounds { width: 20, height: 20, min_radius: 2, max_radius: 6 };

    fn parents(rng: &mut Pcg32, len: usize) -> (Genome, Genome) {
        (Genome::random(rng, len, &BOUNDS), Genome::random(rng, len, &BOUNDS))
    }

    #[test]
    fn test_crossover_is_prefix_then_suffix() {
        let mut rng = Pcg32::seed_from_u64(12);
        let (a, b) = parents(&mut rng, 600);

        for _ in 0..100 {
            let child = crossover(&a, &b, &mut rng);
            assert_eq!(child.len(), 600);

            let split = (0..600)
                .find(|&i| !Arc::ptr_eq(&child.disks[i], &a.disks[i]))
                .expect("child must take a suffix from b");
            assert!(split > 0 && split < 600);
            assert!((0..split).all(|i| Arc::ptr_eq(&child.disks[i], &a.disks[i])));
            assert!((split..600).all(|i| Arc::ptr_eq(&child.disks[i], &b.disks[i])));
        }
    }

    #[test]
    fn test_crossover_split_covers_full_range() {
        let mut rng = Pcg32::seed_from_u64(13);
        let (a, b) = parents(&mut rng, 3);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let child = crossover(&a, &b, &mut rng);
            let split = (0..3).find(|&i| !Arc::ptr_eq(&child.disks[i], &a.disks[i])).unwrap();
            seen[split] = true;
        }
        // p in [1, len - 1]: both 1 and 2 occur, 0 never does
        assert_eq!(seen, [false, true, true]);
    }

    #[test]
    fn test_single_gene_crossover_copies_first_parent() {
        let mut rng = Pcg32::seed_from_u64(14);
        let (a, b) = parents(&mut rng, 1);
        let before = rng.clone();

        let child = crossover(&a, &b, &mut rng);
        assert_eq!(child.len(), 1);
        assert!(Arc::ptr_eq(&child.disks[0], &a.disks[0]));
        // no draw was consumed
        assert_eq!(rng, before);
    }

    #[test]
    fn test_mutation_replaces_exactly_one_gene() {
        let mut rng = Pcg32::seed_from_u64(15);
        let original = Genome::random(&mut rng, 50, &BOUNDS);

        let mut child = original.clone();
        assert!(mutate(&mut child, 1.0, &BOUNDS, &mut rng));
        let changed = (0..50)
            .filter(|&i| !Arc::ptr_eq(&child.disks[i], &original.disks[i]))
            .count();
        assert_eq!(changed, 1);

        let mut child = original.clone();
        assert!(!mutate(&mut child, 0.0, &BOUNDS, &mut rng));
        assert_eq!(child, original);
    }

    #[test]
    fn test_elite_indices_best_first() {
        assert_eq!(elite_indices(&[0.4, 0.1, 0.9, 0.1, 0.2], 3), vec![1, 3, 4]);
        assert_eq!(elite_indices(&[0.4], 5), vec![0]);
    }

    fn small_population(rng: &mut Pcg32, size: usize, genes: usize) -> (Vec<Genome>, Vec<f64>) {
        let pop: Vec<Genome> = (0..size).map(|_| Genome::random(rng, genes, &BOUNDS)).collect();
        let fitness: Vec<f64> = (0..size).map(|i| 0.1 + i as f64 / (size as f64 * 2.0)).collect();
        (pop, fitness)
    }

    #[test]
    fn test_next_population_is_full_and_fresh() {
        let mut rng = Pcg32::seed_from_u64(16);
        let cfg = EvolveConfig { gene_count: 30, population_size: 12, tournament_size: 3, elite_size: 4, ..Default::default() };
        let (pop, fitness) = small_population(&mut rng, 12, 30);

        let next = next_population(&pop, &fitness, &cfg, &BOUNDS, &mut rng);
        assert_eq!(next.len(), 12);
        assert!(next.iter().all(|g| g.len() == 30));
    }

    #[test]
    fn test_slot_reuse_stride_one_keeps_a_single_pair() {
        let mut rng = Pcg32::seed_from_u64(17);
        let cfg = EvolveConfig {
            gene_count: 20,
            population_size: 10,
            tournament_size: 3,
            elite_size: 1,
            mutation_rate: 0.0,
            ..Default::default()
        };
        let (pop, fitness) = small_population(&mut rng, 10, 20);

        let next = next_population(&pop, &fitness, &cfg, &BOUNDS, &mut rng);
        // every slot is a child of the pre-loop pair: same first and last gene everywhere
        for child in &next[1..] {
            assert!(Arc::ptr_eq(&child.disks[0], &next[0].disks[0]));
            assert!(Arc::ptr_eq(&child.disks[19], &next[0].disks[19]));
        }
    }

    #[test]
    fn test_carry_over_keeps_best_unchanged() {
        let mut rng = Pcg32::seed_from_u64(18);
        let cfg = EvolveConfig {
            gene_count: 10,
            population_size: 8,
            tournament_size: 2,
            elite_size: 2,
            elitism: ElitismMode::CarryOver,
            mutation_rate: 1.0,
            ..Default::default()
        };
        let (pop, _) = small_population(&mut rng, 8, 10);
        let fitness = vec![0.5, 0.4, 0.05, 0.6, 0.01, 0.7, 0.8, 0.9];

        let next = next_population(&pop, &fitness, &cfg, &BOUNDS, &mut rng);
        assert_eq!(next.len(), 8);
        assert_eq!(next[0], pop[4]);
        assert_eq!(next[1], pop[2]);
    }
}
