//! Monte Carlo rank estimation by random-surfer sampling.

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::{check_sample_count, RankConfig};
use crate::error::Result;
use crate::graph::{LinkGraph, PageId};
use crate::rank::{Ranking, VisitCounter};
use crate::transition::TransitionModel;

/// Estimate ranks from `n` steps of a random walk driven by `rng`.
///
/// The first page is drawn uniformly; every later page is drawn from the
/// transition distribution of the page before it. Each page's rank is the
/// fraction of draws that landed on it.
pub fn sample_rank<R>(
    graph: &LinkGraph,
    damping_factor: f64,
    n: usize,
    rng: &mut R,
) -> Result<Ranking>
where
    R: Rng + ?Sized,
{
    check_sample_count(n)?;
    let model = TransitionModel::new(graph, damping_factor)?;
    debug!(
        pages = graph.len(),
        samples = n,
        damping_factor,
        "sampling random surfer"
    );

    let mut counter = VisitCounter::new(graph.len());
    let mut weights = vec![0.0; graph.len()];

    let mut page = PageId::new(rng.gen_range(0..graph.len()));
    counter.record(page);

    for _ in 1..n {
        model.fill(page, &mut weights);
        let next = WeightedIndex::new(&weights)?;
        page = PageId::new(next.sample(rng));
        counter.record(page);
    }

    Ok(counter.normalize(graph))
}

/// Sampling estimator configured from a [`RankConfig`].
#[derive(Debug, Clone)]
pub struct SamplingEstimator {
    config: RankConfig,
}

impl SamplingEstimator {
    pub fn new(config: RankConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RankConfig {
        &self.config
    }

    /// Run the walk with a generator seeded from `config.seed`, or from the
    /// OS when no seed is set.
    pub fn run(&self, graph: &LinkGraph) -> Result<Ranking> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.run_with(graph, &mut rng)
    }

    pub fn run_with<R: Rng + ?Sized>(&self, graph: &LinkGraph, rng: &mut R) -> Result<Ranking> {
        sample_rank(graph, self.config.damping_factor, self.config.sample_count, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RankError;

    fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn test_two_page_cycle() {
        let graph = LinkGraph::from_corpus(vec![("a", vec!["b"]), ("b", vec!["a"])]);
        let ranks = sample_rank(&graph, 0.85, 10_000, &mut seeded(1)).unwrap();

        assert!((ranks.get("a").unwrap() - 0.5).abs() < 0.05);
        assert!((ranks.get("b").unwrap() - 0.5).abs() < 0.05);
        assert!((ranks.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_dangling_sink_ranks_higher() {
        let graph = LinkGraph::from_corpus(vec![("a", vec!["b"]), ("b", vec![])]);
        let ranks = sample_rank(&graph, 0.85, 20_000, &mut seeded(2)).unwrap();
        assert!(ranks.get("b").unwrap() > ranks.get("a").unwrap());
    }

    #[test]
    fn test_single_sample() {
        let graph = LinkGraph::from_corpus(vec![("a", vec!["b"]), ("b", vec!["a"]), ("c", vec![])]);
        let ranks = sample_rank(&graph, 0.85, 1, &mut seeded(3)).unwrap();

        let ones = ranks.iter().filter(|(_, r)| *r == 1.0).count();
        let zeros = ranks.iter().filter(|(_, r)| *r == 0.0).count();
        assert_eq!((ones, zeros), (1, 2));
    }

    #[test]
    fn test_unreachable_page_at_most_start() {
        // With damping 1.0 nothing ever jumps to c, so it can only be the start page.
        let graph = LinkGraph::from_corpus(vec![("a", vec!["b"]), ("b", vec!["a"]), ("c", vec!["a"])]);
        let n = 5_000;
        for seed in 0..8 {
            let ranks = sample_rank(&graph, 1.0, n, &mut seeded(seed)).unwrap();
            assert!(ranks.get("c").unwrap() <= 1.0 / n as f64);
            assert!((ranks.total() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_seed_reproducible() {
        let graph = LinkGraph::from_corpus(vec![
            ("1.html", vec!["2.html"]),
            ("2.html", vec!["1.html", "3.html"]),
            ("3.html", vec!["2.html", "4.html"]),
            ("4.html", vec![]),
        ]);
        let estimator = SamplingEstimator::new(RankConfig::new().with_seed(42)).unwrap();
        let first = estimator.run(&graph).unwrap();
        let second = estimator.run(&graph).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rejects_bad_config() {
        let graph = LinkGraph::from_corpus(vec![("a", vec!["b"]), ("b", vec!["a"])]);
        assert!(matches!(
            sample_rank(&graph, 0.85, 0, &mut seeded(0)),
            Err(RankError::InvalidSampleCount(0))
        ));
        assert!(matches!(
            sample_rank(&graph, -0.5, 10, &mut seeded(0)),
            Err(RankError::InvalidDampingFactor(_))
        ));

        let empty = LinkGraph::from_corpus(Vec::<(String, Vec<String>)>::new());
        assert!(matches!(
            sample_rank(&empty, 0.85, 10, &mut seeded(0)),
            Err(RankError::EmptyGraph)
        ));
        assert!(SamplingEstimator::new(RankConfig::new().with_sample_count(0)).is_err());
    }
}
