//! Iterative PageRank by fixed-point relaxation.
//!
//! Every round reads only the previous round's ranks and writes a separate
//! buffer; the two buffers are swapped afterwards. Rank held by dangling
//! pages is spread uniformly over the whole corpus, matching the transition
//! model's behaviour on pages without links.

use tracing::{debug, info, warn};

use crate::config::{
    check_damping, check_tolerance, RankConfig, DEFAULT_DAMPING_FACTOR, DEFAULT_MAX_ITERATIONS,
    DEFAULT_TOLERANCE,
};
use crate::error::{RankError, Result};
use crate::graph::LinkGraph;
use crate::rank::Ranking;

/// Outcome of a converged relaxation.
#[derive(Debug, Clone)]
pub struct Convergence {
    /// Normalized ranks
    pub ranking: Ranking,
    /// Rounds performed
    pub iterations: usize,
    /// Largest per-page change in the last round, before normalization
    pub delta: f64,
}

/// Power-iteration estimator with a convergence tolerance and a safety cap.
#[derive(Debug, Clone)]
pub struct IterativeEstimator {
    pub damping_factor: f64,
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for IterativeEstimator {
    fn default() -> Self {
        Self {
            damping_factor: DEFAULT_DAMPING_FACTOR,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl IterativeEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &RankConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            damping_factor: config.damping_factor,
            tolerance: config.convergence_tolerance,
            max_iterations: config.max_iterations,
        })
    }

    pub fn with_damping_factor(mut self, damping_factor: f64) -> Self {
        self.damping_factor = damping_factor;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Relax from the uniform distribution until converged.
    pub fn run(&self, graph: &LinkGraph) -> Result<Convergence> {
        self.check(graph)?;
        let initial = vec![1.0 / graph.len() as f64; graph.len()];
        self.relax(graph, initial)
    }

    /// Relax from caller-supplied ranks. Pages missing from `initial` start
    /// at zero.
    pub fn run_from(&self, graph: &LinkGraph, initial: &Ranking) -> Result<Convergence> {
        self.check(graph)?;
        let initial = initial.to_dense(graph);
        let valid = initial.iter().all(|r| r.is_finite() && *r >= 0.0);
        if !valid || initial.iter().sum::<f64>() <= 0.0 {
            return Err(RankError::InvalidInitialRanks);
        }
        self.relax(graph, initial)
    }

    fn check(&self, graph: &LinkGraph) -> Result<()> {
        check_damping(self.damping_factor)?;
        check_tolerance(self.tolerance)?;
        if self.max_iterations == 0 {
            return Err(RankError::InvalidIterationCap(self.max_iterations));
        }
        if graph.is_empty() {
            return Err(RankError::EmptyGraph);
        }
        Ok(())
    }

    fn relax(&self, graph: &LinkGraph, mut ranks: Vec<f64>) -> Result<Convergence> {
        let num_pages = graph.len();
        let n = num_pages as f64;
        let damping = self.damping_factor;
        let teleport = (1.0 - damping) / n;

        // (source, out-degree of source) for every page's inbound links
        let in_edges: Vec<Vec<(usize, f64)>> = graph
            .page_ids()
            .map(|id| {
                graph
                    .incoming(id)
                    .map(|src| (src.index(), graph.out_degree(src) as f64))
                    .collect()
            })
            .collect();
        let dangling: Vec<usize> = graph.dangling_pages().map(|id| id.index()).collect();

        debug!(
            pages = num_pages,
            dangling = dangling.len(),
            damping_factor = damping,
            tolerance = self.tolerance,
            "relaxing ranks"
        );

        let mut next = vec![0.0; num_pages];
        let mut delta = f64::INFINITY;
        let mut iterations = 0;

        while iterations < self.max_iterations {
            iterations += 1;

            let rank_no_link: f64 = dangling.iter().map(|&d| ranks[d] / n).sum();

            delta = 0.0;
            for (page, slot) in next.iter_mut().enumerate() {
                let inbound: f64 = in_edges[page]
                    .iter()
                    .map(|&(src, degree)| ranks[src] / degree)
                    .sum();
                let value = teleport + damping * rank_no_link + damping * inbound;
                delta = delta.max((value - ranks[page]).abs());
                *slot = value;
            }

            std::mem::swap(&mut ranks, &mut next);

            if delta < self.tolerance {
                info!(iterations, delta, "ranks converged");
                return Ok(Convergence {
                    ranking: normalized(graph, &ranks),
                    iterations,
                    delta,
                });
            }
        }

        warn!(iterations, delta, "ranks did not converge");
        Err(RankError::NotConverged { iterations, delta })
    }
}

fn normalized(graph: &LinkGraph, ranks: &[f64]) -> Ranking {
    let total: f64 = ranks.iter().sum();
    let scores: Vec<f64> = ranks.iter().map(|r| r / total).collect();
    Ranking::from_dense(graph, &scores)
}

/// Iterative ranks with the default iteration cap.
pub fn iterate_rank(graph: &LinkGraph, damping_factor: f64, tolerance: f64) -> Result<Ranking> {
    IterativeEstimator::new()
        .with_damping_factor(damping_factor)
        .with_tolerance(tolerance)
        .run(graph)
        .map(|c| c.ranking)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus0() -> LinkGraph {
        LinkGraph::from_corpus(vec![
            ("1.html", vec!["2.html"]),
            ("2.html", vec!["1.html", "3.html"]),
            ("3.html", vec!["2.html", "4.html"]),
            ("4.html", vec!["2.html"]),
        ])
    }

    #[test]
    fn test_known_corpus() {
        let ranks = iterate_rank(&corpus0(), 0.85, 0.001).unwrap();

        assert!((ranks.get("1.html").unwrap() - 0.2198).abs() < 0.005);
        assert!((ranks.get("2.html").unwrap() - 0.4294).abs() < 0.005);
        assert!((ranks.get("3.html").unwrap() - 0.2198).abs() < 0.005);
        assert!((ranks.get("4.html").unwrap() - 0.1311).abs() < 0.005);
        assert!((ranks.total() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_two_page_cycle() {
        let graph = LinkGraph::from_corpus(vec![("a", vec!["b"]), ("b", vec!["a"])]);
        let ranks = iterate_rank(&graph, 0.85, 0.001).unwrap();
        assert!((ranks.get("a").unwrap() - 0.5).abs() < 0.001);
        assert!((ranks.get("b").unwrap() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_dangling_sink() {
        let graph = LinkGraph::from_corpus(vec![("a", vec!["b"]), ("b", vec![])]);
        let ranks = iterate_rank(&graph, 0.85, 0.001).unwrap();

        let a = ranks.get("a").unwrap();
        let b = ranks.get("b").unwrap();
        assert!(b > a);
        assert!((a - 0.351).abs() < 0.005);
        assert!((a + b - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_isolated_pages_uniform() {
        let graph = LinkGraph::from_corpus(vec![
            ("a", Vec::<&str>::new()),
            ("b", vec![]),
            ("c", vec![]),
        ]);
        let result = IterativeEstimator::new().run(&graph).unwrap();
        assert_eq!(result.iterations, 1);
        for (_, r) in result.ranking.iter() {
            assert!((r - 1.0 / 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_rerun_from_converged_output() {
        let graph = corpus0();
        let estimator = IterativeEstimator::new();
        let first = estimator.run(&graph).unwrap();
        let second = estimator.run_from(&graph, &first.ranking).unwrap();

        for (page, rank) in first.ranking.iter() {
            let again = second.ranking.get(page).unwrap();
            assert!((rank - again).abs() <= estimator.tolerance);
        }
    }

    #[test]
    fn test_iteration_cap_reports_non_convergence() {
        let err = IterativeEstimator::new()
            .with_tolerance(1e-15)
            .with_max_iterations(2)
            .run(&corpus0())
            .unwrap_err();
        match err {
            RankError::NotConverged { iterations, delta } => {
                assert_eq!(iterations, 2);
                assert!(delta >= 1e-15);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_bad_config() {
        let graph = corpus0();
        assert!(matches!(
            iterate_rank(&graph, 0.85, 0.0),
            Err(RankError::InvalidTolerance(_))
        ));
        assert!(matches!(
            iterate_rank(&graph, 2.0, 0.001),
            Err(RankError::InvalidDampingFactor(_))
        ));

        let empty = LinkGraph::from_corpus(Vec::<(String, Vec<String>)>::new());
        assert!(matches!(
            iterate_rank(&empty, 0.85, 0.001),
            Err(RankError::EmptyGraph)
        ));

        let zeros: Ranking = vec![("1.html".to_string(), 0.0)].into_iter().collect();
        assert!(matches!(
            IterativeEstimator::new().run_from(&graph, &zeros),
            Err(RankError::InvalidInitialRanks)
        ));
    }
}
