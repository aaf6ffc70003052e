//! Next-page distribution of the random surfer.
//!
//! With probability `damping_factor` the surfer follows one of the current
//! page's links chosen uniformly; otherwise it jumps to any page of the
//! corpus. A page without links always jumps.

use crate::config::check_damping;
use crate::error::{RankError, Result};
use crate::graph::{LinkGraph, PageId};
use crate::rank::Ranking;

/// Transition model bound to a graph and a damping factor.
#[derive(Debug, Clone, Copy)]
pub struct TransitionModel<'g> {
    graph: &'g LinkGraph,
    damping_factor: f64,
}

impl<'g> TransitionModel<'g> {
    /// Create a model after checking the damping factor and graph size.
    pub fn new(graph: &'g LinkGraph, damping_factor: f64) -> Result<Self> {
        check_damping(damping_factor)?;
        if graph.is_empty() {
            return Err(RankError::EmptyGraph);
        }
        Ok(Self {
            graph,
            damping_factor,
        })
    }

    pub fn graph(&self) -> &'g LinkGraph {
        self.graph
    }

    /// Write the next-page distribution for `page` into `out`, indexed by
    /// page id. `out` must have one slot per page.
    pub fn fill(&self, page: PageId, out: &mut [f64]) {
        debug_assert_eq!(out.len(), self.graph.len());
        let n = self.graph.len() as f64;
        let links = self.graph.out_degree(page);

        if links == 0 {
            out.fill(1.0 / n);
            return;
        }

        out.fill((1.0 - self.damping_factor) / n);
        let follow = self.damping_factor / links as f64;
        for target in self.graph.links(page) {
            out[target.index()] += follow;
        }
    }

    /// Next-page distribution for `page` as a fresh vector.
    pub fn distribution(&self, page: PageId) -> Vec<f64> {
        let mut out = vec![0.0; self.graph.len()];
        self.fill(page, &mut out);
        out
    }
}

/// Next-page distribution for the surfer standing on `page`.
pub fn transition(graph: &LinkGraph, page: &str, damping_factor: f64) -> Result<Ranking> {
    let model = TransitionModel::new(graph, damping_factor)?;
    let id = graph
        .id_of(page)
        .ok_or_else(|| RankError::UnknownPage(page.to_string()))?;
    Ok(Ranking::from_dense(graph, &model.distribution(id)))
}
