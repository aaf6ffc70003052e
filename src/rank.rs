//! Rank distributions produced by the estimators.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::graph::{LinkGraph, PageId};

/// Mapping from page label to rank, ordered by label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ranking {
    scores: BTreeMap<String, f64>,
}

impl Ranking {
    /// Pair dense per-page scores (indexed by [`PageId`]) with their labels.
    pub(crate) fn from_dense(graph: &LinkGraph, scores: &[f64]) -> Self {
        let scores = graph
            .page_ids()
            .map(|id| (graph.label(id).to_string(), scores[id.index()]))
            .collect();
        Self { scores }
    }

    /// Dense scores in page-id order; pages absent from `self` get 0.
    pub(crate) fn to_dense(&self, graph: &LinkGraph) -> Vec<f64> {
        graph
            .pages()
            .map(|label| self.get(label).unwrap_or(0.0))
            .collect()
    }

    pub fn get(&self, page: &str) -> Option<f64> {
        self.scores.get(page).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.scores.iter().map(|(page, &score)| (page.as_str(), score))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Sum of all ranks.
    pub fn total(&self) -> f64 {
        self.scores.values().sum()
    }

    /// Highest-ranked pages first; ties keep label order.
    pub fn top_n(&self, n: usize) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    pub fn into_inner(self) -> BTreeMap<String, f64> {
        self.scores
    }
}

impl FromIterator<(String, f64)> for Ranking {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        Self {
            scores: iter.into_iter().collect(),
        }
    }
}

/// Visit counts of a random walk, one counter per page.
#[derive(Debug, Clone)]
pub struct VisitCounter {
    visits: Vec<u64>,
    total: u64,
}

impl VisitCounter {
    pub fn new(pages: usize) -> Self {
        Self {
            visits: vec![0; pages],
            total: 0,
        }
    }

    pub fn record(&mut self, page: PageId) {
        self.visits[page.index()] += 1;
        self.total += 1;
    }

    pub fn visits(&self, page: PageId) -> u64 {
        self.visits[page.index()]
    }

    /// Number of recorded draws.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Divide every count by the number of draws.
    pub fn normalize(self, graph: &LinkGraph) -> Ranking {
        let draws = self.total.max(1) as f64;
        let scores: Vec<f64> = self.visits.iter().map(|&v| v as f64 / draws).collect();
        Ranking::from_dense(graph, &scores)
    }
}
