//! Immutable link graph over a closed corpus of pages.
//!
//! Pages are nodes, in-corpus links are edges. Duplicate links, self-links
//! and links leaving the corpus never become edges, so every edge target is
//! guaranteed to be a page of the graph.

use std::collections::BTreeMap;

use hashbrown::HashMap;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::error::{RankError, Result};

/// Index of a page inside a [`LinkGraph`].
pub type PageId = NodeIndex<u32>;

/// Directed graph of pages and the links between them.
#[derive(Debug, Clone)]
pub struct LinkGraph {
    graph: DiGraph<String, ()>,
    index: HashMap<String, PageId>,
    out_degree: Vec<usize>,
}

impl LinkGraph {
    /// Build a graph from raw `(page, links)` pairs.
    ///
    /// Links are deduplicated, self-links removed and links to pages that are
    /// not part of the corpus dropped. Repeated page labels merge their links.
    pub fn from_corpus<I, P, L, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = (P, L)>,
        P: Into<String>,
        L: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let corpus = collect_corpus(pages);
        let (graph, outside) = Self::assemble(&corpus);
        debug!(
            pages = graph.len(),
            links = graph.edge_count(),
            dropped_links = outside.len(),
            "built link graph from corpus"
        );
        graph
    }

    /// Build a graph from pairs whose links must already point inside the
    /// corpus. Any other target is reported as [`RankError::Integrity`].
    pub fn from_adjacency<I, P, L, S>(pages: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, L)>,
        P: Into<String>,
        L: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let corpus = collect_corpus(pages);
        let (graph, outside) = Self::assemble(&corpus);
        match outside.into_iter().next() {
            Some((page, target)) => Err(RankError::Integrity { page, target }),
            None => Ok(graph),
        }
    }

    /// Returns the graph and every `(page, target)` link that left the corpus.
    fn assemble(corpus: &BTreeMap<String, FxHashSet<String>>) -> (Self, Vec<(String, String)>) {
        let mut graph = DiGraph::with_capacity(corpus.len(), 0);
        let mut index = HashMap::with_capacity(corpus.len());

        // BTreeMap order gives label-sorted node indices.
        for page in corpus.keys() {
            let id = graph.add_node(page.clone());
            index.insert(page.clone(), id);
        }

        let mut out_degree = vec![0usize; corpus.len()];
        let mut outside = Vec::new();
        for (page, links) in corpus {
            let source = index[page.as_str()];
            let mut targets: Vec<&String> = links.iter().filter(|link| *link != page).collect();
            targets.sort();
            for target in targets {
                match index.get(target.as_str()) {
                    Some(&id) => {
                        graph.add_edge(source, id, ());
                        out_degree[source.index()] += 1;
                    }
                    None => outside.push((page.clone(), target.clone())),
                }
            }
        }

        let graph = Self {
            graph,
            index,
            out_degree,
        };
        (graph, outside)
    }

    /// Number of pages.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Number of links.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Page ids in index order (lexicographic order of labels).
    pub fn page_ids(&self) -> impl Iterator<Item = PageId> + '_ {
        self.graph.node_indices()
    }

    /// Page labels in index order.
    pub fn pages(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph
            .node_indices()
            .map(move |id| self.graph[id].as_str())
    }

    pub fn label(&self, id: PageId) -> &str {
        &self.graph[id]
    }

    pub fn id_of(&self, label: &str) -> Option<PageId> {
        self.index.get(label).copied()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// Pages linked to by `id`.
    pub fn links(&self, id: PageId) -> impl Iterator<Item = PageId> + '_ {
        self.graph.neighbors_directed(id, Direction::Outgoing)
    }

    /// Pages that link to `id`.
    pub fn incoming(&self, id: PageId) -> impl Iterator<Item = PageId> + '_ {
        self.graph.neighbors_directed(id, Direction::Incoming)
    }

    pub fn out_degree(&self, id: PageId) -> usize {
        self.out_degree[id.index()]
    }

    /// A dangling page has no outgoing links.
    pub fn is_dangling(&self, id: PageId) -> bool {
        self.out_degree(id) == 0
    }

    pub fn dangling_pages(&self) -> impl Iterator<Item = PageId> + '_ {
        self.page_ids().filter(|&id| self.is_dangling(id))
    }
}

fn collect_corpus<I, P, L, S>(pages: I) -> BTreeMap<String, FxHashSet<String>>
where
    I: IntoIterator<Item = (P, L)>,
    P: Into<String>,
    L: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut corpus: BTreeMap<String, FxHashSet<String>> = BTreeMap::new();
    for (page, links) in pages {
        corpus
            .entry(page.into())
            .or_default()
            .extend(links.into_iter().map(|link| link.as_ref().to_string()));
    }
    corpus
}
