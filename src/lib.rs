//! # surfrank
//!
//! PageRank for small, closed hyperlink corpora.
//!
//! Two independent estimators run over the same immutable [`LinkGraph`]:
//!
//! - **Sampling**: a random surfer walks the graph and each page's rank is
//!   its visit frequency ([`sample_rank`]).
//! - **Iteration**: the PageRank equations are relaxed until no page moves
//!   by the convergence tolerance or more ([`iterate_rank`]).
//!
//! A [`corpus`] loader builds the graph from a directory of HTML files, and
//! the `python` feature exposes both estimators as a Python extension.
//!
//! ## Usage
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use surfrank::{iterate_rank, sample_rank, LinkGraph};
//!
//! let graph = LinkGraph::from_corpus(vec![
//!     ("1.html", vec!["2.html"]),
//!     ("2.html", vec!["1.html", "3.html"]),
//!     ("3.html", vec!["2.html"]),
//! ]);
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let sampled = sample_rank(&graph, 0.85, 10_000, &mut rng)?;
//! let iterated = iterate_rank(&graph, 0.85, 0.001)?;
//!
//! assert!(iterated.get("2.html") > iterated.get("1.html"));
//! assert!((sampled.total() - 1.0).abs() < 1e-9);
//! # Ok::<(), surfrank::RankError>(())
//! ```

pub mod config;
pub mod corpus;
pub mod error;
pub mod graph;
pub mod iterative;
pub mod rank;
pub mod sampling;
pub mod transition;

#[cfg(feature = "python")]
mod python;

pub use config::RankConfig;
pub use error::{RankError, Result};
pub use graph::{LinkGraph, PageId};
pub use iterative::{iterate_rank, Convergence, IterativeEstimator};
pub use rank::{Ranking, VisitCounter};
pub use sampling::{sample_rank, SamplingEstimator};
pub use transition::{transition, TransitionModel};
