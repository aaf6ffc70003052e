//! PyO3 bindings, built with the `python` feature.

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::config::RankConfig;
use crate::error::RankError;
use crate::graph::LinkGraph;
use crate::iterative::IterativeEstimator;
use crate::rank::Ranking;
use crate::sampling::SamplingEstimator;
use crate::transition;

impl From<RankError> for PyErr {
    fn from(err: RankError) -> PyErr {
        match err {
            RankError::NotConverged { .. } | RankError::Io { .. } | RankError::Sampling(_) => {
                PyRuntimeError::new_err(err.to_string())
            }
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

/// Convert `{page: iterable of links}` into owned pairs.
fn read_corpus(corpus: &Bound<'_, PyDict>) -> PyResult<Vec<(String, Vec<String>)>> {
    let mut pages = Vec::with_capacity(corpus.len());
    for (page, links) in corpus.iter() {
        let page: String = page.extract()?;
        let links = links
            .iter()?
            .map(|link| link?.extract::<String>())
            .collect::<PyResult<Vec<String>>>()?;
        pages.push((page, links));
    }
    Ok(pages)
}

fn to_dict(py: Python<'_>, ranking: &Ranking) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new_bound(py);
    for (page, rank) in ranking.iter() {
        dict.set_item(page, rank)?;
    }
    Ok(dict.into())
}

/// Probability distribution over the next page for a surfer on `page`.
///
/// # Example
///
/// ```python
/// transition_model({"1.html": {"2.html"}, "2.html": set()}, "1.html", 0.85)
/// # {'1.html': 0.075, '2.html': 0.925}
/// ```
#[pyfunction]
#[pyo3(signature = (corpus, page, damping=0.85))]
fn transition_model(
    py: Python<'_>,
    corpus: &Bound<'_, PyDict>,
    page: &str,
    damping: f64,
) -> PyResult<Py<PyDict>> {
    let pages = read_corpus(corpus)?;
    let ranking = py.allow_threads(|| {
        let graph = LinkGraph::from_corpus(pages);
        transition::transition(&graph, page, damping)
    })?;
    to_dict(py, &ranking)
}

/// PageRank estimated from `n` random-surfer samples.
///
/// Pass `seed` for reproducible results.
#[pyfunction]
#[pyo3(signature = (corpus, damping=0.85, n=10000, seed=None))]
fn sample_pagerank(
    py: Python<'_>,
    corpus: &Bound<'_, PyDict>,
    damping: f64,
    n: usize,
    seed: Option<u64>,
) -> PyResult<Py<PyDict>> {
    let pages = read_corpus(corpus)?;
    let mut config = RankConfig::new().with_damping_factor(damping).with_sample_count(n);
    config.seed = seed;

    let ranking = py.allow_threads(|| {
        let graph = LinkGraph::from_corpus(pages);
        SamplingEstimator::new(config)?.run(&graph)
    })?;
    to_dict(py, &ranking)
}

/// PageRank computed by iterating until no page changes by `tolerance` or
/// more.
#[pyfunction]
#[pyo3(signature = (corpus, damping=0.85, tolerance=0.001))]
fn iterate_pagerank(
    py: Python<'_>,
    corpus: &Bound<'_, PyDict>,
    damping: f64,
    tolerance: f64,
) -> PyResult<Py<PyDict>> {
    let pages = read_corpus(corpus)?;
    let ranking = py.allow_threads(|| {
        let graph = LinkGraph::from_corpus(pages);
        IterativeEstimator::new()
            .with_damping_factor(damping)
            .with_tolerance(tolerance)
            .run(&graph)
            .map(|c| c.ranking)
    })?;
    to_dict(py, &ranking)
}

/// Python module definition.
#[pymodule]
fn _surfrank(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(transition_model, m)?)?;
    m.add_function(wrap_pyfunction!(sample_pagerank, m)?)?;
    m.add_function(wrap_pyfunction!(iterate_pagerank, m)?)?;

    // Version info
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
