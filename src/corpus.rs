//! Loading a link graph from a directory of HTML pages.

use std::fs;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use rayon::prelude::*;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::{RankError, Result};
use crate::graph::LinkGraph;

lazy_static! {
    static ref ANCHOR_HREF: Regex = Regex::new(r#"<a\s+(?:[^>]*?)href="([^"]*)""#).unwrap();
}

const PAGE_EXTENSION: &str = ".html";

/// Every double-quoted `href` of an `<a>` tag, in document order.
pub fn extract_links(html: &str) -> Vec<String> {
    ANCHOR_HREF
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Build a link graph from the `.html` files directly inside `dir`.
///
/// Pages are keyed by file name; subdirectories are not visited.
pub fn crawl(dir: impl AsRef<Path>) -> Result<LinkGraph> {
    let dir = dir.as_ref();
    let files = html_files(dir)?;
    debug!(dir = %dir.display(), files = files.len(), "crawling corpus");

    let pages = files
        .par_iter()
        .map(|(name, path)| {
            let bytes = fs::read(path).map_err(|e| RankError::io(path, e))?;
            let html = String::from_utf8_lossy(&bytes);
            Ok((name.clone(), extract_links(&html)))
        })
        .collect::<Result<Vec<(String, Vec<String>)>>>()?;

    Ok(LinkGraph::from_corpus(pages))
}

fn html_files(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| RankError::io(dir, e))? {
        let entry = entry.map_err(|e| RankError::io(dir, e))?;
        let path = entry.path();

        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            warn!(path = %path.display(), "skipping file with non UTF-8 name");
            continue;
        };
        if !name.ends_with(PAGE_EXTENSION) {
            continue;
        }
        let file_type = entry.file_type().map_err(|e| RankError::io(&path, e))?;
        if file_type.is_file() {
            files.push((name, path));
        }
    }
    Ok(files)
}
