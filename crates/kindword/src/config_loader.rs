//! Catalog loading with include resolution.
//!
//! - `includes` composes a catalog from several files, relative to the
//!   including file's directory
//! - circular includes and overly deep include chains are rejected
//! - rules are merged by id; later definitions override earlier ones

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::debug;

use kindword_types::{CatalogFile, Defaults};

/// Maximum include nesting.
const MAX_INCLUDE_DEPTH: usize = 10;

/// Load a catalog file and everything it includes.
///
/// `expand_env` runs over each file's text before it is parsed.
pub fn load_catalog_with_includes<F>(path: &Path, expand_env: F) -> Result<CatalogFile>
where
    F: Fn(&str) -> Result<String> + Copy,
{
    let mut visited = HashSet::new();
    load_recursive(path, expand_env, &mut visited, 0)
}

fn load_recursive<F>(
    path: &Path,
    expand_env: F,
    visited: &mut HashSet<PathBuf>,
    depth: usize,
) -> Result<CatalogFile>
where
    F: Fn(&str) -> Result<String> + Copy,
{
    if depth > MAX_INCLUDE_DEPTH {
        bail!(
            "Include depth exceeded maximum of {} levels at '{}'",
            MAX_INCLUDE_DEPTH,
            path.display()
        );
    }

    let canonical = path
        .canonicalize()
        .with_context(|| format!("canonicalize path '{}'", path.display()))?;
    if !visited.insert(canonical) {
        bail!("Circular include detected: '{}'", path.display());
    }

    debug!("Loading catalog from '{}' (depth {})", path.display(), depth);

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read catalog '{}'", path.display()))?;
    let expanded = expand_env(&text)?;
    let catalog: CatalogFile = toml::from_str(&expanded)
        .with_context(|| format!("parse catalog '{}'", path.display()))?;

    if catalog.includes.is_empty() {
        return Ok(catalog);
    }

    let base_dir = path.parent().unwrap_or(Path::new("."));
    let mut merged = CatalogFile::default();

    for include in &catalog.includes {
        let full_path = base_dir.join(include);
        debug!(
            "Resolving include '{}' relative to '{}'",
            include,
            base_dir.display()
        );

        if !full_path.exists() {
            bail!(
                "Included catalog not found: '{}' (resolved from '{}')",
                full_path.display(),
                include
            );
        }

        let included = load_recursive(&full_path, expand_env, visited, depth + 1)?;
        merged = merge_catalogs(merged, included);
    }

    let own = CatalogFile {
        includes: vec![],
        defaults: catalog.defaults,
        rule: catalog.rule,
    };
    Ok(merge_catalogs(merged, own))
}

/// Merge two catalogs. Rules from `other` replace rules from `base` with the
/// same id; new ids are appended in order of first appearance.
pub fn merge_catalogs(base: CatalogFile, other: CatalogFile) -> CatalogFile {
    let defaults = if other.defaults != Defaults::default() {
        other.defaults
    } else {
        base.defaults
    };

    let mut order: Vec<String> = Vec::new();
    let mut by_id = BTreeMap::new();
    for rule in base.rule.into_iter().chain(other.rule) {
        if !by_id.contains_key(&rule.id) {
            order.push(rule.id.clone());
        }
        by_id.insert(rule.id.clone(), rule);
    }

    CatalogFile {
        includes: vec![],
        defaults,
        rule: order
            .into_iter()
            .filter_map(|id| by_id.remove(&id))
            .collect(),
    }
}
