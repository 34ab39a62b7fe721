//! Filtering a subblock repository with a compiled query.

use rayon::prelude::*;

use super::QueryCondition;
use crate::error::EvalError;
use crate::subblock::{SubBlockInfo, SubBlockRepository};

/// Enumerate the subblocks matching `condition`, calling `callback` for each
/// match with its index and info. Enumeration stops when the callback
/// returns `false`.
pub fn enum_subset<R, F>(
    repository: &R,
    condition: &QueryCondition,
    mut callback: F,
) -> Result<(), EvalError>
where
    R: SubBlockRepository + ?Sized,
    F: FnMut(usize, &SubBlockInfo) -> bool,
{
    let mut failure = None;
    repository.enumerate_sub_blocks(&mut |index, info| match condition.evaluate(info) {
        Ok(true) => callback(index, info),
        Ok(false) => true,
        Err(error) => {
            failure = Some(error);
            false
        }
    });

    match failure {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

/// Collect the indices of the subblocks matching `condition`, in enumeration
/// order. With `max_results` of `Some(n)`, enumeration stops once `n`
/// matches have been collected; `None` collects all matches.
pub fn sub_blocks_matching<R>(
    repository: &R,
    condition: &QueryCondition,
    max_results: Option<usize>,
) -> Result<Vec<usize>, EvalError>
where
    R: SubBlockRepository + ?Sized,
{
    if max_results == Some(0) {
        return Ok(Vec::new());
    }

    let mut indices = Vec::new();
    enum_subset(repository, condition, |index, _info| {
        indices.push(index);
        match max_results {
            Some(max) => indices.len() < max,
            None => true,
        }
    })?;

    tracing::trace!(matches = indices.len(), "query filter finished");
    Ok(indices)
}

/// Parallel variant of [`sub_blocks_matching`] over an in-memory slice.
///
/// Evaluates every record (the cap trims the collected result), so the
/// returned indices are identical to the sequential driver's for the same
/// slice. Each rayon task evaluates against its own record reference; the
/// compiled program is shared read-only.
pub fn sub_blocks_matching_par(
    sub_blocks: &[SubBlockInfo],
    condition: &QueryCondition,
    max_results: Option<usize>,
) -> Result<Vec<usize>, EvalError> {
    let hits = sub_blocks
        .par_iter()
        .enumerate()
        .map(|(index, info)| condition.evaluate(info).map(|hit| (index, hit)))
        .collect::<Result<Vec<_>, EvalError>>()?;

    let mut indices: Vec<usize> = hits
        .into_iter()
        .filter_map(|(index, hit)| hit.then_some(index))
        .collect();
    if let Some(max) = max_results {
        indices.truncate(max);
    }

    Ok(indices)
}
