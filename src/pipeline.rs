//! End-to-end decomposition: elements and groups in, classified records out.

use serde::{Deserialize, Serialize};

use crate::algs::classify::{Classification, ClassifyOptions, classify_forest};
use crate::data::source::NodeResolver;
use crate::forest::{ForestOptions, decompose};
use crate::mesh_error::MeshTraceError;
use crate::topology::connectivity::ConnectivityIndex;
use crate::topology::element::Element;
use crate::topology::labels::{Group, GroupPool};

/// Options for a whole [`decompose_and_classify`] run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceOptions {
    pub forest: ForestOptions,
    pub classify: ClassifyOptions,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TraceOutput {
    pub classification: Classification,
    /// Groups no forest member or branch matched exactly.
    pub unmatched: GroupPool,
}

/// Decompose `elements` into forest members and classify each one.
///
/// Fails only on malformed input (a repeated element id). Groups whose label
/// repeats an earlier one replace it, keeping its position.
pub fn decompose_and_classify<R, G>(
    elements: &[Element],
    resolver: &R,
    groups: G,
    opts: &TraceOptions,
) -> Result<TraceOutput, MeshTraceError>
where
    R: NodeResolver + ?Sized,
    G: IntoIterator<Item = Group>,
{
    let index = ConnectivityIndex::try_build(elements)?;
    let mut pool: GroupPool = groups.into_iter().collect();

    let forest = decompose(&index, &opts.forest);
    log::info!(
        "decomposed {} elements over {} nodes into {} members",
        index.element_count(),
        index.node_count(),
        forest.len()
    );

    let classification = classify_forest(&forest, resolver, &mut pool, &opts.classify);
    if !pool.is_empty() {
        log::info!(
            "{} groups left unmatched: {}",
            pool.len(),
            pool.labels().collect::<Vec<_>>().join(", ")
        );
    }

    Ok(TraceOutput {
        classification,
        unmatched: pool,
    })
}
