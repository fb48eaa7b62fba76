//! Sequences fixers and drives one file to a fixed point.
//!
//! The execution order is resolved once at setup: declared
//! runs-before/runs-after relations become edges of a directed graph, a
//! relation contradicted by numeric priority is rejected, a cycle is
//! rejected with the offending names, and the final total order falls out
//! of a priority-first topological sort.

use crate::error::{FixError, ScheduleError};
use crate::fixer::Fixer;
use crate::tokenizer::tokenize;
use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Default pass cap for the convergence loop.
pub const DEFAULT_MAX_PASSES: usize = 10;

/// Result of fixing one file's source text.
#[derive(Debug, Clone, Serialize)]
pub struct FixOutcome {
    /// The rewritten source (identical to the input when nothing matched).
    pub output: String,
    /// Whether the output differs from the input.
    pub changed: bool,
    /// Number of passes run, including the final no-change pass.
    pub passes: usize,
    /// Whether a pass completed without changes before the cap was hit.
    ///
    /// `false` means the cap was exhausted while still converging; the
    /// output is the best-effort last state, not an error.
    pub reached_fixed_point: bool,
    /// Names of fixers that changed the stream, in first-applied order.
    pub applied_fixers: Vec<&'static str>,
}

/// Runs an ordered fixer set over files, one token stream at a time.
///
/// The orchestrator is immutable after construction, so one instance can be
/// shared across parallel per-file workers.
pub struct Orchestrator {
    fixers: Vec<Box<dyn Fixer>>,
    max_passes: usize,
}

impl Orchestrator {
    /// Resolves the execution order and builds the orchestrator.
    pub fn new(
        fixers: Vec<Box<dyn Fixer>>,
        max_passes: usize,
    ) -> Result<Self, ScheduleError> {
        Ok(Self {
            fixers: schedule(fixers)?,
            max_passes,
        })
    }

    /// The fixers in execution order.
    #[must_use]
    pub fn fixers(&self) -> &[Box<dyn Fixer>] {
        &self.fixers
    }

    /// Rewrites one file's source to a fixed point.
    pub fn fix_source(&self, source: &str) -> Result<FixOutcome, FixError> {
        let mut tokens = tokenize(source)?;
        let mut applied_fixers: Vec<&'static str> = Vec::new();
        let mut passes = 0;
        let mut reached_fixed_point = false;

        while passes < self.max_passes {
            passes += 1;
            let mut pass_changed = false;
            for fixer in &self.fixers {
                if !fixer.is_candidate(&tokens) {
                    continue;
                }
                let before = tokens.to_source();
                fixer.apply(&mut tokens);
                if tokens.to_source() != before {
                    pass_changed = true;
                    if !applied_fixers.contains(&fixer.name()) {
                        applied_fixers.push(fixer.name());
                    }
                }
            }
            if !pass_changed {
                reached_fixed_point = true;
                break;
            }
        }

        let output = tokens.to_source();
        Ok(FixOutcome {
            changed: output != source,
            output,
            passes,
            reached_fixed_point,
            applied_fixers,
        })
    }
}

/// Resolves the total execution order.
fn schedule(fixers: Vec<Box<dyn Fixer>>) -> Result<Vec<Box<dyn Fixer>>, ScheduleError> {
    let mut graph: DiGraph<usize, ()> = DiGraph::new();
    let nodes: Vec<NodeIndex> = (0..fixers.len()).map(|i| graph.add_node(i)).collect();
    let by_name: FxHashMap<&str, NodeIndex> = fixers
        .iter()
        .enumerate()
        .map(|(i, f)| (f.name(), nodes[i]))
        .collect();

    for (i, fixer) in fixers.iter().enumerate() {
        let constraints = fixer.constraints();
        for &later in constraints.runs_before {
            // Constraints naming rules that are not enabled are inert.
            if let Some(&target) = by_name.get(later) {
                graph.add_edge(nodes[i], target, ());
            }
        }
        for &earlier in constraints.runs_after {
            if let Some(&source) = by_name.get(earlier) {
                graph.add_edge(source, nodes[i], ());
            }
        }
    }

    // A declared ordering must never be contradicted by priority.
    for edge in graph.edge_indices() {
        if let Some((u, v)) = graph.edge_endpoints(edge) {
            let before = &fixers[graph[u]];
            let after = &fixers[graph[v]];
            if before.priority() < after.priority() {
                return Err(ScheduleError::PriorityConflict {
                    before: before.name().to_owned(),
                    before_priority: before.priority(),
                    after: after.name().to_owned(),
                    after_priority: after.priority(),
                });
            }
        }
    }

    // Kahn's algorithm, always taking the highest-priority ready fixer
    // (name as deterministic tie-break).
    let mut indegree: FxHashMap<NodeIndex, usize> = nodes
        .iter()
        .map(|&n| {
            (
                n,
                graph
                    .neighbors_directed(n, petgraph::Direction::Incoming)
                    .count(),
            )
        })
        .collect();
    let mut ready: BinaryHeap<(i32, Reverse<&str>, NodeIndex)> = indegree
        .iter()
        .filter(|&(_, &d)| d == 0)
        .map(|(&n, _)| (fixers[graph[n]].priority(), Reverse(fixers[graph[n]].name()), n))
        .collect();

    let mut order: Vec<usize> = Vec::with_capacity(fixers.len());
    while let Some((_, _, node)) = ready.pop() {
        order.push(graph[node]);
        for next in graph.neighbors_directed(node, petgraph::Direction::Outgoing) {
            if let Some(degree) = indegree.get_mut(&next) {
                *degree -= 1;
                if *degree == 0 {
                    ready.push((
                        fixers[graph[next]].priority(),
                        Reverse(fixers[graph[next]].name()),
                        next,
                    ));
                }
            }
        }
    }

    if order.len() != fixers.len() {
        let names = fixers
            .iter()
            .map(|f| f.name().to_owned())
            .filter(|name| !order.iter().any(|&i| fixers[i].name() == *name))
            .collect();
        return Err(ScheduleError::Cycle { names });
    }

    let mut slots: Vec<Option<Box<dyn Fixer>>> = fixers.into_iter().map(Some).collect();
    Ok(order
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect())
}
