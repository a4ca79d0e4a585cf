//! Run several policies over the same reference string and compare them.
//!
//! Each policy runs on its own thread with its own frame store; the runs
//! share nothing but the (immutable) validated input.

use std::thread;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::common::Result;
use crate::engine::{Policy, SimulationInput, SimulationResult};

/// One policy's run inside a [`Comparison`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyOutcome {
    pub policy: Policy,
    pub result: SimulationResult,
}

/// Final figures for one policy, one row per policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    pub algorithm: Policy,
    pub total_references: usize,
    pub page_faults: u64,
    pub hit_ratio: f64,
    pub miss_ratio: f64,
}

/// Results of running several policies on identical input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    outcomes: Vec<PolicyOutcome>,
}

impl Comparison {
    /// Outcomes in the order the policies were requested.
    pub fn outcomes(&self) -> &[PolicyOutcome] {
        &self.outcomes
    }

    /// Result for `policy`, if it was part of the comparison.
    pub fn get(&self, policy: Policy) -> Option<&SimulationResult> {
        self.outcomes
            .iter()
            .find(|o| o.policy == policy)
            .map(|o| &o.result)
    }

    /// Policy with the fewest faults; the earliest requested wins ties.
    pub fn best(&self) -> Option<Policy> {
        let mut best: Option<&PolicyOutcome> = None;
        for outcome in &self.outcomes {
            if best.map_or(true, |b| outcome.result.total_faults < b.result.total_faults) {
                best = Some(outcome);
            }
        }
        best.map(|o| o.policy)
    }

    /// One summary row per policy.
    pub fn summary(&self) -> Vec<SummaryRow> {
        self.outcomes
            .iter()
            .map(|o| SummaryRow {
                algorithm: o.policy,
                total_references: o.result.len(),
                page_faults: o.result.total_faults,
                hit_ratio: o.result.final_hit_ratio(),
                miss_ratio: o.result.final_miss_ratio(),
            })
            .collect()
    }
}

/// Validate once, then run each policy in parallel.
///
/// An empty `policies` slice runs all three. Repeated policies run once.
///
/// # Example
/// ```
/// use pagesim::{compare, Policy};
///
/// let refs = [1, 2, 3, 4, 1, 2, 5, 1, 2, 3, 4, 5];
/// let comparison = compare(&refs, 3, &[]).unwrap();
/// assert_eq!(comparison.best(), Some(Policy::Optimal));
/// ```
///
/// # Errors
/// Same as [`SimulationInput::new`], minus the policy-name check.
pub fn compare(references: &[i64], frame_count: i64, policies: &[Policy]) -> Result<Comparison> {
    let source: &[Policy] = if policies.is_empty() {
        &Policy::ALL
    } else {
        policies
    };
    let mut requested: Vec<Policy> = Vec::with_capacity(source.len());
    for &policy in source {
        if !requested.contains(&policy) {
            requested.push(policy);
        }
    }

    let input = SimulationInput::new(references, frame_count, requested[0].name())?;
    Ok(compare_input(&input, &requested))
}

/// Run `policies` over an already-validated input.
pub fn compare_input(input: &SimulationInput, policies: &[Policy]) -> Comparison {
    // One slot per requested policy, so outcomes land in request order.
    let slots: Mutex<Vec<Option<PolicyOutcome>>> = Mutex::new(vec![None; policies.len()]);

    thread::scope(|scope| {
        for (slot, &policy) in policies.iter().enumerate() {
            let slots = &slots;
            scope.spawn(move || {
                let result = input.run_with(policy);
                slots.lock()[slot] = Some(PolicyOutcome { policy, result });
            });
        }
    });

    let comparison = Comparison {
        outcomes: slots.into_inner().into_iter().flatten().collect(),
    };

    info!(
        policies = comparison.outcomes.len(),
        best = ?comparison.best(),
        "comparison complete"
    );
    comparison
}
