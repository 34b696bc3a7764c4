#![deny(unsafe_code)]

//! Tier-ordered replay of mappings against the source pool.
//!
//! All mappings of one tier fully commit, consumption marks included,
//! before the next tier starts; within a tier, input order is kept. That
//! ordering plus `VersePool::claim` is what guarantees each source row
//! feeds at most one mapping.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info, warn};
use tvtms_model::{ActionTier, Diagnostic, DiagnosticKind, Mapping};

use crate::pool::{PoolKey, StandardizedPool, VersePool};

#[derive(Debug, Clone, Default, Serialize)]
pub struct ApplyStats {
    pub mappings_seen: usize,
    pub applied: usize,
    /// Applied mappings whose tier appends rather than replaces.
    pub merged: usize,
    pub no_source: usize,
    pub unresolved: usize,
    pub ambiguous: usize,
    pub applied_by_tier: BTreeMap<String, usize>,
}

#[derive(Debug, Default)]
pub struct ApplyOutcome {
    pub standardized: StandardizedPool,
    pub stats: ApplyStats,
    pub diagnostics: Vec<Diagnostic>,
}

/// Replay `mappings` against `pool` in action-priority order.
pub fn apply_mappings(mappings: &[Mapping], pool: &mut VersePool) -> ApplyOutcome {
    let mut outcome = ApplyOutcome::default();

    let mut by_tier: BTreeMap<ActionTier, Vec<&Mapping>> = BTreeMap::new();
    for mapping in mappings {
        by_tier
            .entry(mapping.action_tier())
            .or_default()
            .push(mapping);
    }
    outcome.stats.mappings_seen = mappings.len();

    for tier in ActionTier::IN_PRIORITY_ORDER {
        let Some(tier_mappings) = by_tier.get(&tier) else {
            continue;
        };
        debug!(tier = %tier, mappings = tier_mappings.len(), "replaying tier");
        for mapping in tier_mappings {
            replay_one(mapping, tier, pool, &mut outcome);
        }
    }

    info!(
        applied = outcome.stats.applied,
        merged = outcome.stats.merged,
        unresolved = outcome.stats.unresolved,
        ambiguous = outcome.stats.ambiguous,
        no_source = outcome.stats.no_source,
        remaining = pool.remaining(),
        "action replay finished"
    );
    outcome
}

fn replay_one(
    mapping: &Mapping,
    tier: ActionTier,
    pool: &mut VersePool,
    outcome: &mut ApplyOutcome,
) {
    if !mapping.has_source() {
        outcome.stats.no_source += 1;
        return;
    }
    let Some(source_key) = PoolKey::from_source(mapping) else {
        outcome.stats.unresolved += 1;
        warn!(row = %mapping.row_id, "source location incomplete; no pool row can match");
        return;
    };
    let Some(target_key) = PoolKey::from_target(mapping) else {
        // Claiming first would consume a row whose text then has nowhere
        // to go, so the target is checked before the source pool is touched.
        outcome.stats.unresolved += 1;
        warn!(row = %mapping.row_id, "target location incomplete; nothing claimed");
        return;
    };
    let Some(claimed) = pool.claim(&source_key) else {
        outcome.stats.unresolved += 1;
        debug!(source = %source_key, "no unconsumed source row");
        return;
    };
    if claimed.ambiguous {
        outcome.stats.ambiguous += 1;
        warn!(source = %source_key, "multiple unconsumed source rows; first used");
        outcome.diagnostics.push(Diagnostic::new(
            DiagnosticKind::AmbiguousSource,
            source_key.to_string(),
            "Multiple unconsumed source rows match; the first was used",
        ));
    }

    let append = tier == ActionTier::Merged;
    outcome.standardized.upsert(
        target_key,
        mapping.target_tradition.as_str(),
        &claimed.text,
        append,
    );
    outcome.stats.applied += 1;
    if append {
        outcome.stats.merged += 1;
    }
    *outcome
        .stats
        .applied_by_tier
        .entry(tier.as_str().to_string())
        .or_insert(0) += 1;
}
