use crate::config::LedgerConfig;
use crate::snapshot::LedgerSnapshot;

/// Result of snapshot validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationReport {
    pub item_count: u64,
    pub batch_count: u64,
    pub counters_consistent: bool,
    pub records_bounded: bool,
    pub batches_resolvable: bool,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Returns `true` if all checks passed.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// A specific invariant violation found in a snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViolationKind {
    CounterMismatch,
    UnissuedId,
    EmptyMetadata,
    OversizedMetadata,
    EmptyBatch,
    OversizedBatch,
    DanglingBatchMember,
}

/// Snapshot invariant validator.
///
/// Checks everything a live ledger maintains by construction: dense id
/// assignment under the counters, bounded records, and batch members that
/// resolve to stored items. A snapshot that passes can be adopted by
/// `InMemoryLedger::restore` without weakening any ledger guarantee.
pub struct StateValidator;

impl StateValidator {
    /// Validate a snapshot against `config`, collecting every violation.
    pub fn validate(snapshot: &LedgerSnapshot, config: &LedgerConfig) -> ValidationReport {
        let mut violations = Vec::new();
        let mut counters_consistent = true;
        let mut records_bounded = true;
        let mut batches_resolvable = true;

        if snapshot.items.len() as u64 != snapshot.items_issued {
            counters_consistent = false;
            violations.push(Violation {
                kind: ViolationKind::CounterMismatch,
                description: format!(
                    "item counter says {} issued but {} records are stored",
                    snapshot.items_issued,
                    snapshot.items.len()
                ),
            });
        }
        if snapshot.batches.len() as u64 != snapshot.batches_issued {
            counters_consistent = false;
            violations.push(Violation {
                kind: ViolationKind::CounterMismatch,
                description: format!(
                    "batch counter says {} issued but {} records are stored",
                    snapshot.batches_issued,
                    snapshot.batches.len()
                ),
            });
        }

        for (id, record) in &snapshot.items {
            if id.get() == 0 || id.get() > snapshot.items_issued {
                counters_consistent = false;
                violations.push(Violation {
                    kind: ViolationKind::UnissuedId,
                    description: format!(
                        "item {id} was never issued (counter at {})",
                        snapshot.items_issued
                    ),
                });
            }
            if record.metadata.is_empty() {
                records_bounded = false;
                violations.push(Violation {
                    kind: ViolationKind::EmptyMetadata,
                    description: format!("item {id} has empty metadata"),
                });
            } else if record.metadata.chars().count() > config.max_metadata_chars {
                records_bounded = false;
                violations.push(Violation {
                    kind: ViolationKind::OversizedMetadata,
                    description: format!(
                        "item {id} metadata exceeds {} characters",
                        config.max_metadata_chars
                    ),
                });
            }
        }

        for (id, record) in &snapshot.batches {
            if id.get() == 0 || id.get() > snapshot.batches_issued {
                counters_consistent = false;
                violations.push(Violation {
                    kind: ViolationKind::UnissuedId,
                    description: format!(
                        "batch {id} was never issued (counter at {})",
                        snapshot.batches_issued
                    ),
                });
            }
            if record.items.is_empty() {
                records_bounded = false;
                violations.push(Violation {
                    kind: ViolationKind::EmptyBatch,
                    description: format!("batch {id} has no members"),
                });
            } else if record.items.len() > config.max_batch_items {
                records_bounded = false;
                violations.push(Violation {
                    kind: ViolationKind::OversizedBatch,
                    description: format!(
                        "batch {id} exceeds {} members",
                        config.max_batch_items
                    ),
                });
            }
            for member in &record.items {
                if !snapshot.items.contains_key(member) {
                    batches_resolvable = false;
                    violations.push(Violation {
                        kind: ViolationKind::DanglingBatchMember,
                        description: format!("batch {id} references missing item {member}"),
                    });
                }
            }
        }

        ValidationReport {
            item_count: snapshot.items.len() as u64,
            batch_count: snapshot.batches.len() as u64,
            counters_consistent,
            records_bounded,
            batches_resolvable,
            violations,
        }
    }
}
