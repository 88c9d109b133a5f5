//! Concurrent batch processing of account operations
//!
//! This module provides the `BatchProcessor`, which applies a batch of
//! operations through a shared [`TransferEngine`].
//!
//! # Design
//!
//! A batch is split into *runs*: maximal sequences of consecutive operations of
//! the same kind. Runs are applied in input order, so an account created before
//! a transfer in the input always exists when the transfer executes.
//!
//! - Account creation runs are applied sequentially, in input order.
//! - Transfer runs are partitioned into *account groups*: transfers connected
//!   through a shared account id land in the same group. Each group is applied
//!   in input order, and different groups run concurrently on tokio's blocking
//!   pool, packed into at most `workers` tasks.
//!
//! Groups never share an account, so the final balances are the same as
//! applying the whole batch sequentially. The blocking pool is used because
//! the engine's account locks are real blocking waits.

use crate::core::engine::TransferEngine;
use crate::types::{AccountId, Operation, TransferError};
use std::collections::HashMap;

/// Result of applying a single operation
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// The operation that was applied
    pub operation: Operation,

    /// The result of applying it
    pub result: Result<(), TransferError>,
}

/// Batch processor with run-based partitioning
#[derive(Clone)]
pub struct BatchProcessor {
    engine: TransferEngine,
    workers: usize,
}

impl BatchProcessor {
    /// Create a processor running transfer runs on up to `workers` threads
    pub fn new(engine: TransferEngine, workers: usize) -> Self {
        Self {
            engine,
            workers: workers.max(1),
        }
    }

    /// Split a batch into runs of consecutive same-kind operations
    ///
    /// # Guarantees
    ///
    /// - Each operation appears in exactly one run
    /// - Concatenating the runs yields the original batch
    /// - Adjacent runs differ in kind
    pub fn partition_into_runs(batch: Vec<Operation>) -> Vec<Vec<Operation>> {
        let mut runs: Vec<Vec<Operation>> = Vec::new();

        for operation in batch {
            match runs.last_mut() {
                Some(run) if run[0].is_transfer() == operation.is_transfer() => {
                    run.push(operation)
                }
                _ => runs.push(vec![operation]),
            }
        }

        runs
    }

    /// Partition a run into groups of operations connected by account ids
    ///
    /// Two transfers belong to the same group when they touch a common
    /// account, directly or through a chain of other transfers.
    ///
    /// # Guarantees
    ///
    /// - Each operation appears in exactly one group
    /// - Operations inside a group keep their input order
    /// - No account id appears in two different groups
    /// - Groups are ordered by their first operation in the input
    pub fn partition_by_account(run: Vec<Operation>) -> Vec<Vec<Operation>> {
        let mut sets = AccountSets::default();
        for operation in &run {
            let (first, second) = account_ids(operation);
            let first = sets.node(first);
            if let Some(second) = second {
                let second = sets.node(second);
                sets.union(first, second);
            }
        }

        let mut group_of_root: HashMap<usize, usize> = HashMap::new();
        let mut groups: Vec<Vec<Operation>> = Vec::new();
        for operation in run {
            let node = sets.node(account_ids(&operation).0);
            let root = sets.find(node);
            let group = *group_of_root.entry(root).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[group].push(operation);
        }

        groups
    }

    /// Apply operations one after another on the calling thread
    pub fn process_sequential(&self, operations: Vec<Operation>) -> Vec<ProcessingResult> {
        operations
            .into_iter()
            .map(|operation| {
                let result = self.engine.process(operation.clone());
                ProcessingResult { operation, result }
            })
            .collect()
    }

    /// Apply a transfer run with independent account groups in parallel
    ///
    /// Groups are packed whole into at most `workers` chunks, smallest chunk
    /// first, and each chunk runs sequentially on the blocking pool.
    ///
    /// Results are grouped by chunk, so they are not in input order.
    pub async fn process_concurrent(&self, operations: Vec<Operation>) -> Vec<ProcessingResult> {
        let groups = Self::partition_by_account(operations);
        let mut chunks: Vec<Vec<Operation>> = vec![Vec::new(); self.workers.min(groups.len())];

        for group in groups {
            let smallest = chunks
                .iter()
                .enumerate()
                .min_by_key(|(_, chunk)| chunk.len())
                .map(|(index, _)| index)
                .unwrap_or_default();
            chunks[smallest].extend(group);
        }

        let tasks: Vec<_> = chunks
            .into_iter()
            .map(|chunk| {
                let processor = self.clone();
                tokio::task::spawn_blocking(move || processor.process_sequential(chunk))
            })
            .collect();

        let mut results = Vec::new();
        for task in tasks {
            match task.await {
                Ok(chunk_results) => results.extend(chunk_results),
                Err(e) => tracing::error!("transfer worker panicked: {:?}", e),
            }
        }

        results
    }

    /// Apply a batch run by run
    ///
    /// Creation runs are applied sequentially and transfer runs concurrently.
    /// Each run finishes before the next one starts.
    pub async fn process_batch(&self, batch: Vec<Operation>) -> Vec<ProcessingResult> {
        let mut results = Vec::with_capacity(batch.len());

        for run in Self::partition_into_runs(batch) {
            if run[0].is_transfer() {
                results.extend(self.process_concurrent(run).await);
            } else {
                results.extend(self.process_sequential(run));
            }
        }

        results
    }
}

/// The account ids an operation touches
fn account_ids(operation: &Operation) -> (&str, Option<&str>) {
    match operation {
        Operation::CreateAccount(account) => (account.id(), None),
        Operation::Transfer(request) => (
            request.from_account_id.as_str(),
            Some(request.to_account_id.as_str()),
        ),
    }
}

/// Disjoint sets over account ids
#[derive(Default)]
struct AccountSets {
    index: HashMap<AccountId, usize>,
    parent: Vec<usize>,
}

impl AccountSets {
    fn node(&mut self, account_id: &str) -> usize {
        if let Some(&node) = self.index.get(account_id) {
            return node;
        }
        let node = self.parent.len();
        self.parent.push(node);
        self.index.insert(account_id.to_string(), node);
        node
    }

    fn find(&mut self, mut node: usize) -> usize {
        while self.parent[node] != node {
            self.parent[node] = self.parent[self.parent[node]];
            node = self.parent[node];
        }
        node
    }

    fn union(&mut self, a: usize, b: usize) {
        let (a, b) = (self.find(a), self.find(b));
        if a != b {
            self.parent[b] = a;
        }
    }
}
