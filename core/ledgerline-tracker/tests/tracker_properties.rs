//! Property-based tests for ledger merging and snapshot counts.
//!
//! For arbitrary interleavings of enlist calls over a handful of entities:
//! - the ledger's final kind per entity equals folding the merge rule over
//!   that entity's reports alone;
//! - created + updated + deleted equals the number of tracked entities, and
//!   retained equals the number of records in the snapshot.

mod common;

use common::{invoice, tracker};
use ledgerline_model::{EntityHandle, LiveEntity};
use ledgerline_tracker::{EntityChangeTracker, TransactionContext};
use ledgerline_types::ChangeKind;
use proptest::prelude::*;
use serde_json::json;
use std::sync::Arc;

const ENTITIES: usize = 4;

#[derive(Debug, Clone, Copy)]
enum Op {
    Enlist(usize, ChangeKind),
    Touch(usize, i64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..ENTITIES, prop_oneof![
            Just(ChangeKind::Create),
            Just(ChangeKind::Update),
            Just(ChangeKind::Delete),
        ]).prop_map(|(i, k)| Op::Enlist(i, k)),
        1 => (0..ENTITIES, 0i64..3).prop_map(|(i, v)| Op::Touch(i, v)),
    ]
}

fn fold(reports: &[ChangeKind]) -> Option<ChangeKind> {
    reports
        .iter()
        .fold(None, |prev, &kind| ChangeKind::merge(prev, kind).kind())
}

fn run(ops: &[Op]) -> (Vec<(Arc<LiveEntity>, EntityHandle)>, TransactionContext) {
    let tracker = tracker();
    let entities: Vec<_> = (0..ENTITIES).map(|i| invoice(&format!("INV-{i}"), 0)).collect();
    let mut ctx = TransactionContext::new("prop");

    for op in ops {
        match *op {
            Op::Enlist(i, ChangeKind::Create) => {
                tracker.enlist_created(&mut ctx, &entities[i].1).unwrap()
            }
            Op::Enlist(i, ChangeKind::Update) => {
                tracker.enlist_updating(&mut ctx, &entities[i].1).unwrap()
            }
            Op::Enlist(i, ChangeKind::Delete) => {
                tracker.enlist_deleting(&mut ctx, &entities[i].1).unwrap()
            }
            Op::Touch(i, v) => {
                entities[i].0.set("/total", json!(v));
            }
        }
    }
    (entities, ctx)
}

proptest! {
    #[test]
    fn final_kind_matches_merge_table(ops in prop::collection::vec(op_strategy(), 0..30)) {
        let (entities, ctx) = run(&ops);

        for (i, (_, handle)) in entities.iter().enumerate() {
            let reports: Vec<ChangeKind> = ops
                .iter()
                .filter_map(|op| match op {
                    Op::Enlist(j, kind) if *j == i => Some(*kind),
                    _ => None,
                })
                .collect();
            let actual = ctx.ledger().and_then(|l| l.kind_of(&handle.entity_ref()));
            prop_assert_eq!(actual, fold(&reports));
        }
    }

    #[test]
    fn counts_are_consistent(ops in prop::collection::vec(op_strategy(), 0..30)) {
        let (_, mut ctx) = run(&ops);
        let tracked = ctx.ledger().map(|l| l.len()).unwrap_or(0);

        let snapshot = tracker().snapshot(&mut ctx);
        let counts = snapshot.counts();

        prop_assert_eq!(counts.created + counts.updated + counts.deleted, tracked);
        prop_assert_eq!(counts.dirtied, tracked);
        prop_assert_eq!(counts.retained, snapshot.records().len());
        for record in snapshot.records() {
            prop_assert!(snapshot.changes().contains_key(&record.entity_ref()));
            prop_assert!(record.is_significant());
        }
    }
}
