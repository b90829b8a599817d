//! Tests for the process-wide registry and the point codec through the public API.

use std::collections::{BTreeSet, HashSet};
use std::thread;

use boolfunc::error::Error;
use boolfunc::point::{
    enumerate_points, enumerate_terms, flatten_vpoint, index_to_point, index_to_term,
    index_to_upoint, point_to_term, point_to_upoint, BitTree, Point, VarTree,
};
use boolfunc::var::{intern, Literal, VarId, Variable};

fn space(prefix: &str, n: i64) -> Vec<Variable> {
    (0..n).map(|i| intern(&[prefix], &[i]).unwrap()).collect()
}

// ─── Registry ─────────────────────────────────────────────────────────────────

#[test]
fn intern_is_idempotent() {
    let a = intern(&["pt_a"], &[]).unwrap();
    let again = intern(&["pt_a"], &[]).unwrap();
    let indexed = intern(&["pt_a"], &[0]).unwrap();

    assert_eq!(a.uniqid(), again.uniqid());
    assert_ne!(a.uniqid(), indexed.uniqid());
    assert!(a < indexed);
}

#[test]
fn intern_rejects_bad_input() {
    assert_eq!(
        intern(&["pt_a", "0bad"], &[]),
        Err(Error::InvalidName("0bad".to_string()))
    );
    assert_eq!(intern(&["pt_a"], &[-2]), Err(Error::InvalidIndex(-2)));
}

#[test]
fn ids_unique_across_callers() {
    let ids: Vec<VarId> = thread::scope(|s| {
        let handles: Vec<_> = ["pt_t0", "pt_t1", "pt_t2", "pt_t3"]
            .into_iter()
            .map(|name| {
                s.spawn(move || {
                    (0..25)
                        .map(|i| intern(&[name], &[i]).unwrap().uniqid())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles.into_iter().flat_map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(ids.len(), 100);
    assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 100);
    assert!(ids.iter().all(|id| id.get() >= 1));
}

// ─── Codec ────────────────────────────────────────────────────────────────────

#[test]
fn minterm_scenario() {
    let a = intern(&["a"], &[]).unwrap();
    let b = intern(&["b"], &[]).unwrap();

    let term = index_to_term(2, &[Literal::from(a.clone()), Literal::from(b.clone())], false);
    assert_eq!(term, vec![a.neg(), b.pos()]);
    let shown: Vec<String> = term.iter().map(|lit| lit.to_string()).collect();
    assert_eq!(shown, vec!["~a", "b"]);
}

#[test]
fn point_upoint_term_agree() {
    let vs = space("pt_x", 5);
    let lits: Vec<Literal> = vs.iter().map(Variable::pos).collect();

    for (num, minterm) in enumerate_terms(&lits, false).enumerate() {
        let num = num as u64;
        let point = index_to_point(num, &vs);
        assert_eq!(point_to_upoint(&point), index_to_upoint(num, &vs));
        assert_eq!(point_to_term(&point, false), minterm);
        assert_eq!(point_to_term(&point, true), index_to_term(num, &lits, true));
    }
}

#[test]
fn enumeration_is_complete_and_ordered() {
    let vs = space("pt_y", 4);
    let points: Vec<Point> = enumerate_points(&vs).collect();
    assert_eq!(points.len(), 16);

    let nums: Vec<u64> = points
        .iter()
        .map(|p| {
            vs.iter()
                .enumerate()
                .filter(|(_, v)| p[*v])
                .fold(0u64, |acc, (i, _)| acc | (1 << i))
        })
        .collect();
    assert_eq!(nums, (0..16).collect::<Vec<u64>>());
    assert_eq!(nums.iter().collect::<BTreeSet<_>>().len(), 16);
}

#[test]
fn flatten_rejects_mismatched_shapes() {
    let a = intern(&["a"], &[]).unwrap();
    let b = intern(&["b"], &[]).unwrap();

    let vpoint = vec![(
        VarTree::from(vec![a, b]),
        BitTree::from(vec![false, true, true]),
    )];
    assert!(matches!(
        flatten_vpoint(&vpoint),
        Err(Error::ShapeMismatch { .. })
    ));
}

#[test]
fn wide_space_conversions() {
    let vs = space("pt_wide", 70);

    let point = index_to_point(0b11, &vs);
    assert_eq!(point.values().filter(|&&bit| bit).count(), 2);
    assert!(point[&vs[1]] && !point[&vs[69]]);

    let upoint = index_to_upoint(0b11, &vs);
    assert_eq!(upoint.ones.len(), 2);
    assert_eq!(upoint.zeros.len(), 68);
    assert_eq!(point_to_upoint(&point), upoint);
}
