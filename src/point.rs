//! Points, untyped points and terms of an N-dimensional Boolean space.
//!
//! Every conversion here uses the same bit convention: for an ordered variable sequence
//! `vs`, the number `num` assigns bit `i` of `num` (bit 0 is the least significant) to
//! `vs[i]`. Concrete function representations rely on this to agree bit-for-bit.
//!
//! Min/max terms over the space `{a, b, c}`:
//!
//! ```text
//! num   minterm    maxterm
//! 0     a' b' c'   a  b  c
//! 1     a  b' c'   a' b  c
//! 2     a' b  c'   a  b' c
//! 3     a  b  c'   a' b' c
//! 4     a' b' c    a  b  c'
//! 5     a  b' c    a' b  c'
//! 6     a' b  c    a  b' c'
//! 7     a  b  c    a' b' c'
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::iter::FusedIterator;
use std::ops::{Not, Range};

use crate::error::{Error, Result};
use crate::var::{Literal, VarId, Variable};

/// Assignment of bits to variables.
pub type Point = BTreeMap<Variable, bool>;

/// Sequence of literals, one per variable of the originating space.
pub type Term = Vec<Literal>;

/// Id-level projection of a [`Point`]: the ids assigned 0 and the ids assigned 1.
///
/// # Invariants
///
/// - `zeros` and `ones` are disjoint.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
pub struct UPoint {
    pub zeros: BTreeSet<VarId>,
    pub ones: BTreeSet<VarId>,
}

impl UPoint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns `value` to `id`, removing any previous assignment of `id`.
    pub fn insert(&mut self, id: VarId, value: bool) {
        if value {
            self.zeros.remove(&id);
            self.ones.insert(id);
        } else {
            self.ones.remove(&id);
            self.zeros.insert(id);
        }
    }

    /// Value assigned to `id`, if any.
    pub fn get(&self, id: VarId) -> Option<bool> {
        if self.ones.contains(&id) {
            Some(true)
        } else if self.zeros.contains(&id) {
            Some(false)
        } else {
            None
        }
    }

    pub fn contains(&self, id: VarId) -> bool {
        self.zeros.contains(&id) || self.ones.contains(&id)
    }

    /// Number of assigned ids.
    pub fn len(&self) -> usize {
        self.zeros.len() + self.ones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zeros.is_empty() && self.ones.is_empty()
    }

    #[cfg(feature = "shields_up")]
    fn check(&self) {
        assert!(self.zeros.is_disjoint(&self.ones), "upoint sets must be disjoint");
    }
}

/// Bit `i` of `num`; positions past the width of `u64` are 0.
fn bit_on(num: u64, i: usize) -> bool {
    u32::try_from(i)
        .ok()
        .and_then(|i| num.checked_shr(i))
        .map_or(false, |x| x & 1 == 1)
}

/// Converts `num` into the point assigning bit `i` of `num` to `vs[i]`.
///
/// `num` is expected to be below `2^vs.len()`; higher bits are ignored.
pub fn index_to_point(num: u64, vs: &[Variable]) -> Point {
    vs.iter().enumerate().map(|(i, v)| (v.clone(), bit_on(num, i))).collect()
}

/// Converts `num` into the untyped point assigning bit `i` of `num` to the id of `vs[i]`.
pub fn index_to_upoint(num: u64, vs: &[Variable]) -> UPoint {
    let mut upoint = UPoint::new();
    for (i, v) in vs.iter().enumerate() {
        if bit_on(num, i) {
            upoint.ones.insert(v.uniqid());
        } else {
            upoint.zeros.insert(v.uniqid());
        }
    }
    upoint
}

/// Converts `num` into a minterm (`conj = false`) or a maxterm (`conj = true`).
///
/// In a minterm, element `i` is `fs[i]` when bit `i` of `num` is set and `!fs[i]` otherwise.
/// A maxterm is the complement of the minterm for the same `num`.
///
/// ```
/// use boolfunc::point::index_to_term;
/// use boolfunc::var::intern;
///
/// let a = intern(&["a"], &[]).unwrap();
/// let b = intern(&["b"], &[]).unwrap();
/// let term = index_to_term(0b10, &[a.pos(), b.pos()], false);
/// assert_eq!(term, vec![a.neg(), b.pos()]);
/// ```
pub fn index_to_term<T>(num: u64, fs: &[T], conj: bool) -> Vec<T>
where
    T: Clone + Not<Output = T>,
{
    fs.iter()
        .enumerate()
        .map(|(i, f)| {
            if bit_on(num, i) != conj {
                f.clone()
            } else {
                !f.clone()
            }
        })
        .collect()
}

/// Projects a point onto the ids of its variables.
pub fn point_to_upoint(point: &Point) -> UPoint {
    let mut upoint = UPoint::new();
    for (v, &value) in point {
        if value {
            upoint.ones.insert(v.uniqid());
        } else {
            upoint.zeros.insert(v.uniqid());
        }
    }
    upoint
}

/// Converts a point into a minterm (`conj = false`) or a maxterm (`conj = true`).
///
/// Literals follow the variable order of the point.
pub fn point_to_term(point: &Point, conj: bool) -> Term {
    point
        .iter()
        .map(|(v, &value)| {
            if value != conj {
                v.pos()
            } else {
                v.neg()
            }
        })
        .collect()
}

/// Resolves the ids of `upoint` back to the variables of `vs`.
///
/// Ids that do not belong to any variable of `vs` are skipped.
pub fn upoint_to_point(upoint: &UPoint, vs: &[Variable]) -> Point {
    #[cfg(feature = "shields_up")]
    upoint.check();

    vs.iter()
        .filter_map(|v| upoint.get(v.uniqid()).map(|value| (v.clone(), value)))
        .collect()
}

/// Lazy enumeration of a Boolean space in increasing index order.
///
/// The iterator owns a copy of the variable sequence and keeps no other state than the
/// next index, so cloning it restarts the enumeration from the current position.
#[derive(Clone)]
pub struct Enumerate<T, R> {
    items: Vec<T>,
    nums: Range<u64>,
    convert: fn(u64, &[T]) -> R,
}

/// Iterator over the points of a space, see [`enumerate_points`].
pub type Points = Enumerate<Variable, Point>;

/// Iterator over the untyped points of a space, see [`enumerate_upoints`].
pub type UPoints = Enumerate<Variable, UPoint>;

/// Iterator over the min/max terms of a space, see [`enumerate_terms`].
pub type Terms<T> = Enumerate<T, Vec<T>>;

impl<T: Clone, R> Enumerate<T, R> {
    fn new(items: &[T], convert: fn(u64, &[T]) -> R) -> Self {
        assert!(
            items.len() < 64,
            "Cannot enumerate a space of {} dimensions",
            items.len()
        );
        Self {
            items: items.to_vec(),
            nums: 0..(1u64 << items.len()),
            convert,
        }
    }

    /// The variables (or functions) spanning the space.
    pub fn items(&self) -> &[T] {
        &self.items
    }
}

impl<T, R> Iterator for Enumerate<T, R> {
    type Item = R;

    fn next(&mut self) -> Option<Self::Item> {
        let num = self.nums.next()?;
        Some((self.convert)(num, &self.items))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.nums.size_hint()
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        let num = self.nums.nth(n)?;
        Some((self.convert)(num, &self.items))
    }
}

impl<T, R> ExactSizeIterator for Enumerate<T, R> {}

impl<T, R> FusedIterator for Enumerate<T, R> {}

/// Iterates through all `2^N` points of the space spanned by `vs`.
///
/// # Panics
///
/// Panics if `vs` has 64 or more variables.
pub fn enumerate_points(vs: &[Variable]) -> Points {
    Enumerate::new(vs, index_to_point)
}

/// Iterates through all `2^N` untyped points of the space spanned by `vs`.
///
/// # Panics
///
/// Panics if `vs` has 64 or more variables.
pub fn enumerate_upoints(vs: &[Variable]) -> UPoints {
    Enumerate::new(vs, index_to_upoint)
}

fn minterm<T: Clone + Not<Output = T>>(num: u64, fs: &[T]) -> Vec<T> {
    index_to_term(num, fs, false)
}

fn maxterm<T: Clone + Not<Output = T>>(num: u64, fs: &[T]) -> Vec<T> {
    index_to_term(num, fs, true)
}

/// Iterates through all `2^N` minterms (`conj = false`) or maxterms (`conj = true`).
///
/// # Panics
///
/// Panics if `fs` has 64 or more elements.
pub fn enumerate_terms<T>(fs: &[T], conj: bool) -> Terms<T>
where
    T: Clone + Not<Output = T>,
{
    if conj {
        Enumerate::new(fs, maxterm::<T>)
    } else {
        Enumerate::new(fs, minterm::<T>)
    }
}

/// Variable side of a vectorized point: a variable or a nested vector of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarTree {
    Var(Variable),
    Vec(Vec<VarTree>),
}

impl VarTree {
    fn width(&self) -> usize {
        match self {
            VarTree::Var(_) => 1,
            VarTree::Vec(items) => items.len(),
        }
    }
}

impl From<Variable> for VarTree {
    fn from(var: Variable) -> Self {
        VarTree::Var(var)
    }
}

impl<T: Into<VarTree>> From<Vec<T>> for VarTree {
    fn from(items: Vec<T>) -> Self {
        VarTree::Vec(items.into_iter().map(Into::into).collect())
    }
}

/// Value side of a vectorized point: a bit or a nested vector of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitTree {
    Bit(bool),
    Vec(Vec<BitTree>),
}

impl BitTree {
    fn width(&self) -> usize {
        match self {
            BitTree::Bit(_) => 1,
            BitTree::Vec(items) => items.len(),
        }
    }
}

impl From<bool> for BitTree {
    fn from(value: bool) -> Self {
        BitTree::Bit(value)
    }
}

impl<T: Into<BitTree>> From<Vec<T>> for BitTree {
    fn from(items: Vec<T>) -> Self {
        BitTree::Vec(items.into_iter().map(Into::into).collect())
    }
}

/// Point whose keys and values may be nested vectors of matching shape.
pub type VPoint = [(VarTree, BitTree)];

/// Flattens a vectorized point into a plain [`Point`].
///
/// Later entries overwrite earlier ones for the same variable.
///
/// # Errors
///
/// [`Error::ShapeMismatch`] if, at any nesting level, the variable side and the value side
/// have different lengths (a single variable paired with a vector counts as a mismatch).
pub fn flatten_vpoint(vpoint: &VPoint) -> Result<Point> {
    let mut point = Point::new();
    for (vars, values) in vpoint {
        flatten_into(vars, values, &mut point)?;
    }
    Ok(point)
}

fn flatten_into(vars: &VarTree, values: &BitTree, point: &mut Point) -> Result<()> {
    match (vars, values) {
        (VarTree::Var(v), BitTree::Bit(value)) => {
            point.insert(v.clone(), *value);
            Ok(())
        }
        (VarTree::Vec(vs), BitTree::Vec(bits)) if vs.len() == bits.len() => {
            for (v, bit) in vs.iter().zip(bits) {
                flatten_into(v, bit, point)?;
            }
            Ok(())
        }
        _ => Err(Error::ShapeMismatch {
            vars: vars.width(),
            values: values.width(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::var::intern;

    fn vars(names: &[&str]) -> Vec<Variable> {
        names.iter().map(|name| intern(&[*name], &[]).unwrap()).collect()
    }

    #[test]
    fn test_index_to_point() {
        let vs = vars(&["a", "b", "c"]);

        let point = index_to_point(0b110, &vs);
        assert!(!point[&vs[0]]);
        assert!(point[&vs[1]]);
        assert!(point[&vs[2]]);
        assert_eq!(point.len(), 3);

        assert!(index_to_point(0, &[]).is_empty());
    }

    #[test]
    fn test_index_beyond_64_variables() {
        let vs: Vec<Variable> = (0..65).map(|i| intern(&["wide"], &[i]).unwrap()).collect();

        let point = index_to_point(1, &vs);
        assert_eq!(point.len(), 65);
        assert!(point[&vs[0]]);
        assert!(vs[1..].iter().all(|v| !point[v]));

        let upoint = index_to_upoint(1, &vs);
        assert_eq!(upoint.ones, BTreeSet::from([vs[0].uniqid()]));
        assert_eq!(upoint.zeros.len(), 64);
        assert_eq!(upoint.get(vs[64].uniqid()), Some(false));

        let lits: Vec<Literal> = vs.iter().map(Variable::pos).collect();
        let minterm = index_to_term(u64::MAX, &lits, false);
        assert_eq!(minterm[63], vs[63].pos());
        assert_eq!(minterm[64], vs[64].neg());
    }

    #[test]
    fn test_index_to_upoint() {
        let vs = vars(&["a", "b", "c"]);

        let upoint = index_to_upoint(0b101, &vs);
        assert_eq!(upoint.ones, BTreeSet::from([vs[0].uniqid(), vs[2].uniqid()]));
        assert_eq!(upoint.zeros, BTreeSet::from([vs[1].uniqid()]));
        assert_eq!(upoint.get(vs[1].uniqid()), Some(false));
        assert_eq!(upoint.len(), 3);
    }

    #[test]
    fn test_index_to_term_scenario() {
        let vs = vars(&["a", "b"]);
        let lits: Vec<Literal> = vs.iter().map(Variable::pos).collect();

        let minterm = index_to_term(0b10, &lits, false);
        assert_eq!(minterm, vec![vs[0].neg(), vs[1].pos()]);
        let maxterm = index_to_term(0b10, &lits, true);
        assert_eq!(maxterm, vec![vs[0].pos(), vs[1].neg()]);
    }

    #[test]
    fn test_minterm_maxterm_duality() {
        let vs = vars(&["a", "b", "c", "d"]);
        let lits: Vec<Literal> = vs.iter().map(Variable::pos).collect();

        for num in 0..16 {
            let maxterm = index_to_term(num, &lits, true);
            let complemented: Vec<Literal> =
                index_to_term(num, &lits, false).into_iter().map(|lit| !lit).collect();
            assert_eq!(maxterm, complemented);
        }
    }

    #[test]
    fn test_round_trip() {
        let vs = vars(&["a", "b", "c", "d"]);

        for num in 0..16 {
            let point = index_to_point(num, &vs);
            assert_eq!(point_to_upoint(&point), index_to_upoint(num, &vs));
            assert_eq!(upoint_to_point(&index_to_upoint(num, &vs), &vs), point);
        }
    }

    #[test]
    fn test_point_to_term() {
        let vs = vars(&["a", "b"]);
        let point = index_to_point(0b01, &vs);

        assert_eq!(point_to_term(&point, false), vec![vs[0].pos(), vs[1].neg()]);
        assert_eq!(point_to_term(&point, true), vec![vs[0].neg(), vs[1].pos()]);
    }

    #[test]
    fn test_enumerate_points_complete() {
        let vs = vars(&["a", "b", "c"]);

        let points: Vec<Point> = enumerate_points(&vs).collect();
        assert_eq!(points.len(), 8);
        for (num, point) in points.iter().enumerate() {
            assert_eq!(point, &index_to_point(num as u64, &vs));
        }
        let distinct: BTreeSet<Vec<bool>> =
            points.iter().map(|p| p.values().copied().collect()).collect();
        assert_eq!(distinct.len(), 8);
    }

    #[test]
    fn test_enumerate_zero_dimensions() {
        let points: Vec<Point> = enumerate_points(&[]).collect();
        assert_eq!(points, vec![Point::new()]);
        let upoints: Vec<UPoint> = enumerate_upoints(&[]).collect();
        assert_eq!(upoints, vec![UPoint::new()]);
    }

    #[test]
    fn test_enumerate_restartable() {
        let vs = vars(&["a", "b"]);

        let mut upoints = enumerate_upoints(&vs);
        assert_eq!(upoints.len(), 4);
        upoints.next();
        let rest = upoints.clone();
        assert_eq!(upoints.count(), 3);
        assert_eq!(rest.len(), 3);
        assert_eq!(enumerate_upoints(&vs).nth(3), Some(index_to_upoint(3, &vs)));
    }

    #[test]
    fn test_enumerate_terms() {
        let vs = vars(&["a", "b"]);
        let lits: Vec<Literal> = vs.iter().map(Variable::pos).collect();

        let minterms: Vec<Term> = enumerate_terms(&lits, false).collect();
        assert_eq!(minterms[0], vec![vs[0].neg(), vs[1].neg()]);
        assert_eq!(minterms[3], vec![vs[0].pos(), vs[1].pos()]);
        let maxterms: Vec<Term> = enumerate_terms(&lits, true).collect();
        assert_eq!(maxterms[0], vec![vs[0].pos(), vs[1].pos()]);
        assert_eq!(maxterms.len(), 4);
    }

    #[test]
    #[should_panic(expected = "Cannot enumerate a space of 64 dimensions")]
    fn test_enumerate_too_large() {
        let vs: Vec<Variable> = (0..64).map(|i| intern(&["x"], &[i]).unwrap()).collect();
        enumerate_points(&vs);
    }

    #[test]
    fn test_flatten_vpoint() {
        let vs = vars(&["a", "b", "c", "d"]);

        let vpoint = vec![
            (VarTree::from(vs[0].clone()), BitTree::from(true)),
            (
                VarTree::from(vec![vec![vs[1].clone()], vec![vs[2].clone(), vs[3].clone()]]),
                BitTree::from(vec![vec![false], vec![true, false]]),
            ),
        ];
        let point = flatten_vpoint(&vpoint).unwrap();
        assert_eq!(point, index_to_point(0b0101, &vs));
    }

    #[test]
    fn test_flatten_vpoint_shape_mismatch() {
        let vs = vars(&["a", "b"]);

        let vpoint = vec![(
            VarTree::from(vs.clone()),
            BitTree::from(vec![false, true, true]),
        )];
        assert_eq!(
            flatten_vpoint(&vpoint),
            Err(Error::ShapeMismatch { vars: 2, values: 3 })
        );

        let nested = vec![(
            VarTree::from(vec![vs[0].clone(), vs[1].clone()]),
            BitTree::from(vec![BitTree::from(true), BitTree::from(vec![true, false])]),
        )];
        assert_eq!(
            flatten_vpoint(&nested),
            Err(Error::ShapeMismatch { vars: 1, values: 2 })
        );
    }
}
