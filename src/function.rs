//! The Boolean function contract.
//!
//! [`Function`] is implemented by every concrete representation (truth tables, expression
//! trees, decision diagrams, ...). Implementors provide the primitive capabilities: the four
//! combinators, the support, restriction by an untyped point, composition, satisfiability
//! and the constant checks. Everything else (restriction by typed or vectorized points,
//! cofactors, quantification, the Boolean derivative, counting) is derived here once, purely
//! from those primitives, so all representations share it.
//!
//! Let `f(x1, ..., xn)` be a function and `xi` one of its inputs:
//!
//! - the *cofactors* of `f` w.r.t. `xi` are `f|xi=0` and `f|xi=1`,
//! - the *smoothing* `S_xi(f) = f|xi=0 + f|xi=1` is the existential quantification `∃xi. f`,
//! - the *consensus* `C_xi(f) = f|xi=0 · f|xi=1` is the universal quantification `∀xi. f`,
//! - the *derivative* `∂f/∂xi = f|xi=0 ⊕ f|xi=1` is the Boolean difference.
//!
//! Over several variables, the cofactors are the `2^k` restrictions to all assignments of
//! those variables, enumerated in [`enumerate_upoints`] order.

use std::collections::{BTreeMap, BTreeSet};

use log::trace;
use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::array::FunctionArray;
use crate::error::{Error, Result};
use crate::point::{
    enumerate_points, enumerate_upoints, flatten_vpoint, point_to_upoint, Point, UPoint, VPoint,
};
use crate::var::{VarId, Variable};

/// A function narrowed to a constant where possible, see [`Function::unbox`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unboxed<F> {
    Zero,
    One,
    Function(F),
}

/// A scalar Boolean function of `N` variables.
pub trait Function: Clone + Sized {
    /// Boolean negation.
    fn negate(&self) -> Self;

    /// Boolean disjunction (OR).
    ///
    /// Fails with [`Error::TypeMismatch`] if `other` cannot be combined with `self`.
    fn disjoin(&self, other: &Self) -> Result<Self>;

    /// Boolean conjunction (AND).
    fn conjoin(&self, other: &Self) -> Result<Self>;

    /// Boolean exclusive or (XOR).
    fn xor(&self, other: &Self) -> Result<Self>;

    /// The set of variables the function depends on.
    fn support(&self) -> BTreeSet<Variable>;

    /// The support in name/index order.
    fn inputs(&self) -> Vec<Variable>;

    /// Restricts the variables named (by id) in `upoint` to constants.
    ///
    /// Ids outside the support are ignored; the empty upoint is the identity.
    fn urestrict(&self, upoint: &UPoint) -> Self;

    /// Substitutes the variables in `mapping` by functions.
    fn compose(&self, mapping: &BTreeMap<Variable, Self>) -> Result<Self>;

    /// Returns a satisfying point if the function is satisfiable.
    ///
    /// A tautology *may* return the empty point; a contradiction *must* return `None`.
    fn satisfy_one(&self) -> Option<Point>;

    /// Iterates through all satisfying points, in no particular order.
    fn satisfy_all(&self) -> Box<dyn Iterator<Item = Point> + '_>;

    /// Whether this is the canonical zero form.
    ///
    /// Only the particular "zero form" is recognized; this is not a search for a contradiction.
    fn is_zero(&self) -> bool;

    /// Whether this is the canonical one form.
    ///
    /// Only the particular "one form" is recognized; this is not a search for a tautology.
    fn is_one(&self) -> bool;

    /// Lifts a constant into the representation.
    fn boxed(value: bool) -> Self;

    /// Lifts an integer `0` or `1` into the representation.
    fn box_int(value: i64) -> Result<Self> {
        match value {
            0 => Ok(Self::boxed(false)),
            1 => Ok(Self::boxed(true)),
            _ => Err(Error::TypeMismatch {
                expected: "0 or 1",
                actual: value.to_string(),
            }),
        }
    }

    /// Returns the constant if `is_zero` or `is_one` holds, otherwise the function itself.
    fn unbox(self) -> Unboxed<Self> {
        if self.is_zero() {
            Unboxed::Zero
        } else if self.is_one() {
            Unboxed::One
        } else {
            Unboxed::Function(self)
        }
    }

    /// Ids of the support variables.
    fn usupport(&self) -> BTreeSet<VarId> {
        self.support().iter().map(Variable::uniqid).collect()
    }

    /// The first input, if any.
    fn top(&self) -> Option<Variable> {
        self.inputs().into_iter().next()
    }

    /// Number of support variables.
    fn degree(&self) -> usize {
        self.support().len()
    }

    /// Size of the domain, `2^degree`.
    fn cardinality(&self) -> BigUint {
        BigUint::one() << self.degree()
    }

    /// Restricts the variables of `point` to constants.
    fn restrict(&self, point: &Point) -> Self {
        self.urestrict(&point_to_upoint(point))
    }

    /// Flattens `vpoint`, then restricts.
    fn vrestrict(&self, vpoint: &VPoint) -> Result<Self> {
        let point = flatten_vpoint(vpoint)?;
        Ok(self.restrict(&point))
    }

    /// Iterates through all points of the domain.
    fn iter_domain(&self) -> Box<dyn Iterator<Item = Point> + '_> {
        Box::new(enumerate_points(&self.inputs()))
    }

    /// Iterates through the restriction of the function to every point of the domain.
    fn iter_image(&self) -> Box<dyn Iterator<Item = Self> + '_> {
        Box::new(enumerate_points(&self.inputs()).map(move |point| self.restrict(&point)))
    }

    /// Iterates through all `(point, restriction)` pairs.
    fn iter_relation(&self) -> Box<dyn Iterator<Item = (Point, Self)> + '_> {
        Box::new(enumerate_points(&self.inputs()).map(move |point| {
            let image = self.restrict(&point);
            (point, image)
        }))
    }

    /// Iterates through the cofactors w.r.t. `vs` (the whole support if `None`).
    fn iter_cofactors(&self, vs: Option<&[Variable]>) -> Box<dyn Iterator<Item = Self> + '_> {
        let vs = match vs {
            Some(vs) => vs.to_vec(),
            None => self.inputs(),
        };
        trace!("iter_cofactors: {} variable(s)", vs.len());
        Box::new(enumerate_upoints(&vs).map(move |upoint| self.urestrict(&upoint)))
    }

    /// Cofactors w.r.t. `vs` (the whole support if `None`).
    fn cofactors(&self, vs: Option<&[Variable]>) -> Vec<Self> {
        self.iter_cofactors(vs).collect()
    }

    /// OR of all cofactors: existential quantification.
    fn smoothing(&self, vs: Option<&[Variable]>) -> Result<Self> {
        reduce(self.iter_cofactors(vs), Self::disjoin)
    }

    /// AND of all cofactors: universal quantification.
    fn consensus(&self, vs: Option<&[Variable]>) -> Result<Self> {
        reduce(self.iter_cofactors(vs), Self::conjoin)
    }

    /// XOR of all cofactors: Boolean difference.
    fn derivative(&self, vs: Option<&[Variable]>) -> Result<Self> {
        reduce(self.iter_cofactors(vs), Self::xor)
    }

    /// Number of satisfying points.
    fn satisfy_count(&self) -> BigUint {
        self.satisfy_all().fold(BigUint::zero(), |count, _| count + 1u32)
    }

    fn is_satisfiable(&self) -> bool {
        self.satisfy_one().is_some()
    }

    /// Array of `n` copies of this function.
    ///
    /// Fails with [`Error::InvalidArgument`] if `n` is negative.
    fn repeat(&self, n: i64) -> Result<FunctionArray<Self>> {
        FunctionArray::repeat(self, n)
    }
}

/// Folds `items` with `op`, left to right.
///
/// # Errors
///
/// [`Error::EmptyReduction`] if `items` is empty, otherwise the first error of `op`.
pub fn reduce<F, I, Op>(items: I, op: Op) -> Result<F>
where
    I: IntoIterator<Item = F>,
    Op: Fn(&F, &F) -> Result<F>,
{
    let mut items = items.into_iter();
    let first = items.next().ok_or(Error::EmptyReduction)?;
    let mut count = 1usize;
    let result = items.try_fold(first, |acc, f| {
        count += 1;
        op(&acc, &f)
    });
    trace!("reduce: folded {} item(s)", count);
    result
}
