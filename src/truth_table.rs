//! Truth-table representation of Boolean functions over interned variables.
//!
//! A [`TruthTable`] keeps its inputs in variable order and a `2^n`-bit vector, where bit `k`
//! is the value of the function at `index_to_point(k, inputs)`. Tables are always stored
//! *reduced*: inputs the function does not depend on are dropped. Hence the inputs are
//! exactly the support, constants are exactly the tables without inputs, and two tables
//! are equal iff they represent the same function.
//!
//! A table has at most [`MAX_INPUTS`] inputs. The [`Function`] combinators report a larger
//! result as [`Error::InvalidArgument`]; the operators (`!`, `&`, `|`, `^`, `+`) panic instead.
//!
//! # Example
//!
//! ```
//! use boolfunc::function::Function;
//! use boolfunc::truth_table::TruthTable;
//! use boolfunc::var::intern;
//!
//! let a = intern(&["a"], &[]).unwrap();
//! let b = intern(&["b"], &[]).unwrap();
//! let f = TruthTable::var(&a) & TruthTable::var(&b);
//!
//! assert_eq!(f.degree(), 2);
//! assert_eq!(f.satisfy_count(), num_bigint::BigUint::from(1u32));
//! // ∃b. (a ∧ b) = a
//! assert_eq!(f.smoothing(Some(&[b][..])).unwrap(), TruthTable::var(&a));
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::{Add, BitAnd, BitOr, BitXor, Mul, Not};

use log::trace;
use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::array::FunctionArray;
use crate::error::{Error, Result};
use crate::function::Function;
use crate::point::{enumerate_points, index_to_point, Point, UPoint};
use crate::var::{Literal, Variable};

/// Largest number of inputs a table may have.
pub const MAX_INPUTS: usize = 24;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TruthTable {
    inputs: Vec<Variable>,
    bits: BigUint,
}

fn num_rows(n: usize) -> u64 {
    assert!(n <= MAX_INPUTS, "Truth table with {} inputs is too large", n);
    1u64 << n
}

fn full_mask(n: usize) -> BigUint {
    (BigUint::one() << num_rows(n)) - 1u32
}

fn check_width(n: usize) -> Result<()> {
    if n > MAX_INPUTS {
        return Err(Error::InvalidArgument(format!(
            "truth table with {} inputs exceeds the limit of {}",
            n, MAX_INPUTS
        )));
    }
    Ok(())
}

/// Unwraps the result of an operator, which has no way to report an error.
fn or_panic(result: Result<TruthTable>) -> TruthTable {
    match result {
        Ok(table) => table,
        Err(e) => panic!("{}", e),
    }
}

fn bit_on(num: u64, i: usize) -> bool {
    (num >> i) & 1 == 1
}

/// Whether the table `bits` over `n` inputs depends on input `i`.
fn depends_on(bits: &BigUint, n: usize, i: usize) -> bool {
    (0..num_rows(n))
        .filter(|&k| !bit_on(k, i))
        .any(|k| bits.bit(k) != bits.bit(k | (1 << i)))
}

/// Removes input `i` from a table that does not depend on it.
fn drop_input(bits: &BigUint, n: usize, i: usize) -> BigUint {
    let low_mask = (1u64 << i) - 1;
    let mut result = BigUint::zero();
    for j in 0..num_rows(n - 1) {
        let k = ((j >> i) << (i + 1)) | (j & low_mask);
        if bits.bit(k) {
            result.set_bit(j, true);
        }
    }
    result
}

impl TruthTable {
    /// Builds a reduced table, dropping the inputs the function does not depend on.
    fn reduced(mut inputs: Vec<Variable>, mut bits: BigUint) -> Self {
        let mut i = 0;
        while i < inputs.len() {
            if depends_on(&bits, inputs.len(), i) {
                i += 1;
            } else {
                trace!("reduce: dropping input {}", inputs[i]);
                bits = drop_input(&bits, inputs.len(), i);
                inputs.remove(i);
            }
        }
        let table = Self { inputs, bits };
        #[cfg(feature = "shields_up")]
        table.check();
        table
    }

    #[cfg(feature = "shields_up")]
    fn check(&self) {
        let n = self.inputs.len();
        assert!(self.bits <= full_mask(n), "truth table has bits beyond its rows");
        assert!(
            self.inputs.windows(2).all(|w| w[0] < w[1]),
            "truth table inputs must be sorted and unique"
        );
        assert!(
            (0..n).all(|i| depends_on(&self.bits, n, i)),
            "truth table must depend on all its inputs"
        );
    }

    /// The constant zero function.
    pub fn zero() -> Self {
        Self {
            inputs: Vec::new(),
            bits: BigUint::zero(),
        }
    }

    /// The constant one function.
    pub fn one() -> Self {
        Self {
            inputs: Vec::new(),
            bits: BigUint::one(),
        }
    }

    /// The projection on `var`.
    pub fn var(var: &Variable) -> Self {
        Self {
            inputs: vec![var.clone()],
            bits: BigUint::from(0b10u32),
        }
    }

    pub fn literal(lit: &Literal) -> Self {
        let table = Self::var(lit.var());
        if lit.is_positive() {
            table
        } else {
            !table
        }
    }

    /// Tabulates `f` over all points of the space spanned by `vs`.
    ///
    /// # Panics
    ///
    /// Panics if `vs` has more than [`MAX_INPUTS`] distinct variables.
    pub fn from_fn<F>(vs: &[Variable], f: F) -> Self
    where
        F: Fn(&Point) -> bool,
    {
        let inputs: Vec<Variable> = vs
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        assert!(
            inputs.len() <= MAX_INPUTS,
            "Truth table with {} inputs is too large",
            inputs.len()
        );
        let mut bits = BigUint::zero();
        for (k, point) in enumerate_points(&inputs).enumerate() {
            if f(&point) {
                bits.set_bit(k as u64, true);
            }
        }
        Self::reduced(inputs, bits)
    }

    /// The raw table: bit `k` is the value at `index_to_point(k, inputs)`.
    pub fn bits(&self) -> &BigUint {
        &self.bits
    }

    /// Evaluates the function at `point`, or `None` if `point` misses an input.
    pub fn eval(&self, point: &Point) -> Option<bool> {
        let mut k = 0u64;
        for (i, v) in self.inputs.iter().enumerate() {
            if *point.get(v)? {
                k |= 1 << i;
            }
        }
        Some(self.bits.bit(k))
    }

    /// Re-tabulates the function over `inputs`, a superset of its own inputs.
    fn expand(&self, inputs: &[Variable]) -> BigUint {
        let positions: Vec<usize> = self
            .inputs
            .iter()
            .map(|v| {
                inputs
                    .binary_search(v)
                    .unwrap_or_else(|_| panic!("input {} is missing from the target space", v))
            })
            .collect();

        let mut result = BigUint::zero();
        for k in 0..num_rows(inputs.len()) {
            let local = positions
                .iter()
                .enumerate()
                .filter(|(_, &p)| bit_on(k, p))
                .fold(0u64, |acc, (i, _)| acc | (1 << i));
            if self.bits.bit(local) {
                result.set_bit(k, true);
            }
        }
        result
    }

    /// Combines two tables over the union of their inputs.
    ///
    /// Fails with [`Error::InvalidArgument`] if the union has more than [`MAX_INPUTS`] variables.
    fn apply<Op>(&self, other: &Self, op: Op) -> Result<Self>
    where
        Op: Fn(&BigUint, &BigUint) -> BigUint,
    {
        let inputs: Vec<Variable> = self
            .inputs
            .iter()
            .chain(other.inputs.iter())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        check_width(inputs.len())?;
        let lhs = self.expand(&inputs);
        let rhs = other.expand(&inputs);
        Ok(Self::reduced(inputs, op(&lhs, &rhs)))
    }

    pub fn apply_not(&self) -> Self {
        Self {
            inputs: self.inputs.clone(),
            bits: &self.bits ^ full_mask(self.inputs.len()),
        }
    }

    pub fn apply_and(&self, other: &Self) -> Result<Self> {
        self.apply(other, |f, g| f & g)
    }

    pub fn apply_or(&self, other: &Self) -> Result<Self> {
        self.apply(other, |f, g| f | g)
    }

    pub fn apply_xor(&self, other: &Self) -> Result<Self> {
        self.apply(other, |f, g| f ^ g)
    }
}

impl Function for TruthTable {
    fn negate(&self) -> Self {
        self.apply_not()
    }

    fn disjoin(&self, other: &Self) -> Result<Self> {
        self.apply_or(other)
    }

    fn conjoin(&self, other: &Self) -> Result<Self> {
        self.apply_and(other)
    }

    fn xor(&self, other: &Self) -> Result<Self> {
        self.apply_xor(other)
    }

    fn support(&self) -> BTreeSet<Variable> {
        self.inputs.iter().cloned().collect()
    }

    fn inputs(&self) -> Vec<Variable> {
        self.inputs.clone()
    }

    fn urestrict(&self, upoint: &UPoint) -> Self {
        let fixed: Vec<Option<bool>> = self.inputs.iter().map(|v| upoint.get(v.uniqid())).collect();
        if fixed.iter().all(Option::is_none) {
            return self.clone();
        }

        let free: Vec<usize> = (0..fixed.len()).filter(|&i| fixed[i].is_none()).collect();
        let base = fixed
            .iter()
            .enumerate()
            .filter(|(_, value)| **value == Some(true))
            .fold(0u64, |acc, (i, _)| acc | (1 << i));

        let mut bits = BigUint::zero();
        for j in 0..num_rows(free.len()) {
            let k = free
                .iter()
                .enumerate()
                .filter(|(t, _)| bit_on(j, *t))
                .fold(base, |acc, (_, &p)| acc | (1 << p));
            if self.bits.bit(k) {
                bits.set_bit(j, true);
            }
        }

        let inputs = free.iter().map(|&i| self.inputs[i].clone()).collect();
        Self::reduced(inputs, bits)
    }

    fn compose(&self, mapping: &BTreeMap<Variable, Self>) -> Result<Self> {
        if !self.inputs.iter().any(|v| mapping.contains_key(v)) {
            return Ok(self.clone());
        }

        let substitutes: Vec<Self> = self
            .inputs
            .iter()
            .map(|v| mapping.get(v).cloned().unwrap_or_else(|| Self::var(v)))
            .collect();
        let width = substitutes
            .iter()
            .flat_map(|g| g.inputs.iter())
            .collect::<BTreeSet<_>>()
            .len();
        check_width(width)?;

        // Sum over the minterms of `self`, each with its variables substituted.
        let mut result = Self::zero();
        for k in (0..num_rows(self.inputs.len())).filter(|&k| self.bits.bit(k)) {
            let term = substitutes.iter().enumerate().try_fold(Self::one(), |acc, (i, g)| {
                if bit_on(k, i) {
                    acc.apply_and(g)
                } else {
                    acc.apply_and(&g.apply_not())
                }
            })?;
            result = result.apply_or(&term)?;
        }
        Ok(result)
    }

    fn satisfy_one(&self) -> Option<Point> {
        self.bits.trailing_zeros().map(|k| index_to_point(k, &self.inputs))
    }

    fn satisfy_all(&self) -> Box<dyn Iterator<Item = Point> + '_> {
        Box::new(
            (0..num_rows(self.inputs.len()))
                .filter(move |&k| self.bits.bit(k))
                .map(move |k| index_to_point(k, &self.inputs)),
        )
    }

    fn is_zero(&self) -> bool {
        self.inputs.is_empty() && self.bits.is_zero()
    }

    fn is_one(&self) -> bool {
        self.inputs.is_empty() && self.bits.is_one()
    }

    fn boxed(value: bool) -> Self {
        if value {
            Self::one()
        } else {
            Self::zero()
        }
    }
}

impl fmt::Debug for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inputs: Vec<String> = self.inputs.iter().map(|v| v.to_string()).collect();
        f.debug_struct("TruthTable")
            .field("inputs", &inputs)
            .field("bits", &format_args!("{:#b}", self.bits))
            .finish()
    }
}

impl Not for TruthTable {
    type Output = TruthTable;

    fn not(self) -> Self::Output {
        self.apply_not()
    }
}

impl Not for &TruthTable {
    type Output = TruthTable;

    fn not(self) -> Self::Output {
        self.apply_not()
    }
}

/// Conjunction.
///
/// Panics if the result would have more than [`MAX_INPUTS`] inputs.
impl BitAnd for &TruthTable {
    type Output = TruthTable;

    fn bitand(self, rhs: Self) -> Self::Output {
        or_panic(self.apply_and(rhs))
    }
}

impl BitAnd for TruthTable {
    type Output = TruthTable;

    fn bitand(self, rhs: Self) -> Self::Output {
        or_panic(self.apply_and(&rhs))
    }
}

/// Disjunction.
///
/// Panics if the result would have more than [`MAX_INPUTS`] inputs.
impl BitOr for &TruthTable {
    type Output = TruthTable;

    fn bitor(self, rhs: Self) -> Self::Output {
        or_panic(self.apply_or(rhs))
    }
}

impl BitOr for TruthTable {
    type Output = TruthTable;

    fn bitor(self, rhs: Self) -> Self::Output {
        or_panic(self.apply_or(&rhs))
    }
}

/// Exclusive or.
///
/// Panics if the result would have more than [`MAX_INPUTS`] inputs.
impl BitXor for &TruthTable {
    type Output = TruthTable;

    fn bitxor(self, rhs: Self) -> Self::Output {
        or_panic(self.apply_xor(rhs))
    }
}

impl BitXor for TruthTable {
    type Output = TruthTable;

    fn bitxor(self, rhs: Self) -> Self::Output {
        or_panic(self.apply_xor(&rhs))
    }
}

/// Disjunction.
impl Add for TruthTable {
    type Output = TruthTable;

    fn add(self, rhs: Self) -> Self::Output {
        or_panic(self.apply_or(&rhs))
    }
}

/// Concatenation: `f + [g, h] = [f, g, h]`.
impl Add<FunctionArray<TruthTable>> for TruthTable {
    type Output = FunctionArray<TruthTable>;

    fn add(self, rhs: FunctionArray<TruthTable>) -> Self::Output {
        rhs.prepend(self)
    }
}

/// Repetition: `f * n = [f; n]`.
impl Mul<i64> for TruthTable {
    type Output = Result<FunctionArray<TruthTable>>;

    fn mul(self, rhs: i64) -> Self::Output {
        self.repeat(rhs)
    }
}

impl Mul<TruthTable> for i64 {
    type Output = Result<FunctionArray<TruthTable>>;

    fn mul(self, rhs: TruthTable) -> Self::Output {
        rhs.repeat(self)
    }
}
