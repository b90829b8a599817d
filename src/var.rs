//! Interned Boolean variables.
//!
//! A [`Variable`] is identified by its `(names, indices)` pair. The registry makes sure
//! that each distinct pair is created exactly once per process, so equality and hashing
//! can use the numeric [`VarId`] alone.
//!
//! # Example
//!
//! ```
//! use boolfunc::var::intern;
//!
//! let a = intern(&["a"], &[]).unwrap();
//! let a2 = intern(&["a"], &[]).unwrap();
//! let a0 = intern(&["a"], &[0]).unwrap();
//!
//! assert_eq!(a, a2);
//! assert_eq!(a.uniqid(), a2.uniqid());
//! assert_ne!(a.uniqid(), a0.uniqid());
//! assert_eq!(a0.to_string(), "a[0]");
//! ```

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Neg, Not};
use std::sync::{Arc, Mutex, PoisonError};

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]*$").expect("variable name pattern is valid"));

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::new);

/// Unique variable identifier (1-based).
///
/// Ids are handed out by the [`Registry`] in creation order, starting at 1.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct VarId(u32);

impl VarId {
    /// Returns the raw id.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<VarId> for u32 {
    fn from(id: VarId) -> Self {
        id.0
    }
}

#[derive(Debug)]
struct VarData {
    names: Vec<String>,
    indices: Vec<u32>,
    uniqid: VarId,
}

/// An interned Boolean variable.
///
/// Cloning is cheap: all clones share the data owned by the registry.
///
/// # Invariants
///
/// - Two variables are equal iff their `(names, indices)` are equal iff their ids are equal.
/// - Ordering compares `names` first and `indices` second, both lexicographically.
#[derive(Clone)]
pub struct Variable(Arc<VarData>);

impl Variable {
    /// All names, most specific first.
    pub fn names(&self) -> &[String] {
        &self.0.names
    }

    /// The most specific name.
    pub fn name(&self) -> &str {
        &self.0.names[0]
    }

    /// Fully qualified name, least specific part first: names `["c", "b", "a"]` give `a.b.c`.
    pub fn qualname(&self) -> String {
        let mut parts: Vec<&str> = self.0.names.iter().map(String::as_str).collect();
        parts.reverse();
        parts.join(".")
    }

    pub fn indices(&self) -> &[u32] {
        &self.0.indices
    }

    pub fn uniqid(&self) -> VarId {
        self.0.uniqid
    }

    /// Positive literal of this variable.
    pub fn pos(&self) -> Literal {
        Literal::positive(self.clone())
    }

    /// Negative literal of this variable.
    pub fn neg(&self) -> Literal {
        Literal::negative(self.clone())
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.0.uniqid == other.0.uniqid
    }
}

impl Eq for Variable {}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.uniqid.hash(state);
    }
}

impl Ord for Variable {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .names
            .cmp(&other.0.names)
            .then_with(|| self.0.indices.cmp(&other.0.indices))
    }
}

impl PartialOrd for Variable {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualname())?;
        if !self.0.indices.is_empty() {
            let indices: Vec<String> = self.0.indices.iter().map(|i| i.to_string()).collect();
            write!(f, "[{}]", indices.join(","))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self, self.0.uniqid)
    }
}

impl Not for Variable {
    type Output = Literal;

    fn not(self) -> Self::Output {
        Literal::negative(self)
    }
}

/// A variable or its complement.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Literal {
    var: Variable,
    negated: bool,
}

impl Literal {
    pub fn positive(var: Variable) -> Self {
        Self { var, negated: false }
    }

    pub fn negative(var: Variable) -> Self {
        Self { var, negated: true }
    }

    pub fn var(&self) -> &Variable {
        &self.var
    }

    pub fn is_positive(&self) -> bool {
        !self.negated
    }

    pub fn is_negative(&self) -> bool {
        self.negated
    }

    /// Value the variable must take for this literal to be true.
    pub fn polarity(&self) -> bool {
        !self.negated
    }

    pub fn negate(self) -> Self {
        Self {
            var: self.var,
            negated: !self.negated,
        }
    }
}

impl From<Variable> for Literal {
    fn from(var: Variable) -> Self {
        Literal::positive(var)
    }
}

impl Neg for Literal {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negate()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", if self.negated { "~" } else { "" }, self.var)
    }
}

type Key = (Vec<String>, Vec<u32>);

struct RegistryState {
    table: HashMap<Key, Variable>,
    next_id: u32,
}

/// Interning table for variables.
///
/// There is exactly one registry per process, see [`Registry::global`]. The lookup, the
/// insertion and the id counter are guarded by one mutex, so concurrent callers interning
/// the same key always observe the same id.
pub struct Registry {
    state: Mutex<RegistryState>,
}

impl Registry {
    fn new() -> Self {
        Self {
            state: Mutex::new(RegistryState {
                table: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    /// The process-wide registry used by [`intern`].
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// Returns the variable for `(names, indices)`, creating it on first request.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidName`] if `names` is empty or a name is not of the form
    ///   `[a-zA-Z][a-zA-Z0-9_]*`.
    /// - [`Error::InvalidIndex`] if an index is negative or does not fit in `u32`.
    pub fn intern<S: AsRef<str>>(&self, names: &[S], indices: &[i64]) -> Result<Variable> {
        let key = validate(names, indices)?;

        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(var) = state.table.get(&key) {
            return Ok(var.clone());
        }

        let uniqid = VarId(state.next_id);
        state.next_id += 1;
        let var = Variable(Arc::new(VarData {
            names: key.0.clone(),
            indices: key.1.clone(),
            uniqid,
        }));
        debug!("intern: new variable {} with id {}", var, uniqid);
        state.table.insert(key, var.clone());
        Ok(var)
    }

    /// Number of interned variables.
    pub fn len(&self) -> usize {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry").field("size", &self.len()).finish()
    }
}

/// Interns `(names, indices)` in the process-wide registry.
///
/// See [`Registry::intern`].
pub fn intern<S: AsRef<str>>(names: &[S], indices: &[i64]) -> Result<Variable> {
    Registry::global().intern(names, indices)
}

fn validate<S: AsRef<str>>(names: &[S], indices: &[i64]) -> Result<Key> {
    if names.is_empty() {
        return Err(Error::InvalidName(String::new()));
    }
    let mut checked_names = Vec::with_capacity(names.len());
    for name in names {
        let name = name.as_ref();
        if !NAME_PATTERN.is_match(name) {
            return Err(Error::InvalidName(name.to_string()));
        }
        checked_names.push(name.to_string());
    }

    let mut checked_indices = Vec::with_capacity(indices.len());
    for &index in indices {
        let index = u32::try_from(index).map_err(|_| Error::InvalidIndex(index))?;
        checked_indices.push(index);
    }

    Ok((checked_names, checked_indices))
}
