//! # boolfunc: Boolean variables, points and functions
//!
//! **`boolfunc`** is the algebraic core of a Boolean-function toolkit. It defines what a
//! Boolean *variable* and a Boolean *function* are, independently of how a function is
//! represented (truth table, expression tree, decision diagram).
//!
//! ## Key Features
//!
//! - **Interned variables**: every distinct `(names, indices)` pair is created exactly once
//!   per process and gets a unique, stable, 1-based id. Equality and hashing use the id.
//! - **One bit convention**: numbers, points, untyped points and min/max terms all map bit `i`
//!   of an index to the `i`-th variable of a space, so every representation agrees
//!   bit-for-bit.
//! - **Lazy enumeration**: points, untyped points and terms of an N-dimensional space are
//!   produced by restartable iterators.
//! - **Representation-agnostic operations**: implement the primitives of
//!   [`Function`][crate::function::Function] and get restriction, cofactors, smoothing (∃),
//!   consensus (∀), derivative and counting for free.
//!
//! ## Basic Usage
//!
//! ```rust
//! use boolfunc::function::Function;
//! use boolfunc::point::{enumerate_points, index_to_term};
//! use boolfunc::truth_table::TruthTable;
//! use boolfunc::var::intern;
//!
//! // 1. Intern variables
//! let a = intern(&["a"], &[]).unwrap();
//! let b = intern(&["b"], &[]).unwrap();
//!
//! // 2. Walk the space they span
//! assert_eq!(enumerate_points(&[a.clone(), b.clone()]).count(), 4);
//! let minterm = index_to_term(0b10, &[a.pos(), b.pos()], false);
//! assert_eq!(minterm, vec![a.neg(), b.pos()]);
//!
//! // 3. Build a function and quantify
//! let f = TruthTable::var(&a) ^ TruthTable::var(&b);
//! assert!(f.smoothing(None).unwrap().is_one());
//! assert!(f.consensus(None).unwrap().is_zero());
//! ```
//!
//! ## Core Components
//!
//! - **[`var`]**: the variable registry, [`Variable`][crate::var::Variable] and
//!   [`Literal`][crate::var::Literal].
//! - **[`point`]**: conversions between indices, points, untyped points and terms.
//! - **[`function`]**: the [`Function`][crate::function::Function] contract and derived operations.
//! - **[`truth_table`]**: a complete truth-table implementation of the contract.
//! - **[`array`]**: ordered arrays of functions.

pub mod array;
pub mod error;
pub mod function;
pub mod point;
pub mod truth_table;
pub mod var;

pub use error::{Error, Result};
