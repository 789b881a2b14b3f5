//! # pb-bdd: Pseudo-Boolean constraints to CNF
//!
//! **`pb-bdd`** compiles weighted linear Boolean constraints
//!
//! ```text
//! lo <= w_1 * l_1 + ... + w_n * l_n <= hi
//! ```
//!
//! into equisatisfiable CNF clause sets for CNF-only SAT solvers.
//!
//! ## Strategies
//!
//! - **Decision diagram** ([`bdd::BddEncoder`]): a structurally shared
//!   diagram over the literals is built and every node is turned into a few
//!   Tseitin clauses. Compact for most constraints, but may explode; a limited
//!   encoder aborts once a clause ceiling is exceeded.
//! - **Adder network** ([`watchdog::AdderNetworkEncoder`]): totalizers for
//!   cardinality constraints and the polynomial watchdog for weighted ones.
//!   Always polynomial in the number of literals and the bound.
//!
//! The [`dispatch::EncodingDispatcher`] tries the configured strategy and falls
//! back to the next one when it overflows.
//!
//! ## Basic Usage
//!
//! ```rust
//! use pb_bdd::config::{EncoderConfig, Strategy};
//! use pb_bdd::constraint::{Comparator, PbConstraint};
//! use pb_bdd::db::{Cnf, VarCounter};
//! use pb_bdd::dispatch::EncodingDispatcher;
//! use pb_bdd::types::Lit;
//!
//! // 2*x1 + 3*x2 + 4*x3 <= 5
//! let c = PbConstraint::new(
//!     [(Lit::from_dimacs(1), 2), (Lit::from_dimacs(2), 3), (Lit::from_dimacs(3), 4)],
//!     Comparator::Leq(5),
//! )
//! .unwrap();
//!
//! // Auxiliary variables start after x3.
//! let mut vars = VarCounter::new(3);
//! let mut cnf = Cnf::new();
//!
//! let mut dispatcher = EncodingDispatcher::new(EncoderConfig::default());
//! let used = dispatcher.encode(&c, &mut cnf, &mut vars).unwrap();
//! assert_eq!(used, Strategy::BddLimited);
//!
//! println!("{}", cnf.to_dimacs(vars.max_var()).unwrap());
//! ```
//!
//! ## Core Components
//!
//! - **[`constraint`]**: normalised constraints and their validation.
//! - **[`bdd`]**: diagram construction, gate materialisation and the clause budget.
//! - **[`watchdog`]**: the adder-network encoder.
//! - **[`dispatch`]**: strategy selection and fallback.
//! - **[`sat`]**, **[`dot`]**: model counting and Graphviz export of diagrams.

pub mod bdd;
mod cache;
pub mod config;
pub mod constraint;
pub mod db;
pub mod dispatch;
pub mod dot;
pub mod error;
pub mod gate;
pub mod sat;
pub mod signal;
pub mod types;
pub mod watchdog;
