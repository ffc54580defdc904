#![forbid(unsafe_code)]
//! An attributed term-rewriting kernel.
//!
//! Terms are a small algebraic sum type (`core::expr::Expr`) carrying
//! semantic attributes (Flat, Orderless, OneIdentity, Numeric,
//! NumericFunction, Hold, Constant, Protected); the matcher enumerates
//! bindings of pattern variables to subterms modulo associativity (Flat)
//! and commutativity (Orderless); rules pair a pattern with a replacement
//! and optional guards; the kernel drives repeated rule application to a
//! fixed point.
//!
//! ```
//! use symrw::core::symbol::symb;
//! use symrw::core::expr::Expr;
//! use symrw::kernel::Kernel;
//! use symrw::rule::SubstitutionRule;
//!
//! let plus = symb("lib_doctest_plus");
//! let x = symb("lib_doctest_x");
//! let rule = SubstitutionRule::new(
//!     Expr::function(
//!         Expr::Symbol(plus),
//!         vec![Expr::bound_pattern(x, Expr::blank(None)), Expr::integer(0)],
//!     ),
//!     Expr::symbol(x),
//! );
//! let mut kernel = Kernel::new();
//! kernel.add_rule(rule);
//! let input = Expr::function(Expr::Symbol(plus), vec![Expr::integer(5), Expr::integer(0)]);
//! assert_eq!(kernel.evaluate(&input), Expr::integer(5));
//! ```

pub mod core;
pub mod kernel;
pub mod matcher;
pub mod rule;

pub use core::attributes::Attributes;
pub use core::bindings::Bindings;
pub use core::error::NumericError;
pub use core::expr::Expr;
pub use core::symbol::Symbol;
pub use kernel::Kernel;
pub use rule::{LambdaRule, SubstitutionRule};
