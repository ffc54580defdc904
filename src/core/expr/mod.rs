//! The expression sum type: the algebraic data model for terms.

mod display;
mod ordering;

pub use ordering::expr_cmp;

use std::sync::Arc;

use num_symrw::{Integer, Number, Rational};

use crate::core::attributes::Attributes;
use crate::core::bindings::Bindings;
use crate::core::symbol::{declared_attributes, symb, Symbol};

/// A value in the algebraic term language: a number, a symbol, a function
/// application, or (left-hand-side-only) a pattern.
///
/// Immutable value tree: a rewrite produces a new `Expr`, old trees remain
/// valid for as long as something references them. `Function`'s head and
/// arguments are `Arc`-shared so unrelated rewrites of sibling subtrees
/// don't force a deep clone.
#[derive(Debug, Clone)]
pub enum Expr {
    /// Arbitrary-precision integer.
    Integer(Integer),
    /// Double-precision float.
    Real(f64),
    /// Reduced rational.
    Rational(Rational),
    /// Complex number. `real`/`imaginary` are typed as the non-Complex
    /// `Number` sub-union, which is how this crate structurally rules out
    /// nested Complex rather than checking it at construction time.
    Complex {
        /// Real component.
        real: Number,
        /// Imaginary component.
        imaginary: Number,
    },
    /// A named symbol.
    Symbol(Symbol),
    /// An n-ary function application.
    Function {
        /// The head. Usually a Symbol but may be any expression (curried /
        /// higher-order application).
        head: Arc<Self>,
        /// The argument list.
        args: Vec<Arc<Self>>,
        /// Attribute set computed once at construction time (step 1 of
        /// normalization), cached rather than recomputed on every access.
        attributes: Attributes,
    },
    /// Pattern: matches any expression, optionally restricted to a head.
    Blank(Option<Arc<Self>>),
    /// Pattern: matches whatever `base` matches and records the binding.
    BoundPattern {
        /// The pattern-variable name.
        name: Symbol,
        /// The pattern this variable is bound around.
        base: Arc<Self>,
    },
}

impl Expr {
    /// Build an `Expr::Integer` from a machine integer.
    #[must_use]
    pub fn integer(value: i64) -> Self {
        Self::Integer(Integer::from(value))
    }

    /// Build an `Expr::Real`.
    #[must_use]
    pub const fn real(value: f64) -> Self {
        Self::Real(value)
    }

    /// Build an `Expr::Rational`, collapsing to `Integer` when the
    /// denominator reduces to 1 (the boundary behavior documented in
    /// `# TESTABLE PROPERTIES`).
    ///
    /// # Errors
    /// Returns `NumericError::InvalidRational` if `denominator` is zero.
    pub fn rational(
        numerator: Integer,
        denominator: Integer,
    ) -> Result<Self, num_symrw::NumericError> {
        let r = Rational::new(numerator, denominator)?;
        Ok(if r.is_integral() {
            Self::Integer(r.numerator().clone())
        } else {
            Self::Rational(r)
        })
    }

    /// Build an `Expr::Complex`, collapsing to the real component when the
    /// imaginary part is exactly zero.
    #[must_use]
    pub fn complex(real: Number, imaginary: Number) -> Self {
        if imaginary.is_zero() {
            number_to_expr(real)
        } else {
            Self::Complex { real, imaginary }
        }
    }

    /// Wrap a symbol as an expression.
    #[must_use]
    pub const fn symbol(symbol: Symbol) -> Self {
        Self::Symbol(symbol)
    }

    /// A `Blank` pattern, optionally restricted to expressions whose head
    /// equals `head`.
    #[must_use]
    pub fn blank(head: Option<Self>) -> Self {
        Self::Blank(head.map(Arc::new))
    }

    /// A `BoundPattern(name, base)` pattern.
    #[must_use]
    pub fn bound_pattern(name: Symbol, base: Self) -> Self {
        Self::BoundPattern {
            name,
            base: Arc::new(base),
        }
    }

    /// Construct a `Function`, running the full construction-time
    /// normalization pipeline: attribute attachment, Flat flattening,
    /// Orderless sorting, Numeric propagation (spec.md §4.1, steps 1-4, in
    /// order).
    #[must_use]
    pub fn function(head: Self, args: Vec<Self>) -> Self {
        let head = Arc::new(head);
        let attrs = attributes_for_head(&head);

        let mut flat_args: Vec<Arc<Self>> = Vec::with_capacity(args.len());
        for arg in args {
            if attrs.contains(Attributes::FLAT) {
                if let Self::Function {
                    head: arg_head,
                    args: arg_args,
                    ..
                } = &arg
                {
                    if **arg_head == *head {
                        flat_args.extend(arg_args.iter().cloned());
                        continue;
                    }
                }
            }
            flat_args.push(Arc::new(arg));
        }

        if attrs.contains(Attributes::ORDERLESS) {
            flat_args.sort_by(|a, b| expr_cmp(a, b));
        }

        let mut attrs = attrs;
        if attrs.contains(Attributes::NUMERIC_FUNCTION) && flat_args.iter().all(|a| a.is_numeric())
        {
            attrs |= Attributes::NUMERIC;
        }

        Self::Function {
            head,
            args: flat_args,
            attributes: attrs,
        }
    }

    /// The head of this expression. Non-`Symbol` heads resolve to the
    /// symbol named `Symbol`; `Symbol("Symbol")` is its own head.
    #[must_use]
    pub fn head(&self) -> Self {
        match self {
            Self::Integer(_) => Self::Symbol(symb("Integer")),
            Self::Real(_) => Self::Symbol(symb("Real")),
            Self::Rational(_) => Self::Symbol(symb("Rational")),
            Self::Complex { .. } => Self::Symbol(symb("Complex")),
            Self::Symbol(s) => {
                if s.name().as_deref() == Some("Symbol") {
                    Self::Symbol(*s)
                } else {
                    Self::Symbol(symb("Symbol"))
                }
            }
            Self::Function { head, .. } => (**head).clone(),
            Self::Blank(_) => Self::Symbol(symb("Blank")),
            Self::BoundPattern { .. } => Self::Symbol(symb("BoundPattern")),
        }
    }

    /// The attribute set for this expression: the cached set for a
    /// `Function`, the default-plus-declared set for a bare `Symbol`, a
    /// fixed `{Numeric, Constant}` for numbers, and empty for patterns.
    #[must_use]
    pub fn attributes(&self) -> Attributes {
        match self {
            Self::Integer(_) | Self::Real(_) | Self::Rational(_) | Self::Complex { .. } => {
                Attributes::NUMERIC.union(Attributes::CONSTANT)
            }
            Self::Symbol(s) => symbol_attributes(*s),
            Self::Function { attributes, .. } => *attributes,
            Self::Blank(_) | Self::BoundPattern { .. } => Attributes::empty(),
        }
    }

    /// Whether this expression is Numeric (a number, or a Function with
    /// `NumericFunction` and all-Numeric arguments).
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.attributes().contains(Attributes::NUMERIC)
    }

    /// Substitute bound pattern-variables with their matched expressions.
    ///
    /// Symbols look themselves up in `bindings`; Functions substitute head
    /// and arguments and reconstruct (re-running normalization, which is
    /// where Flat/Orderless repack after substitution); atoms return
    /// themselves unchanged.
    #[must_use]
    pub fn substitute(&self, bindings: &Bindings) -> Self {
        match self {
            Self::Symbol(s) => bindings
                .lookup(*s)
                .map_or_else(|| self.clone(), |e| (**e).clone()),
            Self::Function { head, args, .. } => {
                let new_head = head.substitute(bindings);
                let new_args: Vec<Self> = args.iter().map(|a| a.substitute(bindings)).collect();
                Self::function(new_head, new_args)
            }
            Self::Blank(Some(inner)) => Self::Blank(Some(Arc::new(inner.substitute(bindings)))),
            Self::BoundPattern { name, base } => Self::BoundPattern {
                name: *name,
                base: Arc::new(base.substitute(bindings)),
            },
            _ => self.clone(),
        }
    }
}

/// Convert a `Number` back into its matching `Expr` variant.
pub(crate) fn number_to_expr(n: Number) -> Expr {
    match n {
        Number::Integer(i) => Expr::Integer(i),
        Number::Real(r) => Expr::Real(r),
        Number::Rational(r) => Expr::Rational(r),
    }
}

pub(crate) fn symbol_attributes(s: Symbol) -> Attributes {
    let default = s
        .name()
        .as_deref()
        .map_or_else(Attributes::empty, Attributes::default_for_name);
    default.union(declared_attributes(s))
}

fn attributes_for_head(head: &Expr) -> Attributes {
    match head {
        Expr::Symbol(s) => symbol_attributes(*s),
        other => other.attributes(),
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Real(a), Self::Real(b)) => a.to_bits() == b.to_bits(),
            (Self::Rational(a), Self::Rational(b)) => a == b,
            (
                Self::Complex {
                    real: ra,
                    imaginary: ia,
                },
                Self::Complex {
                    real: rb,
                    imaginary: ib,
                },
            ) => ra == rb && ia == ib,
            (Self::Symbol(a), Self::Symbol(b)) => a == b,
            (
                Self::Function {
                    head: ha, args: aa, ..
                },
                Self::Function {
                    head: hb, args: ab, ..
                },
            ) => ha == hb && aa == ab,
            (Self::Blank(a), Self::Blank(b)) => a == b,
            (
                Self::BoundPattern {
                    name: na,
                    base: ba,
                },
                Self::BoundPattern {
                    name: nb,
                    base: bb,
                },
            ) => na == nb && ba == bb,
            _ => false,
        }
    }
}

impl Eq for Expr {}

impl std::hash::Hash for Expr {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Integer(i) => i.hash(state),
            Self::Real(r) => r.to_bits().hash(state),
            Self::Rational(r) => r.hash(state),
            Self::Complex { real, imaginary } => {
                hash_number(real, state);
                hash_number(imaginary, state);
            }
            Self::Symbol(s) => s.hash(state),
            Self::Function { head, args, .. } => {
                head.hash(state);
                for a in args {
                    a.hash(state);
                }
            }
            Self::Blank(h) => h.hash(state),
            Self::BoundPattern { name, base } => {
                name.hash(state);
                base.hash(state);
            }
        }
    }
}

fn hash_number<H: std::hash::Hasher>(n: &Number, state: &mut H) {
    match n {
        Number::Integer(i) => i.hash(state),
        Number::Real(r) => r.to_bits().hash(state),
        Number::Rational(r) => r.hash(state),
    }
}
