//! Textual form of expressions, used for logging and `Kernel::print`.
//!
//! Exactly the table from the external-interfaces section: `Integer`/`Real`
//! print their literal, `Symbol` its name, `Rational`/`Complex` their
//! bracketed constructor form, and `Function` as `head[a1, a2, ...]`.

use std::fmt;

use super::Expr;

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{i}"),
            Self::Real(r) => write!(f, "{r}"),
            Self::Rational(r) => write!(f, "{r}"),
            Self::Complex { real, imaginary } => write!(f, "Complex[{real}, {imaginary}]"),
            Self::Symbol(s) => write!(f, "{s}"),
            Self::Function { head, args, .. } => {
                write!(f, "{head}[")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, "]")
            }
            Self::Blank(Some(head)) => write!(f, "Blank[{head}]"),
            Self::Blank(None) => write!(f, "Blank[]"),
            Self::BoundPattern { name, base } => write!(f, "Pattern[{name}, {base}]"),
        }
    }
}
