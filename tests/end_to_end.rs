//! End-to-end scenarios and boundary behaviors against small, test-local
//! rule packs. None of these rules ship with the crate — a `Kernel` starts
//! with an empty registry, and callers assemble the pack their domain needs,
//! the same way each test here assembles just enough of a computer-algebra
//! pack to exercise one scenario.

use num_symrw::Integer;
use symrw::core::attributes::Attributes;
use symrw::core::bindings::Bindings;
use symrw::core::symbol::{declare_attributes, symb};
use symrw::{Expr, Kernel, LambdaRule, SubstitutionRule};

fn int_blank() -> Expr {
    Expr::blank(Some(Expr::Symbol(symb("Integer"))))
}

fn as_integer(expr: &Expr) -> &Integer {
    let Expr::Integer(i) = expr else {
        panic!("guard restricted this binding to Expr::Integer")
    };
    i
}

/// `Plus[2, 3] -> 5`: a lambda rule folding two Integer-headed blanks.
#[test]
fn plus_of_two_integers_sums() {
    let plus = symb("e2e_plus_sum");
    let a = symb("e2e_plus_sum_a");
    let b = symb("e2e_plus_sum_b");
    let pattern = Expr::function(
        Expr::Symbol(plus),
        vec![
            Expr::bound_pattern(a, int_blank()),
            Expr::bound_pattern(b, int_blank()),
        ],
    );
    let rule = LambdaRule::new(pattern, move |bindings: &Bindings| {
        let x = as_integer(bindings.get(a));
        let y = as_integer(bindings.get(b));
        Expr::Integer(x.clone() + y.clone())
    });
    let mut kernel = Kernel::new();
    kernel.add_rule(rule);
    let input = Expr::function(Expr::Symbol(plus), vec![Expr::integer(2), Expr::integer(3)]);
    assert_eq!(kernel.evaluate(&input), Expr::integer(5));
}

/// `Times[2, 3] -> 6`.
#[test]
fn times_of_two_integers_multiplies() {
    let times = symb("e2e_times_mul");
    let a = symb("e2e_times_mul_a");
    let b = symb("e2e_times_mul_b");
    let pattern = Expr::function(
        Expr::Symbol(times),
        vec![
            Expr::bound_pattern(a, int_blank()),
            Expr::bound_pattern(b, int_blank()),
        ],
    );
    let rule = LambdaRule::new(pattern, move |bindings: &Bindings| {
        let x = as_integer(bindings.get(a));
        let y = as_integer(bindings.get(b));
        Expr::Integer(x.clone() * y.clone())
    });
    let mut kernel = Kernel::new();
    kernel.add_rule(rule);
    let input = Expr::function(Expr::Symbol(times), vec![Expr::integer(2), Expr::integer(3)]);
    assert_eq!(kernel.evaluate(&input), Expr::integer(6));
}

/// `Power[2, 3] -> 8`, guarded so the callback only ever sees a non-negative
/// exponent it can convert to `u32`.
#[test]
fn power_of_two_integers_exponentiates() {
    let power = symb("e2e_power");
    let non_negative_q = symb("e2e_power_nonneg_q");
    let base = symb("e2e_power_base");
    let exponent = symb("e2e_power_exp");

    let nonneg_rule = LambdaRule::new(
        Expr::function(
            Expr::Symbol(non_negative_q),
            vec![Expr::bound_pattern(exponent, int_blank())],
        ),
        move |bindings: &Bindings| {
            let n = as_integer(bindings.get(exponent));
            Expr::Symbol(symb(if n.is_negative() { "False" } else { "True" }))
        },
    );

    let power_rule = LambdaRule::with_guards(
        Expr::function(
            Expr::Symbol(power),
            vec![
                Expr::bound_pattern(base, int_blank()),
                Expr::bound_pattern(exponent, int_blank()),
            ],
        ),
        move |bindings: &Bindings| {
            let b = as_integer(bindings.get(base));
            let e = as_integer(bindings.get(exponent));
            let e_u32: u32 = e
                .value()
                .to_string()
                .parse()
                .expect("guard restricted this to a non-negative exponent that fits a u32");
            Expr::Integer(b.pow(e_u32))
        },
        vec![Expr::function(
            Expr::Symbol(non_negative_q),
            vec![Expr::symbol(exponent)],
        )],
    );

    let mut kernel = Kernel::new();
    kernel.add_rule(nonneg_rule);
    kernel.add_rule(power_rule);
    let input = Expr::function(Expr::Symbol(power), vec![Expr::integer(2), Expr::integer(3)]);
    assert_eq!(kernel.evaluate(&input), Expr::integer(8));
}

/// `Plus[a, 0] -> a`.
#[test]
fn plus_with_zero_is_identity() {
    let plus = symb("e2e_plus_identity");
    let a = symb("e2e_plus_identity_a");
    let rule = SubstitutionRule::new(
        Expr::function(
            Expr::Symbol(plus),
            vec![Expr::bound_pattern(a, Expr::blank(None)), Expr::integer(0)],
        ),
        Expr::symbol(a),
    );
    let mut kernel = Kernel::new();
    kernel.add_rule(rule);
    let variable = Expr::symbol(symb("e2e_plus_identity_var"));
    let input = Expr::function(Expr::Symbol(plus), vec![variable.clone(), Expr::integer(0)]);
    assert_eq!(kernel.evaluate(&input), variable);
}

/// `Times[x, 0] -> 0`.
#[test]
fn times_with_zero_is_zero() {
    let times = symb("e2e_times_zero");
    let rule = SubstitutionRule::new(
        Expr::function(
            Expr::Symbol(times),
            vec![Expr::blank(None), Expr::integer(0)],
        ),
        Expr::integer(0),
    );
    let mut kernel = Kernel::new();
    kernel.add_rule(rule);
    let variable = Expr::symbol(symb("e2e_times_zero_var"));
    let input = Expr::function(Expr::Symbol(times), vec![variable, Expr::integer(0)]);
    assert_eq!(kernel.evaluate(&input), Expr::integer(0));
}

/// `Plus[a, a] -> Times[a, 2]`, matching two equal subterms via a repeated
/// bound-pattern name.
#[test]
fn plus_of_equal_terms_doubles_via_times() {
    let plus = symb("e2e_plus_double");
    let times = symb("e2e_plus_double_times");
    let x = symb("e2e_plus_double_x");
    let rule = SubstitutionRule::new(
        Expr::function(
            Expr::Symbol(plus),
            vec![
                Expr::bound_pattern(x, Expr::blank(None)),
                Expr::bound_pattern(x, Expr::blank(None)),
            ],
        ),
        Expr::function(Expr::Symbol(times), vec![Expr::symbol(x), Expr::integer(2)]),
    );
    let mut kernel = Kernel::new();
    kernel.add_rule(rule);
    let a = Expr::symbol(symb("e2e_plus_double_a"));
    let input = Expr::function(Expr::Symbol(plus), vec![a.clone(), a.clone()]);
    let expected = Expr::function(Expr::Symbol(times), vec![a, Expr::integer(2)]);
    assert_eq!(kernel.evaluate(&input), expected);
}

/// `Times[a, a] -> Power[a, 2]`.
#[test]
fn times_of_equal_terms_squares_via_power() {
    let times = symb("e2e_times_square");
    let power = symb("e2e_times_square_power");
    let x = symb("e2e_times_square_x");
    let rule = SubstitutionRule::new(
        Expr::function(
            Expr::Symbol(times),
            vec![
                Expr::bound_pattern(x, Expr::blank(None)),
                Expr::bound_pattern(x, Expr::blank(None)),
            ],
        ),
        Expr::function(Expr::Symbol(power), vec![Expr::symbol(x), Expr::integer(2)]),
    );
    let mut kernel = Kernel::new();
    kernel.add_rule(rule);
    let a = Expr::symbol(symb("e2e_times_square_a"));
    let input = Expr::function(Expr::Symbol(times), vec![a.clone(), a.clone()]);
    let expected = Expr::function(Expr::Symbol(power), vec![a, Expr::integer(2)]);
    assert_eq!(kernel.evaluate(&input), expected);
}

/// Builds the shared differentiation-and-arithmetic pack used by both the
/// `D[Plus[...], a]` sum rule and the `D[Sin[Exp[...]]], a]` chain-rule
/// scenarios: same-variable / constant-subterm base cases, Plus/Sin/Exp
/// structural rules, and just enough Integer folding to collapse the
/// resulting sums of 0s and 1s back to a single Integer.
fn build_calculus_kernel() -> Kernel {
    let plus = symb("Plus");
    let times = symb("Times");
    let d = symb("e2e_calc_d");
    let sin = symb("e2e_calc_sin");
    let cos = symb("e2e_calc_cos");
    let exp = symb("e2e_calc_exp");
    let constant_q = symb("e2e_calc_constant_q");

    let x1 = symb("e2e_calc_x1");
    let same_var_rule = SubstitutionRule::new(
        Expr::function(
            Expr::Symbol(d),
            vec![
                Expr::bound_pattern(x1, Expr::blank(None)),
                Expr::bound_pattern(x1, Expr::blank(None)),
            ],
        ),
        Expr::integer(1),
    );

    let u_sin = symb("e2e_calc_u_sin");
    let x_sin = symb("e2e_calc_x_sin");
    let sin_chain_rule = SubstitutionRule::new(
        Expr::function(
            Expr::Symbol(d),
            vec![
                Expr::function(
                    Expr::Symbol(sin),
                    vec![Expr::bound_pattern(u_sin, Expr::blank(None))],
                ),
                Expr::bound_pattern(x_sin, Expr::blank(None)),
            ],
        ),
        Expr::function(
            Expr::Symbol(times),
            vec![
                Expr::function(Expr::Symbol(cos), vec![Expr::symbol(u_sin)]),
                Expr::function(
                    Expr::Symbol(d),
                    vec![Expr::symbol(u_sin), Expr::symbol(x_sin)],
                ),
            ],
        ),
    );

    let u_exp = symb("e2e_calc_u_exp");
    let x_exp = symb("e2e_calc_x_exp");
    let exp_chain_rule = SubstitutionRule::new(
        Expr::function(
            Expr::Symbol(d),
            vec![
                Expr::function(
                    Expr::Symbol(exp),
                    vec![Expr::bound_pattern(u_exp, Expr::blank(None))],
                ),
                Expr::bound_pattern(x_exp, Expr::blank(None)),
            ],
        ),
        Expr::function(
            Expr::Symbol(times),
            vec![
                Expr::function(Expr::Symbol(exp), vec![Expr::symbol(u_exp)]),
                Expr::function(
                    Expr::Symbol(d),
                    vec![Expr::symbol(u_exp), Expr::symbol(x_exp)],
                ),
            ],
        ),
    );

    let u_plus = symb("e2e_calc_u_plus");
    let x_plus = symb("e2e_calc_x_plus");
    let plus_distribute_rule = LambdaRule::new(
        Expr::function(
            Expr::Symbol(d),
            vec![
                Expr::function(
                    Expr::Symbol(plus),
                    vec![Expr::bound_pattern(u_plus, Expr::blank(None))],
                ),
                Expr::bound_pattern(x_plus, Expr::blank(None)),
            ],
        ),
        move |bindings: &Bindings| {
            let u = bindings.get(u_plus);
            let x = bindings.get(x_plus);
            let terms: Vec<Expr> = match u.as_ref() {
                Expr::Function { head, args, .. } if **head == Expr::Symbol(plus) => {
                    args.iter().map(|a| (**a).clone()).collect()
                }
                other => vec![other.clone()],
            };
            let derivatives: Vec<Expr> = terms
                .into_iter()
                .map(|term| Expr::function(Expr::Symbol(d), vec![term, (**x).clone()]))
                .collect();
            Expr::function(Expr::Symbol(plus), derivatives)
        },
    );

    let u_const_q = symb("e2e_calc_u_const_q");
    let v_const_q = symb("e2e_calc_v_const_q");
    let constant_q_rule = LambdaRule::new(
        Expr::function(
            Expr::Symbol(constant_q),
            vec![
                Expr::bound_pattern(u_const_q, Expr::blank(None)),
                Expr::bound_pattern(v_const_q, Expr::blank(None)),
            ],
        ),
        move |bindings: &Bindings| {
            let u = bindings.get(u_const_q);
            let v = bindings.get(v_const_q);
            let is_number = matches!(
                u.as_ref(),
                Expr::Integer(_) | Expr::Real(_) | Expr::Rational(_) | Expr::Complex { .. }
            );
            let is_constant = u.as_ref() != v.as_ref()
                && (is_number || u.attributes().contains(Attributes::CONSTANT));
            Expr::Symbol(symb(if is_constant { "True" } else { "False" }))
        },
    );

    let c_const = symb("e2e_calc_c_const");
    let x_const = symb("e2e_calc_x_const");
    let constant_rule = SubstitutionRule::with_guards(
        Expr::function(
            Expr::Symbol(d),
            vec![
                Expr::bound_pattern(c_const, Expr::blank(None)),
                Expr::bound_pattern(x_const, Expr::blank(None)),
            ],
        ),
        Expr::integer(0),
        vec![Expr::function(
            Expr::Symbol(constant_q),
            vec![Expr::symbol(c_const), Expr::symbol(x_const)],
        )],
    );

    let a_times_one = symb("e2e_calc_a_times_one");
    let times_identity_rule = SubstitutionRule::new(
        Expr::function(
            Expr::Symbol(times),
            vec![
                Expr::bound_pattern(a_times_one, Expr::blank(None)),
                Expr::integer(1),
            ],
        ),
        Expr::symbol(a_times_one),
    );

    let a_plus_zero = symb("e2e_calc_a_plus_zero");
    let plus_identity_rule = SubstitutionRule::new(
        Expr::function(
            Expr::Symbol(plus),
            vec![
                Expr::bound_pattern(a_plus_zero, Expr::blank(None)),
                Expr::integer(0),
            ],
        ),
        Expr::symbol(a_plus_zero),
    );

    let pair_a = symb("e2e_calc_pair_a");
    let pair_b = symb("e2e_calc_pair_b");
    let plus_pair_fold_rule = LambdaRule::new(
        Expr::function(
            Expr::Symbol(plus),
            vec![
                Expr::bound_pattern(pair_a, int_blank()),
                Expr::bound_pattern(pair_b, int_blank()),
            ],
        ),
        move |bindings: &Bindings| {
            let a = as_integer(bindings.get(pair_a));
            let b = as_integer(bindings.get(pair_b));
            Expr::Integer(a.clone() + b.clone())
        },
    );

    let rest_a = symb("e2e_calc_rest_a");
    let rest_b = symb("e2e_calc_rest_b");
    let rest_rest = symb("e2e_calc_rest_rest");
    let plus_fold_rest_rule = LambdaRule::new(
        Expr::function(
            Expr::Symbol(plus),
            vec![
                Expr::bound_pattern(rest_a, int_blank()),
                Expr::bound_pattern(rest_b, int_blank()),
                Expr::bound_pattern(rest_rest, Expr::blank(None)),
            ],
        ),
        move |bindings: &Bindings| {
            let a = as_integer(bindings.get(rest_a));
            let b = as_integer(bindings.get(rest_b));
            let rest = bindings.get(rest_rest);
            Expr::function(
                Expr::Symbol(plus),
                vec![Expr::Integer(a.clone() + b.clone()), (**rest).clone()],
            )
        },
    );

    let mut kernel = Kernel::new();
    kernel.add_rule(same_var_rule);
    kernel.add_rule(sin_chain_rule);
    kernel.add_rule(exp_chain_rule);
    kernel.add_rule(plus_distribute_rule);
    kernel.add_rule(constant_rule);
    kernel.add_rule(constant_q_rule);
    kernel.add_rule(times_identity_rule);
    kernel.add_rule(plus_identity_rule);
    kernel.add_rule(plus_pair_fold_rule);
    kernel.add_rule(plus_fold_rest_rule);
    kernel
}

/// `D[Plus[a, c, c, c, c], a] -> 1`, with `c` declared `Constant` so the
/// `ConstantQ` guard chain treats it (and not `a`) as inert under `D`.
#[test]
fn derivative_of_a_sum_collapses_to_one() {
    let kernel = build_calculus_kernel();
    let d = symb("e2e_calc_d");
    let a = symb("e2e_calc_deriv_sum_a");
    let c = symb("e2e_calc_deriv_sum_c");
    declare_attributes(c, Attributes::CONSTANT);

    let plus = symb("Plus");
    let sum = Expr::function(
        Expr::Symbol(plus),
        vec![
            Expr::symbol(a),
            Expr::symbol(c),
            Expr::symbol(c),
            Expr::symbol(c),
            Expr::symbol(c),
        ],
    );
    let input = Expr::function(Expr::Symbol(d), vec![sum, Expr::symbol(a)]);
    assert_eq!(kernel.evaluate(&input), Expr::integer(1));
}

/// `D[Sin[Exp[Plus[1, a]]], a] -> Times[Cos[Exp[Plus[1, a]]], Exp[Plus[1, a]]]`.
#[test]
fn derivative_of_a_chain_applies_sin_and_exp_rules() {
    let kernel = build_calculus_kernel();
    let d = symb("e2e_calc_d");
    let sin = symb("e2e_calc_sin");
    let cos = symb("e2e_calc_cos");
    let exp = symb("e2e_calc_exp");
    let plus = symb("Plus");
    let a = symb("e2e_calc_deriv_chain_a");

    let inner = Expr::function(
        Expr::Symbol(plus),
        vec![Expr::integer(1), Expr::symbol(a)],
    );
    let argument = Expr::function(Expr::Symbol(exp), vec![inner.clone()]);
    let sin_of_exp = Expr::function(Expr::Symbol(sin), vec![argument.clone()]);
    let input = Expr::function(Expr::Symbol(d), vec![sin_of_exp, Expr::symbol(a)]);

    let expected = Expr::function(
        Expr::Symbol(symb("Times")),
        vec![
            Expr::function(Expr::Symbol(cos), vec![argument.clone()]),
            argument,
        ],
    );
    assert_eq!(kernel.evaluate(&input), expected);
}

/// `Log[Power[E, x]] -> x`, guarded by a `RealQ[x]` predicate.
#[test]
fn log_of_e_to_the_x_cancels_under_real_q() {
    let log = symb("e2e_log");
    let power = symb("e2e_log_power");
    let e = symb("E");
    let real_q = symb("e2e_log_real_q");
    let x = symb("e2e_log_x");

    let real_q_rule = LambdaRule::new(
        Expr::function(
            Expr::Symbol(real_q),
            vec![Expr::bound_pattern(x, Expr::blank(None))],
        ),
        move |bindings: &Bindings| {
            let v = bindings.get(x);
            let is_real = matches!(
                v.as_ref(),
                Expr::Integer(_) | Expr::Real(_) | Expr::Rational(_) | Expr::Symbol(_)
            );
            Expr::Symbol(symb(if is_real { "True" } else { "False" }))
        },
    );

    let log_rule = SubstitutionRule::with_guards(
        Expr::function(
            Expr::Symbol(log),
            vec![Expr::function(
                Expr::Symbol(power),
                vec![Expr::Symbol(e), Expr::bound_pattern(x, Expr::blank(None))],
            )],
        ),
        Expr::symbol(x),
        vec![Expr::function(Expr::Symbol(real_q), vec![Expr::symbol(x)])],
    );

    let mut kernel = Kernel::new();
    kernel.add_rule(real_q_rule);
    kernel.add_rule(log_rule);

    let variable = Expr::symbol(symb("e2e_log_var"));
    let input = Expr::function(
        Expr::Symbol(log),
        vec![Expr::function(
            Expr::Symbol(power),
            vec![Expr::Symbol(e), variable.clone()],
        )],
    );
    assert_eq!(kernel.evaluate(&input), variable);
}

/// `And[True, a] -> a`, `And[False, _] -> False`, `Not[Not[a]] -> a`.
#[test]
fn boolean_identities_simplify() {
    let and = symb("And");
    let not = symb("e2e_bool_not");
    let a = symb("e2e_bool_and_true_a");

    let and_true_rule = SubstitutionRule::new(
        Expr::function(
            Expr::Symbol(and),
            vec![
                Expr::Symbol(symb("True")),
                Expr::bound_pattern(a, Expr::blank(None)),
            ],
        ),
        Expr::symbol(a),
    );
    let and_false_rule = SubstitutionRule::new(
        Expr::function(
            Expr::Symbol(and),
            vec![Expr::Symbol(symb("False")), Expr::blank(None)],
        ),
        Expr::Symbol(symb("False")),
    );
    let double_not_a = symb("e2e_bool_double_not_a");
    let double_not_rule = SubstitutionRule::new(
        Expr::function(
            Expr::Symbol(not),
            vec![Expr::function(
                Expr::Symbol(not),
                vec![Expr::bound_pattern(double_not_a, Expr::blank(None))],
            )],
        ),
        Expr::symbol(double_not_a),
    );

    let mut kernel = Kernel::new();
    kernel.add_rule(and_true_rule);
    kernel.add_rule(and_false_rule);
    kernel.add_rule(double_not_rule);

    let variable = Expr::symbol(symb("e2e_bool_var"));
    let and_true_input = Expr::function(
        Expr::Symbol(and),
        vec![Expr::Symbol(symb("True")), variable.clone()],
    );
    assert_eq!(kernel.evaluate(&and_true_input), variable);

    let and_false_input = Expr::function(
        Expr::Symbol(and),
        vec![Expr::Symbol(symb("False")), variable.clone()],
    );
    assert_eq!(
        kernel.evaluate(&and_false_input),
        Expr::Symbol(symb("False"))
    );

    let double_not_input = Expr::function(
        Expr::Symbol(not),
        vec![Expr::function(Expr::Symbol(not), vec![variable.clone()])],
    );
    assert_eq!(kernel.evaluate(&double_not_input), variable);
}

/// `Sqrt[x] -> Power[x, Rational[1, 2]]`.
#[test]
fn sqrt_rewrites_to_a_rational_power() {
    let sqrt = symb("e2e_sqrt");
    let power = symb("e2e_sqrt_power");
    let x = symb("e2e_sqrt_x");
    let rule = SubstitutionRule::new(
        Expr::function(
            Expr::Symbol(sqrt),
            vec![Expr::bound_pattern(x, Expr::blank(None))],
        ),
        Expr::function(
            Expr::Symbol(power),
            vec![
                Expr::symbol(x),
                Expr::rational(Integer::from(1), Integer::from(2)).expect("1/2 is valid"),
            ],
        ),
    );
    let mut kernel = Kernel::new();
    kernel.add_rule(rule);
    let variable = Expr::symbol(symb("e2e_sqrt_var"));
    let input = Expr::function(Expr::Symbol(sqrt), vec![variable.clone()]);
    let expected = Expr::function(
        Expr::Symbol(power),
        vec![
            variable,
            Expr::rational(Integer::from(1), Integer::from(2)).expect("1/2 is valid"),
        ],
    );
    assert_eq!(kernel.evaluate(&input), expected);
}

// ---------------------------------------------------------------------------
// Boundary behaviors
// ---------------------------------------------------------------------------

/// `Integer(0)` participates in arithmetic like any other Integer — no
/// special-cased representation.
#[test]
fn integer_zero_is_an_ordinary_integer() {
    assert_eq!(Expr::integer(0), Expr::Integer(Integer::from(0)));
    assert!(Expr::integer(0).is_numeric());
}

/// A `Rational` with a denominator that reduces to 1 collapses to `Integer`.
#[test]
fn rational_collapses_to_integer_at_unit_denominator() {
    let r = Expr::rational(Integer::from(6), Integer::from(3)).expect("valid");
    assert_eq!(r, Expr::integer(2));
    match r {
        Expr::Integer(_) => {}
        other => panic!("expected Integer, got {other}"),
    }
}

/// A `Complex` with an exactly-zero imaginary part collapses to its real
/// component.
#[test]
fn complex_collapses_to_real_at_zero_imaginary() {
    use num_symrw::Number;
    let c = Expr::complex(Number::Integer(Integer::from(5)), Number::Integer(Integer::from(0)));
    assert_eq!(c, Expr::integer(5));
}

/// Orderless construction sorts arguments into a stable canonical order
/// regardless of input order.
#[test]
fn orderless_sort_is_stable_across_input_orders() {
    let plus = symb("Plus");
    let a = Expr::symbol(symb("e2e_orderless_a"));
    let b = Expr::symbol(symb("e2e_orderless_b"));
    let c = Expr::symbol(symb("e2e_orderless_c"));
    let forward = Expr::function(
        Expr::Symbol(plus),
        vec![a.clone(), b.clone(), c.clone()],
    );
    let shuffled = Expr::function(Expr::Symbol(plus), vec![c, a, b]);
    assert_eq!(forward, shuffled);
}
