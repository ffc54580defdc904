//! The four sequence-matching modes and the two enumerators they lean on:
//! permutations (Orderless) and contiguous-partition grouping (Flat).

use std::sync::Arc;

use itertools::Itertools;

use crate::core::bindings::Bindings;
use crate::core::expr::Expr;

use super::match_with_bindings;

/// Dispatch to the mode named by the pattern head's attributes.
pub(crate) fn match_sequence(
    patterns: Vec<Arc<Expr>>,
    exprs: Vec<Arc<Expr>>,
    group_head: Arc<Expr>,
    bindings: Bindings,
    orderless: bool,
    flat: bool,
) -> Box<dyn Iterator<Item = Bindings>> {
    match (orderless, flat) {
        (false, false) => match_ordered(patterns, exprs, bindings),
        (true, false) => match_orderless(patterns, exprs, bindings),
        (false, true) => match_flat(patterns, exprs, group_head, bindings),
        (true, true) => match_flat_orderless(patterns, exprs, group_head, bindings),
    }
}

/// Neither Flat nor Orderless: require equal length, match position-wise,
/// threading bindings through the cross product of per-position streams.
pub(crate) fn match_ordered(
    patterns: Vec<Arc<Expr>>,
    exprs: Vec<Arc<Expr>>,
    bindings: Bindings,
) -> Box<dyn Iterator<Item = Bindings>> {
    if patterns.len() != exprs.len() {
        return Box::new(std::iter::empty());
    }
    match_ordered_rest(patterns, exprs, bindings)
}

fn match_ordered_rest(
    mut patterns: Vec<Arc<Expr>>,
    mut exprs: Vec<Arc<Expr>>,
    bindings: Bindings,
) -> Box<dyn Iterator<Item = Bindings>> {
    if patterns.is_empty() {
        return Box::new(std::iter::once(bindings));
    }
    let p0 = patterns.remove(0);
    let e0 = exprs.remove(0);
    Box::new(
        match_with_bindings(p0, e0, bindings)
            .flat_map(move |b| match_ordered_rest(patterns.clone(), exprs.clone(), b)),
    )
}

/// Orderless only: require equal length, pre-filter constant patterns
/// against their one possible partner, then permute what's left.
pub(crate) fn match_orderless(
    patterns: Vec<Arc<Expr>>,
    exprs: Vec<Arc<Expr>>,
    bindings: Bindings,
) -> Box<dyn Iterator<Item = Bindings>> {
    if patterns.len() != exprs.len() {
        return Box::new(std::iter::empty());
    }
    let Some((variable_patterns, remaining_exprs)) = eliminate_constants(&patterns, &exprs) else {
        return Box::new(std::iter::empty());
    };
    let k = variable_patterns.len();
    Box::new(
        remaining_exprs
            .into_iter()
            .permutations(k)
            .flat_map(move |perm| match_ordered(variable_patterns.clone(), perm, bindings.clone())),
    )
}

/// Flat only: require `patterns.len() <= exprs.len()`, enumerate contiguous
/// partitions of `exprs` into `patterns.len()` groups, wrap multi-element
/// groups under `group_head`, then ordered-match.
pub(crate) fn match_flat(
    patterns: Vec<Arc<Expr>>,
    exprs: Vec<Arc<Expr>>,
    group_head: Arc<Expr>,
    bindings: Bindings,
) -> Box<dyn Iterator<Item = Bindings>> {
    let m = patterns.len();
    let n = exprs.len();
    Box::new(GroupingIterator::new(n, m).flat_map(move |bounds| {
        let groups: Vec<Arc<Expr>> = bounds
            .iter()
            .map(|&(start, end)| group_slice(&exprs, start, end, &group_head))
            .collect();
        match_ordered(patterns.clone(), groups, bindings.clone())
    }))
}

/// Flat and Orderless together: permute first, then partition each
/// permutation. The constant-pattern pre-filter is deliberately not applied
/// here — a "constant" pattern could still legitimately match a multi-element
/// group, and reconciling that with the permute-then-partition search is not
/// worth the complexity for what is only a performance optimization.
pub(crate) fn match_flat_orderless(
    patterns: Vec<Arc<Expr>>,
    exprs: Vec<Arc<Expr>>,
    group_head: Arc<Expr>,
    bindings: Bindings,
) -> Box<dyn Iterator<Item = Bindings>> {
    let n = exprs.len();
    Box::new(exprs.into_iter().permutations(n).flat_map(move |perm| {
        match_flat(
            patterns.clone(),
            perm,
            Arc::clone(&group_head),
            bindings.clone(),
        )
    }))
}

fn group_slice(exprs: &[Arc<Expr>], start: usize, end: usize, group_head: &Arc<Expr>) -> Arc<Expr> {
    if end - start == 1 {
        Arc::clone(&exprs[start])
    } else {
        let args: Vec<Expr> = exprs[start..end].iter().map(|e| (**e).clone()).collect();
        Arc::new(Expr::function((**group_head).clone(), args))
    }
}

/// A pattern is "constant" (in the matcher's sense) if it contains no Blank
/// and no BoundPattern anywhere in its tree, i.e. it can match at most one
/// expression.
fn is_constant_pattern(pattern: &Expr) -> bool {
    match pattern {
        Expr::Blank(_) | Expr::BoundPattern { .. } => false,
        Expr::Function { head, args, .. } => {
            is_constant_pattern(head) && args.iter().all(|a| is_constant_pattern(a))
        }
        _ => true,
    }
}

/// For each constant pattern, remove one structurally-equal expression from
/// the candidate list; fail the whole match if any constant finds no
/// partner. Returns the remaining (non-constant) patterns and expressions.
fn eliminate_constants(
    patterns: &[Arc<Expr>],
    exprs: &[Arc<Expr>],
) -> Option<(Vec<Arc<Expr>>, Vec<Arc<Expr>>)> {
    let mut remaining: Vec<Arc<Expr>> = exprs.to_vec();
    let mut variable_patterns = Vec::new();
    for pattern in patterns {
        if is_constant_pattern(pattern) {
            let position = remaining.iter().position(|e| **e == **pattern)?;
            remaining.remove(position);
        } else {
            variable_patterns.push(Arc::clone(pattern));
        }
    }
    Some((variable_patterns, remaining))
}

/// Enumerates contiguous partitions of `0..n` into `m` non-empty groups, as
/// `m - 1` monotonically increasing markers in `[1, n - 1]` advanced
/// lexicographically with a carry rule. Yields `(start, end)` bounds pairs,
/// `m` of them per item.
struct GroupingIterator {
    n: usize,
    m: usize,
    markers: Vec<usize>,
    state: GroupingState,
}

#[derive(PartialEq, Eq)]
enum GroupingState {
    NotStarted,
    Running,
    Done,
}

impl GroupingIterator {
    fn new(n: usize, m: usize) -> Self {
        let markers = if m == 0 { Vec::new() } else { (1..m).collect() };
        Self {
            n,
            m,
            markers,
            state: GroupingState::NotStarted,
        }
    }

    /// Advance `markers` to the next lexicographically-greater combination,
    /// returning `false` once exhausted.
    fn advance(&mut self) -> bool {
        let len = self.markers.len();
        if len == 0 {
            return false;
        }
        let mut i = len - 1;
        loop {
            let max_allowed = if i + 1 < len {
                self.markers[i + 1] - 1
            } else {
                self.n - 1
            };
            if self.markers[i] < max_allowed {
                self.markers[i] += 1;
                for j in (i + 1)..len {
                    self.markers[j] = self.markers[j - 1] + 1;
                }
                return true;
            }
            if i == 0 {
                return false;
            }
            i -= 1;
        }
    }

    fn bounds(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::with_capacity(self.m);
        let mut prev = 0;
        for &mark in &self.markers {
            out.push((prev, mark));
            prev = mark;
        }
        out.push((prev, self.n));
        out
    }
}

impl Iterator for GroupingIterator {
    type Item = Vec<(usize, usize)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == GroupingState::Done {
            return None;
        }
        if self.m == 0 {
            self.state = GroupingState::Done;
            return if self.n == 0 { Some(Vec::new()) } else { None };
        }
        if self.m > self.n {
            self.state = GroupingState::Done;
            return None;
        }
        match self.state {
            GroupingState::NotStarted => {
                self.state = GroupingState::Running;
                Some(self.bounds())
            }
            GroupingState::Running => {
                if self.advance() {
                    Some(self.bounds())
                } else {
                    self.state = GroupingState::Done;
                    None
                }
            }
            #[allow(
                clippy::unreachable,
                reason = "Done is only entered by the two early returns above and the arms right below, both of which already return None"
            )]
            GroupingState::Done => unreachable!("checked above"),
        }
    }
}
