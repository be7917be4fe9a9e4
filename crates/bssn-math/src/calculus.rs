// ─────────────────────────────────────────────────────────────────────
// SCPN BSSN Initial Data — Symbolic Differentiation
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Exact partial derivatives of [`Expr`] trees.
//!
//! A `Differentiator` is bound to one variable and memoises results per
//! shared node, so differentiating many components of the same metric
//! reuses the work done on common subexpressions.

use std::collections::HashMap;

use crate::expr::{Expr, Func, Node, Symbol};

pub struct Differentiator {
    wrt: Symbol,
    // node id -> (source kept alive, derivative)
    cache: HashMap<usize, (Expr, Expr)>,
}

impl Differentiator {
    pub fn new(wrt: Symbol) -> Self {
        Differentiator {
            wrt,
            cache: HashMap::new(),
        }
    }

    pub fn variable(&self) -> &Symbol {
        &self.wrt
    }

    pub fn diff(&mut self, e: &Expr) -> Expr {
        if let Some((_, d)) = self.cache.get(&e.id()) {
            return d.clone();
        }
        let d = self.diff_uncached(e);
        self.cache.insert(e.id(), (e.clone(), d.clone()));
        d
    }

    fn diff_uncached(&mut self, e: &Expr) -> Expr {
        match e.node() {
            Node::Num(_) => Expr::zero(),
            Node::Sym(s) => {
                if *s == self.wrt {
                    Expr::one()
                } else {
                    Expr::zero()
                }
            }
            Node::Add(terms) => Expr::sum_of(terms.iter().map(|t| self.diff(t))),
            Node::Mul(factors) => {
                let mut terms = Vec::with_capacity(factors.len());
                for (i, f) in factors.iter().enumerate() {
                    let df = self.diff(f);
                    if df.is_zero() {
                        continue;
                    }
                    let others = factors
                        .iter()
                        .enumerate()
                        .filter(|(j, _)| *j != i)
                        .map(|(_, g)| g.clone());
                    terms.push(Expr::product_of(std::iter::once(df).chain(others)));
                }
                Expr::sum_of(terms)
            }
            Node::Pow(base, exp) => {
                let db = self.diff(base);
                let de = self.diff(exp);
                if de.is_zero() {
                    if db.is_zero() {
                        return Expr::zero();
                    }
                    // d(b^n) = n b^(n-1) b'
                    let lowered = base.pow(&(exp - Expr::one()));
                    return Expr::product_of([exp.clone(), lowered, db]);
                }
                // d(b^e) = b^e (e' ln b + e b'/b)
                let log_term = &de * base.log();
                let ratio_term = Expr::product_of([exp.clone(), db, base.recip()]);
                e * (log_term + ratio_term)
            }
            Node::Apply(func, arg) => {
                let da = self.diff(arg);
                if da.is_zero() {
                    return Expr::zero();
                }
                let outer = match func {
                    Func::Sin => arg.cos(),
                    Func::Cos => -arg.sin(),
                    Func::Sinh => arg.cosh(),
                    Func::Cosh => arg.sinh(),
                    Func::Exp => e.clone(),
                    Func::Log => arg.recip(),
                    Func::Acos => -(Expr::one() - arg.powi(2)).pow_rational(-1, 2),
                };
                outer * da
            }
            Node::Atan2(y, x) => {
                let dy = self.diff(y);
                let dx = self.diff(x);
                if dy.is_zero() && dx.is_zero() {
                    return Expr::zero();
                }
                let num = x * dy - y * dx;
                let den = x.powi(2) + y.powi(2);
                num / den
            }
        }
    }
}

impl Expr {
    /// One-off partial derivative. Use a [`Differentiator`] when taking
    /// many derivatives of related expressions.
    pub fn diff(&self, wrt: &Symbol) -> Expr {
        Differentiator::new(wrt.clone()).diff(self)
    }
}
