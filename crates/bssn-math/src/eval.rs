// ─────────────────────────────────────────────────────────────────────
// SCPN BSSN Initial Data — Numerical Evaluation
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Floating-point evaluation of symbolic expressions.

use std::collections::HashMap;

use bssn_types::error::{BssnError, BssnResult};
use num_integer::Integer;
use num_traits::ToPrimitive;

use crate::expr::{Expr, Node, Symbol};
use crate::rational::Rational;

/// Numeric values for symbols.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    values: HashMap<Symbol, f64>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Bindings::set`].
    pub fn with(mut self, name: &str, value: f64) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: f64) {
        self.values.insert(Symbol::new(name), value);
    }

    pub fn get(&self, symbol: &Symbol) -> Option<f64> {
        self.values.get(symbol).copied()
    }

    pub fn extend(&mut self, other: &Bindings) {
        self.values
            .extend(other.values.iter().map(|(k, v)| (k.clone(), *v)));
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Evaluator holding a per-node memo; reuse it across the components
/// of one tensor evaluated at the same point.
pub struct Evaluator<'a> {
    bindings: &'a Bindings,
    memo: HashMap<usize, (Expr, f64)>,
}

impl<'a> Evaluator<'a> {
    pub fn new(bindings: &'a Bindings) -> Self {
        Evaluator {
            bindings,
            memo: HashMap::new(),
        }
    }

    pub fn eval(&mut self, e: &Expr) -> BssnResult<f64> {
        if let Some((_, v)) = self.memo.get(&e.id()) {
            return Ok(*v);
        }
        let v = match e.node() {
            Node::Num(r) => r.to_f64(),
            Node::Sym(s) => self
                .bindings
                .get(s)
                .ok_or_else(|| BssnError::UnboundSymbol(s.name().to_string()))?,
            Node::Add(terms) => {
                let mut acc = 0.0;
                for t in terms {
                    acc += self.eval(t)?;
                }
                acc
            }
            Node::Mul(factors) => {
                let mut acc = 1.0;
                for f in factors {
                    acc *= self.eval(f)?;
                }
                acc
            }
            Node::Pow(base, exp) => {
                let b = self.eval(base)?;
                match exp.as_rational() {
                    Some(r) => real_pow_rational(b, &r),
                    None => b.powf(self.eval(exp)?),
                }
            }
            Node::Apply(func, arg) => func.eval(self.eval(arg)?),
            Node::Atan2(y, x) => {
                let yv = self.eval(y)?;
                yv.atan2(self.eval(x)?)
            }
        };
        self.memo.insert(e.id(), (e.clone(), v));
        Ok(v)
    }
}

/// Real-valued `b^(p/q)`: integer powers use `powi`, odd roots of a
/// negative base keep its sign, everything else goes through `powf`.
fn real_pow_rational(b: f64, r: &Rational) -> f64 {
    if r.is_integer() {
        if let Some(n) = r.numer().to_i32() {
            return b.powi(n);
        }
    }
    let e = r.to_f64();
    if b < 0.0 && r.denom().is_odd() {
        let magnitude = (-b).powf(e);
        return if r.numer().is_even() { magnitude } else { -magnitude };
    }
    b.powf(e)
}

impl Expr {
    pub fn eval(&self, bindings: &Bindings) -> BssnResult<f64> {
        Evaluator::new(bindings).eval(self)
    }
}
