// ─────────────────────────────────────────────────────────────────────
// SCPN BSSN Initial Data — Symbolic Expressions
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Immutable symbolic expressions in canonical form.
//!
//! Every constructor normalises its result:
//!   - sums are flattened, like terms collected, zero terms dropped
//!   - products are flattened, numbers folded, equal bases merged by
//!     adding exponents, a number times a single sum is distributed
//!   - powers fold exact rational results, `(x*y)^n` for integer `n`,
//!     `exp(a)^b`, and `(x^a)^b` whenever that equals `x^(a*b)` for all
//!     real `x`
//!
//! Structurally equal inputs therefore give structurally equal outputs,
//! and `x - x` is the literal zero. Nodes are shared through `Arc`, so
//! cloning is cheap and the DAG can be walked with pointer-keyed memos.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;
use std::iter::{Product, Sum};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};
use std::sync::Arc;

use num_integer::Integer;

use crate::rational::Rational;

/// Named scalar symbol (coordinate, physical parameter, ...).
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(Arc<str>);

impl Symbol {
    pub fn new(name: &str) -> Self {
        Symbol(Arc::from(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn expr(&self) -> Expr {
        Expr::from_node(Node::Sym(self.clone()))
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol::new(name)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Elementary functions of one argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Func {
    Sin,
    Cos,
    Sinh,
    Cosh,
    Exp,
    Log,
    Acos,
}

impl Func {
    pub fn name(self) -> &'static str {
        match self {
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Sinh => "sinh",
            Func::Cosh => "cosh",
            Func::Exp => "exp",
            Func::Log => "log",
            Func::Acos => "acos",
        }
    }

    pub fn eval(self, x: f64) -> f64 {
        match self {
            Func::Sin => x.sin(),
            Func::Cos => x.cos(),
            Func::Sinh => x.sinh(),
            Func::Cosh => x.cosh(),
            Func::Exp => x.exp(),
            Func::Log => x.ln(),
            Func::Acos => x.acos(),
        }
    }
}

/// Expression node. Variant order is the canonical sort order, so
/// numbers come first inside sums and products.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Node {
    Num(Rational),
    Sym(Symbol),
    Pow(Expr, Expr),
    Mul(Vec<Expr>),
    Add(Vec<Expr>),
    Apply(Func, Expr),
    Atan2(Expr, Expr),
}

#[derive(Clone)]
pub struct Expr(Arc<Node>);

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || *self.0 == *other.0
    }
}

impl Eq for Expr {}

impl Ord for Expr {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        if Arc::ptr_eq(&self.0, &other.0) {
            std::cmp::Ordering::Equal
        } else {
            self.0.cmp(&other.0)
        }
    }
}

impl PartialOrd for Expr {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Running coefficient of one collected term inside `sum_of`.
struct Collected {
    coeff: Rational,
    original: Option<Expr>,
}

impl Expr {
    fn from_node(node: Node) -> Self {
        Expr(Arc::new(node))
    }

    pub fn node(&self) -> &Node {
        &self.0
    }

    /// Address of the shared node; stable while any clone is alive.
    pub(crate) fn id(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }

    pub(crate) fn same_node(&self, other: &Expr) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    // ── Atoms ────────────────────────────────────────────────────────

    pub fn num(r: Rational) -> Self {
        Expr::from_node(Node::Num(r))
    }

    pub fn int(n: i64) -> Self {
        Expr::num(Rational::from(n))
    }

    /// Panics if `den == 0`.
    pub fn rational(num: i64, den: i64) -> Self {
        Expr::num(Rational::new(num, den))
    }

    pub fn zero() -> Self {
        Expr::num(Rational::zero())
    }

    pub fn one() -> Self {
        Expr::num(Rational::one())
    }

    pub fn symbol(name: &str) -> Self {
        Symbol::new(name).expr()
    }

    pub fn as_rational(&self) -> Option<Rational> {
        match self.node() {
            Node::Num(r) => Some(r.clone()),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self.node() {
            Node::Sym(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(self.node(), Node::Num(r) if r.is_zero())
    }

    pub fn is_one(&self) -> bool {
        matches!(self.node(), Node::Num(r) if r.is_one())
    }

    pub fn is_number(&self) -> bool {
        matches!(self.node(), Node::Num(_))
    }

    // ── Canonical sums ───────────────────────────────────────────────

    fn flatten_add_into(self, out: &mut Vec<Expr>) {
        match self.node() {
            Node::Add(terms) => out.extend(terms.iter().cloned()),
            _ => out.push(self),
        }
    }

    /// Numeric coefficient and remaining factor: `3*x*y -> (3, x*y)`.
    pub fn split_coefficient(&self) -> (Rational, Expr) {
        match self.node() {
            Node::Num(r) => (r.clone(), Expr::one()),
            Node::Mul(factors) => match factors[0].node() {
                Node::Num(c) => {
                    let rest = if factors.len() == 2 {
                        factors[1].clone()
                    } else {
                        Expr::from_node(Node::Mul(factors[1..].to_vec()))
                    };
                    (c.clone(), rest)
                }
                _ => (Rational::one(), self.clone()),
            },
            _ => (Rational::one(), self.clone()),
        }
    }

    /// `c * rest` where `rest` carries no numeric factor of its own.
    fn scaled(c: Rational, rest: Expr) -> Expr {
        if c.is_zero() {
            return Expr::zero();
        }
        if c.is_one() {
            return rest;
        }
        match rest.node() {
            Node::Num(r) => Expr::num(c * r),
            Node::Mul(factors) => {
                let mut v = Vec::with_capacity(factors.len() + 1);
                v.push(Expr::num(c));
                v.extend(factors.iter().cloned());
                Expr::from_node(Node::Mul(v))
            }
            Node::Add(_) => Expr::product_of([Expr::num(c), rest]),
            _ => Expr::from_node(Node::Mul(vec![Expr::num(c), rest])),
        }
    }

    pub fn sum_of<I: IntoIterator<Item = Expr>>(terms: I) -> Expr {
        let mut flat = Vec::new();
        for t in terms {
            t.flatten_add_into(&mut flat);
        }

        let mut constant = Rational::zero();
        let mut collected: BTreeMap<Expr, Collected> = BTreeMap::new();
        for term in flat {
            if let Node::Num(r) = term.node() {
                constant += r;
                continue;
            }
            let (c, rest) = term.split_coefficient();
            match collected.entry(rest) {
                Entry::Vacant(slot) => {
                    slot.insert(Collected {
                        coeff: c,
                        original: Some(term),
                    });
                }
                Entry::Occupied(mut slot) => {
                    let entry = slot.get_mut();
                    entry.coeff += c;
                    entry.original = None;
                }
            }
        }

        let mut out = Vec::with_capacity(collected.len() + 1);
        if !constant.is_zero() {
            out.push(Expr::num(constant));
        }
        for (rest, entry) in collected {
            if entry.coeff.is_zero() {
                continue;
            }
            out.push(match entry.original {
                Some(term) => term,
                None => Expr::scaled(entry.coeff, rest),
            });
        }

        match out.len() {
            0 => Expr::zero(),
            1 => out.remove(0),
            _ => Expr::from_node(Node::Add(out)),
        }
    }

    // ── Canonical products ───────────────────────────────────────────

    fn flatten_mul_into(self, out: &mut Vec<Expr>) {
        match self.node() {
            Node::Mul(factors) => out.extend(factors.iter().cloned()),
            _ => out.push(self),
        }
    }

    pub fn product_of<I: IntoIterator<Item = Expr>>(factors: I) -> Expr {
        let mut flat = Vec::new();
        for f in factors {
            f.flatten_mul_into(&mut flat);
        }

        let mut coeff = Rational::one();
        // base -> [(exponent, original factor)]
        let mut groups: BTreeMap<Expr, Vec<(Expr, Expr)>> = BTreeMap::new();
        for f in flat {
            match f.node() {
                Node::Num(r) => coeff *= r,
                Node::Pow(base, exp) => groups
                    .entry(base.clone())
                    .or_default()
                    .push((exp.clone(), f.clone())),
                _ => groups.entry(f.clone()).or_default().push((Expr::one(), f)),
            }
        }
        if coeff.is_zero() {
            return Expr::zero();
        }

        let mut out = Vec::with_capacity(groups.len());
        let mut reflatten = false;
        for (base, mut parts) in groups {
            let merged = if parts.len() == 1 {
                match parts.pop() {
                    Some((_, factor)) => factor,
                    None => continue,
                }
            } else {
                base.pow(&Expr::sum_of(parts.into_iter().map(|(e, _)| e)))
            };
            match merged.node() {
                Node::Num(r) => coeff *= r,
                Node::Mul(_) => {
                    reflatten = true;
                    out.push(merged);
                }
                _ => out.push(merged),
            }
        }
        if coeff.is_zero() {
            return Expr::zero();
        }
        if reflatten {
            out.push(Expr::num(coeff));
            return Expr::product_of(out);
        }

        out.sort();
        match out.len() {
            0 => return Expr::num(coeff),
            1 if coeff.is_one() => return out.remove(0),
            1 => {
                if let Node::Add(terms) = out[0].node() {
                    return Expr::sum_of(terms.iter().map(|t| {
                        let (c, rest) = t.split_coefficient();
                        Expr::scaled(c * &coeff, rest)
                    }));
                }
            }
            _ => {}
        }

        let mut v = Vec::with_capacity(out.len() + 1);
        if !coeff.is_one() {
            v.push(Expr::num(coeff));
        }
        v.extend(out);
        Expr::from_node(Node::Mul(v))
    }

    // ── Powers and functions ─────────────────────────────────────────

    pub fn pow(&self, exp: &Expr) -> Expr {
        if exp.is_zero() {
            return Expr::one();
        }
        if exp.is_one() {
            return self.clone();
        }
        match (self.node(), exp.as_rational()) {
            (Node::Num(b), Some(e)) => {
                if b.is_one() {
                    return Expr::one();
                }
                if b.is_zero() && e.is_positive() {
                    return Expr::zero();
                }
                if let Some(v) = b.checked_pow(&e) {
                    return Expr::num(v);
                }
            }
            (Node::Num(b), None) if b.is_one() => return Expr::one(),
            (Node::Pow(base, inner), Some(e)) if nested_power_folds(inner.as_rational(), &e) => {
                return base.pow(&(inner * exp));
            }
            (Node::Mul(factors), Some(e)) if e.is_integer() => {
                return Expr::product_of(factors.iter().map(|f| f.pow(exp)));
            }
            (Node::Apply(Func::Exp, arg), _) => return Expr::apply(Func::Exp, arg * exp),
            _ => {}
        }
        Expr::from_node(Node::Pow(self.clone(), exp.clone()))
    }

    pub fn powi(&self, n: i64) -> Expr {
        self.pow(&Expr::int(n))
    }

    pub fn pow_rational(&self, num: i64, den: i64) -> Expr {
        self.pow(&Expr::rational(num, den))
    }

    pub fn sqrt(&self) -> Expr {
        self.pow_rational(1, 2)
    }

    pub fn recip(&self) -> Expr {
        self.powi(-1)
    }

    pub fn apply(func: Func, arg: Expr) -> Expr {
        match (func, arg.node()) {
            (Func::Sin | Func::Sinh, _) if arg.is_zero() => return Expr::zero(),
            (Func::Cos | Func::Cosh | Func::Exp, _) if arg.is_zero() => return Expr::one(),
            (Func::Log | Func::Acos, _) if arg.is_one() => return Expr::zero(),
            (Func::Exp, Node::Apply(Func::Log, inner))
            | (Func::Log, Node::Apply(Func::Exp, inner))
            | (Func::Cos, Node::Apply(Func::Acos, inner)) => return inner.clone(),
            (Func::Sin, Node::Apply(Func::Acos, inner)) => {
                return (Expr::one() - inner.powi(2)).sqrt();
            }
            _ => {}
        }
        Expr::from_node(Node::Apply(func, arg))
    }

    pub fn sin(&self) -> Expr {
        Expr::apply(Func::Sin, self.clone())
    }

    pub fn cos(&self) -> Expr {
        Expr::apply(Func::Cos, self.clone())
    }

    pub fn sinh(&self) -> Expr {
        Expr::apply(Func::Sinh, self.clone())
    }

    pub fn cosh(&self) -> Expr {
        Expr::apply(Func::Cosh, self.clone())
    }

    pub fn exp(&self) -> Expr {
        Expr::apply(Func::Exp, self.clone())
    }

    pub fn log(&self) -> Expr {
        Expr::apply(Func::Log, self.clone())
    }

    pub fn acos(&self) -> Expr {
        Expr::apply(Func::Acos, self.clone())
    }

    /// Two-argument arctangent, `atan2(y, x)`.
    pub fn atan2(y: &Expr, x: &Expr) -> Expr {
        if y.is_zero() && matches!(x.as_rational(), Some(r) if r.is_positive()) {
            return Expr::zero();
        }
        Expr::from_node(Node::Atan2(y.clone(), x.clone()))
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Children of this node, in storage order.
    pub fn children(&self) -> Vec<&Expr> {
        match self.node() {
            Node::Num(_) | Node::Sym(_) => Vec::new(),
            Node::Add(items) | Node::Mul(items) => items.iter().collect(),
            Node::Pow(a, b) | Node::Atan2(a, b) => vec![a, b],
            Node::Apply(_, a) => vec![a],
        }
    }

    /// Every symbol reachable from this expression.
    pub fn free_symbols(&self) -> BTreeSet<Symbol> {
        let mut seen = HashSet::new();
        let mut out = BTreeSet::new();
        let mut stack = vec![self];
        while let Some(e) = stack.pop() {
            if !seen.insert(e.id()) {
                continue;
            }
            if let Node::Sym(s) = e.node() {
                out.insert(s.clone());
            }
            stack.extend(e.children());
        }
        out
    }

    pub fn depends_on(&self, symbol: &Symbol) -> bool {
        self.free_symbols().contains(symbol)
    }

    /// Number of distinct shared nodes.
    pub fn dag_size(&self) -> usize {
        let mut seen = HashSet::new();
        let mut stack = vec![self];
        while let Some(e) = stack.pop() {
            if seen.insert(e.id()) {
                stack.extend(e.children());
            }
        }
        seen.len()
    }

    // ── Substitution ─────────────────────────────────────────────────

    /// Simultaneous replacement of symbols by expressions.
    pub fn subs(&self, replacements: &[(Symbol, Expr)]) -> Expr {
        if replacements.is_empty() {
            return self.clone();
        }
        let mut memo = HashMap::new();
        self.subs_memo(replacements, &mut memo)
    }

    fn subs_memo(&self, replacements: &[(Symbol, Expr)], memo: &mut HashMap<usize, Expr>) -> Expr {
        if let Some(hit) = memo.get(&self.id()) {
            return hit.clone();
        }
        let out = match self.node() {
            Node::Num(_) => self.clone(),
            Node::Sym(s) => replacements
                .iter()
                .find(|(from, _)| from == s)
                .map(|(_, to)| to.clone())
                .unwrap_or_else(|| self.clone()),
            Node::Add(terms) => {
                let new: Vec<Expr> = terms.iter().map(|t| t.subs_memo(replacements, memo)).collect();
                if unchanged(terms, &new) {
                    self.clone()
                } else {
                    Expr::sum_of(new)
                }
            }
            Node::Mul(factors) => {
                let new: Vec<Expr> = factors
                    .iter()
                    .map(|f| f.subs_memo(replacements, memo))
                    .collect();
                if unchanged(factors, &new) {
                    self.clone()
                } else {
                    Expr::product_of(new)
                }
            }
            Node::Pow(base, exp) => {
                let b = base.subs_memo(replacements, memo);
                let e = exp.subs_memo(replacements, memo);
                if b.same_node(base) && e.same_node(exp) {
                    self.clone()
                } else {
                    b.pow(&e)
                }
            }
            Node::Apply(func, arg) => {
                let a = arg.subs_memo(replacements, memo);
                if a.same_node(arg) {
                    self.clone()
                } else {
                    Expr::apply(*func, a)
                }
            }
            Node::Atan2(y, x) => {
                let ny = y.subs_memo(replacements, memo);
                let nx = x.subs_memo(replacements, memo);
                if ny.same_node(y) && nx.same_node(x) {
                    self.clone()
                } else {
                    Expr::atan2(&ny, &nx)
                }
            }
        };
        memo.insert(self.id(), out.clone());
        out
    }
}

/// Whether `(x^a)^e == x^(a*e)` holds for every real `x`, with odd roots
/// of negative numbers taken as real.
fn nested_power_folds(a: Option<Rational>, e: &Rational) -> bool {
    if e.is_integer() {
        return true;
    }
    let Some(a) = a else {
        return false;
    };
    if !a.is_integer() {
        return false;
    }
    if e.denom().is_odd() {
        return true;
    }
    // x^a >= 0 for even a, so the fold is exact when x^(a*e) is too
    let folded = &a * e;
    a.numer().is_even() && folded.numer().is_even() && folded.denom().is_odd()
}

fn unchanged(old: &[Expr], new: &[Expr]) -> bool {
    old.iter().zip(new).all(|(a, b)| a.same_node(b))
}

// ── Conversions ──────────────────────────────────────────────────────

impl From<i64> for Expr {
    fn from(n: i64) -> Self {
        Expr::int(n)
    }
}

impl From<Rational> for Expr {
    fn from(r: Rational) -> Self {
        Expr::num(r)
    }
}

impl From<Symbol> for Expr {
    fn from(s: Symbol) -> Self {
        s.expr()
    }
}

impl From<&Symbol> for Expr {
    fn from(s: &Symbol) -> Self {
        s.expr()
    }
}

impl Sum for Expr {
    fn sum<I: Iterator<Item = Expr>>(iter: I) -> Expr {
        Expr::sum_of(iter)
    }
}

impl Product for Expr {
    fn product<I: Iterator<Item = Expr>>(iter: I) -> Expr {
        Expr::product_of(iter)
    }
}

// ── Operators ────────────────────────────────────────────────────────

fn add_exprs(a: &Expr, b: &Expr) -> Expr {
    Expr::sum_of([a.clone(), b.clone()])
}

fn sub_exprs(a: &Expr, b: &Expr) -> Expr {
    Expr::sum_of([a.clone(), -b])
}

fn mul_exprs(a: &Expr, b: &Expr) -> Expr {
    Expr::product_of([a.clone(), b.clone()])
}

fn div_exprs(a: &Expr, b: &Expr) -> Expr {
    Expr::product_of([a.clone(), b.recip()])
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $func:path) => {
        impl $trait<Expr> for Expr {
            type Output = Expr;
            fn $method(self, rhs: Expr) -> Expr {
                $func(&self, &rhs)
            }
        }

        impl $trait<&Expr> for Expr {
            type Output = Expr;
            fn $method(self, rhs: &Expr) -> Expr {
                $func(&self, rhs)
            }
        }

        impl $trait<Expr> for &Expr {
            type Output = Expr;
            fn $method(self, rhs: Expr) -> Expr {
                $func(self, &rhs)
            }
        }

        impl $trait<&Expr> for &Expr {
            type Output = Expr;
            fn $method(self, rhs: &Expr) -> Expr {
                $func(self, rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, add_exprs);
impl_binary_op!(Sub, sub, sub_exprs);
impl_binary_op!(Mul, mul, mul_exprs);
impl_binary_op!(Div, div, div_exprs);

impl Neg for Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        -&self
    }
}

impl Neg for &Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        let (c, rest) = self.split_coefficient();
        Expr::scaled(-c, rest)
    }
}

impl AddAssign<Expr> for Expr {
    fn add_assign(&mut self, rhs: Expr) {
        *self = add_exprs(self, &rhs);
    }
}

impl AddAssign<&Expr> for Expr {
    fn add_assign(&mut self, rhs: &Expr) {
        *self = add_exprs(self, rhs);
    }
}

// ── Display ──────────────────────────────────────────────────────────

const PREC_ADD: u8 = 1;
const PREC_MUL: u8 = 2;
const PREC_POW: u8 = 3;

impl Expr {
    fn fmt_prec(&self, f: &mut fmt::Formatter<'_>, parent: u8) -> fmt::Result {
        match self.node() {
            Node::Num(r) => {
                if parent >= PREC_MUL && (r.is_negative() || !r.is_integer()) {
                    write!(f, "({r})")
                } else {
                    write!(f, "{r}")
                }
            }
            Node::Sym(s) => write!(f, "{s}"),
            Node::Add(terms) => {
                let paren = parent > PREC_ADD;
                if paren {
                    f.write_str("(")?;
                }
                for (i, term) in terms.iter().enumerate() {
                    let (c, rest) = term.split_coefficient();
                    if i == 0 {
                        term.fmt_prec(f, PREC_ADD)?;
                    } else if c.is_negative() {
                        f.write_str(" - ")?;
                        Expr::scaled(-c, rest).fmt_prec(f, PREC_ADD)?;
                    } else {
                        f.write_str(" + ")?;
                        term.fmt_prec(f, PREC_ADD)?;
                    }
                }
                if paren {
                    f.write_str(")")?;
                }
                Ok(())
            }
            Node::Mul(factors) => {
                let paren = parent > PREC_MUL;
                if paren {
                    f.write_str("(")?;
                }
                let mut rest = &factors[..];
                if matches!(factors[0].node(), Node::Num(r) if r.is_minus_one()) {
                    f.write_str("-")?;
                    rest = &factors[1..];
                }
                for (i, factor) in rest.iter().enumerate() {
                    if i > 0 {
                        f.write_str("*")?;
                    }
                    factor.fmt_prec(f, PREC_MUL)?;
                }
                if paren {
                    f.write_str(")")?;
                }
                Ok(())
            }
            Node::Pow(base, exp) => {
                let paren = parent >= PREC_POW;
                if paren {
                    f.write_str("(")?;
                }
                base.fmt_prec(f, PREC_POW)?;
                f.write_str("^")?;
                exp.fmt_prec(f, PREC_POW)?;
                if paren {
                    f.write_str(")")?;
                }
                Ok(())
            }
            Node::Apply(func, arg) => {
                write!(f, "{}(", func.name())?;
                arg.fmt_prec(f, 0)?;
                f.write_str(")")
            }
            Node::Atan2(y, x) => {
                f.write_str("atan2(")?;
                y.fmt_prec(f, 0)?;
                f.write_str(", ")?;
                x.fmt_prec(f, 0)?;
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_prec(f, 0)
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_prec(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expr {
        Expr::symbol("x")
    }
    fn y() -> Expr {
        Expr::symbol("y")
    }

    #[test]
    fn test_like_terms_cancel() {
        let e = &x() + &y() - &x();
        assert_eq!(e, y());
        assert!((&x() * &y() - &y() * &x()).is_zero());
        assert!((x() - x()).is_zero());
    }

    #[test]
    fn test_coefficients_collect() {
        let e = Expr::int(2) * x() + Expr::int(3) * x();
        assert_eq!(e, Expr::int(5) * x());
        let half = Expr::rational(1, 2);
        assert_eq!(&half * &x() + &half * &x(), x());
    }

    #[test]
    fn test_powers_merge() {
        let e = x().powi(2) * x().powi(-2);
        assert!(e.is_one());
        let e = x().pow_rational(1, 3) * x().pow_rational(2, 3);
        assert_eq!(e, x());
        assert_eq!(x() * x(), x().powi(2));
    }

    #[test]
    fn test_product_power_distributes_for_integer_exponent() {
        let xy = x() * y();
        assert_eq!(xy.powi(2), x().powi(2) * y().powi(2));
        let ratio = (x().powi(4) * y().sin().powi(2)) / (x().powi(4) * y().sin().powi(2));
        assert!(ratio.is_one());
    }

    #[test]
    fn test_rational_powers_fold() {
        assert_eq!(Expr::int(8).pow_rational(1, 3), Expr::int(2));
        assert!(Expr::one().pow_rational(-1, 3).is_one());
        assert!(matches!(Expr::int(2).sqrt().node(), Node::Pow(_, _)));
    }

    #[test]
    fn test_nested_powers_fold_only_when_real_valued() {
        let psi = Expr::one() + x();
        assert_eq!(psi.powi(-12).pow_rational(1, 3), psi.powi(-4));
        assert_eq!(psi.powi(12).pow_rational(-1, 6), psi.powi(-2));
        assert!(matches!(
            x().powi(2).pow_rational(1, 2).node(),
            Node::Pow(_, _)
        ));
        assert_eq!(x().pow_rational(1, 2).powi(2), x());
    }

    #[test]
    fn test_number_distributes_over_single_sum() {
        let e = Expr::int(2) * (x() + y());
        assert_eq!(e, Expr::int(2) * x() + Expr::int(2) * y());
    }

    #[test]
    fn test_zero_annihilates_products() {
        assert!((Expr::zero() * x().log()).is_zero());
        assert!((Expr::zero() / x()).is_zero());
    }

    #[test]
    fn test_function_identities() {
        assert!(Expr::zero().sin().is_zero());
        assert!(Expr::zero().cos().is_one());
        assert!(Expr::one().log().is_zero());
        assert_eq!(x().log().exp(), x());
        assert_eq!(x().exp().log(), x());
        assert_eq!(x().acos().cos(), x());
        assert_eq!(x().exp().powi(2), (Expr::int(2) * x()).exp());
    }

    #[test]
    fn test_canonical_order_is_input_independent() {
        let a = Expr::sum_of([x().sin(), y(), Expr::int(3), x()]);
        let b = Expr::sum_of([Expr::int(3), x(), y(), x().sin()]);
        assert_eq!(a, b);
        let c = Expr::product_of([y(), x().sin(), x()]);
        let d = Expr::product_of([x(), y(), x().sin()]);
        assert_eq!(c, d);
    }

    #[test]
    fn test_subs_is_simultaneous() {
        let sx = Symbol::new("x");
        let sy = Symbol::new("y");
        let e = x() - y();
        let swapped = e.subs(&[(sx, y()), (sy, x())]);
        assert_eq!(swapped, y() - x());
    }

    #[test]
    fn test_subs_leaves_numbers_and_unrelated_nodes() {
        let seven = Expr::int(7);
        let out = seven.subs(&[(Symbol::new("x"), y())]);
        assert_eq!(out, Expr::int(7));

        let e = y().sin() * x();
        let out = e.subs(&[(Symbol::new("x"), Expr::int(2))]);
        assert_eq!(out, Expr::int(2) * y().sin());
    }

    #[test]
    fn test_free_symbols() {
        let e = x().sin() * y().powi(2) + Expr::int(1);
        let syms: Vec<String> = e.free_symbols().iter().map(|s| s.name().to_string()).collect();
        assert_eq!(syms, vec!["x".to_string(), "y".to_string()]);
        assert!(e.depends_on(&Symbol::new("y")));
        assert!(!e.depends_on(&Symbol::new("z")));
    }

    #[test]
    fn test_display() {
        assert_eq!((x() + Expr::int(1)).to_string(), "1 + x");
        assert_eq!((x() - y()).to_string(), "x - y");
        assert_eq!((-x()).to_string(), "-x");
        assert_eq!(x().pow_rational(1, 3).to_string(), "x^(1/3)");
        assert_eq!((x() + y()).powi(2).to_string(), "(x + y)^2");
        assert_eq!((Expr::int(2) * x().sin()).to_string(), "2*sin(x)");
        assert_eq!(x().recip().to_string(), "x^(-1)");
    }

    #[test]
    fn test_shared_nodes_survive_rebuild() {
        let big = (x() + y()).powi(3).sin();
        let e = &big * y();
        let out = e.subs(&[(Symbol::new("z"), x())]);
        assert!(out.same_node(&e));
    }
}
