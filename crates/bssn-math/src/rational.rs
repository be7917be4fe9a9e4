// ─────────────────────────────────────────────────────────────────────
// SCPN BSSN Initial Data — Rational
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Exact rational coefficients for symbolic expressions.
//!
//! Arbitrary precision, always stored reduced with a positive
//! denominator, so structural equality is numeric equality and no
//! coefficient can overflow.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

/// Largest integer exponent folded into an exact number. Beyond it the
/// power stays symbolic.
const MAX_EXACT_EXPONENT: u32 = 4096;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rational(BigRational);

/// Exact non-negative integer q-th root of `n >= 0`, if one exists.
fn integer_root(n: &BigInt, q: u32) -> Option<BigInt> {
    let root = n.nth_root(q);
    (root.pow(q) == *n).then_some(root)
}

impl Rational {
    /// Reduced `num/den`.
    ///
    /// Panics if `den == 0`.
    pub fn new(num: impl Into<BigInt>, den: impl Into<BigInt>) -> Self {
        let den = den.into();
        assert!(!den.is_zero(), "Rational denominator must be non-zero");
        Rational(BigRational::new(num.into(), den))
    }

    pub fn integer(n: impl Into<BigInt>) -> Self {
        Rational(BigRational::from_integer(n.into()))
    }

    pub fn zero() -> Self {
        Rational(BigRational::zero())
    }

    pub fn one() -> Self {
        Rational(BigRational::one())
    }

    pub fn minus_one() -> Self {
        -Rational::one()
    }

    pub fn numer(&self) -> &BigInt {
        self.0.numer()
    }

    pub fn denom(&self) -> &BigInt {
        self.0.denom()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.0.is_one()
    }

    pub fn is_minus_one(&self) -> bool {
        self.0.is_integer() && self.numer() == &BigInt::from(-1)
    }

    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }

    pub fn abs(&self) -> Self {
        Rational(self.0.abs())
    }

    pub fn recip(&self) -> Option<Self> {
        if self.is_zero() {
            None
        } else {
            Some(Rational(self.0.recip()))
        }
    }

    /// Nearest `f64`; saturates to `±inf` for huge magnitudes.
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(f64::NAN)
    }

    /// Integer power; `None` for `0^negative` or an exponent too large
    /// to fold.
    pub fn checked_powi(&self, exp: i64) -> Option<Self> {
        if exp < 0 {
            return self.recip()?.checked_powi(exp.checked_neg()?);
        }
        let e = u32::try_from(exp).ok().filter(|&e| e <= MAX_EXACT_EXPONENT)?;
        // gcd(num, den) = 1 implies gcd(num^e, den^e) = 1
        Some(Rational(BigRational::new_raw(
            self.numer().pow(e),
            self.denom().pow(e),
        )))
    }

    /// Exact real q-th root; `None` when irrational or not real.
    pub fn exact_root(&self, q: u32) -> Option<Self> {
        match q {
            0 => None,
            1 => Some(self.clone()),
            _ if self.is_negative() && q % 2 == 0 => None,
            _ => {
                let num_root = integer_root(&self.numer().abs(), q)?;
                let den_root = integer_root(self.denom(), q)?;
                let num_root = if self.is_negative() { -num_root } else { num_root };
                Some(Rational(BigRational::new_raw(num_root, den_root)))
            }
        }
    }

    /// `self^exp` when the result is itself rational.
    pub fn checked_pow(&self, exp: &Rational) -> Option<Self> {
        let p = exp.numer().to_i64()?;
        if exp.is_integer() {
            return self.checked_powi(p);
        }
        let q = exp.denom().to_u32()?;
        self.exact_root(q)?.checked_powi(p)
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident) => {
        impl $trait<Rational> for Rational {
            type Output = Rational;
            fn $method(self, rhs: Rational) -> Rational {
                Rational(self.0.$method(rhs.0))
            }
        }

        impl $trait<&Rational> for Rational {
            type Output = Rational;
            fn $method(self, rhs: &Rational) -> Rational {
                Rational(self.0.$method(&rhs.0))
            }
        }

        impl $trait<Rational> for &Rational {
            type Output = Rational;
            fn $method(self, rhs: Rational) -> Rational {
                Rational((&self.0).$method(rhs.0))
            }
        }

        impl $trait<&Rational> for &Rational {
            type Output = Rational;
            fn $method(self, rhs: &Rational) -> Rational {
                Rational((&self.0).$method(&rhs.0))
            }
        }
    };
}

impl_binary_op!(Add, add);
impl_binary_op!(Sub, sub);
impl_binary_op!(Mul, mul);
// Panics on division by zero.
impl_binary_op!(Div, div);

impl Neg for Rational {
    type Output = Rational;
    fn neg(self) -> Rational {
        Rational(-self.0)
    }
}

impl Neg for &Rational {
    type Output = Rational;
    fn neg(self) -> Rational {
        Rational(-&self.0)
    }
}

impl AddAssign<Rational> for Rational {
    fn add_assign(&mut self, rhs: Rational) {
        self.0 += rhs.0;
    }
}

impl AddAssign<&Rational> for Rational {
    fn add_assign(&mut self, rhs: &Rational) {
        self.0 += &rhs.0;
    }
}

impl MulAssign<Rational> for Rational {
    fn mul_assign(&mut self, rhs: Rational) {
        self.0 *= rhs.0;
    }
}

impl MulAssign<&Rational> for Rational {
    fn mul_assign(&mut self, rhs: &Rational) {
        self.0 *= &rhs.0;
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Rational::integer(n)
    }
}

impl From<i32> for Rational {
    fn from(n: i32) -> Self {
        Rational::integer(n)
    }
}

impl From<BigInt> for Rational {
    fn from(n: BigInt) -> Self {
        Rational::integer(n)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numer())
        } else {
            write!(f, "{}/{}", self.numer(), self.denom())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(n: i64) -> Rational {
        Rational::integer(n)
    }

    #[test]
    fn test_reduction_and_sign() {
        let r = Rational::new(6, -8);
        assert_eq!(r.numer(), &BigInt::from(-3));
        assert_eq!(r.denom(), &BigInt::from(4));
        assert_eq!(Rational::new(0, -5), Rational::zero());
        assert!(Rational::new(-2, 2).is_minus_one());
    }

    #[test]
    fn test_arithmetic() {
        let a = Rational::new(1, 3);
        let b = Rational::new(1, 6);
        assert_eq!(&a + &b, Rational::new(1, 2));
        assert_eq!(&a - &b, Rational::new(1, 6));
        assert_eq!(&a * &b, Rational::new(1, 18));
        assert_eq!(&a / &b, int(2));
        assert_eq!(-a, Rational::new(-1, 3));
    }

    #[test]
    fn test_ordering() {
        assert!(Rational::new(1, 3) < Rational::new(1, 2));
        assert!(Rational::new(-1, 2) < Rational::zero());
        assert!(int(3) > Rational::new(5, 2));
    }

    #[test]
    fn test_exact_powers() {
        assert_eq!(
            Rational::new(8, 27).checked_pow(&Rational::new(1, 3)),
            Some(Rational::new(2, 3))
        );
        assert_eq!(
            int(4).checked_pow(&Rational::new(-3, 2)),
            Some(Rational::new(1, 8))
        );
        assert_eq!(int(-8).checked_pow(&Rational::new(1, 3)), Some(int(-2)));
        assert_eq!(int(2).checked_pow(&Rational::new(1, 2)), None);
        assert_eq!(int(-4).checked_pow(&Rational::new(1, 2)), None);
        assert_eq!(Rational::zero().checked_powi(-1), None);
        assert_eq!(
            Rational::one().checked_pow(&Rational::new(1, 3)),
            Some(Rational::one())
        );
    }

    #[test]
    fn test_large_products_stay_exact() {
        let big = int(10).checked_powi(13).unwrap();
        let cubed = &(&big * &big) * &big;
        assert_eq!(cubed, int(10).checked_powi(39).unwrap());
        let sum = &cubed + &cubed;
        assert_eq!(sum.numer(), &(BigInt::from(2) * BigInt::from(10).pow(39)));
        assert_eq!(
            cubed.checked_pow(&Rational::new(-1, 3)),
            Some(Rational::new(1, 10_000_000_000_000i64))
        );
    }

    #[test]
    fn test_roots_beyond_f64_precision() {
        // 2^53 + 1 is not representable in f64
        let k = BigInt::from((1i64 << 53) + 1);
        let square = Rational::from(&k * &k);
        assert_eq!(square.exact_root(2), Some(Rational::from(k.clone())));
        let not_square = &square + &Rational::one();
        assert_eq!(not_square.exact_root(2), None);
        let cube = Rational::from(-(&k * &k * &k));
        assert_eq!(cube.exact_root(3), Some(Rational::from(-k)));
    }

    #[test]
    fn test_huge_exponent_stays_symbolic() {
        assert_eq!(int(3).checked_powi(i64::from(MAX_EXACT_EXPONENT) + 1), None);
        assert!(int(1).checked_powi(2).is_some());
    }

    #[test]
    fn test_display() {
        assert_eq!(int(-4).to_string(), "-4");
        assert_eq!(Rational::new(2, 6).to_string(), "1/3");
        assert_eq!(int(10).checked_powi(30).unwrap().to_string(), format!("1{}", "0".repeat(30)));
    }

    #[test]
    fn test_to_f64() {
        assert_eq!(Rational::new(1, 4).to_f64(), 0.25);
        assert_eq!(int(10).checked_powi(13).unwrap().to_f64(), 1e13);
    }
}
