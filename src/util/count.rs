//! Generic integer abstraction used as the arbitrary-precision counter `I` throughout this
//! crate, in the same spirit as [`super::integer::Integer`] but loosened from `Copy` to `Clone`
//! so that [`num_bigint::BigUint`] can stand in for a native width.
use std::fmt::Display;
use std::ops::{Add, Div, Mul, Rem, Sub};

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};

/// A counter wide enough to hold `n!` or `C(n,k)`.
///
/// Implemented for every native unsigned integer this crate cares about plus
/// [`BigUint`] for callers whose `n` makes even `u128` overflow (30! already exceeds it).
pub trait Count:
    Clone
    + Display
    + PartialEq
    + PartialOrd
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Rem<Output = Self>
{
    /// Builds a value from a small, exactly representable `usize` literal.
    fn from_usize(n: usize) -> Self;

    /// Narrows this value to a native loop counter when it fits, for the hot-loop
    /// optimization described in the worker driver.
    fn narrow(&self) -> Narrow;
}

/// The counter width chosen for a worker's successor loop.
#[derive(Debug, Clone, Copy)]
pub enum Narrow {
    I32(i32),
    I64(i64),
    /// Falls back to the caller's own `Count` type for the hot loop.
    Wide,
}

macro_rules! count_native {
    ($($t:ty),* $(,)?) => {$(
        impl Count for $t {
            fn from_usize(n: usize) -> Self {
                n as $t
            }

            fn narrow(&self) -> Narrow {
                if *self <= i32::MAX as $t {
                    Narrow::I32(*self as i32)
                } else if *self <= i64::MAX as $t {
                    Narrow::I64(*self as i64)
                } else {
                    Narrow::Wide
                }
            }
        }
    )*};
}

count_native!(u32, u64, u128, usize);

impl Count for BigUint {
    fn from_usize(n: usize) -> Self {
        BigUint::from(n)
    }

    fn narrow(&self) -> Narrow {
        if let Some(i) = self.to_i32() {
            Narrow::I32(i)
        } else if let Some(i) = self.to_i64() {
            Narrow::I64(i)
        } else {
            Narrow::Wide
        }
    }
}
