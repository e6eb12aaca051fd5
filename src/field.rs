// SPDX-License-Identifier: Apache-2.0
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The field arithmetic interface consumed by the rest of the crate.
//!
//! `spec.md` §2.1 treats the field as an external collaborator: the core only
//! ever needs `zero`, `one`, `+`, `*`, unary `-`, `inverse`, equality,
//! decimal/hex parsing, bit extraction and printing. [`PrimeFieldElement`] is
//! the one concrete implementation this crate ships, so the crate is
//! runnable end to end without pulling in a proprietary curve library — the
//! same relationship `zkir`'s IR layer has to `transient_crypto::curve::Fr`.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::sync::OnceLock;

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// The BN254 scalar field modulus, the same order of magnitude prime used
/// throughout the retrieved pack's zk-SNARK front ends.
const MODULUS_DECIMAL: &str =
    "21888242871839275222246405745257275088548364400416034343698204186575808495617";

fn modulus() -> &'static BigUint {
    static MODULUS: OnceLock<BigUint> = OnceLock::new();
    MODULUS.get_or_init(|| {
        MODULUS_DECIMAL
            .parse()
            .expect("modulus literal is a valid decimal integer")
    })
}

/// The interface the core consumes from a field-arithmetic library.
///
/// Implemented here once, concretely, by [`PrimeFieldElement`]. A different
/// proving stack would supply its own implementation over its own prime.
pub trait Field:
    Clone
    + fmt::Debug
    + fmt::Display
    + PartialEq
    + Eq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
{
    /// The additive identity.
    fn zero() -> Self;
    /// The multiplicative identity.
    fn one() -> Self;
    /// Whether this value is the additive identity.
    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
    /// The multiplicative inverse, or `None` for zero (which has none).
    fn inverse(&self) -> Option<Self>;
    /// Parses an unsigned decimal literal into a field element, reducing
    /// modulo the field's characteristic.
    fn from_decimal_str(s: &str) -> Option<Self>;
    /// Parses an unsigned hexadecimal literal (no `0x` prefix) into a field
    /// element, reducing modulo the field's characteristic.
    fn from_hex_str(s: &str) -> Option<Self>;
    /// Converts a small non-negative integer into a field element.
    fn from_u64(v: u64) -> Self;
    /// Returns the value of bit `i` (0 = least significant) of the
    /// canonical big-integer representation.
    fn bit(&self, i: u32) -> bool;
}

/// A field element over the BN254 scalar field, represented as a reduced
/// [`BigUint`] in `[0, MODULUS)`.
#[derive(Clone, Debug)]
pub struct PrimeFieldElement(BigUint);

impl PrimeFieldElement {
    fn reduce(v: BigUint) -> Self {
        PrimeFieldElement(v % modulus())
    }

    /// The canonical non-negative integer this element represents.
    pub fn to_biguint(&self) -> BigUint {
        self.0.clone()
    }
}

impl PartialEq for PrimeFieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl Eq for PrimeFieldElement {}

impl fmt::Display for PrimeFieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for PrimeFieldElement {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::reduce(self.0 + rhs.0)
    }
}

impl Sub for PrimeFieldElement {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl Mul for PrimeFieldElement {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::reduce(self.0 * rhs.0)
    }
}

impl Neg for PrimeFieldElement {
    type Output = Self;
    fn neg(self) -> Self {
        if self.0.is_zero() {
            self
        } else {
            PrimeFieldElement(modulus() - self.0)
        }
    }
}

impl Field for PrimeFieldElement {
    fn zero() -> Self {
        PrimeFieldElement(BigUint::zero())
    }

    fn one() -> Self {
        PrimeFieldElement(BigUint::one())
    }

    fn inverse(&self) -> Option<Self> {
        if self.0.is_zero() {
            return None;
        }
        // Fermat's little theorem: a^(p-2) mod p is a's inverse for prime p.
        let exponent = modulus() - BigUint::from(2u8);
        Some(PrimeFieldElement(self.0.modpow(&exponent, modulus())))
    }

    fn from_decimal_str(s: &str) -> Option<Self> {
        s.parse::<BigUint>().ok().map(Self::reduce)
    }

    fn from_hex_str(s: &str) -> Option<Self> {
        let padded;
        let even = if s.len() % 2 == 1 {
            padded = format!("0{s}");
            padded.as_str()
        } else {
            s
        };
        let bytes = const_hex::decode(even).ok()?;
        Some(Self::reduce(BigUint::from_bytes_be(&bytes)))
    }

    fn from_u64(v: u64) -> Self {
        PrimeFieldElement(BigUint::from(v))
    }

    fn bit(&self, i: u32) -> bool {
        self.0.bit(i as u64)
    }
}

impl From<u64> for PrimeFieldElement {
    fn from(v: u64) -> Self {
        Self::from_u64(v)
    }
}
