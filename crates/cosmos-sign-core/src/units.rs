//! Fixed-point amounts.
//!
//! Coin amounts are integers in the currency's minimal denom; user input and
//! display use the currency's decimals. Gas prices are 18-decimal fixed point.

use std::fmt;
use std::str::FromStr;

use alloy::primitives::U256;
use thiserror::Error;

use crate::domain::{ChainInfo, Coin, Currency};

pub const DEC_PRECISION: u8 = 18;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    #[error("amount is empty")]
    Empty,
    #[error("invalid number: {0}")]
    InvalidNumber(String),
    #[error("negative amount: {0}")]
    Negative(String),
    #[error("too many decimal places (max {max})")]
    TooManyDecimals { max: u8 },
    #[error("amount overflow")]
    Overflow,
}

pub fn pow10(exp: u8) -> U256 {
    U256::from(10u64).pow(U256::from(exp))
}

/// Parses a non-negative decimal string into base units with `decimals` places.
pub fn parse_decimal(input: &str, decimals: u8) -> Result<U256, UnitError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(UnitError::Empty);
    }
    if s.starts_with('-') {
        return Err(UnitError::Negative(s.to_owned()));
    }
    let (int_part, frac_part) = s.split_once('.').unwrap_or((s, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(UnitError::InvalidNumber(s.to_owned()));
    }
    let all_digits = |p: &str| p.chars().all(|c| c.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) {
        return Err(UnitError::InvalidNumber(s.to_owned()));
    }

    let frac = frac_part.trim_end_matches('0');
    if frac.len() > decimals as usize {
        return Err(UnitError::TooManyDecimals { max: decimals });
    }

    let int_value = if int_part.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(int_part, 10).map_err(|_| UnitError::Overflow)?
    };
    let frac_value = if frac.is_empty() {
        U256::ZERO
    } else {
        let digits = U256::from_str_radix(frac, 10).map_err(|_| UnitError::Overflow)?;
        digits * pow10(decimals - frac.len() as u8)
    };

    int_value
        .checked_mul(pow10(decimals))
        .and_then(|v| v.checked_add(frac_value))
        .ok_or(UnitError::Overflow)
}

/// Parses a wire integer amount.
pub fn parse_int(input: &str) -> Result<U256, UnitError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(UnitError::Empty);
    }
    if !s.chars().all(|c| c.is_ascii_digit()) {
        return Err(UnitError::InvalidNumber(s.to_owned()));
    }
    U256::from_str_radix(s, 10).map_err(|_| UnitError::Overflow)
}

/// Formats base units with `decimals` places, trimming trailing zeros.
pub fn format_decimal(amount: U256, decimals: u8) -> String {
    if decimals == 0 {
        return amount.to_string();
    }
    let base = pow10(decimals);
    let int = amount / base;
    let frac = amount % base;
    if frac.is_zero() {
        return int.to_string();
    }
    let frac = format!("{:0>width$}", frac.to_string(), width = decimals as usize);
    format!("{int}.{}", frac.trim_end_matches('0'))
}

/// Non-negative 18-decimal fixed point, used for gas prices and fractions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Dec(U256);

impl Dec {
    pub fn one() -> Self {
        Dec(pow10(DEC_PRECISION))
    }

    pub fn from_f64(value: f64) -> Result<Self, UnitError> {
        if !value.is_finite() {
            return Err(UnitError::InvalidNumber(value.to_string()));
        }
        // f64 Display is the shortest round-trip decimal, never exponent form.
        format!("{value}").parse()
    }

    /// `ceil(self × n)`.
    pub fn mul_ceil(&self, n: U256) -> U256 {
        let base = pow10(DEC_PRECISION);
        let product = self.0.saturating_mul(n);
        let (q, r) = (product / base, product % base);
        if r.is_zero() {
            q
        } else {
            q + U256::from(1u64)
        }
    }

    /// `floor(self × n)`.
    pub fn mul_truncate(&self, n: U256) -> U256 {
        self.0.saturating_mul(n) / pow10(DEC_PRECISION)
    }
}

impl FromStr for Dec {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_decimal(s, DEC_PRECISION).map(Dec)
    }
}

impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_decimal(self.0, DEC_PRECISION))
    }
}

/// An amount bound to its currency metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinPretty {
    currency: Currency,
    amount: U256,
}

impl CoinPretty {
    pub fn new(currency: Currency, amount: U256) -> Self {
        Self { currency, amount }
    }

    /// Resolves a wire coin through the chain's currency registry.
    pub fn from_coin(chain: &ChainInfo, coin: &Coin) -> Result<Self, UnitError> {
        Ok(Self {
            currency: chain.force_find_currency(&coin.denom),
            amount: parse_int(&coin.amount)?,
        })
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn denom(&self) -> &str {
        &self.currency.coin_minimal_denom
    }

    pub fn amount(&self) -> U256 {
        self.amount
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn to_coin(&self) -> Coin {
        Coin::new(self.denom(), self.amount.to_string())
    }
}

impl fmt::Display for CoinPretty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            format_decimal(self.amount, self.currency.coin_decimals),
            self.currency.coin_denom
        )
    }
}

/// Adds `coin` into `coins`, merging with an existing entry of the same denom.
pub fn add_coin(coins: &mut Vec<CoinPretty>, coin: CoinPretty) {
    match coins.iter_mut().find(|c| c.denom() == coin.denom()) {
        Some(existing) => existing.amount = existing.amount.saturating_add(coin.amount),
        None => coins.push(coin),
    }
}

/// Total of `coins` in `denom`.
pub fn sum_denom(coins: &[CoinPretty], denom: &str) -> U256 {
    coins
        .iter()
        .filter(|c| c.denom() == denom)
        .fold(U256::ZERO, |acc, c| acc.saturating_add(c.amount))
}
