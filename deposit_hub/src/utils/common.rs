//! Common utility and helper functions that are used across the project

use std::{collections::HashSet, str::FromStr};

use alloy_primitives::{Address, I256, U256};
use candid::Nat;
use chrono::DateTime;
use num_bigint::BigUint;

use super::error::*;
use crate::constants::{max_int256, ray};

/// Returns Err if the `caller` is not one of the `wards`
pub fn only_ward(wards: &HashSet<Address>, caller: Address) -> HubResult<()> {
    if !wards.contains(&caller) {
        return Err(HubError::Unauthorized);
    }
    Ok(())
}

/// Converts String to Address and returns HubError on failure
pub fn string_to_address(input: &str) -> HubResult<Address> {
    Address::from_str(input).map_err(|err| HubError::DecodingError(format!("{:#?}", err)))
}

/// Converts values of type `U256` to `Nat`
pub fn u256_to_nat(value: &U256) -> Nat {
    Nat(BigUint::from_bytes_be(&value.to_be_bytes::<32>()))
}

/// Casts an unsigned amount into a ledger delta, failing outside the signed range
pub fn to_int(value: U256) -> HubResult<I256> {
    if value > max_int256() {
        return Err(HubError::Overflow);
    }
    Ok(I256::from_raw(value))
}

/// Negated ledger delta of `value`
pub fn to_neg_int(value: U256) -> HubResult<I256> {
    to_int(value).map(|delta| -delta)
}

/// Division rounding up
pub fn divup(x: U256, y: U256) -> HubResult<U256> {
    if y.is_zero() {
        return Err(arithmetic_err("Division by zero."));
    }
    let (quotient, remainder) = x.div_rem(y);
    if remainder.is_zero() {
        Ok(quotient)
    } else {
        Ok(quotient + U256::from(1))
    }
}

/// Scales a WAD amount up to a RAD balance
pub fn to_rad(wad: U256) -> HubResult<U256> {
    wad.checked_mul(ray())
        .ok_or_else(|| arithmetic_err("WAD to RAD conversion overflowed."))
}

/// Renders a unix timestamp (seconds) for logs
pub fn format_timestamp(secs: u64) -> String {
    i64::try_from(secs)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|time| time.to_rfc3339())
        .unwrap_or_else(|| secs.to_string())
}
