use crate::errors::CoinRegError;
use alloy_primitives::{B256, U256};

/// Tightly packs small integers into a single word, one byte per value,
/// little-endian: `pack_values(&[v0, v1, ..])` is `sum(v_i << 8*i)`. This is
/// the format the registry contracts use for per-coin decimals and flags.
pub fn pack_values(values: &[u64]) -> Result<U256, CoinRegError> {
    if values.len() > 32 {
        return Err(CoinRegError::TooManyValues(values.len()));
    }

    let mut packed = U256::ZERO;
    for (position, &value) in values.iter().enumerate() {
        if value > u8::MAX as u64 {
            return Err(CoinRegError::ValueTooLarge(value));
        }
        packed |= U256::from(value) << (8 * position);
    }
    Ok(packed)
}

/// Right-pads a function selector (or any short byte string) out to a 32 byte
/// word: the input is left-aligned and the remainder zero-filled.
pub fn right_pad(data: &[u8]) -> Result<B256, CoinRegError> {
    if data.len() > 32 {
        return Err(CoinRegError::SelectorTooLong(data.len()));
    }

    let mut word = [0u8; 32];
    word[..data.len()].copy_from_slice(data);
    Ok(B256::from(word))
}
