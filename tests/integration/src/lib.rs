//! Shared helpers for the Attest integration tests.

use attest_core::Address;

/// Deterministic test address: `0x` + 40 hex digits ending in `n`.
pub fn addr(n: u8) -> Address {
    Address::new(format!("0x{:040x}", n)).expect("test address is well-formed")
}
