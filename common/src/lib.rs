//! The `mota-common` crate contains the MotaCoin types shared between the
//! payment URI parser and its front-ends: amounts, addresses, and per-network
//! parameters.

// `proptest_derive::Arbitrary` issue. This will hard-error for edition 2024 so
// hopefully it gets fixed soon...
// See: <https://github.com/proptest-rs/proptest/issues/447>
#![allow(non_local_definitions)]

/// Legacy base58check addresses.
pub mod address;
/// `Amount`.
pub mod amount;
/// `MtNetwork` and `NetworkParams`.
pub mod network;
/// `OrEnvExt`.
pub mod or_env;

/// Feature-gated test utilities that can be shared across crate boundaries.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
