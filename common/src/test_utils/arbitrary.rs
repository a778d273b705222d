use proptest::{
    arbitrary::any,
    prop_oneof,
    strategy::{BoxedStrategy, Strategy},
};

use crate::{
    address::Address,
    network::{MtNetwork, NetworkParams},
};

/// An `Arbitrary`-like [`Strategy`] for [`Address`]es valid on the given
/// network. Generates both P2PKH and P2SH addresses.
pub fn any_address(params: &'static NetworkParams) -> BoxedStrategy<Address> {
    let any_hash = any::<[u8; Address::HASH_LEN]>();
    prop_oneof![
        any_hash.clone().prop_map(|hash| Address::p2pkh(params, hash)),
        any_hash.prop_map(|hash| Address::p2sh(params, hash)),
    ]
    .boxed()
}

/// An `Arbitrary`-like [`Strategy`] for mainnet [`Address`]es.
pub fn any_mainnet_address() -> BoxedStrategy<Address> {
    any_address(MtNetwork::Mainnet.params())
}
