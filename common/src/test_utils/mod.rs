/// `Arbitrary`-like proptest strategies for types which need some context,
/// like a network, to be generated.
pub mod arbitrary;
/// Quickly create roundtrip proptests for various serialization schemes.
pub mod roundtrip;
