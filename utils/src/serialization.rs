//! Serde adapter for [arkworks](http://arkworks.rs/) values implementing
//! [CanonicalSerialize].

use ark_serialize::CanonicalSerialize;
use serde_with::{Bytes, SerializeAs};

/// Serializes arkworks values, or containers of them, through [serde_with]:
/// `#[serde_as(as = "Vec<Vec<arith_utils::serialization::SerdeAs>>")]`.
///
/// Binary formats get the compressed encoding as a byte string; human-readable
/// formats get the same bytes as a lowercase hex string.
pub struct SerdeAs;

impl<T> SerializeAs<T> for SerdeAs
where
    T: CanonicalSerialize,
{
    fn serialize_as<S>(val: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut bytes = vec![];
        val.serialize_compressed(&mut bytes)
            .map_err(serde::ser::Error::custom)?;

        if serializer.is_human_readable() {
            serializer.serialize_str(&hex::encode(bytes))
        } else {
            Bytes::serialize_as(&bytes, serializer)
        }
    }
}
