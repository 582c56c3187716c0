//! Fixed-size record serialization shared by the model sections.
//!
//! The header and the per-element records of each section implement
//! [`BinarySerializable`], so the validator can walk sections generically.
//! Each type keeps its own `to_bytes()` returning a fixed-size array.

/// A record with a fixed little-endian wire size.
///
/// # Example
///
/// ```
/// use mdl_common::formats::{BinarySerializable, Triangle};
///
/// let tri = Triangle::new([0, 1, 2]);
/// let bytes = tri.serialize();
/// assert_eq!(bytes.len(), <Triangle as BinarySerializable>::SIZE);
/// assert_eq!(Triangle::deserialize(&bytes), Some(tri));
/// ```
pub trait BinarySerializable: Sized {
    /// Size of the serialized record in bytes.
    const SIZE: usize;

    /// Serialize to bytes.
    fn serialize(&self) -> Vec<u8>;

    /// Deserialize from bytes.
    ///
    /// Returns `None` if the byte slice is too short.
    fn deserialize(bytes: &[u8]) -> Option<Self>;
}

macro_rules! impl_binary_serializable {
    ($($ty:ty),* $(,)?) => {
        $(
            impl BinarySerializable for $ty {
                const SIZE: usize = <$ty>::SIZE;

                fn serialize(&self) -> Vec<u8> {
                    self.to_bytes().to_vec()
                }

                fn deserialize(bytes: &[u8]) -> Option<Self> {
                    <$ty>::from_bytes(bytes)
                }
            }
        )*
    };
}

impl_binary_serializable!(
    super::MdlHeader,
    super::TexCoord,
    super::Triangle,
    super::TriVertex,
);
