//! Partition and sort key constraint.
//!
//! Each key attribute must be a scalar, so only text, integers and byte sequences
//! can be used as the partition or sort key of a store.

use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::AttributeValue;

mod sealed {
    pub trait Sealed {}
}

/// Scalar kind a key marshals to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Text,
    Number,
    Binary,
}

/// A type usable as a partition or sort key.
///
/// Sealed: implemented for `String`, the primitive integers and `Vec<u8>`.
pub trait Key: sealed::Sealed + Clone + Send + Sync + 'static {
    /// The scalar kind this key type marshals to.
    const KIND: KeyKind;

    /// Marshal the key into a single scalar attribute.
    fn to_attribute_value(&self) -> AttributeValue;

    /// String form used in operation details and logs.
    fn to_key_string(&self) -> String;
}

/// A key type whose underlying representation is text.
///
/// Prefix listing is a string operation, so it is only available on stores
/// whose sort key implements this trait.
pub trait TextKey: Key {
    fn from_text(text: impl Into<String>) -> Self;

    fn as_text(&self) -> &str;
}

impl sealed::Sealed for String {}

impl Key for String {
    const KIND: KeyKind = KeyKind::Text;

    fn to_attribute_value(&self) -> AttributeValue {
        AttributeValue::S(self.clone())
    }

    fn to_key_string(&self) -> String {
        self.clone()
    }
}

impl TextKey for String {
    fn from_text(text: impl Into<String>) -> Self {
        text.into()
    }

    fn as_text(&self) -> &str {
        self
    }
}

impl sealed::Sealed for Vec<u8> {}

impl Key for Vec<u8> {
    const KIND: KeyKind = KeyKind::Binary;

    fn to_attribute_value(&self) -> AttributeValue {
        AttributeValue::B(Blob::new(self.clone()))
    }

    fn to_key_string(&self) -> String {
        hex::encode(self)
    }
}

macro_rules! integer_key {
    ($($ty:ty),*) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Key for $ty {
                const KIND: KeyKind = KeyKind::Number;

                fn to_attribute_value(&self) -> AttributeValue {
                    AttributeValue::N(self.to_string())
                }

                fn to_key_string(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

integer_key!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
