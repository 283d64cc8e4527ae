// SPDX-FileCopyrightText: 2026 Sqlqueue Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversion of queue items to and from their storable text form.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ItemError;

/// An item that can be stored in a persistent queue as text.
///
/// Decoding is lenient: malformed input yields `None` instead of an error, and
/// the queue accounts for such rows as skipped. Encoding may fail for
/// structured items, in which case `enqueue` reports
/// [`QueueError::SerializationFailed`](crate::QueueError::SerializationFailed).
pub trait StorableItem: Sized {
    /// Decodes an item from its stored text, or `None` if the text is malformed.
    fn from_storable(text: &str) -> Option<Self>;

    /// Encodes the item into the text that will be stored.
    fn to_storable(&self) -> Result<String, ItemError>;
}

impl StorableItem for String {
    fn from_storable(text: &str) -> Option<Self> {
        Some(text.to_owned())
    }

    fn to_storable(&self) -> Result<String, ItemError> {
        Ok(self.clone())
    }
}

macro_rules! storable_via_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl StorableItem for $ty {
                fn from_storable(text: &str) -> Option<Self> {
                    text.parse().ok()
                }

                fn to_storable(&self) -> Result<String, ItemError> {
                    Ok(self.to_string())
                }
            }
        )*
    };
}

storable_via_display!(i32, i64, u32, u64, usize);

/// Stores any serde-compatible value as a JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    /// Unwraps the inner value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> StorableItem for Json<T>
where
    T: Serialize + DeserializeOwned,
{
    fn from_storable(text: &str) -> Option<Self> {
        serde_json::from_str(text).ok().map(Json)
    }

    fn to_storable(&self) -> Result<String, ItemError> {
        serde_json::to_string(&self.0).map_err(|e| Box::new(e) as ItemError)
    }
}
