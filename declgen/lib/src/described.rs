//! Two-way lookup between enum values and human-readable descriptions.
//!
//! The table is declared up front, either as explicit `(value, description)`
//! pairs or from `#[strum(message = "...")]` attributes. Values without a
//! description are described by their own name.
//!
//! ## Examples
//!
//! ```
//! use declgen::described::DescribedEnum;
//! use strum::{EnumIter, EnumMessage, IntoStaticStr};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumMessage, IntoStaticStr)]
//! enum JoinKind {
//!     #[strum(message = "inner join")]
//!     Inner,
//!     Cross,
//! }
//!
//! let kinds = DescribedEnum::<JoinKind>::from_messages();
//! assert_eq!(kinds.describe(JoinKind::Inner), "inner join");
//! assert_eq!(kinds.describe(JoinKind::Cross), "Cross");
//! assert_eq!(kinds.parse("inner join"), Ok(JoinKind::Inner));
//! ```

use std::collections::HashMap;
use std::hash::Hash;

use strum::{EnumMessage, IntoEnumIterator};

use crate::errors::LookupError;

#[derive(Debug, Clone)]
pub struct DescribedEnum<T> {
    descriptions: HashMap<T, String>,
    values: HashMap<String, T>,
}

impl<T> DescribedEnum<T>
where
    T: Copy + Eq + Hash + Into<&'static str>,
{
    /// Builds the lookup from `(value, description)` pairs.
    ///
    /// A missing description defaults to the value's name. When two values
    /// share a description, `parse` returns the one registered last.
    pub fn new<'a>(entries: impl IntoIterator<Item = (T, Option<&'a str>)>) -> Self {
        let mut descriptions = HashMap::new();
        let mut values = HashMap::new();

        for (value, description) in entries {
            let description = description.unwrap_or_else(|| value.into()).to_string();
            values.insert(description.clone(), value);
            descriptions.insert(value, description);
        }

        Self {
            descriptions,
            values,
        }
    }

    /// Describes the value or returns its name.
    pub fn describe(&self, value: T) -> &str {
        match self.descriptions.get(&value) {
            Some(description) => description.as_str(),
            None => value.into(),
        }
    }

    /// The value described as `description`.
    ///
    /// ## Errors
    ///
    /// Returns `LookupError::DescriptionNotFound` for unknown descriptions.
    pub fn parse(&self, description: &str) -> Result<T, LookupError> {
        self.values
            .get(description)
            .copied()
            .ok_or_else(|| LookupError::DescriptionNotFound(description.to_string()))
    }

    /// Number of registered values.
    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }
}

impl<T> DescribedEnum<T>
where
    T: Copy + Eq + Hash + Into<&'static str> + IntoEnumIterator + EnumMessage,
{
    /// Registers every variant, described by its `message` attribute.
    pub fn from_messages() -> Self {
        Self::new(T::iter().map(|value| (value, value.get_message())))
    }
}
