//! Customer identifier type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`CustomerId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CustomerIdError {
    /// The input string is empty.
    #[error("customer id cannot be empty")]
    Empty,

    /// The input contains a NUL character, which `PostgreSQL` text cannot store.
    #[error("customer id cannot contain NUL characters")]
    ContainsNul,
}

/// A customer's chosen username, case-folded to lowercase.
///
/// Customer ids are case-insensitive: `"Alice"` and `"alice"` name the same
/// customer. Folding happens once, at parse time, so every value of this type
/// is already in its stored form and can be compared or used as a lookup key
/// directly.
///
/// ## Constraints
///
/// - Must not be empty
/// - Must not contain U+0000
/// - Any other content is accepted verbatim, including Unicode, whitespace
///   and punctuation
///
/// ## Examples
///
/// ```
/// use northwind_core::CustomerId;
///
/// let id = CustomerId::parse("Alice").unwrap();
/// assert_eq!(id.as_str(), "alice");
///
/// assert!(CustomerId::parse("").is_err());
/// assert!(CustomerId::parse("'; DROP TABLE customer; --").is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct CustomerId(String);

impl CustomerId {
    /// Parse a `CustomerId` from user input, folding it to lowercase.
    ///
    /// # Errors
    ///
    /// Returns [`CustomerIdError::Empty`] if the input is empty.
    /// Returns [`CustomerIdError::ContainsNul`] if the input contains `'\0'`.
    pub fn parse(s: &str) -> Result<Self, CustomerIdError> {
        if s.is_empty() {
            return Err(CustomerIdError::Empty);
        }
        if s.contains('\0') {
            return Err(CustomerIdError::ContainsNul);
        }

        Ok(Self(s.to_lowercase()))
    }

    /// Returns the customer id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `CustomerId` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CustomerId {
    type Err = CustomerIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for CustomerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for CustomerId {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for CustomerId {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Stored ids were folded on the way in
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for CustomerId {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_folds_case() {
        let id = CustomerId::parse("TestTestingAuth").unwrap();
        assert_eq!(id.as_str(), "testtestingauth");
        assert_eq!(id, CustomerId::parse("testtestingauth").unwrap());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(CustomerId::parse(""), Err(CustomerIdError::Empty));
    }

    #[test]
    fn test_parse_rejects_nul() {
        assert_eq!(CustomerId::parse("a\0b"), Err(CustomerIdError::ContainsNul));
        assert_eq!(CustomerId::parse("\0"), Err(CustomerIdError::ContainsNul));
    }

    #[test]
    fn test_parse_accepts_punctuation() {
        let raw = "test_!@#$%^*&()`'";
        assert_eq!(CustomerId::parse(raw).unwrap().as_str(), raw);
    }

    #[test]
    fn test_parse_accepts_unicode() {
        let id = CustomerId::parse("ÉÑÇøßΩ中あ😊€").unwrap();
        assert_eq!(id.as_str(), "éñçøßω中あ😊€");
    }

    #[test]
    fn test_parse_keeps_whitespace() {
        assert_eq!(CustomerId::parse(" ").unwrap().as_str(), " ");
    }

    #[test]
    fn test_serde_transparent() {
        let id = CustomerId::parse("alice").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"alice\"");
    }

    #[test]
    fn test_from_str() {
        let id: CustomerId = "Bob".parse().unwrap();
        assert_eq!(id.to_string(), "bob");
    }
}
