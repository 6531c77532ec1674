//! Currency enumeration for harvested monetary fields.
//!
//! Source feeds are inconsistent about currency spelling: the same column may
//! carry an ISO code (`"EUR"`), a currency sign (`"€"`), or a legacy local
//! form (`"Sk"`, `"Eur"`). The lookup table below covers every form observed
//! in live dumps; anything else is a hard error from [`Currency::parse`] so
//! that new spellings surface instead of silently becoming `Undefined`.
//! Row scrapers catch that error and downgrade it to a scrap note.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed set of currencies that appear in the harvested data sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    Czk,
    Eur,
    Skk,
    Usd,
    /// The source field was explicitly empty. Not an error.
    Undefined,
}

/// Raised when a non-empty source string matches no known currency form.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown currency: {0}")]
pub struct CurrencyError(pub String);

impl Currency {
    /// Parses a source-feed currency cell.
    ///
    /// An empty (or whitespace-only) cell maps to [`Currency::Undefined`] —
    /// upstream data legitimately omits the currency on some rows.
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyError`] for any non-empty string outside the lookup
    /// table. Callers that must not abort a whole row are expected to catch
    /// this and fall back to `Undefined` with a scrap note.
    pub fn parse(source: &str) -> Result<Self, CurrencyError> {
        let trimmed = source.trim();
        if trimmed.is_empty() {
            return Ok(Self::Undefined);
        }
        match trimmed {
            "CZK" | "Kč" | "Kc" => Ok(Self::Czk),
            "EUR" | "Eur" | "eur" | "€" => Ok(Self::Eur),
            "SKK" | "Skk" | "Sk" => Ok(Self::Skk),
            "USD" | "$" => Ok(Self::Usd),
            other => Err(CurrencyError(other.to_owned())),
        }
    }

    /// Canonical code used in serialized output.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Czk => "CZK",
            Self::Eur => "EUR",
            Self::Skk => "SKK",
            Self::Usd => "USD",
            Self::Undefined => "UNDEFINED",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
