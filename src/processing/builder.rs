//! Range Table Builder.

use crate::error::{Result, TableError};
use crate::models::{parse_cidr, AnnotatedEntry, Range};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Tokens this many characters long or shorter are not parsed.
pub const SHORT_TOKEN_MAX_LEN: usize = 3;

/// What to do with tokens of [`SHORT_TOKEN_MAX_LEN`] characters or fewer.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ShortTokenPolicy {
    /// Drop the token, emit nothing for it.
    #[default]
    SkipShortTokens,
    /// Re-emit the previous range labelled with the short token.
    ///
    /// Matches tables produced by the old generator script, where a blank
    /// trailing token duplicated the last entry. Only useful when output must
    /// stay byte-identical to those tables.
    ReproduceLegacyBug,
}

impl FromStr for ShortTokenPolicy {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "skip" | "skip_short_tokens" => Ok(ShortTokenPolicy::SkipShortTokens),
            "legacy" | "reproduce_legacy_bug" => Ok(ShortTokenPolicy::ReproduceLegacyBug),
            other => Err(TableError::InvalidConfig(format!(
                "unknown short token policy '{other}', expected 'skip' or 'legacy'"
            ))),
        }
    }
}

/// Split a raw Range Source blob into candidate CIDR tokens.
pub fn split_tokens(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Builds the ordered range table from CIDR tokens.
#[derive(Debug, Default, Clone, Copy)]
pub struct RangeTableBuilder {
    policy: ShortTokenPolicy,
}

impl RangeTableBuilder {
    pub fn new(policy: ShortTokenPolicy) -> Self {
        RangeTableBuilder { policy }
    }

    /// Parse every admitted token, in input order.
    ///
    /// The first malformed token aborts the whole build; no partial table is returned.
    pub fn build<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Vec<AnnotatedEntry>> {
        let mut entries = Vec::with_capacity(tokens.len());
        let mut last: Option<Range> = None;

        for token in tokens {
            let token = token.as_ref();
            if token.chars().count() <= SHORT_TOKEN_MAX_LEN {
                match (self.policy, last) {
                    (ShortTokenPolicy::ReproduceLegacyBug, Some(range)) => {
                        log::warn!(
                            "Short token {:?} re-emits previous range {}",
                            token,
                            range.to_string().yellow()
                        );
                        entries.push(AnnotatedEntry::new(range, token));
                    }
                    _ => log::debug!("Skipping short token {:?}", token),
                }
                continue;
            }

            let range = parse_cidr(token).map_err(|e| {
                log::error!("{} {}", "Aborting build:".on_red(), e);
                e
            })?;
            log::trace!("{token} -> {range}");
            last = Some(range);
            entries.push(AnnotatedEntry::new(range, token));
        }

        log::debug!(
            "Built {} entries from {} tokens",
            entries.len(),
            tokens.len()
        );
        Ok(entries)
    }
}
