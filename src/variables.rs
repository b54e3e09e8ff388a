//! Placeholder token resolution.
//! Builds the immutable token → value map applied to file contents and names,
//! together with the order in which tokens must be substituted.

use indexmap::IndexMap;
use log::debug;
use regex::{Captures, Regex};

use crate::constants::{
    TOKEN_BARE, TOKEN_BIN, TOKEN_BIN_LOWER, TOKEN_DESCRIPTION, TOKEN_NAME,
    TOKEN_PRIMARY_EMAIL, TOKEN_SECONDARY_EMAIL, TOKEN_USER,
};
use crate::error::{Error, Result};

/// Raw values supplied by the configuration sources. Any of them may be absent;
/// resolution decides which ones are required.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExternalValues {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub primary_email: Option<String>,
    pub secondary_email: Option<String>,
    pub description: Option<String>,
}

fn required<'a>(value: &'a Option<String>, what: &str) -> Result<&'a str> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::ConfigResolutionError(format!("missing {what}"))),
    }
}

impl ExternalValues {
    /// Lowercase repository name used for binaries and icon file names.
    pub fn binary_name(&self) -> Result<String> {
        Ok(required(&self.repo, "repository name (git remote)")?.to_lowercase())
    }
}

/// Token → value mapping with a total substitution order.
///
/// Tokens are ordered longest first so that a token contained in another one
/// (`CHANGEME` inside `CHANGEME_BIN`) never consumes part of the longer token.
/// Tokens of equal length keep their declared order.
///
/// Substitution is a single left-to-right scan: at each position the first
/// token in that order wins, and the inserted value is never scanned again.
#[derive(Debug, Clone)]
pub struct VariableMap {
    values: IndexMap<String, String>,
    order: Vec<usize>,
    pattern: Regex,
}

impl VariableMap {
    /// Builds a map from `(token, value)` pairs in declared order.
    ///
    /// # Errors
    /// * `Error::ConfigResolutionError` if a token is empty
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut values: IndexMap<String, String> = IndexMap::new();
        for (token, value) in pairs {
            let token = token.into();
            if token.is_empty() {
                return Err(Error::ConfigResolutionError("empty placeholder token".to_string()));
            }
            values.insert(token, value.into());
        }

        let mut order: Vec<usize> = (0..values.len()).collect();
        // sort_by_key is stable, equal lengths stay in declared order
        order.sort_by_key(|&i| std::cmp::Reverse(token_len(&values, i)));

        // regex alternation is leftmost-first, so the order above decides overlaps
        let alternation = order
            .iter()
            .filter_map(|&i| values.get_index(i))
            .map(|(token, _)| regex::escape(token))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&alternation).map_err(|e| {
            Error::ConfigResolutionError(format!("cannot build token matcher: {e}"))
        })?;

        Ok(Self { values, order, pattern })
    }

    /// Resolves the full map used when instantiating the template.
    ///
    /// # Errors
    /// * `Error::ConfigResolutionError` if any external value is absent
    pub fn resolve(external: &ExternalValues) -> Result<Self> {
        let owner = required(&external.owner, "repository owner (git remote)")?;
        let repo = required(&external.repo, "repository name (git remote)")?;
        let binary = external.binary_name()?;
        let primary_email = required(&external.primary_email, "primary email (PMAIL)")?;
        let secondary_email = required(&external.secondary_email, "secondary email (SMAIL)")?;
        let description = required(&external.description, "description (DESC)")?;

        debug!("Resolved owner '{}', repository '{}', binary '{}'", owner, repo, binary);

        Self::from_pairs([
            (TOKEN_USER, owner.to_string()),
            (TOKEN_NAME, repo.to_string()),
            (TOKEN_BIN, binary.clone()),
            (TOKEN_BIN_LOWER, binary),
            (TOKEN_PRIMARY_EMAIL, primary_email.to_string()),
            (TOKEN_SECONDARY_EMAIL, secondary_email.to_string()),
            (TOKEN_DESCRIPTION, description.to_string()),
            (TOKEN_BARE, repo.to_string()),
        ])
    }

    /// Resolves a map holding only the description token.
    pub fn description_only(external: &ExternalValues) -> Result<Self> {
        let description = required(&external.description, "description (DESC)")?;
        Self::from_pairs([(TOKEN_DESCRIPTION, description)])
    }

    /// Tokens with their values, in substitution order.
    pub fn ordered(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.order
            .iter()
            .filter_map(move |&i| self.values.get_index(i))
            .map(|(token, value)| (token.as_str(), value.as_str()))
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.values.get(token).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether `text` contains at least one token.
    pub fn matches(&self, text: &str) -> bool {
        self.values.keys().any(|token| text.contains(token.as_str()))
    }

    /// Literal replacement of every token occurrence in one pass.
    ///
    /// # Arguments
    /// * `text` - File content or base name to substitute
    ///
    /// # Returns
    /// * `String` - `text` with every token replaced by its value
    pub fn apply(&self, text: &str) -> String {
        if self.values.is_empty() {
            return text.to_string();
        }
        self.pattern
            .replace_all(text, |caps: &Captures| {
                self.values.get(&caps[0]).cloned().unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}

fn token_len(values: &IndexMap<String, String>, i: usize) -> usize {
    values.get_index(i).map(|(token, _)| token.len()).unwrap_or(0)
}
