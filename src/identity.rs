// 🪪 Identity Normalizer - canonical, comparison-ready developer identities
// Raw (name, email) pairs come straight from commit history and are messy:
// accents, punctuation, random casing, double spaces, several emails.

use crate::error::ResolveError;
use caseless::default_case_fold_str;
use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

// ============================================================================
// RAW IDENTITY
// ============================================================================

/// One (display name, email) pair as observed on a commit.
///
/// Field order matters: the derived `Ord` sorts by name, then email,
/// which is the order mined populations are stored in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RawIdentity {
    #[serde(rename = "name")]
    pub display_name: String,

    #[serde(rename = "email")]
    pub email: String,
}

impl RawIdentity {
    pub fn new(display_name: impl Into<String>, email: impl Into<String>) -> Self {
        RawIdentity {
            display_name: display_name.into(),
            email: email.into(),
        }
    }

    /// Local part of the email (before the first '@').
    ///
    /// Fails with `MalformedEmail` when there is no '@' at all; callers
    /// that only need a best-effort handle use `email_local_or_whole`.
    pub fn email_local(&self) -> Result<&str, ResolveError> {
        self.email
            .split_once('@')
            .map(|(local, _)| local)
            .ok_or_else(|| ResolveError::MalformedEmail(self.email.clone()))
    }

    /// Local part of the email, or the whole string when malformed
    pub fn email_local_or_whole(&self) -> &str {
        self.email_local().unwrap_or(&self.email)
    }

    pub fn has_malformed_email(&self) -> bool {
        self.email_local().is_err()
    }
}

impl<N: Into<String>, E: Into<String>> From<(N, E)> for RawIdentity {
    fn from((name, email): (N, E)) -> Self {
        RawIdentity::new(name, email)
    }
}

// ============================================================================
// NORMALIZED IDENTITY
// ============================================================================

/// Derived comparison form of a `RawIdentity`. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedIdentity {
    /// Lowercase, accent-free, punctuation-free, single-spaced name
    pub canonical_name: String,
    pub first: String,
    pub last: String,
    /// First char of `first`, only when `first` has 2+ chars
    pub first_initial: String,
    /// First char of `last`, only when `last` has 2+ chars
    pub last_initial: String,
    pub email_local: String,
}

/// Canonicalize one raw identity.
///
/// Steps, in order: strip ASCII punctuation, NFKD + drop combining marks,
/// full Unicode case fold, collapse whitespace, split into first/last, take initials.
/// The email local part is kept verbatim (no case folding).
pub fn normalize(raw: &RawIdentity) -> NormalizedIdentity {
    let canonical_name = canonicalize_name(&raw.display_name);
    let (first, last) = split_name(&canonical_name);

    NormalizedIdentity {
        first_initial: initial(&first),
        last_initial: initial(&last),
        email_local: raw.email_local_or_whole().to_string(),
        canonical_name,
        first,
        last,
    }
}

/// Name canonicalization on its own (also used by tests and reports)
pub fn canonicalize_name(name: &str) -> String {
    let without_punctuation: String = name
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();

    let without_accents: String = without_punctuation
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    default_case_fold_str(&without_accents)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a canonical name on its first space.
/// "a" → ("a", ""), "a b" → ("a", "b"), "a b c" → ("a", "b c")
fn split_name(canonical: &str) -> (String, String) {
    match canonical.split_once(' ') {
        Some((first, rest)) => (first.to_string(), rest.to_string()),
        None => (canonical.to_string(), String::new()),
    }
}

/// Single-letter tokens yield no initial, otherwise they would match everything
fn initial(part: &str) -> String {
    let mut chars = part.chars();
    match (chars.next(), chars.next()) {
        (Some(first), Some(_)) => first.to_string(),
        _ => String::new(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(name: &str, email: &str) -> NormalizedIdentity {
        normalize(&RawIdentity::new(name, email))
    }

    #[test]
    fn test_accents_case_and_initials() {
        let n = norm("Êrkkä ASImèrkki", "erkka.esimerkki@yritys.com");

        assert_eq!(n.canonical_name, "erkka asimerkki");
        assert_eq!(n.first, "erkka");
        assert_eq!(n.last, "asimerkki");
        assert_eq!(n.first_initial, "e");
        assert_eq!(n.last_initial, "a");
        assert_eq!(n.email_local, "erkka.esimerkki");
    }

    #[test]
    fn test_single_word_name() {
        let n = norm("Erkki", "erkkiesimerkki@yritys.com");

        assert_eq!(n.first, "erkki");
        assert_eq!(n.last, "");
        assert_eq!(n.first_initial, "e");
        assert_eq!(n.last_initial, "");
        assert_eq!(n.email_local, "erkkiesimerkki");
    }

    #[test]
    fn test_multiple_words_name() {
        let n = norm("Vaka Vanha Väinämöinen", "vaka@vanha.com");

        assert_eq!(n.canonical_name, "vaka vanha vainamoinen");
        assert_eq!(n.first, "vaka");
        assert_eq!(n.last, "vanha vainamoinen");
        assert_eq!(n.first_initial, "v");
        assert_eq!(n.last_initial, "v");
    }

    #[test]
    fn test_punctuation_and_whitespace() {
        let n = norm("  O'Brien,   J.-P.  ", "jp@x.org");

        assert_eq!(n.canonical_name, "obrien jp");
        assert_eq!(n.first, "obrien");
        assert_eq!(n.last, "jp");
    }

    #[test]
    fn test_single_letter_parts_have_no_initial() {
        let n = norm("E Esim", "e.esim@firma.fi");

        assert_eq!(n.first, "e");
        assert_eq!(n.first_initial, "");
        assert_eq!(n.last_initial, "e");
    }

    #[test]
    fn test_empty_name() {
        let n = norm("", "");
        assert_eq!(n, NormalizedIdentity::default());
    }

    #[test]
    fn test_email_kept_verbatim() {
        let n = norm("Maija", "Maija.M@Example.com");
        assert_eq!(n.email_local, "Maija.M");
    }

    #[test]
    fn test_malformed_email_falls_back_to_whole_string() {
        let raw = RawIdentity::new("Maija", "maija-at-example");

        assert!(raw.has_malformed_email());
        assert_eq!(
            raw.email_local(),
            Err(ResolveError::MalformedEmail("maija-at-example".to_string()))
        );
        assert_eq!(normalize(&raw).email_local, "maija-at-example");
    }

    #[test]
    fn test_sharp_s_folds_to_ss() {
        assert_eq!(canonicalize_name("Jürgen Weiß"), "jurgen weiss");

        let n = norm("Jürgen Weiß", "jw@a.de");
        assert_eq!(n.last, "weiss");
        assert_eq!(n.last_initial, "w");
    }

    #[test]
    fn test_greek_sigmas_fold_alike() {
        assert_eq!(canonicalize_name("ΟΔΥΣΣΕΥΣ"), "οδυσσευσ");
        assert_eq!(canonicalize_name("Οδυσσεύς"), "οδυσσευσ");
    }

    #[test]
    fn test_canonical_name_is_idempotent() {
        let once = canonicalize_name("Jöhn  Q. PUBLIC");
        assert_eq!(once, "john q public");
        assert_eq!(canonicalize_name(&once), once);
    }
}
