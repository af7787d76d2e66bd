//! Insertion-ordered field sets and signed envelopes.
//!
//! Field order is semantically significant in this protocol: the canonical
//! signing string is built from the fields in their insertion order, so
//! [`FieldSet`] preserves order from construction through signing. A plain
//! `Vec` of pairs is the honest representation; no hashing, no reordering.

use std::fmt;

/// Protocol name of the signature entry appended to a signed envelope.
pub const SIGNATURE_FIELD: &str = "Signature";

/// Protocol name of the signed-fields entry appended to a signed envelope.
pub const SIGNED_FIELDS_FIELD: &str = "SignedFields";

/// An insertion-ordered mapping of string keys to string values.
///
/// [`insert`](Self::insert) follows associative-merge semantics: an existing
/// key is overridden in place (keeping its position), a new key appends at
/// the end. This ordering is observable through the canonical signing string
/// and must be preserved exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    entries: Vec<(String, String)>,
}

impl FieldSet {
    /// Creates an empty field set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`. An existing key keeps its position; a new key
    /// appends at the end.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Returns the value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Removes `key`, returning its value if it was present. The relative
    /// order of the remaining entries is unchanged.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Overlays `other` onto this set: for each entry of `other` in order,
    /// existing keys are overridden in place and new keys append at the end.
    pub fn overlay(&mut self, other: Self) {
        for (key, value) in other.entries {
            self.insert(key, value);
        }
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the set has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Joins the entries as `key=value,key=value` in insertion order, with
    /// no trailing separator. This is the fields term of the canonical
    /// signing strings.
    #[must_use]
    pub fn pairs_joined(&self) -> String {
        let mut out = String::new();
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(key);
            out.push('=');
            out.push_str(value);
        }
        out
    }

    /// Joins the keys as `key,key` in insertion order.
    #[must_use]
    pub fn keys_joined(&self) -> String {
        self.entries.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>().join(",")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Self::new();
        for (key, value) in iter {
            fields.insert(key, value);
        }
        fields
    }
}

impl IntoIterator for FieldSet {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// A finalized, signed payment request: the business fields plus the
/// appended `Signature` and `SignedFields` entries, and the hosted-page URL
/// the browser submits them to.
///
/// Rendering the envelope as a submittable form is the embedder's job; the
/// envelope only guarantees that the fields are complete and the signature
/// covers exactly the keys listed in `SignedFields`, in that order.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedEnvelope {
    action: String,
    fields: FieldSet,
}

impl SignedEnvelope {
    /// Wraps finalized fields. `fields` must already carry the `Signature`
    /// and `SignedFields` entries.
    #[must_use]
    pub fn new(action: String, fields: FieldSet) -> Self {
        Self { action, fields }
    }

    /// URL the fields are submitted to.
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// All fields, including `Signature` and `SignedFields`.
    #[must_use]
    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    /// The base64 HMAC signature entry.
    #[must_use]
    pub fn signature(&self) -> &str {
        self.fields.get(SIGNATURE_FIELD).unwrap_or_default()
    }

    /// The comma-joined list of keys that entered the signature, in the
    /// order signed.
    #[must_use]
    pub fn signed_fields(&self) -> &str {
        self.fields.get(SIGNED_FIELDS_FIELD).unwrap_or_default()
    }
}

impl fmt::Debug for SignedEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedEnvelope")
            .field("action", &self.action)
            .field("fields", &self.fields.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_preserves_order() {
        let mut fields = FieldSet::new();
        fields.insert("B", "2");
        fields.insert("A", "1");
        fields.insert("C", "3");
        assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_insert_overrides_in_place() {
        let mut fields = FieldSet::new();
        fields.insert("A", "1");
        fields.insert("B", "2");
        fields.insert("A", "9");
        assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(fields.get("A"), Some("9"));
    }

    #[test]
    fn test_overlay_merge_semantics() {
        let mut base: FieldSet = [("A", "1"), ("B", "2"), ("C", "3")].into_iter().collect();
        let extra: FieldSet = [("B", "override"), ("D", "new")].into_iter().collect();
        base.overlay(extra);

        // Override replaces in place, new key appends at the end.
        assert_eq!(base.keys().collect::<Vec<_>>(), vec!["A", "B", "C", "D"]);
        assert_eq!(base.get("B"), Some("override"));
        assert_eq!(base.get("D"), Some("new"));
    }

    #[test]
    fn test_pairs_joined_no_trailing_separator() {
        let fields: FieldSet = [("A", "1"), ("B", "2")].into_iter().collect();
        assert_eq!(fields.pairs_joined(), "A=1,B=2");
        assert_eq!(FieldSet::new().pairs_joined(), "");
    }

    #[test]
    fn test_pairs_joined_keeps_empty_values() {
        let fields: FieldSet = [("A", ""), ("B", "2")].into_iter().collect();
        assert_eq!(fields.pairs_joined(), "A=,B=2");
    }

    #[test]
    fn test_keys_joined() {
        let fields: FieldSet = [("A", "1"), ("B", "2"), ("C", "")].into_iter().collect();
        assert_eq!(fields.keys_joined(), "A,B,C");
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut fields: FieldSet = [("A", "1"), ("B", "2"), ("C", "3")].into_iter().collect();
        assert_eq!(fields.remove("B"), Some("2".to_owned()));
        assert_eq!(fields.remove("B"), None);
        assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["A", "C"]);
    }

    #[test]
    fn test_envelope_accessors() {
        let mut fields: FieldSet = [("Amount", "10.00")].into_iter().collect();
        fields.insert(SIGNATURE_FIELD, "c2ln");
        fields.insert(SIGNED_FIELDS_FIELD, "Amount");
        let envelope =
            SignedEnvelope::new("https://gateway.example.com/Payments/Request".to_owned(), fields);

        assert_eq!(envelope.signature(), "c2ln");
        assert_eq!(envelope.signed_fields(), "Amount");
        assert!(envelope.action().ends_with("/Payments/Request"));
    }
}
