//! Grounding validator - forces untrusted classifier output into the taxonomy.
//!
//! Each raw field is resolved independently:
//!
//! 1. normalize (trim, lowercase) and compact (drop everything that is not
//!    alphanumeric)
//! 2. exact match against the compact member names
//! 3. tolerant match: alias table, then word containment, then (for
//!    single-word values) the four-character stem rule
//! 4. otherwise the registry default for the category
//!
//! The validator is total: any input, however malformed, produces a
//! [`ValidatedClassification`] whose fields are members of the closed sets.

use crate::classifier::RawClassification;
use crate::taxonomy::{ActionType, Category, Department, Member, Severity, TaxonomyRegistry};
use serde::Serialize;
use std::sync::Arc;

/// Minimum length of a member's compact name for it to take part in the
/// stem rule; also the stem length.
const STEM_LEN: usize = 4;

/// Words that cancel the member named right after them.
const NEGATIONS: &[&str] = &["not", "no", "non", "never"];

/// Tokens shorter than this only match in running text when written without
/// lowercase letters ("IT", "HR", "P1"), so "it" and "hr" in prose do not.
const SHORT_TOKEN_LEN: usize = 3;

/// How a single field was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// The raw value is a member name (case and punctuation aside).
    Exact,
    /// Matched through the alias table or by naming exactly one member.
    Alias,
    /// Repaired by the stem rule; treated as ungrounded.
    Corrected,
    /// No match; the registry default was substituted.
    Defaulted,
}

impl MatchKind {
    /// Whether a field resolved this way counts as grounded.
    pub fn is_grounded(&self) -> bool {
        matches!(self, MatchKind::Exact | MatchKind::Alias)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Exact => "exact",
            MatchKind::Alias => "alias",
            MatchKind::Corrected => "corrected",
            MatchKind::Defaulted => "defaulted",
        }
    }
}

/// Per-field resolution record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Provenance {
    pub department: MatchKind,
    pub severity: MatchKind,
    pub action: MatchKind,
}

impl Provenance {
    fn all(kind: MatchKind) -> Self {
        Self {
            department: kind,
            severity: kind,
            action: kind,
        }
    }

    /// Resolution of the given category.
    pub fn get(&self, category: Category) -> MatchKind {
        match category {
            Category::Department => self.department,
            Category::Severity => self.severity,
            Category::ActionType => self.action,
        }
    }
}

/// A classification whose every field is a taxonomy member.
///
/// Only [`GroundingValidator`] creates these; there are no setters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ValidatedClassification {
    department: Department,
    severity: Severity,
    action: ActionType,
    grounded: bool,
    provenance: Provenance,
    #[serde(skip_serializing_if = "String::is_empty")]
    rationale: String,
}

impl ValidatedClassification {
    pub fn department(&self) -> Department {
        self.department
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn action(&self) -> ActionType {
        self.action
    }

    /// True only if every field matched exactly or through an alias.
    pub fn grounded(&self) -> bool {
        self.grounded
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    /// Classifier's explanation. Advisory; never consulted for routing.
    pub fn rationale(&self) -> &str {
        &self.rationale
    }
}

/// Total validator from [`RawClassification`] to [`ValidatedClassification`].
#[derive(Debug, Clone)]
pub struct GroundingValidator {
    registry: Arc<TaxonomyRegistry>,
}

impl GroundingValidator {
    pub fn new(registry: Arc<TaxonomyRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<TaxonomyRegistry> {
        &self.registry
    }

    /// Ground every field of a raw classification. Never fails.
    pub fn validate(&self, raw: &RawClassification) -> ValidatedClassification {
        let (department, department_kind) =
            self.ground_field::<Department>(&raw.department_raw);
        let (severity, severity_kind) = self.ground_field::<Severity>(&raw.severity_raw);
        let (action, action_kind) = self.ground_field::<ActionType>(&raw.action_raw);

        let provenance = Provenance {
            department: department_kind,
            severity: severity_kind,
            action: action_kind,
        };
        let grounded = Category::ALL
            .iter()
            .all(|c| provenance.get(*c).is_grounded());

        ValidatedClassification {
            department,
            severity,
            action,
            grounded,
            provenance,
            rationale: raw.rationale.trim().to_string(),
        }
    }

    /// All-default, explicitly ungrounded classification.
    ///
    /// Used by the boundary when the classifier failed outright and its
    /// policy routes the ticket anyway.
    pub fn degraded(&self) -> ValidatedClassification {
        ValidatedClassification {
            department: self.registry.default_department(),
            severity: self.registry.default_severity(),
            action: self.registry.default_action(),
            grounded: false,
            provenance: Provenance::all(MatchKind::Defaulted),
            rationale: String::new(),
        }
    }

    /// Resolve one field against the members of `M`.
    pub fn ground_field<M: Member>(&self, raw: &str) -> (M, MatchKind) {
        let (member, kind) = match resolve::<M>(raw) {
            Some(resolved) => resolved,
            None => (self.registry.fallback::<M>(), MatchKind::Defaulted),
        };

        if !kind.is_grounded() {
            tracing::debug!(
                category = %M::CATEGORY,
                raw = %raw,
                resolved = %member,
                kind = kind.as_str(),
                "classification field not grounded"
            );
            crate::metrics::record_grounding_miss(M::CATEGORY, kind);
        }

        (member, kind)
    }
}

/// Lowercase and keep only alphanumeric characters.
///
/// ```
/// use triage::grounding::compact;
///
/// assert_eq!(compact(" Human_Resources "), "humanresources");
/// assert_eq!(compact("Pass-to-RPA"), "passtorpa");
/// ```
pub fn compact(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Steps 2 and 3 of the grounding algorithm. `None` means unmatched.
fn resolve<M: Member>(raw: &str) -> Option<(M, MatchKind)> {
    let key = compact(raw);
    if key.is_empty() {
        return None;
    }

    if let Some(member) = exact::<M>(&key) {
        return Some((member, MatchKind::Exact));
    }
    if let Some(member) = alias::<M>(&key) {
        return Some((member, MatchKind::Alias));
    }
    if let Some(member) = contained::<M>(raw) {
        return Some((member, MatchKind::Alias));
    }
    if is_single_word(raw) {
        return stem::<M>(&key).map(|member| (member, MatchKind::Corrected));
    }
    None
}

fn exact<M: Member>(key: &str) -> Option<M> {
    M::ALL
        .iter()
        .copied()
        .find(|m| compact(m.as_str()) == key)
}

fn alias<M: Member>(key: &str) -> Option<M> {
    M::aliases()
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, member)| *member)
}

/// Match a single token (already compacted) against names and aliases.
/// `shouting` is whether the token was written without lowercase letters.
fn token_member<M: Member>(token: &str, shouting: bool) -> Option<M> {
    if token.chars().count() < SHORT_TOKEN_LEN && !shouting {
        return None;
    }
    exact::<M>(token).or_else(|| alias::<M>(token))
}

/// Word containment: the text names exactly one member, as a single word or
/// as a pair of adjacent words. A word directly after a negation ("not
/// critical", "non-urgent") names nothing.
fn contained<M: Member>(raw: &str) -> Option<M> {
    let words: Vec<&str> = raw
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    let negated: Vec<bool> = (0..words.len())
        .map(|i| i > 0 && is_negation(words[i - 1]))
        .collect();

    let mut found: Vec<M> = Vec::new();
    let mut note = |member: Option<M>| {
        if let Some(m) = member {
            if !found.contains(&m) {
                found.push(m);
            }
        }
    };

    for (i, word) in words.iter().enumerate() {
        if negated[i] {
            continue;
        }
        let shouting = !word.chars().any(|c| c.is_lowercase());
        note(token_member::<M>(&compact(word), shouting));
    }
    for (i, pair) in words.windows(2).enumerate() {
        if negated[i] || is_negation(pair[0]) {
            continue;
        }
        let joined = compact(&format!("{}{}", pair[0], pair[1]));
        note(token_member::<M>(&joined, true));
    }

    match found.as_slice() {
        [only] => Some(*only),
        _ => None,
    }
}

fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&compact(word).as_str())
}

fn is_single_word(raw: &str) -> bool {
    raw.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .count()
        == 1
}

/// Stem rule, single-word values only: the key starts with the first four
/// characters of exactly one member name. Members shorter than four
/// characters have no stem.
fn stem<M: Member>(key: &str) -> Option<M> {
    if key.chars().count() < STEM_LEN {
        return None;
    }

    let mut candidates = M::ALL.iter().copied().filter(|m| {
        let name = compact(m.as_str());
        name.len() >= STEM_LEN && key.starts_with(&name[..STEM_LEN])
    });

    match (candidates.next(), candidates.next()) {
        (Some(member), None) => Some(member),
        _ => None,
    }
}
