//! Fields that hold either a bare identifier or the expanded record.
//!
//! The backend expands references depending on the endpoint, so the same
//! field can arrive as `"goal-1"` or as `{ "id": "goal-1", ... }`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::Identifier;

const PLACEHOLDER_ID_CHARS: usize = 8;

/// A record that can be looked up by id and shown by label.
pub trait Record {
    fn id(&self) -> &str;
    fn label(&self) -> &str;
}

/// Either an identifier or the record it names.
///
/// An expanded record's own id is the id the bare form would have held.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference<T> {
    Id(Identifier),
    Expanded(T),
}

impl<T: Record> Reference<T> {
    /// The identifier of the referenced record, whichever form it is in.
    pub fn id(&self) -> &str {
        match self {
            Reference::Id(id) => id,
            Reference::Expanded(record) => record.id(),
        }
    }
}

/// Where a resolved label came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// The reference carried the record itself
    Expanded,
    /// Found among the known records
    Known,
    /// Id with no matching record; label is a placeholder
    Placeholder,
}

/// A reference reduced to what a view needs to display and link it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRef {
    pub id: Identifier,
    pub label: String,
    pub origin: Origin,
}

impl ResolvedRef {
    pub fn is_placeholder(&self) -> bool {
        self.origin == Origin::Placeholder
    }
}

/// Resolve `reference` to an id and label, looking bare ids up in `known`.
///
/// Returns `None` only when there is no reference at all.
pub fn resolve<T: Record>(reference: Option<&Reference<T>>, known: &[T]) -> Option<ResolvedRef> {
    resolve_with(reference, known, |t| t.id(), |t| t.label())
}

/// Like [`resolve`], with explicit accessors for types that are not a
/// [`Record`] or need a different label.
pub fn resolve_with<T, I, L>(
    reference: Option<&Reference<T>>,
    known: &[T],
    id_of: I,
    label_of: L,
) -> Option<ResolvedRef>
where
    I: Fn(&T) -> &str,
    L: Fn(&T) -> &str,
{
    let resolved = match reference? {
        Reference::Expanded(record) => ResolvedRef {
            id: id_of(record).to_string(),
            label: label_of(record).to_string(),
            origin: Origin::Expanded,
        },
        Reference::Id(id) => match known.iter().find(|t| id_of(*t) == id.as_str()) {
            Some(record) => ResolvedRef {
                id: id.clone(),
                label: label_of(record).to_string(),
                origin: Origin::Known,
            },
            None => {
                debug!(id = %id, "reference not among known records, using placeholder");
                ResolvedRef {
                    id: id.clone(),
                    label: fallback_label(id),
                    origin: Origin::Placeholder,
                }
            }
        },
    };

    Some(resolved)
}

/// Resolve every entry of a reference list, keeping order.
pub fn resolve_all<T: Record>(references: &[Reference<T>], known: &[T]) -> Vec<ResolvedRef> {
    references
        .iter()
        .filter_map(|r| resolve(Some(r), known))
        .collect()
}

/// Deterministic label for an id with no known record, e.g. `#a1b2c3d4…`.
pub fn fallback_label(id: &str) -> String {
    let id = id.trim();
    if id.is_empty() {
        return "#unknown".to_string();
    }

    let mut chars = id.chars();
    let head: String = chars.by_ref().take(PLACEHOLDER_ID_CHARS).collect();
    if chars.next().is_some() {
        format!("#{}…", head)
    } else {
        format!("#{}", head)
    }
}
