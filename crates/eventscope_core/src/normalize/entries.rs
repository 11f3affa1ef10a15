//! Participant strings such as `角色:报警人|姓名:张三|电话:138...;姓名:李四`.
//!
//! # Grammar
//! - `;` separates entries; blank entries are skipped.
//! - `|` separates pieces inside one entry; blank pieces are skipped.
//! - A piece carries a field when it contains a label marker from the active
//!   [`LabelSet`]; the value is the trimmed text after the first marker.
//!
//! # Invariants
//! - Entry order follows the source string; entry 0 is the primary one.
//! - Unknown pieces are dropped, never reported.
//! - Labels may appear in any order; a repeated label keeps its last value.
//! - A label with an empty value sets nothing.

use serde::Serialize;

const ENTRY_SEPARATOR: char = ';';
const FIELD_SEPARATOR: char = '|';

/// Fields a participant entry can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryField {
    Role,
    Name,
    Phone,
    IdCard,
}

/// Maps one marker substring onto a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label {
    pub marker: &'static str,
    pub field: EntryField,
}

impl Label {
    /// Marker text without the trailing colon, used for display.
    pub fn title(&self) -> &'static str {
        self.marker.trim_end_matches(':')
    }
}

/// Label dispatch table for one kind of participant string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelSet {
    pub name: &'static str,
    pub labels: &'static [Label],
    /// Role every entry has when the string itself carries none.
    pub implied_role: Option<&'static str>,
}

const CALLER_TABLE: &[Label] = &[
    Label {
        marker: "姓名:",
        field: EntryField::Name,
    },
    Label {
        marker: "电话:",
        field: EntryField::Phone,
    },
    Label {
        marker: "身份证:",
        field: EntryField::IdCard,
    },
];

const PARTY_TABLE: &[Label] = &[
    Label {
        marker: "角色:",
        field: EntryField::Role,
    },
    Label {
        marker: "姓名:",
        field: EntryField::Name,
    },
    Label {
        marker: "电话:",
        field: EntryField::Phone,
    },
    Label {
        marker: "身份证:",
        field: EntryField::IdCard,
    },
];

/// `报警人信息`: reporting callers, all with the implied role `报警人`.
pub const CALLER_LABELS: LabelSet = LabelSet {
    name: "caller",
    labels: CALLER_TABLE,
    implied_role: Some("报警人"),
};

/// `当事人信息`: involved parties, each with its own role.
pub const PARTY_LABELS: LabelSet = LabelSet {
    name: "party",
    labels: PARTY_TABLE,
    implied_role: None,
};

/// One parsed participant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SemiStructuredEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_card: Option<String>,
}

impl SemiStructuredEntry {
    pub fn get(&self, field: EntryField) -> Option<&str> {
        match field {
            EntryField::Role => self.role.as_deref(),
            EntryField::Name => self.name.as_deref(),
            EntryField::Phone => self.phone.as_deref(),
            EntryField::IdCard => self.id_card.as_deref(),
        }
    }

    fn slot(&mut self, field: EntryField) -> &mut Option<String> {
        match field {
            EntryField::Role => &mut self.role,
            EntryField::Name => &mut self.name,
            EntryField::Phone => &mut self.phone,
            EntryField::IdCard => &mut self.id_card,
        }
    }
}

impl LabelSet {
    /// Parses a raw participant string; `None` or blank input yields no entries.
    pub fn parse(&self, raw: Option<&str>) -> Vec<SemiStructuredEntry> {
        raw.map(|raw| parse_entries(raw, self)).unwrap_or_default()
    }

    /// Explicit role, falling back to this set's implied role.
    pub fn role_of<'a>(&self, entry: &'a SemiStructuredEntry) -> Option<&'a str> {
        entry.role.as_deref().or(self.implied_role)
    }

    /// Renders `title: value` pairs in table order, joined with ` | `.
    pub fn display(&self, entry: &SemiStructuredEntry) -> String {
        self.labels
            .iter()
            .filter_map(|label| {
                entry
                    .get(label.field)
                    .map(|value| format!("{}: {value}", label.title()))
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }

    fn dispatch<'p>(&self, piece: &'p str) -> Option<(EntryField, &'p str)> {
        self.labels.iter().find_map(|label| {
            piece
                .find(label.marker)
                .map(|at| (label.field, piece[at + label.marker.len()..].trim()))
        })
    }
}

/// Splits `raw` into entries, each a list of trimmed non-blank pieces.
fn tokenize(raw: &str) -> impl Iterator<Item = Vec<&str>> {
    raw.split(ENTRY_SEPARATOR)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry
                .split(FIELD_SEPARATOR)
                .map(str::trim)
                .filter(|piece| !piece.is_empty())
                .collect()
        })
}

/// Parses every entry of `raw` with the given label table.
pub fn parse_entries(raw: &str, labels: &LabelSet) -> Vec<SemiStructuredEntry> {
    tokenize(raw)
        .map(|pieces| {
            let mut entry = SemiStructuredEntry::default();
            for piece in pieces {
                match labels.dispatch(piece) {
                    Some((field, value)) if !value.is_empty() => {
                        *entry.slot(field) = Some(value.to_string());
                    }
                    _ => {}
                }
            }
            entry
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{tokenize, CALLER_LABELS, PARTY_LABELS};

    #[test]
    fn tokenize_skips_blank_entries_and_pieces() {
        let tokens: Vec<Vec<&str>> = tokenize(" a | b ;; | c ;").collect();
        assert_eq!(tokens, vec![vec!["a", "b"], vec!["c"]]);
    }

    #[test]
    fn dispatch_uses_table_order_for_first_match() {
        let hit = PARTY_LABELS.dispatch("角色:姓名:x");
        assert_eq!(hit.map(|(_, value)| value), Some("姓名:x"));
    }

    #[test]
    fn caller_table_ignores_role_marker() {
        assert!(CALLER_LABELS.dispatch("角色:报警人").is_none());
    }
}
