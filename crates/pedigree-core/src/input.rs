// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Input records handed over by the bundle parser.
//!
//! The parser that walks clinical bundles is responsible for resolving every
//! relationship statement to a pair of external person ids. This module only
//! describes the resolved shape and checks it for structural damage before a
//! build starts.

use rustc_hash::FxHashMap;

use crate::error::InputError;

/// Administrative sex of a person.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Sex {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Not recorded, or any value the bundle parser could not map.
    #[default]
    #[cfg_attr(feature = "serde", serde(other))]
    Unknown,
}

/// One entry of the person registry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PersonRecord {
    /// Stable identifier of the person in the source bundle.
    pub external_id: String,
    /// Administrative sex.
    #[cfg_attr(feature = "serde", serde(default))]
    pub sex: Sex,
    /// Given name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub given_name: String,
    /// Family name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub family_name: String,
    /// Birth date exactly as recorded, if any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub birth_date: Option<String>,
}

impl PersonRecord {
    /// Creates a record with the given id and sex and empty names.
    pub fn new(external_id: impl Into<String>, sex: Sex) -> Self {
        Self {
            external_id: external_id.into(),
            sex,
            ..Self::default()
        }
    }

    /// Sets given and family name.
    pub fn with_name(mut self, given: impl Into<String>, family: impl Into<String>) -> Self {
        self.given_name = given.into();
        self.family_name = family.into();
        self
    }

    /// Sets the birth date.
    pub fn with_birth_date(mut self, date: impl Into<String>) -> Self {
        self.birth_date = Some(date.into());
        self
    }
}

/// A single code from some coding system.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coding {
    /// Coding system URI (or OID URN).
    pub system: String,
    /// Code within `system`.
    pub code: String,
}

impl Coding {
    /// Creates a coding.
    pub fn new(system: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            code: code.into(),
        }
    }
}

/// A relationship statement: `target` is the `relationship_coding` of `subject`.
///
/// `Mother(C, A)` reads "the mother of C is A".
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RelationshipRecord {
    /// External id of the person the statement is about.
    pub subject_external_id: String,
    /// All codings attached to the statement, in source order.
    pub relationship_coding: Vec<Coding>,
    /// External id of the related person.
    pub target_external_id: String,
}

impl RelationshipRecord {
    /// Creates a relationship carrying a single coding.
    pub fn new(subject: impl Into<String>, coding: Coding, target: impl Into<String>) -> Self {
        Self {
            subject_external_id: subject.into(),
            relationship_coding: vec![coding],
            target_external_id: target.into(),
        }
    }
}

/// Which end of a relationship statement is meant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    /// The subject id.
    Subject,
    /// The target id.
    Target,
    /// Both ids.
    Both,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Subject => "subject",
            Self::Target => "target",
            Self::Both => "subject and target",
        })
    }
}

/// Complete input of one build: registry plus relationship list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PedigreeInput {
    /// Person registry. Iteration order fixes person node ids.
    #[cfg_attr(feature = "serde", serde(default))]
    pub persons: Vec<PersonRecord>,
    /// Relationship statements in source order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub relationships: Vec<RelationshipRecord>,
}

impl PedigreeInput {
    /// Checks the payload for structural violations and reports the first one.
    ///
    /// Dangling references are *not* structural violations; they are dropped
    /// later and reported as anomalies.
    pub fn validate(&self) -> Result<(), InputError> {
        let mut seen: FxHashMap<&str, usize> = FxHashMap::default();
        for (index, person) in self.persons.iter().enumerate() {
            let id = person.external_id.trim();
            if id.is_empty() {
                return Err(InputError::EmptyPersonId { index });
            }
            if let Some(&first) = seen.get(id) {
                return Err(InputError::DuplicatePersonId {
                    id: id.to_owned(),
                    first,
                    second: index,
                });
            }
            seen.insert(id, index);
        }

        for (index, rel) in self.relationships.iter().enumerate() {
            let subject_empty = rel.subject_external_id.trim().is_empty();
            let target_empty = rel.target_external_id.trim().is_empty();
            let side = match (subject_empty, target_empty) {
                (true, true) => Some(Side::Both),
                (true, false) => Some(Side::Subject),
                (false, true) => Some(Side::Target),
                (false, false) => None,
            };
            if let Some(side) = side {
                return Err(InputError::EmptyReference { index, side });
            }
            if rel.relationship_coding.is_empty() {
                return Err(InputError::MissingCoding { index });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(subject: &str, target: &str) -> RelationshipRecord {
        RelationshipRecord::new(subject, Coding::new("urn:test", "X"), target)
    }

    #[test]
    fn empty_input_is_valid() {
        assert_eq!(PedigreeInput::default().validate(), Ok(()));
    }

    #[test]
    fn duplicate_person_ids_name_both_indices() {
        let input = PedigreeInput {
            persons: vec![
                PersonRecord::new("a", Sex::Female),
                PersonRecord::new("b", Sex::Male),
                PersonRecord::new("a", Sex::Male),
            ],
            relationships: vec![],
        };
        assert_eq!(
            input.validate(),
            Err(InputError::DuplicatePersonId {
                id: "a".into(),
                first: 0,
                second: 2,
            })
        );
    }

    #[test]
    fn blank_person_id_is_rejected() {
        let input = PedigreeInput {
            persons: vec![PersonRecord::new("a", Sex::Female), PersonRecord::new("  ", Sex::Male)],
            relationships: vec![],
        };
        assert_eq!(input.validate(), Err(InputError::EmptyPersonId { index: 1 }));
    }

    #[test]
    fn first_structural_violation_wins() {
        let mut missing = rel("a", "b");
        missing.relationship_coding.clear();
        let input = PedigreeInput {
            persons: vec![PersonRecord::new("a", Sex::Female)],
            relationships: vec![rel("a", "zzz"), missing, rel("", "")],
        };
        assert_eq!(input.validate(), Err(InputError::MissingCoding { index: 1 }));
    }

    #[test]
    fn empty_reference_reports_side() {
        let input = PedigreeInput {
            persons: vec![],
            relationships: vec![rel("a", " ")],
        };
        assert_eq!(
            input.validate(),
            Err(InputError::EmptyReference {
                index: 0,
                side: Side::Target,
            })
        );
    }
}
