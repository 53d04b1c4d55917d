// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Relationship normalizer.
//!
//! Folds the coded relationship terms of a statement into one
//! [`RelationshipKind`]. Two vocabularies are understood:
//!
//! - the kinship vocabulary (HL7 v3 RoleCode: `MTH`, `FTH`, `SPS`, ...),
//! - the clinical role vocabulary (SNOMED CT concept ids).
//!
//! Child codes (`SON`, `DAU`, SNOMED "child", ...) describe the same link as a
//! parent code read in the other direction. They classify as
//! [`RelationshipKind::Parent`] with [`Orientation::Inverse`] and the caller
//! swaps subject and target.

use crate::config::CodingConfig;
use crate::input::Coding;

/// Canonical relationship kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RelationshipKind {
    /// Target is the mother of subject.
    Mother,
    /// Target is the father of subject.
    Father,
    /// Target is a parent of subject, sex unspecified.
    Parent,
    /// Subject and target are partners.
    Partner,
    /// Nothing recognizable.
    Unknown,
}

impl RelationshipKind {
    /// True for `Mother`, `Father` and `Parent`.
    pub fn is_parental(self) -> bool {
        matches!(self, Self::Mother | Self::Father | Self::Parent)
    }
}

/// Direction in which a classified code reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Target relates to subject as stated by the kind.
    #[default]
    AsStated,
    /// Subject relates to target as stated by the kind.
    Inverse,
}

/// Result of classifying a statement's codings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classification {
    /// Canonical kind.
    pub kind: RelationshipKind,
    /// Reading direction of `kind`.
    pub orientation: Orientation,
    /// The code that decided the classification (or the first code, for `Unknown`).
    pub code: String,
}

#[derive(Clone, Copy)]
enum Vocabulary {
    Kinship,
    Role,
}

/// Maps codings onto [`RelationshipKind`]s using a configured set of systems.
#[derive(Clone, Debug, Default)]
pub struct Normalizer {
    kinship_systems: Vec<String>,
    role_systems: Vec<String>,
}

impl Normalizer {
    /// Creates a normalizer recognizing the systems named in `config`.
    pub fn new(config: &CodingConfig) -> Self {
        Self {
            kinship_systems: config.kinship_systems.clone(),
            role_systems: config.role_systems.clone(),
        }
    }

    /// Returns only the kind of [`Normalizer::classify`].
    pub fn normalize(&self, codings: &[Coding]) -> RelationshipKind {
        self.classify(codings).kind
    }

    /// Classifies a statement.
    ///
    /// Kinship codings are consulted before role codings; within a vocabulary
    /// the first recognized coding wins. Never fails: anything unrecognized
    /// yields `Unknown` tagged with the first code verbatim.
    pub fn classify(&self, codings: &[Coding]) -> Classification {
        for vocabulary in [Vocabulary::Kinship, Vocabulary::Role] {
            for coding in codings {
                if !self.belongs_to(vocabulary, &coding.system) {
                    continue;
                }
                let code = coding.code.trim();
                let found = match vocabulary {
                    Vocabulary::Kinship => kinship_lookup(code),
                    Vocabulary::Role => role_lookup(code),
                };
                if let Some((kind, orientation)) = found {
                    return Classification {
                        kind,
                        orientation,
                        code: code.to_owned(),
                    };
                }
            }
        }

        Classification {
            kind: RelationshipKind::Unknown,
            orientation: Orientation::AsStated,
            code: codings.first().map(|c| c.code.clone()).unwrap_or_default(),
        }
    }

    fn belongs_to(&self, vocabulary: Vocabulary, system: &str) -> bool {
        let systems = match vocabulary {
            Vocabulary::Kinship => &self.kinship_systems,
            Vocabulary::Role => &self.role_systems,
        };
        systems.iter().any(|s| s == system.trim())
    }
}

/// HL7 v3 RoleCode family-member codes. Matching ignores ASCII case.
fn kinship_lookup(code: &str) -> Option<(RelationshipKind, Orientation)> {
    use Orientation::{AsStated, Inverse};
    use RelationshipKind::{Father, Mother, Parent, Partner};

    let hit = match code.to_ascii_uppercase().as_str() {
        "MTH" | "NMTH" | "BMTH" | "ADOPTMTH" | "STPMTH" => (Mother, AsStated),
        "FTH" | "NFTH" | "BFTH" | "ADOPTFTH" | "STPFTH" => (Father, AsStated),
        "PRN" | "NPRN" | "BPRN" | "ADOPTP" | "STPPRN" => (Parent, AsStated),
        "SPS" | "HUSB" | "WIFE" | "DOMPART" | "SIGOTHR" => (Partner, AsStated),
        "CHILD" | "NCHILD" | "SON" | "DAU" | "SONC" | "DAUC" | "CHLDADOPT" | "SONADOPT"
        | "DAUADOPT" => (Parent, Inverse),
        _ => return None,
    };
    Some(hit)
}

/// SNOMED CT person-in-family concepts.
fn role_lookup(code: &str) -> Option<(RelationshipKind, Orientation)> {
    use Orientation::{AsStated, Inverse};
    use RelationshipKind::{Father, Mother, Parent, Partner};

    let hit = match code {
        "72705000" => (Mother, AsStated),
        "66839005" => (Father, AsStated),
        "40683002" => (Parent, AsStated),
        "127848009" => (Partner, AsStated),
        "67822003" | "113160008" | "66089001" => (Parent, Inverse),
        _ => return None,
    };
    Some(hit)
}
