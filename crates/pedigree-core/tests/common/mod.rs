// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(dead_code)]

use pedigree_core::config::{SNOMED_CT_URI, V3_ROLE_CODE_URI};
use pedigree_core::{
    build_pedigree, Coding, NodeId, Pedigree, PedigreeConfig, PedigreeInput, PersonRecord,
    RelationshipRecord, Sex,
};

/// Registry entry with a derived name.
pub fn person(id: &str, sex: Sex) -> PersonRecord {
    PersonRecord::new(id, sex).with_name(id.to_uppercase(), "Testfamily")
}

/// `target` is the `code` (HL7 v3 RoleCode) of `subject`.
pub fn kin(subject: &str, code: &str, target: &str) -> RelationshipRecord {
    RelationshipRecord::new(subject, Coding::new(V3_ROLE_CODE_URI, code), target)
}

/// `target` is the `code` (SNOMED CT) of `subject`.
pub fn role(subject: &str, code: &str, target: &str) -> RelationshipRecord {
    RelationshipRecord::new(subject, Coding::new(SNOMED_CT_URI, code), target)
}

pub fn mother(child: &str, mum: &str) -> RelationshipRecord {
    kin(child, "MTH", mum)
}

pub fn father(child: &str, dad: &str) -> RelationshipRecord {
    kin(child, "FTH", dad)
}

pub fn partner(a: &str, b: &str) -> RelationshipRecord {
    kin(a, "SPS", b)
}

pub fn input(persons: Vec<PersonRecord>, relationships: Vec<RelationshipRecord>) -> PedigreeInput {
    PedigreeInput {
        persons,
        relationships,
    }
}

/// Builds with the default config; malformed fixtures are a test bug.
pub fn build(input: &PedigreeInput) -> Pedigree {
    build_pedigree(input, &PedigreeConfig::default()).expect("fixture input must be well formed")
}

/// Node id of a person, by external id.
pub fn id(pedigree: &Pedigree, external_id: &str) -> NodeId {
    pedigree
        .person(external_id)
        .unwrap_or_else(|| panic!("no person {external_id}"))
}
