// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Tunables for the pipeline.

/// HL7 v3 RoleCode system URI.
pub const V3_ROLE_CODE_URI: &str = "http://terminology.hl7.org/CodeSystem/v3-RoleCode";
/// HL7 v3 RoleCode system OID.
pub const V3_ROLE_CODE_OID: &str = "urn:oid:2.16.840.1.113883.5.111";
/// SNOMED CT system URI.
pub const SNOMED_CT_URI: &str = "http://snomed.info/sct";
/// SNOMED CT system OID.
pub const SNOMED_CT_OID: &str = "urn:oid:2.16.840.1.113883.6.96";

/// Complete pipeline configuration.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PedigreeConfig {
    /// Horizontal layout settings.
    pub layout: LayoutConfig,
    /// Recognized coding systems.
    pub coding: CodingConfig,
}

/// Horizontal layout settings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutConfig {
    /// Total spread of a multi-node rank row, centered on zero.
    pub spacing: f64,
    /// Rows pre-allocated in the order table even when empty.
    pub min_rank_rows: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            spacing: 24.0,
            min_rank_rows: 5,
        }
    }
}

/// Coding systems the normalizer understands.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CodingConfig {
    /// System ids treated as the kinship vocabulary (HL7 v3 RoleCode).
    pub kinship_systems: Vec<String>,
    /// System ids treated as the clinical role vocabulary (SNOMED CT).
    pub role_systems: Vec<String>,
}

impl Default for CodingConfig {
    fn default() -> Self {
        Self {
            kinship_systems: vec![V3_ROLE_CODE_URI.to_owned(), V3_ROLE_CODE_OID.to_owned()],
            role_systems: vec![SNOMED_CT_URI.to_owned(), SNOMED_CT_OID.to_owned()],
        }
    }
}
