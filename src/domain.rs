use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::SheetError;

static MEASUREMENT_SET_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/measurement-sets/([^/]+)/").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnalysisSetId(String);

impl AnalysisSetId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnalysisSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AnalysisSetId {
    type Err = SheetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let is_valid =
            !trimmed.is_empty() && trimmed.chars().all(|ch| ch.is_ascii_alphanumeric());
        if !is_valid {
            return Err(SheetError::InvalidAnalysisSetId(value.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MeasurementSetId(String);

impl MeasurementSetId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn from_catalog_path(path: &str) -> Result<Self, SheetError> {
        MEASUREMENT_SET_PATH
            .captures(path)
            .and_then(|caps| caps.get(1))
            .map(|m| Self(m.as_str().to_string()))
            .ok_or_else(|| SheetError::MalformedIdentifier {
                kind: "measurement set",
                value: path.to_string(),
            })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MeasurementSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuxiliarySetId(String);

impl AuxiliarySetId {
    pub fn from_reference(reference: &str) -> Result<Self, SheetError> {
        let parts = reference.split('/').collect::<Vec<_>>();
        let malformed = || SheetError::MalformedIdentifier {
            kind: "auxiliary set",
            value: reference.to_string(),
        };
        if parts.len() < 2 {
            return Err(malformed());
        }
        let id = parts[parts.len() - 2].trim();
        if id.is_empty() {
            return Err(malformed());
        }
        Ok(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuxiliarySetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileModality {
    #[serde(rename = "scRNA")]
    ScRna,
    #[serde(rename = "gRNA")]
    GRna,
    #[serde(rename = "hash")]
    Hash,
}

impl FileModality {
    pub const AUXILIARY_ORDER: [FileModality; 2] = [FileModality::GRna, FileModality::Hash];

    pub fn as_str(&self) -> &'static str {
        match self {
            FileModality::ScRna => "scRNA",
            FileModality::GRna => "gRNA",
            FileModality::Hash => "hash",
        }
    }
}

impl fmt::Display for FileModality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReadType {
    R1,
    R2,
    Other(String),
}

impl From<&str> for ReadType {
    fn from(value: &str) -> Self {
        match value {
            "R1" => ReadType::R1,
            "R2" => ReadType::R2,
            other => ReadType::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Lane {
    Number(i64),
    Text(String),
}

impl From<&str> for Lane {
    fn from(value: &str) -> Self {
        let trimmed = value.trim();
        match trimmed.parse::<i64>() {
            Ok(number) => Lane::Number(number),
            Err(_) => Lane::Text(trimmed.to_string()),
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lane::Number(number) => write!(f, "{number}"),
            Lane::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisSetLink {
    pub analysis_set_id: AnalysisSetId,
    pub measurement_set_id: MeasurementSetId,
    pub associated_auxiliary_sets: Option<String>,
}

impl AnalysisSetLink {
    pub fn auxiliary_set_refs(&self) -> Vec<&str> {
        match &self.associated_auxiliary_sets {
            Some(value) => value.trim().split(',').map(str::trim).collect(),
            None => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceFileRecord {
    pub identifier: Option<String>,
    pub accession: Option<String>,
    pub read_type: Option<ReadType>,
    pub lane: Option<Lane>,
    pub md5sum: Option<String>,
    pub flowcell_id: Option<String>,
    pub seqspec_ref: Option<String>,
    pub measurement_set_id: MeasurementSetId,
    pub file_modality: FileModality,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanePair {
    pub r1_path: Option<String>,
    pub r1_md5sum: Option<String>,
    pub r2_path: Option<String>,
    pub r2_md5sum: Option<String>,
    pub measurement_set_id: MeasurementSetId,
    pub lane: Option<Lane>,
    pub file_modality: FileModality,
    pub flowcell_id: Option<String>,
    pub seqspec: Option<String>,
}
