use reqwest::Url;
use url::form_urlencoded;

use crate::domain::{AnalysisSetId, AuxiliarySetId, MeasurementSetId};
use crate::error::SheetError;

pub const DEFAULT_ENDPOINT: &str = "https://api.data.igvf.org";

const REPORT_PATH: &str = "multireport.tsv";

const MEASUREMENT_SET_FIELDS: &[&str] = &["@id", "auxiliary_sets", "input_for"];

const MEASUREMENT_FILE_FIELDS: &[&str] = &[
    "@id",
    "accession",
    "illumina_read_type",
    "lane",
    "md5sum",
    "flowcell_id",
    "seqspecs",
];

const AUXILIARY_FILE_FIELDS: &[&str] = &[
    "@id",
    "accession",
    "illumina_read_type",
    "lane",
    "md5sum",
    "seqspecs",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogQuery {
    MeasurementSetsFor(AnalysisSetId),
    MeasurementSetFiles(MeasurementSetId),
    AuxiliarySetFiles(AuxiliarySetId),
}

impl CatalogQuery {
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            CatalogQuery::MeasurementSetsFor(_) => MEASUREMENT_SET_FIELDS,
            CatalogQuery::MeasurementSetFiles(_) => MEASUREMENT_FILE_FIELDS,
            CatalogQuery::AuxiliarySetFiles(_) => AUXILIARY_FILE_FIELDS,
        }
    }

    fn filters(&self) -> Vec<(&'static str, String)> {
        match self {
            CatalogQuery::MeasurementSetsFor(id) => vec![
                ("type", "MeasurementSet".to_string()),
                ("input_for", format!("/analysis-sets/{}/", id.as_str())),
            ],
            CatalogQuery::MeasurementSetFiles(id) => vec![
                ("type", "SequenceFile".to_string()),
                ("file_set.@id", format!("/measurement-sets/{}/", id.as_str())),
                ("illumina_read_type", "*".to_string()),
            ],
            CatalogQuery::AuxiliarySetFiles(id) => vec![
                ("type", "SequenceFile".to_string()),
                ("file_set.@id", format!("/auxiliary-sets/{}/", id.as_str())),
                ("illumina_read_type", "*".to_string()),
            ],
        }
    }

    pub fn to_url(&self, endpoint: &Endpoint) -> Url {
        let filters = self.filters();
        let pairs = filters
            .iter()
            .map(|(key, value)| (*key, value.as_str()))
            .chain(self.fields().iter().map(|field| ("field", *field)))
            .map(|(key, value)| {
                let encoded = form_urlencoded::byte_serialize(value.as_bytes()).collect::<String>();
                format!("{key}={encoded}")
            })
            .collect::<Vec<_>>();
        let mut url = endpoint.report_url.clone();
        url.set_query(Some(&pairs.join("&")));
        url
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    report_url: Url,
}

impl Endpoint {
    pub fn parse(base: &str) -> Result<Self, SheetError> {
        let trimmed = base.trim().trim_end_matches('/');
        let report_url = Url::parse(&format!("{trimmed}/{REPORT_PATH}"))
            .map_err(|err| SheetError::InvalidEndpoint(format!("{base}: {err}")))?;
        if !matches!(report_url.scheme(), "http" | "https") {
            return Err(SheetError::InvalidEndpoint(base.to_string()));
        }
        Ok(Self { report_url })
    }

    pub fn report_url(&self) -> &Url {
        &self.report_url
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL")
    }
}
