use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;
use tracing::info;

use crate::domain::{FileModality, Lane, LanePair, MeasurementSetId, ReadType, SequenceFileRecord};

static CONFIGURATION_FILE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/configuration-files/([^/]+)/").expect("valid regex"));

pub const PER_SAMPLE_COLUMNS: [&str; 9] = [
    "R1_path",
    "R1_md5sum",
    "R2_path",
    "R2_md5sum",
    "measurement_sets",
    "Lane",
    "file_modality",
    "Flowcell ID",
    "Seqspecs",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PerSampleTable {
    Empty,
    Table(Vec<LanePair>),
}

impl PerSampleTable {
    pub fn rows(&self) -> &[LanePair] {
        match self {
            PerSampleTable::Empty => &[],
            PerSampleTable::Table(rows) => rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }
}

#[derive(Debug, PartialEq, Eq)]
struct JoinKey<'a> {
    lane: Option<&'a Lane>,
    measurement_set_id: &'a MeasurementSetId,
    file_modality: FileModality,
    flowcell_id: Option<&'a str>,
    seqspec_ref: Option<&'a str>,
}

impl<'a> JoinKey<'a> {
    fn of(record: &'a SequenceFileRecord) -> Self {
        Self {
            lane: record.lane.as_ref(),
            measurement_set_id: &record.measurement_set_id,
            file_modality: record.file_modality,
            flowcell_id: record.flowcell_id.as_deref(),
            seqspec_ref: record.seqspec_ref.as_deref(),
        }
    }
}

pub fn reshape_read_pairs(records: &[SequenceFileRecord]) -> PerSampleTable {
    if records.is_empty() {
        return PerSampleTable::Empty;
    }

    let r1 = records
        .iter()
        .filter(|record| record.read_type == Some(ReadType::R1))
        .collect::<Vec<_>>();
    let r2 = records
        .iter()
        .filter(|record| record.read_type == Some(ReadType::R2))
        .collect::<Vec<_>>();

    let mut r2_matched = vec![false; r2.len()];
    let mut rows = Vec::with_capacity(r1.len().max(r2.len()));

    for &left in &r1 {
        let key = JoinKey::of(left);
        let mut matched = false;
        for (index, &right) in r2.iter().enumerate() {
            if JoinKey::of(right) == key {
                matched = true;
                r2_matched[index] = true;
                rows.push(pair(left, Some(left), Some(right)));
            }
        }
        if !matched {
            rows.push(pair(left, Some(left), None));
        }
    }
    for (&right, &matched) in r2.iter().zip(&r2_matched) {
        if !matched {
            rows.push(pair(right, None, Some(right)));
        }
    }

    rows.sort_by(compare_rows);
    info!(lanes = rows.len(), "paired read files");
    PerSampleTable::Table(rows)
}

fn pair(
    key_source: &SequenceFileRecord,
    r1: Option<&SequenceFileRecord>,
    r2: Option<&SequenceFileRecord>,
) -> LanePair {
    LanePair {
        r1_path: r1.and_then(|record| record.accession.clone()),
        r1_md5sum: r1.and_then(|record| record.md5sum.clone()),
        r2_path: r2.and_then(|record| record.accession.clone()),
        r2_md5sum: r2.and_then(|record| record.md5sum.clone()),
        measurement_set_id: key_source.measurement_set_id.clone(),
        lane: key_source.lane.clone(),
        file_modality: key_source.file_modality,
        flowcell_id: key_source.flowcell_id.clone(),
        seqspec: normalize_seqspec(key_source.seqspec_ref.as_deref()),
    }
}

pub fn normalize_seqspec(value: Option<&str>) -> Option<String> {
    match value {
        None | Some("") => Some(String::new()),
        Some(value) => CONFIGURATION_FILE_PATH
            .captures(value)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string()),
    }
}

fn compare_rows(a: &LanePair, b: &LanePair) -> Ordering {
    a.measurement_set_id
        .cmp(&b.measurement_set_id)
        .then_with(|| missing_last(a.lane.as_ref(), b.lane.as_ref()))
        .then_with(|| a.file_modality.as_str().cmp(b.file_modality.as_str()))
        .then_with(|| missing_last(a.flowcell_id.as_ref(), b.flowcell_id.as_ref()))
}

fn missing_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
