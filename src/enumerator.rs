use tracing::{debug, info, warn};

use crate::catalog::{CatalogClient, Report};
use crate::domain::{
    AnalysisSetLink, AuxiliarySetId, FileModality, Lane, MeasurementSetId, ReadType,
    SequenceFileRecord,
};
use crate::error::SheetError;
use crate::query::CatalogQuery;

const ID_COLUMN: &str = "ID";
const ACCESSION_COLUMN: &str = "Accession";
const READ_TYPE_COLUMN: &str = "Illumina Read Type";
const LANE_COLUMN: &str = "Lane";
const MD5SUM_COLUMN: &str = "MD5sum";
const FLOWCELL_COLUMN: &str = "Flowcell ID";
const SEQSPECS_COLUMN: &str = "Seqspecs";

pub fn enumerate_sequence_files<C: CatalogClient + ?Sized>(
    client: &C,
    links: &[AnalysisSetLink],
) -> Result<Vec<SequenceFileRecord>, SheetError> {
    let mut records = Vec::new();

    for link in links {
        let measurement_set = &link.measurement_set_id;
        let report =
            client.fetch_report(&CatalogQuery::MeasurementSetFiles(measurement_set.clone()))?;
        let files = records_from_report(&report, measurement_set, FileModality::ScRna)?;
        debug!(measurement_set = %measurement_set, files = files.len(), "measurement set files");
        records.extend(files);

        if link.associated_auxiliary_sets.is_none() {
            continue;
        }
        let refs = link.auxiliary_set_refs();
        if refs.len() > FileModality::AUXILIARY_ORDER.len() {
            warn!(
                measurement_set = %measurement_set,
                auxiliary_sets = refs.len(),
                "only the first {} auxiliary sets are enumerated",
                FileModality::AUXILIARY_ORDER.len()
            );
        }

        for (modality, reference) in FileModality::AUXILIARY_ORDER.into_iter().zip(refs) {
            let auxiliary_set = AuxiliarySetId::from_reference(reference)?;
            let report = client.fetch_report(&CatalogQuery::AuxiliarySetFiles(auxiliary_set.clone()))?;
            let files = records_from_report(&report, measurement_set, modality)?;
            debug!(
                measurement_set = %measurement_set,
                auxiliary_set = %auxiliary_set,
                modality = %modality,
                files = files.len(),
                "auxiliary set files"
            );
            records.extend(files);
        }
    }

    info!(files = records.len(), "enumerated sequence files");
    Ok(records)
}

pub fn records_from_report(
    report: &Report,
    measurement_set: &MeasurementSetId,
    modality: FileModality,
) -> Result<Vec<SequenceFileRecord>, SheetError> {
    if report.is_empty() {
        return Ok(Vec::new());
    }

    let id = report.optional_column(ID_COLUMN);
    let accession = report.column(ACCESSION_COLUMN)?;
    let read_type = report.column(READ_TYPE_COLUMN)?;
    let lane = report.column(LANE_COLUMN)?;
    let md5sum = report.column(MD5SUM_COLUMN)?;
    let flowcell = report.optional_column(FLOWCELL_COLUMN);
    let seqspecs = report.column(SEQSPECS_COLUMN)?;

    Ok(report
        .rows()
        .map(|row| SequenceFileRecord {
            identifier: row.get_owned(id),
            accession: row.get_owned(Some(accession)),
            read_type: row.get(read_type).map(ReadType::from),
            lane: row.get(lane).map(Lane::from),
            md5sum: row.get_owned(Some(md5sum)),
            flowcell_id: row.get_owned(flowcell),
            seqspec_ref: row.get_owned(Some(seqspecs)),
            measurement_set_id: measurement_set.clone(),
            file_modality: modality,
        })
        .collect())
}
