use tracing::info;

use crate::catalog::{CatalogClient, Report};
use crate::domain::{AnalysisSetId, AnalysisSetLink, MeasurementSetId};
use crate::error::SheetError;
use crate::query::CatalogQuery;

const ID_COLUMN: &str = "ID";
const AUXILIARY_SETS_COLUMN: &str = "Auxiliary Sets";

pub fn resolve_analysis_set<C: CatalogClient + ?Sized>(
    client: &C,
    analysis_set: &AnalysisSetId,
) -> Result<Vec<AnalysisSetLink>, SheetError> {
    let report = client.fetch_report(&CatalogQuery::MeasurementSetsFor(analysis_set.clone()))?;
    let links = links_from_report(analysis_set, &report)?;
    info!(
        analysis_set = %analysis_set,
        measurement_sets = links.len(),
        "resolved analysis set"
    );
    Ok(links)
}

pub fn links_from_report(
    analysis_set: &AnalysisSetId,
    report: &Report,
) -> Result<Vec<AnalysisSetLink>, SheetError> {
    let id_column = report.column(ID_COLUMN)?;
    let auxiliary_column = report.column(AUXILIARY_SETS_COLUMN)?;

    report
        .rows()
        .map(|row| -> Result<AnalysisSetLink, SheetError> {
            let path = row
                .get(id_column)
                .ok_or_else(|| SheetError::MalformedIdentifier {
                    kind: "measurement set",
                    value: String::new(),
                })?;
            Ok(AnalysisSetLink {
                analysis_set_id: analysis_set.clone(),
                measurement_set_id: MeasurementSetId::from_catalog_path(path)?,
                associated_auxiliary_sets: row.get_owned(Some(auxiliary_column)),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::parse_report;

    #[test]
    fn links_carry_analysis_set_and_auxiliary_sets() {
        let report = parse_report(
            "2024-05-01 12:00:00\n\
             ID\tAuxiliary Sets\tInput For\n\
             /measurement-sets/IGVFDS0002/\t/auxiliary-sets/IGVFDS0003/\t/analysis-sets/IGVFDS0001/\n\
             /measurement-sets/IGVFDS0005/\t\t/analysis-sets/IGVFDS0001/\n",
        )
        .unwrap();
        let analysis_set: AnalysisSetId = "IGVFDS0001".parse().unwrap();
        let links = links_from_report(&analysis_set, &report).unwrap();

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].analysis_set_id, analysis_set);
        assert_eq!(links[0].measurement_set_id.as_str(), "IGVFDS0002");
        assert_eq!(
            links[0].associated_auxiliary_sets.as_deref(),
            Some("/auxiliary-sets/IGVFDS0003/")
        );
        assert_eq!(links[1].associated_auxiliary_sets, None);
    }
}
