use igvf_sample_sheet::domain::{
    FileModality, Lane, MeasurementSetId, ReadType, SequenceFileRecord,
};
use igvf_sample_sheet::reshape::{PerSampleTable, reshape_read_pairs};

fn file(
    measurement_set: &str,
    modality: FileModality,
    read_type: &str,
    lane: &str,
    accession: &str,
) -> SequenceFileRecord {
    SequenceFileRecord {
        identifier: Some(format!("/sequence-files/{accession}/")),
        accession: Some(accession.to_string()),
        read_type: Some(ReadType::from(read_type)),
        lane: Some(Lane::from(lane)),
        md5sum: Some(format!("md5-{accession}")),
        flowcell_id: Some("FC1".to_string()),
        seqspec_ref: Some("/configuration-files/IGVFFI9001/".to_string()),
        measurement_set_id: MeasurementSetId::new(measurement_set),
        file_modality: modality,
    }
}

#[test]
fn matching_mates_share_a_row() {
    let records = vec![
        file("IGVFDS0002", FileModality::ScRna, "R1", "1", "IGVFFI0001"),
        file("IGVFDS0002", FileModality::ScRna, "R2", "1", "IGVFFI0002"),
    ];
    let table = reshape_read_pairs(&records);
    let rows = table.rows();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].r1_path.as_deref(), Some("IGVFFI0001"));
    assert_eq!(rows[0].r1_md5sum.as_deref(), Some("md5-IGVFFI0001"));
    assert_eq!(rows[0].r2_path.as_deref(), Some("IGVFFI0002"));
    assert_eq!(rows[0].r2_md5sum.as_deref(), Some("md5-IGVFFI0002"));
    assert_eq!(rows[0].seqspec.as_deref(), Some("IGVFFI9001"));
}

#[test]
fn lane_with_only_r1_keeps_its_row() {
    let records = vec![file("IGVFDS0002", FileModality::ScRna, "R1", "1", "IGVFFI0001")];
    let table = reshape_read_pairs(&records);
    let rows = table.rows();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].r1_path.as_deref(), Some("IGVFFI0001"));
    assert_eq!(rows[0].r2_path, None);
    assert_eq!(rows[0].r2_md5sum, None);
}

#[test]
fn lane_with_only_r2_keeps_its_row() {
    let records = vec![file("IGVFDS0002", FileModality::ScRna, "R2", "3", "IGVFFI0002")];
    let table = reshape_read_pairs(&records);
    let rows = table.rows();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].r1_path, None);
    assert_eq!(rows[0].r2_path.as_deref(), Some("IGVFFI0002"));
    assert_eq!(rows[0].lane, Some(Lane::Number(3)));
}

#[test]
fn index_reads_are_dropped() {
    let records = vec![
        file("IGVFDS0002", FileModality::ScRna, "I1", "1", "IGVFFI0003"),
        file("IGVFDS0002", FileModality::ScRna, "I2", "1", "IGVFFI0004"),
    ];
    assert_eq!(reshape_read_pairs(&records), PerSampleTable::Table(Vec::new()));
}

#[test]
fn rows_without_read_type_reshape_to_nothing() {
    let mut record = file("IGVFDS0002", FileModality::ScRna, "R1", "1", "IGVFFI0001");
    record.read_type = None;
    let table = reshape_read_pairs(&[record]);
    assert_eq!(table, PerSampleTable::Table(Vec::new()));
    assert!(table.is_empty());
}

#[test]
fn different_flowcells_stay_distinct() {
    let r1 = file("IGVFDS0002", FileModality::ScRna, "R1", "1", "IGVFFI0001");
    let mut r2 = file("IGVFDS0002", FileModality::ScRna, "R2", "1", "IGVFFI0002");
    r2.flowcell_id = Some("FC2".to_string());

    let table = reshape_read_pairs(&[r1, r2]);
    let rows = table.rows();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].flowcell_id.as_deref(), Some("FC1"));
    assert_eq!(rows[0].r2_path, None);
    assert_eq!(rows[1].flowcell_id.as_deref(), Some("FC2"));
    assert_eq!(rows[1].r1_path, None);
}

#[test]
fn duplicate_mates_pair_every_combination() {
    let records = vec![
        file("IGVFDS0002", FileModality::ScRna, "R1", "1", "IGVFFI0001"),
        file("IGVFDS0002", FileModality::ScRna, "R1", "1", "IGVFFI0005"),
        file("IGVFDS0002", FileModality::ScRna, "R2", "1", "IGVFFI0002"),
    ];
    let table = reshape_read_pairs(&records);
    let rows = table.rows();

    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row.r2_path.as_deref() == Some("IGVFFI0002")));
}

#[test]
fn missing_flowcell_on_both_mates_still_joins() {
    let mut r1 = file("IGVFDS0002", FileModality::GRna, "R1", "1", "IGVFFI0001");
    let mut r2 = file("IGVFDS0002", FileModality::GRna, "R2", "1", "IGVFFI0002");
    r1.flowcell_id = None;
    r2.flowcell_id = None;
    r1.seqspec_ref = None;
    r2.seqspec_ref = None;

    let table = reshape_read_pairs(&[r1, r2]);
    let rows = table.rows();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].flowcell_id, None);
    assert_eq!(rows[0].seqspec.as_deref(), Some(""));
}

#[test]
fn output_is_sorted_by_measurement_set_lane_modality_flowcell() {
    let records = vec![
        file("IGVFDS0009", FileModality::ScRna, "R1", "1", "IGVFFI0001"),
        file("IGVFDS0002", FileModality::ScRna, "R1", "10", "IGVFFI0002"),
        file("IGVFDS0002", FileModality::ScRna, "R1", "2", "IGVFFI0003"),
        file("IGVFDS0002", FileModality::Hash, "R1", "2", "IGVFFI0004"),
        file("IGVFDS0002", FileModality::GRna, "R1", "2", "IGVFFI0005"),
    ];
    let table = reshape_read_pairs(&records);
    let order = table
        .rows()
        .iter()
        .map(|row| row.r1_path.as_deref().unwrap_or_default())
        .collect::<Vec<_>>();

    assert_eq!(
        order,
        vec!["IGVFFI0005", "IGVFFI0004", "IGVFFI0003", "IGVFFI0002", "IGVFFI0001"]
    );
}

#[test]
fn unmatched_seqspec_value_becomes_missing() {
    let mut record = file("IGVFDS0002", FileModality::ScRna, "R1", "1", "IGVFFI0001");
    record.seqspec_ref = Some("IGVFFI9001".to_string());
    let table = reshape_read_pairs(&[record]);
    assert_eq!(table.rows()[0].seqspec, None);
}
