use std::fs;
use std::io::{self, Write};

use camino::Utf8Path;
use serde::Serialize;

use crate::app::RunResult;
use crate::domain::{AnalysisSetLink, LanePair};
use crate::error::SheetError;
use crate::reshape::{PER_SAMPLE_COLUMNS, PerSampleTable};

pub const ANALYSIS_SET_COLUMNS: [&str; 3] =
    ["analysis_set_id", "measurement_sets", "associated_auxiliary_sets"];

#[derive(Debug, Clone, Copy)]
pub enum OutputMode {
    Text,
    Json,
}

pub fn write_analysis_sets<W: Write>(writer: W, links: &[AnalysisSetLink]) -> Result<(), SheetError> {
    let mut tsv = tsv_writer(writer);
    tsv.write_record(ANALYSIS_SET_COLUMNS).map_err(write_error)?;
    for link in links {
        tsv.write_record([
            link.analysis_set_id.as_str(),
            link.measurement_set_id.as_str(),
            link.associated_auxiliary_sets.as_deref().unwrap_or(""),
        ])
        .map_err(write_error)?;
    }
    tsv.flush().map_err(|err| SheetError::OutputWrite(err.to_string()))
}

pub fn write_per_sample<W: Write>(writer: W, table: &PerSampleTable) -> Result<(), SheetError> {
    let PerSampleTable::Table(rows) = table else {
        return Ok(());
    };
    let mut tsv = tsv_writer(writer);
    tsv.write_record(PER_SAMPLE_COLUMNS).map_err(write_error)?;
    for row in rows {
        tsv.write_record(per_sample_record(row)).map_err(write_error)?;
    }
    tsv.flush().map_err(|err| SheetError::OutputWrite(err.to_string()))
}

fn per_sample_record(row: &LanePair) -> [String; 9] {
    let cell = |value: &Option<String>| value.clone().unwrap_or_default();
    [
        cell(&row.r1_path),
        cell(&row.r1_md5sum),
        cell(&row.r2_path),
        cell(&row.r2_md5sum),
        row.measurement_set_id.to_string(),
        row.lane.as_ref().map(ToString::to_string).unwrap_or_default(),
        row.file_modality.to_string(),
        cell(&row.flowcell_id),
        cell(&row.seqspec),
    ]
}

fn tsv_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(writer)
}

fn write_error(err: csv::Error) -> SheetError {
    SheetError::OutputWrite(err.to_string())
}

pub fn write_file_atomic<F>(dest: &Utf8Path, write: F) -> Result<(), SheetError>
where
    F: FnOnce(&mut fs::File) -> Result<(), SheetError>,
{
    let parent = match dest.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    fs::create_dir_all(parent.as_std_path())
        .map_err(|err| SheetError::OutputWrite(format!("{parent}: {err}")))?;
    let mut temp = tempfile::Builder::new()
        .prefix(".igvf-sheet")
        .tempfile_in(parent.as_std_path())
        .map_err(|err| SheetError::OutputWrite(err.to_string()))?;
    write(temp.as_file_mut())?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .map_err(|err| SheetError::OutputWrite(err.to_string()))?;
    }
    temp.persist(dest.as_std_path())
        .map_err(|err| SheetError::OutputWrite(format!("{dest}: {err}")))?;
    Ok(())
}

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_run(result: &RunResult) -> io::Result<()> {
        Self::print_json(result)
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

impl crate::app::ProgressSink for JsonOutput {
    fn event(&self, _event: crate::app::ProgressEvent) {}
}
