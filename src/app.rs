use camino::Utf8PathBuf;
use serde::Serialize;
use tracing::info;

use crate::catalog::CatalogClient;
use crate::domain::AnalysisSetId;
use crate::enumerator::enumerate_sequence_files;
use crate::error::SheetError;
use crate::output::{write_analysis_sets, write_file_atomic, write_per_sample};
use crate::reshape::reshape_read_pairs;
use crate::resolver::resolve_analysis_set;

#[derive(Debug, Clone)]
pub struct RunOutputs {
    pub analysis_set_output: Utf8PathBuf,
    pub per_sample_output: Utf8PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub analysis_set_id: String,
    pub measurement_sets: usize,
    pub sequence_files: usize,
    pub lane_pairs: usize,
    pub analysis_set_output: String,
    pub per_sample_output: String,
}

#[derive(Debug, Clone)]
pub enum ProgressEvent {
    AnalysisSetsSaved(Utf8PathBuf),
    PerSampleSaved(Utf8PathBuf),
}

pub trait ProgressSink {
    fn event(&self, event: ProgressEvent);
}

pub struct App<C: CatalogClient> {
    client: C,
}

impl<C: CatalogClient> App<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn run(
        &self,
        analysis_set: &AnalysisSetId,
        outputs: &RunOutputs,
        sink: &dyn ProgressSink,
    ) -> Result<RunResult, SheetError> {
        let links = resolve_analysis_set(&self.client, analysis_set)?;
        write_file_atomic(&outputs.analysis_set_output, |file| {
            write_analysis_sets(file, &links)
        })?;
        sink.event(ProgressEvent::AnalysisSetsSaved(
            outputs.analysis_set_output.clone(),
        ));

        let sequence_files = enumerate_sequence_files(&self.client, &links)?;
        let per_sample = reshape_read_pairs(&sequence_files);
        write_file_atomic(&outputs.per_sample_output, |file| {
            write_per_sample(file, &per_sample)
        })?;
        sink.event(ProgressEvent::PerSampleSaved(outputs.per_sample_output.clone()));

        info!(
            analysis_set = %analysis_set,
            lane_pairs = per_sample.len(),
            "sample sheet complete"
        );
        Ok(RunResult {
            analysis_set_id: analysis_set.to_string(),
            measurement_sets: links.len(),
            sequence_files: sequence_files.len(),
            lane_pairs: per_sample.len(),
            analysis_set_output: outputs.analysis_set_output.to_string(),
            per_sample_output: outputs.per_sample_output.to_string(),
        })
    }
}
