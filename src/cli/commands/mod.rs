pub mod config;
pub mod generate;
pub mod graph;
pub mod tree;

use tokio::runtime::Runtime;
use tracing::warn;

use crate::pipeline::{AnalysisOutput, Pipeline};
use crate::types::Result;

/// Drive a pipeline to completion on a fresh runtime; Ctrl-C cancels the run.
pub(crate) fn run_pipeline(pipeline: Pipeline) -> Result<AnalysisOutput> {
    let rt = Runtime::new()?;
    let cancel = pipeline.cancellation_token();
    rt.spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling run");
            cancel.cancel();
        }
    });
    rt.block_on(pipeline.run())
}
