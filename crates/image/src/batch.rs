//! Batch conversion of independent requests.
//!
//! The registry is read-only, so many conversions can share it. Each request
//! is converted on its own; one failure never affects another.

use crate::error::ConvertError;
use crate::pipeline::{ConversionReport, ConversionRequest, Pipeline};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Result of one request in a batch.
#[derive(Debug)]
pub struct BatchOutcome {
    /// The request that was run
    pub request: ConversionRequest,
    /// Its result
    pub result: Result<ConversionReport, ConvertError>,
}

impl BatchOutcome {
    /// Whether the conversion succeeded.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Convert every request, preserving input order in the returned outcomes.
///
/// With the `parallel` feature and `parallel = true`, requests run on the
/// rayon thread pool. `on_done` is called once per finished request, from
/// whichever thread ran it.
pub fn convert_batch<F>(
    pipeline: &Pipeline,
    requests: Vec<ConversionRequest>,
    parallel: bool,
    on_done: F,
) -> Vec<BatchOutcome>
where
    F: Fn(&BatchOutcome) + Sync,
{
    let run = |request: ConversionRequest| {
        let result = pipeline.convert(&request);
        let outcome = BatchOutcome { request, result };
        on_done(&outcome);
        outcome
    };

    #[cfg(feature = "parallel")]
    if parallel {
        return requests.into_par_iter().map(run).collect();
    }

    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    requests.into_iter().map(run).collect()
}
