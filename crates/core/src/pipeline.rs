use crate::error::Result;
use std::path::PathBuf;

/// Batch context, used to share state between batches of a run
pub trait StageContext {}

/// A processing stage of the pipeline
pub trait PipelineStage<C: StageContext> {
    type Output;

    /// Processes a batch of paths
    fn process(&self, context: &C, paths: Vec<PathBuf>) -> Result<Vec<Self::Output>>;
}

/// Batch pipeline engine
pub struct BatchPipeline {
    batch_size: usize,
}

impl BatchPipeline {
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size: if batch_size == 0 { 100 } else { batch_size },
        }
    }

    /// Executes the pipeline: processes paths in chunks and commits the products
    pub fn execute<C, S, F>(
        &self,
        context: &C,
        paths: Vec<PathBuf>,
        stage: &S,
        mut committer: F,
    ) -> Result<()>
    where
        C: StageContext,
        S: PipelineStage<C>,
        F: FnMut(Vec<S::Output>) -> Result<()>,
    {
        for chunk in paths.chunks(self.batch_size) {
            // 1. Process the current batch
            let outputs = stage.process(context, chunk.to_vec())?;

            // 2. Commit the products
            committer(outputs)?;

            // End of batch, local variables are cleaned up
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullContext;
    impl StageContext for NullContext {}

    struct CountStage;
    impl PipelineStage<NullContext> for CountStage {
        type Output = usize;

        fn process(&self, _context: &NullContext, paths: Vec<PathBuf>) -> Result<Vec<usize>> {
            Ok(vec![paths.len()])
        }
    }

    #[test]
    fn test_chunked_commits() {
        let paths: Vec<PathBuf> = (0..5).map(|i| PathBuf::from(format!("{i}.json"))).collect();
        let mut committed = Vec::new();

        let pipeline = BatchPipeline::new(2);
        pipeline
            .execute(&NullContext, paths, &CountStage, |outputs| {
                committed.extend(outputs);
                Ok(())
            })
            .unwrap();

        assert_eq!(committed, [2, 2, 1]);
    }
}
