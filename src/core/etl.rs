use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs extract, transform and load in order. Returns the output path.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting ETL process...");

        // Extract
        tracing::info!("Extracting data...");
        let harvest = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted {} municipalities, {} parties",
            harvest.results.len(),
            harvest.parties.len()
        );

        // Transform
        tracing::info!("Transforming data...");
        let table = self.pipeline.transform(harvest).await?;
        tracing::info!("Transformed into {} rows x {} columns", table.rows.len(), table.header.len());

        // Load
        tracing::info!("Loading data...");
        let output_path = self.pipeline.load(table).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
