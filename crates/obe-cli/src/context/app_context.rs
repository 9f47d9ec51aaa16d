use std::path::PathBuf;

use anyhow::Context;
use obe_config::ObeConfig;
use obe_core::dataset::Dataset;
use obe_core::schema::SchemaDefaults;
use obe_engine::AttainmentEngine;

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: ObeConfig,
    pub data_path: PathBuf,
    pub dataset: Dataset,
    pub defaults: SchemaDefaults,
}

impl AppContext {
    /// Resolve the dataset path, load it, and bring stored marks and survey
    /// ratings into range.
    pub fn load(config: ObeConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let data_path = match &flags.data {
            Some(path) => path.clone(),
            None => config
                .dataset_path()
                .context("no dataset given; pass --data or set general.dataset")?,
        };

        let mut dataset = Dataset::load(&data_path)
            .with_context(|| format!("failed to load dataset {}", data_path.display()))?;
        let defaults = config.attainment.schema_defaults();

        let schemas = dataset
            .validate_schemas(&defaults)
            .context("invalid assessment schema")?;
        for (course_id, schema) in &schemas {
            if let Some(sheet) = dataset.marks.get_mut(course_id) {
                let adjusted = sheet.conform_to(schema);
                if adjusted > 0 {
                    tracing::warn!(course = %course_id, adjusted, "marks clamped to schema maxima");
                }
            }
        }

        let adjusted = dataset.surveys.conform();
        if adjusted > 0 {
            tracing::warn!(adjusted, "survey ratings clamped to the 1-3 scale");
        }

        tracing::debug!(path = %data_path.display(), "app context ready");
        Ok(Self {
            config,
            data_path,
            dataset,
            defaults,
        })
    }

    /// Attainment engine over the loaded dataset.
    #[must_use]
    pub fn engine(&self) -> AttainmentEngine<'_> {
        AttainmentEngine::new(&self.dataset, self.defaults.clone())
            .with_survey_fallback(self.config.survey.fallback_rating)
    }
}
