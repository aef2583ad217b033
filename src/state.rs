use std::path::Path;

use anyhow::{Context, Result};

use experiment_compare::color::SeriesPalette;
use experiment_compare::config::DashboardConfig;
use experiment_compare::data::cache::ComparisonCache;
use experiment_compare::data::filter::matching_ids;
use experiment_compare::data::loader::{load_file, sample_draft};
use experiment_compare::data::model::{Dataset, DatasetId};
use experiment_compare::data::schema::{numeric_columns, shared_numeric_columns};
use experiment_compare::data::store::{ExperimentDraft, ExperimentEdit, ExperimentStore};
use experiment_compare::error::DataError;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// One experiment, x against y.
    Single,
    /// Several experiments, one metric overlaid by row index.
    Compare,
}

/// Text buffers of the edit dialog.
#[derive(Debug, Clone, Default)]
pub struct EditBuffer {
    pub id: Option<DatasetId>,
    pub name: String,
    pub description: String,
    /// Comma-separated.
    pub tags: String,
}

impl EditBuffer {
    fn to_edit(&self) -> ExperimentEdit {
        ExperimentEdit {
            name: self.name.clone(),
            description: self.description.clone(),
            tags: self
                .tags
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,
    pub palette: SeriesPalette,
    pub store: ExperimentStore,

    /// Search box contents.
    pub search: String,
    /// Experiments passing the search (cached).
    pub visible_ids: Vec<DatasetId>,

    /// Experiments ticked for comparison. Order decides series colours.
    pub compare_ids: Vec<DatasetId>,
    /// Experiment shown in single view.
    pub selected: Option<DatasetId>,
    pub view: ViewMode,

    pub x_column: String,
    pub y_column: String,
    pub metric: String,

    pub cache: ComparisonCache,
    pub editing: Option<EditBuffer>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    samples_added: usize,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let palette = config.series_palette().unwrap_or_else(|e| {
            log::warn!("{e}; using the default palette");
            SeriesPalette::default()
        });
        Self {
            cache: ComparisonCache::new(config.collision_policy),
            config,
            palette,
            store: ExperimentStore::new(),
            search: String::new(),
            visible_ids: Vec::new(),
            compare_ids: Vec::new(),
            selected: None,
            view: ViewMode::Single,
            x_column: String::new(),
            y_column: String::new(),
            metric: String::new(),
            editing: None,
            status_message: None,
            samples_added: 0,
        }
    }

    /// Store a new experiment, select it and tick it for comparison.
    pub fn add_experiment(&mut self, draft: ExperimentDraft) -> Result<DatasetId> {
        let id = self.store.create(draft)?;
        self.compare_ids.push(id);
        self.refilter();
        self.select(id);
        self.sync_metric();
        self.status_message = None;
        Ok(id)
    }

    /// Import a JSON experiment file.
    pub fn import_file(&mut self, path: &Path) -> Result<DatasetId> {
        let draft = load_file(path, self.config.max_rows)
            .with_context(|| format!("importing {}", path.display()))?;
        self.add_experiment(draft)
    }

    /// Stand-in for a file upload: fabricate rows for a numbered sample file.
    pub fn add_sample(&mut self) -> Result<DatasetId> {
        self.samples_added += 1;
        let file_name = format!("sample_{}.csv", self.samples_added);
        self.add_experiment(sample_draft(&file_name, self.config.sample_rows))
    }

    /// Recompute `visible_ids` after a search or store change.
    pub fn refilter(&mut self) {
        self.visible_ids = matching_ids(&self.store, &self.search);
    }

    pub fn selected_dataset(&self) -> Option<&Dataset> {
        self.selected.and_then(|id| self.store.get(id))
    }

    /// Experiments ticked for comparison, in tick order.
    pub fn compare_datasets(&self) -> Vec<&Dataset> {
        self.store.resolve(&self.compare_ids)
    }

    /// Experiments drawing a series in the overlay plot, in palette order.
    pub fn series_order(&mut self) -> Vec<DatasetId> {
        let datasets = self.store.resolve(&self.compare_ids);
        self.cache
            .comparison(&datasets, &self.metric)
            .aligned
            .series
            .iter()
            .map(|s| s.dataset)
            .collect()
    }

    pub fn select(&mut self, id: DatasetId) {
        self.selected = Some(id);
        self.sync_axes();
    }

    pub fn toggle_compare(&mut self, id: DatasetId) {
        if let Some(pos) = self.compare_ids.iter().position(|c| *c == id) {
            self.compare_ids.remove(pos);
        } else {
            self.compare_ids.push(id);
        }
        self.sync_metric();
    }

    /// Keep the axis choices inside the selected experiment's numeric columns.
    fn sync_axes(&mut self) {
        let columns = self
            .selected_dataset()
            .map(numeric_columns)
            .unwrap_or_default();
        if !columns.contains(&self.x_column) {
            self.x_column = columns.first().cloned().unwrap_or_default();
        }
        if !columns.contains(&self.y_column) {
            self.y_column = columns
                .get(1)
                .or_else(|| columns.first())
                .cloned()
                .unwrap_or_default();
        }
    }

    /// Keep the metric inside the numeric columns of the compared experiments.
    fn sync_metric(&mut self) {
        let metrics = shared_numeric_columns(&self.compare_datasets());
        if !metrics.contains(&self.metric) {
            self.metric = metrics.first().cloned().unwrap_or_default();
        }
    }

    pub fn duplicate(&mut self, id: DatasetId) -> Result<DatasetId> {
        let copy = self.store.duplicate(id)?;
        self.refilter();
        Ok(copy)
    }

    pub fn delete(&mut self, id: DatasetId) -> Result<()> {
        self.store.remove(id)?;
        self.compare_ids.retain(|c| *c != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        if self.editing.as_ref().and_then(|e| e.id) == Some(id) {
            self.editing = None;
        }
        self.refilter();
        self.sync_axes();
        self.sync_metric();
        Ok(())
    }

    pub fn begin_edit(&mut self, id: DatasetId) {
        if let Some(ds) = self.store.get(id) {
            let edit = ExperimentEdit::from_dataset(ds);
            self.editing = Some(EditBuffer {
                id: Some(id),
                name: edit.name,
                description: edit.description,
                tags: edit.tags.join(", "),
            });
        }
    }

    /// Apply the edit dialog. On failure the dialog stays open.
    pub fn commit_edit(&mut self) -> Result<()> {
        let Some(buffer) = &self.editing else {
            return Ok(());
        };
        let Some(id) = buffer.id else {
            self.editing = None;
            return Ok(());
        };
        self.store.update(id, buffer.to_edit())?;
        self.editing = None;
        self.refilter();
        Ok(())
    }

    /// Show an error in the status line.
    pub fn report(&mut self, err: anyhow::Error) {
        log::error!("{err:#}");
        let title = err
            .downcast_ref::<DataError>()
            .map(DataError::title)
            .unwrap_or("Error");
        self.status_message = Some(format!("{title}: {err:#}"));
    }
}
