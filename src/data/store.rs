use super::model::{Dataset, DatasetId, Row};
use crate::error::DataError;

/// Everything needed to create an experiment.
#[derive(Debug, Clone, Default)]
pub struct ExperimentDraft {
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub rows: Vec<Row>,
}

/// Editable metadata of an existing experiment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExperimentEdit {
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
}

impl ExperimentEdit {
    pub fn from_dataset(ds: &Dataset) -> Self {
        Self {
            name: ds.name.clone(),
            description: ds.description.clone(),
            tags: ds.tags.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// ExperimentStore – in-memory, per session
// ---------------------------------------------------------------------------

/// Owns every experiment of the session, in creation order.
#[derive(Debug, Default)]
pub struct ExperimentStore {
    datasets: Vec<Dataset>,
    next_id: u64,
}

impl ExperimentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> DatasetId {
        self.next_id += 1;
        DatasetId(self.next_id)
    }

    /// Add a new experiment and return its id.
    pub fn create(&mut self, draft: ExperimentDraft) -> Result<DatasetId, DataError> {
        let name = validated_name(&draft.name)?;
        let id = self.allocate_id();
        let mut ds = Dataset::new(id, name, draft.rows);
        ds.description = draft.description;
        ds.tags = draft.tags;
        log::info!("Created experiment {id} '{}' with {} rows", ds.name, ds.len());
        self.datasets.push(ds);
        Ok(id)
    }

    /// Replace name, description and tags.
    pub fn update(&mut self, id: DatasetId, edit: ExperimentEdit) -> Result<(), DataError> {
        let name = validated_name(&edit.name)?;
        let ds = self.get_mut(id)?;
        ds.name = name;
        ds.description = edit.description;
        ds.tags = edit.tags;
        Ok(())
    }

    /// Swap in a freshly uploaded row sequence.
    pub fn replace_rows(&mut self, id: DatasetId, rows: Vec<Row>) -> Result<(), DataError> {
        let ds = self.get_mut(id)?;
        ds.replace_rows(rows);
        log::info!("Experiment {id} now has {} rows (revision {})", ds.len(), ds.revision());
        Ok(())
    }

    /// Copy an experiment under a new id.
    pub fn duplicate(&mut self, id: DatasetId) -> Result<DatasetId, DataError> {
        let source = self.get(id).ok_or(DataError::UnknownExperiment(id))?;
        let draft = ExperimentDraft {
            name: format!("{} (copy)", source.name),
            description: source.description.clone(),
            tags: source.tags.clone(),
            rows: source.rows().to_vec(),
        };
        self.create(draft)
    }

    pub fn remove(&mut self, id: DatasetId) -> Result<Dataset, DataError> {
        let pos = self
            .datasets
            .iter()
            .position(|ds| ds.id == id)
            .ok_or(DataError::UnknownExperiment(id))?;
        let ds = self.datasets.remove(pos);
        log::info!("Removed experiment {id} '{}'", ds.name);
        Ok(ds)
    }

    pub fn get(&self, id: DatasetId) -> Option<&Dataset> {
        self.datasets.iter().find(|ds| ds.id == id)
    }

    fn get_mut(&mut self, id: DatasetId) -> Result<&mut Dataset, DataError> {
        self.datasets
            .iter_mut()
            .find(|ds| ds.id == id)
            .ok_or(DataError::UnknownExperiment(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dataset> {
        self.datasets.iter()
    }

    /// Look up several ids, keeping their order and skipping unknown ones.
    pub fn resolve<'a, 'b>(
        &'a self,
        ids: impl IntoIterator<Item = &'b DatasetId>,
    ) -> Vec<&'a Dataset> {
        ids.into_iter().filter_map(|id| self.get(*id)).collect()
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

fn validated_name(name: &str) -> Result<String, DataError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DataError::EmptyName);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_row as row;

    fn draft(name: &str, rows: usize) -> ExperimentDraft {
        ExperimentDraft {
            name: name.to_string(),
            description: "bench run".to_string(),
            tags: vec!["lab".to_string()],
            rows: (0..rows).map(|i| row(&[("t", (i as f64).into())])).collect(),
        }
    }

    #[test]
    fn ids_are_unique_and_stable() {
        let mut store = ExperimentStore::new();
        let a = store.create(draft("A", 2)).unwrap();
        let b = store.create(draft("B", 1)).unwrap();
        assert_ne!(a, b);
        store.remove(a).unwrap();
        let c = store.create(draft("C", 1)).unwrap();
        assert_ne!(a, c);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(b).unwrap().name, "B");
    }

    #[test]
    fn duplicate_copies_rows_under_new_name() {
        let mut store = ExperimentStore::new();
        let a = store.create(draft("A", 3)).unwrap();
        store.replace_rows(a, draft("A", 4).rows).unwrap();
        let copy = store.duplicate(a).unwrap();

        let copy = store.get(copy).unwrap();
        assert_eq!(copy.name, "A (copy)");
        assert_eq!(copy.len(), 4);
        assert_eq!(copy.revision(), 0);
        assert_eq!(copy.tags, vec!["lab".to_string()]);
    }

    #[test]
    fn update_validates_name() {
        let mut store = ExperimentStore::new();
        let a = store.create(draft("A", 0)).unwrap();
        let edit = ExperimentEdit {
            name: "   ".to_string(),
            ..ExperimentEdit::default()
        };
        assert!(matches!(store.update(a, edit), Err(DataError::EmptyName)));

        let edit = ExperimentEdit {
            name: "  Renamed ".to_string(),
            description: "new".to_string(),
            tags: Vec::new(),
        };
        store.update(a, edit).unwrap();
        assert_eq!(store.get(a).unwrap().name, "Renamed");
    }

    #[test]
    fn unknown_ids_are_reported() {
        let mut store = ExperimentStore::new();
        let ghost = DatasetId(42);
        assert!(matches!(store.remove(ghost), Err(DataError::UnknownExperiment(id)) if id == ghost));
        assert!(store.duplicate(ghost).is_err());
        assert!(store.replace_rows(ghost, Vec::new()).is_err());
    }

    #[test]
    fn replace_rows_bumps_revision() {
        let mut store = ExperimentStore::new();
        let a = store.create(draft("A", 1)).unwrap();
        store.replace_rows(a, draft("A", 5).rows).unwrap();
        let ds = store.get(a).unwrap();
        assert_eq!(ds.revision(), 1);
        assert_eq!(ds.len(), 5);
    }

    #[test]
    fn resolve_keeps_order_and_skips_unknown() {
        let mut store = ExperimentStore::new();
        let a = store.create(draft("A", 1)).unwrap();
        let b = store.create(draft("B", 1)).unwrap();
        let picked = store.resolve(&[b, DatasetId(99), a]);
        let names: Vec<_> = picked.iter().map(|ds| ds.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }
}
