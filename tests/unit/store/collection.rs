//! Tests for the pattern collection and its persistence mirror

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use quiltgrid::generators::PatternKind;
    use quiltgrid::io::error::storage_error;
    use quiltgrid::palette::{Color, Palette};
    use quiltgrid::spatial::Grid;
    use quiltgrid::store::{MemoryStorage, PatternRecord, PatternStore, SANDBOX_ID, Storage};
    use quiltgrid::{DesignerError, Result};

    // Memory storage the test can inspect after handing it to the store
    #[derive(Clone, Default)]
    struct SharedStorage(Rc<RefCell<MemoryStorage>>);

    impl Storage for SharedStorage {
        fn persist(&mut self, key: &str, record: &PatternRecord) -> Result<()> {
            self.0.borrow_mut().persist(key, record)
        }

        fn retrieve(&self, key: &str) -> Result<Option<PatternRecord>> {
            self.0.borrow().retrieve(key)
        }

        fn remove(&mut self, key: &str) -> Result<()> {
            self.0.borrow_mut().remove(key)
        }

        fn keys(&self) -> Result<Vec<String>> {
            self.0.borrow().keys()
        }
    }

    struct FailingStorage;

    impl Storage for FailingStorage {
        fn persist(&mut self, key: &str, _record: &PatternRecord) -> Result<()> {
            Err(storage_error(key, "persist", "quota exceeded"))
        }

        fn retrieve(&self, _key: &str) -> Result<Option<PatternRecord>> {
            Ok(None)
        }

        fn remove(&mut self, _key: &str) -> Result<()> {
            Ok(())
        }

        fn keys(&self) -> Result<Vec<String>> {
            Err(storage_error("*", "list", "unavailable"))
        }
    }

    fn fixed_clock() -> u128 {
        1_700_000_000_000
    }

    fn shared_store() -> (PatternStore, SharedStorage) {
        let storage = SharedStorage::default();
        let store = PatternStore::new(Palette::default(), Box::new(storage.clone()));
        (store, storage)
    }

    fn striped(rows: usize, cols: usize) -> Grid {
        Grid::from_fn(rows, cols, |_, col| Some(Color::new(col % 7)))
    }

    // Tests every write is mirrored to storage under the pattern id
    // Verified by persisting only on save
    #[test]
    fn test_writes_are_persisted() {
        let (mut store, storage) = shared_store();

        store.set_generated(PatternKind::Diagonal, striped(2, 7));
        store.set_sandbox(striped(2, 7));

        let memory = storage.0.borrow();
        assert!(memory.contains("patternA"));
        assert!(memory.contains(SANDBOX_ID));
        assert_eq!(memory.len(), 2);
    }

    // Tests a cell edit changes exactly that cell and reaches storage
    // Verified by editing the transposed coordinate
    #[test]
    fn test_apply_cell_edit() {
        let (mut store, storage) = shared_store();
        store.set_sandbox(striped(2, 7));
        let before = store.sandbox().expect("sandbox").grid.clone();

        let previous = store
            .apply_cell_edit(SANDBOX_ID, 1, 3, Color::new(6))
            .expect("edit applies");
        assert_eq!(previous, Some(Color::new(3)));

        let after = &store.sandbox().expect("sandbox").grid;
        let changed: Vec<(usize, usize)> = after
            .cells()
            .zip(before.cells())
            .filter(|((_, a), (_, b))| a != b)
            .map(|((pos, _), _)| pos)
            .collect();
        assert_eq!(changed, vec![(1, 3)]);

        let persisted = storage
            .0
            .borrow()
            .retrieve(SANDBOX_ID)
            .ok()
            .flatten()
            .expect("persisted");
        assert_eq!(
            Grid::from_record(&persisted.grid, store.palette()).ok().as_ref(),
            Some(after)
        );
        assert_eq!(persisted.name.as_deref(), Some("Sandbox"));
    }

    // Tests edits on unknown patterns, cells or colors change nothing
    // Verified by creating missing patterns on edit
    #[test]
    fn test_apply_cell_edit_not_found() {
        let (mut store, _storage) = shared_store();
        store.set_sandbox(striped(2, 7));
        let before = store.sandbox().expect("sandbox").clone();

        for result in [
            store.apply_cell_edit("patternZ", 0, 0, Color::new(0)),
            store.apply_cell_edit(SANDBOX_ID, 2, 0, Color::new(0)),
            store.apply_cell_edit(SANDBOX_ID, 0, 7, Color::new(0)),
            store.apply_cell_edit(SANDBOX_ID, 0, 0, Color::new(7)),
        ] {
            assert!(matches!(result, Err(DesignerError::NotFound { .. })));
        }

        assert_eq!(store.sandbox(), Some(&before));
        assert_eq!(store.len(), 1);
    }

    // Tests saving copies the grid under a fresh id with a trimmed name
    // Verified by sharing one id between saves
    #[test]
    fn test_save_as_new() {
        let (mut store, storage) = shared_store();
        let grid = striped(2, 7);

        let first = store.save_as_new("  Spring  ", grid.clone()).expect("saved");
        let second = store.save_as_new("Spring", grid.clone()).expect("saved");

        assert_ne!(first, second);
        assert!(first.starts_with("saved-"));
        let names: Vec<Option<&str>> = store.saved().map(|p| p.name.as_deref()).collect();
        assert_eq!(names, vec![Some("Spring"), Some("Spring")]);
        assert_eq!(store.get(&first).map(|p| &p.grid), Some(&grid));
        assert!(storage.0.borrow().contains(&second));
    }

    // Tests blank names are rejected without creating a pattern
    // Verified by saving under an empty name
    #[test]
    fn test_save_as_new_rejects_blank_names() {
        let (mut store, storage) = shared_store();

        for name in ["", "   ", "\t"] {
            assert!(matches!(
                store.save_as_new(name, striped(1, 7)),
                Err(DesignerError::InvalidInput { .. })
            ));
        }
        assert!(store.is_empty());
        assert!(storage.0.borrow().is_empty());
    }

    // Tests ids list kinds, then the sandbox, then saved patterns
    // Verified by listing ids in hash order
    #[test]
    fn test_ids_order() {
        let (mut store, _storage) = shared_store();
        let saved = store.save_as_new("First", striped(1, 7)).expect("saved");
        store.set_sandbox(striped(1, 7));
        store.set_generated(PatternKind::LogCabin, striped(1, 7));
        store.set_generated(PatternKind::Diagonal, striped(1, 7));

        assert_eq!(
            store.ids(),
            vec!["patternA", "patternD", SANDBOX_ID, saved.as_str()]
        );
        assert_eq!(
            store.get(PatternKind::LogCabin.id()).and_then(|p| p.name.as_deref()),
            Some("Log Cabin")
        );
    }

    // Tests reset clears memory and storage, saved patterns included
    // Verified by keeping saved patterns across resets
    #[test]
    fn test_reset() {
        let (mut store, storage) = shared_store();
        store.set_generated(PatternKind::BugEye, striped(1, 7));
        store.set_sandbox(striped(1, 7));
        store.save_as_new("Keep?", striped(1, 7)).expect("saved");

        store.reset();

        assert!(store.is_empty());
        assert_eq!(store.saved().count(), 0);
        assert!(storage.0.borrow().is_empty());
    }

    // Tests restore reloads grids written by an earlier store
    // Verified by restoring from the in-memory copy
    #[test]
    fn test_restore() {
        let storage = SharedStorage::default();
        let mut first = PatternStore::new(Palette::default(), Box::new(storage.clone()));
        first.set_generated(PatternKind::RandomFill, striped(2, 7));

        let mut second = PatternStore::new(Palette::default(), Box::new(storage));
        assert!(second.restore("patternB").expect("readable"));
        assert!(!second.restore("patternC").expect("readable"));

        let restored = second.get("patternB").expect("restored");
        assert_eq!(restored.grid, striped(2, 7));
        assert_eq!(restored.name.as_deref(), Some("Random"));
    }

    // Tests persistence failures keep the in-memory change and are reported
    // Verified by rolling back the edit on failure
    #[test]
    fn test_persistence_failure_is_reported() {
        let mut store = PatternStore::new(Palette::default(), Box::new(FailingStorage));
        store.set_sandbox(striped(1, 7));
        store
            .apply_cell_edit(SANDBOX_ID, 0, 0, Color::new(5))
            .expect("edit applies in memory");

        assert_eq!(
            store.sandbox().and_then(|p| p.grid.get(0, 0)),
            Some(Color::new(5))
        );

        let failures = store.take_persistence_failures();
        assert_eq!(failures.len(), 2);
        assert!(failures
            .iter()
            .all(|err| matches!(err, DesignerError::Storage { key, .. } if key == SANDBOX_ID)));
        assert!(store.take_persistence_failures().is_empty());
    }

    // Tests ids minted in the same millisecond get increasing suffixes
    // Verified by reusing the bare timestamp id
    #[test]
    fn test_saved_id_suffix_on_collision() {
        let mut store =
            PatternStore::with_clock(Palette::default(), Box::new(MemoryStorage::new()), fixed_clock);

        let ids: Vec<String> = ["One", "Two", "Three"]
            .into_iter()
            .map(|name| store.save_as_new(name, striped(1, 7)).expect("saved"))
            .collect();

        assert_eq!(
            ids,
            vec![
                "saved-1700000000000",
                "saved-1700000000000-1",
                "saved-1700000000000-2"
            ]
        );
        assert_eq!(
            store.get("saved-1700000000000-2").and_then(|p| p.name.as_deref()),
            Some("Three")
        );
    }

    // Tests reset removes keys a previous session persisted but never loaded
    // Verified by removing only the ids held in memory
    #[test]
    fn test_reset_removes_keys_from_earlier_sessions() {
        let storage = SharedStorage::default();
        let mut earlier = PatternStore::new(Palette::default(), Box::new(storage.clone()));
        earlier.set_sandbox(striped(1, 7));
        earlier.save_as_new("Old", striped(1, 7)).expect("saved");
        assert_eq!(storage.0.borrow().len(), 2);

        let mut later = PatternStore::new(Palette::default(), Box::new(storage.clone()));
        later.reset();

        assert!(storage.0.borrow().is_empty());
        assert!(later.take_persistence_failures().is_empty());
    }

    // Tests saved patterns come back in save order with their names
    // Verified by sorting restored ids as plain strings
    #[test]
    fn test_restore_saved() {
        let storage = SharedStorage::default();
        let mut earlier = PatternStore::with_clock(
            Palette::default(),
            Box::new(storage.clone()),
            fixed_clock,
        );
        earlier.set_sandbox(striped(1, 7));
        for name in ["First", "Second"] {
            earlier.save_as_new(name, striped(1, 7)).expect("saved");
        }
        storage
            .0
            .borrow_mut()
            .persist(
                "saved-999",
                &PatternRecord {
                    name: Some("Oldest".to_string()),
                    grid: striped(1, 7).to_record(&Palette::default()),
                },
            )
            .expect("persists");

        let mut later = PatternStore::new(Palette::default(), Box::new(storage));
        let restored = later.restore_saved().expect("readable");

        assert_eq!(
            restored,
            vec!["saved-999", "saved-1700000000000", "saved-1700000000000-1"]
        );
        let names: Vec<Option<&str>> = later.saved().map(|p| p.name.as_deref()).collect();
        assert_eq!(names, vec![Some("Oldest"), Some("First"), Some("Second")]);
        assert_eq!(later.ids(), restored);
        assert!(later.sandbox().is_none());
    }

    // Tests restoring one saved id by hand also lists it and keeps a name
    // Verified by inserting restored saved patterns without a name
    #[test]
    fn test_restore_single_saved_pattern() {
        let storage = SharedStorage::default();
        storage
            .0
            .borrow_mut()
            .persist(
                "saved-42",
                &PatternRecord {
                    name: None,
                    grid: striped(1, 7).to_record(&Palette::default()),
                },
            )
            .expect("persists");

        let mut store = PatternStore::new(Palette::default(), Box::new(storage));
        assert!(store.restore("saved-42").expect("readable"));
        assert!(store.restore("saved-42").expect("readable"));

        assert_eq!(store.ids(), vec!["saved-42"]);
        assert_eq!(
            store.get("saved-42").and_then(|p| p.name.as_deref()),
            Some("saved-42")
        );
    }

    // Tests an unlistable storage is reported and reset still clears memory
    // Verified by aborting the reset when keys cannot be listed
    #[test]
    fn test_reset_reports_unlistable_storage() {
        let mut store = PatternStore::new(Palette::default(), Box::new(FailingStorage));
        store.set_sandbox(striped(1, 7));
        store.take_persistence_failures();

        store.reset();

        assert!(store.is_empty());
        assert_eq!(store.take_persistence_failures().len(), 1);
    }
}
