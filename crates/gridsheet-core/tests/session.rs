//! End-to-end session workflows across selection, commands, formulas,
//! history, and persistence.

use gridsheet_core::{Aggregate, CellAddr, MemoryStore, Session};

fn session() -> Session {
    Session::new("doc", Box::new(MemoryStore::new()))
}

#[test]
fn test_drag_select_then_aggregate_then_undo() {
    let mut s = session();
    s.set_cell(CellAddr::new(0, 0), "2").unwrap();
    s.set_cell(CellAddr::new(1, 0), "4").unwrap();
    s.set_cell(CellAddr::new(2, 0), "6").unwrap();

    // Drag from A1 down to A3.
    s.selection.pointer_down(CellAddr::new(0, 0));
    s.selection.pointer_enter(CellAddr::new(1, 0));
    s.selection.pointer_enter(CellAddr::new(2, 0));
    s.selection.pointer_up();

    assert_eq!(s.apply_aggregate(Aggregate::Average).unwrap(), "4.00");

    // Manual placement holds the result until it is inserted.
    s.selection.pointer_down(CellAddr::new(4, 0));
    s.selection.pointer_up();
    s.insert_pending_result().unwrap();
    assert_eq!(s.raw_value(CellAddr::new(4, 0)), "4.00");

    assert!(s.undo());
    assert_eq!(s.raw_value(CellAddr::new(4, 0)), "");
}

#[test]
fn test_formula_reflects_column_delete_shift() {
    let mut s = session();
    s.set_cell(CellAddr::new(0, 0), "3").unwrap(); // A1
    s.set_cell(CellAddr::new(0, 1), "4").unwrap(); // B1
    s.set_cell(CellAddr::new(0, 2), "100").unwrap(); // C1
    s.set_cell(CellAddr::new(1, 0), "=A1+B1").unwrap(); // A2
    assert_eq!(s.display_value(CellAddr::new(1, 0)), "7");

    // Delete column B: C shifts into its place and the formula, which
    // still names B1, now reads the shifted value. No stale cache.
    s.selection.select_rect(CellAddr::new(0, 1), CellAddr::new(0, 1));
    s.delete_selected_columns().unwrap();
    assert_eq!(s.raw_value(CellAddr::new(0, 1)), "100");
    assert_eq!(s.display_value(CellAddr::new(1, 0)), "103");

    assert!(s.undo());
    assert_eq!(s.display_value(CellAddr::new(1, 0)), "7");
}

#[test]
fn test_formula_past_extents_displays_ref_error() {
    let mut s = session(); // 50x20 default grid
    s.set_cell(CellAddr::new(0, 0), "=Z999").unwrap();
    assert_eq!(s.display_value(CellAddr::new(0, 0)), "#REF!");
    // The raw formula stays the source of truth.
    assert_eq!(s.raw_value(CellAddr::new(0, 0)), "=Z999");
}

#[test]
fn test_copy_paste_undo_roundtrip() {
    let mut s = session();
    s.set_cell(CellAddr::new(0, 0), "a").unwrap();
    s.set_cell(CellAddr::new(0, 1), "=A1").unwrap();
    s.selection.select_rect(CellAddr::new(0, 0), CellAddr::new(0, 1));
    s.copy().unwrap();

    s.selection.select_rect(CellAddr::new(9, 9), CellAddr::new(9, 9));
    assert_eq!(s.paste().unwrap(), 2);
    assert_eq!(s.raw_value(CellAddr::new(9, 9)), "a");
    assert_eq!(s.raw_value(CellAddr::new(9, 10)), "=A1");

    assert!(s.undo());
    assert_eq!(s.raw_value(CellAddr::new(9, 9)), "");
    assert!(s.redo());
    assert_eq!(s.raw_value(CellAddr::new(9, 10)), "=A1");
}

#[test]
fn test_structural_edits_persist_to_store() {
    use gridsheet_core::{DocumentSnapshot, DocumentStore};
    use gridsheet_core::Result;
    use std::sync::Arc;

    struct Shared(Arc<MemoryStore>);
    impl DocumentStore for Shared {
        fn load(&self, id: &str) -> Result<Option<DocumentSnapshot>> {
            self.0.load(id)
        }
        fn save(&self, id: &str, snapshot: &DocumentSnapshot) -> Result<()> {
            self.0.save(id, snapshot)
        }
    }

    let store = Arc::new(MemoryStore::new());
    {
        let mut s = Session::open("doc", Box::new(Shared(store.clone()))).unwrap();
        s.add_row();
        s.set_cell(CellAddr::new(50, 0), "bottom").unwrap();
    }
    let reopened = Session::open("doc", Box::new(Shared(store))).unwrap();
    assert_eq!(reopened.grid.row_count(), 51);
    assert_eq!(reopened.raw_value(CellAddr::new(50, 0)), "bottom");
}
