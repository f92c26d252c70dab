//! Run-scoped resolution state.
//!
//! A [`ResolutionContext`] is created fresh for every run and threaded by
//! reference through the row loop. It owns the hierarchy cursor, the
//! type-scoped dedup tables with their id counters, and everything the map
//! builder later folds into the output document.

use std::collections::HashMap;

use indexmap::IndexMap;
use uilog_model::{DedupKey, HierarchyLevel, InstanceId, ObjectType, ocel::StringMap};

/// One slot of the hierarchy cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CursorSlot {
    Website,
    Application,
    Second,
    Third,
    Fourth,
}

impl CursorSlot {
    pub const ALL: [CursorSlot; 5] = [
        CursorSlot::Website,
        CursorSlot::Application,
        CursorSlot::Second,
        CursorSlot::Third,
        CursorSlot::Fourth,
    ];

    /// Websites have their own slot; every other type uses its level's slot.
    pub fn for_type(object_type: &ObjectType, level: HierarchyLevel) -> Self {
        if object_type.is_website() {
            return CursorSlot::Website;
        }
        match level {
            HierarchyLevel::Highest => CursorSlot::Application,
            HierarchyLevel::Second => CursorSlot::Second,
            HierarchyLevel::Third => CursorSlot::Third,
            HierarchyLevel::Fourth => CursorSlot::Fourth,
        }
    }

    fn index(self) -> usize {
        match self {
            CursorSlot::Website => 0,
            CursorSlot::Application => 1,
            CursorSlot::Second => 2,
            CursorSlot::Third => 3,
            CursorSlot::Fourth => 4,
        }
    }
}

/// Last-seen instance of a cursor slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorEntry {
    pub instance: InstanceId,
    pub object_type: ObjectType,
    pub row: usize,
}

/// Last-seen instance per hierarchy slot, carried forward across rows.
///
/// Updates made while a row is resolved are staged and only become the
/// committed state once the row is finished. Each slot accepts one update
/// per row; later ones are ignored.
#[derive(Debug, Clone, Default)]
pub struct HierarchyCursor {
    committed: [Option<CursorEntry>; 5],
    staged: [Option<CursorEntry>; 5],
}

impl HierarchyCursor {
    /// The slot as seen from the current row: this row's update, else the
    /// committed entry.
    pub fn get(&self, slot: CursorSlot) -> Option<&CursorEntry> {
        self.staged[slot.index()]
            .as_ref()
            .or(self.committed[slot.index()].as_ref())
    }

    /// The committed entry, ignoring this row's updates.
    pub fn committed(&self, slot: CursorSlot) -> Option<&CursorEntry> {
        self.committed[slot.index()].as_ref()
    }

    /// True when the slot was updated by the current row.
    pub fn seen_in_row(&self, slot: CursorSlot) -> bool {
        self.staged[slot.index()].is_some()
    }

    /// Stages an update. Returns false when the slot was already updated by
    /// this row.
    pub fn stage(&mut self, slot: CursorSlot, entry: CursorEntry) -> bool {
        let staged = &mut self.staged[slot.index()];
        if staged.is_some() {
            return false;
        }
        *staged = Some(entry);
        true
    }

    /// Makes this row's updates the committed state.
    pub fn commit(&mut self) {
        for (committed, staged) in self.committed.iter_mut().zip(self.staged.iter_mut()) {
            if let Some(entry) = staged.take() {
                *committed = Some(entry);
            }
        }
    }

    /// Instances injected as implicit parents of an object at `level`.
    ///
    /// Second and third level objects get the application and, for the third
    /// level, the second-level instance. Fourth level objects get the whole
    /// chain when a third-level instance was seen in this row, and the
    /// website otherwise. Empty slots are skipped.
    pub fn parents(&self, level: HierarchyLevel) -> Vec<InstanceId> {
        let slots: &[CursorSlot] = match level {
            HierarchyLevel::Highest => &[],
            HierarchyLevel::Second => &[CursorSlot::Application],
            HierarchyLevel::Third => &[CursorSlot::Application, CursorSlot::Second],
            HierarchyLevel::Fourth if self.seen_in_row(CursorSlot::Third) => &[
                CursorSlot::Application,
                CursorSlot::Second,
                CursorSlot::Third,
            ],
            HierarchyLevel::Fourth => &[CursorSlot::Website],
        };
        slots
            .iter()
            .filter_map(|slot| self.get(*slot))
            .map(|entry| entry.instance.clone())
            .collect()
    }
}

/// Type-scoped dedup table with per-type id counters.
#[derive(Debug, Clone, Default)]
pub struct DedupTable {
    ids: HashMap<(ObjectType, DedupKey), InstanceId>,
    counters: HashMap<ObjectType, usize>,
}

impl DedupTable {
    /// Looks up the instance for `key`, minting `<type>_<n>` on first sight.
    /// The flag is true when a new id was minted.
    pub fn resolve(&mut self, object_type: &ObjectType, key: DedupKey) -> (InstanceId, bool) {
        let entry_key = (object_type.clone(), key);
        if let Some(id) = self.ids.get(&entry_key) {
            return (id.clone(), false);
        }
        let counter = self.counters.entry(object_type.clone()).or_insert(0);
        *counter += 1;
        let id = InstanceId::mint(object_type.as_str(), *counter);
        self.ids.insert(entry_key, id.clone());
        (id, true)
    }

    pub fn get(&self, object_type: &ObjectType, key: &DedupKey) -> Option<&InstanceId> {
        self.ids.get(&(object_type.clone(), key.clone()))
    }

    /// Number of minted instances.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Highest counter value minted for `object_type`.
    pub fn count_of(&self, object_type: &ObjectType) -> usize {
        self.counters.get(object_type).copied().unwrap_or(0)
    }
}

/// Attribute snapshot of a UI object instance taken at one row.
#[derive(Debug, Clone, PartialEq)]
pub struct UiOccurrence {
    pub instance: InstanceId,
    pub object_type: ObjectType,
    pub row: usize,
    pub is_main: bool,
    pub cmap: StringMap,
    pub vmap: StringMap,
    pub part_of: Option<InstanceId>,
}

/// A process object as captured on first mention.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessRecord {
    pub object_type: String,
    pub amap: StringMap,
}

/// What one row resolved to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowResolution {
    pub main: Option<InstanceId>,
    pub main_type: Option<ObjectType>,
    /// Related and secondary UI objects, deduplicated, main excluded.
    pub related: Vec<InstanceId>,
    pub process_objects: Vec<InstanceId>,
}

/// All mutable state of one run.
#[derive(Debug, Clone, Default)]
pub struct ResolutionContext {
    pub cursor: HierarchyCursor,
    pub ui_instances: DedupTable,
    pub process_instances: DedupTable,
    /// Snapshots in row order; an instance's first snapshot is its mint.
    pub occurrences: Vec<UiOccurrence>,
    pub process_records: IndexMap<InstanceId, ProcessRecord>,
    /// One entry per row, in row order.
    pub rows: Vec<RowResolution>,
}

impl ResolutionContext {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use uilog_model::KeyPart;

    use super::*;

    fn entry(id: &str, ty: &str, row: usize) -> CursorEntry {
        CursorEntry {
            instance: InstanceId::mint(ty, id.parse().unwrap()),
            object_type: ObjectType::new(ty),
            row,
        }
    }

    #[test]
    fn staged_updates_are_visible_but_not_committed() {
        let mut cursor = HierarchyCursor::default();
        assert!(cursor.stage(CursorSlot::Application, entry("1", "application", 0)));
        assert!(!cursor.stage(CursorSlot::Application, entry("2", "application", 0)));
        assert_eq!(
            cursor.get(CursorSlot::Application).unwrap().instance.as_str(),
            "application_1"
        );
        assert!(cursor.committed(CursorSlot::Application).is_none());
        cursor.commit();
        assert!(!cursor.seen_in_row(CursorSlot::Application));
        assert_eq!(
            cursor
                .committed(CursorSlot::Application)
                .unwrap()
                .instance
                .as_str(),
            "application_1"
        );
    }

    #[test]
    fn fourth_level_parents_depend_on_third_level_in_row() {
        let mut cursor = HierarchyCursor::default();
        cursor.stage(CursorSlot::Website, entry("1", "website", 0));
        cursor.stage(CursorSlot::Application, entry("1", "application", 0));
        cursor.stage(CursorSlot::Second, entry("1", "file", 0));
        cursor.stage(CursorSlot::Third, entry("1", "sheet", 0));
        let ids = |v: Vec<InstanceId>| v.into_iter().map(String::from).collect::<Vec<_>>();
        assert_eq!(
            ids(cursor.parents(HierarchyLevel::Fourth)),
            ["application_1", "file_1", "sheet_1"]
        );
        cursor.commit();
        assert_eq!(ids(cursor.parents(HierarchyLevel::Fourth)), ["website_1"]);
        assert_eq!(
            ids(cursor.parents(HierarchyLevel::Third)),
            ["application_1", "file_1"]
        );
        assert!(cursor.parents(HierarchyLevel::Highest).is_empty());
    }

    #[test]
    fn dedup_table_is_type_scoped() {
        let mut table = DedupTable::default();
        let key = DedupKey::Single(KeyPart::Context("report".into()));
        let file = ObjectType::new("file");
        let sheet = ObjectType::new("sheet");

        let (first, minted) = table.resolve(&file, key.clone());
        assert!(minted);
        assert_eq!(first.as_str(), "file_1");
        assert_eq!(table.resolve(&file, key.clone()), (first, false));
        assert_eq!(table.resolve(&sheet, key.clone()).0.as_str(), "sheet_1");

        let other = DedupKey::Single(KeyPart::ValueColumn("report".into()));
        assert_eq!(table.resolve(&file, other).0.as_str(), "file_2");
        assert_eq!(table.count_of(&file), 2);
        assert_eq!(table.len(), 3);
    }
}
