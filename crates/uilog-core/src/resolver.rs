//! Row-by-row recognition of UI object instances.
//!
//! Each row is turned into a set of object groups: the main object plus one
//! group per further object type the row mentions. Groups are resolved from
//! the highest hierarchy level down so lower levels can pick up the parents
//! minted earlier in the same row.

use tracing::trace;
use uilog_classify::ClassifiedLog;
use uilog_lexicon::Lexicon;
use uilog_model::ocel::StringMap;
use uilog_model::{
    ColumnRole, DedupKey, HierarchyLevel, InstanceId, KeyPart, ObjectType, UiLog,
};

use crate::context::{CursorEntry, CursorSlot, ResolutionContext, RowResolution, UiOccurrence};

/// Context-map key for a product name taken from an object-type cell.
pub const NAME_ATTRIBUTE: &str = "name";

/// Columns of one row that describe the same object type.
#[derive(Debug, Clone, PartialEq)]
struct ObjectGroup {
    object_type: ObjectType,
    level: HierarchyLevel,
    /// Product name (`chrome`) when the type came from a named product.
    name: Option<String>,
    columns: Vec<usize>,
    is_main: bool,
    /// Column that introduced the group; orders groups of one level.
    anchor: usize,
}

/// Resolves rows of a classified log against a [`ResolutionContext`].
pub struct HierarchyResolver<'a> {
    log: &'a UiLog,
    classified: &'a ClassifiedLog,
    lexicon: &'a Lexicon,
    main_column: Option<usize>,
    object_type_columns: Vec<usize>,
    bound_types: Vec<(ObjectType, Vec<usize>)>,
}

impl<'a> HierarchyResolver<'a> {
    pub fn new(log: &'a UiLog, classified: &'a ClassifiedLog, lexicon: &'a Lexicon) -> Self {
        let bound_types = classified
            .plan
            .bound_types()
            .into_iter()
            .map(|ty| {
                let columns = classified.plan.bound_to(&ty);
                (ty, columns)
            })
            .collect();
        Self {
            log,
            classified,
            lexicon,
            main_column: classified.main_object_column(),
            object_type_columns: classified.columns_with(ColumnRole::ObjectType),
            bound_types,
        }
    }

    /// Resolves one row and commits its cursor updates.
    pub fn resolve_row(&self, row: usize, ctx: &mut ResolutionContext) -> RowResolution {
        let mut groups = self.collect_groups(row, ctx);
        groups.sort_by_key(|group| (group.level, !group.is_main, group.anchor));

        let mut resolution = RowResolution::default();
        let mut highest = Vec::new();
        let mut secondary = Vec::new();
        for group in &groups {
            if group.is_main {
                resolution.main_type = Some(group.object_type.clone());
            }
            let Some(instance) = self.resolve_group(row, group, ctx) else {
                continue;
            };
            if group.is_main {
                resolution.main = Some(instance);
            } else {
                if group.level == HierarchyLevel::Highest {
                    highest.push(instance.clone());
                }
                secondary.push(instance);
            }
        }

        let mut related = Vec::new();
        if resolution
            .main_type
            .as_ref()
            .is_some_and(ObjectType::is_website)
            && let Some(app) = ctx.cursor.get(CursorSlot::Application)
        {
            related.push(app.instance.clone());
        }
        related.extend(highest);
        related.extend(secondary);
        let mut seen = Vec::with_capacity(related.len());
        for id in related {
            if Some(&id) != resolution.main.as_ref() && !seen.contains(&id) {
                seen.push(id);
            }
        }
        resolution.related = seen;

        ctx.cursor.commit();
        trace!(
            row,
            main = resolution.main.as_ref().map(InstanceId::as_str),
            related = resolution.related.len(),
            "row resolved"
        );
        resolution
    }

    /// Canonical type of an object-type cell and the product name it carries.
    fn object_type_of(&self, raw: &str) -> (ObjectType, Option<String>) {
        let object_type = self
            .lexicon
            .match_ui_object_value(raw)
            .unwrap_or_else(|| ObjectType::new(raw));
        let name = self.lexicon.named_product(raw).map(str::to_string);
        (object_type, name)
    }

    fn new_group(&self, object_type: ObjectType, anchor: usize) -> ObjectGroup {
        ObjectGroup {
            level: self.lexicon.level_of(&object_type),
            object_type,
            name: None,
            columns: Vec::new(),
            is_main: false,
            anchor,
        }
    }

    fn collect_groups(&self, row: usize, ctx: &ResolutionContext) -> Vec<ObjectGroup> {
        let has_value = |col: &usize| self.log.cell(row, *col).is_some();
        let mut groups: Vec<ObjectGroup> = Vec::new();

        if let Some(col) = self.main_column
            && let Some(raw) = self.log.cell(row, col)
        {
            let (object_type, name) = self.object_type_of(raw);
            let mut group = self.new_group(object_type, col);
            group.name = name;
            group.is_main = true;
            groups.push(group);
        }

        for &col in &self.object_type_columns {
            let Some(raw) = self.log.cell(row, col) else {
                continue;
            };
            let (object_type, name) = self.object_type_of(raw);
            match groups.iter_mut().find(|g| g.object_type == object_type) {
                Some(group) => {
                    if group.name.is_none() {
                        group.name = name;
                    }
                }
                None => {
                    let mut group = self.new_group(object_type, col);
                    group.name = name;
                    groups.push(group);
                }
            }
        }

        for (object_type, columns) in &self.bound_types {
            let present: Vec<usize> = columns.iter().copied().filter(has_value).collect();
            let Some(&anchor) = present.first() else {
                continue;
            };
            match groups.iter_mut().find(|g| g.object_type == *object_type) {
                Some(group) => group.columns.extend(present),
                None => {
                    let mut group = self.new_group(object_type.clone(), anchor);
                    group.columns = present;
                    groups.push(group);
                }
            }
        }

        // Without a main object value the highest-level group found so far
        // stands in, else the unknown type.
        if !groups.iter().any(|g| g.is_main) {
            match groups
                .iter_mut()
                .min_by_key(|g| (g.level, g.anchor))
            {
                Some(group) => group.is_main = true,
                None => {
                    let mut group = self.new_group(ObjectType::unknown(), 0);
                    group.is_main = true;
                    groups.push(group);
                }
            }
        }
        let main_index = groups.iter().position(|g| g.is_main).unwrap_or(0);

        let unmatched: Vec<usize> = self
            .classified
            .plan
            .unmatched
            .iter()
            .copied()
            .filter(has_value)
            .collect();
        groups[main_index].columns.extend(unmatched);

        for (col, candidates) in self.classified.plan.undecided() {
            if !has_value(&col) {
                continue;
            }
            let main_type = &groups[main_index].object_type;
            if candidates.contains(main_type) {
                groups[main_index].columns.push(col);
                continue;
            }
            let available: Vec<&ObjectType> = candidates
                .iter()
                .filter(|ty| {
                    let slot = CursorSlot::for_type(ty, self.lexicon.level_of(ty));
                    ctx.cursor
                        .get(slot)
                        .is_some_and(|entry| entry.object_type == **ty)
                })
                .collect();
            match available.as_slice() {
                [object_type] => match groups.iter_mut().find(|g| g.object_type == **object_type) {
                    Some(group) => group.columns.push(col),
                    None => {
                        let mut group = self.new_group((*object_type).clone(), col);
                        group.columns.push(col);
                        groups.push(group);
                    }
                },
                _ => groups[main_index].columns.push(col),
            }
        }

        for group in &mut groups {
            group.columns.sort_unstable();
            group.columns.dedup();
        }
        groups
    }

    /// Builds the dedup key of a group, resolves its instance and records a
    /// snapshot. Groups without any attribute produce no instance.
    fn resolve_group(
        &self,
        row: usize,
        group: &ObjectGroup,
        ctx: &mut ResolutionContext,
    ) -> Option<InstanceId> {
        let mut parts = Vec::new();
        let mut cmap = StringMap::new();
        let mut vmap = StringMap::new();

        if let Some(name) = &group.name {
            parts.push(KeyPart::Name(name.clone()));
            cmap.insert(NAME_ATTRIBUTE.to_string(), name.clone());
        }
        for &col in &group.columns {
            let Some(value) = self.log.cell(row, col) else {
                continue;
            };
            let header = self.log.header(col);
            match self.classified.role(col) {
                ColumnRole::ContextAttribute => {
                    parts.push(KeyPart::Context(value.to_string()));
                    cmap.insert(header.to_string(), value.to_string());
                }
                ColumnRole::ValueAttribute => {
                    parts.push(KeyPart::ValueColumn(header.to_string()));
                    vmap.insert(header.to_string(), value.to_string());
                }
                _ => {}
            }
        }
        if parts.is_empty() {
            trace!(row, object_type = %group.object_type.as_str(), "no attributes, no instance");
            return None;
        }

        let parents = ctx.cursor.parents(group.level);
        parts.extend(parents.iter().cloned().map(KeyPart::Instance));
        let key = DedupKey::from_parts(parts)?;
        let (instance, minted) = ctx.ui_instances.resolve(&group.object_type, key);
        if minted {
            trace!(row, instance = %instance, "instance minted");
        }

        let part_of = parents.last().filter(|parent| **parent != instance).cloned();
        ctx.cursor.stage(
            CursorSlot::for_type(&group.object_type, group.level),
            CursorEntry {
                instance: instance.clone(),
                object_type: group.object_type.clone(),
                row,
            },
        );
        ctx.occurrences.push(UiOccurrence {
            instance: instance.clone(),
            object_type: group.object_type.clone(),
            row,
            is_main: group.is_main,
            cmap,
            vmap,
            part_of,
        });
        Some(instance)
    }
}

#[cfg(test)]
mod tests {
    use uilog_classify::{ColumnBinding, DecisionReason, ObjectColumnPlan, RoleDecision};
    use uilog_ingest::profile_columns;

    use super::*;

    const UI_OBJECT: usize = 1;

    fn ty(name: &str) -> ObjectType {
        ObjectType::new(name)
    }

    /// Column 0 is the activity and column 1 the main object type; the
    /// remaining columns are context attributes with the given bindings.
    fn classified(log: &UiLog, bindings: &[(usize, ColumnBinding)]) -> ClassifiedLog {
        let decisions = (0..log.width())
            .map(|index| {
                let role = match index {
                    0 => ColumnRole::Activity,
                    UI_OBJECT => ColumnRole::MainObjectType,
                    _ => ColumnRole::ContextAttribute,
                };
                RoleDecision {
                    index,
                    header: log.header(index).to_string(),
                    role,
                    reason: DecisionReason::LowUniqueness,
                    attribute: None,
                }
            })
            .collect();
        let plan = ObjectColumnPlan {
            bindings: bindings.iter().cloned().collect(),
            ..ObjectColumnPlan::default()
        };
        ClassifiedLog {
            decisions,
            profiles: profile_columns(log),
            plan,
        }
    }

    fn label_log(rows: &[[&str; 4]]) -> (UiLog, ClassifiedLog) {
        let log = UiLog::from_rows(["activity", "ui object", "label", "file name"], rows);
        let classified = classified(
            &log,
            &[
                (
                    2,
                    ColumnBinding::Undecided(vec![ty("field"), ty("button"), ty("image")]),
                ),
                (3, ColumnBinding::Bound(ty("file"))),
            ],
        );
        (log, classified)
    }

    fn resolve_all(log: &UiLog, classified: &ClassifiedLog) -> ResolutionContext {
        let lexicon = Lexicon::builtin().unwrap();
        let resolver = HierarchyResolver::new(log, classified, &lexicon);
        let mut ctx = ResolutionContext::new();
        for row in 0..log.height() {
            let resolution = resolver.resolve_row(row, &mut ctx);
            ctx.rows.push(resolution);
        }
        ctx
    }

    fn occurrence<'c>(ctx: &'c ResolutionContext, row: usize, id: &InstanceId) -> &'c UiOccurrence {
        ctx.occurrences
            .iter()
            .find(|o| o.row == row && o.instance == *id)
            .unwrap()
    }

    #[test]
    fn undecided_column_joins_main_when_main_type_is_a_candidate() {
        let (log, classified) = label_log(&[["click", "button", "ok", ""]]);
        let ctx = resolve_all(&log, &classified);

        let row = &ctx.rows[0];
        assert_eq!(row.main_type, Some(ty("button")));
        assert!(row.related.is_empty());
        let main = occurrence(&ctx, 0, row.main.as_ref().unwrap());
        assert!(main.is_main);
        assert_eq!(main.cmap.get("label").map(String::as_str), Some("ok"));
    }

    #[test]
    fn undecided_column_follows_the_one_candidate_on_the_cursor() {
        let (log, classified) = label_log(&[
            ["type", "field", "name", ""],
            ["save", "file", "name", "report.xlsx"],
        ]);
        let ctx = resolve_all(&log, &classified);

        let row = &ctx.rows[1];
        assert_eq!(row.main_type, Some(ty("file")));
        let main = occurrence(&ctx, 1, row.main.as_ref().unwrap());
        assert_eq!(
            main.cmap.get("file name").map(String::as_str),
            Some("report.xlsx")
        );
        assert!(!main.cmap.contains_key("label"));

        assert_eq!(row.related.len(), 1);
        let field = occurrence(&ctx, 1, &row.related[0]);
        assert_eq!(field.object_type, ty("field"));
        assert!(!field.is_main);
        assert_eq!(field.cmap.get("label").map(String::as_str), Some("name"));
    }

    #[test]
    fn undecided_column_without_cursor_match_joins_main() {
        let (log, classified) = label_log(&[["save", "file", "name", "report.xlsx"]]);
        let ctx = resolve_all(&log, &classified);

        let row = &ctx.rows[0];
        assert!(row.related.is_empty());
        let main = occurrence(&ctx, 0, row.main.as_ref().unwrap());
        assert_eq!(main.object_type, ty("file"));
        assert_eq!(main.cmap.get("label").map(String::as_str), Some("name"));
        assert_eq!(
            main.cmap.get("file name").map(String::as_str),
            Some("report.xlsx")
        );
    }

    #[test]
    fn undecided_column_with_several_cursor_matches_joins_main() {
        let log = UiLog::from_rows(
            ["activity", "ui object", "file name", "sheet name", "title"],
            [
                ["open", "excel", "report.xlsx", "summary", ""],
                ["type", "excel", "", "", "quarterly"],
            ],
        );
        let classified = classified(
            &log,
            &[
                (2, ColumnBinding::Bound(ty("file"))),
                (3, ColumnBinding::Bound(ty("sheet"))),
                (4, ColumnBinding::Undecided(vec![ty("file"), ty("sheet")])),
            ],
        );
        let ctx = resolve_all(&log, &classified);

        let row = &ctx.rows[1];
        assert_eq!(row.main_type, Some(ty("application")));
        assert!(row.related.is_empty());
        let main = occurrence(&ctx, 1, row.main.as_ref().unwrap());
        assert_eq!(main.cmap.get("title").map(String::as_str), Some("quarterly"));
        assert_eq!(main.cmap.get(NAME_ATTRIBUTE).map(String::as_str), Some("excel"));
    }

    #[test]
    fn highest_level_group_stands_in_for_missing_main_value() {
        let log = UiLog::from_rows(
            ["activity", "ui object", "sheet name", "file name"],
            [["open", "", "summary", "report.xlsx"], ["wait", "", "", ""]],
        );
        let classified = classified(
            &log,
            &[
                (2, ColumnBinding::Bound(ty("sheet"))),
                (3, ColumnBinding::Bound(ty("file"))),
            ],
        );
        let ctx = resolve_all(&log, &classified);

        let row = &ctx.rows[0];
        assert_eq!(row.main_type, Some(ty("file")));
        let main = occurrence(&ctx, 0, row.main.as_ref().unwrap());
        assert!(main.is_main);
        assert_eq!(
            main.cmap.get("file name").map(String::as_str),
            Some("report.xlsx")
        );
        assert_eq!(row.related.len(), 1);
        let sheet = occurrence(&ctx, 0, &row.related[0]);
        assert_eq!(sheet.object_type, ty("sheet"));
        assert_eq!(sheet.part_of.as_ref(), row.main.as_ref());

        let empty = &ctx.rows[1];
        assert_eq!(empty.main_type, Some(ObjectType::unknown()));
        assert_eq!(empty.main, None);
        assert!(empty.related.is_empty());
    }
}
