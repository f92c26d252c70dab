use std::collections::BTreeMap;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use uilog_classify::{ClassifiedLog, ColumnBinding};
use uilog_core::{Transformation, part_of_cycles};
use uilog_ingest::{PreparedLog, PreprocessReport};
use uilog_lexicon::Lexicon;
use uilog_model::{ColumnRole, HierarchyLevel, ObjectType};

/// Run summary for `convert`. Goes to stderr since stdout may carry JSON.
pub fn print_convert_summary(result: &Transformation) {
    let document = &result.document;
    eprintln!("Rows: {}", result.prepared.log.height());
    if let Some(line) = preprocess_line(&result.prepared.report) {
        eprintln!("Preprocessing: {line}");
    }

    let mut by_type: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    for object in document.ui_objects.values() {
        *by_type.entry(("ui", object.object_type.as_str())).or_default() += 1;
    }
    for object in document.process_objects.values() {
        *by_type
            .entry(("process", object.object_type.as_str()))
            .or_default() += 1;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kind"),
        header_cell("Type"),
        header_cell("Instances"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for ((kind, object_type), count) in &by_type {
        table.add_row(vec![
            kind_cell(kind),
            Cell::new(object_type),
            Cell::new(count),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} events", document.events.len()))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(document.ui_objects.len() + document.process_objects.len())
            .add_attribute(Attribute::Bold),
    ]);
    eprintln!("{table}");

    let unknown = document
        .events
        .values()
        .filter(|e| e.main_object == "unknown")
        .count();
    if unknown > 0 {
        eprintln!("Events without a main object: {unknown}");
    }
    let cycles = part_of_cycles(document);
    if !cycles.is_empty() {
        eprintln!("Part-of cycles:");
        for cycle in cycles {
            eprintln!("- {}", cycle.join(" -> "));
        }
    }
}

/// Column-role table for `classify`.
pub fn print_roles(prepared: &PreparedLog, classified: &ClassifiedLog) {
    if let Some(line) = preprocess_line(&prepared.report) {
        println!("Preprocessing: {line}");
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Column"),
        header_cell("Role"),
        header_cell("Reason"),
        header_cell("Unique"),
        header_cell("Complete"),
        header_cell("Describes"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    for decision in &classified.decisions {
        let profile = classified.profiles.get(decision.index);
        table.add_row(vec![
            dim_cell(decision.index),
            Cell::new(&decision.header),
            role_cell(decision.role),
            Cell::new(decision.reason.as_str()),
            ratio_cell(profile.map(|p| p.unique_ratio)),
            ratio_cell(profile.map(|p| p.completeness)),
            describes_cell(classified, decision.index),
        ]);
    }
    println!("{table}");
}

/// Hierarchy and synonym tables for `lexicon`.
pub fn print_lexicon(lexicon: &Lexicon) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Level"),
        header_cell("UI object type"),
        header_cell("Synonyms"),
        header_cell("Attributes"),
    ]);
    apply_table_style(&mut table);
    for level in HierarchyLevel::ALL {
        for object_type in lexicon.types_at(level) {
            let synonyms = lexicon
                .ui_object_entries()
                .iter()
                .find(|e| e.canonical == object_type.as_str())
                .map(|e| e.synonyms.join(", "))
                .unwrap_or_default();
            let attributes = lexicon.attributes_of(&object_type).join(", ");
            table.add_row(vec![
                Cell::new(level.as_str()).fg(Color::Blue),
                Cell::new(object_type.as_str()).add_attribute(Attribute::Bold),
                Cell::new(synonyms),
                optional_cell(attributes),
            ]);
        }
    }
    println!("{table}");

    let mut attributes = Table::new();
    attributes.set_header(vec![header_cell("Attribute"), header_cell("Synonyms")]);
    apply_table_style(&mut attributes);
    for entry in lexicon.attribute_entries() {
        attributes.add_row(vec![
            Cell::new(&entry.canonical).add_attribute(Attribute::Bold),
            Cell::new(entry.synonyms.join(", ")),
        ]);
    }
    println!("{attributes}");
    println!(
        "Action labels: {}, nouns: {}",
        lexicon.action_label_count(),
        lexicon.noun_count()
    );
}

fn preprocess_line(report: &PreprocessReport) -> Option<String> {
    let mut parts = Vec::new();
    if report.case_column_dropped {
        parts.push("case column dropped".to_string());
    }
    if report.empty_columns > 0 {
        parts.push(format!("{} empty column(s) dropped", report.empty_columns));
    }
    if report.empty_rows > 0 {
        parts.push(format!("{} empty row(s) dropped", report.empty_rows));
    }
    if report.duplicate_columns > 0 {
        parts.push(format!(
            "{} duplicate column(s) dropped",
            report.duplicate_columns
        ));
    }
    if report.reformatted_cells > 0 {
        parts.push(format!("{} cell(s) reformatted", report.reformatted_cells));
    }
    (!parts.is_empty()).then(|| parts.join(", "))
}

fn describes_cell(classified: &ClassifiedLog, col: usize) -> Cell {
    let plan = &classified.plan;
    match plan.binding(col) {
        Some(ColumnBinding::Bound(object_type)) => Cell::new(object_type.as_str()),
        Some(ColumnBinding::Undecided(types)) => {
            let names: Vec<&str> = types.iter().map(ObjectType::as_str).collect();
            Cell::new(names.join(" | ")).fg(Color::Yellow)
        }
        None if plan.user_columns.contains(&col) => Cell::new("user"),
        None if plan.unmatched.contains(&col) => Cell::new("main object"),
        None => dim_cell("-"),
    }
}

fn role_cell(role: ColumnRole) -> Cell {
    let cell = Cell::new(role.as_str());
    match role {
        ColumnRole::Activity | ColumnRole::MainObjectType => {
            cell.fg(Color::Blue).add_attribute(Attribute::Bold)
        }
        ColumnRole::ObjectType => cell.fg(Color::Blue),
        ColumnRole::Timestamp => cell.fg(Color::Magenta),
        ColumnRole::UserAttribute => cell.fg(Color::DarkGrey),
        ColumnRole::ContextAttribute | ColumnRole::ValueAttribute => cell,
    }
}

fn ratio_cell(ratio: Option<f64>) -> Cell {
    match ratio {
        Some(value) => Cell::new(format!("{value:.2}")),
        None => dim_cell("-"),
    }
}

fn kind_cell(kind: &str) -> Cell {
    match kind {
        "ui" => Cell::new("UI object").fg(Color::Blue),
        _ => Cell::new("process object").fg(Color::Green),
    }
}

fn optional_cell(value: String) -> Cell {
    if value.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(value)
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
