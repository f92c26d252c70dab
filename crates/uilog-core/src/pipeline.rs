//! End-to-end transformation of a UI log.

use std::path::Path;
use std::time::Instant;

use tracing::{info, info_span, warn};
use uilog_classify::{ClassifiedLog, classify};
use uilog_ingest::{PreparedLog, load_ui_log, prepare_log};
use uilog_lexicon::Lexicon;
use uilog_model::{AmbiguityResolver, OcelDocument, Thresholds, UiLog};

use crate::context::ResolutionContext;
use crate::error::Result;
use crate::map_builder::build_document;
use crate::process_objects::ProcessObjectExtractor;
use crate::resolver::HierarchyResolver;
use crate::timestamp::parse_timestamp;

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct Transformation {
    pub prepared: PreparedLog,
    pub classified: ClassifiedLog,
    pub document: OcelDocument,
}

/// Loads a CSV UI log and transforms it.
pub fn transform_file(
    path: &Path,
    lexicon: &Lexicon,
    thresholds: &Thresholds,
    resolver: &mut dyn AmbiguityResolver,
) -> Result<Transformation> {
    let log = load_ui_log(path)?;
    info!(
        path = %path.display(),
        rows = log.height(),
        columns = log.width(),
        "UI log loaded"
    );
    transform(log, lexicon, thresholds, resolver)
}

/// Prepares, classifies and resolves `log` into an object-centric document.
///
/// Rows must already be in ascending timestamp order.
pub fn transform(
    log: UiLog,
    lexicon: &Lexicon,
    thresholds: &Thresholds,
    resolver: &mut dyn AmbiguityResolver,
) -> Result<Transformation> {
    thresholds.validate()?;
    let span = info_span!("transform");
    let _guard = span.enter();
    let start = Instant::now();

    let prepared = prepare_log(log, lexicon, thresholds, resolver)?;
    let classified = classify(&prepared.log, lexicon, thresholds, resolver)?;
    let ctx = resolve_rows(&prepared.log, &classified, lexicon);
    let document = build_document(&prepared.log, &classified, &ctx);

    info!(
        events = document.events.len(),
        ui_objects = document.ui_objects.len(),
        process_objects = document.process_objects.len(),
        duration_ms = start.elapsed().as_millis(),
        "transformation complete"
    );
    Ok(Transformation {
        prepared,
        classified,
        document,
    })
}

/// Single forward pass over the rows of a classified log.
///
/// The returned context is fresh for this call; nothing is shared between
/// runs.
pub fn resolve_rows(log: &UiLog, classified: &ClassifiedLog, lexicon: &Lexicon) -> ResolutionContext {
    let span = info_span!("resolve", rows = log.height());
    let _guard = span.enter();
    let start = Instant::now();
    warn_if_unordered(log, classified);

    let mut ctx = ResolutionContext::new();
    let resolver = HierarchyResolver::new(log, classified, lexicon);
    let mut extractor = ProcessObjectExtractor::new(log, classified, lexicon);
    for row in 0..log.height() {
        let mut resolution = resolver.resolve_row(row, &mut ctx);
        resolution.process_objects = extractor.extract_row(row, &mut ctx);
        ctx.rows.push(resolution);
    }

    info!(
        ui_instances = ctx.ui_instances.len(),
        process_instances = ctx.process_instances.len(),
        duration_ms = start.elapsed().as_millis(),
        "rows resolved"
    );
    ctx
}

/// Row order is a precondition; a backwards step is only reported.
fn warn_if_unordered(log: &UiLog, classified: &ClassifiedLog) {
    let Some(col) = classified.timestamp_column() else {
        return;
    };
    let mut previous = None;
    for row in 0..log.height() {
        let Some(current) = log.cell(row, col).and_then(parse_timestamp) else {
            continue;
        };
        if previous.is_some_and(|p| current < p) {
            warn!(row = row + 1, "rows are not in ascending timestamp order");
            return;
        }
        previous = Some(current);
    }
}
