use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use uilog_classify::{ClassifiedLog, classify};
use uilog_cli::config::resolve_thresholds;
use uilog_cli::logging::redact_value;
use uilog_cli::prompt::InteractiveResolver;
use uilog_core::{Transformation, transform_file};
use uilog_ingest::{PreparedLog, load_ui_log, prepare_log, sample_values};
use uilog_lexicon::Lexicon;
use uilog_model::{AmbiguityResolver, DefaultsResolver, FailingResolver, OcelDocument};

use crate::cli::{ClassifyArgs, ConvertArgs, LexiconArgs, LexiconFiles, ResolveArg};
use crate::summary::print_lexicon;

pub fn run_convert(args: &ConvertArgs) -> Result<Transformation> {
    let input = &args.input;
    let span = info_span!("convert", file = %input.file.display());
    let _guard = span.enter();

    let lexicon = build_lexicon(&input.lexicon)?;
    let thresholds = resolve_thresholds(input.config.as_deref(), &input.thresholds.overrides())?;
    let mut resolver = resolver_for(input.resolve);
    let result = transform_file(&input.file, &lexicon, &thresholds, resolver.as_mut())
        .with_context(|| format!("transform {}", input.file.display()))?;

    let start = Instant::now();
    write_document(&result.document, args.output.as_deref(), args.pretty)?;
    info!(
        output = %args.output.as_deref().map_or_else(|| "stdout".into(), |p| p.display().to_string()),
        duration_ms = start.elapsed().as_millis(),
        "document written"
    );
    Ok(result)
}

/// Preprocessing and classification without resolution.
pub fn run_classify(args: &ClassifyArgs) -> Result<(PreparedLog, ClassifiedLog)> {
    let input = &args.input;
    let span = info_span!("classify", file = %input.file.display());
    let _guard = span.enter();

    let lexicon = build_lexicon(&input.lexicon)?;
    let thresholds = resolve_thresholds(input.config.as_deref(), &input.thresholds.overrides())?;
    let mut resolver = resolver_for(input.resolve);
    let log = load_ui_log(&input.file)
        .with_context(|| format!("load {}", input.file.display()))?;
    let prepared = prepare_log(log, &lexicon, &thresholds, resolver.as_mut())
        .with_context(|| format!("prepare {}", input.file.display()))?;
    let classified = classify(&prepared.log, &lexicon, &thresholds, resolver.as_mut())
        .with_context(|| format!("classify {}", input.file.display()))?;

    for decision in &classified.decisions {
        let samples = sample_values(&prepared.log, decision.index, 1);
        debug!(
            column = %decision.header,
            role = %decision.role,
            first_value = redact_value(samples.first().map_or("", String::as_str)),
            "column classified"
        );
    }
    Ok((prepared, classified))
}

pub fn run_lexicon(args: &LexiconArgs) -> Result<()> {
    let lexicon = build_lexicon(&args.lexicon)?;
    print_lexicon(&lexicon);
    Ok(())
}

fn build_lexicon(files: &LexiconFiles) -> Result<Lexicon> {
    let mut lexicon = Lexicon::builtin().context("load built-in lexicon")?;
    if let Some(path) = &files.action_labels {
        lexicon = lexicon
            .with_action_labels_file(path)
            .with_context(|| format!("load action labels {}", path.display()))?;
    }
    if let Some(path) = &files.nouns {
        lexicon = lexicon
            .with_nouns_file(path)
            .with_context(|| format!("load nouns {}", path.display()))?;
    }
    Ok(lexicon)
}

fn resolver_for(choice: ResolveArg) -> Box<dyn AmbiguityResolver> {
    match choice {
        ResolveArg::Prompt => Box::new(InteractiveResolver::stdio()),
        ResolveArg::Defaults => Box::new(DefaultsResolver),
        ResolveArg::Fail => Box::new(FailingResolver),
    }
}

fn write_document(document: &OcelDocument, output: Option<&Path>, pretty: bool) -> Result<()> {
    match output {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_json(&mut writer, document, pretty)
                .with_context(|| format!("write {}", path.display()))
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_json(&mut writer, document, pretty).context("write document to stdout")
        }
    }
}

fn write_json<W: Write>(writer: &mut W, document: &OcelDocument, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, document)?;
    } else {
        serde_json::to_writer(&mut *writer, document)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
