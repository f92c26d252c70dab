//! Process objects: business nouns mentioned in context attributes.

use std::collections::HashMap;

use tracing::{debug, trace};
use uilog_classify::ClassifiedLog;
use uilog_lexicon::Lexicon;
use uilog_model::ocel::StringMap;
use uilog_model::{ColumnRole, DedupKey, InstanceId, KeyPart, ObjectType, UiLog};

use crate::context::{ProcessRecord, ResolutionContext};

/// Type of the process object a cell value names, if any.
///
/// The value is rejected when it mentions a product name (`chrome`) or is
/// itself a UI object synonym. Otherwise its words are lemmatized and the
/// whole phrase or its last word must be a lexicon noun; the lemmatized
/// phrase becomes the type.
pub fn process_object_type(value: &str, lexicon: &Lexicon) -> Option<String> {
    if lexicon.mentions_named_product(value) {
        return None;
    }
    let lemmas = lexicon.lemmatize_phrase(value);
    let head = lemmas.last()?;
    let phrase = lemmas.join(" ");
    if lexicon.is_ui_object_phrase(&phrase) {
        return None;
    }
    (lexicon.is_noun(&phrase) || lexicon.is_noun(head)).then_some(phrase)
}

/// Scans context attributes row by row and mints process objects.
pub struct ProcessObjectExtractor<'a> {
    log: &'a UiLog,
    lexicon: &'a Lexicon,
    columns: Vec<usize>,
    user_columns: Vec<usize>,
    verdicts: HashMap<String, Option<String>>,
}

impl<'a> ProcessObjectExtractor<'a> {
    /// Candidate columns are context attributes that are neither URL columns
    /// nor tied to a UI object type.
    pub fn new(log: &'a UiLog, classified: &ClassifiedLog, lexicon: &'a Lexicon) -> Self {
        let plan = &classified.plan;
        let columns: Vec<usize> = classified
            .columns_with(ColumnRole::ContextAttribute)
            .into_iter()
            .filter(|col| !plan.url_columns.contains(col) && !plan.is_claimed(*col))
            .collect();
        debug!(columns = ?columns, "process object candidate columns");
        Self {
            log,
            lexicon,
            columns,
            user_columns: plan.user_columns.clone(),
            verdicts: HashMap::new(),
        }
    }

    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    /// Process objects mentioned by `row`, in column order without repeats.
    pub fn extract_row(&mut self, row: usize, ctx: &mut ResolutionContext) -> Vec<InstanceId> {
        let mut found = Vec::new();
        for &col in &self.columns {
            let Some(value) = self.log.cell(row, col) else {
                continue;
            };
            let lexicon = self.lexicon;
            let verdict = self
                .verdicts
                .entry(value.to_string())
                .or_insert_with(|| process_object_type(value, lexicon));
            let Some(object_type) = verdict.clone() else {
                continue;
            };

            let key = DedupKey::Single(KeyPart::Context(value.to_string()));
            let (instance, minted) = ctx
                .process_instances
                .resolve(&ObjectType::new(&object_type), key);
            if minted {
                let mut amap = StringMap::new();
                amap.insert(self.log.header(col).to_string(), value.to_string());
                for &user_col in &self.user_columns {
                    if let Some(user_value) = self.log.cell(row, user_col) {
                        amap.insert(self.log.header(user_col).to_string(), user_value.to_string());
                    }
                }
                trace!(row, instance = %instance, "process object minted");
                ctx.process_records
                    .insert(instance.clone(), ProcessRecord { object_type, amap });
            }
            if !found.contains(&instance) {
                found.push(instance);
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nouns_become_types() {
        let lexicon = Lexicon::builtin().unwrap();
        assert_eq!(
            process_object_type("invoice", &lexicon).as_deref(),
            Some("invoice")
        );
        assert_eq!(
            process_object_type("Invoices", &lexicon).as_deref(),
            Some("invoice")
        );
        assert_eq!(
            process_object_type("purchase order", &lexicon).as_deref(),
            Some("purchase order")
        );
    }

    #[test]
    fn product_names_and_non_nouns_are_rejected() {
        let lexicon = Lexicon::builtin().unwrap();
        assert_eq!(process_object_type("chrome", &lexicon), None);
        assert_eq!(process_object_type("excel invoice", &lexicon), None);
        assert_eq!(process_object_type("12345", &lexicon), None);
        assert_eq!(process_object_type("", &lexicon), None);
    }
}
