//! Column role classification.
//!
//! Roles are assigned in priority order; every step only looks at columns
//! still pending:
//!
//! 1. Column 0 is the activity; column 1 is the main UI object type when it
//!    carries the split-out header. User columns and columns whose header
//!    names an attribute type are pre-assigned.
//! 2. Low-cardinality columns whose values name UI object types become the
//!    main (most complete) or secondary object type columns.
//! 3. Fully unique columns of timestamps become the timestamp.
//! 4. URL columns become context attributes, e-mail columns value
//!    attributes.
//! 5. Provisional attribute columns are split by uniqueness.
//! 6. Whatever is left is decided by header or uniqueness, or escalated to
//!    the [`AmbiguityResolver`].

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, info_span};
use uilog_ingest::{ColumnProfile, MAIN_OBJECT_TYPE_HEADER, column_sample, profile_columns};
use uilog_lexicon::{Lexicon, is_email, is_timestamp, is_url};
use uilog_model::{AmbiguityResolver, ColumnRole, RoleQuery, Thresholds, UiLog};

use crate::error::{ClassifyError, Result};
use crate::headers::{HeaderInfo, analyze_headers};
use crate::plan::{ObjectColumnPlan, build_plan};

/// Distinct values shown to the resolver per column.
const SAMPLE_LIMIT: usize = 7;

/// Roles offered when a column cannot be classified automatically.
const ESCALATION_ROLES: [ColumnRole; 3] = [
    ColumnRole::ObjectType,
    ColumnRole::ValueAttribute,
    ColumnRole::ContextAttribute,
];

/// Why a column received its role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    FirstColumn,
    SplitEventText,
    UserHeader,
    InputValueHeader,
    IdentifierHeader,
    UiObjectValues,
    TimestampPattern,
    UrlPattern,
    EmailPattern,
    LowUniqueness,
    HighUniqueness,
    Resolver,
}

impl DecisionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionReason::FirstColumn => "first column",
            DecisionReason::SplitEventText => "split from event text",
            DecisionReason::UserHeader => "user header",
            DecisionReason::InputValueHeader => "input value header",
            DecisionReason::IdentifierHeader => "identifier header",
            DecisionReason::UiObjectValues => "ui object type values",
            DecisionReason::TimestampPattern => "timestamp pattern",
            DecisionReason::UrlPattern => "url values",
            DecisionReason::EmailPattern => "e-mail values",
            DecisionReason::LowUniqueness => "low uniqueness",
            DecisionReason::HighUniqueness => "high uniqueness",
            DecisionReason::Resolver => "resolver",
        }
    }
}

/// The role of one column and why it was chosen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleDecision {
    pub index: usize,
    pub header: String,
    pub role: ColumnRole,
    pub reason: DecisionReason,
    /// Attribute type matched in the header, if any.
    pub attribute: Option<String>,
}

/// A UI log with a role for every column.
#[derive(Debug, Clone)]
pub struct ClassifiedLog {
    pub decisions: Vec<RoleDecision>,
    pub profiles: Vec<ColumnProfile>,
    pub plan: ObjectColumnPlan,
}

impl ClassifiedLog {
    pub fn role(&self, col: usize) -> ColumnRole {
        self.decisions[col].role
    }

    pub fn roles(&self) -> Vec<ColumnRole> {
        self.decisions.iter().map(|d| d.role).collect()
    }

    /// Column indices with `role`, in column order.
    pub fn columns_with(&self, role: ColumnRole) -> Vec<usize> {
        self.decisions
            .iter()
            .filter(|d| d.role == role)
            .map(|d| d.index)
            .collect()
    }

    pub fn main_object_column(&self) -> Option<usize> {
        self.columns_with(ColumnRole::MainObjectType).first().copied()
    }

    pub fn timestamp_column(&self) -> Option<usize> {
        self.columns_with(ColumnRole::Timestamp).first().copied()
    }

    pub fn count(&self, role: ColumnRole) -> usize {
        self.decisions.iter().filter(|d| d.role == role).count()
    }
}

/// Pending state while roles are assigned.
struct Assignment {
    roles: Vec<Option<(ColumnRole, DecisionReason)>>,
    /// Header-attribute columns awaiting the uniqueness split.
    provisional: Vec<usize>,
}

impl Assignment {
    fn new(width: usize) -> Self {
        Self {
            roles: vec![None; width],
            provisional: Vec::new(),
        }
    }

    fn is_pending(&self, col: usize) -> bool {
        self.roles[col].is_none() && !self.provisional.contains(&col)
    }

    fn pending(&self) -> Vec<usize> {
        (0..self.roles.len())
            .filter(|col| self.is_pending(*col))
            .collect()
    }

    /// Step 6 leaves no column pending, so every column has a role here.
    fn into_decisions(self, log: &UiLog, headers: &[HeaderInfo]) -> Result<Vec<RoleDecision>> {
        self.roles
            .into_iter()
            .enumerate()
            .map(|(col, assigned)| {
                let (role, reason) = assigned.ok_or_else(|| ClassifyError::Unassigned {
                    column: log.header(col).to_string(),
                })?;
                Ok(RoleDecision {
                    index: col,
                    header: log.header(col).to_string(),
                    role,
                    reason,
                    attribute: headers[col].attribute.clone(),
                })
            })
            .collect()
    }

    fn assign(&mut self, col: usize, role: ColumnRole, reason: DecisionReason) {
        debug!(column = col, role = %role, reason = reason.as_str(), "column role assigned");
        self.roles[col] = Some((role, reason));
        self.provisional.retain(|c| *c != col);
    }
}

/// Assigns exactly one role to every column of `log`.
pub fn classify(
    log: &UiLog,
    lexicon: &Lexicon,
    thresholds: &Thresholds,
    resolver: &mut dyn AmbiguityResolver,
) -> Result<ClassifiedLog> {
    if log.width() == 0 {
        return Err(ClassifyError::NoColumns);
    }
    let span = info_span!("classify", columns = log.width(), rows = log.height());
    let _guard = span.enter();
    let start = Instant::now();

    let profiles = profile_columns(log);
    let headers = analyze_headers(log, lexicon);
    let mut assignment = Assignment::new(log.width());

    // Step 1: activity, split-out object type, pre-assigned headers.
    assignment.assign(0, ColumnRole::Activity, DecisionReason::FirstColumn);
    if log.width() > 1 && log.header(1) == MAIN_OBJECT_TYPE_HEADER {
        assignment.assign(
            1,
            ColumnRole::MainObjectType,
            DecisionReason::SplitEventText,
        );
    }
    preassign_headers(&mut assignment, &headers);

    // Step 2: UI object type columns.
    assign_object_type_columns(&mut assignment, log, lexicon, thresholds, &profiles);

    // Step 3: timestamp.
    for col in assignment.pending() {
        if profiles[col].unique_ratio >= thresholds.timestamp && all_values_match(log, col, is_timestamp) {
            assignment.assign(col, ColumnRole::Timestamp, DecisionReason::TimestampPattern);
        }
    }

    // Step 4: URLs and e-mail addresses.
    let url_columns: Vec<usize> = (0..log.width())
        .filter(|col| all_values_match(log, *col, is_url))
        .collect();
    for col in assignment.pending() {
        if url_columns.contains(&col) {
            assignment.assign(col, ColumnRole::ContextAttribute, DecisionReason::UrlPattern);
        } else if all_values_match(log, col, is_email) {
            assignment.assign(col, ColumnRole::ValueAttribute, DecisionReason::EmailPattern);
        }
    }

    // Step 5: provisional attributes by uniqueness.
    for col in assignment.provisional.clone() {
        let ratio = profiles[col].unique_ratio;
        if ratio < thresholds.context_attribute {
            assignment.assign(col, ColumnRole::ContextAttribute, DecisionReason::LowUniqueness);
        } else if ratio > thresholds.value_attribute() {
            assignment.assign(col, ColumnRole::ValueAttribute, DecisionReason::HighUniqueness);
        }
    }
    // Undecided provisional columns fall through to the last step.
    assignment.provisional.clear();

    // Step 6: identifiers, uniqueness, then the resolver.
    for col in assignment.pending() {
        let ratio = profiles[col].unique_ratio;
        if headers[col].is_identifier {
            assignment.assign(col, ColumnRole::ContextAttribute, DecisionReason::IdentifierHeader);
        } else if ratio < thresholds.context_attribute {
            assignment.assign(col, ColumnRole::ContextAttribute, DecisionReason::LowUniqueness);
        } else if ratio > thresholds.value_attribute() {
            assignment.assign(col, ColumnRole::ValueAttribute, DecisionReason::HighUniqueness);
        } else {
            let query = RoleQuery {
                column: column_sample(log, &profiles[col], SAMPLE_LIMIT),
                allowed: ESCALATION_ROLES.to_vec(),
            };
            let role = resolver.resolve_column_role(&query)?;
            if !ESCALATION_ROLES.contains(&role) {
                return Err(ClassifyError::DisallowedRole {
                    column: log.header(col).to_string(),
                    role,
                });
            }
            assignment.assign(col, role, DecisionReason::Resolver);
        }
    }

    let decisions = assignment.into_decisions(log, &headers)?;

    let roles: Vec<ColumnRole> = decisions.iter().map(|d| d.role).collect();
    let plan = build_plan(&roles, &headers, url_columns, lexicon);

    let classified = ClassifiedLog {
        decisions,
        profiles,
        plan,
    };
    info!(
        main_object_column = ?classified.main_object_column(),
        object_type_columns = classified.count(ColumnRole::ObjectType),
        context_attributes = classified.count(ColumnRole::ContextAttribute),
        value_attributes = classified.count(ColumnRole::ValueAttribute),
        user_attributes = classified.count(ColumnRole::UserAttribute),
        undecided_columns = classified.plan.undecided().count(),
        duration_ms = start.elapsed().as_millis(),
        "columns classified"
    );
    Ok(classified)
}

fn preassign_headers(assignment: &mut Assignment, headers: &[HeaderInfo]) {
    for (col, info) in headers.iter().enumerate() {
        if !assignment.is_pending(col) {
            continue;
        }
        if info.is_user {
            assignment.assign(col, ColumnRole::UserAttribute, DecisionReason::UserHeader);
            continue;
        }
        let Some(attribute) = info.attribute.as_deref() else {
            continue;
        };
        if attribute == "input value" {
            assignment.assign(col, ColumnRole::ValueAttribute, DecisionReason::InputValueHeader);
        } else if attribute.contains("id") {
            assignment.assign(col, ColumnRole::ContextAttribute, DecisionReason::IdentifierHeader);
        } else {
            assignment.provisional.push(col);
        }
    }
}

fn assign_object_type_columns(
    assignment: &mut Assignment,
    log: &UiLog,
    lexicon: &Lexicon,
    thresholds: &Thresholds,
    profiles: &[ColumnProfile],
) {
    let matching: Vec<usize> = assignment
        .pending()
        .into_iter()
        .filter(|col| profiles[*col].unique_ratio < thresholds.ui_object)
        .filter(|col| {
            log.values(*col)
                .any(|value| lexicon.match_ui_object_value(value).is_some())
        })
        .collect();
    if matching.is_empty() {
        return;
    }

    let has_main = assignment
        .roles
        .iter()
        .flatten()
        .any(|(role, _)| *role == ColumnRole::MainObjectType);
    let main = if has_main {
        None
    } else {
        matching
            .iter()
            .copied()
            .filter(|col| profiles[*col].completeness >= thresholds.completeness)
            .fold(None, |best: Option<usize>, col| match best {
                Some(b) if profiles[b].completeness >= profiles[col].completeness => Some(b),
                _ => Some(col),
            })
    };

    for col in matching {
        if Some(col) == main {
            assignment.assign(col, ColumnRole::MainObjectType, DecisionReason::UiObjectValues);
        } else {
            assignment.assign(col, ColumnRole::ObjectType, DecisionReason::UiObjectValues);
        }
    }
}

/// True when the column has values and every one satisfies `pattern`.
fn all_values_match(log: &UiLog, col: usize, pattern: fn(&str) -> bool) -> bool {
    let mut values = log.values(col).peekable();
    values.peek().is_some() && values.all(pattern)
}
