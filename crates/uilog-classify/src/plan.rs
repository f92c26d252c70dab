//! Which attribute columns describe which UI object types.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;
use uilog_lexicon::Lexicon;
use uilog_model::{ColumnRole, ObjectType};

use crate::headers::HeaderInfo;

/// How an attribute column relates to UI object types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "types")]
pub enum ColumnBinding {
    /// The column describes exactly one object type.
    Bound(ObjectType),
    /// The column may describe any of these types; decided per row.
    Undecided(Vec<ObjectType>),
}

/// Attribute columns grouped by the object types they describe.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ObjectColumnPlan {
    /// Context and value columns tied to one or several object types.
    pub bindings: BTreeMap<usize, ColumnBinding>,
    /// Context and value columns tied to no object type. They describe the
    /// row's main object.
    pub unmatched: Vec<usize>,
    /// Columns describing the user.
    pub user_columns: Vec<usize>,
    /// Columns whose every value is a URL.
    pub url_columns: Vec<usize>,
}

impl ObjectColumnPlan {
    /// Columns bound to `object_type`, in column order.
    pub fn bound_to(&self, object_type: &ObjectType) -> Vec<usize> {
        self.bindings
            .iter()
            .filter(|(_, binding)| matches!(binding, ColumnBinding::Bound(ty) if ty == object_type))
            .map(|(col, _)| *col)
            .collect()
    }

    /// Distinct bound object types, in order of their first column.
    pub fn bound_types(&self) -> Vec<ObjectType> {
        let mut types: Vec<ObjectType> = Vec::new();
        for binding in self.bindings.values() {
            if let ColumnBinding::Bound(ty) = binding
                && !types.contains(ty)
            {
                types.push(ty.clone());
            }
        }
        types
    }

    /// Undecided columns with their candidate types.
    pub fn undecided(&self) -> impl Iterator<Item = (usize, &[ObjectType])> {
        self.bindings.iter().filter_map(|(col, binding)| match binding {
            ColumnBinding::Undecided(types) => Some((*col, types.as_slice())),
            ColumnBinding::Bound(_) => None,
        })
    }

    pub fn binding(&self, col: usize) -> Option<&ColumnBinding> {
        self.bindings.get(&col)
    }

    /// True when the column is bound, undecided or a user column.
    pub fn is_claimed(&self, col: usize) -> bool {
        self.bindings.contains_key(&col) || self.user_columns.contains(&col)
    }
}

/// Builds the plan from final roles and header matches.
///
/// A header naming an object type that the header's attribute type also
/// maps to binds the column to that type. An attribute mapping to one type
/// binds to it; one mapping to several leaves the column undecided. A
/// header naming an object type without any attribute binds to that type.
pub fn build_plan(
    roles: &[ColumnRole],
    headers: &[HeaderInfo],
    url_columns: Vec<usize>,
    lexicon: &Lexicon,
) -> ObjectColumnPlan {
    let mut plan = ObjectColumnPlan {
        url_columns,
        ..ObjectColumnPlan::default()
    };

    for (col, role) in roles.iter().enumerate() {
        match role {
            ColumnRole::UserAttribute => {
                plan.user_columns.push(col);
                continue;
            }
            ColumnRole::ContextAttribute | ColumnRole::ValueAttribute => {}
            _ => continue,
        }

        let info = &headers[col];
        let binding = match (&info.attribute, &info.object_type) {
            (Some(attribute), header_type) => {
                let types = lexicon.object_types_for_attribute(attribute);
                match header_type {
                    Some(ty) if types.contains(ty) => Some(ColumnBinding::Bound(ty.clone())),
                    _ if types.len() == 1 => Some(ColumnBinding::Bound(types[0].clone())),
                    _ if types.len() > 1 => Some(ColumnBinding::Undecided(types)),
                    Some(ty) => Some(ColumnBinding::Bound(ty.clone())),
                    None => None,
                }
            }
            (None, Some(ty)) => Some(ColumnBinding::Bound(ty.clone())),
            (None, None) => None,
        };

        match binding {
            Some(binding) => {
                debug!(column = col, ?binding, "attribute column bound");
                plan.bindings.insert(col, binding);
            }
            None => plan.unmatched.push(col),
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headers::analyze_header;

    fn plan_for(headers: &[&str], roles: &[ColumnRole]) -> ObjectColumnPlan {
        let lexicon = Lexicon::builtin().unwrap();
        let infos: Vec<HeaderInfo> = headers
            .iter()
            .map(|h| analyze_header(h, &lexicon))
            .collect();
        build_plan(roles, &infos, Vec::new(), &lexicon)
    }

    #[test]
    fn binds_undecides_and_leaves_unmatched() {
        use ColumnRole::{Activity, ContextAttribute, UserAttribute, ValueAttribute};
        let plan = plan_for(
            &["activity", "file name", "label", "button label", "comment", "user name", "website"],
            &[
                Activity,
                ContextAttribute,
                ContextAttribute,
                ContextAttribute,
                ValueAttribute,
                UserAttribute,
                ContextAttribute,
            ],
        );
        assert_eq!(
            plan.binding(1),
            Some(&ColumnBinding::Bound(ObjectType::new("file")))
        );
        assert!(matches!(plan.binding(2), Some(ColumnBinding::Undecided(types)) if types.len() == 3));
        assert_eq!(
            plan.binding(3),
            Some(&ColumnBinding::Bound(ObjectType::new("button")))
        );
        assert_eq!(plan.unmatched, [4]);
        assert_eq!(plan.user_columns, [5]);
        assert_eq!(
            plan.binding(6),
            Some(&ColumnBinding::Bound(ObjectType::new("website")))
        );
        assert_eq!(plan.bound_to(&ObjectType::new("file")), [1]);
        assert_eq!(
            plan.bound_types(),
            [
                ObjectType::new("file"),
                ObjectType::new("button"),
                ObjectType::new("website")
            ]
        );
        assert!(plan.is_claimed(5));
        assert!(!plan.is_claimed(4));
    }
}
