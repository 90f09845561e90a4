use crate::{
    MAX_FIELD_NAME_LEN, MAX_SCHEMA_KEY_LEN,
    node::{FieldDefinition, FieldKind, FieldList},
    validate::Violation,
};
use std::collections::BTreeSet;

/// Walk a field list, collecting naming and structural violations.
///
/// Rules:
/// - names are non-empty, ASCII, at most MAX_FIELD_NAME_LEN bytes
/// - names never contain '.' (dots are document path separators)
/// - names are unique among siblings
/// - brick containers declare a non-empty allowed set
/// - allowed-type keys follow the same lexical rules as names
pub fn check_fields(violations: &mut Vec<Violation>, parent: &str, fields: &FieldList) {
    let mut seen: BTreeSet<&str> = BTreeSet::new();

    for field in fields {
        let path = join(parent, &field.name);

        check_ident(violations, &path, "field name", &field.name, MAX_FIELD_NAME_LEN);

        if !seen.insert(&field.name) {
            push(violations, parent, format!("duplicate field name '{}'", field.name));
        }

        match &field.kind {
            FieldKind::Leaf { type_tag } => {
                if type_tag.is_empty() {
                    push(violations, &path, "leaf type tag is empty".to_string());
                }
            }

            FieldKind::Collection { allowed_types } => {
                check_allowed_types(violations, &path, allowed_types);
            }

            FieldKind::Localized { children } => {
                if children.is_empty() {
                    push(violations, &path, "localized container has no children".to_string());
                }
                check_fields(violations, &path, children);
            }

            FieldKind::Bricks { allowed_types } => {
                // Bricks never fall back to registry enumeration.
                if allowed_types.is_empty() {
                    push(violations, &path, "brick container allowed set is empty".to_string());
                }
                check_allowed_types(violations, &path, allowed_types);
            }
        }
    }
}

fn check_allowed_types(violations: &mut Vec<Violation>, path: &str, allowed_types: &[String]) {
    let mut seen: BTreeSet<&str> = BTreeSet::new();

    for key in allowed_types {
        check_ident(violations, path, "allowed type key", key, MAX_SCHEMA_KEY_LEN);

        if !seen.insert(key) {
            push(violations, path, format!("duplicate allowed type '{key}'"));
        }
    }
}

fn check_ident(
    violations: &mut Vec<Violation>,
    path: &str,
    what: &str,
    ident: &str,
    max_len: usize,
) {
    if ident.is_empty() {
        push(violations, path, format!("{what} is empty"));
        return;
    }
    if ident.len() > max_len {
        push(
            violations,
            path,
            format!("{what} '{ident}' length {} exceeds max {max_len}", ident.len()),
        );
    }
    if !ident.is_ascii() {
        push(violations, path, format!("{what} '{ident}' must be ASCII"));
    }
    if ident.contains('.') {
        push(violations, path, format!("{what} '{ident}' contains '.'"));
    }
}

fn push(violations: &mut Vec<Violation>, path: &str, message: String) {
    violations.push(Violation {
        path: path.to_string(),
        message,
    });
}

fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate_fields;

    fn leaf(name: &str) -> FieldDefinition {
        FieldDefinition::leaf(name, name, "text")
    }

    #[test]
    fn valid_tree_passes() {
        let fields = FieldList::from(vec![
            leaf("caption"),
            FieldDefinition::localized("title", "Title", vec![leaf("text")]),
            FieldDefinition::bricks("specs", "Specs", vec!["dimensions".to_string()]),
        ]);

        assert!(validate_fields(&fields).is_ok());
    }

    #[test]
    fn dotted_name_is_rejected() {
        let fields = FieldList::from(vec![leaf("bad.name")]);
        let err = validate_fields(&fields).expect_err("dotted name should fail");

        assert_eq!(err.violations.len(), 1);
        assert!(err.violations[0].message.contains("contains '.'"));
    }

    #[test]
    fn duplicate_siblings_are_rejected() {
        let fields = FieldList::from(vec![leaf("caption"), leaf("caption")]);
        let err = validate_fields(&fields).expect_err("duplicate should fail");

        assert!(err.violations[0].message.contains("duplicate field name"));
    }

    #[test]
    fn empty_brick_allowed_set_is_rejected() {
        let fields = FieldList::from(vec![FieldDefinition::bricks("specs", "Specs", vec![])]);
        let err = validate_fields(&fields).expect_err("empty brick set should fail");

        assert!(err.violations[0].message.contains("allowed set is empty"));
    }

    #[test]
    fn empty_collection_allowed_set_is_fine() {
        // Empty means "every registered collection type" at mapping time.
        let fields = FieldList::from(vec![FieldDefinition::collection("images", "Images", vec![])]);

        assert!(validate_fields(&fields).is_ok());
    }

    #[test]
    fn violations_are_collected_not_short_circuited() {
        let fields = FieldList::from(vec![
            leaf(""),
            FieldDefinition::localized(
                "loc",
                "Loc",
                vec![leaf("a.b")],
            ),
        ]);
        let err = validate_fields(&fields).expect_err("two violations expected");

        assert_eq!(err.violations.len(), 2);
        assert_eq!(err.violations[1].path, "loc/a.b");
    }
}
