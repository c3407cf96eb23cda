use crate::artifacts::trackchanges::TrackChangeOperation;
use regex::Regex;
use std::collections::HashMap;

/// Deletion fragments: `<del … data-operation-index="N" …>…</del>`
pub const DEL_FRAGMENT_REGEX: &str =
    r#"(?s)<del\b[^>]*\bdata-operation-index="([^"]*)"[^>]*>(.*?)</del>"#;
/// Insertion fragments: `<ins … data-operation-index="N" …>…</ins>`
pub const INS_FRAGMENT_REGEX: &str =
    r#"(?s)<ins\b[^>]*\bdata-operation-index="([^"]*)"[^>]*>(.*?)</ins>"#;

/// Pair the del/ins fragments of a diff fragment by operation index
///
/// Operations are returned in order of first appearance of their index. A
/// fragment with no partner at the same index is skipped (nothing to trim
/// against); a second fragment of the same side for one index keeps the
/// first occurrence.
pub fn pair_operations(fragment: &str) -> anyhow::Result<Vec<TrackChangeOperation>> {
    let del_regex = Regex::new(DEL_FRAGMENT_REGEX)?;
    let ins_regex = Regex::new(INS_FRAGMENT_REGEX)?;

    let mut order: Vec<String> = Vec::new();
    let mut sides: HashMap<String, (Option<String>, Option<String>)> = HashMap::new();

    for captures in del_regex.captures_iter(fragment) {
        let index = captures[1].to_string();
        let entry = sides.entry(index.clone()).or_insert_with(|| {
            order.push(index.clone());
            (None, None)
        });
        if entry.0.is_some() {
            tracing::debug!(index = %index, "duplicate deletion fragment; keeping the first");
            continue;
        }
        entry.0 = Some(captures[2].to_string());
    }

    for captures in ins_regex.captures_iter(fragment) {
        let index = captures[1].to_string();
        let entry = sides.entry(index.clone()).or_insert_with(|| {
            order.push(index.clone());
            (None, None)
        });
        if entry.1.is_some() {
            tracing::debug!(index = %index, "duplicate insertion fragment; keeping the first");
            continue;
        }
        entry.1 = Some(captures[2].to_string());
    }

    let mut operations = Vec::with_capacity(order.len());
    for index in order {
        match sides.remove(&index) {
            Some((Some(deleted), Some(inserted))) => {
                operations.push(TrackChangeOperation::new(index, deleted, inserted));
            }
            _ => {
                tracing::debug!(index = %index, "unpaired diff fragment skipped");
            }
        }
    }

    Ok(operations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pairs_fragments_by_operation_index() {
        let fragment = concat!(
            r#"<p><del data-operation-index="0">the quick brown fox</del>"#,
            r#"<ins data-operation-index="0">the quick red fox</ins></p>"#,
        );

        let operations = pair_operations(fragment).unwrap();

        assert_eq!(operations.len(), 1);
        assert_eq!(operations[0].operation_index(), "0");
        assert_eq!(operations[0].deleted_markup(), "the quick brown fox");
        assert_eq!(operations[0].inserted_markup(), "the quick red fox");
    }

    #[test]
    fn pairs_survive_interleaving_and_extra_attributes() {
        let fragment = concat!(
            r#"<del class="diff" data-operation-index="3">aaa</del>"#,
            r#"<del data-operation-index="7">bbb</del>"#,
            r#"<ins data-operation-index="7">bbc</ins>"#,
            r#"<ins class="diff" data-operation-index="3">aab</ins>"#,
        );

        let operations = pair_operations(fragment).unwrap();

        let indices: Vec<&str> = operations.iter().map(|op| op.operation_index()).collect();
        assert_eq!(indices, ["3", "7"]);
    }

    #[test]
    fn unpaired_fragments_are_skipped() {
        let fragment = concat!(
            r#"<del data-operation-index="0">gone</del>"#,
            r#"<del data-operation-index="1">old</del>"#,
            r#"<ins data-operation-index="1">new</ins>"#,
            r#"<ins data-operation-index="2">added</ins>"#,
        );

        let operations = pair_operations(fragment).unwrap();

        assert_eq!(operations.len(), 1);
        assert_eq!(operations[0].operation_index(), "1");
    }

    #[test]
    fn fragment_bodies_may_contain_nested_tags_and_newlines() {
        let fragment = concat!(
            "<del data-operation-index=\"0\"><b>bold\nline</b></del>",
            "<ins data-operation-index=\"0\"><b>bolder\nline</b></ins>",
        );

        let operations = pair_operations(fragment).unwrap();

        assert_eq!(operations[0].deleted_markup(), "<b>bold\nline</b>");
        assert_eq!(operations[0].inserted_markup(), "<b>bolder\nline</b>");
    }

    #[test]
    fn empty_fragment_yields_no_operations() {
        assert!(pair_operations("<p>no changes here</p>").unwrap().is_empty());
    }
}
