//! Track-changes simplification
//!
//! The upstream comparison step emits paired `<del>`/`<ins>` markup
//! fragments per change, tagged with a shared operation index. This module
//! pairs those fragments (`pairing`) and trims each pair down to its
//! genuinely differing core by stripping the common prefix and suffix, so
//! the rendered track changes highlight only what actually changed.
//!
//! Trimming is character-level over the raw markup, not tag-aware: callers
//! must guarantee fragments are simple inline markup without overlapping tag
//! boundaries at the match points.

pub mod pairing;

use derive_new::new;
use serde::Serialize;

/// One diff operation: a deletion fragment and its matching insertion
/// fragment, correlated by a shared operation index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, new)]
pub struct TrackChangeOperation {
    operation_index: String,
    deleted_markup: String,
    inserted_markup: String,
}

impl TrackChangeOperation {
    pub fn operation_index(&self) -> &str {
        &self.operation_index
    }

    pub fn deleted_markup(&self) -> &str {
        &self.deleted_markup
    }

    pub fn inserted_markup(&self) -> &str {
        &self.inserted_markup
    }

    /// Trim the pair down to its minimal differing cores
    ///
    /// Scans character-wise (so multi-byte text trims correctly) from the
    /// front for the common prefix, then from the back of the
    /// prefix-stripped remainders for the common suffix. `changed` is true
    /// iff a non-empty prefix or suffix was found; when false the caller
    /// should keep the original unsimplified pair.
    pub fn simplify(&self) -> SimplifiedChange {
        let deleted: Vec<char> = self.deleted_markup.chars().collect();
        let inserted: Vec<char> = self.inserted_markup.chars().collect();

        let mut prefix_len = 0;
        while prefix_len < deleted.len()
            && prefix_len < inserted.len()
            && deleted[prefix_len] == inserted[prefix_len]
        {
            prefix_len += 1;
        }

        let mut deleted_end = deleted.len();
        let mut inserted_end = inserted.len();
        while deleted_end > prefix_len
            && inserted_end > prefix_len
            && deleted[deleted_end - 1] == inserted[inserted_end - 1]
        {
            deleted_end -= 1;
            inserted_end -= 1;
        }

        let collect = |chars: &[char]| chars.iter().collect::<String>();

        SimplifiedChange {
            operation_index: self.operation_index.clone(),
            prefix: collect(&deleted[..prefix_len]),
            deleted: collect(&deleted[prefix_len..deleted_end]),
            inserted: collect(&inserted[prefix_len..inserted_end]),
            suffix: collect(&deleted[deleted_end..]),
            changed: prefix_len > 0 || deleted_end < deleted.len(),
        }
    }
}

/// A simplified del/ins pair: unchanged surroundings plus the differing cores
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimplifiedChange {
    operation_index: String,
    prefix: String,
    deleted: String,
    inserted: String,
    suffix: String,
    changed: bool,
}

impl SimplifiedChange {
    pub fn operation_index(&self) -> &str {
        &self.operation_index
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn deleted(&self) -> &str {
        &self.deleted
    }

    pub fn inserted(&self) -> &str {
        &self.inserted
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Whether simplification had an effect
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Re-assemble the simplified markup
    ///
    /// Emits `prefix<del>…</del><ins>…</ins>suffix`, omitting an empty del
    /// or ins element entirely rather than emitting an empty tag.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(
            self.prefix.len() + self.deleted.len() + self.inserted.len() + self.suffix.len() + 22,
        );

        out.push_str(&self.prefix);
        if !self.deleted.is_empty() {
            out.push_str("<del>");
            out.push_str(&self.deleted);
            out.push_str("</del>");
        }
        if !self.inserted.is_empty() {
            out.push_str("<ins>");
            out.push_str(&self.inserted);
            out.push_str("</ins>");
        }
        out.push_str(&self.suffix);

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn op(deleted: &str, inserted: &str) -> TrackChangeOperation {
        TrackChangeOperation::new("0".to_string(), deleted.to_string(), inserted.to_string())
    }

    #[test]
    fn trims_common_prefix_and_suffix() {
        let simplified = op("the quick brown fox", "the quick red fox").simplify();

        assert_eq!(simplified.prefix(), "the quick ");
        assert_eq!(simplified.deleted(), "brown");
        assert_eq!(simplified.inserted(), "red");
        assert_eq!(simplified.suffix(), " fox");
        assert!(simplified.changed());
    }

    #[test]
    fn renders_simplified_pair() {
        let simplified = op("the quick brown fox", "the quick red fox").simplify();

        assert_eq!(
            simplified.render(),
            "the quick <del>brown</del><ins>red</ins> fox"
        );
    }

    #[test]
    fn disjoint_fragments_are_unchanged() {
        let simplified = op("alpha", "omega").simplify();

        assert!(!simplified.changed());
        assert_eq!(simplified.prefix(), "");
        assert_eq!(simplified.suffix(), "");
        assert_eq!(simplified.deleted(), "alpha");
        assert_eq!(simplified.inserted(), "omega");
        assert_eq!(simplified.render(), "<del>alpha</del><ins>omega</ins>");
    }

    #[test]
    fn pure_insertion_omits_the_del_element() {
        let simplified = op("one two", "one extra two").simplify();

        assert_eq!(simplified.deleted(), "");
        assert_eq!(simplified.inserted(), "extra ");
        assert_eq!(simplified.render(), "one <ins>extra </ins>two");
    }

    #[test]
    fn pure_deletion_omits_the_ins_element() {
        let simplified = op("one extra two", "one two").simplify();

        assert_eq!(simplified.deleted(), "extra ");
        assert_eq!(simplified.inserted(), "");
        assert_eq!(simplified.render(), "one <del>extra </del>two");
    }

    #[test]
    fn identical_fragments_leave_empty_cores() {
        let simplified = op("unchanged", "unchanged").simplify();

        assert!(simplified.changed());
        assert_eq!(simplified.deleted(), "");
        assert_eq!(simplified.inserted(), "");
        assert_eq!(simplified.render(), "unchanged");
    }

    #[test]
    fn trims_at_character_boundaries_in_multibyte_text() {
        let simplified = op("Gewähltes Modell", "Gewähltes Muster").simplify();

        assert_eq!(simplified.prefix(), "Gewähltes M");
        assert_eq!(simplified.deleted(), "odell");
        assert_eq!(simplified.inserted(), "uster");
    }

    #[test]
    fn prefix_is_not_consumed_twice_by_the_suffix_scan() {
        // Overlapping repetition: suffix scan must stop at the prefix end.
        let simplified = op("aaa", "aa").simplify();

        assert_eq!(
            format!(
                "{}{}{}",
                simplified.prefix(),
                simplified.deleted(),
                simplified.suffix()
            ),
            "aaa"
        );
        assert_eq!(
            format!(
                "{}{}{}",
                simplified.prefix(),
                simplified.inserted(),
                simplified.suffix()
            ),
            "aa"
        );
    }

    #[test]
    fn nested_tags_trim_as_plain_characters() {
        let simplified = op("<b>old text</b>", "<b>new text</b>").simplify();

        assert_eq!(simplified.prefix(), "<b>");
        assert_eq!(simplified.deleted(), "old");
        assert_eq!(simplified.inserted(), "new");
        assert_eq!(simplified.suffix(), " text</b>");
    }

    proptest! {
        #[test]
        fn reassembly_reproduces_both_inputs(deleted in ".*", inserted in ".*") {
            let simplified = op(&deleted, &inserted).simplify();

            prop_assert_eq!(
                format!("{}{}{}", simplified.prefix(), simplified.deleted(), simplified.suffix()),
                deleted
            );
            prop_assert_eq!(
                format!("{}{}{}", simplified.prefix(), simplified.inserted(), simplified.suffix()),
                inserted
            );
        }

        #[test]
        fn unchanged_means_cores_equal_the_originals(deleted in ".*", inserted in ".*") {
            let simplified = op(&deleted, &inserted).simplify();

            if !simplified.changed() {
                prop_assert_eq!(simplified.deleted(), deleted);
                prop_assert_eq!(simplified.inserted(), inserted);
            }
        }
    }
}
