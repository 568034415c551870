//! Conflict detection over template entries
//!
//! Duplicate tag ownership is advisory only: the first entry in store order
//! stays authoritative and later duplicates are flagged for the caller to
//! warn about. Nothing here blocks mutation.

use std::collections::{BTreeSet, HashMap};

use super::store::TemplateEntry;

/// Indices of entries whose tag is already owned by an earlier entry
///
/// Empty tags are never flagged. The first occurrence of a tag is the
/// authoritative owner and is not flagged.
pub fn find_duplicates(entries: &[TemplateEntry]) -> BTreeSet<usize> {
    let mut first_owner: HashMap<&str, usize> = HashMap::new();
    let mut duplicates = BTreeSet::new();

    for (i, entry) in entries.iter().enumerate() {
        if entry.tag.is_empty() {
            continue;
        }
        if first_owner.contains_key(entry.tag.as_str()) {
            duplicates.insert(i);
        } else {
            first_owner.insert(entry.tag.as_str(), i);
        }
    }

    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::store::TemplateEntry;

    #[test]
    fn test_later_duplicate_flagged() {
        let entries = vec![
            TemplateEntry::new("Throw"),
            TemplateEntry::new("Grab"),
            TemplateEntry::new("Pull"),
            TemplateEntry::new("Throw"),
        ];
        let dupes = find_duplicates(&entries);
        assert_eq!(dupes.into_iter().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_no_duplicates() {
        let entries = vec![TemplateEntry::new("Grab"), TemplateEntry::new("Throw")];
        assert!(find_duplicates(&entries).is_empty());
    }

    #[test]
    fn test_empty_tags_never_flagged() {
        let entries = vec![
            TemplateEntry::new(""),
            TemplateEntry::new(""),
            TemplateEntry::new("Grab"),
        ];
        assert!(find_duplicates(&entries).is_empty());
    }

    #[test]
    fn test_triplicate_flags_both_later_entries() {
        let entries = vec![
            TemplateEntry::new("Grab"),
            TemplateEntry::new("Grab"),
            TemplateEntry::new("Grab"),
        ];
        let dupes = find_duplicates(&entries);
        assert_eq!(dupes.into_iter().collect::<Vec<_>>(), vec![1, 2]);
    }
}
