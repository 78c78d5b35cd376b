//! Import statements for custom types.

use std::collections::{BTreeMap, BTreeSet};

/// Resolve used custom type names to their configured import statements.
///
/// Names without a mapping are assumed to be globals and produce nothing.
/// The result is sorted and free of duplicates, so two names sharing one
/// statement emit it once.
pub fn resolve_imports<'a, I>(used_types: I, mapping: &BTreeMap<String, String>) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let statements: BTreeSet<&str> = used_types
        .into_iter()
        .filter_map(|name| mapping.get(name))
        .map(|stmt| stmt.trim())
        .filter(|stmt| !stmt.is_empty())
        .collect();
    statements.into_iter().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn unmapped_names_are_dropped() {
        let map = mapping(&[("Dayjs", "import { Dayjs } from 'dayjs';")]);
        let used = names(&["Dayjs", "Date"]);
        assert_eq!(
            resolve_imports(&used, &map),
            vec!["import { Dayjs } from 'dayjs';"]
        );
    }

    #[test]
    fn sorted_and_deduplicated() {
        let map = mapping(&[
            ("Dayjs", "import { Dayjs } from 'dayjs';"),
            ("Decimal", "import Decimal from 'decimal.js';"),
            ("Big", "import { Big, Decimal } from './numbers';"),
            ("Small", "import { Big, Decimal } from './numbers';"),
        ]);
        let used = names(&["Small", "Dayjs", "Big", "Decimal", "Dayjs"]);
        let first = resolve_imports(&used, &map);
        assert_eq!(
            first,
            vec![
                "import Decimal from 'decimal.js';",
                "import { Big, Decimal } from './numbers';",
                "import { Dayjs } from 'dayjs';",
            ]
        );

        let reordered = names(&["Decimal", "Big", "Dayjs", "Small"]);
        assert_eq!(resolve_imports(&reordered, &map), first);
    }

    #[test]
    fn nothing_used() {
        let map = mapping(&[("Dayjs", "import { Dayjs } from 'dayjs';")]);
        assert!(resolve_imports(&Vec::<String>::new(), &map).is_empty());
    }
}
