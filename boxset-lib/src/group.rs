use std::collections::HashMap;

use boxset_core::{Collection, Title};

/// Titles partitioned by declared collection name.
#[derive(Debug, Default)]
pub struct Grouping {
    /// Collections in order of first appearance.
    pub collections: Vec<Collection>,
    /// Titles that declare no collection.
    pub ungrouped: Vec<Title>,
}

/// Group titles by exact (case-sensitive) collection name.
///
/// Members keep their input order, so grouping a deterministic scan gives
/// deterministic collections.
pub fn group_titles<I>(titles: I) -> Grouping
where
    I: IntoIterator<Item = Title>,
{
    let mut grouping = Grouping::default();
    let mut index: HashMap<String, usize> = HashMap::new();

    for title in titles {
        let Some(name) = title.collection_name().map(str::to_string) else {
            log::debug!("{} has no collection", title.id().display());
            grouping.ungrouped.push(title);
            continue;
        };
        let slot = *index.entry(name.clone()).or_insert_with(|| {
            grouping.collections.push(Collection::new(name));
            grouping.collections.len() - 1
        });
        grouping.collections[slot].push(title);
    }

    grouping
}
