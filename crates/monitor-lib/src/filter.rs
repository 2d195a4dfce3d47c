//! Case-insensitive search over catalog entities

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::models::{Alert, Cluster, Workflow};

/// Borrow one searchable string field of an entity
pub type FieldAccessor<T> = fn(&T) -> &str;

/// Keep the items where any of `fields` contains `query`, ignoring case.
///
/// Only the empty query keeps every item; whitespace is matched like any
/// other character. The result preserves catalog order and only ever
/// contains input items.
pub fn filter<'a, T>(query: &str, items: &'a [T], fields: &[FieldAccessor<T>]) -> Vec<&'a T> {
    if query.is_empty() {
        return items.iter().collect();
    }

    let needle = query.to_lowercase();

    items
        .iter()
        .filter(|item| {
            fields
                .iter()
                .any(|field| field(*item).to_lowercase().contains(&needle))
        })
        .collect()
}

/// Entities that declare which fields the search box looks at
pub trait Searchable: Sized + 'static {
    fn search_fields() -> &'static [FieldAccessor<Self>];
}

const CLUSTER_FIELDS: &[FieldAccessor<Cluster>] = &[|c| &c.name, |c| &c.location];

const WORKFLOW_FIELDS: &[FieldAccessor<Workflow>] = &[
    |w| &w.title,
    |w| &w.backup_type,
    |w| &w.cluster,
    |w| w.status.as_str(),
];

const ALERT_FIELDS: &[FieldAccessor<Alert>] = &[
    |a| &a.title,
    |a| &a.category,
    |a| &a.source,
    |a| &a.description,
];

impl Searchable for Cluster {
    fn search_fields() -> &'static [FieldAccessor<Self>] {
        CLUSTER_FIELDS
    }
}

impl Searchable for Workflow {
    fn search_fields() -> &'static [FieldAccessor<Self>] {
        WORKFLOW_FIELDS
    }
}

impl Searchable for Alert {
    fn search_fields() -> &'static [FieldAccessor<Self>] {
        ALERT_FIELDS
    }
}

/// Filter using the entity's default search fields
pub fn search<'a, T: Searchable>(query: &str, items: &'a [T]) -> Vec<&'a T> {
    filter(query, items, T::search_fields())
}

/// Results of the header search box across every catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub query: String,
    pub clusters: Vec<Cluster>,
    pub workflows: Vec<Workflow>,
    pub alerts: Vec<Alert>,
}

impl SearchResults {
    pub fn total(&self) -> usize {
        self.clusters.len() + self.workflows.len() + self.alerts.len()
    }
}

/// Search clusters, workflows and alerts at once.
///
/// Unlike the per-page filters, a blank query matches nothing.
pub fn global_search(query: &str, catalog: &Catalog) -> SearchResults {
    let query = query.trim();
    if query.is_empty() {
        return SearchResults::default();
    }

    SearchResults {
        query: query.to_string(),
        clusters: search(query, &catalog.clusters).into_iter().cloned().collect(),
        workflows: search(query, &catalog.workflows).into_iter().cloned().collect(),
        alerts: search(query, &catalog.alerts).into_iter().cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(clusters: &[&Cluster]) -> Vec<String> {
        clusters.iter().map(|c| c.name.clone()).collect()
    }

    #[test]
    fn test_empty_query_is_identity() {
        let catalog = Catalog::seed();
        let all = search("", &catalog.clusters);

        assert_eq!(all.len(), catalog.clusters.len());
        for (kept, original) in all.iter().zip(catalog.clusters.iter()) {
            assert_eq!(*kept, original);
        }

    }

    #[test]
    fn test_cluster_location_match() {
        let catalog = Catalog::seed();
        let west = search("west", &catalog.clusters);

        assert_eq!(west.len(), 1);
        assert_eq!(west[0].location, "US West");
    }

    #[test]
    fn test_whitespace_query_is_matched_literally() {
        let catalog = Catalog::seed();
        let by_location: &[FieldAccessor<Cluster>] = &[|c| &c.location];

        let spaced = filter(" ", &catalog.clusters, by_location);
        let locations: Vec<&str> = spaced.iter().map(|c| c.location.as_str()).collect();
        assert_eq!(locations, vec!["US East", "US West"]);

        assert!(search("west ", &catalog.clusters).is_empty());
        assert_eq!(search("us ", &catalog.clusters).len(), 2);
    }

    #[test]
    fn test_case_insensitive_name_match() {
        let catalog = Catalog::seed();
        let prod = search("PRODUCTION", &catalog.clusters);

        assert_eq!(names(&prod), vec!["Production-East-01", "Production-West-02"]);
    }

    #[test]
    fn test_no_match_returns_empty() {
        let catalog = Catalog::seed();
        assert!(search("antarctica", &catalog.clusters).is_empty());
    }

    #[test]
    fn test_result_is_ordered_subset() {
        let catalog = Catalog::seed();
        for query in ["e", "0", "dev", "backup", "sync", "zzz"] {
            let result = search(query, &catalog.workflows);
            let mut cursor = 0;
            for item in &result {
                let pos = catalog.workflows[cursor..]
                    .iter()
                    .position(|w| std::ptr::eq(w, *item))
                    .expect("filtered item must come from the input, in order");
                cursor += pos + 1;
            }
        }
    }

    #[test]
    fn test_custom_field_accessors() {
        let catalog = Catalog::seed();
        let by_cluster: &[FieldAccessor<Workflow>] = &[|w| &w.cluster];

        let east = filter("east-01", &catalog.workflows, by_cluster);
        assert_eq!(east.len(), 2);
        assert!(east.iter().all(|w| w.cluster == "Production-East-01"));
    }

    #[test]
    fn test_workflow_status_is_searchable() {
        let catalog = Catalog::seed();
        let failed = search("failed", &catalog.workflows);

        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].title, "VM Infrastructure Snapshot");
    }

    #[test]
    fn test_global_search_spans_catalogs() {
        let catalog = Catalog::seed();
        let results = global_search("exchange", &catalog);

        assert!(results.clusters.is_empty());
        assert_eq!(results.workflows.len(), 1);
        assert_eq!(results.alerts.len(), 1);
        assert_eq!(results.total(), 2);
    }

    #[test]
    fn test_global_search_blank_query_is_empty() {
        let catalog = Catalog::seed();
        let results = global_search("  ", &catalog);

        assert_eq!(results.total(), 0);
        assert!(results.query.is_empty());
    }
}
