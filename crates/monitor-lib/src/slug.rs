//! URL slugs for workflow detail routes
//!
//! A slug is the lowercase, hyphen-delimited form of a title. Slugs are the
//! public route key of a workflow, but the catalog identifies workflows by a
//! numeric id, so [`SlugIndex`] refuses to build when two titles collapse to
//! the same slug instead of letting the later one disappear.

use std::collections::HashMap;
use std::fmt;

use crate::error::MonitorError;
use crate::models::Workflow;

/// Convert a human title to its slug.
///
/// Lowercases, collapses every run of characters outside `[a-z0-9]` into a
/// single `-` and strips leading and trailing hyphens.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_separator = false;

    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else {
            pending_separator = true;
        }
    }

    slug
}

/// Outcome of looking a workflow up by slug
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'a> {
    Found(&'a Workflow),
    NotFound,
}

impl<'a> Resolution<'a> {
    pub fn found(self) -> Option<&'a Workflow> {
        match self {
            Resolution::Found(workflow) => Some(workflow),
            Resolution::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }
}

/// Find the first workflow whose title slugifies to `identifier`.
pub fn resolve<'a>(identifier: &str, workflows: &'a [Workflow]) -> Resolution<'a> {
    workflows
        .iter()
        .find(|w| slugify(&w.title) == identifier)
        .map(Resolution::Found)
        .unwrap_or(Resolution::NotFound)
}

/// Two workflows whose titles produce the same slug
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugConflict {
    pub slug: String,
    pub first_id: u32,
    pub second_id: u32,
}

impl fmt::Display for SlugConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Workflows {} and {} share the slug '{}'",
            self.first_id, self.second_id, self.slug
        )
    }
}

/// Slug to workflow id mapping with guaranteed uniqueness
#[derive(Debug, Clone, Default)]
pub struct SlugIndex {
    ids: HashMap<String, u32>,
}

impl SlugIndex {
    /// Index the given workflows, failing on the first slug collision
    pub fn build(workflows: &[Workflow]) -> Result<Self, MonitorError> {
        let mut ids: HashMap<String, u32> = HashMap::with_capacity(workflows.len());

        for workflow in workflows {
            let slug = slugify(&workflow.title);
            if let Some(&first_id) = ids.get(&slug) {
                return Err(MonitorError::SlugConflict(SlugConflict {
                    slug,
                    first_id,
                    second_id: workflow.id,
                }));
            }
            ids.insert(slug, workflow.id);
        }

        Ok(Self { ids })
    }

    /// Workflow id registered under `slug`
    pub fn id_for(&self, slug: &str) -> Option<u32> {
        self.ids.get(slug).copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
