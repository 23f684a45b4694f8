//! Reshaping backend resources into display groups.

use std::collections::HashMap;

use crate::types::{Resource, ResourceGroup, ResourceLink};

/// Category assigned to resources that arrive without one, or with an empty one.
pub const DEFAULT_CATEGORY: &str = "General Resources";

/// Group `resources` by category.
///
/// Categories appear in the order they are first seen and links keep their
/// source order within each category. Runs in a single pass.
pub fn group(resources: impl IntoIterator<Item = Resource>) -> Vec<ResourceGroup> {
    let mut order: Vec<String> = Vec::new();
    let mut buckets: HashMap<String, Vec<ResourceLink>> = HashMap::new();
    for resource in resources {
        let category = resource.category_or_default().to_string();
        let links = buckets.entry(category).or_insert_with_key(|category| {
            order.push(category.clone());
            Vec::new()
        });
        links.push(ResourceLink::from(resource));
    }
    order
        .into_iter()
        .map(|category| {
            let links = buckets.remove(&category).unwrap_or_default();
            ResourceGroup { category, links }
        })
        .collect()
}

/// Group `resources`, falling back to [`default_groups`] when there are none.
pub fn display_groups(resources: impl IntoIterator<Item = Resource>) -> Vec<ResourceGroup> {
    let groups = group(resources);
    if groups.is_empty() {
        default_groups()
    } else {
        groups
    }
}

/// The guidance shown before the backend has suggested anything.
pub fn default_groups() -> Vec<ResourceGroup> {
    vec![
        ResourceGroup::new(
            "Mental Health",
            vec![
                ResourceLink::new("National Alliance on Mental Health", "https://www.nami.org"),
                ResourceLink::new("Calm App", "https://www.calm.com"),
            ],
        ),
        ResourceGroup::new(
            "Sexual Health",
            vec![
                ResourceLink::new("Planned Parenthood", "https://www.plannedparenthood.org"),
                ResourceLink::new("CDC Sexual Health", "https://www.cdc.gov/sexualhealth/"),
            ],
        ),
    ]
}
