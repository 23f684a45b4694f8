use serde::{Deserialize, Serialize};

use crate::types::Resource;

/// A display-ready link inside a [`ResourceGroup`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLink {
    /// Display name.
    pub name: String,
    /// Link target.
    pub url: String,
    /// Optional phone line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Optional text-line instruction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ResourceLink {
    /// Create a link with no phone or text line.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            phone: None,
            text: None,
        }
    }
}

impl From<Resource> for ResourceLink {
    fn from(resource: Resource) -> Self {
        Self {
            name: resource.name,
            url: resource.url,
            phone: resource.phone,
            text: resource.text,
        }
    }
}

/// A named bucket of support links shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceGroup {
    /// Category heading.
    pub category: String,
    /// Links in source order.
    pub links: Vec<ResourceLink>,
}

impl ResourceGroup {
    /// Create a group from a heading and its links.
    pub fn new(category: impl Into<String>, links: Vec<ResourceLink>) -> Self {
        Self {
            category: category.into(),
            links,
        }
    }
}
