use serde::{Deserialize, Serialize};

use crate::resources::DEFAULT_CATEGORY;

/// A support resource as delivered by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Display name.
    pub name: String,

    /// Link target.
    pub url: String,

    /// Optional phone line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Optional category; resources without one land in "General Resources".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Optional text-line instruction, e.g. "HOME to 741741".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Resource {
    /// Create a resource with only a name and a URL.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            phone: None,
            category: None,
            text: None,
        }
    }

    /// Set the phone line.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the text-line instruction.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// The category this resource is displayed under. Missing and empty
    /// categories both fall back to the default.
    pub fn category_or_default(&self) -> &str {
        self.category
            .as_deref()
            .filter(|category| !category.is_empty())
            .unwrap_or(DEFAULT_CATEGORY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_defaults_to_general() {
        let resource = Resource::new("Calm App", "https://www.calm.com");
        assert_eq!(resource.category_or_default(), "General Resources");

        let resource = resource.with_category("Mental Health");
        assert_eq!(resource.category_or_default(), "Mental Health");
    }

    #[test]
    fn optional_fields_are_omitted() {
        let resource = Resource::new("Calm App", "https://www.calm.com");
        assert_eq!(
            serde_json::to_string(&resource).unwrap(),
            r#"{"name":"Calm App","url":"https://www.calm.com"}"#
        );
    }
}
