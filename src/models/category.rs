use serde::{Deserialize, Serialize};

/// A leaf entry of the catalog navigation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub parent_name: String,
    pub url: String,
}

impl Category {
    pub fn new(name: impl Into<String>, parent_name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent_name: parent_name.into(),
            url: url.into(),
        }
    }

    /// `name/parent_name`, as written to the category column.
    pub fn path(&self) -> String {
        format!("{}/{}", self.name, self.parent_name)
    }
}
