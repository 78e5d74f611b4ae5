//! Department model, the root of the catalog hierarchy.

use serde::{Deserialize, Serialize};

use super::{filled, Draft, Record};

/// A top-level organizational unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: String,
    pub name: String,
    pub created_at: String,
}

/// Request body for creating or replacing a department.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentDraft {
    #[serde(default)]
    pub name: String,
}

impl DepartmentDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Draft for DepartmentDraft {
    fn missing_field(&self) -> Option<&'static str> {
        if !filled(&self.name) {
            return Some("Department name");
        }
        None
    }
}

impl Record for Department {
    type Draft = DepartmentDraft;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_draft(&self) -> DepartmentDraft {
        DepartmentDraft {
            name: self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_is_incomplete() {
        assert_eq!(
            DepartmentDraft::new("   ").missing_field(),
            Some("Department name")
        );
        assert!(!DepartmentDraft::default().is_complete());
        assert!(DepartmentDraft::new("Physics").is_complete());
    }
}
