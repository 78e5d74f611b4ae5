//! Semester mapping model: one semester number of one degree.

use serde::{Deserialize, Serialize};

use super::{Draft, Record};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterMapping {
    pub id: String,
    pub semester_number: i64,
    pub degree_id: String,
    pub created_at: String,
}

/// Semester mapping as listed, with the degree's full name joined in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterView {
    #[serde(flatten)]
    pub mapping: SemesterMapping,
    #[serde(default)]
    pub degree_name: String,
}

impl SemesterView {
    /// Display label, e.g. "Semester 3".
    pub fn label(&self) -> String {
        semester_label(Some(self.mapping.semester_number))
    }
}

/// Request body for creating or replacing a semester mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterDraft {
    #[serde(default)]
    pub semester_number: i64,
    #[serde(default)]
    pub degree_id: String,
}

impl Draft for SemesterDraft {
    fn missing_field(&self) -> Option<&'static str> {
        if self.semester_number <= 0 {
            Some("Semester number")
        } else if self.degree_id.is_empty() {
            Some("Degree")
        } else {
            None
        }
    }
}

impl Record for SemesterView {
    type Draft = SemesterDraft;

    fn id(&self) -> &str {
        &self.mapping.id
    }

    fn to_draft(&self) -> SemesterDraft {
        SemesterDraft {
            semester_number: self.mapping.semester_number,
            degree_id: self.mapping.degree_id.clone(),
        }
    }
}

/// "Semester N" for a positive number, empty otherwise.
pub fn semester_label(number: Option<i64>) -> String {
    match number {
        Some(n) if n != 0 => format!("Semester {}", n),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semester_label() {
        assert_eq!(semester_label(Some(3)), "Semester 3");
        assert_eq!(semester_label(Some(0)), "");
        assert_eq!(semester_label(None), "");
    }

    #[test]
    fn test_draft_requires_number_and_degree() {
        let mut draft = SemesterDraft {
            semester_number: 1,
            degree_id: "deg".to_string(),
        };
        assert!(draft.is_complete());

        draft.semester_number = 0;
        assert_eq!(draft.missing_field(), Some("Semester number"));

        draft.semester_number = 2;
        draft.degree_id.clear();
        assert_eq!(draft.missing_field(), Some("Degree"));
    }
}
