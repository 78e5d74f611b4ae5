//! Degree model: a program of study owned by one department.

use serde::{Deserialize, Serialize};

use super::{filled, Draft, Record};

/// Canonical degree record as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Degree {
    pub id: String,
    /// Short code such as "BSC-CS"
    pub code: String,
    pub full_name: String,
    pub stream_name: String,
    pub level: String,
    pub semester_count: i64,
    pub department_id: String,
    pub created_at: String,
}

/// Degree as listed, with the owning department's name joined in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DegreeView {
    #[serde(flatten)]
    pub degree: Degree,
    /// Empty when the department could not be resolved
    #[serde(default)]
    pub department_name: String,
}

/// Request body for creating or replacing a degree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DegreeDraft {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub stream_name: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub department_id: String,
    #[serde(default)]
    pub semester_count: i64,
}

impl Draft for DegreeDraft {
    fn missing_field(&self) -> Option<&'static str> {
        if !filled(&self.code) {
            Some("Degree code")
        } else if !filled(&self.full_name) {
            Some("Degree name")
        } else if !filled(&self.stream_name) {
            Some("Stream name")
        } else if !filled(&self.level) {
            Some("Degree level")
        } else if self.department_id.is_empty() {
            Some("Department")
        } else if self.semester_count <= 0 {
            Some("Semester count")
        } else {
            None
        }
    }
}

impl Record for DegreeView {
    type Draft = DegreeDraft;

    fn id(&self) -> &str {
        &self.degree.id
    }

    fn to_draft(&self) -> DegreeDraft {
        let degree = &self.degree;
        DegreeDraft {
            code: degree.code.clone(),
            full_name: degree.full_name.clone(),
            stream_name: degree.stream_name.clone(),
            level: degree.level.clone(),
            department_id: degree.department_id.clone(),
            semester_count: degree.semester_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> DegreeDraft {
        DegreeDraft {
            code: "BSC-CS".to_string(),
            full_name: "Bachelor of Science".to_string(),
            stream_name: "Computer Science".to_string(),
            level: "UG".to_string(),
            department_id: "no-such-department".to_string(),
            semester_count: 6,
        }
    }

    #[test]
    fn test_complete_draft_ignores_parent_existence() {
        assert!(complete().is_complete());
    }

    #[test]
    fn test_each_required_field_blocks() {
        let cases: Vec<(fn(&mut DegreeDraft), &str)> = vec![
            (|d| d.code.clear(), "Degree code"),
            (|d| d.full_name = " ".to_string(), "Degree name"),
            (|d| d.stream_name.clear(), "Stream name"),
            (|d| d.level.clear(), "Degree level"),
            (|d| d.department_id.clear(), "Department"),
            (|d| d.semester_count = 0, "Semester count"),
            (|d| d.semester_count = -2, "Semester count"),
        ];

        for (blank, label) in cases {
            let mut draft = complete();
            blank(&mut draft);
            assert_eq!(draft.missing_field(), Some(label));
        }
    }

    #[test]
    fn test_view_serializes_flat() {
        let view = DegreeView {
            degree: Degree {
                id: "d1".to_string(),
                code: "MSC".to_string(),
                full_name: "Master of Science".to_string(),
                stream_name: "Physics".to_string(),
                level: "PG".to_string(),
                semester_count: 4,
                department_id: "dep".to_string(),
                created_at: "2026-01-01T00:00:00.000000Z".to_string(),
            },
            department_name: "Physics".to_string(),
        };

        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["fullName"], "Master of Science");
        assert_eq!(value["departmentName"], "Physics");

        let back: DegreeView = serde_json::from_value(value).unwrap();
        assert_eq!(back, view);
    }
}
