//! Subject model: a course offered in one semester of one degree.

use serde::{Deserialize, Serialize};

use super::{filled, Draft, Record};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: String,
    pub degree_id: String,
    /// Id of the owning semester mapping, not the semester number
    pub semester_id: String,
    pub code: String,
    pub name: String,
    /// Free text such as "Core" or "Elective"
    pub category: String,
    /// Free text, expected to be "Theory" or "Practical"
    #[serde(rename = "type")]
    pub subject_type: String,
    pub created_at: String,
}

impl Subject {
    /// Bucket the subject is shown under, matched case-insensitively.
    ///
    /// Any other type value belongs to no bucket.
    pub fn kind(&self) -> Option<SubjectKind> {
        SubjectKind::parse(&self.subject_type)
    }

    pub fn is_elective(&self) -> bool {
        self.category.eq_ignore_ascii_case("elective")
    }
}

/// Display buckets for subjects within a semester.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectKind {
    Theory,
    Practical,
}

impl SubjectKind {
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("theory") {
            Some(SubjectKind::Theory)
        } else if value.eq_ignore_ascii_case("practical") {
            Some(SubjectKind::Practical)
        } else {
            None
        }
    }
}

/// Subject as listed, with degree name and semester label joined in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectView {
    #[serde(flatten)]
    pub subject: Subject,
    #[serde(default)]
    pub degree_name: String,
    /// "Semester N", empty when the mapping could not be resolved
    #[serde(default)]
    pub semester_name: String,
}

/// Request body for creating or replacing a subject.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectDraft {
    #[serde(default)]
    pub degree_id: String,
    #[serde(default)]
    pub semester_id: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, rename = "type")]
    pub subject_type: String,
}

impl Draft for SubjectDraft {
    fn missing_field(&self) -> Option<&'static str> {
        if !filled(&self.name) {
            Some("Subject name")
        } else if !filled(&self.code) {
            Some("Subject code")
        } else if !filled(&self.category) {
            Some("Subject category")
        } else if !filled(&self.subject_type) {
            Some("Subject type")
        } else if self.degree_id.is_empty() {
            Some("Degree")
        } else if self.semester_id.is_empty() {
            Some("Semester")
        } else {
            None
        }
    }
}

impl Record for SubjectView {
    type Draft = SubjectDraft;

    fn id(&self) -> &str {
        &self.subject.id
    }

    fn to_draft(&self) -> SubjectDraft {
        let subject = &self.subject;
        SubjectDraft {
            degree_id: subject.degree_id.clone(),
            semester_id: subject.semester_id.clone(),
            code: subject.code.clone(),
            name: subject.name.clone(),
            category: subject.category.clone(),
            subject_type: subject.subject_type.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_is_case_insensitive() {
        assert_eq!(SubjectKind::parse("Theory"), Some(SubjectKind::Theory));
        assert_eq!(SubjectKind::parse("PRACTICAL"), Some(SubjectKind::Practical));
        assert_eq!(SubjectKind::parse("lab"), None);
        assert_eq!(SubjectKind::parse(""), None);
    }

    #[test]
    fn test_draft_field_order() {
        let mut draft = SubjectDraft {
            degree_id: "deg".to_string(),
            semester_id: "sem".to_string(),
            code: "CS101".to_string(),
            name: "Algorithms".to_string(),
            category: "Core".to_string(),
            subject_type: "lab".to_string(),
        };
        // Any non-empty type passes; bucketing is a display concern.
        assert!(draft.is_complete());

        draft.subject_type.clear();
        assert_eq!(draft.missing_field(), Some("Subject type"));
        draft.name.clear();
        assert_eq!(draft.missing_field(), Some("Subject name"));
    }

    #[test]
    fn test_type_field_wire_name() {
        let draft: SubjectDraft =
            serde_json::from_str(r#"{"name":"Optics","type":"Theory"}"#).unwrap();
        assert_eq!(draft.subject_type, "Theory");
        assert_eq!(draft.missing_field(), Some("Subject code"));
    }
}
