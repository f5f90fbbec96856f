// Lecture module
// Immutable lecture record produced by the search collaborator

use serde::{Deserialize, Serialize};

/// A lecture as listed in the course catalog.
///
/// Schedules hold lectures behind an `Rc` so every block placed for the same
/// course points at one record; equality is still by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lecture {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default)]
    pub credits: Option<String>,
    #[serde(default)]
    pub grade: Option<u8>,
}

impl Lecture {
    /// Create a lecture with only the identifying fields set
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            major: None,
            credits: None,
            grade: None,
        }
    }

    pub fn with_major(mut self, major: impl Into<String>) -> Self {
        self.major = Some(major.into());
        self
    }

    pub fn with_credits(mut self, credits: impl Into<String>) -> Self {
        self.credits = Some(credits.into());
        self
    }

    pub fn with_grade(mut self, grade: u8) -> Self {
        self.grade = Some(grade);
        self
    }

    /// Case-insensitive match against id, title and major
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        self.id.to_lowercase().contains(&query)
            || self.title.to_lowercase().contains(&query)
            || self
                .major
                .as_deref()
                .is_some_and(|major| major.to_lowercase().contains(&query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_lecture_has_no_optional_fields() {
        let lecture = Lecture::new("L1", "Algorithms");
        assert_eq!(lecture.id, "L1");
        assert_eq!(lecture.title, "Algorithms");
        assert!(lecture.major.is_none());
        assert!(lecture.credits.is_none());
        assert!(lecture.grade.is_none());
    }

    #[test]
    fn test_matches_query() {
        let lecture = Lecture::new("CS101", "Data Structures").with_major("Computer Science");

        assert!(lecture.matches_query(""));
        assert!(lecture.matches_query("cs1"));
        assert!(lecture.matches_query("STRUCT"));
        assert!(lecture.matches_query("computer"));
        assert!(!lecture.matches_query("biology"));
    }

    #[test]
    fn test_deserialize_with_missing_optionals() {
        let lecture: Lecture = serde_json::from_str(r#"{"id":"L2","title":"Networks"}"#).unwrap();
        assert_eq!(lecture, Lecture::new("L2", "Networks"));
    }
}
