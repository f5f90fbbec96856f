// Lecture catalog service
// Read-only lecture list backing the search dialog

use std::fs;
use std::path::Path;
use std::rc::Rc;

use crate::error::ConfigError;
use crate::models::lecture::Lecture;

const BUILT_IN_CATALOG: &str = r#"[
    {"id": "CS101", "title": "Introduction to Programming", "major": "Computer Science", "credits": "3", "grade": 1},
    {"id": "CS201", "title": "Data Structures", "major": "Computer Science", "credits": "3", "grade": 2},
    {"id": "CS301", "title": "Algorithms", "major": "Computer Science", "credits": "3", "grade": 3},
    {"id": "CS320", "title": "Operating Systems", "major": "Computer Science", "credits": "3", "grade": 3},
    {"id": "CS410", "title": "Compilers", "major": "Computer Science", "credits": "3", "grade": 4},
    {"id": "MA110", "title": "Calculus I", "major": "Mathematics", "credits": "3", "grade": 1},
    {"id": "MA210", "title": "Linear Algebra", "major": "Mathematics", "credits": "3", "grade": 2},
    {"id": "PH101", "title": "General Physics", "major": "Physics", "credits": "4", "grade": 1},
    {"id": "EN150", "title": "Academic Writing", "major": "Liberal Arts", "credits": "2", "grade": 1}
]"#;

/// Lectures available to the search dialog
#[derive(Debug, Clone, Default)]
pub struct LectureCatalog {
    lectures: Vec<Rc<Lecture>>,
}

impl LectureCatalog {
    pub fn new(lectures: Vec<Lecture>) -> Self {
        Self {
            lectures: lectures.into_iter().map(Rc::new).collect(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let lectures: Vec<Lecture> = serde_json::from_str(json)?;
        Ok(Self::new(lectures))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&data)?;
        log::info!(
            "Loaded {} lectures from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn built_in() -> Self {
        Self::from_json(BUILT_IN_CATALOG).unwrap_or_else(|err| {
            log::error!("Built-in lecture catalog is invalid: {}", err);
            Self::default()
        })
    }

    /// Load `path` when given, otherwise (or on failure) use the built-in sample
    pub fn load_or_built_in(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::load(path).unwrap_or_else(|err| {
                log::warn!("{}. Using the built-in lecture catalog.", err);
                Self::built_in()
            }),
            None => Self::built_in(),
        }
    }

    pub fn len(&self) -> usize {
        self.lectures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lectures.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<Rc<Lecture>> {
        self.lectures.iter().find(|lecture| lecture.id == id).cloned()
    }

    /// Lectures matching `query`, in catalog order
    pub fn search<'a>(&'a self, query: &'a str) -> impl Iterator<Item = &'a Rc<Lecture>> + 'a {
        self.lectures
            .iter()
            .filter(move |lecture| lecture.matches_query(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_built_in_catalog_parses() {
        let catalog = LectureCatalog::built_in();
        assert_eq!(catalog.len(), 9);
        assert_eq!(catalog.get("CS301").unwrap().title, "Algorithms");
    }

    #[test]
    fn test_search_filters_by_query() {
        let catalog = LectureCatalog::built_in();
        let ids: Vec<_> = catalog.search("mathematics").map(|l| l.id.clone()).collect();
        assert_eq!(ids, vec!["MA110", "MA210"]);
        assert_eq!(catalog.search("").count(), catalog.len());
    }

    #[test]
    fn test_get_shares_one_record() {
        let catalog = LectureCatalog::built_in();
        let a = catalog.get("CS101").unwrap();
        let b = catalog.get("CS101").unwrap();
        assert!(Rc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id":"X1","title":"Seminar"}}]"#).unwrap();

        let catalog = LectureCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("X1").is_some());
    }

    #[test]
    fn test_bad_file_falls_back_to_built_in() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(matches!(
            LectureCatalog::load(file.path()),
            Err(ConfigError::Catalog(_))
        ));
        let catalog = LectureCatalog::load_or_built_in(Some(file.path()));
        assert_eq!(catalog.len(), LectureCatalog::built_in().len());
    }
}
