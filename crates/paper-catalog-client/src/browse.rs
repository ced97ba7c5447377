//! Narrowing the loaded paper list for the public browse page.

use crate::model::Paper;

/// Browse criteria. Empty fields do not narrow.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrowseFilter {
    /// Case-insensitive substring of the title.
    pub search: String,
    pub course: Option<String>,
    pub semester: Option<String>,
    pub subject: Option<String>,
    pub year: Option<u32>,
    pub exam_type: Option<String>,
}

fn same_ref(wanted: &Option<String>, actual: Option<&str>) -> bool {
    match wanted.as_deref().filter(|w| !w.is_empty()) {
        Some(w) => actual == Some(w),
        None => true,
    }
}

impl BrowseFilter {
    pub fn matches(&self, paper: &Paper) -> bool {
        let search = self.search.trim().to_lowercase();
        if !search.is_empty() && !paper.title.to_lowercase().contains(&search) {
            return false;
        }
        let year = match self.year {
            Some(year) => paper.year == year,
            None => true,
        };
        year && same_ref(&self.course, paper.course.as_ref().map(|c| c.id.as_str()))
            && same_ref(&self.semester, paper.semester.as_ref().map(|s| s.id.as_str()))
            && same_ref(&self.subject, paper.subject.as_ref().map(|s| s.id.as_str()))
            && same_ref(&self.exam_type, Some(paper.exam_type.as_str()))
    }
}

/// Papers passing `filter`, in their loaded order.
pub fn visible_papers<'a>(papers: &'a [Paper], filter: &BrowseFilter) -> Vec<&'a Paper> {
    papers.iter().filter(|p| filter.matches(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CodeRef;
    use chrono::Utc;

    fn paper(id: &str, title: &str, course: &str, year: u32, exam_type: &str) -> Paper {
        Paper {
            id: id.into(),
            title: title.into(),
            description: None,
            college: None,
            course: Some(CodeRef {
                id: course.into(),
                name: "CS".into(),
                code: "CS1".into(),
            }),
            semester: None,
            subject: None,
            year,
            exam_type: exam_type.into(),
            file_path: format!("uploads/papers/{id}.pdf"),
            file_name: format!("{id}.pdf"),
            file_size: 10,
            uploaded_by: "admin".into(),
            download_count: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn search_is_case_insensitive() {
        let papers = vec![
            paper("1", "Midterm 2023", "c1", 2023, "Mid Term"),
            paper("2", "Final Exam", "c1", 2023, "End Term"),
        ];
        let filter = BrowseFilter {
            search: "MIDTERM".into(),
            ..Default::default()
        };
        let ids: Vec<_> = visible_papers(&papers, &filter).into_iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["1"]);
    }

    #[test]
    fn criteria_combine() {
        let papers = vec![
            paper("1", "Midterm", "c1", 2023, "Mid Term"),
            paper("2", "Midterm", "c2", 2023, "Mid Term"),
            paper("3", "Midterm", "c1", 2022, "Mid Term"),
        ];
        let filter = BrowseFilter {
            course: Some("c1".into()),
            year: Some(2023),
            ..Default::default()
        };
        let ids: Vec<_> = visible_papers(&papers, &filter).into_iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["1"]);

        let everything = BrowseFilter {
            course: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(visible_papers(&papers, &everything).len(), 3);
    }

    #[test]
    fn orphaned_references_never_match_a_wanted_parent() {
        let mut orphan = paper("1", "Quiz", "c1", 2024, "Practice");
        orphan.course = None;
        let filter = BrowseFilter {
            course: Some("c1".into()),
            ..Default::default()
        };
        assert!(!filter.matches(&orphan));
    }
}
