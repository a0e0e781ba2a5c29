use crate::dto::course_dto::CourseResponse;

pub const PLACEHOLDER: &str = "No courses found — try a different search or filter.";

/// Tag value that disables tag filtering.
pub const ALL_TAGS: &str = "all";

#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Courses(Vec<CourseResponse>),
    Placeholder(&'static str),
}

impl Rendered {
    pub fn from_courses(courses: Vec<CourseResponse>) -> Self {
        if courses.is_empty() {
            Rendered::Placeholder(PLACEHOLDER)
        } else {
            Rendered::Courses(courses)
        }
    }
}

/// Active tag chip and search text.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub tag: String,
    pub query: String,
}

impl Default for Filter {
    fn default() -> Self {
        Filter { tag: ALL_TAGS.to_string(), query: String::new() }
    }
}

impl Filter {
    pub fn new(tag: impl Into<String>, query: impl Into<String>) -> Self {
        Filter { tag: tag.into(), query: query.into() }
    }

    pub fn matches(&self, course: &CourseResponse) -> bool {
        let tag_ok = self.tag.eq_ignore_ascii_case(ALL_TAGS) || course.tag.eq_ignore_ascii_case(&self.tag);
        if !tag_ok {
            return false;
        }
        let q = self.query.trim().to_lowercase();
        q.is_empty()
            || course.title.to_lowercase().contains(&q)
            || course.desc.to_lowercase().contains(&q)
            || course.tutor.to_lowercase().contains(&q)
    }

    pub fn render(&self, courses: &[CourseResponse]) -> Rendered {
        Rendered::from_courses(apply_filter_and_search(courses, &self.tag, &self.query))
    }
}

/// Keeps courses whose tag matches (or `tag` is "all") and whose title,
/// description or tutor contains the trimmed query, case-insensitively.
/// Input order is preserved.
pub fn apply_filter_and_search(courses: &[CourseResponse], tag: &str, query: &str) -> Vec<CourseResponse> {
    let filter = Filter::new(tag, query);
    courses.iter().filter(|c| filter.matches(c)).cloned().collect()
}
