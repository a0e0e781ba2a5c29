use crate::client::catalog::Rendered;
use crate::dto::course_dto::CourseResponse;
use std::io::Write;

/// Output side of the catalog.
pub trait CatalogView: Send + Sync {
    /// Replaces everything shown with `rendered`.
    fn render(&self, rendered: &Rendered);
    /// Shows `course` above the current list. The active filter is not applied
    /// to pushed courses until the next full render.
    fn prepend(&self, course: &CourseResponse);
}

/// Prints course cards to stdout.
pub struct TerminalView;

impl TerminalView {
    fn card(course: &CourseResponse) -> String {
        format!(
            "{}  [{}]\n  {}\n  {} | {} | {}\n",
            course.title,
            course.price,
            course.desc,
            course.duration,
            course.tutor,
            course.tag.to_uppercase()
        )
    }
}

impl CatalogView for TerminalView {
    fn render(&self, rendered: &Rendered) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "----------------------------------------");
        match rendered {
            Rendered::Courses(courses) => {
                for course in courses {
                    let _ = writeln!(out, "{}", Self::card(course));
                }
            }
            Rendered::Placeholder(text) => {
                let _ = writeln!(out, "{}", text);
            }
        }
    }

    fn prepend(&self, course: &CourseResponse) {
        let _ = writeln!(std::io::stdout().lock(), "NEW  {}", Self::card(course));
    }
}
