//! Plain-text views for the command line

use catalog::{Catalog, PeriodGroup};
use models::{Course, CourseInstance, Semester, Year};
use std::fmt::Write;

fn list_or_none(ids: &[String]) -> String {
    if ids.is_empty() {
        "None".to_string()
    } else {
        ids.join(", ")
    }
}

fn join<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// One block per course, flagging the ones other courses depend on.
/// `department` keeps only courses whose ID starts with those letters.
pub fn courses(catalog: &Catalog, department: Option<&str>) -> String {
    if catalog.courses().is_empty() {
        return "No courses yet\n".to_string();
    }

    let shown: Vec<&Course> = catalog
        .courses()
        .iter()
        .filter(|c| department.is_none_or(|d| c.course_id.department().eq_ignore_ascii_case(d)))
        .collect();
    if shown.is_empty() {
        return format!("No {} courses\n", department.unwrap_or_default().to_uppercase());
    }

    let mut out = String::new();
    for course in shown {
        let dependents: Vec<String> = catalog
            .dependents_of(&course.course_id)
            .iter()
            .map(|c| c.course_id.to_string())
            .collect();

        let _ = write!(out, "{}", self::course(course));
        if !dependents.is_empty() {
            let _ = writeln!(out, "  Required by:   {} (protected)", dependents.join(", "));
        }
        out.push('\n');
    }
    out
}

pub fn course(course: &Course) -> String {
    let prerequisites: Vec<String> = course
        .prerequisites
        .iter()
        .map(ToString::to_string)
        .collect();

    let mut out = String::new();
    let _ = writeln!(out, "{} - {}", course.course_id, course.title);
    let _ = writeln!(out, "  {}", course.description);
    let _ = writeln!(out, "  Prerequisites: {}", list_or_none(&prerequisites));
    out
}

/// Instances grouped by period, most recent first. `filtered` tells an empty
/// schedule apart from a filter that matched nothing.
pub fn schedule(groups: &[PeriodGroup<'_>], filtered: bool) -> String {
    if groups.is_empty() {
        return if filtered {
            "No instances match your filters\n".to_string()
        } else {
            "No course instances yet\n".to_string()
        };
    }

    let mut out = String::new();
    for group in groups {
        let _ = writeln!(
            out,
            "{} [{}] - {} course(s)",
            group.period.label(),
            group.key(),
            group.instances.len()
        );
        for instance in &group.instances {
            let _ = writeln!(out, "  {} - {}", instance.course_id, instance.title());
        }
    }
    out
}

/// The years present in the schedule, for `--year`
pub fn year_options(years: &[Year]) -> String {
    if years.is_empty() {
        return String::new();
    }
    format!("Years: {}\n", join(years))
}

/// What `instances add` accepts for `--year` and `--semester`
pub fn period_choices() -> String {
    let semesters: Vec<String> = Semester::all()
        .into_iter()
        .map(|s| format!("{} ({})", s.number(), s.name()))
        .collect();

    let mut out = String::new();
    let _ = writeln!(out, "  --year:     {}", join(&Year::upcoming()));
    let _ = writeln!(out, "  --semester: {}", semesters.join(", "));
    out
}

pub fn instance(instance: &CourseInstance) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} - {}",
        instance.course_id,
        instance.period().label()
    );
    match &instance.course {
        Some(course) => {
            let _ = writeln!(out, "  {}", course.title);
            let _ = writeln!(out, "  {}", course.description);
            let prerequisites: Vec<String> = course
                .prerequisites
                .iter()
                .map(ToString::to_string)
                .collect();
            let _ = writeln!(out, "  Prerequisites: {}", list_or_none(&prerequisites));
        }
        None => {
            let _ = writeln!(out, "  {}", instance.title());
        }
    }
    out
}
