//! Read-only views derived from catalog state. Nothing here mutates its input.

use models::{Course, CourseId, CourseInstance, Period, Semester, Year};
use std::collections::{BTreeMap, BTreeSet};

/// Optional year/semester restriction. An unset dimension matches everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstanceFilter {
    pub year: Option<Year>,
    pub semester: Option<Semester>,
}

impl InstanceFilter {
    pub fn new(year: Option<Year>, semester: Option<Semester>) -> Self {
        Self { year, semester }
    }

    pub fn matches(&self, instance: &CourseInstance) -> bool {
        self.year.is_none_or(|y| instance.year == y)
            && self.semester.is_none_or(|s| instance.semester == s)
    }

    pub fn is_empty(&self) -> bool {
        self.year.is_none() && self.semester.is_none()
    }
}

/// Instances sharing one (year, semester)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodGroup<'a> {
    pub period: Period,
    pub instances: Vec<&'a CourseInstance>,
}

impl PeriodGroup<'_> {
    /// Group key, e.g. "2025-1"
    pub fn key(&self) -> String {
        self.period.to_string()
    }
}

/// Courses that list `id` among their prerequisites, in catalog order
pub fn dependents_of<'a>(courses: &'a [Course], id: &CourseId) -> Vec<&'a Course> {
    courses.iter().filter(|c| c.requires(id)).collect()
}

pub fn filter_instances<'a>(
    instances: &'a [CourseInstance],
    filter: &InstanceFilter,
) -> Vec<&'a CourseInstance> {
    instances.iter().filter(|i| filter.matches(i)).collect()
}

/// Partitions instances by period, most recent period first.
/// Order within a group is the order received.
pub fn group_by_period<'a, I>(instances: I) -> Vec<PeriodGroup<'a>>
where
    I: IntoIterator<Item = &'a CourseInstance>,
{
    let mut groups: BTreeMap<Period, Vec<&'a CourseInstance>> = BTreeMap::new();
    for instance in instances {
        groups.entry(instance.period()).or_default().push(instance);
    }

    groups
        .into_iter()
        .rev()
        .map(|(period, instances)| PeriodGroup { period, instances })
        .collect()
}

/// Distinct years, most recent first
pub fn unique_years(instances: &[CourseInstance]) -> Vec<Year> {
    let years: BTreeSet<Year> = instances.iter().map(|i| i.year).collect();
    years.into_iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::InstanceKey;

    fn course(id: &str, prerequisites: &[&str]) -> Course {
        Course {
            course_id: id.parse().unwrap(),
            title: format!("{id} title"),
            description: format!("{id} description"),
            prerequisites: prerequisites.iter().map(|p| p.parse().unwrap()).collect(),
        }
    }

    fn instance(id: &str, year: u16, semester: u8) -> CourseInstance {
        CourseInstance::new(InstanceKey::new(
            id.parse().unwrap(),
            Year::new(year).unwrap(),
            Semester::try_from(semester).unwrap(),
        ))
    }

    #[test]
    fn test_dependents_of() {
        let courses = vec![
            course("CS101", &[]),
            course("CS201", &["CS101"]),
            course("CS301", &["CS201", "CS101"]),
            course("MATH101", &[]),
        ];
        let ids = |id: &str| {
            dependents_of(&courses, &id.parse().unwrap())
                .iter()
                .map(|c| c.course_id.to_string())
                .collect::<Vec<_>>()
        };

        assert_eq!(ids("CS101"), vec!["CS201", "CS301"]);
        assert_eq!(ids("CS201"), vec!["CS301"]);
        assert!(ids("CS301").is_empty());
        assert!(ids("EE100").is_empty());
    }

    #[test]
    fn test_filter_instances() {
        let all = vec![
            instance("CS101", 2024, 1),
            instance("CS101", 2024, 2),
            instance("CS201", 2025, 1),
        ];
        let y = |n| Some(Year::new(n).unwrap());

        assert_eq!(filter_instances(&all, &InstanceFilter::default()).len(), 3);
        assert_eq!(filter_instances(&all, &InstanceFilter::new(y(2024), None)).len(), 2);
        assert_eq!(
            filter_instances(&all, &InstanceFilter::new(None, Some(Semester::Spring))).len(),
            2
        );

        let both = filter_instances(&all, &InstanceFilter::new(y(2024), Some(Semester::Fall)));
        assert_eq!(both, vec![&all[1]]);
        assert!(filter_instances(&all, &InstanceFilter::new(y(2030), None)).is_empty());
    }

    #[test]
    fn test_group_by_period_most_recent_first() {
        let all = vec![
            instance("CS101", 2024, 2),
            instance("CS201", 2025, 1),
            instance("CS301", 2024, 1),
        ];
        let keys: Vec<_> = group_by_period(&all).iter().map(PeriodGroup::key).collect();
        assert_eq!(keys, vec!["2025-1", "2024-2", "2024-1"]);
    }

    #[test]
    fn test_group_by_period_keeps_received_order() {
        let all = vec![
            instance("CS301", 2025, 2),
            instance("CS101", 2024, 1),
            instance("CS201", 2025, 2),
            instance("CS102", 2025, 2),
        ];
        let groups = group_by_period(&all);
        assert_eq!(groups.len(), 2);

        let first: Vec<_> = groups[0]
            .instances
            .iter()
            .map(|i| i.course_id.as_str())
            .collect();
        assert_eq!(first, vec!["CS301", "CS201", "CS102"]);
    }

    #[test]
    fn test_queries_are_repeatable() {
        let all = vec![instance("CS101", 2024, 2), instance("CS201", 2025, 1)];
        let snapshot = all.clone();
        let filter = InstanceFilter::new(None, Some(Semester::Fall));

        assert_eq!(filter_instances(&all, &filter), filter_instances(&all, &filter));
        assert_eq!(group_by_period(&all), group_by_period(&all));
        assert_eq!(all, snapshot);
    }

    #[test]
    fn test_unique_years_descending() {
        let all = vec![
            instance("CS101", 2023, 1),
            instance("CS201", 2025, 1),
            instance("CS301", 2023, 2),
        ];
        let years: Vec<u16> = unique_years(&all).into_iter().map(u16::from).collect();
        assert_eq!(years, vec![2025, 2023]);
    }
}
