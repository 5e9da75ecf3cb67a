//! Dependency matching
//!
//! Decides which projects need a pipeline run for a given artifact event.

use crate::domain::artifact::ArtifactEvent;
use crate::domain::project::Project;

/// How many triggers a single project receives for one event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TriggerPolicy {
    /// One trigger per matching dependency entry. A project listing the same
    /// coordinates twice is triggered twice.
    #[default]
    PerCoordinate,
    /// At most one trigger per project, however many entries match.
    PerProject,
}

/// Select the projects that depend on the event's component
///
/// The result follows configuration order. Under [`TriggerPolicy::PerCoordinate`]
/// a project appears once for every matching dependency entry.
pub fn match_projects<'a>(
    event: &ArtifactEvent,
    projects: &'a [Project],
    policy: TriggerPolicy,
) -> Vec<&'a Project> {
    let group = event.component.group.as_str();
    let name = event.component.name.as_str();

    let mut matched = Vec::new();
    for project in projects {
        let hits = project
            .dependencies
            .iter()
            .filter(|d| d.is(group, name))
            .count();

        let times = match policy {
            TriggerPolicy::PerCoordinate => hits,
            TriggerPolicy::PerProject => hits.min(1),
        };
        matched.extend(std::iter::repeat_n(project, times));
    }

    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::artifact::Component;
    use crate::domain::project::Dependency;

    fn event(group: &str, name: &str) -> ArtifactEvent {
        ArtifactEvent {
            timestamp: String::new(),
            node_id: String::new(),
            initiator: String::new(),
            repository_name: "maven-releases".to_string(),
            action: "UPDATED".to_string(),
            component: Component {
                id: String::new(),
                format: "maven2".to_string(),
                name: name.to_string(),
                group: group.to_string(),
                version: "1.0.0".to_string(),
            },
        }
    }

    fn project(name: &str, id: u64, dependencies: Vec<Dependency>) -> Project {
        Project {
            name: name.to_string(),
            id,
            token: format!("token-{id}"),
            dependencies,
        }
    }

    #[test]
    fn test_exact_match() {
        let projects = vec![project(
            "awesomeProject",
            42,
            vec![Dependency::new("com.group", "some-project")],
        )];

        let matched = match_projects(
            &event("com.group", "some-project"),
            &projects,
            TriggerPolicy::default(),
        );

        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, 42);
    }

    #[test]
    fn test_no_prefix_or_case_insensitive_match() {
        let projects = vec![
            project(
                "suffix",
                1,
                vec![Dependency::new("com.group", "some-projectX")],
            ),
            project(
                "case",
                2,
                vec![Dependency::new("com.Group", "some-project")],
            ),
            project("swapped", 3, vec![Dependency::new("some-project", "com.group")]),
        ];

        let matched = match_projects(
            &event("com.group", "some-project"),
            &projects,
            TriggerPolicy::default(),
        );

        assert!(matched.is_empty());
    }

    #[test]
    fn test_project_without_dependencies_never_matches() {
        let projects = vec![project("empty", 7, vec![])];
        let matched = match_projects(&event("a", "b"), &projects, TriggerPolicy::default());
        assert!(matched.is_empty());
    }

    #[test]
    fn test_duplicate_coordinates_trigger_per_entry() {
        let projects = vec![project(
            "twice",
            5,
            vec![
                Dependency::new("com.group", "some-project"),
                Dependency::new("org.other", "lib"),
                Dependency::new("com.group", "some-project"),
            ],
        )];

        let matched = match_projects(
            &event("com.group", "some-project"),
            &projects,
            TriggerPolicy::PerCoordinate,
        );

        assert_eq!(matched.len(), 2);
        assert!(matched.iter().all(|p| p.id == 5));
    }

    #[test]
    fn test_per_project_policy_deduplicates() {
        let projects = vec![project(
            "twice",
            5,
            vec![
                Dependency::new("com.group", "some-project"),
                Dependency::new("com.group", "some-project"),
            ],
        )];

        let matched = match_projects(
            &event("com.group", "some-project"),
            &projects,
            TriggerPolicy::PerProject,
        );

        assert_eq!(matched.len(), 1);
    }

    #[test]
    fn test_matches_follow_configuration_order() {
        let dependency = Dependency::new("com.group", "some-project");
        let projects = vec![
            project("third", 30, vec![dependency.clone()]),
            project("unrelated", 99, vec![Dependency::new("x", "y")]),
            project("first", 10, vec![dependency.clone()]),
            project("second", 20, vec![dependency]),
        ];

        let matched = match_projects(
            &event("com.group", "some-project"),
            &projects,
            TriggerPolicy::default(),
        );

        let ids: Vec<u64> = matched.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![30, 10, 20]);
    }
}
