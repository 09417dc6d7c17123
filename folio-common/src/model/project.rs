use crate::{
    filter::Filterable,
    model::{ContentItem, Id},
};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct ProjectMarker;

/// Technology tags offered by the project tag filter, in display order.
pub const ALL_TAGS: [&str; 10] = [
    "React",
    "Node.js",
    "Express",
    "MongoDB",
    "TypeScript",
    "JavaScript",
    "HTML",
    "CSS",
    "Tailwind CSS",
    "API",
];

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub struct Project {
    pub id: Id<ProjectMarker>,
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub github_url: String,
    pub live_url: Option<String>,
}

impl ContentItem for Project {
    type Marker = ProjectMarker;
    const NOUN: &'static str = "project";

    fn id(&self) -> Id<ProjectMarker> {
        self.id
    }
}

impl Filterable for Project {
    fn title(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        Some(&self.description)
    }

    fn tags(&self) -> &[String] {
        &self.technologies
    }
}

fn project(
    id: u64,
    name: &str,
    description: &str,
    technologies: &[&str],
    github_url: &str,
    live_url: Option<&str>,
) -> Project {
    Project {
        id: Id::new(id),
        name: name.into(),
        description: description.into(),
        technologies: technologies.iter().copied().map(String::from).collect(),
        github_url: github_url.into(),
        live_url: live_url.map(String::from),
    }
}

/// The project showcase. Static; there is no remote source for projects.
#[must_use]
pub fn catalog() -> Vec<Project> {
    vec![
        project(
            1,
            "Personal Portfolio",
            "A responsive portfolio website built with React and Tailwind CSS.",
            &["React", "Tailwind CSS", "Framer Motion"],
            "https://github.com/johndoe/portfolio",
            Some("https://johndoe-portfolio.netlify.app"),
        ),
        project(
            2,
            "Task Manager API",
            "RESTful API for a task management application built with Node.js and Express.",
            &["Node.js", "Express", "MongoDB"],
            "https://github.com/johndoe/task-manager-api",
            None,
        ),
        project(
            3,
            "Weather App",
            "A weather application that fetches data from an external API and displays it in a \
             user-friendly interface.",
            &["JavaScript", "HTML", "CSS", "API"],
            "https://github.com/johndoe/weather-app",
            Some("https://johndoe-weather-app.netlify.app"),
        ),
        project(
            4,
            "E-commerce Platform",
            "A full-stack e-commerce platform with user authentication and payment integration.",
            &["React", "Node.js", "Express", "MongoDB", "Stripe API"],
            "https://github.com/johndoe/ecommerce-platform",
            Some("https://johndoe-ecommerce.herokuapp.com"),
        ),
        project(
            5,
            "Chat Application",
            "Real-time chat application using WebSockets and React.",
            &["React", "Node.js", "Socket.io", "Express"],
            "https://github.com/johndoe/chat-app",
            None,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use crate::model::project::{ALL_TAGS, catalog};
    use std::collections::HashSet;

    #[test]
    fn catalog_ids_are_unique_and_ordered() {
        let ids: Vec<u64> = catalog().iter().map(|project| project.id.get()).collect();
        assert_eq!(ids, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn every_filter_tag_is_used() {
        let used: HashSet<String> = catalog()
            .into_iter()
            .flat_map(|project| project.technologies)
            .collect();

        for tag in ALL_TAGS.iter().filter(|tag| **tag != "TypeScript") {
            assert!(used.contains(*tag), "{tag} is not used by any project");
        }
    }
}
