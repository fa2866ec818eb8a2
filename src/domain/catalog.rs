//! Fixed project categories and the technologies suggested for each.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProjectCategory {
    #[serde(rename = "Web Development")]
    WebDevelopment,
    #[serde(rename = "Mobile App Development")]
    MobileAppDevelopment,
    #[serde(rename = "Data Science")]
    DataScience,
    #[serde(rename = "Machine Learning")]
    MachineLearning,
    #[serde(rename = "Game Development")]
    GameDevelopment,
    #[serde(rename = "Blockchain")]
    Blockchain,
    #[serde(rename = "IoT")]
    Iot,
    #[serde(rename = "Cybersecurity")]
    Cybersecurity,
    #[serde(rename = "Cloud Computing")]
    CloudComputing,
}

static CATEGORY_BY_LABEL: Lazy<HashMap<String, ProjectCategory>> = Lazy::new(|| {
    ProjectCategory::ALL
        .iter()
        .map(|category| (category.label().to_ascii_lowercase(), *category))
        .collect()
});

impl ProjectCategory {
    pub const ALL: [ProjectCategory; 9] = [
        ProjectCategory::WebDevelopment,
        ProjectCategory::MobileAppDevelopment,
        ProjectCategory::DataScience,
        ProjectCategory::MachineLearning,
        ProjectCategory::GameDevelopment,
        ProjectCategory::Blockchain,
        ProjectCategory::Iot,
        ProjectCategory::Cybersecurity,
        ProjectCategory::CloudComputing,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProjectCategory::WebDevelopment => "Web Development",
            ProjectCategory::MobileAppDevelopment => "Mobile App Development",
            ProjectCategory::DataScience => "Data Science",
            ProjectCategory::MachineLearning => "Machine Learning",
            ProjectCategory::GameDevelopment => "Game Development",
            ProjectCategory::Blockchain => "Blockchain",
            ProjectCategory::Iot => "IoT",
            ProjectCategory::Cybersecurity => "Cybersecurity",
            ProjectCategory::CloudComputing => "Cloud Computing",
        }
    }

    /// Resolves a label case-insensitively, ignoring surrounding whitespace.
    pub fn from_label(label: &str) -> Option<Self> {
        CATEGORY_BY_LABEL
            .get(&label.trim().to_ascii_lowercase())
            .copied()
    }

    pub fn technologies(&self) -> &'static [&'static str] {
        match self {
            ProjectCategory::WebDevelopment => &[
                "React",
                "Angular",
                "Vue.js",
                "Node.js",
                "Express",
                "Django",
                "Ruby on Rails",
                "ASP.NET",
                "TypeScript",
                "GraphQL",
            ],
            ProjectCategory::MobileAppDevelopment => {
                &["React Native", "Flutter", "Swift", "Kotlin", "Xamarin"]
            }
            ProjectCategory::DataScience => &[
                "Python", "R", "SQL", "Tableau", "Power BI", "Pandas", "NumPy",
            ],
            ProjectCategory::MachineLearning => {
                &["TensorFlow", "PyTorch", "Scikit-learn", "Keras"]
            }
            ProjectCategory::GameDevelopment => &["Unity", "Unreal Engine", "Godot"],
            ProjectCategory::Blockchain => &["Solidity", "Ethereum", "Hyperledger"],
            ProjectCategory::Iot => &["Arduino", "Raspberry Pi", "MQTT"],
            ProjectCategory::Cybersecurity => &["Wireshark", "Metasploit", "Nmap", "Kali Linux"],
            ProjectCategory::CloudComputing => {
                &["AWS", "Azure", "Google Cloud", "Docker", "Kubernetes"]
            }
        }
    }
}

impl fmt::Display for ProjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A suggested technology and whether the draft already includes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TechnologySuggestion {
    pub name: &'static str,
    pub selected: bool,
}

/// Suggestions for `category` whose names contain `search` (case-insensitive).
///
/// Without a category there is nothing to suggest; custom technologies can
/// still be added to a draft directly.
pub fn suggest_technologies(
    category: Option<ProjectCategory>,
    search: &str,
    selected: &[String],
) -> Vec<TechnologySuggestion> {
    let Some(category) = category else {
        return Vec::new();
    };
    let needle = search.trim().to_lowercase();
    category
        .technologies()
        .iter()
        .copied()
        .filter(|name| needle.is_empty() || name.to_lowercase().contains(&needle))
        .map(|name| TechnologySuggestion {
            name,
            selected: selected.iter().any(|existing| existing == name),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_resolve_back_to_categories() {
        for category in ProjectCategory::ALL {
            assert_eq!(ProjectCategory::from_label(category.label()), Some(category));
        }
        assert_eq!(
            ProjectCategory::from_label("  iot "),
            Some(ProjectCategory::Iot)
        );
        assert_eq!(ProjectCategory::from_label("Gardening"), None);
    }

    #[test]
    fn category_serializes_as_label() {
        let json = serde_json::to_string(&ProjectCategory::MobileAppDevelopment).unwrap();
        assert_eq!(json, "\"Mobile App Development\"");
    }

    #[test]
    fn suggestions_follow_category_and_search() {
        let selected = vec!["React".to_string()];
        let all = suggest_technologies(Some(ProjectCategory::WebDevelopment), "", &selected);
        assert_eq!(all.len(), 10);
        assert!(all.iter().any(|s| s.name == "React" && s.selected));

        let filtered = suggest_technologies(Some(ProjectCategory::WebDevelopment), "re", &selected);
        let names: Vec<&str> = filtered.iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["React", "Express"]);
    }

    #[test]
    fn no_category_means_no_suggestions() {
        assert!(suggest_technologies(None, "react", &[]).is_empty());
    }
}
