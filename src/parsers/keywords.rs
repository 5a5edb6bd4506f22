use std::collections::BTreeSet;

use crate::config::KeywordConfig;

/// Tags derived from a candidate's title and description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub is_remote: bool,
    pub is_full_stack: bool,
    pub technologies: BTreeSet<String>,
}

impl Classification {
    /// Only remote full-stack roles are kept.
    pub fn is_match(&self) -> bool {
        self.is_remote && self.is_full_stack
    }
}

/// Classify a candidate by keyword matching.
///
/// Remote keywords are looked for in the title and the description, role
/// keywords in the title only, technologies in the description only. All
/// matching is case-insensitive substring matching.
pub fn classify(title: &str, description: &str, keywords: &KeywordConfig) -> Classification {
    let title = title.to_lowercase();
    let description = description.to_lowercase();

    let is_remote = keywords
        .remote
        .iter()
        .any(|kw| contains_keyword(&title, kw) || contains_keyword(&description, kw));

    let is_full_stack = keywords
        .full_stack
        .iter()
        .any(|kw| contains_keyword(&title, kw));

    let technologies = keywords
        .technologies
        .iter()
        .filter(|kw| contains_keyword(&description, kw))
        .map(|kw| kw.to_lowercase())
        .collect();

    Classification {
        is_remote,
        is_full_stack,
        technologies,
    }
}

fn contains_keyword(haystack: &str, keyword: &str) -> bool {
    let keyword = keyword.trim().to_lowercase();
    !keyword.is_empty() && haystack.contains(&keyword)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords() -> KeywordConfig {
        KeywordConfig::default()
    }

    #[test]
    fn remote_full_stack_title_matches_without_description() {
        let class = classify("Remote Full-Stack Engineer", "", &keywords());
        assert!(class.is_remote);
        assert!(class.is_full_stack);
        assert!(class.is_match());
        assert!(class.technologies.is_empty());
    }

    #[test]
    fn onsite_role_is_excluded() {
        let class = classify(
            "Full-Stack Engineer (On-site)",
            "Join our office team in Berlin.",
            &keywords(),
        );
        assert!(!class.is_remote);
        assert!(class.is_full_stack);
        assert!(!class.is_match());
    }

    #[test]
    fn remote_may_come_from_description() {
        let class = classify("Software Engineer", "This position is Work From Home.", &keywords());
        assert!(class.is_match());
    }

    #[test]
    fn role_keywords_are_only_checked_in_title() {
        let class = classify("Remote Designer", "Pairs with full stack engineers", &keywords());
        assert!(class.is_remote);
        assert!(!class.is_full_stack);
    }

    #[test]
    fn technologies_come_from_description() {
        let class = classify(
            "Remote Full Stack Developer (React)",
            "We use TypeScript, Node.js and Python on the backend.",
            &keywords(),
        );
        let techs: Vec<&str> = class.technologies.iter().map(String::as_str).collect();
        // "javascript" is not a substring of "typescript"; "react" only appears in the title
        assert_eq!(techs, vec!["node.js", "python", "typescript"]);
    }

    #[test]
    fn custom_keyword_lists_are_honored() {
        let custom = KeywordConfig {
            remote: vec!["Anywhere".to_string()],
            full_stack: vec!["rust engineer".to_string()],
            technologies: vec!["Tokio".to_string()],
        };
        let class = classify("Rust Engineer, anywhere", "async services on tokio", &custom);
        assert!(class.is_match());
        assert!(class.technologies.contains("tokio"));
    }
}
