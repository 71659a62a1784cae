//! Participation predicates. Each one is kept separate so callers compose
//! them explicitly.

use regex::Regex;

/// A repository is dropped only when the allow-list rejects it and the regex
/// does not rescue it. An empty allow-list never rejects and an unset regex
/// never rescues, so with neither configured every repository is kept, and
/// with only a regex configured the regex has no effect.
pub fn repository_included(name: &str, allow_list: &[String], regex: Option<&Regex>) -> bool {
    !(allow_list_rejects(name, allow_list) && !regex_admits(name, regex))
}

fn allow_list_rejects(name: &str, allow_list: &[String]) -> bool {
    !allow_list.is_empty() && !allow_list.contains(&name.to_lowercase())
}

/// Anchored at the start of the lower-cased name.
fn regex_admits(name: &str, regex: Option<&Regex>) -> bool {
    let Some(regex) = regex else {
        return false;
    };
    regex
        .find(&name.to_lowercase())
        .is_some_and(|found| found.start() == 0)
}

pub fn title_valid(title: &str, ignore_words: &[String]) -> bool {
    let title = title.to_lowercase();
    !ignore_words.iter().any(|word| title.contains(word.as_str()))
}

pub fn user_included(login: &str, allow_list: &[String]) -> bool {
    allow_list.is_empty() || allow_list.contains(&login.to_lowercase())
}

pub fn user_excluded(login: &str, deny_list: &[String]) -> bool {
    !deny_list.is_empty() && deny_list.contains(&login.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn nothing_configured_keeps_every_repository() {
        assert!(repository_included("Anything", &[], None));
    }

    #[test]
    fn allow_list_alone_governs() {
        let allow = list(&["api", "web"]);
        assert!(repository_included("API", &allow, None));
        assert!(!repository_included("infra", &allow, None));
    }

    #[test]
    fn regex_alone_excludes_nothing() {
        let regex = Regex::new("^svc-").unwrap();
        assert!(repository_included("docs", &[], Some(&regex)));
    }

    #[test]
    fn regex_rescues_repository_outside_allow_list() {
        let allow = list(&["api"]);
        let regex = Regex::new("svc-").unwrap();
        assert!(repository_included("Svc-Billing", &allow, Some(&regex)));
        assert!(!repository_included("billing-svc-", &allow, Some(&regex)));
        assert!(!repository_included("docs", &allow, Some(&regex)));
    }

    #[test]
    fn ignore_words_match_substrings_case_insensitively() {
        let words = list(&["wip", "do not merge"]);
        assert!(!title_valid("WIP: fix bug", &words));
        assert!(!title_valid("Refactor (DO NOT MERGE)", &words));
        assert!(title_valid("Fix bug", &words));
        assert!(title_valid("WIP: anything", &[]));
    }

    #[test]
    fn user_lists() {
        let names = list(&["alice"]);
        assert!(user_included("Alice", &names));
        assert!(!user_included("bob", &names));
        assert!(user_included("bob", &[]));

        let deny = list(&["dependabot[bot]"]);
        assert!(user_excluded("Dependabot[bot]", &deny));
        assert!(!user_excluded("alice", &deny));
        assert!(!user_excluded("alice", &[]));
    }
}
