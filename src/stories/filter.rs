//! Search filtering and dismissal over a story collection.

use super::models::Story;

/// Returns true if `title` contains `query`, ignoring case.
///
/// Plain lowercase comparison: no diacritic or locale normalization.
pub fn title_matches(title: &str, query: &str) -> bool {
    title.to_lowercase().contains(&query.to_lowercase())
}

/// Stories whose title contains `query`, in their original order.
///
/// An empty query matches every story.
pub fn filter<'a>(stories: &'a [Story], query: &str) -> Vec<&'a Story> {
    stories
        .iter()
        .filter(|story| title_matches(&story.title, query))
        .collect()
}

/// A copy of `stories` without any record whose id is `object_id`.
pub fn dismiss(stories: &[Story], object_id: u64) -> Vec<Story> {
    stories
        .iter()
        .filter(|story| story.object_id != object_id)
        .cloned()
        .collect()
}

/// Removes every record whose id is `object_id`, returning how many went.
pub fn dismiss_in_place(stories: &mut Vec<Story>, object_id: u64) -> usize {
    let before = stories.len();
    stories.retain(|story| story.object_id != object_id);
    before - stories.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stories::models::seed_stories;

    fn story(title: &str, object_id: u64) -> Story {
        Story {
            title: title.to_string(),
            url: format!("https://example.com/{object_id}"),
            author: "someone".to_string(),
            num_comments: 0,
            points: 0,
            object_id,
        }
    }

    fn titles(stories: &[&Story]) -> Vec<String> {
        stories.iter().map(|s| s.title.clone()).collect()
    }

    #[test]
    fn test_filter_case_insensitive() {
        let stories = seed_stories();
        assert_eq!(titles(&filter(&stories, "redux")), vec!["Redux"]);
        assert_eq!(titles(&filter(&stories, "REACT")), vec!["React"]);
        assert_eq!(titles(&filter(&stories, "re")), vec!["React", "Redux"]);
    }

    #[test]
    fn test_filter_empty_query_returns_everything() {
        let stories = seed_stories();
        let visible: Vec<Story> = filter(&stories, "").into_iter().cloned().collect();
        assert_eq!(visible, stories);
    }

    #[test]
    fn test_filter_preserves_order() {
        let stories = vec![
            story("Zig internals", 7),
            story("Rust async", 3),
            story("Understanding zippers", 5),
        ];
        assert_eq!(
            titles(&filter(&stories, "Z")),
            vec!["Zig internals", "Understanding zippers"]
        );
    }

    #[test]
    fn test_filter_no_match_and_empty_collection() {
        let stories = seed_stories();
        assert!(filter(&stories, "vue").is_empty());
        assert!(filter(&[], "anything").is_empty());
        assert!(filter(&[], "").is_empty());
    }

    #[test]
    fn test_filter_only_matches_title() {
        let stories = seed_stories();
        // "Walke" is an author, not a title.
        assert!(filter(&stories, "Walke").is_empty());
    }

    #[test]
    fn test_title_matches_unicode_lowercase() {
        assert!(title_matches("ÉCOLE de Rust", "école"));
        assert!(!title_matches("ecole", "école"));
    }

    #[test]
    fn test_dismiss_unknown_id_is_noop() {
        let stories = seed_stories();
        assert_eq!(dismiss(&stories, 42), stories);
    }

    #[test]
    fn test_dismiss_is_idempotent() {
        let stories = seed_stories();
        let once = dismiss(&stories, 1);
        let twice = dismiss(&once, 1);
        assert_eq!(once, twice);
        assert_eq!(once.len(), 1);
        assert_eq!(once[0].title, "React");
    }

    #[test]
    fn test_dismiss_removes_all_duplicates() {
        let mut stories = vec![story("a", 1), story("b", 2), story("c", 1)];
        let removed = dismiss_in_place(&mut stories, 1);
        assert_eq!(removed, 2);
        assert_eq!(stories, vec![story("b", 2)]);
    }

    #[test]
    fn test_seed_scenario() {
        let stories = seed_stories();
        assert_eq!(titles(&filter(&stories, "Redux")), vec!["Redux"]);

        let remaining = dismiss(&stories, 1);
        let remaining = dismiss(&remaining, 0);
        assert!(remaining.is_empty());
        assert!(filter(&remaining, "React").is_empty());
    }
}
