//! Story records and the built-in seed list.

use serde::{Deserialize, Serialize};

/// One item in the story list.
///
/// Identity is [`Story::object_id`]; the other fields are display data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Story {
    /// Headline, matched by the search filter
    pub title: String,

    /// Link target
    pub url: String,

    /// Author or authors, as a single display string
    pub author: String,

    /// Number of comments
    pub num_comments: u32,

    /// Score
    pub points: u32,

    /// Identity key
    #[serde(rename = "objectID")]
    pub object_id: u64,
}

impl std::fmt::Display for Story {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.title, self.url)
    }
}

/// The fixed list shown when no other source is configured.
pub fn seed_stories() -> Vec<Story> {
    vec![
        Story {
            title: "React".to_string(),
            url: "https://reactjs.org/".to_string(),
            author: "Jordan Walke".to_string(),
            num_comments: 3,
            points: 4,
            object_id: 0,
        },
        Story {
            title: "Redux".to_string(),
            url: "https://redux.js.org/".to_string(),
            author: "Dan Abramov, Andrew Clark".to_string(),
            num_comments: 2,
            points: 5,
            object_id: 1,
        },
    ]
}
