use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Destination tag of the comment browser. Unrelated to map categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TravelTag {
    Adventure,
    Nature,
    Historical,
    #[serde(rename = "Local Cuisine")]
    LocalCuisine,
    Shopping,
}

impl TravelTag {
    pub const ALL: [TravelTag; 5] = [
        TravelTag::Adventure,
        TravelTag::Nature,
        TravelTag::Historical,
        TravelTag::LocalCuisine,
        TravelTag::Shopping,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TravelTag::Adventure => "Adventure",
            TravelTag::Nature => "Nature",
            TravelTag::Historical => "Historical",
            TravelTag::LocalCuisine => "Local Cuisine",
            TravelTag::Shopping => "Shopping",
        }
    }
}

impl FromStr for TravelTag {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TravelTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for TravelTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TravelComment {
    pub id: u64,
    pub username: String,
    pub text: String,
    pub likes: u64,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TravelPlace {
    pub place: String,
    pub comments: Vec<TravelComment>,
}

impl TravelPlace {
    pub fn new(place: impl Into<String>) -> Self {
        Self {
            place: place.into(),
            comments: Vec::new(),
        }
    }
}

/// A comment about to be appended; the store assigns its id.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub username: String,
    pub text: String,
}

pub const NEW_COMMENT_TIME: &str = "now";

/// In-memory comments grouped by tag and place.
///
/// Comment ids are unique across the whole store. [`CommentStore::post`] is
/// the only way to add a comment once the store is built.
#[derive(Debug, Clone, Default)]
pub struct CommentStore {
    places: BTreeMap<TravelTag, Vec<TravelPlace>>,
}

impl CommentStore {
    pub fn from_places(places: impl IntoIterator<Item = (TravelTag, TravelPlace)>) -> Self {
        let mut store = Self::default();
        for (tag, place) in places {
            store.places.entry(tag).or_default().push(place);
        }
        store
    }

    /// The sample destinations every session starts with.
    pub fn seeded() -> Self {
        fn comment(id: u64, username: &str, text: &str, likes: u64, time: &str) -> TravelComment {
            TravelComment {
                id,
                username: username.to_string(),
                text: text.to_string(),
                likes,
                time: time.to_string(),
            }
        }

        fn place(name: &str, comments: Vec<TravelComment>) -> TravelPlace {
            TravelPlace {
                place: name.to_string(),
                comments,
            }
        }

        Self::from_places([
            (
                TravelTag::Adventure,
                place(
                    "River Rafting Camp",
                    vec![
                        comment(1, "adventure_seeker", "Thrilling experience! The rapids were incredible.", 45, "2d"),
                        comment(2, "travel_buddy", "Must try with friends. Best during monsoon season.", 32, "1d"),
                    ],
                ),
            ),
            (
                TravelTag::Adventure,
                place(
                    "Mountain Trek",
                    vec![comment(3, "mountain_lover", "Breathtaking views from the summit. Worth every step!", 56, "5h")],
                ),
            ),
            (
                TravelTag::Nature,
                place(
                    "Secret Waterfall",
                    vec![comment(4, "nature_explorer", "A true hidden paradise! Not many tourists know about this spot.", 89, "1d")],
                ),
            ),
            (
                TravelTag::Historical,
                place(
                    "Ancient Temple Ruins",
                    vec![comment(5, "history_buff", "The architecture is mind-blowing! Must visit early morning.", 67, "4h")],
                ),
            ),
            (
                TravelTag::LocalCuisine,
                place(
                    "Spice Street",
                    vec![comment(6, "foodie_explorer", "Hidden gem! The local spices are amazing.", 72, "6h")],
                ),
            ),
            (
                TravelTag::Shopping,
                place(
                    "Artisan Market",
                    vec![comment(7, "craft_lover", "Found amazing handmade jewelry at reasonable prices!", 52, "1d")],
                ),
            ),
        ])
    }

    pub fn places(&self, tag: TravelTag) -> &[TravelPlace] {
        self.places
            .get(&tag)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn place(&self, tag: TravelTag, place: &str) -> Option<&TravelPlace> {
        self.places(tag).iter().find(|p| p.place == place)
    }

    pub fn comments(&self) -> impl Iterator<Item = &TravelComment> {
        self.places
            .values()
            .flat_map(|places| places.iter())
            .flat_map(|place| place.comments.iter())
    }

    pub fn comment_count(&self) -> usize {
        self.comments().count()
    }

    pub fn next_id(&self) -> u64 {
        self.comments().map(|c| c.id).max().map_or(1, |max| max + 1)
    }

    /// Appends a comment to `place` under `tag` and returns it, or `None` when
    /// the place does not exist.
    pub fn post(&mut self, tag: TravelTag, place: &str, comment: NewComment) -> Option<&TravelComment> {
        let id = self.next_id();
        let target = self
            .places
            .get_mut(&tag)?
            .iter_mut()
            .find(|p| p.place == place)?;

        target.comments.push(TravelComment {
            id,
            username: comment.username,
            text: comment.text,
            likes: 0,
            time: NEW_COMMENT_TIME.to_string(),
        });
        target.comments.last()
    }
}
