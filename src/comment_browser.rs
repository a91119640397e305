use log::{debug, info};
use serde::Serialize;
use std::collections::HashSet;

use crate::comments::{CommentStore, NewComment, TravelComment, TravelTag};

pub const EMPTY_SELECTION_HINT: &str = "Select a category and place to view comments";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    None,
    Tag(TravelTag),
    Place(TravelTag, String),
}

impl Selection {
    pub fn tag(&self) -> Option<TravelTag> {
        match self {
            Selection::None => None,
            Selection::Tag(tag) | Selection::Place(tag, _) => Some(*tag),
        }
    }

    pub fn place(&self) -> Option<&str> {
        match self {
            Selection::Place(_, place) => Some(place.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TagEntry {
    pub tag: TravelTag,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentEntry {
    pub id: u64,
    pub username: String,
    pub text: String,
    pub time: String,
    pub likes: u64,
    pub liked: bool,
    pub avatar_url: String,
}

/// Snapshot of what the comment view shows.
#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    pub tags: Vec<TagEntry>,
    pub selected_tag: Option<TravelTag>,
    pub places: Vec<String>,
    pub selected_place: Option<String>,
    pub draft: String,
    pub comments: Vec<CommentEntry>,
    pub hint: Option<&'static str>,
}

pub fn random_username() -> String {
    let n: u32 = rand::random_range(0..1000);
    format!("user_{}", n)
}

pub fn avatar_url(comment_id: u64) -> String {
    format!("https://i.pravatar.cc/150?u={}", comment_id)
}

/// Browses destinations by tag and place, posts and likes comments.
#[derive(Debug, Clone)]
pub struct CommentBrowser {
    store: CommentStore,
    selection: Selection,
    draft: String,
    liked: HashSet<u64>,
}

impl Default for CommentBrowser {
    fn default() -> Self {
        Self::new(CommentStore::seeded())
    }
}

impl CommentBrowser {
    pub fn new(store: CommentStore) -> Self {
        Self {
            store,
            selection: Selection::None,
            draft: String::new(),
            liked: HashSet::new(),
        }
    }

    pub fn store(&self) -> &CommentStore {
        &self.store
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Selecting the active tag again collapses it; any other tag opens with no place.
    pub fn select_tag(&mut self, tag: TravelTag) {
        self.selection = if self.selection.tag() == Some(tag) {
            Selection::None
        } else {
            Selection::Tag(tag)
        };
        debug!("Comment selection: {:?}", self.selection);
    }

    /// Returns false when no tag is open or the place is not under it.
    pub fn select_place(&mut self, place: &str) -> bool {
        let Some(tag) = self.selection.tag() else {
            return false;
        };

        if self.store.place(tag, place).is_none() {
            return false;
        }

        self.selection = Selection::Place(tag, place.to_string());
        true
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Posts the draft to the selected place and returns the new comment id.
    /// Blank drafts and incomplete selections are ignored.
    pub fn post_comment(&mut self) -> Option<u64> {
        if self.draft.trim().is_empty() {
            return None;
        }
        let Selection::Place(tag, place) = &self.selection else {
            return None;
        };

        let comment = NewComment {
            username: random_username(),
            text: self.draft.clone(),
        };
        let id = self.store.post(*tag, place, comment)?.id;

        info!("Comment {} posted on '{}' ({})", id, place, tag);
        self.draft.clear();
        Some(id)
    }

    /// Returns whether the comment is liked afterwards.
    pub fn toggle_like(&mut self, comment_id: u64) -> bool {
        if self.liked.remove(&comment_id) {
            false
        } else {
            self.liked.insert(comment_id);
            true
        }
    }

    pub fn is_liked(&self, comment_id: u64) -> bool {
        self.liked.contains(&comment_id)
    }

    pub fn display_likes(&self, comment: &TravelComment) -> u64 {
        comment.likes + u64::from(self.is_liked(comment.id))
    }

    pub fn view(&self) -> CommentView {
        let selected_tag = self.selection.tag();

        let places = selected_tag
            .map(|tag| {
                self.store
                    .places(tag)
                    .iter()
                    .map(|p| p.place.clone())
                    .collect()
            })
            .unwrap_or_default();

        let comments: Vec<CommentEntry> = match &self.selection {
            Selection::Place(tag, place) => self
                .store
                .place(*tag, place)
                .map(|p| p.comments.iter().map(|c| self.entry(c)).collect())
                .unwrap_or_default(),
            _ => Vec::new(),
        };

        CommentView {
            tags: TravelTag::ALL
                .into_iter()
                .map(|tag| TagEntry {
                    tag,
                    selected: selected_tag == Some(tag),
                })
                .collect(),
            selected_tag,
            places,
            selected_place: self.selection.place().map(str::to_string),
            draft: self.draft.clone(),
            comments,
            hint: match self.selection {
                Selection::Place(..) => None,
                _ => Some(EMPTY_SELECTION_HINT),
            },
        }
    }

    fn entry(&self, comment: &TravelComment) -> CommentEntry {
        CommentEntry {
            id: comment.id,
            username: comment.username.clone(),
            text: comment.text.clone(),
            time: comment.time.clone(),
            likes: self.display_likes(comment),
            liked: self.is_liked(comment.id),
            avatar_url: avatar_url(comment.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comments::TravelPlace;

    fn browser_at(tag: TravelTag, place: &str) -> CommentBrowser {
        let mut browser = CommentBrowser::default();
        browser.select_tag(tag);
        assert!(browser.select_place(place));
        browser
    }

    #[test]
    fn test_reselecting_tag_clears_selection() {
        let mut browser = CommentBrowser::default();
        browser.select_tag(TravelTag::Adventure);
        assert_eq!(browser.selection(), &Selection::Tag(TravelTag::Adventure));

        browser.select_tag(TravelTag::Adventure);
        assert_eq!(browser.selection(), &Selection::None);
    }

    #[test]
    fn test_switching_tag_clears_place() {
        let mut browser = browser_at(TravelTag::Adventure, "Mountain Trek");
        browser.select_tag(TravelTag::Nature);
        assert_eq!(browser.selection(), &Selection::Tag(TravelTag::Nature));
        assert_eq!(browser.selection().place(), None);
    }

    #[test]
    fn test_reselecting_tag_with_place_collapses() {
        let mut browser = browser_at(TravelTag::Adventure, "Mountain Trek");
        browser.select_tag(TravelTag::Adventure);
        assert_eq!(browser.selection(), &Selection::None);
    }

    #[test]
    fn test_select_place_requires_tag() {
        let mut browser = CommentBrowser::default();
        assert!(!browser.select_place("Mountain Trek"));
        assert_eq!(browser.selection(), &Selection::None);

        browser.select_tag(TravelTag::Nature);
        assert!(!browser.select_place("Mountain Trek"));
        assert_eq!(browser.selection(), &Selection::Tag(TravelTag::Nature));
    }

    #[test]
    fn test_post_comment_appends_with_global_id() {
        let mut browser = browser_at(TravelTag::Nature, "Secret Waterfall");
        browser.set_draft("Went at sunrise, no crowds.");

        assert_eq!(browser.post_comment(), Some(8));
        assert_eq!(browser.draft(), "");

        let place = browser.store().place(TravelTag::Nature, "Secret Waterfall").unwrap();
        let posted = place.comments.last().unwrap();
        assert_eq!(posted.text, "Went at sunrise, no crowds.");
        assert_eq!(posted.likes, 0);
        assert_eq!(posted.time, "now");
        assert!(posted.username.starts_with("user_"));
    }

    #[test]
    fn test_post_into_empty_dataset() {
        let store = CommentStore::from_places([(TravelTag::Historical, TravelPlace::new("Old Fort"))]);
        let mut browser = CommentBrowser::new(store);
        browser.select_tag(TravelTag::Historical);
        browser.select_place("Old Fort");
        browser.set_draft("first!");

        assert_eq!(browser.post_comment(), Some(1));
    }

    #[test]
    fn test_blank_post_is_ignored() {
        let mut browser = browser_at(TravelTag::Shopping, "Artisan Market");
        browser.set_draft("   \t ");

        assert_eq!(browser.post_comment(), None);
        assert_eq!(browser.store().comment_count(), 7);
        assert_eq!(browser.draft(), "   \t ");
    }

    #[test]
    fn test_post_without_place_is_ignored() {
        let mut browser = CommentBrowser::default();
        browser.select_tag(TravelTag::Shopping);
        browser.set_draft("hello");

        assert_eq!(browser.post_comment(), None);
        assert_eq!(browser.store().comment_count(), 7);
        assert_eq!(browser.draft(), "hello");
    }

    #[test]
    fn test_like_toggle_overlays_count() {
        let mut browser = CommentBrowser::default();
        let comment = TravelComment {
            id: 5,
            username: "history_buff".to_string(),
            text: "t".to_string(),
            likes: 10,
            time: "4h".to_string(),
        };

        assert!(browser.toggle_like(5));
        assert_eq!(browser.display_likes(&comment), 11);
        assert!(!browser.toggle_like(5));
        assert_eq!(browser.display_likes(&comment), 10);
    }

    #[test]
    fn test_like_does_not_touch_stored_likes() {
        let mut browser = browser_at(TravelTag::Historical, "Ancient Temple Ruins");
        browser.toggle_like(5);

        let view = browser.view();
        assert_eq!(view.comments.len(), 1);
        assert_eq!(view.comments[0].likes, 68);
        assert!(view.comments[0].liked);

        let stored = &browser
            .store()
            .place(TravelTag::Historical, "Ancient Temple Ruins")
            .unwrap()
            .comments[0];
        assert_eq!(stored.likes, 67);
    }

    #[test]
    fn test_view_without_place_shows_hint() {
        let mut browser = CommentBrowser::default();
        browser.select_tag(TravelTag::Adventure);

        let view = browser.view();
        assert_eq!(view.places, vec!["River Rafting Camp", "Mountain Trek"]);
        assert_eq!(view.hint, Some(EMPTY_SELECTION_HINT));
        assert!(view.comments.is_empty());
        assert!(view.tags.iter().any(|t| t.tag == TravelTag::Adventure && t.selected));
    }

    #[test]
    fn test_view_lists_place_comments() {
        let browser = browser_at(TravelTag::Adventure, "River Rafting Camp");
        let view = browser.view();

        assert_eq!(view.hint, None);
        assert_eq!(view.selected_place.as_deref(), Some("River Rafting Camp"));
        let ids: Vec<u64> = view.comments.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(view.comments[0].avatar_url, "https://i.pravatar.cc/150?u=1");
    }

    #[test]
    fn test_random_username_range() {
        for _ in 0..50 {
            let name = random_username();
            let n: u32 = name.trim_start_matches("user_").parse().unwrap();
            assert!(n < 1000);
        }
    }
}
