use serde::{Deserialize, Serialize};
use warp::{reject, Filter, Rejection, Reply};

use crate::app_state::AppState;
use crate::comment_browser::{CommentBrowser, CommentView};
use crate::comments::TravelTag;
use crate::tabs::Tab;
use crate::warp_helpers::{with_state, ValidationError, ViewInactiveError};

#[derive(Debug, Deserialize)]
pub struct SelectTagRequest {
    pub tag: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectPlaceRequest {
    pub place: String,
}

#[derive(Debug, Deserialize)]
pub struct DraftRequest {
    pub text: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PostCommentRequest {
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PostCommentResponse {
    pub posted_id: Option<u64>,
    pub view: CommentView,
}

#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub id: u64,
    pub liked: bool,
    pub view: CommentView,
}

fn comments_inactive() -> Rejection {
    reject::custom(ViewInactiveError {
        required: Tab::Comments,
    })
}

fn with_browser<T>(
    state: &AppState,
    f: impl FnOnce(&mut CommentBrowser) -> T,
) -> Result<T, Rejection> {
    state.with_comments(f).ok_or_else(comments_inactive)
}

pub async fn get_view(state: AppState) -> Result<impl Reply, Rejection> {
    let view = with_browser(&state, |browser| browser.view())?;
    Ok(warp::reply::json(&view))
}

pub async fn select_tag(request: SelectTagRequest, state: AppState) -> Result<impl Reply, Rejection> {
    let tag: TravelTag = request.tag.parse().map_err(|_| {
        reject::custom(ValidationError {
            message: format!("Unknown tag: {}", request.tag),
        })
    })?;

    let view = with_browser(&state, |browser| {
        browser.select_tag(tag);
        browser.view()
    })?;
    Ok(warp::reply::json(&view))
}

/// Unknown places leave the selection untouched.
pub async fn select_place(
    request: SelectPlaceRequest,
    state: AppState,
) -> Result<impl Reply, Rejection> {
    let view = with_browser(&state, |browser| {
        browser.select_place(&request.place);
        browser.view()
    })?;
    Ok(warp::reply::json(&view))
}

pub async fn set_draft(request: DraftRequest, state: AppState) -> Result<impl Reply, Rejection> {
    let view = with_browser(&state, |browser| {
        browser.set_draft(request.text);
        browser.view()
    })?;
    Ok(warp::reply::json(&view))
}

/// Blank text or an incomplete selection is not an error: nothing is posted
/// and `posted_id` is null.
pub async fn post_comment(
    request: PostCommentRequest,
    state: AppState,
) -> Result<impl Reply, Rejection> {
    let response = with_browser(&state, |browser| {
        if let Some(text) = request.text {
            browser.set_draft(text);
        }
        let posted_id = browser.post_comment();
        PostCommentResponse {
            posted_id,
            view: browser.view(),
        }
    })?;
    Ok(warp::reply::json(&response))
}

pub async fn toggle_like(comment_id: u64, state: AppState) -> Result<impl Reply, Rejection> {
    let response = with_browser(&state, |browser| {
        let liked = browser.toggle_like(comment_id);
        LikeResponse {
            id: comment_id,
            liked,
            view: browser.view(),
        }
    })?;
    Ok(warp::reply::json(&response))
}

pub fn build_comment_routes(
    state: AppState,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let api_comments_view = warp::path!("api" / "comments")
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(get_view);

    let api_comments_post = warp::path!("api" / "comments")
        .and(warp::post())
        .and(warp::body::json::<PostCommentRequest>())
        .and(with_state(state.clone()))
        .and_then(post_comment);

    let api_comments_tag = warp::path!("api" / "comments" / "tag")
        .and(warp::post())
        .and(warp::body::json::<SelectTagRequest>())
        .and(with_state(state.clone()))
        .and_then(select_tag);

    let api_comments_place = warp::path!("api" / "comments" / "place")
        .and(warp::post())
        .and(warp::body::json::<SelectPlaceRequest>())
        .and(with_state(state.clone()))
        .and_then(select_place);

    let api_comments_draft = warp::path!("api" / "comments" / "draft")
        .and(warp::put())
        .and(warp::body::json::<DraftRequest>())
        .and(with_state(state.clone()))
        .and_then(set_draft);

    let api_comments_like = warp::path!("api" / "comments" / u64 / "like")
        .and(warp::post())
        .and(with_state(state))
        .and_then(toggle_like);

    api_comments_view
        .or(api_comments_post)
        .or(api_comments_tag)
        .or(api_comments_place)
        .or(api_comments_draft)
        .or(api_comments_like)
}
