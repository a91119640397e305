use warp::{Filter, Rejection, Reply};

/// A page asset compiled into the binary.
#[derive(Debug)]
pub struct StaticAsset {
    pub path: &'static str,
    pub content: &'static str,
}

macro_rules! static_assets {
    ($($path:literal),* $(,)?) => {
        &[
            $(StaticAsset {
                path: $path,
                content: include_str!(concat!("../static/", $path)),
            }),*
        ]
    };
}

pub const ASSETS: &[StaticAsset] = static_assets![
    "index.html",
    "css/main.css",
    "js/api.js",
    "js/mapView.js",
    "js/comments.js",
    "js/app.js",
];

pub fn get_mime_type(path: &str) -> &'static str {
    match path.rsplit_once('.').map(|(_, ext)| ext) {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "application/javascript; charset=utf-8",
        _ => "text/plain; charset=utf-8",
    }
}

/// Looks up an asset by request path. The empty path is the page itself.
pub fn find_asset(path: &str) -> Option<&'static StaticAsset> {
    let path = match path.trim_start_matches('/') {
        "" => "index.html",
        other => other,
    };
    ASSETS.iter().find(|asset| asset.path == path)
}

async fn serve_static_asset(full_path: warp::path::FullPath) -> Result<impl Reply, Rejection> {
    let asset = find_asset(full_path.as_str()).ok_or_else(warp::reject::not_found)?;
    log::debug!("Serving static file {}", asset.path);

    Ok(warp::reply::with_header(
        asset.content,
        "content-type",
        get_mime_type(asset.path),
    ))
}

/// Unknown paths fall through to a 404 rejection.
pub fn build_static_routes(
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::get()
        .and(warp::path::full())
        .and_then(serve_static_asset)
}
