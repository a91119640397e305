use warp::http::StatusCode;
use warp::test::request;
use warp::Filter;

use travel_explorer::handlers_static::build_static_routes;
use travel_explorer::warp_helpers::handle_rejection;

#[tokio::test]
async fn test_serve_index_html() {
    let routes = build_static_routes();

    let res = request().method("GET").path("/").reply(&routes).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get("content-type").unwrap(),
        "text/html; charset=utf-8"
    );

    let body = std::str::from_utf8(res.body()).unwrap();
    assert!(body.contains("<!DOCTYPE html>"));
    assert!(body.contains("map-view"));
    assert!(body.contains("comments-view"));
}

#[tokio::test]
async fn test_serve_js_files() {
    let routes = build_static_routes();

    let res = request()
        .method("GET")
        .path("/js/mapView.js")
        .reply(&routes)
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get("content-type").unwrap(),
        "application/javascript; charset=utf-8"
    );
    assert!(std::str::from_utf8(res.body())
        .unwrap()
        .contains("/api/map/markers"));
}

#[tokio::test]
async fn test_serve_css_files() {
    let routes = build_static_routes();

    let res = request()
        .method("GET")
        .path("/css/main.css")
        .reply(&routes)
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get("content-type").unwrap(),
        "text/css; charset=utf-8"
    );
}

#[tokio::test]
async fn test_unknown_file_is_not_found() {
    let routes = build_static_routes().recover(handle_rejection);

    let res = request()
        .method("GET")
        .path("/js/missing.js")
        .reply(&routes)
        .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(body["code"], 404);
}
