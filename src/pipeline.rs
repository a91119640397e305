//! Turns raw POI search hits into the markers shown for one category.

use crate::categories::category_matches;
use crate::map_surface::{LngLat, MarkerSpec};
use crate::poi::PoiResult;
use crate::popup::{render_popup, Popularity, PopupContent};

pub const POPULAR_CODE: &str = "POPULAR";

/// Search radius in meters for a zoom level.
///
/// A coarse step function: zooming in narrows the search, but the steps are
/// deliberately wide rather than derived from the visible bounds.
pub fn radius_for_zoom(zoom: f64) -> u32 {
    if zoom > 15.0 {
        2000
    } else if zoom > 13.0 {
        5000
    } else if zoom > 11.0 {
        10000
    } else {
        15000
    }
}

pub fn is_relevant(query: &str, result: &PoiResult) -> bool {
    result.name().is_some()
        && result.freeform_address().is_some()
        && result
            .categories()
            .iter()
            .any(|c| category_matches(query, c))
}

pub fn rank_score(result: &PoiResult) -> usize {
    result.classifications().len() + result.brands().len() + result.categories().len()
}

/// Filters `results` for `query`, ranks them and keeps at most `max_results`.
/// Equal scores keep their arrival order.
pub fn select_places(query: &str, results: Vec<PoiResult>, max_results: usize) -> Vec<PoiResult> {
    let mut places: Vec<PoiResult> = results
        .into_iter()
        .filter(|r| is_relevant(query, r))
        .collect();

    // sort_by_key is stable
    places.sort_by_key(|r| std::cmp::Reverse(rank_score(r)));
    places.truncate(max_results);
    places
}

pub fn popularity(result: &PoiResult) -> Popularity {
    if result.classifications().iter().any(|c| c.code == POPULAR_CODE) {
        Popularity::Popular
    } else {
        Popularity::Standard
    }
}

/// Builds the marker for a place. Places without a position cannot be drawn.
pub fn marker_for(result: &PoiResult, color: &str) -> Option<MarkerSpec> {
    let position = result.position?;

    let content = PopupContent {
        name: result.name().unwrap_or("Unnamed"),
        category_label: result
            .categories()
            .first()
            .map(String::as_str)
            .unwrap_or("Not specified"),
        color,
        address: result.freeform_address().unwrap_or(""),
        phone: result.phone().unwrap_or("Not available"),
        popularity: popularity(result),
        website: result.website(),
    };

    Some(MarkerSpec {
        position: LngLat {
            lng: position.lon,
            lat: position.lat,
        },
        color: color.to_string(),
        popup_html: render_popup(&content),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poi::{Address, Brand, Classification, PoiDetails, Position};

    fn place(name: &str, address: &str, categories: &[&str]) -> PoiResult {
        PoiResult {
            poi: Some(PoiDetails {
                name: Some(name.to_string()),
                categories: categories.iter().map(|c| c.to_string()).collect(),
                ..Default::default()
            }),
            address: Some(Address {
                freeform_address: Some(address.to_string()),
            }),
            position: Some(Position {
                lat: 12.97,
                lon: 77.59,
            }),
        }
    }

    fn with_score_extras(mut result: PoiResult, classifications: usize, brands: usize) -> PoiResult {
        if let Some(poi) = result.poi.as_mut() {
            poi.classifications = (0..classifications)
                .map(|i| Classification {
                    code: format!("CODE_{}", i),
                })
                .collect();
            poi.brands = (0..brands)
                .map(|i| Brand {
                    name: format!("brand {}", i),
                })
                .collect();
        }
        result
    }

    #[test]
    fn test_radius_steps() {
        assert_eq!(radius_for_zoom(16.0), 2000);
        assert_eq!(radius_for_zoom(15.5), 2000);
        assert_eq!(radius_for_zoom(15.0), 5000);
        assert_eq!(radius_for_zoom(14.0), 5000);
        assert_eq!(radius_for_zoom(13.0), 10000);
        assert_eq!(radius_for_zoom(12.0), 10000);
        assert_eq!(radius_for_zoom(11.0), 15000);
        assert_eq!(radius_for_zoom(5.0), 15000);
    }

    #[test]
    fn test_filter_requires_name_and_address() {
        let nameless = place("", "Somewhere", &["park"]);
        let addressless = place("Park", "", &["park"]);
        let mut no_poi = place("x", "y", &["park"]);
        no_poi.poi = None;
        let mut no_address = place("x", "y", &["park"]);
        no_address.address = None;

        for result in [&nameless, &addressless, &no_poi, &no_address] {
            assert!(!is_relevant("park", result));
        }
        assert!(is_relevant("park", &place("Cubbon Park", "Bengaluru", &["park"])));
    }

    #[test]
    fn test_park_filter_excludes_parking() {
        let garage = place("Garage", "Street 1", &["parking garage"]);
        let city_park = place("Green", "Street 2", &["city park"]);
        assert!(!is_relevant("park", &garage));
        assert!(is_relevant("park", &city_park));

        // Any one matching category is enough
        let mixed = place("Mixed", "Street 3", &["parking garage", "city park"]);
        assert!(is_relevant("park", &mixed));
    }

    #[test]
    fn test_ranking_is_stable_and_descending() {
        let results = vec![
            place("a", "addr", &["museum"]),
            with_score_extras(place("b", "addr", &["museum"]), 2, 1),
            place("c", "addr", &["museum"]),
            with_score_extras(place("d", "addr", &["museum"]), 1, 0),
            place("e", "addr", &["museum"]),
        ];

        let names: Vec<String> = select_places("museum", results, 8)
            .iter()
            .map(|r| r.name().unwrap().to_string())
            .collect();

        assert_eq!(names, vec!["b", "d", "a", "c", "e"]);
    }

    #[test]
    fn test_truncates_to_max_results() {
        let results: Vec<PoiResult> = (0..20)
            .map(|i| place(&format!("temple {}", i), "addr", &["temple"]))
            .collect();

        let selected = select_places("temple", results, 8);
        assert_eq!(selected.len(), 8);
        assert_eq!(selected[0].name(), Some("temple 0"));
        assert_eq!(selected[7].name(), Some("temple 7"));
    }

    #[test]
    fn test_irrelevant_results_dropped_before_truncation() {
        let mut results: Vec<PoiResult> = (0..10)
            .map(|i| place(&format!("lot {}", i), "addr", &["parking"]))
            .collect();
        results.push(place("real park", "addr", &["park"]));

        let selected = select_places("park", results, 8);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name(), Some("real park"));
    }

    #[test]
    fn test_marker_for_place() {
        let mut result = place("Tipu Sultan's Palace", "Chamrajpet", &["palace", "monument"]);
        if let Some(poi) = result.poi.as_mut() {
            poi.classifications = vec![Classification {
                code: POPULAR_CODE.to_string(),
            }];
            poi.url = Some("https://example.org".to_string());
        }

        let marker = marker_for(&result, "#795548").unwrap();
        assert_eq!(marker.position, LngLat { lng: 77.59, lat: 12.97 });
        assert_eq!(marker.color, "#795548");
        assert!(marker.popup_html.contains("Popularity:</span> Popular"));
        assert!(marker.popup_html.contains(">palace</span>"));
        assert!(marker.popup_html.contains("Phone:</span> Not available"));
        assert!(marker.popup_html.contains("Visit Website"));
    }

    #[test]
    fn test_marker_defaults() {
        let mut result = place("Spot", "addr", &[]);
        result.poi.as_mut().unwrap().phone = Some("+91 1".to_string());
        let marker = marker_for(&result, "#000").unwrap();
        assert!(marker.popup_html.contains(">Not specified</span>"));
        assert!(marker.popup_html.contains("Phone:</span> +91 1"));
        assert!(marker.popup_html.contains("Popularity:</span> Standard"));
    }

    #[test]
    fn test_marker_requires_position() {
        let mut result = place("Spot", "addr", &["park"]);
        result.position = None;
        assert!(marker_for(&result, "#000").is_none());
    }
}
