use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

use crate::entities::*;

lazy_static! {
    // The pin of the place itself, e.g. `.../data=!3m1!4b1!8m2!3d12.9716!4d77.5946`
    static ref PIN_RE: Regex = Regex::new(r"!3d(-?\d+(?:\.\d+)?)!4d(-?\d+(?:\.\d+)?)").unwrap();
    // The map viewport, e.g. `.../place/Cafe/@12.9716,77.5946,17z`
    static ref VIEWPORT_RE: Regex = Regex::new(r"@(-?\d+(?:\.\d+)?),(-?\d+(?:\.\d+)?)").unwrap();
}

const COORD_QUERY_PARAMS: [&str; 5] = ["q", "query", "ll", "destination", "center"];

/// Extracts coordinates embedded in a map link.
///
/// Returns `None` for links without coordinates (e.g. shortened
/// links) or with coordinates out of range.
pub fn parse_map_link(link: &str) -> Option<MapPoint> {
    let link = link.trim();
    if link.is_empty() {
        return None;
    }
    capture_point(&PIN_RE, link)
        .or_else(|| capture_point(&VIEWPORT_RE, link))
        .or_else(|| parse_url_coordinates(link))
}

fn capture_point(re: &Regex, link: &str) -> Option<MapPoint> {
    re.captures_iter(link)
        .find_map(|caps| MapPoint::parse_lat_lng_deg(&caps[1], &caps[2]).ok())
}

fn parse_url_coordinates(link: &str) -> Option<MapPoint> {
    let url = Url::parse(link).ok()?;
    if url.scheme() == "geo" {
        let path = url.path();
        let coords = path.split(';').next().unwrap_or(path);
        return parse_coordinate_pair(coords);
    }
    url.query_pairs()
        .filter(|(key, _)| COORD_QUERY_PARAMS.contains(&key.as_ref()))
        .find_map(|(_, value)| parse_coordinate_pair(&value))
}

fn parse_coordinate_pair(s: &str) -> Option<MapPoint> {
    let s = s.trim();
    let s = s.strip_prefix("loc:").unwrap_or(s);
    let (lat, lng) = s.split_once(',')?;
    MapPoint::parse_lat_lng_deg(lat.trim(), lng.trim()).ok()
}
