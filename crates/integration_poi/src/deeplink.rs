//! TMAP deep links
//!
//! Builds `tmap://` scheme URLs that open the TMAP navigation app at a store,
//! plus the `tmap.life` web equivalent for devices without the app.

use std::fmt::Write;

use domain::GeoLocation;

const APP_SCHEME: &str = "tmap";
const WEB_ROUTE_BASE: &str = "https://tmap.life/route/car";

/// Percent-encode a string as a URI component
///
/// Leaves `A-Z a-z 0-9 - _ . ! ~ * ' ( )` untouched and encodes every other
/// byte of the UTF-8 representation, so spaces become `%20`.
#[must_use]
pub fn encode_component(input: &str) -> String {
    let mut result = String::with_capacity(input.len() * 3);
    for c in input.chars() {
        match c {
            'a'..='z'
            | 'A'..='Z'
            | '0'..='9'
            | '-'
            | '_'
            | '.'
            | '!'
            | '~'
            | '*'
            | '\''
            | '('
            | ')' => result.push(c),
            _ => {
                let mut buf = [0u8; 4];
                for b in c.encode_utf8(&mut buf).bytes() {
                    let _ = write!(result, "%{b:02X}");
                }
            },
        }
    }
    result
}

/// Link that opens a place search for `name` at `location`
///
/// Format: `tmap://search?name=<encoded>&coordinate=<lat>,<lng>`
#[must_use]
pub fn search_link(location: &GeoLocation, name: &str) -> String {
    format!(
        "{APP_SCHEME}://search?name={}&coordinate={},{}",
        encode_component(name),
        location.latitude(),
        location.longitude()
    )
}

/// Link that starts route guidance to a destination
///
/// Without an origin TMAP routes from the device's current position.
#[must_use]
pub fn route_link(destination: (&str, &GeoLocation), origin: Option<(&str, &GeoLocation)>) -> String {
    format!("{APP_SCHEME}://route?{}", route_query(destination, origin))
}

/// Web equivalent of [`route_link`]
#[must_use]
pub fn route_web_link(
    destination: (&str, &GeoLocation),
    origin: Option<(&str, &GeoLocation)>,
) -> String {
    format!("{WEB_ROUTE_BASE}?{}", route_query(destination, origin))
}

fn route_query(
    (goal_name, goal): (&str, &GeoLocation),
    origin: Option<(&str, &GeoLocation)>,
) -> String {
    let mut query = String::new();
    if let Some((start_name, start)) = origin {
        let _ = write!(
            query,
            "startname={}&startx={}&starty={}&",
            encode_component(start_name),
            start.longitude(),
            start.latitude()
        );
    }
    let _ = write!(
        query,
        "goalname={}&goalx={}&goaly={}",
        encode_component(goal_name),
        goal.longitude(),
        goal.latitude()
    );
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_unreserved_chars() {
        assert_eq!(encode_component("abc-123_x.y!~*'()"), "abc-123_x.y!~*'()");
    }

    #[test]
    fn encode_space_and_reserved() {
        assert_eq!(encode_component("a b&c=d/e"), "a%20b%26c%3Dd%2Fe");
    }

    #[test]
    fn encode_korean() {
        assert_eq!(encode_component("치킨"), "%EC%B9%98%ED%82%A8");
    }

    #[test]
    fn encode_empty() {
        assert_eq!(encode_component(""), "");
    }

    #[test]
    fn search_link_format() {
        let location = GeoLocation::new(37.5701, 126.9822).unwrap();
        assert_eq!(
            search_link(&location, "BBQ 치킨"),
            "tmap://search?name=BBQ%20%EC%B9%98%ED%82%A8&coordinate=37.5701,126.9822"
        );
    }

    #[test]
    fn route_link_without_origin() {
        let goal = GeoLocation::new(37.5701, 126.9822).unwrap();
        assert_eq!(
            route_link(("식당", &goal), None),
            "tmap://route?goalname=%EC%8B%9D%EB%8B%B9&goalx=126.9822&goaly=37.5701"
        );
    }

    #[test]
    fn route_links_with_origin() {
        let goal = GeoLocation::new(37.5701, 126.9822).unwrap();
        let start = GeoLocation::seoul();
        let app = route_link(("A", &goal), Some(("B", &start)));
        assert_eq!(
            app,
            "tmap://route?startname=B&startx=126.978&starty=37.5665&goalname=A&goalx=126.9822&goaly=37.5701"
        );

        let web = route_web_link(("A", &goal), Some(("B", &start)));
        assert!(web.starts_with("https://tmap.life/route/car?startname=B"));
        assert!(web.ends_with("goaly=37.5701"));
    }
}
