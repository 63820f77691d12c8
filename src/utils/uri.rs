/// Trailing segment of a URI path: `http://www.wikidata.org/entity/P31` -> `P31`.
pub fn last_path_segment(uri: &str) -> &str {
    uri.rsplit_once('/').map_or(uri, |(_, tail)| tail)
}
