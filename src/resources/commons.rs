use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{MediaMetadata, MediaRecord, PageRecord};
use crate::error::Result;
use crate::transport::{ApiRequest, ApiSession};

const IMAGE_INFO_PROPS: &str = "url|size|mime|thumbmime|mediatype";
pub const THUMBNAIL_WIDTH: u32 = 300;

/// Raw page records of a single `prop=imageinfo` query for all `titles`.
pub fn fetch_media_metadata<S: AsRef<str>>(
    session: &dyn ApiSession,
    titles: &[S],
) -> Result<Vec<PageRecord>> {
    if titles.is_empty() {
        return Ok(Vec::new());
    }

    let titles = titles
        .iter()
        .map(|title| title.as_ref())
        .collect::<Vec<_>>()
        .join("|");
    let request = ApiRequest::new()
        .param("action", "query")
        .param("prop", "imageinfo")
        .param("format", "json")
        .param("iiprop", IMAGE_INFO_PROPS)
        .param("iiurlwidth", THUMBNAIL_WIDTH.to_string())
        .param("titles", titles);

    let mut payload = session.submit(&request)?;
    let Some(pages) = payload
        .get_mut("query")
        .and_then(|query| query.get_mut("pages"))
        .map(Value::take)
    else {
        debug!("imageinfo query returned no pages");
        return Ok(Vec::new());
    };

    let pages: BTreeMap<String, PageRecord> = serde_json::from_value(pages)?;
    Ok(pages.into_values().collect())
}

/// Keeps pages that carry image info of a known media kind, projected to that
/// kind's field set and keyed by page title.
pub fn format_media_metadata(pages: Vec<PageRecord>) -> MediaMetadata {
    let mut metadata = MediaMetadata::new();
    for page in pages {
        let Some(info) = page.image_info() else {
            continue;
        };
        let Some(kind) = info.kind() else {
            warn!(
                title = %page.title,
                mediatype = info.mediatype.as_deref().unwrap_or("<none>"),
                "skipping file with unsupported media type"
            );
            continue;
        };
        let record = MediaRecord::project(page.title.clone(), info, kind);
        metadata.insert(page.title, record);
    }
    metadata
}

pub fn fetch_and_format_media_metadata<S: AsRef<str>>(
    session: &dyn ApiSession,
    titles: &[S],
) -> Result<MediaMetadata> {
    let pages = fetch_media_metadata(session, titles)?;
    Ok(format_media_metadata(pages))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockSession;
    use serde_json::json;

    fn sample_response() -> Value {
        json!({
            "batchcomplete": "",
            "query": {
                "pages": {
                    "-1": {
                        "ns": 6,
                        "title": "File:Missing.jpg",
                        "missing": "",
                        "known": ""
                    },
                    "101": {
                        "pageid": 101,
                        "ns": 6,
                        "title": "File:Cat.jpg",
                        "imagerepository": "local",
                        "imageinfo": [{
                            "size": 3_000_000,
                            "width": 4000,
                            "height": 3000,
                            "thumburl": "https://upload.wikimedia.org/thumb/Cat.jpg/300px-Cat.jpg",
                            "thumbwidth": 300,
                            "thumbheight": 225,
                            "thumbmime": "image/jpeg",
                            "url": "https://upload.wikimedia.org/Cat.jpg",
                            "descriptionurl": "https://commons.wikimedia.org/wiki/File:Cat.jpg",
                            "descriptionshorturl": "https://commons.wikimedia.org/w/index.php?curid=101",
                            "mime": "image/jpeg",
                            "mediatype": "BITMAP"
                        }]
                    },
                    "102": {
                        "pageid": 102,
                        "ns": 6,
                        "title": "File:Song.ogg",
                        "imageinfo": [{"mediatype": "AUDIO", "size": 100, "mime": "audio/ogg"}]
                    },
                    "103": {
                        "pageid": 103,
                        "ns": 6,
                        "title": "File:Blob.bin",
                        "imageinfo": [{"mediatype": "UNKNOWN", "size": 5, "mime": "application/octet-stream"}]
                    }
                }
            }
        })
    }

    #[test]
    fn request_batches_all_titles() {
        let session = MockSession::default();
        session.push_response(json!({"batchcomplete": ""}));

        fetch_media_metadata(&session, &["File:A.jpg", "File:B.ogg"]).unwrap();

        let requests = session.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.get("action"), Some("query"));
        assert_eq!(request.get("prop"), Some("imageinfo"));
        assert_eq!(request.get("iiprop"), Some("url|size|mime|thumbmime|mediatype"));
        assert_eq!(request.get("iiurlwidth"), Some("300"));
        assert_eq!(request.get("titles"), Some("File:A.jpg|File:B.ogg"));
    }

    #[test]
    fn response_without_pages_is_empty() {
        let session = MockSession::default();
        session.push_response(json!({"batchcomplete": "", "query": {}}));
        assert!(fetch_media_metadata(&session, &["File:A.jpg"]).unwrap().is_empty());

        session.push_response(json!({"batchcomplete": ""}));
        assert!(fetch_and_format_media_metadata(&session, &["File:A.jpg"])
            .unwrap()
            .is_empty());
    }

    #[test]
    fn empty_title_list_skips_the_request() {
        let session = MockSession::default();
        let titles: Vec<String> = Vec::new();
        assert!(fetch_media_metadata(&session, &titles).unwrap().is_empty());
        assert!(session.requests().is_empty());
    }

    #[test]
    fn pages_are_projected_by_media_kind() {
        let session = MockSession::default();
        session.push_response(sample_response());

        let metadata = fetch_and_format_media_metadata(
            &session,
            &["File:Missing.jpg", "File:Cat.jpg", "File:Song.ogg", "File:Blob.bin"],
        )
        .unwrap();

        assert_eq!(metadata.len(), 2);
        assert!(!metadata.contains_key("File:Missing.jpg"));
        assert!(!metadata.contains_key("File:Blob.bin"));

        let cat = &metadata["File:Cat.jpg"];
        assert_eq!(cat.title, "File:Cat.jpg");
        assert_eq!(cat.width, Some(4000));
        assert_eq!(cat.thumbwidth, Some(300));
        assert_eq!(cat.mime.as_deref(), Some("image/jpeg"));

        let song = serde_json::to_value(&metadata["File:Song.ogg"]).unwrap();
        assert_eq!(
            song,
            json!({"title": "File:Song.ogg", "mediatype": "AUDIO", "size": 100, "mime": "audio/ogg"})
        );
    }

    #[test]
    fn page_without_imageinfo_is_excluded() {
        let pages: Vec<PageRecord> = vec![
            serde_json::from_value(json!({"title": "File:Gone.png", "missing": ""})).unwrap(),
            serde_json::from_value(json!({"title": "File:Empty.png", "imageinfo": []})).unwrap(),
        ];
        assert!(format_media_metadata(pages).is_empty());
    }
}
