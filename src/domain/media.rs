use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// `mediatype` values for which a field projection is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaKind {
    #[serde(rename = "BITMAP")]
    Bitmap,
    #[serde(rename = "DRAWING")]
    Drawing,
    #[serde(rename = "3D")]
    ThreeD,
    #[serde(rename = "AUDIO")]
    Audio,
    #[serde(rename = "VIDEO")]
    Video,
    #[serde(rename = "OFFICE")]
    Office,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaField {
    MediaType,
    Size,
    Url,
    DescriptionUrl,
    Width,
    Height,
    Mime,
    ThumbUrl,
    ThumbWidth,
    ThumbHeight,
    ThumbMime,
    Duration,
    PageCount,
}

const IMAGE_FIELDS: &[MediaField] = &[
    MediaField::MediaType,
    MediaField::Size,
    MediaField::Url,
    MediaField::DescriptionUrl,
    MediaField::Width,
    MediaField::Height,
    MediaField::Mime,
    MediaField::ThumbUrl,
    MediaField::ThumbWidth,
    MediaField::ThumbHeight,
    MediaField::ThumbMime,
];

const AUDIO_FIELDS: &[MediaField] = &[
    MediaField::MediaType,
    MediaField::Size,
    MediaField::Url,
    MediaField::DescriptionUrl,
    MediaField::Duration,
    MediaField::Mime,
];

const VIDEO_FIELDS: &[MediaField] = &[
    MediaField::MediaType,
    MediaField::Size,
    MediaField::Url,
    MediaField::DescriptionUrl,
    MediaField::Width,
    MediaField::Height,
    MediaField::Mime,
    MediaField::ThumbUrl,
    MediaField::ThumbWidth,
    MediaField::ThumbHeight,
    MediaField::ThumbMime,
    MediaField::Duration,
];

const OFFICE_FIELDS: &[MediaField] = &[
    MediaField::MediaType,
    MediaField::Size,
    MediaField::Url,
    MediaField::DescriptionUrl,
    MediaField::Width,
    MediaField::Height,
    MediaField::Mime,
    MediaField::ThumbUrl,
    MediaField::ThumbWidth,
    MediaField::ThumbHeight,
    MediaField::ThumbMime,
    MediaField::PageCount,
];

impl MediaKind {
    pub fn from_mediatype(value: &str) -> Option<Self> {
        match value {
            "BITMAP" => Some(MediaKind::Bitmap),
            "DRAWING" => Some(MediaKind::Drawing),
            "3D" => Some(MediaKind::ThreeD),
            "AUDIO" => Some(MediaKind::Audio),
            "VIDEO" => Some(MediaKind::Video),
            "OFFICE" => Some(MediaKind::Office),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Bitmap => "BITMAP",
            MediaKind::Drawing => "DRAWING",
            MediaKind::ThreeD => "3D",
            MediaKind::Audio => "AUDIO",
            MediaKind::Video => "VIDEO",
            MediaKind::Office => "OFFICE",
        }
    }

    /// Fields kept in the flattened record for this kind of media.
    pub fn fields(self) -> &'static [MediaField] {
        match self {
            MediaKind::Bitmap | MediaKind::Drawing | MediaKind::ThreeD => IMAGE_FIELDS,
            MediaKind::Audio => AUDIO_FIELDS,
            MediaKind::Video => VIDEO_FIELDS,
            MediaKind::Office => OFFICE_FIELDS,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl MediaField {
    pub fn name(self) -> &'static str {
        match self {
            MediaField::MediaType => "mediatype",
            MediaField::Size => "size",
            MediaField::Url => "url",
            MediaField::DescriptionUrl => "descriptionurl",
            MediaField::Width => "width",
            MediaField::Height => "height",
            MediaField::Mime => "mime",
            MediaField::ThumbUrl => "thumburl",
            MediaField::ThumbWidth => "thumbwidth",
            MediaField::ThumbHeight => "thumbheight",
            MediaField::ThumbMime => "thumbmime",
            MediaField::Duration => "duration",
            MediaField::PageCount => "pagecount",
        }
    }
}

/// First `imageinfo` entry of a page, every field optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ImageInfo {
    #[serde(default)]
    pub mediatype: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub descriptionurl: Option<String>,
    #[serde(default)]
    pub width: Option<u64>,
    #[serde(default)]
    pub height: Option<u64>,
    #[serde(default)]
    pub mime: Option<String>,
    #[serde(default)]
    pub thumburl: Option<String>,
    #[serde(default)]
    pub thumbwidth: Option<u64>,
    #[serde(default)]
    pub thumbheight: Option<u64>,
    #[serde(default)]
    pub thumbmime: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub pagecount: Option<u64>,
}

impl ImageInfo {
    pub fn kind(&self) -> Option<MediaKind> {
        self.mediatype.as_deref().and_then(MediaKind::from_mediatype)
    }
}

/// A page entry of a `prop=imageinfo` query.
#[derive(Debug, Clone, Deserialize)]
pub struct PageRecord {
    pub title: String,
    #[serde(default)]
    pub imageinfo: Option<Vec<ImageInfo>>,
}

impl PageRecord {
    pub fn image_info(&self) -> Option<&ImageInfo> {
        self.imageinfo.as_ref().and_then(|infos| infos.first())
    }
}

/// Flattened metadata of one media file. Fields outside the projection of the
/// file's media kind, or absent from the service response, stay `None` and are
/// left out when serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MediaRecord {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mediatype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptionurl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumburl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbwidth: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbheight: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbmime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagecount: Option<u64>,
}

impl MediaRecord {
    pub fn project(title: impl Into<String>, info: &ImageInfo, kind: MediaKind) -> Self {
        let mut record = MediaRecord {
            title: title.into(),
            ..MediaRecord::default()
        };
        for field in kind.fields() {
            record.copy_field(info, *field);
        }
        record
    }

    fn copy_field(&mut self, info: &ImageInfo, field: MediaField) {
        match field {
            MediaField::MediaType => self.mediatype = info.mediatype.clone(),
            MediaField::Size => self.size = info.size,
            MediaField::Url => self.url = info.url.clone(),
            MediaField::DescriptionUrl => self.descriptionurl = info.descriptionurl.clone(),
            MediaField::Width => self.width = info.width,
            MediaField::Height => self.height = info.height,
            MediaField::Mime => self.mime = info.mime.clone(),
            MediaField::ThumbUrl => self.thumburl = info.thumburl.clone(),
            MediaField::ThumbWidth => self.thumbwidth = info.thumbwidth,
            MediaField::ThumbHeight => self.thumbheight = info.thumbheight,
            MediaField::ThumbMime => self.thumbmime = info.thumbmime.clone(),
            MediaField::Duration => self.duration = info.duration,
            MediaField::PageCount => self.pagecount = info.pagecount,
        }
    }
}

/// File title to its flattened metadata.
pub type MediaMetadata = BTreeMap<String, MediaRecord>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn info(value: serde_json::Value) -> ImageInfo {
        serde_json::from_value(value).unwrap()
    }

    fn full_info(mediatype: &str) -> ImageInfo {
        info(json!({
            "mediatype": mediatype,
            "size": 2048,
            "url": "https://upload.wikimedia.org/a",
            "descriptionurl": "https://commons.wikimedia.org/wiki/File:A",
            "width": 640,
            "height": 480,
            "mime": "application/octet-stream",
            "thumburl": "https://upload.wikimedia.org/thumb/a",
            "thumbwidth": 300,
            "thumbheight": 225,
            "thumbmime": "image/jpeg",
            "duration": 12.5,
            "pagecount": 7
        }))
    }

    #[test]
    fn audio_projection_omits_absent_fields() {
        let info = info(json!({"mediatype": "AUDIO", "size": 100, "mime": "audio/ogg"}));
        let record = MediaRecord::project("File:Song.ogg", &info, MediaKind::Audio);
        // mediatype is part of the audio projection
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"title": "File:Song.ogg", "mediatype": "AUDIO", "size": 100, "mime": "audio/ogg"})
        );
    }

    #[test]
    fn audio_projection_without_mediatype_field_matches_input() {
        let info = info(json!({"size": 100, "mime": "audio/ogg"}));
        let record = MediaRecord::project("File:Song.ogg", &info, MediaKind::Audio);
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"title": "File:Song.ogg", "size": 100, "mime": "audio/ogg"})
        );
        assert_eq!(record.duration, None);
    }

    #[test]
    fn audio_drops_image_dimensions() {
        let record = MediaRecord::project("File:A", &full_info("AUDIO"), MediaKind::Audio);
        assert_eq!(record.duration, Some(12.5));
        assert_eq!(record.width, None);
        assert_eq!(record.thumburl, None);
        assert_eq!(record.pagecount, None);
    }

    #[test]
    fn image_kinds_share_the_image_projection() {
        for kind in [MediaKind::Bitmap, MediaKind::Drawing, MediaKind::ThreeD] {
            let record = MediaRecord::project("File:A", &full_info(kind.as_str()), kind);
            assert_eq!(record.width, Some(640));
            assert_eq!(record.thumbmime.as_deref(), Some("image/jpeg"));
            assert_eq!(record.duration, None);
            assert_eq!(record.pagecount, None);
        }
    }

    #[test]
    fn video_and_office_extend_image_fields() {
        let video = MediaRecord::project("File:V", &full_info("VIDEO"), MediaKind::Video);
        assert_eq!(video.duration, Some(12.5));
        assert_eq!(video.height, Some(480));
        assert_eq!(video.pagecount, None);

        let office = MediaRecord::project("File:O", &full_info("OFFICE"), MediaKind::Office);
        assert_eq!(office.pagecount, Some(7));
        assert_eq!(office.thumbwidth, Some(300));
        assert_eq!(office.duration, None);
    }

    #[test]
    fn field_sets_are_keyed_by_kind() {
        assert_eq!(MediaKind::Video.fields().len(), MediaKind::Bitmap.fields().len() + 1);
        assert_eq!(MediaKind::Office.fields().last(), Some(&MediaField::PageCount));
        let audio: Vec<_> = MediaKind::Audio.fields().iter().map(|f| f.name()).collect();
        assert_eq!(
            audio,
            ["mediatype", "size", "url", "descriptionurl", "duration", "mime"]
        );
    }

    #[test]
    fn unknown_mediatypes_have_no_kind() {
        assert_eq!(MediaKind::from_mediatype("UNKNOWN"), None);
        assert_eq!(MediaKind::from_mediatype("bitmap"), None);
        assert_eq!(MediaKind::from_mediatype("3D"), Some(MediaKind::ThreeD));
        assert_eq!(ImageInfo::default().kind(), None);
    }
}
