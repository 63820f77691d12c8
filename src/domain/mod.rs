mod labels;
mod media;
mod search;

pub use labels::{ItemLabelMap, LabelMap, PropertyLabelMap};
pub use media::{ImageInfo, MediaField, MediaKind, MediaMetadata, MediaRecord, PageRecord};
pub use search::{SearchHit, SearchResult};
