pub mod attributes;
pub mod classification;
pub mod content;
pub mod episode;
pub mod torrent;

pub use attributes::{
    ContentAttributes, Language, Video3d, VideoCodec, VideoModifier, VideoResolution, VideoSource,
};
pub use classification::{Classification, Content};
pub use content::{ContentType, UnknownContentType, Year};
pub use episode::{EpisodeId, Episodes};
pub use torrent::{FilesStatus, Torrent, TorrentFile, file_extension};
