pub mod attributes;
pub mod grammar;
pub mod video;

pub use attributes::{
    infer_languages, infer_video_3d, infer_video_codec_and_release_group, infer_video_modifier,
    infer_video_resolution, infer_video_source, is_multi_language,
};
pub use grammar::{TitleMatch, clean_title, parse_episodes, parse_title_year_episodes_cascade};
pub use video::{VideoContent, parse_content};
