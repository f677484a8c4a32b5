use std::path::PathBuf;

pub type CinematicResult<T> = Result<T, CinematicError>;

#[derive(thiserror::Error, Debug)]
pub enum CinematicError {
    #[error("failed to read story file {path:?}: {source}")]
    StoryIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("story parse error: {0}")]
    StoryParse(#[from] serde_json::Error),

    #[error("story contains no scenes")]
    EmptyStory,
}
