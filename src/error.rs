use thiserror::Error;

use crate::landmarks::Region;

#[derive(Error, Debug)]
pub enum Error {
    #[error("missing landmarks: no {region} points were provided")]
    MissingLandmarks { region: Region },

    #[error("degenerate landmarks: pupillary distance of {pupillary_px}px cannot anchor a pixel scale")]
    DegenerateLandmarks { pupillary_px: f32 },

    #[error("cannot annotate an empty {width}x{height} image")]
    EmptyImage { width: u32, height: u32 },

    #[error("malformed landmark payload: {0}")]
    MalformedLandmarks(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
