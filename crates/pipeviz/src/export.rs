pub mod svg;

#[derive(Debug)]
pub enum Error {
    /// A style setting could not be turned into SVG.
    InvalidStyle(String),
    /// The surface has no drawable area.
    EmptySurface { width: f32, height: f32 },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStyle(msg) => write!(f, "Invalid style: {msg}"),
            Self::EmptySurface { width, height } => {
                write!(f, "Surface size {width}x{height} has no drawable area")
            }
        }
    }
}

impl std::error::Error for Error {}
