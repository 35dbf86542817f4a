use std::fmt;
use std::str::FromStr;

/// Recognition preset chosen by the client.
///
/// Parsing never fails: unrecognized values are kept as `Unknown` so the
/// response can echo them back, and they add no parameter overrides.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RecognitionMode {
    #[default]
    Fast,
    Advanced,
    Handwriting,
    Unknown(String),
}

impl RecognitionMode {
    /// Parse a form value; blank input selects the default.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "" | "fast" => Self::Fast,
            "advanced" => Self::Advanced,
            "handwriting" => Self::Handwriting,
            _ => Self::Unknown(value.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Fast => "fast",
            Self::Advanced => "advanced",
            Self::Handwriting => "handwriting",
            Self::Unknown(raw) => raw,
        }
    }
}

impl FromStr for RecognitionMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for RecognitionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
