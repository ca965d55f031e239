//! Rendering backend selector

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Rendering API the application asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Let the renderer choose
    #[default]
    Default,
    /// Direct3D 11
    D3D11,
    /// Apple Metal
    Metal,
    /// OpenGL family (GL, GLES)
    #[serde(rename = "opengl")]
    OpenGl,
}

impl Backend {
    /// Every selectable backend
    pub const ALL: [Self; 4] = [Self::Default, Self::D3D11, Self::Metal, Self::OpenGl];

    /// Display name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::D3D11 => "D3D11",
            Self::Metal => "Metal",
            Self::OpenGl => "OpenGL",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "d3d11" | "direct3d11" => Ok(Self::D3D11),
            "metal" => Ok(Self::Metal),
            "opengl" | "gl" => Ok(Self::OpenGl),
            other => Err(format!("Unknown backend: {other}")),
        }
    }
}
