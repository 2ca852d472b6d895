use std::{fs::File, io::BufReader, path::Path};

use crate::foundation::{
    core::{Canvas, Fps, Rgba8Premul},
    error::{BellcurveError, BellcurveResult},
};

/// Output resolution and frame-rate preset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    /// 854x480 at 15 fps.
    Low,
    /// 1280x720 at 30 fps.
    Medium,
    /// 1920x1080 at 60 fps.
    #[default]
    High,
    /// 2560x1440 at 60 fps.
    Production,
}

impl Quality {
    /// Every preset, lowest first.
    pub const ALL: [Quality; 4] = [Self::Low, Self::Medium, Self::High, Self::Production];

    /// Canvas size of the preset.
    pub fn canvas(self) -> Canvas {
        let (width, height) = match self {
            Self::Low => (854, 480),
            Self::Medium => (1280, 720),
            Self::High => (1920, 1080),
            Self::Production => (2560, 1440),
        };
        Canvas { width, height }
    }

    /// Frame rate of the preset.
    pub fn fps(self) -> u32 {
        match self {
            Self::Low => 15,
            Self::Medium => 30,
            Self::High | Self::Production => 60,
        }
    }
}

/// Render settings, usually loaded from JSON and then adjusted by CLI flags.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Base preset.
    pub quality: Quality,
    /// Frame-rate override.
    pub fps: Option<u32>,
    /// Width override in pixels.
    pub width: Option<u32>,
    /// Height override in pixels.
    pub height: Option<u32>,
    /// Background color as `#rrggbb` or `#rrggbbaa`.
    pub background: String,
    /// Replace existing output files.
    pub overwrite: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            quality: Quality::default(),
            fps: None,
            width: None,
            height: None,
            background: "#000000".to_string(),
            overwrite: true,
        }
    }
}

impl RenderConfig {
    /// Config for `quality` with no overrides.
    pub fn with_quality(quality: Quality) -> Self {
        Self {
            quality,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> BellcurveResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| BellcurveError::serde(format!("parse render config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> BellcurveResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            BellcurveError::validation(format!("open render config '{}': {e}", path.display()))
        })?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            BellcurveError::serde(format!(
                "parse render config JSON '{}': {e}",
                path.display()
            ))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check overrides and the background color.
    pub fn validate(&self) -> BellcurveResult<()> {
        if self.fps == Some(0) {
            return Err(BellcurveError::validation("fps must be > 0"));
        }
        for (name, v) in [("width", self.width), ("height", self.height)] {
            match v {
                Some(0) => {
                    return Err(BellcurveError::validation(format!("{name} must be > 0")));
                }
                Some(px) if px > u32::from(u16::MAX) => {
                    return Err(BellcurveError::validation(format!(
                        "{name} must be <= {}",
                        u16::MAX
                    )));
                }
                _ => {}
            }
        }
        self.background_color()?;
        Ok(())
    }

    /// Canvas after overrides.
    pub fn canvas(&self) -> Canvas {
        let preset = self.quality.canvas();
        Canvas {
            width: self.width.unwrap_or(preset.width),
            height: self.height.unwrap_or(preset.height),
        }
    }

    /// Frame rate after overrides.
    pub fn fps(&self) -> BellcurveResult<Fps> {
        Fps::new(self.fps.unwrap_or_else(|| self.quality.fps()), 1)
    }

    /// Parsed background color.
    pub fn background_color(&self) -> BellcurveResult<Rgba8Premul> {
        Rgba8Premul::from_hex(&self.background)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
