//=========================================================================
// Configuration
//
// Every option recognised at construction, with its default, validated
// before a session is created.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::color::Color;

//=== Defaults ============================================================

pub const DEFAULT_WIDTH: u32 = 160;
pub const DEFAULT_HEIGHT: u32 = 144;
pub const DEFAULT_SCALE: f32 = 4.0;
pub const DEFAULT_FPS: u32 = 60;

/// Window title used when no container is configured.
pub const DEFAULT_CONTAINER: &str = "LilyPad";

//=== Config ==============================================================

/// Construction-time options of a [`Session`](crate::core::Session).
///
/// | Option       | Default   |
/// |--------------|-----------|
/// | `width`      | 160       |
/// | `height`     | 144       |
/// | `scale`      | 4.0       |
/// | `fps`        | 60        |
/// | `background` | black     |
/// | `container`  | none      |
/// | `auto_fit`   | false     |
/// | `seed`       | entropy   |
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Logical canvas width in pixels.
    pub width: u32,

    /// Logical canvas height in pixels.
    pub height: u32,

    /// Visual size multiplier applied when presenting.
    pub scale: f32,

    /// Advisory target frame rate. The scheduler follows display refresh.
    pub fps: u32,

    /// Color shown behind the canvas.
    pub background: Color,

    /// Identifier of the hosting window.
    pub container: Option<String>,

    /// Recompute `scale` to fit the window whenever it is resized.
    pub auto_fit: bool,

    /// Seed for the shake jitter generator (`None` seeds from entropy).
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            scale: DEFAULT_SCALE,
            fps: DEFAULT_FPS,
            background: Color::BLACK,
            container: None,
            auto_fit: false,
            seed: None,
        }
    }
}

impl Config {
    /// Checks every option, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidResolution {
                width: self.width,
                height: self.height,
            });
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ConfigError::InvalidScale(self.scale));
        }
        if self.fps == 0 {
            return Err(ConfigError::InvalidFps(self.fps));
        }
        Ok(())
    }

    /// Resolves the container identifier, falling back to the default root.
    pub fn container_name(&self) -> &str {
        match self.container.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_CONTAINER,
        }
    }
}

//=== ConfigError =========================================================

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Width or height is zero.
    InvalidResolution { width: u32, height: u32 },

    /// Scale is zero, negative, NaN or infinite.
    InvalidScale(f32),

    /// Frame rate is zero.
    InvalidFps(u32),

    /// Background color text could not be parsed.
    InvalidColor(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidResolution { width, height } => {
                write!(f, "Logical resolution must be positive, got {}x{}", width, height)
            }
            Self::InvalidScale(s) => write!(f, "Scale must be positive and finite, got {}", s),
            Self::InvalidFps(fps) => write!(f, "Frame rate must be positive, got {}", fps),
            Self::InvalidColor(text) => write!(f, "Unrecognised color '{}'", text),
        }
    }
}

impl std::error::Error for ConfigError {}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_handheld_profile() {
        let config = Config::default();
        assert_eq!(config.width, 160);
        assert_eq!(config.height, 144);
        assert_eq!(config.scale, 4.0);
        assert_eq!(config.fps, 60);
        assert_eq!(config.background, Color::BLACK);
        assert!(!config.auto_fit);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_width_is_rejected() {
        let config = Config { width: 0, ..Config::default() };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidResolution { width: 0, height: 144 })
        );
    }

    #[test]
    fn bad_scales_are_rejected() {
        for scale in [0.0, -2.0, f32::NAN, f32::INFINITY] {
            let config = Config { scale, ..Config::default() };
            assert!(
                matches!(config.validate(), Err(ConfigError::InvalidScale(_))),
                "scale {} should be rejected",
                scale
            );
        }
    }

    #[test]
    fn zero_fps_is_rejected() {
        let config = Config { fps: 0, ..Config::default() };
        assert_eq!(config.validate(), Err(ConfigError::InvalidFps(0)));
    }

    #[test]
    fn missing_container_falls_back_to_root() {
        let mut config = Config::default();
        assert_eq!(config.container_name(), DEFAULT_CONTAINER);

        config.container = Some("   ".to_string());
        assert_eq!(config.container_name(), DEFAULT_CONTAINER);

        config.container = Some("pond".to_string());
        assert_eq!(config.container_name(), "pond");
    }

    #[test]
    fn error_messages_are_readable() {
        let msg = ConfigError::InvalidResolution { width: 0, height: 10 }.to_string();
        assert!(msg.contains("0x10"));
    }
}
