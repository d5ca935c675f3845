//! QR image rendering collaborator.
//!
//! The rest of the crate only hands a tracking URL in and serves the SVG
//! back out; nothing here is inspected downstream.

use qrcode::render::svg;
use qrcode::QrCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QrRenderError {
    #[error("failed to encode QR payload: {0}")]
    Encode(#[from] qrcode::types::QrError),
}

/// Rendering options with the generator form's defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct QrRenderOptions {
    /// Minimum edge length of the rendered image, in pixels.
    #[serde(default = "QrRenderOptions::default_size")]
    pub size: u32,

    /// Quiet-zone margin; 0 disables it, any positive value enables the
    /// standard four-module border.
    #[serde(default = "QrRenderOptions::default_margin")]
    pub margin: u32,

    /// Foreground color (any SVG color string).
    #[serde(default = "QrRenderOptions::default_dark")]
    pub dark: String,

    /// Background color.
    #[serde(default = "QrRenderOptions::default_light")]
    pub light: String,
}

impl QrRenderOptions {
    const fn default_size() -> u32 {
        256
    }

    const fn default_margin() -> u32 {
        2
    }

    fn default_dark() -> String {
        "#1F2937".to_string()
    }

    fn default_light() -> String {
        "#FFFFFF".to_string()
    }
}

impl Default for QrRenderOptions {
    fn default() -> Self {
        Self {
            size: Self::default_size(),
            margin: Self::default_margin(),
            dark: Self::default_dark(),
            light: Self::default_light(),
        }
    }
}

/// Render `data` as an SVG document.
pub fn render_svg(data: &str, options: &QrRenderOptions) -> Result<String, QrRenderError> {
    let code = QrCode::new(data.as_bytes())?;

    let image = code
        .render::<svg::Color>()
        .min_dimensions(options.size, options.size)
        .quiet_zone(options.margin > 0)
        .dark_color(svg::Color(&options.dark))
        .light_color(svg::Color(&options.light))
        .build();

    Ok(image)
}
