use crate::color::alias::resolve_alias;
use crate::prelude::{PlotError, PlotResult};
use serde::{Deserialize, Serialize};

/// Colormap: colors pinned at normalized intensity positions in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawColorScheme")]
pub struct ColorScheme {
    colors: Vec<String>,
    positions: Vec<f64>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawColorScheme {
    colors: Vec<String>,
    positions: Vec<f64>,
}

impl TryFrom<RawColorScheme> for ColorScheme {
    type Error = PlotError;

    fn try_from(raw: RawColorScheme) -> Result<Self, Self::Error> {
        ColorScheme::new(raw.colors, raw.positions)
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            colors: vec!["black".into(), "white".into()],
            positions: vec![0.0, 1.0],
        }
    }
}

impl ColorScheme {
    /// Validates the stops and translates plotting-library aliases to CSS.
    pub fn new<S: AsRef<str>>(colors: Vec<S>, positions: Vec<f64>) -> PlotResult<Self> {
        if colors.len() < 2 {
            return Err(PlotError::InvalidColorScheme(format!(
                "at least 2 colors are required, got {}",
                colors.len()
            )));
        }
        if positions.len() != colors.len() {
            return Err(PlotError::InvalidColorScheme(format!(
                "{} colors but {} positions",
                colors.len(),
                positions.len()
            )));
        }
        if let Some(bad) = positions
            .iter()
            .find(|p| !p.is_finite() || **p < 0.0 || **p > 1.0)
        {
            return Err(PlotError::InvalidColorScheme(format!(
                "position {} is outside [0, 1]",
                bad
            )));
        }
        if positions.windows(2).any(|pair| pair[1] < pair[0]) {
            return Err(PlotError::InvalidColorScheme(
                "positions must be non-decreasing".into(),
            ));
        }

        let colors = colors
            .iter()
            .map(|color| normalize_color(color.as_ref()))
            .collect::<PlotResult<Vec<_>>>()?;

        Ok(Self { colors, positions })
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// Hex color at a normalized position, interpolated linearly in sRGB
    /// between the surrounding stops. Positions outside the stops clamp.
    pub fn sample(&self, position: f64) -> PlotResult<String> {
        let rgb = self
            .colors
            .iter()
            .map(|color| parse_rgb(color))
            .collect::<PlotResult<Vec<_>>>()?;
        let last = self.positions.len() - 1;

        let position = if position.is_nan() { 0.0 } else { position };
        if position <= self.positions[0] {
            return Ok(to_hex(rgb[0]));
        }
        if position >= self.positions[last] {
            return Ok(to_hex(rgb[last]));
        }

        let upper = self
            .positions
            .iter()
            .position(|&stop| stop >= position)
            .unwrap_or(last);
        let lower = upper.saturating_sub(1);
        let span = self.positions[upper] - self.positions[lower];
        let weight = if span > 0.0 {
            (position - self.positions[lower]) / span
        } else {
            1.0
        };

        let (a, b) = (rgb[lower], rgb[upper]);
        Ok(to_hex([
            a[0] + (b[0] - a[0]) * weight,
            a[1] + (b[1] - a[1]) * weight,
            a[2] + (b[2] - a[2]) * weight,
        ]))
    }
}

fn normalize_color(color: &str) -> PlotResult<String> {
    if let Some(css) = resolve_alias(color) {
        return Ok(css.to_string());
    }
    csscolorparser::parse(color)
        .map(|_| color.trim().to_string())
        .map_err(|err| PlotError::InvalidColor {
            color: color.to_string(),
            reason: err.to_string(),
        })
}

fn parse_rgb(color: &str) -> PlotResult<[f64; 3]> {
    let parsed = csscolorparser::parse(color).map_err(|err| PlotError::InvalidColor {
        color: color.to_string(),
        reason: err.to_string(),
    })?;
    Ok([parsed.r as f64, parsed.g as f64, parsed.b as f64])
}

fn to_hex(rgb: [f64; 3]) -> String {
    let channel = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        channel(rgb[0]),
        channel(rgb[1]),
        channel(rgb[2])
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scheme_is_black_to_white() {
        let scheme = ColorScheme::default();
        assert_eq!(scheme.colors(), ["black", "white"]);
        assert_eq!(scheme.positions(), [0.0, 1.0]);
    }

    #[test]
    fn aliases_are_translated_and_css_kept() {
        let scheme = ColorScheme::new(vec!["k", "tab:red", "#00ff00"], vec![0.0, 0.5, 1.0]).unwrap();
        assert_eq!(scheme.colors(), ["#000000", "#d62728", "#00ff00"]);
    }

    #[test]
    fn rejects_single_color() {
        let err = ColorScheme::new(vec!["red"], vec![0.0]).unwrap_err();
        assert!(matches!(err, PlotError::InvalidColorScheme(_)));
    }

    #[test]
    fn rejects_mismatched_lengths() {
        assert!(ColorScheme::new(vec!["red", "blue"], vec![0.0, 0.5, 1.0]).is_err());
    }

    #[test]
    fn rejects_out_of_range_and_unsorted_positions() {
        assert!(ColorScheme::new(vec!["red", "blue"], vec![0.0, 1.5]).is_err());
        assert!(ColorScheme::new(vec!["red", "blue"], vec![-0.1, 1.0]).is_err());
        assert!(ColorScheme::new(vec!["red", "blue"], vec![0.8, 0.2]).is_err());
    }

    #[test]
    fn rejects_unknown_color_names() {
        let err = ColorScheme::new(vec!["red", "notacolor"], vec![0.0, 1.0]).unwrap_err();
        assert!(matches!(err, PlotError::InvalidColor { .. }));
    }

    #[test]
    fn sample_interpolates_between_stops() {
        let scheme = ColorScheme::default();
        assert_eq!(scheme.sample(0.0).unwrap(), "#000000");
        assert_eq!(scheme.sample(1.0).unwrap(), "#ffffff");
        assert_eq!(scheme.sample(0.5).unwrap(), "#808080");
        assert_eq!(scheme.sample(2.0).unwrap(), "#ffffff");
    }

    #[test]
    fn deserialization_validates() {
        let ok: ColorScheme =
            serde_json::from_str(r#"{"colors":["C0","white"],"positions":[0,1]}"#).unwrap();
        assert_eq!(ok.colors()[0], "#1f77b4");
        let bad = serde_json::from_str::<ColorScheme>(r#"{"colors":["red"],"positions":[0]}"#);
        assert!(bad.is_err());
    }
}
