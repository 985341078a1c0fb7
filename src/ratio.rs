//! Aspect ratio parsing and the preset catalog.
//!
//! Every ratio a user can pick is written `W:H`: on the command line, in
//! `borda.toml`, and in export filenames (as `WxH`). This module turns those
//! strings into an [`AspectRatio`] that keeps both the label and the numeric
//! value, so the geometry code can work with the value while file naming
//! keeps the exact label the user chose.
//!
//! ## Accepted Forms
//!
//! - `"9:16"` → 0.5625
//! - `"1:1"` → 1.0
//! - `"2.39:1"` → 2.39 (decimal sides are fine)
//! - `" 4 : 5 "` → 0.8, label normalized to `"4:5"`
//!
//! Both sides must be finite and strictly positive.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The ratio selected when nothing else has been chosen.
pub const DEFAULT_RATIO: &str = "9:16";

/// Stock preset labels, in display order.
pub const DEFAULT_PRESETS: &[&str] = &["9:16", "4:5", "1:1", "16:9"];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RatioError {
    #[error("invalid ratio '{0}': expected W:H (e.g. 9:16)")]
    Malformed(String),
    #[error("invalid ratio '{0}': both sides must be positive numbers")]
    NonPositive(String),
}

/// A frame aspect ratio together with the `W:H` label it was parsed from.
#[derive(Debug, Clone, PartialEq)]
pub struct AspectRatio {
    label: String,
    width: f64,
    height: f64,
}

impl AspectRatio {
    /// Width divided by height.
    pub fn value(&self) -> f64 {
        self.width / self.height
    }

    /// The normalized `W:H` label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Label with `:` replaced by `x`, for filenames (`9:16` → `9x16`).
    pub fn file_label(&self) -> String {
        self.label.replace(':', "x")
    }

    pub fn is_portrait(&self) -> bool {
        self.value() < 1.0
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl FromStr for AspectRatio {
    type Err = RatioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_ratio(s)
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self {
            label: DEFAULT_RATIO.to_string(),
            width: 9.0,
            height: 16.0,
        }
    }
}

/// Parse a `W:H` string into an [`AspectRatio`].
///
/// Handles these patterns:
/// - `"9:16"` → label `"9:16"`, value 0.5625
/// - `" 4 : 5 "` → label `"4:5"`, value 0.8
/// - `"16/9"`, `"9:16:1"`, `""` → [`RatioError::Malformed`]
/// - `"0:1"`, `"-1:2"`, `"inf:1"` → [`RatioError::NonPositive`]
pub fn parse_ratio(input: &str) -> Result<AspectRatio, RatioError> {
    let trimmed = input.trim();
    let mut parts = trimmed.split(':');
    let (Some(w), Some(h), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(RatioError::Malformed(input.to_string()));
    };
    let (w, h) = (w.trim(), h.trim());

    let width: f64 = w
        .parse()
        .map_err(|_| RatioError::Malformed(input.to_string()))?;
    let height: f64 = h
        .parse()
        .map_err(|_| RatioError::Malformed(input.to_string()))?;

    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(RatioError::NonPositive(input.to_string()));
    }

    Ok(AspectRatio {
        label: format!("{w}:{h}"),
        width,
        height,
    })
}

/// Parse a list of preset labels, failing on the first invalid one.
pub fn parse_presets<S: AsRef<str>>(labels: &[S]) -> Result<Vec<AspectRatio>, RatioError> {
    labels.iter().map(|l| parse_ratio(l.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portrait_story_ratio() {
        let r = parse_ratio("9:16").unwrap();
        assert_eq!(r.label(), "9:16");
        assert_eq!(r.value(), 0.5625);
        assert!(r.is_portrait());
    }

    #[test]
    fn square_ratio() {
        let r = parse_ratio("1:1").unwrap();
        assert_eq!(r.value(), 1.0);
        assert!(!r.is_portrait());
    }

    #[test]
    fn decimal_sides() {
        let r = parse_ratio("2.39:1").unwrap();
        assert!((r.value() - 2.39).abs() < 1e-12);
    }

    #[test]
    fn whitespace_is_normalized_in_label() {
        let r = parse_ratio(" 4 : 5 ").unwrap();
        assert_eq!(r.label(), "4:5");
        assert_eq!(r.value(), 0.8);
    }

    #[test]
    fn file_label_replaces_colon() {
        assert_eq!(parse_ratio("9:16").unwrap().file_label(), "9x16");
        assert_eq!(parse_ratio("2.39:1").unwrap().file_label(), "2.39x1");
    }

    #[test]
    fn display_is_label() {
        assert_eq!(parse_ratio("16:9").unwrap().to_string(), "16:9");
    }

    #[test]
    fn from_str_delegates_to_parse() {
        let r: AspectRatio = "4:5".parse().unwrap();
        assert_eq!(r.value(), 0.8);
    }

    #[test]
    fn default_is_story_ratio() {
        let r = AspectRatio::default();
        assert_eq!(r, parse_ratio(DEFAULT_RATIO).unwrap());
    }

    #[test]
    fn wrong_separator_is_malformed() {
        assert!(matches!(
            parse_ratio("16/9"),
            Err(RatioError::Malformed(_))
        ));
    }

    #[test]
    fn extra_component_is_malformed() {
        assert!(matches!(
            parse_ratio("9:16:1"),
            Err(RatioError::Malformed(_))
        ));
    }

    #[test]
    fn empty_and_missing_sides_are_malformed() {
        assert!(matches!(parse_ratio(""), Err(RatioError::Malformed(_))));
        assert!(matches!(parse_ratio(":16"), Err(RatioError::Malformed(_))));
        assert!(matches!(parse_ratio("9:"), Err(RatioError::Malformed(_))));
        assert!(matches!(parse_ratio("a:b"), Err(RatioError::Malformed(_))));
    }

    #[test]
    fn zero_and_negative_rejected() {
        assert!(matches!(
            parse_ratio("0:1"),
            Err(RatioError::NonPositive(_))
        ));
        assert!(matches!(
            parse_ratio("1:0"),
            Err(RatioError::NonPositive(_))
        ));
        assert!(matches!(
            parse_ratio("-1:2"),
            Err(RatioError::NonPositive(_))
        ));
    }

    #[test]
    fn non_finite_rejected() {
        assert!(matches!(
            parse_ratio("inf:1"),
            Err(RatioError::NonPositive(_))
        ));
        assert!(matches!(
            parse_ratio("NaN:1"),
            Err(RatioError::NonPositive(_))
        ));
    }

    #[test]
    fn stock_presets_all_parse() {
        let presets = parse_presets(DEFAULT_PRESETS).unwrap();
        assert_eq!(presets.len(), DEFAULT_PRESETS.len());
        assert_eq!(presets[0].label(), DEFAULT_RATIO);
    }

    #[test]
    fn parse_presets_reports_first_bad_label() {
        let err = parse_presets(&["1:1", "oops", "0:1"]).unwrap_err();
        assert_eq!(err, RatioError::Malformed("oops".to_string()));
    }
}
