//! Coloring schemes: turning a [`PixelRecord`] into an RGB triple.
//!
//! Two of the schemes are plain thresholds on the iteration count,
//! one steps a grey level along with the count, and the last two use
//! the "smoothed" count, which folds the final magnitude of the orbit
//! into the integer count so that neighbouring pixels don't band.

use std::f64::consts::LN_2;
use std::fmt;
use std::str::FromStr;

use image::Rgb;

use config::RenderConfig;
use escape::PixelRecord;

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// The five ways we know how to paint a pixel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColorScheme {
    /// Black inside the set, white outside.
    BlackWhite,
    /// Black when the iteration count has the same parity as the
    /// cap, white otherwise.  Draws the escape-time contour bands.
    BlackWhiteAlternating,
    /// Black inside the set, a grey level proportional to the
    /// iteration count outside.
    GreyStepped,
    /// Black inside the set, a grey level from the smoothed count
    /// outside.
    GreySmoothed,
    /// A hue from the smoothed count, at full saturation and value.
    /// Points inside the set get no special treatment.
    Rgb,
}

impl ColorScheme {
    /// Every scheme, in configuration-file order.
    pub const ALL: [ColorScheme; 5] = [
        ColorScheme::Rgb,
        ColorScheme::BlackWhite,
        ColorScheme::BlackWhiteAlternating,
        ColorScheme::GreyStepped,
        ColorScheme::GreySmoothed,
    ];

    /// The token that selects this scheme in a configuration file.
    pub fn token(self) -> &'static str {
        match self {
            ColorScheme::BlackWhite => "b&w",
            ColorScheme::BlackWhiteAlternating => "b&w_alt",
            ColorScheme::GreyStepped => "grey_stepped",
            ColorScheme::GreySmoothed => "grey_smoothed",
            ColorScheme::Rgb => "rgb",
        }
    }

    /// Color one pixel, given the iteration cap it was rendered with.
    pub fn colorize(self, record: &PixelRecord, max_iterations: u32) -> Rgb<u8> {
        let in_set = record.is_in_set(max_iterations);
        match self {
            ColorScheme::BlackWhite => {
                if in_set {
                    BLACK
                } else {
                    WHITE
                }
            }
            ColorScheme::BlackWhiteAlternating => {
                if record.iterations % 2 == max_iterations % 2 {
                    BLACK
                } else {
                    WHITE
                }
            }
            ColorScheme::GreyStepped => {
                if in_set {
                    return BLACK;
                }
                let ratio = f64::from(record.iterations) / f64::from(max_iterations);
                grey((ratio * 255.0) as u8)
            }
            ColorScheme::GreySmoothed => {
                if in_set {
                    return BLACK;
                }
                let level = (512.0 * smoothed_count(record) / f64::from(max_iterations)).floor();
                // NaN and negative levels saturate to zero in the cast.
                grey(if level > 255.0 { 255 } else { level as u8 })
            }
            ColorScheme::Rgb => {
                let hue = 360.0 * smoothed_count(record) / f64::from(max_iterations);
                hsv_to_rgb(hue, 1.0, 1.0)
            }
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<ColorScheme, String> {
        ColorScheme::ALL
            .iter()
            .cloned()
            .find(|scheme| scheme.token() == s)
            .ok_or_else(|| {
                let tokens: Vec<&str> = ColorScheme::ALL.iter().map(|s| s.token()).collect();
                format!("one of {}", tokens.join(", "))
            })
    }
}

/// Color a pixel record according to the configured scheme.
pub fn colorize(record: &PixelRecord, config: &RenderConfig) -> Rgb<u8> {
    config.scheme.colorize(record, config.max_iterations)
}

#[inline]
fn log2(v: f64) -> f64 {
    v.ln() / LN_2
}

fn grey(level: u8) -> Rgb<u8> {
    Rgb([level, level, level])
}

/// The continuous escape count: `5 + n - log2(log2(|z|²))`, where `z`
/// is the final, refined position of the orbit.  For points inside
/// the set this is usually NaN, since `|z|²` is below one.
pub fn smoothed_count(record: &PixelRecord) -> f64 {
    5.0 + f64::from(record.iterations) - log2(log2(record.last.norm_sqr()))
}

/// Standard sextant HSV to RGB conversion.  `hue` is in degrees and
/// is wrapped into `[0, 360)`; a hue that isn't finite is read as 0.
/// `saturation` and `value` are in `[0, 1]`.  Channels are scaled to
/// `[0, 255]` and truncated.
pub fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> Rgb<u8> {
    let hue = if hue.is_finite() {
        hue.rem_euclid(360.0)
    } else {
        0.0
    };
    let chroma = value * saturation;
    let sector = hue / 60.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let m = value - chroma;

    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    Rgb([channel(r + m), channel(g + m), channel(b + m)])
}

#[inline]
fn channel(v: f64) -> u8 {
    (v * 255.0) as u8
}
