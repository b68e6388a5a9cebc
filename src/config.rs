//! Render configuration: the compiled-in defaults, the positional
//! configuration file, and the positional command line that can be
//! layered over either.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::str::FromStr;

use colorize::ColorScheme;
use errors::Error;
use planes::Viewport;

/// Everything a single render needs to know.  Built once at startup
/// and never changed while rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// The iteration cap.  A pixel that reaches it is in the set.
    pub max_iterations: u32,
    /// The bailout radius for the escape test.
    pub escape_radius: f64,
    /// Output raster width, in pixels.
    pub width: u32,
    /// Output raster height, in pixels.
    pub height: u32,
    /// How records are turned into colors.
    pub scheme: ColorScheme,
    /// Output file name, without the `.ppm` extension.
    pub basename: String,
    /// The region of the complex plane being rendered.
    pub viewport: Viewport,
}

impl Default for RenderConfig {
    fn default() -> RenderConfig {
        RenderConfig {
            max_iterations: 100,
            escape_radius: 2.0,
            width: 1000,
            height: 1000,
            scheme: ColorScheme::Rgb,
            basename: "mandel".to_string(),
            viewport: Viewport {
                center_x: -0.76,
                center_y: 0.0,
                width: 2.48,
                height: 2.48,
            },
        }
    }
}

/// Given a string and a separator, returns the two values
/// separated by the separator.
pub fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

/// Parses `WIDTHxHEIGHT`, both strictly positive.
pub fn parse_size(s: &str) -> Option<(u32, u32)> {
    match parse_pair::<u32>(s, 'x') {
        Some((w, h)) if w > 0 && h > 0 => Some((w, h)),
        _ => None,
    }
}

/// Parses `CENTERX,CENTERY,WIDTH,HEIGHT` into a viewport.
pub fn parse_viewport(s: &str) -> Option<Viewport> {
    let fields: Vec<f64> = s
        .split(',')
        .map(|f| f64::from_str(f.trim()))
        .collect::<Result<_, _>>()
        .ok()?;
    match fields.as_slice() {
        [x, y, w, h] => Viewport::new(*x, *y, *w, *h),
        _ => None,
    }
}

fn parse_positive(s: &str) -> Option<u32> {
    match u32::from_str(s) {
        Ok(v) if v > 0 => Some(v),
        _ => None,
    }
}

fn line_error(line: usize, expected: &'static str, found: &str) -> Error {
    Error::ConfigLine {
        line,
        expected,
        found: found.to_string(),
    }
}

impl RenderConfig {
    /// Reads a configuration file.  See [`RenderConfig::from_reader`].
    pub fn from_file(path: &str) -> Result<RenderConfig, Error> {
        let file = File::open(path).map_err(|cause| Error::ConfigOpen {
            path: path.to_string(),
            cause,
        })?;
        RenderConfig::from_reader(BufReader::new(file)).map_err(|err| match err {
            Error::Write(cause) => Error::ConfigOpen {
                path: path.to_string(),
                cause,
            },
            other => other,
        })
    }

    /// Reads the positional configuration format, one value per line:
    ///
    /// 1. output base name
    /// 2. `WIDTHxHEIGHT`
    /// 3. color scheme token (`rgb`, `b&w`, `b&w_alt`, `grey_stepped`,
    ///    `grey_smoothed`)
    /// 4. `CENTERX,CENTERY,WIDTH,HEIGHT`
    /// 5. iteration cap
    /// 6. escape radius (an integer)
    ///
    /// The file may stop early; anything it doesn't reach keeps its
    /// default.  A line that is there but doesn't parse fails the
    /// whole load, and nothing from the file is kept.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<RenderConfig, Error> {
        let mut config = RenderConfig::default();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let text = line.trim();
            let number = index + 1;
            match number {
                1 => {
                    config.basename = text
                        .split_whitespace()
                        .next()
                        .ok_or_else(|| line_error(number, "an output name", text))?
                        .to_string();
                }
                2 => {
                    let (w, h) = parse_size(text)
                        .ok_or_else(|| line_error(number, "WIDTHxHEIGHT", text))?;
                    config.width = w;
                    config.height = h;
                }
                3 => {
                    config.scheme = text
                        .parse()
                        .map_err(|_| line_error(number, "a color scheme", text))?;
                }
                4 => {
                    config.viewport = parse_viewport(text)
                        .ok_or_else(|| line_error(number, "CENTERX,CENTERY,WIDTH,HEIGHT", text))?;
                }
                5 => {
                    config.max_iterations = parse_positive(text)
                        .ok_or_else(|| line_error(number, "an iteration count", text))?;
                }
                6 => {
                    config.escape_radius = f64::from(
                        parse_positive(text)
                            .ok_or_else(|| line_error(number, "an escape radius", text))?,
                    );
                }
                _ => break,
            }
        }
        Ok(config)
    }

    /// Builds the configuration from the positional command-line
    /// arguments (program name excluded):
    ///
    /// 1. the iteration cap, or, if it isn't an integer, the path of a
    ///    configuration file.  If the file can't be loaded we warn and
    ///    start again from the defaults.
    /// 2. `CENTERX,CENTERY,WIDTH,HEIGHT`
    /// 3. `WIDTHxHEIGHT`
    /// 4. and on: joined with `_` to form the output base name.
    ///
    /// Arguments 2 and later override whatever the file set.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<RenderConfig, Error> {
        let mut config = RenderConfig::default();

        if let Some(first) = args.get(0).map(|s| s.as_ref()) {
            match i64::from_str(first) {
                Ok(iterations) if iterations > 0 && iterations <= i64::from(u32::max_value()) => {
                    config.max_iterations = iterations as u32;
                }
                Ok(_) => {
                    return Err(Error::Usage {
                        what: "iteration count",
                        input: first.to_string(),
                    });
                }
                Err(_) => {
                    config = RenderConfig::from_file(first).unwrap_or_else(|err| {
                        warn!("{}; using the default configuration", err);
                        RenderConfig::default()
                    });
                }
            }
        }

        if let Some(viewport) = args.get(1).map(|s| s.as_ref()) {
            config.viewport = parse_viewport(viewport).ok_or_else(|| Error::Usage {
                what: "viewport",
                input: viewport.to_string(),
            })?;
        }

        if let Some(size) = args.get(2).map(|s| s.as_ref()) {
            let (w, h) = parse_size(size).ok_or_else(|| Error::Usage {
                what: "image size",
                input: size.to_string(),
            })?;
            config.width = w;
            config.height = h;
        }

        if args.len() > 3 {
            let parts: Vec<&str> = args[3..].iter().map(|s| s.as_ref()).collect();
            config.basename = parts.join("_");
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    fn from_text(text: &str) -> Result<RenderConfig, Error> {
        RenderConfig::from_reader(Cursor::new(text.as_bytes()))
    }

    #[test]
    fn defaults_match_the_documented_values() {
        let c = RenderConfig::default();
        assert_eq!(c.max_iterations, 100);
        assert_eq!(c.escape_radius, 2.0);
        assert_eq!((c.width, c.height), (1000, 1000));
        assert_eq!(c.scheme, ColorScheme::Rgb);
        assert_eq!(c.basename, "mandel");
        assert_eq!(c.viewport, Viewport::new(-0.76, 0.0, 2.48, 2.48).unwrap());
    }

    #[test]
    fn parse_pair_and_size() {
        assert_eq!(parse_pair::<u32>("640x480", 'x'), Some((640, 480)));
        assert_eq!(parse_pair::<u32>("640", 'x'), None);
        assert_eq!(parse_pair::<u32>("640x", 'x'), None);
        assert_eq!(parse_size("10x20"), Some((10, 20)));
        assert_eq!(parse_size("0x20"), None);
        assert_eq!(parse_size("10x-2"), None);
        assert_eq!(parse_size("tenxten"), None);
    }

    #[test]
    fn parse_viewport_needs_four_fields() {
        assert_eq!(
            parse_viewport("-0.5,0,3,3"),
            Viewport::new(-0.5, 0.0, 3.0, 3.0)
        );
        assert!(parse_viewport("-0.5,0,3").is_none());
        assert!(parse_viewport("-0.5,0,3,3,3").is_none());
        assert!(parse_viewport("a,b,c,d").is_none());
        assert!(parse_viewport("0,0,0,3").is_none());
    }

    #[test]
    fn full_file_sets_every_field() {
        let c = from_text("out\n640x480\nb&w_alt\n-0.5,0.1,3,2\n250\n4\n").unwrap();
        assert_eq!(c.basename, "out");
        assert_eq!((c.width, c.height), (640, 480));
        assert_eq!(c.scheme, ColorScheme::BlackWhiteAlternating);
        assert_eq!(c.viewport, Viewport::new(-0.5, 0.1, 3.0, 2.0).unwrap());
        assert_eq!(c.max_iterations, 250);
        assert_eq!(c.escape_radius, 4.0);
    }

    #[test]
    fn short_file_leaves_defaults_in_place() {
        let c = from_text("picture\n20x10\n").unwrap();
        assert_eq!(c.basename, "picture");
        assert_eq!((c.width, c.height), (20, 10));
        assert_eq!(c.scheme, ColorScheme::Rgb);
        assert_eq!(c.max_iterations, 100);
    }

    #[test]
    fn trailing_whitespace_and_extra_lines_are_ignored() {
        let c = from_text("a b\r\n 8x8 \ngrey_smoothed  \n0,0,1,1\n7\n3\nwhatever\n").unwrap();
        assert_eq!(c.basename, "a");
        assert_eq!(c.scheme, ColorScheme::GreySmoothed);
        assert_eq!(c.max_iterations, 7);
    }

    #[test]
    fn bad_scheme_fails_the_load() {
        match from_text("out\n10x10\npurple\n") {
            Err(Error::ConfigLine { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected a line 3 failure, got {:?}", other),
        }
        assert!(from_text("out\n10x10\n\n-0.5,0,3,3\n").is_err());
        // The viewport line has slid into the scheme's place.
        assert!(from_text("out\n10x10\n-0.5,0,3,3\n50\n").is_err());
    }

    #[test]
    fn bad_numbers_fail_the_load() {
        assert!(from_text("out\n10by10\n").is_err());
        assert!(from_text("out\n10x10\nrgb\n1,2\n").is_err());
        assert!(from_text("out\n10x10\nrgb\n0,0,1,1\nmany\n").is_err());
        assert!(from_text("out\n10x10\nrgb\n0,0,1,1\n0\n").is_err());
        assert!(from_text("out\n10x10\nrgb\n0,0,1,1\n10\n2.5\n").is_err());
        assert!(from_text("\n").is_err());
    }

    #[test]
    fn no_arguments_means_defaults() {
        let args: Vec<String> = vec![];
        assert_eq!(RenderConfig::from_args(&args).unwrap(), RenderConfig::default());
    }

    #[test]
    fn positional_arguments_layer_over_defaults() {
        let c = RenderConfig::from_args(&["50", "-0.5,0,3,3", "10x20", "my", "big", "image"])
            .unwrap();
        assert_eq!(c.max_iterations, 50);
        assert_eq!(c.viewport, Viewport::new(-0.5, 0.0, 3.0, 3.0).unwrap());
        assert_eq!((c.width, c.height), (10, 20));
        assert_eq!(c.basename, "my_big_image");
        assert_eq!(c.scheme, ColorScheme::Rgb);
    }

    #[test]
    fn malformed_arguments_are_usage_errors() {
        match RenderConfig::from_args(&["50", "-0.5,0,3"]) {
            Err(Error::Usage { what, .. }) => assert_eq!(what, "viewport"),
            other => panic!("expected a usage error, got {:?}", other),
        }
        match RenderConfig::from_args(&["50", "-0.5,0,3,3", "0x10"]) {
            Err(Error::Usage { what, .. }) => assert_eq!(what, "image size"),
            other => panic!("expected a usage error, got {:?}", other),
        }
        assert!(RenderConfig::from_args(&["-4"]).is_err());
        assert!(RenderConfig::from_args(&["0"]).is_err());
    }

    #[test]
    fn config_file_then_arguments() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "fromfile\n30x40\ngrey_stepped\n0,0,1,1\n77\n").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let c = RenderConfig::from_args(&[path.as_str()]).unwrap();
        assert_eq!(c.basename, "fromfile");
        assert_eq!((c.width, c.height), (30, 40));
        assert_eq!(c.scheme, ColorScheme::GreyStepped);
        assert_eq!(c.max_iterations, 77);

        let c = RenderConfig::from_args(&[path.as_str(), "1,1,2,2", "5x6", "later"]).unwrap();
        assert_eq!(c.scheme, ColorScheme::GreyStepped);
        assert_eq!(c.max_iterations, 77);
        assert_eq!(c.viewport, Viewport::new(1.0, 1.0, 2.0, 2.0).unwrap());
        assert_eq!((c.width, c.height), (5, 6));
        assert_eq!(c.basename, "later");
    }

    #[test]
    fn broken_config_file_falls_back_to_full_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "fromfile\n30x40\nsepia\n").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let c = RenderConfig::from_args(&[path.as_str()]).unwrap();
        assert_eq!(c, RenderConfig::default());

        let c = RenderConfig::from_args(&[path.as_str(), "1,1,2,2"]).unwrap();
        assert_eq!(c.basename, "mandel");
        assert_eq!((c.width, c.height), (1000, 1000));
        assert_eq!(c.viewport, Viewport::new(1.0, 1.0, 2.0, 2.0).unwrap());
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let c = RenderConfig::from_args(&["/no/such/dir/mandel.conf"]).unwrap();
        assert_eq!(c, RenderConfig::default());
        assert!(RenderConfig::from_file("/no/such/dir/mandel.conf").is_err());
    }
}
