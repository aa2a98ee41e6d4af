//! Region descriptors and their parser.
//!
//! A region can be written in several forms:
//!
//! - `xmin/xmax/ymin/ymax`, or a list of four numbers
//! - `lon0/lat0/lon1/lat1+r` for bottom-left/top-right corners
//! - `d` or `g` for the whole globe
//! - a two-letter ISO 3166-1 alpha-2 code such as `JP`
//!
//! Any of these may end in one expansion modifier, `+r<inc>`, `+R<inc>` or
//! `+e<inc>`, where `<inc>` is one, two or four `/`-separated increments.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{GeoRegionError, Result};

/// Whole-globe shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GlobalShortcut {
    /// Longitude -180 to 180, centered on the prime meridian
    D,
    /// Longitude 0 to 360, centered on the dateline
    G,
}

impl GlobalShortcut {
    /// Longitude the shortcut's map is centered on by default
    pub fn center_longitude(&self) -> f64 {
        match self {
            GlobalShortcut::D => 0.0,
            GlobalShortcut::G => 180.0,
        }
    }

    /// Bounds in west, east, south, north order
    pub fn bounds(&self) -> [f64; 4] {
        match self {
            GlobalShortcut::D => [-180.0, 180.0, -90.0, 90.0],
            GlobalShortcut::G => [0.0, 360.0, -90.0, 90.0],
        }
    }
}

/// How an expansion modifier pads the base region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpansionMode {
    /// `+r`: round outward to multiples of the increment
    RoundedAll,
    /// `+e`: round outward, padding at least a quarter increment per side
    RoundedAsymmetric,
    /// `+R`: pad by exactly the increment
    Unrounded,
}

impl ExpansionMode {
    fn from_flag(flag: char) -> Option<Self> {
        match flag {
            'r' => Some(ExpansionMode::RoundedAll),
            'e' => Some(ExpansionMode::RoundedAsymmetric),
            'R' => Some(ExpansionMode::Unrounded),
            _ => None,
        }
    }

    fn flag(&self) -> char {
        match self {
            ExpansionMode::RoundedAll => 'r',
            ExpansionMode::RoundedAsymmetric => 'e',
            ExpansionMode::Unrounded => 'R',
        }
    }
}

/// Per-side increments for an expansion modifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Increments {
    pub west: f64,
    pub east: f64,
    pub south: f64,
    pub north: f64,
}

impl Increments {
    /// Build increments from one (all sides), two (x, y) or four (w, e, s, n) values
    pub fn from_values(values: &[f64]) -> Result<Self> {
        if let Some(bad) = values.iter().find(|v| !v.is_finite() || **v <= 0.0) {
            return Err(GeoRegionError::invalid_region(format!(
                "increment must be a positive number, got {}",
                bad
            )));
        }

        match *values {
            [all] => Ok(Self {
                west: all,
                east: all,
                south: all,
                north: all,
            }),
            [x, y] => Ok(Self {
                west: x,
                east: x,
                south: y,
                north: y,
            }),
            [west, east, south, north] => Ok(Self {
                west,
                east,
                south,
                north,
            }),
            _ => Err(GeoRegionError::invalid_region(format!(
                "expected 1, 2 or 4 increments, got {}",
                values.len()
            ))),
        }
    }

    /// Increments in west, east, south, north order
    pub fn to_array(&self) -> [f64; 4] {
        [self.west, self.east, self.south, self.north]
    }
}

/// A parsed, not yet resolved, region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RegionDescriptor {
    Coordinates {
        xmin: f64,
        xmax: f64,
        ymin: f64,
        ymax: f64,
    },
    CornerPair {
        lon0: f64,
        lat0: f64,
        lon1: f64,
        lat1: f64,
    },
    Global(GlobalShortcut),
    /// Upper-case ISO 3166-1 alpha-2 code
    IsoCode(String),
    Expansion {
        base: Box<RegionDescriptor>,
        mode: ExpansionMode,
        increments: Increments,
    },
}

/// Raw region input as it arrives in JSON: a descriptor string or a list of numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RegionInput {
    Text(String),
    Values(Vec<f64>),
}

impl RegionInput {
    pub fn to_descriptor(&self) -> Result<RegionDescriptor> {
        match self {
            RegionInput::Text(text) => text.parse(),
            RegionInput::Values(values) => RegionDescriptor::from_values(values),
        }
    }
}

impl fmt::Display for RegionInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionInput::Text(text) => f.write_str(text),
            RegionInput::Values(values) => {
                let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}

impl RegionDescriptor {
    /// Interpret a list of exactly four numbers as `xmin, xmax, ymin, ymax`
    pub fn from_values(values: &[f64]) -> Result<Self> {
        match *values {
            [xmin, xmax, ymin, ymax] => {
                if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
                    return Err(GeoRegionError::invalid_region(format!(
                        "region bounds must be finite, got {}",
                        bad
                    )));
                }
                Ok(RegionDescriptor::Coordinates {
                    xmin,
                    xmax,
                    ymin,
                    ymax,
                })
            }
            _ => Err(GeoRegionError::invalid_region(format!(
                "expected 4 region bounds, got {}",
                values.len()
            ))),
        }
    }

    /// The descriptor without any expansion modifier
    pub fn base(&self) -> &RegionDescriptor {
        match self {
            RegionDescriptor::Expansion { base, .. } => base.base(),
            other => other,
        }
    }
}

impl FromStr for RegionDescriptor {
    type Err = GeoRegionError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(GeoRegionError::invalid_region("empty region"));
        }

        let (base_str, modifiers) = split_modifiers(s);
        if base_str.is_empty() {
            return Err(GeoRegionError::invalid_region(format!(
                "missing region before modifier in '{}'",
                s
            )));
        }

        let mut corner_mode = false;
        let mut expansion: Option<(ExpansionMode, Increments)> = None;

        for modifier in modifiers {
            let mut chars = modifier.chars();
            let flag = chars.next().unwrap_or_default();
            let args = chars.as_str();

            let mode = ExpansionMode::from_flag(flag).ok_or_else(|| {
                GeoRegionError::invalid_region(format!("unknown region modifier '+{}'", modifier))
            })?;

            // A bare `+r` is the corner flag and may sit before or after the expansion
            if mode == ExpansionMode::RoundedAll && args.is_empty() {
                if corner_mode {
                    return Err(GeoRegionError::invalid_region(
                        "repeated corner modifier '+r'",
                    ));
                }
                corner_mode = true;
                continue;
            }

            if expansion.is_some() {
                return Err(GeoRegionError::invalid_region(format!(
                    "only one expansion modifier is allowed, found extra '+{}'",
                    modifier
                )));
            }

            let values = parse_numbers(args, &format!("+{}", modifier))?;
            expansion = Some((mode, Increments::from_values(&values)?));
        }

        let base = parse_base(base_str, corner_mode)?;

        Ok(match expansion {
            Some((mode, increments)) => RegionDescriptor::Expansion {
                base: Box::new(base),
                mode,
                increments,
            },
            None => base,
        })
    }
}

impl fmt::Display for RegionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionDescriptor::Coordinates {
                xmin,
                xmax,
                ymin,
                ymax,
            } => write!(f, "{}/{}/{}/{}", xmin, xmax, ymin, ymax),
            RegionDescriptor::CornerPair {
                lon0,
                lat0,
                lon1,
                lat1,
            } => write!(f, "{}/{}/{}/{}+r", lon0, lat0, lon1, lat1),
            RegionDescriptor::Global(GlobalShortcut::D) => f.write_str("d"),
            RegionDescriptor::Global(GlobalShortcut::G) => f.write_str("g"),
            RegionDescriptor::IsoCode(code) => f.write_str(code),
            RegionDescriptor::Expansion {
                base,
                mode,
                increments,
            } => {
                let [w, e, s, n] = increments.to_array();
                write!(f, "{}+{}", base, mode.flag())?;
                if w == e && s == n && w == s {
                    write!(f, "{}", w)
                } else if w == e && s == n {
                    write!(f, "{}/{}", w, s)
                } else {
                    write!(f, "{}/{}/{}/{}", w, e, s, n)
                }
            }
        }
    }
}

/// Split `s` at every `+` that starts a modifier (a `+` followed by a letter).
///
/// A `+` followed by a digit belongs to a number such as `1e+2`.
fn split_modifiers(s: &str) -> (&str, Vec<&str>) {
    let starts: Vec<usize> = s
        .char_indices()
        .filter(|&(i, c)| {
            c == '+'
                && s[i + 1..]
                    .chars()
                    .next()
                    .is_some_and(|next| next.is_ascii_alphabetic())
        })
        .map(|(i, _)| i)
        .collect();

    let Some(&first) = starts.first() else {
        return (s, Vec::new());
    };

    let modifiers = starts
        .iter()
        .enumerate()
        .map(|(n, &start)| {
            let end = starts.get(n + 1).copied().unwrap_or(s.len());
            &s[start + 1..end]
        })
        .collect();

    (&s[..first], modifiers)
}

fn parse_base(base: &str, corner_mode: bool) -> Result<RegionDescriptor> {
    let base = base.trim();
    if base.contains('/') {
        let values = parse_numbers(base, base)?;
        let &[a, b, c, d] = values.as_slice() else {
            return Err(GeoRegionError::invalid_region(format!(
                "expected 4 '/'-separated bounds in '{}', got {}",
                base,
                values.len()
            )));
        };

        return Ok(if corner_mode {
            RegionDescriptor::CornerPair {
                lon0: a,
                lat0: b,
                lon1: c,
                lat1: d,
            }
        } else {
            RegionDescriptor::Coordinates {
                xmin: a,
                xmax: b,
                ymin: c,
                ymax: d,
            }
        });
    }

    let descriptor = match base {
        "d" => RegionDescriptor::Global(GlobalShortcut::D),
        "g" => RegionDescriptor::Global(GlobalShortcut::G),
        code if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) => {
            RegionDescriptor::IsoCode(code.to_ascii_uppercase())
        }
        other => {
            return Err(GeoRegionError::invalid_region(format!(
                "unrecognized region '{}'",
                other
            )))
        }
    };

    if corner_mode {
        return Err(GeoRegionError::invalid_region(format!(
            "corner modifier '+r' needs four coordinates, got '{}'",
            base
        )));
    }

    Ok(descriptor)
}

/// Parse `/`-separated finite numbers; `context` names the token in errors
fn parse_numbers(s: &str, context: &str) -> Result<Vec<f64>> {
    s.split('/')
        .map(|part| {
            let part = part.trim();
            part.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| {
                    GeoRegionError::invalid_region(format!(
                        "invalid number '{}' in '{}'",
                        part, context
                    ))
                })
        })
        .collect()
}
