//! JSON pointer parsing and resolution against the planet record shapes.
//!
//! A pointer such as `/Moons/0/Weather/Temperature` is first split into
//! unescaped tokens and then resolved step by step against the known
//! shapes, so field names are canonicalised (`Weather` → `weather`) and
//! sequence tokens become indices before anything touches the document.

use serde_json::Value;

use super::error::OperationError;

/// Parsed, unescaped JSON pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPointer {
    raw: String,
    tokens: Vec<String>,
}

impl JsonPointer {
    pub fn parse(raw: &str) -> Result<Self, OperationError> {
        if raw.is_empty() {
            return Ok(Self {
                raw: String::new(),
                tokens: Vec::new(),
            });
        }
        let Some(rest) = raw.strip_prefix('/') else {
            return Err(OperationError::InvalidPointer {
                pointer: raw.to_string(),
                reason: "must be empty or start with '/'".to_string(),
            });
        };
        let tokens = rest
            .split('/')
            .map(|token| unescape(token).ok_or_else(|| OperationError::InvalidPointer {
                pointer: raw.to_string(),
                reason: format!("invalid escape in '{}'", token),
            }))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            raw: raw.to_string(),
            tokens,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }
}

fn unescape(token: &str) -> Option<String> {
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars();
    while let Some(c) = chars.next() {
        if c == '~' {
            match chars.next() {
                Some('0') => out.push('~'),
                Some('1') => out.push('/'),
                _ => return None,
            }
        } else {
            out.push(c);
        }
    }
    Some(out)
}

/// Record and value shapes a pointer can walk through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Planet,
    Moon,
    Weather,
    Moons,
    Integer,
    Text,
    Number,
}

const PLANET_FIELDS: &[(&str, Shape)] = &[
    ("id", Shape::Integer),
    ("name", Shape::Text),
    ("weather", Shape::Weather),
    ("moons", Shape::Moons),
];

const MOON_FIELDS: &[(&str, Shape)] = &[
    ("id", Shape::Integer),
    ("name", Shape::Text),
    ("weather", Shape::Weather),
];

const WEATHER_FIELDS: &[(&str, Shape)] = &[
    ("condition", Shape::Text),
    ("temperature", Shape::Number),
];

impl Shape {
    /// Whether `value` has the JSON type this shape is stored as.
    ///
    /// Records only need to be objects here; their members are checked when
    /// the patched planet is validated as a whole.
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            Shape::Planet | Shape::Moon | Shape::Weather => value.is_object(),
            Shape::Moons => value.is_array(),
            Shape::Integer => value
                .as_i64()
                .is_some_and(|n| i32::try_from(n).is_ok()),
            Shape::Text => value.is_string(),
            Shape::Number => value.is_number(),
        }
    }

    /// Human-readable type name used in error messages.
    pub fn expected(self) -> &'static str {
        match self {
            Shape::Planet => "a planet object",
            Shape::Moon => "a moon object",
            Shape::Weather => "a weather object",
            Shape::Moons => "an array of moons",
            Shape::Integer => "a 32-bit integer",
            Shape::Text => "a string",
            Shape::Number => "a number",
        }
    }

    fn fields(self) -> Option<&'static [(&'static str, Shape)]> {
        match self {
            Shape::Planet => Some(PLANET_FIELDS),
            Shape::Moon => Some(MOON_FIELDS),
            Shape::Weather => Some(WEATHER_FIELDS),
            _ => None,
        }
    }
}

/// One resolved step of a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Canonical field name of a record
    Field(&'static str),
    /// Position in a sequence
    Index(usize),
    /// The `-` token: one past the end of a sequence
    Append,
}

/// A pointer resolved against [`Shape::Planet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub steps: Vec<Step>,
    pub shape: Shape,
}

impl ResolvedPath {
    /// Whether `self` is a strict descendant of `other`.
    pub fn is_inside(&self, other: &ResolvedPath) -> bool {
        self.steps.len() > other.steps.len() && self.steps.starts_with(&other.steps)
    }
}

/// Resolve `pointer` against the planet shape.
///
/// `-` is only accepted as the final token; callers decide whether an
/// append target makes sense for their operation.
pub fn resolve(pointer: &JsonPointer) -> Result<ResolvedPath, OperationError> {
    let mut shape = Shape::Planet;
    let mut steps = Vec::with_capacity(pointer.tokens().len());
    let last = pointer.tokens().len().saturating_sub(1);

    for (i, token) in pointer.tokens().iter().enumerate() {
        if let Some(fields) = shape.fields() {
            let (name, next) = fields
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(token))
                .copied()
                .ok_or_else(|| OperationError::UnknownField {
                    path: pointer.as_str().to_string(),
                    field: token.clone(),
                })?;
            steps.push(Step::Field(name));
            shape = next;
        } else if shape == Shape::Moons {
            let step = parse_index(token).ok_or_else(|| OperationError::InvalidIndex {
                path: pointer.as_str().to_string(),
                token: token.clone(),
            })?;
            if step == Step::Append && i != last {
                return Err(OperationError::InvalidIndex {
                    path: pointer.as_str().to_string(),
                    token: token.clone(),
                });
            }
            steps.push(step);
            shape = Shape::Moon;
        } else {
            return Err(OperationError::UnknownField {
                path: pointer.as_str().to_string(),
                field: token.clone(),
            });
        }
    }

    Ok(ResolvedPath { steps, shape })
}

fn parse_index(token: &str) -> Option<Step> {
    if token == "-" {
        return Some(Step::Append);
    }
    let valid = !token.is_empty()
        && token.bytes().all(|b| b.is_ascii_digit())
        && (token == "0" || !token.starts_with('0'));
    if !valid {
        return None;
    }
    token.parse().ok().map(Step::Index)
}
