//! Lookup over upstream aspect lists.
//!
//! Aspects arrive directed (`planet1 → planet2`) and name their endpoints
//! as free-form strings ("Sun", "ascendant", "Part of Fortune"). Queries
//! here treat every edge as undirected and compare endpoint names through
//! [`point_key`].

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Aspect type parsed from the upstream aspect name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
    /// Any other (minor) aspect, keyed by its original name.
    Other(String),
}

impl AspectKind {
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "conjunction" | "conjunct" => Self::Conjunction,
            "sextile" => Self::Sextile,
            "square" => Self::Square,
            "trine" => Self::Trine,
            "opposition" | "opposite" => Self::Opposition,
            _ => Self::Other(name.trim().to_string()),
        }
    }

    /// One of the five aspects recognised by Ptolemy.
    pub fn is_ptolemaic(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Conjunction => "Conjunction",
            Self::Sextile => "Sextile",
            Self::Square => "Square",
            Self::Trine => "Trine",
            Self::Opposition => "Opposition",
            Self::Other(name) => name,
        }
    }
}

impl Display for AspectKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One aspect as supplied upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectEdge {
    pub planet1: String,
    pub planet2: String,
    #[serde(alias = "aspect")]
    pub aspect_name: String,
    #[serde(default)]
    pub angle: f64,
    pub orb: f64,
    #[serde(default)]
    pub applying: bool,
}

impl AspectEdge {
    pub fn kind(&self) -> AspectKind {
        AspectKind::parse(&self.aspect_name)
    }

    /// Whether this edge joins `a` and `b` in either direction.
    pub fn joins(&self, a: &str, b: &str) -> bool {
        let (k1, k2) = (point_key(&self.planet1), point_key(&self.planet2));
        let (ka, kb) = (point_key(a), point_key(b));
        (k1 == ka && k2 == kb) || (k1 == kb && k2 == ka)
    }

    /// The other endpoint if `point` is one of the two, else None.
    pub fn other_end(&self, point: &str) -> Option<&str> {
        let key = point_key(point);
        if point_key(&self.planet1) == key {
            Some(&self.planet2)
        } else if point_key(&self.planet2) == key {
            Some(&self.planet1)
        } else {
            None
        }
    }
}

/// Canonical comparison key for a chart point name.
///
/// Lowercase ASCII alphanumerics only, with common aliases folded:
/// `asc` → `ascendant`, `fortune`/`pof`/`lot of fortune` → `partoffortune`,
/// `syzygy` → `prenatalsyzygy`.
pub fn point_key(name: &str) -> String {
    let key: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    match key.as_str() {
        "asc" => "ascendant".to_string(),
        "fortune" | "pof" | "lotoffortune" => "partoffortune".to_string(),
        "syzygy" => "prenatalsyzygy".to_string(),
        _ => key,
    }
}

/// Aspects touching one point, seen from that point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointAspect {
    pub other: String,
    pub kind: AspectKind,
    pub orb: f64,
    pub applying: bool,
}

/// Query wrapper around an upstream aspect list.
#[derive(Debug, Clone, Copy)]
pub struct AspectSet<'a> {
    edges: &'a [AspectEdge],
}

impl<'a> AspectSet<'a> {
    pub fn new(edges: &'a [AspectEdge]) -> Self {
        Self { edges }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Tightest aspect between `a` and `b`, in either direction.
    pub fn between(&self, a: &str, b: &str) -> Option<&'a AspectEdge> {
        self.edges
            .iter()
            .filter(|e| e.joins(a, b))
            .min_by(|x, y| x.orb.abs().total_cmp(&y.orb.abs()))
    }

    /// Tightest Ptolemaic aspect between `a` and `b`.
    pub fn ptolemaic_between(&self, a: &str, b: &str) -> Option<&'a AspectEdge> {
        self.edges
            .iter()
            .filter(|e| e.joins(a, b) && e.kind().is_ptolemaic())
            .min_by(|x, y| x.orb.abs().total_cmp(&y.orb.abs()))
    }

    /// Every aspect touching `point`, one entry per edge, in input order.
    pub fn aspects_to(&self, point: &str) -> Vec<PointAspect> {
        self.edges
            .iter()
            .filter_map(|e| {
                e.other_end(point).map(|other| PointAspect {
                    other: other.to_string(),
                    kind: e.kind(),
                    orb: e.orb.abs(),
                    applying: e.applying,
                })
            })
            .collect()
    }
}
