//! Solver configuration read from a task document:
//! ```text
//! solver
//!   precision: 6
//!   loglevel: warn
//! graph
//!   x_min: -10
//!   x_max: 10
//!   samples: 400
//!   y_limit: 1000
//! export
//!   directory: results
//! ```
//! Every key is optional and falls back to its default.
use crate::Utils::logger::parse_loglevel;
use crate::Utils::task_parser::{DocumentMap, Value, parse_document_as, template_of};
use crate::numerical::solution::{DEFAULT_PRECISION, MAX_PRECISION};
use std::fs;
use std::path::{Path, PathBuf};

const SOLVER_KEYS: &[&str] = &["precision", "loglevel"];
const GRAPH_KEYS: &[&str] = &["x_min", "x_max", "samples", "y_limit"];
const EXPORT_KEYS: &[&str] = &["directory"];

/// sampling window handed to the graph collaborator
#[derive(Debug, Clone, PartialEq)]
pub struct GraphSettings {
    pub x_min: f64,
    pub x_max: f64,
    pub samples: usize,
    /// points with |y| above this are dropped
    pub y_limit: f64,
}

impl Default for GraphSettings {
    fn default() -> Self {
        GraphSettings {
            x_min: -10.0,
            x_max: 10.0,
            samples: 400,
            y_limit: 1e3,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// decimals used to render roots and steps
    pub precision: usize,
    /// None leaves logging untouched
    pub loglevel: Option<String>,
    pub graph: GraphSettings,
    /// directory for CSV export; None disables export
    pub export: Option<PathBuf>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            precision: DEFAULT_PRECISION,
            loglevel: None,
            graph: GraphSettings::default(),
            export: None,
        }
    }
}

fn single<'a>(doc: &'a DocumentMap, section: &str, key: &str) -> Result<Option<&'a Value>, String> {
    match doc.get(section).and_then(|s| s.get(key)) {
        Some(Some(values)) if values.len() == 1 => Ok(values.first()),
        Some(Some(values)) => Err(format!(
            "{}.{} expects one value, got {}",
            section,
            key,
            values.len()
        )),
        _ => Ok(None),
    }
}

fn float(doc: &DocumentMap, section: &str, key: &str, default: f64) -> Result<f64, String> {
    match single(doc, section, key)? {
        None => Ok(default),
        Some(v) => v
            .as_float()
            .ok_or_else(|| format!("{}.{} must be a number, got '{}'", section, key, v)),
    }
}

fn count(doc: &DocumentMap, section: &str, key: &str, default: usize) -> Result<usize, String> {
    match single(doc, section, key)? {
        None => Ok(default),
        Some(v) => v
            .as_integer()
            .and_then(|i| usize::try_from(i).ok())
            .ok_or_else(|| format!("{}.{} must be a non-negative integer, got '{}'", section, key, v)),
    }
}

impl SolverConfig {
    pub fn from_document(input: &str) -> Result<Self, String> {
        let template = template_of(&[
            ("solver", SOLVER_KEYS),
            ("graph", GRAPH_KEYS),
            ("export", EXPORT_KEYS),
        ]);
        let doc = parse_document_as(input, Some(&template))?;
        let defaults = SolverConfig::default();

        let loglevel = match single(&doc, "solver", "loglevel")? {
            None => None,
            Some(v) => {
                let level = v
                    .as_string()
                    .ok_or_else(|| format!("solver.loglevel must be a level name, got '{}'", v))?;
                parse_loglevel(level)?;
                Some(level.to_string())
            }
        };
        let graph = GraphSettings {
            x_min: float(&doc, "graph", "x_min", defaults.graph.x_min)?,
            x_max: float(&doc, "graph", "x_max", defaults.graph.x_max)?,
            samples: count(&doc, "graph", "samples", defaults.graph.samples)?,
            y_limit: float(&doc, "graph", "y_limit", defaults.graph.y_limit)?,
        };
        if graph.x_min >= graph.x_max {
            return Err(format!(
                "graph.x_min ({}) must be below graph.x_max ({})",
                graph.x_min, graph.x_max
            ));
        }
        if graph.samples < 2 {
            return Err("graph.samples must be at least 2".to_string());
        }
        let export = single(&doc, "export", "directory")?.map(|v| PathBuf::from(v.to_string()));

        Ok(SolverConfig {
            precision: count(&doc, "solver", "precision", defaults.precision)?.min(MAX_PRECISION),
            loglevel,
            graph,
            export,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, String> {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        Self::from_document(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_for_missing_keys() {
        let config = SolverConfig::from_document("solver\n precision: 6").unwrap();
        assert_eq!(config.precision, 6);
        assert_eq!(config.loglevel, None);
        assert_eq!(config.graph, GraphSettings::default());
        assert_eq!(config.export, None);
        assert_eq!(SolverConfig::from_document("").unwrap(), SolverConfig::default());
    }

    #[test]
    fn test_full_document() {
        let doc = "solver\n  precision: 2\n  loglevel: warn\ngraph\n  x_min: -2.5\n  x_max: 4\n  samples: 50\n  y_limit: 100\nexport\n  directory: results";
        let config = SolverConfig::from_document(doc).unwrap();
        assert_eq!(config.precision, 2);
        assert_eq!(config.loglevel.as_deref(), Some("warn"));
        assert_eq!(config.graph.x_min, -2.5);
        assert_eq!(config.graph.x_max, 4.0);
        assert_eq!(config.graph.samples, 50);
        assert_eq!(config.export, Some(PathBuf::from("results")));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(SolverConfig::from_document("solver\n loglevel: loud").is_err());
        assert!(SolverConfig::from_document("solver\n precision: -1").is_err());
        assert!(SolverConfig::from_document("graph\n x_min: 5\n x_max: 1").is_err());
        assert!(SolverConfig::from_document("graph\n x_min: low").is_err());
        assert!(SolverConfig::from_document("graph\n samples: 10, 20").is_err());
        assert!(SolverConfig::from_document("solver\n loglevel: 3").is_err());
    }

    #[test]
    fn test_precision_is_clamped() {
        let config = SolverConfig::from_document("solver\n precision: 400").unwrap();
        assert_eq!(config.precision, MAX_PRECISION);
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# calculator settings\nsolver\n  precision: 3").unwrap();
        let config = SolverConfig::from_file(file.path()).unwrap();
        assert_eq!(config.precision, 3);
        assert!(SolverConfig::from_file(Path::new("no/such/settings.txt")).is_err());
    }
}
