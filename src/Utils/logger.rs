use crate::numerical::solution::Solution;
use chrono::Local;
use csv::Writer;
use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};
use std::fs::File;
use std::io;
use std::path::Path;

/// "debug" | "info" | "warn" | "error" | "off" | "none"
pub fn parse_loglevel(loglevel: &str) -> Result<LevelFilter, String> {
    match loglevel.trim().to_lowercase().as_str() {
        "debug" => Ok(LevelFilter::Debug),
        "info" => Ok(LevelFilter::Info),
        "warn" => Ok(LevelFilter::Warn),
        "error" => Ok(LevelFilter::Error),
        "off" | "none" => Ok(LevelFilter::Off),
        other => Err(format!(
            "loglevel must be debug, info, warn, error, off or none, got '{}'",
            other
        )),
    }
}

/// Starts the terminal logger. Returns false when logging is off or a logger
/// was already installed by an earlier call.
pub fn init_logger(loglevel: &str) -> Result<bool, String> {
    let level = parse_loglevel(loglevel)?;
    if level == LevelFilter::Off {
        return Ok(false);
    }
    let logger_instance = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
    Ok(logger_instance.is_ok())
}

/// file name stamped with the current date and time
pub fn default_export_name() -> String {
    let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
    format!("solutions_{}.csv", date_and_time)
}

/// one row per solution: equation, index, x, y, type, multiplicity
pub fn save_solutions_to_csv(
    solutions: &[Solution],
    equation: &str,
    filename: &Path,
) -> io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);
    writer.write_record(["equation", "index", "x", "y", "type", "multiplicity"])?;
    for (i, s) in solutions.iter().enumerate() {
        writer.write_record([
            equation.to_string(),
            (i + 1).to_string(),
            s.x_text(),
            s.y_text().unwrap_or_default(),
            s.kind.to_string(),
            s.multiplicity.map(|m| m.to_string()).unwrap_or_default(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::solution::StepRecorder;
    use tempfile::tempdir;

    #[test]
    fn test_parse_loglevel() {
        assert_eq!(parse_loglevel("debug"), Ok(LevelFilter::Debug));
        assert_eq!(parse_loglevel(" WARN "), Ok(LevelFilter::Warn));
        assert_eq!(parse_loglevel("none"), Ok(LevelFilter::Off));
        assert!(parse_loglevel("verbose").is_err());
    }

    #[test]
    fn test_logging_off_installs_nothing() {
        assert_eq!(init_logger("off"), Ok(false));
    }

    #[test]
    fn test_default_export_name() {
        let name = default_export_name();
        assert!(name.starts_with("solutions_") && name.ends_with(".csv"));
    }

    #[test]
    fn test_save_solutions_to_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("roots.csv");
        let rec = StepRecorder::default();
        let sols = rec.attach(vec![
            Solution::complex(0.0, 1.0),
            Solution::system(2.0, 1.0),
            Solution::real(-1.0).with_multiplicity(2),
        ]);
        save_solutions_to_csv(&sols, "x²+1=0", &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), vec!["equation", "index", "x", "y", "type", "multiplicity"]);
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][2], "0 + 1i");
        assert_eq!(&rows[0][4], "complex");
        assert_eq!(&rows[1][3], "1");
        assert_eq!(&rows[2][5], "2");
    }
}
