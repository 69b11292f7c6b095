//! CSV export of temperature series.
//!
//! The file has one `time` column followed by one column per series, labelled
//! like the chart legend, and one row per time grid point.

use crate::chart::{ChartSettings, LineChart};
use crate::scenarios::{collect_series, ScenarioOutcome, Series};
use log::info;
use radex_core::errors::{RadexError, RadexResult};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const FULL_CHART_FILE: &str = "fullGraph.svg";
pub const ZOOM_CHART_FILE: &str = "zoom.svg";
pub const CSV_FILE: &str = "trajectories.csv";

fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

/// Write `series` as CSV columns against their shared time axis.
///
/// All series must have the same length as the time axis of the first series.
pub fn write_series_csv<W: Write>(out: &mut W, series: &[Series]) -> RadexResult<()> {
    let Some(first) = series.first() else {
        writeln!(out, "time")?;
        return Ok(());
    };
    let times = first.times;

    if let Some(bad) = series
        .iter()
        .find(|s| s.values.len() != times.len() || s.times.len() != times.len())
    {
        return Err(RadexError::Error(format!(
            "series {} has {} samples, expected {}",
            bad.label,
            bad.values.len(),
            times.len()
        )));
    }

    let header: Vec<String> = series.iter().map(|s| csv_field(s.label)).collect();
    writeln!(out, "time,{}", header.join(","))?;

    for (i, t) in times.iter().enumerate() {
        write!(out, "{}", t)?;
        for s in series {
            write!(out, ",{}", s.values[i])?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_csv_file(path: &Path, series: &[Series]) -> RadexResult<()> {
    let mut out = BufWriter::new(fs::File::create(path)?);
    write_series_csv(&mut out, series)?;
    out.flush()?;
    info!("wrote {}", path.display());
    Ok(())
}

/// Write the full and zoomed charts, and optionally the CSV, into `output_dir`.
///
/// Returns the paths written, in that order.
pub fn write_artifacts(
    outcomes: &[ScenarioOutcome],
    settings: &ChartSettings,
    output_dir: &Path,
    include_csv: bool,
) -> RadexResult<Vec<PathBuf>> {
    let series = collect_series(outcomes);
    let mut written = Vec::with_capacity(3);

    let full = LineChart::new(series.clone(), settings);
    let path = output_dir.join(FULL_CHART_FILE);
    full.write_svg(&path)?;
    written.push(path);

    let [t_min, t_max] = settings.zoom_time;
    let [y_min, y_max] = settings.zoom_temperature;
    let zoom = LineChart::new(series.clone(), settings)
        .with_x_range(t_min, t_max)
        .with_y_range(y_min, y_max);
    let path = output_dir.join(ZOOM_CHART_FILE);
    zoom.write_svg(&path)?;
    written.push(path);

    if include_csv {
        let path = output_dir.join(CSV_FILE);
        write_csv_file(&path, &series)?;
        written.push(path);
    }

    Ok(written)
}
