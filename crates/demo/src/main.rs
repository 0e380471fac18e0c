// File: crates/demo/src/main.rs
// Summary: Demo loads a grid (JSON message or CSV) plus optional widget config and renders a heat map PNG.

use anyhow::{Context, Result};
use heatmap_core::value::from_numbers;
use heatmap_core::{HeatMapChart, InputMessage, RenderOptions, WidgetConfig};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let input = args.next();
    let config_path = args.next();

    let (msg, stem) = match input.as_deref() {
        Some(raw) => {
            let path = Path::new(raw);
            let msg = load_message(path).with_context(|| format!("failed to load grid '{}'", path.display()))?;
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("grid").to_string();
            (msg, stem)
        }
        None => {
            info!("no input given, rendering a synthetic 12x16 grid");
            (sample_message(12, 16), "sample".to_string())
        }
    };

    let config = match config_path.as_deref() {
        Some(p) => {
            let text = std::fs::read_to_string(p).with_context(|| format!("reading config {p}"))?;
            WidgetConfig::from_json(&text).with_context(|| format!("parsing config {p}"))?
        }
        None => WidgetConfig::from_value(serde_json::json!({
            "gridType": "vals",
            "legendType": "vals",
            "legendCount": 5,
            "legendDecimals": 1,
        }))?,
    };

    let (rows, columns) = msg.resolve_dimensions(&config)?;
    info!(rows, columns, cells = msg.payload.len(), "grid loaded");
    if msg.payload.len() != rows * columns {
        warn!("payload length does not match rows x columns, the render will be rejected");
    }

    let chart = HeatMapChart::new(config);
    let opts = RenderOptions::default();
    let out = out_name(&stem);
    chart.render_to_png(&msg, &opts, &out)?;
    info!(path = %out.display(), "wrote heat map");
    Ok(())
}

fn load_message(path: &Path) -> Result<InputMessage> {
    let ext = path.extension().map(|e| e.to_string_lossy().to_lowercase()).unwrap_or_default();
    match ext.as_str() {
        "json" => {
            let text = std::fs::read_to_string(path)?;
            Ok(InputMessage::from_json(&text)?)
        }
        "csv" => load_grid_csv(path),
        other => anyhow::bail!("unsupported input extension '{other}' (expected .json or .csv)"),
    }
}

/// Each CSV record is one grid row; cells are reordered column-major for the mapper.
fn load_grid_csv(path: &Path) -> Result<InputMessage> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let mut grid: Vec<Vec<f64>> = Vec::new();
    for (r, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let row = rec
            .iter()
            .enumerate()
            .map(|(c, s)| s.parse::<f64>().with_context(|| format!("row {} column {}: '{s}' is not a number", r + 1, c + 1)))
            .collect::<Result<Vec<_>>>()?;
        grid.push(row);
    }
    if grid.is_empty() {
        anyhow::bail!("no rows loaded, check the delimiter.");
    }

    let rows = grid.len();
    let columns = grid[0].len();
    let mut column_major = Vec::with_capacity(rows * columns);
    for c in 0..columns {
        for row in &grid {
            column_major.push(row[c]);
        }
    }
    Ok(InputMessage::new(from_numbers(&column_major)).with_dimensions(rows, columns))
}

/// Two warm spots on a cool field.
fn sample_message(rows: usize, columns: usize) -> InputMessage {
    let spot = |c: f64, r: f64, cc: f64, rr: f64| (-((c - cc).powi(2) + (r - rr).powi(2)) / 8.0).exp();
    let mut values = Vec::with_capacity(rows * columns);
    for c in 0..columns {
        for r in 0..rows {
            let (c, r) = (c as f64, r as f64);
            values.push(20.0 + 60.0 * spot(c, r, 4.0, 3.0) + 40.0 * spot(c, r, 11.0, 8.0));
        }
    }
    InputMessage::new(from_numbers(&values)).with_dimensions(rows, columns)
}

/// Produce output file name like target/out/heatmap_<stem>.png
fn out_name(stem: &str) -> PathBuf {
    let mut out = PathBuf::from("target/out");
    std::fs::create_dir_all(&out).ok();
    out.push(format!("heatmap_{stem}.png"));
    out
}
