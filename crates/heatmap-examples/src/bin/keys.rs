// File: crates/heatmap-examples/src/bin/keys.rs
// Summary: Minimal example: a 2x3 grid of labelled sensor readings rendered with a key overlay.

use heatmap_core::{HeatMapChart, InputMessage, RenderOptions, WidgetConfig};
use serde_json::json;

fn main() {
    // Column-major: first column top to bottom, then the next
    let msg = InputMessage::from_value(&json!({
        "payload": [
            {"hall": 18.5}, {"cellar": 12.0},
            {"kitchen": 23.1}, {"garage": 9.4},
            {"office": 21.0}, {"attic": 27.8},
        ],
        "rows": 2,
        "columns": 3,
    }))
    .expect("valid message");

    let config = WidgetConfig::from_value(json!({
        "gridType": "keys",
        "legendType": "vals",
        "legendCount": 4,
        "radius": 60,
    }))
    .expect("valid config");

    let mut opts = RenderOptions::default();
    opts.width = 480;
    opts.height = 320;
    let out = std::path::PathBuf::from("target/out/example_keys.png");
    std::fs::create_dir_all(out.parent().unwrap()).unwrap();
    HeatMapChart::new(config).render_to_png(&msg, &opts, &out).expect("render to png");
    println!("Wrote {}", out.display());
}
