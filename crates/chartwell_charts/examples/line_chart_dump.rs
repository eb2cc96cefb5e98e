//! chartwell_charts Line Chart Dump
//!
//! Draws a line chart into a recording context and prints the resulting
//! layout and paint commands.
//!
//! Run with:
//! `cargo run -p chartwell_charts --example line_chart_dump`
//!
//! Optional:
//! - `CHARTWELL_CONFIG` path to a chart TOML file
//! - `RUST_LOG` tracing filter (e.g. `chartwell_charts=debug`)

use std::sync::Arc;

use anyhow::{Context, Result};
use chartwell_charts::prelude::*;
use chartwell_paint::PaintCommand;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut chart = LineChart::new();
    chart.set_redraw_handle(Arc::new(|| tracing::trace!("redraw requested")));
    chart.set_title("Requests per second");
    chart.x_axis.set_label("minute");
    chart.y_axis.set_label("req/s");
    chart.legend.set_visible(true);
    chart.set_y_extension(Extension::new(0.0, 0.1));

    let wave: Vec<(f64, f64)> = (0..60)
        .map(|i| {
            let t = i as f64;
            (t, 120.0 + 40.0 * (t / 6.0).sin())
        })
        .collect();
    let baseline = Series::from_points("baseline", &[(0.0, 100.0), (59.0, 100.0)]);
    let mut traffic = Series::from_points("traffic", &wave);
    traffic.set_point_style(PointStyle::None);
    traffic.set_fill_to(FillTo::Constant(100.0));

    let mut spikes = Series::from_points("spikes", &[(12.0, 175.0), (31.0, 190.0)]);
    spikes.set_line_style(LineStyle::None);
    spikes.set_point_style(PointStyle::Diamond);
    spikes.set_point_size(5.0)?;

    chart.add_series(baseline);
    chart.add_series(traffic);
    chart.add_series(spikes);

    if let Ok(path) = std::env::var("CHARTWELL_CONFIG") {
        let config = ChartConfig::load(&path)
            .with_context(|| format!("failed to load chart config {path}"))?;
        chart
            .apply_config(&config)
            .context("failed to apply chart config")?;
    }

    chart.connect_point_clicked(|series, point| {
        println!(
            "clicked {} #{} at ({}, {})",
            series.name(),
            point.index,
            point.x,
            point.y
        );
    });

    let mut ctx = PaintContext::new();
    chart.draw(&mut ctx, Rect::new(0.0, 0.0, 800.0, 500.0));

    let frame = chart.frame().context("chart produced no frame")?;
    println!("x range: {:?}", frame.x_range);
    println!("y range: {:?}", frame.y_range);
    println!("plot:    {:?}", frame.layout.plot);
    println!(
        "x tics:  {}",
        frame
            .x_marks
            .iter()
            .map(|m| m.label.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    );
    println!(
        "y tics:  {}",
        frame
            .y_marks
            .iter()
            .map(|m| m.label.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    );

    let mut counts = std::collections::BTreeMap::new();
    for command in ctx.commands() {
        let name = match command {
            PaintCommand::FillRect { .. } => "fill_rect",
            PaintCommand::StrokeRect { .. } => "stroke_rect",
            PaintCommand::FillCircle { .. } => "fill_circle",
            PaintCommand::FillPath { .. } => "fill_path",
            PaintCommand::StrokePath { .. } => "stroke_path",
            PaintCommand::DrawText { .. } => "draw_text",
            PaintCommand::DrawImage { .. } => "draw_image",
            PaintCommand::PushClip { .. } | PaintCommand::PopClip => "clip",
            PaintCommand::PushTransform { .. } | PaintCommand::PopTransform => "transform",
            PaintCommand::SetAntialias(_) => "antialias",
        };
        *counts.entry(name).or_insert(0usize) += 1;
    }
    for (name, count) in counts {
        println!("{name:>12}: {count}");
    }

    // Click the first spike.
    let spike = frame.mapper().to_pixel(12.0, 175.0);
    let selected = chart.on_button_press(spike.x, spike.y);
    println!("selected {} point(s)", selected.len());

    Ok(())
}
