//! Grouped region box plots.
//!
//! One figure per (mutation status, metric): two stacked panels (heavy
//! chain above light), regions along the x-axis in canonical order, one
//! box per model within each region slot.
use ablm_core::{Chain, Region, RegionRecord};
use anyhow::Result;
use itertools::Itertools;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    MedianLoss,
    Accuracy,
}

impl Metric {
    pub fn file_tag(&self) -> &'static str {
        match self {
            Metric::MedianLoss => "median_loss",
            Metric::Accuracy => "accuracy",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::MedianLoss => "Median Loss",
            Metric::Accuracy => "Accuracy",
        }
    }

    pub fn value(&self, record: &RegionRecord) -> f64 {
        match self {
            Metric::MedianLoss => record.median_loss,
            Metric::Accuracy => record.accuracy,
        }
    }
}

/// One box: the metric values of every record for a (region, model) slot.
/// Non-empty by construction.
#[derive(Debug, Clone)]
pub struct BoxSpec {
    pub region_index: usize,
    pub model_index: usize,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct PanelSpec {
    pub chain: Chain,
    pub y_label: String,
    pub y_range: (f64, f64),
    pub boxes: Vec<BoxSpec>,
}

#[derive(Debug, Clone)]
pub struct FigureSpec {
    pub models: Vec<String>,
    pub panels: Vec<PanelSpec>,
}

/// Reduce records to a renderable figure spec. Pure: no I/O, no backend.
/// Models are ordered by sorted name so colors stay stable across figures.
pub fn figure_spec(records: &[RegionRecord], metric: Metric) -> FigureSpec {
    let models: Vec<String> = records
        .iter()
        .map(|r| r.model.clone())
        .sorted()
        .dedup()
        .collect();

    let panels = [Chain::Heavy, Chain::Light]
        .into_iter()
        .map(|chain| {
            let mut boxes = Vec::new();
            for (region_index, region) in Region::ALL.iter().enumerate() {
                for (model_index, model) in models.iter().enumerate() {
                    let values: Vec<f64> = records
                        .iter()
                        .filter(|r| {
                            r.chain == chain && r.region == *region && r.model == *model
                        })
                        .map(|r| metric.value(r))
                        .collect();
                    if !values.is_empty() {
                        boxes.push(BoxSpec {
                            region_index,
                            model_index,
                            values,
                        });
                    }
                }
            }
            PanelSpec {
                chain,
                y_label: format!("{} Chain Per-position {}", chain.title(), metric.label()),
                y_range: panel_range(&boxes),
                boxes,
            }
        })
        .collect();

    FigureSpec { models, panels }
}

fn panel_range(boxes: &[BoxSpec]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for value in boxes.iter().flat_map(|b| b.values.iter()) {
        min = min.min(*value);
        max = max.max(*value);
    }
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let pad = ((max - min) * 0.05).max(0.05);
    (min - pad, max + pad)
}

/// Deterministic figure name:
/// `combined-<task_str>-results_<mutated|unmutated>_<metric>.svg`.
pub fn figure_path(output_dir: &Path, task_str: &str, mutated: bool, metric: Metric) -> PathBuf {
    let desc = if mutated { "mutated" } else { "unmutated" };
    output_dir.join(format!(
        "combined-{task_str}-results_{desc}_{}.svg",
        metric.file_tag()
    ))
}

/// Draw the spec to an SVG file: heavy panel on top, light below, legend
/// on the top panel only.
pub fn render_figure(path: &Path, spec: &FigureSpec) -> Result<()> {
    let root = SVGBackend::new(path, (900, 640)).into_drawing_area();
    root.fill(&WHITE)?;
    let areas = root.split_evenly((2, 1));
    for (i, (area, panel)) in areas.iter().zip(&spec.panels).enumerate() {
        draw_panel(area, panel, &spec.models, i == 0)?;
    }
    root.present()?;
    Ok(())
}

fn draw_panel(
    area: &DrawingArea<SVGBackend, Shift>,
    panel: &PanelSpec,
    models: &[String],
    with_legend: bool,
) -> Result<()> {
    if panel.boxes.is_empty() {
        area.draw(&Text::new(
            format!("No {} chain records", panel.chain),
            (330, 140),
            ("sans-serif", 18).into_font().color(&BLACK),
        ))?;
        return Ok(());
    }

    let (y_min, y_max) = panel.y_range;
    let mut chart = ChartBuilder::on(area)
        .margin(12)
        .x_label_area_size(32)
        .y_label_area_size(72)
        .build_cartesian_2d(
            (0..Region::COUNT).into_segmented(),
            y_min as f32..y_max as f32,
        )?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(Region::COUNT)
        .x_label_formatter(&|x| match x {
            SegmentValue::CenterOf(i) if *i < Region::COUNT => Region::ALL[*i].to_string(),
            _ => String::new(),
        })
        .y_desc(panel.y_label.clone())
        .label_style(("sans-serif", 12))
        .draw()?;

    let model_count = models.len().max(1);
    let slot = 64.0 / model_count as f64;
    let box_width = (slot - 4.0).max(2.0) as u32;
    let mut labeled = vec![false; models.len()];
    for group in &panel.boxes {
        let color = Palette99::pick(group.model_index).to_rgba();
        let offset = (group.model_index as f64 - (model_count as f64 - 1.0) / 2.0) * slot;
        let quartiles = Quartiles::new(&group.values);
        let series = chart.draw_series(std::iter::once(
            Boxplot::new_vertical(SegmentValue::CenterOf(group.region_index), &quartiles)
                .width(box_width)
                .whisker_width(0.5)
                .offset(offset)
                .style(color.filled()),
        ))?;
        if with_legend && !labeled[group.model_index] {
            labeled[group.model_index] = true;
            series
                .label(models[group.model_index].clone())
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 4), (x + 10, y + 4)], color.filled())
                });
        }
    }

    if with_legend {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .border_style(BLACK)
            .background_style(WHITE.mix(0.8))
            .draw()?;
    }
    Ok(())
}
