//! ablm-plot
//!
//! Grouped box-and-whisker figures for per-region evaluation records.
//! Figure construction is split in two: a pure step that reduces records
//! to a [`FigureSpec`] (per-panel box values and axis ranges), and a
//! rendering step that draws the spec to an SVG file.
pub use boxplot::{figure_path, figure_spec, render_figure, BoxSpec, FigureSpec, Metric, PanelSpec};

pub mod boxplot;
