//! Default canvas size and stroke settings

/// Canvas width in pixels
pub const WIDTH: f64 = 800.0;
/// Canvas height in pixels
pub const HEIGHT: f64 = 600.0;
/// Padding added on each side of the data, as a fraction of its extent
pub const MARGIN: f64 = 0.05;
pub const PLOT_STROKE_WIDTH: f64 = 1.5;
pub const PATCH_STROKE_WIDTH: f64 = 1.0;
pub const PATCH_STROKE: &str = "rgb(0,0,0)";

/// Colors assigned to successive plots, cycling
pub const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd",
    "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22", "#17becf",
];
