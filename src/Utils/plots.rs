//! Charts of a finished search: the iterates on top of the objective and the error
//! per iteration on a log scale. File names come from [`SearchMethod::artifact_name`].
use crate::numerical::optimization::search_trace::{SearchMethod, SearchResult};
use plotters::prelude::*;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

/// how many iterates are annotated on the overview panel
const FIRST_ITERATES: usize = 6;
const SAMPLES: usize = 400;

/// visible part of the objective on the overview panels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartWindow {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl Default for ChartWindow {
    fn default() -> Self {
        Self {
            x: (-2.0, 2.0),
            y: (-3.0, 6.0),
        }
    }
}

impl ChartWindow {
    fn contains(&self, (x, y): (f64, f64)) -> bool {
        x >= self.x.0 && x <= self.x.1 && y >= self.y.0 && y <= self.y.1
    }
}

fn sample<F: Fn(f64) -> f64>(f: &F, from: f64, to: f64) -> Vec<(f64, f64)> {
    (0..SAMPLES)
        .map(|i| {
            let x = from + (to - from) * i as f64 / (SAMPLES - 1) as f64;
            (x, f(x))
        })
        .filter(|(_, y)| y.is_finite())
        .collect()
}

/// [min, max] of the finite values, widened so that it is never empty
pub(crate) fn padded_range(values: &[f64], share: f64) -> Option<(f64, f64)> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return None;
    }
    let lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let pad = ((hi - lo) * share).max(1e-6 * (1.0 + lo.abs().max(hi.abs())));
    Some((lo - pad, hi + pad))
}

/// positive error values with their 1-based iteration number
pub(crate) fn log_points(tolerance: &[f64]) -> Vec<(f64, f64)> {
    tolerance
        .iter()
        .enumerate()
        .filter(|(_, t)| t.is_finite() && **t > 0.0)
        .map(|(i, &t)| ((i + 1) as f64, t))
        .collect()
}

/// plain chart of the objective
pub fn function_chart<F: Fn(f64) -> f64>(
    f: F,
    label: &str,
    window: ChartWindow,
    filename: &Path,
) -> Result<(), Box<dyn Error>> {
    let root_area = BitMapBackend::new(filename, (800, 600)).into_drawing_area();
    root_area.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root_area)
        .caption("Objective function", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(window.x.0..window.x.1, window.y.0..window.y.1)?;
    chart.configure_mesh().x_desc("x").y_desc("f(x)").draw()?;
    chart
        .draw_series(LineSeries::new(sample(&f, window.x.0, window.x.1), &BLUE))?
        .label(label.to_string())
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));
    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    root_area.present()?;
    Ok(())
}

/// Draws the search trajectory and its error curve into `<out_dir>/<artifact>.png`.
/// Returns the path of the written file.
pub fn conv_tol_chart<F: Fn(f64) -> f64>(
    f: F,
    label: &str,
    result: &SearchResult,
    window: ChartWindow,
    out_dir: &Path,
) -> Result<PathBuf, Box<dyn Error>> {
    fs::create_dir_all(out_dir)?;
    let filename = out_dir.join(format!("{}.png", result.method.artifact_name()));
    let convergence = result.convergence();
    let points: Vec<(f64, f64)> = convergence.iter().map(|&x| (x, f(x))).collect();

    let path = filename.clone();
    let root_area = BitMapBackend::new(&filename, (1400, 600)).into_drawing_area();
    root_area.fill(&WHITE)?;
    let (left, right) = root_area.split_horizontally(930);
    let right_panels = right.split_evenly((2, 1));

    // iterates on the whole window, first few annotated
    let mut chart = ChartBuilder::on(&left)
        .caption(
            format!("Iterates: {} (first {})", result.method.title(), FIRST_ITERATES),
            ("sans-serif", 22),
        )
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(window.x.0..window.x.1, window.y.0..window.y.1)?;
    chart.configure_mesh().x_desc("x").y_desc("f(x)").draw()?;
    chart
        .draw_series(LineSeries::new(sample(&f, window.x.0, window.x.1), &BLUE))?
        .label(label.to_string())
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));
    for (i, &(x, y)) in points.iter().take(FIRST_ITERATES).enumerate() {
        if !window.contains((x, y)) {
            continue;
        }
        let color = Palette99::pick(i);
        let offset = 0.15 * (i + 1) as f64;
        chart.draw_series(std::iter::once(Circle::new((x, y), 5, color.filled())))?;
        chart.draw_series(std::iter::once(Text::new(
            i.to_string(),
            (x, y + offset),
            ("sans-serif", 14).into_font(),
        )))?;
    }
    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    // all iterates, zoomed on the region they visit
    let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.1).collect();
    if let (Some(x_range), Some(y_range)) = (padded_range(&xs, 0.1), padded_range(&ys, 0.1)) {
        let mut zoom = ChartBuilder::on(&right_panels[0])
            .caption("All iterates (zoomed)", ("sans-serif", 18))
            .margin(8)
            .x_label_area_size(25)
            .y_label_area_size(45)
            .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)?;
        zoom.configure_mesh().x_desc("x").draw()?;
        zoom.draw_series(LineSeries::new(sample(&f, x_range.0, x_range.1), &BLUE))?;
        zoom.draw_series(
            points
                .iter()
                .enumerate()
                .filter(|(_, p)| p.0.is_finite() && p.1.is_finite())
                .map(|(i, &p)| Circle::new(p, 4, Palette99::pick(i).filled())),
        )?;
    }

    // error per iteration on a log scale
    let errors = log_points(&result.tolerance());
    let error_values: Vec<f64> = errors.iter().map(|p| p.1).collect();
    if let Some((lo, hi)) = padded_range(&error_values, 0.0) {
        let lo = if lo > 0.0 { lo / 2.0 } else { hi * 1e-3 };
        let mut error_chart = ChartBuilder::on(&right_panels[1])
            .caption("Error per iteration (log scale)", ("sans-serif", 18))
            .margin(8)
            .x_label_area_size(25)
            .y_label_area_size(55)
            .build_cartesian_2d(
                0.5..(convergence.len() as f64 + 0.5),
                (lo..hi * 2.0).log_scale(),
            )?;
        error_chart
            .configure_mesh()
            .x_desc("iteration")
            .y_desc("error")
            .draw()?;
        error_chart
            .draw_series(LineSeries::new(errors.clone(), &RED))?
            .label("|current tolerance|")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));
        error_chart.draw_series(errors.iter().map(|&p| Circle::new(p, 3, RED.filled())))?;
        error_chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root_area.present()?;
    Ok(path)
}

/// conv_tol_chart for every result, one file per method
pub fn charts_for_all<F: Fn(f64) -> f64 + Copy>(
    f: F,
    label: &str,
    results: &[SearchResult],
    window: ChartWindow,
    out_dir: &Path,
) -> Result<Vec<(SearchMethod, PathBuf)>, Box<dyn Error>> {
    let mut files = Vec::with_capacity(results.len());
    for result in results {
        let path = conv_tol_chart(f, label, result, window, out_dir)?;
        files.push((result.method, path));
    }
    Ok(files)
}
