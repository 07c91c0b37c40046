//! SVG chart adapter: bar chart of the predicted systolic and diastolic pressure.

use std::fs;
use std::path::PathBuf;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_svg::SVGBackend;

use crate::domain::BloodPressurePrediction;
use crate::ports::{ChartError, ChartRenderer};

/// Upper bound of the y axis (mmHg).
pub const Y_MAX: f64 = 200.0;

const SIZE: (u32, u32) = (480, 360);
const LABELS: [&str; 2] = ["Systolic BP", "Diastolic BP"];

/// Writes the prediction as an SVG bar chart with a fixed 0-200 mmHg axis.
#[derive(Debug, Clone)]
pub struct SvgBarChart {
    path: PathBuf,
}

impl SvgBarChart {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn draw(&self, systolic: f64, diastolic: f64) -> Result<(), ChartError> {
        let root = SVGBackend::new(&self.path, SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(draw_error)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .margin_top(24)
            .x_label_area_size(35)
            .y_label_area_size(60)
            .build_cartesian_2d((0u32..2u32).into_segmented(), 0f64..Y_MAX)
            .map_err(draw_error)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .y_desc("Blood Pressure (mmHg)")
            .x_label_formatter(&|v: &SegmentValue<u32>| match v {
                SegmentValue::CenterOf(i) => LABELS
                    .get(*i as usize)
                    .map(|s| s.to_string())
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .draw()
            .map_err(draw_error)?;

        let bars = [(systolic, BLUE), (diastolic, GREEN)];

        chart
            .draw_series(bars.iter().zip(0u32..).map(|((value, color), i)| {
                let mut bar = Rectangle::new(
                    [
                        (SegmentValue::Exact(i), 0.0),
                        (SegmentValue::Exact(i + 1), bar_top(*value)),
                    ],
                    color.filled(),
                );
                bar.set_margin(0, 0, 30, 30);
                bar
            }))
            .map_err(draw_error)?;

        let value_style = TextStyle::from(("sans-serif", 14).into_font())
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        chart
            .draw_series(bars.iter().zip(0u32..).map(|((value, _), i)| {
                Text::new(
                    format!("{value:.2}"),
                    (SegmentValue::CenterOf(i), bar_top(*value)),
                    value_style.clone(),
                )
            }))
            .map_err(draw_error)?;

        root.present().map_err(draw_error)
    }
}

/// Bar top on the fixed axis: clipped to 0..=200, non-finite values drawn as zero.
fn bar_top(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    value.clamp(0.0, Y_MAX)
}

fn draw_error<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Draw(e.to_string())
}

impl ChartRenderer for SvgBarChart {
    fn render(&self, prediction: &BloodPressurePrediction) -> Result<PathBuf, ChartError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| ChartError::Io {
                    path: parent.display().to_string(),
                    source: e,
                })?;
            }
        }

        self.draw(prediction.systolic, prediction.diastolic)?;

        tracing::debug!("Wrote prediction chart to {:?}", self.path);
        Ok(self.path.clone())
    }
}
