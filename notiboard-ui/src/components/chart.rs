//! Chart Component
//!
//! Per-app bar chart drawn on an HTML5 canvas.

use leptos::*;
use notiboard::chart::CHART_LABEL;
use notiboard::{BarChartData, ChartSink};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::state::global::GlobalState;

const BAR_COLOR: &str = "#2196F3";

const MARGIN_LEFT: f64 = 40.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 40.0;

/// Bar chart of notifications per app
#[component]
pub fn AppChart() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let canvas_ref = create_node_ref::<html::Canvas>();

    let data = create_memo(move |_| state.view.with(|view| view.chart_data()));

    // Redraw whenever the histogram changes
    create_effect(move |_| {
        let data = data.get();
        if let Some(canvas) = canvas_ref.get() {
            CanvasBarChart::new(&canvas).replace_data(&data);
        }
    });

    view! {
        <div class="relative">
            <h2 class="text-xl font-semibold mb-4">{CHART_LABEL}</h2>
            <canvas
                node_ref=canvas_ref
                width="800"
                height="300"
                class="w-full h-64 rounded-lg"
            />
        </div>
    }
}

/// Canvas-backed chart sink
pub struct CanvasBarChart<'a> {
    canvas: &'a HtmlCanvasElement,
}

impl<'a> CanvasBarChart<'a> {
    pub fn new(canvas: &'a HtmlCanvasElement) -> Self {
        Self { canvas }
    }
}

impl ChartSink for CanvasBarChart<'_> {
    fn replace_data(&mut self, data: &BarChartData) {
        draw_chart(self.canvas, data);
    }
}

/// Bar rectangle in chart-area coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Lay out one bar per value, scaled so the largest fills `height`
pub fn bar_layout(values: &[u64], width: f64, height: f64) -> Vec<Bar> {
    let max = values.iter().copied().max().unwrap_or(0);
    if values.is_empty() || max == 0 {
        return Vec::new();
    }

    let slot = width / values.len() as f64;
    let bar_width = slot * 0.7;

    values
        .iter()
        .enumerate()
        .map(|(idx, &value)| {
            let bar_height = value as f64 / max as f64 * height;
            Bar {
                x: idx as f64 * slot + (slot - bar_width) / 2.0,
                y: height - bar_height,
                width: bar_width,
                height: bar_height,
            }
        })
        .collect()
}

fn draw_chart(canvas: &HtmlCanvasElement, data: &BarChartData) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let chart_width = width - MARGIN_LEFT - MARGIN_RIGHT;
    let chart_height = height - MARGIN_TOP - MARGIN_BOTTOM;

    // Clear canvas
    ctx.set_fill_style(&"#1f2937".into()); // gray-800
    ctx.fill_rect(0.0, 0.0, width, height);

    if data.is_empty() {
        ctx.set_fill_style(&"#9ca3af".into());
        ctx.set_text_align("center");
        ctx.set_font("14px sans-serif");
        let _ = ctx.fill_text("No data", width / 2.0, height / 2.0);
        return;
    }

    // Axis
    ctx.set_stroke_style(&"#374151".into());
    ctx.begin_path();
    ctx.move_to(MARGIN_LEFT, MARGIN_TOP + chart_height);
    ctx.line_to(MARGIN_LEFT + chart_width, MARGIN_TOP + chart_height);
    ctx.stroke();

    ctx.set_font("12px sans-serif");
    ctx.set_text_align("center");

    let max = data.values.iter().copied().max().unwrap_or(0);
    ctx.set_fill_style(&"#9ca3af".into());
    ctx.set_text_align("right");
    let _ = ctx.fill_text(&max.to_string(), MARGIN_LEFT - 8.0, MARGIN_TOP + 4.0);
    let _ = ctx.fill_text("0", MARGIN_LEFT - 8.0, MARGIN_TOP + chart_height);
    ctx.set_text_align("center");

    for (bar, (label, value)) in bar_layout(&data.values, chart_width, chart_height)
        .into_iter()
        .zip(data.labels.iter().zip(&data.values))
    {
        let x = MARGIN_LEFT + bar.x;
        let y = MARGIN_TOP + bar.y;

        ctx.set_fill_style(&BAR_COLOR.into());
        ctx.fill_rect(x, y, bar.width, bar.height);

        ctx.set_fill_style(&"#e5e7eb".into());
        let center = x + bar.width / 2.0;
        let _ = ctx.fill_text(&value.to_string(), center, y - 4.0);
        let _ = ctx.fill_text(label, center, MARGIN_TOP + chart_height + 20.0);
    }
}
