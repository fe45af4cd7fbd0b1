//! Serialisable building blocks for Plotly.js charts.
//!
//! The analysers assemble their interactive output from these structs;
//! serialising a `PlotlyChart` gives JSON that Plotly.js renders as-is.

use serde::Serialize;

// ============================================================================
// Styling
// ============================================================================

/// Font settings shared by titles and annotation text
#[derive(Debug, Clone, Serialize, Default)]
pub struct PlotlyFont {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

/// Legend placement and orientation
#[derive(Debug, Clone, Serialize, Default)]
pub struct PlotlyLegend {
    /// "v" for a vertical legend, "h" for horizontal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// One of "left", "center", "right" or "auto"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xanchor: Option<String>,
}

/// Free-floating text placed over the chart
#[derive(Debug, Clone, Serialize)]
pub struct PlotlyAnnotation {
    pub text: String,
    /// "paper" treats x as a 0-1 fraction of the plot; "x" uses data coordinates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xref: Option<String>,
    /// "paper" treats y as a 0-1 fraction of the plot; "y" uses data coordinates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xanchor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yanchor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showarrow: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bordercolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borderwidth: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borderpad: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<PlotlyFont>,
}

impl PlotlyAnnotation {
    /// Monospace text box for overlaying summary figures on a chart.
    ///
    /// Takes paper-fraction coordinates with a light background and a
    /// thin grey border.
    pub fn stats_box(text: &str, x: f64, y: f64) -> Self {
        Self {
            text: text.to_string(),
            xref: Some("paper".to_string()),
            yref: Some("paper".to_string()),
            x: Some(x),
            y: Some(y),
            xanchor: Some("left".to_string()),
            yanchor: Some("bottom".to_string()),
            showarrow: Some(false),
            bgcolor: Some("rgba(255, 255, 255, 0.8)".to_string()),
            bordercolor: Some("gray".to_string()),
            borderwidth: Some(1),
            borderpad: Some(4),
            font: Some(PlotlyFont {
                family: Some("monospace".to_string()),
                size: Some(10),
            }),
        }
    }
}

// ============================================================================
// Traces and Layout
// ============================================================================

/// Top-level chart document.
///
/// Serialises to the `{data: [...], layout: {...}}` shape Plotly.js consumes.
#[derive(Debug, Clone, Serialize)]
pub struct PlotlyChart {
    pub data: Vec<PlotlyTrace>,
    pub layout: PlotlyLayout,
}

/// One data series.
///
/// Bar traces populate x/y; pie traces populate labels/values instead.
#[derive(Debug, Clone, Serialize)]
pub struct PlotlyTrace {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub x: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub y: Vec<f64>,
    pub name: String,
    #[serde(rename = "type")]
    pub trace_type: String,
    /// Slice labels for pie traces
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    /// Slice values for pie traces
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<f64>>,
    /// Donut hole fraction for pie traces (0.0-1.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hole: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<PlotlyMarker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textposition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
}

/// Colour applied to a trace's bars or slices
#[derive(Debug, Clone, Serialize)]
pub struct PlotlyMarker {
    pub color: String,
}

/// Hover tooltip behaviour
#[derive(Debug, Clone, Serialize)]
pub struct PlotlyHoverLabel {
    /// Plotly truncates trace names in tooltips unless this is -1
    pub namelength: i32,
}

/// Chart-level layout settings
#[derive(Debug, Clone, Serialize)]
pub struct PlotlyLayout {
    pub title: PlotlyTitle,
    pub xaxis: PlotlyAxis,
    pub yaxis: PlotlyAxis,
    pub hovermode: String,
    pub hoverlabel: PlotlyHoverLabel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bargap: Option<f64>,
    /// Button menus wired into the rendered chart (the log-scale toggle lives here)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updatemenus: Option<Vec<PlotlyUpdateMenu>>,
    /// Legend block, present only when a chart opts in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<PlotlyLegend>,
    /// Overlay text such as the stats box
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Vec<PlotlyAnnotation>>,
}

/// Chart title text and font
#[derive(Debug, Clone, Serialize)]
pub struct PlotlyTitle {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<PlotlyFont>,
}

/// Axis title plus optional scale and tick styling
#[derive(Debug, Clone, Serialize)]
pub struct PlotlyAxis {
    pub title: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub axis_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickangle: Option<i32>,
}

/// Group of buttons rendered above the plot
#[derive(Debug, Clone, Serialize)]
pub struct PlotlyUpdateMenu {
    #[serde(rename = "type")]
    pub menu_type: String,
    pub direction: String,
    pub x: f64,
    pub y: f64,
    pub buttons: Vec<PlotlyButton>,
}

/// Single button inside an update menu
#[derive(Debug, Clone, Serialize)]
pub struct PlotlyButton {
    pub label: String,
    pub method: String,
    pub args: Vec<serde_json::Value>,
}

impl PlotlyLayout {
    /// Layout with titled axes and unified hover, no extra chrome
    pub fn basic(title: &str, x_title: &str, y_title: &str) -> Self {
        Self {
            title: PlotlyTitle {
                text: title.to_string(),
                font: None,
            },
            xaxis: PlotlyAxis {
                title: x_title.to_string(),
                axis_type: None,
                tickangle: None,
            },
            yaxis: PlotlyAxis {
                title: y_title.to_string(),
                axis_type: None,
                tickangle: None,
            },
            hovermode: "x unified".to_string(),
            hoverlabel: PlotlyHoverLabel { namelength: -1 },
            bargap: None,
            updatemenus: None,
            legend: None,
            annotations: None,
        }
    }

    /// Attach the linear/log y-axis toggle
    pub fn with_log_toggle(mut self) -> Self {
        self.updatemenus = Some(vec![PlotlyUpdateMenu {
            menu_type: "buttons".to_string(),
            direction: "left".to_string(),
            x: 0.0,
            y: 1.15,
            buttons: vec![
                PlotlyButton {
                    label: "Linear".to_string(),
                    method: "relayout".to_string(),
                    args: vec![serde_json::json!({"yaxis.type": "linear"})],
                },
                PlotlyButton {
                    label: "Log".to_string(),
                    method: "relayout".to_string(),
                    args: vec![serde_json::json!({"yaxis.type": "log"})],
                },
            ],
        }]);
        self
    }

    /// Place the legend.
    ///
    /// `with_legend("v", 1.02, 1.0, "left")` puts a vertical legend just
    /// right of the plot area.
    pub fn with_legend(mut self, orientation: &str, x: f64, y: f64, xanchor: &str) -> Self {
        self.legend = Some(PlotlyLegend {
            orientation: Some(orientation.to_string()),
            x: Some(x),
            y: Some(y),
            xanchor: Some(xanchor.to_string()),
        });
        self
    }

    /// Overlay annotations on the finished layout
    pub fn with_annotations(mut self, annotations: Vec<PlotlyAnnotation>) -> Self {
        self.annotations = Some(annotations);
        self
    }

    /// Angle the x tick labels (useful for timestamp categories)
    pub fn with_tickangle(mut self, angle: i32) -> Self {
        self.xaxis.tickangle = Some(angle);
        self
    }
}

impl PlotlyTrace {
    /// Bar series in a fixed colour
    pub fn bar(x: Vec<String>, y: Vec<f64>, name: &str, color: &str) -> Self {
        Self {
            x,
            y,
            name: name.to_string(),
            trace_type: "bar".to_string(),
            labels: None,
            values: None,
            hole: None,
            marker: Some(PlotlyMarker {
                color: color.to_string(),
            }),
            text: None,
            textposition: None,
            hovertemplate: None,
        }
    }

    /// Pie series over label/value pairs
    pub fn pie(labels: Vec<String>, values: Vec<f64>, name: &str) -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
            name: name.to_string(),
            trace_type: "pie".to_string(),
            labels: Some(labels),
            values: Some(values),
            hole: None,
            marker: None,
            text: None,
            textposition: None,
            hovertemplate: None,
        }
    }

    /// Set the donut hole fraction for a pie trace
    pub fn with_hole(mut self, fraction: f64) -> Self {
        self.hole = Some(fraction);
        self
    }

    /// Set a custom hover template
    pub fn with_hovertemplate(mut self, template: &str) -> Self {
        self.hovertemplate = Some(template.to_string());
        self
    }
}
