//! Inspectors: named dashboards of chart panels.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Grid columns a panel occupies when `span` is absent.
pub const DEFAULT_PANEL_SPAN: u8 = 8;

/// Width of the dashboard grid.
pub const MAX_PANEL_SPAN: u8 = 24;

/// A named collection of chart panels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inspector {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub panels: Vec<InspectorPanel>,
}

impl Inspector {
    /// Looks up a panel by id.
    pub fn panel(&self, id: &str) -> Option<&InspectorPanel> {
        self.panels.iter().find(|p| p.id == id)
    }
}

/// One chart on an inspector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectorPanel {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_index: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<u8>,
    /// Passed through to the charting library untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_options: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub chart: Chart,
}

impl InspectorPanel {
    pub fn new(id: impl Into<String>, title: impl Into<String>, chart: Chart) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            data_index: None,
            span: None,
            extra_options: None,
            chart,
        }
    }

    /// Effective grid span.
    pub fn span(&self) -> u8 {
        self.span.unwrap_or(DEFAULT_PANEL_SPAN)
    }
}

/// Chart kind and its required mapping fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Chart {
    #[serde(rename_all = "camelCase")]
    Pie {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color_field: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        angle_field: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Line {
        x_field: String,
        y_field: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        series_field: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Column { x_field: String, y_field: String },
}

impl Chart {
    /// Field mapped to slice color; defaults to `type`.
    pub fn color_field(&self) -> Option<&str> {
        match self {
            Chart::Pie { color_field, .. } => Some(color_field.as_deref().unwrap_or("type")),
            _ => None,
        }
    }

    /// Field mapped to slice angle; defaults to `value`.
    pub fn angle_field(&self) -> Option<&str> {
        match self {
            Chart::Pie { angle_field, .. } => Some(angle_field.as_deref().unwrap_or("value")),
            _ => None,
        }
    }

    /// `(x, y)` axis fields for axis-based charts.
    pub fn axes(&self) -> Option<(&str, &str)> {
        match self {
            Chart::Line { x_field, y_field, .. } | Chart::Column { x_field, y_field } => {
                Some((x_field.as_str(), y_field.as_str()))
            }
            Chart::Pie { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pie_defaults() {
        let panel: InspectorPanel = serde_json::from_value(json!({
            "id": "p1", "title": "Share", "type": "Pie"
        }))
        .unwrap();
        assert_eq!(panel.span(), DEFAULT_PANEL_SPAN);
        assert_eq!(panel.chart.color_field(), Some("type"));
        assert_eq!(panel.chart.angle_field(), Some("value"));
        assert_eq!(panel.chart.axes(), None);
    }

    #[test]
    fn test_line_panel_roundtrip() {
        let raw = json!({
            "id": "daily", "title": "Daily", "type": "Line", "span": 24,
            "xField": "day", "yField": "count", "seriesField": "kind",
            "extraOptions": {"smooth": true}
        });
        let panel: InspectorPanel = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(panel.chart.axes(), Some(("day", "count")));
        assert_eq!(panel.extra_options.as_ref().unwrap()["smooth"], true);
        assert_eq!(serde_json::to_value(&panel).unwrap(), raw);
    }

    #[test]
    fn test_column_requires_axes() {
        let res: Result<InspectorPanel, _> = serde_json::from_value(json!({
            "id": "c", "title": "C", "type": "Column", "xField": "day"
        }));
        assert!(res.is_err());
    }
}
