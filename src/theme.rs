use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub background: String,
    pub label_color: String,
    pub band_palette: Vec<String>,
    pub band_opacity: f32,
    pub band_stroke: String,
    pub band_stroke_width: f32,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            font_family: "\"Helvetica Neue\", Helvetica, Arial, sans-serif".to_string(),
            font_size: 16.0,
            background: "#FFFFFF".to_string(),
            label_color: "#FFFFFF".to_string(),
            band_palette: vec![
                "#1F77B4".to_string(),
                "#FF7F0E".to_string(),
                "#2CA02C".to_string(),
                "#D62728".to_string(),
                "#9467BD".to_string(),
                "#8C564B".to_string(),
                "#E377C2".to_string(),
                "#7F7F7F".to_string(),
                "#BCBD22".to_string(),
                "#17BECF".to_string(),
            ],
            band_opacity: 1.0,
            band_stroke: "#FFFFFF".to_string(),
            band_stroke_width: 0.5,
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 14.0,
            background: "#FFFFFF".to_string(),
            label_color: "#1C2430".to_string(),
            band_palette: vec![
                "#4C78A8".to_string(),
                "#F58518".to_string(),
                "#54A24B".to_string(),
                "#E45756".to_string(),
                "#72B7B2".to_string(),
                "#EECA3B".to_string(),
                "#B279A2".to_string(),
                "#FF9DA6".to_string(),
                "#9D755D".to_string(),
                "#BAB0AC".to_string(),
            ],
            band_opacity: 0.92,
            band_stroke: "#FFFFFF".to_string(),
            band_stroke_width: 1.0,
        }
    }

    pub fn band_color(&self, index: usize) -> &str {
        if self.band_palette.is_empty() {
            return "#888888";
        }
        &self.band_palette[index % self.band_palette.len()]
    }
}
