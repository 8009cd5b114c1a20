use crate::marker::color::Color;
use crate::marker::scale::DepthScale;
use crate::surface::ControlPosition;

/// One legend row: swatch color and the depth range it stands for.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendRow {
    pub color: Color,
    pub label: String,
}

/// Static depth legend. Never depends on feed content.
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub position: ControlPosition,
    pub rows: Vec<LegendRow>,
}

impl Legend {
    /// One row per band, colored by evaluating the scale one unit above the
    /// band's lower bound so rows agree with marker fills.
    pub fn from_scale(scale: &DepthScale) -> Self {
        let bands = scale.bands();
        let rows = bands
            .iter()
            .enumerate()
            .map(|(idx, band)| {
                let label = match bands.get(idx + 1) {
                    Some(next) => format!("{}–{}", band.lower, next.lower),
                    None => format!("{}+", band.lower),
                };
                LegendRow {
                    color: scale.color_for(Some(band.lower + 1.0)),
                    label,
                }
            })
            .collect();

        Self {
            position: ControlPosition::BottomRight,
            rows,
        }
    }

    pub fn html(&self) -> String {
        self.rows
            .iter()
            .map(|row| {
                let label = row.label.replace('–', "&ndash;");
                format!("<i style=\"background:{}\"></i> {}", row.color, label)
            })
            .collect::<Vec<_>>()
            .join("<br>")
    }
}

impl Default for Legend {
    fn default() -> Self {
        Self::from_scale(&DepthScale::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::mapper::MarkerMapper;
    use crate::marker::scale::{DEEP_COLOR, SHALLOW_COLOR};

    #[test]
    fn standard_legend_has_two_buckets() {
        let legend = Legend::default();
        assert_eq!(legend.position, ControlPosition::BottomRight);
        assert_eq!(legend.rows.len(), 2);
        assert_eq!(legend.rows[0].label, "0–100");
        assert_eq!(legend.rows[1].label, "100+");
        assert_eq!(legend.rows[0].color, SHALLOW_COLOR);
        assert_eq!(legend.rows[1].color, DEEP_COLOR);
    }

    #[test]
    fn legend_colors_agree_with_marker_colors() {
        let mapper = MarkerMapper::default();
        let legend = Legend::from_scale(mapper.scale());
        assert_eq!(legend.rows[0].color, mapper.color(Some(1.0)));
        assert_eq!(legend.rows[1].color, mapper.color(Some(101.0)));
    }

    #[test]
    fn html_rows_use_swatches() {
        assert_eq!(
            Legend::default().html(),
            "<i style=\"background:#32cd32\"></i> 0&ndash;100<br><i style=\"background:#ff4500\"></i> 100+"
        );
    }
}
