use crate::marker::color::Color;

/// Fill for events deeper than 100 km.
pub const DEEP_COLOR: Color = Color::rgb(0xff, 0x45, 0x00);
/// Fill for events at 100 km or shallower, and for events without a depth.
pub const SHALLOW_COLOR: Color = Color::rgb(0x32, 0xcd, 0x32);

/// One bucket of the depth scale. Depths strictly greater than `lower`
/// belong to this band unless a later band claims them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthBand {
    pub lower: f64,
    pub color: Color,
}

/// Ordered depth buckets shared by marker fills and the legend.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthScale {
    bands: Vec<DepthBand>,
}

impl DepthScale {
    /// Bands must be sorted by ascending lower bound and non-empty.
    pub fn new(bands: Vec<DepthBand>) -> Option<Self> {
        let sorted = bands.windows(2).all(|pair| pair[0].lower < pair[1].lower);
        (!bands.is_empty() && sorted).then_some(Self { bands })
    }

    /// The two-tier scale: shallow up to 100 km, deep beyond.
    pub fn standard() -> Self {
        Self {
            bands: vec![
                DepthBand {
                    lower: 0.0,
                    color: SHALLOW_COLOR,
                },
                DepthBand {
                    lower: 100.0,
                    color: DEEP_COLOR,
                },
            ],
        }
    }

    pub fn bands(&self) -> &[DepthBand] {
        &self.bands
    }

    /// Picks the last band whose lower bound the depth exceeds. Absent depths
    /// and depths at or below the first bound fall into the first band.
    pub fn color_for(&self, depth: Option<f64>) -> Color {
        let first = self.bands[0].color;
        let Some(depth) = depth else {
            return first;
        };
        self.bands
            .iter()
            .rev()
            .find(|band| depth > band.lower)
            .map_or(first, |band| band.color)
    }
}

impl Default for DepthScale {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depths_beyond_100_are_deep() {
        let scale = DepthScale::standard();
        for depth in [100.0001, 150.0, 541.2, 700.0] {
            assert_eq!(scale.color_for(Some(depth)), DEEP_COLOR, "depth {depth}");
        }
    }

    #[test]
    fn depths_up_to_100_are_shallow() {
        let scale = DepthScale::standard();
        for depth in [100.0, 99.9, 50.0, 0.0, -3.5] {
            assert_eq!(scale.color_for(Some(depth)), SHALLOW_COLOR, "depth {depth}");
        }
    }

    #[test]
    fn absent_depth_is_shallow() {
        assert_eq!(DepthScale::standard().color_for(None), SHALLOW_COLOR);
    }

    #[test]
    fn nan_depth_fails_threshold() {
        assert_eq!(DepthScale::standard().color_for(Some(f64::NAN)), SHALLOW_COLOR);
    }

    #[test]
    fn unsorted_or_empty_bands_are_rejected() {
        assert!(DepthScale::new(Vec::new()).is_none());
        let reversed = DepthScale::standard().bands().iter().rev().copied().collect();
        assert!(DepthScale::new(reversed).is_none());
    }

    #[test]
    fn custom_scale_selects_highest_exceeded_band() {
        let mid = Color::rgb(1, 2, 3);
        let scale = DepthScale::new(vec![
            DepthBand { lower: 0.0, color: SHALLOW_COLOR },
            DepthBand { lower: 70.0, color: mid },
            DepthBand { lower: 300.0, color: DEEP_COLOR },
        ])
        .unwrap();
        assert_eq!(scale.color_for(Some(71.0)), mid);
        assert_eq!(scale.color_for(Some(300.0)), mid);
        assert_eq!(scale.color_for(Some(301.0)), DEEP_COLOR);
    }
}
