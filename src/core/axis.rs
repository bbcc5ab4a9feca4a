// Axis configuration and the expand-only domain merge

use serde::{Deserialize, Serialize};

use crate::core::chart_config::ScaleType;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AxisConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub scale_type: ScaleType,
    pub can_change_scale_type: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    // Runtime only; widened by update_domain_preserving_user_settings
    #[serde(skip)]
    pub(crate) domain: Option<[f64; 2]>,
}

/// Union of an established domain with a newly required one. Each side only
/// ever moves outward. Without an established domain the request is taken as is.
pub fn merge_domain(existing: Option<[f64; 2]>, requested: [f64; 2]) -> [f64; 2] {
    match existing {
        Some([min, max]) => [min.min(requested[0]), max.max(requested[1])],
        None => requested,
    }
}

impl AxisConfig {
    /// Independent copy for a vertical axis; mutating it leaves `self` alone.
    pub fn to_vertical_axis(&self) -> AxisConfig {
        self.clone()
    }

    /// The domain currently shown: the widened domain if any, else the user's min/max.
    pub fn domain(&self) -> [Option<f64>; 2] {
        match self.domain {
            Some([min, max]) => [Some(min), Some(max)],
            None => [self.min, self.max],
        }
    }

    pub fn update_domain_preserving_user_settings(&mut self, requested: [f64; 2]) -> [f64; 2] {
        let [current_min, current_max] = self.domain();
        // A side the user never set follows the request
        let existing = [
            current_min.unwrap_or(requested[0]),
            current_max.unwrap_or(requested[1]),
        ];
        let merged = merge_domain(Some(existing), requested);
        self.domain = Some(merged);
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_is_independent() {
        let axis = AxisConfig {
            scale_type: ScaleType::Linear,
            ..Default::default()
        };
        let mut clone = axis.to_vertical_axis();
        clone.scale_type = ScaleType::Log;
        assert_eq!(axis.scale_type, ScaleType::Linear);
        assert_eq!(clone.scale_type, ScaleType::Log);
    }

    #[test]
    fn test_expands_but_never_shrinks() {
        let axis = AxisConfig {
            min: Some(0.0),
            max: Some(100.0),
            ..Default::default()
        };
        let mut clone = axis.to_vertical_axis();
        assert_eq!(clone.update_domain_preserving_user_settings([5.0, 50.0]), [0.0, 100.0]);
        assert_eq!(clone.update_domain_preserving_user_settings([-5.0, 500.0]), [-5.0, 500.0]);
        assert_eq!(clone.update_domain_preserving_user_settings([0.0, 10.0]), [-5.0, 500.0]);
        assert_eq!(axis.domain(), [Some(0.0), Some(100.0)]);
    }

    #[test]
    fn test_first_update_establishes_domain() {
        let mut axis = AxisConfig::default();
        assert_eq!(axis.update_domain_preserving_user_settings([3.0, 7.0]), [3.0, 7.0]);
        assert_eq!(axis.update_domain_preserving_user_settings([4.0, 6.0]), [3.0, 7.0]);
    }

    #[test]
    fn test_one_sided_user_setting() {
        let mut axis = AxisConfig {
            min: Some(0.0),
            ..Default::default()
        };
        assert_eq!(axis.update_domain_preserving_user_settings([10.0, 20.0]), [0.0, 20.0]);
        assert_eq!(axis.update_domain_preserving_user_settings([-1.0, 15.0]), [-1.0, 20.0]);

        let mut max_only = AxisConfig {
            max: Some(100.0),
            ..Default::default()
        };
        assert_eq!(max_only.update_domain_preserving_user_settings([10.0, 200.0]), [10.0, 200.0]);
        assert_eq!(
            max_only.update_domain_preserving_user_settings([20.0, 50.0]),
            merge_domain(Some([10.0, 200.0]), [20.0, 50.0])
        );
    }

    #[test]
    fn test_merge_domain() {
        assert_eq!(merge_domain(None, [1.0, 2.0]), [1.0, 2.0]);
        assert_eq!(merge_domain(Some([0.0, 100.0]), [5.0, 50.0]), [0.0, 100.0]);
        assert_eq!(merge_domain(Some([0.0, 100.0]), [-5.0, 500.0]), [-5.0, 500.0]);
    }
}
