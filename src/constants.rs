//! Thresholds, sizes, ratios and defaults shared by every pipeline stage.

/// Side length of the square image the classifier was trained on.
pub const IMAGE_SIZE: u32 = 128;
pub const IMAGE_CHANNELS: usize = 3;

/// NHWC input shape expected by the classifier.
pub const INPUT_SHAPE: [usize; 4] = [1, IMAGE_SIZE as usize, IMAGE_SIZE as usize, IMAGE_CHANNELS];

/// Lower/upper bound of normalized pixel values.
pub const TENSOR_MIN: f32 = -1.0;
pub const TENSOR_MAX: f32 = 1.0;

/// Top probability at or above which confidence is `High`.
pub const HIGH_CONFIDENCE: f32 = 0.80;
/// Top probability at or above which confidence is `Medium`.
pub const MEDIUM_CONFIDENCE: f32 = 0.60;
/// A prediction strictly above this is flagged urgent (unless healthy).
pub const URGENT_CONFIDENCE: f32 = 0.80;

/// Alternatives must have a probability strictly above this floor.
pub const ALTERNATIVE_FLOOR: f32 = 0.10;
pub const MAX_ALTERNATIVES: usize = 3;

/// Label the classifier emits for a leaf without disease.
pub const HEALTHY_LABEL: &str = "Healthy";

/// Treatment cost per acre for labels missing from the cost table.
pub const DEFAULT_BASE_COST: f64 = 1000.0;
pub const COST_CURRENCY: &str = "INR";

/// Cost breakdown ratios: medicines, labor, equipment. Sum to 1.0.
pub const MEDICINES_SHARE: f64 = 0.6;
pub const LABOR_SHARE: f64 = 0.3;
pub const EQUIPMENT_SHARE: f64 = 0.1;

/// Estimate range around the total.
pub const COST_RANGE_MIN: f64 = 0.8;
pub const COST_RANGE_MAX: f64 = 1.2;

pub const DEFAULT_FARM_SIZE: f64 = 1.0;

/// Largest request body the service accepts (16 MiB).
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakdown_shares_sum_to_one() {
        assert!((MEDICINES_SHARE + LABOR_SHARE + EQUIPMENT_SHARE - 1.0).abs() < 1e-12);
    }

    #[test]
    fn tiers_are_ordered() {
        assert!(HIGH_CONFIDENCE > MEDIUM_CONFIDENCE);
        assert!(MEDIUM_CONFIDENCE > ALTERNATIVE_FLOOR);
    }
}
