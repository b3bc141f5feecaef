/// Mean squared error between an output vector and its target.
///
/// The network's update rule is fixed, so this is only used to report how
/// far the outputs are from their targets during training.
pub struct MseLoss;

impl MseLoss {
    /// mean((predicted - expected)²); 0 for empty vectors.
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        debug_assert_eq!(predicted.len(), expected.len());
        if predicted.is_empty() {
            return 0.0;
        }
        predicted
            .iter()
            .zip(expected)
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            / predicted.len() as f64
    }
}
