/// Squashing function applied element-wise to every layer's pre-activations.
///
/// The network is fixed to the logistic sigmoid; the enum keeps the choice
/// explicit and lets the function be tested on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationFunction {
    Sigmoid,
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => 1.0 / (1.0 + (-x).exp()),
        }
    }

    /// Derivative expressed through the activation's own output `y = f(x)`.
    ///
    /// For the sigmoid this is `y * (1 - y)`, which is the form the weight
    /// update uses since only activations are retained from the forward pass.
    pub fn derivative_from_output(&self, y: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => y * (1.0 - y),
        }
    }

    pub fn apply(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.function(x)).collect()
    }
}
