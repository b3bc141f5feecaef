use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::activation::activation::ActivationFunction;
use crate::error::NetError;
use crate::math::matrix::Matrix;

/// Activations retained from one forward pass; `train` needs both layers.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardPass {
    pub hidden: Vec<f64>,
    pub output: Vec<f64>,
}

/// Three-layer (input, hidden, output) fully-connected network without biases.
///
/// `weights_input_hidden` has shape (hidden, input) and `weights_hidden_output`
/// has shape (output, hidden): entry (j, i) is the weight on the link from
/// node i of the earlier layer to node j of the later one.
#[derive(Debug, Clone)]
pub struct Network {
    input_size: usize,
    hidden_size: usize,
    output_size: usize,
    learning_rate: f64,
    weights_input_hidden: Matrix,
    weights_hidden_output: Matrix,
    activation: ActivationFunction,
}

impl Network {
    /// Builds a network with weights drawn from the thread-local generator.
    pub fn new(
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        learning_rate: f64,
    ) -> Result<Network, NetError> {
        Network::with_rng(input_size, hidden_size, output_size, learning_rate, &mut rand::thread_rng())
    }

    /// Builds a network whose initial weights are fully determined by `seed`.
    pub fn with_seed(
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        learning_rate: f64,
        seed: u64,
    ) -> Result<Network, NetError> {
        let mut rng = StdRng::seed_from_u64(seed);
        Network::with_rng(input_size, hidden_size, output_size, learning_rate, &mut rng)
    }

    /// Builds a network drawing both weight matrices from `rng`.
    ///
    /// Each matrix samples N(0, 1/fan_in): the input layer size for the
    /// input→hidden links, the hidden layer size for hidden→output.
    pub fn with_rng<R: Rng + ?Sized>(
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        learning_rate: f64,
        rng: &mut R,
    ) -> Result<Network, NetError> {
        validate_dimensions(input_size, hidden_size, output_size, learning_rate)?;

        let weights_input_hidden =
            Matrix::gaussian(hidden_size, input_size, (input_size as f64).powf(-0.5), rng);
        let weights_hidden_output =
            Matrix::gaussian(output_size, hidden_size, (hidden_size as f64).powf(-0.5), rng);

        Ok(Network {
            input_size,
            hidden_size,
            output_size,
            learning_rate,
            weights_input_hidden,
            weights_hidden_output,
            activation: ActivationFunction::Sigmoid,
        })
    }

    /// Builds a network from explicit weights; dimensions are read off the matrices.
    pub fn from_weights(
        weights_input_hidden: Matrix,
        weights_hidden_output: Matrix,
        learning_rate: f64,
    ) -> Result<Network, NetError> {
        let (hidden_size, input_size) = (weights_input_hidden.rows, weights_input_hidden.cols);
        let output_size = weights_hidden_output.rows;
        validate_dimensions(input_size, hidden_size, output_size, learning_rate)?;
        check_len("hidden->output weight columns", hidden_size, weights_hidden_output.cols)?;

        Ok(Network {
            input_size,
            hidden_size,
            output_size,
            learning_rate,
            weights_input_hidden,
            weights_hidden_output,
            activation: ActivationFunction::Sigmoid,
        })
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    pub fn output_size(&self) -> usize {
        self.output_size
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn weights_input_hidden(&self) -> &Matrix {
        &self.weights_input_hidden
    }

    pub fn weights_hidden_output(&self) -> &Matrix {
        &self.weights_hidden_output
    }

    /// Runs the input through both layers and keeps the hidden activations.
    pub fn forward(&self, input: &[f64]) -> Result<ForwardPass, NetError> {
        check_len("input vector", self.input_size, input.len())?;

        let hidden = self.activation.apply(&self.weights_input_hidden.dot_vec(input));
        let output = self.activation.apply(&self.weights_hidden_output.dot_vec(&hidden));

        Ok(ForwardPass { hidden, output })
    }

    /// Returns the output activations for `input`. Never touches the weights.
    pub fn query(&self, input: &[f64]) -> Result<Vec<f64>, NetError> {
        Ok(self.forward(input)?.output)
    }

    /// One gradient-descent step towards `target` for a single example.
    ///
    /// Both vectors are checked before anything is computed, so a failing
    /// call leaves the weights exactly as they were.
    pub fn train(&mut self, input: &[f64], target: &[f64]) -> Result<(), NetError> {
        self.train_step(input, target).map(|_| ())
    }

    /// Same as `train`, returning the output activations computed before the
    /// update so callers can track the loss without a second forward pass.
    pub(crate) fn train_step(&mut self, input: &[f64], target: &[f64]) -> Result<Vec<f64>, NetError> {
        check_len("input vector", self.input_size, input.len())?;
        check_len("target vector", self.output_size, target.len())?;

        let ForwardPass { hidden, output } = self.forward(input)?;

        let output_errors: Vec<f64> = target.iter().zip(&output).map(|(t, o)| t - o).collect();
        // Output errors are split across the links by weight and recombined at the
        // hidden nodes. No activation derivative is applied here, and the old
        // hidden->output weights are used.
        let hidden_errors = self.weights_hidden_output.transpose_dot_vec(&output_errors);

        let output_delta = self.layer_delta(&output_errors, &output);
        self.weights_hidden_output
            .add_scaled_outer(self.learning_rate, &output_delta, &hidden);

        let hidden_delta = self.layer_delta(&hidden_errors, &hidden);
        self.weights_input_hidden
            .add_scaled_outer(self.learning_rate, &hidden_delta, input);

        trace!(
            "train step: output error norm {:.6}",
            output_errors.iter().map(|e| e * e).sum::<f64>().sqrt()
        );

        Ok(output)
    }

    /// `errors ⊙ f'(activations)` with the derivative taken from the outputs.
    fn layer_delta(&self, errors: &[f64], activations: &[f64]) -> Vec<f64> {
        errors
            .iter()
            .zip(activations)
            .map(|(e, &a)| e * self.activation.derivative_from_output(a))
            .collect()
    }
}

fn validate_dimensions(
    input_size: usize,
    hidden_size: usize,
    output_size: usize,
    learning_rate: f64,
) -> Result<(), NetError> {
    for (name, size) in [("input_size", input_size), ("hidden_size", hidden_size), ("output_size", output_size)] {
        if size == 0 {
            return Err(NetError::Configuration(format!("{} must be at least 1", name)));
        }
    }
    if !(learning_rate.is_finite() && learning_rate > 0.0) {
        return Err(NetError::Configuration(format!(
            "learning_rate must be a positive number, got {}",
            learning_rate
        )));
    }
    Ok(())
}

fn check_len(what: &'static str, expected: usize, got: usize) -> Result<(), NetError> {
    if expected != got {
        return Err(NetError::ShapeMismatch { what, expected, got });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loss::mse::MseLoss;

    fn target(size: usize, label: usize) -> Vec<f64> {
        let mut t = vec![0.01; size];
        t[label] = 0.99;
        t
    }

    #[test]
    fn rejects_zero_sizes_and_bad_learning_rate() {
        assert!(matches!(Network::with_seed(0, 3, 2, 0.1, 1), Err(NetError::Configuration(_))));
        assert!(matches!(Network::with_seed(4, 0, 2, 0.1, 1), Err(NetError::Configuration(_))));
        assert!(matches!(Network::with_seed(4, 3, 0, 0.1, 1), Err(NetError::Configuration(_))));
        assert!(matches!(Network::with_seed(4, 3, 2, 0.0, 1), Err(NetError::Configuration(_))));
        assert!(matches!(Network::with_seed(4, 3, 2, -0.5, 1), Err(NetError::Configuration(_))));
        assert!(matches!(Network::with_seed(4, 3, 2, f64::NAN, 1), Err(NetError::Configuration(_))));
    }

    #[test]
    fn weight_shapes_follow_layer_sizes() {
        let net = Network::with_seed(6, 4, 3, 0.2, 9).unwrap();
        assert_eq!((net.weights_input_hidden().rows, net.weights_input_hidden().cols), (4, 6));
        assert_eq!((net.weights_hidden_output().rows, net.weights_hidden_output().cols), (3, 4));
    }

    #[test]
    fn query_output_has_output_size_entries_in_open_unit_interval() {
        let net = Network::with_seed(12, 7, 5, 0.3, 3).unwrap();
        for input in [vec![0.0; 12], vec![1.0; 12], (0..12).map(|i| i as f64 / 12.0).collect()] {
            let out = net.query(&input).unwrap();
            assert_eq!(out.len(), 5);
            assert!(out.iter().all(|&y| y > 0.0 && y < 1.0), "{:?}", out);
        }
    }

    #[test]
    fn zero_weights_give_one_half_everywhere() {
        let net = Network::from_weights(Matrix::zeros(3, 4), Matrix::zeros(2, 3), 0.1).unwrap();
        assert_eq!(net.query(&[0.2, 0.4, 0.6, 0.8]).unwrap(), vec![0.5, 0.5]);
    }

    #[test]
    fn same_seed_gives_identical_outputs() {
        let a = Network::with_seed(20, 8, 4, 0.2, 42).unwrap();
        let b = Network::with_seed(20, 8, 4, 0.2, 42).unwrap();
        let input: Vec<f64> = (0..20).map(|i| 0.01 + (i as f64 / 19.0) * 0.99).collect();
        assert_eq!(a.query(&input).unwrap(), b.query(&input).unwrap());

        let c = Network::with_seed(20, 8, 4, 0.2, 43).unwrap();
        assert_ne!(a.query(&input).unwrap(), c.query(&input).unwrap());
    }

    #[test]
    fn query_does_not_mutate_weights() {
        let net = Network::with_seed(5, 3, 2, 0.2, 1).unwrap();
        let before = net.clone();
        net.query(&[0.1, 0.2, 0.3, 0.4, 0.5]).unwrap();
        assert_eq!(net.weights_input_hidden(), before.weights_input_hidden());
        assert_eq!(net.weights_hidden_output(), before.weights_hidden_output());
    }

    #[test]
    fn wrong_lengths_fail_and_leave_weights_untouched() {
        let mut net = Network::with_seed(5, 3, 2, 0.2, 1).unwrap();
        let before = net.clone();

        match net.query(&[0.5; 4]) {
            Err(NetError::ShapeMismatch { expected: 5, got: 4, .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
        match net.train(&[0.5; 6], &[0.01, 0.99]) {
            Err(NetError::ShapeMismatch { expected: 5, got: 6, .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
        match net.train(&[0.5; 5], &[0.01, 0.99, 0.01]) {
            Err(NetError::ShapeMismatch { expected: 2, got: 3, .. }) => {}
            other => panic!("unexpected {:?}", other),
        }

        assert_eq!(net.weights_input_hidden(), before.weights_input_hidden());
        assert_eq!(net.weights_hidden_output(), before.weights_hidden_output());
    }

    #[test]
    fn from_weights_rejects_inconsistent_matrices() {
        let err = Network::from_weights(Matrix::zeros(3, 4), Matrix::zeros(2, 5), 0.1).unwrap_err();
        assert!(matches!(err, NetError::ShapeMismatch { expected: 3, got: 5, .. }));
    }

    #[test]
    fn single_step_matches_hand_computed_update() {
        // 2 inputs, 2 hidden, 1 output with simple weights.
        let wih = Matrix::from_data(vec![vec![0.1, -0.2], vec![0.4, 0.3]]);
        let who = Matrix::from_data(vec![vec![0.5, -0.6]]);
        let lr = 0.5;
        let mut net = Network::from_weights(wih, who, lr).unwrap();

        let input = [0.6, 0.9];
        let target = [0.99];

        let sig = |x: f64| 1.0 / (1.0 + (-x).exp());
        let h0 = sig(0.1 * 0.6 - 0.2 * 0.9);
        let h1 = sig(0.4 * 0.6 + 0.3 * 0.9);
        let o = sig(0.5 * h0 - 0.6 * h1);
        let e = 0.99 - o;
        let he = [0.5 * e, -0.6 * e];

        let expected_who = [
            0.5 + lr * e * o * (1.0 - o) * h0,
            -0.6 + lr * e * o * (1.0 - o) * h1,
        ];
        let d0 = he[0] * h0 * (1.0 - h0);
        let d1 = he[1] * h1 * (1.0 - h1);
        let expected_wih = [
            [0.1 + lr * d0 * 0.6, -0.2 + lr * d0 * 0.9],
            [0.4 + lr * d1 * 0.6, 0.3 + lr * d1 * 0.9],
        ];

        net.train(&input, &target).unwrap();

        let tol = 1e-12;
        for j in 0..2 {
            assert!((net.weights_hidden_output().data[0][j] - expected_who[j]).abs() < tol);
            for i in 0..2 {
                assert!((net.weights_input_hidden().data[j][i] - expected_wih[j][i]).abs() < tol);
            }
        }
    }

    #[test]
    fn output_row_moves_in_gradient_direction() {
        let mut net = Network::with_seed(8, 5, 3, 0.2, 11).unwrap();
        let input: Vec<f64> = (0..8).map(|i| 0.01 + 0.99 * (i as f64 / 7.0)).collect();
        let t = target(3, 1);

        let pass = net.forward(&input).unwrap();
        let before = net.weights_hidden_output().clone();
        net.train(&input, &t).unwrap();
        let after = net.weights_hidden_output();

        for k in 0..3 {
            let e = t[k] - pass.output[k];
            let grad = e * pass.output[k] * (1.0 - pass.output[k]);
            for j in 0..5 {
                let change = after.data[k][j] - before.data[k][j];
                let predicted = 0.2 * grad * pass.hidden[j];
                assert!((change - predicted).abs() < 1e-12);
                // Hidden activations are positive, so every link follows the sign of the error.
                assert_eq!(change > 0.0, e > 0.0);
            }
        }
    }

    #[test]
    fn every_step_on_one_example_raises_the_true_class() {
        let mut net = Network::with_seed(16, 10, 4, 0.2, 5).unwrap();
        let input: Vec<f64> = (0..16).map(|i| if i % 3 == 0 { 1.0 } else { 0.01 }).collect();
        let t = target(4, 2);

        let mut prev = net.query(&input).unwrap();
        for step in 1..=300 {
            net.train(&input, &t).unwrap();
            let cur = net.query(&input).unwrap();
            assert!(cur[2] > prev[2], "step {}: {} -> {}", step, prev[2], cur[2]);
            assert!(
                MseLoss::loss(&cur, &t) <= MseLoss::loss(&prev, &t),
                "step {}: error rose",
                step
            );
            prev = cur;
        }
    }

    #[test]
    fn train_step_returns_pre_update_output() {
        let mut net = Network::with_seed(4, 3, 2, 0.2, 2).unwrap();
        let input = [0.1, 0.5, 0.9, 0.3];
        let expected = net.query(&input).unwrap();
        assert_eq!(net.train_step(&input, &[0.99, 0.01]).unwrap(), expected);
        assert_ne!(net.query(&input).unwrap(), expected);
    }
}
