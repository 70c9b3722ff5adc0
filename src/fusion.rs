use rayon::prelude::*;

use crate::{Error, Result};

/// Activation a fused operator applies to its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activation {
    #[default]
    None,
    Relu,
    Relu6,
    Elu,
}

/// Metadata for a subtraction operator that may carry a fused activation.
/// Plain attribute holder; the kernel consuming it lives elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubFusion {
    activation: Activation,
}

impl SubFusion {
    pub const NAME: &'static str = "SubFusion";

    pub fn new(activation: Activation) -> Self {
        Self { activation }
    }

    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    pub fn set_activation(&mut self, activation: Activation) {
        self.activation = activation;
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }
}

/// ELU over a flat buffer: negative inputs decay to `alpha * (e^x - 1)`,
/// the rest pass through.
pub fn elu(input: &[f32], output: &mut [f32], alpha: f32) -> Result<()> {
    if input.len() != output.len() {
        return Err(Error::Shape(format!(
            "input holds {} elements, output {}",
            input.len(),
            output.len()
        )));
    }

    output
        .par_iter_mut()
        .zip(input.par_iter())
        .for_each(|(out, &x)| {
            *out = if x < 0.0 { alpha * x.exp_m1() } else { x };
        });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elu_spot_values() {
        let input = [-2.0f32, -1.0, 0.0, 0.5, 3.0];
        let mut output = [0.0f32; 5];

        elu(&input, &mut output, 1.0).unwrap();

        assert!((output[0] - (-0.864_664_7)).abs() < 1e-6);
        assert!((output[1] - (-0.632_120_56)).abs() < 1e-6);
        assert_eq!(output[2], 0.0);
        assert_eq!(output[3], 0.5);
        assert_eq!(output[4], 3.0);
    }

    #[test]
    fn elu_alpha_scales_negative_branch() {
        let mut output = [0.0f32; 1];
        elu(&[-1.0], &mut output, 2.0).unwrap();
        assert!((output[0] - 2.0 * (-0.632_120_56)).abs() < 1e-6);
    }

    #[test]
    fn elu_rejects_mismatched_buffers() {
        let mut output = [0.0f32; 2];
        assert!(matches!(
            elu(&[1.0], &mut output, 1.0).unwrap_err(),
            Error::Shape(_)
        ));
    }

    #[test]
    fn sub_fusion_activation_round_trip() {
        let mut op = SubFusion::new(Activation::None);
        assert_eq!(op.name(), "SubFusion");
        assert_eq!(op.activation(), Activation::None);

        op.set_activation(Activation::Relu6);
        assert_eq!(op.activation(), Activation::Relu6);
        assert_eq!(SubFusion::default().activation(), Activation::None);
    }
}
