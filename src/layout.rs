use num::traits::NumAssign;

use crate::{Error, PadMode, Result};

/// All shape and padding arithmetic is normalized to this rank; lower-rank
/// inputs are left-extended with size-1 dimensions.
pub const CANONICAL_RANK: usize = 4;

/// Derived state of one padding configuration: canonical shapes, canonical
/// padding and row-major strides for input and output.
///
/// Built once per init/resize and treated as read-only while tasks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PadLayout {
    pub in_shape: [usize; CANONICAL_RANK],
    pub out_shape: [usize; CANONICAL_RANK],
    pub paddings: [[usize; 2]; CANONICAL_RANK],
    pub in_strides: [usize; CANONICAL_RANK],
    pub out_strides: [usize; CANONICAL_RANK],
}

impl PadLayout {
    pub fn new<T: NumAssign + Copy>(
        shape: &[usize],
        paddings: &[i64],
        mode: PadMode<T>,
    ) -> Result<Self> {
        let in_shape = extend_shape(shape)?;
        let raw = extend_paddings(paddings, shape.len())?;
        let paddings = check_paddings(&in_shape, &raw, mode.mirror_offset())?;

        let out_shape =
            std::array::from_fn(|i| in_shape[i] + paddings[i][0] + paddings[i][1]);

        Ok(Self {
            in_shape,
            out_shape,
            paddings,
            in_strides: strides(&in_shape),
            out_strides: strides(&out_shape),
        })
    }

    pub fn in_len(&self) -> usize {
        self.in_shape.iter().product()
    }

    pub fn out_len(&self) -> usize {
        self.out_shape.iter().product()
    }
}

// right-aligns `shape` into the last slots; leading slots get size 1.
fn extend_shape(shape: &[usize]) -> Result<[usize; CANONICAL_RANK]> {
    if shape.len() > CANONICAL_RANK {
        return Err(Error::Shape(format!(
            "rank {} exceeds the canonical rank {}",
            shape.len(),
            CANONICAL_RANK
        )));
    }
    if let Some(axis) = shape.iter().position(|&d| d == 0) {
        return Err(Error::Shape(format!("dimension on axis {} is zero", axis)));
    }

    let lead = CANONICAL_RANK - shape.len();
    Ok(std::array::from_fn(|i| {
        if i < lead {
            1
        } else {
            shape[i - lead]
        }
    }))
}

// right-aligns the flat (before, after) list; leading slots get (0, 0).
fn extend_paddings(paddings: &[i64], rank: usize) -> Result<[[i64; 2]; CANONICAL_RANK]> {
    if paddings.len() % 2 != 0 {
        return Err(Error::Shape(format!(
            "padding list length {} is odd",
            paddings.len()
        )));
    }
    if paddings.len() != 2 * rank {
        return Err(Error::Shape(format!(
            "padding list length {} does not match rank {}",
            paddings.len(),
            rank
        )));
    }

    let lead = CANONICAL_RANK - rank;
    Ok(std::array::from_fn(|i| {
        if i < lead {
            [0, 0]
        } else {
            [paddings[2 * (i - lead)], paddings[2 * (i - lead) + 1]]
        }
    }))
}

// non-negativity for every mode; mirror modes additionally bound each pad
// by `dim - offset` so a folded index always lands inside the input.
fn check_paddings(
    shape: &[usize; CANONICAL_RANK],
    paddings: &[[i64; 2]; CANONICAL_RANK],
    mirror_offset: Option<usize>,
) -> Result<[[usize; 2]; CANONICAL_RANK]> {
    for (axis, pair) in paddings.iter().enumerate() {
        for &pad in pair {
            if pad < 0 {
                return Err(Error::Config(format!(
                    "padding {} on axis {} is negative",
                    pad, axis
                )));
            }
            if let Some(offset) = mirror_offset {
                let limit = shape[axis] - offset;
                if pad as usize > limit {
                    return Err(Error::Bounds {
                        axis,
                        pad: pad as usize,
                        dim: shape[axis],
                        limit,
                    });
                }
            }
        }
    }

    Ok(std::array::from_fn(|i| {
        [paddings[i][0] as usize, paddings[i][1] as usize]
    }))
}

// row-major: stride[3] = 1, stride[i] = stride[i + 1] * dim[i + 1].
fn strides(shape: &[usize; CANONICAL_RANK]) -> [usize; CANONICAL_RANK] {
    let mut strides = [1; CANONICAL_RANK];
    for i in (0..CANONICAL_RANK - 1).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }
    strides
}
