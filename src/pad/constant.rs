use std::ops::Range;

use num::traits::NumAssign;

use crate::{layout::PadLayout, Error, Result};

#[inline]
fn interior(o: usize, pad: [usize; 2], dim: usize) -> Option<usize> {
    (o >= pad[0] && o < pad[0] + dim).then(|| o - pad[0])
}

/// Fills one outer-dimension band: interior lines copy the matching input
/// line between two constant runs, every other line is a bulk fill.
pub(crate) fn fill_band<T>(
    band: &mut [T],
    rows: Range<usize>,
    layout: &PadLayout,
    input: &[T],
    value: T,
) -> Result<()>
where
    T: NumAssign + Copy,
{
    let (in_dim, out_dim, pad) = (layout.in_shape, layout.out_shape, layout.paddings);
    if band.len() != rows.len() * layout.out_strides[0] {
        return Err(Error::Runtime(format!(
            "band covering rows {:?} holds {} elements, expected {}",
            rows,
            band.len(),
            rows.len() * layout.out_strides[0]
        )));
    }

    for o0 in rows.clone() {
        let i0 = interior(o0, pad[0], in_dim[0]);
        for o1 in 0..out_dim[1] {
            let i1 = interior(o1, pad[1], in_dim[1]);
            for o2 in 0..out_dim[2] {
                let start = (o0 - rows.start) * layout.out_strides[0]
                    + o1 * layout.out_strides[1]
                    + o2 * layout.out_strides[2];
                let line = &mut band[start..start + out_dim[3]];

                match (i0, i1, interior(o2, pad[2], in_dim[2])) {
                    (Some(i0), Some(i1), Some(i2)) => {
                        let base = i0 * layout.in_strides[0]
                            + i1 * layout.in_strides[1]
                            + i2 * layout.in_strides[2];
                        line[..pad[3][0]].fill(value);
                        line[pad[3][0]..pad[3][0] + in_dim[3]]
                            .copy_from_slice(&input[base..base + in_dim[3]]);
                        line[pad[3][0] + in_dim[3]..].fill(value);
                    }
                    _ => line.fill(value),
                }
            }
        }
    }

    Ok(())
}
