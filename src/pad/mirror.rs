use std::ops::Range;

use num::traits::NumAssign;

use crate::{layout::PadLayout, Error, Result};

/// Maps an output coordinate on one axis back into the input range.
///
/// `offset` selects the mirror variant: 1 reflects around the boundary
/// element without repeating it, 0 repeats it at the seam. Bounds
/// validation guarantees the result is in `[0, dim)` for any output
/// coordinate the layout can produce.
#[inline]
pub(crate) fn fold(o: usize, before: usize, dim: usize, offset: usize) -> usize {
    if o < before {
        before + offset - 1 - o
    } else if o < before + dim {
        o - before
    } else {
        dim - 1 - offset - (o - before - dim)
    }
}

/// Fills one outer-dimension band by folding the three outer coordinates
/// per line, then copying the contiguous interior run of the innermost axis
/// and folding only its border cells.
pub(crate) fn fill_band<T>(
    band: &mut [T],
    rows: Range<usize>,
    layout: &PadLayout,
    input: &[T],
    offset: usize,
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
        let i0 = fold(o0, pad[0][0], in_dim[0], offset);
        for o1 in 0..out_dim[1] {
            let i1 = fold(o1, pad[1][0], in_dim[1], offset);
            for o2 in 0..out_dim[2] {
                let i2 = fold(o2, pad[2][0], in_dim[2], offset);
                let base = i0 * layout.in_strides[0]
                    + i1 * layout.in_strides[1]
                    + i2 * layout.in_strides[2];

                let start = (o0 - rows.start) * layout.out_strides[0]
                    + o1 * layout.out_strides[1]
                    + o2 * layout.out_strides[2];
                let line = &mut band[start..start + out_dim[3]];

                for (o3, cell) in line[..pad[3][0]].iter_mut().enumerate() {
                    *cell = input[base + fold(o3, pad[3][0], in_dim[3], offset)];
                }
                line[pad[3][0]..pad[3][0] + in_dim[3]]
                    .copy_from_slice(&input[base..base + in_dim[3]]);
                for (o3, cell) in line[pad[3][0] + in_dim[3]..].iter_mut().enumerate() {
                    let o3 = o3 + pad[3][0] + in_dim[3];
                    *cell = input[base + fold(o3, pad[3][0], in_dim[3], offset)];
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_reflect_excludes_seam() {
        // dim 4, before 2: [c b | a b c d | c]
        let folded: Vec<_> = (0..7).map(|o| fold(o, 2, 4, 1)).collect();
        assert_eq!(folded, vec![2, 1, 0, 1, 2, 3, 2]);
    }

    #[test]
    fn fold_symmetric_repeats_seam() {
        // dim 4, before 2: [b a | a b c d | d]
        let folded: Vec<_> = (0..7).map(|o| fold(o, 2, 4, 0)).collect();
        assert_eq!(folded, vec![1, 0, 0, 1, 2, 3, 3]);
    }

    #[test]
    fn fold_symmetric_full_width() {
        // before = dim is the widest symmetric padding: a full mirrored copy
        let folded: Vec<_> = (0..8).map(|o| fold(o, 4, 4, 0)).collect();
        assert_eq!(folded, vec![3, 2, 1, 0, 0, 1, 2, 3]);
    }

    #[test]
    fn fold_is_identity_inside_the_window() {
        for o in 3..3 + 5 {
            assert_eq!(fold(o, 3, 5, 1), o - 3);
            assert_eq!(fold(o, 3, 5, 0), o - 3);
        }
    }
}
