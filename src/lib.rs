//! N-dimension tensor padding (constant / reflect / symmetric) for [`ndarray`]
//! buffers, with work partitioned over a caller-owned rayon thread pool.

mod error;
mod fusion;
mod layout;
mod pad;
mod tasks;

pub use error::{Error, Result};
pub use fusion::{elu, Activation, SubFusion};
pub use layout::{PadLayout, CANONICAL_RANK};
pub use pad::{AxisPadding, KernelState, PadExt, PadKernel};

// border fill strategy. Constant carries the fill value; the two mirror
// variants differ in whether the seam element is repeated (Symmetric) or
// excluded (Reflect).
#[derive(Debug, Clone, Copy)]
pub enum PadMode<T: num::traits::NumAssign + Copy> {
    Constant(T),
    Reflect,
    Symmetric,
}

impl<T: num::traits::NumAssign + Copy> PadMode<T> {
    // seam offset used by both the bounds check and the index fold:
    // 1 excludes the boundary element, 0 repeats it.
    pub(crate) fn mirror_offset(&self) -> Option<usize> {
        match self {
            PadMode::Constant(_) => None,
            PadMode::Reflect => Some(1),
            PadMode::Symmetric => Some(0),
        }
    }
}
