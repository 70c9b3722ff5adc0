use std::ops::Range;

use ndarray::{Array, ArrayBase, Data, Dim, Dimension, IntoDimension, Ix};
use num::traits::NumAssign;
use rayon::prelude::*;

use crate::{
    layout::{PadLayout, CANONICAL_RANK},
    tasks, Error, PadMode, Result,
};

mod constant;
mod mirror;


pub type AxisPadding<const N: usize> = [[usize; 2]; N];

/// Lifecycle of a [`PadKernel`]. A `Failed` kernel stays inspectable but
/// must be re-initialized before the next run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelState {
    Uninitialized,
    Ready,
    Running,
    Failed,
}

/// Padding kernel over caller-owned flat buffers.
///
/// Holds the fill mode and the raw (before, after) padding list; `init`
/// derives the canonical [`PadLayout`] for a concrete input shape, `run`
/// partitions the output over a caller-owned thread pool.
#[derive(Debug, Clone)]
pub struct PadKernel<T: NumAssign + Copy> {
    mode: PadMode<T>,
    paddings: Vec<i64>,
    layout: Option<PadLayout>,
    state: KernelState,
}

impl<T: NumAssign + Copy> PadKernel<T> {
    pub fn new(mode: PadMode<T>, paddings: impl Into<Vec<i64>>) -> Self {
        Self {
            mode,
            paddings: paddings.into(),
            layout: None,
            state: KernelState::Uninitialized,
        }
    }

    /// Canonicalizes the shape, validates the padding against the mode and
    /// computes strides. On failure the previously derived layout is left
    /// untouched and the kernel is marked `Failed`.
    pub fn init(&mut self, in_shape: &[usize]) -> Result<()> {
        match PadLayout::new(in_shape, &self.paddings, self.mode) {
            Ok(layout) => {
                self.layout = Some(layout);
                self.state = KernelState::Ready;
                Ok(())
            }
            Err(err) => {
                self.state = KernelState::Failed;
                Err(err)
            }
        }
    }

    /// Re-derives the layout after an input shape change, reusing the
    /// stored padding list.
    pub fn resize(&mut self, in_shape: &[usize]) -> Result<()> {
        self.init(in_shape)
    }

    pub fn state(&self) -> KernelState {
        self.state
    }

    pub fn mode(&self) -> PadMode<T> {
        self.mode
    }

    pub fn layout(&self) -> Option<&PadLayout> {
        self.layout.as_ref()
    }

    pub fn output_shape(&self) -> Option<[usize; CANONICAL_RANK]> {
        self.layout.map(|layout| layout.out_shape)
    }

    /// Pads `input` into `output` with one task per pool thread (capped by
    /// the outer output dimension), aggregating the first task failure.
    pub fn run(
        &mut self,
        pool: &rayon::ThreadPool,
        input: &[T],
        output: &mut [T],
    ) -> Result<()>
    where
        T: Send + Sync,
    {
        if self.state != KernelState::Ready {
            return Err(Error::Runtime(format!(
                "kernel state is {:?}, run requires Ready",
                self.state
            )));
        }
        let Some(layout) = self.layout else {
            return Err(Error::Runtime("kernel has no layout".into()));
        };

        self.state = KernelState::Running;
        let mode = self.mode;
        let task_count = pool.current_num_threads().min(layout.out_shape[0]);
        let result = pool.install(|| dispatch(&layout, mode, input, output, task_count));
        self.state = match result {
            Ok(()) => KernelState::Ready,
            Err(_) => KernelState::Failed,
        };
        result
    }
}

// one unit of parallel work: a contiguous band of the outer output
// dimension, with exclusive ownership of the cells it writes.
struct PadTask<'a, T: NumAssign + Copy> {
    id: usize,
    rows: Range<usize>,
    band: &'a mut [T],
    input: &'a [T],
    layout: &'a PadLayout,
    mode: PadMode<T>,
}

impl<T: NumAssign + Copy> PadTask<'_, T> {
    fn run(self) -> Result<()> {
        let result = match self.mode {
            PadMode::Constant(value) => {
                constant::fill_band(self.band, self.rows, self.layout, self.input, value)
            }
            PadMode::Reflect => {
                mirror::fill_band(self.band, self.rows, self.layout, self.input, 1)
            }
            PadMode::Symmetric => {
                mirror::fill_band(self.band, self.rows, self.layout, self.input, 0)
            }
        };

        result.map_err(|err| match err {
            Error::Runtime(msg) => Error::Runtime(format!("task {}: {}", self.id, msg)),
            other => other,
        })
    }
}

fn dispatch<T>(
    layout: &PadLayout,
    mode: PadMode<T>,
    input: &[T],
    output: &mut [T],
    task_count: usize,
) -> Result<()>
where
    T: NumAssign + Copy + Send + Sync,
{
    if input.len() != layout.in_len() {
        return Err(Error::Runtime(format!(
            "input buffer holds {} elements, layout expects {}",
            input.len(),
            layout.in_len()
        )));
    }
    if output.len() != layout.out_len() {
        return Err(Error::Runtime(format!(
            "output buffer holds {} elements, layout expects {}",
            output.len(),
            layout.out_len()
        )));
    }

    // every task owns a disjoint sub-slice of the output, so the bands can
    // be filled concurrently without synchronization
    let row = layout.out_strides[0];
    let bands = tasks::bands(layout.out_shape[0], task_count);
    let band_rows = bands[0].len();
    let jobs: Vec<_> = bands
        .into_iter()
        .zip(output.chunks_mut(band_rows * row))
        .enumerate()
        .map(|(id, (rows, band))| PadTask {
            id,
            rows,
            band,
            input,
            layout,
            mode,
        })
        .collect();

    jobs.into_par_iter().try_for_each(|task| task.run())
}

/// Allocating convenience surface: pads any array of rank ≤ 4 on the
/// global rayon pool and returns the enlarged array.
pub trait PadExt<const N: usize, T: NumAssign + Copy, Output> {
    fn pad(&self, mode: PadMode<T>, paddings: AxisPadding<N>) -> Result<Output>;
}

impl<const N: usize, T, S> PadExt<N, T, Array<T, Dim<[Ix; N]>>> for ArrayBase<S, Dim<[Ix; N]>>
where
    T: NumAssign + Copy + Send + Sync,
    S: Data<Elem = T>,
    Dim<[Ix; N]>: Dimension,
    [Ix; N]: IntoDimension<Dim = Dim<[Ix; N]>>,
{
    fn pad(
        &self,
        mode: PadMode<T>,
        paddings: AxisPadding<N>,
    ) -> Result<Array<T, Dim<[Ix; N]>>> {
        let shape: [usize; N] = std::array::from_fn(|i| self.raw_dim()[i]);
        let flat: Vec<i64> = paddings
            .iter()
            .flat_map(|pair| [pair[0] as i64, pair[1] as i64])
            .collect();
        let layout = PadLayout::new(&shape, &flat, mode)?;

        let out_shape: [usize; N] =
            std::array::from_fn(|i| layout.out_shape[CANONICAL_RANK - N + i]);
        let mut output = Array::from_elem(out_shape, T::zero());

        let input = self.as_standard_layout();
        dispatch(
            &layout,
            mode,
            input.as_slice().unwrap(),
            output.as_slice_mut().unwrap(),
            rayon::current_num_threads(),
        )?;

        Ok(output)
    }
}
