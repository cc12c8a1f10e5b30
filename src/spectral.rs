//! Velocity diffusion and incompressibility projection in frequency space.
//!
//! Each velocity channel goes through a real-to-complex 2D transform built
//! from a real FFT along every row followed by a complex FFT along every
//! column of the `(N/2 + 1) x N` half spectrum. The spectrum is kept
//! column-major (`j + N * i` for frequency column `i`, row `j`) so the column
//! transforms run over one contiguous buffer.

use crate::config::validate_resolution;
use crate::error::{SimError, alloc_buffer};
use glam::Vec2;
use realfft::{ComplexToReal, RealFftPlanner, RealToComplex};
use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

/// Wavenumbers with `kx² + ky²` below this are passed through untouched.
const ZERO_WAVENUMBER: f32 = 1e-9;

struct TransformPlans {
    size: usize,
    half: usize,
    row_forward: Arc<dyn RealToComplex<f32>>,
    row_inverse: Arc<dyn ComplexToReal<f32>>,
    column_forward: Arc<dyn Fft<f32>>,
    column_inverse: Arc<dyn Fft<f32>>,
}

impl TransformPlans {
    fn new(size: usize) -> Self {
        let mut real_planner = RealFftPlanner::<f32>::new();
        let mut complex_planner = FftPlanner::<f32>::new();
        Self {
            size,
            half: size / 2 + 1,
            row_forward: real_planner.plan_fft_forward(size),
            row_inverse: real_planner.plan_fft_inverse(size),
            column_forward: complex_planner.plan_fft_forward(size),
            column_inverse: complex_planner.plan_fft_inverse(size),
        }
    }

    fn scratch_len(&self) -> usize {
        self.row_forward
            .get_scratch_len()
            .max(self.row_inverse.get_scratch_len())
            .max(self.column_forward.get_inplace_scratch_len())
            .max(self.column_inverse.get_inplace_scratch_len())
    }

    /// Unnormalised forward transform. `real` is clobbered.
    fn forward(
        &self,
        real: &mut [f32],
        spectrum: &mut [Complex<f32>],
        rows: &mut [Complex<f32>],
        scratch: &mut [Complex<f32>],
    ) -> Result<(), SimError> {
        let (n, h) = (self.size, self.half);

        let row_scratch = &mut scratch[..self.row_forward.get_scratch_len()];
        for (row_in, row_out) in real.chunks_exact_mut(n).zip(rows.chunks_exact_mut(h)) {
            self.row_forward.process_with_scratch(row_in, row_out, row_scratch)?;
        }

        for j in 0..n {
            for i in 0..h {
                spectrum[j + n * i] = rows[i + h * j];
            }
        }

        self.column_forward.process_with_scratch(spectrum, scratch);
        Ok(())
    }

    /// Unnormalised inverse transform. `spectrum` is clobbered.
    fn inverse(
        &self,
        spectrum: &mut [Complex<f32>],
        real: &mut [f32],
        rows: &mut [Complex<f32>],
        scratch: &mut [Complex<f32>],
    ) -> Result<(), SimError> {
        let (n, h) = (self.size, self.half);

        self.column_inverse.process_with_scratch(spectrum, scratch);

        for j in 0..n {
            for i in 0..h {
                rows[i + h * j] = spectrum[j + n * i];
            }
        }

        let row_scratch = &mut scratch[..self.row_inverse.get_scratch_len()];
        for (row_in, row_out) in rows.chunks_exact_mut(h).zip(real.chunks_exact_mut(n)) {
            // DC and Nyquist bins of a real row carry no imaginary part; drop
            // the rounding residue the projection leaves there.
            row_in[0].im = 0.0;
            row_in[h - 1].im = 0.0;
            self.row_inverse.process_with_scratch(row_in, row_out, row_scratch)?;
        }
        Ok(())
    }
}

/// Owns the FFT plans and work buffers for one grid resolution. Plans are
/// created once and reused for every step.
pub struct SpectralDiffuser {
    plans: TransformPlans,
    real_u: Vec<f32>,
    real_v: Vec<f32>,
    spectrum_u: Vec<Complex<f32>>,
    spectrum_v: Vec<Complex<f32>>,
    rows: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
}

impl SpectralDiffuser {
    pub fn new(size: usize) -> Result<Self, SimError> {
        validate_resolution(size)?;

        let plans = TransformPlans::new(size);
        let bins = plans.half * size;
        let zero = Complex::new(0.0f32, 0.0);

        let diffuser = Self {
            real_u: alloc_buffer(size * size, 0.0)?,
            real_v: alloc_buffer(size * size, 0.0)?,
            spectrum_u: alloc_buffer(bins, zero)?,
            spectrum_v: alloc_buffer(bins, zero)?,
            rows: alloc_buffer(bins, zero)?,
            scratch: alloc_buffer(plans.scratch_len(), zero)?,
            plans,
        };

        log::info!(
            "planned {size}x{size} spectral solver ({bins} complex bins per channel)"
        );
        Ok(diffuser)
    }

    pub fn size(&self) -> usize {
        self.plans.size
    }

    /// Damps every frequency by `exp(-k² dt viscosity)` and projects it onto
    /// the divergence-free subspace, in place. The zero wavenumber (mean
    /// flow) passes through unchanged.
    pub fn apply(&mut self, velocity: &mut [Vec2], viscosity: f32, dt: f32) -> Result<(), SimError> {
        let n = self.plans.size;
        debug_assert_eq!(velocity.len(), n * n);

        for ((u, v), vel) in self.real_u.iter_mut().zip(self.real_v.iter_mut()).zip(velocity.iter()) {
            *u = vel.x;
            *v = vel.y;
        }

        self.plans
            .forward(&mut self.real_u, &mut self.spectrum_u, &mut self.rows, &mut self.scratch)?;
        self.plans
            .forward(&mut self.real_v, &mut self.spectrum_v, &mut self.rows, &mut self.scratch)?;

        self.damp_and_project(viscosity, dt);

        self.plans
            .inverse(&mut self.spectrum_u, &mut self.real_u, &mut self.rows, &mut self.scratch)?;
        self.plans
            .inverse(&mut self.spectrum_v, &mut self.real_v, &mut self.rows, &mut self.scratch)?;

        let scale = 1.0 / (n * n) as f32;
        for ((vel, u), v) in velocity.iter_mut().zip(&self.real_u).zip(&self.real_v) {
            *vel = Vec2::new(*u, *v) * scale;
        }
        Ok(())
    }

    fn damp_and_project(&mut self, viscosity: f32, dt: f32) {
        let (n, h) = (self.plans.size, self.plans.half);

        for i in 0..h {
            let kx = i as f32;
            for j in 0..n {
                let ky = if j <= n / 2 { j as f32 } else { j as f32 - n as f32 };
                let kk = kx * kx + ky * ky;
                if kk <= ZERO_WAVENUMBER {
                    continue;
                }

                // Mass-conserving flow is perpendicular to the wavenumber, so
                // subtracting the parallel part removes divergence.
                let wxx = kx * kx / kk;
                let wxy = kx * ky / kk;
                let wyy = ky * ky / kk;
                let f = (-kk * dt * viscosity).exp();

                let idx = j + n * i;
                let u = self.spectrum_u[idx];
                let v = self.spectrum_v[idx];
                self.spectrum_u[idx] = (u * (1.0 - wxx) - v * wxy) * f;
                self.spectrum_v[idx] = (v * (1.0 - wyy) - u * wxy) * f;
            }
        }
    }
}

impl std::fmt::Debug for SpectralDiffuser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpectralDiffuser")
            .field("size", &self.plans.size)
            .finish_non_exhaustive()
    }
}
