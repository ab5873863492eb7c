//! Fixed-order state-space integrator.
//!
//! Classical fourth-order Runge-Kutta over a linear time-invariant model
//! `dx/dt = A·x + B·u`, `y = C·x + D·u`, with linear interpolation of the
//! input across each step (`u_mid = ½·(u_n + u_{n+1})` for the midpoint
//! stages). When the caller holds the input constant the scheme reduces to
//! standard RK4 with constant forcing.
//!
//! All arithmetic is single precision with a fixed row-then-column stride,
//! so results are bit-reproducible on a given IEEE-754 target.

use thiserror::Error;

/// Linear time-invariant state-space model.
///
/// `NX` states, `NU` inputs, `NY` outputs. Matrices are row-major, single
/// precision. Shared read-only across all consumers; dimensions are carried
/// in the type, so a shape mismatch cannot be constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct StateSpace<const NX: usize, const NU: usize, const NY: usize> {
    /// System matrix (NX × NX).
    pub a: [[f32; NX]; NX],
    /// Input matrix (NX × NU).
    pub b: [[f32; NU]; NX],
    /// Output matrix (NY × NX).
    pub c: [[f32; NX]; NY],
    /// Feedthrough matrix (NY × NU).
    pub d: [[f32; NU]; NY],
}

/// Integration step failure.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum SolveError {
    /// The step size was zero, negative, or not finite.
    #[error("step size must be positive and finite, got {0}")]
    InvalidStepSize(f32),
}

impl<const NX: usize, const NU: usize, const NY: usize> StateSpace<NX, NU, NY> {
    /// `xdot = A·x + B·u`.
    #[inline]
    fn derivative(&self, x: &[f32; NX], u: &[f32; NU]) -> [f32; NX] {
        let mut xdot = [0.0f32; NX];
        for i in 0..NX {
            let mut acc = 0.0f32;
            for j in 0..NX {
                acc += self.a[i][j] * x[j];
            }
            for j in 0..NU {
                acc += self.b[i][j] * u[j];
            }
            xdot[i] = acc;
        }
        xdot
    }

    /// `y = C·x + D·u`.
    #[inline]
    fn output(&self, x: &[f32; NX], u: &[f32; NU]) -> [f32; NY] {
        let mut y = [0.0f32; NY];
        for i in 0..NY {
            let mut acc = 0.0f32;
            for j in 0..NX {
                acc += self.c[i][j] * x[j];
            }
            for j in 0..NU {
                acc += self.d[i][j] * u[j];
            }
            y[i] = acc;
        }
        y
    }
}

/// Advance the state one RK4 step of length `h` and produce the next output.
///
/// `state` is advanced in place: it is read fully before being overwritten,
/// which is what lets the estimator and predictor chain sub-steps on a
/// single persistent buffer. The output is evaluated with the *new* state
/// and the *start-of-step* input `u_now`; downstream consumers rely on this
/// timing convention, so it must not be changed to `u_next`.
///
/// # Errors
///
/// [`SolveError::InvalidStepSize`] if `h` is not a positive finite number.
/// On error neither `state` nor `output` is written.
pub fn step<const NX: usize, const NU: usize, const NY: usize>(
    model: &StateSpace<NX, NU, NY>,
    h: f32,
    state: &mut [f32; NX],
    u_now: &[f32; NU],
    u_next: &[f32; NU],
    output: &mut [f32; NY],
) -> Result<(), SolveError> {
    if !h.is_finite() || h <= 0.0 {
        return Err(SolveError::InvalidStepSize(h));
    }

    let mut u_mid = [0.0f32; NU];
    for j in 0..NU {
        u_mid[j] = 0.5 * (u_now[j] + u_next[j]);
    }

    let half_h = 0.5 * h;
    let mut stage = [0.0f32; NX];

    let k0 = model.derivative(state, u_now);

    for i in 0..NX {
        stage[i] = state[i] + half_h * k0[i];
    }
    let k1 = model.derivative(&stage, &u_mid);

    for i in 0..NX {
        stage[i] = state[i] + half_h * k1[i];
    }
    let k2 = model.derivative(&stage, &u_mid);

    for i in 0..NX {
        stage[i] = state[i] + h * k2[i];
    }
    let k3 = model.derivative(&stage, u_next);

    let h_over_6 = h / 6.0;
    for i in 0..NX {
        state[i] += h_over_6 * (k0[i] + 2.0 * k1[i] + 2.0 * k2[i] + k3[i]);
    }

    *output = model.output(state, u_now);

    Ok(())
}

// ─── Tests ──────────────────────────────────────────────────────────
