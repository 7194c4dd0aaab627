//! Shared helpers for the integration tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scene_math::matrix::Mat4;
use scene_math::transform::Transform;
use scene_math::vector::Vec3;

/// Installs a test-writer subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_test_writer()
        .try_init();
}

/// Deterministic RNG so property failures reproduce.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn random_vec(rng: &mut StdRng, extent: f64) -> Vec3<f64> {
    Vec3::new(
        rng.gen_range(-extent..extent),
        rng.gen_range(-extent..extent),
        rng.gen_range(-extent..extent),
    )
}

/// Random axis of length at least 0.1.
pub fn random_axis(rng: &mut StdRng) -> Vec3<f64> {
    loop {
        let v = random_vec(rng, 1.0);
        if v.length() > 0.1 {
            return v;
        }
    }
}

/// Angle in degrees covering a full turn either way.
pub fn random_angle(rng: &mut StdRng) -> f64 {
    rng.gen_range(-360.0..360.0)
}

/// Scale factor bounded away from zero, with a random sign.
pub fn random_factor(rng: &mut StdRng) -> f64 {
    let f = rng.gen_range(0.25..4.0);
    if rng.gen_bool(0.2) {
        -f
    } else {
        f
    }
}

/// Builds a transform from `steps` random translate/rotate/scale mutators.
pub fn random_transform(rng: &mut StdRng, steps: usize) -> Transform<f64> {
    let mut t = Transform::new();
    for _ in 0..steps {
        match rng.gen_range(0..6) {
            0 => {
                t.translate(random_vec(rng, 10.0));
            }
            1 => {
                t.rotate_x(random_angle(rng));
            }
            2 => {
                t.rotate_y(random_angle(rng));
            }
            3 => {
                t.rotate_z(random_angle(rng));
            }
            4 => {
                t.rotate(random_angle(rng), random_axis(rng));
            }
            _ => {
                t.scale(Vec3::new(
                    random_factor(rng),
                    random_factor(rng),
                    random_factor(rng),
                ));
            }
        }
    }
    t
}

/// Fails with both matrices printed when any entry differs by more than `eps`.
pub fn ensure_mat_near(a: &Mat4<f64>, b: &Mat4<f64>, eps: f64) -> anyhow::Result<()> {
    anyhow::ensure!(a.approx_eq(b, eps), "matrices differ by more than {eps}:\n{a:?}\n{b:?}");
    Ok(())
}

pub fn ensure_vec_near(a: Vec3<f64>, b: Vec3<f64>, eps: f64) -> anyhow::Result<()> {
    anyhow::ensure!((a - b).length() <= eps, "vectors differ by more than {eps}: {a:?} vs {b:?}");
    Ok(())
}
