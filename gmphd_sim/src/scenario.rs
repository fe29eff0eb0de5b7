//! A small synthetic two-target-plus-clutter scenario used to exercise the
//! tracker end to end. All randomness is derived from one seed so a run is
//! reproducible byte-for-byte, mirroring the seed-mixing pattern used
//! elsewhere in this codebase for deterministic key derivation.

use nalgebra::{DMatrix, DVector};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use gmphd_core::{Detection, GaussianComponent, MeasurementModel};

pub struct ScenarioConfig {
    pub seed: u64,
    pub steps: usize,
    pub dt: f64,
    pub measurement_noise_std: f64,
    pub clutter_rate: usize,
    pub clutter_extent: f64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            steps: 20,
            dt: 1.0,
            measurement_noise_std: 0.5,
            clutter_rate: 2,
            clutter_extent: 50.0,
        }
    }
}

/// One target's constant-velocity ground truth.
struct Target {
    position: f64,
    velocity: f64,
}

/// Deterministic generator of `(time, detections)` batches for two targets
/// drifting apart plus uniform clutter.
pub struct Scenario {
    config: ScenarioConfig,
    rng: ChaCha8Rng,
    targets: Vec<Target>,
    time: f64,
}

impl Scenario {
    pub fn new(config: ScenarioConfig) -> Self {
        use rand::SeedableRng;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        let targets = vec![
            Target { position: -10.0, velocity: 1.0 },
            Target { position: 10.0, velocity: -0.5 },
        ];
        Self { config, rng, targets, time: 0.0 }
    }

    pub fn measurement_model(&self) -> MeasurementModel {
        MeasurementModel::new(
            DMatrix::identity(1, 1),
            DMatrix::from_element(1, 1, self.config.measurement_noise_std.powi(2)),
        )
    }

    pub fn birth_component(&self) -> GaussianComponent {
        GaussianComponent::birth_template(DVector::from_vec(vec![0.0]), DMatrix::from_element(1, 1, 100.0), 0.05)
    }

    /// Advances ground truth by `dt` and returns the detections observed at
    /// the new time: one noisy measurement per target plus Poisson-ish clutter.
    pub fn next_batch(&mut self) -> (f64, Vec<Detection>) {
        self.time += self.config.dt;
        let noise = Normal::new(0.0, self.config.measurement_noise_std).expect("positive std dev");

        let measurement_model = self.measurement_model();
        let mut detections = Vec::new();
        for target in &mut self.targets {
            target.position += target.velocity * self.config.dt;
            let measured = target.position + noise.sample(&mut self.rng);
            detections.push(Detection::new(DVector::from_vec(vec![measured]), self.time, measurement_model.clone()));
        }

        for _ in 0..self.config.clutter_rate {
            let clutter = self.rng.gen_range(-self.config.clutter_extent..self.config.clutter_extent);
            detections.push(Detection::new(DVector::from_vec(vec![clutter]), self.time, measurement_model.clone()));
        }

        (self.time, detections)
    }

    pub fn steps(&self) -> usize {
        self.config.steps
    }
}

/// Deterministic fresh-tag seed derived from the scenario seed, handed to
/// `TrackerConfig::rng_seed` so tag minting replays identically.
pub fn tag_rng_seed(scenario_seed: u64) -> u64 {
    scenario_seed.wrapping_mul(0x517cc1b727220a95).wrapping_add(1)
}
