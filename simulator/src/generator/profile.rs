use rand::{rngs::StdRng, Rng, SeedableRng};
use scopecore::scan::Observation;
use serde::{Deserialize, Serialize};

const SSID_POOL: [&str; 6] = [
    "corridor", "atrium", "lab", "warehouse", "mezzanine", "printer",
];

const CAPABILITY_POOL: [&str; 5] = [
    "[WPA2-PSK-CCMP][ESS]",
    "[WPA3-SAE-CCMP][ESS]",
    "[WPA-PSK-TKIP][ESS]",
    "[WEP][ESS]",
    "[ESS]",
];

const FREQUENCY_POOL: [u32; 6] = [2412, 2437, 2462, 5180, 5240, 5500];

/// Configuration for the synthetic scan scene and the rotating sensor rig.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub network_count: usize,
    pub seed: u64,
    /// Per-epoch signal jitter, in dB.
    pub noise: f32,
    pub heading_rate_deg_s: f32,
    pub scenario: Option<String>,
    pub description: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            network_count: 8,
            seed: 0,
            noise: 4.0,
            heading_rate_deg_s: 12.0,
            scenario: None,
            description: None,
        }
    }
}

/// Latest motion/magnetic sample pair published to the orientation feed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SensorFrame {
    pub accelerometer: [f32; 3],
    pub magnetometer: [f32; 3],
}

/// Synthesizes one full-replacement scan. Identities (BSSID, SSID, channel,
/// capabilities) derive from the seed alone so the scene stays stable
/// across epochs; only the signal levels drift.
pub fn build_scan(config: &GeneratorConfig, epoch: u64) -> Vec<Observation> {
    let mut base = StdRng::seed_from_u64(config.seed);
    let mut drift = StdRng::seed_from_u64(config.seed ^ epoch.wrapping_mul(0x9e37_79b9));

    (0..config.network_count)
        .map(|index| {
            let octets: [u8; 6] = base.gen();
            let bssid = format!(
                "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
                octets[0], octets[1], octets[2], octets[3], octets[4], octets[5]
            );
            let ssid = if base.gen_bool(0.15) {
                String::new()
            } else {
                format!("{}-{:02}", SSID_POOL[index % SSID_POOL.len()], index)
            };
            let base_level = base.gen_range(-88..=-40);
            let jitter = drift.gen_range(-config.noise..=config.noise) as i32;
            Observation {
                bssid,
                ssid,
                signal_dbm: (base_level + jitter).clamp(-100, -30),
                frequency_mhz: FREQUENCY_POOL[base.gen_range(0..FREQUENCY_POOL.len())],
                capabilities: CAPABILITY_POOL[base.gen_range(0..CAPABILITY_POOL.len())].to_string(),
                wide_channel: base.gen_bool(0.3),
            }
        })
        .collect()
}

/// Sensor rig for a level device rotating at a fixed rate. Samples carry a
/// little jitter so the EMA in the orientation filter has work to do.
pub struct SensorRig {
    azimuth_deg: f32,
    rate_deg_s: f32,
    rng: StdRng,
}

impl SensorRig {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            azimuth_deg: 0.0,
            rate_deg_s: config.heading_rate_deg_s,
            rng: StdRng::seed_from_u64(config.seed.wrapping_add(1)),
        }
    }

    pub fn azimuth_deg(&self) -> f32 {
        self.azimuth_deg
    }

    /// Next sample pair after `dt_s` seconds of rotation.
    pub fn advance(&mut self, dt_s: f32) -> SensorFrame {
        self.azimuth_deg = (self.azimuth_deg + self.rate_deg_s * dt_s).rem_euclid(360.0);
        let rad = self.azimuth_deg.to_radians();
        let mut jitter = || self.rng.gen_range(-0.2..=0.2);
        SensorFrame {
            accelerometer: [jitter(), jitter(), 9.81 + jitter()],
            magnetometer: [
                -30.0 * rad.sin() + jitter(),
                30.0 * rad.cos() + jitter(),
                -40.0 + jitter(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identities_are_stable_across_epochs() {
        let config = GeneratorConfig::default();
        let first = build_scan(&config, 0);
        let later = build_scan(&config, 7);
        assert_eq!(first.len(), config.network_count);
        for (a, b) in first.iter().zip(&later) {
            assert_eq!(a.bssid, b.bssid);
            assert_eq!(a.ssid, b.ssid);
            assert_eq!(a.frequency_mhz, b.frequency_mhz);
        }
    }

    #[test]
    fn signal_levels_stay_in_the_plausible_band() {
        let config = GeneratorConfig {
            network_count: 40,
            noise: 12.0,
            ..Default::default()
        };
        for epoch in 0..5 {
            for obs in build_scan(&config, epoch) {
                assert!((-100..=-30).contains(&obs.signal_dbm));
            }
        }
    }

    #[test]
    fn rig_rotates_at_the_configured_rate() {
        let config = GeneratorConfig::default();
        let mut rig = SensorRig::new(&config);
        for _ in 0..50 {
            rig.advance(0.1);
        }
        // 12 deg/s for 5 s of simulated time.
        assert!((rig.azimuth_deg() - 60.0).abs() < 1e-3);
    }
}
