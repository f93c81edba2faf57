use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder rendered wherever an SSID is blank.
pub const HIDDEN_LABEL: &str = "HIDDEN";

/// One access point from the latest scan cycle. A scan delivers a full
/// replacement of the prior observation set, keyed by BSSID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub bssid: String,
    pub ssid: String,
    pub signal_dbm: i32,
    pub frequency_mhz: u32,
    pub capabilities: String,
    /// Channel width above 20 MHz; hosts without the field leave it false.
    #[serde(default)]
    pub wide_channel: bool,
}

impl Observation {
    /// Display name truncated to `max_chars` with an ellipsis; blank SSIDs
    /// render as the hidden placeholder.
    pub fn display_name(&self, max_chars: usize) -> String {
        if self.ssid.is_empty() {
            return HIDDEN_LABEL.to_string();
        }
        if self.ssid.chars().count() > max_chars {
            let head: String = self.ssid.chars().take(max_chars).collect();
            format!("{head}...")
        } else {
            self.ssid.clone()
        }
    }

    /// Wi-Fi channel number from the carrier frequency; 0 outside the
    /// 2.4 GHz and 5 GHz allocations.
    pub fn channel(&self) -> u32 {
        match self.frequency_mhz {
            2412..=2484 => (self.frequency_mhz - 2412) / 5 + 1,
            5170..=5825 => (self.frequency_mhz - 5170) / 5 + 34,
            _ => 0,
        }
    }

    /// Estimated range in metres from the log-distance path-loss model at a
    /// nominal 2.4 GHz carrier.
    pub fn estimated_range_m(&self) -> f64 {
        let exponent =
            (27.55 - 20.0 * 2400.0_f64.log10() + f64::from(self.signal_dbm.abs())) / 20.0;
        10.0_f64.powf(exponent)
    }

    pub fn security(&self) -> Security {
        Security::classify(&self.capabilities)
    }

    pub fn supports_wps(&self) -> bool {
        self.capabilities.contains("WPS")
    }

    pub fn channel_width_label(&self) -> &'static str {
        if self.wide_channel {
            "40+ MHz"
        } else {
            "20 MHz"
        }
    }
}

/// Security classification over the capability token string, matched in
/// priority order; first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Security {
    Wpa3,
    Wpa2,
    Wpa,
    Wep,
    Open,
}

impl Security {
    pub fn classify(capabilities: &str) -> Self {
        if capabilities.contains("WPA3") {
            Security::Wpa3
        } else if capabilities.contains("WPA2") {
            Security::Wpa2
        } else if capabilities.contains("WPA") {
            Security::Wpa
        } else if capabilities.contains("WEP") {
            Security::Wep
        } else {
            Security::Open
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Security::Wpa3 => "WPA3",
            Security::Wpa2 => "WPA2",
            Security::Wpa => "WPA",
            Security::Wep => "WEP",
            Security::Open => "OPEN",
        }
    }
}

impl fmt::Display for Security {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(capabilities: &str) -> Observation {
        Observation {
            bssid: "AA:BB:CC:11:22:33".into(),
            ssid: "corridor".into(),
            signal_dbm: -60,
            frequency_mhz: 2437,
            capabilities: capabilities.into(),
            wide_channel: false,
        }
    }

    #[test]
    fn security_matches_in_priority_order() {
        assert_eq!(Security::classify("[WPA2-PSK][WPA3-SAE]"), Security::Wpa3);
        assert_eq!(Security::classify("[WPA2-PSK-CCMP][ESS]"), Security::Wpa2);
        assert_eq!(Security::classify("[WPA-PSK-TKIP]"), Security::Wpa);
        assert_eq!(Security::classify("[WEP]"), Security::Wep);
        assert_eq!(Security::classify("[ESS]"), Security::Open);
    }

    #[test]
    fn channel_mapping_covers_both_bands() {
        let mut obs = observation("[ESS]");
        assert_eq!(obs.channel(), 6);
        obs.frequency_mhz = 2412;
        assert_eq!(obs.channel(), 1);
        obs.frequency_mhz = 5180;
        assert_eq!(obs.channel(), 36);
        obs.frequency_mhz = 900;
        assert_eq!(obs.channel(), 0);
    }

    #[test]
    fn blank_ssid_renders_hidden_placeholder() {
        let mut obs = observation("[ESS]");
        obs.ssid.clear();
        assert_eq!(obs.display_name(12), HIDDEN_LABEL);
    }

    #[test]
    fn long_ssid_is_truncated_with_ellipsis() {
        let mut obs = observation("[ESS]");
        obs.ssid = "a-rather-long-network-name".into();
        assert_eq!(obs.display_name(12), "a-rather-lon...");
        obs.ssid = "short".into();
        assert_eq!(obs.display_name(12), "short");
    }

    #[test]
    fn path_loss_range_grows_with_weaker_signal() {
        let near = observation("[ESS]");
        let mut far = observation("[ESS]");
        far.signal_dbm = -90;
        assert!((near.estimated_range_m() - 9.94).abs() < 0.1);
        assert!(far.estimated_range_m() > near.estimated_range_m());
        assert!((far.estimated_range_m() - 314.26).abs() < 1.0);
    }

    #[test]
    fn wps_flag_comes_from_capabilities() {
        assert!(observation("[WPA2-PSK][WPS][ESS]").supports_wps());
        assert!(!observation("[WPA2-PSK][ESS]").supports_wps());
    }
}
