//! Sample findings used by the simulated producers and `--sample` runs.

use chrono::{Duration, Utc};
use rand::Rng;

use bulwark_core::{
    mask_secret, CredentialEntry, NetworkDetails, SecurityIssue, Status, SystemInfo,
};

use crate::classify::classify;

type NetworkRow = (&'static str, &'static str, u8, Status);

const NETWORKS: &[NetworkRow] = &[
    ("HomeNetwork_5G", "WPA2-PSK", 95, Status::Secure),
    ("Office_Network", "WPA3", 78, Status::Secure),
    ("GuestWiFi", "WPA2", 82, Status::Secure),
    ("CafeWiFi_FREE", "Open", 45, Status::Critical),
    ("Neighbor_Network", "WEP", 30, Status::Warning),
];

/// What a manual re-scan sees a little later: signals drift, the café and
/// neighbor networks are gone and an open public network appeared.
const RESCANNED_NETWORKS: &[NetworkRow] = &[
    ("HomeNetwork_5G", "WPA2-PSK", 92, Status::Secure),
    ("Office_Network", "WPA3", 75, Status::Secure),
    ("GuestWiFi", "WPA2", 84, Status::Secure),
    ("PublicWiFi", "Open", 40, Status::Critical),
];

fn to_networks(rows: &[NetworkRow]) -> Vec<NetworkDetails> {
    rows.iter()
        .map(|&(ssid, encryption, signal, status)| NetworkDetails {
            ssid: ssid.to_string(),
            encryption: encryption.to_string(),
            signal,
            status,
        })
        .collect()
}

/// Networks seen by the sample network scan.
#[must_use]
pub fn networks() -> Vec<NetworkDetails> {
    to_networks(NETWORKS)
}

/// Networks seen by a manual network re-scan.
#[must_use]
pub fn rescanned_networks() -> Vec<NetworkDetails> {
    to_networks(RESCANNED_NETWORKS)
}

/// Resource metrics for the sample system scan. CPU and memory load are
/// drawn at random (10-39% and 30-69%).
#[must_use]
pub fn system_info() -> SystemInfo {
    let mut rng = rand::rng();
    SystemInfo {
        cpu_usage: rng.random_range(10..40),
        memory_usage: rng.random_range(30..70),
        disk_usage: 65,
        battery_level: 78,
        temperature: 42,
        running_processes: 72,
        suspicious_processes: 1,
        last_updated: Utc::now(),
        status: Status::Warning,
    }
}

/// Issues raised by the sample system scan.
#[must_use]
pub fn issues() -> Vec<SecurityIssue> {
    let now = Utc::now();
    vec![
        SecurityIssue {
            id: "1".into(),
            title: "Operating System Update Required".into(),
            description: "The operating system is missing security updates. \
                          Update to stay protected against recent vulnerabilities."
                .into(),
            severity: Status::Warning,
            detected: now,
        },
        SecurityIssue {
            id: "2".into(),
            title: "Suspicious Process Detected".into(),
            description: "The process \"background_service\" shows unusual behavior \
                          and may be malicious. Run a malware scan."
                .into(),
            severity: Status::Critical,
            detected: now,
        },
        SecurityIssue {
            id: "3".into(),
            title: "High Resource Usage".into(),
            description: "Resource usage is higher than normal, which can point to \
                          malware or a misbehaving application."
                .into(),
            severity: Status::Warning,
            detected: now,
        },
    ]
}

/// Pre-assessed credential entries: (service, account, secret length,
/// strength, age in days).
const SAMPLE_CREDENTIALS: &[(&str, &str, usize, u8, i64)] = &[
    ("Email Account", "user@example.com", 12, 85, 30),
    ("Banking", "financial_user", 15, 95, 15),
    ("Social Media", "social_user", 6, 45, 180),
    ("Shopping", "shop_user", 4, 20, 365),
];

/// Credential entries for a sample vault.
#[must_use]
pub fn credentials() -> Vec<CredentialEntry> {
    let now = Utc::now();
    SAMPLE_CREDENTIALS
        .iter()
        .enumerate()
        .map(
            |(i, &(service, account, length, strength, age_days))| CredentialEntry {
                id: format!("sample-{}", i + 1),
                service: service.to_string(),
                account: account.to_string(),
                masked: mask_secret(&"x".repeat(length)),
                strength,
                status: classify(strength),
                last_updated: now - Duration::days(age_days),
            },
        )
        .collect()
}
