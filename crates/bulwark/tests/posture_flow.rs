//! End-to-end flows through the `Posture` facade.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bulwark::producers::samples;
use bulwark::{CredentialVault, DynProducer, OrchestratorConfig, Posture, Producer};
use bulwark_core::{Findings, Result, ScoreLabel, SecurityIssue, Status, Subsystem};
use chrono::Utc;

struct FixedIssues(Vec<SecurityIssue>);

#[async_trait]
impl Producer for FixedIssues {
    fn subsystem(&self) -> Subsystem {
        Subsystem::System
    }

    async fn produce(&self) -> Result<Findings> {
        Ok(Findings::System {
            issues: self.0.clone(),
            info: None,
        })
    }
}

struct FixedStatus(Subsystem, Status);

#[async_trait]
impl Producer for FixedStatus {
    fn subsystem(&self) -> Subsystem {
        self.0
    }

    async fn produce(&self) -> Result<Findings> {
        tokio::time::sleep(Duration::from_millis(50)).await;
        let findings = match self.0 {
            Subsystem::Network => Findings::Networks(vec![bulwark_core::NetworkDetails {
                ssid: "lab".into(),
                encryption: "WPA3".into(),
                signal: 60,
                status: self.1,
            }]),
            Subsystem::Credential => Findings::Credentials(Vec::new()),
            Subsystem::System => Findings::System {
                issues: Vec::new(),
                info: None,
            },
        };
        Ok(findings)
    }
}

fn issue(id: &str, severity: Status) -> SecurityIssue {
    SecurityIssue {
        id: id.into(),
        title: id.to_uppercase(),
        description: String::new(),
        severity,
        detected: Utc::now(),
    }
}

#[tokio::test(start_paused = true)]
async fn default_cycle_with_sample_vault() {
    let vault = CredentialVault::with_entries(samples::credentials());
    let posture = Posture::with_vault(OrchestratorConfig::default(), vault).unwrap();

    assert!(!posture.is_scanning());
    let cycle = posture.begin_scan();
    assert!(posture.is_scanning());
    assert_eq!(posture.overall_score(), 0);

    cycle.wait().await;

    let state = posture.snapshot();
    assert!(!state.is_scanning);
    assert!(state.last_scan_at.is_some());
    assert_eq!(state.statuses(), [Status::Critical; 3]);
    assert_eq!(state.overall_score, 0);
    assert_eq!(posture.networks().len(), 5);
    assert_eq!(posture.issues().len(), 3);
    assert_eq!(posture.credentials().len(), 4);
}

#[tokio::test(start_paused = true)]
async fn mixed_subsystems_average_to_fifty() {
    let producers: Vec<DynProducer> = vec![
        Arc::new(FixedStatus(Subsystem::Network, Status::Secure)),
        Arc::new(FixedStatus(Subsystem::Credential, Status::Secure)),
        Arc::new(FixedIssues(vec![issue("a", Status::Critical)])),
    ];
    let posture = Posture::with_producers(OrchestratorConfig::default(), producers).unwrap();

    posture.begin_scan().wait().await;
    assert_eq!(posture.snapshot().credential_status, Status::Secure);
    assert_eq!(posture.overall_score(), 67);

    posture.resolve_subsystem(Subsystem::Credential, Status::Warning);
    assert_eq!(posture.overall_score(), 50);
    assert_eq!(bulwark::classify::label(posture.overall_score()), ScoreLabel::Moderate);
}

#[tokio::test(start_paused = true)]
async fn score_is_stale_until_every_subsystem_reports() {
    let producers: Vec<DynProducer> = vec![
        Arc::new(FixedStatus(Subsystem::Network, Status::Secure)),
        Arc::new(FixedStatus(Subsystem::Credential, Status::Secure)),
        Arc::new(FixedIssues(Vec::new())),
    ];
    let posture = Posture::with_producers(OrchestratorConfig::default(), producers).unwrap();
    posture.begin_scan().wait().await;
    assert_eq!(posture.overall_score(), 100);

    // Only two of three subsystems report in the next cycle
    let _cycle = posture.begin_scan();
    posture.resolve_subsystem(Subsystem::Network, Status::Critical);
    posture.resolve_subsystem(Subsystem::Credential, Status::Critical);
    assert!(posture.is_scanning());
    assert_eq!(posture.overall_score(), 100);
}

#[tokio::test(start_paused = true)]
async fn resolving_issues_walks_system_status_down() {
    let producers: Vec<DynProducer> = vec![Arc::new(FixedIssues(vec![
        issue("update", Status::Warning),
        issue("malware", Status::Critical),
    ]))];
    let posture = Posture::with_producers(OrchestratorConfig::default(), producers).unwrap();
    posture.begin_scan().wait().await;
    assert_eq!(posture.snapshot().system_status, Status::Critical);

    assert_eq!(posture.resolve_issue("malware"), Some(Status::Warning));
    assert_eq!(posture.snapshot().system_status, Status::Warning);

    assert_eq!(posture.resolve_issue("update"), Some(Status::Secure));
    assert!(posture.issues().is_empty());
    assert_eq!(posture.resolve_issue("update"), None);
}

#[tokio::test(start_paused = true)]
async fn unknown_issue_id_does_not_finish_the_scan() {
    let posture = Posture::new(OrchestratorConfig::default()).unwrap();
    let _cycle = posture.begin_scan();
    posture.resolve_subsystem(Subsystem::Network, Status::Secure);
    posture.resolve_subsystem(Subsystem::Credential, Status::Secure);
    let score = posture.overall_score();

    assert_eq!(posture.resolve_issue("does-not-exist"), None);
    assert!(posture.is_scanning());
    assert_eq!(posture.snapshot().system_status, Status::Scanning);
    assert_eq!(posture.overall_score(), score);
}

#[tokio::test(start_paused = true)]
async fn replacing_a_weak_credential_clears_critical() {
    let posture = Posture::new(OrchestratorConfig::immediate()).unwrap();
    posture.begin_scan().wait().await;
    let weak = posture.add_credential("Shopping", "shop_user", "welcome");
    assert_eq!(posture.snapshot().credential_status, Status::Critical);

    let strong = posture
        .replace_credential(&weak.id, "Tr0ub4dor&Horse!")
        .unwrap();
    assert_eq!(strong.id, weak.id);
    assert_eq!(strong.status, Status::Secure);
    assert_eq!(posture.snapshot().credential_status, Status::Secure);
    assert_eq!(posture.credentials().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn sample_scan_reports_host_metrics() {
    let posture = Posture::new(OrchestratorConfig::immediate()).unwrap();
    assert!(posture.system_info().is_none());
    assert!(posture.refresh_system_info().is_none());

    posture.begin_scan().wait().await;
    let info = posture.system_info().unwrap();
    assert_eq!(info.suspicious_processes, 1);
    assert!((10..40).contains(&info.cpu_usage));

    let refreshed = posture.refresh_system_info().unwrap();
    assert_eq!(refreshed.temperature, info.temperature);
    assert_eq!(posture.system_info(), Some(refreshed));
}

#[tokio::test(start_paused = true)]
async fn network_rescan_finds_public_wifi() {
    let posture = Posture::new(OrchestratorConfig::immediate()).unwrap();
    posture.begin_scan().wait().await;
    assert!(posture.networks().iter().all(|n| n.ssid != "PublicWiFi"));

    posture.rescan(Subsystem::Network).unwrap().wait().await;
    let networks = posture.networks();
    assert!(networks.iter().any(|n| n.ssid == "PublicWiFi" && n.signal == 40));
    assert_eq!(posture.snapshot().network_status, Status::Critical);
}

#[tokio::test(start_paused = true)]
async fn adding_a_weak_credential_turns_subsystem_critical() {
    let posture = Posture::new(OrchestratorConfig::immediate()).unwrap();
    posture.begin_scan().wait().await;
    assert_eq!(posture.snapshot().credential_status, Status::Secure);

    let entry = posture.add_credential("Shopping", "shop_user", "welcome");
    assert_eq!(entry.strength, 0);
    assert_eq!(entry.masked.chars().count(), 7);
    assert_eq!(posture.snapshot().credential_status, Status::Critical);
}

#[test]
fn invalid_config_is_rejected() {
    let config = OrchestratorConfig {
        cycle_timeout_ms: 0,
        ..OrchestratorConfig::default()
    };
    assert!(Posture::new(config).is_err());
}

#[test]
fn facade_scores_without_storing() {
    let report = Posture::score("");
    assert!(report.is_no_input());
    assert_eq!(Posture::score("password123").score, 0);
}
