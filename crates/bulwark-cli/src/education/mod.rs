//! Educational features: explanations and tips.

use colored::Colorize;

/// Command explanation builder.
pub struct Explain {
    description: String,
    what_happens: Vec<String>,
    scoring: Vec<String>,
    tip: Option<String>,
}

impl Explain {
    fn new(description: &str) -> Self {
        Self {
            description: description.to_string(),
            what_happens: Vec::new(),
            scoring: Vec::new(),
            tip: None,
        }
    }

    fn step(mut self, step: &str) -> Self {
        self.what_happens.push(step.to_string());
        self
    }

    fn rule(mut self, rule: &str) -> Self {
        self.scoring.push(rule.to_string());
        self
    }

    fn tip(mut self, tip: &str) -> Self {
        self.tip = Some(tip.to_string());
        self
    }

    /// Print the explanation to stdout.
    pub fn print(&self) {
        println!();
        println!("{}", "=== What This Does ===".bold().cyan());
        println!("{}", self.description);
        println!();

        if !self.what_happens.is_empty() {
            println!("{}", "How it works:".bold());
            for (i, step) in self.what_happens.iter().enumerate() {
                println!("  {}. {}", i + 1, step);
            }
            println!();
        }

        if !self.scoring.is_empty() {
            println!("{}", "Scoring:".bold());
            for rule in &self.scoring {
                println!("  - {rule}");
            }
            println!();
        }

        if let Some(tip) = &self.tip {
            println!("{} {}", "Tip:".bold(), tip.dimmed());
        }

        println!();
        println!("{}", "=== Results ===".bold().cyan());
        println!();
    }

    // ========================================================================
    // Factory methods for each command
    // ========================================================================

    pub fn scan() -> Self {
        Self::new("Runs a full posture scan across the network, credential and system subsystems.")
            .step("Every subsystem is reset to SCANNING")
            .step("Each producer runs independently and reports a status")
            .step("Once all three have reported, the overall score is recomputed")
            .step("A fixed cycle timer marks the scan finished")
            .rule("secure = 100, warning = 50, critical = 0 points per subsystem")
            .rule("overall score = rounded mean of the three")
            .rule("label: 80+ Excellent, 50+ Moderate, otherwise Poor")
            .tip("While a scan is running the overall score still shows the previous cycle.")
    }

    pub fn check() -> Self {
        Self::new("Scores a password locally. Nothing is stored or sent anywhere.")
            .rule("length: 12+ = 25, 8+ = 15, 6+ = 5 points")
            .rule("uppercase, lowercase, digit and symbol: 20 points each")
            .rule("three identical characters in a row: -10")
            .rule("ascending runs like abc or 123: -10")
            .rule("common passwords (password, qwerty, ...) always score 0")
            .rule("status: 70+ secure, 40+ warning, otherwise critical")
            .tip("Leave the prompt empty to see the no-input result.")
    }

    pub fn generate(length: usize) -> Self {
        Self::new(&format!("Generates a random {length}-character password."))
            .step("Each character is drawn uniformly from letters, digits and symbols")
            .step("The result is scored like any other password")
            .tip("Use --no-symbols for sites that reject special characters.")
    }

    pub fn credential_add(service: &str) -> Self {
        Self::new(&format!("Adds a credential for {service} to an in-memory vault."))
            .step("The secret is scored, then discarded")
            .step("Only a masked copy and the derived strength are kept")
            .step("The credential subsystem takes the worst status of all entries")
    }

    pub fn issues() -> Self {
        Self::new("Runs the system scan and lists open host issues.")
            .step("Resolving an issue removes it from the list")
            .step("The system status is re-derived from what remains")
            .rule("any critical issue -> critical, else any warning -> warning, else secure")
    }
}
