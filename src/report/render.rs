use console::Style;

use crate::normalize::{AccusationEvent, NetworkSummary, SlashingEvent};

use super::{Section, Unavailable, ValidatorReport};

const UNKNOWN: &str = "unknown";
const LABEL_WIDTH: usize = 20;

pub struct Palette {
    heading: Style,
    label: Style,
    good: Style,
    warn: Style,
    bad: Style,
    muted: Style,
}

impl Palette {
    /// Colors when the terminal supports them.
    pub fn colored() -> Self {
        Self {
            heading: Style::new().bold().cyan(),
            label: Style::new().dim(),
            good: Style::new().green(),
            warn: Style::new().yellow(),
            bad: Style::new().red().bold(),
            muted: Style::new().dim().italic(),
        }
    }

    pub fn plain() -> Self {
        let Palette {
            heading,
            label,
            good,
            warn,
            bad,
            muted,
        } = Self::colored();
        Self {
            heading: heading.force_styling(false),
            label: label.force_styling(false),
            good: good.force_styling(false),
            warn: warn.force_styling(false),
            bad: bad.force_styling(false),
            muted: muted.force_styling(false),
        }
    }
}

struct Lines<'a> {
    palette: &'a Palette,
    lines: Vec<String>,
}

impl<'a> Lines<'a> {
    fn heading(&mut self, title: &str) {
        if !self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.lines
            .push(self.palette.heading.apply_to(title).to_string());
    }

    fn row(&mut self, label: &str, value: String) {
        let label = format!("{label:<LABEL_WIDTH$}");
        self.lines.push(format!(
            "  {}{}",
            self.palette.label.apply_to(label),
            value
        ));
    }

    fn item(&mut self, text: String) {
        self.lines.push(format!("  - {text}"));
    }

    fn or_unknown(&self, value: Option<String>) -> String {
        match value {
            Some(value) => value,
            None => self.palette.muted.apply_to(UNKNOWN).to_string(),
        }
    }

    fn unavailable(&mut self, unavailable: &Unavailable) {
        let reason = match unavailable {
            Unavailable::AccessDenied => "blocked by the dashboard's bot protection".to_string(),
            Unavailable::NotFound => "not found".to_string(),
            Unavailable::HttpStatus(status) => format!("dashboard answered with status {status}"),
            Unavailable::Transport(error) => format!("request failed: {error}"),
            Unavailable::Malformed(error) => format!("unreadable response: {error}"),
        };
        let text = self.palette.warn.apply_to(format!("unavailable, {reason}"));
        self.lines.push(format!("  {text}"));
    }

    fn network(&mut self, network: &Section<NetworkSummary>) {
        self.heading("Network");
        let unknown_network = NetworkSummary::default();
        let network = match network {
            Section::Available(network) => network,
            Section::Unavailable(unavailable) => {
                self.unavailable(unavailable);
                &unknown_network
            }
        };

        let current_epoch = self.or_unknown(network.current_epoch.map(|e| e.to_string()));
        let finalized_epoch = self.or_unknown(network.finalized_epoch.map(|e| e.to_string()));
        let active = self.or_unknown(network.active_validators.map(|n| n.to_string()));
        let total = self.or_unknown(network.total_validators.map(|n| n.to_string()));
        self.row("Current epoch", current_epoch);
        self.row("Finalized epoch", finalized_epoch);
        self.row("Validators", format!("{active} active of {total}"));
    }

    /// Rows of a section that couldn't be fetched, all unknown under the reason.
    fn unknown_rows(&mut self, labels: &[&str]) {
        for label in labels {
            let unknown = self.or_unknown(None);
            self.row(label, unknown);
        }
    }
}

/// Just the network part, for when no validator was asked about.
pub fn render_network(network: &Section<NetworkSummary>, palette: &Palette) -> String {
    let mut out = Lines {
        palette,
        lines: vec![],
    };
    out.network(network);
    out.lines.join("\n")
}

fn status_style<'a>(palette: &'a Palette, status: &str) -> &'a Style {
    let status = status.to_lowercase();
    if status.starts_with("active") || status == "online" {
        &palette.good
    } else if status.contains("slashed") || status.contains("exit") || status == "offline" {
        &palette.bad
    } else {
        &palette.warn
    }
}

fn describe_slashing(event: &SlashingEvent) -> String {
    let field = |value: &Option<String>| value.clone().unwrap_or_else(|| UNKNOWN.to_string());
    format!(
        "epoch {}, slot {}, block {}: {}, amount {}",
        field(&event.epoch),
        field(&event.slot),
        field(&event.block),
        field(&event.reason),
        field(&event.amount),
    )
}

fn describe_accusation(event: &AccusationEvent) -> String {
    let field = |value: &Option<String>| value.clone().unwrap_or_else(|| UNKNOWN.to_string());
    format!(
        "epoch {}: {} ({}) by {}",
        field(&event.epoch),
        field(&event.kind),
        field(&event.status),
        field(&event.accuser),
    )
}

pub fn render_report(report: &ValidatorReport, palette: &Palette) -> String {
    let mut out = Lines {
        palette,
        lines: vec![],
    };

    out.lines.push(format!(
        "{} {}",
        palette.heading.apply_to("Validator report for"),
        report.address
    ));
    out.lines.push(
        palette
            .label
            .apply_to(format!(
                "Generated {}",
                report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ))
            .to_string(),
    );

    out.network(&report.network);

    out.heading("Validator");
    match &report.validator {
        Section::Available(validator) => {
            let status = match &validator.status {
                Some(status) => status_style(palette, status).apply_to(status).to_string(),
                None => out.or_unknown(None),
            };
            let balance = out.or_unknown(validator.balance.as_ref().map(|b| b.to_string()));
            let effective_balance = out.or_unknown(
                validator
                    .effective_balance
                    .as_ref()
                    .map(|b| b.to_string()),
            );
            out.row("Status", status);
            out.row("Balance", balance);
            out.row("Effective balance", effective_balance);

            out.heading("Performance");
            let attestation_rate = out.or_unknown(validator.attestation_rate());
            let block_rate = out.or_unknown(validator.block_rate());
            out.row(
                "Attestations",
                format!(
                    "{} succeeded, {} missed",
                    validator.attestations_succeeded, validator.attestations_missed
                ),
            );
            out.row("Attestation rate", attestation_rate);
            out.row(
                "Blocks",
                format!(
                    "{} proposed, {} mined, {} missed",
                    validator.blocks_proposed, validator.blocks_mined, validator.blocks_missed
                ),
            );
            out.row("Block rate", block_rate);
        }
        Section::Unavailable(unavailable) => {
            out.unavailable(unavailable);
            out.unknown_rows(&["Status", "Balance", "Effective balance"]);
            out.heading("Performance");
            out.unavailable(unavailable);
            out.unknown_rows(&["Attestation rate", "Block rate"]);
        }
    }

    out.heading("Slashing history");
    match &report.slashings {
        Section::Available(history) => {
            let matching = history.matching_events.len();
            let count = if matching == 0 {
                palette.good.apply_to(matching.to_string()).to_string()
            } else {
                palette.bad.apply_to(matching.to_string()).to_string()
            };
            out.row(
                "Matching events",
                format!("{count} of {} total", history.total_events),
            );
            for event in &history.matching_events {
                out.item(describe_slashing(event));
            }
        }
        Section::Unavailable(unavailable) => out.unavailable(unavailable),
    }

    out.heading("Accusations");
    match &report.accusations {
        Section::Available(accusations) if accusations.is_empty() => {
            out.row("Accusations", palette.good.apply_to("none").to_string());
        }
        Section::Available(accusations) => {
            out.row("Accusations", accusations.len().to_string());
            for event in accusations {
                out.item(describe_accusation(event));
            }
        }
        Section::Unavailable(unavailable) => out.unavailable(unavailable),
    }

    out.heading("Leaderboard");
    match &report.leaderboard {
        Section::Available(standing) => {
            let window = match standing.window {
                Some(window) => format!("epochs {window}"),
                None => "dashboard default".to_string(),
            };
            out.row("Window", window);
            out.row("Rank", standing.rank.to_string());
        }
        Section::Unavailable(unavailable) => out.unavailable(unavailable),
    }

    if report.needs_bypass_token() {
        out.lines.push(String::new());
        out.lines.push(
            palette
                .warn
                .apply_to(
                    "hint: some requests were blocked by the dashboard's bot protection, \
                     store a fresh bypass token with `validator-report login`",
                )
                .to_string(),
        );
    }

    out.lines.join("\n")
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use crate::{
        epochs::EpochWindow,
        normalize::{Rank, SlashingHistory, ValidatorRecord},
        report::LeaderboardStanding,
        units::TokenAmount,
    };

    use super::*;

    fn report() -> ValidatorReport {
        ValidatorReport {
            address: "0xabcdef0123456789abcdef0123456789abcdef01"
                .parse()
                .unwrap(),
            generated_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            network: Section::Available(NetworkSummary {
                current_epoch: Some(1200),
                active_validators: Some(950),
                total_validators: None,
                finalized_epoch: Some(1198),
            }),
            validator: Section::Available(ValidatorRecord {
                status: Some("active".to_string()),
                balance: Some(TokenAmount::from_raw("32000000000000000000", "ETH")),
                attestations_succeeded: 1,
                attestations_missed: 2,
                blocks_proposed: 4,
                blocks_mined: 4,
                ..ValidatorRecord::default()
            }),
            slashings: Section::Available(SlashingHistory {
                total_events: 3,
                matching_events: vec![SlashingEvent {
                    epoch: Some("12".to_string()),
                    reason: Some("double vote".to_string()),
                    ..SlashingEvent::default()
                }],
            }),
            accusations: Section::Available(vec![]),
            leaderboard: Section::Available(LeaderboardStanding {
                window: Some(EpochWindow {
                    start: 976,
                    end: 1200,
                }),
                rank: Rank::Ranked(3),
            }),
        }
    }

    #[test]
    fn renders_available_sections_test() {
        let text = render_report(&report(), &Palette::plain());

        assert!(text.starts_with(
            "Validator report for 0xabcdef0123456789abcdef0123456789abcdef01\nGenerated 2024-05-01 12:00:00 UTC"
        ));
        assert!(text.contains("  Current epoch       1200"));
        assert!(text.contains("  Validators          950 active of unknown"));
        assert!(text.contains("  Status              active"));
        assert!(text.contains("  Balance             32.000000 ETH"));
        assert!(text.contains("  Effective balance   unknown"));
        assert!(text.contains("  Attestation rate    33.3%"));
        assert!(text.contains("  Block rate          100.0%"));
        assert!(text.contains("  Matching events     1 of 3 total"));
        assert!(text.contains(
            "  - epoch 12, slot unknown, block unknown: double vote, amount unknown"
        ));
        assert!(text.contains("  Accusations         none"));
        assert!(text.contains("  Window              epochs [976, 1200]"));
        assert!(text.contains("  Rank                #3"));
        assert!(!text.contains("hint:"));
    }

    #[test]
    fn renders_unavailable_sections_test() {
        let report = ValidatorReport {
            network: Section::Unavailable(Unavailable::AccessDenied),
            validator: Section::Unavailable(Unavailable::NotFound),
            accusations: Section::Unavailable(Unavailable::HttpStatus(502)),
            ..report()
        };
        let text = render_report(&report, &Palette::plain());

        assert!(text.contains("Network\n  unavailable, blocked by the dashboard's bot protection"));
        assert!(text.contains(
            "Network\n  unavailable, blocked by the dashboard's bot protection\n  Current epoch       unknown"
        ));
        assert!(text.contains(
            "Validator\n  unavailable, not found\n  Status              unknown\n  \
             Balance             unknown\n  Effective balance   unknown"
        ));
        assert!(text.contains(
            "Performance\n  unavailable, not found\n  Attestation rate    unknown\n  \
             Block rate          unknown"
        ));
        assert!(text.contains("unavailable, dashboard answered with status 502"));
        assert!(text.contains("validator-report login"));
    }

    #[test]
    fn plain_palette_has_no_escape_codes_test() {
        let text = render_report(&report(), &Palette::plain());
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn describe_accusation_test() {
        let event = AccusationEvent {
            epoch: Some("10".to_string()),
            kind: Some("equivocation".to_string()),
            status: None,
            accuser: Some("0xCC".to_string()),
        };
        assert_eq!(
            describe_accusation(&event),
            "epoch 10: equivocation (unknown) by 0xCC"
        );
    }

    #[test]
    fn render_network_only_test() {
        let text = render_network(
            &Section::Unavailable(Unavailable::Transport("timed out".to_string())),
            &Palette::plain(),
        );
        assert_eq!(
            text,
            "Network\n  unavailable, request failed: timed out\n  \
             Current epoch       unknown\n  \
             Finalized epoch     unknown\n  \
             Validators          unknown active of unknown"
        );
    }
}
