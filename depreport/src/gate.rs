use std::fmt;

use crate::config::Config;
use crate::context::Signals;

/// A configured threshold that the report crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateFailure {
    Outdated(u64),
    Vulnerabilities(u64),
}

impl fmt::Display for GateFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Outdated(n) => write!(f, "{n} package(s) are outdated"),
            Self::Vulnerabilities(n) => {
                write!(f, "{n} vulnerabilit(ies) were found in this project's dependencies")
            }
        }
    }
}

/// Outdated packages are checked before vulnerabilities; the first gate that
/// trips is reported.
pub fn evaluate(config: &Config, signals: &Signals) -> Option<GateFailure> {
    if config.fail_on_outdated && signals.outdated_count > 0 {
        return Some(GateFailure::Outdated(signals.outdated_count));
    }
    if config.fail_on_vulnerability && signals.vulnerability_count > 0 {
        return Some(GateFailure::Vulnerabilities(signals.vulnerability_count));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(outdated: u64, vulnerabilities: u64) -> Signals {
        Signals {
            total_dependencies: 10,
            vulnerability_count: vulnerabilities,
            outdated_count: outdated,
        }
    }

    fn config(fail_on_outdated: bool, fail_on_vulnerability: bool) -> Config {
        Config {
            fail_on_outdated,
            fail_on_vulnerability,
            ..Config::default()
        }
    }

    #[test]
    fn gates_disabled_never_fail() {
        assert_eq!(evaluate(&config(false, false), &signals(5, 5)), None);
    }

    #[test]
    fn outdated_gate_trips_on_any_outdated_package() {
        assert_eq!(
            evaluate(&config(true, false), &signals(3, 0)),
            Some(GateFailure::Outdated(3))
        );
    }

    #[test]
    fn vulnerability_gate_trips_on_any_vulnerability() {
        assert_eq!(
            evaluate(&config(false, true), &signals(0, 1)),
            Some(GateFailure::Vulnerabilities(1))
        );
    }

    #[test]
    fn enabled_gates_pass_on_clean_signals() {
        assert_eq!(evaluate(&config(true, true), &signals(0, 0)), None);
    }

    #[test]
    fn outdated_is_checked_before_vulnerabilities() {
        assert_eq!(
            evaluate(&config(true, true), &signals(2, 7)),
            Some(GateFailure::Outdated(2))
        );
    }

    #[test]
    fn messages() {
        assert_eq!(GateFailure::Outdated(3).to_string(), "3 package(s) are outdated");
        assert!(GateFailure::Vulnerabilities(2).to_string().starts_with("2 vulnerabilit"));
    }
}
