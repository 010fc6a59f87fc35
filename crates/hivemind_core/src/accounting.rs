//! Economic accounting (spec.md §4.8): accrual during the run plus the
//! final profit/penalty reconciliation emitted as the report.

use std::fs;
use std::path::Path;

use bevy_ecs::prelude::Resource;

use crate::package::Package;

pub const LATE_PENALTY: i64 = 50;
pub const LOST_PENALTY: i64 = 200;
pub const DEAD_AGENT_PENALTY: i64 = 500;

/// Running accumulators, updated once per tick by the dispatcher.
#[derive(Debug, Clone, Copy, Default, Resource)]
pub struct Accounting {
    pub operating_cost_total: i64,
    pub dead_agents: u32,
    pub spawned_packages: u32,
}

/// The final reconciliation, computed once the run terminates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub delivered: u32,
    pub delayed: u32,
    pub lost: u32,
    pub operating_cost: i64,
    pub dead_agents: u32,
    pub profit: i64,
}

impl Report {
    /// Reconciles every spawned package's outcome against the accumulators.
    /// `packages` must contain exactly the packages that have been spawned
    /// so far (spec.md's `spawnedPackages` count).
    pub fn compute(packages: &[Package], accounting: &Accounting) -> Report {
        let mut delivered = 0u32;
        let mut delayed = 0u32;
        let mut lost = 0u32;
        let mut profit: i64 = 0;

        for pkg in packages {
            match pkg.delivered_at() {
                Some(at) => {
                    delivered += 1;
                    profit += pkg.reward;
                    if at > pkg.deadline {
                        delayed += 1;
                        profit -= LATE_PENALTY;
                    }
                }
                None => {
                    lost += 1;
                    profit -= LOST_PENALTY;
                }
            }
        }

        profit -= accounting.operating_cost_total;
        profit -= DEAD_AGENT_PENALTY * accounting.dead_agents as i64;

        Report {
            delivered,
            delayed,
            lost,
            operating_cost: accounting.operating_cost_total,
            dead_agents: accounting.dead_agents,
            profit,
        }
    }

    pub fn to_text(&self) -> String {
        format!(
            "Delivered: {}\nDelayed: {}\nLost: {}\nOperating cost: {}\nDead agents: {}\nProfit: {}\n",
            self.delivered, self.delayed, self.lost, self.operating_cost, self.dead_agents, self.profit
        )
    }

    pub fn write(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        fs::write(path, self.to_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profit_identity_matches_accounting_law() {
        let mut p0 = Package::new(0, 1, 1, 300, 10, 0);
        p0.mark_delivered(5);
        let mut p1 = Package::new(1, 1, 1, 300, 10, 0);
        p1.mark_delivered(20);
        let p2 = Package::new(2, 1, 1, 300, 10, 0);
        let packages = vec![p0, p1, p2];

        let accounting = Accounting {
            operating_cost_total: 40,
            dead_agents: 1,
            spawned_packages: 3,
        };
        let report = Report::compute(&packages, &accounting);
        assert_eq!(report.delivered, 2);
        assert_eq!(report.delayed, 1);
        assert_eq!(report.lost, 1);
        let expected = 300 + 300 - LATE_PENALTY - LOST_PENALTY - 40 - DEAD_AGENT_PENALTY;
        assert_eq!(report.profit, expected);
    }

    #[test]
    fn report_text_is_fixed_six_lines() {
        let report = Report {
            delivered: 1,
            delayed: 0,
            lost: 0,
            operating_cost: 5,
            dead_agents: 0,
            profit: 100,
        };
        let text = report.to_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "Delivered: 1");
        assert_eq!(lines[5], "Profit: 100");
    }
}
