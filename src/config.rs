/*!
 * Kernel Configuration
 *
 * Runtime configuration for policy selection and simulated hardware timing
 */

use crate::core::errors::{KernelError, KernelResult, SchedulerError};
use crate::core::types::Tick;
use crate::scheduler::{PolicyKind, Quantum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const ENV_POLICY: &str = "SCHED_POLICY";
pub const ENV_QUANTUM: &str = "SCHED_QUANTUM";
pub const ENV_DISK_LATENCY: &str = "SCHED_DISK_LATENCY";
pub const ENV_MAX_TICKS: &str = "SCHED_MAX_TICKS";
pub const ENV_DATA_DIR: &str = "SCHED_DATA_DIR";

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct KernelConfig {
    /// Ready-queue strategy
    pub policy: PolicyKind,
    /// Round-robin allowance in ticks (ignored by non-preemptive policies)
    pub quantum: Quantum,
    /// Ticks between a disk request being submitted and its interrupt
    pub disk_latency: Tick,
    /// Hard stop for runaway simulations
    pub max_ticks: Tick,
    /// Directory holding token files for the disk
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::RoundRobin,
            quantum: Quantum::DEFAULT,
            disk_latency: 3,
            max_ticks: 100_000,
            data_dir: None,
        }
    }
}

impl KernelConfig {
    /// Read configuration from `SCHED_*` environment variables
    ///
    /// Environment variables:
    /// - SCHED_POLICY: fcfs | round_robin (default: round_robin)
    /// - SCHED_QUANTUM: round-robin ticks per slice (default: 1)
    /// - SCHED_DISK_LATENCY: ticks per disk read (default: 3)
    /// - SCHED_MAX_TICKS: tick limit (default: 100000)
    /// - SCHED_DATA_DIR: token file directory (default: none)
    pub fn from_env() -> KernelResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> KernelResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(policy) = lookup(ENV_POLICY) {
            config.policy = PolicyKind::from_str(&policy)?;
        }
        if let Some(quantum) = lookup(ENV_QUANTUM) {
            let ticks = quantum
                .trim()
                .parse::<u32>()
                .map_err(|e| SchedulerError::InvalidQuantum(format!("'{}': {}", quantum, e)))?;
            config.quantum = Quantum::new(ticks)?;
        }
        if let Some(latency) = lookup(ENV_DISK_LATENCY) {
            config.disk_latency = parse_ticks(ENV_DISK_LATENCY, &latency)?;
        }
        if let Some(max_ticks) = lookup(ENV_MAX_TICKS) {
            config.max_ticks = parse_ticks(ENV_MAX_TICKS, &max_ticks)?;
        }
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            config.data_dir = Some(PathBuf::from(dir));
        }

        Ok(config)
    }

    #[must_use]
    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_quantum(mut self, quantum: Quantum) -> Self {
        self.quantum = quantum;
        self
    }

    #[must_use]
    pub fn with_disk_latency(mut self, latency: Tick) -> Self {
        self.disk_latency = latency;
        self
    }

    #[must_use]
    pub fn with_max_ticks(mut self, max_ticks: Tick) -> Self {
        self.max_ticks = max_ticks;
        self
    }
}

fn parse_ticks(key: &str, value: &str) -> KernelResult<Tick> {
    value
        .trim()
        .parse::<Tick>()
        .map_err(|e| KernelError::Configuration(format!("{}='{}': {}", key, value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = KernelConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, KernelConfig::default());
        assert_eq!(config.policy, PolicyKind::RoundRobin);
        assert_eq!(config.quantum.ticks(), 1);
    }

    #[test]
    fn test_overrides() {
        let config = KernelConfig::from_lookup(lookup_from(&[
            (ENV_POLICY, "fcfs"),
            (ENV_QUANTUM, "4"),
            (ENV_DISK_LATENCY, "10"),
            (ENV_MAX_TICKS, "500"),
            (ENV_DATA_DIR, "/tmp/tokens"),
        ]))
        .unwrap();

        assert_eq!(config.policy, PolicyKind::FirstComeFirstServed);
        assert_eq!(config.quantum.ticks(), 4);
        assert_eq!(config.disk_latency, 10);
        assert_eq!(config.max_ticks, 500);
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/tokens")));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(KernelConfig::from_lookup(lookup_from(&[(ENV_POLICY, "lottery")])).is_err());
        assert!(KernelConfig::from_lookup(lookup_from(&[(ENV_QUANTUM, "0")])).is_err());
        assert!(KernelConfig::from_lookup(lookup_from(&[(ENV_QUANTUM, "x")])).is_err());
        assert!(KernelConfig::from_lookup(lookup_from(&[(ENV_MAX_TICKS, "-1")])).is_err());
    }

    #[test]
    fn test_deserialize_partial_json() {
        let config: KernelConfig =
            serde_json::from_str(r#"{"policy":"first_come_first_served","quantum":2}"#).unwrap();
        assert_eq!(config.policy, PolicyKind::FirstComeFirstServed);
        assert_eq!(config.quantum.ticks(), 2);
        assert_eq!(config.max_ticks, 100_000);
    }
}
