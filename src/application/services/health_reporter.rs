use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Degraded => "degraded",
        }
    }
}

#[derive(Debug, Clone)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub services: BTreeMap<String, bool>,
}

/// Reports readiness from configuration alone; nothing is probed over the network.
#[derive(Debug, Clone)]
pub struct HealthReporter {
    checks: BTreeMap<String, bool>,
}

impl HealthReporter {
    pub fn new<I, S>(checks: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: Into<String>,
    {
        Self {
            checks: checks
                .into_iter()
                .map(|(name, ok)| (name.into(), ok))
                .collect(),
        }
    }

    pub fn status(&self) -> HealthReport {
        let status = if self.checks.values().all(|ok| *ok) {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        };

        HealthReport {
            status,
            services: self.checks.clone(),
        }
    }
}
