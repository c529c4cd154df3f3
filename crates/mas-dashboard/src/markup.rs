use std::fmt;

/// Which page layout the dashboard renders into.
///
/// Two layouts exist for the same status feed. `Current` is canonical;
/// `Legacy` is kept as an alternate rendering and is never mixed with it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum MarkupContract {
    /// `ansible-status`, `htcondor-status`, `alerts-list` (list items), `last-update`.
    #[default]
    Current,
    /// `ansible-stage`, `cluster-status`, `alerts` (styled blocks), no timestamp.
    Legacy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionIds {
    pub stage: &'static str,
    pub cluster_status: &'static str,
    pub alerts: &'static str,
    pub last_update: Option<&'static str>,
}

impl RegionIds {
    pub fn ids(&self) -> Vec<&'static str> {
        let mut ids = vec![self.stage, self.cluster_status];
        ids.extend(self.last_update);
        ids.push(self.alerts);
        ids
    }
}

const CURRENT: RegionIds = RegionIds {
    stage: "ansible-status",
    cluster_status: "htcondor-status",
    alerts: "alerts-list",
    last_update: Some("last-update"),
};

const LEGACY: RegionIds = RegionIds {
    stage: "ansible-stage",
    cluster_status: "cluster-status",
    alerts: "alerts",
    last_update: None,
};

impl MarkupContract {
    pub fn regions(self) -> RegionIds {
        match self {
            MarkupContract::Current => CURRENT,
            MarkupContract::Legacy => LEGACY,
        }
    }

    /// Class attached to each alert entry.
    pub fn alert_class(self) -> Option<&'static str> {
        match self {
            MarkupContract::Current => None,
            MarkupContract::Legacy => Some("status-item status-error"),
        }
    }

    /// Human label for a region id of either contract.
    pub fn label(id: &str) -> &str {
        match id {
            "ansible-status" | "ansible-stage" => "Ansible stage",
            "htcondor-status" | "cluster-status" => "Cluster status",
            "alerts-list" | "alerts" => "Alerts",
            "last-update" => "Last update",
            other => other,
        }
    }
}

impl fmt::Display for MarkupContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkupContract::Current => f.write_str("current"),
            MarkupContract::Legacy => f.write_str("legacy"),
        }
    }
}
