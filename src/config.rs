use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;

/// Parameters of one simulation run, as the remote engine expects them.
///
/// The record is always fully populated; an in-progress operator form is a
/// [`ConfigDraft`] instead.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationConfig {
    pub total_tickets: u64,
    pub max_ticket_capacity: u64,
    pub ticket_release_rate: u64,
    pub customer_retrieval_rate: u64,
    pub release_interval: u64,
    pub retrieval_interval: u64,
    pub no_of_vendors: u64,
    pub no_of_customers: u64,
}

/// Partial update for [`ConfigStore::set`]. Absent fields leave the current
/// value untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_tickets: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_ticket_capacity: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_release_rate: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_retrieval_rate: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_interval: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retrieval_interval: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_of_vendors: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_of_customers: Option<u64>,
}

impl ConfigPatch {
    pub fn total_tickets(mut self, value: u64) -> Self {
        self.total_tickets = Some(value);
        self
    }

    pub fn max_ticket_capacity(mut self, value: u64) -> Self {
        self.max_ticket_capacity = Some(value);
        self
    }

    pub fn ticket_release_rate(mut self, value: u64) -> Self {
        self.ticket_release_rate = Some(value);
        self
    }

    pub fn customer_retrieval_rate(mut self, value: u64) -> Self {
        self.customer_retrieval_rate = Some(value);
        self
    }

    pub fn release_interval(mut self, value: u64) -> Self {
        self.release_interval = Some(value);
        self
    }

    pub fn retrieval_interval(mut self, value: u64) -> Self {
        self.retrieval_interval = Some(value);
        self
    }

    pub fn no_of_vendors(mut self, value: u64) -> Self {
        self.no_of_vendors = Some(value);
        self
    }

    pub fn no_of_customers(mut self, value: u64) -> Self {
        self.no_of_customers = Some(value);
        self
    }

    fn apply(&self, config: &mut SimulationConfig) {
        if let Some(v) = self.total_tickets {
            config.total_tickets = v;
        }
        if let Some(v) = self.max_ticket_capacity {
            config.max_ticket_capacity = v;
        }
        if let Some(v) = self.ticket_release_rate {
            config.ticket_release_rate = v;
        }
        if let Some(v) = self.customer_retrieval_rate {
            config.customer_retrieval_rate = v;
        }
        if let Some(v) = self.release_interval {
            config.release_interval = v;
        }
        if let Some(v) = self.retrieval_interval {
            config.retrieval_interval = v;
        }
        if let Some(v) = self.no_of_vendors {
            config.no_of_vendors = v;
        }
        if let Some(v) = self.no_of_customers {
            config.no_of_customers = v;
        }
    }
}

/// An operator form in progress. Fields start out unfilled; zero is a filled
/// value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigDraft {
    pub total_tickets: Option<u64>,
    pub max_ticket_capacity: Option<u64>,
    pub ticket_release_rate: Option<u64>,
    pub customer_retrieval_rate: Option<u64>,
    pub release_interval: Option<u64>,
    pub retrieval_interval: Option<u64>,
    pub no_of_vendors: Option<u64>,
    pub no_of_customers: Option<u64>,
}

impl ConfigDraft {
    /// Presence check over all eight fields. Returns the completed record,
    /// or the wire names of every unfilled field.
    pub fn complete(&self) -> Result<SimulationConfig, Vec<&'static str>> {
        let fields = [
            ("totalTickets", self.total_tickets),
            ("maxTicketCapacity", self.max_ticket_capacity),
            ("ticketReleaseRate", self.ticket_release_rate),
            ("customerRetrievalRate", self.customer_retrieval_rate),
            ("releaseInterval", self.release_interval),
            ("retrievalInterval", self.retrieval_interval),
            ("noOfVendors", self.no_of_vendors),
            ("noOfCustomers", self.no_of_customers),
        ];

        let missing = fields
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| *name)
            .collect::<Vec<_>>();

        if !missing.is_empty() {
            return Err(missing);
        }

        Ok(SimulationConfig {
            total_tickets: self.total_tickets.unwrap_or_default(),
            max_ticket_capacity: self.max_ticket_capacity.unwrap_or_default(),
            ticket_release_rate: self.ticket_release_rate.unwrap_or_default(),
            customer_retrieval_rate: self.customer_retrieval_rate.unwrap_or_default(),
            release_interval: self.release_interval.unwrap_or_default(),
            retrieval_interval: self.retrieval_interval.unwrap_or_default(),
            no_of_vendors: self.no_of_vendors.unwrap_or_default(),
            no_of_customers: self.no_of_customers.unwrap_or_default(),
        })
    }
}

impl From<SimulationConfig> for ConfigDraft {
    fn from(config: SimulationConfig) -> Self {
        Self {
            total_tickets: Some(config.total_tickets),
            max_ticket_capacity: Some(config.max_ticket_capacity),
            ticket_release_rate: Some(config.ticket_release_rate),
            customer_retrieval_rate: Some(config.customer_retrieval_rate),
            release_interval: Some(config.release_interval),
            retrieval_interval: Some(config.retrieval_interval),
            no_of_vendors: Some(config.no_of_vendors),
            no_of_customers: Some(config.no_of_customers),
        }
    }
}

/// Process-wide configuration record shared by every surface.
///
/// Cloning the store clones the handle, not the record. Readers get a
/// snapshot; anyone who needs to react to changes subscribes instead of
/// re-reading on their own schedule.
#[derive(Clone)]
pub struct ConfigStore {
    tx: Arc<watch::Sender<SimulationConfig>>,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(SimulationConfig::default());

        Self { tx: Arc::new(tx) }
    }

    /// Snapshot of the current record.
    pub fn get(&self) -> SimulationConfig {
        self.tx.borrow().clone()
    }

    /// Shallow-merge `patch` into the current record and notify subscribers.
    ///
    /// The store does not validate; semantically questionable values are the
    /// caller's problem.
    pub fn set(&self, patch: &ConfigPatch) {
        self.tx.send_modify(|config| patch.apply(config));
    }

    /// Replace the record wholesale and notify subscribers.
    pub fn replace(&self, config: SimulationConfig) {
        self.tx.send_replace(config);
    }

    /// Back to the all-zero default, notifying subscribers.
    pub fn reset(&self) {
        self.tx.send_replace(SimulationConfig::default());
    }

    /// Watch the record for changes.
    pub fn subscribe(&self) -> watch::Receiver<SimulationConfig> {
        self.tx.subscribe()
    }
}
