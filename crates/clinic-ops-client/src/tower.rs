//! Control tower: the live operations overview.
//!
//! Five independent metric reads, polled on an interval. Metrics are
//! isolated from each other: one failing endpoint zeroes only its own
//! panel. An optional demo mode substitutes illustrative values when the
//! backend answers with nothing, for showroom installs with no traffic.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

use clinic_ops_core::models::{
    DoctorUtilization, LeadSnapshot, PatientFlowSummary, QueueEntry, WaitingAlert,
};
use clinic_ops_core::normalize;

use crate::api::ClinicApi;
use crate::error::ApiResult;

/// Poller configuration.
#[derive(Debug, Clone)]
pub struct TowerOptions {
    /// Substitute illustrative values for empty metrics.
    pub demo_fallback: bool,
    /// Poll interval.
    pub interval: Duration,
}

impl Default for TowerOptions {
    fn default() -> Self {
        Self {
            demo_fallback: false,
            interval: Duration::from_secs(60),
        }
    }
}

/// One complete reading of all five metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TowerSnapshot {
    pub flow: PatientFlowSummary,
    pub alerts: Vec<WaitingAlert>,
    pub queue: Vec<QueueEntry>,
    pub utilization: Vec<DoctorUtilization>,
    pub leads: LeadSnapshot,
}

pub struct ControlTower<A> {
    api: A,
    options: TowerOptions,
}

fn scalar_metric<T: DeserializeOwned + Default>(result: ApiResult<Value>, name: &str) -> T {
    match result {
        Ok(response) => serde_json::from_value(normalize::record(&response).clone())
            .unwrap_or_else(|err| {
                warn!(metric = name, error = %err, "metric payload malformed");
                T::default()
            }),
        Err(err) => {
            warn!(metric = name, error = %err, "metric fetch failed");
            T::default()
        }
    }
}

fn list_metric<T: DeserializeOwned>(result: ApiResult<Value>, name: &str) -> Vec<T> {
    match result {
        Ok(response) => normalize::items(&response)
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        Err(err) => {
            warn!(metric = name, error = %err, "metric fetch failed");
            Vec::new()
        }
    }
}

impl<A: ClinicApi> ControlTower<A> {
    pub fn new(api: A, options: TowerOptions) -> Self {
        Self { api, options }
    }

    /// Take one reading of all five metrics, concurrently.
    pub async fn snapshot(&self) -> TowerSnapshot {
        let (flow, alerts, queue, utilization, leads) = tokio::join!(
            self.api.patient_flow_summary(),
            self.api.waiting_alerts(),
            self.api.live_queue(),
            self.api.doctor_utilization(),
            self.api.lead_snapshot(),
        );

        let mut snapshot = TowerSnapshot {
            flow: scalar_metric(flow, "patient_flow"),
            alerts: list_metric(alerts, "waiting_alerts"),
            queue: list_metric(queue, "live_queue"),
            utilization: list_metric(utilization, "doctor_utilization"),
            leads: scalar_metric(leads, "lead_snapshot"),
        };
        if self.options.demo_fallback {
            apply_demo_fallback(&mut snapshot);
        }
        snapshot
    }

    /// Poll until `shutdown` flips to true or the receiver is dropped.
    ///
    /// The first reading happens immediately, then one per interval.
    /// Delivering through the channel means a consumer torn down
    /// mid-flight never observes a late snapshot.
    pub async fn run(&self, sender: mpsc::Sender<TowerSnapshot>, mut shutdown: watch::Receiver<bool>) {
        let mut interval = tokio::time::interval(self.options.interval);
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let snapshot = self.snapshot().await;
                    if sender.send(snapshot).await.is_err() {
                        debug!("tower consumer gone, stopping poller");
                        break;
                    }
                }
                changed = shutdown.changed() => {
                    // A dropped shutdown sender counts as a shutdown.
                    if changed.is_err() || *shutdown.borrow() {
                        debug!("tower poller shut down");
                        break;
                    }
                }
            }
        }
    }
}

/// Illustrative values for empty metrics, used only in demo mode.
fn apply_demo_fallback(snapshot: &mut TowerSnapshot) {
    if snapshot.flow == PatientFlowSummary::default() {
        snapshot.flow = PatientFlowSummary {
            scheduled: 12,
            arrived: 8,
            checked_in: 5,
            completed: 3,
        };
    }
    if snapshot.leads == LeadSnapshot::default() {
        snapshot.leads = LeadSnapshot {
            new: 5,
            contacted: 12,
            stalling: 3,
            converted: 2,
        };
    }
    if snapshot.queue.is_empty() {
        snapshot.queue = vec![
            QueueEntry {
                patient_name: "Ramesh Gupta".into(),
                doctor: "Dr. Sireesha".into(),
                status: "Arrived".into(),
                waiting_minutes: 45,
            },
            QueueEntry {
                patient_name: "Sita Verma".into(),
                doctor: "Dr. Ananya".into(),
                status: "Checked-In".into(),
                waiting_minutes: 12,
            },
        ];
    }
    if snapshot.alerts.is_empty() {
        snapshot.alerts = vec![WaitingAlert {
            message: "Waiting longer than 30 minutes".into(),
            patient_name: "Ramesh Gupta".into(),
            doctor: "Dr. Sireesha".into(),
            minutes: 45,
        }];
    }
    if snapshot.utilization.is_empty() {
        snapshot.utilization = vec![
            DoctorUtilization {
                doctor_name: "Dr. Sireesha".into(),
                total: 15,
                completed: 5,
                pending: 10,
            },
            DoctorUtilization {
                doctor_name: "Dr. Ananya".into(),
                total: 12,
                completed: 8,
                pending: 4,
            },
        ];
    }
}
