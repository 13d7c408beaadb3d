//! Profile aggregation and control-tower polling against a fixture API
//! whose individual endpoints can be switched to fail.

use std::time::Duration;

use serde_json::{json, Value};
use tokio::sync::{mpsc, watch};

use clinic_ops_client::api::ClinicApi;
use clinic_ops_client::error::{ApiError, ApiResult};
use clinic_ops_client::profile::load_profile;
use clinic_ops_client::tower::{ControlTower, TowerOptions};

#[derive(Default, Clone)]
struct FixtureApi {
    fail_patient_appointments: bool,
    fail_documents: bool,
    fail_live_queue: bool,
    empty_metrics: bool,
}

fn unavailable() -> ApiError {
    ApiError::Http {
        status: 503,
        message: "service unavailable".into(),
        body: None,
    }
}

impl ClinicApi for FixtureApi {
    async fn get_patient(&self, patient_id: &str) -> ApiResult<Value> {
        Ok(json!({ "data": {
            "id": patient_id,
            "name": "Ramesh Gupta",
            "mobile": "9000000001",
            "registrationDate": "2025-01-01"
        }}))
    }

    async fn get_patient_appointments(&self, patient_id: &str) -> ApiResult<Value> {
        if self.fail_patient_appointments {
            return Err(unavailable());
        }
        Ok(json!([
            { "id": "a1", "patientId": patient_id, "patientName": "Ramesh Gupta",
              "doctorId": "d1", "date": "2025-01-05" },
            { "id": "a2", "patientId": patient_id, "patientName": "Ramesh Gupta",
              "doctorId": "d1", "date": "2025-02-05" }
        ]))
    }

    async fn get_appointments(&self) -> ApiResult<Value> {
        Ok(json!([
            { "id": "g1", "patientId": "P42", "patientName": "Ramesh Gupta",
              "doctorId": "d1", "date": "2025-03-01" },
            { "id": "g2", "patientId": "OTHER", "patientName": "Sita Verma",
              "doctorId": "d2", "date": "2025-03-02" }
        ]))
    }

    async fn get_patient_documents(&self, patient_id: &str) -> ApiResult<Value> {
        if self.fail_documents {
            return Err(unavailable());
        }
        Ok(json!({ "data": [
            { "id": "doc1", "patientId": patient_id, "name": "MRI Report",
              "type": "Scan", "uploadDate": "2025-01-10", "url": "https://files/doc1" }
        ]}))
    }

    async fn get_clinical_notes(&self, patient_id: &str) -> ApiResult<Value> {
        Ok(json!([
            { "id": "n1", "patient_id": patient_id, "note": "Follow up", "date": "2025-01-11" }
        ]))
    }

    async fn patient_flow_summary(&self) -> ApiResult<Value> {
        if self.empty_metrics {
            return Ok(json!({}));
        }
        Ok(json!({ "data": { "scheduled": 9, "arrived": 4, "checkedIn": 2, "completed": 1 } }))
    }

    async fn waiting_alerts(&self) -> ApiResult<Value> {
        if self.empty_metrics {
            return Ok(json!([]));
        }
        Ok(json!([{ "message": "Waiting 35 min", "patientName": "Ramesh Gupta",
                    "doctor": "Dr. Sireesha", "minutes": 35 }]))
    }

    async fn live_queue(&self) -> ApiResult<Value> {
        if self.fail_live_queue {
            return Err(unavailable());
        }
        if self.empty_metrics {
            return Ok(json!([]));
        }
        Ok(json!({ "items": [
            { "patientName": "Ramesh Gupta", "doctor": "Dr. Sireesha",
              "status": "Arrived", "waitingMinutes": 35 }
        ]}))
    }

    async fn doctor_utilization(&self) -> ApiResult<Value> {
        if self.empty_metrics {
            return Ok(json!([]));
        }
        Ok(json!([{ "doctorName": "Dr. Sireesha", "total": 10, "completed": 6, "pending": 4 }]))
    }

    async fn lead_snapshot(&self) -> ApiResult<Value> {
        if self.empty_metrics {
            return Ok(json!({}));
        }
        Ok(json!({ "new": 3, "contacted": 7, "stalling": 1, "converted": 2 }))
    }

    // Unused by these tests.
    async fn login(&self, _: &str, _: &str) -> ApiResult<Value> {
        Ok(Value::Null)
    }
    async fn logout(&self) -> ApiResult<Value> {
        Ok(Value::Null)
    }
    async fn get_leads(&self) -> ApiResult<Value> {
        Ok(json!([]))
    }
    async fn create_lead(&self, _: &Value) -> ApiResult<Value> {
        Ok(Value::Null)
    }
    async fn update_lead(&self, _: &str, _: &Value) -> ApiResult<Value> {
        Ok(Value::Null)
    }
    async fn get_patients(&self) -> ApiResult<Value> {
        Ok(json!([]))
    }
    async fn create_patient(&self, _: &Value) -> ApiResult<Value> {
        Ok(Value::Null)
    }
    async fn update_patient(&self, _: &str, _: &Value) -> ApiResult<Value> {
        Ok(Value::Null)
    }
    async fn upload_patient_document(
        &self,
        _: &str,
        _: &str,
        _: Vec<u8>,
        _: &str,
    ) -> ApiResult<Value> {
        Ok(Value::Null)
    }
    async fn create_appointment(&self, _: &Value) -> ApiResult<Value> {
        Ok(Value::Null)
    }
    async fn save_clinical_note(&self, _: &str, _: &str) -> ApiResult<Value> {
        Ok(Value::Null)
    }
    async fn assistant_chat(&self, _: &Value) -> ApiResult<Value> {
        Ok(Value::Null)
    }
}

#[tokio::test]
async fn test_profile_assembles_all_four_resources() {
    let api = FixtureApi::default();
    let profile = load_profile(&api, "P42").await;

    let patient = profile.patient.unwrap();
    assert_eq!(patient.id, "P42");
    assert_eq!(patient.mobile, "9000000001");

    // Newest appointment first.
    assert_eq!(profile.appointments.len(), 2);
    assert_eq!(profile.appointments[0].id, "a2");

    assert_eq!(profile.documents.len(), 1);
    assert_eq!(profile.documents[0].name, "MRI Report");
    assert_eq!(profile.notes.len(), 1);
}

#[tokio::test]
async fn test_profile_falls_back_to_global_appointments() {
    let api = FixtureApi {
        fail_patient_appointments: true,
        ..Default::default()
    };
    let profile = load_profile(&api, "P42").await;

    // Only P42's rows from the global list.
    assert_eq!(profile.appointments.len(), 1);
    assert_eq!(profile.appointments[0].id, "g1");
}

#[tokio::test]
async fn test_profile_tolerates_document_failure() {
    let api = FixtureApi {
        fail_documents: true,
        ..Default::default()
    };
    let profile = load_profile(&api, "P42").await;

    assert!(profile.documents.is_empty());
    // Neighbors unaffected.
    assert!(profile.patient.is_some());
    assert_eq!(profile.notes.len(), 1);
}

#[tokio::test]
async fn test_tower_snapshot_parses_all_metrics() {
    let tower = ControlTower::new(FixtureApi::default(), TowerOptions::default());
    let snapshot = tower.snapshot().await;

    assert_eq!(snapshot.flow.scheduled, 9);
    assert_eq!(snapshot.flow.checked_in, 2);
    assert_eq!(snapshot.queue.len(), 1);
    assert_eq!(snapshot.queue[0].waiting_minutes, 35);
    assert_eq!(snapshot.utilization[0].doctor_name, "Dr. Sireesha");
    assert_eq!(snapshot.leads.contacted, 7);
}

#[tokio::test]
async fn test_tower_isolates_a_failing_metric() {
    let api = FixtureApi {
        fail_live_queue: true,
        ..Default::default()
    };
    let tower = ControlTower::new(api, TowerOptions::default());
    let snapshot = tower.snapshot().await;

    assert!(snapshot.queue.is_empty());
    // Every other panel still has data.
    assert_eq!(snapshot.flow.scheduled, 9);
    assert_eq!(snapshot.alerts.len(), 1);
    assert_eq!(snapshot.leads.new, 3);
}

#[tokio::test]
async fn test_tower_empty_metrics_stay_empty_without_demo_mode() {
    let api = FixtureApi {
        empty_metrics: true,
        ..Default::default()
    };
    let tower = ControlTower::new(api, TowerOptions::default());
    let snapshot = tower.snapshot().await;

    assert_eq!(snapshot.flow.scheduled, 0);
    assert!(snapshot.queue.is_empty());
    assert!(snapshot.utilization.is_empty());
}

#[tokio::test]
async fn test_tower_demo_mode_fills_empty_metrics() {
    let api = FixtureApi {
        empty_metrics: true,
        ..Default::default()
    };
    let options = TowerOptions {
        demo_fallback: true,
        ..Default::default()
    };
    let tower = ControlTower::new(api, options);
    let snapshot = tower.snapshot().await;

    assert_eq!(snapshot.flow.scheduled, 12);
    assert_eq!(snapshot.queue.len(), 2);
    assert_eq!(snapshot.queue[0].patient_name, "Ramesh Gupta");
    assert_eq!(snapshot.utilization.len(), 2);
}

#[tokio::test]
async fn test_tower_polls_and_stops_on_shutdown() {
    let options = TowerOptions {
        demo_fallback: false,
        interval: Duration::from_millis(10),
    };
    let tower = ControlTower::new(FixtureApi::default(), options);
    let (tx, mut rx) = mpsc::channel(4);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let handle = tokio::spawn(async move { tower.run(tx, shutdown_rx).await });

    // First snapshot arrives without waiting a full interval.
    let first = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("poller produced no snapshot")
        .expect("channel closed early");
    assert_eq!(first.flow.scheduled, 9);

    shutdown_tx.send(true).expect("poller dropped its receiver");
    tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .expect("poller did not stop on shutdown")
        .expect("poller task panicked");
}

#[tokio::test]
async fn test_tower_stops_when_consumer_drops() {
    let options = TowerOptions {
        demo_fallback: false,
        interval: Duration::from_millis(10),
    };
    let tower = ControlTower::new(FixtureApi::default(), options);
    let (tx, rx) = mpsc::channel(1);
    let (_shutdown_tx, shutdown_rx) = watch::channel(false);

    drop(rx);
    // With the receiver gone, the first send fails and run() returns.
    tokio::time::timeout(Duration::from_secs(1), tower.run(tx, shutdown_rx))
        .await
        .expect("poller did not stop after consumer dropped");
}
