//! Field reconciliation.
//!
//! Backend serialization is inconsistent across endpoints: some send
//! camelCase, some snake_case, some older key names. Each constructor
//! below checks an ordered list of candidate keys (first defined value
//! wins) and falls back to a documented default, so every entity handed
//! downstream has all required fields populated.

use serde_json::Value;

use crate::models::{
    Appointment, AppointmentStatus, ClinicalNote, Gender, Lead, LeadStatus, Patient,
    PatientDocument, PatientStatus,
};

use super::envelope::{self, id_string};

/// First non-empty string among the candidate keys.
///
/// Numbers are stringified; ages and pin codes arrive as both.
pub fn first_str(item: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        match item.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.clone()),
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}

fn opt(item: &Value, keys: &[&str]) -> Option<String> {
    first_str(item, keys)
}

fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

fn placeholder_id() -> String {
    format!("temp-{}", uuid::Uuid::new_v4())
}

/// Build a canonical patient from a raw backend record.
pub fn patient_from_value(item: &Value) -> Patient {
    Patient {
        id: first_str(item, &["id"]).unwrap_or_else(placeholder_id),
        uhid: first_str(item, &["uhid", "UHID"]).unwrap_or_else(|| "-".into()),
        name: first_str(item, &["name"]).unwrap_or_else(|| "Unknown Patient".into()),
        relation: opt(item, &["relation"]),
        marital_status: opt(item, &["maritalStatus", "marital_status"]),
        gender: first_str(item, &["gender"])
            .and_then(|g| Gender::from_label(&g))
            .unwrap_or_default(),
        dob: opt(item, &["dob", "date_of_birth"]),
        age: opt(item, &["age"]),
        aadhar: opt(item, &["aadhar", "aadhar_id"]),
        blood_group: opt(item, &["bloodGroup", "blood_group"]),
        house: opt(item, &["house"]),
        street: opt(item, &["street", "address"]),
        area: opt(item, &["area"]),
        city: opt(item, &["city"]),
        district: opt(item, &["district"]),
        state: opt(item, &["state"]),
        postal_code: opt(item, &["postalCode", "postal_code", "pin"]),
        email: opt(item, &["email"]),
        mobile: first_str(item, &["mobile", "phone"]).unwrap_or_else(|| "-".into()),
        referral_doctor: opt(item, &["referralDoctor", "referral_doctor"]),
        hospital_address: opt(item, &["hospitalAddress", "hospital_address"]),
        registration_date: first_str(item, &["registrationDate", "registration_date", "date"])
            .unwrap_or_else(today),
        status: first_str(item, &["status"])
            .and_then(|s| PatientStatus::from_label(&s))
            .unwrap_or_default(),
        lead_id: item.get("lead_id").and_then(id_string),
    }
}

/// Build a canonical lead from a raw backend record.
pub fn lead_from_value(item: &Value) -> Lead {
    Lead {
        id: first_str(item, &["id"]).unwrap_or_else(placeholder_id),
        name: first_str(item, &["name"]).unwrap_or_else(|| "Unknown".into()),
        phone: first_str(item, &["phone", "mobile"]).unwrap_or_else(|| "-".into()),
        age: opt(item, &["age"]),
        gender: first_str(item, &["gender"]).and_then(|g| Gender::from_label(&g)),
        problem: opt(item, &["problem"]),
        treatment_doctor: opt(item, &["treatmentDoctor", "treatment_doctor"]),
        treatment_suggested: opt(item, &["treatmentSuggested", "treatment_suggested"]),
        source: first_str(item, &["source"]).unwrap_or_else(|| "Unknown".into()),
        inquiry: first_str(item, &["inquiry"]).unwrap_or_default(),
        status: first_str(item, &["status"])
            .and_then(|s| LeadStatus::from_label(&s))
            .unwrap_or_default(),
        date_added: first_str(item, &["dateAdded", "date_added", "date"]).unwrap_or_else(today),
        email: opt(item, &["email"]),
    }
}

/// Build a canonical appointment from a raw backend record.
pub fn appointment_from_value(item: &Value) -> Appointment {
    Appointment {
        id: first_str(item, &["id"]).unwrap_or_else(placeholder_id),
        patient_id: opt(item, &["patientId", "patient_id"]),
        patient_name: first_str(item, &["patientName", "patient_name", "name"])
            .unwrap_or_else(|| "Unknown Patient".into()),
        doctor_id: first_str(item, &["doctorId", "doctor_id"]).unwrap_or_default(),
        doctor_name: first_str(item, &["doctorName", "doctor_name", "consultant"])
            .unwrap_or_default(),
        date: first_str(item, &["date", "appointment_date"]).unwrap_or_else(today),
        time: first_str(item, &["time", "appointment_time"]).unwrap_or_default(),
        kind: first_str(item, &["type", "kind"]).unwrap_or_else(|| "Consult".into()),
        status: first_str(item, &["status"])
            .and_then(|s| AppointmentStatus::from_label(&s))
            .unwrap_or_default(),
    }
}

/// Build a canonical document from a raw backend record.
pub fn document_from_value(item: &Value) -> PatientDocument {
    PatientDocument {
        id: first_str(item, &["id"]).unwrap_or_else(placeholder_id),
        patient_id: first_str(item, &["patientId", "patient_id"]).unwrap_or_default(),
        name: first_str(item, &["name"]).unwrap_or_else(|| "Document".into()),
        kind: first_str(item, &["type", "kind"]).unwrap_or_else(|| "Document".into()),
        upload_date: first_str(item, &["uploadDate", "upload_date", "date"]).unwrap_or_else(today),
        url: first_str(item, &["url"]).unwrap_or_default(),
    }
}

/// Build a canonical clinical note from a raw backend record.
pub fn note_from_value(item: &Value) -> ClinicalNote {
    ClinicalNote {
        id: first_str(item, &["id"]).unwrap_or_else(placeholder_id),
        patient_id: first_str(item, &["patientId", "patient_id"]).unwrap_or_default(),
        note: first_str(item, &["note", "content", "text"]).unwrap_or_default(),
        date: first_str(item, &["date", "createdAt", "created_at"]).unwrap_or_else(today),
    }
}

/// Patients from a list response, newest registration first.
pub fn patients_from_response(response: &Value) -> Vec<Patient> {
    let mut patients: Vec<Patient> = envelope::items(response)
        .iter()
        .map(patient_from_value)
        .collect();
    patients.sort_by(|a, b| b.registration_date.cmp(&a.registration_date));
    patients
}

/// Leads from a list response, in backend order.
pub fn leads_from_response(response: &Value) -> Vec<Lead> {
    envelope::items(response).iter().map(lead_from_value).collect()
}

/// Appointments from a list response, newest date first (history order).
pub fn appointments_from_response(response: &Value) -> Vec<Appointment> {
    let mut appointments: Vec<Appointment> = envelope::items(response)
        .iter()
        .map(appointment_from_value)
        .collect();
    appointments.sort_by(|a, b| b.date.cmp(&a.date));
    appointments
}

/// Documents from a list response, in backend order.
pub fn documents_from_response(response: &Value) -> Vec<PatientDocument> {
    envelope::items(response).iter().map(document_from_value).collect()
}

/// Clinical notes from a list response, in backend order.
pub fn notes_from_response(response: &Value) -> Vec<ClinicalNote> {
    envelope::items(response).iter().map(note_from_value).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_patient_candidate_key_order() {
        // `mobile` outranks `phone`; camelCase outranks snake_case.
        let item = json!({
            "id": "p1",
            "name": "Sita Verma",
            "mobile": "9000000002",
            "phone": "ignored",
            "registrationDate": "2025-02-01",
            "registration_date": "1999-01-01"
        });
        let patient = patient_from_value(&item);
        assert_eq!(patient.mobile, "9000000002");
        assert_eq!(patient.registration_date, "2025-02-01");
    }

    #[test]
    fn test_patient_defaults() {
        let patient = patient_from_value(&json!({}));
        assert!(patient.id.starts_with("temp-"));
        assert_eq!(patient.name, "Unknown Patient");
        assert_eq!(patient.mobile, "-");
        assert_eq!(patient.uhid, "-");
        assert_eq!(patient.gender, Gender::Female);
        assert_eq!(patient.status, PatientStatus::Active);
        assert!(!patient.registration_date.is_empty());
    }

    #[test]
    fn test_patient_snake_case_fallbacks() {
        let item = json!({
            "id": "p2",
            "name": "Ramesh Gupta",
            "phone": "9000000001",
            "registration_date": "2025-01-15",
            "blood_group": "B+",
            "referral_doctor": "Dr. Rao",
            "aadhar_id": "1234"
        });
        let patient = patient_from_value(&item);
        assert_eq!(patient.mobile, "9000000001");
        assert_eq!(patient.registration_date, "2025-01-15");
        assert_eq!(patient.blood_group.as_deref(), Some("B+"));
        assert_eq!(patient.referral_doctor.as_deref(), Some("Dr. Rao"));
        assert_eq!(patient.aadhar.as_deref(), Some("1234"));
    }

    #[test]
    fn test_lead_status_parse_with_default() {
        let lead = lead_from_value(&json!({ "id": "l1", "name": "A", "phone": "1" }));
        assert_eq!(lead.status, LeadStatus::NewInquiry);

        let converted = lead_from_value(&json!({
            "id": "l2", "name": "B", "phone": "2",
            "status": "Converted - Active Patient"
        }));
        assert_eq!(converted.status, LeadStatus::ConvertedActivePatient);
    }

    #[test]
    fn test_numeric_age_is_stringified() {
        let lead = lead_from_value(&json!({ "id": "l1", "name": "A", "phone": "1", "age": 34 }));
        assert_eq!(lead.age.as_deref(), Some("34"));
    }

    #[test]
    fn test_patients_sorted_newest_first() {
        let response = json!({ "data": { "items": [
            { "id": "p1", "name": "A", "mobile": "1", "registration_date": "2025-01-01" },
            { "id": "p2", "name": "B", "mobile": "2", "registration_date": "2025-03-01" },
            { "id": "p3", "name": "C", "mobile": "3", "registration_date": "2025-02-01" }
        ]}});
        let patients = patients_from_response(&response);
        let ids: Vec<&str> = patients.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p2", "p3", "p1"]);
    }

    #[test]
    fn test_appointments_sorted_descending() {
        let response = json!([
            { "id": "a1", "patientName": "X", "doctorId": "d", "date": "2025-01-01" },
            { "id": "a2", "patientName": "X", "doctorId": "d", "date": "2025-06-01" }
        ]);
        let appointments = appointments_from_response(&response);
        assert_eq!(appointments[0].id, "a2");
        assert_eq!(appointments[1].id, "a1");
    }
}
