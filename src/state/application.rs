//! Application record assembled across the wizard steps

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Institution details from the first step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionInfo {
    pub institution_name: String,
    /// Canonical (uppercase) LEI
    pub lei_code: String,
    pub registered_country: String,
    pub tax_number: String,
    pub funding_source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredAddress {
    pub street: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub postal_code: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Beneficial owner or controlling party
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum KeyParty {
    Individual {
        name: String,
        id_document: String,
        ownership_pct: f64,
    },
    Entity {
        registration_number: String,
        representative: String,
        ownership_pct: f64,
    },
}

impl KeyParty {
    pub fn ownership_pct(&self) -> f64 {
        match self {
            Self::Individual { ownership_pct, .. } | Self::Entity { ownership_pct, .. } => {
                *ownership_pct
            }
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            Self::Individual { name, .. } => name.clone(),
            Self::Entity {
                registration_number,
                representative,
                ..
            } => format!("{registration_number} ({representative})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSet {
    pub certificate_of_incorporation: String,
    pub articles_of_association: String,
    pub proof_of_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplementary: Option<String>,
    pub declaration_accepted: bool,
}

/// Output of one successfully validated step
#[derive(Debug, Clone, PartialEq)]
pub enum StepData {
    Institution(InstitutionInfo),
    Address(RegisteredAddress),
    Parties(Vec<KeyParty>),
    Documents(DocumentSet),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("application is missing the {0} section")]
pub struct IncompleteApplication(pub &'static str);

/// Aggregate record filled in step by step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Application {
    pub applicant_email: Option<String>,
    pub institution: Option<InstitutionInfo>,
    pub address: Option<RegisteredAddress>,
    pub parties: Vec<KeyParty>,
    pub documents: Option<DocumentSet>,
}

impl Application {
    pub fn new(applicant_email: Option<String>) -> Self {
        Self {
            applicant_email,
            ..Default::default()
        }
    }

    /// Merge a step's data, replacing anything submitted earlier for it
    pub fn merge(&mut self, data: StepData) {
        match data {
            StepData::Institution(info) => self.institution = Some(info),
            StepData::Address(address) => self.address = Some(address),
            StepData::Parties(parties) => self.parties = parties,
            StepData::Documents(documents) => self.documents = Some(documents),
        }
    }

    /// Build the wire request; fails if a section was never submitted
    pub fn to_request(&self) -> Result<SubmissionRequest, IncompleteApplication> {
        let institution = self
            .institution
            .clone()
            .ok_or(IncompleteApplication("institution"))?;
        let address = self.address.clone().ok_or(IncompleteApplication("address"))?;
        if self.parties.is_empty() {
            return Err(IncompleteApplication("parties"));
        }
        let documents = self
            .documents
            .clone()
            .ok_or(IncompleteApplication("documents"))?;

        Ok(SubmissionRequest {
            application_id: Uuid::new_v4(),
            submitted_at: Utc::now(),
            applicant_email: self.applicant_email.clone(),
            institution,
            address,
            parties: self.parties.clone(),
            documents,
        })
    }
}

/// JSON body sent to the submission endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    pub application_id: Uuid,
    pub submitted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicant_email: Option<String>,
    pub institution: InstitutionInfo,
    pub address: RegisteredAddress,
    pub parties: Vec<KeyParty>,
    pub documents: DocumentSet,
}

/// Response envelope from the submission endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_to_request_requires_every_section() {
        let mut application = Application::default();
        assert_eq!(
            application.to_request().unwrap_err(),
            IncompleteApplication("institution")
        );
        application.merge(StepData::Institution(institution()));
        application.merge(StepData::Address(address()));
        assert_eq!(
            application.to_request().unwrap_err(),
            IncompleteApplication("parties")
        );
    }

    #[test]
    fn test_merge_replaces_previous_section() {
        let mut application = complete_application();
        let mut info = institution();
        info.institution_name = "Acme Holdings".to_string();
        application.merge(StepData::Institution(info));
        assert_eq!(
            application.institution.unwrap().institution_name,
            "Acme Holdings"
        );
    }

    #[test]
    fn test_request_json_shape() {
        let request = complete_application().to_request().unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["applicantEmail"], "ops@acme.com");
        assert_eq!(json["institution"]["leiCode"], "12345678901234567890");
        assert_eq!(json["parties"][0]["type"], "individual");
        assert_eq!(json["parties"][0]["idDocument"], "P1234567");
        assert_eq!(json["documents"]["declarationAccepted"], true);
        assert!(json["institution"].get("website").is_none());
    }

    #[test]
    fn test_response_envelope_defaults() {
        let parsed: SubmissionResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(!parsed.success);
        assert!(parsed.reference.is_none());
        assert!(parsed.message.is_none());
    }

    #[test]
    fn test_entity_party_display() {
        let party = KeyParty::Entity {
            registration_number: "HRB 1234".to_string(),
            representative: "John Roe".to_string(),
            ownership_pct: 40.0,
        };
        assert_eq!(party.display_name(), "HRB 1234 (John Roe)");
        assert_eq!(party.ownership_pct(), 40.0);
    }
}
