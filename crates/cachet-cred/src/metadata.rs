//! VC Type Metadata for the employee credential type.

use crate::types::{ClaimDefinition, ClaimDisplay, SdMode, VcTypeDisplay, VcTypeMetadata};

/// Default URI identifying the employee credential type. Serves as the
/// `vct` claim value in issued credentials; deployments override it via
/// configuration.
pub const EMPLOYEE_VCT_URI: &str = "https://cachet.example.com/credentials/types/employee/v1";

/// The employee claim names, in disclosure order. Everything except `vct`
/// is selectively disclosable.
pub const EMPLOYEE_CLAIMS: [&str; 5] =
    ["firstName", "lastName", "jobTitle", "startDate", "endDate"];

fn claim(name: &str, label: &str) -> ClaimDefinition {
    ClaimDefinition {
        path: vec![name.to_string()],
        sd: SdMode::Allowed,
        display: Some(vec![ClaimDisplay {
            lang: "en".into(),
            label: label.into(),
        }]),
    }
}

/// Build the SD-JWT VC Type Metadata document for the employee credential
/// type, served at `/.well-known/vct/employee`.
pub fn employee_vc_type_metadata(vct: &str) -> VcTypeMetadata {
    let description =
        "A verifiable credential confirming a person's employment status and role within an organization.";

    VcTypeMetadata {
        vct: vct.to_string(),
        name: "Employee Credential".into(),
        description: Some(description.into()),
        display: Some(vec![VcTypeDisplay {
            lang: "en".into(),
            name: "Employee Credential".into(),
            description: Some(description.into()),
        }]),
        claims: Some(vec![
            claim("firstName", "First Name"),
            claim("lastName", "Last Name"),
            claim("jobTitle", "Job Title"),
            claim("startDate", "Start Date"),
            claim("endDate", "End Date"),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_covers_all_claims() {
        let metadata = employee_vc_type_metadata(EMPLOYEE_VCT_URI);
        let claims = metadata.claims.unwrap();
        assert_eq!(claims.len(), EMPLOYEE_CLAIMS.len());
        for (definition, name) in claims.iter().zip(EMPLOYEE_CLAIMS) {
            assert_eq!(definition.path, vec![name.to_string()]);
            assert_eq!(definition.sd, SdMode::Allowed);
        }
    }

    #[test]
    fn test_metadata_vct_override() {
        let metadata = employee_vc_type_metadata("https://issuer.test/vct/employee");
        assert_eq!(metadata.vct, "https://issuer.test/vct/employee");
    }

    #[test]
    fn test_metadata_serde_roundtrip() {
        let metadata = employee_vc_type_metadata(EMPLOYEE_VCT_URI);
        let json = serde_json::to_string(&metadata).unwrap();
        let restored: VcTypeMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(metadata, restored);
    }
}
