//! OpenAPI specification for Tablecheck server.

use utoipa::OpenApi;

use tablecheck_core::{
    InspectionReport, InspectionResult, Severity, SeverityBreakdown, SeverityTable, Violation,
};

use crate::routes::{
    BatchInspectRequest, BatchInspectResponse, ErrorResponse, InspectRequest, InspectResponse,
    SeverityTableResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::inspect,
        crate::routes::inspect_batch,
        crate::routes::severity_table,
        crate::routes::replace_severity_table,
        crate::routes::openapi_json
    ),
    components(
        schemas(
            InspectRequest,
            InspectResponse,
            BatchInspectRequest,
            BatchInspectResponse,
            SeverityTableResponse,
            ErrorResponse,
            InspectionReport,
            InspectionResult,
            Severity,
            SeverityBreakdown,
            SeverityTable,
            Violation
        )
    ),
    tags(
        (name = "inspections", description = "Report parsing"),
        (name = "severity", description = "Severity classification"),
        (name = "system", description = "System endpoints")
    )
)]
/// OpenAPI specification for the Tablecheck server.
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::ApiDoc;
    use utoipa::OpenApi;

    #[test]
    fn openapi_includes_expected_paths() {
        let doc = ApiDoc::openapi();
        let paths = doc.paths.paths;

        assert!(paths.contains_key("/inspections"));
        assert!(paths.contains_key("/inspections/batch"));
        assert!(paths.contains_key("/severity-table"));
        assert!(paths.contains_key("/openapi.json"));
    }

    #[test]
    fn openapi_registers_domain_schemas() {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.expect("components").schemas;

        assert!(schemas.contains_key("Violation"));
        assert!(schemas.contains_key("Severity"));
        assert!(schemas.contains_key("InspectResponse"));
    }
}
