use axum::{extract::Path, response::IntoResponse, Extension, Json};
use medgate_core::authorization::PermissionSet;
use medgate_core::user::User;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::MessageResponse;

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateRecordRequest {
    pub diagnosis: String,
    #[serde(default)]
    pub prescription: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordCreatedResponse {
    pub message: String,
    pub patient_id: String,
    pub created_by: String,
    pub diagnosis: String,
}

#[utoipa::path(
    get,
    path = "/api/medical-records",
    responses(
        (status = 200, description = "Medical records for roles with canViewMedicalRecords", body = MessageResponse),
        (status = 403, description = "Role lacks canViewMedicalRecords"),
    ),
    security(
        ("bearerAuth" = [])
    )
)]
pub async fn medical_records_handler(
    Extension(user): Extension<User>,
    Extension(permissions): Extension<PermissionSet>,
) -> impl IntoResponse {
    let message = if permissions.premium_features {
        "Medical records (premium feature)"
    } else {
        "Medical records"
    };
    info!("Medical records accessed by {} ({})", user.id, user.role);
    Json(MessageResponse::new(message))
}

#[utoipa::path(
    get,
    path = "/api/patients/{patient_id}/records",
    params(("patient_id" = String, Path, description = "Patient whose records are read")),
    responses(
        (status = 200, description = "Records of one patient", body = MessageResponse),
        (status = 403, description = "Role is neither doctor nor admin"),
    ),
    security(
        ("bearerAuth" = [])
    )
)]
pub async fn patient_records_handler(Path(patient_id): Path<String>) -> impl IntoResponse {
    Json(MessageResponse::new(format!("Records for patient {patient_id}")))
}

#[utoipa::path(
    post,
    path = "/api/patients/{patient_id}/records",
    params(("patient_id" = String, Path, description = "Patient the record belongs to")),
    request_body = CreateRecordRequest,
    responses(
        (status = 200, description = "Record created", body = RecordCreatedResponse),
        (status = 403, description = "Role is neither doctor nor admin"),
    ),
    security(
        ("bearerAuth" = [])
    )
)]
pub async fn create_patient_record_handler(
    Extension(user): Extension<User>,
    Path(patient_id): Path<String>,
    Json(payload): Json<CreateRecordRequest>,
) -> impl IntoResponse {
    info!("Medical record for patient {} created by {}", patient_id, user.id);
    Json(RecordCreatedResponse {
        message: "Medical record created".to_string(),
        patient_id,
        created_by: user.id.to_string(),
        diagnosis: payload.diagnosis,
    })
}
