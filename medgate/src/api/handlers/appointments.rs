use axum::{response::IntoResponse, Extension, Json};
use medgate_core::user::User;
use tracing::info;

use super::MessageResponse;

#[utoipa::path(
    get,
    path = "/api/appointments/manage",
    responses(
        (status = 200, description = "Appointment management for doctors and admins", body = MessageResponse),
        (status = 403, description = "Role is neither doctor nor admin"),
    ),
    security(
        ("bearerAuth" = [])
    )
)]
pub async fn manage_appointments_handler() -> impl IntoResponse {
    Json(MessageResponse::new("Appointment management interface"))
}

#[utoipa::path(
    post,
    path = "/api/appointments/priority-booking",
    responses(
        (status = 200, description = "Priority booking for premium members", body = MessageResponse),
        (status = 403, description = "Role is not premium_patient, doctor or admin"),
    ),
    security(
        ("bearerAuth" = [])
    )
)]
pub async fn priority_booking_handler(Extension(user): Extension<User>) -> impl IntoResponse {
    info!("Priority appointment booked for {}", user.id);
    Json(MessageResponse::new("Priority appointment booked"))
}
