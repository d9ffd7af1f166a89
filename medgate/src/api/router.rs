use axum::middleware;
use axum::routing::{delete, get, patch, post};
use axum::Router;
use medgate_core::authorization::{
    Permission, PermissionSet, RegistrySnapshot, Role,
};
use medgate_core::settings::api_server::AuthMode;
use medgate_core::user::{User, UserId};
use utoipa::openapi::security::SecurityScheme;
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::basic_auth::auth;
use super::error::{ErrorResponse, InvalidRoleResponse};
use super::handlers::admin::{
    dashboard_handler, update_role_handler, DashboardResponse, RoleUpdatedResponse,
    UpdateRoleRequest, __path_dashboard_handler, __path_update_role_handler,
};
use super::handlers::appointments::{
    manage_appointments_handler, priority_booking_handler, __path_manage_appointments_handler,
    __path_priority_booking_handler,
};
use super::handlers::content::{moderate_content_handler, __path_moderate_content_handler};
use super::handlers::health::{health_checker_handler, __path_health_checker_handler};
use super::handlers::info::{info_handler, ServerInfo, __path_info_handler};
use super::handlers::me::{current_user_handler, CurrentUserResponse, __path_current_user_handler};
use super::handlers::profile::{
    delete_profile_handler, get_profile_handler, update_profile_handler,
    __path_delete_profile_handler, __path_get_profile_handler, __path_update_profile_handler,
};
use super::handlers::rbac::{
    permission_matrix_handler, PermissionMatrixResponse, __path_permission_matrix_handler,
};
use super::handlers::records::{
    create_patient_record_handler, medical_records_handler, patient_records_handler,
    CreateRecordRequest, RecordCreatedResponse, __path_create_patient_record_handler,
    __path_medical_records_handler, __path_patient_records_handler,
};
use super::handlers::users::{delete_user_handler, __path_delete_user_handler};
use super::handlers::MessageResponse;
use super::middleware::authorization::{
    require_ownership_or_admin, require_permission, require_role,
};
use crate::app_state::SharedAppState;
use crate::services::directory::ProfileUpdate;

#[derive(OpenApi)]
#[openapi(
    paths(
        health_checker_handler,
        info_handler,
        permission_matrix_handler,
        current_user_handler,
        delete_user_handler,
        manage_appointments_handler,
        priority_booking_handler,
        medical_records_handler,
        moderate_content_handler,
        dashboard_handler,
        update_role_handler,
        patient_records_handler,
        create_patient_record_handler,
        get_profile_handler,
        update_profile_handler,
        delete_profile_handler,
    ),
    components(
        schemas(
            Role, Permission, PermissionSet, RegistrySnapshot, User, UserId, AuthMode,
            ServerInfo, MessageResponse, ErrorResponse, InvalidRoleResponse,
            PermissionMatrixResponse, CurrentUserResponse, DashboardResponse,
            UpdateRoleRequest, RoleUpdatedResponse, CreateRecordRequest,
            RecordCreatedResponse, ProfileUpdate
        )
    ),
    tags(
        (name = "medgate", description = "medgate api")
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearerAuth",
            SecurityScheme::Http(utoipa::openapi::security::Http::new(
                utoipa::openapi::security::HttpAuthScheme::Bearer,
            )),
        )
    }
}

pub struct ApiRoutes;

impl ApiRoutes {
    pub fn create(state: SharedAppState) -> Router {
        let api = ApiDoc::openapi();

        let authenticated_router = Router::new()
            .route("/api/rbac/permissions", get(permission_matrix_handler))
            .route("/api/me", get(current_user_handler))
            .route(
                "/api/users/{id}",
                delete(delete_user_handler).layer(middleware::from_fn_with_state(
                    state.clone(),
                    require_permission(Permission::CanDeleteUsers.as_str()),
                )),
            )
            .route(
                "/api/appointments/manage",
                get(manage_appointments_handler).layer(middleware::from_fn_with_state(
                    state.clone(),
                    require_role(vec![Role::Doctor, Role::Admin]),
                )),
            )
            .route(
                "/api/appointments/priority-booking",
                post(priority_booking_handler).layer(middleware::from_fn_with_state(
                    state.clone(),
                    require_role(vec![Role::PremiumPatient, Role::Doctor, Role::Admin]),
                )),
            )
            .route(
                "/api/medical-records",
                get(medical_records_handler).layer(middleware::from_fn_with_state(
                    state.clone(),
                    require_permission(Permission::CanViewMedicalRecords.as_str()),
                )),
            )
            .route(
                "/api/content/moderate",
                post(moderate_content_handler).layer(middleware::from_fn_with_state(
                    state.clone(),
                    require_permission(Permission::CanModerateContent.as_str()),
                )),
            )
            .route(
                "/api/admin/dashboard",
                get(dashboard_handler).layer(middleware::from_fn_with_state(
                    state.clone(),
                    require_role(vec![Role::Admin]),
                )),
            )
            .route(
                "/api/admin/users/{id}/role",
                patch(update_role_handler).layer(middleware::from_fn_with_state(
                    state.clone(),
                    require_role(vec![Role::Admin]),
                )),
            )
            .route(
                "/api/patients/{patient_id}/records",
                get(patient_records_handler)
                    .post(create_patient_record_handler)
                    .layer(middleware::from_fn_with_state(
                        state.clone(),
                        require_role(vec![Role::Doctor, Role::Admin]),
                    )),
            )
            .route(
                "/api/profile/{user_id}",
                get(get_profile_handler)
                    .put(update_profile_handler)
                    .delete(delete_profile_handler)
                    .layer(middleware::from_fn_with_state(
                        state.clone(),
                        require_ownership_or_admin("user_id"),
                    )),
            )
            .route_layer(middleware::from_fn_with_state(state.clone(), auth));

        let public_router = Router::new()
            .route("/api/health", get(health_checker_handler))
            .route("/api/info", get(info_handler))
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api));

        Router::new()
            .merge(authenticated_router)
            .merge(public_router)
            .with_state(state)
    }
}
