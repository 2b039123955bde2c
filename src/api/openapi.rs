//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{bookings, equipment, health, notices, rooms, schedules, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Department Portal API",
        version = "0.3.0",
        description = "University Department Portal REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Rooms
        rooms::list_rooms,
        rooms::get_room,
        rooms::create_room,
        rooms::update_room,
        rooms::delete_room,
        // Schedules
        schedules::get_day_schedule,
        schedules::get_weekly_schedule,
        schedules::search_rooms,
        // Bookings
        bookings::create_booking,
        bookings::create_slot_bookings,
        bookings::cancel_booking,
        bookings::get_user_bookings,
        // Users
        users::list_users,
        users::get_user,
        // Notices
        notices::list_notices,
        notices::get_notice,
        notices::create_notice,
        notices::update_notice,
        notices::delete_notice,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        equipment::borrow_equipment,
        equipment::return_equipment_loan,
        equipment::get_user_equipment_loans,
    ),
    components(
        schemas(
            // Rooms
            crate::models::room::Room,
            crate::models::room::CreateRoom,
            crate::models::room::UpdateRoom,
            crate::models::enums::RoomStatus,
            // Schedules
            crate::models::schedule::Slot,
            crate::models::schedule::DaySchedule,
            crate::models::schedule::WeeklySchedule,
            // Bookings
            crate::models::booking::Booking,
            crate::models::enums::BookingStatus,
            bookings::CreateBookingRequest,
            bookings::CreateSlotBookingsRequest,
            bookings::SlotBookingsResponse,
            // Users
            crate::models::user::User,
            crate::models::user::Role,
            // Notices
            crate::models::notice::Notice,
            crate::models::notice::CreateNotice,
            crate::models::notice::UpdateNotice,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            crate::models::equipment::EquipmentLoan,
            crate::models::equipment::CreateEquipmentLoan,
            crate::models::enums::EquipmentStatus,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "rooms", description = "Room administration"),
        (name = "schedules", description = "Slot schedules and room search"),
        (name = "bookings", description = "Room booking"),
        (name = "users", description = "User directory"),
        (name = "notices", description = "Departmental notices"),
        (name = "equipment", description = "Equipment catalog and lending")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
