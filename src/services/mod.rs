//! Business logic services

pub mod bookings;
pub mod equipment;
pub mod notices;
pub mod rooms;
pub mod schedules;
pub mod users;

use crate::{
    config::BookingConfig,
    error::AppResult,
    repository::Repository,
    scheduling::{BookingPolicy, Clock},
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub rooms: rooms::RoomsService,
    pub bookings: bookings::BookingsService,
    pub schedules: schedules::SchedulesService,
    pub notices: notices::NoticesService,
    pub equipment: equipment::EquipmentService,
    pub users: users::UsersService,
}

impl Services {
    /// Create all services with the given repository and booking policy
    pub fn new(repository: Repository, booking_config: &BookingConfig) -> AppResult<Self> {
        let policy = BookingPolicy::from_config(booking_config)?;
        let clock = Clock::from_offset_minutes(booking_config.utc_offset_minutes)?;

        Ok(Self {
            rooms: rooms::RoomsService::new(repository.clone()),
            bookings: bookings::BookingsService::new(repository.clone(), policy, clock),
            schedules: schedules::SchedulesService::new(repository.clone(), policy, clock),
            notices: notices::NoticesService::new(repository.clone()),
            equipment: equipment::EquipmentService::new(repository.clone()),
            users: users::UsersService::new(repository),
        })
    }
}
