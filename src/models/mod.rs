//! Data models for the portal

pub mod booking;
pub mod enums;
pub mod equipment;
pub mod notice;
pub mod room;
pub mod schedule;
pub mod user;

// Re-export commonly used types
pub use booking::{Booking, CreateBooking, CreateSlotBookings};
pub use enums::{BookingStatus, EquipmentStatus, RoomStatus};
pub use equipment::{Equipment, EquipmentLoan};
pub use notice::Notice;
pub use room::Room;
pub use schedule::{DaySchedule, Slot, WeeklySchedule};
pub use user::{Role, User, UserClaims};
