//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod booking;
pub mod review;
pub mod service;
pub mod service_type;
pub mod user;

#[allow(unused_imports)]
pub use booking::{ActiveModel as BookingActiveModel, Entity as BookingEntity};
#[allow(unused_imports)]
pub use review::{ActiveModel as ReviewActiveModel, Entity as ReviewEntity};
#[allow(unused_imports)]
pub use service::{ActiveModel as ServiceActiveModel, Entity as ServiceEntity};
#[allow(unused_imports)]
pub use service_type::{ActiveModel as ServiceTypeActiveModel, Entity as ServiceTypeEntity};
#[allow(unused_imports)]
pub use user::{ActiveModel as UserActiveModel, Entity as UserEntity};
