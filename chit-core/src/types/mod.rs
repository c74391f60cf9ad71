//! Domain Types
//!
//! All entity and value types for the subscription, referral, commission
//! and winner subsystems.

pub mod card;
pub mod commission;
pub mod common;
pub mod payment;
pub mod scheme;
pub mod winner;

pub use card::{Card, CardStatus, KycStatus, PaymentMethod, PaymentStatus};
pub use commission::{CommissionEntry, CommissionLevel, CommissionRates};
pub use common::{BasisPoints, CardId, EntryId, Money, PaymentId, SchemeId, UserId, WinnerId};
pub use payment::{PaymentRecord, PaymentRecordStatus, PaymentSource};
pub use scheme::{Scheme, SchemeStatus, SubscriptionCycle};
pub use winner::{Winner, WinnerStatus};
