//! Service Layer
//!
//! One service per operation group. Each service validates before it
//! mutates and runs its writes inside a single datastore transaction.

pub mod card_service;
pub mod payment_service;
pub mod reporting_service;
pub mod scheme_service;
pub mod winner_service;

pub use card_service::{CardService, IssueCard};
pub use payment_service::{DownlinePayment, PaymentService};
pub use reporting_service::{PeriodCollection, ReportingService, SchemeDashboard, UserDashboard};
pub use scheme_service::{NewScheme, SchemeService};
pub use winner_service::WinnerService;
