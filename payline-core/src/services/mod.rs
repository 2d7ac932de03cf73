//! Service layer - business logic orchestration
//!
//! Services and controllers coordinate domain logic and port interactions.
//! Each one owns a single area of the dashboard or a single flow.

pub mod account;
mod auth;
pub mod dashboard;
mod guard;
pub mod logging;
pub mod search;
pub mod transfer;

pub use account::{AccountController, AccountView};
pub use auth::AuthService;
pub use dashboard::Dashboard;
pub use guard::{RouteGuard, SIGNED_OUT_LANDING};
pub use logging::{EntryPoint, LogEntry, LoggingService};
pub use search::{run_search, SearchController, SearchResponse, SearchState, SearchTicket};
pub use transfer::{TransferController, TransferOutcome, TransferState};
