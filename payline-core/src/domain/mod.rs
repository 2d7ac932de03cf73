//! Core domain entities
//!
//! Plain data and validation rules - no I/O.

pub mod balance;
mod event;
pub mod forms;
pub mod result;
pub mod route;
mod session;
pub mod transfer;
mod user;

pub use balance::{format_balance, AccountSnapshot};
pub use event::LogEvent;
pub use forms::{Field, FieldErrors, SigninForm, SignupForm};
pub use route::{Navigation, Route};
pub use session::SessionToken;
pub use transfer::{TransferDraft, TransferReceipt, TransferRequest};
pub use user::{Candidate, UserProfile};
