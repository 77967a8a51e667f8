//! Business logic services
//!
//! Each service owns a pool handle and the SQL for one slice of the
//! domain. The ledger service is the only place quantities change.

pub mod intake;
pub mod ledger;
pub mod material;
pub mod program;
pub mod report;
pub mod request;
pub mod user;
pub mod warehouse;

pub use intake::IntakeService;
pub use ledger::LedgerService;
pub use material::MaterialService;
pub use program::ProgramService;
pub use report::ReportService;
pub use request::RequestService;
pub use user::UserService;
pub use warehouse::WarehouseService;
