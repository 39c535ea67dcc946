pub mod staff_models;
pub mod staff_repository;

pub use staff_models::{NewStaffMember, Recipient, StaffIdentity, StaffRole, VendorStaff};
pub use staff_repository::{RestStaffDirectory, StaffDirectory};
