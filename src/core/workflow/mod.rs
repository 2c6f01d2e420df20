pub mod approval;
pub mod device;
pub mod policy;
