pub mod prelude;

pub mod audit_logs;
pub mod certifications;
pub mod education;
pub mod experiences;
pub mod profiles;
pub mod projects;
pub mod skills;
pub mod users;
