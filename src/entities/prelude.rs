pub use super::audit_logs::Entity as AuditLogs;
pub use super::certifications::Entity as Certifications;
pub use super::education::Entity as Education;
pub use super::experiences::Entity as Experiences;
pub use super::profiles::Entity as Profiles;
pub use super::projects::Entity as Projects;
pub use super::skills::Entity as Skills;
pub use super::users::Entity as Users;
