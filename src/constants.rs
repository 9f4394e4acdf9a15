/// Name of the HTTP-only cookie carrying the signed auth token.
pub const AUTH_COOKIE: &str = "folio_token";

pub mod roles {

    pub const ADMIN: &str = "admin";

    pub const USER: &str = "user";
}

pub mod project_status {

    pub const DRAFT: &str = "draft";

    pub const PUBLISHED: &str = "published";

    pub const ARCHIVED: &str = "archived";
}

pub mod pagination {

    pub const DEFAULT_PAGE_SIZE: u64 = 10;

    pub const MAX_PAGE_SIZE: u64 = 100;

    pub const DEFAULT_AUDIT_LIMIT: u64 = 50;
}
