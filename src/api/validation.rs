use super::ApiError;

/// Reject blank required fields with a per-field message.
pub fn require(value: &str, field: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::validation(format!("{field} is required")));
    }
    Ok(())
}

/// Enum-ish string fields are validated against their allowed set.
pub fn one_of(value: &str, allowed: &[&str], field: &str) -> Result<(), ApiError> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(ApiError::validation(format!(
        "{field} must be one of: {}",
        allowed.join(", ")
    )))
}

pub const PROJECT_CATEGORIES: &[&str] =
    &["web", "mobile", "backend", "ai-ml", "opensource", "other"];

pub const PROJECT_STATUSES: &[&str] = &["draft", "published", "archived"];

pub const SKILL_CATEGORIES: &[&str] = &[
    "backend", "frontend", "database", "devops", "ai-ml", "tools", "other",
];

pub const SKILL_PROFICIENCIES: &[&str] = &["beginner", "intermediate", "advanced", "expert"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_rejects_blank() {
        assert!(require("  ", "Title").is_err());
        assert!(require("ok", "Title").is_ok());
    }

    #[test]
    fn one_of_names_the_field() {
        let err = one_of("wizard", SKILL_PROFICIENCIES, "Proficiency").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Proficiency"));
    }

    #[test]
    fn one_of_accepts_members() {
        assert!(one_of("expert", SKILL_PROFICIENCIES, "Proficiency").is_ok());
        assert!(one_of("web", PROJECT_CATEGORIES, "Category").is_ok());
    }
}
