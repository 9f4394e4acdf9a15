use anyhow::{Context, Result, bail};
use sea_orm::Set;

use crate::api::encode_string_list;
use crate::config::Config;
use crate::constants::{project_status, roles};
use crate::db::Store;
use crate::entities::{experiences, projects, skills};
use crate::slug::slugify;

/// Create the admin account, or rotate its password if it already exists.
pub async fn create_admin(
    config: &Config,
    email: Option<String>,
    name: &str,
    password: &str,
) -> Result<()> {
    if password.len() < 8 {
        bail!("Password must be at least 8 characters long");
    }
    if name.trim().is_empty() {
        bail!("Name cannot be empty");
    }

    let email = email.unwrap_or_else(|| config.auth.admin_email.clone());

    let store = Store::new(&config.general.database_path).await?;
    let users = store.users();

    match users.find_by_email(&email).await? {
        Some(_) => {
            users
                .update_password(&email, password, &config.security)
                .await
                .context("Failed to update password")?;
            println!("✓ Password updated for existing account");
        }
        None => {
            users
                .create(&email, password, name, roles::ADMIN, &config.security)
                .await
                .context("Failed to create admin user")?;
            println!("✓ Admin user created");
        }
    }

    println!();
    println!("Email: {email}");
    println!("Role:  {}", roles::ADMIN);

    Ok(())
}

/// Populate an empty database with sample content. Collections that already
/// hold records are left untouched, so the command is safe to re-run.
pub async fn seed(config: &Config) -> Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    let Some(admin) = store
        .users()
        .find_by_email(&config.auth.admin_email)
        .await?
    else {
        bail!(
            "No admin account found for {}. Run `folio create-admin` first.",
            config.auth.admin_email
        );
    };

    let now = chrono::Utc::now().to_rfc3339();

    let skills_repo = store.content::<skills::Entity>();
    if skills_repo.list(true, None, None).await?.is_empty() {
        let samples = [
            ("Rust", "backend", "advanced"),
            ("PostgreSQL", "database", "advanced"),
            ("TypeScript", "frontend", "intermediate"),
            ("Docker", "devops", "intermediate"),
        ];

        for (order, (name, category, proficiency)) in samples.iter().enumerate() {
            let active = skills::ActiveModel {
                name: Set((*name).to_string()),
                category: Set((*category).to_string()),
                proficiency: Set((*proficiency).to_string()),
                icon: Set(None),
                order: Set(i32::try_from(order).unwrap_or(0)),
                visibility: Set(true),
                created_by: Set(admin.id),
                created_at: Set(now.clone()),
                updated_at: Set(now.clone()),
                ..Default::default()
            };
            skills_repo.insert(active).await?;
        }
        println!("✓ Seeded {} skills", samples.len());
    } else {
        println!("Skills already present, skipping");
    }

    let projects_repo = store.content::<projects::Entity>();
    if projects_repo.list(true, None, None).await?.is_empty() {
        let title = "Portfolio Backend";
        let active = projects::ActiveModel {
            title: Set(title.to_string()),
            slug: Set(slugify(title)),
            short_description: Set("REST API powering this portfolio site".to_string()),
            description: Set(
                "Role-gated content management with an append-only audit trail.".to_string(),
            ),
            technologies: Set(encode_string_list(&[
                "rust".to_string(),
                "axum".to_string(),
                "sea-orm".to_string(),
            ])),
            category: Set("backend".to_string()),
            images: Set("[]".to_string()),
            live_url: Set(None),
            github_url: Set(None),
            featured: Set(true),
            order: Set(0),
            status: Set(project_status::PUBLISHED.to_string()),
            visibility: Set(true),
            views: Set(0),
            created_by: Set(admin.id),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        };
        projects_repo.insert(active).await?;
        println!("✓ Seeded 1 project");
    } else {
        println!("Projects already present, skipping");
    }

    let experiences_repo = store.content::<experiences::Entity>();
    if experiences_repo.list(true, None, None).await?.is_empty() {
        let active = experiences::ActiveModel {
            company: Set("Example Corp".to_string()),
            position: Set("Software Engineer".to_string()),
            location: Set("Remote".to_string()),
            start_date: Set("2022-01-01".to_string()),
            end_date: Set(None),
            current: Set(true),
            description: Set("Building backend services.".to_string()),
            responsibilities: Set(encode_string_list(&[
                "Design and implement REST APIs".to_string(),
            ])),
            achievements: Set("[]".to_string()),
            technologies: Set(encode_string_list(&["rust".to_string()])),
            order: Set(0),
            visibility: Set(true),
            created_by: Set(admin.id),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        };
        experiences_repo.insert(active).await?;
        println!("✓ Seeded 1 experience");
    } else {
        println!("Experiences already present, skipping");
    }

    Ok(())
}
