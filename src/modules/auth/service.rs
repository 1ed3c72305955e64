use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use gurukul_models::ids::UserId;
use gurukul_models::{primary_role, Role};

use crate::config::jwt::JwtConfig;
use crate::modules::profiles::model::Profile;
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::{hash_password, verify_password};

use super::model::{LoginRequest, LoginResponse, RegisterRequestDto};

pub struct AuthService;

impl AuthService {
    /// Self-service signup. New accounts always start as students; any
    /// further role is granted by an admin through the registry.
    #[instrument(skip(db, dto))]
    pub async fn register_user(db: &PgPool, dto: RegisterRequestDto) -> Result<Profile, AppError> {
        let existing = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM profiles WHERE email = $1)",
        )
        .bind(&dto.email)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        if existing {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Email already exists"
            )));
        }

        let hashed_password = hash_password(&dto.password)?;

        // Profile and registry entry land together or not at all.
        let mut tx = db.begin().await.map_err(AppError::database)?;

        let profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (full_name, email, phone, role, password)
            VALUES ($1, $2, $3, 'student', $4)
            RETURNING id, full_name, email, phone, role, created_at, updated_at
            "#,
        )
        .bind(&dto.full_name)
        .bind(&dto.email)
        .bind(&dto.phone)
        .bind(&hashed_password)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::database)?;

        sqlx::query("INSERT INTO user_roles (user_id, role) VALUES ($1, 'student')")
            .bind(profile.id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::database)?;

        tx.commit().await.map_err(AppError::database)?;

        Ok(profile)
    }

    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct ProfileWithPassword {
            id: Uuid,
            full_name: String,
            email: String,
            phone: Option<String>,
            role: Role,
            password: String,
            created_at: chrono::DateTime<chrono::Utc>,
            updated_at: chrono::DateTime<chrono::Utc>,
        }

        let row = sqlx::query_as::<_, ProfileWithPassword>(
            r#"
            SELECT id, full_name, email, phone, role, password, created_at, updated_at
            FROM profiles WHERE email = $1
            "#,
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::unauthorized("Invalid email or password".to_string()))?;

        if !verify_password(&dto.password, &row.password)? {
            return Err(AppError::unauthorized(
                "Invalid email or password".to_string(),
            ));
        }

        let user_id = UserId::from_uuid(row.id);

        let roles = sqlx::query_scalar::<_, Role>("SELECT role FROM user_roles WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(db)
            .await
            .map_err(AppError::database)?;

        let access_token = create_access_token(user_id, &row.email, jwt_config)?;

        // Fixed priority: admin > teacher > parent > student. A user with no
        // registry rows is sent back to the public site.
        let redirect_to = primary_role(&roles)
            .map(|role| role.dashboard_path())
            .unwrap_or("/")
            .to_string();

        Ok(LoginResponse {
            access_token,
            user: Profile {
                id: user_id,
                full_name: row.full_name,
                email: row.email,
                phone: row.phone,
                role: row.role,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            roles,
            redirect_to,
        })
    }
}
