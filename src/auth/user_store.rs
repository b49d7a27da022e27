//! User Storage
//! Mission: Securely store and manage user accounts with SQLite

use crate::auth::models::{Role, User};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;
use rusqlite::{params, Connection, ErrorCode};
use tracing::info;
use uuid::Uuid;

/// Typed store failures. `InvalidCredentials` deliberately covers both an
/// unknown email and a wrong password so callers cannot probe which emails
/// are registered.
#[derive(Debug)]
pub enum StoreError {
    DuplicateEmail,
    InvalidCredentials,
    NotFound,
    Database(rusqlite::Error),
    Hash(bcrypt::BcryptError),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::DuplicateEmail => write!(f, "Email already registered"),
            StoreError::InvalidCredentials => write!(f, "Invalid email or password"),
            StoreError::NotFound => write!(f, "User not found"),
            StoreError::Database(e) => write!(f, "Database error: {}", e),
            StoreError::Hash(e) => write!(f, "Password hashing error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Database(e)
    }
}

impl From<bcrypt::BcryptError> for StoreError {
    fn from(e: bcrypt::BcryptError) -> Self {
        StoreError::Hash(e)
    }
}

/// User storage with SQLite backend
pub struct UserStore {
    db_path: String,
}

impl UserStore {
    /// Create a new user store and initialize database
    pub fn new(db_path: &str) -> Result<Self, StoreError> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    /// Initialize database schema. The UNIQUE constraint on email is what
    /// makes concurrent duplicate registrations safe: the insert itself
    /// rejects the loser, not a check-then-act sequence.
    fn init_db(&self) -> Result<(), StoreError> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                name TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                role TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    /// Seed a first admin account when no admin exists yet. Idempotent:
    /// called at every startup, inserts at most once.
    pub fn seed_admin(&self, email: &str, password: &str) -> Result<(), StoreError> {
        let conn = Connection::open(&self.db_path)?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM users WHERE role = 'ADMIN'",
            [],
            |row| row.get(0),
        )?;

        if count == 0 {
            let admin = self.create_user(email, "Administrator", password, Role::Admin)?;
            info!(email = %admin.email, "Seeded initial admin account");
        }

        Ok(())
    }

    /// Create a new user. Fails with `DuplicateEmail` when the email is
    /// already registered.
    pub fn create_user(
        &self,
        email: &str,
        name: &str,
        password: &str,
        role: Role,
    ) -> Result<User, StoreError> {
        let password_hash = hash(password, DEFAULT_COST)?;

        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            name: name.to_string(),
            password_hash,
            role,
            created_at: Utc::now().to_rfc3339(),
        };

        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "INSERT INTO users (id, email, name, password_hash, role, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                user.id.to_string(),
                user.email,
                user.name,
                user.password_hash,
                user.role.as_str(),
                user.created_at,
            ],
        )
        .map_err(|e| match e {
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == ErrorCode::ConstraintViolation =>
            {
                StoreError::DuplicateEmail
            }
            other => StoreError::Database(other),
        })?;

        info!(email = %user.email, role = user.role.as_str(), "Created user");

        Ok(user)
    }

    /// Verify email and password, returning the account on success.
    /// Unknown email and wrong password are externally indistinguishable.
    pub fn verify_credentials(&self, email: &str, password: &str) -> Result<User, StoreError> {
        let user = self
            .get_user_by_email(email)?
            .ok_or(StoreError::InvalidCredentials)?;

        if verify(password, &user.password_hash)? {
            Ok(user)
        } else {
            Err(StoreError::InvalidCredentials)
        }
    }

    /// Get user by email (the login key, matched case-sensitively)
    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, email, name, password_hash, role, created_at
             FROM users WHERE email = ?1",
        )?;

        let user_result = stmt.query_row(params![email], row_to_user);

        match user_result {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get user by id (used by the session validator to resolve claims)
    pub fn get_user_by_id(&self, id: &Uuid) -> Result<Option<User>, StoreError> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, email, name, password_hash, role, created_at
             FROM users WHERE id = ?1",
        )?;

        let user_result = stmt.query_row(params![id.to_string()], row_to_user);

        match user_result {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List all users (admin only)
    pub fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, email, name, password_hash, role, created_at
             FROM users ORDER BY created_at",
        )?;

        let users = stmt
            .query_map([], row_to_user)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(users)
    }

    /// Change a user's role. Fails with `NotFound` when the id has no row;
    /// the caller is responsible for validating the role against the
    /// enumeration before calling.
    pub fn update_role(&self, id: &Uuid, role: Role) -> Result<User, StoreError> {
        let conn = Connection::open(&self.db_path)?;

        let rows_affected = conn.execute(
            "UPDATE users SET role = ?1 WHERE id = ?2",
            params![role.as_str(), id.to_string()],
        )?;

        if rows_affected == 0 {
            return Err(StoreError::NotFound);
        }

        info!(user_id = %id, role = role.as_str(), "Updated user role");

        self.get_user_by_id(id)?.ok_or(StoreError::NotFound)
    }
}

/// Map a users row to a `User`. Malformed ids or role strings surface as
/// conversion failures rather than panics.
fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    let id_str: String = row.get(0)?;
    let role_str: String = row.get(4)?;

    let id = Uuid::parse_str(&id_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let role = Role::from_str(&role_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            rusqlite::types::Type::Text,
            format!("unknown role: {}", role_str).into(),
        )
    })?;

    Ok(User {
        id,
        email: row.get(1)?,
        name: row.get(2)?,
        password_hash: row.get(3)?,
        role,
        created_at: row.get(5)?,
    })
}
