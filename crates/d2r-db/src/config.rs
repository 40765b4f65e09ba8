/// Connection settings for the d2r database.
///
/// Holds a full PostgreSQL URL. Picking that URL (CLI flag, the
/// `D2R_DATABASE_URL` environment variable, or the config file) is the
/// host's job; this type only derives what the pool helpers need from it.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_url: String,
}

impl DbConfig {
    /// URL a fresh install connects to when nothing else is configured.
    pub const DEFAULT_URL: &str = "postgresql://localhost:5432/d2r";

    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }

    /// Name of the target database, i.e. the last path segment of the URL.
    pub fn database_name(&self) -> Option<&str> {
        let (_, name) = self.database_url.rsplit_once('/')?;
        (!name.is_empty()).then_some(name)
    }

    /// URL of the `postgres` maintenance database on the same server.
    /// `CREATE DATABASE` has to run there, since the target may not exist.
    pub fn maintenance_url(&self) -> String {
        match self.database_url.rsplit_once('/') {
            Some((server, _)) => format!("{server}/postgres"),
            None => self.database_url.clone(),
        }
    }
}
