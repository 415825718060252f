//! Per-engine package names and environment conventions.

use std::collections::BTreeMap;

use crate::config::{Engine, ProcessEntry};

/// npm packages that make up an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnginePackages {
    /// Meta package users install.
    pub root: &'static str,
    /// API server package.
    pub server: &'static str,
    /// App (frontend) package.
    pub app: &'static str,
}

impl EnginePackages {
    /// Packages for a known engine.
    ///
    /// # Examples
    ///
    /// ```
    /// use videre::config::Engine;
    /// use videre::plan::EnginePackages;
    ///
    /// let packages = EnginePackages::for_engine(Engine::MongoDb);
    /// assert_eq!(packages.server, "@videre/mongo-server");
    /// ```
    #[must_use]
    pub const fn for_engine(engine: Engine) -> Self {
        match engine {
            Engine::MongoDb => Self {
                root: "@videre/mongo",
                server: "@videre/mongo-server",
                app: "@videre/mongo-app",
            },
        }
    }
}

/// Variables injected on top of the inherited environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    /// Variables for the API server.
    pub server: BTreeMap<String, String>,
    /// Variables for the app. Never carries the database URL.
    pub app: BTreeMap<String, String>,
}

/// Engine-specific variables for `entry`.
///
/// The server sees both ports and the database URL. The app only gets the
/// ports, under a bare name and under the `VITE_` prefix that its build
/// tooling exposes to client code.
#[must_use]
pub fn env_overrides(entry: &ProcessEntry) -> EnvOverrides {
    let server_port = entry.server_port.to_string();
    let client_port = entry.client_port.to_string();

    match entry.engine {
        Engine::MongoDb => EnvOverrides {
            server: BTreeMap::from([
                ("VIDERE_MONGO_SERVER_PORT".to_string(), server_port.clone()),
                ("VIDERE_MONGO_APP_PORT".to_string(), client_port.clone()),
                (
                    "VIDERE_MONGO_DATABASE_URL".to_string(),
                    entry.database_url.clone(),
                ),
            ]),
            app: BTreeMap::from([
                ("VIDERE_MONGO_APP_PORT".to_string(), client_port),
                ("VITE_VIDERE_MONGO_SERVER_PORT".to_string(), server_port),
            ]),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> ProcessEntry {
        ProcessEntry {
            engine: Engine::MongoDb,
            server_port: 4000,
            client_port: 5173,
            database_url: "mongodb://localhost:27017/db".to_string(),
            show_logs: None,
        }
    }

    #[test]
    fn test_mongodb_packages() {
        let packages = EnginePackages::for_engine(Engine::MongoDb);
        assert_eq!(packages.root, "@videre/mongo");
        assert_eq!(packages.server, "@videre/mongo-server");
        assert_eq!(packages.app, "@videre/mongo-app");
    }

    #[test]
    fn test_server_overrides() {
        let env = env_overrides(&entry());
        assert_eq!(env.server["VIDERE_MONGO_SERVER_PORT"], "4000");
        assert_eq!(env.server["VIDERE_MONGO_APP_PORT"], "5173");
        assert_eq!(
            env.server["VIDERE_MONGO_DATABASE_URL"],
            "mongodb://localhost:27017/db"
        );
    }

    #[test]
    fn test_app_overrides_hold_no_database_url() {
        let env = env_overrides(&entry());
        assert_eq!(env.app["VIDERE_MONGO_APP_PORT"], "5173");
        assert_eq!(env.app["VITE_VIDERE_MONGO_SERVER_PORT"], "4000");
        assert!(env.app.values().all(|v| !v.starts_with("mongodb://")));
    }
}
