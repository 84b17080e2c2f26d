//! MongoDB test infrastructure
//!
//! Provides a `TestMongo` helper that creates a MongoDB container for testing.

use mongodb::{Client, Database};
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::mongo::Mongo;
use uuid::Uuid;

/// Test MongoDB wrapper that ensures proper cleanup
///
/// The container is automatically stopped and removed when this struct
/// is dropped. Each instance gets a uniquely named database so tests
/// sharing a container image never see each other's data.
pub struct TestMongo {
    #[allow(dead_code)]
    container: ContainerAsync<Mongo>,
    client: Client,
    database_name: String,
    pub connection_string: String,
}

impl TestMongo {
    /// Create a new test MongoDB instance
    pub async fn new() -> Self {
        let container = Mongo::default()
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let host_port = container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");

        let connection_string = format!("mongodb://127.0.0.1:{}", host_port);

        let client = Client::with_uri_str(&connection_string)
            .await
            .expect("Failed to connect to MongoDB");

        let database_name = format!("test_{}", Uuid::new_v4().simple());

        tracing::info!(port = host_port, database = %database_name, "Test MongoDB ready");

        Self {
            container,
            client,
            database_name,
            connection_string,
        }
    }

    /// Get the client (useful for multi-database scenarios)
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Get the per-test database handle
    pub fn database(&self) -> Database {
        self.client.database(&self.database_name)
    }
}
