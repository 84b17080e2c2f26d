use mongodb::bson::doc;
use mongodb::Client;

/// Check if the MongoDB server responds to a ping
pub async fn check_health(client: &Client) -> bool {
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .is_ok()
}
