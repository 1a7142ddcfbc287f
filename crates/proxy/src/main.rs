use proxy::{error::ProxyError, start_server};

#[tokio::main]
async fn main() -> Result<(), ProxyError> {
    start_server().await
}
