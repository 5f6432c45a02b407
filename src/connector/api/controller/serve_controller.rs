use std::net::SocketAddr;

use anyhow::{Context, Result};

use super::super::server;
use super::super::Container;

pub struct ServeController<'a> {
    container: &'a Container,
}

impl<'a> ServeController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn serve(&self, bind: String, port: u16) -> Result<String> {
        let addr: SocketAddr = format!("{bind}:{port}")
            .parse()
            .with_context(|| format!("invalid bind address {bind}:{port}"))?;

        server::serve(addr, self.container.app_state()).await?;

        Ok("Server shut down.".to_string())
    }
}
