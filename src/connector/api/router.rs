use anyhow::Result;
use tokio::io::BufReader;
use tracing::info;

use crate::Commands;

use super::container::{Container, ContainerConfig};
use super::controller::{ChatController, ServeController};

pub struct Router {
    config: ContainerConfig,
}

impl Router {
    pub fn new(config: ContainerConfig) -> Self {
        Self { config }
    }

    pub async fn route(self, command: Commands) -> Result<String> {
        match command {
            Commands::Serve { port, bind } => {
                let container = Container::new(self.config)?;
                ServeController::new(&container).serve(bind, port).await
            }
            Commands::Chat { server } => {
                let backend = match server {
                    Some(url) => {
                        info!("Chatting through gateway at {}", url);
                        Container::remote_backend(url, self.config.timeout_secs)
                    }
                    None => Container::new(self.config)?.local_backend(),
                };

                let controller = ChatController::new(backend);
                let transcript = controller
                    .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
                    .await?;

                Ok(format!("Conversación terminada ({} mensajes).", transcript.len()))
            }
        }
    }
}
